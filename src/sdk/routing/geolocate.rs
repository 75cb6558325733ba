use super::coord::Coordinate;
use super::error::RoutingError;
use super::service::Geolocator;

/// Device position supplied by configuration or the command line.
/// Without one, every request fails as unavailable.
#[derive(Debug, Clone, Default)]
pub struct ConfiguredGeolocator {
    position: Option<Coordinate>,
}

impl ConfiguredGeolocator {
    pub fn new(position: Option<Coordinate>) -> Self {
        Self { position }
    }
}

impl Geolocator for ConfiguredGeolocator {
    fn current_position(&self) -> Result<Coordinate, RoutingError> {
        match self.position {
            Some(coord) => {
                log::debug!("[GEOLOCATE] Reporting configured position {}", coord);
                Ok(coord)
            }
            None => Err(RoutingError::GeolocationUnavailable),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reports_configured_position_every_time() {
        let here = Coordinate::new(48.1173, -1.6778);
        let geo = ConfiguredGeolocator::new(Some(here));
        assert_eq!(geo.current_position().unwrap(), here);
        assert_eq!(geo.current_position().unwrap(), here);
    }

    #[test]
    fn missing_position_is_unavailable() {
        let geo = ConfiguredGeolocator::default();
        assert!(matches!(
            geo.current_position(),
            Err(RoutingError::GeolocationUnavailable)
        ));
    }
}
