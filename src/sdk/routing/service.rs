use super::coord::Coordinate;
use super::error::RoutingError;

pub trait RoutingProvider {
    /// Resolves a free-text place name to the first matching coordinate.
    fn geocode(&self, place: &str) -> Result<Coordinate, RoutingError>;

    /// Driving path between two points, in path order.
    fn route_path(&self, start: Coordinate, end: Coordinate) -> Result<Vec<Coordinate>, RoutingError>;
}

/// Single-shot access to the device position.
pub trait Geolocator {
    fn current_position(&self) -> Result<Coordinate, RoutingError>;
}
