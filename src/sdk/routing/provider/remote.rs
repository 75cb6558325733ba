use super::types::{Place, RouteResponse};
use crate::sdk::config::RouterConfig;
use crate::sdk::routing::coord::Coordinate;
use crate::sdk::routing::error::{OsrmErrorPayload, RoutingError};
use crate::sdk::routing::service::RoutingProvider;
use crate::sdk::util::rate_limit::{wait_for, Limiter};
use reqwest::blocking::{Client, Request};
use reqwest::StatusCode;

/// Nominatim for geocoding, OSRM for driving routes.
pub struct RemoteProvider {
    client: Client,
    geocode_base_url: String,
    route_base_url: String,
    limiter: Limiter,
}

impl RemoteProvider {
    pub fn new(config: &RouterConfig, limiter: Limiter) -> Result<Self, RoutingError> {
        let client = Client::builder()
            .user_agent(config.user_agent.as_str())
            .timeout(config.request_timeout)
            .build()?;
        Ok(Self {
            client,
            geocode_base_url: config.geocode_base_url.trim_end_matches('/').to_string(),
            route_base_url: config.route_base_url.trim_end_matches('/').to_string(),
            limiter,
        })
    }
}

impl RemoteProvider {
    /// `GET {base}/search?format=json&q=<place>`, with the place escaped.
    pub fn geocode_request(&self, place: &str) -> Result<Request, RoutingError> {
        let url = format!("{}/search", self.geocode_base_url);
        Ok(self
            .client
            .get(url)
            .query(&[("format", "json"), ("q", place)])
            .build()?)
    }

    /// Full GeoJSON geometry between two points.
    pub fn route_request(&self, start: Coordinate, end: Coordinate) -> Result<Request, RoutingError> {
        Ok(self
            .client
            .get(route_url(&self.route_base_url, start, end))
            .query(&[("overview", "full"), ("geometries", "geojson")])
            .build()?)
    }
}

impl RoutingProvider for RemoteProvider {
    fn geocode(&self, place: &str) -> Result<Coordinate, RoutingError> {
        let request = self.geocode_request(place)?;
        let url = request.url().clone();
        wait_for(&self.limiter);
        log::debug!("[PROVIDER] Calling remote geocode for place: \"{}\"", place);

        let response = self.client.execute(request)?;
        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            log::error!(
                "Geocoder returned non-success status: {}. URL: {}\nBody: {}",
                status,
                url,
                text
            );
            return Err(RoutingError::RawApiError(text));
        }

        parse_places(&text, place).map_err(|e| {
            log::error!("Failed to read geocode response. URL: {}\nError: {}. Body: {}", url, e, text);
            e
        })
    }

    fn route_path(&self, start: Coordinate, end: Coordinate) -> Result<Vec<Coordinate>, RoutingError> {
        let request = self.route_request(start, end)?;
        let url = request.url().clone();
        wait_for(&self.limiter);
        log::debug!("[PROVIDER] Calling remote route for {} -> {}", start, end);

        let response = match self.client.execute(request) {
            Ok(resp) => resp,
            Err(e) => {
                log::error!("Failed to send route request. URL: {}\nError: {}", url, e);
                return Err(e.into());
            }
        };

        let status = response.status();
        let text = response.text()?;

        if !status.is_success() {
            return Err(route_error(status, text));
        }

        parse_route(&text).map_err(|e| {
            log::error!("Failed to read route response. URL: {}\nError: {}. Body: {}", url, e, text);
            e
        })
    }
}

/// OSRM wants `lon,lat` pairs in the path.
pub fn route_url(base_url: &str, start: Coordinate, end: Coordinate) -> String {
    format!(
        "{}/route/v1/driving/{},{};{},{}",
        base_url, start.lon, start.lat, end.lon, end.lat
    )
}

/// First place of a Nominatim search result.
pub fn parse_places(text: &str, place: &str) -> Result<Coordinate, RoutingError> {
    let places: Vec<Place> = serde_json::from_str(text)?;
    let first = places
        .first()
        .ok_or_else(|| RoutingError::EmptyResult(place.to_string()))?;
    Ok(Coordinate::new(first.lat.trim().parse()?, first.lon.trim().parse()?))
}

/// Geometry of the first OSRM route, back in lat/lon order.
pub fn parse_route(text: &str) -> Result<Vec<Coordinate>, RoutingError> {
    let response: RouteResponse = serde_json::from_str(text)?;
    let route = response
        .routes
        .into_iter()
        .next()
        .ok_or_else(|| RoutingError::EmptyResult("route".to_string()))?;
    Ok(route
        .geometry
        .coordinates
        .into_iter()
        .map(Coordinate::from_lon_lat)
        .collect())
}

fn route_error(status: StatusCode, text: String) -> RoutingError {
    // Try to parse the structured error first
    if let Ok(payload) = serde_json::from_str::<OsrmErrorPayload>(&text) {
        RoutingError::ApiError {
            code: payload.code,
            message: payload.message,
        }
    } else {
        log::error!(
            "Router returned non-success status: {}. Unparseable Body: {}",
            status,
            text
        );
        RoutingError::RawApiError(text)
    }
}
