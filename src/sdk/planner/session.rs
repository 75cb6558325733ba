use super::state::{Endpoint, LocationTarget, RouteState};
use super::{PlaceRequest, RoutePlanner, RouteRequest};
use crate::sdk::routing::service::{Geolocator, RoutingProvider};

/// Runs a planner against real providers, one event at a time.
///
/// Every request the planner emits is carried out before the call returns,
/// and failures end up in the log rather than in the return value.
pub struct Session<P, L> {
    planner: RoutePlanner,
    provider: P,
    geolocator: L,
}

impl<P: RoutingProvider, L: Geolocator> Session<P, L> {
    pub fn new(provider: P, geolocator: L) -> Self {
        Self {
            planner: RoutePlanner::new(),
            provider,
            geolocator,
        }
    }

    pub fn state(&self) -> &RouteState {
        self.planner.state()
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    pub fn geolocator(&self) -> &L {
        &self.geolocator
    }

    /// Initial distance, time and route for the default endpoints.
    pub fn mount(&mut self) {
        let request = self.planner.on_coordinates_changed();
        self.fetch_route(request);
    }

    pub fn set_text(&mut self, endpoint: Endpoint, text: &str) {
        self.planner.set_text(endpoint, text);
    }

    /// City selection or free-text search for one endpoint.
    pub fn lookup(&mut self, endpoint: Endpoint, place: &str) {
        match self.planner.request_place(endpoint, place) {
            PlaceRequest::Ignored => {}
            PlaceRequest::Resolved(route) => self.fetch_route(route),
            PlaceRequest::Lookup(request) => {
                let result = self.provider.geocode(&request.query);
                if let Some(route) = self.planner.complete_lookup(&request, result) {
                    self.fetch_route(route);
                }
            }
        }
    }

    pub fn locate(&mut self, target: LocationTarget) {
        if let Some(request) = self.planner.set_location_target(target) {
            let result = self.geolocator.current_position();
            if let Some(route) = self.planner.complete_locate(request, result) {
                self.fetch_route(route);
            }
        }
    }

    pub fn swap(&mut self) {
        let request = self.planner.swap();
        self.fetch_route(request);
    }

    pub fn find_route(&mut self) {
        let request = self.planner.find_route();
        self.fetch_route(request);
    }

    fn fetch_route(&mut self, request: RouteRequest) {
        let result = self.provider.route_path(request.start, request.end);
        self.planner.complete_route(&request, result);
    }
}
