//! The route planner as a plain state machine.
//!
//! Operations that need the outside world return a request value. The caller
//! runs it and hands the outcome back through the matching `complete_*`
//! method, in whatever order the outcomes arrive.

pub mod sequence;
pub mod session;
pub mod state;

pub use sequence::{SequenceTracker, Slot, Ticket};
pub use session::Session;
pub use state::{Endpoint, LocationTarget, RouteState};

use crate::sdk::routing::cities::lookup_city;
use crate::sdk::routing::coord::Coordinate;
use crate::sdk::routing::error::RoutingError;
use crate::sdk::routing::estimate::TravelEstimate;

/// Fetch the driving path between two points.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RouteRequest {
    pub ticket: Ticket,
    pub start: Coordinate,
    pub end: Coordinate,
}

/// Geocode `query` remotely and write the answer to `endpoint`.
#[derive(Debug, Clone, PartialEq)]
pub struct LookupRequest {
    pub ticket: Ticket,
    pub endpoint: Endpoint,
    pub query: String,
}

/// Ask the device for its position and write it to `endpoint`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LocateRequest {
    pub ticket: Ticket,
    pub endpoint: Endpoint,
}

#[derive(Debug, Clone, PartialEq)]
pub enum PlaceRequest {
    /// Empty name; nothing changed.
    Ignored,
    /// Found in the city table and already applied.
    Resolved(RouteRequest),
    /// Needs the remote geocoder.
    Lookup(LookupRequest),
}

#[derive(Debug, Default)]
pub struct RoutePlanner {
    state: RouteState,
    sequences: SequenceTracker,
}

impl RoutePlanner {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn state(&self) -> &RouteState {
        &self.state
    }

    /// Raw text edit. Does not geocode.
    pub fn set_text(&mut self, endpoint: Endpoint, text: impl Into<String>) {
        self.state.set_text(endpoint, text.into());
    }

    /// Recomputes the distance and time labels and asks for a fresh route.
    /// Must follow every change to start or end.
    pub fn on_coordinates_changed(&mut self) -> RouteRequest {
        let (start, end) = (self.state.start, self.state.end);
        let estimate = TravelEstimate::between(start, end);
        self.state.distance_label = estimate.distance_label();
        self.state.time_label = estimate.time_label();
        log::debug!(
            "Recomputed {} -> {}: {} / {}",
            start,
            end,
            self.state.distance_label,
            self.state.time_label
        );

        RouteRequest {
            ticket: self.sequences.issue(Slot::Route),
            start,
            end,
        }
    }

    pub fn find_route(&mut self) -> RouteRequest {
        log::info!("Route requested for {} -> {}", self.state.start, self.state.end);
        self.on_coordinates_changed()
    }

    pub fn request_place(&mut self, endpoint: Endpoint, name: &str) -> PlaceRequest {
        if name.is_empty() {
            return PlaceRequest::Ignored;
        }
        if let Some(coord) = lookup_city(name) {
            log::debug!("\"{}\" found in city table", name);
            self.sequences.supersede(endpoint.into());
            return PlaceRequest::Resolved(self.assign(endpoint, coord));
        }
        PlaceRequest::Lookup(LookupRequest {
            ticket: self.sequences.issue(endpoint.into()),
            endpoint,
            query: name.to_string(),
        })
    }

    pub fn complete_lookup(
        &mut self,
        request: &LookupRequest,
        result: Result<Coordinate, RoutingError>,
    ) -> Option<RouteRequest> {
        match result {
            Ok(coord) => self.apply(request.ticket, request.endpoint, coord),
            Err(e) => {
                log::error!("Error fetching location for \"{}\": {}", request.query, e);
                None
            }
        }
    }

    /// `Start`/`End` always asks the device again, even for the current target.
    pub fn set_location_target(&mut self, target: LocationTarget) -> Option<LocateRequest> {
        self.state.location_target = target;
        target.endpoint().map(|endpoint| LocateRequest {
            ticket: self.sequences.issue(endpoint.into()),
            endpoint,
        })
    }

    pub fn complete_locate(
        &mut self,
        request: LocateRequest,
        result: Result<Coordinate, RoutingError>,
    ) -> Option<RouteRequest> {
        match result {
            Ok(coord) => self.apply(request.ticket, request.endpoint, coord),
            Err(e) => {
                log::warn!("Location access denied: {}", e);
                None
            }
        }
    }

    /// Exchanges both coordinates and both texts in one step.
    pub fn swap(&mut self) -> RouteRequest {
        let state = &mut self.state;
        std::mem::swap(&mut state.start, &mut state.end);
        std::mem::swap(&mut state.start_text, &mut state.end_text);
        self.sequences.supersede(Slot::Start);
        self.sequences.supersede(Slot::End);
        self.on_coordinates_changed()
    }

    /// Replaces the path wholesale. Returns whether the result was applied.
    pub fn complete_route(
        &mut self,
        request: &RouteRequest,
        result: Result<Vec<Coordinate>, RoutingError>,
    ) -> bool {
        match result {
            Ok(path) => {
                if !self.sequences.accept(request.ticket) {
                    log::debug!("Discarding stale route #{}", request.ticket.seq());
                    return false;
                }
                log::info!("Route received with {} points", path.len());
                self.state.path = path;
                true
            }
            Err(e) => {
                log::error!("Error fetching route: {}", e);
                false
            }
        }
    }

    fn apply(&mut self, ticket: Ticket, endpoint: Endpoint, coord: Coordinate) -> Option<RouteRequest> {
        if !self.sequences.accept(ticket) {
            log::debug!("Discarding stale {:?} result #{}", endpoint, ticket.seq());
            return None;
        }
        Some(self.assign(endpoint, coord))
    }

    fn assign(&mut self, endpoint: Endpoint, coord: Coordinate) -> RouteRequest {
        if !coord.in_range() {
            log::debug!("Accepting out-of-range {:?} coordinate {}", endpoint, coord);
        }
        self.state.set_coordinate(endpoint, coord);
        self.on_coordinates_changed()
    }
}

#[cfg(test)]
mod tests {
    use super::state::{DEFAULT_END, DEFAULT_START, PENDING_LABEL};
    use super::*;

    const BERLIN: Coordinate = Coordinate::new(52.517, 13.3889);
    const ROME: Coordinate = Coordinate::new(41.8933, 12.4829);

    fn lookup(planner: &mut RoutePlanner, endpoint: Endpoint, name: &str) -> LookupRequest {
        match planner.request_place(endpoint, name) {
            PlaceRequest::Lookup(request) => request,
            other => panic!("expected a remote lookup, got {:?}", other),
        }
    }

    #[test]
    fn starts_with_defaults_and_pending_labels() {
        let planner = RoutePlanner::new();
        let state = planner.state();
        assert_eq!(state.start, DEFAULT_START);
        assert_eq!(state.end, DEFAULT_END);
        assert!(state.path.is_empty());
        assert_eq!(state.location_target, LocationTarget::None);
        assert_eq!(state.distance_label, PENDING_LABEL);
        assert_eq!(state.time_label, PENDING_LABEL);
    }

    #[test]
    fn recompute_is_idempotent_but_refetches() {
        let mut planner = RoutePlanner::new();
        let first = planner.on_coordinates_changed();
        let labels = (planner.state().distance_label.clone(), planner.state().time_label.clone());
        let second = planner.find_route();

        assert_eq!(labels, ("5572.79 km".to_string(), "111.46 hrs".to_string()));
        assert_eq!(planner.state().distance_label, labels.0);
        assert_eq!(planner.state().time_label, labels.1);
        assert_eq!((first.start, first.end), (second.start, second.end));
        assert!(second.ticket.seq() > first.ticket.seq());
    }

    #[test]
    fn empty_place_is_ignored() {
        let mut planner = RoutePlanner::new();
        assert_eq!(planner.request_place(Endpoint::Start, ""), PlaceRequest::Ignored);
        assert_eq!(planner.state().start, DEFAULT_START);
    }

    #[test]
    fn table_city_resolves_synchronously() {
        let mut planner = RoutePlanner::new();
        let request = match planner.request_place(Endpoint::Start, "London") {
            PlaceRequest::Resolved(request) => request,
            other => panic!("expected a table hit, got {:?}", other),
        };
        let london = Coordinate::new(51.5074, -0.1278);
        assert_eq!(planner.state().start, london);
        assert_eq!(request.start, london);
        assert_eq!(request.ticket.slot(), Slot::Route);
    }

    #[test]
    fn remote_lookup_applies_on_success() {
        let mut planner = RoutePlanner::new();
        let request = lookup(&mut planner, Endpoint::End, "Berlin");
        assert_eq!(request.query, "Berlin");
        assert_eq!(planner.state().end, DEFAULT_END);

        let route = planner.complete_lookup(&request, Ok(BERLIN)).unwrap();
        assert_eq!(planner.state().end, BERLIN);
        assert_eq!(route.end, BERLIN);
    }

    #[test]
    fn failed_lookup_keeps_coordinate() {
        let mut planner = RoutePlanner::new();
        planner.on_coordinates_changed();
        let before = planner.state().clone();

        let request = lookup(&mut planner, Endpoint::Start, "Atlantis");
        let route = planner.complete_lookup(&request, Err(RoutingError::EmptyResult("Atlantis".into())));
        assert!(route.is_none());
        assert_eq!(planner.state(), &before);
    }

    #[test]
    fn late_answer_to_older_lookup_is_discarded() {
        let mut planner = RoutePlanner::new();
        let older = lookup(&mut planner, Endpoint::Start, "Berlin");
        let newer = lookup(&mut planner, Endpoint::Start, "Rome");

        assert!(planner.complete_lookup(&newer, Ok(ROME)).is_some());
        assert!(planner.complete_lookup(&older, Ok(BERLIN)).is_none());
        assert_eq!(planner.state().start, ROME);
    }

    #[test]
    fn answers_arriving_in_order_are_all_applied() {
        let mut planner = RoutePlanner::new();
        let older = lookup(&mut planner, Endpoint::Start, "Berlin");
        let newer = lookup(&mut planner, Endpoint::Start, "Rome");

        assert!(planner.complete_lookup(&older, Ok(BERLIN)).is_some());
        assert_eq!(planner.state().start, BERLIN);
        assert!(planner.complete_lookup(&newer, Ok(ROME)).is_some());
        assert_eq!(planner.state().start, ROME);
    }

    #[test]
    fn table_hit_supersedes_pending_lookup() {
        let mut planner = RoutePlanner::new();
        let pending = lookup(&mut planner, Endpoint::End, "Berlin");
        planner.request_place(Endpoint::End, "Paris");

        assert!(planner.complete_lookup(&pending, Ok(BERLIN)).is_none());
        assert_eq!(planner.state().end, Coordinate::new(48.8566, 2.3522));
    }

    #[test]
    fn start_and_end_lookups_do_not_interfere() {
        let mut planner = RoutePlanner::new();
        let start = lookup(&mut planner, Endpoint::Start, "Berlin");
        let end = lookup(&mut planner, Endpoint::End, "Rome");

        assert!(planner.complete_lookup(&end, Ok(ROME)).is_some());
        assert!(planner.complete_lookup(&start, Ok(BERLIN)).is_some());
        assert_eq!((planner.state().start, planner.state().end), (BERLIN, ROME));
    }

    #[test]
    fn geolocation_writes_to_target() {
        let mut planner = RoutePlanner::new();
        let request = planner.set_location_target(LocationTarget::End).unwrap();
        assert_eq!(request.endpoint, Endpoint::End);

        let route = planner.complete_locate(request, Ok(BERLIN)).unwrap();
        assert_eq!(planner.state().end, BERLIN);
        assert_eq!(route.end, BERLIN);
    }

    #[test]
    fn geolocation_denied_keeps_state_and_target() {
        let mut planner = RoutePlanner::new();
        let request = planner.set_location_target(LocationTarget::Start).unwrap();

        assert!(planner
            .complete_locate(request, Err(RoutingError::GeolocationDenied))
            .is_none());
        assert_eq!(planner.state().start, DEFAULT_START);
        assert_eq!(planner.state().location_target, LocationTarget::Start);
    }

    #[test]
    fn clearing_target_issues_no_request() {
        let mut planner = RoutePlanner::new();
        planner.set_location_target(LocationTarget::Start);
        assert!(planner.set_location_target(LocationTarget::None).is_none());
        assert_eq!(planner.state().location_target, LocationTarget::None);
    }

    #[test]
    fn reactivating_target_asks_again() {
        let mut planner = RoutePlanner::new();
        let first = planner.set_location_target(LocationTarget::Start).unwrap();
        planner.complete_locate(first, Ok(BERLIN));
        let second = planner.set_location_target(LocationTarget::Start).unwrap();
        assert!(second.ticket.seq() > first.ticket.seq());

        planner.complete_locate(second, Ok(ROME));
        assert_eq!(planner.state().start, ROME);
    }

    #[test]
    fn swap_is_an_involution() {
        let mut planner = RoutePlanner::new();
        planner.set_text(Endpoint::Start, "here");
        planner.set_text(Endpoint::End, "there");
        planner.on_coordinates_changed();
        let original = planner.state().clone();

        let request = planner.swap();
        assert_eq!(planner.state().start, original.end);
        assert_eq!(planner.state().end, original.start);
        assert_eq!(planner.state().start_text, "there");
        assert_eq!(planner.state().end_text, "here");
        assert_eq!((request.start, request.end), (original.end, original.start));

        planner.swap();
        assert_eq!(planner.state(), &original);
    }

    #[test]
    fn swap_stales_pending_lookups() {
        let mut planner = RoutePlanner::new();
        let pending = lookup(&mut planner, Endpoint::Start, "Berlin");
        planner.swap();
        assert!(planner.complete_lookup(&pending, Ok(BERLIN)).is_none());
        assert_eq!(planner.state().end, DEFAULT_START);
    }

    #[test]
    fn route_replaces_path_wholesale() {
        let mut planner = RoutePlanner::new();
        let first = planner.on_coordinates_changed();
        assert!(planner.complete_route(&first, Ok(vec![BERLIN, ROME])));
        assert_eq!(planner.state().path, vec![BERLIN, ROME]);

        let second = planner.find_route();
        assert!(planner.complete_route(&second, Ok(vec![ROME])));
        assert_eq!(planner.state().path, vec![ROME]);
    }

    #[test]
    fn route_without_candidates_keeps_path() {
        let mut planner = RoutePlanner::new();
        let request = planner.on_coordinates_changed();
        assert!(!planner.complete_route(&request, Err(RoutingError::EmptyResult("route".into()))));
        assert!(planner.state().path.is_empty());

        let request = planner.find_route();
        planner.complete_route(&request, Ok(vec![BERLIN]));
        let request = planner.find_route();
        planner.complete_route(&request, Err(RoutingError::RawApiError("busy".into())));
        assert_eq!(planner.state().path, vec![BERLIN]);
    }

    #[test]
    fn stale_route_is_discarded() {
        let mut planner = RoutePlanner::new();
        let older = planner.on_coordinates_changed();
        let newer = planner.find_route();

        assert!(planner.complete_route(&newer, Ok(vec![ROME])));
        assert!(!planner.complete_route(&older, Ok(vec![BERLIN])));
        assert_eq!(planner.state().path, vec![ROME]);
    }

    #[test]
    fn identical_endpoints_give_zero_labels() {
        let mut planner = RoutePlanner::new();
        planner.request_place(Endpoint::Start, "Dubai");
        planner.request_place(Endpoint::End, "Dubai");
        assert_eq!(planner.state().distance_label, "0.00 km");
        assert_eq!(planner.state().time_label, "0.00 hrs");
    }
}
