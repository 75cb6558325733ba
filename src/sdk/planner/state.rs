use crate::sdk::routing::coord::Coordinate;
use serde::Serialize;

pub const DEFAULT_START: Coordinate = Coordinate::new(51.505, -0.09);
pub const DEFAULT_END: Coordinate = Coordinate::new(40.7128, -74.006);

/// Shown until the first recompute.
pub const PENDING_LABEL: &str = "...";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Endpoint {
    Start,
    End,
}

/// Which endpoint, if any, "use my location" writes to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum LocationTarget {
    #[default]
    None,
    Start,
    End,
}

impl LocationTarget {
    pub fn endpoint(self) -> Option<Endpoint> {
        match self {
            LocationTarget::None => None,
            LocationTarget::Start => Some(Endpoint::Start),
            LocationTarget::End => Some(Endpoint::End),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RouteState {
    pub start: Coordinate,
    pub end: Coordinate,
    pub start_text: String,
    pub end_text: String,
    /// Driving path in path order; empty until a route arrives.
    pub path: Vec<Coordinate>,
    pub location_target: LocationTarget,
    pub distance_label: String,
    pub time_label: String,
}

impl Default for RouteState {
    fn default() -> Self {
        Self {
            start: DEFAULT_START,
            end: DEFAULT_END,
            start_text: String::new(),
            end_text: String::new(),
            path: Vec::new(),
            location_target: LocationTarget::None,
            distance_label: PENDING_LABEL.to_string(),
            time_label: PENDING_LABEL.to_string(),
        }
    }
}

impl RouteState {
    pub fn coordinate(&self, endpoint: Endpoint) -> Coordinate {
        match endpoint {
            Endpoint::Start => self.start,
            Endpoint::End => self.end,
        }
    }

    pub(crate) fn set_coordinate(&mut self, endpoint: Endpoint, coord: Coordinate) {
        match endpoint {
            Endpoint::Start => self.start = coord,
            Endpoint::End => self.end = coord,
        }
    }

    pub fn text(&self, endpoint: Endpoint) -> &str {
        match endpoint {
            Endpoint::Start => &self.start_text,
            Endpoint::End => &self.end_text,
        }
    }

    pub(crate) fn set_text(&mut self, endpoint: Endpoint, text: String) {
        match endpoint {
            Endpoint::Start => self.start_text = text,
            Endpoint::End => self.end_text = text,
        }
    }
}
