//! Text control panel and GeoJSON map view for a [`RouteState`].

use crate::sdk::planner::state::{LocationTarget, RouteState};
use crate::sdk::routing::cities::city_names;
use crate::sdk::routing::coord::Coordinate;
use serde::Serialize;
use serde_json::{json, Value};
use std::fmt;

pub const DEFAULT_ZOOM: u8 = 5;
pub const ROUTE_COLOR: &str = "blue";

/// The sidebar: location buttons, the two input groups and the readout.
pub struct ControlPanel<'a> {
    state: &'a RouteState,
}

impl<'a> ControlPanel<'a> {
    pub fn new(state: &'a RouteState) -> Self {
        Self { state }
    }

    pub fn readout(&self) -> String {
        format!(
            "Distance: {} | Time: {}",
            self.state.distance_label, self.state.time_label
        )
    }
}

impl fmt::Display for ControlPanel<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.state;
        let button = |target: LocationTarget, label: &str| {
            if state.location_target == target {
                format!("[{}]", label)
            } else {
                format!(" {} ", label)
            }
        };
        let text = |t: &str| if t.is_empty() { "-".to_string() } else { t.to_string() };

        writeln!(f, "Road Router")?;
        writeln!(
            f,
            "Use current location: {} {} {}",
            button(LocationTarget::Start, "Set as Start"),
            button(LocationTarget::End, "Set as Destination"),
            button(LocationTarget::None, "Clear")
        )?;
        writeln!(f, "Start:       {} {}", text(&state.start_text), state.start)?;
        writeln!(f, "Destination: {} {}", text(&state.end_text), state.end)?;
        writeln!(f, "Cities: {}", city_names().collect::<Vec<_>>().join(", "))?;
        if state.path.is_empty() {
            writeln!(f, "Route: none")?;
        } else {
            writeln!(f, "Route: {} points", state.path.len())?;
        }
        write!(f, "{}", self.readout())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Marker {
    pub position: Coordinate,
    pub label: &'static str,
}

/// What the map shows: tiles centred on the start, two markers, the route.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapView {
    pub center: Coordinate,
    pub zoom: u8,
    pub tile_url: String,
    pub markers: [Marker; 2],
    pub polyline: Option<Vec<Coordinate>>,
}

impl MapView {
    pub fn from_state(state: &RouteState, tile_url: &str) -> Self {
        Self {
            center: state.start,
            zoom: DEFAULT_ZOOM,
            tile_url: tile_url.to_string(),
            markers: [
                Marker {
                    position: state.start,
                    label: "Start",
                },
                Marker {
                    position: state.end,
                    label: "Destination",
                },
            ],
            polyline: (!state.path.is_empty()).then(|| state.path.clone()),
        }
    }

    /// A `FeatureCollection` with the markers as points and the route as a
    /// line string; the view settings travel as foreign members.
    pub fn to_geojson(&self) -> Value {
        let mut features: Vec<Value> = self
            .markers
            .iter()
            .map(|marker| {
                json!({
                    "type": "Feature",
                    "geometry": { "type": "Point", "coordinates": marker.position.to_lon_lat() },
                    "properties": { "label": marker.label },
                })
            })
            .collect();

        if let Some(path) = &self.polyline {
            let coordinates: Vec<[f64; 2]> = path.iter().map(|c| c.to_lon_lat()).collect();
            features.push(json!({
                "type": "Feature",
                "geometry": { "type": "LineString", "coordinates": coordinates },
                "properties": { "color": ROUTE_COLOR },
            }));
        }

        json!({
            "type": "FeatureCollection",
            "center": self.center.to_lon_lat(),
            "zoom": self.zoom,
            "tile_url": self.tile_url,
            "features": features,
        })
    }
}
