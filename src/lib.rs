pub mod sdk;

pub use sdk::config::RouterConfig;
pub use sdk::planner::{Endpoint, LocationTarget, RoutePlanner, RouteState, Session};
pub use sdk::routing::{Coordinate, RemoteProvider, RoutingError, RoutingProvider, TravelEstimate};
pub use sdk::view::{ControlPanel, MapView};
