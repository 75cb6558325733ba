pub mod cities;
pub mod coord;
pub mod error;
pub mod estimate;
pub mod geolocate;
pub mod provider;
pub mod service;

pub use coord::Coordinate;
pub use error::{FailureKind, RoutingError};
pub use estimate::{haversine_km, TravelEstimate};
pub use geolocate::ConfiguredGeolocator;
pub use provider::RemoteProvider;
pub use service::{Geolocator, RoutingProvider};
