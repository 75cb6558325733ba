use serde::Deserialize;

// --- Nominatim search response ---

// Nominatim sends coordinates as strings
#[derive(Deserialize, Debug)]
pub struct Place {
    pub lat: String,
    pub lon: String,
}

// --- OSRM route response ---

#[derive(Deserialize, Debug)]
pub struct RouteResponse {
    #[serde(default)]
    pub routes: Vec<Route>,
}
#[derive(Deserialize, Debug)]
pub struct Route {
    pub geometry: Geometry,
}
#[derive(Deserialize, Debug)]
pub struct Geometry {
    pub coordinates: Vec<[f64; 2]>,
}
