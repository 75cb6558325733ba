use super::coord::Coordinate;

/// Cities offered by the selector, in display order.
pub const POPULAR_CITIES: [(&str, Coordinate); 7] = [
    ("New York", Coordinate::new(40.7128, -74.006)),
    ("London", Coordinate::new(51.5074, -0.1278)),
    ("Tokyo", Coordinate::new(35.6895, 139.6917)),
    ("Paris", Coordinate::new(48.8566, 2.3522)),
    ("Dubai", Coordinate::new(25.276987, 55.296249)),
    ("Sydney", Coordinate::new(-33.8688, 151.2093)),
    ("Mumbai", Coordinate::new(19.076, 72.8777)),
];

/// Exact, case-sensitive lookup in the city table.
pub fn lookup_city(name: &str) -> Option<Coordinate> {
    POPULAR_CITIES
        .iter()
        .find(|(label, _)| *label == name)
        .map(|(_, coord)| *coord)
}

pub fn city_names() -> impl Iterator<Item = &'static str> {
    POPULAR_CITIES.iter().map(|(label, _)| *label)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn london_resolves_to_table_entry() {
        assert_eq!(lookup_city("London"), Some(Coordinate::new(51.5074, -0.1278)));
    }

    #[test]
    fn lookup_is_case_sensitive() {
        assert_eq!(lookup_city("london"), None);
        assert_eq!(lookup_city("LONDON"), None);
        assert_eq!(lookup_city(" London"), None);
    }

    #[test]
    fn labels_are_unique_and_ordered() {
        let names: Vec<_> = city_names().collect();
        assert_eq!(
            names,
            ["New York", "London", "Tokyo", "Paris", "Dubai", "Sydney", "Mumbai"]
        );
        let mut deduped = names.clone();
        deduped.sort_unstable();
        deduped.dedup();
        assert_eq!(deduped.len(), names.len());
    }
}
