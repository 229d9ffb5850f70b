//! Static country geocoding

/// A latitude/longitude pair in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coordinates {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinates {
    /// Sentinel for countries outside the lookup table
    pub const UNKNOWN: Coordinates = Coordinates::new(0.0, 0.0);

    pub const fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }

    /// A zero latitude marks an unresolved location, so places on the equator
    /// read as unknown too.
    pub fn is_unknown(&self) -> bool {
        self.latitude == 0.0
    }
}

/// Countries with a fixed map location
pub static KNOWN_COUNTRIES: &[(&str, Coordinates)] = &[
    ("Switzerland", Coordinates::new(46.94809, 7.44744)),
    ("England", Coordinates::new(51.509865, -0.118092)),
    ("Germany", Coordinates::new(48.137154, 11.576124)),
    ("Hungary", Coordinates::new(47.497913, 19.040236)),
    ("Canada", Coordinates::new(50.0, -85.0)),
    ("US", Coordinates::new(40.730610, -73.935242)),
    ("Italy", Coordinates::new(41.902782, 12.496366)),
    ("Australia", Coordinates::new(-33.865143, 151.209900)),
    ("Israel", Coordinates::new(31.771959, 35.217018)),
    ("France", Coordinates::new(48.864716, 2.349014)),
];

/// Coordinates of a country by its display name, or [`Coordinates::UNKNOWN`]
pub fn locate(country: &str) -> Coordinates {
    KNOWN_COUNTRIES
        .iter()
        .find(|(name, _)| *name == country)
        .map(|(_, coords)| *coords)
        .unwrap_or(Coordinates::UNKNOWN)
}

/// Resolves country names to map coordinates
pub trait Geocode {
    fn locate(&self, country: &str) -> Coordinates;
}

/// Lookup in [`KNOWN_COUNTRIES`]
#[derive(Debug, Clone, Copy, Default)]
pub struct StaticGeocoder;

impl Geocode for StaticGeocoder {
    fn locate(&self, country: &str) -> Coordinates {
        locate(country)
    }
}
