//! Clustered marker map of average prices per country

mod html;

use std::path::Path;
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::geo::{Coordinates, Geocode, StaticGeocoder};
use crate::report::{Table, Value};

/// Tile layer used when no other is requested
pub const DEFAULT_TILES: Tiles = Tiles::CartoDbPositron;

const MARKER_RADIUS: f64 = 20.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum Tiles {
    /// Light CARTO basemap
    #[value(name = "positron")]
    CartoDbPositron,
    /// Standard OpenStreetMap tiles
    #[value(name = "osm")]
    OpenStreetMap,
}

impl Tiles {
    pub fn url(&self) -> &'static str {
        match self {
            Tiles::CartoDbPositron => "https://{s}.basemaps.cartocdn.com/light_all/{z}/{x}/{y}{r}.png",
            Tiles::OpenStreetMap => "https://tile.openstreetmap.org/{z}/{x}/{y}.png",
        }
    }

    pub fn attribution(&self) -> &'static str {
        match self {
            Tiles::CartoDbPositron => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors &copy; <a href=\"https://carto.com/attributions\">CARTO</a>"
            }
            Tiles::OpenStreetMap => {
                "&copy; <a href=\"https://www.openstreetmap.org/copyright\">OpenStreetMap</a> contributors"
            }
        }
    }
}

/// One circle on the map
#[derive(Debug, Clone, PartialEq)]
pub struct CircleMarker {
    pub location: Coordinates,
    /// Country name as stored, not escaped
    pub label: String,
    /// Average price truncated to whole dollars
    pub price: i64,
    pub radius: f64,
    pub popup: String,
    pub fill: bool,
    pub fill_opacity: f64,
}

/// Rendered map artifact: a tile layer and one marker cluster
#[derive(Debug, Clone, PartialEq)]
pub struct WorldMap {
    pub tiles: Tiles,
    pub markers: Vec<CircleMarker>,
}

impl WorldMap {
    pub fn marker_count(&self) -> usize {
        self.markers.len()
    }

    /// Self-contained Leaflet page
    pub fn to_html(&self) -> Result<String> {
        html::render_page(self)
    }

    pub fn save(&self, path: &Path) -> Result<()> {
        let page = self.to_html()?;
        std::fs::write(path, page).map_err(|source| Error::Io {
            path: path.to_path_buf(),
            source,
        })?;
        info!(path = %path.display(), markers = self.markers.len(), "map written");
        Ok(())
    }
}

/// Turns `(country, price)` tables into a [`WorldMap`]
pub struct MapRenderer<G = StaticGeocoder> {
    geocoder: G,
    tiles: Tiles,
}

impl MapRenderer<StaticGeocoder> {
    pub fn new() -> Self {
        Self::with_geocoder(StaticGeocoder)
    }
}

impl Default for MapRenderer<StaticGeocoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<G: Geocode> MapRenderer<G> {
    pub fn with_geocoder(geocoder: G) -> Self {
        Self {
            geocoder,
            tiles: DEFAULT_TILES,
        }
    }

    pub fn tiles(mut self, tiles: Tiles) -> Self {
        self.tiles = tiles;
        self
    }

    /// Copy of `table` with `latitude` and `longitude` columns appended,
    /// keeping only rows whose country resolved to a location
    pub fn locate_rows(&self, table: &Table) -> Result<Table> {
        let country_idx = table.column_index("country")?;
        table.column_index("price")?;

        let rows: Vec<Vec<Value>> = table
            .rows()
            .iter()
            .filter_map(|row| {
                let country = row[country_idx].as_str().unwrap_or_default();
                let coords = self.geocoder.locate(country);
                if coords.is_unknown() {
                    return None;
                }
                let mut located = row.clone();
                located.push(Value::Real(coords.latitude));
                located.push(Value::Real(coords.longitude));
                Some(located)
            })
            .collect();

        debug!(
            rows = table.len(),
            located = rows.len(),
            "resolved country coordinates"
        );

        Ok(table.with_columns(["latitude", "longitude"], rows))
    }

    pub fn render(&self, table: &Table) -> Result<WorldMap> {
        let located = self.locate_rows(table)?;
        let countries = located.column("country")?;
        let prices = located.f64_column("price")?;
        let latitudes = located.f64_column("latitude")?;
        let longitudes = located.f64_column("longitude")?;

        let markers = countries
            .into_iter()
            .zip(prices)
            .zip(latitudes.into_iter().zip(longitudes))
            .map(|((country, price), (lat, lon))| {
                let country = country.as_str().unwrap_or_default();
                let price = price.trunc() as i64;
                CircleMarker {
                    location: Coordinates::new(lat, lon),
                    label: country.to_string(),
                    price,
                    radius: MARKER_RADIUS,
                    popup: popup_text(country, price),
                    fill: true,
                    fill_opacity: 0.0,
                }
            })
            .collect();

        Ok(WorldMap {
            tiles: self.tiles,
            markers,
        })
    }
}

/// Popup shown when a marker is clicked
pub fn popup_text(country: &str, price: i64) -> String {
    format!(
        "Country: {}<br>Average price: {} USD<br>",
        html::escape(country),
        price
    )
}
