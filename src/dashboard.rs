//! Everything the dashboard shows, loaded in one pass over the store

use tracing::info;

use crate::error::Result;
use crate::geo::Geocode;
use crate::map::{MapRenderer, WorldMap};
use crate::report::Table;
use crate::store::WineStore;

/// Rankings are cut to this many rows for display
pub const TOP_N: usize = 10;

pub struct DashboardData {
    pub price_rating: Table,
    pub winery_price: Table,
    pub country_price: Table,
    pub province_price: Table,
    pub wines_per_country: Table,
    pub wines_per_grape: Table,
    pub best_wine: Table,
    pub map: WorldMap,
}

impl DashboardData {
    /// Run every report; the first failure aborts the whole load
    pub fn load<G: Geocode>(store: &WineStore, renderer: &MapRenderer<G>) -> Result<Self> {
        let price_rating = store.price_rating()?;
        let winery_price = store.avg_price_per_winery()?.head(TOP_N);

        let country_price = store.avg_price_per_country()?;
        let province_price = store.avg_price_per_province()?.head(TOP_N);
        let map = renderer.render(&country_price)?;

        let wines_per_country = store.wines_per_country()?.head(TOP_N);
        let wines_per_grape = store.wines_per_grape()?.head(TOP_N);
        let best_wine = store.location_of_best_wine()?;

        info!(
            reviews = price_rating.len(),
            markers = map.marker_count(),
            "dashboard data loaded"
        );

        Ok(Self {
            price_rating,
            winery_price,
            country_price: country_price.head(TOP_N),
            province_price,
            wines_per_country,
            wines_per_grape,
            best_wine,
            map,
        })
    }
}
