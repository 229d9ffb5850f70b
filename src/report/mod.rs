//! Named aggregation reports over the wine store
//!
//! Every report is a parameterless read query returning a [`Table`] whose
//! column names are fixed, so callers address columns by name.

mod queries;
pub mod table;

use rusqlite::Connection;
use std::fmt;
use std::time::Instant;
use tracing::debug;

use crate::error::{Error, Result};

pub use table::{Table, Value};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, clap::ValueEnum)]
pub enum Report {
    /// Rating and price of every review with a known price
    PriceRating,
    /// Average wine price per winery, most expensive first
    AvgPricePerWinery,
    /// Average rating per wine, best first
    AvgRatingPerWine,
    /// Location of the wine with the best average rating
    BestWineLocation,
    /// Average wine price per province, most expensive first
    AvgPricePerProvince,
    /// Average wine price per country, most expensive first
    AvgPricePerCountry,
    /// Number of wines per country, largest first
    WinesPerCountry,
    /// Number of wines per grape, largest first
    WinesPerGrape,
}

impl Report {
    pub const ALL: [Report; 8] = [
        Report::PriceRating,
        Report::AvgPricePerWinery,
        Report::AvgRatingPerWine,
        Report::BestWineLocation,
        Report::AvgPricePerProvince,
        Report::AvgPricePerCountry,
        Report::WinesPerCountry,
        Report::WinesPerGrape,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Report::PriceRating => "price-rating",
            Report::AvgPricePerWinery => "avg-price-per-winery",
            Report::AvgRatingPerWine => "avg-rating-per-wine",
            Report::BestWineLocation => "best-wine-location",
            Report::AvgPricePerProvince => "avg-price-per-province",
            Report::AvgPricePerCountry => "avg-price-per-country",
            Report::WinesPerCountry => "wines-per-country",
            Report::WinesPerGrape => "wines-per-grape",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            Report::PriceRating => "Rating and price of every review with a known price",
            Report::AvgPricePerWinery => "Average wine price per winery, most expensive first",
            Report::AvgRatingPerWine => "Average rating per wine, best first",
            Report::BestWineLocation => "Location of the wine with the best average rating",
            Report::AvgPricePerProvince => "Average wine price per province, most expensive first",
            Report::AvgPricePerCountry => "Average wine price per country, most expensive first",
            Report::WinesPerCountry => "Number of wines per country, largest first",
            Report::WinesPerGrape => "Number of wines per grape, largest first",
        }
    }

    /// Column names of the result, in order
    pub fn columns(&self) -> &'static [&'static str] {
        match self {
            Report::PriceRating => &["rating", "price"],
            Report::AvgPricePerWinery => &["avg_price", "winery"],
            Report::AvgRatingPerWine => &["avg_rating", "wine"],
            Report::BestWineLocation => {
                &["wine", "region1", "region2", "province", "country", "winery"]
            }
            Report::AvgPricePerProvince => &["price", "province"],
            Report::AvgPricePerCountry => &["price", "country"],
            Report::WinesPerCountry => &["number", "country"],
            Report::WinesPerGrape => &["number", "grape"],
        }
    }

    /// The metric column rankings are sorted on, if any
    pub fn metric(&self) -> Option<&'static str> {
        match self {
            Report::PriceRating | Report::BestWineLocation => None,
            Report::AvgPricePerWinery => Some("avg_price"),
            Report::AvgRatingPerWine => Some("avg_rating"),
            Report::AvgPricePerProvince | Report::AvgPricePerCountry => Some("price"),
            Report::WinesPerCountry | Report::WinesPerGrape => Some("number"),
        }
    }

    fn sql(&self) -> &'static str {
        match self {
            Report::PriceRating => queries::PRICE_RATING,
            Report::AvgPricePerWinery => queries::AVG_PRICE_PER_WINERY,
            Report::AvgRatingPerWine => queries::AVG_RATING_PER_WINE,
            Report::BestWineLocation => queries::BEST_WINE_LOCATION,
            Report::AvgPricePerProvince => queries::AVG_PRICE_PER_PROVINCE,
            Report::AvgPricePerCountry => queries::AVG_PRICE_PER_COUNTRY,
            Report::WinesPerCountry => queries::WINES_PER_COUNTRY,
            Report::WinesPerGrape => queries::WINES_PER_GRAPE,
        }
    }

    /// Execute the report's query and collect the result
    pub fn run(&self, conn: &Connection) -> Result<Table> {
        let start = Instant::now();
        let query_err = |source| Error::Query {
            report: self.name(),
            source,
        };

        let mut stmt = conn.prepare_cached(self.sql()).map_err(query_err)?;
        let columns = self.columns();
        let mut table = Table::new(columns.iter().copied());

        let mut rows = stmt.query([]).map_err(query_err)?;
        while let Some(row) = rows.next().map_err(query_err)? {
            let mut values = Vec::with_capacity(columns.len());
            for idx in 0..columns.len() {
                values.push(Value::from(row.get_ref(idx).map_err(query_err)?));
            }
            table.push_row(values);
        }

        debug!(
            report = self.name(),
            rows = table.len(),
            elapsed_ms = start.elapsed().as_millis() as u64,
            "report complete"
        );

        Ok(table)
    }
}

impl fmt::Display for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::ValueEnum;

    #[test]
    fn test_names_match_cli_values() {
        for report in Report::ALL {
            let parsed = Report::from_str(report.name(), false).unwrap();
            assert_eq!(parsed, report);
        }
    }

    #[test]
    fn test_metric_is_a_column() {
        for report in Report::ALL {
            if let Some(metric) = report.metric() {
                assert!(report.columns().contains(&metric), "{}", report);
            }
        }
    }

    #[test]
    fn test_country_price_feeds_the_map() {
        let columns = Report::AvgPricePerCountry.columns();
        assert!(columns.contains(&"country"));
        assert!(columns.contains(&"price"));
    }

    #[test]
    fn test_query_against_empty_database_is_data_access_error() {
        let conn = Connection::open_in_memory().unwrap();
        let err = Report::WinesPerGrape.run(&conn).unwrap_err();
        assert!(err.is_data_access());
        assert!(matches!(err, Error::Query { report: "wines-per-grape", .. }));
    }
}
