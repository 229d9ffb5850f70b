//! Read-only session on the wine store

use rusqlite::{Connection, OpenFlags};
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{Error, Result};
use crate::report::{Report, Table};
use crate::schema::ALL_TABLES;

/// One open, read-only connection to the wine database.
///
/// The connection is released by [`WineStore::close`] or when the store is
/// dropped, whichever comes first.
pub struct WineStore {
    conn: Connection,
    path: PathBuf,
}

impl WineStore {
    /// Open the database read-only and check it has every table and column the reports use
    pub fn open(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::NotFound {
                path: path.to_path_buf(),
            });
        }

        let conn = Connection::open_with_flags(
            path,
            OpenFlags::SQLITE_OPEN_READ_ONLY | OpenFlags::SQLITE_OPEN_NO_MUTEX,
        )
        .map_err(|source| Error::Open {
            path: path.to_path_buf(),
            source,
        })?;

        let store = Self {
            conn,
            path: path.to_path_buf(),
        };
        store.verify_schema()?;

        info!(path = %path.display(), "opened wine database");
        Ok(store)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Fail with a data-access error if a required table or column is missing
    pub fn verify_schema(&self) -> Result<()> {
        let open_err = |source| Error::Open {
            path: self.path.clone(),
            source,
        };
        let mut stmt = self
            .conn
            .prepare("SELECT lower(name) FROM pragma_table_info(?1)")
            .map_err(open_err)?;

        for schema in ALL_TABLES {
            let columns: Vec<String> = stmt
                .query_map([schema.name], |row| row.get::<_, String>(0))
                .and_then(|rows| rows.collect())
                .map_err(open_err)?;

            if columns.is_empty() {
                return Err(Error::MissingTable { table: schema.name });
            }

            for col in schema.columns {
                if !columns.iter().any(|c| c == col.name) {
                    return Err(Error::MissingSchemaColumn {
                        table: schema.name,
                        column: col.name,
                    });
                }
            }
        }

        debug!(tables = ALL_TABLES.len(), "schema verified");
        Ok(())
    }

    /// Run one report against the store
    pub fn run(&self, report: Report) -> Result<Table> {
        report.run(&self.conn)
    }

    pub fn price_rating(&self) -> Result<Table> {
        self.run(Report::PriceRating)
    }

    pub fn avg_price_per_winery(&self) -> Result<Table> {
        self.run(Report::AvgPricePerWinery)
    }

    pub fn avg_rating_per_wine(&self) -> Result<Table> {
        self.run(Report::AvgRatingPerWine)
    }

    pub fn location_of_best_wine(&self) -> Result<Table> {
        self.run(Report::BestWineLocation)
    }

    pub fn avg_price_per_province(&self) -> Result<Table> {
        self.run(Report::AvgPricePerProvince)
    }

    pub fn avg_price_per_country(&self) -> Result<Table> {
        self.run(Report::AvgPricePerCountry)
    }

    pub fn wines_per_country(&self) -> Result<Table> {
        self.run(Report::WinesPerCountry)
    }

    pub fn wines_per_grape(&self) -> Result<Table> {
        self.run(Report::WinesPerGrape)
    }

    /// Release the connection, reporting any error SQLite returns on close
    pub fn close(self) -> Result<()> {
        let path = self.path;
        self.conn.close().map_err(|(_, source)| Error::Close(source))?;
        debug!(path = %path.display(), "closed wine database");
        Ok(())
    }
}

/// Run `f` inside a store session that is closed on every exit path
pub fn with_store<T>(path: &Path, f: impl FnOnce(&WineStore) -> Result<T>) -> Result<T> {
    let store = WineStore::open(path)?;
    match f(&store) {
        Ok(value) => {
            store.close()?;
            Ok(value)
        }
        // The connection is dropped with the store; the first error wins
        Err(err) => Err(err),
    }
}
