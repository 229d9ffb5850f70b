//! Fixture databases for the integration tests

#![allow(dead_code)]

use rusqlite::{params, Connection, ToSql};
use std::path::Path;
use tempfile::NamedTempFile;

use wine_report::schema::{create_schema, generate_create_table, WINE};
use wine_report::WineStore;

/// A wine row; every dimension defaults to id 1
#[derive(Debug, Clone, Copy)]
pub struct Wine {
    pub id: i64,
    pub winery: i64,
    pub designation: i64,
    pub grape: i64,
    pub region1: i64,
    pub region2: i64,
    pub province: i64,
}

impl Wine {
    pub fn new(id: i64) -> Self {
        Self {
            id,
            winery: 1,
            designation: 1,
            grape: 1,
            region1: 1,
            region2: 2,
            province: 1,
        }
    }
}

/// A wine database in a temp file, written through its own connection
pub struct Fixture {
    file: NamedTempFile,
    conn: Connection,
}

impl Fixture {
    /// Empty schema, no rows
    pub fn empty() -> Self {
        let file = NamedTempFile::new().expect("Failed to create temp file");
        let conn = Connection::open(file.path()).expect("Failed to open fixture database");
        create_schema(&conn).expect("Failed to create schema");
        Self { file, conn }
    }

    /// Schema plus one row in every dimension table (id 1, region 2 as second region)
    pub fn new() -> Self {
        let fixture = Self::empty();
        fixture
            .country(1, "US")
            .province(1, "California", 1)
            .region(1, "Oak Knoll District")
            .region(2, "Napa")
            .winery(1, "Trefethen")
            .designation(1, "Reserve")
            .grape(1, "Cabernet Sauvignon");
        fixture
    }

    /// Like [`Fixture::new`], but `wine.price` is declared TEXT so inserted
    /// strings are stored as text instead of being coerced to numbers
    pub fn with_text_prices() -> Self {
        let fixture = Self::new();
        let ddl = generate_create_table(&WINE).replace("price REAL", "price TEXT");
        fixture
            .conn
            .execute_batch(&format!("DROP TABLE wine;\n{}", ddl))
            .expect("Failed to recreate wine table");
        fixture
    }

    pub fn path(&self) -> &Path {
        self.file.path()
    }

    pub fn conn(&self) -> &Connection {
        &self.conn
    }

    pub fn open(&self) -> WineStore {
        WineStore::open(self.path()).expect("Failed to open wine store")
    }

    pub fn country(&self, id: i64, name: &str) -> &Self {
        self.exec("INSERT INTO country (country_id, name) VALUES (?1, ?2)", params![id, name])
    }

    pub fn province(&self, id: i64, name: &str, country_id: i64) -> &Self {
        self.exec(
            "INSERT INTO province (province_id, province, country_id) VALUES (?1, ?2, ?3)",
            params![id, name, country_id],
        )
    }

    pub fn region(&self, id: i64, name: &str) -> &Self {
        self.exec("INSERT INTO region (region_id, region) VALUES (?1, ?2)", params![id, name])
    }

    pub fn winery(&self, id: i64, name: &str) -> &Self {
        self.exec("INSERT INTO winery (winery_id, winery) VALUES (?1, ?2)", params![id, name])
    }

    pub fn designation(&self, id: i64, name: &str) -> &Self {
        self.exec(
            "INSERT INTO designation (designation_id, name) VALUES (?1, ?2)",
            params![id, name],
        )
    }

    pub fn grape(&self, id: i64, name: &str) -> &Self {
        self.exec("INSERT INTO grape (grape_id, name) VALUES (?1, ?2)", params![id, name])
    }

    /// Insert a wine; `price` may be a number, `""` or `rusqlite::types::Null`
    pub fn wine(&self, wine: Wine, price: impl ToSql) -> &Self {
        self.exec(
            "INSERT INTO wine (wine_id, price, winery_id, designation_id, grape_id,
                               region_1_id, region_2_id, province_id)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)",
            params![
                wine.id,
                price,
                wine.winery,
                wine.designation,
                wine.grape,
                wine.region1,
                wine.region2,
                wine.province
            ],
        )
    }

    pub fn review(&self, wine_id: i64, rating: f64) -> &Self {
        self.exec(
            "INSERT INTO review (wine_id, rating) VALUES (?1, ?2)",
            params![wine_id, rating],
        )
    }

    pub fn unrated_review(&self, wine_id: i64) -> &Self {
        self.exec(
            "INSERT INTO review (wine_id, rating) VALUES (?1, NULL)",
            params![wine_id],
        )
    }

    fn exec(&self, sql: &str, params: &[&dyn ToSql]) -> &Self {
        self.conn
            .execute(sql, params)
            .unwrap_or_else(|e| panic!("Fixture insert failed: {}\n{}", e, sql));
        self
    }
}

/// Assert a metric column never increases from one row to the next
pub fn assert_non_increasing(values: &[f64], what: &str) {
    for pair in values.windows(2) {
        assert!(
            pair[0] >= pair[1],
            "{} not sorted descending: {} before {}",
            what,
            pair[0],
            pair[1]
        );
    }
}

pub fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < 1e-9
}
