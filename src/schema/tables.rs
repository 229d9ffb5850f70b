//! Table definitions for the wine review store

use super::types::*;

// =============================================================================
// Dimension tables
// =============================================================================

pub static COUNTRY: TableSchema = TableSchema {
    name: "country",
    primary_key: Some("country_id"),
    columns: &[
        Column::required("country_id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static PROVINCE: TableSchema = TableSchema {
    name: "province",
    primary_key: Some("province_id"),
    columns: &[
        Column::required("province_id", ColumnType::Integer),
        Column::new("province", ColumnType::Text),
        Column::new("country_id", ColumnType::Integer),
    ],
    foreign_keys: &[ForeignKey::new("country_id", "country")],
};

pub static REGION: TableSchema = TableSchema {
    name: "region",
    primary_key: Some("region_id"),
    columns: &[
        Column::required("region_id", ColumnType::Integer),
        Column::new("region", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static WINERY: TableSchema = TableSchema {
    name: "winery",
    primary_key: Some("winery_id"),
    columns: &[
        Column::required("winery_id", ColumnType::Integer),
        Column::new("winery", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static DESIGNATION: TableSchema = TableSchema {
    name: "designation",
    primary_key: Some("designation_id"),
    columns: &[
        Column::required("designation_id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

pub static GRAPE: TableSchema = TableSchema {
    name: "grape",
    primary_key: Some("grape_id"),
    columns: &[
        Column::required("grape_id", ColumnType::Integer),
        Column::new("name", ColumnType::Text),
    ],
    foreign_keys: &[],
};

// =============================================================================
// Fact tables
// =============================================================================

/// Price is declared REAL but the source data stores unknown prices as `''`,
/// which SQLite keeps as TEXT.
pub static WINE: TableSchema = TableSchema {
    name: "wine",
    primary_key: Some("wine_id"),
    columns: &[
        Column::required("wine_id", ColumnType::Integer),
        Column::new("price", ColumnType::Real),
        Column::new("winery_id", ColumnType::Integer),
        Column::new("designation_id", ColumnType::Integer),
        Column::new("grape_id", ColumnType::Integer),
        Column::new("region_1_id", ColumnType::Integer),
        Column::new("region_2_id", ColumnType::Integer),
        Column::new("province_id", ColumnType::Integer),
    ],
    foreign_keys: &[
        ForeignKey::new("winery_id", "winery"),
        ForeignKey::new("designation_id", "designation"),
        ForeignKey::new("grape_id", "grape"),
        ForeignKey::to("region_1_id", "region", "region_id"),
        ForeignKey::to("region_2_id", "region", "region_id"),
        ForeignKey::new("province_id", "province"),
    ],
};

pub static REVIEW: TableSchema = TableSchema {
    name: "review",
    primary_key: None,
    columns: &[
        Column::required("wine_id", ColumnType::Integer),
        Column::new("rating", ColumnType::Real),
    ],
    foreign_keys: &[ForeignKey::new("wine_id", "wine")],
};

/// All tables in dependency order (parents before children)
pub static ALL_TABLES: &[&TableSchema] = &[
    &COUNTRY,
    &PROVINCE,
    &REGION,
    &WINERY,
    &DESIGNATION,
    &GRAPE,
    &WINE,
    &REVIEW,
];

/// Get a table schema by name
pub fn get_table(name: &str) -> Option<&'static TableSchema> {
    ALL_TABLES.iter().find(|t| t.name == name).copied()
}

/// Get all table names
pub fn table_names() -> Vec<&'static str> {
    ALL_TABLES.iter().map(|t| t.name).collect()
}
