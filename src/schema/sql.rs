use rusqlite::Connection;

use super::tables::ALL_TABLES;
use super::types::TableSchema;

/// Generate CREATE TABLE SQL for a table schema
pub fn generate_create_table(schema: &TableSchema) -> String {
    let mut sql = format!("CREATE TABLE {} (\n", schema.name);
    let mut columns = Vec::new();

    for col in schema.columns {
        let null_constraint = if !col.nullable { " NOT NULL" } else { "" };
        let pk = if schema.primary_key == Some(col.name) {
            " PRIMARY KEY"
        } else {
            ""
        };

        columns.push(format!(
            "    {} {}{}{}",
            col.name,
            col.col_type.sql_type(),
            pk,
            null_constraint
        ));
    }

    // Add foreign key constraints
    for fk in schema.foreign_keys {
        columns.push(format!(
            "    FOREIGN KEY ({}) REFERENCES {}({})",
            fk.column, fk.references_table, fk.references_column
        ));
    }

    sql.push_str(&columns.join(",\n"));
    sql.push_str("\n)");

    sql
}

/// Generate CREATE INDEX statements for foreign key columns
pub fn generate_indexes(schema: &TableSchema) -> Vec<String> {
    schema
        .foreign_keys
        .iter()
        .map(|fk| {
            format!(
                "CREATE INDEX idx_{}_{} ON {}({})",
                schema.name, fk.column, schema.name, fk.column
            )
        })
        .collect()
}

/// The full DDL script of the store the reports run against
pub fn ddl() -> String {
    let mut statements = Vec::new();
    for schema in ALL_TABLES {
        statements.push(generate_create_table(schema));
        statements.extend(generate_indexes(schema));
    }

    let mut script = statements.join(";\n\n");
    script.push_str(";\n");
    script
}

/// Create every table of the store in an empty database
pub fn create_schema(conn: &Connection) -> rusqlite::Result<()> {
    conn.execute_batch(&ddl())
}
