//! Entity schema descriptors.
//!
//! The persisted layout of each entity is described as plain data. Backends
//! that derive their schema at startup render DDL from these descriptors;
//! backends driven by migrations only use them for the entity list.

use super::validation::{BRAND_MAX_LENGTH, IMAGE_URL_MAX_LENGTH, NAME_MAX_LENGTH, SKU_MAX_LENGTH};

/// Column storage type.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnType {
    /// Auto-incrementing integer primary key.
    Serial,
    Varchar(usize),
    Decimal { precision: u8, scale: u8 },
    Text,
    Timestamp,
}

/// A single column of an entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ColumnDef {
    pub name: &'static str,
    pub kind: ColumnType,
    pub nullable: bool,
}

/// An index over one column, optionally partial and/or unique.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IndexDef {
    pub name: &'static str,
    pub column: &'static str,
    pub unique: bool,
    pub descending: bool,
    /// SQL predicate for a partial index.
    pub predicate: Option<&'static str>,
}

/// The persisted layout of one entity.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EntitySchema {
    pub table: &'static str,
    pub columns: &'static [ColumnDef],
    pub indexes: &'static [IndexDef],
}

const fn column(name: &'static str, kind: ColumnType, nullable: bool) -> ColumnDef {
    ColumnDef {
        name,
        kind,
        nullable,
    }
}

/// Layout of the `products` table.
pub const PRODUCT_SCHEMA: EntitySchema = EntitySchema {
    table: "products",
    columns: &[
        column("id", ColumnType::Serial, false),
        column("name", ColumnType::Varchar(NAME_MAX_LENGTH), false),
        column("brand", ColumnType::Varchar(BRAND_MAX_LENGTH), false),
        column("sku", ColumnType::Varchar(SKU_MAX_LENGTH), false),
        column(
            "price",
            ColumnType::Decimal {
                precision: 10,
                scale: 2,
            },
            false,
        ),
        column("description", ColumnType::Text, true),
        column("image_url", ColumnType::Varchar(IMAGE_URL_MAX_LENGTH), false),
        column("created_at", ColumnType::Timestamp, false),
        column("updated_at", ColumnType::Timestamp, false),
        column("deleted_at", ColumnType::Timestamp, true),
    ],
    indexes: &[
        // At most one active row per SKU; also serves the active-SKU lookup.
        IndexDef {
            name: "idx_products_sku",
            column: "sku",
            unique: true,
            descending: false,
            predicate: Some("deleted_at IS NULL"),
        },
        IndexDef {
            name: "idx_products_brand",
            column: "brand",
            unique: false,
            descending: false,
            predicate: Some("deleted_at IS NULL"),
        },
        IndexDef {
            name: "idx_products_created_at",
            column: "created_at",
            unique: false,
            descending: true,
            predicate: None,
        },
    ],
};

/// Every entity registered with the store.
pub const ENTITIES: &[EntitySchema] = &[PRODUCT_SCHEMA];

/// Renders idempotent SQLite DDL for an entity.
///
/// SQLite has no native decimal or timestamp types: decimals are stored as
/// canonical text and timestamps as RFC 3339 text. Length bounds become
/// `CHECK` constraints since SQLite ignores `VARCHAR(n)`.
///
/// # Examples
///
/// ```
/// use pdp_core::product::{render_sqlite_ddl, PRODUCT_SCHEMA};
///
/// let ddl = render_sqlite_ddl(&PRODUCT_SCHEMA);
/// assert!(ddl.contains("CREATE TABLE IF NOT EXISTS products"));
/// assert!(ddl.contains("CREATE UNIQUE INDEX IF NOT EXISTS idx_products_sku"));
/// ```
pub fn render_sqlite_ddl(schema: &EntitySchema) -> String {
    let columns: Vec<String> = schema.columns.iter().map(sqlite_column).collect();

    let mut ddl = format!(
        "CREATE TABLE IF NOT EXISTS {} (\n    {}\n);\n",
        schema.table,
        columns.join(",\n    ")
    );

    for index in schema.indexes {
        ddl.push_str(&format!(
            "CREATE {}INDEX IF NOT EXISTS {} ON {}({}{}){};\n",
            if index.unique { "UNIQUE " } else { "" },
            index.name,
            schema.table,
            index.column,
            if index.descending { " DESC" } else { "" },
            index
                .predicate
                .map(|p| format!(" WHERE {p}"))
                .unwrap_or_default(),
        ));
    }

    ddl
}

fn sqlite_column(column: &ColumnDef) -> String {
    let null = if column.nullable { "" } else { " NOT NULL" };
    match column.kind {
        ColumnType::Serial => format!("{} INTEGER PRIMARY KEY AUTOINCREMENT", column.name),
        ColumnType::Varchar(max) => format!(
            "{name} TEXT{null} CHECK (length({name}) <= {max})",
            name = column.name
        ),
        ColumnType::Decimal { .. } | ColumnType::Text | ColumnType::Timestamp => {
            format!("{} TEXT{null}", column.name)
        }
    }
}
