mod error;
mod mock_data;
mod schema;
mod types;
mod validation;

pub use error::{ProductError, SkuError};
pub use mock_data::sample_products;
pub use schema::{
    render_sqlite_ddl, ColumnDef, ColumnType, EntitySchema, IndexDef, ENTITIES,
    PRODUCT_SCHEMA,
};
pub use types::{NewProduct, Product};
pub use validation::{
    validate_new_product, validate_sku, BRAND_MAX_LENGTH, IMAGE_URL_MAX_LENGTH, NAME_MAX_LENGTH,
    PRICE_MAX, PRICE_SCALE, SKU_MAX_LENGTH,
};
