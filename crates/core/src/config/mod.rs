mod cache;
mod error;
mod store;

pub use cache::{resolve_cache, CacheSettings, DEFAULT_CACHE_MAX_ENTRIES, DEFAULT_CACHE_TTL_MS};
pub use error::ConfigurationError;
pub use store::{
    resolve_store, Backend, PostgresDescriptor, SqliteDescriptor, StoreDescriptor,
    DEVELOPMENT_ENV, MIGRATIONS_DIR,
};

/// Names of the settings read by the resolvers.
pub mod keys {
    pub const DB_TYPE: &str = "DB_TYPE";
    pub const DB_HOST: &str = "DB_HOST";
    pub const DB_PORT: &str = "DB_PORT";
    pub const DB_USERNAME: &str = "DB_USERNAME";
    pub const DB_PASSWORD: &str = "DB_PASSWORD";
    pub const DB_DATABASE: &str = "DB_DATABASE";
    pub const APP_ENV: &str = "APP_ENV";
    pub const NODE_ENV: &str = "NODE_ENV";
    pub const CACHE_TTL: &str = "CACHE_TTL";
    pub const CACHE_MAX_ENTRIES: &str = "CACHE_MAX_ENTRIES";

    /// Every key the resolvers consult.
    pub const ALL: &[&str] = &[
        DB_TYPE,
        DB_HOST,
        DB_PORT,
        DB_USERNAME,
        DB_PASSWORD,
        DB_DATABASE,
        APP_ENV,
        NODE_ENV,
        CACHE_TTL,
        CACHE_MAX_ENTRIES,
    ];
}
