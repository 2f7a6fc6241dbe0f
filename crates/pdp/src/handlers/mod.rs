pub mod error;
pub mod health;
pub mod products;
pub mod root;
pub mod seed;

pub use error::AppError;
