//! Maintenance endpoints that populate or empty the product store.

use axum::{extract::State, Json};
use serde::Serialize;

use crate::{handlers::AppError, seeder::SeedOutcome, state::AppState};

#[derive(Debug, Serialize)]
pub struct SeedResponse {
    pub message: &'static str,
    pub inserted: usize,
}

#[derive(Debug, Serialize)]
pub struct ClearResponse {
    pub message: &'static str,
    pub deleted: u64,
}

/// Seed the store with sample products (POST /seed).
///
/// Succeeds without inserting anything when the store already has rows.
pub async fn seed_database(State(state): State<AppState>) -> Result<Json<SeedResponse>, AppError> {
    let inserted = match state.seeder.seed_products().await? {
        SeedOutcome::Seeded(count) => count,
        SeedOutcome::Skipped { .. } => 0,
    };

    Ok(Json(SeedResponse {
        message: "Database seeded successfully",
        inserted,
    }))
}

/// Delete every product row (DELETE /seed).
pub async fn clear_database(
    State(state): State<AppState>,
) -> Result<Json<ClearResponse>, AppError> {
    let deleted = state.seeder.clear_products().await?;

    Ok(Json(ClearResponse {
        message: "Database cleared successfully",
        deleted,
    }))
}
