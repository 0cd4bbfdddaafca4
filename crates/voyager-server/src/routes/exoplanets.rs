//! Exoplanet endpoints.

use axum::Router;
use axum::extract::rejection::{JsonRejection, PathRejection, QueryRejection};
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use serde::Serialize;
use voyager_core::entities::Exoplanet;
use voyager_db::query::{ExoplanetFilter, ListParams};

use super::AppState;
use crate::http_error::HttpError;

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/exoplanets", get(list_exoplanets).post(create_exoplanet))
        .route(
            "/exoplanets/:id",
            get(get_exoplanet).put(update_exoplanet).delete(delete_exoplanet),
        )
        .route("/exoplanets/:id/fuel", get(estimate_fuel))
}

type ApiResult<T> = Result<T, HttpError>;

/// Decoded query-string pairs, in order, duplicates included.
type QueryPairs = Vec<(String, String)>;

async fn create_exoplanet(
    State(service): State<AppState>,
    payload: Result<Json<Exoplanet>, JsonRejection>,
) -> ApiResult<(StatusCode, Json<Exoplanet>)> {
    let Json(planet) = payload?;
    let created = service.create_exoplanet(&planet).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn list_exoplanets(
    State(service): State<AppState>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<Vec<Exoplanet>>> {
    let Query(pairs) = pairs?;
    let filter = ExoplanetFilter::from_params(&ListParams::from_pairs(pairs));
    Ok(Json(service.list_exoplanets(&filter).await?))
}

async fn get_exoplanet(
    State(service): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<Json<Exoplanet>> {
    let Path(id) = id?;
    Ok(Json(service.get_exoplanet(id).await?))
}

async fn update_exoplanet(
    State(service): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    payload: Result<Json<Exoplanet>, JsonRejection>,
) -> ApiResult<Json<Exoplanet>> {
    let Path(id) = id?;
    let Json(planet) = payload?;
    Ok(Json(service.update_exoplanet(id, &planet).await?))
}

async fn delete_exoplanet(
    State(service): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
) -> ApiResult<StatusCode> {
    let Path(id) = id?;
    service.delete_exoplanet(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// First `crewCapacity` value as an integer.
///
/// Missing or non-integer values count as zero, which the fuel formula
/// rejects once the planet has been found.
fn crew_capacity(pairs: &[(String, String)]) -> i64 {
    pairs
        .iter()
        .find(|(key, _)| key == "crewCapacity")
        .and_then(|(_, raw)| raw.parse().ok())
        .unwrap_or(0)
}

#[derive(Debug, Serialize)]
struct FuelEstimate {
    fuel: f64,
}

async fn estimate_fuel(
    State(service): State<AppState>,
    id: Result<Path<i64>, PathRejection>,
    pairs: Result<Query<QueryPairs>, QueryRejection>,
) -> ApiResult<Json<FuelEstimate>> {
    let Path(id) = id?;
    let Query(pairs) = pairs?;
    let fuel = service.estimate_fuel(id, crew_capacity(&pairs)).await?;
    Ok(Json(FuelEstimate { fuel }))
}
