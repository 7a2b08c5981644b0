use axum::extract::rejection::JsonRejection;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use serde_json::json;
use std::sync::Arc;

use crate::encoder::BinaryEncoder;
use crate::model::Classifier;
use crate::types::{FlightRecord, Prediction};

// ---------- Server state ----------

/// Immutable service context holding the two loaded artifacts. Built once at
/// startup and shared read-only across requests; tests build it with mock
/// classifiers.
#[derive(Clone)]
pub struct AppState {
    pub encoder: Arc<BinaryEncoder>,
    pub classifier: Arc<dyn Classifier>,
}

pub fn router(state: AppState) -> Router {
    Router::new().route("/predict", post(predict)).with_state(state)
}

type ErrorBody = (StatusCode, Json<serde_json::Value>);

// ---------- Handler ----------

async fn predict(
    State(state): State<AppState>,
    payload: Result<Json<FlightRecord>, JsonRejection>,
) -> Result<Json<Prediction>, ErrorBody> {
    // An empty body or one with missing/ill-typed fields never reaches the
    // pipeline: all five fields are required.
    let Json(record) = payload.map_err(|e| {
        (
            StatusCode::PRECONDITION_FAILED,
            Json(json!({
                "error": format!(
                    "the request body is empty or has missing data: {e}"
                )
            })),
        )
    })?;

    let row = record.to_row();

    let features = state.encoder.transform(&row).map_err(|e| {
        tracing::error!("encoding failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    let label = state.classifier.predict(&features).map_err(|e| {
        tracing::error!("inference failed: {e}");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(json!({ "error": e.to_string() })),
        )
    })?;

    tracing::info!(
        "predicted delay={} opera={} mes={} sigla_des={}",
        label,
        record.opera,
        record.mes,
        record.sigla_des
    );
    Ok(Json(Prediction { prediction: label }))
}
