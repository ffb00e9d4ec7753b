use crate::codec::{decode_request, read_body};
use crate::response::FilterResponse;
use crate::{ApiError, AppState, Result};
use axum::extract::{Request, State};
use axum::response::{IntoResponse, Response};
use labelgate_core::{node_name, ExtenderArgs, Verbosity};
use std::sync::Arc;
use tracing::{error, info};

/// POST /apiv1/filter
pub async fn filter(State(state): State<Arc<AppState>>, request: Request) -> Result<Response> {
    let args = match decode(&state, request).await {
        Ok(args) => args,
        Err(e) => {
            error!("cannot decode request: {}", e);
            return Err(e);
        }
    };

    if state.verbosity.enabled(Verbosity::REQUEST_DUMP) {
        let names: Vec<&str> = args.candidates().iter().map(node_name).collect();
        info!("filter {} from {:?}", args.pod_key(), names);
    }

    let result = state.engine.filter(&args);
    if result.is_error() {
        error!("filtering failed");
    }

    let response = FilterResponse::new(result).into_response();

    if state.verbosity.enabled(Verbosity::RESPONDED) {
        info!("filter function done, responded");
    }

    Ok(response)
}

async fn decode(state: &AppState, request: Request) -> Result<ExtenderArgs> {
    let (parts, body) = request.into_parts();
    let bytes = read_body(body, state.max_body_bytes).await?;

    decode_request(state.verbosity, &parts, &bytes).map_err(ApiError::from)
}
