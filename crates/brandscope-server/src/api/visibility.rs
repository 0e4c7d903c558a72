use axum::{
    extract::{Query, State},
    Extension, Json,
};
use brandscope_visibility::{ArticlesReport, PromptsReport, VisibilityError};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{ApiError, ApiResponse, AppState, ResponseMeta};

#[derive(Debug, Deserialize)]
pub(super) struct BrandQuery {
    pub brand: Option<String>,
}

impl BrandQuery {
    /// The trimmed brand, or a `validation_error` when missing or blank.
    fn require_brand(&self, request_id: &str) -> Result<String, ApiError> {
        self.brand
            .as_deref()
            .map(str::trim)
            .filter(|b| !b.is_empty())
            .map(ToOwned::to_owned)
            .ok_or_else(|| {
                ApiError::new(
                    request_id,
                    "validation_error",
                    "query parameter `brand` is required",
                )
            })
    }
}

pub(super) fn map_visibility_error(request_id: String, error: &VisibilityError) -> ApiError {
    match error {
        VisibilityError::InvalidBrand => {
            ApiError::new(request_id, "validation_error", error.to_string())
        }
        VisibilityError::Configuration(message) => {
            tracing::warn!(error = %error, "visibility request rejected: not configured");
            ApiError::new(request_id, "configuration_error", message.clone())
        }
        VisibilityError::Upstream(e) => {
            tracing::error!(error = %e, "visibility request failed upstream");
            ApiError::new(request_id, "upstream_error", "an external provider call failed")
        }
    }
}

pub(super) async fn get_articles(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<ApiResponse<ArticlesReport>>, ApiError> {
    let brand = query.require_brand(&req_id.0)?;
    let report = state
        .service
        .get_articles(&brand)
        .await
        .map_err(|e| map_visibility_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}

pub(super) async fn get_prompts(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<BrandQuery>,
) -> Result<Json<ApiResponse<PromptsReport>>, ApiError> {
    let brand = query.require_brand(&req_id.0)?;
    let report = state
        .service
        .get_prompts(&brand)
        .await
        .map_err(|e| map_visibility_error(req_id.0.clone(), &e))?;

    Ok(Json(ApiResponse {
        data: report,
        meta: ResponseMeta::new(req_id.0),
    }))
}
