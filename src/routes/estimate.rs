use actix_web::{guard, http::header, web, HttpResponse, Responder};
use validator::Validate;
use crate::core::{Appraiser, QueryOutcome};
use crate::models::{EstimateRequest, EstimateResponse, ErrorResponse, FormErrorResponse, HealthResponse};
use crate::services::StorageReader;
use std::sync::Arc;

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub storage: Arc<dyn StorageReader>,
    pub appraiser: Appraiser,
}

/// Configure all estimate-related routes
///
/// Url-encoded submissions are routed to the form extractor by content type,
/// so their payload errors come from the form error handler. Everything else
/// is read as JSON.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .service(
            web::resource("/estimate")
                .route(web::post().guard(guard::fn_guard(is_form_submission)).to(estimate_form))
                .route(web::post().to(estimate_json)),
        );
}

fn is_form_submission(ctx: &guard::GuardContext<'_>) -> bool {
    ctx.head()
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .map(|value| value.trim_start().to_ascii_lowercase().starts_with("application/x-www-form-urlencoded"))
        .unwrap_or(false)
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let healthy = match state.storage.health_check().await {
        Ok(healthy) => healthy,
        Err(e) => {
            tracing::error!("Storage health check failed: {}", e);
            false
        }
    };

    let status = if healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Estimate endpoint, JSON body
///
/// POST /api/v1/estimate
///
/// ```json
/// {
///   "car_name": "2015 toyota corolla",
///   "mileage": "45,000"
/// }
/// ```
async fn estimate_json(
    state: web::Data<AppState>,
    body: web::Json<EstimateRequest>,
) -> HttpResponse {
    estimate_value(state, body.into_inner()).await
}

/// Estimate endpoint, url-encoded form body with the same fields
async fn estimate_form(
    state: web::Data<AppState>,
    body: web::Form<EstimateRequest>,
) -> HttpResponse {
    estimate_value(state, body.into_inner()).await
}

async fn estimate_value(state: web::Data<AppState>, req: EstimateRequest) -> HttpResponse {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for estimate request: field_errors={:?}", errors);
        return HttpResponse::BadRequest().json(ErrorResponse {
            error: "Validation failed".to_string(),
            message: errors.to_string(),
            status_code: 400,
        });
    }

    let outcome = match state
        .appraiser
        .handle_query(state.storage.as_ref(), &req.car_name, &req.mileage)
        .await
    {
        Ok(outcome) => outcome,
        Err(e) => {
            tracing::error!("Failed to appraise {:?}: {}", req.car_name, e);
            return HttpResponse::InternalServerError().json(ErrorResponse {
                error: "Failed to estimate value".to_string(),
                message: "The market data store is unavailable".to_string(),
                status_code: 500,
            });
        }
    };

    match outcome {
        QueryOutcome::ValidationErrors(messages) => {
            HttpResponse::UnprocessableEntity().json(FormErrorResponse {
                error: "invalid_query".to_string(),
                messages,
                car_name: None,
            })
        }
        QueryOutcome::NoDataFound { car_name } => {
            HttpResponse::NotFound().json(FormErrorResponse {
                error: "no_data".to_string(),
                messages: vec![format!("Sorry, we don't have any data for {}", car_name)],
                car_name: Some(car_name),
            })
        }
        QueryOutcome::Success(appraisal) => {
            tracing::info!(
                "Estimated {} at {} ({} comparables)",
                appraisal.car_name,
                appraisal.estimate,
                appraisal.total_comparables
            );

            HttpResponse::Ok().json(EstimateResponse {
                car_name: appraisal.car_name,
                mileage: appraisal.mileage,
                estimate: appraisal.estimate,
                total_comparables: appraisal.total_comparables,
                results: appraisal.listings,
            })
        }
    }
}
