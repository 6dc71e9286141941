//! # Health Check Handler
//!
//! Mounted outside the guard layers so load balancers never get
//! redirected to the login page.

use axum::Json;
use serde_json::{json, Value};

/// Health check endpoint
///
/// ## Route
/// GET /health
///
/// ## Response
/// ```json
/// {
///   "status": "healthy",
///   "service": "supabase-route-guard"
/// }
/// ```
pub async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "healthy",
        "service": "supabase-route-guard"
    }))
}
