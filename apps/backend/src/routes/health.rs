use actix_web::http::StatusCode;
use actix_web::{web, HttpResponse};
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use tracing::warn;

use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthResponse {
    status: &'static str,
    db: &'static str,
}

async fn ping_db(app_state: &AppState) -> bool {
    let Some(db) = app_state.db() else {
        warn!("health check: no database configured");
        return false;
    };
    let ping = Statement::from_string(db.get_database_backend(), "SELECT 1".to_string());
    match db.query_one(ping).await {
        Ok(_) => true,
        Err(e) => {
            warn!(error = %e, "health check: database ping failed");
            false
        }
    }
}

/// Liveness plus a database ping. 503 when the database cannot be reached;
/// failure details only go to the log.
async fn health(app_state: web::Data<AppState>) -> HttpResponse {
    if ping_db(&app_state).await {
        HttpResponse::Ok().json(HealthResponse {
            status: "ok",
            db: "ok",
        })
    } else {
        HttpResponse::build(StatusCode::SERVICE_UNAVAILABLE).json(HealthResponse {
            status: "degraded",
            db: "unavailable",
        })
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("").route(web::get().to(health)));
}
