use actix_web::{web, HttpResponse};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::errors::ErrorCode;
use crate::extractors::{CurrentUser, RecordId, ValidatedJson};
use crate::infra::db::require_db;
use crate::repos::authors::{self, Author};
use crate::routes::non_blank;
use crate::state::app_state::AppState;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthorResponse {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
}

impl From<Author> for AuthorResponse {
    fn from(author: Author) -> Self {
        Self {
            id: author.id,
            first_name: author.first_name,
            last_name: author.last_name,
        }
    }
}

#[derive(Deserialize)]
pub struct CreateAuthorRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
}

#[derive(Deserialize)]
pub struct UpdateAuthorRequest {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
}

async fn list_authors(app_state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let authors: Vec<AuthorResponse> = authors::list_authors(db)
        .await?
        .into_iter()
        .map(AuthorResponse::from)
        .collect();

    Ok(HttpResponse::Ok().json(authors))
}

async fn get_author(
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    let author = authors::require_author(db, id.0).await?;

    Ok(HttpResponse::Ok().json(AuthorResponse::from(author)))
}

async fn create_author(
    user: CurrentUser,
    body: ValidatedJson<CreateAuthorRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let (Some(first_name), Some(last_name)) =
        (non_blank(Some(body.first_name)), non_blank(Some(body.last_name)))
    else {
        return Err(AppError::invalid(
            ErrorCode::ValidationError,
            "first_name and last_name are required",
        ));
    };

    let db = require_db(&app_state)?;
    let author = authors::create_author(db, &first_name, &last_name).await?;
    info!(author_id = author.id, username = %user.username, "Author created");

    Ok(HttpResponse::Created().json(AuthorResponse::from(author)))
}

async fn update_author(
    id: RecordId,
    body: ValidatedJson<UpdateAuthorRequest>,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let body = body.into_inner();
    let db = require_db(&app_state)?;
    let author = authors::update_author(
        db,
        id.0,
        non_blank(body.first_name),
        non_blank(body.last_name),
    )
    .await?;

    Ok(HttpResponse::Ok().json(AuthorResponse::from(author)))
}

async fn delete_author(
    user: CurrentUser,
    id: RecordId,
    app_state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(&app_state)?;
    authors::delete_author(db, id.0).await?;
    info!(author_id = id.0, username = %user.username, "Author deleted");

    Ok(HttpResponse::NoContent().finish())
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list_authors))
            .route(web::post().to(create_author)),
    )
    .service(
        web::resource("/{id}")
            .route(web::get().to(get_author))
            .route(web::put().to(update_author))
            .route(web::delete().to(delete_author)),
    );
}
