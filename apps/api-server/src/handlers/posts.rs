//! `/posts` resource handlers.

use actix_web::{HttpResponse, http::header, web};
use chrono::SecondsFormat;
use uuid::Uuid;

use blog_core::DomainError;
use blog_core::domain::{Author, BlogPost, PostFields};
use blog_shared::dto::{AuthorPayload, CreatePostRequest, PostResponse, UpdatePostRequest};

use crate::middleware::error::{AppError, AppResult};
use crate::state::AppState;

const ENTITY: &str = "BlogPost";

/// Project a stored post onto the wire shape.
///
/// `author` collapses to the display name; `created` is rendered like
/// `2024-05-01T12:00:00.000Z`.
pub fn post_view(post: &BlogPost) -> PostResponse {
    PostResponse {
        id: post.id.to_string(),
        title: post.title.clone(),
        content: post.content.clone(),
        author: post.author.full_name(),
        created: post.created.to_rfc3339_opts(SecondsFormat::Millis, true),
    }
}

fn missing(field: &str) -> AppError {
    AppError::BadRequest(format!("Missing `{field}` in request body"))
}

fn require_fields(
    title: Option<String>,
    content: Option<String>,
    author: Option<AuthorPayload>,
) -> AppResult<PostFields> {
    let title = title.ok_or_else(|| missing("title"))?;
    let content = content.ok_or_else(|| missing("content"))?;
    let author = author.ok_or_else(|| missing("author"))?;
    let first_name = author.first_name.ok_or_else(|| missing("author.firstName"))?;
    let last_name = author.last_name.ok_or_else(|| missing("author.lastName"))?;

    Ok(PostFields::new(
        title,
        content,
        Author::new(first_name, last_name),
    ))
}

/// Malformed ids can never name a stored post, so they read as not-found.
fn parse_id(raw: &str) -> AppResult<Uuid> {
    Uuid::parse_str(raw)
        .map_err(|_| AppError::NotFound(format!("{ENTITY} with id {raw} not found")))
}

fn not_found(id: Uuid) -> AppError {
    DomainError::NotFound {
        entity_type: ENTITY,
        id,
    }
    .into()
}

/// GET /posts
pub async fn list_posts(state: web::Data<AppState>) -> AppResult<HttpResponse> {
    let posts = state.posts.list_all().await?;
    let body: Vec<PostResponse> = posts.iter().map(post_view).collect();

    Ok(HttpResponse::Ok().json(body))
}

/// GET /posts/{id}
pub async fn get_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;

    let post = state
        .posts
        .find_by_id(id)
        .await?
        .ok_or_else(|| not_found(id))?;

    Ok(HttpResponse::Ok().json(post_view(&post)))
}

/// POST /posts
pub async fn create_post(
    state: web::Data<AppState>,
    body: web::Json<CreatePostRequest>,
) -> AppResult<HttpResponse> {
    let req = body.into_inner();
    let fields = require_fields(req.title, req.content, req.author)?;

    let post = state.posts.create(fields).await?;
    tracing::info!(post_id = %post.id, "Blog post created");

    Ok(HttpResponse::Created()
        .insert_header((header::LOCATION, format!("/posts/{}", post.id)))
        .json(post_view(&post)))
}

/// PUT /posts/{id} - full replacement of title, content and author.
pub async fn update_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
    body: web::Json<UpdatePostRequest>,
) -> AppResult<HttpResponse> {
    let id = parse_id(&path)?;
    let req = body.into_inner();

    if let Some(body_id) = req.id.as_deref() {
        if Uuid::parse_str(body_id).ok() != Some(id) {
            return Err(AppError::BadRequest(format!(
                "Request path id ({id}) and request body id ({body_id}) must match"
            )));
        }
    }

    let fields = require_fields(req.title, req.content, req.author)?;

    if !state.posts.replace_by_id(id, fields).await? {
        return Err(not_found(id));
    }
    tracing::info!(post_id = %id, "Blog post updated");

    Ok(HttpResponse::NoContent().finish())
}

/// DELETE /posts/{id} - idempotent; absent or malformed ids also yield 204.
pub async fn delete_post(
    state: web::Data<AppState>,
    path: web::Path<String>,
) -> AppResult<HttpResponse> {
    if let Ok(id) = Uuid::parse_str(&path) {
        let existed = state.posts.delete(id).await?;
        tracing::info!(post_id = %id, existed, "Blog post deleted");
    }

    Ok(HttpResponse::NoContent().finish())
}
