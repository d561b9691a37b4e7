mod common;

use std::collections::BTreeSet;
use std::sync::Arc;

use actix_web::http::{StatusCode, header};
use actix_web::middleware::from_fn;
use actix_web::{App, test};
use async_trait::async_trait;
use serde_json::{Value, json};
use uuid::Uuid;

use api_server::middleware::request_id::{REQUEST_ID_HEADER, request_id};
use api_server::{AppState, configure_app};
use blog_core::domain::{Author, BlogPost, PostFields};
use blog_core::error::RepoError;
use blog_core::ports::{BaseRepository, PostRepository};
use blog_shared::dto::{AuthorPayload, CreatePostRequest, UpdatePostRequest};

use common::{TestContext, routes};

const POST_KEYS: [&str; 5] = ["author", "content", "created", "id", "title"];

fn keys(value: &Value) -> BTreeSet<&str> {
    value
        .as_object()
        .expect("post should be a JSON object")
        .keys()
        .map(String::as_str)
        .collect()
}

fn create_body(title: &str, content: &str, first: &str, last: &str) -> CreatePostRequest {
    CreatePostRequest {
        title: Some(title.to_string()),
        content: Some(content.to_string()),
        author: Some(AuthorPayload::new(first, last)),
    }
}

#[actix_web::test]
async fn test_list_returns_every_seeded_post() {
    let (ctx, seeded) = TestContext::seeded(10).await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    let posts = body.as_array().expect("array body");
    assert_eq!(posts.len(), seeded.len());
    assert_eq!(posts.len() as u64, ctx.count().await);

    let expected: BTreeSet<&str> = POST_KEYS.into_iter().collect();
    for post in posts {
        assert_eq!(keys(post), expected);
    }

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_list_projects_author_name() {
    let (ctx, _) = TestContext::seeded(5).await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    let body: Value = test::read_body_json(res).await;

    for post in body.as_array().unwrap() {
        let id = Uuid::parse_str(post["id"].as_str().unwrap()).unwrap();
        let stored = ctx.find(id).await.expect("listed post should be stored");

        assert_eq!(
            post["author"],
            format!("{} {}", stored.author.first_name, stored.author.last_name)
        );
        assert_eq!(post["title"], stored.title);
        assert_eq!(post["content"], stored.content);
        assert!(post["created"].as_str().unwrap().ends_with('Z'));
    }

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_list_empty_store() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body, json!([]));

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_get_by_id() {
    let (ctx, seeded) = TestContext::seeded(3).await;
    let app = test::init_service(ctx.app()).await;
    let target = &seeded[1];

    let req = test::TestRequest::get()
        .uri(&routes::post(target.id))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::OK);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["id"], target.id.to_string());
    assert_eq!(body["title"], target.title);
    assert_eq!(body["author"], target.author.full_name());

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_get_absent_or_malformed_id_is_not_found() {
    let (ctx, _) = TestContext::seeded(2).await;
    let app = test::init_service(ctx.app()).await;

    for uri in [routes::post(Uuid::new_v4()), routes::post("not-a-uuid")] {
        let res = test::call_service(&app, test::TestRequest::get().uri(&uri).to_request()).await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND, "GET {uri}");

        let body: Value = test::read_body_json(res).await;
        assert_eq!(body["status"], 404);
    }

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_create_persists_post() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(routes::POSTS)
        .set_json(create_body("T", "C", "A", "B"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);

    let location = res
        .headers()
        .get(header::LOCATION)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    let body: Value = test::read_body_json(res).await;

    assert_eq!(keys(&body), POST_KEYS.into_iter().collect::<BTreeSet<_>>());
    assert_eq!(body["title"], "T");
    assert_eq!(body["content"], "C");
    assert_eq!(body["author"], "A B");

    let id = Uuid::parse_str(body["id"].as_str().expect("id should be set")).unwrap();
    assert_eq!(location, routes::post(id));

    let stored = ctx.find(id).await.expect("created post should be stored");
    assert_eq!(stored.title, "T");
    assert_eq!(stored.content, "C");
    assert_eq!(stored.author.first_name, "A");
    assert_eq!(stored.author.last_name, "B");
    assert_eq!(ctx.count().await, 1);

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_create_with_missing_field_writes_nothing() {
    let (ctx, _) = TestContext::seeded(3).await;
    let app = test::init_service(ctx.app()).await;

    let full = json!({
        "title": "T",
        "content": "C",
        "author": {"firstName": "A", "lastName": "B"}
    });
    let cases = [
        ("title", json!({"content": "C", "author": full["author"]})),
        ("content", json!({"title": "T", "author": full["author"]})),
        ("author", json!({"title": "T", "content": "C"})),
        (
            "author.firstName",
            json!({"title": "T", "content": "C", "author": {"lastName": "B"}}),
        ),
        (
            "author.lastName",
            json!({"title": "T", "content": "C", "author": {"firstName": "A"}}),
        ),
    ];

    for (field, body) in cases {
        let req = test::TestRequest::post()
            .uri(routes::POSTS)
            .set_json(body)
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::BAD_REQUEST, "missing {field}");

        let problem: Value = test::read_body_json(res).await;
        assert_eq!(
            problem["detail"],
            format!("Missing `{field}` in request body")
        );
    }

    assert_eq!(ctx.count().await, 3);
    ctx.teardown().await;
}

#[actix_web::test]
async fn test_create_rejects_blank_values() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let req = test::TestRequest::post()
        .uri(routes::POSTS)
        .set_json(create_body("  ", "C", "A", "B"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.count().await, 0);

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_update_replaces_fields() {
    let (ctx, seeded) = TestContext::seeded(5).await;
    let app = test::init_service(ctx.app()).await;
    let target = &seeded[2];

    let body = UpdatePostRequest {
        id: Some(target.id.to_string()),
        title: Some("Replaced title".to_string()),
        content: Some("Replaced content".to_string()),
        author: Some(AuthorPayload::new("Grace", "Hopper")),
    };
    let req = test::TestRequest::put()
        .uri(&routes::post(target.id))
        .set_json(body)
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert!(test::read_body(res).await.is_empty());

    let stored = ctx.find(target.id).await.unwrap();
    assert_eq!(stored.id, target.id);
    assert_eq!(stored.title, "Replaced title");
    assert_eq!(stored.content, "Replaced content");
    assert_eq!(stored.author, Author::new("Grace", "Hopper"));
    assert_eq!(stored.created, target.created);

    let others = ctx.repo.list_all().await.unwrap();
    for post in seeded.iter().filter(|p| p.id != target.id) {
        let untouched = others.iter().find(|p| p.id == post.id).unwrap();
        assert_eq!(untouched.fields(), post.fields());
    }

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_update_without_body_id() {
    let (ctx, seeded) = TestContext::seeded(1).await;
    let app = test::init_service(ctx.app()).await;
    let target = &seeded[0];

    let req = test::TestRequest::put()
        .uri(&routes::post(target.id))
        .set_json(json!({
            "title": "No id",
            "content": "Still fine",
            "author": {"firstName": "A", "lastName": "B"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NO_CONTENT);
    assert_eq!(ctx.find(target.id).await.unwrap().title, "No id");

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_update_absent_id_is_not_found() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;
    let id = Uuid::new_v4();

    let req = test::TestRequest::put()
        .uri(&routes::post(id))
        .set_json(json!({
            "id": id.to_string(),
            "title": "Ghost",
            "content": "Ghost",
            "author": {"firstName": "A", "lastName": "B"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    assert_eq!(ctx.count().await, 0);

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_update_with_missing_field_keeps_post() {
    let (ctx, seeded) = TestContext::seeded(1).await;
    let app = test::init_service(ctx.app()).await;
    let target = &seeded[0];

    let req = test::TestRequest::put()
        .uri(&routes::post(target.id))
        .set_json(json!({"id": target.id.to_string(), "title": "Only a title"}))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    assert_eq!(ctx.find(target.id).await.unwrap(), *target);

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_delete_removes_post_and_is_idempotent() {
    let (ctx, seeded) = TestContext::seeded(4).await;
    let app = test::init_service(ctx.app()).await;
    let target = &seeded[0];

    for _ in 0..2 {
        let req = test::TestRequest::delete()
            .uri(&routes::post(target.id))
            .to_request();
        let res = test::call_service(&app, req).await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    assert!(ctx.find(target.id).await.is_none());
    assert_eq!(ctx.count().await, 3);
    assert!(!ctx.repo.delete(target.id).await.unwrap());

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_seed_then_create_scenario() {
    let (ctx, _) = TestContext::seeded(10).await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed.as_array().unwrap().len(), 10);

    let req = test::TestRequest::post()
        .uri(routes::POSTS)
        .set_json(json!({
            "title": "T",
            "content": "C",
            "author": {"firstName": "A", "lastName": "B"}
        }))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created: Value = test::read_body_json(res).await;
    assert_eq!(created["author"], "A B");

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    let listed: Value = test::read_body_json(res).await;
    assert_eq!(listed.as_array().unwrap().len(), 11);

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_unknown_route_is_json_not_found() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri("/nope").to_request()).await;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["instance"], "/nope");

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_health_reports_ok() {
    let ctx = TestContext::new().await;
    let app = test::init_service(ctx.app()).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::HEALTH).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "ok");

    ctx.teardown().await;
}

#[actix_web::test]
async fn test_responses_carry_request_id() {
    let ctx = TestContext::new().await;
    let app = test::init_service(
        App::new()
            .wrap(from_fn(request_id))
            .configure(configure_app(ctx.state.clone())),
    )
    .await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    assert_eq!(res.status(), StatusCode::OK);
    assert!(res.headers().contains_key(REQUEST_ID_HEADER));

    ctx.teardown().await;
}

/// Store whose every call fails as if the database were gone.
struct UnreachableStore;

#[async_trait]
impl BaseRepository<BlogPost, Uuid> for UnreachableStore {
    async fn find_by_id(&self, _id: Uuid) -> Result<Option<BlogPost>, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn list_all(&self) -> Result<Vec<BlogPost>, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn count(&self) -> Result<u64, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn delete(&self, _id: Uuid) -> Result<bool, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }
}

#[async_trait]
impl PostRepository for UnreachableStore {
    async fn create(&self, _fields: PostFields) -> Result<BlogPost, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn insert_many(&self, _records: Vec<PostFields>) -> Result<Vec<BlogPost>, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn replace_by_id(&self, _id: Uuid, _fields: PostFields) -> Result<bool, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }

    async fn drop_all(&self) -> Result<u64, RepoError> {
        Err(RepoError::Connection("refused".into()))
    }
}

#[actix_web::test]
async fn test_storage_failure_is_server_error() {
    let state = AppState::with_repository(Arc::new(UnreachableStore));
    let app = test::init_service(App::new().configure(configure_app(state))).await;

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::POSTS).to_request()).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);
    let body: Value = test::read_body_json(res).await;
    assert!(body.get("detail").is_none());

    let req = test::TestRequest::post()
        .uri(routes::POSTS)
        .set_json(create_body("T", "C", "A", "B"))
        .to_request();
    let res = test::call_service(&app, req).await;
    assert_eq!(res.status(), StatusCode::INTERNAL_SERVER_ERROR);

    let res = test::call_service(&app, test::TestRequest::get().uri(routes::HEALTH).to_request()).await;
    assert_eq!(res.status(), StatusCode::SERVICE_UNAVAILABLE);
    let body: Value = test::read_body_json(res).await;
    assert_eq!(body["status"], "degraded");
}
