//! HTTP handlers and route configuration.

mod health;
mod posts;

use actix_web::web;

use crate::middleware::error::AppError;

/// Configure all application routes.
pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    let json = web::JsonConfig::default()
        .error_handler(|err, _req| AppError::BadRequest(err.to_string()).into());

    cfg.service(
        web::scope("/api")
            .app_data(json)
            // Public routes
            .route("/health", web::get().to(health::health_check))
            .route("/posts", web::get().to(posts::list))
            .route("/posts/{id}", web::get().to(posts::show))
            // Bearer token required
            .route("/posts", web::post().to(posts::create))
            .route("/posts/{id}", web::patch().to(posts::update))
            .route("/posts/{id}", web::delete().to(posts::delete))
            .route("/posts/{id}/votes", web::post().to(posts::vote))
            .route("/feed", web::get().to(posts::feed)),
    );
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use actix_web::http::{StatusCode, header};
    use actix_web::{App, test};
    use serde_json::{Value, json};

    use phez_core::domain::{Subphez, User};
    use phez_core::ports::TokenService;
    use phez_infra::{InMemoryStore, JwtConfig, JwtTokenService};

    use super::*;
    use crate::state::AppState;

    struct Fixture {
        store: Arc<InMemoryStore>,
        state: AppState,
        tokens: Arc<dyn TokenService>,
        subphez: Subphez,
        author: User,
    }

    impl Fixture {
        async fn new() -> Self {
            let store = Arc::new(InMemoryStore::new());
            let subphez = store.add_subphez(Subphez::new("Rust", "rust")).await;
            let tokens: Arc<dyn TokenService> = Arc::new(JwtTokenService::new(JwtConfig {
                secret: "handler-test-secret".to_string(),
                ..JwtConfig::default()
            }));

            Self {
                state: AppState::in_memory(store.clone()),
                store,
                tokens,
                subphez,
                author: User::new("ferris"),
            }
        }

        fn bearer(&self, user: &User) -> (header::HeaderName, String) {
            let token = self.tokens.generate_token(user).unwrap();
            (header::AUTHORIZATION, format!("Bearer {token}"))
        }

        fn self_post(&self, title: &str) -> Value {
            json!({
                "title": title,
                "body": "Some *text*",
                "is_self": true,
                "subphez_id": self.subphez.id,
            })
        }
    }

    macro_rules! app {
        ($fixture:expr) => {
            test::init_service(
                App::new()
                    .app_data(web::Data::new($fixture.state.clone()))
                    .app_data(web::Data::new($fixture.tokens.clone()))
                    .configure(configure_routes),
            )
            .await
        };
    }

    #[actix_rt::test]
    async fn test_health() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::get().uri("/api/health").to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], "ok");
    }

    #[actix_rt::test]
    async fn test_create_requires_token() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .set_json(fx.self_post("Hello World!"))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["title"], "Authentication Required");
    }

    #[actix_rt::test]
    async fn test_create_show_and_list() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(fx.bearer(&fx.author))
            .set_json(fx.self_post("Hello World!"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let created: Value = test::read_body_json(resp).await;
        assert_eq!(created["guid"], "hello-world");
        assert_eq!(created["vote_total"], 1);
        assert_eq!(created["points"], 1);
        assert_eq!(created["domain"], "self");
        assert_eq!(created["owned"], true);
        assert!(created["rendered_body"].as_str().unwrap().contains("<em>text</em>"));

        let id = created["id"].as_str().unwrap();
        let req = test::TestRequest::get().uri(&format!("/api/posts/{id}")).to_request();
        let shown: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(shown["path"], format!("/p/rust/{id}/hello-world"));
        assert_eq!(shown["owned"], false);

        let req = test::TestRequest::get().uri("/api/posts?order=points&page=1").to_request();
        let listed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(listed["total"], 1);
        assert_eq!(listed["per_page"], 20);
        assert_eq!(listed["items"][0]["id"], id);
    }

    #[actix_rt::test]
    async fn test_huge_page_number_is_an_empty_page() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::get()
            .uri("/api/posts?page=18446744073709551615")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::OK);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["items"], json!([]));
    }

    #[actix_rt::test]
    async fn test_validation_problem_document() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(fx.bearer(&fx.author))
            .set_json(json!({
                "title": "Link without url",
                "is_self": false,
                "subphez_id": fx.subphez.id,
            }))
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body: Value = test::read_body_json(resp).await;
        assert_eq!(body["status"], 422);
        assert_eq!(body["detail"], "link posts need a url");
    }

    #[actix_rt::test]
    async fn test_malformed_json_is_bad_request() {
        let fx = Fixture::new().await;
        let app = app!(fx);

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(fx.bearer(&fx.author))
            .insert_header(header::ContentType::json())
            .set_payload("{\"title\":")
            .to_request();
        let resp = test::call_service(&app, req).await;

        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    }

    #[actix_rt::test]
    async fn test_vote_edit_and_delete() {
        let fx = Fixture::new().await;
        let app = app!(fx);
        let voter = User::new("voter");
        let stranger = User::new("stranger");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(fx.bearer(&fx.author))
            .set_json(fx.self_post("Vote on me"))
            .to_request();
        let created: Value = test::call_and_read_body_json(&app, req).await;
        let id = created["id"].as_str().unwrap().to_string();

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{id}/votes"))
            .insert_header(fx.bearer(&voter))
            .set_json(json!({ "value": -1 }))
            .to_request();
        let voted: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(voted["vote_total"], 0);
        assert_eq!(voted["upvote_total"], 1);
        assert_eq!(voted["downvote_total"], 1);

        let req = test::TestRequest::post()
            .uri(&format!("/api/posts/{id}/votes"))
            .insert_header(fx.bearer(&voter))
            .set_json(json!({ "value": 3 }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(fx.bearer(&stranger))
            .set_json(json!({ "title": "Hijacked" }))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::patch()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(fx.bearer(&fx.author))
            .set_json(json!({ "title": "Vote on <b>this</b>" }))
            .to_request();
        let edited: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(edited["title"], "Vote on this");
        assert_eq!(edited["guid"], "vote-on-me");

        let req = test::TestRequest::delete()
            .uri(&format!("/api/posts/{id}"))
            .insert_header(fx.bearer(&fx.author))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NO_CONTENT);

        let req = test::TestRequest::get().uri(&format!("/api/posts/{id}")).to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[actix_rt::test]
    async fn test_feed_follows_subscriptions() {
        let fx = Fixture::new().await;
        let app = app!(fx);
        let reader = User::new("reader");

        let req = test::TestRequest::post()
            .uri("/api/posts")
            .insert_header(fx.bearer(&fx.author))
            .set_json(fx.self_post("Subscribed content"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let req = test::TestRequest::get()
            .uri("/api/feed")
            .insert_header(fx.bearer(&reader))
            .to_request();
        let empty: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(empty["total"], 0);

        fx.store.subscribe(reader.id, fx.subphez.id).await;
        let req = test::TestRequest::get()
            .uri("/api/feed?page=1")
            .insert_header(fx.bearer(&reader))
            .to_request();
        let feed: Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(feed["total"], 1);
        assert_eq!(feed["items"][0]["title"], "Subscribed content");
    }
}
