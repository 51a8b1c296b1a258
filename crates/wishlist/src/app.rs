use std::time::Duration;

use axum::{
    http::{header, HeaderValue, Method, StatusCode},
    routing::{delete, get, post},
    Router,
};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use crate::{
    handlers::{
        health::health,
        items::{add_item, delete_item, list_items, mark_item},
        statuses::item_history,
        wishlists::{
            create_wishlist, delete_wishlist, get_wishlist, list_my_wishlists, list_wishlists,
        },
    },
    state::AppState,
};

/// Create the application router with all routes and middleware.
pub fn create_app(state: AppState, allowed_origins: &[String]) -> Router {
    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match origin.parse() {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(origins))
        .allow_methods([Method::GET, Method::POST, Method::DELETE])
        .allow_headers([header::CONTENT_TYPE, header::AUTHORIZATION])
        .allow_credentials(true);

    let wishlist_routes = Router::new()
        .route("/wishlists", get(list_wishlists).post(create_wishlist))
        .route("/my-wishlists", get(list_my_wishlists))
        .route(
            "/wishlists/{id}",
            get(get_wishlist).delete(delete_wishlist),
        )
        .route("/wishlists/{id}/items", get(list_items).post(add_item))
        .route(
            "/wishlists/{id}/items/{item_id}",
            delete(delete_item),
        )
        .route("/wishlists/{id}/items/{item_id}/mark", post(mark_item))
        .route(
            "/wishlists/{id}/items/{item_id}/statuses",
            get(item_history),
        )
        .route("/health", get(health));

    Router::new()
        .merge(wishlist_auth::auth_routes().with_state(state.auth.clone()))
        .merge(wishlist_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .layer(TimeoutLayer::with_status_code(
            StatusCode::REQUEST_TIMEOUT,
            Duration::from_secs(10),
        ))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use async_trait::async_trait;
    use axum::{
        body::Body,
        http::{Request, Response, StatusCode},
    };
    use http_body_util::BodyExt;
    use serde_json::{json, Value};
    use tower::ServiceExt;
    use wishlist_core::cache::{Cache, CacheError, Result as CacheResult};
    use wishlist_core::storage::UserRepository;

    use crate::{config::Config, storage::InMemoryRepository};

    fn app() -> Router {
        create_app(AppState::default(), &[])
    }

    async fn read_json(response: Response<Body>) -> Value {
        let body = response.into_body().collect().await.unwrap().to_bytes();
        serde_json::from_slice(&body).unwrap()
    }

    async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
        app.clone().oneshot(request).await.unwrap()
    }

    fn json_request(method: &str, uri: &str, token: Option<&str>, body: Value) -> Request<Body> {
        let mut builder = Request::builder()
            .method(method)
            .uri(uri)
            .header("Content-Type", "application/json");
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::from(body.to_string())).unwrap()
    }

    fn empty_request(method: &str, uri: &str, token: Option<&str>) -> Request<Body> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header("Authorization", format!("Bearer {token}"));
        }
        builder.body(Body::empty()).unwrap()
    }

    /// Registers a user and returns a bearer token for them.
    async fn signup(app: &Router, email: &str, full_name: &str) -> String {
        let response = send(
            app,
            json_request(
                "POST",
                "/register",
                None,
                json!({"email": email, "full_name": full_name, "password": "hunter22"}),
            ),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(
            app,
            Request::builder()
                .method("POST")
                .uri("/token")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from(format!("username={email}&password=hunter22")))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let token = read_json(response).await;
        assert_eq!(token["token_type"], "bearer");
        token["access_token"].as_str().unwrap().to_string()
    }

    async fn create_list(app: &Router, token: &str, title: &str) -> Value {
        let response = send(
            app,
            json_request("POST", "/wishlists", Some(token), json!({"title": title})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);
        read_json(response).await
    }

    async fn add(app: &Router, token: &str, wishlist_id: &str, title: &str) -> Response<Body> {
        send(
            app,
            json_request(
                "POST",
                &format!("/wishlists/{wishlist_id}/items"),
                Some(token),
                json!({"title": title, "priority": 2}),
            ),
        )
        .await
    }

    #[tokio::test]
    async fn test_register_rejects_duplicate_email() {
        let state = AppState::default();
        let app = create_app(state.clone(), &[]);
        let token = signup(&app, "alice@example.com", "Alice").await;
        let me = read_json(send(&app, empty_request("GET", "/users/me", Some(&token))).await).await;

        let response = send(
            &app,
            json_request(
                "POST",
                "/register",
                None,
                json!({"email": "alice@example.com", "password": "other-pass"}),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "Email already registered");

        // The first account is untouched and no second one was stored.
        let stored = state
            .store
            .get_user_by_email("alice@example.com")
            .await
            .unwrap()
            .unwrap();
        assert_eq!(stored.id.to_string(), me["id"].as_str().unwrap());
        assert_eq!(stored.full_name.as_deref(), Some("Alice"));

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/token")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from("username=alice@example.com&password=other-pass"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_malformed_id_is_a_json_400() {
        let app = app();

        let response = send(&app, empty_request("GET", "/wishlists/not-a-uuid", None)).await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert!(!body["detail"].as_str().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_bad_body_is_a_json_rejection() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;

        let response = send(
            &app,
            json_request("POST", "/wishlists", Some(&alice), json!({"description": "no title"})),
        )
        .await;
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json(response).await;
        assert!(body["detail"].as_str().unwrap().contains("title"));

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/wishlists")
                .header("Content-Type", "application/json")
                .header("Authorization", format!("Bearer {alice}"))
                .body(Body::from("{not json"))
                .unwrap(),
        )
        .await;
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(read_json(response).await["detail"].is_string());
    }

    #[tokio::test]
    async fn test_token_rejects_wrong_password() {
        let app = app();
        signup(&app, "alice@example.com", "Alice").await;

        let response = send(
            &app,
            Request::builder()
                .method("POST")
                .uri("/token")
                .header("Content-Type", "application/x-www-form-urlencoded")
                .body(Body::from("username=alice@example.com&password=wrong"))
                .unwrap(),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert!(response.headers().contains_key("www-authenticate"));
    }

    #[tokio::test]
    async fn test_create_wishlist_requires_token() {
        let app = app();

        let response = send(
            &app,
            json_request("POST", "/wishlists", None, json!({"title": "Birthday"})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_create_and_list_wishlists() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let bob = signup(&app, "bob@example.com", "Bob").await;

        let created = create_list(&app, &alice, "Birthday").await;
        assert_eq!(created["title"], "Birthday");
        assert_eq!(created["owner_name"], "Alice");
        assert_eq!(created["items_count"], 0);
        create_list(&app, &bob, "Wedding").await;

        let response = send(&app, empty_request("GET", "/wishlists", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let all = read_json(response).await;
        assert_eq!(all.as_array().unwrap().len(), 2);

        let response = send(&app, empty_request("GET", "/my-wishlists", Some(&alice))).await;
        let mine = read_json(response).await;
        let mine = mine.as_array().unwrap();
        assert_eq!(mine.len(), 1);
        assert_eq!(mine[0]["title"], "Birthday");
    }

    #[tokio::test]
    async fn test_blank_title_is_rejected() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;

        let response = send(
            &app,
            json_request("POST", "/wishlists", Some(&alice), json!({"title": "   "})),
        )
        .await;

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_get_missing_wishlist() {
        let app = app();

        let response = send(
            &app,
            empty_request(
                "GET",
                "/wishlists/00000000-0000-0000-0000-000000000000",
                None,
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "Wishlist not found");
    }

    #[tokio::test]
    async fn test_non_owner_cannot_add_items() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let bob = signup(&app, "bob@example.com", "Bob").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();

        let response = add(&app, &bob, list_id, "Bike").await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "Not enough permissions");

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;
        let items = read_json(response).await;
        assert!(items.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_mark_toggles_and_is_visible_in_items() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let bob = signup(&app, "bob@example.com", "Bob").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();

        // Populate the items cache before marking.
        let response = add(&app, &alice, list_id, "Bike").await;
        assert_eq!(response.status(), StatusCode::OK);
        let item = read_json(response).await;
        assert_eq!(item["is_marked"], false);
        assert_eq!(item["priority"], 2);
        let item_id = item["id"].as_str().unwrap();
        send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;

        let mark_uri = format!("/wishlists/{list_id}/items/{item_id}/mark");
        let response = send(&app, empty_request("POST", &mark_uri, Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["message"], "Item status updated");
        assert_eq!(body["marked"], true);

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;
        let items = read_json(response).await;
        assert_eq!(items[0]["is_marked"], true);
        assert_eq!(items[0]["marked_by"], "Bob");

        // Any user may flip it back.
        let response = send(&app, empty_request("POST", &mark_uri, Some(&alice))).await;
        let body = read_json(response).await;
        assert_eq!(body["marked"], false);

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;
        let items = read_json(response).await;
        assert_eq!(items[0]["is_marked"], false);
        assert!(items[0]["marked_by"].is_null());
    }

    #[tokio::test]
    async fn test_mark_rejects_item_from_other_list() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let first = create_list(&app, &alice, "Birthday").await;
        let second = create_list(&app, &alice, "Wedding").await;
        let first_id = first["id"].as_str().unwrap();
        let second_id = second["id"].as_str().unwrap();

        let item = read_json(add(&app, &alice, first_id, "Bike").await).await;
        let item_id = item["id"].as_str().unwrap();

        let response = send(
            &app,
            empty_request(
                "POST",
                &format!("/wishlists/{second_id}/items/{item_id}/mark"),
                Some(&alice),
            ),
        )
        .await;

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        let body = read_json(response).await;
        assert_eq!(body["detail"], "Item not found");
    }

    #[tokio::test]
    async fn test_history_is_owner_only_and_newest_first() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let bob = signup(&app, "bob@example.com", "Bob").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();
        let item = read_json(add(&app, &alice, list_id, "Bike").await).await;
        let item_id = item["id"].as_str().unwrap();

        let mark_uri = format!("/wishlists/{list_id}/items/{item_id}/mark");
        send(&app, empty_request("POST", &mark_uri, Some(&bob))).await;
        send(&app, empty_request("POST", &mark_uri, Some(&bob))).await;

        let history_uri = format!("/wishlists/{list_id}/items/{item_id}/statuses");
        let response = send(&app, empty_request("GET", &history_uri, Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, empty_request("GET", &history_uri, Some(&alice))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let history = read_json(response).await;
        let history = history.as_array().unwrap();
        assert_eq!(history.len(), 2);
        assert_eq!(history[0]["marked"], false);
        assert_eq!(history[1]["marked"], true);
        assert_eq!(history[0]["user_name"], "Bob");
    }

    #[tokio::test]
    async fn test_delete_item_returns_item_and_removes_it() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();
        let item = read_json(add(&app, &alice, list_id, "Bike").await).await;
        let item_id = item["id"].as_str().unwrap();

        let item_uri = format!("/wishlists/{list_id}/items/{item_id}");
        let response = send(&app, empty_request("DELETE", &item_uri, Some(&alice))).await;
        assert_eq!(response.status(), StatusCode::OK);
        let deleted = read_json(response).await;
        assert_eq!(deleted["title"], "Bike");

        let response = send(&app, empty_request("DELETE", &item_uri, Some(&alice))).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;
        let items = read_json(response).await;
        assert!(items.as_array().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_delete_wishlist_cascades() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let bob = signup(&app, "bob@example.com", "Bob").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();
        add(&app, &alice, list_id, "Bike").await;

        // Warm the listing cache.
        send(&app, empty_request("GET", "/wishlists", None)).await;

        let list_uri = format!("/wishlists/{list_id}");
        let response = send(&app, empty_request("DELETE", &list_uri, Some(&bob))).await;
        assert_eq!(response.status(), StatusCode::FORBIDDEN);

        let response = send(&app, empty_request("DELETE", &list_uri, Some(&alice))).await;
        assert_eq!(response.status(), StatusCode::OK);

        let response = send(&app, empty_request("GET", &list_uri, None)).await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let response = send(&app, empty_request("GET", "/wishlists", None)).await;
        let all = read_json(response).await;
        assert!(all.as_array().unwrap().is_empty());

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}/items"), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_get_wishlist_includes_items() {
        let app = app();
        let alice = signup(&app, "alice@example.com", "Alice").await;
        let list = create_list(&app, &alice, "Birthday").await;
        let list_id = list["id"].as_str().unwrap();
        add(&app, &alice, list_id, "Bike").await;
        add(&app, &alice, list_id, "Book").await;

        let response = send(
            &app,
            empty_request("GET", &format!("/wishlists/{list_id}"), None),
        )
        .await;
        assert_eq!(response.status(), StatusCode::OK);

        let detail = read_json(response).await;
        assert_eq!(detail["items_count"], 2);
        assert_eq!(detail["items"][0]["title"], "Bike");
        assert_eq!(detail["items"][1]["title"], "Book");
    }

    #[tokio::test]
    async fn test_health_reports_healthy_cache() {
        let app = app();

        let response = send(&app, empty_request("GET", "/health", None)).await;

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["cache"], "healthy");
    }

    struct UnreachableCache;

    #[async_trait]
    impl Cache for UnreachableCache {
        async fn get(&self, _key: &str) -> CacheResult<Option<Vec<u8>>> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn set(&self, _key: &str, _value: &[u8], _ttl: Option<Duration>) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn delete(&self, _key: &str) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }

        async fn ping(&self) -> CacheResult<()> {
            Err(CacheError::ConnectionFailed("refused".to_string()))
        }
    }

    #[tokio::test]
    async fn test_unreachable_cache_degrades_but_serves() {
        let state = AppState::build(
            Arc::new(InMemoryRepository::new()),
            Arc::new(UnreachableCache),
            &Config::for_tests(),
        );
        let app = create_app(state, &[]);

        let response = send(&app, empty_request("GET", "/health", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "degraded");
        assert_eq!(body["cache"], "unhealthy");

        let alice = signup(&app, "alice@example.com", "Alice").await;
        create_list(&app, &alice, "Birthday").await;

        let response = send(&app, empty_request("GET", "/wishlists", None)).await;
        assert_eq!(response.status(), StatusCode::OK);
        let all = read_json(response).await;
        assert_eq!(all.as_array().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn test_cors_allows_configured_origin() {
        let app = create_app(
            AppState::default(),
            &["http://localhost:5173".to_string()],
        );

        let response = send(
            &app,
            Request::builder()
                .uri("/health")
                .header("Origin", "http://localhost:5173")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

        assert_eq!(
            response.headers()["access-control-allow-origin"],
            "http://localhost:5173"
        );
        assert_eq!(response.headers()["access-control-allow-credentials"], "true");
    }
}
