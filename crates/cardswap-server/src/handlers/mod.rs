//! HTTP handlers

pub mod auth;
pub mod cards;

use axum::Json;
use serde_json::{json, Value};

pub async fn health() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

#[cfg(test)]
mod tests {
    use crate::storage::Database;
    use crate::{app, AppState};
    use axum::body::Body;
    use axum::http::{header, HeaderMap, Method, Request, StatusCode};
    use axum::Router;
    use serde_json::{json, Value};
    use std::path::Path;
    use std::sync::Arc;
    use tower::ServiceExt;

    async fn test_app(static_dir: &Path) -> Router {
        let db = Arc::new(Database::in_memory().await.unwrap());
        app(AppState::new(db), static_dir)
    }

    async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        body: Option<Value>,
    ) -> (StatusCode, HeaderMap, Value) {
        let mut req = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(value) => {
                req = req.header(header::CONTENT_TYPE, "application/json");
                Body::from(value.to_string())
            }
            None => Body::empty(),
        };

        let res = app.clone().oneshot(req.body(body).unwrap()).await.unwrap();
        let status = res.status();
        let headers = res.headers().clone();
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, headers, value)
    }

    #[tokio::test]
    async fn test_card_lifecycle() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let (status, _, body) = send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({"user_name": "alice", "password": "pw1"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "User registered successfully"}));

        let card = json!({"name": "Fireball", "user_name": "alice"});
        let (status, _, body) = send(&app, Method::POST, "/cards/", Some(card.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Card 'Fireball' added for user 'alice'"})
        );

        let (status, _, body) = send(&app, Method::GET, "/cards/alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"user": "alice", "cards": ["Fireball"]}));

        let (status, _, body) = send(&app, Method::DELETE, "/cards/", Some(card.clone())).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({"message": "Card 'Fireball' removed for user 'alice'"})
        );

        let (status, _, body) = send(&app, Method::GET, "/cards/alice", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"user": "alice", "cards": []}));

        let (status, _, body) = send(&app, Method::DELETE, "/cards/", Some(card)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Card not found");
    }

    #[tokio::test]
    async fn test_register_twice() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        let creds = json!({"user_name": "alice", "password": "pw1"});

        let (status, _, _) = send(&app, Method::POST, "/register/", Some(creds.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, _, body) = send(&app, Method::POST, "/register/", Some(creds)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"detail": "Username already taken", "code": "already_exists"})
        );
    }

    #[tokio::test]
    async fn test_login_sets_cookie_and_checks_password() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        // Unseen name: created on the spot
        let (status, headers, body) = send(
            &app,
            Method::POST,
            "/login/",
            Some(json!({"user_name": "bob", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Logged in as bob"}));
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("user_name=bob"));

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/login/",
            Some(json!({"user_name": "bob", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (status, headers, body) = send(
            &app,
            Method::POST,
            "/login/",
            Some(json!({"user_name": "bob", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "Incorrect password");
        assert!(headers.get(header::SET_COOKIE).is_none());

        // The login-created account now blocks registration
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({"user_name": "bob", "password": "pw"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_unknown_user_is_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;
        let card = json!({"name": "Fireball", "user_name": "ghost"});

        let (status, _, body) = send(&app, Method::POST, "/cards/", Some(card.clone())).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"detail": "User not found", "code": "not_found"}));

        let (status, _, _) = send(&app, Method::GET, "/cards/ghost", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, _, body) = send(&app, Method::DELETE, "/cards/", Some(card)).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "User not found");

        // Signing up later does not reveal a card from the failed add
        send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({"user_name": "ghost", "password": "boo"})),
        )
        .await;
        let (status, _, body) = send(&app, Method::GET, "/cards/ghost", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["cards"], json!([]));
    }

    #[tokio::test]
    async fn test_malformed_body_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let (status, _, _) = send(
            &app,
            Method::POST,
            "/register/",
            Some(json!({"user_name": "alice"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

        // Missing password: rejected before any account is touched
        let (status, _, _) = send(&app, Method::GET, "/cards/alice", None).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_login_quotes_cookie_for_any_name() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let creds = json!({"user_name": "Jean Luc", "password": "pw"});
        let (status, _, _) = send(&app, Method::POST, "/register/", Some(creds.clone())).await;
        assert_eq!(status, StatusCode::OK);

        let (status, headers, body) = send(&app, Method::POST, "/login/", Some(creds)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"message": "Logged in as Jean Luc"}));
        let cookie = headers.get(header::SET_COOKIE).unwrap().to_str().unwrap();
        assert!(cookie.starts_with("user_name=\"Jean Luc\";"));

        for name in ["zoë", "", "alice; admin=1"] {
            let (status, headers, _) = send(
                &app,
                Method::POST,
                "/login/",
                Some(json!({"user_name": name, "password": "pw"})),
            )
            .await;
            assert_eq!(status, StatusCode::OK, "login as {:?}", name);
            assert!(headers.get(header::SET_COOKIE).is_some());
        }

        // A wrong password still gets 401 whatever the name looks like
        let (status, _, _) = send(
            &app,
            Method::POST,
            "/login/",
            Some(json!({"user_name": "zoë", "password": "nope"})),
        )
        .await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_index_and_health() {
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("index.html"), "<h1>Cardswap</h1>").unwrap();
        let app = test_app(dir.path()).await;

        let res = app
            .clone()
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(res.status(), StatusCode::OK);
        let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
            .await
            .unwrap();
        assert_eq!(&bytes[..], b"<h1>Cardswap</h1>");

        let (status, _, body) = send(&app, Method::GET, "/health", None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"status": "ok"}));
    }

    #[tokio::test]
    async fn test_cors_allows_credentials_from_any_origin() {
        let dir = tempfile::tempdir().unwrap();
        let app = test_app(dir.path()).await;

        let req = Request::builder()
            .method(Method::OPTIONS)
            .uri("/cards/")
            .header(header::ORIGIN, "http://example.com")
            .header(header::ACCESS_CONTROL_REQUEST_METHOD, "DELETE")
            .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type")
            .body(Body::empty())
            .unwrap();
        let res = app.oneshot(req).await.unwrap();
        let headers = res.headers();

        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://example.com"
        );
        assert_eq!(
            headers
                .get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS)
                .unwrap(),
            "true"
        );
    }
}
