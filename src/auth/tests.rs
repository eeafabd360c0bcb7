//! Tests for auth module
//!
//! These tests verify core authentication functionality including:
//! - Session token issuing, verification and expiry
//! - User resolution, including concurrent first logins
//! - The /register flow against a stubbed GitHub

#[cfg(test)]
mod tests {
    use super::super::*;
    use crate::app_router;
    use crate::common::test_utils::{send, setup_test_db, test_state, TEST_JWT_SECRET};
    use crate::common::Validator;
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use models::{RegisterRequest, RemoteIdentity, User};
    use serde_json::json;
    use sqlx::SqlitePool;
    use store::UserStore;
    use tokens::{bearer_token, AuthError, SessionKeys, SESSION_TTL_DAYS};
    use wiremock::{
        matchers::{method, path},
        Mock, MockServer, ResponseTemplate,
    };

    fn sample_user() -> User {
        User {
            id: "3f0f4b1e-5f5c-4a55-9a8e-2f6c1d0b9a11".to_string(),
            provider_id: 1,
            login: "x".to_string(),
            name: "X".to_string(),
            avatar_url: "https://a/b".to_string(),
            created_at: "2024-01-01T00:00:00Z".to_string(),
        }
    }

    fn sample_identity() -> RemoteIdentity {
        RemoteIdentity {
            provider_id: 1,
            login: "x".to_string(),
            name: "X".to_string(),
            avatar_url: "https://a/b".to_string(),
        }
    }

    async fn user_count(pool: &SqlitePool) -> i64 {
        let (count,): (i64,) = sqlx::query_as("SELECT COUNT(*) FROM users")
            .fetch_one(pool)
            .await
            .unwrap();
        count
    }

    async fn mount_github(server: &MockServer) {
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "gho_abc" })),
            )
            .mount(server)
            .await;

        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "login": "x",
                "name": "X",
                "avatar_url": "https://a/b"
            })))
            .mount(server)
            .await;
    }

    // ============================================================================
    // Session Token Tests
    // ============================================================================

    #[test]
    fn test_token_round_trip() {
        let keys = SessionKeys::new(TEST_JWT_SECRET);
        let user = sample_user();

        let token = keys.issue(&user).unwrap();
        let claims = keys.verify(&token).unwrap();

        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "X");
        assert_eq!(claims.avatar_url, "https://a/b");
        assert_eq!(
            claims.exp - claims.iat,
            Duration::days(SESSION_TTL_DAYS).num_seconds() as usize
        );
    }

    #[test]
    fn test_token_valid_until_expiry() {
        let keys = SessionKeys::new(TEST_JWT_SECRET);
        let user = sample_user();

        let near_end = keys
            .issue_at(&user, Utc::now() - Duration::days(SESSION_TTL_DAYS) + Duration::minutes(5))
            .unwrap();
        assert_eq!(keys.verify(&near_end).unwrap().sub, user.id);

        let expired = keys
            .issue_at(&user, Utc::now() - Duration::days(SESSION_TTL_DAYS) - Duration::minutes(5))
            .unwrap();
        assert_eq!(keys.verify(&expired), Err(AuthError::Expired));
    }

    #[test]
    fn test_token_wrong_secret_rejected() {
        let issuer = SessionKeys::new(TEST_JWT_SECRET);
        let verifier = SessionKeys::new("wrong_secret_key");

        let token = issuer.issue(&sample_user()).unwrap();
        assert_eq!(verifier.verify(&token), Err(AuthError::InvalidSignature));
    }

    #[test]
    fn test_token_malformed_or_missing() {
        let keys = SessionKeys::new(TEST_JWT_SECRET);

        assert_eq!(keys.verify("not.a.jwt"), Err(AuthError::Malformed));
        assert_eq!(keys.verify("garbage"), Err(AuthError::Malformed));
        assert_eq!(keys.verify(""), Err(AuthError::Missing));
    }

    #[test]
    fn test_bearer_token_extraction() {
        assert_eq!(bearer_token(Some("Bearer abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(Some("abc.def.ghi")), Ok("abc.def.ghi"));
        assert_eq!(bearer_token(Some("Bearer ")), Err(AuthError::Missing));
        assert_eq!(bearer_token(Some("")), Err(AuthError::Missing));
        assert_eq!(bearer_token(None), Err(AuthError::Missing));
    }

    // ============================================================================
    // Validator Tests
    // ============================================================================

    #[test]
    fn test_register_validator() {
        let validator = validators::RegisterValidator;

        let ok = validator.validate(&RegisterRequest {
            code: "abc".to_string(),
        });
        assert!(ok.is_valid);

        let blank = validator.validate(&RegisterRequest {
            code: "  ".to_string(),
        });
        assert!(!blank.is_valid);
        assert!(blank.errors.iter().any(|e| e.field == "code"));
    }

    // ============================================================================
    // Resolver Tests
    // ============================================================================

    #[tokio::test]
    async fn test_resolve_creates_then_reuses_user() {
        let (pool, _dir) = setup_test_db().await;
        let store = UserStore::new(pool.clone());

        let first = resolver::resolve_user(&store, &sample_identity()).await.unwrap();
        assert_eq!(first.provider_id, 1);
        assert_eq!(first.login, "x");
        assert_eq!(first.name, "X");

        // A later login with a changed profile keeps the stored one.
        let mut renamed = sample_identity();
        renamed.name = "Someone Else".to_string();
        let second = resolver::resolve_user(&store, &renamed).await.unwrap();

        assert_eq!(second, first);
        assert_eq!(user_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_duplicate_insert_is_conflict() {
        let (pool, _dir) = setup_test_db().await;
        let store = UserStore::new(pool);

        let user = sample_user();
        store.insert(&user).await.unwrap();

        let mut twin = sample_user();
        twin.id = "another-id".to_string();
        let err = store.insert(&twin).await.unwrap_err();
        assert!(matches!(err, store::StoreError::Conflict));
    }

    #[tokio::test]
    async fn test_concurrent_first_logins_create_one_user() {
        let (pool, _dir) = setup_test_db().await;
        let store = UserStore::new(pool.clone());

        let handles: Vec<_> = (0..16)
            .map(|_| {
                let store = store.clone();
                tokio::spawn(async move {
                    resolver::resolve_user(&store, &sample_identity()).await
                })
            })
            .collect();

        let mut ids = Vec::new();
        for handle in handles {
            ids.push(handle.await.unwrap().unwrap().id);
        }

        ids.dedup();
        assert_eq!(ids.len(), 1, "every login must resolve to the same user");
        assert_eq!(user_count(&pool).await, 1);
    }

    // ============================================================================
    // Register Endpoint Tests
    // ============================================================================

    #[tokio::test]
    async fn test_register_issues_token_for_new_user() {
        let server = MockServer::start().await;
        mount_github(&server).await;
        let (state, pool, _dir) = test_state(&server.uri()).await;

        let (status, body) = send(
            app_router(state.clone()),
            Method::POST,
            "/register",
            None,
            Some(json!({ "code": "abc" })),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let token = body["token"].as_str().unwrap();
        let claims = state.sessions.verify(token).unwrap();

        let user = state.users.find_by_provider_id(1).await.unwrap().unwrap();
        assert_eq!(claims.sub, user.id);
        assert_eq!(claims.name, "X");

        // Logging in again resolves to the same account.
        let (status, body) = send(
            app_router(state.clone()),
            Method::POST,
            "/register",
            None,
            Some(json!({ "code": "abc" })),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        let again = state.sessions.verify(body["token"].as_str().unwrap()).unwrap();
        assert_eq!(again.sub, user.id);
        assert_eq!(user_count(&pool).await, 1);
    }

    #[tokio::test]
    async fn test_register_rejects_malformed_body_without_calling_provider() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;
        let (state, pool, _dir) = test_state(&server.uri()).await;

        for body in [json!({}), json!({ "code": 42 }), json!({ "code": "" })] {
            let (status, response) = send(
                app_router(state.clone()),
                Method::POST,
                "/register",
                None,
                Some(body),
            )
            .await;
            assert_eq!(status, StatusCode::BAD_REQUEST);
            assert_eq!(response["code"], "VALIDATION_ERROR");
        }

        assert_eq!(user_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_register_provider_failure_creates_no_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "error": "bad_verification_code"
            })))
            .mount(&server)
            .await;
        let (state, pool, _dir) = test_state(&server.uri()).await;

        let (status, body) = send(
            app_router(state),
            Method::POST,
            "/register",
            None,
            Some(json!({ "code": "stale" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert!(body.get("token").is_none());
        assert_eq!(user_count(&pool).await, 0);
    }

    #[tokio::test]
    async fn test_register_schema_mismatch_creates_no_user() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/login/oauth/access_token"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(json!({ "access_token": "gho_abc" })),
            )
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/user"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "id": 1,
                "login": "x",
                "name": null,
                "avatar_url": "https://a/b"
            })))
            .mount(&server)
            .await;
        let (state, pool, _dir) = test_state(&server.uri()).await;

        let (status, _) = send(
            app_router(state),
            Method::POST,
            "/register",
            None,
            Some(json!({ "code": "abc" })),
        )
        .await;

        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(user_count(&pool).await, 0);
    }
}
