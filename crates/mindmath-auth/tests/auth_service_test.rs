//! Integration tests for the authentication service against an
//! in-memory SurrealDB session store.

use chrono::{Duration, Utc};
use mindmath_auth::config::AuthConfig;
use mindmath_auth::error::AuthError;
use mindmath_auth::service::AuthService;
use mindmath_auth::{password, token};
use mindmath_core::models::session::CreateSession;
use mindmath_core::models::user::{CreateUser, User};
use mindmath_core::repository::{SessionRepository, UserRepository};
use mindmath_db::repository::{SurrealSessionRepository, SurrealUserRepository};
use std::collections::HashSet;
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem};
use uuid::Uuid;

fn test_config() -> AuthConfig {
    AuthConfig {
        jwt_secret: "integration-test-secret".into(),
        issuer: "mindmath-test".into(),
        session_ttl_secs: 3600,
        min_password_length: 8,
    }
}

/// Spin up an in-memory DB, run migrations, and create one user.
async fn setup() -> (
    AuthService<SurrealSessionRepository<Db>>,
    SurrealSessionRepository<Db>, // second store handle for direct access
    User,
    Surreal<Db>,
) {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    mindmath_db::run_migrations(&db).await.unwrap();

    let user = create_user(&db, "alice@example.com", "alice").await;

    let svc = AuthService::new(SurrealSessionRepository::new(db.clone()), test_config());
    let store = SurrealSessionRepository::new(db.clone());

    (svc, store, user, db)
}

async fn create_user(db: &Surreal<Db>, email: &str, username: &str) -> User {
    let user_repo = SurrealUserRepository::new(db.clone());
    user_repo
        .create(CreateUser {
            email: email.into(),
            username: username.into(),
            password_hash: password::hash_password("correct-horse-battery").unwrap(),
            first_name: "Test".into(),
            last_name: "User".into(),
        })
        .await
        .unwrap()
}

#[tokio::test]
async fn issue_then_validate_returns_same_user() {
    let (svc, _, user, _db) = setup().await;

    let credential = svc
        .issue(&user, Some("127.0.0.1".into()), Some("TestAgent".into()))
        .await
        .unwrap();

    let authenticated = svc.validate(&credential).await.unwrap();
    assert_eq!(authenticated.user_id, user.id);
}

#[tokio::test]
async fn revoke_one_makes_credential_unusable_before_expiry() {
    let (svc, _, user, _db) = setup().await;

    // One hour TTL — nowhere near natural expiry when we revoke.
    let credential = svc.issue(&user, None, None).await.unwrap();
    let authenticated = svc.validate(&credential).await.unwrap();

    svc.revoke_one(authenticated.session_id).await.unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionNotFound));
}

#[tokio::test]
async fn revoke_one_is_idempotent() {
    let (svc, _, _, _db) = setup().await;

    // Deleting an id that never existed is success, not an error.
    svc.revoke_one(Uuid::new_v4()).await.unwrap();

    // Deleting the same session twice is equally fine.
    let user = create_user(&_db, "bob@example.com", "bob").await;
    let credential = svc.issue(&user, None, None).await.unwrap();
    let authenticated = svc.validate(&credential).await.unwrap();
    svc.revoke_one(authenticated.session_id).await.unwrap();
    svc.revoke_one(authenticated.session_id).await.unwrap();
}

#[tokio::test]
async fn revoke_all_kills_only_that_users_sessions() {
    let (svc, _, alice, db) = setup().await;
    let bob = create_user(&db, "bob@example.com", "bob").await;

    let alice_cred_1 = svc.issue(&alice, None, None).await.unwrap();
    let alice_cred_2 = svc.issue(&alice, None, None).await.unwrap();
    let bob_cred = svc.issue(&bob, None, None).await.unwrap();

    let revoked = svc.revoke_all(alice.id).await.unwrap();
    assert_eq!(revoked, 2);

    for cred in [&alice_cred_1, &alice_cred_2] {
        let err = svc.validate(cred).await.unwrap_err();
        assert!(matches!(err, AuthError::SessionNotFound));
    }

    // Bob is unaffected.
    let authenticated = svc.validate(&bob_cred).await.unwrap();
    assert_eq!(authenticated.user_id, bob.id);
}

#[tokio::test]
async fn scenario_issue_validate_revoke_all_validate() {
    let (svc, _, user, _db) = setup().await;

    let credential = svc.issue(&user, None, None).await.unwrap();
    assert!(svc.validate(&credential).await.is_ok());

    svc.revoke_all(user.id).await.unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionNotFound));
}

#[tokio::test]
async fn expired_session_row_fails_even_if_not_swept() {
    let (svc, store, user, _db) = setup().await;
    let config = test_config();

    // Plant a session that expired an hour ago, and mint a credential
    // whose own expiry is still in the future — the store-side check
    // must reject it regardless of the signed claim.
    let session_token = token::generate_session_token();
    let session = store
        .create(CreateSession {
            user_id: user.id,
            session_token: session_token.clone(),
            ip_address: None,
            device_info: None,
            expires_at: Utc::now() - Duration::hours(1),
        })
        .await
        .unwrap();

    let credential = token::encode_credential(
        user.id,
        &session_token,
        Utc::now() + Duration::hours(1),
        &config,
    )
    .unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));

    // The row still physically exists — it was not swept.
    assert!(store.get_by_token(&session.session_token).await.is_ok());
}

#[tokio::test]
async fn expired_credential_fails_with_session_expired() {
    let (svc, store, user, _db) = setup().await;
    let config = test_config();

    let session_token = token::generate_session_token();
    store
        .create(CreateSession {
            user_id: user.id,
            session_token: session_token.clone(),
            ip_address: None,
            device_info: None,
            expires_at: Utc::now() - Duration::hours(1),
        })
        .await
        .unwrap();

    // Credential expiry mirrors the session's, both in the past.
    let credential = token::encode_credential(
        user.id,
        &session_token,
        Utc::now() - Duration::hours(1),
        &config,
    )
    .unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionExpired));
}

#[tokio::test]
async fn foreign_key_credential_fails_with_invalid_credential() {
    let (svc, _, user, _db) = setup().await;

    let foreign_config = AuthConfig {
        jwt_secret: "attacker-controlled-secret".into(),
        ..test_config()
    };
    let credential = token::encode_credential(
        user.id,
        "forged-session-token",
        Utc::now() + Duration::hours(1),
        &foreign_config,
    )
    .unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential(_)));
}

#[tokio::test]
async fn tampered_credential_fails_with_invalid_credential() {
    let (svc, _, user, _db) = setup().await;

    let credential = svc.issue(&user, None, None).await.unwrap();
    let tampered = format!("{credential}x");

    let err = svc.validate(&tampered).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential(_)));
}

#[tokio::test]
async fn non_uuid_subject_fails_with_invalid_credential() {
    let (svc, store, user, _db) = setup().await;
    let config = test_config();

    // Correctly signed and backed by a live session row, but the
    // subject claim is not a UUID.
    let session_token = token::generate_session_token();
    store
        .create(CreateSession {
            user_id: user.id,
            session_token: session_token.clone(),
            ip_address: None,
            device_info: None,
            expires_at: Utc::now() + Duration::hours(1),
        })
        .await
        .unwrap();

    let now = Utc::now().timestamp();
    let claims = mindmath_auth::CredentialClaims {
        sub: "not-a-uuid".into(),
        session_token,
        iss: config.issuer.clone(),
        iat: now,
        nbf: now,
        exp: now + 3600,
    };
    let key = jsonwebtoken::EncodingKey::from_secret(config.jwt_secret.as_bytes());
    let header = jsonwebtoken::Header::new(jsonwebtoken::Algorithm::HS256);
    let credential = jsonwebtoken::encode(&header, &claims, &key).unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::InvalidCredential(_)));
}

#[tokio::test]
async fn well_formed_credential_without_backing_session_fails() {
    let (svc, _, user, _db) = setup().await;
    let config = test_config();

    // Correct key, correct shape, but the session was never created.
    let credential = token::encode_credential(
        user.id,
        &token::generate_session_token(),
        Utc::now() + Duration::hours(1),
        &config,
    )
    .unwrap();

    let err = svc.validate(&credential).await.unwrap_err();
    assert!(matches!(err, AuthError::SessionNotFound));
}

#[tokio::test]
async fn issued_session_tokens_never_collide() {
    let (svc, _, user, _db) = setup().await;
    let config = test_config();

    let mut seen = HashSet::new();
    for _ in 0..50 {
        let credential = svc.issue(&user, None, None).await.unwrap();
        let claims = token::decode_credential(&credential, &config).unwrap();
        assert!(seen.insert(claims.session_token));
    }
}

#[tokio::test]
async fn sweep_removes_only_expired_sessions() {
    let (svc, store, user, _db) = setup().await;

    // One live session via the normal path.
    let live_credential = svc.issue(&user, None, None).await.unwrap();

    // Two expired rows planted directly.
    for _ in 0..2 {
        store
            .create(CreateSession {
                user_id: user.id,
                session_token: token::generate_session_token(),
                ip_address: None,
                device_info: None,
                expires_at: Utc::now() - Duration::minutes(5),
            })
            .await
            .unwrap();
    }

    let swept = svc.sweep_expired().await.unwrap();
    assert_eq!(swept, 2);

    // The live session survived the sweep.
    assert!(svc.validate(&live_credential).await.is_ok());
}
