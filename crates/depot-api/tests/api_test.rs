//! End-to-end tests: full router over an in-memory database.

use std::str::FromStr;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderMap, Request, StatusCode, header};
use serde_json::Value;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use tower::ServiceExt;

use depot_api::router::build_router;
use depot_api::state::AppState;
use depot_auth::access::AccessPolicy;
use depot_auth::credentials::CredentialVerifier;
use depot_auth::password::PasswordHasher;
use depot_auth::session::store::SessionStore;
use depot_core::config::AppConfig;
use depot_database::migration::run_migrations;
use depot_database::repositories::file::FileRepository;
use depot_database::repositories::group::GroupRepository;
use depot_database::repositories::user::UserRepository;
use depot_entity::file::CreateFile;
use depot_entity::group::Group;
use depot_entity::user::{CreateUser, User};
use depot_service::file::{DownloadService, FileService};
use depot_service::group::GroupService;
use depot_service::user::UserService;

/// Test application context.
struct TestApp {
    router: Router,
    state: AppState,
    hasher: PasswordHasher,
}

impl TestApp {
    async fn new() -> Self {
        Self::with_config(AppConfig::default()).await
    }

    /// Builds an app whose sessions expire the moment they are created.
    async fn with_instant_expiry() -> Self {
        let mut config = AppConfig::default();
        config.session.ttl_hours = 0;
        Self::with_config(config).await
    }

    async fn with_config(config: AppConfig) -> Self {
        let options = SqliteConnectOptions::from_str("sqlite::memory:")
            .expect("parse sqlite url")
            .foreign_keys(true);
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .expect("connect in-memory sqlite");
        run_migrations(&pool).await.expect("run migrations");

        let user_repo = Arc::new(UserRepository::new(pool.clone()));
        let group_repo = Arc::new(GroupRepository::new(pool.clone()));
        let file_repo = Arc::new(FileRepository::new(pool));

        let password_hasher = Arc::new(PasswordHasher::new());
        let credentials = Arc::new(CredentialVerifier::new(
            Arc::clone(&user_repo),
            Arc::clone(&password_hasher),
        ));
        let access = Arc::new(AccessPolicy::new(Arc::clone(&group_repo)));
        let sessions = Arc::new(SessionStore::new(&config.session));

        let state = AppState {
            config: Arc::new(config),
            sessions,
            credentials,
            access: Arc::clone(&access),
            user_repo: Arc::clone(&user_repo),
            group_repo: Arc::clone(&group_repo),
            file_repo: Arc::clone(&file_repo),
            file_service: Arc::new(FileService::new(
                Arc::clone(&file_repo),
                Arc::clone(&access),
            )),
            download_service: Arc::new(DownloadService::new(Arc::clone(&file_repo))),
            group_service: Arc::new(GroupService::new(
                Arc::clone(&group_repo),
                Arc::clone(&access),
            )),
            user_service: Arc::new(UserService::new(
                Arc::clone(&user_repo),
                Arc::clone(&password_hasher),
                Arc::clone(&access),
            )),
        };

        Self {
            router: build_router(state.clone()),
            state,
            hasher: PasswordHasher::new(),
        }
    }

    async fn create_group(&self, name: &str) -> Group {
        self.state.group_repo.create(name).await.expect("create group")
    }

    async fn create_user(&self, username: &str, password: &str, group_ids: Vec<i64>) -> User {
        let password_hash = self.hasher.hash_password(password).expect("hash password");
        self.state
            .user_repo
            .create(&CreateUser {
                username: username.into(),
                password_hash,
                group_ids,
            })
            .await
            .expect("create user")
    }

    async fn register_file(&self, name: &str, path: &str, group_id: i64) -> i64 {
        self.state
            .file_repo
            .create(&CreateFile {
                name: name.into(),
                file_path: path.into(),
                group_id,
                description: String::new(),
            })
            .await
            .expect("register file")
            .id
    }

    /// Logs in and returns the `session_id=<token>` cookie pair.
    async fn login(&self, username: &str, password: &str) -> String {
        let response = self
            .request(
                "POST",
                "/login",
                Some(serde_json::json!({ "username": username, "password": password })),
                None,
            )
            .await;

        assert_eq!(response.status, StatusCode::OK, "login failed: {:?}", response.body);

        let set_cookie = response
            .headers
            .get(header::SET_COOKIE)
            .expect("login must set a cookie")
            .to_str()
            .expect("cookie header is ascii");

        set_cookie
            .split(';')
            .next()
            .expect("cookie pair")
            .to_string()
    }

    async fn request(
        &self,
        method: &str,
        path: &str,
        body: Option<Value>,
        cookie: Option<&str>,
    ) -> TestResponse {
        let body_str = body
            .map(|b| serde_json::to_string(&b).expect("serialize body"))
            .unwrap_or_default();

        let mut req = Request::builder()
            .method(method)
            .uri(path)
            .header(header::CONTENT_TYPE, "application/json");

        if let Some(cookie) = cookie {
            req = req.header(header::COOKIE, cookie);
        }

        let req = req.body(Body::from(body_str)).expect("build request");

        let response = self
            .router
            .clone()
            .oneshot(req)
            .await
            .expect("send request");

        let status = response.status();
        let headers = response.headers().clone();
        let bytes = axum::body::to_bytes(response.into_body(), 16 * 1024 * 1024)
            .await
            .expect("read body")
            .to_vec();
        let body: Value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);

        TestResponse {
            status,
            headers,
            bytes,
            body,
        }
    }
}

/// Response from a test request.
struct TestResponse {
    status: StatusCode,
    headers: HeaderMap,
    bytes: Vec<u8>,
    body: Value,
}

/// Writes a scratch file and returns its path.
async fn scratch_file(name: &str, content: &[u8]) -> String {
    let path = std::env::temp_dir().join(format!("depot-api-{}-{}", std::process::id(), name));
    tokio::fs::write(&path, content).await.expect("write scratch file");
    path.to_string_lossy().into_owned()
}

#[tokio::test]
async fn login_sets_the_session_cookie() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "alice", "password": "password123" })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .expect("set-cookie header")
        .to_str()
        .unwrap();

    assert!(set_cookie.starts_with("session_id="));
    assert!(set_cookie.contains("HttpOnly"));
    assert!(set_cookie.contains("SameSite=Strict"));
    assert!(set_cookie.contains("Path=/"));
    assert!(set_cookie.contains("Max-Age=86400"));
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let wrong_password = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "alice", "password": "nope" })),
            None,
        )
        .await;

    let unknown_user = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "nobody", "password": "nope" })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(wrong_password.body, unknown_user.body);
}

#[tokio::test]
async fn protected_routes_redirect_to_the_login_page() {
    let app = TestApp::new().await;

    for path in ["/api/me", "/api/files", "/api/admin/users"] {
        let response = app.request("GET", path, None, None).await;
        assert_eq!(response.status, StatusCode::SEE_OTHER, "{path}");
        assert_eq!(
            response.headers.get(header::LOCATION).unwrap(),
            "/login",
            "{path}"
        );
    }
}

#[tokio::test]
async fn a_garbage_token_redirects_like_a_missing_one() {
    let app = TestApp::new().await;

    let response = app
        .request("GET", "/api/files", None, Some("session_id=not-a-real-token"))
        .await;

    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn an_expired_session_redirects_to_login() {
    let app = TestApp::with_instant_expiry().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let cookie = app.login("alice", "password123").await;

    let response = app.request("GET", "/api/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn me_reports_the_session_snapshot() {
    let app = TestApp::new().await;
    let admins = app.create_group("admins").await;
    app.create_user("admin", "password123", vec![admins.id]).await;

    let cookie = app.login("admin", "password123").await;
    let response = app.request("GET", "/api/me", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    let data = &response.body["data"];
    assert_eq!(data["username"], "admin");
    assert_eq!(data["is_admin"], true);
    assert_eq!(data["group_ids"], serde_json::json!([admins.id]));
}

#[tokio::test]
async fn file_listing_is_scoped_to_the_session_groups() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    let other = app.create_group("other").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    app.register_file("mine.bin", "/data/mine.bin", staff.id).await;
    app.register_file("theirs.bin", "/data/theirs.bin", other.id).await;

    let cookie = app.login("alice", "password123").await;
    let response = app.request("GET", "/api/files", None, Some(&cookie)).await;

    assert_eq!(response.status, StatusCode::OK);
    let files = response.body["data"].as_array().unwrap();
    assert_eq!(files.len(), 1);
    assert_eq!(files[0]["name"], "mine.bin");
}

#[tokio::test]
async fn download_streams_bytes_with_the_negotiated_headers() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let content = b"the quick brown fox jumps over the lazy dog";
    let path = scratch_file("download.bin", content).await;
    let file_id = app.register_file("nightly backup.bin", &path, staff.id).await;

    let cookie = app.login("alice", "password123").await;
    let response = app
        .request(
            "GET",
            &format!("/api/files/{file_id}/download"),
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(
        response.headers.get(header::CONTENT_TYPE).unwrap(),
        "application/octet-stream"
    );
    assert_eq!(
        response.headers.get(header::CONTENT_LENGTH).unwrap(),
        &content.len().to_string()
    );

    let disposition = response
        .headers
        .get(header::CONTENT_DISPOSITION)
        .unwrap()
        .to_str()
        .unwrap();
    assert!(disposition.starts_with("attachment; filename*=UTF-8''"));
    // The space in the display name is percent-encoded.
    assert!(disposition.contains("%20"));

    assert_eq!(response.bytes, content);

    let _ = tokio::fs::remove_file(&path).await;
}

#[tokio::test]
async fn download_outcomes_by_gate() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    let other = app.create_group("other").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let foreign_file = app
        .register_file("theirs.bin", "/data/theirs.bin", other.id)
        .await;
    let broken_file = app
        .register_file("broken.bin", "/nonexistent/broken.bin", staff.id)
        .await;

    let cookie = app.login("alice", "password123").await;

    // Malformed identifier.
    let response = app
        .request("GET", "/api/files/abc/download", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // Unknown identifier.
    let response = app
        .request("GET", "/api/files/424242/download", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::NOT_FOUND);

    // Wrong group.
    let response = app
        .request(
            "GET",
            &format!("/api/files/{foreign_file}/download"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    // Backing file unreadable.
    let response = app
        .request(
            "GET",
            &format!("/api/files/{broken_file}/download"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::INTERNAL_SERVER_ERROR);
}

#[tokio::test]
async fn admin_endpoints_reject_non_admins() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let cookie = app.login("alice", "password123").await;

    let response = app
        .request("GET", "/api/admin/users", None, Some(&cookie))
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);

    let response = app
        .request(
            "POST",
            "/api/admin/groups",
            Some(serde_json::json!({ "name": "sneaky" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn group_deletion_conflicts_until_its_files_are_gone() {
    let app = TestApp::new().await;
    let admins = app.create_group("admins").await;
    let backups = app.create_group("backups").await;
    app.create_user("admin", "password123", vec![admins.id]).await;

    let file_id = app
        .register_file("world.wld", "/data/world.wld", backups.id)
        .await;

    let cookie = app.login("admin", "password123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/groups/{}", backups.id),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::CONFLICT);

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/files/{file_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/groups/{}", backups.id),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn admins_cannot_delete_their_own_account_over_http() {
    let app = TestApp::new().await;
    let admins = app.create_group("admins").await;
    let admin = app.create_user("admin", "password123", vec![admins.id]).await;

    let cookie = app.login("admin", "password123").await;

    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{}", admin.id),
            None,
            Some(&cookie),
        )
        .await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    assert!(
        app.state
            .user_repo
            .find_by_id(admin.id)
            .await
            .unwrap()
            .is_some()
    );
}

#[tokio::test]
async fn logout_clears_the_cookie_and_invalidates_the_session() {
    let app = TestApp::new().await;
    let staff = app.create_group("staff").await;
    app.create_user("alice", "password123", vec![staff.id]).await;

    let cookie = app.login("alice", "password123").await;

    let response = app.request("POST", "/logout", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);

    let set_cookie = response
        .headers
        .get(header::SET_COOKIE)
        .expect("logout must clear the cookie")
        .to_str()
        .unwrap();
    assert!(set_cookie.starts_with("session_id=;"));
    assert!(set_cookie.contains("Max-Age="));

    // The old token no longer resolves.
    let response = app.request("GET", "/api/me", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::SEE_OTHER);

    // Logging out again is harmless.
    let response = app.request("POST", "/logout", None, Some(&cookie)).await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn admin_can_manage_users_end_to_end() {
    let app = TestApp::new().await;
    let admins = app.create_group("admins").await;
    let staff = app.create_group("staff").await;
    app.create_user("admin", "password123", vec![admins.id]).await;

    let cookie = app.login("admin", "password123").await;

    // Create.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "username": "bob",
                "password": "secret99",
                "group_ids": [staff.id],
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
    let bob_id = response.body["data"]["id"].as_i64().unwrap();

    // Creating a user with no groups is rejected.
    let response = app
        .request(
            "POST",
            "/api/admin/users",
            Some(serde_json::json!({
                "username": "lonely",
                "password": "secret99",
                "group_ids": [],
            })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    // The new user can log in.
    app.login("bob", "secret99").await;

    // Change bob's password; the old one stops working.
    let response = app
        .request(
            "PUT",
            &format!("/api/admin/users/{bob_id}/password"),
            Some(serde_json::json!({ "password": "rotated1" })),
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);

    let response = app
        .request(
            "POST",
            "/login",
            Some(serde_json::json!({ "username": "bob", "password": "secret99" })),
            None,
        )
        .await;
    assert_eq!(response.status, StatusCode::UNAUTHORIZED);
    app.login("bob", "rotated1").await;

    // Delete bob.
    let response = app
        .request(
            "DELETE",
            &format!("/api/admin/users/{bob_id}"),
            None,
            Some(&cookie),
        )
        .await;
    assert_eq!(response.status, StatusCode::OK);
}

#[tokio::test]
async fn group_overview_reports_member_and_file_counts() {
    let app = TestApp::new().await;
    let admins = app.create_group("admins").await;
    let backups = app.create_group("backups").await;
    app.create_user("admin", "password123", vec![admins.id]).await;
    app.create_user("bob", "password123", vec![backups.id]).await;
    app.register_file("world.wld", "/data/world.wld", backups.id).await;

    let cookie = app.login("admin", "password123").await;
    let response = app
        .request("GET", "/api/admin/groups", None, Some(&cookie))
        .await;

    assert_eq!(response.status, StatusCode::OK);
    let groups = response.body["data"].as_array().unwrap();

    let backups_row = groups
        .iter()
        .find(|g| g["name"] == "backups")
        .expect("backups group listed");
    assert_eq!(backups_row["member_count"], 1);
    assert_eq!(backups_row["file_count"], 1);
}
