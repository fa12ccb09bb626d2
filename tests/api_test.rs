use std::sync::Arc;

use axum::{
    body::{to_bytes, Body},
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{DateTime, TimeZone, Utc};
use clubboard::{
    api::create_app,
    auth::AuthService,
    config::Settings,
    domain::{CreateUserRequest, User, UserRole},
    lifecycle::{DeadlineZone, FixedClock, LifecycleClock},
    service::ServiceContext,
};
use serde_json::{json, Value};
use sqlx::sqlite::SqlitePoolOptions;
use tower::ServiceExt;

struct TestApp {
    router: Router,
    ctx: Arc<ServiceContext>,
}

impl TestApp {
    /// App whose clock reads 2025-03-20 06:00 UTC, with days ending at UTC
    /// midnight.
    async fn new() -> anyhow::Result<Self> {
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect("sqlite::memory:")
            .await?;
        sqlx::migrate!("./migrations").run(&pool).await?;

        let lifecycle = LifecycleClock::new(
            Arc::new(FixedClock(now())),
            DeadlineZone::from_offset_minutes(Some(0)),
        );
        let ctx = Arc::new(ServiceContext::sqlite(
            pool,
            Arc::new(AuthService::new("test-secret", 24)),
            lifecycle,
        ));
        let router = create_app(ctx.clone(), Arc::new(Settings::default()));

        Ok(Self { router, ctx })
    }

    async fn user(&self, email: &str, role: UserRole, club: &str) -> anyhow::Result<(User, String)> {
        let user = self.ctx.user_service.create_user(CreateUserRequest {
            name: "Test Admin".to_string(),
            email: email.to_string(),
            password: "secret123".to_string(),
            role: Some(role),
            club: Some(club.to_string()),
        }).await?;
        let token = self.ctx.auth_service.issue_token(&user)?;
        Ok((user, token))
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> anyhow::Result<(StatusCode, Value)> {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))?,
            None => builder.body(Body::empty())?,
        };

        let response = self.router.clone().oneshot(request).await?;
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await?;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes)?
        };
        Ok((status, value))
    }
}

fn now() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2025, 3, 20, 6, 0, 0).unwrap()
}

fn club_body(name: &str, deadline: Option<&str>) -> Value {
    json!({
        "name": name,
        "description": "We build things",
        "contact_email": "club@example.com",
        "category": "coding",
        "is_recruiting": true,
        "recruitment_deadline": deadline,
    })
}

fn application_body(kind: &str, reference_id: &Value) -> Value {
    json!({
        "kind": kind,
        "reference_id": reference_id,
        "student_name": "Asha",
        "email": "asha@example.com",
        "branch": "CSE",
        "year": "2",
    })
}

#[tokio::test]
async fn test_health_and_root() -> anyhow::Result<()> {
    let app = TestApp::new().await?;

    let (status, body) = app.send(Method::GET, "/health", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["database"], "connected");

    let (status, body) = app.send(Method::GET, "/", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "operational");

    Ok(())
}

#[tokio::test]
async fn test_recruitment_feed_hides_and_sorts() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    for (name, deadline) in [
        ("Open Club", Some("2025-03-23")),
        ("Closed Club", Some("2025-03-19")),
        ("Gone Club", Some("2025-03-17")),
        ("Rolling Club", None),
    ] {
        let (status, _) = app
            .send(Method::POST, "/api/clubs", Some(&root), Some(club_body(name, deadline)))
            .await?;
        assert_eq!(status, StatusCode::CREATED);
    }

    let (status, body) = app.send(Method::GET, "/api/clubs", None, None).await?;
    assert_eq!(status, StatusCode::OK);

    let listed: Vec<(String, String, bool)> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|c| (
            c["name"].as_str().unwrap().to_string(),
            c["lifecycle"]["status"].as_str().unwrap().to_string(),
            c["lifecycle"]["actions"]["primary"].as_bool().unwrap(),
        ))
        .collect();

    assert_eq!(
        listed,
        vec![
            ("Closed Club".to_string(), "CLOSED".to_string(), false),
            ("Open Club".to_string(), "OPEN".to_string(), true),
            ("Rolling Club".to_string(), "OPEN".to_string(), true),
        ]
    );

    Ok(())
}

#[tokio::test]
async fn test_deadline_stored_at_end_of_day() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    let (_, body) = app
        .send(Method::POST, "/api/clubs", Some(&root), Some(club_body("ACM", Some("2025-03-24T09:30:00Z"))))
        .await?;

    let stored: DateTime<Utc> = serde_json::from_value(body["recruitment_deadline"].clone())?;
    assert_eq!(
        stored,
        Utc.with_ymd_and_hms(2025, 3, 24, 23, 59, 59).unwrap() + chrono::Duration::milliseconds(999)
    );

    Ok(())
}

#[tokio::test]
async fn test_apply_gated_by_lifecycle() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    let (_, open) = app
        .send(Method::POST, "/api/clubs", Some(&root), Some(club_body("Open Club", Some("2025-03-23"))))
        .await?;
    let (_, closed) = app
        .send(Method::POST, "/api/clubs", Some(&root), Some(club_body("Closed Club", Some("2025-03-19"))))
        .await?;

    let (status, body) = app
        .send(Method::POST, "/api/applications", None, Some(application_body("club", &closed["id"])))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("closed"));

    let (status, body) = app
        .send(Method::POST, "/api/applications", None, Some(application_body("club", &open["id"])))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["status"], "pending");

    Ok(())
}

#[tokio::test]
async fn test_submission_window_outlives_registration() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, acm) = app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;

    let (status, event) = app
        .send(Method::POST, "/api/events", Some(&acm), Some(json!({
            "name": "Hack Night",
            "problem_statement": "Build a thing",
            "description": "Overnight",
            "club_name": "ACM",
            "event_date": "2025-03-25T10:00:00Z",
            "registration_deadline": "2025-03-19",
            "submission_deadline": "2025-03-22",
        })))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (_, listed) = app.send(Method::GET, "/api/events", None, None).await?;
    let lifecycle = &listed[0]["lifecycle"];
    assert_eq!(lifecycle["status"], "OPEN");
    assert_eq!(lifecycle["actions"]["primary"], false);
    assert_eq!(lifecycle["actions"]["submit"], true);

    let (status, _) = app
        .send(Method::POST, "/api/applications", None, Some(application_body("event", &event["id"])))
        .await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = app
        .send(Method::POST, "/api/submissions", None, Some(json!({
            "event_id": event["id"],
            "student_name": "Asha",
            "email": "asha@example.com",
            "enrollment_no": "21CS001",
            "year": "2",
            "branch": "CSE",
            "drive_link": "https://drive.example.com/asha",
        })))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let uri = format!("/api/submissions/event/{}", event["id"].as_str().unwrap());
    let (status, submissions) = app.send(Method::GET, &uri, Some(&acm), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(submissions.as_array().unwrap().len(), 1);

    Ok(())
}

#[tokio::test]
async fn test_club_admin_limited_to_own_club() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, acm) = app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;

    let (status, _) = app
        .send(Method::POST, "/api/clubs", Some(&acm), Some(club_body("Robotics", None)))
        .await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, _) = app
        .send(Method::POST, "/api/clubs", Some(&acm), Some(club_body("ACM", None)))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send(Method::POST, "/api/clubs", Some(&acm), Some(club_body("ACM", None)))
        .await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, _) = app.send(Method::POST, "/api/clubs", None, Some(club_body("ACM", None))).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_club_upsert_and_close_by_name() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    let (status, created) = app
        .send(Method::PUT, "/api/clubs/Chess%20Club", Some(&root), Some(json!({
            "description": "Knights and bishops",
            "is_recruiting": true,
        })))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(created["name"], "Chess Club");
    assert_eq!(created["is_recruiting"], true);

    let (status, body) = app.send(Method::DELETE, "/api/clubs/Chess%20Club", Some(&root), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["club"]["is_recruiting"], false);

    let (status, _) = app.send(Method::DELETE, "/api/clubs/Nobody", Some(&root), None).await?;
    assert_eq!(status, StatusCode::OK);

    Ok(())
}

#[tokio::test]
async fn test_club_name_trimmed_before_checks() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, acm) = app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    let (status, _) = app
        .send(Method::POST, "/api/clubs", Some(&root), Some(club_body("   ", None)))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, created) = app
        .send(Method::POST, "/api/clubs", Some(&acm), Some(club_body("ACM ", None)))
        .await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["name"], "ACM");

    Ok(())
}

#[tokio::test]
async fn test_club_update_rejects_bad_contact_email() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;

    let (status, _) = app
        .send(Method::POST, "/api/clubs", Some(&root), Some(club_body("ACM", None)))
        .await?;
    assert_eq!(status, StatusCode::CREATED);

    let (status, _) = app
        .send(Method::PUT, "/api/clubs/ACM", Some(&root), Some(json!({
            "contact_email": "not-an-email",
        })))
        .await?;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);

    let (status, updated) = app
        .send(Method::PUT, "/api/clubs/ACM", Some(&root), Some(json!({
            "contact_email": "board@acm.example.com",
        })))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["contact_email"], "board@acm.example.com");

    Ok(())
}

#[tokio::test]
async fn test_admin_postings_include_hidden() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;
    let (_, acm) = app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;

    app.send(Method::POST, "/api/clubs", Some(&root), Some(club_body("ACM", Some("2025-03-10")))).await?;
    app.send(Method::POST, "/api/clubs", Some(&root), Some(club_body("Robotics", None))).await?;

    let (_, feed) = app.send(Method::GET, "/api/clubs", None, None).await?;
    let feed_names: Vec<&str> = feed.as_array().unwrap().iter().map(|c| c["name"].as_str().unwrap()).collect();
    assert_eq!(feed_names, vec!["Robotics"]);

    let (status, postings) = app.send(Method::GET, "/api/admin/postings", Some(&acm), None).await?;
    assert_eq!(status, StatusCode::OK);
    let recruitments = postings["recruitments"].as_array().unwrap();
    assert_eq!(recruitments.len(), 1);
    assert_eq!(recruitments[0]["name"], "ACM");
    assert_eq!(recruitments[0]["lifecycle"]["status"], "HIDDEN");
    assert_eq!(recruitments[0]["lifecycle"]["kind"], "recruitment");

    Ok(())
}

#[tokio::test]
async fn test_login_and_profile() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;

    let (status, _) = app
        .send(Method::POST, "/api/auth/login", None, Some(json!({
            "email": "acm@example.com",
            "password": "wrong-password",
        })))
        .await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, body) = app
        .send(Method::POST, "/api/auth/login", None, Some(json!({
            "email": "acm@example.com",
            "password": "secret123",
        })))
        .await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user"]["role"], "clubadmin");
    let token = body["token"].as_str().unwrap().to_string();

    let (status, profile) = app.send(Method::GET, "/api/auth/profile", Some(&token), None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(profile["club"], "ACM");

    let (status, _) = app.send(Method::GET, "/api/auth/profile", None, None).await?;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    Ok(())
}

#[tokio::test]
async fn test_user_management_requires_superadmin() -> anyhow::Result<()> {
    let app = TestApp::new().await?;
    let (_, root) = app.user("root@example.com", UserRole::SuperAdmin, "All").await?;
    let (_, acm) = app.user("acm@example.com", UserRole::ClubAdmin, "ACM").await?;

    let new_user = json!({
        "name": "Robo Lead",
        "email": "robo@example.com",
        "password": "secret123",
        "club": "Robotics",
    });

    let (status, _) = app.send(Method::POST, "/api/auth/users", Some(&acm), Some(new_user.clone())).await?;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, created) = app.send(Method::POST, "/api/auth/users", Some(&root), Some(new_user.clone())).await?;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["role"], "clubadmin");

    let (status, _) = app.send(Method::POST, "/api/auth/users", Some(&root), Some(new_user)).await?;
    assert_eq!(status, StatusCode::CONFLICT);

    let uri = format!("/api/auth/users/{}/password", created["id"].as_str().unwrap());
    let (status, _) = app.send(Method::PUT, &uri, Some(&root), Some(json!({ "password": "abc" }))).await?;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, directory) = app.send(Method::GET, "/api/clubs?show_all=true", None, None).await?;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(directory, json!(["ACM", "Robotics"]));

    Ok(())
}
