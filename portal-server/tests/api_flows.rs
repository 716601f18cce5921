//! End-to-end flows through the full router (auth middleware included)

use std::sync::Arc;

use async_trait::async_trait;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use portal_server::services::insight::{InsightError, InsightProvider};
use portal_server::store::PortalStore;
use portal_server::{Config, ServerState};
use serde_json::{Value, json};
use tempfile::TempDir;

#[derive(Debug)]
struct CannedInsight;

#[async_trait]
impl InsightProvider for CannedInsight {
    fn is_configured(&self) -> bool {
        true
    }

    async fn generate(&self, prompt: &str) -> Result<String, InsightError> {
        assert!(prompt.contains("Total Members"));
        Ok("Ringkasan eksekutif".to_string())
    }
}

struct TestApp {
    state: ServerState,
    _dir: TempDir,
}

impl TestApp {
    fn new() -> Self {
        Self::configured(|_| {})
    }

    fn configured(tweak: impl FnOnce(&mut Config)) -> Self {
        let dir = TempDir::new().unwrap();
        let mut config = Config::with_overrides(dir.path().to_string_lossy(), 0);
        config.public_base_url = "https://portal.spka.test".into();
        config.ajk_club_id = "c1".into();
        config.default_partner_id = "p1".into();
        tweak(&mut config);
        config.ensure_work_dir_structure().unwrap();

        let state = ServerState::with_parts(
            config,
            Arc::new(PortalStore::seeded()),
            Arc::new(CannedInsight),
        );
        Self { state, _dir: dir }
    }

    async fn send(&self, req: Request<Body>) -> (StatusCode, Vec<u8>, http::HeaderMap) {
        let resp = self.state.https.oneshot(req).await.unwrap();
        let status = resp.status();
        let headers = resp.headers().clone();
        let bytes = resp.into_body().collect().await.unwrap().to_bytes();
        (status, bytes.to_vec(), headers)
    }

    async fn call(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
        }
        let req = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };
        let (status, bytes, _) = self.send(req).await;
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, value)
    }

    async fn login(&self, role: &str) -> String {
        let (status, body) = self
            .call(
                Method::POST,
                "/api/auth/session",
                None,
                Some(json!({ "role": role })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["token"].as_str().unwrap().to_string()
    }
}

fn application(club_id: &str, ic_no: &str) -> Value {
    json!({
        "full_name": "Siti Aminah",
        "ic_no": ic_no,
        "email": "siti@example.my",
        "phone": "019-876 5432",
        "address": "Jalan Ampang, Kuala Lumpur",
        "club_id": club_id,
        "age": 34
    })
}

#[tokio::test]
async fn health_is_public() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["members"], 10);
}

#[tokio::test]
async fn sessions_carry_role_menus() {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::POST, "/api/auth/session", None, Some(json!({ "role": "PUBLIC" })))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body.get("token").is_none());
    assert_eq!(body["menu"][1]["to"], "/register");

    let token = app.login("AJK").await;
    let (status, me) = app.call(Method::GET, "/api/auth/me", Some(&token), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "AJK");
    assert_eq!(me["club_id"], "c1");
    assert_eq!(me["role_label"], "AJK Kelab");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/auth/session",
            None,
            Some(json!({ "role": "PARTNER", "partner_id": "p404" })),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ajk_session_needs_an_existing_club() {
    let app = TestApp::configured(|config| config.ajk_club_id = "c404".into());
    let (status, body) = app
        .call(Method::POST, "/api/auth/session", None, Some(json!({ "role": "AJK" })))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 6001);
}

#[tokio::test]
async fn gated_routes_need_a_session() {
    let app = TestApp::new();
    let (status, body) = app.call(Method::GET, "/api/members", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app
        .call(Method::GET, "/api/members", Some("not-a-token"), None)
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let partner = app.login("PARTNER").await;
    let (status, body) = app.call(Method::GET, "/api/members", Some(&partner), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2001);

    let ajk = app.login("AJK").await;
    let (status, _) = app.call(Method::GET, "/api/clubs", Some(&ajk), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn registration_then_approval() {
    let app = TestApp::new();

    let (status, created) = app
        .call(
            Method::POST,
            "/api/registrations",
            None,
            Some(application("c2", "900202-14-1234")),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{created}");
    assert_eq!(created["status"], "PENDING");
    assert_eq!(created["club_name"], "Kelab Kebajikan Guru");
    assert!(created["approved_date"].is_null());
    let id = created["id"].as_str().unwrap().to_string();

    // same person, same club, still pending
    let (status, body) = app
        .call(
            Method::POST,
            "/api/registrations",
            None,
            Some(application("c2", "900202141234")),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 8002);

    let admin = app.login("ADMIN").await;
    let (_, listed) = app
        .call(Method::GET, "/api/members?status=PENDING", Some(&admin), None)
        .await;
    assert!(listed.as_array().unwrap().iter().any(|m| m["id"] == id.as_str()));

    let (status, approved) = app
        .call(
            Method::PUT,
            &format!("/api/members/{id}/status"),
            Some(&admin),
            Some(json!({ "status": "ACTIVE" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(approved["status"], "ACTIVE");
    assert!(approved["approved_date"].is_string());

    let (status, body) = app
        .call(
            Method::PUT,
            &format!("/api/members/{id}/status"),
            Some(&admin),
            Some(json!({ "status": "PENDING" })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 8003);
}

#[tokio::test]
async fn registration_rejects_bad_input() {
    let app = TestApp::new();
    let mut payload = application("c1", "900202-14-1234");
    payload["email"] = json!("not-an-email");
    let (status, body) = app
        .call(Method::POST, "/api/registrations", None, Some(payload))
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["details"]["field"], "email");

    let (status, _) = app
        .call(
            Method::POST,
            "/api/registrations",
            None,
            Some(application("c999", "900202-14-1234")),
        )
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn ajk_sees_only_own_club() {
    let app = TestApp::new();
    let ajk = app.login("AJK").await;

    let (status, members) = app.call(Method::GET, "/api/members", Some(&ajk), None).await;
    assert_eq!(status, StatusCode::OK);
    let members = members.as_array().unwrap();
    assert!(!members.is_empty());
    assert!(members.iter().all(|m| m["club_id"] == "c1"));

    let (status, body) = app
        .call(Method::GET, "/api/members?club_id=c2", Some(&ajk), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2004);

    // m2 belongs to another club
    let (status, _) = app
        .call(
            Method::PUT,
            "/api/members/m2/status",
            Some(&ajk),
            Some(json!({ "status": "REJECTED" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn verify_discloses_card_only_after_selection() {
    let app = TestApp::new();

    let (status, body) = app
        .call(Method::GET, "/api/verify?q=850101105555", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "found");
    let matches = body["matches"].as_array().unwrap();
    assert_eq!(matches.len(), 5);
    assert!(matches[0].get("ic_no").is_none());
    assert!(body.get("card").is_none());

    let (_, body) = app.call(Method::GET, "/api/verify?q=000000", None, None).await;
    assert_eq!(body["state"], "not_found");

    let (_, body) = app.call(Method::GET, "/api/verify?q=", None, None).await;
    assert_eq!(body["state"], "idle");

    let partner = app.login("PARTNER").await;
    let (status, body) = app
        .call(
            Method::GET,
            "/api/verify?q=850101-10-5555&select=m1",
            Some(&partner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["state"], "selected");
    assert_eq!(body["card"]["display_id"], "M1");
    assert_eq!(body["card"]["verify_url"], "https://portal.spka.test/verify/m1");
    assert_eq!(body["can_log_usage"], true);

    let (status, _) = app
        .call(Method::GET, "/api/verify?q=850101-10-5555&select=m2", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn usage_logging_offered_only_to_partners_on_active_cards() {
    let app = TestApp::new();
    let active = "/api/verify?q=850101-10-5555&select=m1";

    let (_, body) = app.call(Method::GET, active, None, None).await;
    assert_eq!(body["valid_for_benefits"], true);
    assert_eq!(body["can_log_usage"], false);

    for role in ["ADMIN", "AJK"] {
        let token = app.login(role).await;
        let (status, body) = app.call(Method::GET, active, Some(&token), None).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["can_log_usage"], false, "{role}");
    }

    let partner = app.login("PARTNER").await;
    let (_, body) = app
        .call(
            Method::GET,
            "/api/verify?q=850101-10-5555&select=m6",
            Some(&partner),
            None,
        )
        .await;
    assert_eq!(body["state"], "selected");
    assert_eq!(body["valid_for_benefits"], false);
    assert_eq!(body["can_log_usage"], false);
}

#[tokio::test]
async fn partner_logs_usage_for_active_members() {
    let app = TestApp::new();
    let partner = app.login("PARTNER").await;

    let (status, log) = app
        .call(
            Method::POST,
            "/api/usage-logs",
            Some(&partner),
            Some(json!({ "member_id": "m1" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{log}");
    assert_eq!(log["partner_id"], "p1");
    assert_eq!(log["benefit_type"], "General Visit");
    assert_eq!(log["location"], "Partner Location");

    let (_, logs) = app.call(Method::GET, "/api/usage-logs", Some(&partner), None).await;
    let logs = logs.as_array().unwrap();
    assert_eq!(logs[0]["id"], log["id"]);
    assert!(logs.iter().all(|l| l["partner_id"] == "p1"));
    let logged = logs.len();

    for member_id in ["m2", "m8"] {
        let (status, body) = app
            .call(
                Method::POST,
                "/api/usage-logs",
                Some(&partner),
                Some(json!({ "member_id": member_id })),
            )
            .await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{member_id}");
        assert_eq!(body["message"], "Membership is not active");
    }
    let (_, logs) = app.call(Method::GET, "/api/usage-logs", Some(&partner), None).await;
    assert_eq!(logs.as_array().unwrap().len(), logged);

    let ajk = app.login("AJK").await;
    let (status, _) = app
        .call(
            Method::POST,
            "/api/usage-logs",
            Some(&ajk),
            Some(json!({ "member_id": "m1" })),
        )
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn dashboard_and_insight() {
    let app = TestApp::new();
    let ajk = app.login("AJK").await;

    let (status, stats) = app.call(Method::GET, "/api/dashboard", Some(&ajk), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(stats["total_members"], 10);
    assert_eq!(stats["total_clubs"], 5);
    assert!(stats["recent_logs"].as_array().unwrap().len() <= 5);

    let (status, body) = app
        .call(Method::POST, "/api/dashboard/insight", Some(&ajk), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["summary"], "Ringkasan eksekutif");

    let partner = app.login("PARTNER").await;
    let (status, _) = app
        .call(Method::POST, "/api/dashboard/insight", Some(&partner), None)
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn ecard_download_and_share_links() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;

    let req = Request::builder()
        .uri("/api/members/m1/ecard")
        .header(header::AUTHORIZATION, format!("Bearer {}", admin))
        .body(Body::empty())
        .unwrap();
    let (status, bytes, headers) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert!(headers[header::CONTENT_TYPE].to_str().unwrap().starts_with("image/svg+xml"));
    assert_eq!(
        headers[header::CONTENT_DISPOSITION],
        "attachment; filename=\"eCard-m1.svg\""
    );
    let svg = String::from_utf8(bytes).unwrap();
    assert!(svg.contains("Ali Bin Abu"));

    let (status, share) = app
        .call(Method::GET, "/api/members/m1/share", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(share["whatsapp_url"].as_str().unwrap().starts_with("https://wa.me/60"));
    assert!(share["email_url"].as_str().unwrap().starts_with("mailto:"));
    assert_eq!(share["card"]["member_id"], "m1");
}

#[tokio::test]
async fn club_admin_lifecycle() {
    let app = TestApp::new();
    let admin = app.login("ADMIN").await;

    let (status, club) = app
        .call(
            Method::POST,
            "/api/clubs",
            Some(&admin),
            Some(json!({
                "name": "Kelab Rekreasi JPA",
                "code": "KRJPA",
                "pic_name": "Encik Hafiz",
                "pic_phone": "0131112222",
                "email": "krjpa@example.my",
                "state": "Putrajaya"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{club}");
    assert_eq!(club["benefits"], json!([]));
    let id = club["id"].as_str().unwrap().to_string();

    let (status, _) = app
        .call(
            Method::POST,
            "/api/clubs",
            Some(&admin),
            Some(json!({
                "name": "Duplicate",
                "code": "krjpa",
                "pic_name": "X",
                "pic_phone": "1",
                "email": "x@example.my",
                "state": "Selangor"
            })),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (status, updated) = app
        .call(
            Method::PUT,
            &format!("/api/clubs/{id}/benefits"),
            Some(&admin),
            Some(json!({ "benefits": ["Gym percuma", " "], "terms": ["Ahli aktif sahaja"] })),
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["benefits"], json!(["Gym percuma"]));

    let (_, link) = app
        .call(
            Method::GET,
            &format!("/api/clubs/{id}/registration-link"),
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(
        link["url"],
        format!("https://portal.spka.test/register/{id}")
    );

    let (status, body) = app
        .call(Method::DELETE, "/api/clubs/c1", Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6002);

    let (status, _) = app
        .call(Method::DELETE, &format!("/api/clubs/{id}"), Some(&admin), None)
        .await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn program_registration_and_deletion() {
    let app = TestApp::new();

    let (status, ctx) = app
        .call(Method::GET, "/api/registration/programs/p1/prog-1", None, None)
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(ctx["partner_id"], "p1");

    let (status, body) = app
        .call(Method::GET, "/api/registration/programs/p404/prog-1", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pautan tidak sah atau telah luput.");

    let (status, body) = app
        .call(Method::GET, "/api/registration/programs/p1/prog-404", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["message"], "Pakej/Kelab tidak ditemui.");

    let (status, enrolled) = app
        .call(
            Method::POST,
            "/api/registration/programs/p1/prog-1/enrollments",
            None,
            Some(json!({ "full_name": "Lim Wei", "ic_no": "880808-08-8888" })),
        )
        .await;
    assert_eq!(status, StatusCode::CREATED, "{enrolled}");
    assert_eq!(enrolled["status"], "PENDING");

    let admin = app.login("ADMIN").await;
    let (_, list) = app
        .call(Method::GET, "/api/partners/p1/enrollments?q=lim", Some(&admin), None)
        .await;
    assert_eq!(list.as_array().unwrap().len(), 1);

    let status_uri = format!(
        "/api/partners/p1/enrollments/{}/status",
        enrolled["id"].as_str().unwrap()
    );
    let (status, approved) = app
        .call(Method::PUT, &status_uri, Some(&admin), Some(json!({ "status": "ACTIVE" })))
        .await;
    assert_eq!(status, StatusCode::OK, "{approved}");
    assert_eq!(approved["status"], "ACTIVE");

    let (status, body) = app
        .call(Method::PUT, &status_uri, Some(&admin), Some(json!({ "status": "PENDING" })))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 8003);

    let (status, deleted) = app
        .call(
            Method::DELETE,
            "/api/partners/p1/programs/prog-1",
            Some(&admin),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(deleted["removed_enrollments"], 1);

    let (_, partner) = app
        .call(Method::GET, "/api/partners/p1", Some(&admin), None)
        .await;
    assert!(
        partner["programs"]
            .as_array()
            .unwrap()
            .iter()
            .all(|p| p["id"] != "prog-1")
    );

    let (status, _) = app
        .call(Method::GET, "/api/registration/programs/p1/prog-1", None, None)
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn image_upload_is_content_addressed() {
    let app = TestApp::new();

    let img = image::RgbImage::from_pixel(8, 8, image::Rgb([10, 120, 200]));
    let mut png = Vec::new();
    img.write_to(&mut std::io::Cursor::new(&mut png), image::ImageFormat::Png)
        .unwrap();

    let boundary = "spka-boundary";
    let multipart = |data: &[u8]| {
        let mut body = Vec::new();
        body.extend_from_slice(
            format!(
                "--{boundary}\r\nContent-Disposition: form-data; name=\"file\"; filename=\"selfie.png\"\r\nContent-Type: image/png\r\n\r\n"
            )
            .as_bytes(),
        );
        body.extend_from_slice(data);
        body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());
        Request::builder()
            .method(Method::POST)
            .uri("/api/image/upload")
            .header(
                header::CONTENT_TYPE,
                format!("multipart/form-data; boundary={boundary}"),
            )
            .body(Body::from(body))
            .unwrap()
    };

    let (status, bytes, _) = app.send(multipart(&png)).await;
    assert_eq!(status, StatusCode::OK);
    let first: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(first["deduplicated"], false);

    let (_, bytes, _) = app.send(multipart(&png)).await;
    let second: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(second["deduplicated"], true);
    assert_eq!(first["url"], second["url"]);

    let url = first["url"].as_str().unwrap();
    let req = Request::builder().uri(url).body(Body::empty()).unwrap();
    let (status, bytes, headers) = app.send(req).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(headers[header::CONTENT_TYPE], "image/jpeg");
    assert_eq!(&bytes[..2], &[0xFF, 0xD8]);
}
