//! Router tests: the full application against an in-memory database

use axum::Router;
use axum::body::Body;
use http::{Method, Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use mission_server::api::build_app;
use mission_server::db::DbService;
use mission_server::{Config, ServerState};

const HOUR: i64 = 3_600_000;

struct TestApp {
    app: Router,
}

impl TestApp {
    async fn new() -> Self {
        let pool = DbService::in_memory().await.unwrap().pool;
        let state = ServerState::new(Config::with_overrides("/tmp/mission-tests", 0), pool);
        Self {
            app: build_app(state),
        }
    }

    async fn send(
        &self,
        method: Method,
        uri: &str,
        token: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(token) = token {
            builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
        }
        let request = match body {
            Some(body) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
            None => builder.body(Body::empty()).unwrap(),
        };

        let response = self.app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let value = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap()
        };
        (status, value)
    }

    async fn get(&self, uri: &str, token: &str) -> (StatusCode, Value) {
        self.send(Method::GET, uri, Some(token), None).await
    }

    async fn post(&self, uri: &str, token: Option<&str>, body: Value) -> (StatusCode, Value) {
        self.send(Method::POST, uri, token, Some(body)).await
    }

    async fn session(&self, user_id: &str) -> String {
        let (status, body) = self
            .post("/api/auth/session", None, json!({ "user_id": user_id }))
            .await;
        assert_eq!(status, StatusCode::OK, "session for {user_id}: {body}");
        body["token"].as_str().unwrap().to_string()
    }

    /// Conciergerie "Azur" (id c1), with a session
    async fn conciergerie(&self) -> String {
        let (status, _) = self
            .post(
                "/api/conciergeries",
                None,
                json!({
                    "id": "c1",
                    "name": "Azur",
                    "email": "azur@example.com",
                    "tel": null,
                    "color_name": "Vert",
                    "notification_settings": null
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        self.session("c1").await
    }

    async fn register(&self, id: &str) -> Value {
        let (status, body) = self
            .post(
                "/api/employees",
                None,
                json!({
                    "id": id,
                    "first_name": format!("Prénom {id}"),
                    "family_name": format!("Nom {id}"),
                    "tel": format!("06000000{id}"),
                    "email": format!("{id}@example.com"),
                    "geographic_zone": "Nice",
                    "message": null,
                    "conciergerie_name": "Azur",
                    "notification_settings": null
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK);
        body
    }

    /// Registered, accepted by `owner`, with a session
    async fn employee(&self, id: &str, owner: &str) -> String {
        self.register(id).await;
        let (status, body) = self
            .send(
                Method::PUT,
                &format!("/api/employees/{id}/status"),
                Some(owner),
                Some(json!({ "status": "accepted" })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        self.session(id).await
    }

    async fn home(&self, owner: &str, title: &str) -> String {
        let (status, body) = self
            .post(
                "/api/homes",
                Some(owner),
                json!({
                    "title": title,
                    "description": "Vue mer",
                    "tasks": ["Vitres"],
                    "images": [],
                    "geographic_zone": "Nice",
                    "hours_of_cleaning": 2.0,
                    "hours_of_gardening": 1.0
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        body["id"].as_str().unwrap().to_string()
    }

    async fn mission(&self, owner: &str, home_id: &str, start: i64) -> String {
        let (status, body) = self
            .post(
                "/api/missions",
                Some(owner),
                json!({
                    "home_id": home_id,
                    "objectives": ["Ménage", "Jardinage"],
                    "start_date_time": start,
                    "end_date_time": start + 3 * HOUR,
                    "allowed_employees": []
                }),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "{body}");
        assert_eq!(body["hours"], json!(3.0));
        body["id"].as_str().unwrap().to_string()
    }
}

fn now() -> i64 {
    chrono::Utc::now().timestamp_millis()
}

#[tokio::test]
async fn test_health_is_public() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["database"], "ok");
}

#[tokio::test]
async fn test_api_requires_token() {
    let app = TestApp::new().await;
    let (status, body) = app.send(Method::GET, "/api/missions", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1001);

    let (status, _) = app.get("/api/missions", "not-a-token").await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_session_resolution() {
    let app = TestApp::new().await;
    app.conciergerie().await;

    let (status, body) = app
        .post("/api/auth/session", None, json!({ "user_id": "nobody" }))
        .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["code"], 1008);

    app.register("e1").await;
    let (status, body) = app
        .post("/api/auth/session", None, json!({ "user_id": "e1" }))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 8003);

    let token = app.session("c1").await;
    let (status, me) = app.get("/api/auth/me", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["role"], "conciergerie");
    assert_eq!(me["conciergerie_name"], "Azur");
}

#[tokio::test]
async fn test_registration_duplicates() {
    let app = TestApp::new().await;
    app.conciergerie().await;

    let first = app.register("e1").await;
    assert_eq!(first["already_exists"], false);
    assert_eq!(first["employee"]["status"], "pending");

    // same e-mail and phone under a new id
    let again = app.register("e1").await;
    assert_eq!(again["already_exists"], true);
    assert!(again["employee"].is_null());
}

#[tokio::test]
async fn test_mission_lifecycle() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let e1 = app.employee("e1", &owner).await;
    let e2 = app.employee("e2", &owner).await;
    let home_id = app.home(&owner, "Villa").await;
    let mission_id = app.mission(&owner, &home_id, now() + HOUR).await;

    // conciergerie sessions cannot accept
    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/accept"), Some(&owner), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 2002);

    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/accept"), Some(&e1), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["employee_id"], "e1");

    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/accept"), Some(&e2), json!({}))
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 4002);

    // only the assignee moves it forward, and only in order
    let (status, _) = app
        .post(&format!("/api/missions/{mission_id}/start"), Some(&e2), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/complete"), Some(&e1), json!({}))
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4004);

    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/start"), Some(&e1), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "started");

    // started missions are no longer editable
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/missions/{mission_id}"),
            Some(&owner),
            Some(json!({ "objectives": ["Ménage"] })),
        )
        .await;
    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["code"], 4003);

    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/complete"), Some(&e1), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "completed");
}

#[tokio::test]
async fn test_remove_employee_reopens_mission() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let e1 = app.employee("e1", &owner).await;
    let home_id = app.home(&owner, "Villa").await;
    let mission_id = app.mission(&owner, &home_id, now() + HOUR).await;

    app.post(&format!("/api/missions/{mission_id}/accept"), Some(&e1), json!({}))
        .await;

    let (status, _) = app
        .post(&format!("/api/missions/{mission_id}/remove-employee"), Some(&e1), json!({}))
        .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = app
        .post(&format!("/api/missions/{mission_id}/remove-employee"), Some(&owner), json!({}))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["employee_id"].is_null());
    assert_eq!(body["status"], "pending");

    // back in the employee feed
    let (_, feed) = app.get("/api/missions/feed", &e1).await;
    assert_eq!(feed.as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn test_mission_list_pipeline() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let villa = app.home(&owner, "Villa").await;
    let appart = app.home(&owner, "Appartement").await;
    let start = now() + HOUR;
    app.mission(&owner, &villa, start).await;
    app.mission(&owner, &appart, start + 24 * HOUR).await;

    let (status, body) = app
        .get("/api/missions?sort=homeTitle&direction=asc&group=true", &owner)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["total"], 2);
    let labels: Vec<&str> = body["categories"]
        .as_array()
        .unwrap()
        .iter()
        .map(|c| c["label"].as_str().unwrap())
        .collect();
    assert_eq!(labels, vec!["Appartement", "Villa"]);
    assert!(body.get("missions").is_none());

    let (_, body) = app
        .get("/api/missions?statuses=archived", &owner)
        .await;
    assert_eq!(body["total"], 0);

    let (_, body) = app
        .get("/api/missions?taken=notTaken&zones=Nice&sort=date&direction=desc", &owner)
        .await;
    assert_eq!(body["total"], 2);
    let missions = body["missions"].as_array().unwrap();
    assert!(missions[0]["start_date_time"].as_i64() > missions[1]["start_date_time"].as_i64());

    let (status, body) = app.get("/api/missions?statuses=ongoing", &owner).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_restricted_mission_is_hidden() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let e1 = app.employee("e1", &owner).await;
    app.employee("e2", &owner).await;
    let home_id = app.home(&owner, "Villa").await;

    let start = now() + HOUR;
    let (_, body) = app
        .post(
            "/api/missions",
            Some(&owner),
            json!({
                "home_id": home_id,
                "objectives": ["Ménage"],
                "start_date_time": start,
                "end_date_time": start + 2 * HOUR,
                "allowed_employees": ["e2"]
            }),
        )
        .await;
    let mission_id = body["id"].as_str().unwrap().to_string();

    let (_, list) = app.get("/api/missions", &e1).await;
    assert_eq!(list["total"], 0);

    let (status, body) = app.get(&format!("/api/missions/{mission_id}"), &e1).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["code"], 4006);
}

#[tokio::test]
async fn test_mission_time_window() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let home_id = app.home(&owner, "Villa").await;
    let start = now() + HOUR;

    let (status, body) = app
        .post(
            "/api/missions",
            Some(&owner),
            json!({
                "home_id": home_id,
                "objectives": ["Ménage"],
                "start_date_time": start,
                "end_date_time": start + HOUR / 2,
                "allowed_employees": []
            }),
        )
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 4007);
}

#[tokio::test]
async fn test_home_delete_requires_cascade() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let home_id = app.home(&owner, "Villa").await;
    app.mission(&owner, &home_id, now() + HOUR).await;

    let (status, body) = app
        .send(Method::DELETE, &format!("/api/homes/{home_id}"), Some(&owner), None)
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6003);

    let (status, body) = app
        .send(
            Method::DELETE,
            &format!("/api/homes/{home_id}?cascade=true"),
            Some(&owner),
            None,
        )
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["deleted_missions"], 1);

    let (_, homes) = app.get("/api/homes", &owner).await;
    assert!(homes.as_array().unwrap().is_empty());
    let (_, list) = app.get("/api/missions", &owner).await;
    assert_eq!(list["total"], 0);
}

#[tokio::test]
async fn test_home_title_is_unique_per_conciergerie() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    app.home(&owner, "Villa").await;

    let (status, body) = app
        .post(
            "/api/homes",
            Some(&owner),
            json!({
                "title": "Villa",
                "description": "d",
                "tasks": ["Vitres"],
                "geographic_zone": "Nice"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 6002);
}

#[tokio::test]
async fn test_claim_rekeys_conciergerie() {
    let app = TestApp::new().await;
    app.conciergerie().await;

    let (status, body) = app
        .post("/api/conciergeries/c1/claim", None, json!({ "user_id": "user-42" }))
        .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);

    let token = app.session("user-42").await;
    let (status, body) = app.get("/api/conciergeries/user-42", &token).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["name"], "Azur");

    let (status, body) = app
        .post("/api/conciergeries/c1/claim", None, json!({ "user_id": "user-43" }))
        .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], 3001);
}

#[tokio::test]
async fn test_conciergerie_name_clash() {
    let app = TestApp::new().await;
    app.conciergerie().await;

    let (status, body) = app
        .post(
            "/api/conciergeries",
            None,
            json!({
                "id": "c2",
                "name": "Azur",
                "email": "other@example.com",
                "color_name": "Rouge"
            }),
        )
        .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["code"], 3002);
}

#[tokio::test]
async fn test_rename_keeps_homes_missions_and_employees() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    app.employee("e1", &owner).await;
    let home_id = app.home(&owner, "Villa").await;
    app.mission(&owner, &home_id, now() + 24 * HOUR).await;

    let (status, body) = app
        .send(
            Method::PUT,
            "/api/conciergeries/c1",
            Some(&owner),
            Some(json!({ "name": "Azur Conciergerie" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert_eq!(body["name"], "Azur Conciergerie");

    let owner = app.session("c1").await;
    let (_, me) = app.get("/api/auth/me", &owner).await;
    assert_eq!(me["conciergerie_name"], "Azur Conciergerie");

    let (_, homes) = app.get("/api/homes", &owner).await;
    assert_eq!(homes.as_array().unwrap().len(), 1);
    let (status, body) = app
        .send(
            Method::PUT,
            &format!("/api/homes/{home_id}"),
            Some(&owner),
            Some(json!({ "description": "Vue jardin" })),
        )
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");

    let (_, list) = app.get("/api/missions", &owner).await;
    assert_eq!(list["total"], 1);
    let (_, employees) = app.get("/api/employees", &owner).await;
    assert_eq!(employees[0]["conciergerie_name"], "Azur Conciergerie");
}

#[tokio::test]
async fn test_employee_list_and_points() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let e1 = app.employee("e1", &owner).await;
    app.register("e2").await;

    let (status, list) = app.get("/api/employees", &owner).await;
    assert_eq!(status, StatusCode::OK);
    let ids: Vec<&str> = list
        .as_array()
        .unwrap()
        .iter()
        .map(|e| e["id"].as_str().unwrap())
        .collect();
    // pending first
    assert_eq!(ids, vec!["e2", "e1"]);

    let (_, found) = app.get("/api/employees?search=nom%20e1", &owner).await;
    assert_eq!(found.as_array().unwrap().len(), 1);

    let (status, _) = app.get("/api/employees", &e1).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let home_id = app.home(&owner, "Villa").await;
    let start = now() + HOUR;
    let mission_id = app.mission(&owner, &home_id, start).await;
    app.post(&format!("/api/missions/{mission_id}/accept"), Some(&e1), json!({}))
        .await;

    let date = chrono::DateTime::from_timestamp_millis(start)
        .unwrap()
        .date_naive()
        .format("%Y-%m-%d")
        .to_string();
    let (status, body) = app
        .get(&format!("/api/employees/e1/points?date={date}&tz_offset=0"), &e1)
        .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["points"].as_f64().unwrap() > 0.0);

    let (status, body) = app
        .get("/api/employees/e1/points?date=yesterday", &e1)
        .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], 6);
}

#[tokio::test]
async fn test_calendar_lists_accepted_missions() {
    let app = TestApp::new().await;
    let owner = app.conciergerie().await;
    let e1 = app.employee("e1", &owner).await;
    let home_id = app.home(&owner, "Villa").await;
    let mission_id = app.mission(&owner, &home_id, now() + HOUR).await;

    let (_, empty) = app.get("/api/calendar", &e1).await;
    assert!(empty["days"].as_array().unwrap().is_empty());

    app.post(&format!("/api/missions/{mission_id}/accept"), Some(&e1), json!({}))
        .await;

    let (status, view) = app.get("/api/calendar?locale=en&tz_offset=0", &e1).await;
    assert_eq!(status, StatusCode::OK, "{view}");
    assert!(!view["days"].as_array().unwrap().is_empty());
    assert_eq!(view["late_count"], 0);

    let (_, owner_view) = app.get("/api/calendar", &owner).await;
    assert!(!owner_view["days"].as_array().unwrap().is_empty());
}
