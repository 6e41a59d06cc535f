//! Integration tests for infrastructure crate
//!
//! Drives the application services through the real adapters against a
//! wiremock backend.

use std::sync::Arc;

use application::{
    AdminService, AuthService, DashboardService, EMAIL_ALREADY_REGISTERED, ProfileService,
    SIGNED_OUT, SessionPort,
};
use domain::{EventId, Route, SignInForm, SignupForm};
use integration_portal::{
    ACCESS_TOKEN_KEY, InMemorySessionStore, PENDING_EMAIL_KEY, PortalConfig, SessionEvent,
    SessionStore,
};
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use infrastructure::{PortalAdapter, SessionAdapter};

struct Harness {
    store: Arc<InMemorySessionStore>,
    portal: Arc<PortalAdapter>,
    session: Arc<SessionAdapter>,
}

impl Harness {
    fn new(server: &MockServer, store: InMemorySessionStore) -> Self {
        let store = Arc::new(store);
        let shared: Arc<dyn SessionStore> = store.clone();
        let portal = Arc::new(
            PortalAdapter::from_config(PortalConfig::for_testing(server.uri()), shared.clone())
                .unwrap(),
        );
        Self {
            store,
            portal,
            session: Arc::new(SessionAdapter::new(shared)),
        }
    }

    fn auth(&self) -> AuthService {
        AuthService::new(self.portal.clone(), self.session.clone())
    }
}

fn event_json(id: &str, name: &str) -> serde_json::Value {
    json!({
        "id": id,
        "eventName": name,
        "about": "",
        "createdAt": "2025-01-10T09:30:00.000Z",
        "updatedAt": "2025-01-10T09:30:00.000Z",
        "userActivities": []
    })
}

mod auth_flow {
    use super::*;

    #[tokio::test]
    async fn sign_up_then_verify_then_sign_in() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .and(body_partial_json(json!({ "email": "ada@campus.edu", "name": "Ada" })))
            .respond_with(
                ResponseTemplate::new(201).set_body_json(json!({ "message": "OTP sent" })),
            )
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/auth/verifyotp"))
            .and(body_partial_json(json!({ "email": "ada@campus.edu", "otp": "1234" })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/auth/signin"))
            .respond_with(ResponseTemplate::new(201).set_body_json(json!({
                "message": "Welcome back",
                "access_token": "jwt-abc",
                "isProfileCompleted": false
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::new());
        let auth = h.auth();

        let outcome = auth
            .sign_up(SignupForm::new("Ada@Campus.edu", "hunter22", "Ada"))
            .await;
        assert_eq!(outcome.navigate_to, Some(Route::VerifyOtp));
        assert_eq!(h.store.get(PENDING_EMAIL_KEY).as_deref(), Some("ada@campus.edu"));

        let outcome = auth.verify_otp("1234").await;
        assert_eq!(outcome.navigate_to, Some(Route::SignIn));
        assert!(h.store.get(PENDING_EMAIL_KEY).is_none());

        let outcome = auth
            .sign_in(SignInForm::new("ada@campus.edu", "hunter22"))
            .await;
        assert_eq!(outcome.texts(), vec!["Welcome back"]);
        assert_eq!(outcome.navigate_to, Some(Route::ProfileUpdate));
        assert!(h.session.is_authenticated());
        assert_eq!(h.store.get(ACCESS_TOKEN_KEY).as_deref(), Some("jwt-abc"));
    }

    #[tokio::test]
    async fn existing_user_sign_up_is_mapped_exactly() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signup"))
            .respond_with(ResponseTemplate::new(400).set_body_json(json!({
                "message": "User already exists",
                "error": "Bad Request",
                "statusCode": 400
            })))
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::new());
        let outcome = h
            .auth()
            .sign_up(SignupForm::new("ada@campus.edu", "hunter22", "Ada"))
            .await;

        assert_eq!(outcome.texts(), vec![EMAIL_ALREADY_REGISTERED]);
        assert_eq!(outcome.navigate_to, None);
        assert!(h.store.get(PENDING_EMAIL_KEY).is_none());
    }

    #[tokio::test]
    async fn short_otp_sends_nothing() {
        let server = MockServer::start().await;
        Mock::given(method("PUT"))
            .and(path("/auth/verifyotp"))
            .respond_with(ResponseTemplate::new(200))
            .expect(0)
            .mount(&server)
            .await;

        let store = InMemorySessionStore::new();
        store.set(PENDING_EMAIL_KEY, "ada@campus.edu").unwrap();
        let h = Harness::new(&server, store);

        let outcome = h.auth().verify_otp("123").await;
        assert!(outcome.has_errors());
    }
}

mod session_loss {
    use super::*;

    #[tokio::test]
    async fn expired_token_clears_session_and_notifies() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/user/me"))
            .and(header("authorization", "Bearer stale"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Unauthorized",
                "statusCode": 401
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::with_token("stale"));
        let mut events = h.portal.client().subscribe();

        let outcome = ProfileService::new(h.portal.clone()).my_profile().await;

        assert_eq!(outcome.texts(), vec![SIGNED_OUT]);
        assert_eq!(outcome.navigate_to, Some(Route::SESSION_LOST));
        assert!(!h.session.is_authenticated());
        assert!(matches!(
            events.try_recv().unwrap(),
            SessionEvent::Expired { redirect_to: Route::Home, .. }
        ));
    }

    #[tokio::test]
    async fn rejected_sign_in_shows_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/auth/signin"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Invalid credentials",
                "statusCode": 401
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::new());
        let outcome = h
            .auth()
            .sign_in(SignInForm::new("ada@campus.edu", "wrong"))
            .await;

        assert_eq!(outcome.texts(), vec!["Invalid credentials"]);
        assert_eq!(outcome.navigate_to, None);
        assert!(!h.session.is_authenticated());
    }

    #[tokio::test]
    async fn rejected_join_shows_server_message() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/events/e1/join"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(401).set_body_json(json!({
                "message": "Token expired",
                "statusCode": 401
            })))
            .expect(1)
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::with_token("tok"));
        let outcome = DashboardService::new(h.portal.clone())
            .register(&EventId::new("e1").unwrap())
            .await;

        assert_eq!(outcome.texts(), vec!["Token expired"]);
        assert!(outcome.has_errors());
        assert!(!h.session.is_authenticated());
    }
}

mod dashboard {
    use super::*;

    #[tokio::test]
    async fn load_and_register() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/events"))
            .and(header("authorization", "Bearer tok"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!([
                event_json("e1", "Singing"),
                event_json("e2", "Quiz")
            ])))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("GET"))
            .and(path("/events/user/activities"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "joinedActivities": [],
                "addedActivities": []
            })))
            .expect(2)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(path("/events/e2/join"))
            .respond_with(ResponseTemplate::new(201))
            .expect(1)
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::with_token("tok"));
        let dashboard = DashboardService::new(h.portal.clone());

        let view = dashboard.load().await.value.unwrap();
        assert_eq!(view.upcoming.len(), 2);

        let outcome = dashboard.register(&EventId::new("e2").unwrap()).await;
        assert!(!outcome.has_errors());
    }
}

mod admin {
    use super::*;

    #[tokio::test]
    async fn admin_dashboard_is_shaped() {
        let server = MockServer::start().await;
        let routes = [
            ("/admin/foodpreference", json!({ "vegFoodCount": 3, "nonvegFoodCount": 4 })),
            (
                "/admin/gender",
                json!({ "maleCount": 2, "femaleCount": 4, "prefNotCount": 1 }),
            ),
            (
                "/admin/gradyear",
                json!({ "gradYearCount": [
                    { "graduationYear": 2020, "_count": { "graduationYear": 5 } },
                    { "graduationYear": null, "_count": { "graduationYear": 2 } }
                ] }),
            ),
            ("/events/user/course", json!([{ "course": "MCA", "count": 7 }])),
            (
                "/admin/users",
                json!([{ "email": "ada@campus.edu", "role": "USER", "foodPreference": "VEG" }]),
            ),
            ("/events", json!([event_json("e1", "Singing")])),
        ];
        for (route, body) in routes {
            Mock::given(method("GET"))
                .and(path(route))
                .respond_with(ResponseTemplate::new(200).set_body_json(body))
                .expect(1)
                .mount(&server)
                .await;
        }

        let h = Harness::new(&server, InMemorySessionStore::with_token("admin"));
        let outcome = AdminService::new(h.portal.clone()).load().await;
        let dashboard = outcome.value.unwrap();

        assert_eq!(dashboard.total_alumni(), 1);
        assert_eq!(dashboard.graduation_years[1].category, "Not Specified");
        assert_eq!(dashboard.events[0].participants, "None");
    }

    #[tokio::test]
    async fn admin_failure_sends_user_home() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(403).set_body_json(json!({
                "message": "Forbidden resource"
            })))
            .mount(&server)
            .await;

        let h = Harness::new(&server, InMemorySessionStore::with_token("user"));
        let outcome = AdminService::new(h.portal.clone()).load().await;

        assert!(outcome.has_errors());
        assert_eq!(outcome.navigate_to, Some(Route::Home));
        assert!(h.session.is_authenticated());
    }
}
