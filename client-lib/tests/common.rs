#![allow(dead_code)]

use std::sync::Arc;

use wiremock::matchers::{method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use ideaboard_client::{ApiMethods, ClientConfig, Session};
use ideaboard_protocol::model::user::Profile;
use ideaboard_protocol::test_utils::make_test_profile;

/// A wiremock backend plus the shared session, one per test.
pub struct TestBackend {
    pub server: MockServer,
    pub session: Arc<Session>,
}

impl TestBackend {
    pub async fn new() -> TestBackend {
        let _ = env_logger::builder().is_test(true).try_init();
        TestBackend {
            server: MockServer::start().await,
            session: Arc::new(Session::new()),
        }
    }

    pub fn client(&self) -> ApiMethods {
        ApiMethods::new(&ClientConfig::new(self.server.uri()), self.session.clone())
            .expect("client construction")
    }

    /// Mount `/users/me` answering with the given profile and put a token
    /// on the session, as if this user had logged in.
    pub async fn sign_in(&self, profile: &Profile) {
        self.session.set_token(format!("token-{}", profile.username));
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(ResponseTemplate::new(200).set_body_json(profile))
            .mount(&self.server)
            .await;
    }

    pub async fn sign_in_as(&self, id: &str, username: &str) -> Profile {
        let profile = make_test_profile(id, username);
        self.sign_in(&profile).await;
        profile
    }

    /// Mount `/users/me` answering 401, so identity resolution degrades to
    /// anonymous.
    pub async fn anonymous(&self) {
        Mock::given(method("GET"))
            .and(path("/users/me"))
            .respond_with(
                ResponseTemplate::new(401)
                    .set_body_json(::serde_json::json!({"detail": "Not authenticated"})),
            )
            .mount(&self.server)
            .await;
    }

    /// Backend convention: empty collections answer 404 with a detail
    /// message.
    pub async fn mount_empty_collection(&self, request_path: &str, detail: &str) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(
                ResponseTemplate::new(404).set_body_json(::serde_json::json!({"detail": detail})),
            )
            .mount(&self.server)
            .await;
    }

    pub async fn mount_json(&self, request_path: &str, body: ::serde_json::Value) {
        Mock::given(method("GET"))
            .and(path(request_path))
            .respond_with(ResponseTemplate::new(200).set_body_json(body))
            .mount(&self.server)
            .await;
    }
}

pub fn evaluation_row(username: &str, score: Option<i64>, average: f64) -> ::serde_json::Value {
    ::serde_json::json!({
        "Korisnik": username,
        "Naziv ideje": "Pametna korpa",
        "Ocena": score,
        "Komentar": "",
        "Ukupna ocena": average,
    })
}
