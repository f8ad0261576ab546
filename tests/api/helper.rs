use std::{
    net::TcpListener,
    sync::{Arc, Mutex},
};

use actix_web::web;
use async_trait::async_trait;
use booking_intake::{
    clock::{Clock, SystemClock},
    config::{Config, MailingListConfig, RelayConfig},
    mail_relay::{MailRelay, OutgoingEmail, RelayCredentials, RelayError},
    mailing_list_client::MailingListClient,
    telemetry::{get_subscriber, init_subscriber},
};
use chrono::{DateTime, TimeDelta, Utc};
use once_cell::sync::Lazy;
use secrecy::SecretString;
use wiremock::MockServer;

// `TEST_LOG=true cargo test`输出服务端日志
static TRACING: Lazy<()> = Lazy::new(|| {
    if std::env::var("TEST_LOG").is_ok() {
        init_subscriber(get_subscriber("test", "debug", std::io::stdout));
    } else {
        init_subscriber(get_subscriber("test", "debug", std::io::sink));
    }
});

pub const LIST_PATH: &str = "/api/subscribe/form-id/";

#[derive(Clone, Copy)]
pub enum RelayBehaviour {
    Deliver,
    RejectLogin,
    Unreachable,
    Fail,
}

/// 替代SMTP发送，记录每次发送尝试
pub struct RecordingRelay {
    behaviour: RelayBehaviour,
    attempts: Mutex<Vec<OutgoingEmail>>,
}

impl RecordingRelay {
    pub fn attempts(&self) -> Vec<OutgoingEmail> {
        self.attempts.lock().unwrap().clone()
    }
}

#[async_trait]
impl MailRelay for RecordingRelay {
    async fn send(
        &self,
        _credentials: &RelayCredentials,
        email: OutgoingEmail,
    ) -> Result<(), RelayError> {
        self.attempts.lock().unwrap().push(email);
        match self.behaviour {
            RelayBehaviour::Deliver => Ok(()),
            RelayBehaviour::RejectLogin => Err(RelayError::Authentication(anyhow::anyhow!(
                "535 5.7.8 Username and Password not accepted"
            ))),
            RelayBehaviour::Unreachable => Err(RelayError::Connection(anyhow::anyhow!(
                "Connection refused (os error 111)"
            ))),
            RelayBehaviour::Fail => Err(RelayError::Unexpected(anyhow::anyhow!("boom"))),
        }
    }
}

/// 手动调整的时钟
#[derive(Clone)]
pub struct ManualClock(Arc<Mutex<DateTime<Utc>>>);

impl ManualClock {
    pub fn starting_ago(millis: i64) -> Self {
        Self(Arc::new(Mutex::new(Utc::now() - TimeDelta::milliseconds(millis))))
    }

    pub fn set_to_now(&self) {
        *self.0.lock().unwrap() = Utc::now();
    }
}

impl Clock for ManualClock {
    fn now(&self) -> DateTime<Utc> {
        *self.0.lock().unwrap()
    }
}

pub struct TestApp {
    pub address: String,
    pub relay: Arc<RecordingRelay>,
    pub list_server: MockServer,
    client: reqwest::Client,
}

impl TestApp {
    pub async fn post_booking(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/bookings", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn post_booking_raw(&self, body: &'static str) -> reqwest::Response {
        self.client
            .post(format!("{}/bookings", &self.address))
            .header("Content-Type", "application/json")
            .body(body)
            .send()
            .await
            .expect("failed to execute request.")
    }

    pub async fn post_subscribe(&self, body: &serde_json::Value) -> reqwest::Response {
        self.client
            .post(format!("{}/subscribe", &self.address))
            .json(body)
            .send()
            .await
            .expect("failed to execute request.")
    }
}

pub fn full_relay_config() -> RelayConfig {
    RelayConfig {
        host: Some("smtp.example.com".into()),
        port: Some(465),
        username: Some("studio@example.com".into()),
        password: Some(SecretString::from("app-password")),
        destination: Some("bookings@example.com".into()),
    }
}

pub async fn spawn_app() -> TestApp {
    spawn_app_with(RelayBehaviour::Deliver, full_relay_config()).await
}

pub async fn spawn_app_with(behaviour: RelayBehaviour, relay_config: RelayConfig) -> TestApp {
    Lazy::force(&TRACING);

    // 模拟邮件列表服务商
    let list_server = MockServer::start().await;
    let config = Config {
        relay: relay_config,
        mailing_list: MailingListConfig {
            endpoint: format!("{}{}", list_server.uri(), LIST_PATH),
            timeout_milliseconds: 2_000,
        },
        ..Default::default()
    };

    let listener = TcpListener::bind("127.0.0.1:0").expect("failed to bind web port.");
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{port}");

    let relay = Arc::new(RecordingRelay {
        behaviour,
        attempts: Mutex::new(Vec::new()),
    });
    let relay_data: web::Data<dyn MailRelay> =
        web::Data::from(relay.clone() as Arc<dyn MailRelay>);
    let clock: web::Data<dyn Clock> = web::Data::from(Arc::new(SystemClock) as Arc<dyn Clock>);
    let list_client = web::Data::new(
        MailingListClient::from_config(&config).expect("failed to build mailing list client."),
    );

    let server = booking_intake::run(listener, config, relay_data, clock, list_client)
        .expect("failed to build server.");
    tokio::spawn(server);

    TestApp {
        address,
        relay,
        list_server,
        client: reqwest::Client::new(),
    }
}

/// 两秒前渲染的摄影预约表单数据
pub fn jordan() -> serde_json::Value {
    serde_json::json!({
        "contactName": "Jordan",
        "contactEmail": "jordan@example.com",
        "category": "Photo session",
        "message": "moody, editorial",
        "honeypotField": "",
        "formRenderedAt": (Utc::now() - TimeDelta::milliseconds(2_000)).timestamp_millis(),
    })
}

pub fn with(mut body: serde_json::Value, key: &str, value: serde_json::Value) -> serde_json::Value {
    body[key] = value;
    body
}
