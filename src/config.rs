use std::time::Duration;

use secrecy::SecretString;
use serde_aux::field_attributes::{
    deserialize_number_from_string, deserialize_option_number_from_string,
};

use crate::{domain::MIN_INTERACTION_DELAY, mail_relay::RelayCredentials};

/// 邮件列表服务商的订阅地址
pub const DEFAULT_LIST_ENDPOINT: &str =
    "https://app.audienceful.com/api/subscribe/kDVh5t65xN9xi6rSxUMwWC/";

#[derive(serde::Deserialize, Clone, Default)]
pub struct Config {
    #[serde(default)]
    pub web: WebConfig,
    #[serde(default)]
    pub relay: RelayConfig,
    #[serde(default)]
    pub mailing_list: MailingListConfig,
    #[serde(default)]
    pub intake: IntakeConfig,
}

#[derive(serde::Deserialize, Clone)]
pub struct WebConfig {
    pub host: String,
    #[serde(deserialize_with = "deserialize_number_from_string")]
    pub port: u16,
}

impl WebConfig {
    pub fn server_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}

impl Default for WebConfig {
    fn default() -> Self {
        Self {
            host: "127.0.0.1".into(),
            port: 8000,
        }
    }
}

/// SMTP配置
///
/// 所有字段均可缺省，请求时再检查缺了哪些
/// 空白值视为缺失
#[derive(serde::Deserialize, Clone, Default)]
pub struct RelayConfig {
    pub host: Option<String>,
    #[serde(default, deserialize_with = "deserialize_option_number_from_string")]
    pub port: Option<u16>,
    pub username: Option<String>,
    pub password: Option<SecretString>,
    pub destination: Option<String>,
}

#[derive(thiserror::Error, Debug, PartialEq, Eq)]
#[error("missing relay settings: {}", .0.join(", "))]
pub struct MissingRelaySettings(pub Vec<&'static str>);

impl RelayConfig {
    pub fn credentials(&self) -> Result<RelayCredentials, MissingRelaySettings> {
        use secrecy::ExposeSecret;

        fn filled(value: &Option<String>) -> Option<&str> {
            value.as_deref().map(str::trim).filter(|v| !v.is_empty())
        }

        let host = filled(&self.host);
        let username = filled(&self.username);
        let destination = filled(&self.destination);
        let password = self
            .password
            .as_ref()
            .filter(|p| !p.expose_secret().trim().is_empty());

        let mut missing = Vec::new();
        if host.is_none() {
            missing.push("relay.host");
        }
        if self.port.is_none() {
            missing.push("relay.port");
        }
        if username.is_none() {
            missing.push("relay.username");
        }
        if password.is_none() {
            missing.push("relay.password");
        }
        if destination.is_none() {
            missing.push("relay.destination");
        }

        match (host, self.port, username, password, destination) {
            (Some(host), Some(port), Some(username), Some(password), Some(destination)) => {
                Ok(RelayCredentials {
                    host: host.into(),
                    port,
                    username: username.into(),
                    password: password.clone(),
                    destination: destination.into(),
                })
            }
            _ => Err(MissingRelaySettings(missing)),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct MailingListConfig {
    #[serde(default = "default_list_endpoint")]
    pub endpoint: String,
    #[serde(
        default = "default_list_timeout",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub timeout_milliseconds: u64,
}

fn default_list_endpoint() -> String {
    DEFAULT_LIST_ENDPOINT.into()
}

fn default_list_timeout() -> u64 {
    10_000
}

impl MailingListConfig {
    pub fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_milliseconds)
    }
}

impl Default for MailingListConfig {
    fn default() -> Self {
        Self {
            endpoint: default_list_endpoint(),
            timeout_milliseconds: default_list_timeout(),
        }
    }
}

#[derive(serde::Deserialize, Clone)]
pub struct IntakeConfig {
    #[serde(
        default = "default_min_interaction_delay",
        deserialize_with = "deserialize_number_from_string"
    )]
    pub min_interaction_delay_milliseconds: u64,
}

fn default_min_interaction_delay() -> u64 {
    MIN_INTERACTION_DELAY.as_millis() as u64
}

impl IntakeConfig {
    pub fn min_interaction_delay(&self) -> Duration {
        Duration::from_millis(self.min_interaction_delay_milliseconds)
    }
}

impl Default for IntakeConfig {
    fn default() -> Self {
        Self {
            min_interaction_delay_milliseconds: default_min_interaction_delay(),
        }
    }
}

/// 读取工作目录下的`config.yaml`
/// `APP_*`环境变量覆盖同名配置，如`APP_RELAY__PASSWORD`
pub fn try_config() -> Result<Config, config::ConfigError> {
    config::Config::builder()
        .add_source(config::File::new("config.yaml", config::FileFormat::Yaml).required(false))
        .add_source(
            config::Environment::with_prefix("APP")
                .prefix_separator("_")
                .separator("__"),
        )
        .build()?
        .try_deserialize::<Config>()
}
