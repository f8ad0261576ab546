use anyhow::Context;
use async_trait::async_trait;
use lettre::{
    message::{header::ContentType, Mailbox},
    transport::smtp::authentication::Credentials,
    AsyncSmtpTransport, AsyncTransport, Message, Tokio1Executor,
};
use secrecy::{ExposeSecret, SecretString};

/// 表示登录被拒绝的SMTP响应码
const AUTH_FAILURE_CODES: [&str; 3] = ["530", "534", "535"];

const IMPLICIT_TLS_PORT: u16 = 465;

/// 由[`crate::config::RelayConfig`]解析出的SMTP连接信息
#[derive(Debug, Clone)]
pub struct RelayCredentials {
    pub host: String,
    pub port: u16,
    pub username: String,
    pub password: SecretString,
    pub destination: String,
}

/// 发往站长邮箱的邮件
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutgoingEmail {
    pub subject: String,
    pub text_body: String,
    pub reply_to: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum RelayError {
    #[error("The mail relay rejected the login.")]
    Authentication(#[source] anyhow::Error),
    #[error("Could not connect to the mail relay.")]
    Connection(#[source] anyhow::Error),
    #[error(transparent)]
    Unexpected(#[from] anyhow::Error),
}

/// 发送邮件，每次调用只尝试一次，不重试
#[async_trait]
pub trait MailRelay: Send + Sync {
    async fn send(
        &self,
        credentials: &RelayCredentials,
        email: OutgoingEmail,
    ) -> Result<(), RelayError>;
}

/// SMTP发送，每封邮件新建一个连接
#[derive(Debug, Clone, Copy, Default)]
pub struct SmtpRelay;

#[async_trait]
impl MailRelay for SmtpRelay {
    #[tracing::instrument(
        name = "Relaying email over SMTP",
        skip_all,
        fields(relay_host = %credentials.host, relay_port = credentials.port)
    )]
    async fn send(
        &self,
        credentials: &RelayCredentials,
        email: OutgoingEmail,
    ) -> Result<(), RelayError> {
        let message = build_message(credentials, email)?;
        let transport = build_transport(credentials)?;

        transport.send(message).await.map_err(classify)?;

        Ok(())
    }
}

fn build_transport(
    credentials: &RelayCredentials,
) -> Result<AsyncSmtpTransport<Tokio1Executor>, RelayError> {
    let builder = if credentials.port == IMPLICIT_TLS_PORT {
        AsyncSmtpTransport::<Tokio1Executor>::relay(&credentials.host)
    } else {
        AsyncSmtpTransport::<Tokio1Executor>::starttls_relay(&credentials.host)
    }
    .context("failed to prepare the SMTP transport.")?;

    Ok(builder
        .port(credentials.port)
        .credentials(Credentials::new(
            credentials.username.clone(),
            credentials.password.expose_secret().to_owned(),
        ))
        .build())
}

fn build_message(credentials: &RelayCredentials, email: OutgoingEmail) -> Result<Message, RelayError> {
    let from: Mailbox = credentials
        .username
        .parse()
        .context("relay account is not a valid mailbox.")?;
    let to: Mailbox = credentials
        .destination
        .parse()
        .context("destination is not a valid mailbox.")?;

    let mut builder = Message::builder()
        .from(from)
        .to(to)
        .subject(email.subject)
        .header(ContentType::TEXT_PLAIN);

    // 邮箱校验只要求包含`@`，地址可能无法作为邮件头
    // 此时不设置reply-to，邮件照常发送
    if let Some(reply_to) = email.reply_to {
        match reply_to.parse::<Mailbox>() {
            Ok(mailbox) => builder = builder.reply_to(mailbox),
            Err(e) => tracing::warn!(
                error.message = %e,
                "`{reply_to}` cannot be used as reply-to, sending without it."
            ),
        }
    }

    let message = builder
        .body(email.text_body)
        .context("failed to build the email message.")?;

    Ok(message)
}

fn classify(e: lettre::transport::smtp::Error) -> RelayError {
    let code = e.status().map(|code| code.to_string());
    match code.as_deref() {
        Some(code) if AUTH_FAILURE_CODES.contains(&code) => RelayError::Authentication(e.into()),
        Some(_) => RelayError::Unexpected(e.into()),
        None if e.is_response() || e.is_client() => RelayError::Unexpected(e.into()),
        None => RelayError::Connection(e.into()),
    }
}
