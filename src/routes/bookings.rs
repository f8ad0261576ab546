use std::fmt::Debug;

use actix_web::{body::BoxBody, http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;
use tracing::field::{display, Empty};
use uuid::Uuid;

use crate::{
    clock::Clock,
    config::{IntakeConfig, MissingRelaySettings, RelayConfig},
    domain::{DispatchResult, FieldErrors, Inquiry, InquiryPayload},
    inquiry_email::{format_inquiry_email, subject},
    mail_relay::{MailRelay, OutgoingEmail, RelayError},
    util::error_chain_fmt,
};

/// 校验预约咨询并转发到站长邮箱
///
/// 不使用`web::Json`提取请求体
/// 请求体格式错误或超出大小限制时，同其他异常一样返回500
#[tracing::instrument(
    name = "处理预约咨询",
    skip_all,
    fields(
        inquiry_id = %Uuid::new_v4(),
        contact_name = Empty,
        contact_email = Empty,
        category = Empty,
    )
)]
pub async fn submit_booking(
    body: Result<web::Bytes, actix_web::Error>,
    relay_config: web::Data<RelayConfig>,
    intake_config: web::Data<IntakeConfig>,
    relay: web::Data<dyn MailRelay>,
    clock: web::Data<dyn Clock>,
) -> Result<HttpResponse, BookingError> {
    let body = body
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to read booking inquiry body.")?;
    let payload: InquiryPayload =
        serde_json::from_slice(&body).context("failed to parse booking inquiry body.")?;
    tracing::Span::current()
        .record("contact_name", display(&payload.contact_name))
        .record("contact_email", display(&payload.contact_email))
        .record("category", display(&payload.category));

    let bot_signal = payload.bot_signal(clock.now(), intake_config.min_interaction_delay());
    let inquiry = Inquiry::try_from(payload).map_err(|errors| {
        for (field, message) in errors.iter() {
            tracing::info!(?field, reason = %message, "Booking inquiry failed validation.");
        }
        BookingError::ValidationError(errors)
    })?;

    // 机器人提交同样返回成功，但不发送邮件
    if let Some(signal) = bot_signal {
        tracing::warn!(%signal, "Dropping automated booking inquiry.");
        return Ok(HttpResponse::Ok().json(DispatchResult::success()));
    }

    let credentials = relay_config.credentials().map_err(|e| {
        tracing::error!(missing = %e.0.join(", "), "Email relay is not configured.");
        BookingError::ConfigurationMissing(e)
    })?;

    let email = OutgoingEmail {
        subject: subject(&inquiry),
        text_body: format_inquiry_email(&inquiry, clock.now()),
        reply_to: Some(inquiry.email.as_ref().to_owned()),
    };
    relay.send(&credentials, email).await.map_err(|e| {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Failed to relay booking inquiry."
        );
        e
    })?;
    tracing::info!(
        destination = %credentials.destination,
        "Booking inquiry email sent."
    );

    Ok(HttpResponse::Ok().json(DispatchResult::success()))
}

#[derive(thiserror::Error)]
pub enum BookingError {
    #[error("{0}")]
    ValidationError(FieldErrors),
    #[error("Email configuration is missing. Please try again later.")]
    ConfigurationMissing(#[source] MissingRelaySettings),
    #[error("The mail account could not sign in, so your inquiry was not sent. Please email us directly.")]
    RelayAuthentication(#[source] RelayError),
    #[error("We couldn't reach the mail server. Please try again in a few minutes.")]
    RelayConnection(#[source] RelayError),
    #[error("Failed to send email. Please try again later.")]
    RelayFailed(#[source] RelayError),
    #[error("Failed to process booking inquiry.")]
    UnexpectedError(#[from] anyhow::Error),
}

impl From<RelayError> for BookingError {
    fn from(e: RelayError) -> Self {
        match e {
            RelayError::Authentication(_) => BookingError::RelayAuthentication(e),
            RelayError::Connection(_) => BookingError::RelayConnection(e),
            RelayError::Unexpected(_) => BookingError::RelayFailed(e),
        }
    }
}

impl Debug for BookingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for BookingError {
    fn status_code(&self) -> StatusCode {
        match self {
            BookingError::ValidationError(_) => StatusCode::BAD_REQUEST,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(DispatchResult::failure(self.to_string()))
    }
}
