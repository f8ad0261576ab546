use std::fmt::Debug;

use actix_web::{body::BoxBody, http::StatusCode, web, HttpResponse, ResponseError};
use anyhow::Context;

use crate::{
    domain::{ContactEmail, DispatchResult, SubscriptionPayload},
    mailing_list_client::{ListError, MailingListClient},
    util::error_chain_fmt,
};

#[tracing::instrument(
    name = "添加邮件订阅用户",
    skip_all,
    fields(subscriber_email = tracing::field::Empty)
)]
pub async fn subscribe(
    body: Result<web::Bytes, actix_web::Error>,
    list_client: web::Data<MailingListClient>,
) -> Result<HttpResponse, SubscribeError> {
    let body = body
        .map_err(|e| anyhow::anyhow!("{e}"))
        .context("failed to read subscription body.")?;
    let payload: SubscriptionPayload =
        serde_json::from_slice(&body).context("failed to parse subscription body.")?;
    tracing::Span::current().record(
        "subscriber_email",
        tracing::field::display(&payload.email),
    );

    let email = ContactEmail::try_from(payload).map_err(|e| {
        tracing::info!(reason = %e, "Subscription email failed validation.");
        SubscribeError::ValidationError(e)
    })?;

    list_client.subscribe(&email).await.map_err(|e| {
        tracing::error!(
            error.cause_chain = ?e,
            error.message = %e,
            "Mailing list provider rejected the subscription."
        );
        SubscribeError::ListError(e)
    })?;
    tracing::info!("Subscriber added to mailing list.");

    Ok(HttpResponse::Ok().json(DispatchResult::success()))
}

#[derive(thiserror::Error)]
pub enum SubscribeError {
    #[error("invalid email")]
    ValidationError(String),
    #[error("subscription failed")]
    ListError(#[source] ListError),
    #[error("subscription failed")]
    UnexpectedError(#[from] anyhow::Error),
}

impl Debug for SubscribeError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        error_chain_fmt(self, f)
    }
}

impl ResponseError for SubscribeError {
    fn status_code(&self) -> StatusCode {
        match self {
            SubscribeError::ValidationError(_) => StatusCode::BAD_REQUEST,
            SubscribeError::ListError(_) | SubscribeError::UnexpectedError(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse<BoxBody> {
        HttpResponse::build(self.status_code()).json(DispatchResult::failure(self.to_string()))
    }
}
