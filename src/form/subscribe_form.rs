use super::{Banner, FormState, IntakeTransport, SubmitOutcome};
use crate::domain::{ContactEmail, SubscriptionPayload};

pub const JOINED_MESSAGE: &str = "Thanks for joining!";
pub const GENERIC_ERROR: &str = "Something went wrong. Please try again.";

/// 邮件订阅表单
pub struct SubscribeForm<T> {
    transport: T,
    state: FormState,
    email: String,
    email_error: Option<String>,
    banner: Option<Banner>,
}

impl<T: IntakeTransport> SubscribeForm<T> {
    pub fn new(transport: T) -> Self {
        Self {
            transport,
            state: FormState::Idle,
            email: String::new(),
            email_error: None,
            banner: None,
        }
    }

    #[tracing::instrument(name = "提交订阅表单", skip_all)]
    pub async fn on_submit(&mut self, email: &str) -> SubmitOutcome {
        self.email = email.into();

        if let Err(e) = ContactEmail::parse(&self.email) {
            self.email_error = Some(e);
            return SubmitOutcome::Invalid;
        }
        self.email_error = None;

        self.state = FormState::Submitting;
        self.banner = None;

        let payload = SubscriptionPayload::new(self.email.trim());
        let verdict = match self.transport.post_subscription(&payload).await {
            Ok(response) => response.verdict().map_err(|e| e.map(str::to_owned)),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Subscription request did not complete.");
                Err(None)
            }
        };

        match verdict {
            Ok(()) => {
                self.state = FormState::Success;
                self.email.clear();
                self.banner = Some(Banner::Success(JOINED_MESSAGE.into()));
                SubmitOutcome::Sent
            }
            Err(message) => {
                self.state = FormState::Error;
                self.banner = Some(Banner::Error(
                    message.unwrap_or_else(|| GENERIC_ERROR.into()),
                ));
                SubmitOutcome::Failed
            }
        }
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn email(&self) -> &str {
        &self.email
    }

    pub fn email_error(&self) -> Option<&str> {
        self.email_error.as_deref()
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }
}
