use std::time::Duration;

use chrono::{DateTime, Utc};

use super::{Banner, FormState, IntakeTransport, SubmitOutcome};
use crate::{
    clock::Clock,
    domain::{BotSignal, Field, FieldErrors, InquiryPayload, MIN_INTERACTION_DELAY},
};

pub const SUCCESS_MESSAGE: &str = "Thank you for your inquiry! We'll be in touch soon.";
pub const GENERIC_ERROR: &str =
    "There was an error submitting your inquiry. Please try again or email us directly.";

/// 预约表单
///
/// `on_submit`在整个请求期间持有`&mut self`，上一次请求完成前无法再次提交
pub struct InquiryForm<T, C> {
    transport: T,
    clock: C,
    min_interaction_delay: Duration,
    rendered_at: Option<DateTime<Utc>>,
    state: FormState,
    fields: InquiryPayload,
    field_errors: FieldErrors,
    banner: Option<Banner>,
}

impl<T, C> InquiryForm<T, C>
where
    T: IntakeTransport,
    C: Clock,
{
    pub fn new(transport: T, clock: C) -> Self {
        Self {
            transport,
            clock,
            min_interaction_delay: MIN_INTERACTION_DELAY,
            rendered_at: None,
            state: FormState::Idle,
            fields: InquiryPayload::default(),
            field_errors: FieldErrors::new(),
            banner: None,
        }
    }

    pub fn with_min_interaction_delay(mut self, delay: Duration) -> Self {
        self.min_interaction_delay = delay;
        self
    }

    /// 记录表单可交互的时间
    pub fn on_form_ready(&mut self) {
        self.rendered_at = Some(self.clock.now());
    }

    #[tracing::instrument(name = "提交预约表单", skip_all)]
    pub async fn on_submit(&mut self, raw: InquiryPayload) -> SubmitOutcome {
        let now = self.clock.now();
        self.fields = raw;

        // 未就绪的表单视为立即提交
        let rendered_at = self.rendered_at.unwrap_or(now);
        let bot_signal = BotSignal::honeypot(&self.fields.honeypot_field)
            .or_else(|| BotSignal::timing(rendered_at, now, self.min_interaction_delay));
        if let Some(signal) = bot_signal {
            tracing::debug!(%signal, "Submission suppressed.");
            return SubmitOutcome::Suppressed(signal);
        }

        self.field_errors = self.fields.validate();
        if !self.field_errors.is_empty() {
            return SubmitOutcome::Invalid;
        }

        self.state = FormState::Submitting;
        self.banner = None;

        let payload = InquiryPayload {
            form_rendered_at: self.rendered_at,
            ..self.fields.clone()
        };
        let verdict = match self.transport.post_inquiry(&payload).await {
            Ok(response) => response.verdict().map_err(|e| e.map(str::to_owned)),
            Err(e) => {
                tracing::warn!(error.cause_chain = ?e, "Booking request did not complete.");
                Err(None)
            }
        };

        match verdict {
            Ok(()) => {
                self.state = FormState::Success;
                self.fields = InquiryPayload::default();
                self.banner = Some(Banner::Success(SUCCESS_MESSAGE.into()));
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

    pub fn dismiss_banner(&mut self) {
        self.banner = None;
    }

    pub fn state(&self) -> FormState {
        self.state
    }

    pub fn submit_enabled(&self) -> bool {
        self.state.submit_enabled()
    }

    pub fn fields(&self) -> &InquiryPayload {
        &self.fields
    }

    pub fn field_errors(&self) -> &FieldErrors {
        &self.field_errors
    }

    pub fn field_error(&self, field: Field) -> Option<&str> {
        self.field_errors.get(field)
    }

    pub fn banner(&self) -> Option<&Banner> {
        self.banner.as_ref()
    }
}
