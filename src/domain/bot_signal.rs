use std::time::Duration;

use chrono::{DateTime, Utc};

/// 表单出现到提交的最短间隔，低于此值视为机器人
pub const MIN_INTERACTION_DELAY: Duration = Duration::from_millis(1500);

/// 判定为机器人提交的原因，不会返回给提交者
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BotSignal {
    HoneypotFilled,
    SubmittedTooFast { elapsed_ms: i64 },
}

impl BotSignal {
    pub fn honeypot(value: &str) -> Option<BotSignal> {
        if value.is_empty() {
            None
        } else {
            Some(BotSignal::HoneypotFilled)
        }
    }

    /// `rendered_at`晚于当前时间（浏览器与服务端时钟不一致）时不判定
    pub fn timing(
        rendered_at: DateTime<Utc>,
        now: DateTime<Utc>,
        min_delay: Duration,
    ) -> Option<BotSignal> {
        let elapsed_ms = (now - rendered_at).num_milliseconds();
        let min_delay_ms = i64::try_from(min_delay.as_millis()).unwrap_or(i64::MAX);
        if (0..min_delay_ms).contains(&elapsed_ms) {
            Some(BotSignal::SubmittedTooFast { elapsed_ms })
        } else {
            None
        }
    }
}

impl std::fmt::Display for BotSignal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BotSignal::HoneypotFilled => write!(f, "honeypot field was filled"),
            BotSignal::SubmittedTooFast { elapsed_ms } => {
                write!(f, "submitted {elapsed_ms}ms after the form was ready")
            }
        }
    }
}
