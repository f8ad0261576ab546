use crate::domain::BotSignal;

/// 首次提交前为`Idle`，之后在`Submitting`与两种结果之间切换
/// 出错后表单仍可再次提交
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FormState {
    #[default]
    Idle,
    Submitting,
    Success,
    Error,
}

impl FormState {
    /// 请求进行中禁用提交按钮
    pub fn submit_enabled(&self) -> bool {
        !matches!(self, FormState::Submitting)
    }
}

/// 提交按钮上方的提示信息
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Banner {
    Success(String),
    Error(String),
}

/// 一次提交的结果
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// 疑似机器人提交，不发送也不提示
    Suppressed(BotSignal),
    /// 字段校验失败，未发送
    Invalid,
    Sent,
    Failed,
}
