use std::{collections::HashMap, time::Duration};

use super::SubmitOutcome;

/// 访客关闭或完成订阅弹窗后写入的存储键
pub const SEEN_PROMPT_KEY: &str = "hasSeenSubscribeModal";

/// 页面加载后延迟弹出的时长
pub const PROMPT_DELAY: Duration = Duration::from_secs(2);

/// 按访客持久化的键值存储，对应浏览器的local storage
pub trait PromptStorage {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str);
}

#[derive(Debug, Clone, Default)]
pub struct MemoryStorage(HashMap<String, String>);

impl PromptStorage for MemoryStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.0.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) {
        self.0.insert(key.into(), value.into());
    }
}

/// 订阅弹窗
pub struct SubscribePrompt<S> {
    storage: S,
    open: bool,
}

impl<S: PromptStorage> SubscribePrompt<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            open: false,
        }
    }

    pub fn should_show(&self) -> bool {
        self.storage.get(SEEN_PROMPT_KEY).is_none()
    }

    /// 页面加载`elapsed`后调用
    /// 未满[`PROMPT_DELAY`]或访客已看过弹窗时保持关闭
    pub fn open_after(&mut self, elapsed: Duration) -> bool {
        self.open = elapsed >= PROMPT_DELAY && self.should_show();
        self.open
    }

    /// 关闭弹窗并记录访客，之后的页面不再弹出
    pub fn close(&mut self) {
        self.open = false;
        self.storage.set(SEEN_PROMPT_KEY, "true");
    }

    /// 订阅表单提交后调用，订阅成功视同关闭
    pub fn on_signup(&mut self, outcome: &SubmitOutcome) {
        if *outcome == SubmitOutcome::Sent {
            self.close();
        }
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn into_storage(self) -> S {
        self.storage
    }
}
