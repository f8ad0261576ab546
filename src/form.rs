//! 浏览器端的预约表单、订阅表单与订阅弹窗
//! 通过[`IntakeTransport`]调用服务端接口

mod inquiry_form;
mod prompt;
mod state;
mod subscribe_form;
mod transport;

pub use inquiry_form::InquiryForm;
pub use prompt::{MemoryStorage, PromptStorage, SubscribePrompt, PROMPT_DELAY, SEEN_PROMPT_KEY};
pub use state::{Banner, FormState, SubmitOutcome};
pub use subscribe_form::SubscribeForm;
pub use transport::{HttpTransport, IntakeTransport, TransportError, TransportResponse};
