mod bot_signal;
mod contact_email;
mod contact_name;
mod dispatch_result;
mod field_errors;
mod inquiry;
mod inquiry_category;
mod inquiry_payload;
mod subscription_payload;

pub use bot_signal::{BotSignal, MIN_INTERACTION_DELAY};
pub use contact_email::ContactEmail;
pub use contact_name::ContactName;
pub use dispatch_result::DispatchResult;
pub use field_errors::{Field, FieldErrors};
pub use inquiry::Inquiry;
pub use inquiry_category::InquiryCategory;
pub use inquiry_payload::InquiryPayload;
pub use subscription_payload::SubscriptionPayload;
