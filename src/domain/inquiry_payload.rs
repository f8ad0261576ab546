use std::time::Duration;

use chrono::{DateTime, Utc};
use serde_aux::field_attributes::deserialize_default_from_null;

use super::{
    contact_email::ContactEmail, contact_name::ContactName, BotSignal, Field, FieldErrors,
    InquiryCategory,
};

/// 浏览器提交的原始预约数据
///
/// 字段缺失或为`null`时取默认值，交由校验给出提示，而不是解析失败
/// 别名兼容摄影和DJ两个旧表单的字段名
#[derive(Debug, Clone, Default, PartialEq, serde::Serialize, serde::Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct InquiryPayload {
    #[serde(alias = "name", deserialize_with = "deserialize_default_from_null")]
    pub contact_name: String,
    #[serde(alias = "email", deserialize_with = "deserialize_default_from_null")]
    pub contact_email: String,
    #[serde(alias = "type", deserialize_with = "deserialize_default_from_null")]
    pub category: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(alias = "setType", skip_serializing_if = "Option::is_none")]
    pub session_type: Option<String>,
    #[serde(alias = "date", alias = "eventDate", skip_serializing_if = "Option::is_none")]
    pub timeframe: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub event_time: Option<String>,
    #[serde(alias = "eventLocation", skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub venue_type: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub budget: Option<String>,
    #[serde(
        alias = "vision",
        alias = "energy",
        deserialize_with = "deserialize_default_from_null"
    )]
    pub message: String,
    #[serde(alias = "referral", alias = "djReferral", skip_serializing_if = "Option::is_none")]
    pub referral_source: Option<String>,
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub honeypot_field: String,
    /// 浏览器记录的Unix毫秒时间戳
    #[serde(
        with = "chrono::serde::ts_milliseconds_option",
        skip_serializing_if = "Option::is_none"
    )]
    pub form_rendered_at: Option<DateTime<Utc>>,
}

impl InquiryPayload {
    /// 收集全部字段错误
    pub fn validate(&self) -> FieldErrors {
        let mut errors = FieldErrors::new();

        if let Err(e) = ContactName::parse(&self.contact_name) {
            errors.insert(Field::ContactName, e);
        }
        if let Err(e) = ContactEmail::parse(&self.contact_email) {
            errors.insert(Field::ContactEmail, e);
        }
        let category = InquiryCategory::parse(&self.category);
        if let Err(e) = &category {
            errors.insert(Field::Category, e.as_str());
        }
        if self.message.trim().is_empty() {
            let message = category
                .map(|c| c.missing_message())
                .unwrap_or(InquiryCategory::Both.missing_message());
            errors.insert(Field::Message, message);
        }

        errors
    }

    /// 服务端的机器人检测
    /// 没有渲染时间时只检查蜜罐字段
    pub fn bot_signal(&self, now: DateTime<Utc>, min_delay: Duration) -> Option<BotSignal> {
        BotSignal::honeypot(&self.honeypot_field).or_else(|| {
            self.form_rendered_at
                .and_then(|rendered_at| BotSignal::timing(rendered_at, now, min_delay))
        })
    }
}
