use serde_aux::field_attributes::deserialize_default_from_null;

use super::ContactEmail;

/// `POST /subscribe`请求体
#[derive(Debug, Clone, Default, serde::Serialize, serde::Deserialize)]
#[serde(default)]
pub struct SubscriptionPayload {
    #[serde(deserialize_with = "deserialize_default_from_null")]
    pub email: String,
}

impl SubscriptionPayload {
    pub fn new(email: impl Into<String>) -> Self {
        Self {
            email: email.into(),
        }
    }
}

impl TryFrom<SubscriptionPayload> for ContactEmail {
    type Error = String;

    fn try_from(payload: SubscriptionPayload) -> Result<Self, Self::Error> {
        ContactEmail::parse(&payload.email)
    }
}
