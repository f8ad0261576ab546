use super::{ContactEmail, ContactName, FieldErrors, InquiryCategory, InquiryPayload};

/// 校验通过的预约咨询
/// 可选字段缺失或为空白时为`None`
#[derive(Debug, Clone)]
pub struct Inquiry {
    pub name: ContactName,
    pub email: ContactEmail,
    pub category: InquiryCategory,
    pub message: String,
    pub phone: Option<String>,
    pub session_type: Option<String>,
    pub timeframe: Option<String>,
    pub event_time: Option<String>,
    pub location: Option<String>,
    pub venue_type: Option<String>,
    pub budget: Option<String>,
    pub referral_source: Option<String>,
}

impl Inquiry {
    /// 邮件标题中的预约类型
    pub fn kind(&self) -> &str {
        self.session_type
            .as_deref()
            .unwrap_or_else(|| self.category.label())
    }
}

impl TryFrom<InquiryPayload> for Inquiry {
    type Error = FieldErrors;

    fn try_from(payload: InquiryPayload) -> Result<Self, Self::Error> {
        let errors = payload.validate();
        if !errors.is_empty() {
            return Err(errors);
        }

        let name = ContactName::parse(&payload.contact_name).map_err(|_| errors.clone())?;
        let email = ContactEmail::parse(&payload.contact_email).map_err(|_| errors.clone())?;
        let category = InquiryCategory::parse(&payload.category).map_err(|_| errors)?;

        Ok(Self {
            name,
            email,
            category,
            message: payload.message.trim().into(),
            phone: present(payload.phone),
            session_type: present(payload.session_type),
            timeframe: present(payload.timeframe),
            event_time: present(payload.event_time),
            location: present(payload.location),
            venue_type: present(payload.venue_type),
            budget: present(payload.budget),
            referral_source: present(payload.referral_source),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_owned())
        .filter(|v| !v.is_empty())
}
