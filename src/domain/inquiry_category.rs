pub const MISSING_CATEGORY: &str = "Please choose what you'd like to book";

/// 预约类别
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InquiryCategory {
    Photography,
    Dj,
    /// 两者皆要或未定
    Both,
}

impl InquiryCategory {
    /// 接受`photography`、`dj`、`both`及页面上的显示名称，不区分大小写
    pub fn parse(s: &str) -> Result<InquiryCategory, String> {
        match s.trim().to_lowercase().as_str() {
            "photography" | "photo" | "photo session" => Ok(Self::Photography),
            "dj" | "dj set" => Ok(Self::Dj),
            "both" | "undecided" | "both / undecided" | "both/undecided" => Ok(Self::Both),
            _ => Err(MISSING_CATEGORY.into()),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            InquiryCategory::Photography => "photography",
            InquiryCategory::Dj => "dj",
            InquiryCategory::Both => "both",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            InquiryCategory::Photography => "Photography",
            InquiryCategory::Dj => "DJ Set",
            InquiryCategory::Both => "Photo + DJ",
        }
    }

    pub fn details_heading(&self) -> &'static str {
        match self {
            InquiryCategory::Photography => "PHOTOGRAPHY BOOKING DETAILS",
            InquiryCategory::Dj => "DJ BOOKING DETAILS",
            InquiryCategory::Both => "BOOKING DETAILS",
        }
    }

    pub fn message_heading(&self) -> &'static str {
        match self {
            InquiryCategory::Photography => "VISION/MESSAGE:",
            InquiryCategory::Dj => "ENERGY/VIBE REQUESTED:",
            InquiryCategory::Both => "MESSAGE:",
        }
    }

    /// 留言为空时的提示
    pub fn missing_message(&self) -> &'static str {
        match self {
            InquiryCategory::Photography => "Please describe your vision for the session",
            InquiryCategory::Dj => "Please describe the energy you're looking for",
            InquiryCategory::Both => "Please tell me a little about what you have in mind",
        }
    }
}
