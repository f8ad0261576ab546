use chrono::{DateTime, Utc};

use crate::domain::{Inquiry, InquiryCategory};

const RULE_WIDTH: usize = 50;

/// 转发邮件的标题
pub fn subject(inquiry: &Inquiry) -> String {
    format!(
        "New booking inquiry from {} – {}",
        inquiry.name,
        inquiry.kind()
    )
}

/// 将预约咨询渲染为纯文本邮件正文
///
/// 版式固定：标题、`CONTACT INFORMATION`、按类别区分的详情、留言、提交时间
/// 可选字段只在有值时输出一行
pub fn format_inquiry_email(inquiry: &Inquiry, submitted_at: DateTime<Utc>) -> String {
    let mut doc = Document::default();

    doc.line("NEW BOOKING INQUIRY");
    doc.rule('=');
    doc.blank();

    doc.heading("CONTACT INFORMATION");
    doc.line(format!("Name: {}", inquiry.name));
    doc.line(format!("Email: {}", inquiry.email));
    doc.field("Phone", &inquiry.phone);
    doc.blank();

    doc.heading(inquiry.category.details_heading());
    for (label, value) in detail_fields(inquiry) {
        doc.field(label, value);
    }
    doc.blank();
    doc.line(inquiry.category.message_heading());
    doc.line(&inquiry.message);

    doc.blank();
    doc.rule('=');
    doc.line(format!(
        "Submitted: {}",
        submitted_at.format("%Y-%m-%d %H:%M:%S UTC")
    ));

    doc.finish()
}

fn detail_fields(inquiry: &Inquiry) -> Vec<(&'static str, &Option<String>)> {
    let (kind_label, date_label, location_label) = match inquiry.category {
        InquiryCategory::Photography => ("Session Type", "Desired Date", "Location"),
        InquiryCategory::Dj => ("Set Type", "Event Date", "Event Location"),
        InquiryCategory::Both => ("Booking Type", "Timeframe", "Location"),
    };

    vec![
        (kind_label, &inquiry.session_type),
        (date_label, &inquiry.timeframe),
        ("Event Time", &inquiry.event_time),
        (location_label, &inquiry.location),
        ("Venue Type", &inquiry.venue_type),
        ("Budget", &inquiry.budget),
        ("How they heard about you", &inquiry.referral_source),
    ]
}

#[derive(Default)]
struct Document {
    lines: Vec<String>,
}

impl Document {
    fn line(&mut self, s: impl Into<String>) {
        self.lines.push(s.into());
    }

    fn blank(&mut self) {
        self.lines.push(String::new());
    }

    fn rule(&mut self, c: char) {
        self.lines.push(c.to_string().repeat(RULE_WIDTH));
    }

    fn heading(&mut self, title: &str) {
        self.line(title);
        self.rule('-');
    }

    fn field(&mut self, label: &str, value: &Option<String>) {
        if let Some(value) = value {
            self.lines.push(format!("{label}: {value}"));
        }
    }

    fn finish(self) -> String {
        self.lines.join("\n")
    }
}
