pub const MISSING_EMAIL: &str = "Please enter your email address";
pub const INVALID_EMAIL: &str = "Please enter a valid email address";

/// 联系邮箱
/// 只校验是否包含`@`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactEmail(String);

impl ContactEmail {
    pub fn parse(s: &str) -> Result<ContactEmail, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MISSING_EMAIL.into());
        }
        if !s.contains('@') {
            return Err(INVALID_EMAIL.into());
        }
        Ok(Self(s.into()))
    }
}

impl AsRef<str> for ContactEmail {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactEmail {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
