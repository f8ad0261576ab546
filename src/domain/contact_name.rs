pub const MISSING_NAME: &str = "Please enter your name";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContactName(String);

impl ContactName {
    pub fn parse(s: &str) -> Result<ContactName, String> {
        let s = s.trim();
        if s.is_empty() {
            return Err(MISSING_NAME.into());
        }
        Ok(Self(s.into()))
    }
}

impl AsRef<str> for ContactName {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for ContactName {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        self.0.fmt(f)
    }
}
