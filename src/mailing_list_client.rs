use std::time::Duration;

use crate::domain::ContactEmail;

#[derive(thiserror::Error, Debug)]
pub enum ListError {
    #[error("failed to build mailing list client.")]
    Build(#[source] reqwest::Error),
    #[error("`{0}` is not a valid mailing list endpoint.")]
    InvalidEndpoint(String),
    #[error(transparent)]
    Request(#[from] reqwest::Error),
}

/// 第三方邮件列表客户端
#[derive(Debug)]
pub struct MailingListClient {
    client: reqwest::Client,
    endpoint: reqwest::Url,
}

impl MailingListClient {
    pub fn new(endpoint: &str, timeout: Duration) -> Result<Self, ListError> {
        let client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(ListError::Build)?;
        let endpoint = reqwest::Url::parse(endpoint)
            .map_err(|_| ListError::InvalidEndpoint(endpoint.into()))?;

        Ok(Self { client, endpoint })
    }

    pub fn from_config(config: &crate::config::Config) -> Result<Self, ListError> {
        let list_config = &config.mailing_list;
        Self::new(&list_config.endpoint, list_config.timeout())
    }

    /// 服务商返回任何非2xx状态码都视为失败
    #[tracing::instrument(name = "Adding subscriber to mailing list", skip_all)]
    pub async fn subscribe(&self, email: &ContactEmail) -> Result<(), ListError> {
        self.client
            .post(self.endpoint.clone())
            .form(&[("email", email.as_ref())])
            .send()
            .await?
            .error_for_status()?;

        Ok(())
    }
}
