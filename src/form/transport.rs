use anyhow::Context;
use async_trait::async_trait;

use crate::domain::{DispatchResult, InquiryPayload, SubscriptionPayload};

/// 接口响应的状态码与响应体
/// 响应体不是[`DispatchResult`]时`body`为`None`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportResponse {
    pub status: u16,
    pub body: Option<DispatchResult>,
}

impl TransportResponse {
    /// 状态码为2xx且`ok`为`true`才算成功
    /// 失败时带上服务端返回的错误信息
    pub fn verdict(&self) -> Result<(), Option<&str>> {
        match &self.body {
            Some(body) if (200..300).contains(&self.status) && body.ok => Ok(()),
            Some(body) => Err(body.error.as_deref()),
            None => Err(None),
        }
    }
}

/// 请求未完成
#[derive(thiserror::Error, Debug)]
#[error("request did not complete.")]
pub struct TransportError(#[source] pub anyhow::Error);

#[async_trait]
pub trait IntakeTransport: Send + Sync {
    async fn post_inquiry(
        &self,
        payload: &InquiryPayload,
    ) -> Result<TransportResponse, TransportError>;

    async fn post_subscription(
        &self,
        payload: &SubscriptionPayload,
    ) -> Result<TransportResponse, TransportError>;
}

/// 向服务端发送JSON请求
#[derive(Debug, Clone)]
pub struct HttpTransport {
    client: reqwest::Client,
    base_url: reqwest::Url,
}

impl HttpTransport {
    pub fn new(base_url: &str) -> Result<Self, TransportError> {
        let base_url = reqwest::Url::parse(base_url)
            .with_context(|| format!("`{base_url}` is not a valid base url."))
            .map_err(TransportError)?;

        Ok(Self {
            client: reqwest::Client::new(),
            base_url,
        })
    }

    async fn post_json<T>(&self, path: &str, payload: &T) -> Result<TransportResponse, TransportError>
    where
        T: serde::Serialize + Sync + ?Sized,
    {
        let url = self
            .base_url
            .join(path)
            .context("failed to build endpoint url.")
            .map_err(TransportError)?;
        let response = self
            .client
            .post(url)
            .json(payload)
            .send()
            .await
            .context("failed to send request.")
            .map_err(TransportError)?;

        let status = response.status().as_u16();
        let body = response.json::<DispatchResult>().await.ok();

        Ok(TransportResponse { status, body })
    }
}

#[async_trait]
impl IntakeTransport for HttpTransport {
    async fn post_inquiry(
        &self,
        payload: &InquiryPayload,
    ) -> Result<TransportResponse, TransportError> {
        self.post_json("/bookings", payload).await
    }

    async fn post_subscription(
        &self,
        payload: &SubscriptionPayload,
    ) -> Result<TransportResponse, TransportError> {
        self.post_json("/subscribe", payload).await
    }
}
