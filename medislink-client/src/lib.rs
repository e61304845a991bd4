//! Клиентская библиотека для работы с REST API MedisLink.
//!
//! `MedisClient` реализует трейты [`UserApi`] и [`AdminApi`] из
//! `medislink-core` поверх `reqwest`, поэтому CLI прогоняет через него те же
//! формы и сценарии, что и браузерный фронтенд.
//!
//! Клиент хранит токен авторизации и подставляет его в защищённые операции.
#![warn(missing_docs)]

mod config;
mod error;
mod http_client;

pub use config::{ClientConfig, DEFAULT_API_URL, normalize_base_url};
pub use error::{MedisClientError, MedisClientResult};

use async_trait::async_trait;
use medislink_core::wire::{AdDto, DonationDto, LoanDto, NewsDto, ToolDto, UserProfileDto};
use medislink_core::{
    Ad, AdPayload, AdminApi, Donation, DonationPayload, Id, Loan, LoanRequest, LoanStatus, News,
    NewsPayload, Tool, ToolPayload, UserApi, UserProfile,
};
use reqwest::Method;

use http_client::HttpClient;

#[derive(Debug, Clone)]
/// Клиент платформы MedisLink.
pub struct MedisClient {
    http_client: HttpClient,
    token: Option<String>,
}

impl MedisClient {
    /// Создаёт клиент по настройкам.
    pub fn new(config: &ClientConfig) -> MedisClientResult<Self> {
        Ok(Self {
            http_client: HttpClient::new(config)?,
            token: None,
        })
    }

    /// Устанавливает токен вручную.
    pub fn set_token(&mut self, token: impl Into<String>) {
        self.token = Some(token.into());
    }

    /// Возвращает текущий токен, если он установлен.
    pub fn get_token(&self) -> Option<&str> {
        self.token.as_deref()
    }

    /// Очищает сохранённый токен.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    /// Весь инвентарь, доступный посетителям.
    pub async fn list_public_tools(&self) -> MedisClientResult<Vec<Tool>> {
        self.http_client
            .get_list::<ToolDto, Tool>("/api/tools", self.get_token())
            .await
    }

    fn require_token(&self) -> MedisClientResult<&str> {
        self.token.as_deref().ok_or(MedisClientError::Unauthorized)
    }
}

#[async_trait(?Send)]
impl UserApi for MedisClient {
    type Error = MedisClientError;

    async fn get_tool(&self, id: Id) -> MedisClientResult<Tool> {
        self.http_client
            .get_one::<ToolDto, Tool>(&format!("/api/tools/{id}"), self.get_token())
            .await
    }

    async fn get_news_item(&self, id: Id) -> MedisClientResult<News> {
        self.http_client
            .get_one::<NewsDto, News>(&format!("/api/news/{id}"), self.get_token())
            .await
    }

    async fn current_profile(&self) -> MedisClientResult<UserProfile> {
        let token = self.require_token()?;
        self.http_client
            .get_one::<UserProfileDto, UserProfile>("/api/users/me", Some(token))
            .await
    }

    async fn create_donation(&self, payload: &DonationPayload) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_multipart("/api/donations", payload, Some(token))
            .await
    }

    async fn create_loan(&self, request: &LoanRequest) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_json(Method::POST, "/api/loans", request, Some(token))
            .await
    }
}

#[async_trait(?Send)]
impl AdminApi for MedisClient {
    async fn list_tools(&self) -> MedisClientResult<Vec<Tool>> {
        self.list_public_tools().await
    }

    async fn list_loans(&self) -> MedisClientResult<Vec<Loan>> {
        let token = self.require_token()?;
        self.http_client
            .get_list::<LoanDto, Loan>("/api/admin/loans", Some(token))
            .await
    }

    async fn list_news(&self) -> MedisClientResult<Vec<News>> {
        self.http_client
            .get_list::<NewsDto, News>("/api/news", self.get_token())
            .await
    }

    async fn list_ads(&self) -> MedisClientResult<Vec<Ad>> {
        self.http_client
            .get_list::<AdDto, Ad>("/api/ads", self.get_token())
            .await
    }

    async fn list_donations(&self) -> MedisClientResult<Vec<Donation>> {
        let token = self.require_token()?;
        self.http_client
            .get_list::<DonationDto, Donation>("/api/admin/donations", Some(token))
            .await
    }

    async fn create_tool(&self, payload: &ToolPayload) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_multipart("/api/admin/tools", payload, Some(token))
            .await
    }

    async fn delete_tool(&self, id: Id) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_empty(Method::DELETE, &format!("/api/admin/tools/{id}"), Some(token))
            .await
    }

    async fn update_loan_status(&self, id: Id, status: LoanStatus) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .update_loan_status(Some(token), id, status)
            .await
    }

    async fn create_news(&self, payload: &NewsPayload) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_multipart("/api/admin/news", payload, Some(token))
            .await
    }

    async fn create_ad(&self, payload: &AdPayload) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_json(Method::POST, "/api/admin/ads", payload, Some(token))
            .await
    }

    async fn delete_ad(&self, id: Id) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_empty(Method::DELETE, &format!("/api/admin/ads/{id}"), Some(token))
            .await
    }

    async fn receive_donation(&self, id: Id) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .send_empty(
                Method::PUT,
                &format!("/api/admin/donations/{id}/receive"),
                Some(token),
            )
            .await
    }

    async fn approve_donation(&self, id: Id, condition: &str) -> MedisClientResult<()> {
        let token = self.require_token()?;
        self.http_client
            .approve_donation(Some(token), id, condition)
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn protected_calls_without_token_fail_before_network() {
        let client = MedisClient::new(&ClientConfig::default().with_base_url("127.0.0.1:9"))
            .expect("client builds");

        assert!(matches!(
            client.delete_tool(1).await,
            Err(MedisClientError::Unauthorized)
        ));
        assert!(matches!(
            client.current_profile().await,
            Err(MedisClientError::Unauthorized)
        ));
    }

    #[test]
    fn token_can_be_set_and_cleared() {
        let mut client =
            MedisClient::new(&ClientConfig::default()).expect("client builds");
        client.set_token("abc");
        assert_eq!(client.get_token(), Some("abc"));
        client.clear_token();
        assert_eq!(client.get_token(), None);
    }
}
