//! Контракт внешнего REST API, которым пользуются страницы.
//!
//! Реализации: `reqwest`-клиент в `medislink-client` и `gloo-net`-клиент в
//! `medislink-wasm`. Фьючерсы не обязаны быть `Send`, чтобы одни и те же
//! сценарии работали и в браузере, и в tokio.

use std::fmt::Display;

use async_trait::async_trait;

use crate::forms::{AdPayload, DonationPayload, LoanRequest, NewsPayload, ToolPayload};
use crate::models::{Ad, Donation, Id, Loan, LoanStatus, News, Tool, UserProfile};

/// Операции обычного пользователя (`userServices`).
#[async_trait(?Send)]
pub trait UserApi {
    /// Ошибка транспорта.
    type Error: Display;

    /// Инструмент по идентификатору.
    async fn get_tool(&self, id: Id) -> Result<Tool, Self::Error>;

    /// Новость по идентификатору.
    async fn get_news_item(&self, id: Id) -> Result<News, Self::Error>;

    /// Профиль текущего пользователя.
    async fn current_profile(&self) -> Result<UserProfile, Self::Error>;

    /// Отправляет пожертвование (multipart).
    async fn create_donation(&self, payload: &DonationPayload) -> Result<(), Self::Error>;

    /// Отправляет заявку на аренду (JSON).
    async fn create_loan(&self, request: &LoanRequest) -> Result<(), Self::Error>;
}

/// Операции админ-панели (`adminServices`).
#[async_trait(?Send)]
pub trait AdminApi: UserApi {
    /// Весь инвентарь.
    async fn list_tools(&self) -> Result<Vec<Tool>, Self::Error>;

    /// Все заявки на аренду.
    async fn list_loans(&self) -> Result<Vec<Loan>, Self::Error>;

    /// Все новости.
    async fn list_news(&self) -> Result<Vec<News>, Self::Error>;

    /// Все баннеры.
    async fn list_ads(&self) -> Result<Vec<Ad>, Self::Error>;

    /// Все пожертвования.
    async fn list_donations(&self) -> Result<Vec<Donation>, Self::Error>;

    /// Добавляет инструмент (multipart).
    async fn create_tool(&self, payload: &ToolPayload) -> Result<(), Self::Error>;

    /// Удаляет инструмент.
    async fn delete_tool(&self, id: Id) -> Result<(), Self::Error>;

    /// Меняет статус заявки.
    async fn update_loan_status(&self, id: Id, status: LoanStatus) -> Result<(), Self::Error>;

    /// Публикует новость (multipart).
    async fn create_news(&self, payload: &NewsPayload) -> Result<(), Self::Error>;

    /// Добавляет баннер.
    async fn create_ad(&self, payload: &AdPayload) -> Result<(), Self::Error>;

    /// Удаляет баннер.
    async fn delete_ad(&self, id: Id) -> Result<(), Self::Error>;

    /// Отмечает пожертвование полученным.
    async fn receive_donation(&self, id: Id) -> Result<(), Self::Error>;

    /// Принимает пожертвование в инвентарь с указанным состоянием.
    async fn approve_donation(&self, id: Id, condition: &str) -> Result<(), Self::Error>;
}
