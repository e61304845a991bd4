//! Общая клиентская логика MedisLink: модели, валидация форм, сценарий
//! отправки форм, уведомления, подтверждение действий и агрегация данных
//! админ-панели.
//!
//! Библиотека не зависит от транспорта и платформы: HTTP-клиент
//! (`medislink-client`) и браузерный фронтенд (`medislink-wasm`) реализуют
//! трейты [`UserApi`] и [`AdminApi`], а CLI и Leptos-страницы используют одни и
//! те же формы и состояния.
#![warn(missing_docs)]

pub mod api;
pub mod confirm;
pub mod dashboard;
pub mod detail;
pub mod forms;
pub mod image;
pub mod models;
pub mod notify;
pub mod validation;
pub mod wire;
pub mod workflow;

pub use api::{AdminApi, UserApi};
pub use confirm::{ConfirmGate, ConfirmRequest, DialogTone};
pub use dashboard::{AdminAction, AdminTab, Dashboard, DashboardData, Followup};
pub use detail::{Loadable, ToolPage};
pub use forms::{
    AdForm, AdPayload, DonationForm, DonationPayload, LoanForm, LoanRequest, MultipartPayload,
    NewsForm, NewsPayload, TOOL_CATEGORIES, ToolForm, ToolPayload,
};
pub use image::{ImageAttachment, ImageSlot, MAX_IMAGE_BYTES};
pub use models::{
    Ad, Donation, DonationStatus, Id, Loan, LoanStatus, News, Tool, UserProfile,
};
pub use notify::{NOTIFICATION_TIMEOUT, Notification, NotificationKind, Notifier, REDIRECT_DELAY};
pub use validation::ValidationError;
pub use workflow::{FormPhase, FormWorkflow, SubmitForm, SubmitOutcome, WorkflowError};

/// Текущая локальная дата пользователя.
///
/// Все проверки «дата не в прошлом» сравнивают с ней.
pub fn today() -> chrono::NaiveDate {
    chrono::Local::now().date_naive()
}
