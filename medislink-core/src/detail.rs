//! Страницы одной сущности: инструмент и новость.

use std::fmt::Display;

use crate::api::UserApi;
use crate::forms::LoanForm;
use crate::models::{Id, News, Tool, UserProfile};

#[derive(Debug, Clone, Default, PartialEq)]
/// Состояние страницы, загружающей одну сущность.
pub enum Loadable<T> {
    #[default]
    /// Запрос ещё идёт.
    Loading,
    /// Сущность не найдена или запрос не удался.
    NotFound,
    /// Данные получены.
    Ready(T),
}

impl<T> Loadable<T> {
    /// Переводит результат запроса в состояние страницы. Ошибка только
    /// логируется и показывается как «не найдено».
    pub fn from_fetch<E: Display>(what: &str, result: Result<T, E>) -> Self {
        match result {
            Ok(value) => Self::Ready(value),
            Err(err) => {
                tracing::warn!("failed to load {what}: {err}");
                Self::NotFound
            }
        }
    }

    /// Запрос ещё идёт.
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    /// Загруженное значение.
    pub fn ready(&self) -> Option<&T> {
        match self {
            Self::Ready(value) => Some(value),
            _ => None,
        }
    }

    /// Преобразует загруженное значение.
    pub fn map<U>(self, f: impl FnOnce(T) -> U) -> Loadable<U> {
        match self {
            Self::Loading => Loadable::Loading,
            Self::NotFound => Loadable::NotFound,
            Self::Ready(value) => Loadable::Ready(f(value)),
        }
    }
}

/// Текст вместо формы аренды для пользователя без подтверждённых данных.
pub const VERIFICATION_REQUIRED: &str = "Verifikasi Diperlukan";

#[derive(Debug, Clone, PartialEq)]
/// Страница инструмента.
pub struct ToolPage {
    /// Инструмент.
    pub tool: Tool,
    /// Профиль посетителя, если его удалось получить.
    pub profile: Option<UserProfile>,
}

impl ToolPage {
    /// Может ли посетитель подать заявку: нужен профиль с NIK и фото KTP.
    pub fn can_request_loan(&self) -> bool {
        self.profile
            .as_ref()
            .is_some_and(UserProfile::is_verified)
    }

    /// Пустая форма аренды для этого инструмента.
    pub fn loan_form(&self) -> LoanForm {
        LoanForm::for_tool(&self.tool)
    }
}

/// Загружает инструмент и профиль параллельно; страница готова только
/// когда завершились оба запроса.
pub async fn load_tool_page<A>(api: &A, id: Id) -> Loadable<ToolPage>
where
    A: UserApi + ?Sized,
{
    let (tool, profile) = futures::join!(api.get_tool(id), api.current_profile());

    let profile = match profile {
        Ok(profile) => Some(profile),
        Err(err) => {
            tracing::warn!("failed to load user profile: {err}");
            None
        }
    };

    Loadable::from_fetch("tool", tool).map(|tool| ToolPage { tool, profile })
}

/// Загружает новость.
pub async fn load_news<A>(api: &A, id: Id) -> Loadable<News>
where
    A: UserApi + ?Sized,
{
    Loadable::from_fetch("news", api.get_news_item(id).await)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tool() -> Tool {
        Tool {
            id: 3,
            name: "Kursi Roda".to_string(),
            category: "Alat Bantu Jalan".to_string(),
            kind: "Manual".to_string(),
            size: "Dewasa".to_string(),
            description: String::new(),
            dimensions: String::new(),
            weight_cap: String::new(),
            condition: "baik".to_string(),
            stock: 2,
            image_url: None,
        }
    }

    fn profile(nik: Option<&str>, foto_ktp: Option<&str>) -> UserProfile {
        UserProfile {
            id: 1,
            name: "Siti".to_string(),
            role: "user".to_string(),
            nik: nik.map(str::to_string),
            foto_ktp: foto_ktp.map(str::to_string),
        }
    }

    #[test]
    fn fetch_error_is_shown_as_not_found() {
        let page = Loadable::<News>::from_fetch("news", Err("500 Internal Server Error"));
        assert_eq!(page, Loadable::NotFound);
    }

    #[test]
    fn default_state_is_loading() {
        assert!(Loadable::<Tool>::default().is_loading());
    }

    #[test]
    fn loan_form_requires_verified_profile() {
        let anonymous = ToolPage {
            tool: tool(),
            profile: None,
        };
        let partial = ToolPage {
            tool: tool(),
            profile: Some(profile(Some("3201"), None)),
        };
        let verified = ToolPage {
            tool: tool(),
            profile: Some(profile(Some("3201"), Some("ktp.jpg"))),
        };

        assert!(!anonymous.can_request_loan());
        assert!(!partial.can_request_loan());
        assert!(verified.can_request_loan());
    }
}
