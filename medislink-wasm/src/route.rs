//! Маршруты приложения поверх `location.hash`.

use medislink_core::Id;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Route {
    /// Личный кабинет пользователя.
    #[default]
    Dashboard,
    Donation,
    Tool(Id),
    News(Id),
    Admin,
    Profile,
    Login,
}

impl Route {
    /// Разбирает путь вида `/tools/3`; неизвестный путь ведёт в кабинет.
    pub(crate) fn parse(raw: &str) -> Self {
        let path = raw.trim_start_matches('#').trim_matches('/');
        let mut parts = path.split('/');

        match (parts.next(), parts.next(), parts.next()) {
            (Some("donasi"), None, _) => Self::Donation,
            (Some("tools"), Some(id), None) => id.parse().map(Self::Tool).unwrap_or_default(),
            (Some("news"), Some(id), None) => id.parse().map(Self::News).unwrap_or_default(),
            (Some("admin"), None, _) => Self::Admin,
            (Some("profile"), None, _) => Self::Profile,
            (Some("login"), None, _) => Self::Login,
            _ => Self::Dashboard,
        }
    }

    pub(crate) fn path(&self) -> String {
        match self {
            Self::Dashboard => "/dashboard".to_string(),
            Self::Donation => "/donasi".to_string(),
            Self::Tool(id) => format!("/tools/{id}"),
            Self::News(id) => format!("/news/{id}"),
            Self::Admin => "/admin".to_string(),
            Self::Profile => "/profile".to_string(),
            Self::Login => "/login".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_hash_paths() {
        assert_eq!(Route::parse("#/tools/12"), Route::Tool(12));
        assert_eq!(Route::parse("/news/4/"), Route::News(4));
        assert_eq!(Route::parse("#/admin"), Route::Admin);
        assert_eq!(Route::parse("#/donasi"), Route::Donation);
    }

    #[test]
    fn unknown_or_malformed_paths_fall_back_to_dashboard() {
        assert_eq!(Route::parse(""), Route::Dashboard);
        assert_eq!(Route::parse("#/tools/abc"), Route::Dashboard);
        assert_eq!(Route::parse("#/tools/1/edit"), Route::Dashboard);
    }

    #[test]
    fn path_round_trips_through_parse() {
        for route in [Route::Tool(7), Route::News(1), Route::Admin, Route::Login] {
            assert_eq!(Route::parse(&route.path()), route);
        }
    }
}
