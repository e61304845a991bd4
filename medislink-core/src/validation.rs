//! Синхронные проверки полей форм.
//!
//! Это мягкие UX-ограничения: сервер всё равно проверяет данные сам.

use chrono::NaiveDate;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
/// Отказ клиентской валидации: поле и текст уведомления для пользователя.
pub struct ValidationError {
    /// Имя поля формы, которое не прошло проверку.
    pub field: &'static str,
    /// Текст уведомления.
    pub message: &'static str,
}

impl ValidationError {
    /// Создаёт ошибку для поля.
    pub fn new(field: &'static str, message: &'static str) -> Self {
        Self { field, message }
    }
}

/// Обрезает пробелы и отвергает пустое значение.
pub fn require_filled(
    field: &'static str,
    value: &str,
    message: &'static str,
) -> Result<String, ValidationError> {
    let value = value.trim();
    if value.is_empty() {
        return Err(ValidationError::new(field, message));
    }
    Ok(value.to_string())
}

/// Разбирает дату из поля `<input type="date">` (`YYYY-MM-DD`).
pub fn parse_date(
    field: &'static str,
    raw: &str,
    message: &'static str,
) -> Result<NaiveDate, ValidationError> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|_| ValidationError::new(field, message))
}

/// Дата не раньше `today`.
pub fn check_not_past(
    field: &'static str,
    date: NaiveDate,
    today: NaiveDate,
    message: &'static str,
) -> Result<(), ValidationError> {
    if date < today {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Дата не раньше `start`.
pub fn check_not_before(
    field: &'static str,
    date: NaiveDate,
    start: NaiveDate,
    message: &'static str,
) -> Result<(), ValidationError> {
    if date < start {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// Целое число из текстового поля, не меньше `min`.
pub fn parse_count(
    field: &'static str,
    raw: &str,
    min: u32,
    message: &'static str,
) -> Result<u32, ValidationError> {
    match raw.trim().parse::<u32>() {
        Ok(value) if value >= min => Ok(value),
        _ => Err(ValidationError::new(field, message)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).expect("valid date")
    }

    #[test]
    fn require_filled_trims_value() {
        assert_eq!(require_filled("title", "  Judul ", "err"), Ok("Judul".to_string()));
        assert_eq!(
            require_filled("title", "   ", "err"),
            Err(ValidationError::new("title", "err"))
        );
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert_eq!(parse_date("d", "2024-02-29", "err"), Ok(date(2024, 2, 29)));
        assert!(parse_date("d", "", "err").is_err());
        assert!(parse_date("d", "29/02/2024", "err").is_err());
    }

    #[test]
    fn today_is_not_past() {
        let today = date(2026, 10, 19);
        assert!(check_not_past("d", today, today, "err").is_ok());
        assert!(check_not_past("d", date(2026, 10, 18), today, "err").is_err());
    }

    #[test]
    fn same_day_return_is_allowed() {
        let start = date(2026, 10, 20);
        assert!(check_not_before("r", start, start, "err").is_ok());
        assert!(check_not_before("r", date(2026, 10, 19), start, "err").is_err());
    }

    #[test]
    fn parse_count_enforces_minimum() {
        assert_eq!(parse_count("q", " 3 ", 1, "err"), Ok(3));
        assert!(parse_count("q", "0", 1, "err").is_err());
        assert!(parse_count("q", "-1", 0, "err").is_err());
        assert_eq!(parse_count("q", "0", 0, "err"), Ok(0));
    }

    #[test]
    fn error_displays_user_message() {
        let err = ValidationError::new("pickup_date", "Tanggal penjemputan tidak boleh lampau.");
        assert_eq!(err.to_string(), "Tanggal penjemputan tidak boleh lampau.");
    }
}
