//! Общий сервис всплывающих уведомлений.
//!
//! Уведомление живёт [`NOTIFICATION_TIMEOUT`]; таймер заводит фронтенд и по
//! истечении вызывает [`Notifier::expire`] с билетом показа. Старый таймер не
//! может погасить более новое уведомление.

use std::time::Duration;

/// Сколько висит уведомление.
pub const NOTIFICATION_TIMEOUT: Duration = Duration::from_secs(3);

/// Задержка перехода на другую страницу после успешной отправки формы.
pub const REDIRECT_DELAY: Duration = Duration::from_secs(2);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Вид уведомления.
pub enum NotificationKind {
    /// Зелёное, операция удалась.
    Success,
    /// Красное, операция не удалась.
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Показанное уведомление.
pub struct Notification {
    /// Билет показа.
    pub ticket: u64,
    /// Текст.
    pub message: String,
    /// Вид.
    pub kind: NotificationKind,
}

impl Notification {
    /// Успешное ли уведомление.
    pub fn is_success(&self) -> bool {
        self.kind == NotificationKind::Success
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Одно текущее уведомление на всё приложение.
pub struct Notifier {
    current: Option<Notification>,
    issued: u64,
}

impl Notifier {
    /// Показывает уведомление, вытесняя предыдущее. Возвращает билет для
    /// [`Notifier::expire`].
    pub fn show(&mut self, message: impl Into<String>, kind: NotificationKind) -> u64 {
        self.issued += 1;
        self.current = Some(Notification {
            ticket: self.issued,
            message: message.into(),
            kind,
        });
        self.issued
    }

    /// Показывает успешное уведомление.
    pub fn success(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Success)
    }

    /// Показывает уведомление об ошибке.
    pub fn error(&mut self, message: impl Into<String>) -> u64 {
        self.show(message, NotificationKind::Error)
    }

    /// Гасит уведомление, если оно всё ещё то, что было показано с `ticket`.
    pub fn expire(&mut self, ticket: u64) -> bool {
        if self.current.as_ref().map(|n| n.ticket) != Some(ticket) {
            return false;
        }
        self.current = None;
        true
    }

    /// Текущее уведомление.
    pub fn current(&self) -> Option<&Notification> {
        self.current.as_ref()
    }

    /// Билет последнего показа, если уведомление ещё висит.
    pub fn current_ticket(&self) -> Option<u64> {
        self.current.as_ref().map(|n| n.ticket)
    }

    /// Гасит уведомление безусловно.
    pub fn clear(&mut self) {
        self.current = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn newer_notification_replaces_older() {
        let mut notifier = Notifier::default();
        let first = notifier.error("gagal");
        let second = notifier.success("berhasil");

        assert_ne!(first, second);
        let current = notifier.current().expect("notification shown");
        assert_eq!(current.message, "berhasil");
        assert!(current.is_success());
    }

    #[test]
    fn stale_timer_does_not_clear_newer_notification() {
        let mut notifier = Notifier::default();
        let first = notifier.error("gagal");
        let second = notifier.success("berhasil");

        assert!(!notifier.expire(first));
        assert!(notifier.current().is_some());

        assert!(notifier.expire(second));
        assert!(notifier.current().is_none());
        assert!(!notifier.expire(second));
    }

    #[test]
    fn timeouts_match_ui_contract() {
        assert_eq!(NOTIFICATION_TIMEOUT, Duration::from_secs(3));
        assert_eq!(REDIRECT_DELAY, Duration::from_secs(2));
    }
}
