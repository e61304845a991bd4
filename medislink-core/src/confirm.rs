//! Модальное подтверждение опасных действий.

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Оформление диалога.
pub enum DialogTone {
    /// Необратимое действие (красная кнопка).
    Danger,
    /// Изменение состояния (жёлтая кнопка).
    Warning,
}

#[derive(Debug, Clone, PartialEq)]
/// Запрос подтверждения: что показать и что выполнить после «Ya, Lanjutkan».
pub struct ConfirmRequest<A> {
    /// Заголовок диалога.
    pub title: String,
    /// Пояснение.
    pub message: String,
    /// Оформление.
    pub tone: DialogTone,
    /// Отложенное действие.
    pub action: A,
}

#[derive(Debug, Clone, PartialEq)]
/// Единственный на приложение диалог подтверждения.
///
/// Действие отдаётся наружу только через [`ConfirmGate::confirm`]; отмена
/// просто закрывает диалог.
pub struct ConfirmGate<A> {
    pending: Option<ConfirmRequest<A>>,
}

impl<A> Default for ConfirmGate<A> {
    fn default() -> Self {
        Self { pending: None }
    }
}

impl<A> ConfirmGate<A> {
    /// Открывает диалог. Ранее открытый запрос заменяется.
    pub fn ask(&mut self, request: ConfirmRequest<A>) {
        self.pending = Some(request);
    }

    /// Открыт ли диалог.
    pub fn is_open(&self) -> bool {
        self.pending.is_some()
    }

    /// Текущий запрос для отрисовки.
    pub fn pending(&self) -> Option<&ConfirmRequest<A>> {
        self.pending.as_ref()
    }

    /// Пользователь подтвердил: диалог закрывается, действие возвращается
    /// для выполнения.
    pub fn confirm(&mut self) -> Option<A> {
        self.pending.take().map(|request| request.action)
    }

    /// Пользователь отказался: диалог закрывается, ничего не выполняется.
    pub fn cancel(&mut self) {
        self.pending = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn request(action: u32) -> ConfirmRequest<u32> {
        ConfirmRequest {
            title: "Hapus".to_string(),
            message: "Yakin?".to_string(),
            tone: DialogTone::Danger,
            action,
        }
    }

    #[test]
    fn confirm_releases_action_once() {
        let mut gate = ConfirmGate::default();
        gate.ask(request(42));
        assert!(gate.is_open());

        assert_eq!(gate.confirm(), Some(42));
        assert!(!gate.is_open());
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn cancel_drops_action() {
        let mut gate = ConfirmGate::default();
        gate.ask(request(1));
        gate.cancel();

        assert!(!gate.is_open());
        assert_eq!(gate.confirm(), None);
    }

    #[test]
    fn new_request_replaces_pending_one() {
        let mut gate = ConfirmGate::default();
        gate.ask(request(1));
        gate.ask(request(2));
        assert_eq!(gate.pending().map(|r| r.action), Some(2));
    }
}
