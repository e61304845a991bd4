//! Сценарий отправки формы: Idle → Validating → Submitting → Success/Error → Idle.
//!
//! Фронтенды держат поля формы, [`FormWorkflow`] и [`Notifier`] у себя и
//! прогоняют их через [`prepare`] и [`finish`] (или через [`submit`], если
//! могут отдать `&mut` на всё время запроса).

use std::fmt::Display;
use std::future::Future;
use std::time::Duration;

use chrono::NaiveDate;
use thiserror::Error;

use crate::notify::Notifier;
use crate::validation::ValidationError;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Фаза отправки формы.
pub enum FormPhase {
    #[default]
    /// Поля редактируются.
    Idle,
    /// Идут синхронные проверки.
    Validating,
    /// Запрос отправлен, кнопка заблокирована.
    Submitting,
    /// Сервер принял данные.
    Succeeded,
    /// Запрос завершился ошибкой.
    Failed,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
/// Недопустимый шаг сценария.
pub enum WorkflowError {
    /// Форма уже отправляется.
    #[error("submission already in progress")]
    Busy,

    /// Шаг не разрешён из текущей фазы.
    #[error("cannot {event} while {from:?}")]
    InvalidTransition {
        /// Текущая фаза.
        from: FormPhase,
        /// Запрошенный шаг.
        event: &'static str,
    },
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Конечный автомат отправки одной формы.
pub struct FormWorkflow {
    phase: FormPhase,
}

impl FormWorkflow {
    /// Текущая фаза.
    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    /// Нужно ли блокировать кнопку отправки.
    pub fn is_busy(&self) -> bool {
        matches!(self.phase, FormPhase::Validating | FormPhase::Submitting)
    }

    /// Idle → Validating.
    pub fn begin_validation(&mut self) -> Result<(), WorkflowError> {
        if self.is_busy() {
            return Err(WorkflowError::Busy);
        }
        self.step("validate", &[FormPhase::Idle], FormPhase::Validating)
    }

    /// Validating → Idle: проверки не пройдены.
    pub fn reject(&mut self) -> Result<(), WorkflowError> {
        self.step("reject", &[FormPhase::Validating], FormPhase::Idle)
    }

    /// Validating → Submitting.
    pub fn begin_submit(&mut self) -> Result<(), WorkflowError> {
        self.step("submit", &[FormPhase::Validating], FormPhase::Submitting)
    }

    /// Submitting → Succeeded.
    pub fn succeed(&mut self) -> Result<(), WorkflowError> {
        self.step("succeed", &[FormPhase::Submitting], FormPhase::Succeeded)
    }

    /// Submitting → Failed.
    pub fn fail(&mut self) -> Result<(), WorkflowError> {
        self.step("fail", &[FormPhase::Submitting], FormPhase::Failed)
    }

    /// Succeeded | Failed → Idle.
    pub fn settle(&mut self) -> Result<(), WorkflowError> {
        self.step(
            "settle",
            &[FormPhase::Succeeded, FormPhase::Failed],
            FormPhase::Idle,
        )
    }

    fn step(
        &mut self,
        event: &'static str,
        allowed: &[FormPhase],
        next: FormPhase,
    ) -> Result<(), WorkflowError> {
        if !allowed.contains(&self.phase) {
            return Err(WorkflowError::InvalidTransition {
                from: self.phase,
                event,
            });
        }
        self.phase = next;
        Ok(())
    }
}

/// Форма, которую можно прогнать через сценарий отправки.
pub trait SubmitForm {
    /// Проверенные данные, готовые к отправке.
    type Payload;

    /// Синхронные проверки полей. Ошибка показывается пользователю как есть.
    fn validate(&self, today: NaiveDate) -> Result<Self::Payload, ValidationError>;

    /// Возвращает поля к начальным значениям.
    fn reset(&mut self);

    /// Уведомление после успешной отправки.
    fn success_message(&self) -> &'static str;

    /// Уведомление после ошибки запроса.
    fn failure_message(&self) -> &'static str;

    /// Через сколько уйти со страницы после успеха.
    fn redirect_after_success(&self) -> Option<Duration> {
        None
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Чем закончилась попытка отправки.
pub enum SubmitOutcome {
    /// Форма уже отправляется, нажатие проигнорировано.
    Busy,
    /// Проверки не пройдены, запрос не отправлялся.
    Rejected(ValidationError),
    /// Сервер принял данные.
    Sent {
        /// Через сколько уйти со страницы.
        redirect_after: Option<Duration>,
    },
    /// Запрос завершился ошибкой, поля сохранены.
    Failed,
}

impl SubmitOutcome {
    /// Дошли ли данные до сервера.
    pub fn is_sent(&self) -> bool {
        matches!(self, Self::Sent { .. })
    }
}

/// Проверяет форму и переводит сценарий в Submitting.
///
/// При отказе показывает уведомление об ошибке и возвращает сценарий в Idle.
pub fn prepare<F: SubmitForm>(
    form: &F,
    workflow: &mut FormWorkflow,
    notifier: &mut Notifier,
    today: NaiveDate,
) -> Result<F::Payload, SubmitOutcome> {
    if let Err(err) = workflow.begin_validation() {
        tracing::debug!("submit ignored: {err}");
        return Err(SubmitOutcome::Busy);
    }

    match form.validate(today) {
        Ok(payload) => {
            workflow.begin_submit().map_err(|err| {
                tracing::warn!("workflow out of sync: {err}");
                SubmitOutcome::Busy
            })?;
            Ok(payload)
        }
        Err(err) => {
            tracing::debug!(field = err.field, "validation rejected: {err}");
            notifier.error(err.message);
            if let Err(step) = workflow.reject() {
                tracing::warn!("workflow out of sync: {step}");
            }
            Err(SubmitOutcome::Rejected(err))
        }
    }
}

/// Применяет результат запроса: при успехе сбрасывает форму, в любом случае
/// показывает уведомление и возвращает сценарий в Idle.
pub fn finish<F, T, E>(
    form: &mut F,
    workflow: &mut FormWorkflow,
    notifier: &mut Notifier,
    result: Result<T, E>,
) -> SubmitOutcome
where
    F: SubmitForm,
    E: Display,
{
    let (step, outcome) = match result {
        Ok(_) => {
            form.reset();
            notifier.success(form.success_message());
            (
                workflow.succeed(),
                SubmitOutcome::Sent {
                    redirect_after: form.redirect_after_success(),
                },
            )
        }
        Err(err) => {
            tracing::error!("submission failed: {err}");
            notifier.error(form.failure_message());
            (workflow.fail(), SubmitOutcome::Failed)
        }
    };

    if let Err(err) = step.and_then(|_| workflow.settle()) {
        tracing::warn!("workflow out of sync: {err}");
    }
    outcome
}

/// Полный цикл отправки: [`prepare`], запрос через `send`, [`finish`].
pub async fn submit<F, T, E, S, Fut>(
    form: &mut F,
    workflow: &mut FormWorkflow,
    notifier: &mut Notifier,
    today: NaiveDate,
    send: S,
) -> SubmitOutcome
where
    F: SubmitForm,
    E: Display,
    S: FnOnce(F::Payload) -> Fut,
    Fut: Future<Output = Result<T, E>>,
{
    let payload = match prepare(form, workflow, notifier, today) {
        Ok(payload) => payload,
        Err(outcome) => return outcome,
    };

    let result = send(payload).await;
    finish(form, workflow, notifier, result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Default)]
    struct NameForm {
        name: String,
    }

    impl SubmitForm for NameForm {
        type Payload = String;

        fn validate(&self, _today: NaiveDate) -> Result<String, ValidationError> {
            crate::validation::require_filled("name", &self.name, "Nama wajib diisi.")
        }

        fn reset(&mut self) {
            self.name.clear();
        }

        fn success_message(&self) -> &'static str {
            "ok"
        }

        fn failure_message(&self) -> &'static str {
            "gagal"
        }
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2026, 10, 19).expect("valid date")
    }

    #[test]
    fn happy_path_walks_all_phases() {
        let mut wf = FormWorkflow::default();
        assert_eq!(wf.phase(), FormPhase::Idle);
        wf.begin_validation().expect("idle -> validating");
        wf.begin_submit().expect("validating -> submitting");
        assert!(wf.is_busy());
        wf.succeed().expect("submitting -> succeeded");
        wf.settle().expect("succeeded -> idle");
        assert_eq!(wf.phase(), FormPhase::Idle);
    }

    #[test]
    fn second_submit_while_submitting_is_busy() {
        let mut wf = FormWorkflow::default();
        wf.begin_validation().expect("idle -> validating");
        wf.begin_submit().expect("validating -> submitting");
        assert_eq!(wf.begin_validation(), Err(WorkflowError::Busy));
    }

    #[test]
    fn succeed_without_submit_is_invalid() {
        let mut wf = FormWorkflow::default();
        assert_eq!(
            wf.succeed(),
            Err(WorkflowError::InvalidTransition {
                from: FormPhase::Idle,
                event: "succeed",
            })
        );
    }

    #[test]
    fn rejected_form_returns_to_idle_with_error_notification() {
        let form = NameForm::default();
        let mut wf = FormWorkflow::default();
        let mut notifier = Notifier::default();

        let outcome = prepare(&form, &mut wf, &mut notifier, today());
        assert!(matches!(outcome, Err(SubmitOutcome::Rejected(_))));
        assert_eq!(wf.phase(), FormPhase::Idle);
        assert_eq!(
            notifier.current().map(|n| n.message.as_str()),
            Some("Nama wajib diisi.")
        );
    }

    #[tokio::test]
    async fn failed_request_keeps_fields() {
        let mut form = NameForm {
            name: "Budi".to_string(),
        };
        let mut wf = FormWorkflow::default();
        let mut notifier = Notifier::default();

        let outcome = submit(&mut form, &mut wf, &mut notifier, today(), |_| async {
            Err::<(), _>("connection refused")
        })
        .await;

        assert_eq!(outcome, SubmitOutcome::Failed);
        assert_eq!(form.name, "Budi");
        assert_eq!(wf.phase(), FormPhase::Idle);
        assert_eq!(notifier.current().map(|n| n.message.as_str()), Some("gagal"));
    }

    #[tokio::test]
    async fn successful_request_resets_fields() {
        let mut form = NameForm {
            name: " Budi ".to_string(),
        };
        let mut wf = FormWorkflow::default();
        let mut notifier = Notifier::default();
        let mut sent = None;

        let outcome = submit(&mut form, &mut wf, &mut notifier, today(), |payload| {
            sent = Some(payload);
            async { Ok::<_, String>(()) }
        })
        .await;

        assert!(outcome.is_sent());
        assert_eq!(sent.as_deref(), Some("Budi"));
        assert!(form.name.is_empty());
        assert!(notifier.current().is_some_and(|n| n.is_success()));
    }
}
