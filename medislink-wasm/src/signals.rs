//! Запись в сигналы, владелец которых мог уже размонтироваться.
//!
//! Ответ сервера приходит асинхронно: пока запрос в пути, пользователь может
//! уйти со страницы, и сигналы формы к этому моменту уже освобождены.

use std::fmt::Display;

use leptos::prelude::*;
use medislink_core::Notifier;
use medislink_core::workflow::{self, FormWorkflow, SubmitForm, SubmitOutcome};

use crate::route::Route;

/// Применяет результат запроса к форме и её сценарию.
///
/// `snapshot` хранит форму и сценарий на момент отправки. Если сигналы уже
/// освобождены, `finish` выполняется над снимком: уведомление всё равно
/// показывается, а вместо итога возвращается `None`.
pub(crate) fn settle_submission<F, T, E>(
    form: RwSignal<F>,
    workflow: RwSignal<FormWorkflow>,
    snapshot: (F, FormWorkflow),
    notifier: &mut Notifier,
    result: Result<T, E>,
) -> Option<SubmitOutcome>
where
    F: SubmitForm + Clone + Send + Sync + 'static,
    E: Display,
{
    let (form_snapshot, workflow_snapshot) = snapshot;
    let live = form.try_get_untracked().zip(workflow.try_get_untracked());
    let mounted = live.is_some();
    let (mut current, mut wf) = live.unwrap_or((form_snapshot, workflow_snapshot));

    let outcome = workflow::finish(&mut current, &mut wf, notifier, result);
    if !mounted {
        return None;
    }

    form.try_set(current);
    workflow.try_set(wf);
    Some(outcome)
}

/// Переключает маршрут, только если он действительно сменился.
pub(crate) fn follow_route(route: RwSignal<Route>, next: Route) -> bool {
    match route.try_get_untracked() {
        Some(current) if current != next => {
            route.set(next);
            true
        }
        _ => false,
    }
}
