use std::future::Future;

use leptos::prelude::*;
use leptos::task::spawn_local;
use medislink_core::workflow::{self, FormWorkflow, SubmitForm, SubmitOutcome};

use crate::api::ApiError;
use crate::route::Route;
use crate::signals::settle_submission;
use crate::state::AppState;

/// Прогоняет форму из сигнала через сценарий отправки.
///
/// Проверки выполняются сразу; запрос уходит в `spawn_local`, а по его
/// завершении вызывается `on_done` с итогом, если форма ещё на странице.
pub(crate) fn submit_form<F, S, Fut>(
    state: AppState,
    form: RwSignal<F>,
    workflow: RwSignal<FormWorkflow>,
    send: S,
    on_done: impl FnOnce(SubmitOutcome) + 'static,
) where
    F: SubmitForm + Clone + Send + Sync + 'static,
    F::Payload: 'static,
    S: FnOnce(F::Payload) -> Fut + 'static,
    Fut: Future<Output = Result<(), ApiError>> + 'static,
{
    let today = medislink_core::today();
    let prepared = state.with_notifier(|notifier| {
        let mut wf = workflow.get_untracked();
        let prepared =
            form.with_untracked(|form| workflow::prepare(form, &mut wf, notifier, today));
        workflow.set(wf);
        prepared.map(|payload| (payload, (form.get_untracked(), wf)))
    });

    let (payload, snapshot) = match prepared {
        Ok(prepared) => prepared,
        Err(outcome) => return on_done(outcome),
    };

    spawn_local(async move {
        let result = send(payload).await;
        let outcome = state.with_notifier(|notifier| {
            settle_submission(form, workflow, snapshot, notifier, result)
        });
        // Компонент уже размонтирован: его колбэки трогать нельзя.
        if let Some(outcome) = outcome {
            on_done(outcome);
        }
    });
}

/// После успешной отправки уводит на `route` с задержкой, которую задала форма.
pub(crate) fn redirect_on_success(state: AppState, outcome: &SubmitOutcome, route: Route) {
    if let SubmitOutcome::Sent {
        redirect_after: Some(delay),
    } = outcome
    {
        set_timeout(move || state.navigate(route), *delay);
    }
}
