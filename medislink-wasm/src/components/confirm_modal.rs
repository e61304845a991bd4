use leptos::prelude::*;
use medislink_core::{AdminAction, DialogTone};

use crate::state::AppState;

/// Единственный диалог подтверждения. Действие уходит в `on_confirm` только
/// после нажатия «Ya, Lanjutkan».
#[component]
pub(crate) fn ConfirmModal(state: AppState, on_confirm: Callback<AdminAction>) -> impl IntoView {
    let on_cancel = move |_| state.gate.update(|gate| gate.cancel());
    let on_accept = move |_| {
        if let Some(action) = state.gate.try_update(|gate| gate.confirm()).flatten() {
            on_confirm.run(action);
        }
    };

    view! {
        {move || {
            state
                .gate
                .with(|gate| {
                    gate.pending()
                        .map(|request| (request.title.clone(), request.message.clone(), request.tone))
                })
                .map(|(title, message, tone)| {
                    let button_class = match tone {
                        DialogTone::Danger => "btn btn-danger",
                        DialogTone::Warning => "btn btn-warning",
                    };
                    view! {
                        <div class="modal-backdrop">
                            <div class="modal" role="dialog">
                                <h3>{title}</h3>
                                <p>{message}</p>
                                <div class="modal-actions">
                                    <button class="btn btn-ghost" on:click=on_cancel>
                                        "Batal"
                                    </button>
                                    <button class=button_class on:click=on_accept>
                                        "Ya, Lanjutkan"
                                    </button>
                                </div>
                            </div>
                        </div>
                    }
                })
        }}
    }
}
