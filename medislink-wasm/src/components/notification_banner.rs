use leptos::prelude::*;

use crate::state::AppState;

#[component]
pub(crate) fn NotificationBanner(state: AppState) -> impl IntoView {
    let current = move || state.notifier.with(|notifier| notifier.current().cloned());

    view! {
        {move || {
            current()
                .map(|notification| {
                    let class = if notification.is_success() {
                        "toast toast-success"
                    } else {
                        "toast toast-error"
                    };
                    view! {
                        <div class=class role="status">
                            <span>{notification.message}</span>
                            <button
                                class="toast-close"
                                on:click=move |_| state.notifier.update(|notifier| notifier.clear())
                            >
                                "×"
                            </button>
                        </div>
                    }
                })
        }}
    }
}
