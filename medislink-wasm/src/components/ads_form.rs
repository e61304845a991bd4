use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use medislink_core::{AdForm, AdminApi, FormWorkflow};

use crate::state::AppState;
use crate::submit::submit_form;

#[component]
pub(crate) fn AdEditor(state: AppState, on_success: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(AdForm::default());
    let workflow = RwSignal::new(FormWorkflow::default());

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = state.api();
        submit_form(
            state,
            form,
            workflow,
            move |payload| async move { api.create_ad(&payload).await },
            move |outcome| {
                if outcome.is_sent() {
                    on_success.run(());
                }
            },
        );
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            <h3>"Tambah Iklan Slider"</h3>
            <input
                placeholder="Judul iklan"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
            <input
                placeholder="Deskripsi singkat"
                prop:value=move || form.with(|f| f.description.clone())
                on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
            />
            <input
                placeholder="URL gambar"
                prop:value=move || form.with(|f| f.image_url.clone())
                on:input=move |ev| form.update(|f| f.image_url = event_target_value(&ev))
            />
            <input
                placeholder="Link tujuan"
                prop:value=move || form.with(|f| f.link.clone())
                on:input=move |ev| form.update(|f| f.link = event_target_value(&ev))
            />
            {move || {
                let url = form.with(|f| f.image_url.trim().to_string());
                (!url.is_empty()).then(|| view! { <img class="image-preview" src=url alt="Preview" /> })
            }}
            <button type="submit" disabled=move || workflow.with(FormWorkflow::is_busy)>
                "Simpan Iklan"
            </button>
        </form>
    }
}
