use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use medislink_core::forms::NEWS_IMAGE_TOO_LARGE;
use medislink_core::{AdminApi, FormWorkflow, ImageAttachment, NewsForm};

use crate::components::image_picker::ImagePicker;
use crate::state::AppState;
use crate::submit::submit_form;

#[component]
pub(crate) fn NewsEditor(state: AppState, on_success: Callback<()>) -> impl IntoView {
    let form = RwSignal::new(NewsForm::default());
    let workflow = RwSignal::new(FormWorkflow::default());

    let preview = Signal::derive(move || form.with(|f| f.image.preview().map(str::to_string)));
    let on_pick = Callback::new(move |attachment: ImageAttachment| {
        state.with_notifier(|notifier| {
            form.update(|f| {
                f.attach_image(attachment, notifier);
            })
        });
    });

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = state.api();
        submit_form(
            state,
            form,
            workflow,
            move |payload| async move { api.create_news(&payload).await },
            move |outcome| {
                if outcome.is_sent() {
                    on_success.run(());
                }
            },
        );
    };

    view! {
        <form class="admin-form" on:submit=on_submit>
            <h3>"Tulis Berita Baru"</h3>
            <input
                placeholder="Judul berita"
                prop:value=move || form.with(|f| f.title.clone())
                on:input=move |ev| form.update(|f| f.title = event_target_value(&ev))
            />
            <textarea
                placeholder="Isi berita"
                prop:value=move || form.with(|f| f.content.clone())
                on:input=move |ev| form.update(|f| f.content = event_target_value(&ev))
            ></textarea>
            <ImagePicker
                state=state
                preview=preview
                too_large=NEWS_IMAGE_TOO_LARGE
                on_pick=on_pick
            />
            <button type="submit" disabled=move || workflow.with(FormWorkflow::is_busy)>
                {move || {
                    if workflow.with(FormWorkflow::is_busy) { "Mengirim..." } else { "Publikasikan" }
                }}
            </button>
        </form>
    }
}
