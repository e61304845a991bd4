use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use medislink_core::forms::PHOTO_TOO_LARGE;
use medislink_core::{AdminApi, FormWorkflow, ImageAttachment, TOOL_CATEGORIES, ToolForm};

use crate::components::image_picker::ImagePicker;
use crate::state::AppState;
use crate::submit::submit_form;

/// Состояния инструмента: значение для сервера и подпись.
pub(crate) const CONDITIONS: [(&str, &str); 3] = [
    ("baik", "Baik"),
    ("rusak ringan", "Rusak Ringan"),
    ("perlu perbaikan", "Perlu Perbaikan"),
];

/// Модальное окно добавления инструмента; после успеха закрывается само.
#[component]
pub(crate) fn AddToolModal(
    state: AppState,
    open: RwSignal<bool>,
    on_success: Callback<()>,
) -> impl IntoView {
    let form = RwSignal::new(ToolForm::default());
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
            move |payload| async move { api.create_tool(&payload).await },
            move |outcome| {
                if outcome.is_sent() {
                    open.set(false);
                    on_success.run(());
                }
            },
        );
    };

    view! {
        <Show when=move || open.get()>
            <div class="modal-backdrop">
                <form class="modal admin-form" on:submit=on_submit>
                    <h3>"Tambah Alat Medis"</h3>
                    <input
                        placeholder="Nama alat"
                        prop:value=move || form.with(|f| f.name.clone())
                        on:input=move |ev| form.update(|f| f.name = event_target_value(&ev))
                    />
                    <select
                        prop:value=move || form.with(|f| f.category.clone())
                        on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    >
                        {TOOL_CATEGORIES
                            .into_iter()
                            .map(|category| view! { <option value=category>{category}</option> })
                            .collect_view()}
                    </select>
                    <input
                        placeholder="Tipe"
                        prop:value=move || form.with(|f| f.kind.clone())
                        on:input=move |ev| form.update(|f| f.kind = event_target_value(&ev))
                    />
                    <input
                        placeholder="Ukuran"
                        prop:value=move || form.with(|f| f.size.clone())
                        on:input=move |ev| form.update(|f| f.size = event_target_value(&ev))
                    />
                    <textarea
                        placeholder="Deskripsi"
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                    <input
                        placeholder="Dimensi"
                        prop:value=move || form.with(|f| f.dimensions.clone())
                        on:input=move |ev| form.update(|f| f.dimensions = event_target_value(&ev))
                    />
                    <input
                        placeholder="Kapasitas beban"
                        prop:value=move || form.with(|f| f.weight_cap.clone())
                        on:input=move |ev| form.update(|f| f.weight_cap = event_target_value(&ev))
                    />
                    <select
                        prop:value=move || form.with(|f| f.condition.clone())
                        on:change=move |ev| form.update(|f| f.condition = event_target_value(&ev))
                    >
                        {CONDITIONS
                            .into_iter()
                            .map(|(value, label)| view! { <option value=value>{label}</option> })
                            .collect_view()}
                    </select>
                    <input
                        type="number"
                        min="0"
                        placeholder="Stok"
                        prop:value=move || form.with(|f| f.stock.clone())
                        on:input=move |ev| form.update(|f| f.stock = event_target_value(&ev))
                    />
                    <ImagePicker
                        state=state
                        preview=preview
                        too_large=PHOTO_TOO_LARGE
                        on_pick=on_pick
                    />
                    <div class="modal-actions">
                        <button type="button" class="btn btn-ghost" on:click=move |_| open.set(false)>
                            "Batal"
                        </button>
                        <button
                            type="submit"
                            class="btn btn-primary"
                            disabled=move || workflow.with(FormWorkflow::is_busy)
                        >
                            "Simpan"
                        </button>
                    </div>
                </form>
            </div>
        </Show>
    }
}
