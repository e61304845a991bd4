use leptos::ev::SubmitEvent;
use leptos::prelude::*;

use medislink_core::forms::PHOTO_TOO_LARGE;
use medislink_core::{DonationForm, FormWorkflow, ImageAttachment, TOOL_CATEGORIES, UserApi};

use crate::components::image_picker::ImagePicker;
use crate::route::Route;
use crate::state::AppState;
use crate::submit::{redirect_on_success, submit_form};

/// Страница пожертвования инструмента. После успешной отправки через две
/// секунды возвращает в кабинет.
#[component]
pub(crate) fn DonationPage(state: AppState) -> impl IntoView {
    let form = RwSignal::new(DonationForm::default());
    let workflow = RwSignal::new(FormWorkflow::default());
    let today = medislink_core::today().format("%Y-%m-%d").to_string();

    let preview = Signal::derive(move || form.with(|f| f.photo.preview().map(str::to_string)));
    let on_pick = Callback::new(move |attachment: ImageAttachment| {
        state.with_notifier(|notifier| {
            form.update(|f| {
                f.attach_photo(attachment, notifier);
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
            move |payload| async move { api.create_donation(&payload).await },
            move |outcome| redirect_on_success(state, &outcome, Route::Dashboard),
        );
    };

    view! {
        <section class="page donation-page">
            <button class="btn btn-ghost" on:click=move |_| state.navigate(Route::Dashboard)>
                "← Kembali"
            </button>
            <h1>"Donasi Alat Medis"</h1>
            <p>"Bantu sesama dengan mendonasikan alat medis yang tidak lagi Anda gunakan."</p>

            <form class="donation-form" on:submit=on_submit>
                <label>
                    "Nama Alat"
                    <input
                        placeholder="Contoh: Kursi Roda Lipat"
                        prop:value=move || form.with(|f| f.tool_name.clone())
                        on:input=move |ev| form.update(|f| f.tool_name = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Kategori"
                    <select
                        prop:value=move || form.with(|f| f.category.clone())
                        on:change=move |ev| form.update(|f| f.category = event_target_value(&ev))
                    >
                        {TOOL_CATEGORIES
                            .into_iter()
                            .map(|category| view! { <option value=category>{category}</option> })
                            .collect_view()}
                    </select>
                </label>
                <label>
                    "Jumlah (Unit)"
                    <input
                        type="number"
                        min="1"
                        prop:value=move || form.with(|f| f.quantity.clone())
                        on:input=move |ev| form.update(|f| f.quantity = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Deskripsi Kondisi & Spesifikasi"
                    <textarea
                        placeholder="Jelaskan kondisi alat, merek, tahun pembelian, dll."
                        prop:value=move || form.with(|f| f.description.clone())
                        on:input=move |ev| form.update(|f| f.description = event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Alamat Penjemputan"
                    <textarea
                        prop:value=move || form.with(|f| f.pickup_address.clone())
                        on:input=move |ev| form.update(|f| f.pickup_address = event_target_value(&ev))
                    ></textarea>
                </label>
                <label>
                    "Tanggal Penjemputan"
                    <input
                        type="date"
                        min=today
                        prop:value=move || form.with(|f| f.pickup_date.clone())
                        on:input=move |ev| form.update(|f| f.pickup_date = event_target_value(&ev))
                    />
                </label>
                <label>
                    "Foto Alat"
                    <ImagePicker
                        state=state
                        preview=preview
                        too_large=PHOTO_TOO_LARGE
                        on_pick=on_pick
                    />
                </label>

                <button
                    type="submit"
                    class="btn btn-primary"
                    disabled=move || workflow.with(FormWorkflow::is_busy)
                >
                    {move || {
                        if workflow.with(FormWorkflow::is_busy) {
                            "Mengirim..."
                        } else {
                            "Kirim Donasi"
                        }
                    }}
                </button>
            </form>
        </section>
    }
}
