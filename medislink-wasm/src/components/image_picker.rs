use leptos::prelude::*;
use leptos::task::spawn_local;
use wasm_bindgen_futures::JsFuture;
use web_sys::{File, HtmlInputElement};

use medislink_core::ImageAttachment;
use medislink_core::image::check_image_size;

use crate::state::AppState;

async fn read_file(file: File) -> Result<ImageAttachment, String> {
    let buffer = JsFuture::from(file.array_buffer())
        .await
        .map_err(|err| format!("{err:?}"))?;
    let bytes = js_sys::Uint8Array::new(&buffer).to_vec();
    Ok(ImageAttachment::new(file.name(), Some(&file.type_()), bytes))
}

/// Поле выбора картинки с превью.
///
/// Размер проверяется до чтения файла; прочитанный файл уходит в `on_pick`.
#[component]
pub(crate) fn ImagePicker(
    state: AppState,
    #[prop(into)] preview: Signal<Option<String>>,
    too_large: &'static str,
    on_pick: Callback<ImageAttachment>,
) -> impl IntoView {
    // Живёт, пока поле на странице; `on_pick` родителя живёт не меньше.
    let mounted = StoredValue::new(());

    let on_change = move |ev: leptos::ev::Event| {
        let input = event_target::<HtmlInputElement>(&ev);
        let Some(file) = input.files().and_then(|files| files.get(0)) else {
            return;
        };

        if let Err(err) = check_image_size("image", file.size() as u64, too_large) {
            state.notify_error(err.message);
            input.set_value("");
            return;
        }

        spawn_local(async move {
            match read_file(file).await {
                Ok(attachment) if !mounted.is_disposed() => on_pick.run(attachment),
                Ok(_) => {}
                Err(err) => {
                    leptos::logging::error!("failed to read image: {err}");
                    state.notify_error("Gagal membaca file gambar.");
                }
            }
        });
    };

    view! {
        <div class="image-picker">
            <input type="file" accept="image/*" on:change=on_change />
            {move || {
                preview
                    .get()
                    .map(|src| view! { <img class="image-preview" src=src alt="Preview" /> })
            }}
        </div>
    }
}
