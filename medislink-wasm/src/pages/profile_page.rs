use leptos::prelude::*;
use leptos::task::spawn_local;

use medislink_core::{Loadable, UserApi, UserProfile};

use crate::route::Route;
use crate::state::AppState;

/// Данные текущего пользователя и статус верификации. Редактирование
/// профиля выполняется на стороне сервера.
#[component]
pub(crate) fn ProfilePage(state: AppState) -> impl IntoView {
    let profile = RwSignal::new(Loadable::<UserProfile>::Loading);

    spawn_local(async move {
        let api = state.api();
        profile.set(Loadable::from_fetch("profile", api.current_profile().await));
    });

    view! {
        <section class="page profile-page">
            {move || match profile.get() {
                Loadable::Loading => view! { <p class="loading">"Memuat profil..."</p> }.into_any(),
                Loadable::NotFound => {
                    view! {
                        <div class="not-found">
                            <h2>"Profil tidak tersedia"</h2>
                            <button class="btn btn-primary" on:click=move |_| state.navigate(Route::Login)>
                                "Masuk"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Loadable::Ready(user) => {
                    let is_admin = user.is_admin();
                    let status = if user.is_verified() {
                        "Terverifikasi"
                    } else {
                        "Belum diverifikasi: NIK dan foto KTP wajib diisi."
                    };
                    view! {
                        <div class="profile-card">
                            <h1>{user.name.clone()}</h1>
                            <p class="role">{user.role.clone()}</p>
                            <p>"NIK: " {user.nik.clone().unwrap_or_else(|| "-".to_string())}</p>
                            <p class="verification">{status}</p>
                            <Show when=move || is_admin>
                                <button class="btn btn-outline" on:click=move |_| state.navigate(Route::Admin)>
                                    "Buka Admin Dashboard"
                                </button>
                            </Show>
                        </div>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
