use leptos::prelude::*;
use leptos::task::spawn_local;

use medislink_core::detail::load_news;
use medislink_core::{Id, Loadable, News};

use crate::route::Route;
use crate::state::AppState;

#[component]
pub(crate) fn NewsDetailPage(state: AppState, id: Id) -> impl IntoView {
    let news = RwSignal::new(Loadable::<News>::Loading);

    spawn_local(async move {
        let api = state.api();
        news.set(load_news(&api, id).await);
    });

    view! {
        <section class="page news-detail-page">
            {move || match news.get() {
                Loadable::Loading => view! { <p class="loading">"Memuat berita..."</p> }.into_any(),
                Loadable::NotFound => {
                    view! {
                        <div class="not-found">
                            <h2>"Berita tidak ditemukan"</h2>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| state.navigate(Route::Dashboard)
                            >
                                "Kembali ke Beranda"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Loadable::Ready(item) => {
                    view! {
                        <article class="news-article">
                            <button
                                class="btn btn-ghost"
                                on:click=move |_| state.navigate(Route::Dashboard)
                            >
                                "← Kembali"
                            </button>
                            <img class="news-cover" src=item.cover_url().to_string() alt=item.title.clone() />
                            <h1>{item.title.clone()}</h1>
                            {item.display_date().map(|date| view! { <p class="news-date">{date}</p> })}
                            <div class="news-content">{item.content.clone()}</div>
                        </article>
                    }
                        .into_any()
                }
            }}
        </section>
    }
}
