use leptos::prelude::*;
use leptos::task::spawn_local;

use medislink_core::{AdminApi, News, Tool};

use crate::route::Route;
use crate::state::AppState;

/// Кабинет пользователя: каталог инструментов и последние новости.
#[component]
pub(crate) fn HomePage(state: AppState) -> impl IntoView {
    let tools = RwSignal::new(Vec::<Tool>::new());
    let news = RwSignal::new(Vec::<News>::new());
    let loading = RwSignal::new(true);

    spawn_local(async move {
        let api = state.api();
        let (tool_list, news_list) = futures::join!(api.list_tools(), api.list_news());
        match tool_list {
            Ok(list) => tools.set(list),
            Err(err) => {
                leptos::logging::error!("failed to load tools: {err}");
                state.notify_error("Gagal memuat daftar alat.");
            }
        }
        match news_list {
            Ok(list) => news.set(list),
            Err(err) => leptos::logging::error!("failed to load news: {err}"),
        }
        loading.set(false);
    });

    view! {
        <section class="page home-page">
            <header class="home-header">
                <h1>"MedisLink"</h1>
                <button class="btn btn-primary" on:click=move |_| state.navigate(Route::Donation)>
                    "Donasikan Alat"
                </button>
            </header>

            <h2>"Katalog Alat Medis"</h2>
            <Show when=move || !loading.get() fallback=|| view! { <p class="loading">"Memuat..."</p> }>
                <div class="tool-grid">
                    <For
                        each=move || tools.get()
                        key=|tool| tool.id
                        children=move |tool| {
                            let id = tool.id;
                            let stock = if tool.in_stock() {
                                format!("Stok: {}", tool.stock)
                            } else {
                                "Stok habis".to_string()
                            };
                            view! {
                                <article class="tool-card" on:click=move |_| state.navigate(Route::Tool(id))>
                                    <h3>{tool.name}</h3>
                                    <p>{tool.category}</p>
                                    <span class="badge">{stock}</span>
                                </article>
                            }
                        }
                    />
                </div>
            </Show>

            <h2>"Berita Terbaru"</h2>
            <ul class="news-list">
                <For
                    each=move || news.get()
                    key=|item| item.id
                    children=move |item| {
                        let id = item.id;
                        view! {
                            <li on:click=move |_| state.navigate(Route::News(id))>
                                <strong>{item.title.clone()}</strong>
                                {item.display_date().map(|date| view! { <small>" · " {date}</small> })}
                            </li>
                        }
                    }
                />
            </ul>
        </section>
    }
}
