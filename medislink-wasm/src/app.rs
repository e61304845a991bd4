use leptos::ev;
use leptos::prelude::*;

use crate::components::notification_banner::NotificationBanner;
use crate::pages::admin_dashboard::AdminDashboard;
use crate::pages::donation_page::DonationPage;
use crate::pages::home_page::HomePage;
use crate::pages::news_detail_page::NewsDetailPage;
use crate::pages::profile_page::ProfilePage;
use crate::pages::tool_detail_page::ToolDetailPage;
use crate::route::Route;
use crate::signals::follow_route;
use crate::state::{AppState, current_route};

#[component]
pub fn App() -> impl IntoView {
    let state = AppState::new();

    let _hashchange = window_event_listener(ev::hashchange, move |_| {
        follow_route(state.route, current_route());
    });

    view! {
        <main class="app">
            <NotificationBanner state=state />
            {move || match state.route.get() {
                Route::Dashboard => view! { <HomePage state=state /> }.into_any(),
                Route::Donation => view! { <DonationPage state=state /> }.into_any(),
                Route::Tool(id) => view! { <ToolDetailPage state=state id=id /> }.into_any(),
                Route::News(id) => view! { <NewsDetailPage state=state id=id /> }.into_any(),
                Route::Admin => view! { <AdminDashboard state=state /> }.into_any(),
                Route::Profile => view! { <ProfilePage state=state /> }.into_any(),
                Route::Login => {
                    view! {
                        <section class="page login-page">
                            <h1>"Masuk ke MedisLink"</h1>
                            <p>"Silakan masuk melalui portal MedisLink untuk melanjutkan."</p>
                        </section>
                    }
                        .into_any()
                }
            }}
        </main>
    }
}
