//! Админ-панель: вкладки с коллекциями и действия через диалог подтверждения.

use leptos::prelude::*;
use leptos::task::spawn_local;

use medislink_core::dashboard::{fetch_all, perform};
use medislink_core::models::format_indonesian_date;
use medislink_core::{
    AdminAction, AdminTab, Dashboard, Donation, DonationStatus, Followup, Loan, LoanStatus,
    UserApi,
};

use crate::components::add_tool_form::{AddToolModal, CONDITIONS};
use crate::components::ads_form::AdEditor;
use crate::components::confirm_modal::ConfirmModal;
use crate::components::news_form::NewsEditor;
use crate::state::AppState;

/// Перезагружает коллекции; при первой загрузке параллельно тянет профиль.
fn reload(state: AppState, dashboard: RwSignal<Dashboard>, with_profile: bool) {
    dashboard.update(|d| d.loading = true);

    spawn_local(async move {
        let api = state.api();
        let data = if with_profile {
            let (data, profile) = futures::join!(fetch_all(&api), api.current_profile());
            dashboard.update(|d| d.apply_profile(profile));
            data
        } else {
            fetch_all(&api).await
        };
        state.with_notifier(|notifier| dashboard.update(|d| d.apply_fetch(data, notifier)));
    });
}

fn loan_step_label(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Approved => "Setujui",
        LoanStatus::Rejected => "Tolak",
        LoanStatus::Active => "Serahkan Barang",
        LoanStatus::Completed => "Barang Kembali",
        LoanStatus::Pending => "Pending",
    }
}

fn date_or_dash(date: Option<chrono::NaiveDate>) -> String {
    date.map(format_indonesian_date)
        .unwrap_or_else(|| "-".to_string())
}

#[component]
pub(crate) fn AdminDashboard(state: AppState) -> impl IntoView {
    let dashboard = RwSignal::new(Dashboard::default());
    let tool_modal_open = RwSignal::new(false);

    reload(state, dashboard, true);

    let on_confirm = Callback::new(move |action: AdminAction| {
        spawn_local(async move {
            let api = state.api();
            let result = perform(&api, &action).await;
            let followup = state.with_notifier(|notifier| {
                dashboard
                    .try_update(|d| d.apply_action(&action, result, notifier))
                    .flatten()
            });

            match followup {
                Some(Followup::Refetch) => reload(state, dashboard, false),
                Some(Followup::SignOut) => state.sign_out(),
                Some(Followup::RemoveTool(_)) | None => {}
            }
        });
    });
    let refetch = Callback::new(move |_: ()| reload(state, dashboard, false));
    let ask = Callback::new(move |action: AdminAction| state.ask(action.into_request()));

    let tab_button = move |tab: AdminTab| {
        view! {
            <button
                class=move || {
                    if dashboard.with(|d| d.tab == tab) { "tab tab-active" } else { "tab" }
                }
                on:click=move |_| dashboard.update(|d| d.tab = tab)
            >
                {move || dashboard.with(|d| tab.label(&d.data))}
            </button>
        }
    };

    view! {
        <section class="page admin-dashboard">
            <header class="admin-header">
                <div>
                    <h1>"Admin Dashboard"</h1>
                    <p>
                        {move || dashboard.with(|d| d.header_name().to_string())}
                        <span class="role">{move || dashboard.with(|d| d.header_role().to_string())}</span>
                    </p>
                </div>
                <button class="btn btn-danger" on:click=move |_| ask.run(AdminAction::Logout)>
                    "Keluar"
                </button>
            </header>

            <nav class="tabs">
                {AdminTab::ALL.into_iter().map(tab_button).collect_view()}
            </nav>

            <Show when=move || !dashboard.with(|d| d.loading) fallback=|| view! { <p class="loading">"Memuat data..."</p> }>
                {move || match dashboard.with(|d| d.tab) {
                    AdminTab::Loans => view! { <LoansTab dashboard=dashboard ask=ask /> }.into_any(),
                    AdminTab::Inventory => {
                        view! {
                            <InventoryTab dashboard=dashboard ask=ask open_modal=tool_modal_open />
                        }
                            .into_any()
                    }
                    AdminTab::News => {
                        view! {
                            <NewsEditor state=state on_success=refetch />
                            <NewsTab dashboard=dashboard />
                        }
                            .into_any()
                    }
                    AdminTab::Ads => {
                        view! {
                            <AdEditor state=state on_success=refetch />
                            <AdsTab dashboard=dashboard ask=ask />
                        }
                            .into_any()
                    }
                    AdminTab::Donations => view! { <DonationsTab dashboard=dashboard ask=ask /> }.into_any(),
                }}
            </Show>

            <AddToolModal state=state open=tool_modal_open on_success=refetch />
            <ConfirmModal state=state on_confirm=on_confirm />
        </section>
    }
}

#[component]
fn LoansTab(
    dashboard: RwSignal<Dashboard>,
    ask: Callback<AdminAction>,
) -> impl IntoView {
    view! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>"Alat"</th>
                    <th>"Peminjam"</th>
                    <th>"Tanggal"</th>
                    <th>"Kondisi Medis"</th>
                    <th>"Status"</th>
                    <th>"Aksi"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || dashboard.with(|d| d.data.loans.clone())
                    key=|loan| (loan.id, loan.status)
                    children=move |loan: Loan| {
                        let id = loan.id;
                        let steps = loan
                            .status
                            .next_steps()
                            .iter()
                            .map(|&status| {
                                view! {
                                    <button
                                        class="btn btn-sm"
                                        on:click=move |_| ask.run(AdminAction::UpdateLoanStatus { id, status })
                                    >
                                        {loan_step_label(status)}
                                    </button>
                                }
                            })
                            .collect_view();
                        view! {
                            <tr>
                                <td>{loan.tool_name.unwrap_or_else(|| format!("#{}", loan.tool_id))}</td>
                                <td>{loan.borrower_name.unwrap_or_else(|| "-".to_string())}</td>
                                <td>
                                    {date_or_dash(loan.loan_date)} " – " {date_or_dash(loan.return_due)}
                                </td>
                                <td>{loan.medical_condition}</td>
                                <td>
                                    <span class="badge">{loan.status.as_str()}</span>
                                </td>
                                <td>{steps}</td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn InventoryTab(
    dashboard: RwSignal<Dashboard>,
    ask: Callback<AdminAction>,
    open_modal: RwSignal<bool>,
) -> impl IntoView {
    view! {
        <div class="tab-toolbar">
            <button class="btn btn-primary" on:click=move |_| open_modal.set(true)>
                "+ Tambah Alat"
            </button>
        </div>
        <table class="admin-table">
            <thead>
                <tr>
                    <th>"Nama"</th>
                    <th>"Kategori"</th>
                    <th>"Kondisi"</th>
                    <th>"Stok"</th>
                    <th>"Aksi"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || dashboard.with(|d| d.data.tools.clone())
                    key=|tool| tool.id
                    children=move |tool| {
                        let id = tool.id;
                        let condition = tool.condition_label();
                        view! {
                            <tr>
                                <td>{tool.name}</td>
                                <td>{tool.category}</td>
                                <td>{condition}</td>
                                <td>{tool.stock}</td>
                                <td>
                                    <button
                                        class="btn btn-sm btn-danger"
                                        on:click=move |_| ask.run(AdminAction::DeleteTool(id))
                                    >
                                        "Hapus"
                                    </button>
                                </td>
                            </tr>
                        }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn NewsTab(dashboard: RwSignal<Dashboard>) -> impl IntoView {
    view! {
        <ul class="admin-list">
            <For
                each=move || dashboard.with(|d| d.data.news.clone())
                key=|item| item.id
                children=move |item| {
                    view! {
                        <li>
                            <strong>{item.title.clone()}</strong>
                            {item.display_date().map(|date| view! { <small>" · " {date}</small> })}
                        </li>
                    }
                }
            />
        </ul>
    }
}

#[component]
fn AdsTab(
    dashboard: RwSignal<Dashboard>,
    ask: Callback<AdminAction>,
) -> impl IntoView {
    view! {
        <div class="ad-grid">
            <For
                each=move || dashboard.with(|d| d.data.ads.clone())
                key=|ad| ad.id
                children=move |ad| {
                    let id = ad.id;
                    view! {
                        <div class="ad-card">
                            <img src=ad.image_url alt=ad.title.clone() />
                            <h4>{ad.title}</h4>
                            <p>{ad.description}</p>
                            <a href=ad.link target="_blank">"Link"</a>
                            <button class="btn btn-sm btn-danger" on:click=move |_| ask.run(AdminAction::DeleteAd(id))>
                                "Hapus"
                            </button>
                        </div>
                    }
                }
            />
        </div>
    }
}

#[component]
fn DonationsTab(
    dashboard: RwSignal<Dashboard>,
    ask: Callback<AdminAction>,
) -> impl IntoView {
    view! {
        <table class="admin-table">
            <thead>
                <tr>
                    <th>"Foto"</th>
                    <th>"Alat"</th>
                    <th>"Jumlah"</th>
                    <th>"Penjemputan"</th>
                    <th>"Status"</th>
                    <th>"Aksi"</th>
                </tr>
            </thead>
            <tbody>
                <For
                    each=move || dashboard.with(|d| d.data.donations.clone())
                    key=|donation| (donation.id, donation.status)
                    children=move |donation: Donation| {
                        view! { <DonationRow donation=donation ask=ask /> }
                    }
                />
            </tbody>
        </table>
    }
}

#[component]
fn DonationRow(
    donation: Donation,
    ask: Callback<AdminAction>,
) -> impl IntoView {
    let id = donation.id;
    let condition = RwSignal::new(CONDITIONS[0].0.to_string());

    let actions = match donation.status {
        DonationStatus::Pending => {
            view! {
                <button class="btn btn-sm btn-warning" on:click=move |_| ask.run(AdminAction::ReceiveDonation(id))>
                    "Terima Barang"
                </button>
            }
                .into_any()
        }
        DonationStatus::Received => {
            view! {
                <select
                    prop:value=move || condition.get()
                    on:change=move |ev| condition.set(event_target_value(&ev))
                >
                    {CONDITIONS
                        .into_iter()
                        .map(|(value, label)| view! { <option value=value>{label}</option> })
                        .collect_view()}
                </select>
                <button
                    class="btn btn-sm btn-primary"
                    on:click=move |_| {
                        ask.run(AdminAction::ApproveDonation {
                            id,
                            condition: condition.get_untracked(),
                        })
                    }
                >
                    "Masukkan ke Inventaris"
                </button>
            }
                .into_any()
        }
        DonationStatus::Approved => view! { <span class="muted">"Selesai"</span> }.into_any(),
    };

    view! {
        <tr>
            <td>
                {donation
                    .image_url
                    .clone()
                    .map(|src| view! { <img class="thumb" src=src alt=donation.tool_name.clone() /> })}
            </td>
            <td>
                <strong>{donation.tool_name.clone()}</strong>
                <small>{donation.category.clone()}</small>
            </td>
            <td>{donation.quantity}</td>
            <td>
                {date_or_dash(donation.pickup_date)}
                <small>{donation.pickup_address.clone()}</small>
            </td>
            <td>
                <span class="badge">{donation.status.as_str()}</span>
            </td>
            <td>{actions}</td>
        </tr>
    }
}
