use chrono::NaiveDate;
use leptos::ev::SubmitEvent;
use leptos::prelude::*;
use leptos::task::spawn_local;

use medislink_core::detail::{VERIFICATION_REQUIRED, load_tool_page};
use medislink_core::{FormWorkflow, Id, Loadable, LoanForm, Tool, ToolPage, UserApi};

use crate::route::Route;
use crate::state::AppState;
use crate::submit::{redirect_on_success, submit_form};

fn iso(date: NaiveDate) -> String {
    date.format("%Y-%m-%d").to_string()
}

#[component]
pub(crate) fn ToolDetailPage(state: AppState, id: Id) -> impl IntoView {
    let page = RwSignal::new(Loadable::<ToolPage>::Loading);

    spawn_local(async move {
        let api = state.api();
        page.set(load_tool_page(&api, id).await);
    });

    view! {
        <section class="page tool-detail-page">
            <button class="btn btn-ghost" on:click=move |_| state.navigate(Route::Dashboard)>
                "← Kembali ke Dashboard"
            </button>
            {move || match page.get() {
                Loadable::Loading => view! { <p class="loading">"Memuat data alat..."</p> }.into_any(),
                Loadable::NotFound => {
                    view! {
                        <div class="not-found">
                            <h2>"Alat tidak ditemukan"</h2>
                            <button
                                class="btn btn-primary"
                                on:click=move |_| state.navigate(Route::Dashboard)
                            >
                                "Kembali ke Dashboard"
                            </button>
                        </div>
                    }
                        .into_any()
                }
                Loadable::Ready(loaded) => view! { <ToolDetails state=state page=loaded /> }.into_any(),
            }}
        </section>
    }
}

#[component]
fn ToolDetails(state: AppState, page: ToolPage) -> impl IntoView {
    let verified = page.can_request_loan();
    let loan_form = page.loan_form();
    let tool = page.tool;

    view! {
        <div class="tool-detail">
            <ToolInfo tool=tool />
            {if verified {
                view! { <LoanPanel state=state form=loan_form /> }.into_any()
            } else {
                view! {
                    <div class="verification-required">
                        <h3>{VERIFICATION_REQUIRED}</h3>
                        <p>"Lengkapi NIK dan foto KTP sebelum mengajukan peminjaman."</p>
                        <button class="btn btn-outline" on:click=move |_| state.navigate(Route::Profile)>
                            "Lengkapi Data Diri"
                        </button>
                    </div>
                }
                    .into_any()
            }}
        </div>
    }
}

#[component]
fn ToolInfo(tool: Tool) -> impl IntoView {
    let condition_class = if tool.is_good_condition() {
        "badge badge-good"
    } else {
        "badge badge-warn"
    };
    let stock_text = if tool.in_stock() {
        format!("Stok tersedia: {}", tool.stock)
    } else {
        "Stok habis".to_string()
    };
    let picture = match tool.image_url.clone().filter(|url| !url.trim().is_empty()) {
        Some(url) => view! { <img class="tool-image" src=url alt=tool.name.clone() /> }.into_any(),
        None => view! { <div class="tool-placeholder">{tool.initial()}</div> }.into_any(),
    };

    view! {
        <div class="tool-info">
            {picture}
            <h1>{tool.name.clone()}</h1>
            <p class="category">{tool.category.clone()}</p>
            <div class="badges">
                <span class="badge">{tool.kind.clone()}</span>
                <span class="badge">{tool.size.clone()}</span>
            </div>
            <p>{tool.description_or_default().to_string()}</p>
            <dl>
                <dt>"Dimensi"</dt>
                <dd>{tool.dimensions_or_dash().to_string()}</dd>
                <dt>"Kapasitas Beban"</dt>
                <dd>{tool.weight_cap_or_dash().to_string()}</dd>
                <dt>"Kondisi"</dt>
                <dd>
                    <span class=condition_class>{tool.condition_label()}</span>
                </dd>
            </dl>
            <p class="stock">{stock_text}</p>
        </div>
    }
}

#[component]
fn LoanPanel(state: AppState, form: LoanForm) -> impl IntoView {
    let has_stock = form.has_stock();
    let form = RwSignal::new(form);
    let workflow = RwSignal::new(FormWorkflow::default());
    let today = medislink_core::today();

    let on_submit = move |ev: SubmitEvent| {
        ev.prevent_default();
        let api = state.api();
        submit_form(
            state,
            form,
            workflow,
            move |request| async move { api.create_loan(&request).await },
            move |outcome| redirect_on_success(state, &outcome, Route::Dashboard),
        );
    };

    view! {
        <form class="loan-form" on:submit=on_submit>
            <h3>"Ajukan Peminjaman"</h3>
            <label>
                "Tanggal Mulai"
                <input
                    type="date"
                    min=iso(today)
                    prop:value=move || form.with(|f| f.loan_date.clone())
                    on:input=move |ev| form.update(|f| f.set_loan_date(event_target_value(&ev)))
                />
            </label>
            <label>
                "Tanggal Kembali"
                <input
                    type="date"
                    min=move || form.with(|f| iso(f.min_return_date(today)))
                    prop:value=move || form.with(|f| f.return_due.clone())
                    on:input=move |ev| form.update(|f| f.return_due = event_target_value(&ev))
                />
            </label>
            <label>
                "Kondisi Medis"
                <input
                    placeholder="Contoh: Pasca operasi lutut"
                    prop:value=move || form.with(|f| f.medical_condition.clone())
                    on:input=move |ev| form.update(|f| f.medical_condition = event_target_value(&ev))
                />
            </label>
            <label>
                "Catatan"
                <textarea
                    placeholder="Keperluan penggunaan alat"
                    prop:value=move || form.with(|f| f.notes.clone())
                    on:input=move |ev| form.update(|f| f.notes = event_target_value(&ev))
                ></textarea>
            </label>
            <button
                type="submit"
                class="btn btn-primary"
                disabled=move || !has_stock || workflow.with(FormWorkflow::is_busy)
            >
                {move || {
                    if !has_stock {
                        "Stok Habis"
                    } else if workflow.with(FormWorkflow::is_busy) {
                        "Mengirim..."
                    } else {
                        "Ajukan Pinjaman"
                    }
                }}
            </button>
        </form>
    }
}
