mod support;

use medislink_core::dashboard::{self, PROFILE_PLACEHOLDER};
use medislink_core::{
    AdminAction, ConfirmGate, Dashboard, Followup, LoanStatus, NewsForm, FormWorkflow, Notifier,
    SubmitOutcome,
};
use support::{FakeApi, today};

fn message(notifier: &Notifier) -> Option<&str> {
    notifier.current().map(|n| n.message.as_str())
}

async fn loaded(api: &FakeApi) -> (Dashboard, Notifier) {
    let mut board = Dashboard::default();
    let mut notifier = Notifier::default();
    dashboard::load(&mut board, api, &mut notifier).await;
    api.clear_calls();
    (board, notifier)
}

#[tokio::test]
async fn load_fetches_every_collection_and_profile() {
    let api = FakeApi::seeded();
    let mut board = Dashboard::default();
    let mut notifier = Notifier::default();
    assert!(board.loading);

    dashboard::load(&mut board, &api, &mut notifier).await;

    let mut calls = api.calls();
    calls.sort();
    assert_eq!(
        calls,
        vec![
            "get_profile",
            "list_ads",
            "list_donations",
            "list_loans",
            "list_news",
            "list_tools",
        ]
    );
    assert!(!board.loading);
    assert_eq!(board.data.tools.len(), 2);
    assert_eq!(board.data.pending_loans(), 1);
    assert_eq!(board.header_name(), "Admin Medis");
    assert!(notifier.current().is_none());
}

#[tokio::test]
async fn failed_load_shows_one_error_and_keeps_placeholder() {
    let api = FakeApi {
        fail_lists: true,
        profile: None,
        ..FakeApi::seeded()
    };
    let mut board = Dashboard::default();
    let mut notifier = Notifier::default();

    dashboard::load(&mut board, &api, &mut notifier).await;

    assert!(!board.loading);
    assert!(board.data.tools.is_empty());
    assert_eq!(board.header_name(), PROFILE_PLACEHOLDER);
    assert_eq!(message(&notifier), Some("Gagal memuat data dashboard."));
}

#[tokio::test]
async fn cancelled_action_never_reaches_backend() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let before = board.clone();
    let mut gate = ConfirmGate::default();

    gate.ask(AdminAction::DeleteTool(1).into_request());
    assert!(gate.is_open());
    gate.cancel();

    let followup = dashboard::confirm(&mut board, &mut gate, &api, &mut notifier).await;

    assert_eq!(followup, None);
    assert!(api.calls().is_empty());
    assert_eq!(board, before);
    assert!(notifier.current().is_none());
}

#[tokio::test]
async fn tool_delete_filters_locally_without_refetch() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let mut gate = ConfirmGate::default();

    gate.ask(AdminAction::DeleteTool(1).into_request());
    let followup = dashboard::confirm(&mut board, &mut gate, &api, &mut notifier).await;

    assert_eq!(followup, Some(Followup::RemoveTool(1)));
    assert_eq!(api.calls(), vec!["delete_tool 1"]);
    assert_eq!(board.data.tools.iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);
    assert_eq!(message(&notifier), Some("Alat berhasil dihapus."));
}

#[tokio::test]
async fn loan_status_change_refetches_everything() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let mut gate = ConfirmGate::default();

    gate.ask(
        AdminAction::UpdateLoanStatus {
            id: 10,
            status: LoanStatus::Approved,
        }
        .into_request(),
    );
    let followup = dashboard::confirm(&mut board, &mut gate, &api, &mut notifier).await;

    assert_eq!(followup, Some(Followup::Refetch));
    let calls = api.calls();
    assert_eq!(calls[0], "update_loan_status 10 approved");
    assert_eq!(calls.len(), 6);
    assert_eq!(board.data.pending_loans(), 0);
    assert_eq!(message(&notifier), Some("Status berhasil diperbarui!"));
}

#[tokio::test]
async fn failed_action_reports_and_skips_refetch() {
    let api = FakeApi {
        fail_mutations: true,
        ..FakeApi::seeded()
    };
    let (mut board, mut notifier) = loaded(&api).await;
    let mut gate = ConfirmGate::default();

    gate.ask(
        AdminAction::ApproveDonation {
            id: 30,
            condition: "baik".to_string(),
        }
        .into_request(),
    );
    let followup = dashboard::confirm(&mut board, &mut gate, &api, &mut notifier).await;

    assert_eq!(followup, None);
    assert_eq!(api.calls(), vec!["approve_donation 30 baik"]);
    assert_eq!(message(&notifier), Some("Gagal memproses donasi."));
    assert!(!gate.is_open());
}

#[tokio::test]
async fn logout_signs_out_without_backend_call() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let mut gate = ConfirmGate::default();

    gate.ask(AdminAction::Logout.into_request());
    let followup = dashboard::confirm(&mut board, &mut gate, &api, &mut notifier).await;

    assert_eq!(followup, Some(Followup::SignOut));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn published_news_triggers_refetch() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let mut form = NewsForm {
        title: "Posyandu keliling".to_string(),
        content: "Jadwal bulan ini.".to_string(),
        ..NewsForm::default()
    };
    let mut workflow = FormWorkflow::default();

    let outcome = dashboard::submit_and_refresh(
        &mut board,
        &api,
        &mut form,
        &mut workflow,
        &mut notifier,
        today(),
        |payload| {
            let api = &api;
            async move { medislink_core::AdminApi::create_news(api, &payload).await }
        },
    )
    .await;

    assert!(outcome.is_sent());
    assert_eq!(api.mutations(), vec!["create_news Posyandu keliling"]);
    assert_eq!(board.data.news.len(), 2);
    assert!(form.title.is_empty());
}

#[tokio::test]
async fn incomplete_news_is_rejected_before_any_call() {
    let api = FakeApi::seeded();
    let (mut board, mut notifier) = loaded(&api).await;
    let mut form = NewsForm::default();
    let mut workflow = FormWorkflow::default();

    let outcome = dashboard::submit_and_refresh(
        &mut board,
        &api,
        &mut form,
        &mut workflow,
        &mut notifier,
        today(),
        |payload| {
            let api = &api;
            async move { medislink_core::AdminApi::create_news(api, &payload).await }
        },
    )
    .await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert!(api.calls().is_empty());
}
