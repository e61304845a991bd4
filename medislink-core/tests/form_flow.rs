mod support;

use chrono::Duration;
use medislink_core::detail::{self, Loadable};
use medislink_core::forms::PHOTO_TOO_LARGE;
use medislink_core::workflow;
use medislink_core::{
    DonationForm, FormPhase, FormWorkflow, LoanForm, MAX_IMAGE_BYTES, Notifier, SubmitOutcome,
    UserApi,
};
use support::{FakeApi, photo, today};

fn message(notifier: &Notifier) -> Option<&str> {
    notifier.current().map(|n| n.message.as_str())
}

fn filled_donation() -> DonationForm {
    DonationForm {
        tool_name: "Kursi Roda".to_string(),
        quantity: "2".to_string(),
        description: "Bekas pakai, masih kokoh".to_string(),
        pickup_address: "Jl. Sudirman 10".to_string(),
        pickup_date: (today() + Duration::days(1)).format("%Y-%m-%d").to_string(),
        ..DonationForm::default()
    }
}

async fn send_donation(
    api: &FakeApi,
    form: &mut DonationForm,
    notifier: &mut Notifier,
) -> SubmitOutcome {
    let mut wf = FormWorkflow::default();
    let outcome = workflow::submit(form, &mut wf, notifier, today(), |payload| async move {
        api.create_donation(&payload).await
    })
    .await;
    assert_eq!(wf.phase(), FormPhase::Idle);
    outcome
}

#[tokio::test]
async fn donation_with_past_pickup_date_makes_no_request() {
    let api = FakeApi::default();
    let mut notifier = Notifier::default();
    let mut form = filled_donation();
    assert!(form.attach_photo(photo(1024), &mut notifier));
    form.pickup_date = (today() - Duration::days(1)).format("%Y-%m-%d").to_string();

    let outcome = send_donation(&api, &mut form, &mut notifier).await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(message(&notifier), Some("Tanggal penjemputan tidak boleh lampau."));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn donation_without_photo_makes_no_request() {
    let api = FakeApi::default();
    let mut notifier = Notifier::default();
    let mut form = filled_donation();

    let outcome = send_donation(&api, &mut form, &mut notifier).await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(
        message(&notifier),
        Some("Mohon sertakan foto alat medis untuk verifikasi.")
    );
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn oversized_photo_is_refused_at_selection() {
    let api = FakeApi::default();
    let mut notifier = Notifier::default();
    let mut form = filled_donation();

    assert!(!form.attach_photo(photo(MAX_IMAGE_BYTES as usize + 1), &mut notifier));
    assert_eq!(message(&notifier), Some(PHOTO_TOO_LARGE));
    assert!(form.photo.is_empty());

    let outcome = send_donation(&api, &mut form, &mut notifier).await;
    assert!(!outcome.is_sent());
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn sent_donation_resets_fields_and_preview() {
    let api = FakeApi::default();
    let mut notifier = Notifier::default();
    let mut form = filled_donation();
    assert!(form.attach_photo(photo(512), &mut notifier));
    assert!(form.photo.preview().is_some());

    let outcome = send_donation(&api, &mut form, &mut notifier).await;

    assert!(outcome.is_sent());
    assert_eq!(api.mutations(), vec!["create_donation"]);
    assert_eq!(api.sent_donations.borrow()[0].quantity, 2);
    assert_eq!(form, DonationForm::default());
    assert!(form.photo.preview().is_none());
    assert_eq!(
        message(&notifier),
        Some("Donasi berhasil dikirim! Menunggu verifikasi.")
    );
}

#[tokio::test]
async fn failed_donation_keeps_fields() {
    let api = FakeApi {
        fail_mutations: true,
        ..FakeApi::default()
    };
    let mut notifier = Notifier::default();
    let mut form = filled_donation();
    assert!(form.attach_photo(photo(512), &mut notifier));
    let before = form.clone();

    let outcome = send_donation(&api, &mut form, &mut notifier).await;

    assert_eq!(outcome, SubmitOutcome::Failed);
    assert_eq!(form, before);
    assert_eq!(
        message(&notifier),
        Some("Terjadi kesalahan sistem. Coba lagi nanti.")
    );
}

#[tokio::test]
async fn loan_without_return_date_returns_same_day() {
    let api = FakeApi::seeded();
    let mut notifier = Notifier::default();
    let mut wf = FormWorkflow::default();

    let page = detail::load_tool_page(&api, 1).await;
    let Loadable::Ready(page) = page else {
        panic!("tool 1 must load");
    };
    assert!(page.can_request_loan());

    let mut form = page.loan_form();
    form.set_loan_date(today().format("%Y-%m-%d").to_string());
    form.medical_condition = "Patah kaki".to_string();

    let api = &api;
    let outcome = workflow::submit(
        &mut form,
        &mut wf,
        &mut notifier,
        today(),
        |request| async move { api.create_loan(&request).await },
    )
    .await;

    assert!(outcome.is_sent());
    let sent = api.sent_loans.borrow();
    assert_eq!(sent[0].tool_id, 1);
    assert_eq!(sent[0].quantity, 1);
    assert_eq!(sent[0].loan_date, today());
    assert_eq!(sent[0].return_due, today());
}

#[tokio::test]
async fn loan_for_out_of_stock_tool_is_rejected() {
    let api = FakeApi::default();
    let mut notifier = Notifier::default();
    let mut wf = FormWorkflow::default();
    let mut form = LoanForm::new(2, 0);
    form.set_loan_date(today().format("%Y-%m-%d").to_string());
    form.medical_condition = "Stroke".to_string();

    let api = &api;
    let outcome = workflow::submit(
        &mut form,
        &mut wf,
        &mut notifier,
        today(),
        |request| async move { api.create_loan(&request).await },
    )
    .await;

    assert!(matches!(outcome, SubmitOutcome::Rejected(_)));
    assert_eq!(message(&notifier), Some("Stok alat sedang habis."));
    assert!(api.calls().is_empty());
}

#[tokio::test]
async fn missing_tool_is_not_found() {
    let api = FakeApi::seeded();
    assert_eq!(detail::load_tool_page(&api, 99).await, Loadable::NotFound);
    assert_eq!(detail::load_news(&api, 99).await, Loadable::NotFound);
    assert!(detail::load_news(&api, 20).await.ready().is_some());
}
