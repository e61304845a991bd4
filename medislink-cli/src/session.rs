use std::future::Future;
use std::io::{self, Write};
use std::path::Path;

use anyhow::{Context, Result, anyhow, bail};
use medislink_client::{MedisClient, MedisClientError};
use medislink_core::dashboard::{self, AdminAction, AdminTab, Dashboard, Followup};
use medislink_core::detail::{self, Loadable, VERIFICATION_REQUIRED};
use medislink_core::forms::{NEWS_IMAGE_TOO_LARGE, PHOTO_TOO_LARGE};
use medislink_core::image::check_image_size;
use medislink_core::workflow::{self, FormWorkflow, SubmitForm, SubmitOutcome};
use medislink_core::{
    AdForm, AdminApi, ConfirmGate, DonationForm, ImageAttachment, NewsForm, Notifier, ToolForm,
    UserApi,
};

use crate::print;

/// Поля пожертвования из командной строки.
#[derive(Debug, Default)]
pub struct DonationInput {
    pub tool_name: String,
    pub category: Option<String>,
    pub quantity: String,
    pub description: String,
    pub pickup_address: String,
    pub pickup_date: String,
    pub photo: Option<std::path::PathBuf>,
}

/// Поля заявки на аренду из командной строки.
#[derive(Debug, Default)]
pub struct LoanInput {
    pub tool_id: i64,
    pub loan_date: String,
    pub return_due: Option<String>,
    pub medical_condition: String,
    pub notes: Option<String>,
}

/// Поля нового инструмента из командной строки.
#[derive(Debug, Default)]
pub struct ToolInput {
    pub name: String,
    pub category: Option<String>,
    pub kind: String,
    pub size: String,
    pub description: String,
    pub dimensions: String,
    pub weight_cap: String,
    pub condition: String,
    pub stock: String,
    pub image: Option<std::path::PathBuf>,
}

impl ToolInput {
    /// Форма инструмента; без `--category` остаётся категория формы по умолчанию.
    fn into_form(self) -> ToolForm {
        let mut form = ToolForm {
            name: self.name,
            kind: self.kind,
            size: self.size,
            description: self.description,
            dimensions: self.dimensions,
            weight_cap: self.weight_cap,
            condition: self.condition,
            stock: self.stock,
            ..ToolForm::default()
        };
        if let Some(category) = self.category {
            form.category = category;
        }
        form
    }
}

/// Один запуск CLI: клиент, уведомление и диалог подтверждения.
pub struct Session {
    client: MedisClient,
    notifier: Notifier,
    gate: ConfirmGate<AdminAction>,
    assume_yes: bool,
}

impl Session {
    pub fn new(client: MedisClient, assume_yes: bool) -> Self {
        Self {
            client,
            notifier: Notifier::default(),
            gate: ConfirmGate::default(),
            assume_yes,
        }
    }

    pub async fn list_tools(&self) -> Result<()> {
        let tools = self
            .client
            .list_public_tools()
            .await
            .map_err(map_client_error)?;
        print::print_tools(&tools);
        Ok(())
    }

    pub async fn show_tool(&self, id: i64) -> Result<()> {
        match detail::load_tool_page(&self.client, id).await {
            Loadable::Ready(page) => {
                print::print_tool_page(&page);
                Ok(())
            }
            _ => bail!("Alat tidak ditemukan."),
        }
    }

    pub async fn show_news(&self, id: i64) -> Result<()> {
        match detail::load_news(&self.client, id).await {
            Loadable::Ready(news) => {
                print::print_news(&news);
                Ok(())
            }
            _ => bail!("Berita tidak ditemukan."),
        }
    }

    pub async fn donate(&mut self, input: DonationInput) -> Result<()> {
        let mut form = DonationForm {
            tool_name: input.tool_name,
            quantity: input.quantity,
            description: input.description,
            pickup_address: input.pickup_address,
            pickup_date: input.pickup_date,
            ..DonationForm::default()
        };
        if let Some(category) = input.category {
            form.category = category;
        }
        if let Some(path) = input.photo {
            let photo = read_image(&path, PHOTO_TOO_LARGE).await?;
            if !form.attach_photo(photo, &mut self.notifier) {
                return self.report();
            }
        }

        let client = &self.client;
        let outcome = workflow::submit(
            &mut form,
            &mut FormWorkflow::default(),
            &mut self.notifier,
            medislink_core::today(),
            |payload| async move { client.create_donation(&payload).await },
        )
        .await;
        self.report_outcome(outcome)
    }

    pub async fn loan(&mut self, input: LoanInput) -> Result<()> {
        let page = match detail::load_tool_page(&self.client, input.tool_id).await {
            Loadable::Ready(page) => page,
            _ => bail!("Alat tidak ditemukan."),
        };
        if !page.can_request_loan() {
            bail!("{VERIFICATION_REQUIRED}: lengkapi NIK dan foto KTP di profil.");
        }

        let mut form = page.loan_form();
        form.set_loan_date(input.loan_date);
        form.return_due = input.return_due.unwrap_or_default();
        form.medical_condition = input.medical_condition;
        form.notes = input.notes.unwrap_or_default();

        let client = &self.client;
        let outcome = workflow::submit(
            &mut form,
            &mut FormWorkflow::default(),
            &mut self.notifier,
            medislink_core::today(),
            |request| async move { client.create_loan(&request).await },
        )
        .await;
        self.report_outcome(outcome)
    }

    pub async fn dashboard(&mut self, tab: AdminTab) -> Result<()> {
        let mut board = Dashboard {
            tab,
            ..Dashboard::default()
        };
        dashboard::load(&mut board, &self.client, &mut self.notifier).await;
        self.report()?;
        print::print_dashboard(&board);
        Ok(())
    }

    /// Проводит действие администратора через подтверждение. `None` значит,
    /// что пользователь отказался.
    pub async fn run_action(
        &mut self,
        action: AdminAction,
        tab: AdminTab,
    ) -> Result<Option<Followup>> {
        let mut board = Dashboard {
            tab,
            ..Dashboard::default()
        };
        if action != AdminAction::Logout {
            dashboard::load(&mut board, &self.client, &mut self.notifier).await;
            self.report()?;
        }

        self.gate.ask(action.into_request());
        if !self.ask_confirmation()? {
            self.gate.cancel();
            println!("Dibatalkan.");
            return Ok(None);
        }

        let followup =
            dashboard::confirm(&mut board, &mut self.gate, &self.client, &mut self.notifier).await;
        self.report()?;

        if matches!(followup, Some(Followup::Refetch | Followup::RemoveTool(_))) {
            println!();
            print::print_tab(&board);
        }
        Ok(followup)
    }

    pub async fn create_news(
        &mut self,
        title: String,
        content: String,
        image: Option<&Path>,
    ) -> Result<()> {
        let mut form = NewsForm {
            title,
            content,
            ..NewsForm::default()
        };
        if let Some(path) = image {
            let image = read_image(path, NEWS_IMAGE_TOO_LARGE).await?;
            if !form.attach_image(image, &mut self.notifier) {
                return self.report();
            }
        }

        let client = &self.client;
        let (outcome, board) = submit_admin_form(
            client,
            &mut self.notifier,
            &mut form,
            AdminTab::News,
            |payload| async move { client.create_news(&payload).await },
        )
        .await;
        self.report_refreshed(outcome, &board)
    }

    pub async fn create_ad(&mut self, mut form: AdForm) -> Result<()> {
        let client = &self.client;
        let (outcome, board) = submit_admin_form(
            client,
            &mut self.notifier,
            &mut form,
            AdminTab::Ads,
            |payload| async move { client.create_ad(&payload).await },
        )
        .await;
        self.report_refreshed(outcome, &board)
    }

    pub async fn create_tool(&mut self, input: ToolInput) -> Result<()> {
        let image = input.image.clone();
        let mut form = input.into_form();
        if let Some(path) = image {
            let image = read_image(&path, PHOTO_TOO_LARGE).await?;
            if !form.attach_image(image, &mut self.notifier) {
                return self.report();
            }
        }

        let client = &self.client;
        let (outcome, board) = submit_admin_form(
            client,
            &mut self.notifier,
            &mut form,
            AdminTab::Inventory,
            |payload| async move { client.create_tool(&payload).await },
        )
        .await;
        self.report_refreshed(outcome, &board)
    }

    fn ask_confirmation(&self) -> Result<bool> {
        let Some(request) = self.gate.pending() else {
            return Ok(false);
        };
        print::print_confirm_request(request);
        if self.assume_yes {
            return Ok(true);
        }

        print!("Ya, Lanjutkan? [y/N] ");
        io::stdout().flush()?;
        let mut answer = String::new();
        io::stdin()
            .read_line(&mut answer)
            .context("gagal membaca jawaban")?;
        Ok(parse_confirmation(&answer))
    }

    /// Печатает текущее уведомление и гасит его. Уведомление об ошибке
    /// становится ошибкой команды.
    fn report(&mut self) -> Result<()> {
        let Some(notification) = self.notifier.current().cloned() else {
            return Ok(());
        };
        self.notifier.expire(notification.ticket);

        if notification.is_success() {
            println!("{}", notification.message);
            Ok(())
        } else {
            Err(anyhow!(notification.message))
        }
    }

    /// Итог админской формы; после успеха печатает обновлённую вкладку.
    fn report_refreshed(&mut self, outcome: SubmitOutcome, board: &Dashboard) -> Result<()> {
        let sent = outcome.is_sent();
        self.report_outcome(outcome)?;
        if sent {
            println!();
            print::print_tab(board);
        }
        Ok(())
    }

    fn report_outcome(&mut self, outcome: SubmitOutcome) -> Result<()> {
        self.report()?;
        match outcome {
            SubmitOutcome::Busy => bail!("Formulir sedang dikirim."),
            _ => Ok(()),
        }
    }
}

/// Отправляет форму админ-панели и перезагружает вкладку `tab`.
async fn submit_admin_form<F, S, Fut>(
    client: &MedisClient,
    notifier: &mut Notifier,
    form: &mut F,
    tab: AdminTab,
    send: S,
) -> (SubmitOutcome, Dashboard)
where
    F: SubmitForm,
    S: FnOnce(F::Payload) -> Fut,
    Fut: Future<Output = Result<(), MedisClientError>>,
{
    let mut board = Dashboard {
        tab,
        ..Dashboard::default()
    };
    let outcome = dashboard::submit_and_refresh(
        &mut board,
        client,
        form,
        &mut FormWorkflow::default(),
        notifier,
        medislink_core::today(),
        send,
    )
    .await;
    (outcome, board)
}

/// Только `y`/`yes` подтверждают действие.
pub fn parse_confirmation(answer: &str) -> bool {
    matches!(answer.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

async fn read_image(path: &Path, too_large: &'static str) -> Result<ImageAttachment> {
    let meta = tokio::fs::metadata(path)
        .await
        .with_context(|| format!("gagal membuka {}", path.display()))?;
    check_image_size("image", meta.len(), too_large).map_err(|err| anyhow!(err.message))?;

    let bytes = tokio::fs::read(path)
        .await
        .with_context(|| format!("gagal membaca {}", path.display()))?;
    let file_name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_else(|| "image".to_string());
    Ok(ImageAttachment::new(file_name, None, bytes))
}

pub fn map_client_error(err: MedisClientError) -> anyhow::Error {
    let message = match err {
        MedisClientError::Unauthorized => format!(
            "perlu login: simpan token di {} atau {}",
            crate::token::TOKEN_FILE,
            crate::token::TOKEN_ENV
        ),
        MedisClientError::NotFound => "data tidak ditemukan".to_string(),
        MedisClientError::InvalidRequest(message) => format!("permintaan ditolak: {message}"),
        MedisClientError::Http(err) => format!("kesalahan HTTP: {err}"),
    };
    anyhow!(message)
}

#[cfg(test)]
mod tests {
    use super::*;
    use medislink_core::TOOL_CATEGORIES;

    #[test]
    fn tool_without_category_keeps_form_default() {
        let form = ToolInput {
            name: "Kursi Roda".to_string(),
            ..ToolInput::default()
        }
        .into_form();
        assert_eq!(form.category, TOOL_CATEGORIES[0]);
        assert_eq!(form.category, ToolForm::default().category);

        let form = ToolInput {
            category: Some("Alat Bantu Jalan".to_string()),
            ..ToolInput::default()
        }
        .into_form();
        assert_eq!(form.category, "Alat Bantu Jalan");
    }

    #[test]
    fn only_explicit_yes_confirms() {
        assert!(parse_confirmation("y\n"));
        assert!(parse_confirmation(" YES "));
        assert!(!parse_confirmation(""));
        assert!(!parse_confirmation("n"));
        assert!(!parse_confirmation("ya"));
    }

    #[test]
    fn unauthorized_mentions_token_locations() {
        let err = map_client_error(MedisClientError::Unauthorized);
        assert!(err.to_string().contains(".medislink_token"));
    }

    #[tokio::test]
    async fn oversized_image_is_refused_before_reading() {
        let path = std::env::temp_dir().join(format!("medislink-big-{}.jpg", std::process::id()));
        let file = std::fs::File::create(&path).expect("temp file");
        file.set_len(medislink_core::MAX_IMAGE_BYTES + 1)
            .expect("sparse file");

        let err = read_image(&path, PHOTO_TOO_LARGE)
            .await
            .expect_err("too large");
        assert_eq!(err.to_string(), PHOTO_TOO_LARGE);

        std::fs::remove_file(&path).expect("cleanup");
    }
}
