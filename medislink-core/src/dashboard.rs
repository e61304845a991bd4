//! Админ-панель: агрегированная загрузка данных и действия через подтверждение.

use std::fmt::{self, Display};
use std::future::Future;
use std::str::FromStr;

use chrono::NaiveDate;

use crate::api::AdminApi;
use crate::confirm::{ConfirmGate, ConfirmRequest, DialogTone};
use crate::models::{Ad, Donation, DonationStatus, Id, Loan, LoanStatus, News, Tool, UserProfile};
use crate::notify::Notifier;
use crate::workflow::{self, FormWorkflow, SubmitForm, SubmitOutcome};

/// Имя в шапке, пока профиль не загружен.
pub const PROFILE_PLACEHOLDER: &str = "Memuat...";

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
/// Вкладка админ-панели.
pub enum AdminTab {
    /// Заявки на аренду.
    Loans,
    #[default]
    /// Инвентарь.
    Inventory,
    /// Новости.
    News,
    /// Баннеры слайдера.
    Ads,
    /// Пожертвования.
    Donations,
}

impl AdminTab {
    /// Вкладки в порядке отображения.
    pub const ALL: [AdminTab; 5] = [
        Self::Loans,
        Self::Inventory,
        Self::News,
        Self::Ads,
        Self::Donations,
    ];

    /// Короткое имя для CLI и разметки.
    pub fn slug(&self) -> &'static str {
        match self {
            Self::Loans => "loans",
            Self::Inventory => "inventory",
            Self::News => "news",
            Self::Ads => "ads",
            Self::Donations => "donations",
        }
    }

    /// Подпись вкладки; у заявок и пожертвований в скобках число ожидающих.
    pub fn label(&self, data: &DashboardData) -> String {
        match self {
            Self::Loans => format!("Peminjaman ({})", data.pending_loans()),
            Self::Inventory => "Inventaris".to_string(),
            Self::News => "Berita".to_string(),
            Self::Ads => "Manajemen Iklan".to_string(),
            Self::Donations => format!("Donasi ({})", data.pending_donations()),
        }
    }
}

impl FromStr for AdminTab {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|tab| tab.slug() == raw.trim().to_ascii_lowercase())
            .ok_or_else(|| format!("unknown tab: {raw}"))
    }
}

#[derive(Debug, Clone, Default, PartialEq)]
/// Все коллекции, которые показывает админ-панель.
pub struct DashboardData {
    /// Инвентарь.
    pub tools: Vec<Tool>,
    /// Заявки на аренду.
    pub loans: Vec<Loan>,
    /// Новости.
    pub news: Vec<News>,
    /// Баннеры.
    pub ads: Vec<Ad>,
    /// Пожертвования.
    pub donations: Vec<Donation>,
}

impl DashboardData {
    /// Сколько заявок ждут решения.
    pub fn pending_loans(&self) -> usize {
        self.loans
            .iter()
            .filter(|loan| loan.status == LoanStatus::Pending)
            .count()
    }

    /// Сколько пожертвований ждут забора.
    pub fn pending_donations(&self) -> usize {
        self.donations
            .iter()
            .filter(|donation| donation.status == DonationStatus::Pending)
            .count()
    }

    /// Убирает инструмент из локального списка, не дожидаясь перезагрузки.
    pub fn remove_tool(&mut self, id: Id) -> bool {
        let before = self.tools.len();
        self.tools.retain(|tool| tool.id != id);
        self.tools.len() != before
    }
}

/// Загружает пять коллекций параллельно. Ошибка любой из них даёт ошибку
/// всей загрузки.
pub async fn fetch_all<A>(api: &A) -> Result<DashboardData, A::Error>
where
    A: AdminApi + ?Sized,
{
    let (tools, loans, news, ads, donations) = futures::try_join!(
        api.list_tools(),
        api.list_loans(),
        api.list_news(),
        api.list_ads(),
        api.list_donations(),
    )?;

    Ok(DashboardData {
        tools,
        loans,
        news,
        ads,
        donations,
    })
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Действие администратора, которое выполняется только после подтверждения.
pub enum AdminAction {
    /// Выход из админ-панели.
    Logout,
    /// Удаление инструмента.
    DeleteTool(Id),
    /// Смена статуса заявки.
    UpdateLoanStatus {
        /// Заявка.
        id: Id,
        /// Новый статус.
        status: LoanStatus,
    },
    /// Удаление баннера.
    DeleteAd(Id),
    /// Пожертвование получено.
    ReceiveDonation(Id),
    /// Пожертвование принято в инвентарь.
    ApproveDonation {
        /// Пожертвование.
        id: Id,
        /// Состояние после осмотра.
        condition: String,
    },
}

impl AdminAction {
    /// Диалог подтверждения для действия.
    pub fn into_request(self) -> ConfirmRequest<Self> {
        let (title, message, tone) = match &self {
            Self::Logout => (
                "Keluar Aplikasi",
                "Apakah Anda yakin ingin keluar dari halaman Admin?".to_string(),
                DialogTone::Danger,
            ),
            Self::DeleteTool(_) => (
                "Hapus Alat Medis",
                "Tindakan ini permanen. Alat akan dihapus dari inventaris.".to_string(),
                DialogTone::Danger,
            ),
            Self::UpdateLoanStatus { status, .. } => (
                "Update Status Peminjaman",
                loan_status_prompt(*status).to_string(),
                DialogTone::Warning,
            ),
            Self::DeleteAd(_) => (
                "Hapus Iklan",
                "Iklan akan dihapus dari slider homepage.".to_string(),
                DialogTone::Danger,
            ),
            Self::ReceiveDonation(_) => (
                "Terima Donasi",
                "Konfirmasi barang donasi sudah diterima?".to_string(),
                DialogTone::Warning,
            ),
            Self::ApproveDonation { condition, .. } => (
                "Setujui Donasi",
                format!("Masukkan barang ke inventaris dengan kondisi '{condition}'?"),
                DialogTone::Warning,
            ),
        };

        ConfirmRequest {
            title: title.to_string(),
            message,
            tone,
            action: self,
        }
    }

    /// Уведомление после успеха. У выхода его нет.
    pub fn success_message(&self) -> Option<&'static str> {
        match self {
            Self::Logout => None,
            Self::DeleteTool(_) => Some("Alat berhasil dihapus."),
            Self::UpdateLoanStatus { .. } => Some("Status berhasil diperbarui!"),
            Self::DeleteAd(_) => Some("Iklan berhasil dihapus."),
            Self::ReceiveDonation(_) => Some("Status diubah menjadi 'Barang Diterima'."),
            Self::ApproveDonation { .. } => Some("Berhasil! Stok inventaris diperbarui."),
        }
    }

    /// Уведомление после ошибки.
    pub fn failure_message(&self) -> &'static str {
        match self {
            Self::Logout => "Gagal keluar.",
            Self::DeleteTool(_) => "Gagal menghapus alat.",
            Self::UpdateLoanStatus { .. } => "Gagal update status.",
            Self::DeleteAd(_) => "Gagal menghapus iklan.",
            Self::ReceiveDonation(_) => "Gagal update status donasi.",
            Self::ApproveDonation { .. } => "Gagal memproses donasi.",
        }
    }
}

impl Display for AdminAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Logout => write!(f, "logout"),
            Self::DeleteTool(id) => write!(f, "delete tool {id}"),
            Self::UpdateLoanStatus { id, status } => write!(f, "set loan {id} to {status}"),
            Self::DeleteAd(id) => write!(f, "delete ad {id}"),
            Self::ReceiveDonation(id) => write!(f, "receive donation {id}"),
            Self::ApproveDonation { id, condition } => {
                write!(f, "approve donation {id} as '{condition}'")
            }
        }
    }
}

fn loan_status_prompt(status: LoanStatus) -> &'static str {
    match status {
        LoanStatus::Approved => "Setujui peminjaman? Barang akan di-booking.",
        LoanStatus::Rejected => "Tolak peminjaman? Stok akan dikembalikan.",
        LoanStatus::Active => "Konfirmasi user sudah datang dan barang diserahkan?",
        LoanStatus::Completed => "Konfirmasi barang sudah kembali & stok ditambah?",
        LoanStatus::Pending => "Lanjutkan aksi ini?",
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
/// Что сделать с экраном после успешного действия.
pub enum Followup {
    /// Перезагрузить все коллекции.
    Refetch,
    /// Убрать инструмент из локального списка.
    RemoveTool(Id),
    /// Удалить токен и уйти на страницу входа.
    SignOut,
}

/// Выполняет подтверждённое действие через API.
pub async fn perform<A>(api: &A, action: &AdminAction) -> Result<Followup, A::Error>
where
    A: AdminApi + ?Sized,
{
    match action {
        AdminAction::Logout => return Ok(Followup::SignOut),
        AdminAction::DeleteTool(id) => {
            api.delete_tool(*id).await?;
            return Ok(Followup::RemoveTool(*id));
        }
        AdminAction::UpdateLoanStatus { id, status } => {
            api.update_loan_status(*id, *status).await?
        }
        AdminAction::DeleteAd(id) => api.delete_ad(*id).await?,
        AdminAction::ReceiveDonation(id) => api.receive_donation(*id).await?,
        AdminAction::ApproveDonation { id, condition } => {
            api.approve_donation(*id, condition).await?
        }
    }
    Ok(Followup::Refetch)
}

#[derive(Debug, Clone, PartialEq)]
/// Состояние админ-панели.
pub struct Dashboard {
    /// Загруженные коллекции.
    pub data: DashboardData,
    /// Профиль администратора.
    pub profile: Option<UserProfile>,
    /// Открытая вкладка.
    pub tab: AdminTab,
    /// Идёт загрузка коллекций.
    pub loading: bool,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self {
            data: DashboardData::default(),
            profile: None,
            tab: AdminTab::default(),
            loading: true,
        }
    }
}

impl Dashboard {
    /// Имя администратора в шапке.
    pub fn header_name(&self) -> &str {
        self.profile
            .as_ref()
            .map(|profile| profile.name.as_str())
            .unwrap_or(PROFILE_PLACEHOLDER)
    }

    /// Роль администратора в шапке.
    pub fn header_role(&self) -> &str {
        self.profile
            .as_ref()
            .map(|profile| profile.role.as_str())
            .unwrap_or_default()
    }

    /// Применяет результат агрегированной загрузки. При ошибке старые
    /// списки остаются на месте.
    pub fn apply_fetch<E: Display>(
        &mut self,
        result: Result<DashboardData, E>,
        notifier: &mut Notifier,
    ) {
        self.loading = false;
        match result {
            Ok(data) => self.data = data,
            Err(err) => {
                tracing::error!("dashboard fetch failed: {err}");
                notifier.error("Gagal memuat data dashboard.");
            }
        }
    }

    /// Применяет результат загрузки профиля; ошибка только логируется.
    pub fn apply_profile<E: Display>(&mut self, result: Result<UserProfile, E>) {
        match result {
            Ok(profile) => self.profile = Some(profile),
            Err(err) => tracing::warn!("admin profile fetch failed: {err}"),
        }
    }

    /// Применяет результат действия и показывает уведомление. Возвращает
    /// дальнейший шаг, если действие удалось.
    pub fn apply_action<E: Display>(
        &mut self,
        action: &AdminAction,
        result: Result<Followup, E>,
        notifier: &mut Notifier,
    ) -> Option<Followup> {
        match result {
            Ok(followup) => {
                if let Followup::RemoveTool(id) = followup {
                    self.data.remove_tool(id);
                }
                if let Some(message) = action.success_message() {
                    notifier.success(message);
                }
                Some(followup)
            }
            Err(err) => {
                tracing::error!("admin action '{action}' failed: {err}");
                notifier.error(action.failure_message());
                None
            }
        }
    }
}

/// Первичная загрузка: коллекции и профиль параллельно.
pub async fn load<A>(dashboard: &mut Dashboard, api: &A, notifier: &mut Notifier)
where
    A: AdminApi + ?Sized,
{
    dashboard.loading = true;
    let (data, profile) = futures::join!(fetch_all(api), api.current_profile());
    dashboard.apply_profile(profile);
    dashboard.apply_fetch(data, notifier);
}

/// Перезагрузка коллекций после изменения.
pub async fn refresh<A>(dashboard: &mut Dashboard, api: &A, notifier: &mut Notifier)
where
    A: AdminApi + ?Sized,
{
    dashboard.loading = true;
    let data = fetch_all(api).await;
    dashboard.apply_fetch(data, notifier);
}

/// Пользователь нажал «Ya, Lanjutkan»: выполняет отложенное действие,
/// применяет результат и при необходимости перезагружает данные.
///
/// Без открытого диалога ничего не делает.
pub async fn confirm<A>(
    dashboard: &mut Dashboard,
    gate: &mut ConfirmGate<AdminAction>,
    api: &A,
    notifier: &mut Notifier,
) -> Option<Followup>
where
    A: AdminApi + ?Sized,
{
    let action = gate.confirm()?;
    let result = perform(api, &action).await;
    let followup = dashboard.apply_action(&action, result, notifier)?;

    if followup == Followup::Refetch {
        refresh(dashboard, api, notifier).await;
    }
    Some(followup)
}

/// Отправляет форму админ-панели и после успеха перезагружает данные.
pub async fn submit_and_refresh<A, F, S, Fut>(
    dashboard: &mut Dashboard,
    api: &A,
    form: &mut F,
    workflow: &mut FormWorkflow,
    notifier: &mut Notifier,
    today: NaiveDate,
    send: S,
) -> SubmitOutcome
where
    A: AdminApi + ?Sized,
    F: SubmitForm,
    S: FnOnce(F::Payload) -> Fut,
    Fut: Future<Output = Result<(), A::Error>>,
{
    let outcome = workflow::submit(form, workflow, notifier, today, send).await;
    if outcome.is_sent() {
        refresh(dashboard, api, notifier).await;
    }
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loan(id: Id, status: LoanStatus) -> Loan {
        Loan {
            id,
            tool_id: 1,
            tool_name: None,
            borrower_name: None,
            quantity: 1,
            loan_date: None,
            return_due: None,
            medical_condition: String::new(),
            notes: String::new(),
            status,
        }
    }

    #[test]
    fn tab_labels_count_pending_items() {
        let data = DashboardData {
            loans: vec![
                loan(1, LoanStatus::Pending),
                loan(2, LoanStatus::Active),
                loan(3, LoanStatus::Pending),
            ],
            ..DashboardData::default()
        };

        assert_eq!(AdminTab::Loans.label(&data), "Peminjaman (2)");
        assert_eq!(AdminTab::Donations.label(&data), "Donasi (0)");
        assert_eq!(AdminTab::default(), AdminTab::Inventory);
    }

    #[test]
    fn tab_parses_from_slug() {
        assert_eq!("Ads".parse::<AdminTab>(), Ok(AdminTab::Ads));
        assert!("settings".parse::<AdminTab>().is_err());
    }

    #[test]
    fn loan_status_request_uses_status_specific_prompt() {
        let request = AdminAction::UpdateLoanStatus {
            id: 4,
            status: LoanStatus::Rejected,
        }
        .into_request();

        assert_eq!(request.title, "Update Status Peminjaman");
        assert_eq!(request.message, "Tolak peminjaman? Stok akan dikembalikan.");
        assert_eq!(request.tone, DialogTone::Warning);
    }

    #[test]
    fn destructive_actions_use_danger_tone() {
        for action in [AdminAction::Logout, AdminAction::DeleteTool(1), AdminAction::DeleteAd(2)] {
            assert_eq!(action.into_request().tone, DialogTone::Danger);
        }
    }

    #[test]
    fn failed_fetch_keeps_stale_lists() {
        let mut dashboard = Dashboard::default();
        dashboard.data.loans.push(loan(1, LoanStatus::Pending));
        let mut notifier = Notifier::default();

        dashboard.apply_fetch(Err::<DashboardData, _>("timeout"), &mut notifier);

        assert!(!dashboard.loading);
        assert_eq!(dashboard.data.loans.len(), 1);
        assert_eq!(
            notifier.current().map(|n| n.message.as_str()),
            Some("Gagal memuat data dashboard.")
        );
    }

    #[test]
    fn header_shows_placeholder_until_profile_loads() {
        let mut dashboard = Dashboard::default();
        dashboard.apply_profile(Err::<UserProfile, _>("401"));
        assert_eq!(dashboard.header_name(), PROFILE_PLACEHOLDER);
        assert_eq!(dashboard.header_role(), "");
    }

    #[test]
    fn logout_success_is_silent() {
        let mut dashboard = Dashboard::default();
        let mut notifier = Notifier::default();

        let followup = dashboard.apply_action(
            &AdminAction::Logout,
            Ok::<_, String>(Followup::SignOut),
            &mut notifier,
        );

        assert_eq!(followup, Some(Followup::SignOut));
        assert!(notifier.current().is_none());
    }
}
