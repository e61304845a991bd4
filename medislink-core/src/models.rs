//! Каноническая схема сущностей платформы.
//!
//! Сервер отдаёт поля в двух стилях именования; приведение к этой схеме
//! выполняется на границе API-клиента (см. [`crate::wire`]).

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Datelike, Local, NaiveDate, TimeZone, Utc};
use serde::{Deserialize, Serialize};

/// Идентификатор сущности на сервере.
pub type Id = i64;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Статус заявки на аренду.
pub enum LoanStatus {
    /// Ожидает решения администратора.
    Pending,
    /// Одобрена, инструмент забронирован.
    Approved,
    /// Отклонена, остаток возвращён.
    Rejected,
    /// Инструмент выдан заёмщику.
    Active,
    /// Инструмент возвращён.
    Completed,
}

impl LoanStatus {
    /// Строковое представление, которое ожидает сервер.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Approved => "approved",
            Self::Rejected => "rejected",
            Self::Active => "active",
            Self::Completed => "completed",
        }
    }

    /// Переходы, которые администратор может выполнить из текущего статуса.
    pub fn next_steps(&self) -> &'static [LoanStatus] {
        match self {
            Self::Pending => &[Self::Approved, Self::Rejected],
            Self::Approved => &[Self::Active],
            Self::Active => &[Self::Completed],
            Self::Rejected | Self::Completed => &[],
        }
    }

    /// Можно ли перевести заявку в `next`.
    pub fn can_become(&self, next: LoanStatus) -> bool {
        self.next_steps().contains(&next)
    }
}

impl fmt::Display for LoanStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for LoanStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            "active" => Ok(Self::Active),
            "completed" => Ok(Self::Completed),
            other => Err(format!("unknown loan status: {other}")),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
/// Статус пожертвования.
pub enum DonationStatus {
    /// Ожидает забора.
    Pending,
    /// Инструмент получен и ждёт осмотра.
    Received,
    /// Инструмент принят в инвентарь.
    Approved,
}

impl DonationStatus {
    /// Строковое представление, которое ожидает сервер.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Received => "received",
            Self::Approved => "approved",
        }
    }
}

impl fmt::Display for DonationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DonationStatus {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "pending" => Ok(Self::Pending),
            "received" => Ok(Self::Received),
            "approved" => Ok(Self::Approved),
            other => Err(format!("unknown donation status: {other}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Новость на главной странице.
pub struct News {
    /// Идентификатор новости.
    pub id: Id,
    /// Заголовок.
    pub title: String,
    /// Текст новости.
    pub content: String,
    /// Ссылка на обложку.
    pub image_url: Option<String>,
    /// Дата и время публикации (UTC).
    pub created_at: Option<DateTime<Utc>>,
}

/// Обложка, которую показывают у новости без собственной картинки.
pub const NEWS_FALLBACK_IMAGE: &str =
    "https://images.unsplash.com/photo-1505751172876-fa1923c5c528?auto=format&fit=crop&w=1200&q=80";

impl News {
    /// Ссылка на обложку с подстановкой картинки по умолчанию.
    pub fn cover_url(&self) -> &str {
        self.image_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
            .unwrap_or(NEWS_FALLBACK_IMAGE)
    }

    /// Дата публикации в формате `5 Maret 2024` по местному времени.
    pub fn display_date(&self) -> Option<String> {
        self.display_date_in(&Local)
    }

    /// Дата публикации в часовом поясе `tz`.
    pub fn display_date_in<Tz: TimeZone>(&self, tz: &Tz) -> Option<String> {
        self.created_at
            .map(|created_at| format_indonesian_date(created_at.with_timezone(tz).date_naive()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Пожертвование медицинского инструмента.
pub struct Donation {
    /// Идентификатор пожертвования.
    pub id: Id,
    /// Название инструмента.
    pub tool_name: String,
    /// Категория.
    pub category: String,
    /// Количество единиц.
    pub quantity: u32,
    /// Описание состояния.
    pub description: String,
    /// Адрес забора.
    pub pickup_address: String,
    /// Планируемая дата забора.
    pub pickup_date: Option<NaiveDate>,
    /// Фото инструмента.
    pub image_url: Option<String>,
    /// Текущий статус.
    pub status: DonationStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Заявка на аренду инструмента.
pub struct Loan {
    /// Идентификатор заявки.
    pub id: Id,
    /// Идентификатор инструмента.
    pub tool_id: Id,
    /// Название инструмента, если сервер его подгрузил.
    pub tool_name: Option<String>,
    /// Имя заёмщика, если сервер его подгрузил.
    pub borrower_name: Option<String>,
    /// Количество единиц.
    pub quantity: u32,
    /// Дата начала.
    pub loan_date: Option<NaiveDate>,
    /// Планируемая дата возврата.
    pub return_due: Option<NaiveDate>,
    /// Медицинское показание.
    pub medical_condition: String,
    /// Цель использования.
    pub notes: String,
    /// Текущий статус.
    pub status: LoanStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Инструмент из инвентаря.
pub struct Tool {
    /// Идентификатор инструмента.
    pub id: Id,
    /// Название.
    pub name: String,
    /// Категория.
    pub category: String,
    /// Тип (`type` на сервере).
    pub kind: String,
    /// Размер.
    pub size: String,
    /// Описание.
    pub description: String,
    /// Габариты.
    pub dimensions: String,
    /// Максимальная нагрузка.
    pub weight_cap: String,
    /// Состояние (`baik`, `rusak ringan`, ...).
    pub condition: String,
    /// Остаток на складе.
    pub stock: u32,
    /// Фото.
    pub image_url: Option<String>,
}

impl Tool {
    /// Есть ли хотя бы одна единица для выдачи.
    pub fn in_stock(&self) -> bool {
        self.stock > 0
    }

    /// Описание с подстановкой текста по умолчанию.
    pub fn description_or_default(&self) -> &str {
        non_blank(&self.description).unwrap_or("Tidak ada deskripsi tersedia.")
    }

    /// Габариты или `-`.
    pub fn dimensions_or_dash(&self) -> &str {
        non_blank(&self.dimensions).unwrap_or("-")
    }

    /// Максимальная нагрузка или `-`.
    pub fn weight_cap_or_dash(&self) -> &str {
        non_blank(&self.weight_cap).unwrap_or("-")
    }

    /// Состояние в верхнем регистре или `-`.
    pub fn condition_label(&self) -> String {
        non_blank(&self.condition)
            .map(str::to_uppercase)
            .unwrap_or_else(|| "-".to_string())
    }

    /// Хорошее ли состояние (для цвета бейджа).
    pub fn is_good_condition(&self) -> bool {
        self.condition.trim().eq_ignore_ascii_case("baik")
    }

    /// Первая буква названия, которую рисуют вместо отсутствующего фото.
    pub fn initial(&self) -> String {
        self.name
            .trim()
            .chars()
            .next()
            .map(|c| c.to_uppercase().collect())
            .unwrap_or_default()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Рекламный баннер слайдера на главной.
pub struct Ad {
    /// Идентификатор.
    pub id: Id,
    /// Заголовок.
    pub title: String,
    /// Описание.
    pub description: String,
    /// Картинка баннера.
    pub image_url: String,
    /// Ссылка перехода.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
/// Профиль текущего пользователя.
pub struct UserProfile {
    /// Идентификатор пользователя.
    pub id: Id,
    /// Имя.
    pub name: String,
    /// Роль (`admin`, `user`).
    pub role: String,
    /// Номер NIK.
    pub nik: Option<String>,
    /// Фото KTP.
    pub foto_ktp: Option<String>,
}

impl UserProfile {
    /// Пользователь заполнил NIK и загрузил KTP, значит может брать инструменты.
    pub fn is_verified(&self) -> bool {
        self.nik.as_deref().and_then(non_blank).is_some()
            && self.foto_ktp.as_deref().and_then(non_blank).is_some()
    }

    /// Есть ли у пользователя права администратора.
    pub fn is_admin(&self) -> bool {
        self.role.trim().eq_ignore_ascii_case("admin")
    }
}

const MONTHS_ID: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

/// Форматирует дату как `5 Maret 2024`.
pub fn format_indonesian_date(date: NaiveDate) -> String {
    let month = MONTHS_ID[date.month0() as usize];
    format!("{} {} {}", date.day(), month, date.year())
}

fn non_blank(value: &str) -> Option<&str> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }
    Some(trimmed)
}
