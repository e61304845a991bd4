//! Модели форм платформы и их проверки.

use std::time::Duration;

use chrono::NaiveDate;
use serde::Serialize;

use crate::image::{ImageAttachment, ImageSlot};
use crate::models::{Id, Tool};
use crate::notify::{Notifier, REDIRECT_DELAY};
use crate::validation::{
    ValidationError, check_not_before, check_not_past, parse_count, parse_date, require_filled,
};
use crate::workflow::SubmitForm;

/// Категории инструментов в форме пожертвования.
pub const TOOL_CATEGORIES: [&str; 5] = [
    "Mobilitas (Kursi Roda, Tongkat, dll)",
    "Pernapasan (Tabung Oksigen, Nebulizer)",
    "Rehabilitasi (Kasur Decubitus, dll)",
    "P3K & Medis Dasar",
    "Lainnya",
];

/// Отказ по размеру фото инструмента.
pub const PHOTO_TOO_LARGE: &str = "Ukuran foto maksimal 2MB!";
/// Отказ по размеру картинки новости.
pub const NEWS_IMAGE_TOO_LARGE: &str = "Ukuran gambar maksimal 2MB!";

/// Имя файлового поля в `multipart/form-data`.
pub const IMAGE_FIELD: &str = "image";

/// Данные, которые уходят на сервер как `multipart/form-data`.
pub trait MultipartPayload {
    /// Текстовые поля в порядке добавления.
    fn text_fields(&self) -> Vec<(&'static str, String)>;

    /// Файл для поля `image`.
    fn image(&self) -> Option<&ImageAttachment>;
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Форма пожертвования инструмента.
pub struct DonationForm {
    /// Название инструмента.
    pub tool_name: String,
    /// Категория из [`TOOL_CATEGORIES`].
    pub category: String,
    /// Количество, как его ввёл пользователь.
    pub quantity: String,
    /// Описание состояния.
    pub description: String,
    /// Адрес забора.
    pub pickup_address: String,
    /// Дата забора `YYYY-MM-DD`.
    pub pickup_date: String,
    /// Обязательное фото.
    pub photo: ImageSlot,
}

impl Default for DonationForm {
    fn default() -> Self {
        Self {
            tool_name: String::new(),
            category: TOOL_CATEGORIES[0].to_string(),
            quantity: "1".to_string(),
            description: String::new(),
            pickup_address: String::new(),
            pickup_date: String::new(),
            photo: ImageSlot::default(),
        }
    }
}

impl DonationForm {
    /// Прикрепляет фото; слишком большой файл отвергается уведомлением.
    pub fn attach_photo(&mut self, attachment: ImageAttachment, notifier: &mut Notifier) -> bool {
        self.photo.select(attachment, PHOTO_TOO_LARGE, notifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Проверенное пожертвование.
pub struct DonationPayload {
    /// Название инструмента.
    pub tool_name: String,
    /// Категория.
    pub category: String,
    /// Количество.
    pub quantity: u32,
    /// Описание.
    pub description: String,
    /// Адрес забора.
    pub pickup_address: String,
    /// Дата забора.
    pub pickup_date: NaiveDate,
    /// Фото.
    pub image: ImageAttachment,
}

impl MultipartPayload for DonationPayload {
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("tool_name", self.tool_name.clone()),
            ("category", self.category.clone()),
            ("quantity", self.quantity.to_string()),
            ("description", self.description.clone()),
            ("pickup_address", self.pickup_address.clone()),
            ("pickup_date", self.pickup_date.format("%Y-%m-%d").to_string()),
        ]
    }

    fn image(&self) -> Option<&ImageAttachment> {
        Some(&self.image)
    }
}

impl SubmitForm for DonationForm {
    type Payload = DonationPayload;

    fn validate(&self, today: NaiveDate) -> Result<DonationPayload, ValidationError> {
        const INCOMPLETE: &str = "Mohon lengkapi semua data donasi.";
        const LAMPAU: &str = "Tanggal penjemputan tidak boleh lampau.";

        let tool_name = require_filled("tool_name", &self.tool_name, INCOMPLETE)?;
        let category = require_filled("category", &self.category, INCOMPLETE)?;
        let description = require_filled("description", &self.description, INCOMPLETE)?;
        let pickup_address = require_filled("pickup_address", &self.pickup_address, INCOMPLETE)?;
        let quantity = parse_count("quantity", &self.quantity, 1, "Jumlah donasi minimal 1 unit.")?;

        let image = self.photo.file().cloned().ok_or(ValidationError::new(
            "image",
            "Mohon sertakan foto alat medis untuk verifikasi.",
        ))?;

        let pickup_date = parse_date("pickup_date", &self.pickup_date, LAMPAU)?;
        check_not_past("pickup_date", pickup_date, today, LAMPAU)?;

        Ok(DonationPayload {
            tool_name,
            category,
            quantity,
            description,
            pickup_address,
            pickup_date,
            image,
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn success_message(&self) -> &'static str {
        "Donasi berhasil dikirim! Menunggu verifikasi."
    }

    fn failure_message(&self) -> &'static str {
        "Terjadi kesalahan sistem. Coba lagi nanti."
    }

    fn redirect_after_success(&self) -> Option<Duration> {
        Some(REDIRECT_DELAY)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Форма заявки на аренду конкретного инструмента.
pub struct LoanForm {
    tool_id: Id,
    stock: u32,
    /// Дата начала `YYYY-MM-DD`.
    pub loan_date: String,
    /// Дата возврата `YYYY-MM-DD`, может быть пустой.
    pub return_due: String,
    /// Медицинское показание.
    pub medical_condition: String,
    /// Цель использования.
    pub notes: String,
}

impl LoanForm {
    /// Пустая форма для инструмента с идентификатором и остатком.
    pub fn new(tool_id: Id, stock: u32) -> Self {
        Self {
            tool_id,
            stock,
            loan_date: String::new(),
            return_due: String::new(),
            medical_condition: String::new(),
            notes: String::new(),
        }
    }

    /// Пустая форма для загруженного инструмента.
    pub fn for_tool(tool: &Tool) -> Self {
        Self::new(tool.id, tool.stock)
    }

    /// Инструмент, к которому привязана форма.
    pub fn tool_id(&self) -> Id {
        self.tool_id
    }

    /// Можно ли отправлять заявку при текущем остатке.
    pub fn has_stock(&self) -> bool {
        self.stock > 0
    }

    /// Меняет дату начала. Если она оказалась позже уже выбранной даты
    /// возврата, дата возврата сбрасывается.
    pub fn set_loan_date(&mut self, value: impl Into<String>) {
        let value = value.into();
        let start = parse_date("loan_date", &value, "").ok();
        let due = parse_date("return_due", &self.return_due, "").ok();
        if let (Some(start), Some(due)) = (start, due)
            && start > due
        {
            self.return_due.clear();
        }
        self.loan_date = value;
    }

    /// Минимальная дата для поля возврата: дата начала или сегодня.
    pub fn min_return_date(&self, today: NaiveDate) -> NaiveDate {
        parse_date("loan_date", &self.loan_date, "")
            .ok()
            .filter(|start| *start > today)
            .unwrap_or(today)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса `createLoan`.
pub struct LoanRequest {
    /// Инструмент.
    pub tool_id: Id,
    /// Количество, всегда одна единица.
    pub quantity: u32,
    /// Дата начала.
    pub loan_date: NaiveDate,
    /// Дата возврата.
    pub return_due: NaiveDate,
    /// Медицинское показание.
    pub medical_condition: String,
    /// Цель использования.
    pub notes: String,
}

impl SubmitForm for LoanForm {
    type Payload = LoanRequest;

    fn validate(&self, today: NaiveDate) -> Result<LoanRequest, ValidationError> {
        const INCOMPLETE: &str = "Mohon lengkapi Tanggal Mulai dan Kondisi Medis.";
        const RETURN_BEFORE_START: &str =
            "Tanggal kembali tidak boleh lebih awal dari tanggal mulai.";

        let loan_date = parse_date("loan_date", &self.loan_date, INCOMPLETE)?;
        let medical_condition =
            require_filled("medical_condition", &self.medical_condition, INCOMPLETE)?;

        if !self.has_stock() {
            return Err(ValidationError::new("tool_id", "Stok alat sedang habis."));
        }

        check_not_past(
            "loan_date",
            loan_date,
            today,
            "Tanggal mulai tidak boleh di masa lalu.",
        )?;

        // Пустая дата возврата означает возврат в тот же день.
        let return_due = if self.return_due.trim().is_empty() {
            loan_date
        } else {
            let due = parse_date("return_due", &self.return_due, RETURN_BEFORE_START)?;
            check_not_before("return_due", due, loan_date, RETURN_BEFORE_START)?;
            due
        };

        Ok(LoanRequest {
            tool_id: self.tool_id,
            quantity: 1,
            loan_date,
            return_due,
            medical_condition,
            notes: self.notes.trim().to_string(),
        })
    }

    fn reset(&mut self) {
        *self = Self::new(self.tool_id, self.stock);
    }

    fn success_message(&self) -> &'static str {
        "Permintaan berhasil diajukan! Cek status di Riwayat."
    }

    fn failure_message(&self) -> &'static str {
        "Gagal mengajukan pinjaman. Coba lagi."
    }

    fn redirect_after_success(&self) -> Option<Duration> {
        Some(REDIRECT_DELAY)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Форма новости в админ-панели.
pub struct NewsForm {
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub content: String,
    /// Необязательная обложка.
    pub image: ImageSlot,
}

impl NewsForm {
    /// Прикрепляет обложку; слишком большой файл отвергается уведомлением.
    pub fn attach_image(&mut self, attachment: ImageAttachment, notifier: &mut Notifier) -> bool {
        self.image.select(attachment, NEWS_IMAGE_TOO_LARGE, notifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Проверенная новость.
pub struct NewsPayload {
    /// Заголовок.
    pub title: String,
    /// Текст.
    pub content: String,
    /// Обложка.
    pub image: Option<ImageAttachment>,
}

impl MultipartPayload for NewsPayload {
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("title", self.title.clone()),
            ("content", self.content.clone()),
        ]
    }

    fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}

impl SubmitForm for NewsForm {
    type Payload = NewsPayload;

    fn validate(&self, _today: NaiveDate) -> Result<NewsPayload, ValidationError> {
        const REQUIRED: &str = "Judul dan Konten berita wajib diisi!";

        Ok(NewsPayload {
            title: require_filled("title", &self.title, REQUIRED)?,
            content: require_filled("content", &self.content, REQUIRED)?,
            image: self.image.file().cloned(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn success_message(&self) -> &'static str {
        "Berita berhasil dipublikasikan!"
    }

    fn failure_message(&self) -> &'static str {
        "Gagal membuat berita."
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Форма баннера для слайдера на главной.
pub struct AdForm {
    /// Заголовок.
    pub title: String,
    /// Описание.
    pub description: String,
    /// Ссылка на картинку.
    pub image_url: String,
    /// Ссылка перехода.
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
/// Тело запроса `createAd`.
pub struct AdPayload {
    /// Заголовок.
    pub title: String,
    /// Описание.
    pub description: String,
    /// Картинка.
    pub image_url: String,
    /// Ссылка перехода.
    pub link: String,
}

impl SubmitForm for AdForm {
    type Payload = AdPayload;

    fn validate(&self, _today: NaiveDate) -> Result<AdPayload, ValidationError> {
        const REQUIRED: &str = "Judul dan URL gambar iklan wajib diisi.";

        Ok(AdPayload {
            title: require_filled("title", &self.title, REQUIRED)?,
            description: self.description.trim().to_string(),
            image_url: require_filled("image_url", &self.image_url, REQUIRED)?,
            link: self.link.trim().to_string(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn success_message(&self) -> &'static str {
        "Iklan berhasil ditambahkan ke Slider!"
    }

    fn failure_message(&self) -> &'static str {
        "Gagal membuat iklan."
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Форма добавления инструмента в инвентарь.
pub struct ToolForm {
    /// Название.
    pub name: String,
    /// Категория.
    pub category: String,
    /// Тип.
    pub kind: String,
    /// Размер.
    pub size: String,
    /// Описание.
    pub description: String,
    /// Габариты.
    pub dimensions: String,
    /// Максимальная нагрузка.
    pub weight_cap: String,
    /// Состояние.
    pub condition: String,
    /// Остаток, как его ввёл пользователь.
    pub stock: String,
    /// Необязательное фото.
    pub image: ImageSlot,
}

impl Default for ToolForm {
    fn default() -> Self {
        Self {
            name: String::new(),
            category: TOOL_CATEGORIES[0].to_string(),
            kind: String::new(),
            size: String::new(),
            description: String::new(),
            dimensions: String::new(),
            weight_cap: String::new(),
            condition: "baik".to_string(),
            stock: "1".to_string(),
            image: ImageSlot::default(),
        }
    }
}

impl ToolForm {
    /// Прикрепляет фото; слишком большой файл отвергается уведомлением.
    pub fn attach_image(&mut self, attachment: ImageAttachment, notifier: &mut Notifier) -> bool {
        self.image.select(attachment, PHOTO_TOO_LARGE, notifier)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
/// Проверенный инструмент.
pub struct ToolPayload {
    /// Название.
    pub name: String,
    /// Категория.
    pub category: String,
    /// Тип.
    pub kind: String,
    /// Размер.
    pub size: String,
    /// Описание.
    pub description: String,
    /// Габариты.
    pub dimensions: String,
    /// Максимальная нагрузка.
    pub weight_cap: String,
    /// Состояние.
    pub condition: String,
    /// Остаток.
    pub stock: u32,
    /// Фото.
    pub image: Option<ImageAttachment>,
}

impl MultipartPayload for ToolPayload {
    fn text_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("name", self.name.clone()),
            ("category", self.category.clone()),
            ("type", self.kind.clone()),
            ("size", self.size.clone()),
            ("description", self.description.clone()),
            ("dimensions", self.dimensions.clone()),
            ("weight_cap", self.weight_cap.clone()),
            ("condition", self.condition.clone()),
            ("stock", self.stock.to_string()),
        ]
    }

    fn image(&self) -> Option<&ImageAttachment> {
        self.image.as_ref()
    }
}

impl SubmitForm for ToolForm {
    type Payload = ToolPayload;

    fn validate(&self, _today: NaiveDate) -> Result<ToolPayload, ValidationError> {
        Ok(ToolPayload {
            name: require_filled("name", &self.name, "Nama alat wajib diisi.")?,
            category: self.category.trim().to_string(),
            kind: self.kind.trim().to_string(),
            size: self.size.trim().to_string(),
            description: self.description.trim().to_string(),
            dimensions: self.dimensions.trim().to_string(),
            weight_cap: self.weight_cap.trim().to_string(),
            condition: self.condition.trim().to_string(),
            stock: parse_count(
                "stock",
                &self.stock,
                0,
                "Stok harus berupa angka 0 atau lebih.",
            )?,
            image: self.image.file().cloned(),
        })
    }

    fn reset(&mut self) {
        *self = Self::default();
    }

    fn success_message(&self) -> &'static str {
        "Berhasil menambahkan alat baru!"
    }

    fn failure_message(&self) -> &'static str {
        "Gagal menambahkan alat."
    }
}
