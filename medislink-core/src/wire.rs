//! DTO ответов сервера и их приведение к канонической схеме.
//!
//! Сервер отдаёт одни и те же поля то в snake_case (`title`, `image_url`),
//! то в стиле Go (`Title`, `ImageURL`). DTO принимают оба варианта, а `From`
//! превращает их в модели из [`crate::models`].

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::Deserialize;

use crate::models::{Ad, Donation, DonationStatus, Id, Loan, LoanStatus, News, Tool, UserProfile};

#[derive(Debug, Deserialize)]
#[serde(untagged)]
/// Ответ, который может прийти как есть или внутри `{ "data": ... }`.
pub enum Envelope<T> {
    /// `{ "data": ... }`.
    Wrapped {
        /// Полезная нагрузка.
        data: T,
    },
    /// Объект без обёртки.
    Bare(T),
}

impl<T> Envelope<T> {
    /// Достаёт полезную нагрузку.
    pub fn into_inner(self) -> T {
        match self {
            Self::Wrapped { data } => data,
            Self::Bare(value) => value,
        }
    }
}

/// Список, который сервер может вернуть как массив, `null` или `{ "data": [...] }`.
pub type ListBody<T> = Option<Envelope<Option<Vec<T>>>>;

/// Превращает тело списка в вектор канонических моделей; `null` даёт пустой список.
pub fn list_into<D, T>(body: ListBody<D>) -> Vec<T>
where
    D: Into<T>,
{
    body.and_then(Envelope::into_inner)
        .unwrap_or_default()
        .into_iter()
        .map(Into::into)
        .collect()
}

#[derive(Debug, Default, Deserialize)]
/// Тело ошибки: `{ "error": "..." }` или `{ "message": "..." }`.
pub struct ErrorBody {
    /// Поле `error`.
    #[serde(default)]
    pub error: Option<String>,
    /// Поле `message`.
    #[serde(default)]
    pub message: Option<String>,
}

impl ErrorBody {
    /// Первое непустое сообщение из тела ошибки.
    pub fn into_message(self) -> Option<String> {
        self.error
            .into_iter()
            .chain(self.message)
            .map(|message| message.trim().to_string())
            .find(|message| !message.is_empty())
    }
}

#[derive(Debug, Default, Deserialize)]
/// Новость в формате сервера.
pub struct NewsDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "Title")]
    title: Option<String>,
    #[serde(default, alias = "Content")]
    content: Option<String>,
    #[serde(default, alias = "ImageURL", alias = "ImageUrl")]
    image_url: Option<String>,
    #[serde(default, alias = "CreatedAt")]
    created_at: Option<String>,
}

impl From<NewsDto> for News {
    fn from(value: NewsDto) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            content: value.content.unwrap_or_default(),
            image_url: non_blank(value.image_url),
            created_at: value.created_at.as_deref().and_then(parse_wire_datetime),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Инструмент в формате сервера.
pub struct ToolDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, alias = "Category")]
    category: Option<String>,
    #[serde(default, rename = "type", alias = "Type")]
    kind: Option<String>,
    #[serde(default, alias = "Size")]
    size: Option<String>,
    #[serde(default, alias = "Description")]
    description: Option<String>,
    #[serde(default, alias = "Dimensions")]
    dimensions: Option<String>,
    #[serde(default, alias = "WeightCap")]
    weight_cap: Option<String>,
    #[serde(default, alias = "Condition")]
    condition: Option<String>,
    #[serde(default, alias = "Stock")]
    stock: Option<i64>,
    #[serde(default, alias = "ImageURL", alias = "ImageUrl")]
    image_url: Option<String>,
}

impl From<ToolDto> for Tool {
    fn from(value: ToolDto) -> Self {
        Self {
            id: value.id,
            name: value.name.unwrap_or_default(),
            category: value.category.unwrap_or_default(),
            kind: value.kind.unwrap_or_default(),
            size: value.size.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            dimensions: value.dimensions.unwrap_or_default(),
            weight_cap: value.weight_cap.unwrap_or_default(),
            condition: value.condition.unwrap_or_default(),
            stock: clamp_count(value.stock),
            image_url: non_blank(value.image_url),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct NamedRefDto {
    #[serde(default, alias = "Name")]
    name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
/// Заявка на аренду в формате сервера.
pub struct LoanDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "ToolID")]
    tool_id: Id,
    #[serde(default, alias = "ToolName")]
    tool_name: Option<String>,
    #[serde(default, alias = "Tool")]
    tool: Option<NamedRefDto>,
    #[serde(default, alias = "User")]
    user: Option<NamedRefDto>,
    #[serde(default, alias = "Quantity")]
    quantity: Option<i64>,
    #[serde(default, alias = "LoanDate")]
    loan_date: Option<String>,
    #[serde(default, alias = "ReturnDue")]
    return_due: Option<String>,
    #[serde(default, alias = "MedicalCondition")]
    medical_condition: Option<String>,
    #[serde(default, alias = "Notes")]
    notes: Option<String>,
    #[serde(default, alias = "Status")]
    status: Option<String>,
}

impl From<LoanDto> for Loan {
    fn from(value: LoanDto) -> Self {
        let tool_name = non_blank(value.tool_name)
            .or_else(|| value.tool.and_then(|tool| non_blank(tool.name)));

        Self {
            id: value.id,
            tool_id: value.tool_id,
            tool_name,
            borrower_name: value.user.and_then(|user| non_blank(user.name)),
            quantity: clamp_count(value.quantity),
            loan_date: value.loan_date.as_deref().and_then(parse_wire_date),
            return_due: value.return_due.as_deref().and_then(parse_wire_date),
            medical_condition: value.medical_condition.unwrap_or_default(),
            notes: value.notes.unwrap_or_default(),
            status: value
                .status
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(LoanStatus::Pending),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Пожертвование в формате сервера.
pub struct DonationDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "ToolName")]
    tool_name: Option<String>,
    #[serde(default, alias = "Category")]
    category: Option<String>,
    #[serde(default, alias = "Quantity")]
    quantity: Option<i64>,
    #[serde(default, alias = "Description")]
    description: Option<String>,
    #[serde(default, alias = "PickupAddress")]
    pickup_address: Option<String>,
    #[serde(default, alias = "PickupDate")]
    pickup_date: Option<String>,
    #[serde(default, alias = "ImageURL", alias = "ImageUrl")]
    image_url: Option<String>,
    #[serde(default, alias = "Status")]
    status: Option<String>,
}

impl From<DonationDto> for Donation {
    fn from(value: DonationDto) -> Self {
        Self {
            id: value.id,
            tool_name: value.tool_name.unwrap_or_default(),
            category: value.category.unwrap_or_default(),
            quantity: clamp_count(value.quantity),
            description: value.description.unwrap_or_default(),
            pickup_address: value.pickup_address.unwrap_or_default(),
            pickup_date: value.pickup_date.as_deref().and_then(parse_wire_date),
            image_url: non_blank(value.image_url),
            status: value
                .status
                .as_deref()
                .and_then(|raw| raw.parse().ok())
                .unwrap_or(DonationStatus::Pending),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Рекламный баннер в формате сервера.
pub struct AdDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "Title")]
    title: Option<String>,
    #[serde(default, alias = "Description")]
    description: Option<String>,
    #[serde(default, alias = "ImageURL", alias = "ImageUrl")]
    image_url: Option<String>,
    #[serde(default, alias = "Link")]
    link: Option<String>,
}

impl From<AdDto> for Ad {
    fn from(value: AdDto) -> Self {
        Self {
            id: value.id,
            title: value.title.unwrap_or_default(),
            description: value.description.unwrap_or_default(),
            image_url: value.image_url.unwrap_or_default(),
            link: value.link.unwrap_or_default(),
        }
    }
}

#[derive(Debug, Default, Deserialize)]
/// Профиль пользователя в формате сервера.
pub struct UserProfileDto {
    #[serde(default, alias = "ID")]
    id: Id,
    #[serde(default, alias = "Name")]
    name: Option<String>,
    #[serde(default, alias = "Role")]
    role: Option<String>,
    #[serde(default, alias = "NIK", alias = "Nik")]
    nik: Option<String>,
    #[serde(default, alias = "FotoKTP", alias = "FotoKtp")]
    foto_ktp: Option<String>,
}

impl From<UserProfileDto> for UserProfile {
    fn from(value: UserProfileDto) -> Self {
        Self {
            id: value.id,
            name: value.name.unwrap_or_default(),
            role: value.role.unwrap_or_default(),
            nik: non_blank(value.nik),
            foto_ktp: non_blank(value.foto_ktp),
        }
    }
}

/// Разбирает дату из `YYYY-MM-DD` или из RFC 3339 метки времени.
pub fn parse_wire_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    parse_wire_datetime(raw).map(|value| value.date_naive())
}

/// Разбирает метку времени; дата без времени считается полуночью UTC.
pub fn parse_wire_datetime(raw: &str) -> Option<DateTime<Utc>> {
    let raw = raw.trim();
    if let Ok(value) = DateTime::parse_from_rfc3339(raw) {
        return Some(value.with_timezone(&Utc));
    }
    if let Ok(value) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%d %H:%M:%S") {
        return Some(value.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|value| value.and_utc())
}

fn clamp_count(value: Option<i64>) -> u32 {
    value.unwrap_or(0).clamp(0, i64::from(u32::MAX)) as u32
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|value| !value.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn news_accepts_go_style_field_names() {
        let raw = r#"{"ID":3,"Title":"Donor darah","Content":"isi","ImageURL":"","CreatedAt":"2024-03-05T10:00:00+07:00"}"#;
        let dto: NewsDto = serde_json::from_str(raw).expect("dto should parse");
        let news = News::from(dto);

        assert_eq!(news.id, 3);
        assert_eq!(news.title, "Donor darah");
        assert!(news.image_url.is_none());
        let jakarta = chrono::FixedOffset::east_opt(7 * 3600).expect("valid offset");
        assert_eq!(news.display_date_in(&jakarta).as_deref(), Some("5 Maret 2024"));
    }

    #[test]
    fn news_accepts_snake_case_and_null_strings() {
        let raw = r#"{"id":4,"title":null,"content":"c","image_url":"https://x/y.png"}"#;
        let news = News::from(serde_json::from_str::<NewsDto>(raw).expect("dto should parse"));

        assert_eq!(news.title, "");
        assert_eq!(news.image_url.as_deref(), Some("https://x/y.png"));
        assert!(news.created_at.is_none());
    }

    #[test]
    fn tool_maps_type_and_clamps_negative_stock() {
        let raw = r#"{"id":1,"name":"Kursi Roda","type":"manual","stock":-2}"#;
        let tool = Tool::from(serde_json::from_str::<ToolDto>(raw).expect("dto should parse"));

        assert_eq!(tool.kind, "manual");
        assert_eq!(tool.stock, 0);
    }

    #[test]
    fn loan_takes_tool_name_from_nested_object_and_parses_dates() {
        let raw = r#"{"id":9,"tool_id":1,"Tool":{"Name":"Nebulizer"},"user":{"name":"Budi"},
            "loan_date":"2024-05-01T00:00:00Z","return_due":"2024-05-10","status":"ACTIVE"}"#;
        let loan = Loan::from(serde_json::from_str::<LoanDto>(raw).expect("dto should parse"));

        assert_eq!(loan.tool_name.as_deref(), Some("Nebulizer"));
        assert_eq!(loan.borrower_name.as_deref(), Some("Budi"));
        assert_eq!(loan.loan_date, NaiveDate::from_ymd_opt(2024, 5, 1));
        assert_eq!(loan.return_due, NaiveDate::from_ymd_opt(2024, 5, 10));
        assert_eq!(loan.status, LoanStatus::Active);
    }

    #[test]
    fn unknown_status_falls_back_to_pending() {
        let raw = r#"{"id":2,"status":"lost"}"#;
        let donation =
            Donation::from(serde_json::from_str::<DonationDto>(raw).expect("dto should parse"));
        assert_eq!(donation.status, DonationStatus::Pending);
    }

    #[test]
    fn list_body_handles_null_bare_and_wrapped() {
        let null: ListBody<AdDto> = serde_json::from_str("null").expect("null should parse");
        assert!(list_into::<AdDto, Ad>(null).is_empty());

        let bare: ListBody<AdDto> =
            serde_json::from_str(r#"[{"id":1,"title":"a"}]"#).expect("array should parse");
        assert_eq!(list_into::<AdDto, Ad>(bare).len(), 1);

        let wrapped: ListBody<AdDto> = serde_json::from_str(r#"{"data":[{"id":1},{"id":2}]}"#)
            .expect("wrapped should parse");
        assert_eq!(list_into::<AdDto, Ad>(wrapped).len(), 2);

        let wrapped_null: ListBody<AdDto> =
            serde_json::from_str(r#"{"data":null}"#).expect("wrapped null should parse");
        assert!(list_into::<AdDto, Ad>(wrapped_null).is_empty());
    }

    #[test]
    fn error_body_prefers_error_then_message() {
        let body: ErrorBody =
            serde_json::from_str(r#"{"error":" ","message":"stok habis"}"#).expect("parse");
        assert_eq!(body.into_message().as_deref(), Some("stok habis"));
    }

    #[test]
    fn profile_normalizes_blank_verification_fields() {
        let raw = r#"{"ID":5,"Name":"Admin","Role":"admin","NIK":"","FotoKTP":null}"#;
        let profile =
            UserProfile::from(serde_json::from_str::<UserProfileDto>(raw).expect("parse"));
        assert!(profile.nik.is_none());
        assert!(profile.is_admin());
        assert!(!profile.is_verified());
    }
}
