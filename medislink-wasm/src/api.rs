use async_trait::async_trait;
use gloo_net::http::{Request, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};
use wasm_bindgen::JsValue;
use web_sys::{Blob, BlobPropertyBag, FormData};

use medislink_core::forms::{IMAGE_FIELD, MultipartPayload};
use medislink_core::wire::{
    AdDto, DonationDto, Envelope, ErrorBody, ListBody, LoanDto, NewsDto, ToolDto, UserProfileDto,
    list_into,
};
use medislink_core::{
    Ad, AdPayload, AdminApi, Donation, DonationPayload, Id, Loan, LoanRequest, LoanStatus, News,
    NewsPayload, Tool, ToolPayload, UserApi, UserProfile,
};

const API_BASE_URL: &str = match option_env!("MEDISLINK_API_URL") {
    Some(value) => value,
    None => "http://127.0.0.1:8080",
};

#[derive(Debug, Clone)]
pub(crate) enum ApiError {
    Network(String),
    Http { status: u16, message: String },
    Decode(String),
}

impl core::fmt::Display for ApiError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Network(msg) => write!(f, "network error: {msg}"),
            Self::Http { status, message } => write!(f, "http error {status}: {message}"),
            Self::Decode(msg) => write!(f, "decode error: {msg}"),
        }
    }
}

fn endpoint(path: &str) -> String {
    format!(
        "{}/{}",
        API_BASE_URL.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

fn network(err: impl core::fmt::Display) -> ApiError {
    ApiError::Network(err.to_string())
}

fn js_error(err: JsValue) -> ApiError {
    ApiError::Network(format!("{err:?}"))
}

async fn parse_error_body(response: Response) -> ApiError {
    let status = response.status();
    let text = response.text().await.unwrap_or_default();

    let fallback = match status {
        400 => "bad request".to_string(),
        401 => "unauthorized".to_string(),
        403 => "forbidden".to_string(),
        404 => "not found".to_string(),
        500..=599 => "server error".to_string(),
        _ => format!("http status {status}"),
    };

    let message = serde_json::from_str::<ErrorBody>(&text)
        .ok()
        .and_then(ErrorBody::into_message)
        .unwrap_or(fallback);

    ApiError::Http { status, message }
}

async fn ensure_ok(response: Response) -> Result<Response, ApiError> {
    if !response.ok() {
        return Err(parse_error_body(response).await);
    }
    Ok(response)
}

/// Клиент REST API для браузера. Токен берётся из состояния приложения в
/// момент создания.
#[derive(Debug, Clone, Default)]
pub(crate) struct WasmApi {
    token: Option<String>,
}

impl WasmApi {
    pub(crate) fn new(token: Option<String>) -> Self {
        Self { token }
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.token {
            Some(token) => request.header("Authorization", &format!("Bearer {token}")),
            None => request,
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self
            .authorize(Request::get(&endpoint(path)))
            .send()
            .await
            .map_err(network)?;
        let response = ensure_ok(response).await?;

        response
            .json::<T>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }

    async fn get_one<D, T>(&self, path: &str) -> Result<T, ApiError>
    where
        D: DeserializeOwned + Into<T>,
    {
        let body: Envelope<D> = self.get_json(path).await?;
        Ok(body.into_inner().into())
    }

    async fn get_list<D, T>(&self, path: &str) -> Result<Vec<T>, ApiError>
    where
        D: DeserializeOwned + Into<T>,
    {
        let response = self
            .authorize(Request::get(&endpoint(path)))
            .send()
            .await
            .map_err(network)?;
        let text = ensure_ok(response).await?.text().await.map_err(network)?;
        if text.trim().is_empty() {
            return Ok(Vec::new());
        }

        let body: ListBody<D> =
            serde_json::from_str(&text).map_err(|err| ApiError::Decode(err.to_string()))?;
        Ok(list_into(body))
    }

    async fn send_json<T: Serialize + ?Sized>(
        &self,
        request: RequestBuilder,
        body: &T,
    ) -> Result<(), ApiError> {
        let response = self
            .authorize(request)
            .json(body)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        ensure_ok(response).await?;
        Ok(())
    }

    async fn send_empty(&self, request: RequestBuilder) -> Result<(), ApiError> {
        let response = self.authorize(request).send().await.map_err(network)?;
        ensure_ok(response).await?;
        Ok(())
    }

    async fn send_multipart<P: MultipartPayload + ?Sized>(
        &self,
        path: &str,
        payload: &P,
    ) -> Result<(), ApiError> {
        let form = form_data(payload)?;
        let response = self
            .authorize(Request::post(&endpoint(path)))
            .body(form)
            .map_err(network)?
            .send()
            .await
            .map_err(network)?;
        ensure_ok(response).await?;
        Ok(())
    }
}

fn form_data<P: MultipartPayload + ?Sized>(payload: &P) -> Result<FormData, ApiError> {
    let form = FormData::new().map_err(js_error)?;
    for (name, value) in payload.text_fields() {
        form.append_with_str(name, &value).map_err(js_error)?;
    }

    if let Some(image) = payload.image() {
        let bytes = js_sys::Uint8Array::from(image.bytes.as_slice());
        let parts = js_sys::Array::of1(&bytes);
        let options = BlobPropertyBag::new();
        options.set_type(&image.mime_type);
        let blob = Blob::new_with_u8_array_sequence_and_options(&parts, &options)
            .map_err(js_error)?;
        form.append_with_blob_and_filename(IMAGE_FIELD, &blob, &image.file_name)
            .map_err(js_error)?;
    }
    Ok(form)
}

#[derive(Serialize)]
struct LoanStatusRequest {
    status: LoanStatus,
}

#[derive(Serialize)]
struct ApproveDonationRequest<'a> {
    condition: &'a str,
}

#[async_trait(?Send)]
impl UserApi for WasmApi {
    type Error = ApiError;

    async fn get_tool(&self, id: Id) -> Result<Tool, ApiError> {
        self.get_one::<ToolDto, Tool>(&format!("/api/tools/{id}")).await
    }

    async fn get_news_item(&self, id: Id) -> Result<News, ApiError> {
        self.get_one::<NewsDto, News>(&format!("/api/news/{id}")).await
    }

    async fn current_profile(&self) -> Result<UserProfile, ApiError> {
        self.get_one::<UserProfileDto, UserProfile>("/api/users/me")
            .await
    }

    async fn create_donation(&self, payload: &DonationPayload) -> Result<(), ApiError> {
        self.send_multipart("/api/donations", payload).await
    }

    async fn create_loan(&self, request: &LoanRequest) -> Result<(), ApiError> {
        self.send_json(Request::post(&endpoint("/api/loans")), request)
            .await
    }
}

#[async_trait(?Send)]
impl AdminApi for WasmApi {
    async fn list_tools(&self) -> Result<Vec<Tool>, ApiError> {
        self.get_list::<ToolDto, Tool>("/api/tools").await
    }

    async fn list_loans(&self) -> Result<Vec<Loan>, ApiError> {
        self.get_list::<LoanDto, Loan>("/api/admin/loans").await
    }

    async fn list_news(&self) -> Result<Vec<News>, ApiError> {
        self.get_list::<NewsDto, News>("/api/news").await
    }

    async fn list_ads(&self) -> Result<Vec<Ad>, ApiError> {
        self.get_list::<AdDto, Ad>("/api/ads").await
    }

    async fn list_donations(&self) -> Result<Vec<Donation>, ApiError> {
        self.get_list::<DonationDto, Donation>("/api/admin/donations")
            .await
    }

    async fn create_tool(&self, payload: &ToolPayload) -> Result<(), ApiError> {
        self.send_multipart("/api/admin/tools", payload).await
    }

    async fn delete_tool(&self, id: Id) -> Result<(), ApiError> {
        self.send_empty(Request::delete(&endpoint(&format!("/api/admin/tools/{id}"))))
            .await
    }

    async fn update_loan_status(&self, id: Id, status: LoanStatus) -> Result<(), ApiError> {
        self.send_json(
            Request::put(&endpoint(&format!("/api/admin/loans/{id}/status"))),
            &LoanStatusRequest { status },
        )
        .await
    }

    async fn create_news(&self, payload: &NewsPayload) -> Result<(), ApiError> {
        self.send_multipart("/api/admin/news", payload).await
    }

    async fn create_ad(&self, payload: &AdPayload) -> Result<(), ApiError> {
        self.send_json(Request::post(&endpoint("/api/admin/ads")), payload)
            .await
    }

    async fn delete_ad(&self, id: Id) -> Result<(), ApiError> {
        self.send_empty(Request::delete(&endpoint(&format!("/api/admin/ads/{id}"))))
            .await
    }

    async fn receive_donation(&self, id: Id) -> Result<(), ApiError> {
        self.send_empty(Request::put(&endpoint(&format!(
            "/api/admin/donations/{id}/receive"
        ))))
        .await
    }

    async fn approve_donation(&self, id: Id, condition: &str) -> Result<(), ApiError> {
        self.send_json(
            Request::put(&endpoint(&format!("/api/admin/donations/{id}/approve"))),
            &ApproveDonationRequest { condition },
        )
        .await
    }
}
