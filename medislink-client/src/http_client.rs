use reqwest::multipart::{Form, Part};
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::{Serialize, de::DeserializeOwned};

use medislink_core::forms::{IMAGE_FIELD, MultipartPayload};
use medislink_core::wire::{Envelope, ErrorBody, ListBody, list_into};
use medislink_core::{Id, LoanStatus};

use crate::config::ClientConfig;
use crate::error::{MedisClientError, MedisClientResult};

#[derive(Debug, Serialize)]
struct LoanStatusRequestDto {
    status: LoanStatus,
}

#[derive(Debug, Serialize)]
struct ApproveDonationRequestDto<'a> {
    condition: &'a str,
}

#[derive(Debug, Clone)]
/// HTTP-клиент для REST API MedisLink.
pub struct HttpClient {
    base_url: String,
    client: Client,
}

impl HttpClient {
    /// Создаёт HTTP-клиент с адресом и таймаутами из настроек.
    pub fn new(config: &ClientConfig) -> MedisClientResult<Self> {
        let client = Client::builder()
            .connect_timeout(config.connect_timeout)
            .timeout(config.request_timeout)
            .build()?;

        Ok(Self {
            base_url: config.base_url.clone(),
            client,
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!(
            "{}/{}",
            self.base_url.trim_end_matches('/'),
            path.trim_start_matches('/')
        )
    }

    async fn decode_error(response: Response) -> MedisClientError {
        let status = response.status();

        let message = match response.text().await {
            Ok(body) => serde_json::from_str::<ErrorBody>(&body)
                .ok()
                .and_then(ErrorBody::into_message),
            Err(_) => None,
        };
        tracing::warn!(%status, message = message.as_deref(), "request rejected");
        MedisClientError::from_http_status(status, message)
    }

    fn request(&self, method: Method, path: &str, token: Option<&str>) -> RequestBuilder {
        tracing::debug!(%method, path, "sending request");
        let request = self.client.request(method, self.endpoint(path));
        match token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn execute(request: RequestBuilder) -> MedisClientResult<Response> {
        let response = request
            .send()
            .await
            .map_err(MedisClientError::from_reqwest)?;
        if !response.status().is_success() {
            return Err(Self::decode_error(response).await);
        }
        Ok(response)
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
    ) -> MedisClientResult<T> {
        Self::execute(self.request(Method::GET, path, token))
            .await?
            .json::<T>()
            .await
            .map_err(MedisClientError::from_reqwest)
    }

    /// Одна сущность, с обёрткой `{ "data": ... }` или без неё.
    pub async fn get_one<D, T>(&self, path: &str, token: Option<&str>) -> MedisClientResult<T>
    where
        D: DeserializeOwned + Into<T>,
    {
        let body: Envelope<D> = self.get_json(path, token).await?;
        Ok(body.into_inner().into())
    }

    /// Список; `null` и пустое тело дают пустой список.
    pub async fn get_list<D, T>(&self, path: &str, token: Option<&str>) -> MedisClientResult<Vec<T>>
    where
        D: DeserializeOwned + Into<T>,
    {
        let response = Self::execute(self.request(Method::GET, path, token)).await?;
        let raw = response
            .bytes()
            .await
            .map_err(MedisClientError::from_reqwest)?;
        if raw.iter().all(u8::is_ascii_whitespace) {
            return Ok(Vec::new());
        }

        let body: ListBody<D> = serde_json::from_slice(&raw)
            .map_err(|err| MedisClientError::InvalidRequest(format!("malformed list: {err}")))?;
        Ok(list_into(body))
    }

    /// универсальный helper для отправки запросов с json-payload
    pub async fn send_json<TReq>(
        &self,
        method: Method,
        path: &str,
        body: &TReq,
        token: Option<&str>,
    ) -> MedisClientResult<()>
    where
        TReq: Serialize + ?Sized,
    {
        Self::execute(self.request(method, path, token).json(body)).await?;
        Ok(())
    }

    /// Запрос без тела (DELETE, PUT-переходы статуса).
    pub async fn send_empty(
        &self,
        method: Method,
        path: &str,
        token: Option<&str>,
    ) -> MedisClientResult<()> {
        Self::execute(self.request(method, path, token)).await?;
        Ok(())
    }

    /// Отправляет `multipart/form-data`: текстовые поля и необязательный файл.
    pub async fn send_multipart<P>(
        &self,
        path: &str,
        payload: &P,
        token: Option<&str>,
    ) -> MedisClientResult<()>
    where
        P: MultipartPayload + ?Sized,
    {
        let form = multipart_form(payload)?;
        Self::execute(self.request(Method::POST, path, token).multipart(form)).await?;
        Ok(())
    }

    /// Меняет статус заявки на аренду.
    pub async fn update_loan_status(
        &self,
        token: Option<&str>,
        id: Id,
        status: LoanStatus,
    ) -> MedisClientResult<()> {
        self.send_json(
            Method::PUT,
            &format!("/api/admin/loans/{id}/status"),
            &LoanStatusRequestDto { status },
            token,
        )
        .await
    }

    /// Принимает пожертвование в инвентарь.
    pub async fn approve_donation(
        &self,
        token: Option<&str>,
        id: Id,
        condition: &str,
    ) -> MedisClientResult<()> {
        self.send_json(
            Method::PUT,
            &format!("/api/admin/donations/{id}/approve"),
            &ApproveDonationRequestDto { condition },
            token,
        )
        .await
    }
}

fn multipart_form<P: MultipartPayload + ?Sized>(payload: &P) -> MedisClientResult<Form> {
    let mut form = Form::new();
    for (name, value) in payload.text_fields() {
        form = form.text(name, value);
    }

    if let Some(image) = payload.image() {
        let part = Part::bytes(image.bytes.clone())
            .file_name(image.file_name.clone())
            .mime_str(&image.mime_type)?;
        form = form.part(IMAGE_FIELD, part);
    }
    Ok(form)
}
