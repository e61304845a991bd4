//! Вложения-картинки форм и их превью.

use base64::Engine;
use base64::prelude::BASE64_STANDARD;

use crate::notify::Notifier;
use crate::validation::ValidationError;

/// Максимальный размер загружаемого фото: 2 МиБ.
pub const MAX_IMAGE_BYTES: u64 = 2 * 1024 * 1024;

#[derive(Clone, PartialEq, Eq)]
/// Выбранный пользователем файл.
pub struct ImageAttachment {
    /// Имя файла, с которым он уйдёт в multipart.
    pub file_name: String,
    /// MIME-тип.
    pub mime_type: String,
    /// Содержимое файла.
    pub bytes: Vec<u8>,
}

impl std::fmt::Debug for ImageAttachment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ImageAttachment")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageAttachment {
    /// Создаёт вложение. Если платформа не сообщила MIME-тип, он
    /// определяется по расширению файла.
    pub fn new(file_name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .map(str::to_string)
            .unwrap_or_else(|| mime_from_file_name(&file_name).to_string());

        Self {
            file_name,
            mime_type,
            bytes,
        }
    }

    /// Размер файла в байтах.
    pub fn size(&self) -> u64 {
        self.bytes.len() as u64
    }

    /// Превью в виде `data:`-URI для `<img src>`.
    pub fn data_uri(&self) -> String {
        format!(
            "data:{};base64,{}",
            self.mime_type,
            BASE64_STANDARD.encode(&self.bytes)
        )
    }
}

/// Проверяет размер файла до чтения его содержимого.
pub fn check_image_size(
    field: &'static str,
    size: u64,
    message: &'static str,
) -> Result<(), ValidationError> {
    if size > MAX_IMAGE_BYTES {
        return Err(ValidationError::new(field, message));
    }
    Ok(())
}

/// MIME-тип картинки по расширению; неизвестные расширения дают
/// `application/octet-stream`.
pub fn mime_from_file_name(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();

    match ext.as_str() {
        "jpg" | "jpeg" => "image/jpeg",
        "png" => "image/png",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
/// Поле формы с картинкой: сам файл и его превью.
pub struct ImageSlot {
    file: Option<ImageAttachment>,
    preview: Option<String>,
}

impl ImageSlot {
    /// Кладёт файл в слот и строит превью. Слишком большой файл отвергается,
    /// слот при этом не меняется.
    pub fn accept(
        &mut self,
        attachment: ImageAttachment,
        too_large: &'static str,
    ) -> Result<(), ValidationError> {
        check_image_size("image", attachment.size(), too_large)?;
        self.preview = Some(attachment.data_uri());
        self.file = Some(attachment);
        Ok(())
    }

    /// То же, что [`ImageSlot::accept`], но отказ сразу показывается
    /// пользователю уведомлением. Возвращает `true`, если файл принят.
    pub fn select(
        &mut self,
        attachment: ImageAttachment,
        too_large: &'static str,
        notifier: &mut Notifier,
    ) -> bool {
        match self.accept(attachment, too_large) {
            Ok(()) => true,
            Err(err) => {
                tracing::debug!(field = err.field, "image rejected: {err}");
                notifier.error(err.message);
                false
            }
        }
    }

    /// Убирает и файл, и превью.
    pub fn clear(&mut self) {
        self.file = None;
        self.preview = None;
    }

    /// Выбранный файл.
    pub fn file(&self) -> Option<&ImageAttachment> {
        self.file.as_ref()
    }

    /// Превью выбранного файла.
    pub fn preview(&self) -> Option<&str> {
        self.preview.as_deref()
    }

    /// Пуст ли слот.
    pub fn is_empty(&self) -> bool {
        self.file.is_none()
    }
}
