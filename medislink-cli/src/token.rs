use std::fs;
use std::io;
use std::path::Path;

/// Файл с токеном в текущем каталоге.
pub const TOKEN_FILE: &str = ".medislink_token";
/// Переменная окружения с токеном; важнее файла.
pub const TOKEN_ENV: &str = "MEDISLINK_TOKEN";

pub fn parse_token_content(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

/// Токен из `MEDISLINK_TOKEN` или из `.medislink_token`.
pub fn load_token() -> io::Result<Option<String>> {
    if let Some(token) = std::env::var(TOKEN_ENV)
        .ok()
        .as_deref()
        .and_then(parse_token_content)
    {
        return Ok(Some(token));
    }

    if !Path::new(TOKEN_FILE).exists() {
        return Ok(None);
    }

    let raw = fs::read_to_string(TOKEN_FILE)?;
    Ok(parse_token_content(&raw))
}

/// Удаляет сохранённый токен. Отсутствие файла не ошибка.
pub fn remove_token() -> io::Result<()> {
    match fs::remove_file(TOKEN_FILE) {
        Err(err) if err.kind() != io::ErrorKind::NotFound => Err(err),
        _ => Ok(()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_content_trims_whitespace() {
        let token = parse_token_content("  abc.def.ghi  \n");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_content_rejects_blank() {
        let token = parse_token_content("   ");
        assert!(token.is_none());
    }
}
