//! Токен доступа в `localStorage`. Записывает его портал входа, фронтенд
//! только читает и удаляет при выходе.

const TOKEN_KEY: &str = "token";

fn parse_token(raw: &str) -> Option<String> {
    let token = raw.trim().to_string();
    if token.is_empty() {
        return None;
    }
    Some(token)
}

fn local_storage() -> Result<web_sys::Storage, String> {
    web_sys::window()
        .ok_or("no window")?
        .local_storage()
        .map_err(|err| format!("localStorage access denied: {err:?}"))?
        .ok_or_else(|| "localStorage is disabled".to_string())
}

pub(crate) fn load_token() -> Option<String> {
    let raw = local_storage().ok()?.get_item(TOKEN_KEY).ok()??;
    parse_token(&raw)
}

pub(crate) fn clear_token() -> Result<(), String> {
    local_storage()?
        .remove_item(TOKEN_KEY)
        .map_err(|err| format!("failed to remove {TOKEN_KEY}: {err:?}"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parse_token_trims_and_returns_value() {
        let token = parse_token("  abc.def.ghi  ");
        assert_eq!(token.as_deref(), Some("abc.def.ghi"));
    }

    #[test]
    fn parse_token_rejects_blank() {
        assert!(parse_token("   ").is_none());
    }
}
