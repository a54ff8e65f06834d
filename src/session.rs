use ::aw::cookie::Key;
use ::base64::{engine::general_purpose::STANDARD, Engine as _};

#[derive(Debug, ::thiserror::Error)]
pub enum SessionKeyError {
    #[allow(dead_code)]
    #[error("SESSION_KEY must be set")]
    NotSet,
    #[error("SESSION_KEY must be in base64 format")]
    NotBase64(#[from] ::base64::DecodeError),
    #[error("SESSION_KEY must have 64 bytes, got {0}")]
    InvalidLength(usize),
}

/// ключ подписи cookie-сессии; в debug-сборке без `SESSION_KEY` берётся фиксированный
pub fn key(encoded: Option<&str>) -> Result<Key, SessionKeyError> {
    match encoded {
        Some(encoded) => decode(encoded),
        None => fallback(),
    }
}

fn decode(encoded: &str) -> Result<Key, SessionKeyError> {
    let key = STANDARD.decode(encoded.trim())?;
    if key.len() != 64 {
        return Err(SessionKeyError::InvalidLength(key.len()));
    }
    Ok(Key::from(key.as_slice()))
}

#[cfg(debug_assertions)]
fn fallback() -> Result<Key, SessionKeyError> {
    Ok(Key::from(&[8u8; 64][..]))
}

#[cfg(not(debug_assertions))]
fn fallback() -> Result<Key, SessionKeyError> {
    Err(SessionKeyError::NotSet)
}
