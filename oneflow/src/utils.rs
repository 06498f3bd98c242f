use http::header::{HeaderMap, SET_COOKIE};
use ring::rand::SecureRandom;

/// Fills `len` bytes from the system CSPRNG and returns them hex-encoded.
pub fn gen_random_hex(len: usize) -> Result<String, UtilError> {
    let rng = ring::rand::SystemRandom::new();
    let mut bytes = vec![0u8; len];
    rng.fill(&mut bytes)
        .map_err(|_| UtilError::Crypto("Failed to generate random bytes".to_string()))?;
    Ok(hex::encode(bytes))
}

/// Appends a `Set-Cookie` header rooted at `/`.
///
/// A non-positive `max_age` expires the cookie immediately.
pub(crate) fn header_set_cookie(
    headers: &mut HeaderMap,
    name: &str,
    value: &str,
    max_age: i64,
    secure: bool,
) -> Result<(), UtilError> {
    let mut cookie = format!("{name}={value}; SameSite=Lax; HttpOnly; Path=/; Max-Age={max_age}");
    if max_age <= 0 {
        cookie.push_str("; Expires=Thu, 01 Jan 1970 00:00:00 GMT");
    }
    if secure {
        cookie.push_str("; Secure");
    }
    tracing::debug!("Set-Cookie: {}", cookie);
    headers.append(
        SET_COOKIE,
        cookie
            .parse()
            .map_err(|_| UtilError::Cookie("Failed to parse cookie".to_string()))?,
    );
    Ok(())
}

use thiserror::Error;

#[derive(Debug, Error, Clone)]
pub enum UtilError {
    #[error("Crypto error: {0}")]
    Crypto(String),

    #[error("Cookie error: {0}")]
    Cookie(String),
}
