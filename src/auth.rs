//! The signed `Authorization` header for innertube API calls.
//!
//! The signature is time-bound and single-use, so it is recomputed for every
//! request from the current clock and the session-id cookie.

use cookie_store::CookieStore;
use sha1::{Digest, Sha1};

use crate::constants::HOMEPAGE_URL;

/// Cookie names that can carry the session id, in preference order.
const SESSION_COOKIE_NAMES: [&str; 2] = ["SAPISID", "__Secure-3PAPISID"];

#[derive(thiserror::Error, Debug)]
pub enum AuthError {
    #[error("no session-id cookie found; the session is not authenticated")]
    TokenUnavailable,
}

/// Build the `SAPISIDHASH` authorization value from the session cookies.
pub fn authorization_header(cookies: &CookieStore) -> Result<String, AuthError> {
    let sapisid = SESSION_COOKIE_NAMES
        .iter()
        .find_map(|name| {
            cookies
                .iter_any()
                .find(|c| c.name() == *name)
                .map(|c| c.value().to_string())
        })
        .ok_or(AuthError::TokenUnavailable)?;
    let now = chrono::Utc::now().timestamp();
    Ok(sapisidhash(now, &sapisid))
}

fn sapisidhash(now: i64, sapisid: &str) -> String {
    let mut hasher = Sha1::new();
    hasher.update(format!("{now} {sapisid} {HOMEPAGE_URL}").as_bytes());
    let digest = hex::encode(hasher.finalize());
    format!("SAPISIDHASH {now}_{digest}")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn store_with(name: &str, value: &str) -> CookieStore {
        let cookie = cookie_store::RawCookie::build(name, value)
            .domain("youtube.com")
            .path("/")
            .finish();
        let mut store = CookieStore::default();
        store
            .insert_raw(&cookie, &"https://www.youtube.com/".parse().unwrap())
            .unwrap();
        store
    }

    #[test]
    fn digest_is_deterministic_for_a_fixed_timestamp() {
        let value = sapisidhash(1_600_000_000, "abc123");
        let mut hasher = Sha1::new();
        hasher.update(b"1600000000 abc123 https://www.youtube.com");
        let expected = format!("SAPISIDHASH 1600000000_{}", hex::encode(hasher.finalize()));
        assert_eq!(value, expected);
    }

    #[test]
    fn header_shape() {
        let store = store_with("SAPISID", "secret");
        let header = authorization_header(&store).unwrap();
        let rest = header.strip_prefix("SAPISIDHASH ").unwrap();
        let (ts, digest) = rest.split_once('_').unwrap();
        assert!(ts.parse::<i64>().is_ok());
        assert_eq!(digest.len(), 40);
        assert!(digest.bytes().all(|b| b.is_ascii_hexdigit()));
    }

    #[test]
    fn secure_cookie_is_accepted() {
        let store = store_with("__Secure-3PAPISID", "secret");
        assert!(authorization_header(&store).is_ok());
    }

    #[test]
    fn empty_jar_is_unauthenticated() {
        let store = CookieStore::default();
        assert!(matches!(
            authorization_header(&store),
            Err(AuthError::TokenUnavailable)
        ));
    }
}
