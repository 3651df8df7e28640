use axum::http::HeaderMap;
use percent_encoding::{percent_decode_str, utf8_percent_encode, NON_ALPHANUMERIC};
use serde::{Deserialize, Serialize};

use crate::session::cookie_value;

pub const FLASH_COOKIE: &str = "_flash";

/// One-shot feedback message surfaced on the next rendered page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Flash {
    pub message: String,
    pub level: String,
}

impl Flash {
    pub fn success(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: "success".to_string(),
        }
    }

    pub fn danger(message: &str) -> Self {
        Self {
            message: message.to_string(),
            level: "danger".to_string(),
        }
    }
}

/// Cookie carrying queued messages to the next rendered page.
pub fn flash_cookie(flashes: &[Flash]) -> String {
    let json = serde_json::to_string(flashes).unwrap_or_default();
    let encoded = utf8_percent_encode(&json, NON_ALPHANUMERIC);
    format!("{FLASH_COOKIE}={encoded}; Path=/")
}

fn clear_cookie() -> String {
    format!("{FLASH_COOKIE}=; Path=/; Max-Age=0")
}

/// Drain queued messages. Returns the messages and, when any were read,
/// the Set-Cookie value that clears the queue.
pub fn take(headers: &HeaderMap) -> (Vec<Flash>, Option<String>) {
    let Some(raw) = cookie_value(headers, FLASH_COOKIE) else {
        return (Vec::new(), None);
    };
    let decoded = percent_decode_str(&raw)
        .decode_utf8()
        .map(|value| value.into_owned())
        .unwrap_or_default();
    let flashes = serde_json::from_str(&decoded).unwrap_or_default();
    (flashes, Some(clear_cookie()))
}
