use axum::http::HeaderValue;
use std::env;
use std::net::{IpAddr, Ipv4Addr};

use crate::webhook::DEFAULT_TIMEOUT_SECS;

pub struct Config {
    pub host: IpAddr,
    pub port: u16,
    pub request_timeout_secs: u64,
    /// Origins allowed to call the API cross-origin. Empty means same-origin only.
    pub cors_origins: Vec<HeaderValue>,
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds a config from any key lookup, falling back to defaults for
    /// missing or unparseable values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            host: lookup("HOST")
                .and_then(|h| h.parse().ok())
                .unwrap_or(IpAddr::V4(Ipv4Addr::LOCALHOST)),
            port: lookup("PORT")
                .and_then(|p| p.parse().ok())
                .unwrap_or(3000),
            request_timeout_secs: lookup("WEBHOOK_TIMEOUT_SECS")
                .and_then(|s| s.parse().ok())
                .filter(|secs: &u64| *secs > 0)
                .unwrap_or(DEFAULT_TIMEOUT_SECS),
            cors_origins: lookup("CORS_ORIGINS")
                .map(|list| {
                    list.split(',')
                        .map(str::trim)
                        .filter(|origin| !origin.is_empty())
                        .filter_map(|origin| HeaderValue::from_str(origin).ok())
                        .collect()
                })
                .unwrap_or_default(),
        }
    }
}
