use secrecy::{ExposeSecret, Secret};
use serde::Deserialize;
use std::time::Duration;

#[derive(Debug, Clone)]
pub struct Timeout(Duration);

impl Default for Timeout {
    fn default() -> Self {
        Self(Duration::from_secs(10))
    }
}

/// Settings a [`crate::Client`] is built from.
///
/// The API key is kept in a [`Secret`] so it never shows up in `Debug` output.
#[derive(Debug, Deserialize)]
pub struct ClientConfig {
    pub api_key: Secret<String>,
    /// Overrides the `https://<dc>.api.mailchimp.com` URL derived from the key.
    #[serde(default)]
    pub base_url: Option<String>,
    #[serde(default, deserialize_with = "timeout_secs::deserialize")]
    pub timeout: Timeout,
}

impl ClientConfig {
    pub fn new<S: Into<String>>(api_key: S) -> Self {
        Self {
            api_key: Secret::new(api_key.into()),
            base_url: None,
            timeout: Default::default(),
        }
    }

    pub fn with_base_url<S: Into<String>>(mut self, base_url: S) -> Self {
        self.base_url = Some(base_url.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Timeout(timeout);
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout.0
    }

    /// The datacenter encoded in the API key, i.e. the part after the last `-`.
    pub fn datacenter(&self) -> Option<&str> {
        self.api_key
            .expose_secret()
            .rsplit_once('-')
            .map(|(_, dc)| dc)
            .filter(|dc| !dc.is_empty() && dc.chars().all(|c| c.is_ascii_alphanumeric()))
    }

    /// The explicit base URL, or the one derived from the key's datacenter.
    pub fn resolved_base_url(&self) -> Option<String> {
        self.base_url.clone().or_else(|| {
            self.datacenter()
                .map(|dc| format!("https://{dc}.api.mailchimp.com"))
        })
    }
}

mod timeout_secs {
    use super::Timeout;
    use serde::{Deserialize, Deserializer};
    use std::time::Duration;

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Timeout, D::Error> {
        Ok(Timeout(Duration::from_secs(u64::deserialize(deserializer)?)))
    }
}
