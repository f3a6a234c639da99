use crate::models::MailchimpError;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Request error: {0}")]
    Request(#[from] reqwest::Error),
    #[error("Mailchimp error: {0}")]
    Mailchimp(MailchimpError),
    #[error("Invalid base URL {0}: {1}")]
    InvalidBaseUrl(String, reqwest::Error),
    #[error("The API key has no datacenter suffix (e.g. `-us6`) and no base URL was given")]
    MissingDatacenter,
    #[error("Unresolved token `{token}` in path template {template}")]
    UnresolvedToken { template: String, token: String },
    #[error("Failed to decode response: {0}")]
    Decode(#[from] serde_json::Error),
}

impl Error {
    /// The HTTP status reported by Mailchimp, if this is an API error.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::Mailchimp(err) => Some(err.status),
            Error::Request(err) => err.status().map(|s| s.as_u16()),
            _ => None,
        }
    }
}
