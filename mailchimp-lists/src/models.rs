use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt::Display;

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct MailchimpMemberTag {
    pub id: u64,
    pub name: String,
}

/// The fields of a list member the pager and the CLI rely on.
///
/// Everything but `id` and `email_address` may be missing, e.g. when the
/// request narrows the response with `fields`.
#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct MailchimpMember {
    pub id: String,
    pub email_address: String,
    #[serde(default)]
    pub unique_email_id: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub merge_fields: Map<String, Value>,
    #[serde(default)]
    pub interests: Map<String, Value>,
    #[serde(default)]
    pub last_changed: String,
    #[serde(default)]
    pub tags: Vec<MailchimpMemberTag>,
    #[serde(default)]
    pub list_id: String,
}

/// One page of `GET /lists/{list_id}/members`.
#[derive(Deserialize, Serialize, Clone, Debug, Default)]
pub struct MembersPage {
    #[serde(default)]
    pub members: Vec<MailchimpMember>,
    pub total_items: Option<usize>,
}

#[derive(Deserialize, Serialize, Clone, Debug, Default, PartialEq)]
pub struct MailchimpFieldError {
    #[serde(default)]
    pub field: String,
    #[serde(default)]
    pub message: String,
}

/// Problem detail document returned by Mailchimp on 4xx/5xx responses.
#[derive(Debug, Clone, Deserialize, Serialize, Default, PartialEq)]
pub struct MailchimpError {
    #[serde(default)]
    pub r#type: String,
    #[serde(default)]
    pub title: String,
    pub status: u16,
    pub detail: Option<String>,
    pub instance: Option<String>,
    #[serde(default)]
    pub errors: Vec<MailchimpFieldError>,
}

impl MailchimpError {
    /// Wraps a non-JSON error body (e.g. from a proxy) in a Mailchimp-shaped error.
    pub fn from_raw(status: u16, body: &str) -> Self {
        Self {
            title: "Unexpected response".to_string(),
            status,
            detail: (!body.is_empty()).then(|| body.to_string()),
            ..Default::default()
        }
    }
}

impl Display for MailchimpError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} ({}): {}",
            self.title,
            self.status,
            self.detail.clone().unwrap_or_default()
        )?;
        for err in &self.errors {
            write!(f, "; {}: {}", err.field, err.message)?;
        }
        Ok(())
    }
}
