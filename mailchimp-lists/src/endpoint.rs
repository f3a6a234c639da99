use crate::{error::Error, subscriber::subscriber_hash};
use std::fmt::Display;

/// HTTP verbs used by the Lists API.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
    Patch,
}

impl Method {
    pub fn as_str(&self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Patch => "PATCH",
        }
    }
}

impl Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Patch => reqwest::Method::PATCH,
        }
    }
}

/// A Mailchimp endpoint: the verb plus a path template with `{token}`
/// placeholders, relative to the `/3.0` API root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Endpoint {
    pub method: Method,
    pub path: &'static str,
}

impl Endpoint {
    pub const fn new(method: Method, path: &'static str) -> Self {
        Self { method, path }
    }
}

pub const GET_LISTS: Endpoint = Endpoint::new(Method::Get, "/lists");
pub const GET_LIST: Endpoint = Endpoint::new(Method::Get, "/lists/{list_id}");
pub const GET_INTEREST_CATEGORIES: Endpoint =
    Endpoint::new(Method::Get, "/lists/{list_id}/interest-categories");
pub const GET_MERGE_FIELDS: Endpoint = Endpoint::new(Method::Get, "/lists/{list_id}/merge-fields");
pub const GET_MEMBERS: Endpoint = Endpoint::new(Method::Get, "/lists/{list_id}/members");
pub const GET_MEMBER: Endpoint =
    Endpoint::new(Method::Get, "/lists/{list_id}/members/{subscriber_hash}");
pub const GET_MEMBER_ACTIVITY: Endpoint = Endpoint::new(
    Method::Get,
    "/lists/{list_id}/members/{subscriber_hash}/activity",
);
pub const ADD_MEMBER: Endpoint = Endpoint::new(Method::Post, "/lists/{list_id}/members");
pub const UPDATE_MEMBER: Endpoint =
    Endpoint::new(Method::Patch, "/lists/{list_id}/members/{subscriber_hash}");
pub const GET_SEGMENTS: Endpoint = Endpoint::new(Method::Get, "/lists/{list_id}/segments");
pub const ADD_SEGMENT: Endpoint = Endpoint::new(Method::Post, "/lists/{list_id}/segments");
pub const UPDATE_SEGMENT: Endpoint =
    Endpoint::new(Method::Post, "/lists/{list_id}/segments/{segment_id}");

/// Values substituted into an [`Endpoint`] path template.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Tokens(Vec<(&'static str, String)>);

impl Tokens {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with<V: ToString>(mut self, name: &'static str, value: V) -> Self {
        self.0.push((name, value.to_string()));
        self
    }

    pub fn list(list_id: &str) -> Self {
        Self::new().with("list_id", list_id)
    }

    /// Adds the `subscriber_hash` token derived from `email`.
    pub fn with_member(self, email: &str) -> Self {
        self.with("subscriber_hash", subscriber_hash(email))
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.0
            .iter()
            .find(|(n, _)| *n == name)
            .map(|(_, v)| v.as_str())
    }

    /// Substitutes every `{name}` placeholder of `template`.
    ///
    /// Values are percent-encoded as path segments. A placeholder without a
    /// matching token is an [`Error::UnresolvedToken`].
    pub fn render(&self, template: &str) -> Result<String, Error> {
        let mut path = String::with_capacity(template.len());
        let mut rest = template;

        while let Some(start) = rest.find('{') {
            path.push_str(&rest[..start]);
            let after = &rest[start + 1..];
            let end = after.find('}').ok_or_else(|| Error::UnresolvedToken {
                template: template.to_string(),
                token: after.to_string(),
            })?;
            let name = &after[..end];
            let value = self.get(name).ok_or_else(|| Error::UnresolvedToken {
                template: template.to_string(),
                token: name.to_string(),
            })?;
            path.push_str(&urlencoding::encode(value));
            rest = &after[end + 1..];
        }
        path.push_str(rest);

        Ok(path)
    }
}
