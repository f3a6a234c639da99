use crate::{
    config::ClientConfig,
    endpoint::{Endpoint, Method, Tokens},
    error::Error,
    models::MailchimpError,
    params::Parameters,
    transport::Transport,
};
use reqwest::{IntoUrl, Url};
use secrecy::{ExposeSecret, Secret};
use serde_json::Value;
use std::sync::Arc;
use tracing::{debug, warn};

/// HTTP client for the Mailchimp Marketing API v3.
///
/// Handles authentication, URL construction, parameter encoding and response
/// decoding for every [`Endpoint`]. Wrap it in [`crate::Lists`] to call the
/// Lists operations.
#[derive(Debug)]
pub struct Client {
    base_url: String,
    api_key: Secret<String>,
    http: reqwest::Client,
}

impl Client {
    /// Initializes a client against an explicit base URL, e.g.
    /// `https://us2.api.mailchimp.com`.
    pub fn new<S: Into<String>>(base_url: &str, api_key: S) -> Result<Arc<Self>, Error> {
        Self::from_config(ClientConfig::new(api_key).with_base_url(base_url))
    }

    /// Initializes a client whose base URL is derived from the datacenter
    /// suffix of the API key (`<key>-us6` talks to `us6.api.mailchimp.com`).
    pub fn from_api_key<S: Into<String>>(api_key: S) -> Result<Arc<Self>, Error> {
        Self::from_config(ClientConfig::new(api_key))
    }

    pub fn from_config(config: ClientConfig) -> Result<Arc<Self>, Error> {
        let base_url = config
            .resolved_base_url()
            .ok_or(Error::MissingDatacenter)?;
        let url = parse_base_url(base_url.as_str())
            .map_err(|e| Error::InvalidBaseUrl(base_url.clone(), e))?;

        let http = reqwest::Client::builder()
            .timeout(config.timeout())
            .build()?;

        Ok(Arc::new(Self {
            base_url: url.as_str().trim_end_matches('/').to_string(),
            api_key: config.api_key,
            http,
        }))
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }
}

fn parse_base_url<U: IntoUrl>(url: U) -> reqwest::Result<Url> {
    url.into_url()
}

impl Transport for Client {
    async fn request(
        &self,
        endpoint: &Endpoint,
        tokens: &Tokens,
        params: Parameters,
    ) -> Result<Value, Error> {
        let path = tokens.render(endpoint.path)?;
        let url = format!("{}/3.0{}", self.base_url, path);
        debug!(method = %endpoint.method, %path, "Sending Mailchimp request");

        let req = self
            .http
            .request(endpoint.method.into(), url)
            .basic_auth("anystring", Some(self.api_key.expose_secret()));
        let req = match endpoint.method {
            Method::Get => req.query(&params.query_pairs()),
            Method::Post | Method::Patch if params.is_empty() => req,
            Method::Post | Method::Patch => req.json(&params),
        };

        let resp = req.send().await?;
        let status = resp.status();
        let body = resp.text().await?;

        if status.is_client_error() || status.is_server_error() {
            // Proxies and load balancers may answer with non-JSON bodies
            let err = serde_json::from_str::<MailchimpError>(&body)
                .unwrap_or_else(|_| MailchimpError::from_raw(status.as_u16(), &body));
            warn!(
                method = %endpoint.method,
                %path,
                status = status.as_u16(),
                "Mailchimp error: {err}"
            );
            return Err(Error::Mailchimp(err));
        }

        if body.trim().is_empty() {
            return Ok(Value::Null);
        }

        Ok(serde_json::from_str(&body)?)
    }
}
