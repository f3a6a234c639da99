use crate::{
    endpoint::{Endpoint, Tokens},
    error::Error,
    params::Parameters,
};
use serde_json::Value;
use std::{future::Future, sync::Arc};

/// The base request capability every Lists operation goes through.
///
/// An implementation renders the endpoint path with `tokens`, authenticates,
/// encodes `params` according to the verb, performs the call and decodes the
/// response. [`crate::Client`] is the HTTP implementation.
pub trait Transport: Send + Sync {
    fn request(
        &self,
        endpoint: &Endpoint,
        tokens: &Tokens,
        params: Parameters,
    ) -> impl Future<Output = Result<Value, Error>> + Send;
}

impl<T: Transport> Transport for Arc<T> {
    fn request(
        &self,
        endpoint: &Endpoint,
        tokens: &Tokens,
        params: Parameters,
    ) -> impl Future<Output = Result<Value, Error>> + Send {
        (**self).request(endpoint, tokens, params)
    }
}
