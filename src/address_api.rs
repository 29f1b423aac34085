use log::error;
use reqwest::Client;
use serde_json::Value;

use super::AddressAPI;
use crate::error::{Error, Result};
use crate::models::{Feature, Params};

pub const DEFAULT_LIMIT: u32 = 10;

pub struct AddressAPIR {
    client: Client,
    base_url: String,
}

impl AddressAPIR {
    const API_BASE_URL: &str = "https://data.geoplateforme.fr/geocodage";

    pub fn new() -> Self {
        Self::with_client(Client::new())
    }

    /// Reuse an existing session handle instead of opening a new one.
    pub fn with_client(client: Client) -> Self {
        Self::with_base_url(Self::API_BASE_URL, client)
    }

    /// Point at a self-hosted instance of the geocoder.
    pub fn with_base_url(base_url: impl Into<String>, client: Client) -> Self {
        Self {
            client,
            base_url: base_url.into(),
        }
    }

    /// Drops this wrapper's handle on the shared connection pool. Other
    /// clones of the same `Client` keep the pool alive.
    pub fn close(self) {}

    async fn request(
        &self,
        path: &str,
        params: &Params,
    ) -> std::result::Result<Value, reqwest::Error> {
        let response = self
            .client
            .get(format!("{}/{path}", self.base_url))
            .query(&params.to_query())
            .send()
            .await?
            .error_for_status()?;
        response.json().await
    }
}

impl AddressAPI for AddressAPIR {
    async fn search(&self, query: &str, params: Params) -> Result<Vec<Feature>> {
        let mut merged = Params::new().set("q", query);
        if !params.contains("limit") {
            merged = merged.set("limit", DEFAULT_LIMIT);
        }
        merged.extend(params);

        let addresses = match self.request("search", &merged).await {
            Ok(addresses) => addresses,
            Err(err) => {
                error!("Failed to query address: {err}");
                return Err(Error::NotFound {
                    message: "Address not found.".to_string(),
                    source: Some(err),
                });
            }
        };

        check_response(addresses)
    }

    async fn reverse(&self, params: Params) -> Result<Vec<Feature>> {
        let addresses = match self.request("reverse", &params).await {
            Ok(addresses) => addresses,
            Err(err) => {
                error!("Failed to query address: {err}");
                return Err(Error::NotFound {
                    message: "Address not found.".to_string(),
                    source: Some(err),
                });
            }
        };

        check_response(addresses)
    }
}

/// Decide whether a decoded body is a usable result list.
///
/// A non-empty object carrying `features` wins outright: a non-empty array is
/// the success path, an empty (or null) one means the service found nothing.
/// Only then is the body inspected for being malformed or carrying an
/// explicit `error` field.
pub(crate) fn check_response(body: Value) -> Result<Vec<Feature>> {
    match body {
        Value::Object(mut map) if !map.is_empty() && map.contains_key("features") => {
            match map.remove("features") {
                Some(Value::Array(features)) if !features.is_empty() => {
                    Ok(features.into_iter().map(Feature).collect())
                }
                Some(Value::Array(_)) | Some(Value::Null) => Err(Error::not_found(
                    "No addresses found for the given query.",
                )),
                _ => Err(Error::invalid_response(
                    "Invalid response from address service.",
                )),
            }
        }
        Value::Object(map) if !map.is_empty() => match map.get("error") {
            Some(Value::String(message)) => {
                Err(Error::invalid_response(format!("Error in response: {message}")))
            }
            Some(other) => Err(Error::invalid_response(format!("Error in response: {other}"))),
            None => Err(Error::invalid_response("No features found in the response.")),
        },
        _ => Err(Error::invalid_response(
            "Invalid response from address service.",
        )),
    }
}
