//! Stateless HTTP request builder and response parser for the product API.
//!
//! # Design
//! `ProductClient` holds only the collection endpoint and carries no mutable
//! state between calls. Each CRUD operation is split into a `build_*` method
//! that produces an `HttpRequest` and a `parse_*` method that consumes an
//! `HttpResponse`. Whoever holds a `Transport` executes the round-trip in
//! between, keeping this module deterministic.
//!
//! Response normalization is shared by all four operations: a non-2xx status
//! becomes `ApiError::Server` with the body's `message`, and a 2xx with no
//! JSON body is "no data". What "no data" means depends on the operation.

use serde::Deserialize;
use tracing::debug;

use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{validate_id, Product, ProductDraft};

const GENERIC_FAILURE: &str = "request failed";
const DELETE_FAILURE: &str = "failed to delete product";

/// Synchronous, stateless client for the product API.
#[derive(Debug, Clone)]
pub struct ProductClient {
    base_url: String,
}

impl ProductClient {
    /// `base_url` is the collection endpoint itself, e.g.
    /// `http://localhost:3000/products`.
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn from_config(config: &ClientConfig) -> Self {
        Self::new(config.base_url())
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    pub fn build_list_products(&self) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Get,
            url: self.base_url.clone(),
            headers: vec![("accept".to_string(), "application/json".to_string())],
            body: None,
        }
    }

    pub fn build_create_product(&self, draft: &ProductDraft) -> Result<HttpRequest, ApiError> {
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        Ok(HttpRequest {
            method: HttpMethod::Post,
            url: self.base_url.clone(),
            headers: json_headers(),
            body: Some(body),
        })
    }

    /// Fails with `ApiError::Validation` for `id <= 0`; no request is built.
    pub fn build_update_product(&self, id: i64, draft: &ProductDraft) -> Result<HttpRequest, ApiError> {
        validate_id(id)?;
        let body = serde_json::to_string(draft).map_err(|e| ApiError::Serialization(e.to_string()))?;
        debug!(id, "building product update");
        Ok(HttpRequest {
            method: HttpMethod::Put,
            url: self.item_url(id),
            headers: json_headers(),
            body: Some(body),
        })
    }

    pub fn build_delete_product(&self, id: i64) -> HttpRequest {
        HttpRequest {
            method: HttpMethod::Delete,
            url: self.item_url(id),
            headers: Vec::new(),
            body: None,
        }
    }

    /// A successful response without a JSON body is an empty catalog.
    pub fn parse_list_products(&self, response: HttpResponse) -> Result<Vec<Product>, ApiError> {
        check_status(&response, GENERIC_FAILURE)?;
        match response.json_body() {
            Some(body) => serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string())),
            None => {
                debug!(status = response.status, "list returned no body");
                Ok(Vec::new())
            }
        }
    }

    pub fn parse_create_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, GENERIC_FAILURE)?;
        parse_entity(&response, Operation::Create)
    }

    pub fn parse_update_product(&self, response: HttpResponse) -> Result<Product, ApiError> {
        check_status(&response, GENERIC_FAILURE)?;
        parse_entity(&response, Operation::Update)
    }

    /// Any 2xx is success; the body, if any, is ignored.
    pub fn parse_delete_product(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, DELETE_FAILURE)
    }

    fn item_url(&self, id: i64) -> String {
        format!("{}/{id}", self.base_url)
    }
}

fn json_headers() -> Vec<(String, String)> {
    vec![("content-type".to_string(), "application/json".to_string())]
}

#[derive(Deserialize)]
struct ErrorBody {
    message: Option<String>,
}

/// Map a non-2xx status to `ApiError::Server`, preferring the body's message.
fn check_status(response: &HttpResponse, fallback: &str) -> Result<(), ApiError> {
    if response.is_success() {
        return Ok(());
    }
    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.message)
        .filter(|message| !message.is_empty())
        .unwrap_or_else(|| fallback.to_string());
    Err(ApiError::Server {
        status: response.status,
        message,
    })
}

fn parse_entity(response: &HttpResponse, operation: Operation) -> Result<Product, ApiError> {
    let body = response
        .json_body()
        .ok_or(ApiError::InconsistentResponse { operation })?;
    serde_json::from_str(body).map_err(|e| ApiError::Deserialization(e.to_string()))
}
