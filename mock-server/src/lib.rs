//! In-memory implementation of the product REST API.
//!
//! Serves `/products` and `/products/{id}`. Ids are assigned from a counter
//! starting at 1 and listed in ascending order. Every error response carries
//! a `{"message": ...}` JSON body. `Catalog::fail_next` queues a 500 for the
//! next request so clients can exercise their failure paths.

use std::{
    collections::{BTreeMap, VecDeque},
    sync::Arc,
};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection},
        Path, State,
    },
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tokio::{net::TcpListener, sync::RwLock};
use tower_http::trace::TraceLayer;
use tracing::info;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    pub price: Decimal,
    pub sku: String,
}

#[derive(Debug, Deserialize)]
pub struct ProductInput {
    pub name: String,
    pub price: Decimal,
    pub sku: String,
}

impl ProductInput {
    fn validate(&self) -> Result<(), AppError> {
        check_text("name", &self.name, 100)?;
        check_text("sku", &self.sku, 50)?;
        if self.price < Decimal::new(1, 2) {
            return Err(AppError::Invalid("price must be at least 0.01".to_string()));
        }
        Ok(())
    }

    fn into_product(self, id: i64) -> Product {
        Product {
            id,
            name: self.name,
            price: self.price,
            sku: self.sku,
        }
    }
}

/// Blank values are missing; length counts chars of the untrimmed value.
fn check_text(field: &str, value: &str, max: usize) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Invalid(format!("{field} is required")));
    }
    if value.chars().count() > max {
        return Err(AppError::Invalid(format!("{field} must be at most {max} characters")));
    }
    Ok(())
}

#[derive(Debug, Error)]
pub enum AppError {
    #[error("product {0} not found")]
    NotFound(i64),
    #[error("{0}")]
    Invalid(String),
    #[error("{0}")]
    Injected(String),
    /// An extractor refused the request before a handler ran.
    #[error("{message}")]
    Rejected { status: StatusCode, message: String },
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::Rejected {
            status: rejection.status(),
            message: rejection.body_text(),
        }
    }
}

#[derive(Serialize)]
struct ErrorBody {
    message: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match &self {
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Invalid(_) => StatusCode::UNPROCESSABLE_ENTITY,
            AppError::Injected(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::Rejected { status, .. } => *status,
        };
        let body = ErrorBody {
            message: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}

#[derive(Default)]
struct Inner {
    products: BTreeMap<i64, Product>,
    next_id: i64,
    faults: VecDeque<String>,
}

impl Inner {
    fn take_fault(&mut self) -> Result<(), AppError> {
        match self.faults.pop_front() {
            Some(message) => Err(AppError::Injected(message)),
            None => Ok(()),
        }
    }
}

/// Shared catalog handle. Clones see the same data.
#[derive(Clone, Default)]
pub struct Catalog {
    inner: Arc<RwLock<Inner>>,
}

impl Catalog {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a product directly, bypassing validation.
    pub async fn seed(&self, name: &str, price: Decimal, sku: &str) -> Product {
        let mut inner = self.inner.write().await;
        inner.next_id += 1;
        let product = Product {
            id: inner.next_id,
            name: name.to_string(),
            price,
            sku: sku.to_string(),
        };
        inner.products.insert(product.id, product.clone());
        product
    }

    /// Answer the next request with 500 and `message`.
    pub async fn fail_next(&self, message: &str) {
        self.inner.write().await.faults.push_back(message.to_string());
    }

    pub async fn products(&self) -> Vec<Product> {
        self.inner.read().await.products.values().cloned().collect()
    }
}

pub fn app() -> Router {
    app_with(Catalog::new())
}

pub fn app_with(catalog: Catalog) -> Router {
    Router::new()
        .route("/products", get(list_products).post(create_product))
        .route("/products/{id}", axum::routing::put(update_product).delete(delete_product))
        .layer(TraceLayer::new_for_http())
        .with_state(catalog)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    serve(listener, Catalog::new()).await
}

pub async fn serve(listener: TcpListener, catalog: Catalog) -> Result<(), std::io::Error> {
    axum::serve(listener, app_with(catalog)).await
}

async fn list_products(State(catalog): State<Catalog>) -> Result<Json<Vec<Product>>, AppError> {
    let mut inner = catalog.inner.write().await;
    inner.take_fault()?;
    Ok(Json(inner.products.values().cloned().collect()))
}

async fn create_product(
    State(catalog): State<Catalog>,
    input: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), AppError> {
    let Json(input) = input?;
    let mut inner = catalog.inner.write().await;
    inner.take_fault()?;
    input.validate()?;
    inner.next_id += 1;
    let product = input.into_product(inner.next_id);
    inner.products.insert(product.id, product.clone());
    info!(id = product.id, "product created");
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_product(
    State(catalog): State<Catalog>,
    id: Result<Path<i64>, PathRejection>,
    input: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, AppError> {
    let Path(id) = id?;
    let Json(input) = input?;
    let mut inner = catalog.inner.write().await;
    inner.take_fault()?;
    input.validate()?;
    let slot = inner.products.get_mut(&id).ok_or(AppError::NotFound(id))?;
    *slot = input.into_product(id);
    info!(id, "product updated");
    Ok(Json(slot.clone()))
}

async fn delete_product(
    State(catalog): State<Catalog>,
    id: Result<Path<i64>, PathRejection>,
) -> Result<StatusCode, AppError> {
    let Path(id) = id?;
    let mut inner = catalog.inner.write().await;
    inner.take_fault()?;
    inner.products.remove(&id).ok_or(AppError::NotFound(id))?;
    info!(id, "product deleted");
    Ok(StatusCode::NO_CONTENT)
}
