//! The product store: keeps a local catalog in sync with server mutations.
//!
//! # Design
//! Each entry point builds a request, runs it through the `Transport`, parses
//! the response and feeds the outcome to `CatalogState::apply` before
//! returning. The list is never touched speculatively.
//!
//! Operations on one store are serialized through a FIFO async lock held for
//! the whole round-trip, so reconciliation happens in invocation order. The
//! state itself sits behind a plain mutex that is only held for the duration
//! of a reducer call, never across an await.

use std::sync::{Mutex, MutexGuard, PoisonError};

use tracing::{info, warn};

use crate::client::ProductClient;
use crate::config::ClientConfig;
use crate::error::{ApiError, Operation};
use crate::state::{CatalogState, Event, Notification, Status};
use crate::transport::{Transport, UreqTransport};
use crate::types::{validate_id, Product, ProductDraft};

pub struct ProductStore<T> {
    client: ProductClient,
    transport: T,
    state: Mutex<CatalogState>,
    flight: tokio::sync::Mutex<()>,
}

impl ProductStore<UreqTransport> {
    /// A store talking to the configured endpoint over HTTP.
    pub fn connect(config: &ClientConfig) -> Self {
        Self::new(ProductClient::from_config(config), UreqTransport::new())
    }
}

impl<T: Transport> ProductStore<T> {
    pub fn new(client: ProductClient, transport: T) -> Self {
        Self {
            client,
            transport,
            state: Mutex::new(CatalogState::default()),
            flight: tokio::sync::Mutex::new(()),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn snapshot(&self) -> CatalogState {
        self.lock().clone()
    }

    pub fn products(&self) -> Vec<Product> {
        self.lock().products.clone()
    }

    pub fn status(&self) -> Status {
        self.lock().status.clone()
    }

    /// Drain pending notifications, oldest first.
    pub fn take_notifications(&self) -> Vec<Notification> {
        std::mem::take(&mut self.lock().notifications)
    }

    /// Replace the catalog with the server's list.
    ///
    /// Failures are recorded in `status` and never returned; the previous
    /// list stays in place.
    pub async fn refresh(&self) {
        let _flight = self.flight.lock().await;
        self.dispatch(Event::RefreshStarted);

        let request = self.client.build_list_products();
        let result = match self.transport.execute(request).await {
            Ok(response) => self.client.parse_list_products(response),
            Err(err) => Err(err),
        };
        match result {
            Ok(products) => {
                info!(count = products.len(), "catalog refreshed");
                self.dispatch(Event::Refreshed(products));
            }
            Err(err) => {
                self.fail(Operation::List, &err);
            }
        }
    }

    /// Create a product and append the server's copy to the catalog.
    pub async fn add(&self, draft: ProductDraft) -> Result<Product, ApiError> {
        let _flight = self.flight.lock().await;
        let result = self.create(&draft).await;
        match result {
            Ok(product) => {
                info!(id = product.id, "product added");
                self.dispatch(Event::Created(product.clone()));
                Ok(product)
            }
            Err(err) => Err(self.fail(Operation::Create, &err)),
        }
    }

    /// Replace product `id` and swap the server's copy into its slot.
    ///
    /// `id <= 0` fails with `ApiError::Validation` before any request.
    pub async fn edit(&self, id: i64, draft: ProductDraft) -> Result<Product, ApiError> {
        let _flight = self.flight.lock().await;
        let result = self.update(id, &draft).await;
        match result {
            Ok(product) => {
                info!(id, "product updated");
                self.dispatch(Event::Updated {
                    id,
                    product: product.clone(),
                });
                Ok(product)
            }
            Err(err) => Err(self.fail(Operation::Update, &err)),
        }
    }

    /// Delete product `id` and drop it from the catalog.
    pub async fn remove(&self, id: i64) -> Result<(), ApiError> {
        let _flight = self.flight.lock().await;
        let request = self.client.build_delete_product(id);
        let result = match self.transport.execute(request).await {
            Ok(response) => self.client.parse_delete_product(response),
            Err(err) => Err(err),
        };
        match result {
            Ok(()) => {
                info!(id, "product removed");
                self.dispatch(Event::Deleted(id));
                Ok(())
            }
            Err(err) => Err(self.fail(Operation::Delete, &err)),
        }
    }

    async fn create(&self, draft: &ProductDraft) -> Result<Product, ApiError> {
        draft.validate()?;
        let request = self.client.build_create_product(draft)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_create_product(response)
    }

    async fn update(&self, id: i64, draft: &ProductDraft) -> Result<Product, ApiError> {
        validate_id(id)?;
        draft.validate()?;
        let request = self.client.build_update_product(id, draft)?;
        let response = self.transport.execute(request).await?;
        self.client.parse_update_product(response)
    }

    fn fail(&self, operation: Operation, err: &ApiError) -> ApiError {
        warn!(%operation, error = %err, "operation failed");
        self.dispatch(Event::Failed {
            operation,
            message: err.message(),
        });
        err.clone()
    }

    fn dispatch(&self, event: Event) {
        self.lock().apply(event);
    }

    fn lock(&self) -> MutexGuard<'_, CatalogState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}
