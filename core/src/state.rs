//! The catalog state container and its reducer.
//!
//! # Design
//! `CatalogState` is a projection of server state. It changes only through
//! `apply`, which takes an `Event` describing a completed remote operation.
//! Each arm replaces, appends to, or filters the product list in one step, so
//! there is never a half-applied list to observe. Nothing here does I/O.

use crate::error::Operation;
use crate::types::Product;

/// Fetch status of the catalog.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Status {
    #[default]
    Idle,
    Loading,
    Error(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Level {
    Success,
    Error,
}

/// A user-facing message about an operation's outcome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub level: Level,
    pub message: String,
}

impl Notification {
    pub fn success(message: impl Into<String>) -> Self {
        Self {
            level: Level::Success,
            message: message.into(),
        }
    }

    pub fn error(message: impl Into<String>) -> Self {
        Self {
            level: Level::Error,
            message: message.into(),
        }
    }
}

/// The outcome of a remote operation, ready to be reconciled.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    RefreshStarted,
    Refreshed(Vec<Product>),
    Created(Product),
    /// `id` is the id the update was sent to.
    Updated { id: i64, product: Product },
    Deleted(i64),
    Failed { operation: Operation, message: String },
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogState {
    pub products: Vec<Product>,
    pub status: Status,
    pub notifications: Vec<Notification>,
}

impl CatalogState {
    pub fn apply(&mut self, event: Event) {
        match event {
            Event::RefreshStarted => {
                self.status = Status::Loading;
            }
            Event::Refreshed(products) => {
                self.products = products;
                self.status = Status::Idle;
            }
            Event::Created(product) => {
                // A create echoing an id already held replaces it instead of
                // duplicating it.
                match self.position(product.id) {
                    Some(index) => self.products[index] = product,
                    None => self.products.push(product),
                }
                self.status = Status::Idle;
                self.notify(Notification::success("product added"));
            }
            Event::Updated { id, product } => {
                if let Some(index) = self.position(id) {
                    self.products[index] = product;
                    let kept = self.products[index].id;
                    let mut seen = false;
                    self.products.retain(|p| {
                        if p.id != kept {
                            return true;
                        }
                        let first = !seen;
                        seen = true;
                        first
                    });
                }
                self.status = Status::Idle;
                self.notify(Notification::success("product updated"));
            }
            Event::Deleted(id) => {
                self.products.retain(|p| p.id != id);
                self.status = Status::Idle;
                self.notify(Notification::success("product removed"));
            }
            Event::Failed { operation, message } => {
                self.status = Status::Error(message.clone());
                self.notify(Notification::error(format!("{operation} failed: {message}")));
            }
        }
    }

    pub fn get(&self, id: i64) -> Option<&Product> {
        self.products.iter().find(|p| p.id == id)
    }

    pub fn is_loading(&self) -> bool {
        self.status == Status::Loading
    }

    pub fn error(&self) -> Option<&str> {
        match &self.status {
            Status::Error(message) => Some(message),
            _ => None,
        }
    }

    fn position(&self, id: i64) -> Option<usize> {
        self.products.iter().position(|p| p.id == id)
    }

    fn notify(&mut self, notification: Notification) {
        self.notifications.push(notification);
    }
}
