//! Client core for the product catalog service.
//!
//! # Overview
//! Two layers. `ProductClient` builds `HttpRequest` values and parses
//! `HttpResponse` values without touching the network (host-does-IO
//! pattern). `ProductStore` drives the client through a `Transport` and
//! keeps an in-memory catalog reconciled with every successful mutation.
//!
//! # Design
//! - `ProductClient` is stateless; it holds only the collection URL.
//! - Each CRUD operation is split into `build_*` and `parse_*`, so the I/O
//!   boundary is explicit and the normalization rules are unit-testable.
//! - `CatalogState::apply` is a pure reducer; the store only sequences I/O
//!   and feeds it events.
//! - DTOs are defined independently from the mock-server crate; integration
//!   tests catch schema drift.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod state;
pub mod store;
pub mod transport;
pub mod types;

pub use client::ProductClient;
pub use config::ClientConfig;
pub use error::{ApiError, Operation};
pub use http::{HttpMethod, HttpRequest, HttpResponse};
pub use state::{CatalogState, Event, Level, Notification, Status};
pub use store::ProductStore;
pub use transport::{Transport, UreqTransport};
pub use types::{Product, ProductDraft};
