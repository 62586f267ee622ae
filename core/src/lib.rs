//! Async client for the surgical procedure catalog API.
//!
//! # Overview
//! Two components: a context-tagged logging facade (`logging`) and a
//! `ProcedureClient` that turns "search procedures by name" and "fetch one
//! procedure's details" into single GET requests against a configured base
//! URL, logging every step through the facade.
//!
//! # Design
//! - `ProcedureClient` holds only its base URL, a transport and a logger; it
//!   carries no mutable state between calls.
//! - Each operation is split into `build_*` (produces an `HttpRequest`) and
//!   `parse_*` (consumes an `HttpResponse`). The async methods glue the two
//!   together through a `Transport`, so the request/response mapping stays
//!   deterministic and testable without a network.
//! - Failures are logged at error level and returned unchanged; the only
//!   non-error short-circuit is a search query that is too short.

pub mod client;
pub mod config;
pub mod error;
pub mod http;
pub mod logging;
pub mod transport;
pub mod types;

pub use client::{is_searchable, ProcedureClient, MIN_QUERY_CHARS};
pub use config::{ClientConfig, BASE_URL_ENV, DEFAULT_BASE_URL};
pub use error::{ApiError, BoxError};
pub use http::{HttpRequest, HttpResponse};
pub use logging::{create_logger, ConsoleLogger, Logger, TracingLogger};
pub use transport::{ReqwestTransport, Transport};
pub use types::{Procedure, ProcedureId, ProcedureRecord};
