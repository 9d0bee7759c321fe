//! Registry backend: an in-memory record store exposed over a JSON REST API.
//!
//! The crate follows a hexagonal layout. [`domain`] holds the record model,
//! the CRUD service and its ports; [`inbound`] adapts HTTP onto the driving
//! ports; [`outbound`] provides the in-memory store behind the driven port.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;
pub mod settings;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use middleware::Trace;
