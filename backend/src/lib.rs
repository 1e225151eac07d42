//! E-waste tracking backend library.
//!
//! Layout follows a hexagonal split: [`domain`] owns the model, services and
//! ports; [`inbound`] adapts HTTP requests onto driving ports; [`outbound`]
//! implements the repository ports in memory and on PostgreSQL.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod settings;

#[cfg(test)]
mod test_support;

/// Public OpenAPI surface used by Swagger UI and tooling.
pub use doc::ApiDoc;
pub use domain::TraceId;
pub use middleware::Trace;
