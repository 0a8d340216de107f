//! EcoPoints backend library modules.
//!
//! The crate follows a hexagonal layout: `domain` holds the ledger core and
//! its ports, `inbound` adapts HTTP onto the driving ports, and `outbound`
//! implements the driven ports against PostgreSQL and the credential hasher.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

pub use doc::ApiDoc;
pub use middleware::trace::Trace;
