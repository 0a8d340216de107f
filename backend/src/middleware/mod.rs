//! Actix middleware shared by every inbound route.

pub mod trace;
