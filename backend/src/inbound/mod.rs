//! Inbound adapters translating external requests into domain calls.
//!
//! Only HTTP is exposed today; see [`http`].

pub mod http;
