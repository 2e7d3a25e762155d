//! HTTP handlers for the Placid proxy.

pub mod app;
pub mod creative;
