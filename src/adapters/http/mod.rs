//! HTTP adapters - REST API implementations.

pub mod gateway;

pub use gateway::{gateway_router, GatewayAppState};
