//! Protocol exposures
//!
//! Each exposure turns a [`ServerHost`](super::host::ServerHost) into an
//! axum `Router`. The builder merges them.

pub mod rest;
pub mod rpc;

pub use rest::RestExposure;
pub use rpc::RpcExposure;
