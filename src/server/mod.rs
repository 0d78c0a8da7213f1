//! HTTP server: shared host state, exposures and the builder that wires them

pub mod builder;
pub mod exposure;
pub mod host;

pub use builder::ServerBuilder;
pub use exposure::{RestExposure, RpcExposure};
pub use host::ServerHost;
