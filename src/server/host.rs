//! Transport-agnostic server state
//!
//! `ServerHost` is what every exposure (procedures, REST) is built from.
//! Handlers receive it as `State<Arc<ServerHost>>`.

use crate::core::service::InvoiceService;

/// Shared state behind every route
pub struct ServerHost {
    /// Invoice operations over the configured store
    pub service: InvoiceService,
}

impl ServerHost {
    pub fn new(service: InvoiceService) -> Self {
        Self { service }
    }

    /// Name of the backing store, for startup logs
    pub fn backend_name(&self) -> &'static str {
        self.service.store().backend_name()
    }
}
