//! Service layer for business logic
//!
//! This module provides the counter business logic shared by the HTTP
//! handlers and the integration tests.

mod counter_service;

pub use counter_service::*;
