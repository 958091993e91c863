//! HTTP services and middleware

pub mod middleware;
pub mod services;
