//! System utilities

pub mod logging;
