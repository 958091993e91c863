//! Mode routing
//!
//! 当前只有 Server 模式（HTTP 服务）。

pub mod server;

pub use server::run_server;
