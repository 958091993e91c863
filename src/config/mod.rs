//! Configuration management
//!
//! 配置加载顺序：环境变量（前缀 `CT`，分隔符 `__`）> `config.toml` > 默认值。
//! 全局访问通过 `init_config` / `get_config`。

pub mod args;
mod r#impl;
mod structs;

pub use r#impl::{get_config, init_config, init_config_from};
pub use structs::*;
