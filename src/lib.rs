//! Clicktally - a per-user click counter with group aggregation
//!
//! This library provides the core functionality for the Clicktally service:
//! a small HTTP API that increments a named user's click counter, optionally
//! attributing the click to a named group whose running total advances with it.
//!
//! # Architecture
//! - `storage`: SeaORM counter store (SQLite / MySQL / PostgreSQL)
//! - `services`: counter business logic (increment, lookup, get-or-create)
//! - `api`: HTTP services and middleware
//! - `config`: configuration management
//! - `runtime`: application lifecycle and execution modes
//! - `system`: logging initialization

pub mod api;
pub mod config;
pub mod errors;
pub mod runtime;
pub mod services;
pub mod storage;
pub mod system;
