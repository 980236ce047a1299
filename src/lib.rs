//! # Pinwall
//!
//! A small in-memory JSON message board served over HTTP.
//!
//! Pinwall accepts JSON messages, validates and enriches them, stores them
//! in process memory, and serves them back with on-demand statistics and
//! case-insensitive substring search. Nothing survives a restart; the
//! board lives and dies with the process.
//!
//! ## Architecture
//!
//! ```text
//! request ─▶ validate ─▶ process ─▶ board (RwLock<Vec>)
//!                                      │
//!                           ┌──────────┴──────────┐
//!                           ▼                     ▼
//!                      list / search          statistics
//! ```
//!
//! ## Quick Start
//!
//! ```bash
//! pinwall serve                 # start the HTTP server
//! pinwall routes                # print the endpoint table
//! curl -X POST localhost:7310/api/messages \
//!   -H 'content-type: application/json' \
//!   -d '{"name":"ann","message":"hello world"}'
//! ```
//!
//! ## Modules
//!
//! | Module | Purpose |
//! |--------|---------|
//! | [`config`] | TOML configuration parsing |
//! | [`models`] | Core data types |
//! | [`validate`] | Ordered field validation |
//! | [`process`] | Record enrichment |
//! | [`store`] | In-memory message board |
//! | [`stats`] | On-demand summary statistics |
//! | [`server`] | HTTP route layer |

pub mod config;
pub mod models;
pub mod process;
pub mod server;
pub mod stats;
pub mod store;
pub mod validate;
