//! # Time MCP Server Core
//!
//! Timezone-aware time operations behind the MCP surface.
//!
//! ## Modules
//! - `error`: Domain error types and MCP error conversion
//! - `models`: Request and response payloads
//! - `provider`: Local-timezone resolution and time calculations
//! - `utils`: Format constants and offset rendering

pub mod error;
pub mod models;
pub mod provider;
pub mod utils;
