//! Shared types for the Coolify MCP server: remote resource shapes, request
//! settings and the normalized API error.

pub mod error;
pub mod resources;
pub mod settings;

pub use error::CoolifyError;
