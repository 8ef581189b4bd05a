//! toolhub - terminal front-end for a catalog of micro tools
//!
//! The backend publishes a catalog of tools; each tool the client knows is
//! rendered by a local widget that calls one backend endpoint, and every
//! other tool falls back to a link to its endpoint.

pub mod backend;
pub mod catalog;
pub mod config;
pub mod descriptor;
pub mod dispatch;
pub mod error;
pub mod hub;
pub mod id;
pub mod tui;
pub mod widgets;

pub use error::{Result, ToolhubError};
