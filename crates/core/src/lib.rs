//! ContextEQ Core Library
//!
//! Provider gateway, sample fixtures and per-tab view controllers for the
//! ContextEQ video-intelligence dashboard.

pub mod config;
pub mod error;
pub mod fixtures;
pub mod format;
pub mod gateway;
pub mod provider;
pub mod types;
pub mod views;

pub use config::{GatewayConfig, GatewayMode};
pub use error::{ContextEqError, Result};
pub use fixtures::FixtureStore;
pub use format::{format_bar_chart, format_duration, format_percent, format_table};
pub use gateway::{Gateway, Operation, Request, Response};
pub use provider::{Provider, ProviderConfig};
pub use types::{
    AnalysisResult, Detection, Embedding, KpiRow, SafetyFlag, SceneMatch, SearchResult, Severity,
};
pub use views::{Tab, Widget};
