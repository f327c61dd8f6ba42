// Library root
// -----------
// The binary (`main.rs`) is a thin wrapper around these modules.
//
// Module responsibilities:
// - `api`: the blocking HTTP client for the mock interview service and
//   the types its responses decode into.
// - `config`: base URL, user id and topic name for a run.
// - `error`: typed failures returned by the client and the workflow.
// - `ui`: pluggable narration of what the demo is doing.
// - `workflow`: the fixed demo sequence and its summary.
pub mod api;
pub mod config;
pub mod error;
pub mod ui;
pub mod workflow;

pub use api::{ApiClient, ApiResponse, InterviewSession, ResourceId};
pub use config::DemoConfig;
pub use error::DemoError;
