//! # Woodshop Bridge
//!
//! Connects the template engine to a running modeling application.
//!
//! - [`BridgeConfig`]: host, port, timeouts and shared secret, loaded from
//!   TOML or JSON
//! - [`Executor`]: runs a build script and reports success and text
//! - [`TcpExecutor`]: JSON-RPC over a blocking TCP socket with reconnect
//! - [`build_project`], [`plan_project`], [`list_templates`]: the tool
//!   operations, producing JSON-ready responses

pub mod config;
pub mod error;
pub mod executor;
pub mod tcp;
pub mod tools;

pub use config::{BridgeConfig, SECRET_ENV};
pub use error::{BridgeError, BridgeResult, ConfigError, ConfigResult};
pub use executor::{ExecutionOutcome, Executor};
pub use tcp::{parse_tool_response, TcpExecutor, EVAL_TOOL};
pub use tools::{
    build_project, list_templates, plan_project, BuildResponse, Dimensions, TemplateListing,
    CONNECTION_HINT,
};
