//! # Woodshop
//!
//! Parametric woodworking projects for a 3D modeling application:
//! - Ten templates (bookshelf, box, table, cabinet, workbench, desk, cutting
//!   board, picture frame, shelf bracket, tray)
//! - Build scripts that model every board as a named group, with optional
//!   joint markers
//! - Cut lists that agree with the modeled boards
//! - A TCP bridge that runs build scripts in the modeling application
//!
//! ## Architecture
//!
//! Woodshop is organized as a workspace with multiple crates:
//!
//! 1. **woodshop-core** - Lumber parsing, placements, cut lists, joint markers
//! 2. **woodshop-templates** - Templates, build scripts, the registry
//! 3. **woodshop-bridge** - Executor, TCP transport, tool operations, config
//! 4. **woodshop** - CLI binary that integrates all crates

pub use woodshop_bridge::{
    build_project, list_templates, plan_project, BridgeConfig, BridgeError, BuildResponse,
    ConfigError, ExecutionOutcome, Executor, TcpExecutor, TemplateListing,
};
pub use woodshop_core::{CutList, GeometryError, LumberError, LumberPiece, LumberSpec};
pub use woodshop_templates::{
    create, infos, names, Template, TemplateError, TemplateInfo, TemplateKind, TemplateRequest,
    TemplateResult,
};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Build date (set at compile time)
pub const BUILD_DATE: &str = env!("BUILD_DATE");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, keeping stdout for JSON responses
/// - RUST_LOG environment variable support
/// - INFO as the baseline level
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter = EnvFilter::from_default_env().add_directive(tracing::Level::INFO.into());

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
