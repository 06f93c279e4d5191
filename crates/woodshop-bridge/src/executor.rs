//! The seam between tool operations and whatever runs the build script.

use crate::error::BridgeResult;
use serde::{Deserialize, Serialize};

/// What the modeling application reported after running a script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExecutionOutcome {
    pub success: bool,
    /// Text of the first content item, or a fallback message
    pub text: String,
}

impl ExecutionOutcome {
    pub fn ok(text: impl Into<String>) -> Self {
        Self {
            success: true,
            text: text.into(),
        }
    }

    pub fn failed(text: impl Into<String>) -> Self {
        Self {
            success: false,
            text: text.into(),
        }
    }
}

/// Runs a build script in the modeling application.
///
/// `Err` means the script never got a verdict (unreachable, timed out,
/// protocol error). A script that ran and failed is `Ok` with
/// `success == false`.
pub trait Executor {
    fn execute(&mut self, script: &str) -> BridgeResult<ExecutionOutcome>;
}

impl<E: Executor + ?Sized> Executor for Box<E> {
    fn execute(&mut self, script: &str) -> BridgeResult<ExecutionOutcome> {
        (**self).execute(script)
    }
}
