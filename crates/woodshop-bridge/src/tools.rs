//! Tool operations: build a project through an executor, plan one without
//! executing, and list the available templates.

use crate::error::BridgeError;
use crate::executor::Executor;
use serde::{Deserialize, Serialize};
use woodshop_core::{GeometryError, GeometryResult, LumberPiece};
use woodshop_templates::{create, infos, Template, TemplateError, TemplateInfo, TemplateRequest};

/// Attached to responses when the modeling application cannot be reached.
pub const CONNECTION_HINT: &str =
    "Make sure the modeling application is running and its bridge extension is started";

/// Resolved overall dimensions (mm).
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Dimensions {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
}

impl Dimensions {
    fn of(template: &Template) -> Self {
        let base = template.base();
        Self {
            width: base.width,
            height: base.height,
            depth: base.depth,
        }
    }
}

/// JSON reply of [`build_project`] and [`plan_project`]. Only the fields that
/// apply to the outcome are serialized.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct BuildResponse {
    pub success: bool,
    /// Text reported by the modeling application
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub result: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cut_list: Option<Vec<LumberPiece>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub template: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimensions: Option<Dimensions>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub build_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hint: Option<String>,
}

impl BuildResponse {
    pub fn built(result: String, cut_list: Vec<LumberPiece>, template: &Template) -> Self {
        Self {
            success: true,
            result: Some(result),
            cut_list: Some(cut_list),
            template: Some(template.kind().name().to_string()),
            dimensions: Some(Dimensions::of(template)),
            ..Default::default()
        }
    }

    pub fn planned(build_script: String, cut_list: Vec<LumberPiece>, template: &Template) -> Self {
        Self {
            success: true,
            cut_list: Some(cut_list),
            template: Some(template.kind().name().to_string()),
            dimensions: Some(Dimensions::of(template)),
            build_script: Some(build_script),
            ..Default::default()
        }
    }

    /// The request or its dimensions were not acceptable.
    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            error: Some(error.into()),
            ..Default::default()
        }
    }

    /// The script was sent but did not succeed. The script is returned so it
    /// can be run by hand.
    pub fn execution_failed(message: impl std::fmt::Display, build_script: String) -> Self {
        Self {
            success: false,
            error: Some(format!("Modeling application error: {}", message)),
            build_script: Some(build_script),
            ..Default::default()
        }
    }

    pub fn unreachable(error: &BridgeError) -> Self {
        Self {
            success: false,
            error: Some(error.to_string()),
            hint: Some(CONNECTION_HINT.to_string()),
            ..Default::default()
        }
    }
}

/// JSON reply of [`list_templates`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateListing {
    pub success: bool,
    pub templates: Vec<TemplateInfo>,
}

/// Every registered template with its description and default joinery.
pub fn list_templates() -> TemplateListing {
    TemplateListing {
        success: true,
        templates: infos(),
    }
}

/// Resolve the request, keeping geometry faults apart from rejections.
fn resolve(request: &TemplateRequest) -> GeometryResult<Result<Template, BuildResponse>> {
    match create(request) {
        Ok(template) => Ok(Ok(template)),
        Err(TemplateError::Geometry(fault)) => Err(fault),
        Err(e) => {
            tracing::warn!("Rejected {} request: {}", request.template_type, e);
            Ok(Err(BuildResponse::rejected(e.to_string())))
        }
    }
}

/// Generate the project without executing it.
pub fn plan_project(request: &TemplateRequest) -> GeometryResult<BuildResponse> {
    let template = match resolve(request)? {
        Ok(template) => template,
        Err(response) => return Ok(response),
    };

    let generated = template.generate()?;
    if !generated.success {
        tracing::warn!("{} rejected: {}", template.kind(), generated.error);
        return Ok(BuildResponse::rejected(generated.error));
    }
    Ok(BuildResponse::planned(
        generated.build_script,
        generated.cut_list,
        &template,
    ))
}

/// Generate the project and run its build script through `executor`.
///
/// Rejections and executor failures are reported in the response; only
/// geometry faults are returned as `Err`.
pub fn build_project(
    request: &TemplateRequest,
    executor: &mut dyn Executor,
) -> Result<BuildResponse, GeometryError> {
    tracing::info!(
        "build_project: {} {:?}x{:?}x{:?} lumber={}",
        request.template_type,
        request.width,
        request.height,
        request.depth,
        request.lumber
    );

    let template = match resolve(request)? {
        Ok(template) => template,
        Err(response) => return Ok(response),
    };

    let generated = template.generate()?;
    if !generated.success {
        tracing::warn!("{} rejected: {}", template.kind(), generated.error);
        return Ok(BuildResponse::rejected(generated.error));
    }

    match executor.execute(&generated.build_script) {
        Ok(outcome) if outcome.success => {
            tracing::info!("Built {}: {}", template.kind(), outcome.text);
            Ok(BuildResponse::built(outcome.text, generated.cut_list, &template))
        }
        Ok(outcome) => {
            tracing::error!("Build script failed: {}", outcome.text);
            Ok(BuildResponse::execution_failed(outcome.text, generated.build_script))
        }
        Err(e) if e.is_unreachable() => {
            tracing::error!("Modeling application unreachable: {}", e);
            Ok(BuildResponse::unreachable(&e))
        }
        Err(e) => {
            tracing::error!("Build script execution failed: {}", e);
            Ok(BuildResponse::execution_failed(e, generated.build_script))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_rejected_serializes_only_error() {
        let value = serde_json::to_value(BuildResponse::rejected("too small")).unwrap();
        assert_eq!(value, json!({"success": false, "error": "too small"}));
    }

    #[test]
    fn test_unreachable_carries_hint() {
        let err = BridgeError::Connection {
            addr: "127.0.0.1:9876".to_string(),
            reason: "Connection refused".to_string(),
        };
        let value = serde_json::to_value(BuildResponse::unreachable(&err)).unwrap();
        assert_eq!(value["success"], false);
        assert_eq!(value["hint"], CONNECTION_HINT);
        assert!(value.get("build_script").is_none());
    }

    #[test]
    fn test_listing_has_every_template() {
        let listing = list_templates();
        assert!(listing.success);
        assert_eq!(listing.templates.len(), 10);
        assert_eq!(listing.templates[0].name, "bookshelf");
    }

    #[test]
    fn test_plan_project_returns_script() {
        let response = plan_project(&TemplateRequest::new("tray")).unwrap();
        assert!(response.success);
        assert_eq!(response.template.as_deref(), Some("tray"));
        assert!(response.build_script.unwrap().contains("start_operation"));
        assert!(response.result.is_none());
    }
}
