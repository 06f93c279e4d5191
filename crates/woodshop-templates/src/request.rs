//! Caller-facing request parameters and their resolution into the settings
//! shared by every template.

use crate::error::{Result, TemplateError};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use woodshop_core::LumberSpec;

/// Stock used when a request does not name one.
pub const DEFAULT_LUMBER: &str = "90x19";
/// Species used when a request does not name one.
pub const DEFAULT_MATERIAL: &str = "pine";
/// Region used when a request does not name one.
pub const DEFAULT_REGION: &str = "australia";

fn default_lumber() -> String {
    DEFAULT_LUMBER.to_string()
}

fn default_material() -> String {
    DEFAULT_MATERIAL.to_string()
}

fn default_region() -> String {
    DEFAULT_REGION.to_string()
}

fn default_true() -> bool {
    true
}

/// A request to build one project.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateRequest {
    /// Template name, matched case-insensitively
    pub template_type: String,
    /// Overall width (mm); the template default applies when absent
    #[serde(default)]
    pub width: Option<f64>,
    /// Overall height (mm)
    #[serde(default)]
    pub height: Option<f64>,
    /// Overall depth (mm)
    #[serde(default)]
    pub depth: Option<f64>,
    /// Stock descriptor, `WIDTHxTHICKNESS`
    #[serde(default = "default_lumber")]
    pub lumber: String,
    /// Joinery tag; the template's default joinery applies when absent
    #[serde(default)]
    pub joinery: Option<String>,
    /// Wood species
    #[serde(default = "default_material")]
    pub material: String,
    /// Lumber region (informational only)
    #[serde(default = "default_region")]
    pub region: String,
    /// Draw coloured markers at joints
    #[serde(default = "default_true")]
    pub show_joint_markers: bool,
    /// Template-specific options
    #[serde(default)]
    pub options: Map<String, Value>,
}

impl TemplateRequest {
    pub fn new(template_type: impl Into<String>) -> Self {
        Self {
            template_type: template_type.into(),
            width: None,
            height: None,
            depth: None,
            lumber: default_lumber(),
            joinery: None,
            material: default_material(),
            region: default_region(),
            show_joint_markers: true,
            options: Map::new(),
        }
    }

    pub fn with_dimensions(mut self, width: f64, height: f64, depth: f64) -> Self {
        self.width = Some(width);
        self.height = Some(height);
        self.depth = Some(depth);
        self
    }

    pub fn with_lumber(mut self, lumber: impl Into<String>) -> Self {
        self.lumber = lumber.into();
        self
    }

    pub fn with_joinery(mut self, joinery: impl Into<String>) -> Self {
        self.joinery = Some(joinery.into());
        self
    }

    pub fn with_material(mut self, material: impl Into<String>) -> Self {
        self.material = material.into();
        self
    }

    pub fn with_joint_markers(mut self, show: bool) -> Self {
        self.show_joint_markers = show;
        self
    }

    pub fn with_option(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.options.insert(key.into(), value.into());
        self
    }

    /// Deserialize the option map into a template's typed options.
    pub(crate) fn parse_options<T: DeserializeOwned>(&self, template: &str) -> Result<T> {
        serde_json::from_value(Value::Object(self.options.clone())).map_err(|e| {
            TemplateError::InvalidOptions {
                template: template.to_string(),
                reason: e.to_string(),
            }
        })
    }
}

/// Per-template defaults.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TemplateDefaults {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub lumber: &'static str,
    pub joinery: &'static str,
    pub material: &'static str,
}

/// Settings shared by every template after defaults are applied.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TemplateBase {
    pub width: f64,
    pub height: f64,
    pub depth: f64,
    pub lumber: LumberSpec,
    pub joinery: String,
    pub material: String,
    pub region: String,
    pub show_joint_markers: bool,
}

impl TemplateBase {
    /// Settings for a template built without a request.
    pub fn from_defaults(defaults: &TemplateDefaults) -> Result<Self> {
        let base = Self {
            width: defaults.width,
            height: defaults.height,
            depth: defaults.depth,
            lumber: LumberSpec::parse(defaults.lumber)?,
            joinery: defaults.joinery.to_string(),
            material: defaults.material.to_string(),
            region: DEFAULT_REGION.to_string(),
            show_joint_markers: true,
        };
        base.check_dimensions()?;
        Ok(base)
    }

    /// Merge a request over the template defaults.
    pub fn from_request(request: &TemplateRequest, defaults: &TemplateDefaults) -> Result<Self> {
        let base = Self {
            width: request.width.unwrap_or(defaults.width),
            height: request.height.unwrap_or(defaults.height),
            depth: request.depth.unwrap_or(defaults.depth),
            lumber: LumberSpec::parse(&request.lumber)?,
            joinery: request
                .joinery
                .as_deref()
                .map(str::trim)
                .filter(|j| !j.is_empty())
                .unwrap_or(defaults.joinery)
                .to_ascii_lowercase(),
            material: request.material.clone(),
            region: request.region.clone(),
            show_joint_markers: request.show_joint_markers,
        };
        base.check_dimensions()?;
        Ok(base)
    }

    fn check_dimensions(&self) -> Result<()> {
        for (name, value) in [
            ("width", self.width),
            ("height", self.height),
            ("depth", self.depth),
        ] {
            if !value.is_finite() || value <= 0.0 {
                return Err(TemplateError::InvalidDimension { name, value });
            }
        }
        Ok(())
    }

    /// Stock thickness (mm).
    pub fn t(&self) -> f64 {
        self.lumber.thickness
    }

    /// Stock face width (mm).
    pub fn w(&self) -> f64 {
        self.lumber.width
    }
}

/// Option validation helper: reject counts below a minimum.
pub(crate) fn require_at_least(template: &str, name: &str, value: u32, min: u32) -> Result<()> {
    if value < min {
        return Err(TemplateError::InvalidOptions {
            template: template.to_string(),
            reason: format!("{} must be at least {} (got {})", name, min, value),
        });
    }
    Ok(())
}

/// Option validation helper: reject non-finite or out-of-range lengths.
pub(crate) fn require_length(template: &str, name: &str, value: f64, min: f64) -> Result<()> {
    if !value.is_finite() || value < min {
        return Err(TemplateError::InvalidOptions {
            template: template.to_string(),
            reason: format!("{} must be at least {}mm (got {})", name, min, value),
        });
    }
    Ok(())
}
