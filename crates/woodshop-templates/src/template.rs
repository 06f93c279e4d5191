//! The contract every project template implements, and the generation
//! pipeline built on top of it.

use crate::error::DimensionError;
use crate::registry::TemplateKind;
use crate::request::TemplateBase;
use crate::script::render_build_script;
use serde::{Deserialize, Serialize};
use woodshop_core::{
    glue_up_note, plan_markers, verify_cut_list, BoardPlacement, CutList, GeometryResult,
    JointMarker, LumberPiece, MarkerPlacement, PartPlacer,
};

/// Structured construction plan, before rendering to a script.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BuildPlan {
    /// Name of the single undoable operation wrapping the build
    pub operation: String,
    /// Species applied to every board
    pub material: String,
    pub boards: Vec<BoardPlacement>,
    pub markers: Vec<MarkerPlacement>,
}

/// Outcome of planning a template.
#[derive(Debug, Clone, PartialEq)]
pub enum PlanOutcome {
    Built { plan: BuildPlan, cut_list: CutList },
    Rejected(DimensionError),
}

/// Result of generating a template.
///
/// Exactly one side is populated: a script and cut list on success, an error
/// message on failure.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplateResult {
    pub success: bool,
    pub build_script: String,
    pub cut_list: Vec<LumberPiece>,
    pub error: String,
}

impl TemplateResult {
    pub fn built(build_script: String, cut_list: CutList) -> Self {
        Self {
            success: true,
            build_script,
            cut_list: cut_list.into_pieces(),
            error: String::new(),
        }
    }

    pub fn rejected(error: impl Into<String>) -> Self {
        Self {
            success: false,
            build_script: String::new(),
            cut_list: Vec::new(),
            error: error.into(),
        }
    }
}

/// A parametric project.
///
/// Implementors derive their geometry once per call and pass it to the
/// emitters; instances are never mutated by generation, so repeated calls
/// give identical output.
pub trait ProjectTemplate {
    /// Values derived from the dimensions and shared by the emitters.
    type Geometry;

    fn kind(&self) -> TemplateKind;

    fn base(&self) -> &TemplateBase;

    /// Check structural minimums and compute derived values.
    fn derive_geometry(&self) -> Result<Self::Geometry, DimensionError>;

    /// Place every board, in build order.
    fn emit_placements(&self, geometry: &Self::Geometry, placer: &mut PartPlacer)
        -> GeometryResult<()>;

    /// Joint markers; none unless the template overrides this.
    fn emit_markers(&self, _geometry: &Self::Geometry) -> Vec<JointMarker> {
        Vec::new()
    }

    fn build_cut_list(&self, geometry: &Self::Geometry) -> GeometryResult<CutList>;

    /// Label for the undoable build operation, e.g. "Bookshelf 600x1000x300".
    fn operation_name(&self, geometry: &Self::Geometry) -> String;

    fn validate(&self) -> Result<(), DimensionError> {
        self.derive_geometry().map(|_| ())
    }

    /// Derive the plan and cut list, or the reason the design was rejected.
    fn plan(&self) -> GeometryResult<PlanOutcome> {
        let kind = self.kind();
        let geometry = match self.derive_geometry() {
            Ok(geometry) => geometry,
            Err(reason) => {
                tracing::warn!("{} template validation error: {}", kind.name(), reason);
                return Ok(PlanOutcome::Rejected(reason));
            }
        };

        match assemble(self, &geometry) {
            Ok((plan, cut_list)) => {
                tracing::debug!(
                    template = kind.name(),
                    boards = plan.boards.len(),
                    markers = plan.markers.len(),
                    pieces = cut_list.total_pieces(),
                    "planned {}",
                    plan.operation
                );
                Ok(PlanOutcome::Built { plan, cut_list })
            }
            Err(fault) => {
                tracing::error!("{} template geometry fault: {}", kind.name(), fault);
                Err(fault)
            }
        }
    }

    /// Plan and render. Rejections come back as a failed result; faults as `Err`.
    fn generate(&self) -> GeometryResult<TemplateResult> {
        Ok(match self.plan()? {
            PlanOutcome::Built { plan, cut_list } => {
                TemplateResult::built(render_build_script(&plan), cut_list)
            }
            PlanOutcome::Rejected(reason) => TemplateResult::rejected(reason.to_string()),
        })
    }
}

fn assemble<T: ProjectTemplate + ?Sized>(
    template: &T,
    geometry: &T::Geometry,
) -> GeometryResult<(BuildPlan, CutList)> {
    let base = template.base();
    let mut placer = PartPlacer::new();
    template.emit_placements(geometry, &mut placer)?;
    let boards = placer.finish();

    let markers = plan_markers(&template.emit_markers(geometry), base.show_joint_markers)?;

    let cut_list = template.build_cut_list(geometry)?;
    verify_cut_list(&boards, &cut_list)?;

    let plan = BuildPlan {
        operation: template.operation_name(geometry),
        material: base.material.clone(),
        boards,
        markers,
    };
    Ok((plan, cut_list))
}

/// Shorthand for a cut-list entry in the template's species.
pub(crate) fn piece(
    base: &TemplateBase,
    name: &str,
    width: f64,
    height: f64,
    length: f64,
    quantity: u32,
) -> LumberPiece {
    LumberPiece::new(name, width, height, length, quantity, base.material.as_str())
}

/// Notes for a panel, with a glue-up hint when it is wider than the stock.
pub(crate) fn panel_notes(base: &TemplateBase, notes: &str, face_width: f64) -> String {
    match glue_up_note(face_width, &base.lumber) {
        Some(glue) => format!("{}; {}", notes, glue),
        None => notes.to_string(),
    }
}
