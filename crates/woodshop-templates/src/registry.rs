//! Template discovery and construction.

use crate::bookshelf::BookshelfTemplate;
use crate::cabinet::CabinetTemplate;
use crate::cutting_board::CuttingBoardTemplate;
use crate::desk::DeskTemplate;
use crate::error::{Result, TemplateError};
use crate::picture_frame::PictureFrameTemplate;
use crate::request::{TemplateBase, TemplateRequest};
use crate::shelf_bracket::ShelfBracketTemplate;
use crate::storage_box::StorageBoxTemplate;
use crate::table::TableTemplate;
use crate::template::{PlanOutcome, ProjectTemplate, TemplateResult};
use crate::tray::TrayTemplate;
use crate::workbench::WorkbenchTemplate;
use serde::{Deserialize, Serialize};
use std::fmt;
use woodshop_core::GeometryResult;

/// Every registered template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TemplateKind {
    Bookshelf,
    #[serde(rename = "box")]
    StorageBox,
    Table,
    Cabinet,
    Workbench,
    Desk,
    CuttingBoard,
    PictureFrame,
    ShelfBracket,
    Tray,
}

impl TemplateKind {
    /// Registration order, which is also the listing order.
    pub const ALL: [TemplateKind; 10] = [
        TemplateKind::Bookshelf,
        TemplateKind::StorageBox,
        TemplateKind::Table,
        TemplateKind::Cabinet,
        TemplateKind::Workbench,
        TemplateKind::Desk,
        TemplateKind::CuttingBoard,
        TemplateKind::PictureFrame,
        TemplateKind::ShelfBracket,
        TemplateKind::Tray,
    ];

    /// Registered lowercase name.
    pub fn name(&self) -> &'static str {
        match self {
            TemplateKind::Bookshelf => "bookshelf",
            TemplateKind::StorageBox => "box",
            TemplateKind::Table => "table",
            TemplateKind::Cabinet => "cabinet",
            TemplateKind::Workbench => "workbench",
            TemplateKind::Desk => "desk",
            TemplateKind::CuttingBoard => "cutting_board",
            TemplateKind::PictureFrame => "picture_frame",
            TemplateKind::ShelfBracket => "shelf_bracket",
            TemplateKind::Tray => "tray",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            TemplateKind::Bookshelf => "Bookshelf with adjustable shelves",
            TemplateKind::StorageBox => "Storage box with optional lid",
            TemplateKind::Table => "Table with variants: dining, coffee, end table",
            TemplateKind::Cabinet => "Storage cabinet with optional doors",
            TemplateKind::Workbench => "Heavy-duty workshop workbench",
            TemplateKind::Desk => "Writing or computer desk",
            TemplateKind::CuttingBoard => "Cutting board with edge or end grain pattern",
            TemplateKind::PictureFrame => "Picture frame with rabbet for glass",
            TemplateKind::ShelfBracket => "Wall-mounted shelf with brackets",
            TemplateKind::Tray => "Serving tray with handles",
        }
    }

    pub fn default_joinery(&self) -> &'static str {
        match self {
            TemplateKind::Bookshelf | TemplateKind::Cabinet | TemplateKind::Desk => "dado",
            TemplateKind::StorageBox => "finger_joint",
            TemplateKind::Table | TemplateKind::Workbench => "mortise_tenon",
            TemplateKind::CuttingBoard => "butt",
            TemplateKind::PictureFrame => "miter",
            TemplateKind::ShelfBracket => "bracket",
            TemplateKind::Tray => "rabbet",
        }
    }

    /// Look up a template by name, ignoring case and surrounding whitespace.
    ///
    /// `shelving_unit` is accepted for the bookshelf.
    pub fn parse(name: &str) -> Option<Self> {
        let name = name.trim().to_ascii_lowercase();
        if name == "shelving_unit" {
            return Some(TemplateKind::Bookshelf);
        }
        Self::ALL.into_iter().find(|k| k.name() == name)
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            name: self.name().to_string(),
            description: self.description().to_string(),
            default_joinery: self.default_joinery().to_string(),
        }
    }
}

impl fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Listing entry for one template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub name: String,
    pub description: String,
    pub default_joinery: String,
}

/// Registered template names, in listing order.
pub fn names() -> Vec<&'static str> {
    TemplateKind::ALL.iter().map(|k| k.name()).collect()
}

/// Metadata for every registered template.
pub fn infos() -> Vec<TemplateInfo> {
    TemplateKind::ALL.iter().map(|k| k.info()).collect()
}

/// A constructed template of any kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Template {
    Bookshelf(BookshelfTemplate),
    StorageBox(StorageBoxTemplate),
    Table(TableTemplate),
    Cabinet(CabinetTemplate),
    Workbench(WorkbenchTemplate),
    Desk(DeskTemplate),
    CuttingBoard(CuttingBoardTemplate),
    PictureFrame(PictureFrameTemplate),
    ShelfBracket(ShelfBracketTemplate),
    Tray(TrayTemplate),
}

macro_rules! dispatch {
    ($self:expr, $t:ident => $body:expr) => {
        match $self {
            Template::Bookshelf($t) => $body,
            Template::StorageBox($t) => $body,
            Template::Table($t) => $body,
            Template::Cabinet($t) => $body,
            Template::Workbench($t) => $body,
            Template::Desk($t) => $body,
            Template::CuttingBoard($t) => $body,
            Template::PictureFrame($t) => $body,
            Template::ShelfBracket($t) => $body,
            Template::Tray($t) => $body,
        }
    };
}

impl Template {
    pub fn kind(&self) -> TemplateKind {
        dispatch!(self, t => t.kind())
    }

    pub fn base(&self) -> &TemplateBase {
        dispatch!(self, t => t.base())
    }

    pub fn plan(&self) -> GeometryResult<PlanOutcome> {
        dispatch!(self, t => t.plan())
    }

    pub fn generate(&self) -> GeometryResult<TemplateResult> {
        dispatch!(self, t => t.generate())
    }
}

/// Resolve a request into a template instance.
pub fn create(request: &TemplateRequest) -> Result<Template> {
    let kind = TemplateKind::parse(&request.template_type).ok_or_else(|| {
        TemplateError::UnknownTemplate {
            name: request.template_type.clone(),
            available: names().join(", "),
        }
    })?;

    let template = match kind {
        TemplateKind::Bookshelf => Template::Bookshelf(BookshelfTemplate::from_request(request)?),
        TemplateKind::StorageBox => {
            Template::StorageBox(StorageBoxTemplate::from_request(request)?)
        }
        TemplateKind::Table => Template::Table(TableTemplate::from_request(request)?),
        TemplateKind::Cabinet => Template::Cabinet(CabinetTemplate::from_request(request)?),
        TemplateKind::Workbench => Template::Workbench(WorkbenchTemplate::from_request(request)?),
        TemplateKind::Desk => Template::Desk(DeskTemplate::from_request(request)?),
        TemplateKind::CuttingBoard => {
            Template::CuttingBoard(CuttingBoardTemplate::from_request(request)?)
        }
        TemplateKind::PictureFrame => {
            Template::PictureFrame(PictureFrameTemplate::from_request(request)?)
        }
        TemplateKind::ShelfBracket => {
            Template::ShelfBracket(ShelfBracketTemplate::from_request(request)?)
        }
        TemplateKind::Tray => Template::Tray(TrayTemplate::from_request(request)?),
    };
    tracing::debug!(
        template = kind.name(),
        width = template.base().width,
        height = template.base().height,
        depth = template.base().depth,
        "resolved template"
    );
    Ok(template)
}
