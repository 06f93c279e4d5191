//! # Woodshop Templates
//!
//! Parametric woodworking projects. Each template turns a handful of overall
//! dimensions, a stock size and a few options into:
//!
//! - a **build script** that models every board as a named group inside one
//!   undoable operation, with optional coloured joint markers
//! - a **cut list** whose entries agree with the boards in the script
//!
//! ## Templates
//!
//! - **Bookshelf**: sides, top, bottom and fixed shelves in dados
//! - **Box**: four walls, captured bottom, optional lid
//! - **Table**: dining, coffee and end presets with aprons and stretchers
//! - **Cabinet**: carcass with toe kick, back, shelves and doors
//! - **Workbench**: four or six legs, aprons or rails, lower shelf
//! - **Desk**: panel legs, back rail, drawer boxes, keyboard tray
//! - **Cutting Board**: edge- or end-grain strips
//! - **Picture Frame**: mitered rails with glass, mat and backing
//! - **Shelf Bracket**: triangle, L or corbel brackets under a shelf
//! - **Tray**: low walls with handle cutouts and dividers
//!
//! Use [`create`] to resolve a [`TemplateRequest`] by name.

pub mod error;
pub mod registry;
pub mod request;
pub mod script;
pub mod template;

pub mod bookshelf;
pub mod cabinet;
pub mod cutting_board;
pub mod desk;
pub mod picture_frame;
pub mod shelf_bracket;
pub mod storage_box;
pub mod table;
pub mod tray;
pub mod workbench;

pub use error::{DimensionError, Result, TemplateError};
pub use registry::{create, infos, names, Template, TemplateInfo, TemplateKind};
pub use request::{TemplateBase, TemplateDefaults, TemplateRequest};
pub use script::render_build_script;
pub use template::{BuildPlan, PlanOutcome, ProjectTemplate, TemplateResult};

pub use bookshelf::{BookshelfOptions, BookshelfTemplate};
pub use cabinet::{CabinetOptions, CabinetTemplate};
pub use cutting_board::{CuttingBoardOptions, CuttingBoardTemplate, GrainPattern};
pub use desk::{DeskOptions, DeskTemplate, DrawerSide};
pub use picture_frame::{PictureFrameOptions, PictureFrameTemplate};
pub use shelf_bracket::{BracketStyle, ShelfBracketOptions, ShelfBracketTemplate};
pub use storage_box::{StorageBoxOptions, StorageBoxTemplate, BOX_LID_DISPLAY_GAP};
pub use table::{TableOptions, TableTemplate, TableVariant};
pub use tray::{TrayOptions, TrayTemplate};
pub use workbench::{ApronStyle, WorkbenchOptions, WorkbenchTemplate};
