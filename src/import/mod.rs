//! Import declaration handling
//!
//! Reading the resource identifier out of `import.tf` and temporarily
//! replacing that declaration with one bound to a placeholder address.

mod reader;
mod rewriter;
mod workspace;

pub use reader::read_resource_id;
pub use rewriter::render_temp_import;
pub use workspace::{WorkspaceGuard, WorkspacePaths};
