//! Use-case handlers wiring the domain to the ports.

mod distill_progress;
mod forge_document;
mod mentor;
mod refine_document;

pub use distill_progress::{DistillError, DistillOutcome, DistillProgressHandler};
pub use forge_document::{ForgeDocumentCommand, ForgeDocumentHandler, ForgeError, ForgeOutcome};
pub use mentor::{MentorError, MentorHandler};
pub use refine_document::{RefineDocumentHandler, RefineHandlerError};
