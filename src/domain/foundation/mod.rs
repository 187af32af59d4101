//! Foundation value objects shared across the domain.

mod errors;
mod ids;
mod percentage;
mod timestamp;

pub use errors::ValidationError;
pub use ids::{MessageId, ProjectId, UserId};
pub use percentage::Percentage;
pub use timestamp::Timestamp;
