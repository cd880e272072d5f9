pub mod models;
pub mod writer;

pub use models::{render_dynamic_badge, render_error_badge, Badge, DEFAULT_LABEL};
pub use writer::{BadgeWriter, OutputFormat};
