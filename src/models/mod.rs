// file: src/models/mod.rs
// description: data models module exports
// reference: internal module structure

pub mod category;
pub mod filing;
pub mod hit;
pub mod provenance;

pub use category::Category;
pub use filing::{Attachment, FilingMeta, PressRelease, PressReleases};
pub use hit::{HitRow, ResultTable, TableSchema};
pub use provenance::{SurfaceTag, WhereFound};
