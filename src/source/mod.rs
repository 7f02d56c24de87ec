// file: src/source/mod.rs
// description: filing-source provider interface and implementations
// reference: internal module structure

pub mod edgar;
pub mod snapshot;

use crate::error::{Result, SurfaceError};
use crate::models::{Attachment, FilingMeta, PressReleases};
use chrono::NaiveDate;

pub use edgar::{EdgarFiling, EdgarSource};
pub use snapshot::{SnapshotFiling, SnapshotSource};

/// One filing as exposed by a provider. Every surface accessor reports its
/// own failure so the scanner can isolate it.
pub trait FilingHandle {
    fn meta(&self) -> &FilingMeta;

    fn primary_text(&self) -> std::result::Result<String, SurfaceError>;

    fn attachments(&self) -> std::result::Result<Vec<Attachment>, SurfaceError>;

    fn attachment_content(
        &self,
        attachment: &Attachment,
    ) -> std::result::Result<String, SurfaceError>;

    /// Filings without a press-release notion report `Absent`.
    fn press_releases(&self) -> std::result::Result<PressReleases, SurfaceError> {
        Ok(PressReleases::Absent)
    }

    /// Item list shown in the merger/acquisition table.
    fn items(&self) -> Option<String> {
        self.meta().items.clone()
    }
}

pub trait FilingSource {
    type Filing: FilingHandle;

    /// Filings of exactly `form` filed on `date`, in provider order.
    fn list_filings(&self, form: &str, date: NaiveDate) -> Result<Vec<Self::Filing>>;
}
