//! Document store abstraction for slides and presentations.
//!
//! The importer only needs `create_*` and `delete_slide`; the remaining
//! operations serve the CRUD surface and the populate join.

mod json_dir;
mod memory;

pub use json_dir::JsonDirStore;
pub use memory::MemoryStore;

use crate::error::{Error, Result};
use crate::types::{DocumentId, PopulatedPresentation, PresentationRecord, SlideRecord, Stored};
use uuid::Uuid;

/// Persistence for the two record kinds.
pub trait DocumentStore {
    /// Persist a new slide and return it with its assigned id.
    fn create_slide(&mut self, slide: SlideRecord) -> Result<Stored<SlideRecord>>;

    /// Persist a new presentation and return it with its assigned id.
    fn create_presentation(
        &mut self,
        presentation: PresentationRecord,
    ) -> Result<Stored<PresentationRecord>>;

    fn get_slide(&self, id: &str) -> Result<Stored<SlideRecord>>;

    fn get_presentation(&self, id: &str) -> Result<Stored<PresentationRecord>>;

    /// Replace a slide's fields, keeping its id and creation time.
    fn update_slide(&mut self, id: &str, slide: SlideRecord) -> Result<Stored<SlideRecord>>;

    fn delete_slide(&mut self, id: &str) -> Result<()>;

    fn delete_presentation(&mut self, id: &str) -> Result<()>;

    /// All presentations, oldest first.
    fn list_presentations(&self) -> Result<Vec<Stored<PresentationRecord>>>;

    /// Resolve a presentation's slide references.
    ///
    /// References to slides that no longer exist are skipped.
    fn populate(&self, presentation: Stored<PresentationRecord>) -> Result<PopulatedPresentation> {
        let mut slides = Vec::with_capacity(presentation.slides.len());
        for slide_id in &presentation.slides {
            match self.get_slide(slide_id) {
                Ok(slide) => slides.push(slide),
                Err(Error::NotFound { .. }) => {
                    log::warn!(
                        "Presentation {} references missing slide {}",
                        presentation.id,
                        slide_id
                    );
                }
                Err(e) => return Err(e),
            }
        }

        Ok(PopulatedPresentation::from_parts(presentation, slides))
    }
}

/// Generate a new document id.
pub fn new_document_id() -> DocumentId {
    Uuid::new_v4().simple().to_string()
}
