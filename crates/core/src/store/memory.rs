//! In-memory document store.

use super::{new_document_id, DocumentStore};
use crate::error::{Error, Result};
use crate::types::{DocumentId, PresentationRecord, SlideRecord, Stored};
use chrono::Utc;
use std::collections::HashMap;

/// A `HashMap`-backed store.
///
/// Presentations are listed in insertion order. A write budget can be set
/// with [`MemoryStore::fail_after`] to make later writes fail.
#[derive(Debug, Default)]
pub struct MemoryStore {
    slides: HashMap<DocumentId, Stored<SlideRecord>>,
    presentations: HashMap<DocumentId, Stored<PresentationRecord>>,
    presentation_order: Vec<DocumentId>,
    writes: usize,
    write_budget: Option<usize>,
}

impl MemoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Allow only `writes` more successful create/update calls.
    pub fn fail_after(mut self, writes: usize) -> Self {
        self.write_budget = Some(self.writes + writes);
        self
    }

    /// Number of successful create/update calls so far.
    pub fn writes(&self) -> usize {
        self.writes
    }

    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    pub fn presentation_count(&self) -> usize {
        self.presentations.len()
    }

    fn record_write(&mut self) -> Result<()> {
        if let Some(budget) = self.write_budget {
            if self.writes >= budget {
                return Err(Error::Persistence("write budget exhausted".to_string()));
            }
        }
        self.writes += 1;
        Ok(())
    }
}

impl DocumentStore for MemoryStore {
    fn create_slide(&mut self, slide: SlideRecord) -> Result<Stored<SlideRecord>> {
        self.record_write()?;
        let stored = Stored::new(new_document_id(), slide);
        self.slides.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn create_presentation(
        &mut self,
        presentation: PresentationRecord,
    ) -> Result<Stored<PresentationRecord>> {
        self.record_write()?;
        let stored = Stored::new(new_document_id(), presentation);
        self.presentation_order.push(stored.id.clone());
        self.presentations.insert(stored.id.clone(), stored.clone());
        Ok(stored)
    }

    fn get_slide(&self, id: &str) -> Result<Stored<SlideRecord>> {
        self.slides.get(id).cloned().ok_or_else(|| Error::NotFound {
            kind: "slide",
            id: id.to_string(),
        })
    }

    fn get_presentation(&self, id: &str) -> Result<Stored<PresentationRecord>> {
        self.presentations
            .get(id)
            .cloned()
            .ok_or_else(|| Error::NotFound {
                kind: "presentation",
                id: id.to_string(),
            })
    }

    fn update_slide(&mut self, id: &str, slide: SlideRecord) -> Result<Stored<SlideRecord>> {
        if !self.slides.contains_key(id) {
            return Err(Error::NotFound {
                kind: "slide",
                id: id.to_string(),
            });
        }
        self.record_write()?;

        let stored = self.slides.get_mut(id).ok_or_else(|| Error::NotFound {
            kind: "slide",
            id: id.to_string(),
        })?;
        stored.record = slide;
        stored.updated_at = Utc::now();
        Ok(stored.clone())
    }

    fn delete_slide(&mut self, id: &str) -> Result<()> {
        self.slides
            .remove(id)
            .map(|_| ())
            .ok_or_else(|| Error::NotFound {
                kind: "slide",
                id: id.to_string(),
            })
    }

    fn delete_presentation(&mut self, id: &str) -> Result<()> {
        self.presentations.remove(id).ok_or_else(|| Error::NotFound {
            kind: "presentation",
            id: id.to_string(),
        })?;
        self.presentation_order.retain(|p| p != id);
        Ok(())
    }

    fn list_presentations(&self) -> Result<Vec<Stored<PresentationRecord>>> {
        Ok(self
            .presentation_order
            .iter()
            .filter_map(|id| self.presentations.get(id).cloned())
            .collect())
    }
}
