//! The import pipeline: read the package, extract and synthesize every
//! slide, then persist the slides and the presentation that links them.

use crate::extract::extract_fragments;
use crate::package::PackageReader;
use deck_core::store::DocumentStore;
use deck_core::synthesize::{presentation_title, synthesize_slide};
use deck_core::{PopulatedPresentation, PresentationRecord, Result, SlideRecord, Stored};
use serde::{Deserialize, Serialize};

/// Caller-supplied overrides for an import.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportOptions {
    /// Presentation title. Defaults to the file's base name.
    #[serde(default)]
    pub title: Option<String>,

    /// Owner id, stored verbatim when present.
    #[serde(default)]
    pub user_id: Option<u64>,
}

impl ImportOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    pub fn with_user_id(mut self, user_id: u64) -> Self {
        self.user_id = Some(user_id);
        self
    }
}

/// A slide whose extraction was cut short.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideWarning {
    /// 0-based position in the package.
    pub position: usize,
    pub part: String,
    pub message: String,
}

/// Synthesized slides of a package, not yet persisted.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtractedDeck {
    pub slides: Vec<SlideRecord>,
    pub warnings: Vec<SlideWarning>,
}

/// Imports PPTX packages into a [`DocumentStore`].
#[derive(Debug, Clone, Copy)]
pub struct PptxImporter;

impl PptxImporter {
    /// Create a new importer.
    pub fn new() -> Self {
        Self
    }

    /// Read a package and synthesize one record per slide part, in order.
    ///
    /// Only package-level failures are returned; a slide that cannot be
    /// walked still produces a record at its position and a warning.
    pub fn extract(&self, data: &[u8]) -> Result<ExtractedDeck> {
        let mut reader = PackageReader::open(data)?;
        let mut slides = Vec::with_capacity(reader.slide_count());
        let mut warnings = Vec::new();

        for (position, part) in reader.parts().enumerate() {
            let part = part?;
            let extraction = extract_fragments(&part.xml);

            if let Some(error) = &extraction.error {
                log::warn!(
                    "Slide {} ({}): {}; keeping {} fragment(s)",
                    part.index,
                    part.name,
                    error,
                    extraction.fragments.len()
                );
                warnings.push(SlideWarning {
                    position,
                    part: part.name.clone(),
                    message: error.to_string(),
                });
            }

            log::debug!(
                "Slide {} ({}): {} fragment(s)",
                part.index,
                part.name,
                extraction.fragments.len()
            );
            slides.push(synthesize_slide(&extraction.fragments, position));
        }

        Ok(ExtractedDeck { slides, warnings })
    }

    /// Import a package: persist its slides in order, then one presentation
    /// referencing them.
    ///
    /// All slides are synthesized before the first write, so a package read
    /// failure leaves the store untouched. If a write fails, the slides
    /// created so far are deleted again and no presentation is created.
    pub fn import<S>(
        &self,
        data: &[u8],
        filename: &str,
        options: &ImportOptions,
        store: &mut S,
    ) -> Result<PopulatedPresentation>
    where
        S: DocumentStore + ?Sized,
    {
        let deck = self.extract(data)?;

        let mut created: Vec<Stored<SlideRecord>> = Vec::with_capacity(deck.slides.len());
        for slide in deck.slides {
            match store.create_slide(slide) {
                Ok(stored) => created.push(stored),
                Err(e) => {
                    discard_slides(store, &created);
                    return Err(e.into_persistence());
                }
            }
        }

        let record = PresentationRecord {
            title: Some(presentation_title(options.title.as_deref(), filename)),
            user_id: options.user_id,
            slides: created.iter().map(|s| s.id.clone()).collect(),
        };

        let presentation = match store.create_presentation(record) {
            Ok(presentation) => presentation,
            Err(e) => {
                discard_slides(store, &created);
                return Err(e.into_persistence());
            }
        };

        log::info!(
            "Imported {} as presentation {} with {} slide(s)",
            filename,
            presentation.id,
            created.len()
        );

        Ok(PopulatedPresentation::from_parts(presentation, created))
    }
}

impl Default for PptxImporter {
    fn default() -> Self {
        Self::new()
    }
}

/// Compensating deletes after a failed write. Failures are only logged.
fn discard_slides<S>(store: &mut S, created: &[Stored<SlideRecord>])
where
    S: DocumentStore + ?Sized,
{
    for slide in created {
        if let Err(e) = store.delete_slide(&slide.id) {
            log::warn!("Failed to remove orphaned slide {}: {}", slide.id, e);
        }
    }
}
