//! Core domain types, slide synthesis, and document stores for
//! presentation import.

pub mod error;
pub mod store;
pub mod synthesize;
pub mod types;

pub use error::{Error, Result};
pub use store::{DocumentStore, JsonDirStore, MemoryStore};
pub use synthesize::{escape_html, synthesize_slide, BACKGROUND_PALETTE, UNTITLED_SLIDE};
pub use types::{
    DocumentId, PopulatedPresentation, PresentationRecord, SlideLayout, SlideRecord, Stored,
    TextFragment,
};
