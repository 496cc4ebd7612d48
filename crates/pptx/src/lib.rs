//! PPTX (OOXML) import pipeline.
//!
//! Reads slide parts from a presentation package, recovers their text, and
//! persists one slide record per part plus a presentation linking them.

pub mod extract;
pub mod import;
pub mod package;
pub mod xml;

#[cfg(test)]
mod test_support;

pub use extract::{extract_fragments, Extraction};
pub use import::{ExtractedDeck, ImportOptions, PptxImporter, SlideWarning};
pub use package::{PackageReader, SlidePart};
