//! PPTX package reading: opens the ZIP container and yields slide parts in
//! slide-number order.

use deck_core::{Error, Result};
use regex::Regex;
use std::io::{Cursor, Read};
use std::sync::LazyLock;
use zip::ZipArchive;

/// Directory holding the slide parts inside the package.
const SLIDES_DIR: &str = "ppt/slides/";

/// Regex to capture the number immediately preceding `.xml`.
static SLIDE_INDEX_REGEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"(\d+)\.xml$").unwrap());

/// One slide entry of the package.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SlidePart {
    /// 1-based slide number parsed from the part name (0 if unparseable).
    pub index: u32,

    /// Full part name, e.g. `ppt/slides/slide3.xml`.
    pub name: String,

    /// Raw slide XML.
    pub xml: String,
}

/// Reader over an in-memory PPTX package.
pub struct PackageReader<'a> {
    archive: ZipArchive<Cursor<&'a [u8]>>,
    /// `(index, name)` pairs, sorted.
    slides: Vec<(u32, String)>,
}

impl<'a> PackageReader<'a> {
    /// Open a package from raw bytes.
    ///
    /// Fails with [`Error::PackageRead`] if the bytes are not a ZIP archive
    /// or the archive holds no slide parts.
    pub fn open(data: &'a [u8]) -> Result<Self> {
        let archive = ZipArchive::new(Cursor::new(data))
            .map_err(|e| Error::PackageRead(format!("Not a valid ZIP archive: {}", e)))?;

        let mut slides: Vec<(u32, String)> = archive
            .file_names()
            .filter(|name| is_slide_part(name))
            .map(|name| (slide_index(name), name.to_string()))
            .collect();

        if slides.is_empty() {
            return Err(Error::PackageRead(
                "Package contains no slide parts".to_string(),
            ));
        }

        // Numeric order: slide10 after slide2. Name breaks ties between
        // unparseable parts so the order is stable across archive layouts.
        slides.sort();

        log::debug!("Found {} slide parts", slides.len());

        Ok(Self { archive, slides })
    }

    /// Number of slide parts in the package.
    pub fn slide_count(&self) -> usize {
        self.slides.len()
    }

    /// Slide part names in processing order.
    pub fn slide_names(&self) -> impl Iterator<Item = &str> {
        self.slides.iter().map(|(_, name)| name.as_str())
    }

    /// Iterate the slide parts in order, reading each entry lazily.
    pub fn parts(&mut self) -> SlideParts<'_, 'a> {
        SlideParts {
            archive: &mut self.archive,
            slides: &self.slides,
            position: 0,
        }
    }
}

/// Lazy iterator over the slide parts of a [`PackageReader`].
pub struct SlideParts<'r, 'a> {
    archive: &'r mut ZipArchive<Cursor<&'a [u8]>>,
    slides: &'r [(u32, String)],
    position: usize,
}

impl Iterator for SlideParts<'_, '_> {
    type Item = Result<SlidePart>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, name) = self.slides.get(self.position)?;
        self.position += 1;

        Some(read_entry(self.archive, name).map(|xml| SlidePart {
            index: *index,
            name: name.clone(),
            xml,
        }))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.slides.len() - self.position;
        (remaining, Some(remaining))
    }
}

impl ExactSizeIterator for SlideParts<'_, '_> {}

/// Read one archive entry as text. Invalid UTF-8 is replaced, not rejected.
fn read_entry(archive: &mut ZipArchive<Cursor<&[u8]>>, name: &str) -> Result<String> {
    let mut file = archive
        .by_name(name)
        .map_err(|e| Error::PackageRead(format!("Failed to open '{}': {}", name, e)))?;

    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| Error::PackageRead(format!("Failed to read '{}': {}", name, e)))?;

    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

/// Whether an archive entry is a slide part (`ppt/slides/slide*.xml`).
pub fn is_slide_part(name: &str) -> bool {
    match name.strip_prefix(SLIDES_DIR) {
        Some(file) => !file.contains('/') && file.starts_with("slide") && file.ends_with(".xml"),
        None => false,
    }
}

/// Slide number encoded in a part name, or 0 if there is none.
///
/// Numbers too large for `u32` saturate so those parts still sort last.
pub fn slide_index(name: &str) -> u32 {
    SLIDE_INDEX_REGEX
        .captures(name)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().parse().unwrap_or(u32::MAX))
        .unwrap_or(0)
}
