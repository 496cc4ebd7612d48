//! Directory-backed document store with one JSON file per document.

use super::{new_document_id, DocumentStore};
use crate::error::{Error, Result};
use crate::types::{PresentationRecord, SlideRecord, Stored};
use chrono::Utc;
use serde::de::DeserializeOwned;
use serde::Serialize;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

const SLIDES_DIR: &str = "slides";
const PRESENTATIONS_DIR: &str = "presentations";

/// Stores documents as `<root>/slides/<id>.json` and
/// `<root>/presentations/<id>.json`.
#[derive(Debug, Clone)]
pub struct JsonDirStore {
    root: PathBuf,
}

impl JsonDirStore {
    /// Open a store rooted at `root`, creating its directories if needed.
    pub fn open(root: impl Into<PathBuf>) -> Result<Self> {
        let root = root.into();
        fs::create_dir_all(root.join(SLIDES_DIR))?;
        fs::create_dir_all(root.join(PRESENTATIONS_DIR))?;
        Ok(Self { root })
    }

    /// The store's root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, dir: &str, id: &str) -> Result<PathBuf> {
        // Ids are used as file names; reject anything that could escape the directory.
        if id.is_empty() || !id.chars().all(|c| c.is_ascii_alphanumeric() || c == '-') {
            return Err(Error::NotFound {
                kind: kind_for(dir),
                id: id.to_string(),
            });
        }
        Ok(self.root.join(dir).join(format!("{}.json", id)))
    }

    fn write<T: Serialize>(&self, dir: &str, stored: &Stored<T>) -> Result<()> {
        let path = self.path_for(dir, &stored.id)?;
        let json = serde_json::to_vec_pretty(stored)?;
        fs::write(&path, json)
            .map_err(|e| Error::Persistence(format!("Failed to write {}: {}", path.display(), e)))
    }

    fn read<T: DeserializeOwned>(&self, dir: &str, id: &str) -> Result<Stored<T>> {
        let path = self.path_for(dir, id)?;
        let bytes = match fs::read(&path) {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == ErrorKind::NotFound => {
                return Err(Error::NotFound {
                    kind: kind_for(dir),
                    id: id.to_string(),
                })
            }
            Err(e) => return Err(e.into()),
        };
        Ok(serde_json::from_slice(&bytes)?)
    }

    fn remove(&self, dir: &str, id: &str) -> Result<()> {
        let path = self.path_for(dir, id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Err(Error::NotFound {
                kind: kind_for(dir),
                id: id.to_string(),
            }),
            Err(e) => Err(e.into()),
        }
    }
}

fn kind_for(dir: &str) -> &'static str {
    if dir == SLIDES_DIR {
        "slide"
    } else {
        "presentation"
    }
}

impl DocumentStore for JsonDirStore {
    fn create_slide(&mut self, slide: SlideRecord) -> Result<Stored<SlideRecord>> {
        let stored = Stored::new(new_document_id(), slide);
        self.write(SLIDES_DIR, &stored)?;
        Ok(stored)
    }

    fn create_presentation(
        &mut self,
        presentation: PresentationRecord,
    ) -> Result<Stored<PresentationRecord>> {
        let stored = Stored::new(new_document_id(), presentation);
        self.write(PRESENTATIONS_DIR, &stored)?;
        Ok(stored)
    }

    fn get_slide(&self, id: &str) -> Result<Stored<SlideRecord>> {
        self.read(SLIDES_DIR, id)
    }

    fn get_presentation(&self, id: &str) -> Result<Stored<PresentationRecord>> {
        self.read(PRESENTATIONS_DIR, id)
    }

    fn update_slide(&mut self, id: &str, slide: SlideRecord) -> Result<Stored<SlideRecord>> {
        let mut stored: Stored<SlideRecord> = self.read(SLIDES_DIR, id)?;
        stored.record = slide;
        stored.updated_at = Utc::now();
        self.write(SLIDES_DIR, &stored)?;
        Ok(stored)
    }

    fn delete_slide(&mut self, id: &str) -> Result<()> {
        self.remove(SLIDES_DIR, id)
    }

    fn delete_presentation(&mut self, id: &str) -> Result<()> {
        self.remove(PRESENTATIONS_DIR, id)
    }

    fn list_presentations(&self) -> Result<Vec<Stored<PresentationRecord>>> {
        let mut presentations = Vec::new();
        for entry in fs::read_dir(self.root.join(PRESENTATIONS_DIR))? {
            let path = entry?.path();
            if path.extension().and_then(|e| e.to_str()) != Some("json") {
                continue;
            }
            let bytes = fs::read(&path)?;
            match serde_json::from_slice::<Stored<PresentationRecord>>(&bytes) {
                Ok(presentation) => presentations.push(presentation),
                Err(e) => log::warn!("Skipping unreadable {}: {}", path.display(), e),
            }
        }
        presentations.sort_by(|a, b| a.created_at.cmp(&b.created_at));
        Ok(presentations)
    }
}
