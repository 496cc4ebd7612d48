//! Domain types for imported slides and presentations.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::Deref;

/// Identifier of a stored document.
pub type DocumentId = String;

/// A plain-text string recovered from one paragraph of a slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TextFragment(String);

impl TextFragment {
    /// Create a fragment, trimming surrounding whitespace.
    ///
    /// Returns `None` for empty or whitespace-only text.
    pub fn new(text: impl AsRef<str>) -> Option<Self> {
        let trimmed = text.as_ref().trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_string()))
        }
    }

    /// The fragment text.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TextFragment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Layout tag of a slide.
///
/// Imported slides only ever use `TitleContent` or `ContentOnly`; the other
/// tags are set by manual editing and must round-trip through the store.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum SlideLayout {
    TitleContentImage,
    TitleContent,
    ContentOnly,
    ImageLeft,
    ImageRight,
}

impl SlideLayout {
    /// The serialized tag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TitleContentImage => "title-content-image",
            Self::TitleContent => "title-content",
            Self::ContentOnly => "content-only",
            Self::ImageLeft => "image-left",
            Self::ImageRight => "image-right",
        }
    }
}

impl fmt::Display for SlideLayout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A persisted slide.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SlideRecord {
    pub title: String,

    /// Always empty for imported slides.
    pub subtitle: String,

    /// HTML body: empty, a single `<p>`, or a `<ul>` list.
    pub content: String,

    /// Public path of an uploaded image. Always empty for imported slides.
    pub image: String,

    pub layout: SlideLayout,

    /// Hex color, e.g. `#1e293b`.
    pub background_color: String,
}

/// A persisted presentation: an ordered list of slide references.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PresentationRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Identifier of the owning user in the external account system.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,

    /// Slide ids in presentation order.
    pub slides: Vec<DocumentId>,
}

/// A record together with the metadata the store assigns to it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Stored<T> {
    pub id: DocumentId,
    #[serde(flatten)]
    pub record: T,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl<T> Stored<T> {
    /// Wrap a freshly created record.
    pub fn new(id: impl Into<DocumentId>, record: T) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            record,
            created_at: now,
            updated_at: now,
        }
    }
}

impl<T> Deref for Stored<T> {
    type Target = T;

    fn deref(&self) -> &T {
        &self.record
    }
}

/// A presentation with its slide references resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PopulatedPresentation {
    pub id: DocumentId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<u64>,
    pub slides: Vec<Stored<SlideRecord>>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl PopulatedPresentation {
    /// Join a stored presentation with its already-resolved slides.
    pub fn from_parts(
        presentation: Stored<PresentationRecord>,
        slides: Vec<Stored<SlideRecord>>,
    ) -> Self {
        let Stored {
            id,
            record,
            created_at,
            updated_at,
        } = presentation;

        Self {
            id,
            title: record.title,
            user_id: record.user_id,
            slides,
            created_at,
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_text_fragment_trims_and_rejects_blank() {
        assert_eq!(TextFragment::new("  Hello \n").unwrap().as_str(), "Hello");
        assert!(TextFragment::new("").is_none());
        assert!(TextFragment::new(" \t\n").is_none());
    }

    #[test]
    fn test_layout_serializes_kebab_case() {
        let json = serde_json::to_string(&SlideLayout::TitleContent).unwrap();
        assert_eq!(json, "\"title-content\"");

        let layout: SlideLayout = serde_json::from_str("\"title-content-image\"").unwrap();
        assert_eq!(layout, SlideLayout::TitleContentImage);
        assert_eq!(SlideLayout::ContentOnly.to_string(), "content-only");
    }

    #[test]
    fn test_slide_record_uses_camel_case_fields() {
        let slide = SlideRecord {
            title: "Intro".into(),
            subtitle: String::new(),
            content: String::new(),
            image: String::new(),
            layout: SlideLayout::ContentOnly,
            background_color: "#1e293b".into(),
        };
        let value = serde_json::to_value(Stored::new("s1", slide)).unwrap();

        assert_eq!(value["id"], "s1");
        assert_eq!(value["backgroundColor"], "#1e293b");
        assert_eq!(value["layout"], "content-only");
        assert!(value.get("createdAt").is_some());
    }

    #[test]
    fn test_presentation_omits_missing_owner() {
        let presentation = PresentationRecord {
            title: Some("Deck".into()),
            user_id: None,
            slides: vec!["a".into(), "b".into()],
        };
        let value = serde_json::to_value(&presentation).unwrap();

        assert!(value.get("userId").is_none());
        assert_eq!(value["slides"], serde_json::json!(["a", "b"]));
    }
}
