//! Slide synthesis: maps a slide's text fragments onto a [`SlideRecord`].
//!
//! The first fragment becomes the title, the remaining fragments become
//! content items rendered as HTML. Background colors cycle through a fixed
//! dark palette by slide position.

use crate::types::{SlideLayout, SlideRecord, TextFragment};

/// Title used when a slide has no text at all.
pub const UNTITLED_SLIDE: &str = "Untitled Slide";

/// Background colors assigned by slide position.
pub const BACKGROUND_PALETTE: [&str; 6] = [
    "#1e293b", "#0f172a", "#1f2937", "#374151", "#4b5563", "#6b7280",
];

/// Escape text for embedding in HTML element content or attributes.
pub fn escape_html(text: &str) -> String {
    let mut escaped = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#039;"),
            _ => escaped.push(c),
        }
    }
    escaped
}

/// Background color for the slide at the given 0-based position.
pub fn background_color(position: usize) -> &'static str {
    BACKGROUND_PALETTE[position % BACKGROUND_PALETTE.len()]
}

/// Pick a layout from the extracted title.
///
/// A title always wins, whether or not content items exist. Slides without
/// any extracted text are also `ContentOnly`.
pub fn classify_layout(title: &str) -> SlideLayout {
    if title.is_empty() {
        SlideLayout::ContentOnly
    } else {
        SlideLayout::TitleContent
    }
}

/// Render content items as HTML.
///
/// # Example output
/// ```text
/// <p>Only item</p>
/// <ul><li>First</li><li>Second</li></ul>
/// ```
pub fn render_content(items: &[TextFragment]) -> String {
    match items {
        [] => String::new(),
        [single] => format!("<p>{}</p>", escape_html(single.as_str())),
        many => {
            let list_items: String = many
                .iter()
                .map(|item| format!("<li>{}</li>", escape_html(item.as_str())))
                .collect();
            format!("<ul>{}</ul>", list_items)
        }
    }
}

/// Build the slide record for one slide.
///
/// `position` is the slide's 0-based position in the package and only
/// affects the background color.
pub fn synthesize_slide(fragments: &[TextFragment], position: usize) -> SlideRecord {
    let (title, items) = match fragments.split_first() {
        Some((first, rest)) => (first.as_str(), rest),
        None => ("", fragments),
    };

    let layout = classify_layout(title);
    let title = if title.is_empty() { UNTITLED_SLIDE } else { title };

    SlideRecord {
        title: title.to_string(),
        subtitle: String::new(),
        content: render_content(items),
        image: String::new(),
        layout,
        background_color: background_color(position).to_string(),
    }
}

/// Presentation title: the explicit title if non-blank, otherwise the file's
/// base name without its extension.
pub fn presentation_title(explicit: Option<&str>, filename: &str) -> String {
    if let Some(title) = explicit.map(str::trim).filter(|t| !t.is_empty()) {
        return title.to_string();
    }

    let base = filename
        .rsplit(['/', '\\'])
        .next()
        .unwrap_or(filename);

    match base.rsplit_once('.') {
        Some((stem, _)) if !stem.is_empty() => stem.to_string(),
        _ => base.to_string(),
    }
}
