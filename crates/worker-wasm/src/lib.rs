//! WASM-compatible wrapper for PPTX import.
//!
//! This crate exposes the import pipeline to JavaScript hosts such as
//! Cloudflare Workers. Each call imports into a fresh in-memory store and
//! returns the populated presentation; persisting it is up to the host.

use deck_core::{MemoryStore, PopulatedPresentation};
use deck_pptx::{ExtractedDeck, ImportOptions, PptxImporter};
use wasm_bindgen::prelude::*;

#[wasm_bindgen(start)]
pub fn init() {
    // Set up better panic messages in the console
    #[cfg(feature = "console_error_panic_hook")]
    console_error_panic_hook::set_once();
}

/// Import a PPTX file.
///
/// # Arguments
/// * `data` - The raw bytes of the PPTX file
/// * `filename` - The original filename (default presentation title)
/// * `options` - Optional `{ title, userId }` object
///
/// # Returns
/// The created presentation with its slides, or throws on error.
#[wasm_bindgen]
pub fn import_presentation(data: &[u8], filename: &str, options: JsValue) -> Result<JsValue, JsValue> {
    let options: ImportOptions = if options.is_undefined() || options.is_null() {
        ImportOptions::default()
    } else {
        serde_wasm_bindgen::from_value(options)
            .map_err(|e| JsValue::from_str(&format!("Invalid import options: {}", e)))?
    };

    let presentation = import_presentation_impl(data, filename, &options)
        .map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&presentation)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

/// Synthesize the slides of a PPTX file without creating any documents.
#[wasm_bindgen]
pub fn extract_slides(data: &[u8]) -> Result<JsValue, JsValue> {
    let deck = extract_slides_impl(data).map_err(|e| JsValue::from_str(&e))?;

    serde_wasm_bindgen::to_value(&deck)
        .map_err(|e| JsValue::from_str(&format!("Serialization error: {}", e)))
}

fn import_presentation_impl(
    data: &[u8],
    filename: &str,
    options: &ImportOptions,
) -> Result<PopulatedPresentation, String> {
    let mut store = MemoryStore::new();
    PptxImporter::new()
        .import(data, filename, options, &mut store)
        .map_err(|e| e.to_string())
}

fn extract_slides_impl(data: &[u8]) -> Result<ExtractedDeck, String> {
    PptxImporter::new().extract(data).map_err(|e| e.to_string())
}
