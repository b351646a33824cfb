//! # Preference Extraction
//!
//! Scans chat messages for shopping-interest keywords ([`PreferenceLexicon`]) and records
//! matches as `LIKES` relations in the knowledge graph ([`PreferenceExtractor`]).

mod extractor;
mod lexicon;

pub use extractor::{ExtractionReport, PreferenceExtractor};
pub use lexicon::{PreferenceLexicon, PreferenceMatch};
