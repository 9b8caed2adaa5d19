//! Data models for the scraped Mars record.
//!
//! This module defines the core data structures produced by a scrape run:
//! - [`ScrapeResult`]: the aggregate record assembled from all four sites
//! - [`HemisphereEntry`]: one hemisphere title paired with its full-size
//!   image URL
//!
//! Everything here is transient: a record is populated once per run, written
//! out as JSON, and has no identity beyond that run.

use chrono::{DateTime, Local};
use serde::{Deserialize, Serialize};

/// The aggregate record produced by one scrape run.
///
/// Each field corresponds to one extractor. Extractor failures degrade the
/// field to an absent value instead of aborting the run, so any subset of
/// the fields may be populated.
///
/// # Fields
///
/// * `news_title` / `news_paragraph` - latest headline and its teaser; both
///   present or both absent
/// * `featured_image` - absolute URL of the current featured image
/// * `facts` - HTML `<table>` fragment comparing Mars and Earth
/// * `hemispheres` - one entry per hemisphere, in page traversal order
/// * `last_modified` - when this record was assembled
#[derive(Debug, Deserialize, Serialize)]
pub struct ScrapeResult {
    /// Title of the most recent news item.
    pub news_title: Option<String>,
    /// Teaser paragraph accompanying the news title.
    pub news_paragraph: Option<String>,
    /// Absolute URL of the full-size featured image.
    pub featured_image: Option<String>,
    /// Mars/Earth facts table as an HTML fragment.
    pub facts: Option<String>,
    /// Hemisphere titles and full-resolution image URLs.
    pub hemispheres: Vec<HemisphereEntry>,
    /// Timestamp of record assembly.
    pub last_modified: DateTime<Local>,
}

impl ScrapeResult {
    /// Count how many of the four extractor sections carry data.
    ///
    /// The news title and teaser count as one section since they are
    /// extracted together; `hemispheres` counts when non-empty.
    pub fn populated_sections(&self) -> usize {
        [
            self.news_title.is_some() && self.news_paragraph.is_some(),
            self.featured_image.is_some(),
            self.facts.is_some(),
            !self.hemispheres.is_empty(),
        ]
        .iter()
        .filter(|populated| **populated)
        .count()
    }
}

/// One hemisphere listing entry.
///
/// Order of entries reflects the order headings appeared on the listing
/// page; no uniqueness is enforced beyond the source page structure.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct HemisphereEntry {
    /// Heading text naming the hemisphere image.
    pub title: String,
    /// Absolute URL of the full-resolution image.
    pub img_url: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn full_result() -> ScrapeResult {
        ScrapeResult {
            news_title: Some("Mars Rover Begins Mission".to_string()),
            news_paragraph: Some("The rover touched down safely.".to_string()),
            featured_image: Some(
                "https://spaceimages-mars.com/image/featured/mars2.jpg".to_string(),
            ),
            facts: Some("<table border=\"1\" class=\"dataframe\"></table>".to_string()),
            hemispheres: vec![HemisphereEntry {
                title: "Cerberus Hemisphere Enhanced".to_string(),
                img_url: "https://marshemispheres.com/images/full.jpg".to_string(),
            }],
            last_modified: Local::now(),
        }
    }

    #[test]
    fn test_result_serialization() {
        let result = full_result();
        let json = serde_json::to_string(&result).unwrap();

        assert!(json.contains("\"news_title\""));
        assert!(json.contains("\"news_paragraph\""));
        assert!(json.contains("\"featured_image\""));
        assert!(json.contains("\"facts\""));
        assert!(json.contains("\"hemispheres\""));
        assert!(json.contains("\"last_modified\""));
        assert!(json.contains("Mars Rover Begins Mission"));
    }

    #[test]
    fn test_result_deserialization() {
        let json = r#"{
            "news_title": null,
            "news_paragraph": null,
            "featured_image": null,
            "facts": null,
            "hemispheres": [],
            "last_modified": "2025-05-06T20:30:00-05:00"
        }"#;

        let result: ScrapeResult = serde_json::from_str(json).unwrap();
        assert!(result.news_title.is_none());
        assert!(result.hemispheres.is_empty());
    }

    #[test]
    fn test_populated_sections_full() {
        assert_eq!(full_result().populated_sections(), 4);
    }

    #[test]
    fn test_populated_sections_empty() {
        let result = ScrapeResult {
            news_title: None,
            news_paragraph: None,
            featured_image: None,
            facts: None,
            hemispheres: Vec::new(),
            last_modified: Local::now(),
        };
        assert_eq!(result.populated_sections(), 0);
    }

    #[test]
    fn test_populated_sections_partial() {
        let mut result = full_result();
        result.featured_image = None;
        result.hemispheres.clear();
        assert_eq!(result.populated_sections(), 2);
    }

    #[test]
    fn test_hemisphere_entry_roundtrip() {
        let entry = HemisphereEntry {
            title: "Schiaparelli Hemisphere Enhanced".to_string(),
            img_url: "https://marshemispheres.com/images/schiaparelli_enhanced-full.jpg"
                .to_string(),
        };

        let json = serde_json::to_string(&entry).unwrap();
        let back: HemisphereEntry = serde_json::from_str(&json).unwrap();
        assert_eq!(back, entry);
    }
}
