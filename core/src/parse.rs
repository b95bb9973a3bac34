use crate::model::{Hotel, Review};
use anyhow::{Context, Result};
use serde::Deserialize;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

/// Parses the single hotel-catalog file. Injected into the ingestion
/// pipeline so tests and other front-ends can substitute their own format.
pub trait CatalogParser: Send + Sync {
    fn parse_catalog(&self, path: &Path) -> Result<Vec<Hotel>>;
}

/// Parses one review file into the reviews it contains.
pub trait ReviewParser: Send + Sync {
    fn parse_review_file(&self, path: &Path) -> Result<Vec<Review>>;
}

#[derive(Debug, Deserialize)]
struct CatalogFile {
    sr: Vec<Hotel>,
}

#[derive(Debug, Deserialize)]
struct ReviewFile {
    #[serde(rename = "reviewDetails")]
    details: ReviewDetails,
}

#[derive(Debug, Deserialize)]
struct ReviewDetails {
    #[serde(rename = "reviewCollection")]
    collection: ReviewCollection,
}

#[derive(Debug, Deserialize)]
struct ReviewCollection {
    review: Vec<Review>,
}

/// Reads the catalog's `{"sr": [...]}` JSON shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonCatalogParser;

impl CatalogParser for JsonCatalogParser {
    fn parse_catalog(&self, path: &Path) -> Result<Vec<Hotel>> {
        let file = File::open(path)
            .with_context(|| format!("could not open hotel catalog {}", path.display()))?;
        let catalog: CatalogFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed hotel catalog {}", path.display()))?;
        Ok(catalog.sr)
    }
}

/// Reads the dataset's `reviewDetails.reviewCollection.review` JSON shape.
#[derive(Debug, Default, Clone, Copy)]
pub struct JsonReviewParser;

impl ReviewParser for JsonReviewParser {
    fn parse_review_file(&self, path: &Path) -> Result<Vec<Review>> {
        let file = File::open(path)
            .with_context(|| format!("could not open review file {}", path.display()))?;
        let parsed: ReviewFile = serde_json::from_reader(BufReader::new(file))
            .with_context(|| format!("malformed review file {}", path.display()))?;
        Ok(parsed.details.collection.review)
    }
}
