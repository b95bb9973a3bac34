use anyhow::{anyhow, Result};
use serde::{Deserialize, Deserializer};
use std::cmp::Ordering;
use std::sync::Arc;
use time::format_description::FormatItem;
use time::macros::format_description;
use time::Date;

static DATE_FORMAT: &[FormatItem<'static>] = format_description!("[year]-[month]-[day]");

/// Geographic coordinates of a hotel. The catalog stores lat/lng as strings,
/// so both string and number representations are accepted.
#[derive(Debug, Clone, Deserialize)]
pub struct Location {
    #[serde(deserialize_with = "de_coord")]
    pub lat: f64,
    #[serde(deserialize_with = "de_coord")]
    pub lng: f64,
}

/// One hotel from the catalog file. Field renames follow the catalog's short
/// JSON keys.
#[derive(Debug, Clone, Deserialize)]
pub struct Hotel {
    #[serde(rename = "id")]
    pub hotel_id: String,
    #[serde(rename = "f")]
    pub name: String,
    #[serde(rename = "ad")]
    pub address: String,
    #[serde(rename = "ci")]
    pub city: String,
    #[serde(rename = "pr")]
    pub state: String,
    #[serde(rename = "c")]
    pub country: String,
    #[serde(rename = "ll", default)]
    pub location: Option<Location>,
}

impl Hotel {
    pub fn city_and_state(&self) -> String {
        format!("{}, {}", self.city, self.state)
    }

    pub fn full_address(&self) -> String {
        format!("{}, {}, {}, {}", self.address, self.city, self.state, self.country)
    }
}

/// Wire shape of one review inside a review file.
#[derive(Debug, Deserialize)]
pub struct ReviewRecord {
    #[serde(rename = "hotelId", deserialize_with = "de_id")]
    pub hotel_id: String,
    #[serde(rename = "reviewId")]
    pub review_id: String,
    #[serde(rename = "ratingOverall", default)]
    pub rating: f64,
    #[serde(default)]
    pub title: String,
    #[serde(rename = "reviewText", default)]
    pub text: String,
    #[serde(rename = "userNickname", default)]
    pub nickname: String,
    #[serde(rename = "reviewSubmissionTime")]
    pub date_posted: String,
}

/// One immutable hotel review. Ordered by posting date descending, then
/// review id ascending, so two distinct reviews never compare equal.
#[derive(Debug, Clone, Deserialize)]
#[serde(try_from = "ReviewRecord")]
pub struct Review {
    hotel_id: String,
    review_id: String,
    rating: f64,
    title: String,
    text: String,
    nickname: String,
    date_posted: String,
    date: Date,
}

impl Review {
    /// Build a review, deriving the ordering date from the first ten
    /// characters of the ISO-8601 submission timestamp.
    pub fn new(
        hotel_id: impl Into<String>,
        review_id: impl Into<String>,
        rating: f64,
        title: impl Into<String>,
        text: impl Into<String>,
        nickname: impl Into<String>,
        date_posted: impl Into<String>,
    ) -> Result<Self> {
        let date_posted = date_posted.into();
        let day = date_posted
            .get(..10)
            .ok_or_else(|| anyhow!("submission time {date_posted:?} is shorter than a date"))?;
        let date = Date::parse(day, DATE_FORMAT)
            .map_err(|err| anyhow!("bad submission date {day:?}: {err}"))?;
        Ok(Self {
            hotel_id: hotel_id.into(),
            review_id: review_id.into(),
            rating,
            title: title.into(),
            text: text.into(),
            nickname: nickname.into(),
            date_posted,
            date,
        })
    }

    pub fn hotel_id(&self) -> &str {
        &self.hotel_id
    }

    pub fn review_id(&self) -> &str {
        &self.review_id
    }

    pub fn rating(&self) -> f64 {
        self.rating
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn date_posted(&self) -> &str {
        &self.date_posted
    }

    /// Date portion of the submission timestamp; the only part that
    /// participates in ordering.
    pub fn date(&self) -> Date {
        self.date
    }

    /// Nickname with the display fallback for users who left it blank.
    pub fn display_name(&self) -> &str {
        if self.nickname.is_empty() {
            "Anonymous"
        } else {
            &self.nickname
        }
    }
}

impl TryFrom<ReviewRecord> for Review {
    type Error = anyhow::Error;

    fn try_from(record: ReviewRecord) -> Result<Self> {
        Review::new(
            record.hotel_id,
            record.review_id,
            record.rating,
            record.title,
            record.text,
            record.nickname,
            record.date_posted,
        )
    }
}

impl Ord for Review {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .date
            .cmp(&self.date)
            .then_with(|| self.review_id.cmp(&other.review_id))
    }
}

impl PartialOrd for Review {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Review {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Review {}

/// One review's occurrence count for one word in the inverted index.
/// Ordered by frequency descending, then review date descending, then
/// review id ascending.
#[derive(Debug, Clone)]
pub struct Posting {
    pub review: Arc<Review>,
    pub frequency: u32,
}

impl Posting {
    pub fn new(review: Arc<Review>, frequency: u32) -> Self {
        Self { review, frequency }
    }
}

impl Ord for Posting {
    fn cmp(&self, other: &Self) -> Ordering {
        other
            .frequency
            .cmp(&self.frequency)
            .then_with(|| other.review.date().cmp(&self.review.date()))
            .then_with(|| self.review.review_id().cmp(other.review.review_id()))
    }
}

impl PartialOrd for Posting {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl PartialEq for Posting {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for Posting {}

fn de_coord<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Coord {
        Num(f64),
        Str(String),
    }
    match Coord::deserialize(deserializer)? {
        Coord::Num(n) => Ok(n),
        Coord::Str(s) => s.parse().map_err(serde::de::Error::custom),
    }
}

fn de_id<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Id {
        Num(i64),
        Str(String),
    }
    match Id::deserialize(deserializer)? {
        Id::Num(n) => Ok(n.to_string()),
        Id::Str(s) => Ok(s),
    }
}
