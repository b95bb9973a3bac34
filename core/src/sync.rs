use crate::index::HotelIndex;
use crate::model::{Hotel, Posting, Review};
use parking_lot::RwLock;
use std::sync::Arc;

/// Thread-safe handle over a [`HotelIndex`]: one reader/writer lock around
/// the plain store, composition instead of a lock-per-method subclass.
/// Mutations take the write lock; queries take the read lock and return
/// owned snapshots, so callers can keep iterating results while a later
/// write runs.
#[derive(Debug, Default)]
pub struct SharedIndex {
    inner: RwLock<HotelIndex>,
}

impl SharedIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_hotels(&self, hotels: Vec<Hotel>) {
        self.inner.write().add_hotels(hotels);
    }

    pub fn add_reviews(&self, batch: Vec<Review>) {
        self.inner.write().add_reviews(batch);
    }

    pub fn build_word_index(&self) {
        self.inner.write().build_word_index();
    }

    pub fn find_hotel(&self, hotel_id: &str) -> Option<Hotel> {
        self.inner.read().find_hotel(hotel_id).cloned()
    }

    /// Ranked snapshot of one hotel's reviews, or `None` when no review file
    /// mentioned the id (even if the hotel itself is in the catalog).
    pub fn find_reviews(&self, hotel_id: &str) -> Option<Vec<Arc<Review>>> {
        self.inner
            .read()
            .find_reviews(hotel_id)
            .map(|set| set.iter().cloned().collect())
    }

    /// Ranked snapshot of the postings for one word.
    pub fn find_word(&self, word: &str) -> Option<Vec<Posting>> {
        self.inner
            .read()
            .find_word(word)
            .map(|set| set.iter().cloned().collect())
    }

    /// Snapshot of all catalog hotels in id order.
    pub fn hotels(&self) -> Vec<Hotel> {
        self.inner.read().hotels().cloned().collect()
    }
}
