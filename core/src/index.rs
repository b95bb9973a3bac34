use crate::model::{Hotel, Posting, Review};
use crate::tokenizer::tokenize;
use crate::wordcount::count_frequencies;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

/// The three coupled maps at the heart of the engine: hotels by id, reviews
/// by hotel id, and the inverted word index. Not synchronized; wrap it in
/// [`crate::sync::SharedIndex`] before sharing across threads.
#[derive(Debug, Default)]
pub struct HotelIndex {
    hotels: BTreeMap<String, Hotel>,
    reviews: BTreeMap<String, BTreeSet<Arc<Review>>>,
    words: BTreeMap<String, BTreeSet<Posting>>,
}

impl HotelIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert hotels keyed by id. A duplicate id overwrites the previous
    /// entry; last write wins.
    pub fn add_hotels(&mut self, hotels: Vec<Hotel>) {
        for hotel in hotels {
            self.hotels.insert(hotel.hotel_id.clone(), hotel);
        }
    }

    /// Merge one parsed file's reviews into the owning hotel's ordered set.
    /// The batch is assumed to share the first review's hotel id. Hotel ids
    /// that are not in the catalog are accepted; catalog and reviews are
    /// independent inputs. An empty batch creates no entry.
    pub fn add_reviews(&mut self, batch: Vec<Review>) {
        let Some(first) = batch.first() else {
            return;
        };
        let set = self.reviews.entry(first.hotel_id().to_string()).or_default();
        for review in batch {
            set.insert(Arc::new(review));
        }
    }

    /// Rebuild the inverted word index from every loaded review: tokenize,
    /// count frequencies, insert one posting per (word, review). Existing
    /// postings are cleared first, so repeated builds never double-count.
    pub fn build_word_index(&mut self) {
        self.words.clear();
        for reviews in self.reviews.values() {
            for review in reviews {
                for (word, frequency) in count_frequencies(tokenize(review.text())) {
                    self.words
                        .entry(word)
                        .or_default()
                        .insert(Posting::new(Arc::clone(review), frequency));
                }
            }
        }
    }

    pub fn find_hotel(&self, hotel_id: &str) -> Option<&Hotel> {
        self.hotels.get(hotel_id)
    }

    /// Reviews for one hotel in ranked order, or `None` when no review file
    /// mentioned the id. Distinct from an empty set: a hotel present in the
    /// catalog but without loaded reviews has no entry here at all.
    pub fn find_reviews(&self, hotel_id: &str) -> Option<&BTreeSet<Arc<Review>>> {
        self.reviews.get(hotel_id)
    }

    pub fn find_word(&self, word: &str) -> Option<&BTreeSet<Posting>> {
        self.words.get(word)
    }

    /// All catalog hotels in id order.
    pub fn hotels(&self) -> impl Iterator<Item = &Hotel> {
        self.hotels.values()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Review;

    fn hotel(id: &str, name: &str) -> Hotel {
        Hotel {
            hotel_id: id.to_string(),
            name: name.to_string(),
            address: "1 Main St".to_string(),
            city: "San Francisco".to_string(),
            state: "CA".to_string(),
            country: "USA".to_string(),
            location: None,
        }
    }

    fn review(hotel_id: &str, id: &str, date: &str, text: &str) -> Review {
        Review::new(hotel_id, id, 4.0, "title", text, "nick", format!("{date}T12:00:00Z")).unwrap()
    }

    #[test]
    fn duplicate_hotel_id_keeps_the_last_entry() {
        let mut index = HotelIndex::new();
        index.add_hotels(vec![hotel("42", "Old Name")]);
        index.add_hotels(vec![hotel("42", "New Name")]);
        assert_eq!(index.find_hotel("42").unwrap().name, "New Name");
    }

    #[test]
    fn reviews_merge_in_date_order_across_batches() {
        let mut index = HotelIndex::new();
        index.add_reviews(vec![review("42", "r1", "2023-05-01", "ok")]);
        index.add_reviews(vec![
            review("42", "r2", "2023-06-01", "ok"),
            review("42", "r3", "2023-04-01", "ok"),
        ]);
        let ids: Vec<&str> = index
            .find_reviews("42")
            .unwrap()
            .iter()
            .map(|r| r.review_id())
            .collect();
        assert_eq!(ids, ["r2", "r1", "r3"]);
    }

    #[test]
    fn missing_hotel_and_missing_reviews_are_distinct_lookups() {
        let mut index = HotelIndex::new();
        index.add_hotels(vec![hotel("42", "Hilltop")]);
        assert!(index.find_hotel("42").is_some());
        // In the catalog but no review file loaded: absent from the review
        // map, not an empty set.
        assert!(index.find_reviews("42").is_none());
        assert!(index.find_hotel("99").is_none());
    }

    #[test]
    fn empty_batch_creates_no_review_entry() {
        let mut index = HotelIndex::new();
        index.add_reviews(Vec::new());
        assert!(index.find_reviews("42").is_none());
    }

    #[test]
    fn word_index_ranks_by_frequency_first() {
        let mut index = HotelIndex::new();
        index.add_reviews(vec![
            review("42", "r1", "2023-06-01", "clean"),
            review("42", "r2", "2023-05-01", "clean clean clean"),
        ]);
        index.build_word_index();
        let postings = index.find_word("clean").unwrap();
        let got: Vec<(u32, &str)> = postings
            .iter()
            .map(|p| (p.frequency, p.review.review_id()))
            .collect();
        assert_eq!(got, [(3, "r2"), (1, "r1")]);
    }

    #[test]
    fn rebuilding_the_word_index_does_not_double_count() {
        let mut index = HotelIndex::new();
        index.add_reviews(vec![review("42", "r1", "2023-05-01", "spotless room")]);
        index.build_word_index();
        index.build_word_index();
        assert_eq!(index.find_word("spotless").unwrap().len(), 1);
        assert_eq!(index.find_word("room").unwrap().len(), 1);
    }

    #[test]
    fn stopword_only_review_contributes_no_words() {
        let mut index = HotelIndex::new();
        index.add_reviews(vec![review("42", "r1", "2023-05-01", "the and a")]);
        index.build_word_index();
        assert!(index.find_word("the").is_none());
        assert!(index.find_word("and").is_none());
    }
}
