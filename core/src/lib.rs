pub mod index;
pub mod loader;
pub mod model;
pub mod parse;
pub mod sync;
pub mod tokenizer;
pub mod wordcount;

pub use index::HotelIndex;
pub use loader::{CancelHandle, Loader, REVIEW_FILE_EXT};
pub use model::{Hotel, Location, Posting, Review};
pub use parse::{CatalogParser, JsonCatalogParser, JsonReviewParser, ReviewParser};
pub use sync::SharedIndex;
