use crate::parse::{CatalogParser, JsonCatalogParser, JsonReviewParser, ReviewParser};
use crate::sync::SharedIndex;
use anyhow::{bail, Context, Result};
use rayon::ThreadPool;
use std::path::Path;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;
use tracing::{debug, info, warn};
use walkdir::WalkDir;

/// Files with any other extension under the review root are ignored.
pub const REVIEW_FILE_EXT: &str = "json";

/// Cancels a running [`Loader::load`] as a unit: the directory walk stops
/// dispatching, in-flight workers finish, and `load` returns an error. The
/// index contents after a cancelled load are unspecified.
#[derive(Clone)]
pub struct CancelHandle(Arc<AtomicBool>);

impl CancelHandle {
    pub fn cancel(&self) {
        self.0.store(true, Ordering::Relaxed);
    }
}

/// Parallel ingestion pipeline: walks the review tree on the calling thread,
/// fans one parse-and-merge task per review file out to a fixed-size worker
/// pool, waits for all of them, then builds the word index once.
pub struct Loader<C = JsonCatalogParser, R = JsonReviewParser> {
    catalog: C,
    review: R,
    pool: ThreadPool,
    cancelled: Arc<AtomicBool>,
}

impl Loader {
    /// Loader for the stock JSON file formats with `threads` workers
    /// (minimum one).
    pub fn new(threads: usize) -> Result<Self> {
        Self::with_parsers(threads, JsonCatalogParser, JsonReviewParser)
    }
}

impl<C: CatalogParser, R: ReviewParser> Loader<C, R> {
    pub fn with_parsers(threads: usize, catalog: C, review: R) -> Result<Self> {
        let pool = rayon::ThreadPoolBuilder::new()
            .num_threads(threads.max(1))
            .thread_name(|n| format!("review-worker-{n}"))
            .build()
            .context("could not create the review worker pool")?;
        Ok(Self {
            catalog,
            review,
            pool,
            cancelled: Arc::new(AtomicBool::new(false)),
        })
    }

    pub fn cancel_handle(&self) -> CancelHandle {
        CancelHandle(Arc::clone(&self.cancelled))
    }

    /// Load the catalog and the review tree into a fresh queryable index.
    ///
    /// A malformed catalog or review file is logged and skipped; an
    /// unreadable subdirectory is logged and its siblings continue. Only a
    /// missing review root or a cancelled load fail the whole call. The
    /// final index content does not depend on the worker count.
    pub fn load(&self, catalog: Option<&Path>, reviews: Option<&Path>) -> Result<SharedIndex> {
        let index = SharedIndex::new();

        if let Some(path) = catalog {
            match self.catalog.parse_catalog(path) {
                Ok(hotels) => {
                    info!(path = %path.display(), count = hotels.len(), "loaded hotel catalog");
                    index.add_hotels(hotels);
                }
                Err(err) => {
                    warn!(path = %path.display(), error = %err, "skipping hotel catalog");
                }
            }
        }

        if let Some(root) = reviews {
            if !root.is_dir() {
                bail!("review root {} is not a readable directory", root.display());
            }
            self.merge_review_tree(root, &index);
            if self.cancelled.load(Ordering::Relaxed) {
                bail!("load of {} was interrupted", root.display());
            }
        }

        index.build_word_index();
        Ok(index)
    }

    /// Fan-out/fan-in over one review tree. The `scope` call is the barrier:
    /// it returns only after every spawned task has finished, however many
    /// files the walk turns out to discover.
    fn merge_review_tree(&self, root: &Path, index: &SharedIndex) {
        let dispatched = AtomicUsize::new(0);
        let failed = AtomicUsize::new(0);
        let parser = &self.review;
        let failed_ref = &failed;

        self.pool.scope(|scope| {
            for entry in WalkDir::new(root) {
                if self.cancelled.load(Ordering::Relaxed) {
                    break;
                }
                let entry = match entry {
                    Ok(entry) => entry,
                    Err(err) => {
                        warn!(error = %err, "skipping unreadable directory entry");
                        continue;
                    }
                };
                if !entry.file_type().is_file() {
                    continue;
                }
                let path = entry.into_path();
                if path.extension().and_then(|ext| ext.to_str()) != Some(REVIEW_FILE_EXT) {
                    continue;
                }
                dispatched.fetch_add(1, Ordering::Relaxed);
                scope.spawn(move |_| match parser.parse_review_file(&path) {
                    Ok(batch) => {
                        debug!(path = %path.display(), count = batch.len(), "merged review file");
                        index.add_reviews(batch);
                    }
                    Err(err) => {
                        failed_ref.fetch_add(1, Ordering::Relaxed);
                        warn!(path = %path.display(), error = %err, "skipping review file");
                    }
                });
            }
        });

        info!(
            root = %root.display(),
            dispatched = dispatched.load(Ordering::Relaxed),
            failed = failed.load(Ordering::Relaxed),
            "review ingestion complete"
        );
    }
}
