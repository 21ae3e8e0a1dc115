//! # Extraction Module
//!
//! Turns a playlist into a table of audio features with the record label of
//! each track's album appended.
//!
//! ## Pipeline
//!
//! ```text
//! PageWalker          first page → next page → ... (until no cursor)
//!     ↓ per page
//! Batch Resolver      ids in N chunks: tracks → album ids → albums → labels
//!                     whole page: audio features (one call)
//!     ↓ concatenated over all pages
//! Row Assembler       feature mask → co-filter features and labels → table
//! ```
//!
//! Every remote call is awaited before the next one is issued. Missing
//! tracks, albums, labels or features flow through as `None`; only rows
//! with a feature record reach the table. Remote failures abort the run.

use std::fmt;

use indicatif::ProgressBar;

use crate::{Res, config, spotify::SpotifyApi};

mod assemble;
mod batch;
mod pages;
mod table;

pub use assemble::{apply_mask, assemble_table, feature_mask};
pub use batch::{PageResolution, chunk_bounds, resolve_labels, resolve_page};
pub use pages::PageWalker;
pub use table::{FeatureRow, FeatureTable, LABEL_COLUMN, TEXT_COLUMNS, cell_text, parse_cell};

#[derive(Debug)]
pub enum ExtractError {
    /// A batch call answered with a different number of entries than ids.
    LengthMismatch {
        call: &'static str,
        requested: usize,
        returned: usize,
    },
    /// Feature and label sequences lost their index alignment.
    Misaligned { features: usize, labels: usize },
}

impl fmt::Display for ExtractError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ExtractError::LengthMismatch {
                call,
                requested,
                returned,
            } => write!(
                f,
                "{} lookup returned {} entries for {} ids",
                call, returned, requested
            ),
            ExtractError::Misaligned { features, labels } => write!(
                f,
                "{} feature records but {} labels",
                features, labels
            ),
        }
    }
}

impl std::error::Error for ExtractError {}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExtractOptions {
    /// Number of slices each page's ids are split into for label lookups.
    pub chunks: usize,
}

impl Default for ExtractOptions {
    fn default() -> Self {
        Self {
            chunks: config::DEFAULT_CHUNK_COUNT,
        }
    }
}

impl ExtractOptions {
    pub fn from_env() -> Self {
        Self {
            chunks: config::chunk_count(),
        }
    }

    pub fn with_chunks(mut self, chunks: usize) -> Self {
        self.chunks = chunks.max(1);
        self
    }
}

pub struct Extractor<'a, C: SpotifyApi + ?Sized> {
    client: &'a C,
    options: ExtractOptions,
    progress: Option<ProgressBar>,
}

impl<'a, C: SpotifyApi + ?Sized> Extractor<'a, C> {
    pub fn new(client: &'a C) -> Self {
        Self {
            client,
            options: ExtractOptions::default(),
            progress: None,
        }
    }

    pub fn with_options(mut self, options: ExtractOptions) -> Self {
        self.options = options;
        self
    }

    /// Reports pages and tracks resolved so far on `pb`.
    pub fn with_progress(mut self, pb: ProgressBar) -> Self {
        self.progress = Some(pb);
        self
    }

    /// Extracts the feature table of one playlist.
    ///
    /// One code path serves playlists of any length: each page the walker
    /// yields is resolved the same way, its labels and features appended to
    /// the run's sequences, and the table is assembled once the walk ends.
    pub async fn run(&self, playlist_ref: &str) -> Res<FeatureTable> {
        let mut walker = PageWalker::new(self.client, playlist_ref);
        let mut features = Vec::new();
        let mut labels = Vec::new();

        while let Some(page) = walker.next().await? {
            let resolved = resolve_page(self.client, &page, self.options.chunks).await?;
            features.extend(resolved.features);
            labels.extend(resolved.labels);

            if let Some(pb) = &self.progress {
                pb.set_message(format!(
                    "Resolved {} page(s), {} tracks...",
                    walker.pages(),
                    features.len()
                ));
            }
        }

        Ok(assemble_table(features, labels)?)
    }
}

/// Extracts the feature table of `playlist_ref` with default options.
pub async fn extract_playlist_features<C: SpotifyApi + ?Sized>(
    client: &C,
    playlist_ref: &str,
) -> Res<FeatureTable> {
    Extractor::new(client).run(playlist_ref).await
}
