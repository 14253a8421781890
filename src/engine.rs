//! Snapshot publication.
//!
//! [`Engine`] owns the index configuration and the snapshot currently served
//! to readers, and replaces it atomically when a rebuild commits.

pub mod config;

use std::path::Path;
use std::sync::Arc;

use log::info;
use parking_lot::{Mutex, RwLock};

use crate::data::Document;
use crate::error::Result;
use crate::lexical::snapshot::IndexSnapshot;
use crate::lexical::writer::IndexWriter;
use crate::search::searcher::SearchHit;

use self::config::IndexConfig;

/// Publication point for index snapshots.
///
/// The engine holds the current [`IndexSnapshot`] behind an `Arc`. Readers
/// take a clone of the `Arc` and keep a consistent view for as long as they
/// hold it. A rebuild runs a fresh write session off-lock and swaps the
/// pointer only once the new snapshot is committed, so in-flight readers are
/// never disturbed.
///
/// Only one rebuild runs at a time.
pub struct Engine {
    config: IndexConfig,
    current: RwLock<Arc<IndexSnapshot>>,
    writer_lock: Mutex<()>,
}

impl std::fmt::Debug for Engine {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let current = self.current.read();
        f.debug_struct("Engine")
            .field("config", &self.config)
            .field("generation", &current.generation())
            .field("doc_count", &current.doc_count())
            .finish()
    }
}

impl Engine {
    /// Create an engine serving an empty snapshot.
    ///
    /// # Example
    ///
    /// ```
    /// use lexis::{AnalyzerPolicy, Document, Engine, IndexConfig};
    ///
    /// let config = IndexConfig::builder()
    ///     .field("titolo", AnalyzerPolicy::Literal)
    ///     .field("contenuto", AnalyzerPolicy::Standard)
    ///     .build();
    /// let engine = Engine::new(config).unwrap();
    /// assert_eq!(engine.snapshot().doc_count(), 0);
    ///
    /// engine
    ///     .rebuild(vec![Document::builder()
    ///         .add_field("titolo", "Caldo e Affari")
    ///         .add_field("contenuto", "La riunione di oggi.")
    ///         .build()])
    ///     .unwrap();
    ///
    /// let hits = engine.query_str("contenuto:riunione", 10, false).unwrap();
    /// assert_eq!(hits.len(), 1);
    /// ```
    pub fn new(config: IndexConfig) -> Result<Self> {
        let empty = IndexWriter::new(config.clone())?.commit()?;
        Ok(Engine {
            config,
            current: RwLock::new(Arc::new(empty)),
            writer_lock: Mutex::new(()),
        })
    }

    /// Serve a snapshot previously written with [`Engine::save`] or
    /// [`IndexSnapshot::save`]. Rebuilds reuse the stored configuration.
    pub fn open(dir: impl AsRef<Path>) -> Result<Self> {
        let snapshot = IndexSnapshot::open(dir)?;
        Ok(Engine {
            config: snapshot.config().clone(),
            current: RwLock::new(Arc::new(snapshot)),
            writer_lock: Mutex::new(()),
        })
    }

    pub fn config(&self) -> &IndexConfig {
        &self.config
    }

    /// The snapshot currently being served.
    pub fn snapshot(&self) -> Arc<IndexSnapshot> {
        Arc::clone(&self.current.read())
    }

    pub fn generation(&self) -> u64 {
        self.current.read().generation()
    }

    /// Open a write session with this engine's configuration.
    ///
    /// Sessions opened here are not serialized against [`Engine::rebuild`];
    /// publish their result with [`Engine::publish`].
    pub fn writer(&self) -> Result<IndexWriter> {
        IndexWriter::new(self.config.clone())
    }

    /// Make `snapshot` the current one, replacing the previous snapshot.
    ///
    /// The snapshot is stamped with the next generation number.
    pub fn publish(&self, snapshot: IndexSnapshot) -> Arc<IndexSnapshot> {
        let mut current = self.current.write();
        let generation = current.generation() + 1;
        let snapshot = Arc::new(snapshot.with_generation(generation));
        *current = Arc::clone(&snapshot);
        drop(current);

        info!(
            "published snapshot generation {generation} with {} documents",
            snapshot.doc_count()
        );
        snapshot
    }

    /// Index `docs` from scratch and publish the result.
    ///
    /// Documents of the previous snapshot that are not in `docs` are gone
    /// from the new one. On error nothing is published.
    pub fn rebuild<I>(&self, docs: I) -> Result<Arc<IndexSnapshot>>
    where
        I: IntoIterator<Item = Document>,
    {
        let _guard = self.writer_lock.lock();
        let mut writer = self.writer()?;
        writer.add_documents(docs)?;
        let snapshot = writer.commit()?;
        Ok(self.publish(snapshot))
    }

    /// Query the current snapshot with a `field:query text` string.
    pub fn query_str(&self, input: &str, top_k: usize, explain: bool) -> Result<Vec<SearchHit>> {
        self.snapshot().query_str(input, top_k, explain)
    }

    /// Save the current snapshot to `dir`.
    pub fn save(&self, dir: impl AsRef<Path>) -> Result<()> {
        self.snapshot().save(dir)
    }
}
