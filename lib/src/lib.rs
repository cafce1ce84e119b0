//! Generate RDF quads from tabular database snapshots.
//!
//! A [`QuadGenerator`] walks the tables of a [`source::TableSource`] and
//! yields one lazy, finite quad sequence per invocation. Two modeling schemes
//! are available ([`config::QuadMode`]): `facade-x` renders each table as a
//! blank root node with ordinal container membership to blank row nodes, and
//! `csv` renders one quad per non-null cell with IRI-identified rows. The
//! same run can also be drained once into a pattern-queryable in-memory
//! store.

pub mod coerce;
pub mod config;
pub mod consts;
pub mod emit;
pub mod errors;
pub mod snapshot;
pub mod source;
pub mod stream;
pub mod util;

use crate::config::{Config, QuadMode};
use crate::emit::{CsvQuads, FacadeXQuads};
use crate::source::TableSource;
use crate::stream::QuadStream;
use anyhow::{anyhow, Result};
use log::info;
use once_cell::sync::OnceCell;
use oxigraph::model::{GraphNameRef, NamedNode, NamedNodeRef, Quad, SubjectRef, TermRef};
use oxigraph::store::Store;

/// One generation run over a table source.
///
/// The generator owns no quads itself: [`QuadGenerator::quads`] restarts the
/// sequence from the beginning on every call, and the cached store built by
/// [`QuadGenerator::store`] is populated at most once per generator.
pub struct QuadGenerator<S> {
    source: S,
    mode: QuadMode,
    base: NamedNode,
    store: OnceCell<Store>,
}

impl<S: TableSource> QuadGenerator<S> {
    /// Initialize the quad generator. The configured base IRI is validated
    /// here; everything downstream relies on it being a well-formed IRI.
    pub fn new(source: S, config: &Config) -> Result<Self> {
        let base = NamedNode::new(config.base_iri.clone())
            .map_err(|e| anyhow!("invalid base IRI {:?}: {}", config.base_iri, e))?;
        Ok(QuadGenerator {
            source,
            mode: config.mode,
            base,
            store: OnceCell::new(),
        })
    }

    pub fn mode(&self) -> QuadMode {
        self.mode
    }

    pub fn base_iri(&self) -> &str {
        self.base.as_str()
    }

    /// Generate quads. Each call starts a fresh pass over the source.
    pub fn quads(&self) -> Box<dyn Iterator<Item = Quad> + '_> {
        match self.mode {
            QuadMode::FacadeX => Box::new(FacadeXQuads::new(&self.source, &self.base)),
            QuadMode::Csv => Box::new(CsvQuads::new(&self.source)),
        }
    }

    /// Pull-mode access: a one-shot, demand-driven stream over a fresh pass.
    pub fn stream(&self) -> QuadStream<'_> {
        QuadStream::new(self.quads())
    }

    /// Generate quads and keep them in an in-memory store. The store is
    /// built on first access and reused afterwards; it never sees a second
    /// drain of the source.
    pub fn store(&self) -> Result<&Store> {
        self.store.get_or_try_init(|| {
            info!("Materializing quads into an in-memory store");
            let store = Store::new()?;
            for quad in self.quads() {
                store.insert(&quad)?;
            }
            Ok(store)
        })
    }

    /// Match quads selectively against the cached store. Any position may be
    /// wildcarded with None.
    pub fn match_pattern(
        &self,
        subject: Option<SubjectRef<'_>>,
        predicate: Option<NamedNodeRef<'_>>,
        object: Option<TermRef<'_>>,
        graph: Option<GraphNameRef<'_>>,
    ) -> Result<Vec<Quad>> {
        let store = self.store()?;
        let mut quads = vec![];
        for quad in store.quads_for_pattern(subject, predicate, object, graph) {
            quads.push(quad?);
        }
        Ok(quads)
    }
}

/// Iterate directly over all quads of a fresh pass.
impl<'a, S: TableSource> IntoIterator for &'a QuadGenerator<S> {
    type Item = Quad;
    type IntoIter = Box<dyn Iterator<Item = Quad> + 'a>;

    fn into_iter(self) -> Self::IntoIter {
        self.quads()
    }
}
