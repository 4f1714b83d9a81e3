//! Description to symbol resolution.
//!
//! The [`Resolver`] trait is the single capability the lookup service needs
//! from the reference data. [`AnnotationResolver`] implements it over a
//! CLDR annotations document:
//!
//! ```json
//! { "annotations": { "annotations": {
//!     "👍": { "default": ["+1", "hand", "thumb", "up"], "tts": ["thumbs up"] }
//! } } }
//! ```

use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use indexmap::IndexMap;
use serde::Deserialize;

use crate::error::ResolveError;

/// Caller-supplied data the resolver needs for a request.
///
/// The service never inspects it; it is passed through to
/// [`Resolver::resolve`] unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LookupContext {
    table: Arc<Path>,
}

impl LookupContext {
    /// Creates a context pointing at the reference table at `table`.
    pub fn new(table: impl Into<PathBuf>) -> Self {
        Self {
            table: Arc::from(table.into()),
        }
    }

    /// Path of the reference table.
    pub fn table(&self) -> &Path {
        &self.table
    }
}

/// Resolves a canonical description to a symbol.
///
/// Implementations must be free of side effects other than reading the
/// reference data. They run on the lookup worker thread.
pub trait Resolver: Send + 'static {
    /// Looks up `description` in the table named by `context`.
    fn resolve(&self, description: &str, context: &LookupContext) -> Result<String, ResolveError>;
}

impl<F> Resolver for F
where
    F: Fn(&str, &LookupContext) -> Result<String, ResolveError> + Send + 'static,
{
    fn resolve(&self, description: &str, context: &LookupContext) -> Result<String, ResolveError> {
        self(description, context)
    }
}

#[derive(Debug, Deserialize)]
struct AnnotationDocument {
    annotations: AnnotationSection,
}

#[derive(Debug, Deserialize)]
struct AnnotationSection {
    annotations: IndexMap<String, Annotation>,
}

#[derive(Debug, Deserialize)]
struct Annotation {
    #[serde(default)]
    tts: Vec<String>,
}

/// Resolver backed by a CLDR annotations JSON file.
///
/// Holds no state. Every call reads the table named by the context, so a
/// table that disappears or gets corrupted mid-run is reported on the next
/// miss instead of being masked by a stale copy.
#[derive(Debug, Default, Clone, Copy)]
pub struct AnnotationResolver;

impl AnnotationResolver {
    /// Creates the resolver.
    pub fn new() -> Self {
        Self
    }

    fn load(path: &Path) -> Result<AnnotationDocument, ResolveError> {
        let bytes = fs::read(path).map_err(|e| {
            ResolveError::SourceUnavailable(format!("cannot read {}: {}", path.display(), e))
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            ResolveError::SourceUnavailable(format!("cannot parse {}: {}", path.display(), e))
        })
    }
}

impl Resolver for AnnotationResolver {
    fn resolve(&self, description: &str, context: &LookupContext) -> Result<String, ResolveError> {
        let document = Self::load(context.table())?;
        let wanted = description.trim().to_ascii_lowercase();

        document
            .annotations
            .annotations
            .into_iter()
            .find(|(_, annotation)| {
                annotation
                    .tts
                    .iter()
                    .any(|tts| tts.trim().to_ascii_lowercase() == wanted)
            })
            .map(|(symbol, _)| symbol)
            .ok_or(ResolveError::NotFound)
    }
}
