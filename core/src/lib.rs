//! Boolean full-text retrieval: an inverted index from normalized terms to
//! document ids, queried with `&&`, `||`, `!` and parentheses.
//!
//! ```
//! use bitquery_core::{PostingStore, QueryEngine};
//!
//! let mut store = PostingStore::default();
//! store.ingest_text("doc1", "some data").unwrap();
//! store.ingest_text("doc2", "data here").unwrap();
//!
//! let engine = QueryEngine::new(&store);
//! assert_eq!(engine.evaluate("data && !some").unwrap(), Some(vec!["doc2".to_string()]));
//! ```

pub mod bitmap;
pub mod config;
pub mod content;
pub mod error;
pub mod index;
pub mod normalize;
pub mod query;
pub mod tokenizer;

pub use bitmap::Bitmap;
pub use config::{Config, Language};
pub use content::{ContentSource, FsSource, MemorySource};
pub use error::{ConfigError, IngestError, Malformed, QueryError, Unavailable};
pub use index::{DocId, PostingStore};
pub use normalize::{Normalizer, Pipeline};
pub use query::{Expr, QueryEngine};
