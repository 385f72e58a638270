//! Supplier name resolution.
//!
//! A [`RegistryIndex`] is built once from the registry. Each ledger name is
//! then resolved in two stages: an exact lookup on the uppercase,
//! whitespace-free key, and on a miss, a token-based fuzzy search over the
//! cleaned registry names, accepted only at or above the configured threshold.

#![deny(unsafe_code)]

pub mod batch;
pub mod engine;
pub mod index;
pub mod normalize;
pub mod score;

pub use batch::{BatchOutcome, BatchSummary, resolve_all, resolve_batch};
pub use engine::{Candidate, MatchEngine, MatchStage, Resolution, resolve};
pub use index::{Bucket, CorpusEntry, ID_SEPARATOR, RegistryIndex};
pub use normalize::{cleaned_name, strict_key};
pub use score::{ratio, score, token_set_ratio, token_sort_ratio};
pub use supplier_model::{LedgerRow, MatchConfig, RegistryEntry, Scorer, Threshold};
