//! The discovery pipeline
//!
//! Control flow for one search: the aggregator checks the result cache, fans
//! out to all enabled source adapters concurrently, and each adapter drives
//! fetcher -> classifier -> extractor -> scorer for its candidates. The
//! aggregator merges, deduplicates, ranks, truncates, and caches.

mod aggregator;
mod cache;
mod classifier;
mod extractor;
mod fetcher;
mod rate_limit;
mod scorer;
mod source;
pub mod sources;

pub use aggregator::{Aggregator, AggregatorConfig, DiscoveryError, SearchOptions};
pub use cache::{query_signature, MemoryCacheStore};
pub use classifier::{classify, try_parse, ParsedText, Rejection};
pub use extractor::{extract, ExtractedMetadata};
pub use fetcher::ContentFetcher;
pub use rate_limit::RateLimiter;
pub use scorer::{score, ScoreContext};
pub use source::{build_result, CandidateContext, SourceAdapter};
