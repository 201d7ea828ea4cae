//! Result cache for ranked matches.
//!
//! Rankings are keyed by job id plus a fingerprint from
//! [`crate::hashing::candidate_set_fingerprint`], which covers the job record, every candidate
//! record's content, the weight-profile version and the algorithm version. Any change to those
//! produces a new key, so stale rankings are never served; the TTL only bounds memory held by
//! keys nobody asks for anymore.

pub mod ranking;
pub mod types;


pub use ranking::ResultCache;
pub use types::{CacheKey, CacheStatus, CachedRanking};
