//! Match service: the library surface consumed by the API layer.
//!
//! [`MatchService::get_top_matches`] and [`MatchService::batch_match`] read records from a
//! [`crate::store::RecordStore`], consult the [`crate::cache::ResultCache`], and rank through
//! the [`crate::batch::BatchMatcher`]. Every completed call returns a ranked list; the only
//! failures are an unreachable store and an unknown job id.

pub mod error;
pub mod matches;


pub use error::{MatchError, ServiceResult};
pub use matches::{MatchService, TopMatches};
