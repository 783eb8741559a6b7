//! Query engine: filter a collection, slice the result into a page
//!
//! Given a raw parameter set, [`select`] extracts the reserved paging
//! controls, turns every remaining parameter into a predicate (ANDed
//! together), filters the collection preserving insertion order, and
//! computes page metadata. It never fails: malformed paging values fall
//! back to defaults and unusable predicates match nothing.

pub mod filter;
pub mod page;
pub mod params;

pub use page::ResultPage;
pub use params::{QueryParams, LIMIT_PARAM, PAGE_PARAM};

use crate::model::Resource;
use crate::registry::config::RegistryConfig;

/// Run a query over a collection snapshot
pub fn select<T: Resource>(
    records: &[T],
    params: &QueryParams,
    config: &RegistryConfig,
) -> ResultPage<T> {
    let paging = params.paging(config);
    let predicates = filter::compile(params, config);

    let matches: Vec<T> = records
        .iter()
        .filter(|record| predicates.iter().all(|p| p.matches(*record)))
        .cloned()
        .collect();

    tracing::debug!(
        kind = %T::KIND,
        candidates = records.len(),
        matched = matches.len(),
        page = paging.page,
        limit = paging.limit,
        "query evaluated"
    );

    page::paginate(matches, paging.page, paging.limit)
}
