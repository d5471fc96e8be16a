//! The continuation-token pagination engine.
//!
//! Paged collections come back one server-rendered page at a time. Each page
//! may carry a continuation descriptor pointing at the next page and may
//! rotate the session's anti-forgery token. [`paginate`] turns that protocol
//! into a lazy stream of entries: the consumer pulls, the cursor fetches at
//! most one page at a time, and dropping the stream issues no further
//! fetches.

use futures::{stream::try_unfold, Future, Stream};
use serde_json::Value;

use crate::{path::PathError, util::FetchError};

/// Server-issued pointer to the next page of a collection. Its absence in a
/// response means the collection is exhausted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContinuationDescriptor {
    pub continuation: String,
    pub click_tracking_params: String,
}

impl ContinuationDescriptor {
    /// Read a descriptor out of a `continuations` list, taking the first
    /// `nextContinuationData` entry. `None` when the list is absent or
    /// carries no usable descriptor, which terminates pagination.
    pub fn from_continuations(container: &Value) -> Option<Self> {
        let next = crate::path::resolve(container, "continuations.0.nextContinuationData").ok()?;
        Some(Self {
            continuation: next.get("continuation")?.as_str()?.to_string(),
            click_tracking_params: next.get("clickTrackingParams")?.as_str()?.to_string(),
        })
    }
}

/// One page of a paginated collection, as produced by a page extractor.
#[derive(Debug, Default)]
pub struct Page {
    pub entries: Vec<Value>,
    pub continuation: Option<ContinuationDescriptor>,
    /// A rotated anti-forgery token, superseding all earlier ones for the
    /// rest of this cursor's fetches.
    pub xsrf_token: Option<String>,
}

#[derive(thiserror::Error, Debug)]
pub enum CursorError {
    #[error("continuation fetch failed")]
    Fetch(#[from] FetchError),
    #[error("continuation response did not match the expected shape")]
    Extract(#[from] PathError),
}

struct CursorState<F, X> {
    pending: std::vec::IntoIter<Value>,
    continuation: Option<ContinuationDescriptor>,
    xsrf_token: String,
    fetch: F,
    extract: X,
    only_first_page: bool,
}

/// Stream every entry of a paginated collection, starting from an already
/// fetched first page.
///
/// `fetch` is called with the next continuation descriptor and the latest
/// anti-forgery token; `extract` turns its raw response into the next
/// [`Page`]. The stream is forward-only and not restartable: consuming it
/// drives the underlying network fetches. With `only_first_page` set, the
/// first page's entries are yielded and no fetch is ever issued.
pub fn paginate<F, Fut, X>(
    first: Page,
    xsrf_token: String,
    fetch: F,
    extract: X,
    only_first_page: bool,
) -> impl Stream<Item = Result<Value, CursorError>>
where
    F: FnMut(ContinuationDescriptor, String) -> Fut,
    Fut: Future<Output = Result<Value, FetchError>>,
    X: FnMut(Value) -> Result<Page, PathError>,
{
    let state = CursorState {
        pending: first.entries.into_iter(),
        continuation: first.continuation,
        xsrf_token: first.xsrf_token.unwrap_or(xsrf_token),
        fetch,
        extract,
        only_first_page,
    };
    try_unfold(state, |mut state| async move {
        loop {
            if let Some(entry) = state.pending.next() {
                return Ok(Some((entry, state)));
            }
            if state.only_first_page {
                return Ok(None);
            }
            // No descriptor means the server says we are done. Never retry.
            let Some(descriptor) = state.continuation.take() else {
                return Ok(None);
            };
            let raw = (state.fetch)(descriptor, state.xsrf_token.clone()).await?;
            let page = (state.extract)(raw)?;
            state.pending = page.entries.into_iter();
            state.continuation = page.continuation;
            if let Some(token) = page.xsrf_token {
                state.xsrf_token = token;
            }
        }
    })
}
