//! Client-side auto-pagination.
//!
//! Jira uses two conventions to signal the end of a paged result:
//!
//! - agile listings (`{values, isLast}`) set `isLast` on the final page,
//!   handled by [`collect_until_last`];
//! - issue searches (`{issues, total}`) report a grand total, handled by
//!   [`collect_until_total`].
//!
//! Both strategies take a page source: a closure mapping a [`PageRequest`]
//! to a future resolving to one page. Pages are requested strictly one after
//! another, items are kept in server order, and the first error aborts the
//! whole collection.

use std::future::Future;

use tracing::{debug, warn};

use super::error::Result;
use super::types::{SearchResults, ValuesPage};

/// Largest page Jira Data Center serves for the paginated endpoints.
pub const MAX_PAGE_SIZE: u32 = 50;

/// Clamp a requested page size to [`MAX_PAGE_SIZE`].
///
/// Oversized requests are silently downgraded, never rejected.
pub fn clamp_page_size(requested: u32) -> u32 {
    requested.min(MAX_PAGE_SIZE)
}

/// The offset and size of one page request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    /// Index of the first item to return.
    pub start_at: u32,
    /// Number of items to return.
    pub max_results: u32,
}

/// Collect a size-signaled (`isLast`) listing.
///
/// With an explicit `page_size` exactly one page is fetched at `start_at`
/// and returned as is. Without one, pages of [`MAX_PAGE_SIZE`] are fetched
/// from `start_at` on, advancing by the number of items each page actually
/// held, until a page reports `isLast`.
///
/// There is no iteration cap: a server that never reports `isLast` is
/// polled forever. An explicit page size of zero fetches nothing.
pub async fn collect_until_last<T, F, Fut>(
    start_at: u32,
    page_size: Option<u32>,
    mut fetch: F,
) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<ValuesPage<T>>>,
{
    if let Some(max_results) = page_size {
        if max_results == 0 {
            debug!("Page size of zero requested, nothing to fetch");
            return Ok(Vec::new());
        }
        let page = fetch(PageRequest {
            start_at,
            max_results,
        })
        .await?;
        return Ok(page.values);
    }

    let mut collected = Vec::new();
    let mut offset = start_at;
    let mut requests = 0u32;

    loop {
        let page = fetch(PageRequest {
            start_at: offset,
            max_results: MAX_PAGE_SIZE,
        })
        .await?;
        requests += 1;

        let received = page.values.len();
        debug!(
            start_at = offset,
            received,
            is_last = page.is_last,
            "Fetched page"
        );
        collected.extend(page.values);

        if page.is_last {
            break;
        }

        if received == 0 {
            warn!(
                start_at = offset,
                "Empty page without isLast; requesting the same offset again"
            );
        }

        offset = offset.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
    }

    debug!(requests, total = collected.len(), "Pagination complete");
    Ok(collected)
}

/// Limits for a total-signaled collection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TotalLimits {
    /// Requested page size; clamped to [`MAX_PAGE_SIZE`], defaults to it.
    pub page_size: Option<u32>,
    /// Maximum number of items to collect.
    pub max_total: usize,
}

impl TotalLimits {
    /// Limits collecting at most `max_total` items with the default page size.
    pub fn new(max_total: usize) -> Self {
        Self {
            page_size: None,
            max_total,
        }
    }

    /// Set the requested page size.
    pub fn with_page_size(mut self, page_size: Option<u32>) -> Self {
        self.page_size = page_size;
        self
    }

    /// The clamped per-request page size.
    pub fn effective_page_size(&self) -> u32 {
        clamp_page_size(self.page_size.unwrap_or(MAX_PAGE_SIZE))
    }
}

/// Collect a total-signaled (`total`) search from offset zero.
///
/// Each request asks for the smaller of the page size and the items still
/// allowed by `max_total`. Collection stops once the server-declared
/// `total` is reached, a page comes back empty (guarding against a stale
/// `total`), or `max_total` items were collected. The result never holds
/// more than `max_total` items.
pub async fn collect_until_total<T, F, Fut>(limits: TotalLimits, mut fetch: F) -> Result<Vec<T>>
where
    F: FnMut(PageRequest) -> Fut,
    Fut: Future<Output = Result<SearchResults<T>>>,
{
    let page_size = limits.effective_page_size();
    let mut collected: Vec<T> = Vec::new();
    let mut offset = 0u32;
    let mut requests = 0u32;

    while collected.len() < limits.max_total {
        let remaining = limits.max_total - collected.len();
        let max_results = page_size.min(u32::try_from(remaining).unwrap_or(u32::MAX));

        let page = fetch(PageRequest {
            start_at: offset,
            max_results,
        })
        .await?;
        requests += 1;

        let received = page.issues.len();
        debug!(
            start_at = offset,
            requested = max_results,
            received,
            total = page.total,
            "Fetched page"
        );

        if received > remaining {
            warn!(
                received,
                remaining, "Server returned more items than requested; truncating"
            );
        }
        collected.extend(page.issues.into_iter().take(remaining));

        if collected.len() as u64 >= page.total || received == 0 {
            break;
        }

        offset = offset.saturating_add(u32::try_from(received).unwrap_or(u32::MAX));
    }

    debug!(requests, total = collected.len(), "Pagination complete");
    Ok(collected)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::error::{ApiError, ErrorDetails};
    use reqwest::StatusCode;

    /// Build `n` consecutive item ids starting at `from`.
    fn items(from: u32, n: u32) -> Vec<u32> {
        (from..from + n).collect()
    }

    fn values_page(values: Vec<u32>, is_last: bool) -> ValuesPage<u32> {
        ValuesPage {
            max_results: MAX_PAGE_SIZE,
            start_at: 0,
            total: None,
            is_last,
            values,
        }
    }

    fn search_page(start_at: u32, issues: Vec<u32>, total: u64) -> SearchResults<u32> {
        SearchResults {
            start_at,
            max_results: MAX_PAGE_SIZE,
            total,
            issues,
            expand: None,
            warning_messages: vec![],
        }
    }

    /// A total-signaled server holding `total` items that never serves more
    /// than `server_cap` items per page.
    fn search_server(
        total: u32,
        server_cap: u32,
        log: &mut Vec<PageRequest>,
    ) -> impl FnMut(PageRequest) -> std::future::Ready<Result<SearchResults<u32>>> + '_ {
        move |req| {
            log.push(req);
            let n = req
                .max_results
                .min(server_cap)
                .min(total.saturating_sub(req.start_at));
            std::future::ready(Ok(search_page(
                req.start_at,
                items(req.start_at, n),
                u64::from(total),
            )))
        }
    }

    #[test]
    fn test_clamp_page_size() {
        assert_eq!(clamp_page_size(10), 10);
        assert_eq!(clamp_page_size(50), 50);
        assert_eq!(clamp_page_size(500), 50);
        assert_eq!(clamp_page_size(0), 0);
    }

    #[tokio::test]
    async fn test_until_last_concatenates_all_pages_in_order() {
        let pages = vec![
            values_page(items(0, 50), false),
            values_page(items(50, 50), false),
            values_page(items(100, 7), true),
        ];
        let mut pages = pages.into_iter();
        let mut log = Vec::new();

        let all = collect_until_last(0, None, |req| {
            log.push(req);
            std::future::ready(Ok(pages.next().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(all, items(0, 107));
        assert_eq!(
            log,
            vec![
                PageRequest {
                    start_at: 0,
                    max_results: 50
                },
                PageRequest {
                    start_at: 50,
                    max_results: 50
                },
                PageRequest {
                    start_at: 100,
                    max_results: 50
                },
            ]
        );
    }

    #[tokio::test]
    async fn test_until_last_offset_saturates_near_u32_max() {
        let start = u32::MAX - 5;
        let mut pages = vec![
            values_page(items(0, 10), false),
            values_page(items(10, 3), true),
        ]
        .into_iter();
        let mut log = Vec::new();

        let all = collect_until_last(start, None, |req| {
            log.push(req.start_at);
            std::future::ready(Ok(pages.next().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(all, items(0, 13));
        assert_eq!(log, vec![start, u32::MAX]);
    }

    #[tokio::test]
    async fn test_until_last_advances_by_items_received() {
        // Server serves short pages; the offset follows what was returned.
        let mut pages = vec![
            values_page(items(0, 20), false),
            values_page(items(20, 20), true),
        ]
        .into_iter();
        let mut log = Vec::new();

        let all = collect_until_last(5, None, |req| {
            log.push(req.start_at);
            std::future::ready(Ok(pages.next().unwrap()))
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 40);
        assert_eq!(log, vec![5, 25]);
    }

    #[tokio::test]
    async fn test_until_last_single_request_when_first_page_is_last() {
        let mut calls = 0;
        let all = collect_until_last(0, None, |_| {
            calls += 1;
            std::future::ready(Ok(values_page(items(0, 3), true)))
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 3);
        assert_eq!(calls, 1);
    }

    #[tokio::test]
    async fn test_until_last_explicit_page_size_fetches_once() {
        let mut log = Vec::new();
        let page = collect_until_last(10, Some(25), |req| {
            log.push(req);
            // isLast=false must not trigger another request.
            std::future::ready(Ok(values_page(items(10, 25), false)))
        })
        .await
        .unwrap();

        assert_eq!(page, items(10, 25));
        assert_eq!(
            log,
            vec![PageRequest {
                start_at: 10,
                max_results: 25
            }]
        );
    }

    #[tokio::test]
    async fn test_until_last_explicit_zero_fetches_nothing() {
        let mut calls = 0;
        let page = collect_until_last(0, Some(0), |_| {
            calls += 1;
            std::future::ready(Ok(values_page(items(0, 1), true)))
        })
        .await
        .unwrap();

        assert!(page.is_empty());
        assert_eq!(calls, 0);
    }

    #[tokio::test]
    async fn test_until_last_error_discards_partial_results() {
        let mut calls = 0;
        let result = collect_until_last(0, None, |_| {
            calls += 1;
            let page = if calls == 1 {
                Ok(values_page(items(0, 50), false))
            } else {
                Err(ApiError::from_status(
                    StatusCode::INTERNAL_SERVER_ERROR,
                    ErrorDetails::default(),
                ))
            };
            std::future::ready(page)
        })
        .await;

        assert!(result.unwrap_err().is_server_error());
        assert_eq!(calls, 2);
    }

    #[tokio::test]
    async fn test_until_total_fetches_ceil_total_over_page() {
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(1000), search_server(120, 50, &mut log))
            .await
            .unwrap();

        assert_eq!(all, items(0, 120));
        let sizes: Vec<u32> = log.iter().map(|r| r.max_results).collect();
        let offsets: Vec<u32> = log.iter().map(|r| r.start_at).collect();
        assert_eq!(sizes, vec![50, 50, 50]);
        assert_eq!(offsets, vec![0, 50, 100]);
    }

    #[tokio::test]
    async fn test_until_total_exact_multiple_issues_no_trailing_request() {
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(1000), search_server(100, 50, &mut log))
            .await
            .unwrap();

        assert_eq!(all.len(), 100);
        assert_eq!(log.len(), 2);
    }

    #[tokio::test]
    async fn test_until_total_respects_cap() {
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(70), search_server(120, 50, &mut log))
            .await
            .unwrap();

        assert_eq!(all, items(0, 70));
        let sizes: Vec<u32> = log.iter().map(|r| r.max_results).collect();
        assert_eq!(sizes, vec![50, 20]);
    }

    #[tokio::test]
    async fn test_until_total_clamps_page_size() {
        let mut log = Vec::new();
        let limits = TotalLimits::new(1000).with_page_size(Some(200));
        assert_eq!(limits.effective_page_size(), 50);

        collect_until_total(limits, search_server(60, 200, &mut log))
            .await
            .unwrap();

        assert!(log.iter().all(|r| r.max_results <= MAX_PAGE_SIZE));
        assert_eq!(log[0].max_results, 50);
    }

    #[tokio::test]
    async fn test_until_total_custom_page_size() {
        let mut log = Vec::new();
        let all = collect_until_total(
            TotalLimits::new(1000).with_page_size(Some(20)),
            search_server(45, 50, &mut log),
        )
        .await
        .unwrap();

        assert_eq!(all.len(), 45);
        let sizes: Vec<u32> = log.iter().map(|r| r.max_results).collect();
        assert_eq!(sizes, vec![20, 20, 20]);
    }

    #[tokio::test]
    async fn test_until_total_stops_on_empty_page_with_stale_total() {
        // Server claims 200 but only holds 30 items.
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(1000), |req: PageRequest| {
            log.push(req);
            let n = if req.start_at < 30 { 30 - req.start_at } else { 0 };
            std::future::ready(Ok(search_page(req.start_at, items(req.start_at, n.min(50)), 200)))
        })
        .await
        .unwrap();

        assert_eq!(all.len(), 30);
        assert_eq!(log.len(), 2);
        assert_eq!(log[1].start_at, 30);
    }

    #[tokio::test]
    async fn test_until_total_short_pages_still_terminate() {
        // Server serves at most 10 per page regardless of the request.
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(1000), search_server(35, 10, &mut log))
            .await
            .unwrap();

        assert_eq!(all, items(0, 35));
        assert_eq!(log.len(), 4);
    }

    #[tokio::test]
    async fn test_until_total_zero_cap_fetches_nothing() {
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(0), search_server(120, 50, &mut log))
            .await
            .unwrap();

        assert!(all.is_empty());
        assert!(log.is_empty());
    }

    #[tokio::test]
    async fn test_until_total_empty_result() {
        let mut log = Vec::new();
        let all = collect_until_total(TotalLimits::new(1000), search_server(0, 50, &mut log))
            .await
            .unwrap();

        assert!(all.is_empty());
        assert_eq!(log.len(), 1);
    }

    #[tokio::test]
    async fn test_until_total_truncates_oversized_page() {
        // Server ignores maxResults and returns 50 items for a request of 5.
        let all = collect_until_total(TotalLimits::new(5), |req: PageRequest| {
            std::future::ready(Ok(search_page(req.start_at, items(0, 50), 500)))
        })
        .await
        .unwrap();

        assert_eq!(all, items(0, 5));
    }
}
