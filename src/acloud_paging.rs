//! Paginated listing retrieval.
//!
//! Unique responsibility: walk a multi-page listing endpoint to completion and
//! turn the combined content into typed values.
//!
//! Wire format of a listing page:
//! - GET `{base}{path}?page={n}[&filters]`
//! - Body: `{"content": [...], "last": bool, "totalElements": n, "totalPages": n, "number": n, "size": n, ...}`
//!
//! Pagination state (current page index, accumulated content) only lives
//! inside [`collect_pages`] for the duration of one call.

use std::future::Future;

use serde::{Deserialize, Serialize, de::DeserializeOwned};
use tracing::debug;

use crate::{acloud_client::AcloudClient, acloud_error::AcloudError, acloud_types::null_as_default};

/// Upper bound on page requests for a single listing.
pub const MAX_PAGING_LOOPS: u32 = 100;

/// Sort descriptor reported by the server.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PageSort {
    /// Whether the listing is sorted.
    #[serde(deserialize_with = "null_as_default")]
    pub sorted: bool,
    /// Whether the listing is unsorted.
    #[serde(deserialize_with = "null_as_default")]
    pub unsorted: bool,
    /// Whether no sort was requested.
    #[serde(deserialize_with = "null_as_default")]
    pub empty: bool,
}

/// One server response to a listing request.
///
/// After [`collect_pages`], `content` holds every page's items in page order
/// and the remaining fields are those of the final page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct Page {
    /// Untyped items of this page.
    #[serde(deserialize_with = "null_as_default")]
    pub content: Vec<serde_json::Value>,
    /// Raw pageable descriptor.
    pub pageable: serde_json::Value,
    /// Whether this is the last page.
    #[serde(deserialize_with = "null_as_default")]
    pub last: bool,
    /// Total number of pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_pages: u64,
    /// Total number of elements across all pages.
    #[serde(deserialize_with = "null_as_default")]
    pub total_elements: u64,
    /// Number of elements on this page.
    #[serde(deserialize_with = "null_as_default")]
    pub number_of_elements: u64,
    /// Zero-based page number.
    #[serde(deserialize_with = "null_as_default")]
    pub number: u64,
    /// Sort descriptor.
    #[serde(deserialize_with = "null_as_default")]
    pub sort: PageSort,
    /// Whether this is the first page.
    #[serde(deserialize_with = "null_as_default")]
    pub first: bool,
    /// Requested page size.
    #[serde(deserialize_with = "null_as_default")]
    pub size: u64,
    /// Whether this page is empty.
    #[serde(deserialize_with = "null_as_default")]
    pub empty: bool,
}

/// Fetches exactly one page of a listing endpoint.
pub trait PageFetcher {
    /// Fetch page `page` (zero-based) of the listing at `url`.
    ///
    /// No retries happen at this layer.
    fn fetch_page(
        &self,
        url: &str,
        page: u32,
    ) -> impl Future<Output = Result<Page, AcloudError>> + Send;
}

impl PageFetcher for AcloudClient {
    async fn fetch_page(&self, url: &str, page: u32) -> Result<Page, AcloudError> {
        let paged_url = with_page_param(url, page);
        debug!(url = %paged_url, page, "fetching page");
        let body = self.get_text(&paged_url).await?;
        Ok(serde_json::from_str(&body)?)
    }
}

/// Append the `page` query parameter, keeping any existing filters.
#[must_use]
pub fn with_page_param(url: &str, page: u32) -> String {
    let separator = if url.contains('?') { '&' } else { '?' };
    format!("{url}{separator}page={page}")
}

/// Fetch every page of the listing at `url`, starting at page 0.
///
/// Stops on the first page flagged `last`. If [`MAX_PAGING_LOOPS`] pages were
/// fetched without one, fails with [`AcloudError::PagingLoopExceeded`].
///
/// # Errors
///
/// Any page fetch error aborts the walk and is returned unchanged; no partial
/// result is returned.
pub async fn collect_pages<F>(fetcher: &F, url: &str) -> Result<Page, AcloudError>
where
    F: PageFetcher + Sync + ?Sized,
{
    let mut content: Vec<serde_json::Value> = Vec::new();

    for current_page in 0..MAX_PAGING_LOOPS {
        let mut page = fetcher.fetch_page(url, current_page).await?;
        content.append(&mut page.content);

        if page.last {
            debug!(url, pages = current_page + 1, items = content.len(), "listing complete");
            page.content = content;
            return Ok(page);
        }
    }

    Err(AcloudError::PagingLoopExceeded {
        url: url.to_string(),
        max: MAX_PAGING_LOOPS,
    })
}

/// Re-encode the generic content of a page into typed values.
///
/// # Errors
///
/// Returns [`AcloudError::Decode`] if the content does not match `T`.
pub fn marshal_page_content<T: DeserializeOwned>(page: &Page) -> Result<Vec<T>, AcloudError> {
    let bytes = serde_json::to_vec(&page.content)?;
    Ok(serde_json::from_slice(&bytes)?)
}

/// Collect every page of `url` and decode the combined content as `T`.
///
/// # Errors
///
/// Returns the first page fetch error, the paging sentinel, or a decode error.
pub async fn list_paged<T, F>(fetcher: &F, url: &str) -> Result<Vec<T>, AcloudError>
where
    T: DeserializeOwned,
    F: PageFetcher + Sync + ?Sized,
{
    let page = collect_pages(fetcher, url).await?;
    marshal_page_content(&page)
}

#[cfg(test)]
mod tests {
    use std::sync::Mutex;

    use serde_json::json;

    use super::*;

    /// Serves a fixed script of pages and records every request.
    struct ScriptedFetcher {
        pages: Vec<Result<Page, u16>>,
        requests: Mutex<Vec<(String, u32)>>,
    }

    impl ScriptedFetcher {
        fn new(pages: Vec<Result<Page, u16>>) -> Self {
            Self {
                pages,
                requests: Mutex::new(Vec::new()),
            }
        }

        fn requested_pages(&self) -> Vec<u32> {
            self.requests.lock().unwrap().iter().map(|(_, p)| *p).collect()
        }
    }

    impl PageFetcher for ScriptedFetcher {
        async fn fetch_page(&self, url: &str, page: u32) -> Result<Page, AcloudError> {
            self.requests.lock().unwrap().push((url.to_string(), page));
            let idx = usize::try_from(page).unwrap();
            match self.pages.get(idx).or_else(|| self.pages.last()) {
                Some(Ok(p)) => Ok(p.clone()),
                Some(Err(status)) => Err(AcloudError::Api {
                    status: *status,
                    message: "boom".to_string(),
                }),
                None => Ok(Page::default()),
            }
        }
    }

    fn page(items: Vec<serde_json::Value>, number: u64, last: bool) -> Page {
        Page {
            number_of_elements: items.len() as u64,
            content: items,
            number,
            last,
            first: number == 0,
            ..Page::default()
        }
    }

    #[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
    struct Item {
        slug: String,
        size: u32,
    }

    #[tokio::test]
    async fn single_last_page_is_one_request() {
        let items = vec![json!({"slug": "a", "size": 1}), json!({"slug": "b", "size": 2})];
        let fetcher = ScriptedFetcher::new(vec![Ok(page(items.clone(), 0, true))]);

        let result = collect_pages(&fetcher, "/api/v1/things").await.unwrap();

        assert_eq!(fetcher.requested_pages(), vec![0]);
        assert_eq!(result.content, items);
        assert!(result.last);
    }

    #[tokio::test]
    async fn multi_page_content_is_concatenated_in_page_order() {
        let mut last = page(vec![json!({"slug": "e", "size": 5})], 2, true);
        last.total_elements = 5;
        last.total_pages = 3;
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(vec![json!({"slug": "a", "size": 1}), json!({"slug": "b", "size": 2})], 0, false)),
            Ok(page(vec![json!({"slug": "c", "size": 3}), json!({"slug": "d", "size": 4})], 1, false)),
            Ok(last),
        ]);

        let result = collect_pages(&fetcher, "/api/v1/things").await.unwrap();

        assert_eq!(fetcher.requested_pages(), vec![0, 1, 2]);
        let slugs: Vec<&str> = result
            .content
            .iter()
            .filter_map(|v| v["slug"].as_str())
            .collect();
        assert_eq!(slugs, vec!["a", "b", "c", "d", "e"]);
        // Metadata comes from the final page.
        assert_eq!(result.number, 2);
        assert_eq!(result.total_elements, 5);
        assert_eq!(result.total_pages, 3);
    }

    #[tokio::test]
    async fn never_last_hits_the_paging_bound() {
        let fetcher = ScriptedFetcher::new(vec![Ok(page(vec![json!({"slug": "x", "size": 0})], 0, false))]);

        let err = collect_pages(&fetcher, "/api/v1/endless").await.unwrap_err();

        assert!(err.is_paging_loop_exceeded());
        let pages = fetcher.requested_pages();
        assert_eq!(pages.len(), MAX_PAGING_LOOPS as usize);
        assert_eq!(pages.last().copied(), Some(MAX_PAGING_LOOPS - 1));
    }

    #[tokio::test]
    async fn page_error_aborts_without_partial_result() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(vec![json!({"slug": "a", "size": 1})], 0, false)),
            Err(503),
            Ok(page(vec![json!({"slug": "c", "size": 3})], 2, true)),
        ]);

        let err = collect_pages(&fetcher, "/api/v1/things").await.unwrap_err();

        assert_eq!(err.status(), Some(503));
        assert_eq!(fetcher.requested_pages(), vec![0, 1]);
    }

    #[tokio::test]
    async fn list_paged_decodes_typed_items() {
        let fetcher = ScriptedFetcher::new(vec![
            Ok(page(vec![json!({"slug": "a", "size": 1})], 0, false)),
            Ok(page(vec![json!({"slug": "b", "size": 2, "extra": true})], 1, true)),
        ]);

        let items: Vec<Item> = list_paged(&fetcher, "/api/v1/things").await.unwrap();

        assert_eq!(
            items,
            vec![
                Item { slug: "a".to_string(), size: 1 },
                Item { slug: "b".to_string(), size: 2 },
            ]
        );
    }

    #[test]
    fn shape_mismatch_is_a_decode_error() {
        let p = page(vec![json!({"slug": 42, "size": "big"})], 0, true);
        let err = marshal_page_content::<Item>(&p).unwrap_err();
        assert!(matches!(err, AcloudError::Decode(_)));
    }

    #[test]
    fn marshalled_content_reencodes_to_equivalent_json() {
        let content = vec![json!({"slug": "a", "size": 1}), json!({"slug": "b", "size": 2})];
        let p = page(content.clone(), 0, true);

        let typed: Vec<Item> = marshal_page_content(&p).unwrap();
        let reencoded = serde_json::to_value(&typed).unwrap();

        assert_eq!(reencoded, serde_json::Value::Array(content));
    }

    #[test]
    fn missing_fields_default() {
        let p: Page = serde_json::from_str(r#"{"content":[{"slug":"a"}]}"#).unwrap();
        assert!(!p.last);
        assert_eq!(p.content.len(), 1);
        assert_eq!(p.total_elements, 0);
    }

    #[test]
    fn null_page_fields_decode_as_defaults() {
        let p: Page = serde_json::from_str(
            r#"{"content":null,"last":true,"sort":null,"totalElements":null,"pageable":null}"#,
        )
        .unwrap();
        assert!(p.last);
        assert!(p.content.is_empty());
        assert_eq!(p.sort, PageSort::default());
        assert_eq!(p.total_elements, 0);
    }

    #[test]
    fn sparse_records_marshal_into_resource_types() {
        let p = page(
            vec![json!({"slug": "c1", "customerSlug": null, "cni": null, "ipWhitelist": null})],
            0,
            true,
        );

        let clusters: Vec<crate::acloud_types::Cluster> = marshal_page_content(&p).unwrap();

        assert_eq!(clusters.len(), 1);
        assert_eq!(clusters[0].slug, "c1");
        assert_eq!(clusters[0].customer_slug, "");
    }

    #[test]
    fn page_param_preserves_filters() {
        assert_eq!(with_page_param("/api/v1/memberships", 0), "/api/v1/memberships?page=0");
        assert_eq!(
            with_page_param("/api/v1/orgs/a/clusters?show-compute=true", 3),
            "/api/v1/orgs/a/clusters?show-compute=true&page=3"
        );
    }
}
