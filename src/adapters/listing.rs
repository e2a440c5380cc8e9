//! Static file-listing scraper
//!
//! Utility for enumerating the files published on a static HTTP index page
//! (the attachment dumps that accompany some catalogs). This is deliberately
//! not a general-purpose scraper: it fetches one page and extracts the
//! `href` targets, resolving relative links against the page URL.
//!
//! Unrelated to the export control loop.

use crate::domain::{CuratorError, Result};
use regex::Regex;
use std::sync::LazyLock;
use url::Url;

static HREF_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r#"href\s*=\s*["']([^"']+)["']"#).expect("href regex is valid") // Static pattern, safe to panic
});

/// Fetch a static index page and return the file URLs it lists.
///
/// # Errors
///
/// Returns an error if the page cannot be fetched or its URL is invalid.
pub async fn fetch_file_listing(page_url: &str) -> Result<Vec<String>> {
    let base = Url::parse(page_url)
        .map_err(|e| CuratorError::Validation(format!("Invalid listing URL: {e}")))?;

    let response = reqwest::get(page_url)
        .await
        .map_err(|e| CuratorError::Io(format!("Failed to fetch listing page: {e}")))?;

    if !response.status().is_success() {
        return Err(CuratorError::Io(format!(
            "Listing page returned status {}",
            response.status()
        )));
    }

    let body = response
        .text()
        .await
        .map_err(|e| CuratorError::Io(format!("Failed to read listing page: {e}")))?;

    Ok(extract_listing_links(&body, &base))
}

/// Extract file links from the HTML of a static index page.
///
/// Skips parent-directory links, in-page fragments, and query-only links
/// (the sort toggles typical of autoindex pages). Relative targets are
/// resolved against the page URL.
pub fn extract_listing_links(html: &str, base: &Url) -> Vec<String> {
    let mut links = Vec::new();

    for cap in HREF_RE.captures_iter(html) {
        let target = &cap[1];

        if target.starts_with('#') || target.starts_with('?') || target == "../" {
            continue;
        }

        if let Ok(resolved) = base.join(target) {
            // Directory rows on autoindex pages end with '/'
            if resolved.path().ends_with('/') {
                continue;
            }
            links.push(resolved.to_string());
        }
    }

    links
}

#[cfg(test)]
mod tests {
    use super::*;

    const INDEX_PAGE: &str = r##"
<html><body>
<h1>Index of /attachments</h1>
<a href="?C=N;O=D">Name</a>
<a href="../">Parent Directory</a>
<a href="scan-001.jpg">scan-001.jpg</a>
<a href="scan-002.jpg">scan-002.jpg</a>
<a href="deeds/">deeds/</a>
<a href="https://files.example.org/ledger.pdf">ledger.pdf</a>
<a href="#top">top</a>
</body></html>
"##;

    #[test]
    fn test_extracts_file_links_only() {
        let base = Url::parse("https://catalog.example.org/attachments/").unwrap();
        let links = extract_listing_links(INDEX_PAGE, &base);

        assert_eq!(
            links,
            vec![
                "https://catalog.example.org/attachments/scan-001.jpg",
                "https://catalog.example.org/attachments/scan-002.jpg",
                "https://files.example.org/ledger.pdf",
            ]
        );
    }

    #[test]
    fn test_empty_page_yields_no_links() {
        let base = Url::parse("https://catalog.example.org/attachments/").unwrap();
        assert!(extract_listing_links("<html></html>", &base).is_empty());
    }

    #[test]
    fn test_single_quoted_hrefs() {
        let base = Url::parse("https://catalog.example.org/files/").unwrap();
        let links = extract_listing_links("<a href='a.csv'>a</a>", &base);
        assert_eq!(links, vec!["https://catalog.example.org/files/a.csv"]);
    }

    #[tokio::test]
    async fn test_fetch_file_listing() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/attachments/")
            .with_status(200)
            .with_body(r#"<a href="scan-001.jpg">scan</a>"#)
            .create_async()
            .await;

        let url = format!("{}/attachments/", server.url());
        let links = fetch_file_listing(&url).await.unwrap();
        assert_eq!(links.len(), 1);
        assert!(links[0].ends_with("/attachments/scan-001.jpg"));
    }

    #[tokio::test]
    async fn test_fetch_file_listing_error_status() {
        let mut server = mockito::Server::new_async().await;
        server
            .mock("GET", "/attachments/")
            .with_status(404)
            .create_async()
            .await;

        let url = format!("{}/attachments/", server.url());
        assert!(fetch_file_listing(&url).await.is_err());
    }
}
