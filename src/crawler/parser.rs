//! Listing page parser
//!
//! A flow listing page shows article snippets, each ending with a
//! "read more" anchor pointing at the full article. This module turns a
//! listing page into the absolute URLs of those articles.

use scraper::{Html, Selector};

/// CSS selector for the "read more" anchor of an article snippet
const READ_MORE_SELECTOR: &str = "a.tm-article-snippet__readmore";

/// Extracts article URLs from a listing page
///
/// Every "read more" anchor that carries an `href` contributes one URL,
/// formed by appending the (site-relative) href to `base_url`. Anchors
/// without `href` are skipped. Duplicates are kept in page order.
///
/// # Arguments
///
/// * `html` - The listing page markup
/// * `base_url` - Scheme and host of the site, e.g. `https://habr.com`
///
/// # Returns
///
/// The discovered URLs; an empty vector when the page lists no articles
///
/// # Example
///
/// ```
/// use habr_harvest::crawler::discover_links;
///
/// let html = r#"<a class="tm-article-snippet__readmore" href="/ru/news/1/">Read</a>"#;
/// let links = discover_links(html, "https://habr.com");
/// assert_eq!(links, vec!["https://habr.com/ru/news/1/".to_string()]);
/// ```
pub fn discover_links(html: &str, base_url: &str) -> Vec<String> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    if let Ok(selector) = Selector::parse(READ_MORE_SELECTOR) {
        for element in document.select(&selector) {
            if let Some(href) = element.value().attr("href") {
                links.push(join_link(base_url, href));
            }
        }
    }

    links
}

/// Prepends the site base to a relative href
///
/// A trailing slash on the base is dropped when the href is rooted, so
/// that `https://habr.com/` and `/ru/news/1/` do not produce `//ru`.
fn join_link(base_url: &str, href: &str) -> String {
    let href = href.trim();
    if href.starts_with('/') {
        format!("{}{}", base_url.trim_end_matches('/'), href)
    } else {
        format!("{}{}", base_url, href)
    }
}
