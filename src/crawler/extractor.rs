//! Article field extraction
//!
//! Turns the markup of a single article page into an [`Article`]. Title,
//! publication date and body are mandatory and fail with their own
//! [`ExtractionError`] variant; author and tags are optional.
//!
//! The site serves articles from two template revisions that differ only
//! in the class signature of the body container. Body lookup therefore
//! walks [`BODY_RULES`] in order and takes the first rule that matches.

use crate::model::{Article, Topic};
use crate::ExtractionError;
use chrono::NaiveDateTime;
use scraper::{ElementRef, Html, Selector};

/// Format of the byline timestamp once commas are removed
pub const DATE_FORMAT: &str = "%Y-%m-%d %H:%M";

const TITLE_TAG: &str = "h1";
const TITLE_SIGNATURE: &str = "tm-title tm-title_h1";
const BYLINE_SELECTOR: &str = "span.tm-article-datetime-published";
const BYLINE_TIME_SELECTOR: &str = "time";
const AUTHOR_SELECTOR: &str = "a.tm-user-info__username";
const HUBS_SELECTOR: &str = "div.tm-publication-hubs";
const HUB_LINK_SELECTOR: &str = "span.tm-publication-hub__link-container";

/// A way of locating the article body in one template revision
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BodyRule {
    /// Short name used in logs
    pub name: &'static str,
    /// Element name of the container
    pub tag: &'static str,
    /// Exact class attribute of the container
    pub class_signature: &'static str,
}

impl BodyRule {
    /// Returns the normalized body text if this rule matches the page
    fn apply(&self, document: &Html) -> Result<Option<String>, ExtractionError> {
        let element = find_by_class_signature(document, self.tag, self.class_signature)?;
        Ok(element.map(|el| collapse_whitespace(&el.text().collect::<String>())))
    }
}

/// Body rules in priority order
pub const BODY_RULES: &[BodyRule] = &[
    BodyRule {
        name: "version-1",
        tag: "div",
        class_signature:
            "article-formatted-body article-formatted-body article-formatted-body_version-1",
    },
    BodyRule {
        name: "version-2",
        tag: "div",
        class_signature:
            "article-formatted-body article-formatted-body article-formatted-body_version-2",
    },
];

/// Extracts an article from its page markup
///
/// # Arguments
///
/// * `html` - The article page markup
/// * `source_url` - URL the page was fetched from, stored as the article link
/// * `topic` - Topic under which the article was discovered
///
/// # Returns
///
/// * `Ok(Article)` - All mandatory fields were found
/// * `Err(ExtractionError)` - The first mandatory field that was missing or malformed
///
/// # Example
///
/// ```
/// use habr_harvest::crawler::extract_article;
/// use habr_harvest::Topic;
///
/// let html = r#"
///     <h1 class="tm-title tm-title_h1">Test</h1>
///     <span class="tm-article-datetime-published"><time title="2021-01-02, 10:30"></time></span>
///     <div class="article-formatted-body article-formatted-body article-formatted-body_version-1">Body</div>
/// "#;
/// let article = extract_article(html, "https://habr.com/ru/news/1/", Topic::Develop).unwrap();
/// assert_eq!(article.title(), "Test");
/// ```
pub fn extract_article(
    html: &str,
    source_url: &str,
    topic: Topic,
) -> Result<Article, ExtractionError> {
    let document = Html::parse_document(html);

    let title = extract_title(&document)?;
    let publication_date = extract_publication_date(&document)?;
    let body = extract_body(&document)?;
    let author = extract_author(&document)?;
    let tags = extract_tags(&document)?;

    Ok(Article::new(
        title,
        publication_date,
        body,
        source_url,
        author,
        tags,
        topic,
    ))
}

fn extract_title(document: &Html) -> Result<String, ExtractionError> {
    let heading = find_by_class_signature(document, TITLE_TAG, TITLE_SIGNATURE)?
        .ok_or(ExtractionError::MissingTitle)?;
    Ok(normalize_title(&heading.text().collect::<String>()))
}

/// Reads the `title` of the `time` inside the first byline span
///
/// Later bylines are never consulted, even when the first one has no `time`.
fn extract_publication_date(document: &Html) -> Result<NaiveDateTime, ExtractionError> {
    let byline_selector = parse_selector(BYLINE_SELECTOR)?;
    let time_selector = parse_selector(BYLINE_TIME_SELECTOR)?;

    let byline = document
        .select(&byline_selector)
        .next()
        .ok_or(ExtractionError::MissingDate)?;
    let raw = byline
        .select(&time_selector)
        .next()
        .and_then(|time| time.value().attr("title"))
        .ok_or(ExtractionError::MissingDate)?;

    parse_publication_date(raw)
}

/// Parses a byline timestamp such as `2021-01-02, 10:30`
pub fn parse_publication_date(raw: &str) -> Result<NaiveDateTime, ExtractionError> {
    let cleaned = raw.replace(',', "");
    NaiveDateTime::parse_from_str(cleaned.trim(), DATE_FORMAT).map_err(|source| {
        ExtractionError::InvalidDate {
            value: raw.to_string(),
            source,
        }
    })
}

fn extract_body(document: &Html) -> Result<String, ExtractionError> {
    for rule in BODY_RULES {
        if let Some(body) = rule.apply(document)? {
            tracing::trace!("Body matched rule {}", rule.name);
            return Ok(body);
        }
    }
    Err(ExtractionError::MissingBody)
}

fn extract_author(document: &Html) -> Result<Option<String>, ExtractionError> {
    let selector = parse_selector(AUTHOR_SELECTOR)?;
    Ok(document
        .select(&selector)
        .next()
        .map(|el| el.text().collect::<String>().trim().to_string()))
}

fn extract_tags(document: &Html) -> Result<Vec<String>, ExtractionError> {
    let hubs_selector = parse_selector(HUBS_SELECTOR)?;
    let link_selector = parse_selector(HUB_LINK_SELECTOR)?;

    let Some(hubs) = document.select(&hubs_selector).next() else {
        return Ok(Vec::new());
    };

    Ok(hubs
        .select(&link_selector)
        .map(|span| clean_tag(&span.text().collect::<String>()))
        .collect())
}

/// Finds the first `tag` element whose class list is exactly `signature`
///
/// A CSS class selector alone would also accept elements carrying extra
/// classes, so candidates are compared token by token afterwards.
fn find_by_class_signature<'a>(
    document: &'a Html,
    tag: &str,
    signature: &str,
) -> Result<Option<ElementRef<'a>>, ExtractionError> {
    let tokens: Vec<&str> = signature.split_whitespace().collect();
    let selector = parse_selector(&format!("{}.{}", tag, tokens.join(".")))?;

    Ok(document.select(&selector).find(|el| {
        el.value()
            .attr("class")
            .map(|class| class.split_whitespace().eq(tokens.iter().copied()))
            .unwrap_or(false)
    }))
}

fn parse_selector(css: &str) -> Result<Selector, ExtractionError> {
    Selector::parse(css).map_err(|e| ExtractionError::Selector(format!("{}: {:?}", css, e)))
}

/// Trims a heading and replaces non-breaking spaces with plain ones
pub fn normalize_title(raw: &str) -> String {
    raw.trim().replace('\u{a0}', " ")
}

/// Collapses every whitespace run (NBSP included) into a single space
pub fn collapse_whitespace(raw: &str) -> String {
    raw.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Strips surrounding whitespace and the `*` markers of profile hubs
fn clean_tag(raw: &str) -> String {
    raw.trim_matches(|c: char| c.is_whitespace() || c == '*')
        .to_string()
}
