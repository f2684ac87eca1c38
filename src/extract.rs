use crate::error::CrawlError;
use crate::results::PageRecord;
use scraper::{ElementRef, Html, Selector};
use url::Url;

/// Which kind of reference is being resolved; only changes the error reported
#[derive(Debug, Clone, Copy)]
enum RefKind {
    Link,
    Image,
}

/// Resolves a raw href/src against the page's own URL.
///
/// A reference is accepted only if it is root-relative (starts with `/`,
/// joined against the page origin) or carries a full http(s) scheme. Anything
/// else (`mailto:`, `javascript:`, bare words) is malformed and aborts
/// extraction of the whole page.
fn resolve_reference(raw: &str, base: &Url, kind: RefKind) -> Result<Url, CrawlError> {
    let malformed = || match kind {
        RefKind::Link => CrawlError::InvalidLink(raw.to_string()),
        RefKind::Image => CrawlError::InvalidImage(raw.to_string()),
    };

    if raw.starts_with("http://") || raw.starts_with("https://") {
        Url::parse(raw).map_err(|_| malformed())
    } else if raw.starts_with('/') {
        base.join(raw).map_err(|_| malformed())
    } else {
        Err(malformed())
    }
}

/// Builds a complete page record from raw markup and its source URL.
///
/// Extraction either fully succeeds or fails: a single malformed reference
/// means no record is produced. Missing elements are not errors, they yield
/// empty fields. Malformed markup is tolerated by the parser.
pub fn extract_page(html: &str, page_url: &Url) -> Result<PageRecord, CrawlError> {
    let doc = Html::parse_document(html);

    let h1 = h1_from_doc(&doc);
    let first_paragraph = first_paragraph_from_doc(&doc);

    let link_selector = Selector::parse("a[href]").unwrap();
    let mut outgoing_links = Vec::new();
    for element in doc.select(&link_selector) {
        if let Some(href) = element.value().attr("href") {
            let resolved = resolve_reference(href, page_url, RefKind::Link)?;
            outgoing_links.push(resolved.to_string());
        }
    }

    let image_selector = Selector::parse("img[src]").unwrap();
    let mut image_urls = Vec::new();
    for element in doc.select(&image_selector) {
        if let Some(src) = element.value().attr("src") {
            let resolved = resolve_reference(src, page_url, RefKind::Image)?;
            image_urls.push(resolved.to_string());
        }
    }

    Ok(PageRecord::new(
        page_url.to_string(),
        h1,
        first_paragraph,
        outgoing_links,
        image_urls,
    ))
}

/// Text of the first h1 element, trimmed; empty if the document has none
pub fn get_h1(html: &str) -> String {
    h1_from_doc(&Html::parse_document(html))
}

/// First paragraph under the main-priority rule, trimmed; empty if none
pub fn get_first_paragraph(html: &str) -> String {
    first_paragraph_from_doc(&Html::parse_document(html))
}

fn h1_from_doc(doc: &Html) -> String {
    let selector = Selector::parse("h1").unwrap();
    doc.select(&selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

/// A paragraph inside the first main element wins; a main element with no
/// paragraph falls back to the first paragraph anywhere in the document.
fn first_paragraph_from_doc(doc: &Html) -> String {
    let main_selector = Selector::parse("main").unwrap();
    let p_selector = Selector::parse("p").unwrap();

    if let Some(main) = doc.select(&main_selector).next() {
        if let Some(p) = main.select(&p_selector).next() {
            return element_text(p);
        }
    }

    doc.select(&p_selector)
        .next()
        .map(element_text)
        .unwrap_or_default()
}

fn element_text(element: ElementRef) -> String {
    element.text().collect::<String>().trim().to_string()
}
