// emails.rs
use crate::config::pause;
use crate::crawler::PageFetcher;
use lazy_static::lazy_static;
use regex::Regex;
use scraper::{Html, Selector};
use std::collections::{BTreeSet, HashSet, VecDeque};
use std::time::Duration;
use url::Url;

lazy_static! {
    static ref EMAIL_REGEX: Regex =
        Regex::new(r"(?i)[A-Z0-9._%+-]+@[A-Z0-9.-]+\.[A-Z]{2,}").unwrap();
    static ref HREF_SELECTOR: Selector = Selector::parse("a[href]").unwrap();
}

const TRIM_CHARS: &[char] = &[';', ',', '.', ':', '(', ')', '[', ']', '{', '}', '<', '>'];

// Retina asset names like "logo@2x.png" match the pattern.
const ASSET_SUFFIXES: &[&str] = &[".png", ".jpg", ".jpeg", ".gif", ".webp", ".svg"];

/// Raw candidates: pattern matches in the text plus `mailto:` link targets.
pub fn extract_emails(html: &str) -> HashSet<String> {
    let mut emails: HashSet<String> = EMAIL_REGEX
        .find_iter(html)
        .map(|m| m.as_str().to_string())
        .collect();

    let document = Html::parse_document(html);
    for a in document.select(&HREF_SELECTOR) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Some(rest) = href.trim().strip_prefix("mailto:") else {
            continue;
        };
        let addr = rest.split('?').next().unwrap_or("").trim();
        if !addr.is_empty() {
            emails.insert(addr.to_string());
        }
    }

    emails
}

/// Same-host http(s) links found on a page, fragments removed.
pub fn extract_links(html: &str, base: &Url) -> Vec<Url> {
    let document = Html::parse_document(html);
    let mut links = Vec::new();

    for a in document.select(&HREF_SELECTOR) {
        let Some(href) = a.value().attr("href") else {
            continue;
        };
        let Ok(mut link) = base.join(href.trim()) else {
            continue;
        };
        if !matches!(link.scheme(), "http" | "https") || link.host_str() != base.host_str() {
            continue;
        }
        link.set_fragment(None);
        links.push(link);
    }

    links
}

/// Trim stray punctuation and drop anything that does not look like an address.
pub fn clean_emails<I>(raw: I) -> BTreeSet<String>
where
    I: IntoIterator<Item = String>,
{
    raw.into_iter()
        .map(|e| e.trim().trim_matches(TRIM_CHARS).to_string())
        .filter(|e| e.len() > 5 && e.contains('@') && e.contains('.'))
        .filter(|e| {
            let lower = e.to_ascii_lowercase();
            !ASSET_SUFFIXES.iter().any(|s| lower.ends_with(s))
        })
        .collect()
}

/// Breadth-first crawl of one website, visiting at most `max_pages` URLs.
/// Pages that fail to load are skipped.
pub fn crawl_site(
    fetcher: &dyn PageFetcher,
    website: &str,
    max_pages: usize,
    page_delay: Duration,
) -> BTreeSet<String> {
    let website = website.trim();
    if website.is_empty() || max_pages == 0 {
        return BTreeSet::new();
    }

    let start = if website.contains("://") {
        website.to_string()
    } else {
        format!("http://{website}")
    };
    let Ok(start) = Url::parse(&start) else {
        log::warn!("Skipping unparseable website '{website}'");
        return BTreeSet::new();
    };

    let mut visited: HashSet<String> = HashSet::new();
    let mut queue = VecDeque::from([start]);
    let mut found = HashSet::new();

    while let Some(url) = queue.pop_front() {
        if visited.len() >= max_pages {
            break;
        }
        if !visited.insert(url.as_str().to_string()) {
            continue;
        }

        let html = match fetcher.fetch_html(url.as_str()) {
            Ok(Some(html)) => html,
            Ok(None) => continue,
            Err(e) => {
                log::debug!("Fetch failed for {url}: {e}");
                continue;
            }
        };

        found.extend(extract_emails(&html));
        for link in extract_links(&html, &url) {
            if !visited.contains(link.as_str()) {
                queue.push_back(link);
            }
        }

        pause(page_delay);
    }

    clean_emails(found)
}
