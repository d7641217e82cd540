use once_cell::sync::Lazy;
use remote_helper_extractor_prelude::PageEntry;
use scraper::{ElementRef, Html, Selector};

static ENTRY_SELECTOR: Lazy<Selector> =
    Lazy::new(|| Selector::parse("div.co_content8 table td a.ulink").unwrap());

// index pages and folders are navigation, not resources
fn is_navigation_link(link: &str) -> bool {
    link.is_empty() || link.contains("index.html") || link.ends_with('/')
}

fn parse_entry(elt: ElementRef) -> Option<PageEntry> {
    let link = match elt.value().attr("href") {
        Some(value) => value,
        None => {
            tracing::debug!("skipping entry anchor without href");
            return None;
        }
    };
    if is_navigation_link(link) {
        tracing::trace!("skipping navigation link {link:?}");
        return None;
    }
    let title = elt.text().collect::<String>().trim().to_string();
    Some(PageEntry::new(title, link))
}

pub fn parse(html: &Html) -> Vec<PageEntry> {
    html.select(&ENTRY_SELECTOR).filter_map(parse_entry).collect()
}
