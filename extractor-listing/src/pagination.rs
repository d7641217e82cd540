use once_cell::sync::Lazy;
use remote_helper_extractor_helper::location;
use scraper::{Html, Selector};

static PAGINATION_SELECTOR: Lazy<Selector> = Lazy::new(|| Selector::parse("div.x a").unwrap());

/// Resolved URL of the last "next page" anchor that carries an href.
pub fn parse(source_url: &str, html: &Html) -> Option<String> {
    let href = html
        .select(&PAGINATION_SELECTOR)
        .filter(|link| link.text().collect::<String>().trim() == super::NEXT_PAGE_LABEL)
        .filter_map(|link| link.value().attr("href"))
        .last()?;

    let resolved = location::resolve(source_url, href);
    if resolved.is_none() {
        tracing::debug!("unable to resolve next page {href:?} from {source_url:?}");
    }
    resolved
}

#[cfg(test)]
mod tests {
    use super::*;

    const SOURCE: &str = "http://example.com/list/p1.html";

    fn document(pagination: &str) -> Html {
        Html::parse_document(&format!(
            "<html><body><div class=\"x\">{pagination}</div></body></html>"
        ))
    }

    #[test]
    fn should_find_nothing_without_label() {
        let html = document(r#"<a href="p1.html">首页</a><a href="p0.html">上一页</a>"#);
        assert_eq!(parse(SOURCE, &html), None);
    }

    #[test]
    fn should_match_trimmed_label() {
        let html = document("<a href=\"p2.html\">\n  下一页 </a>");
        assert_eq!(
            parse(SOURCE, &html).as_deref(),
            Some("http://example.com/list/p2.html")
        );
    }

    #[test]
    fn should_ignore_labelled_anchor_without_href() {
        let html = document(r#"<a>下一页</a>"#);
        assert_eq!(parse(SOURCE, &html), None);
    }

    #[test]
    fn should_keep_the_last_match() {
        let html = document(r#"<a href="p2.html">下一页</a><a href="/p3.html">下一页</a>"#);
        assert_eq!(
            parse(SOURCE, &html).as_deref(),
            Some("http://example.com/p3.html")
        );
    }

    #[test]
    fn should_ignore_anchors_outside_pagination() {
        let html = Html::parse_document(r#"<div class="y"><a href="p2.html">下一页</a></div>"#);
        assert_eq!(parse(SOURCE, &html), None);
    }

    #[test]
    fn should_drop_unresolvable_link() {
        let html = document(r#"<a href="p2.html">下一页</a>"#);
        assert_eq!(parse("not a url", &html), None);
    }
}
