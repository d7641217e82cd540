use remote_helper_extractor_prelude::{ExtractorError, Page, SourceEncoding};
use scraper::Html;

mod entry;
mod pagination;

pub const NAME: &str = "listing";
/// Text of the anchor pointing to the following page.
pub const NEXT_PAGE_LABEL: &str = "下一页";

/// Parses an already decoded listing page.
///
/// Markup problems are recovered by the HTML parser, the worst outcome is
/// an empty page without next page link.
pub fn parse_str(html: &str, source_url: &str) -> Page {
    let html = Html::parse_document(html);
    if !html.errors.is_empty() {
        tracing::trace!(
            "recovered from {} markup errors in {source_url:?}",
            html.errors.len()
        );
    }

    let entries = entry::parse(&html);
    let next_page_url = pagination::parse(source_url, &html);
    tracing::debug!(
        "parsed {} entries from {source_url:?}, next page {next_page_url:?}",
        entries.len()
    );

    Page::new(source_url, entries, next_page_url)
}

/// Decodes then parses a listing page fetched from `source_url`.
///
/// Only a strict decoding failure is reported as an error, see
/// [`SourceEncoding::decode`].
pub fn parse(
    input: &[u8],
    source_url: &str,
    encoding: SourceEncoding,
) -> Result<Page, ExtractorError> {
    let html = encoding.decode(NAME, input)?;
    Ok(parse_str(html.as_ref(), source_url))
}
