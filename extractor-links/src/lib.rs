use once_cell::sync::Lazy;
use regex::{Regex, RegexBuilder};
use remote_helper_extractor_prelude::{LinkKind, LinkSet};

pub const NAME: &str = "links";

fn pattern(kind: LinkKind) -> &'static str {
    // magnet parameters are joined with '&', the other schemes stop there
    match kind {
        LinkKind::Magnet => r#"magnet:\?[^"'<]+"#,
        LinkKind::Ed2k => r#"ed2k://[^"'&<]+"#,
        LinkKind::Thunder => r#"thunder://[^"'&<]+"#,
        LinkKind::Ftp => r#"ftp://[^"'&<]+"#,
        LinkKind::Qqdl => r#"qqdl://[^"'&<]+"#,
        LinkKind::Flashget => r#"Flashget://[^"'&<]+"#,
    }
}

static PATTERNS: Lazy<Vec<(LinkKind, Regex)>> = Lazy::new(|| {
    LinkKind::ALL
        .into_iter()
        .map(|kind| {
            let regex = RegexBuilder::new(pattern(kind))
                .case_insensitive(true)
                .build()
                .unwrap();
            (kind, regex)
        })
        .collect()
});

/// Every downloadable link found in `html`, one entry per distinct value.
pub fn extract(html: &str) -> LinkSet {
    let mut links = LinkSet::default();
    for (kind, regex) in PATTERNS.iter() {
        let before = links.len();
        for found in regex.find_iter(html) {
            links.insert(found.as_str());
        }
        tracing::trace!("found {} new {kind} links", links.len() - before);
    }
    tracing::debug!("extracted {} links", links.len());
    links
}
