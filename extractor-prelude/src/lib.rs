use remote_helper_extractor_helper::encoding;
use std::borrow::Cow;
use std::collections::{hash_set, HashSet};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Deserialize, serde::Serialize)]
pub enum SourceEncoding {
    #[default]
    #[serde(rename = "utf8", alias = "utf-8", alias = "UTF-8")]
    Utf8,
    #[serde(rename = "gbk", alias = "GBK")]
    Gbk,
}

impl SourceEncoding {
    pub fn label(&self) -> &'static str {
        match self {
            Self::Utf8 => "utf8",
            Self::Gbk => "gbk",
        }
    }

    /// Utf8 is strict, Gbk replaces what it cannot read.
    pub fn decode<'a>(
        &self,
        origin: &'static str,
        input: &'a [u8],
    ) -> Result<Cow<'a, str>, ExtractorError> {
        match self {
            Self::Utf8 => encoding::decode_utf8(input).ok_or_else(|| {
                ExtractorError::new(
                    origin,
                    ExtractorErrorReason::DecodeFailure { encoding: *self },
                )
            }),
            Self::Gbk => Ok(encoding::decode_gbk(input)),
        }
    }
}

impl FromStr for SourceEncoding {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "utf8" | "utf-8" => Ok(Self::Utf8),
            "gbk" => Ok(Self::Gbk),
            _ => Err(format!("invalid encoding {s:?}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct PageEntry {
    pub title: String,
    pub link: String,
}

impl PageEntry {
    pub fn new<T: Into<String>, L: Into<String>>(title: T, link: L) -> Self {
        Self {
            title: title.into(),
            link: link.into(),
        }
    }
}

/// One parsed listing page. Built once per parse and never updated.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize)]
pub struct Page {
    source_url: String,
    entries: Vec<PageEntry>,
    next_page_url: Option<String>,
}

impl Page {
    pub fn new<S: Into<String>>(
        source_url: S,
        entries: Vec<PageEntry>,
        next_page_url: Option<String>,
    ) -> Self {
        Self {
            source_url: source_url.into(),
            entries,
            next_page_url,
        }
    }

    pub fn empty<S: Into<String>>(source_url: S) -> Self {
        Self::new(source_url, Vec::new(), None)
    }

    pub fn source_url(&self) -> &str {
        self.source_url.as_str()
    }

    pub fn entries(&self) -> &[PageEntry] {
        self.entries.as_slice()
    }

    pub fn next_page_url(&self) -> Option<&str> {
        self.next_page_url.as_deref()
    }

    pub fn is_last_page(&self) -> bool {
        self.next_page_url.is_none()
    }

    pub fn into_entries(self) -> Vec<PageEntry> {
        self.entries
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum LinkKind {
    Magnet,
    Ed2k,
    Thunder,
    Ftp,
    Qqdl,
    Flashget,
}

impl LinkKind {
    pub const ALL: [LinkKind; 6] = [
        Self::Magnet,
        Self::Ed2k,
        Self::Thunder,
        Self::Ftp,
        Self::Qqdl,
        Self::Flashget,
    ];

    pub fn prefix(&self) -> &'static str {
        match self {
            Self::Magnet => "magnet:?",
            Self::Ed2k => "ed2k://",
            Self::Thunder => "thunder://",
            Self::Ftp => "ftp://",
            Self::Qqdl => "qqdl://",
            Self::Flashget => "flashget://",
        }
    }

    pub fn detect(link: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| {
            let prefix = kind.prefix();
            link.get(..prefix.len())
                .map_or(false, |head| head.eq_ignore_ascii_case(prefix))
        })
    }
}

impl std::fmt::Display for LinkKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let prefix = self.prefix();
        let scheme = prefix.split(':').next().unwrap_or(prefix);
        f.write_str(scheme)
    }
}

/// Downloadable links found in a document, without duplicates nor order.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct LinkSet(HashSet<String>);

impl LinkSet {
    pub fn insert<S: Into<String>>(&mut self, link: S) -> bool {
        self.0.insert(link.into())
    }

    pub fn contains(&self, link: &str) -> bool {
        self.0.contains(link)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> hash_set::Iter<'_, String> {
        self.0.iter()
    }

    pub fn into_sorted(self) -> Vec<String> {
        let mut links: Vec<String> = self.0.into_iter().collect();
        links.sort();
        links
    }
}

impl FromIterator<String> for LinkSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl IntoIterator for LinkSet {
    type Item = String;
    type IntoIter = hash_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ExtractorError {
    pub origin: &'static str,
    pub reason: ExtractorErrorReason,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ExtractorErrorReason {
    DecodeFailure { encoding: SourceEncoding },
}

impl ExtractorError {
    pub fn new(origin: &'static str, reason: ExtractorErrorReason) -> Self {
        Self { origin, reason }
    }
}

impl std::fmt::Display for ExtractorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.reason {
            ExtractorErrorReason::DecodeFailure { encoding } => write!(
                f,
                "{}: unable to decode document as {}",
                self.origin,
                encoding.label()
            ),
        }
    }
}

impl std::error::Error for ExtractorError {}
