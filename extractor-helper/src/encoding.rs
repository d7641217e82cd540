use std::borrow::Cow;

/// Strict UTF-8 decoding. Returns `None` as soon as one sequence is invalid.
pub fn decode_utf8(input: &[u8]) -> Option<Cow<'_, str>> {
    encoding_rs::UTF_8.decode_without_bom_handling_and_without_replacement(input)
}

/// Lossy GBK decoding, malformed sequences are replaced with U+FFFD.
pub fn decode_gbk(input: &[u8]) -> Cow<'_, str> {
    let (value, _had_errors) = encoding_rs::GBK.decode_without_bom_handling(input);
    value
}
