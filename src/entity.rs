//! Character-entity normalization for translated text.
//!
//! Translation services tend to hand back text with HTML character entities
//! in unpredictable states: escaped, unescaped, or mixed within one string.
//! Normalization decodes one level of entities to literal characters and
//! then re-encodes once, so every output string is escaped exactly one level
//! deep. The apostrophe is the exception: the message file format wants a
//! literal `'`, so its entity is reverted after re-encoding.

use quick_xml::escape::{escape, resolve_html5_entity, unescape_with};

/// Decodes HTML character entities to their literal characters.
///
/// Lenient where the XML escaper is strict: a bare `&`, an unterminated
/// entity, or an unknown name passes through literally instead of failing.
/// Translated text is full of stray ampersands and none of them should be
/// fatal.
pub fn decode(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(pos) = rest.find('&') {
        out.push_str(&rest[..pos]);
        let tail = &rest[pos..];

        // A well-formed entity ends with ';' within a few characters.
        let end = tail[1..].find(';').map(|i| i + 1);
        match end {
            Some(end) if end > 1 && end <= 32 => {
                let candidate = &tail[..=end];
                match unescape_with(candidate, |name| resolve_html5_entity(name)) {
                    Ok(decoded) => {
                        out.push_str(&decoded);
                        rest = &tail[end + 1..];
                    }
                    Err(_) => {
                        out.push('&');
                        rest = &tail[1..];
                    }
                }
            }
            _ => {
                out.push('&');
                rest = &tail[1..];
            }
        }
    }
    out.push_str(rest);
    out
}

/// Canonicalizes entity escaping in a translated string.
///
/// Decode, re-encode, then revert the apostrophe entity: the output files
/// expect `it's`, never `it&#39;s` or `it&amp;#39;s`.
pub fn normalize(input: &str) -> String {
    let decoded = decode(input);
    let escaped = escape(decoded.as_str());
    escaped.replace("&apos;", "'")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_named_entities() {
        assert_eq!(decode("a &amp; b &lt;tag&gt;"), "a & b <tag>");
    }

    #[test]
    fn test_decode_numeric_entities() {
        assert_eq!(decode("it&#39;s"), "it's");
        assert_eq!(decode("it&#x27;s"), "it's");
    }

    #[test]
    fn test_decode_html5_named_entity() {
        assert_eq!(decode("caf&eacute;"), "café");
    }

    #[test]
    fn test_decode_leaves_bare_ampersand() {
        assert_eq!(decode("Tom & Jerry"), "Tom & Jerry");
        assert_eq!(decode("A & B &amp; C"), "A & B & C");
    }

    #[test]
    fn test_decode_leaves_unknown_entity() {
        assert_eq!(decode("&notanentity123;x"), "&notanentity123;x");
    }

    #[test]
    fn test_normalize_apostrophe_stays_literal() {
        assert_eq!(normalize("it's here"), "it's here");
        assert_eq!(normalize("it&#39;s here"), "it's here");
    }

    #[test]
    fn test_normalize_decodes_one_level_only() {
        // Double-escaped input loses exactly one layer per pass.
        assert_eq!(normalize("it&amp;#39;s here"), "it&amp;#39;s here");
    }

    #[test]
    fn test_normalize_escapes_once() {
        assert_eq!(normalize("Tom & Jerry"), "Tom &amp; Jerry");
        assert_eq!(normalize("Tom &amp; Jerry"), "Tom &amp; Jerry");
        assert_eq!(normalize("a < b"), "a &lt; b");
    }

    #[test]
    fn test_normalize_plain_text_untouched() {
        assert_eq!(normalize("nothing special"), "nothing special");
    }
}
