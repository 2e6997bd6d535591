//! Named HTML entities for markup parsing.
//!
//! Authors write component markup as HTML, so entities such as `&nbsp;`
//! appear even though the parser is an XML reader. They are converted to
//! Unicode before parsing; the five XML entities are left for the reader.

use std::sync::LazyLock;

use regex::Regex;

static ENTITY_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"&([a-zA-Z][a-zA-Z0-9]*);").expect("invalid entity regex"));

/// Replace named HTML entities with their Unicode characters.
pub(crate) fn convert_html_entities(markup: &str) -> String {
    ENTITY_PATTERN
        .replace_all(markup, |caps: &regex::Captures| {
            entity_to_unicode(&caps[1]).map_or_else(|| caps[0].to_owned(), String::from)
        })
        .into_owned()
}

/// Decode an entity reference reported by the XML reader.
///
/// Unknown names are preserved literally.
pub(crate) fn decode_entity(entity: &str) -> String {
    match entity {
        "lt" => "<".to_owned(),
        "gt" => ">".to_owned(),
        "amp" => "&".to_owned(),
        "apos" => "'".to_owned(),
        "quot" => "\"".to_owned(),
        s if s.starts_with('#') => {
            let code = if s.starts_with("#x") || s.starts_with("#X") {
                u32::from_str_radix(&s[2..], 16).ok()
            } else {
                s[1..].parse::<u32>().ok()
            };
            code.and_then(char::from_u32)
                .map_or_else(|| format!("&{entity};"), |c| c.to_string())
        }
        _ => format!("&{entity};"),
    }
}

fn entity_to_unicode(name: &str) -> Option<&'static str> {
    Some(match name {
        "nbsp" => "\u{00a0}",
        "mdash" => "\u{2014}",
        "ndash" => "\u{2013}",
        "ldquo" => "\u{201c}",
        "rdquo" => "\u{201d}",
        "lsquo" => "\u{2018}",
        "rsquo" => "\u{2019}",
        "laquo" => "\u{00ab}",
        "raquo" => "\u{00bb}",
        "bull" => "\u{2022}",
        "middot" => "\u{00b7}",
        "hellip" => "\u{2026}",
        "rarr" => "\u{2192}",
        "larr" => "\u{2190}",
        "uarr" => "\u{2191}",
        "darr" => "\u{2193}",
        "times" => "\u{00d7}",
        "copy" => "\u{00a9}",
        "reg" => "\u{00ae}",
        "trade" => "\u{2122}",
        "euro" => "\u{20ac}",
        "pound" => "\u{00a3}",
        "yen" => "\u{00a5}",
        "deg" => "\u{00b0}",
        "check" => "\u{2713}",
        _ => return None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_convert_known_entities() {
        assert_eq!(
            convert_html_entities("a&nbsp;b&mdash;c&hellip;"),
            "a\u{00a0}b\u{2014}c\u{2026}"
        );
    }

    #[test]
    fn test_xml_entities_untouched() {
        assert_eq!(convert_html_entities("&lt;&amp;&quot;"), "&lt;&amp;&quot;");
    }

    #[test]
    fn test_unknown_entity_preserved() {
        assert_eq!(convert_html_entities("&bogus;"), "&bogus;");
    }

    #[test]
    fn test_decode_entity() {
        assert_eq!(decode_entity("lt"), "<");
        assert_eq!(decode_entity("#65"), "A");
        assert_eq!(decode_entity("#x41"), "A");
        assert_eq!(decode_entity("#xZZ"), "&#xZZ;");
        assert_eq!(decode_entity("other"), "&other;");
    }
}
