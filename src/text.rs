use html_escape::{decode_html_entities, encode_double_quoted_attribute};

/// Decode HTML character references in scraped text.
/// lol_html hands text chunks over verbatim, so `&rsquo;` is still `&rsquo;` here.
pub fn decode_entities(input: &str) -> String {
    decode_html_entities(input).into_owned()
}

/// Escape text for use inside HTML element content or a double-quoted attribute.
pub fn escape_html(input: &str) -> String {
    encode_double_quoted_attribute(input).into_owned()
}

/// Decoded, trimmed text as it should land in a record field.
pub fn clean(raw: &str) -> String {
    decode_entities(raw).trim().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_named_and_numeric_references() {
        assert_eq!(decode_entities("Texas A&amp;M"), "Texas A&M");
        assert_eq!(decode_entities("&#35;5 &#x23;6"), "#5 #6");
        assert_eq!(decode_entities("7:00&nbsp;PM"), "7:00\u{a0}PM");
    }

    #[test]
    fn decodes_html5_named_references() {
        assert_eq!(decode_entities("Saint Mary&rsquo;s"), "Saint Mary\u{2019}s");
        assert_eq!(decode_entities("San Jos&eacute;"), "San Jos\u{e9}");
        assert_eq!(decode_entities("&lsquo;Huskers&rsquo;"), "\u{2018}Huskers\u{2019}");
    }

    #[test]
    fn leaves_plain_ampersands_alone() {
        assert_eq!(decode_entities("W & L"), "W & L");
    }

    #[test]
    fn escapes_markup_characters() {
        assert_eq!(escape_html(r#"A&M <b>"x"</b>"#), "A&amp;M &lt;b&gt;&quot;x&quot;&lt;/b&gt;");
    }

    #[test]
    fn decoded_text_is_escaped_once() {
        let name = clean("Saint Mary&rsquo;s");
        assert_eq!(escape_html(&name), "Saint Mary\u{2019}s");
    }

    #[test]
    fn clean_trims_after_decoding() {
        assert_eq!(clean("\n   Home&nbsp;\n"), "Home");
    }
}
