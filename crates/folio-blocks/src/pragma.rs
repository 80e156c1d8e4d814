//! The pragma micro-format: leading `#key=value` lines carrying block options.
//!
//! Decoding scans from the top of the text. Each line that starts with `#`
//! and has the shape `#<key>=<value>` (key non-empty, containing no `=`) is
//! an option line; key and value are trimmed and the last duplicate wins.
//! The first line that is not an option line starts the body, and that line
//! is kept as the body's first line. Given `"#ok=1\n#bad\nhello"` the
//! options are `{ok: "1"}` and the body is `"#bad\nhello"`.

use std::collections::BTreeMap;

/// Decoded option set, keyed by option name.
pub type PragmaOptions = BTreeMap<String, String>;

/// Raw text split into its options and body.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Pragma {
    pub options: PragmaOptions,
    pub body: String,
}

impl Pragma {
    pub fn option(&self, key: &str) -> Option<&str> {
        self.options.get(key).map(String::as_str)
    }
}

/// Split a single line into a trimmed `(key, value)` pair if it is an
/// option line.
fn parse_option_line(line: &str) -> Option<(&str, &str)> {
    let rest = line.strip_prefix('#')?;
    let (key, value) = rest.split_once('=')?;
    if key.is_empty() {
        return None;
    }
    Some((key.trim(), value.trim()))
}

/// Split raw block text into pragma options and body.
pub fn decode(raw: &str) -> Pragma {
    let lines: Vec<&str> = raw.split('\n').collect();
    let mut options = PragmaOptions::new();
    let mut body_start = lines.len();

    for (i, line) in lines.iter().enumerate() {
        match parse_option_line(line) {
            Some((key, value)) => {
                options.insert(key.to_string(), value.to_string());
            }
            None => {
                body_start = i;
                break;
            }
        }
    }

    Pragma {
        options,
        body: lines[body_start..].join("\n"),
    }
}

/// Prefix `body` with one `#key=value` line per option.
///
/// Options whose value is `None` are omitted. Lines appear in map order.
pub fn encode(options: &BTreeMap<String, Option<String>>, body: &str) -> String {
    let mut lines: Vec<String> = options
        .iter()
        .filter_map(|(key, value)| value.as_ref().map(|v| format!("#{key}={v}")))
        .collect();
    if lines.is_empty() {
        return body.to_string();
    }
    lines.push(body.to_string());
    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn opts(pairs: &[(&str, Option<&str>)]) -> BTreeMap<String, Option<String>> {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.map(str::to_string)))
            .collect()
    }

    #[test]
    fn no_pragma_is_all_body() {
        let p = decode("just text\nmore");
        assert!(p.options.is_empty());
        assert_eq!(p.body, "just text\nmore");
    }

    #[test]
    fn empty_input() {
        let p = decode("");
        assert!(p.options.is_empty());
        assert_eq!(p.body, "");
    }

    #[test]
    fn options_are_trimmed() {
        let p = decode("#  language =  rust  \nfn main() {}");
        assert_eq!(p.option("language"), Some("rust"));
        assert_eq!(p.body, "fn main() {}");
    }

    #[test]
    fn duplicate_key_last_wins() {
        let p = decode("#language=c\n#language=go\nbody");
        assert_eq!(p.option("language"), Some("go"));
        assert_eq!(p.options.len(), 1);
    }

    #[test]
    fn all_option_lines_leave_empty_body() {
        let p = decode("#a=1\n#b=2");
        assert_eq!(p.options.len(), 2);
        assert_eq!(p.body, "");
    }

    #[test]
    fn malformed_pragma_line_starts_body() {
        let p = decode("#ok=1\n#bad\nhello");
        assert_eq!(p.options, PragmaOptions::from([("ok".into(), "1".into())]));
        assert_eq!(p.body, "#bad\nhello");
    }

    #[test]
    fn markdown_heading_is_body() {
        let p = decode("# Heading\ntext");
        assert!(p.options.is_empty());
        assert_eq!(p.body, "# Heading\ntext");
    }

    #[test]
    fn empty_key_is_not_an_option() {
        let p = decode("#=value\nbody");
        assert!(p.options.is_empty());
        assert_eq!(p.body, "#=value\nbody");
    }

    #[test]
    fn empty_value_is_kept() {
        let p = decode("#language=\nx");
        assert_eq!(p.option("language"), Some(""));
    }

    #[test]
    fn value_may_contain_equals() {
        let p = decode("#expr=a=b\nx");
        assert_eq!(p.option("expr"), Some("a=b"));
    }

    #[test]
    fn options_after_body_are_body() {
        let p = decode("text\n#language=rust");
        assert!(p.options.is_empty());
        assert_eq!(p.body, "text\n#language=rust");
    }

    #[test]
    fn encode_skips_none_values() {
        let encoded = encode(&opts(&[("language", None), ("title", Some("x"))]), "body");
        assert_eq!(encoded, "#title=x\nbody");
    }

    #[test]
    fn encode_without_options_is_body() {
        assert_eq!(encode(&opts(&[("language", None)]), "body"), "body");
        assert_eq!(encode(&BTreeMap::new(), ""), "");
    }

    #[test]
    fn encode_with_empty_body_keeps_separator() {
        let encoded = encode(&opts(&[("language", Some("rust"))]), "");
        assert_eq!(encoded, "#language=rust\n");
        let p = decode(&encoded);
        assert_eq!(p.option("language"), Some("rust"));
        assert_eq!(p.body, "");
    }

    fn body_strategy() -> impl Strategy<Value = String> {
        // First line must not itself look like an option line.
        "([a-zA-Z0-9 .,;()=]{0,12})(\n[a-zA-Z0-9 #.,;()=]{0,12}){0,4}"
    }

    proptest! {
        #[test]
        fn decode_inverts_encode(
            options in proptest::collection::btree_map(
                "[a-z][a-z0-9_]{0,7}",
                proptest::option::of("[a-zA-Z0-9._+-]{0,10}"),
                0..5,
            ),
            body in body_strategy(),
        ) {
            let encoded = encode(&options, &body);
            let decoded = decode(&encoded);
            let expected: PragmaOptions = options
                .into_iter()
                .filter_map(|(k, v)| v.map(|v| (k, v)))
                .collect();
            prop_assert_eq!(decoded.options, expected);
            prop_assert_eq!(decoded.body, body);
        }
    }
}
