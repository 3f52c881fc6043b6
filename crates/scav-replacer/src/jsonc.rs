//! JSON-with-comments preprocessing
//!
//! Strips `//` and `/* */` comments and trailing commas so the result can
//! be handed to `serde_json`. String literals are copied verbatim.

/// Convert JSONC text to plain JSON
///
/// Comments are replaced by whitespace-preserving equivalents (line breaks
/// inside block comments are kept) so parse error positions still point at
/// the original line.
#[must_use]
pub fn strip_jsonc(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();
    let mut in_string = false;

    while let Some(c) = chars.next() {
        if in_string {
            out.push(c);
            match c {
                '\\' => {
                    if let Some(escaped) = chars.next() {
                        out.push(escaped);
                    }
                }
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match (c, chars.peek()) {
            ('"', _) => {
                in_string = true;
                out.push(c);
            }
            ('/', Some('/')) => {
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                        break;
                    }
                }
            }
            ('/', Some('*')) => {
                chars.next();
                let mut prev = '\0';
                for skipped in chars.by_ref() {
                    if skipped == '\n' {
                        out.push('\n');
                    }
                    if prev == '*' && skipped == '/' {
                        break;
                    }
                    prev = skipped;
                }
                out.push(' ');
            }
            _ => out.push(c),
        }
    }

    remove_trailing_commas(&out)
}

/// Drop commas followed only by whitespace and a closing bracket
fn remove_trailing_commas(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut in_string = false;
    let mut escaped = false;
    let chars: Vec<char> = text.chars().collect();

    for (i, &c) in chars.iter().enumerate() {
        if in_string {
            out.push(c);
            if escaped {
                escaped = false;
            } else if c == '\\' {
                escaped = true;
            } else if c == '"' {
                in_string = false;
            }
            continue;
        }
        if c == '"' {
            in_string = true;
        } else if c == ',' {
            let next = chars[i + 1..].iter().find(|n| !n.is_whitespace());
            if matches!(next, Some('}' | ']')) {
                continue;
            }
        }
        out.push(c);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn strips_line_and_block_comments() {
        let text = "{\n  // enable\n  \"Enabled\": false, /* off\n for now */ \"DebugDump\": true\n}";
        let json: serde_json::Value = serde_json::from_str(&strip_jsonc(text)).unwrap();
        assert_eq!(json, serde_json::json!({"Enabled": false, "DebugDump": true}));
    }

    #[test]
    fn keeps_comment_markers_inside_strings() {
        let text = r#"{"Url": "http://host/*x*/", "Quote": "a\"//b"}"#;
        assert_eq!(strip_jsonc(text), text);
    }

    #[test]
    fn removes_trailing_commas() {
        let text = "{\"OnlyMaps\": [\"Woods\", ],\n}";
        let json: serde_json::Value = serde_json::from_str(&strip_jsonc(text)).unwrap();
        assert_eq!(json, serde_json::json!({"OnlyMaps": ["Woods"]}));
    }

    #[test]
    fn keeps_line_count() {
        let text = "{\n/* a\nb\nc */\n\"x\": 1 // tail\n}";
        assert_eq!(strip_jsonc(text).lines().count(), text.lines().count());
    }
}
