//! Repair of model replies into parseable JSON.
//!
//! Models often wrap the requested object in a markdown fence, prefix it
//! with a `json` tag, surround it with prose, or append extra text.

/// Strip a surrounding markdown code fence and a leading `json` tag.
#[must_use]
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        text = rest.find("```").map_or(rest, |end| &rest[..end]).trim();
    }

    if let Some(rest) = text.strip_prefix("json").or_else(|| text.strip_prefix("JSON")) {
        text = rest.trim_start();
    }

    text
}

/// Return the first balanced JSON object in the reply.
///
/// Falls back to the fence-stripped text when no object is found, so the
/// caller's parser reports the real problem.
#[must_use]
pub fn extract_json(raw: &str) -> &str {
    let trimmed = strip_code_fence(raw);

    if let Some(start) = trimmed.find('{') {
        let remainder = &trimmed[start..];
        if let Some(end) = find_matching_brace(remainder) {
            return &remainder[..end];
        }
    }

    trimmed
}

/// Byte offset just past the brace closing the first `{`, ignoring braces
/// inside JSON strings.
fn find_matching_brace(s: &str) -> Option<usize> {
    let mut depth = 0i32;
    let mut in_string = false;
    let mut escape = false;

    for (i, c) in s.char_indices() {
        if escape {
            escape = false;
            continue;
        }
        if c == '\\' && in_string {
            escape = true;
            continue;
        }
        if c == '"' {
            in_string = !in_string;
            continue;
        }
        if in_string {
            continue;
        }
        match c {
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    return Some(i + 1);
                }
            }
            _ => {}
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_object() {
        assert_eq!(extract_json(r#"{"a": 1}"#), r#"{"a": 1}"#);
    }

    #[test]
    fn test_fenced_with_json_tag() {
        let raw = "```json\n{\"vendor_detected\": \"Acme\"}\n```";
        assert_eq!(extract_json(raw), r#"{"vendor_detected": "Acme"}"#);
    }

    #[test]
    fn test_bare_json_tag() {
        assert_eq!(extract_json("json {\"a\": 2}"), "{\"a\": 2}");
    }

    #[test]
    fn test_prose_and_trailing_data() {
        let raw = "Here is the data: {\"a\": {\"b\": \"}\"}} Let me know if you need more. {\"x\": 1}";
        assert_eq!(extract_json(raw), "{\"a\": {\"b\": \"}\"}}");
    }

    #[test]
    fn test_escaped_quote_inside_string() {
        let raw = r#"{"vendor_detected": "Say \"hi\" {"} trailing"#;
        assert_eq!(extract_json(raw), r#"{"vendor_detected": "Say \"hi\" {"}"#);
    }

    #[test]
    fn test_no_object_returns_stripped_text() {
        assert_eq!(extract_json("```\nnot json\n```"), "not json");
    }
}
