//! Recovers a JSON object from loosely formatted model output.
//!
//! Models wrap JSON in Markdown fences or surround it with prose. The extractor
//! first looks for a balanced `{...}` span (string- and escape-aware), and only
//! if none exists falls back to stripping code fences.

/// Returns the JSON candidate embedded in `text`.
pub fn extract_json(text: &str) -> &str {
    if let Some(span) = balanced_object(text) {
        return span;
    }
    strip_json_fences(text)
}

/// Finds the first `{` and returns the slice up to its matching `}`.
/// Braces inside string literals are ignored.
fn balanced_object(text: &str) -> Option<&str> {
    let start = text.find('{')?;
    let mut depth = 0usize;
    let mut in_string = false;
    let mut escaped = false;

    for (offset, ch) in text[start..].char_indices() {
        if in_string {
            match ch {
                _ if escaped => escaped = false,
                '\\' => escaped = true,
                '"' => in_string = false,
                _ => {}
            }
            continue;
        }

        match ch {
            '"' => in_string = true,
            '{' => depth += 1,
            '}' => {
                depth -= 1;
                if depth == 0 {
                    let end = start + offset + ch.len_utf8();
                    return Some(&text[start..end]);
                }
            }
            _ => {}
        }
    }

    None
}

/// Strips ```json ... ``` or ``` ... ``` code fences from LLM output.
fn strip_json_fences(text: &str) -> &str {
    let text = text.trim();
    let inner = text
        .strip_prefix("```json")
        .or_else(|| text.strip_prefix("```"));
    match inner {
        Some(stripped) => stripped
            .trim_start()
            .strip_suffix("```")
            .map(|s| s.trim())
            .unwrap_or(stripped.trim_start()),
        None => text,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn parsed(text: &str) -> Value {
        serde_json::from_str(extract_json(text)).unwrap()
    }

    #[test]
    fn test_extracts_from_json_fence() {
        let input = "```json\n{\"title\": \"Sprint crunch\", \"options\": [1, 2]}\n```";
        assert_eq!(parsed(input), json!({"title": "Sprint crunch", "options": [1, 2]}));
    }

    #[test]
    fn test_extracts_raw_json() {
        let input = "{\"topSkills\": [\"communication\", \"leadership\"]}";
        assert_eq!(
            parsed(input),
            json!({"topSkills": ["communication", "leadership"]})
        );
    }

    #[test]
    fn test_extracts_json_embedded_in_prose() {
        let input = "Sure! Here is the analysis you asked for:\n\
            {\"summary\": \"steady\", \"nested\": {\"score\": 7}}\n\
            Let me know if you need anything else.";
        assert_eq!(
            parsed(input),
            json!({"summary": "steady", "nested": {"score": 7}})
        );
    }

    #[test]
    fn test_braces_inside_strings_do_not_end_the_span() {
        let input = r#"prefix {"text": "use } and { freely", "escaped": "quote \" }"} suffix"#;
        assert_eq!(
            parsed(input),
            json!({"text": "use } and { freely", "escaped": "quote \" }"})
        );
    }

    #[test]
    fn test_unbalanced_object_falls_back_to_fence_stripping() {
        let input = "```\n{\"truncated\": true\n```";
        assert_eq!(extract_json(input), "{\"truncated\": true");
        assert!(serde_json::from_str::<Value>(extract_json(input)).is_err());
    }

    #[test]
    fn test_strip_json_fences_without_tag() {
        assert_eq!(strip_json_fences("```\n[1, 2]\n```"), "[1, 2]");
    }

    #[test]
    fn test_strip_json_fences_no_fences() {
        assert_eq!(strip_json_fences("  plain  "), "plain");
    }
}
