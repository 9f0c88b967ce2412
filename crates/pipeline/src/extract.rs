//! JSON extraction from free-form generator replies.
//!
//! The model is asked for exactly one JSON object but routinely wraps it
//! in prose or markdown fences. The strategy here is deliberately narrow:
//! parse the whole text, else parse the first `{` .. last `}` substring,
//! else give up. Truncated or syntactically broken JSON yields `None` —
//! a tolerant parser would risk silently accepting corrupted data.

use serde_json::Value;

/// Locate and parse the first well-formed JSON value embedded in `text`.
///
/// Never panics; callers treat `None` as a recoverable failure.
pub fn extract(text: &str) -> Option<Value> {
    let trimmed = text.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(value) = serde_json::from_str(trimmed) {
        return Some(value);
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    serde_json::from_str(&text[start..=end]).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn extract_is_idempotent_on_valid_json() {
        let value = json!({"blockA": [{"exercise": "Barbell Squat", "sets": 4}]});
        let text = serde_json::to_string(&value).unwrap();
        assert_eq!(extract(&text), Some(value));
    }

    #[test]
    fn extract_carves_json_out_of_prose() {
        let text = "Here is your plan:\n{\"round3\": []}\nLet me know if you want changes.";
        let value = extract(text).unwrap();
        assert!(value["round3"].is_array());
    }

    #[test]
    fn extract_handles_markdown_fences() {
        let text = "```json\n{\"blockA\": [{\"exercise\": \"Plank\", \"sets\": 3}]}\n```";
        let value = extract(text).unwrap();
        assert_eq!(value["blockA"][0]["exercise"], "Plank");
    }

    #[test]
    fn extract_takes_first_brace_to_last_brace() {
        // Nested objects resolve because the outermost braces win.
        let text = "prefix {\"a\": {\"b\": 1}} suffix";
        let value = extract(text).unwrap();
        assert_eq!(value["a"]["b"], 1);
    }

    #[test]
    fn truncated_json_yields_none() {
        assert_eq!(extract("{\"blockA\": [{\"exercise\": \"Squ"), None);
    }

    #[test]
    fn non_json_yields_none() {
        assert_eq!(extract("I could not generate a plan today."), None);
        assert_eq!(extract(""), None);
        assert_eq!(extract("   \n  "), None);
    }

    #[test]
    fn reversed_braces_yield_none() {
        assert_eq!(extract("} nothing here {"), None);
    }
}
