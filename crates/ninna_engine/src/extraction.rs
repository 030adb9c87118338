//! Extracting structured data from LLM responses.
//!
//! Model output often wraps JSON in markdown fences or surrounds it
//! with prose. These helpers pull the first JSON document out of a
//! response and parse it into a typed value.

use ninna_error::{JsonError, NinnaResult};

/// Extract JSON from a response that may contain markdown or extra text.
///
/// Tries, in order: a ```json fenced block, any fenced block, balanced
/// braces, balanced brackets.
///
/// # Errors
///
/// Returns an error if no JSON document is found in the response.
///
/// # Examples
///
/// ```
/// use ninna_engine::extract_json;
///
/// let response = "Ecco la storia:\n```json\n{\"intro\": \"C'era una volta\"}\n```\n";
/// let json = extract_json(response).unwrap();
/// assert!(json.contains("intro"));
/// ```
pub fn extract_json(response: &str) -> NinnaResult<String> {
    if let Some(json) = extract_from_code_block(response, "json") {
        return Ok(json);
    }

    if let Some(json) = extract_balanced(response, '{', '}') {
        return Ok(json);
    }
    if let Some(json) = extract_balanced(response, '[', ']') {
        return Ok(json);
    }

    tracing::error!(
        response_length = response.len(),
        "No JSON found in LLM response"
    );

    Err(JsonError::new(format!(
        "no JSON found in response (length: {})",
        response.len()
    ))
    .into())
}

/// Extract content from markdown code blocks.
fn extract_from_code_block(response: &str, language: &str) -> Option<String> {
    let pattern = format!("```{}", language);

    if let Some(start) = response.find(&pattern) {
        let content_start = start + pattern.len();
        if let Some(end) = response[content_start..].find("```") {
            let content = &response[content_start..content_start + end];
            return Some(content.trim().to_string());
        }
        // No closing fence, likely a truncated response.
        return Some(response[content_start..].trim().to_string());
    }

    if let Some(start) = response.find("```") {
        let content_start = start + 3;
        // Skip a possible language specifier on the fence line.
        let skip_to = response[content_start..]
            .find('\n')
            .map(|n| content_start + n + 1)
            .unwrap_or(content_start);

        if let Some(end) = response[skip_to..].find("```") {
            let content = &response[skip_to..skip_to + end];
            return Some(content.trim().to_string());
        }
        return Some(response[skip_to..].trim().to_string());
    }

    None
}

/// Extract content between balanced delimiters, handling nesting and
/// string literals.
fn extract_balanced(response: &str, open: char, close: char) -> Option<String> {
    let start = response.find(open)?;
    let mut depth = 0;
    let mut in_string = false;
    let mut escape_next = false;

    for (i, ch) in response[start..].char_indices() {
        if escape_next {
            escape_next = false;
            continue;
        }

        match ch {
            '\\' => escape_next = true,
            '"' => in_string = !in_string,
            c if c == open && !in_string => depth += 1,
            c if c == close && !in_string => {
                depth -= 1;
                if depth == 0 {
                    return Some(response[start..start + i + 1].to_string());
                }
            }
            _ => {}
        }
    }

    None
}

/// Parse extracted JSON into a specific type.
///
/// # Errors
///
/// Returns an error if the JSON string cannot be parsed into type `T`.
pub fn parse_json<T>(json_str: &str) -> NinnaResult<T>
where
    T: serde::de::DeserializeOwned,
{
    serde_json::from_str(json_str).map_err(|e| {
        let preview = json_str.chars().take(100).collect::<String>();
        tracing::error!(error = %e, json_preview = %preview, "JSON parsing failed");
        JsonError::new(format!("failed to parse JSON: {} (JSON: {}...)", e, preview)).into()
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn extracts_json_from_code_block() {
        let response = "Ecco il JSON:\n\n```json\n{\n  \"intro\": \"C'era una volta\"\n}\n```\n\nSpero sia utile!";
        let json = extract_json(response).unwrap();
        assert!(json.contains("\"intro\""));
        assert!(!json.contains("```"));
    }

    #[test]
    fn extracts_balanced_braces_from_prose() {
        let response = r#"Certo! {"intro": "Inizio", "nested": {"ok": true}} fine."#;
        let json = extract_json(response).unwrap();
        assert!(json.starts_with('{'));
        assert!(json.ends_with('}'));
        assert!(json.contains("nested"));
    }

    #[test]
    fn handles_string_escapes() {
        let response = r#"{"text": "Lei disse \"ciao\""}"#;
        let json = extract_json(response).unwrap();
        assert!(json.contains("ciao"));
    }

    #[test]
    fn errors_when_no_json_present() {
        assert!(extract_json("Solo testo, nessun JSON").is_err());
    }

    #[test]
    fn parses_into_struct() {
        use serde::Deserialize;

        #[derive(Deserialize)]
        struct Probe {
            intro: String,
        }

        let probe: Probe = parse_json(r#"{"intro": "Inizio"}"#).unwrap();
        assert_eq!(probe.intro, "Inizio");
    }
}
