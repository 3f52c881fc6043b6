//! Serialized payload patching
//!
//! Rewrites spawn-type identifiers in JSON text, such as bot-generation
//! responses, independently of any object graph. Key order is preserved.

use serde_json::Value as Json;

use crate::identifiers::IdentifierSet;
use crate::names::is_spawn_field;

/// Errors while patching a payload
///
/// Never returned by the public functions; logged and treated as "nothing
/// to patch".
#[derive(Debug, thiserror::Error)]
pub enum PayloadError {
    /// Text is blank or not an object/array
    #[error("payload is not a JSON object or array")]
    NotStructured,

    /// Text is not valid JSON
    #[error("payload parse failed: {0}")]
    Parse(#[source] serde_json::Error),

    /// Patched tree could not be written back
    #[error("payload serialization failed: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Result of patching a payload
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PayloadPatch {
    /// Patched text, or the original when nothing changed
    pub text: String,
    /// Values rewritten
    pub replaced: usize,
}

/// Patch spawn-type values in JSON text
///
/// Only string values stored under a well-known spawn field name are
/// compared; every other value is descended into. The tree is re-serialized
/// only if something changed. Blank, non-structured or malformed input is
/// returned unchanged with a zero count.
#[must_use]
pub fn patch_serialized_payload(text: &str, ids: &IdentifierSet) -> PayloadPatch {
    match try_patch(text, ids) {
        Ok(Some((patched, replaced))) => PayloadPatch {
            text: patched,
            replaced,
        },
        Ok(None) => PayloadPatch {
            text: text.to_string(),
            replaced: 0,
        },
        Err(err) => {
            tracing::debug!("payload left unchanged: {}", err);
            PayloadPatch {
                text: text.to_string(),
                replaced: 0,
            }
        }
    }
}

/// Patch JSON text in place
///
/// Returns the number of values rewritten; `text` is only replaced when
/// that number is non-zero.
pub fn patch_payload_in_place(text: &mut String, ids: &IdentifierSet) -> usize {
    match try_patch(text, ids) {
        Ok(Some((patched, replaced))) => {
            *text = patched;
            replaced
        }
        Ok(None) => 0,
        Err(err) => {
            tracing::debug!("payload left unchanged: {}", err);
            0
        }
    }
}

/// Patch an already parsed JSON tree in place
///
/// Returns the number of values rewritten.
pub fn patch_json_value(node: &mut Json, ids: &IdentifierSet) -> usize {
    match node {
        Json::Object(obj) => {
            let mut replaced = 0;
            for (key, value) in obj.iter_mut() {
                if is_spawn_field(key) {
                    if let Json::String(current) = value {
                        if ids.matches(current) {
                            *value = Json::String(ids.to().to_string());
                            replaced += 1;
                            continue;
                        }
                    }
                }
                replaced += patch_json_value(value, ids);
            }
            replaced
        }
        Json::Array(items) => items.iter_mut().map(|item| patch_json_value(item, ids)).sum(),
        _ => 0,
    }
}

fn try_patch(text: &str, ids: &IdentifierSet) -> Result<Option<(String, usize)>, PayloadError> {
    let trimmed = text.trim_start();
    if !(trimmed.starts_with('{') || trimmed.starts_with('[')) {
        return Err(PayloadError::NotStructured);
    }

    let mut root: Json = serde_json::from_str(text).map_err(PayloadError::Parse)?;
    let replaced = patch_json_value(&mut root, ids);
    if replaced == 0 {
        return Ok(None);
    }

    let patched = serde_json::to_string(&root).map_err(PayloadError::Serialize)?;
    Ok(Some((patched, replaced)))
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn ids() -> IdentifierSet {
        IdentifierSet::new(["assault", "marksman"], "pmcBot")
    }

    #[test]
    fn rewrites_nested_values_keeping_order() {
        let patched = patch_serialized_payload(
            r#"{"Role":"assault","Nested":{"SpawnType":"marksman"}}"#,
            &ids(),
        );
        assert_eq!(patched.text, r#"{"Role":"pmcBot","Nested":{"SpawnType":"pmcBot"}}"#);
        assert_eq!(patched.replaced, 2);
    }

    #[test]
    fn malformed_input_is_unchanged() {
        let text = r#"{"Role":"assault","#;
        let patched = patch_serialized_payload(text, &ids());
        assert_eq!(patched.text, text);
        assert_eq!(patched.replaced, 0);
    }

    #[test]
    fn non_structured_input_is_unchanged() {
        for text in ["", "   ", "\"assault\"", "42", "null"] {
            let patched = patch_serialized_payload(text, &ids());
            assert_eq!(patched.text, text);
            assert_eq!(patched.replaced, 0);
        }
    }

    #[test]
    fn unchanged_text_is_not_reformatted() {
        let text = "{ \"Role\" : \"bossKnight\" }";
        assert_eq!(patch_serialized_payload(text, &ids()).text, text);
    }

    #[test]
    fn only_spawn_keys_are_rewritten() {
        let text = r#"[{"Info":{"Settings":{"Role":"Assault","BotDifficulty":"assault"}},"Name":"marksman"}]"#;
        let patched = patch_serialized_payload(text, &ids());
        assert_eq!(
            patched.text,
            r#"[{"Info":{"Settings":{"Role":"pmcBot","BotDifficulty":"assault"}},"Name":"marksman"}]"#
        );
        assert_eq!(patched.replaced, 1);
    }

    #[test]
    fn spawn_keys_with_structured_values_are_descended() {
        let mut tree = serde_json::json!({"Role": {"role": "marksman"}, "BotType": 3});
        assert_eq!(patch_json_value(&mut tree, &ids()), 1);
        assert_eq!(tree, serde_json::json!({"Role": {"role": "pmcBot"}, "BotType": 3}));
    }

    #[test]
    fn in_place_only_touches_text_on_change() {
        let mut text = String::from(r#"{"role": "exUsec"}"#);
        assert_eq!(patch_payload_in_place(&mut text, &ids()), 0);
        assert_eq!(text, r#"{"role": "exUsec"}"#);

        let mut text = String::from(r#"{"role": "marksman"}"#);
        assert_eq!(patch_payload_in_place(&mut text, &ids()), 1);
        assert_eq!(text, r#"{"role":"pmcBot"}"#);
    }
}
