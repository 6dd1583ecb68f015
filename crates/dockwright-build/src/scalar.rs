//! Encoding of detected values embedded in the generated files.
//!
//! Entry files, env values and paths come from the repository and may hold
//! any character. They are passed through serde rather than spliced in.

use crate::RenderError;

/// A JSON string literal, as used in exec-form `CMD` and compose `command`.
pub fn json_string(value: &str) -> Result<String, RenderError> {
    Ok(serde_json::to_string(value)?)
}

/// A YAML scalar for block context: plain when the YAML emitter leaves it
/// plain, otherwise a double-quoted string.
pub fn yaml_scalar(value: &str) -> Result<String, RenderError> {
    let emitted = serde_yaml::to_string(value)?;
    if emitted.trim_end_matches('\n') == value {
        return Ok(value.to_owned());
    }
    yaml_double_quoted(value)
}

/// JSON escaping is valid in a YAML double-quoted scalar, except that YAML
/// rejects raw characters outside its printable set.
fn yaml_double_quoted(value: &str) -> Result<String, RenderError> {
    let json = json_string(value)?;
    let mut quoted = String::with_capacity(json.len());
    for c in json.chars() {
        if is_yaml_printable(c) {
            quoted.push(c);
        } else {
            let mut units = [0u16; 2];
            for unit in c.encode_utf16(&mut units) {
                quoted.push_str(&format!("\\u{unit:04x}"));
            }
        }
    }
    Ok(quoted)
}

fn is_yaml_printable(c: char) -> bool {
    matches!(
        c,
        '\t' | '\n'
            | '\r'
            | '\u{20}'..='\u{7e}'
            | '\u{85}'
            | '\u{a0}'..='\u{d7ff}'
            | '\u{e000}'..='\u{fffd}'
            | '\u{10000}'..='\u{10ffff}'
    )
}
