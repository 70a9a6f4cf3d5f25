//! Best-effort structural YAML repair
//!
//! Parses every document, then re-emits the structure with normalized block
//! formatting: two-space mapping indentation, sequence dashes offset two past
//! the parent key, an explicit `---` per document, and a trailing newline.
//! Anything that cannot be parsed is returned unchanged.

use crate::yaml::parse_documents;
use serde_yaml::Value;
use tracing::warn;

/// Repair content, returning the input unchanged when it cannot be improved.
pub fn repair_yaml(content: &str) -> String {
    if content.trim().is_empty() {
        return content.to_string();
    }

    let docs = match parse_documents(content) {
        Ok(docs) => docs,
        Err(e) => {
            warn!(error = %e, "unrepairable YAML, returning original");
            return content.to_string();
        }
    };

    // Comment-only or null-only input has no structure worth rewriting
    if docs.is_empty() || docs.iter().all(Value::is_null) {
        return content.to_string();
    }

    let mut out = String::new();
    for doc in &docs {
        out.push_str("---\n");
        if !doc.is_null() {
            emit_block(doc, 0, &mut out);
        }
    }
    if !out.ends_with('\n') {
        out.push('\n');
    }
    out
}

fn indent_str(indent: usize) -> String {
    " ".repeat(indent)
}

fn emit_block(value: &Value, indent: usize, out: &mut String) {
    match value {
        Value::Mapping(map) => {
            for (key, val) in map {
                out.push_str(&indent_str(indent));
                out.push_str(&key_repr(key));
                out.push(':');
                emit_value_after_key(val, indent, out);
            }
        }
        Value::Sequence(items) => {
            for item in items {
                out.push_str(&indent_str(indent));
                out.push('-');
                emit_sequence_item(item, indent, out);
            }
        }
        scalar => {
            out.push_str(&indent_str(indent));
            out.push_str(&scalar_repr(scalar));
            out.push('\n');
        }
    }
}

fn emit_value_after_key(value: &Value, key_indent: usize, out: &mut String) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            emit_block(value, key_indent + 2, out);
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push('\n');
            emit_block(value, key_indent + 2, out);
        }
        Value::Mapping(_) => out.push_str(" {}\n"),
        Value::Sequence(_) => out.push_str(" []\n"),
        Value::Null => out.push('\n'),
        Value::Tagged(tagged) => {
            out.push(' ');
            out.push_str(&tagged.tag.to_string());
            emit_value_after_key(&tagged.value, key_indent, out);
        }
        scalar => {
            out.push(' ');
            out.push_str(&scalar_repr(scalar));
            out.push('\n');
        }
    }
}

fn emit_sequence_item(item: &Value, dash_indent: usize, out: &mut String) {
    match item {
        Value::Mapping(map) if !map.is_empty() => {
            // First entry shares the dash line, the rest align beneath it
            for (i, (key, val)) in map.iter().enumerate() {
                if i == 0 {
                    out.push(' ');
                } else {
                    out.push_str(&indent_str(dash_indent + 2));
                }
                out.push_str(&key_repr(key));
                out.push(':');
                emit_value_after_key(val, dash_indent + 2, out);
            }
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push('\n');
            emit_block(item, dash_indent + 2, out);
        }
        Value::Mapping(_) => out.push_str(" {}\n"),
        Value::Sequence(_) => out.push_str(" []\n"),
        Value::Null => out.push('\n'),
        Value::Tagged(tagged) => {
            out.push(' ');
            out.push_str(&tagged.tag.to_string());
            emit_sequence_item_tail(&tagged.value, dash_indent, out);
        }
        scalar => {
            out.push(' ');
            out.push_str(&scalar_repr(scalar));
            out.push('\n');
        }
    }
}

fn emit_sequence_item_tail(value: &Value, dash_indent: usize, out: &mut String) {
    match value {
        Value::Mapping(map) if !map.is_empty() => {
            out.push('\n');
            emit_block(value, dash_indent + 2, out);
        }
        Value::Sequence(items) if !items.is_empty() => {
            out.push('\n');
            emit_block(value, dash_indent + 2, out);
        }
        Value::Null => out.push('\n'),
        scalar => {
            out.push(' ');
            out.push_str(&scalar_repr(scalar));
            out.push('\n');
        }
    }
}

fn key_repr(key: &Value) -> String {
    match key {
        Value::String(s) => string_repr(s),
        Value::Mapping(_) | Value::Sequence(_) | Value::Tagged(_) => flow_repr(key),
        scalar => scalar_repr(scalar),
    }
}

fn scalar_repr(value: &Value) -> String {
    match value {
        Value::Null => "null".to_string(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => n.to_string(),
        Value::String(s) => string_repr(s),
        other => flow_repr(other),
    }
}

/// Single-line flow form, used only for complex mapping keys.
fn flow_repr(value: &Value) -> String {
    match value {
        Value::Sequence(items) => {
            let inner: Vec<String> = items.iter().map(flow_repr).collect();
            format!("[{}]", inner.join(", "))
        }
        Value::Mapping(map) => {
            let inner: Vec<String> = map
                .iter()
                .map(|(k, v)| format!("{}: {}", flow_repr(k), flow_repr(v)))
                .collect();
            format!("{{{}}}", inner.join(", "))
        }
        Value::Tagged(tagged) => format!("{} {}", tagged.tag, flow_repr(&tagged.value)),
        scalar => scalar_repr(scalar),
    }
}

fn string_repr(s: &str) -> String {
    if needs_quotes(s) {
        quoted(s)
    } else {
        s.to_string()
    }
}

/// Whether a plain (unquoted) rendering would change the value's meaning.
fn needs_quotes(s: &str) -> bool {
    if s.is_empty() || s != s.trim() {
        return true;
    }
    if s.chars().any(|c| {
        matches!(
            c,
            '\n' | '\t'
                | '"'
                | '\''
                | '#'
                | '{'
                | '}'
                | '['
                | ']'
                | ','
                | '&'
                | '*'
                | '!'
                | '|'
                | '>'
                | '%'
                | '@'
                | '`'
                | '\\'
        )
    }) {
        return true;
    }
    if s.contains(": ") || s.ends_with(':') {
        return true;
    }
    let mut chars = s.chars();
    if let Some(first) = chars.next() {
        if matches!(first, '-' | '?' | ':') && matches!(chars.next(), None | Some(' ')) {
            return true;
        }
    }
    let lower = s.to_ascii_lowercase();
    if matches!(
        lower.as_str(),
        "null" | "~" | "true" | "false" | "yes" | "no" | "on" | "off" | ".inf" | "-.inf" | ".nan"
    ) {
        return true;
    }
    if s.parse::<i64>().is_ok() || s.parse::<f64>().is_ok() {
        return true;
    }
    s.starts_with("0x") || s.starts_with("0o")
}

fn quoted(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    out.push('"');
    for c in s.chars() {
        match c {
            '\\' => out.push_str("\\\\"),
            '"' => out.push_str("\\\""),
            '\n' => out.push_str("\\n"),
            '\t' => out.push_str("\\t"),
            '\r' => out.push_str("\\r"),
            c if c.is_control() => out.push_str(&format!("\\u{:04x}", c as u32)),
            c => out.push(c),
        }
    }
    out.push('"');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_input_unchanged() {
        assert_eq!(repair_yaml(""), "");
        assert_eq!(repair_yaml("   \n"), "   \n");
    }

    #[test]
    fn test_malformed_input_unchanged() {
        let input = "key: [1,2";
        assert_eq!(repair_yaml(input), input);
    }

    #[test]
    fn test_comment_only_input_unchanged() {
        let input = "# just a comment\n";
        assert_eq!(repair_yaml(input), input);
    }

    #[test]
    fn test_adds_document_start_and_final_newline() {
        assert_eq!(repair_yaml("name: demo"), "---\nname: demo\n");
    }

    #[test]
    fn test_normalizes_mapping_indentation() {
        let input = "spec:\n      replicas: 3\n";
        assert_eq!(repair_yaml(input), "---\nspec:\n  replicas: 3\n");
    }

    #[test]
    fn test_sequence_offset_style() {
        let input = "items:\n- 1\n- 2\n";
        assert_eq!(repair_yaml(input), "---\nitems:\n  - 1\n  - 2\n");
    }

    #[test]
    fn test_sequence_of_mappings() {
        let input = "containers:\n- name: app\n  port: 80\n- name: db\n  port: 5432\n";
        let expected = "---\ncontainers:\n  - name: app\n    port: 80\n  - name: db\n    port: 5432\n";
        assert_eq!(repair_yaml(input), expected);
    }

    #[test]
    fn test_multi_document_markers() {
        let input = "a: 1\n---\nb: 2\n";
        assert_eq!(repair_yaml(input), "---\na: 1\n---\nb: 2\n");
    }

    #[test]
    fn test_null_values_stay_bare() {
        assert_eq!(repair_yaml("key:\n"), "---\nkey:\n");
    }

    #[test]
    fn test_ambiguous_strings_are_quoted() {
        assert_eq!(repair_yaml("answer: \"yes\"\n"), "---\nanswer: \"yes\"\n");
        assert_eq!(repair_yaml("version: \"1.20\"\n"), "---\nversion: \"1.20\"\n");
    }

    #[test]
    fn test_empty_collections_flow_form() {
        assert_eq!(
            repair_yaml("empty_map: {}\nempty_list: []\n"),
            "---\nempty_map: {}\nempty_list: []\n"
        );
    }

    #[test]
    fn test_idempotent() {
        let input = "spec:\n    replicas: 3\n    ports:\n    - 80\n    - 443\n";
        let once = repair_yaml(input);
        assert_eq!(repair_yaml(&once), once);
    }

    #[test]
    fn test_needs_quotes() {
        assert!(needs_quotes(""));
        assert!(needs_quotes(" padded "));
        assert!(needs_quotes("yes"));
        assert!(needs_quotes("Null"));
        assert!(needs_quotes("1.20"));
        assert!(needs_quotes("a: b"));
        assert!(needs_quotes("- item"));
        assert!(needs_quotes("has#hash"));
        assert!(!needs_quotes("plain"));
        assert!(!needs_quotes("nginx:1.25"));
        assert!(!needs_quotes("hello world"));
    }

    #[test]
    fn test_control_characters_escaped() {
        assert_eq!(quoted("a\nb"), "\"a\\nb\"");
        assert_eq!(quoted("bell\u{7}"), "\"bell\\u0007\"");
    }
}
