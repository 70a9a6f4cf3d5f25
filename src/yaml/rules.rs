//! Style/quality rule set for syntactically valid YAML
//!
//! A default-profile rule set over the raw text. Every problem carries a
//! 1-based line and column; the collected list is sorted in document order.

use crate::config::LintSettings;
use crate::models::{LintLevel, LintProblem};
use std::collections::HashSet;

const TRUTHY_VALUES: [&str; 16] = [
    "yes", "Yes", "YES", "no", "No", "NO", "on", "On", "ON", "off", "Off", "OFF", "True", "TRUE",
    "False", "FALSE",
];

/// Run every rule and return problems sorted by (line, column).
pub fn run_all(content: &str, settings: &LintSettings) -> Vec<LintProblem> {
    let mut problems = Vec::new();

    check_document_start(content, settings, &mut problems);
    check_lines(content, settings, &mut problems);
    check_indentation(content, settings, &mut problems);
    check_key_duplicates(content, &mut problems);
    check_final_newline(content, &mut problems);

    problems.sort_by(|a, b| (a.line, a.column).cmp(&(b.line, b.column)));
    problems
}

fn problem(line: usize, column: usize, level: LintLevel, message: impl Into<String>) -> LintProblem {
    LintProblem {
        line,
        column,
        level,
        message: message.into(),
    }
}

/// The first document should open with an explicit `---` marker.
fn check_document_start(content: &str, settings: &LintSettings, problems: &mut Vec<LintProblem>) {
    if !settings.require_document_start {
        return;
    }

    for (i, line) in content.lines().enumerate() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') || trimmed.starts_with('%') {
            continue;
        }
        if !trimmed.starts_with("---") {
            problems.push(problem(
                i + 1,
                1,
                LintLevel::Warning,
                "missing document start \"---\"",
            ));
        }
        return;
    }
}

/// Per-line rules: line length, trailing whitespace, tabs, truthy scalars.
fn check_lines(content: &str, settings: &LintSettings, problems: &mut Vec<LintProblem>) {
    for (i, line) in content.lines().enumerate() {
        let lineno = i + 1;

        let width = line.chars().count();
        if width > settings.max_line_length {
            problems.push(problem(
                lineno,
                settings.max_line_length + 1,
                LintLevel::Error,
                format!(
                    "line too long ({} > {} characters)",
                    width, settings.max_line_length
                ),
            ));
        }

        let trimmed_end = line.trim_end();
        if trimmed_end != line {
            problems.push(problem(
                lineno,
                trimmed_end.chars().count() + 1,
                LintLevel::Error,
                "trailing spaces",
            ));
        }

        if let Some(tab_idx) = line.find('\t') {
            // Tabs inside quoted scalars are content, not indentation
            let quote_idx = line.find(['"', '\'']).unwrap_or(usize::MAX);
            if tab_idx < quote_idx {
                problems.push(problem(
                    lineno,
                    line[..tab_idx].chars().count() + 1,
                    LintLevel::Warning,
                    "tab character violates indentation style; use spaces",
                ));
            }
        }

        if let Some((column, value)) = truthy_candidate(line) {
            if TRUTHY_VALUES.contains(&value) {
                problems.push(problem(
                    lineno,
                    column,
                    LintLevel::Warning,
                    "truthy value should be one of [false, true]",
                ));
            }
        }
    }
}

/// Extract the scalar value of a `key: value` or `- value` line, if any.
fn truthy_candidate(line: &str) -> Option<(usize, &str)> {
    let without_comment = match line.find(" #") {
        Some(idx) => &line[..idx],
        None => line,
    };
    let trimmed = without_comment.trim_start();
    if trimmed.starts_with('#') {
        return None;
    }

    let value_start = if let Some(idx) = find_key_colon(without_comment) {
        idx + 1
    } else if let Some(stripped) = trimmed.strip_prefix("- ") {
        without_comment.len() - stripped.len()
    } else {
        return None;
    };

    let tail = &without_comment[value_start..];
    let value = tail.trim();
    if value.is_empty() {
        return None;
    }
    let offset = tail.len() - tail.trim_start().len();
    let column = without_comment[..value_start + offset].chars().count() + 1;
    Some((column, value))
}

/// Find the colon that terminates a mapping key, skipping quoted sections.
fn find_key_colon(line: &str) -> Option<usize> {
    let mut in_single = false;
    let mut in_double = false;
    let bytes = line.as_bytes();
    for (idx, &b) in bytes.iter().enumerate() {
        match b {
            b'\'' if !in_double => in_single = !in_single,
            b'"' if !in_single => in_double = !in_double,
            b':' if !in_single && !in_double => {
                let next = bytes.get(idx + 1);
                if next.is_none() || next == Some(&b' ') {
                    return Some(idx);
                }
            }
            _ => {}
        }
    }
    None
}

/// Indentation must increase by the configured step (or twice the step for
/// sequence items under a mapping key).
fn check_indentation(content: &str, settings: &LintSettings, problems: &mut Vec<LintProblem>) {
    let mut stack: Vec<usize> = vec![0];
    let mut block_scalar_indent: Option<usize> = None;

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = leading_spaces(line);

        if let Some(base) = block_scalar_indent {
            if indent > base {
                continue;
            }
            block_scalar_indent = None;
        }

        let trimmed = line.trim_start();
        if trimmed.starts_with('#') {
            continue;
        }
        if line.starts_with('\t') || line[..byte_index_of_indent(line, indent)].contains('\t') {
            // Tab rule already reported this line
            continue;
        }

        let last = *stack.last().unwrap_or(&0);
        if indent > last {
            let step = indent - last;
            // Sequence items may sit a double step in (dash-indented style);
            // mapping keys get exactly one step
            let is_sequence_item = trimmed == "-" || trimmed.starts_with("- ");
            let allowed = step == settings.indent_size
                || (is_sequence_item && step == settings.indent_size * 2);
            if !allowed {
                problems.push(problem(
                    i + 1,
                    indent + 1,
                    LintLevel::Error,
                    format!(
                        "wrong indentation: expected {} but found {}",
                        last + settings.indent_size,
                        indent
                    ),
                ));
            }
            stack.push(indent);
        } else if indent < last {
            while stack.len() > 1 && stack.last().is_some_and(|d| *d > indent) {
                stack.pop();
            }
        }

        if opens_block_scalar(line) {
            block_scalar_indent = Some(indent);
        }
    }
}

fn leading_spaces(line: &str) -> usize {
    line.chars().take_while(|c| *c == ' ').count()
}

fn byte_index_of_indent(line: &str, indent: usize) -> usize {
    line.char_indices()
        .nth(indent)
        .map(|(idx, _)| idx)
        .unwrap_or(line.len())
}

fn opens_block_scalar(line: &str) -> bool {
    let without_comment = match line.find(" #") {
        Some(idx) => &line[..idx],
        None => line,
    };
    let trimmed = without_comment.trim_end();
    trimmed.ends_with('|')
        || trimmed.ends_with('>')
        || trimmed.ends_with("|-")
        || trimmed.ends_with("|+")
        || trimmed.ends_with(">-")
        || trimmed.ends_with(">+")
}

/// Repeated keys within one textual mapping block.
///
/// The syntax stage already rejects duplicates the parser can see; this keeps
/// the rule in the profile and reports position information.
fn check_key_duplicates(content: &str, problems: &mut Vec<LintProblem>) {
    let mut scopes: Vec<(usize, HashSet<String>)> = Vec::new();
    let mut block_scalar_indent: Option<usize> = None;

    for (i, line) in content.lines().enumerate() {
        if line.trim().is_empty() {
            continue;
        }
        let indent = leading_spaces(line);

        if let Some(base) = block_scalar_indent {
            if indent > base {
                continue;
            }
            block_scalar_indent = None;
        }

        let mut rest = &line[byte_index_of_indent(line, indent)..];
        if rest.starts_with('#') {
            continue;
        }
        if rest.starts_with("---") {
            scopes.clear();
            continue;
        }

        // Each sequence item opens a fresh mapping scope
        let mut key_indent = indent;
        while let Some(stripped) = rest.strip_prefix("- ") {
            scopes.retain(|(depth, _)| *depth < key_indent + 2);
            key_indent += 2;
            rest = stripped;
        }

        if let Some(colon) = find_key_colon(rest) {
            let key = rest[..colon].trim().trim_matches(['"', '\'']).to_string();
            if key.is_empty() {
                continue;
            }

            while let Some((depth, _)) = scopes.last() {
                if *depth > key_indent {
                    scopes.pop();
                } else {
                    break;
                }
            }

            match scopes.last_mut() {
                Some((depth, keys)) if *depth == key_indent => {
                    if !keys.insert(key.clone()) {
                        problems.push(problem(
                            i + 1,
                            key_indent + 1,
                            LintLevel::Error,
                            format!("duplication of key \"{}\" in mapping", key),
                        ));
                    }
                }
                _ => {
                    let mut keys = HashSet::new();
                    keys.insert(key);
                    scopes.push((key_indent, keys));
                }
            }
        }

        if opens_block_scalar(line) {
            block_scalar_indent = Some(indent);
        }
    }
}

fn check_final_newline(content: &str, problems: &mut Vec<LintProblem>) {
    if content.is_empty() || content.ends_with('\n') {
        return;
    }
    let last_line = content.lines().last().unwrap_or("");
    problems.push(problem(
        content.lines().count(),
        last_line.chars().count() + 1,
        LintLevel::Error,
        "no new line character at the end of file",
    ));
}
