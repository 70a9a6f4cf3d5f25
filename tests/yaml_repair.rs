use toolhub_core::yaml::repair_yaml;

fn parse_all(content: &str) -> Vec<serde_yaml::Value> {
    use serde::Deserialize;
    serde_yaml::Deserializer::from_str(content)
        .map(|doc| serde_yaml::Value::deserialize(doc).unwrap())
        .collect()
}

#[test]
fn test_repair_preserves_structure() {
    let input = concat!(
        "apiVersion: v1\n",
        "kind: Service\n",
        "metadata:\n",
        "      name: web\n",
        "spec:\n",
        "   ports:\n",
        "   - port: 80\n",
        "     targetPort: 8080\n",
    );
    let output = repair_yaml(input);
    assert_eq!(parse_all(&output), parse_all(input));
}

#[test]
fn test_repair_normalizes_formatting() {
    let input = "spec:\n    replicas: 3\n    ports:\n    - 80\n    - 443";
    let expected = "---\nspec:\n  replicas: 3\n  ports:\n    - 80\n    - 443\n";
    assert_eq!(repair_yaml(input), expected);
}

#[test]
fn test_repair_is_idempotent() {
    let inputs = [
        "name: demo\n",
        "spec:\n      a: 1\n      b:\n       - x\n       - y\n",
        "list:\n- name: a\n  args:\n  - one\n  - two\n",
        "a: 1\n---\nb: 2\n",
    ];
    for input in inputs {
        let once = repair_yaml(input);
        assert_eq!(repair_yaml(&once), once, "not idempotent for {:?}", input);
    }
}

#[test]
fn test_repaired_output_always_ends_with_newline() {
    let output = repair_yaml("key: value");
    assert!(output.ends_with('\n'));
    assert!(!output.ends_with("\n\n"));
}

#[test]
fn test_every_document_gets_a_start_marker() {
    let output = repair_yaml("a: 1\n---\nb: 2\n---\nc: 3\n");
    assert_eq!(output.matches("---\n").count(), 3);
    assert_eq!(parse_all(&output).len(), 3);
}

#[test]
fn test_malformed_input_returned_verbatim() {
    let input = "key: [unclosed\n  - broken";
    assert_eq!(repair_yaml(input), input);
}

#[test]
fn test_blank_and_comment_only_inputs_unchanged() {
    assert_eq!(repair_yaml(""), "");
    assert_eq!(repair_yaml("\n\n"), "\n\n");
    assert_eq!(repair_yaml("# notes only\n"), "# notes only\n");
}

#[test]
fn test_anchors_are_resolved() {
    let input = "defaults: &d\n  retries: 3\njob: *d\n";
    let output = repair_yaml(input);
    // Aliases are expanded during parsing, so the output is plain structure
    assert!(!output.contains('&'));
    assert!(!output.contains('*'));
    assert_eq!(parse_all(&output), parse_all(input));
}

#[test]
fn test_quoting_keeps_types_stable() {
    let input = "version: \"1.20\"\nanswer: \"no\"\nempty: \"\"\n";
    let output = repair_yaml(input);
    assert_eq!(parse_all(&output), parse_all(input));
    assert!(output.contains("\"1.20\""));
    assert!(output.contains("\"no\""));
}
