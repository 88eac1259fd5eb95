use serde_json::json;
use yuca::escape::{escape_context, escape_strings, EscapeFormat};

#[test]
fn test_escape_latex_sample() {
    assert_eq!(EscapeFormat::Latex.escape_str("100% & $5"), r"100\% \& \$5");
}

#[test]
fn test_escape_keeps_plain_text() {
    assert_eq!(EscapeFormat::Latex.escape_str("Plain text, é ü 42."), "Plain text, é ü 42.");
}

#[test]
fn test_escape_is_not_idempotent() {
    let once = EscapeFormat::Latex.escape_str("50%");
    let twice = EscapeFormat::Latex.escape_str(&once);
    assert_eq!(once, r"50\%");
    assert_eq!(twice, r"50\\\%");
}

#[test]
fn test_escape_strings_recurses_and_keeps_other_scalars() {
    let mut context = json!({
        "name": "R&D",
        "count": 3,
        "ratio": 0.5,
        "active": true,
        "missing": null,
        "items": ["a_b", {"deep": ["#1"]}]
    });

    escape_strings(&mut context, EscapeFormat::Latex);

    assert_eq!(
        context,
        json!({
            "name": r"R\&D",
            "count": 3,
            "ratio": 0.5,
            "active": true,
            "missing": null,
            "items": [r"a\_b", {"deep": [r"\#1"]}]
        })
    );
}

#[test]
fn test_escape_context_unknown_format_is_noop() {
    let mut context = json!({"name": "R&D"});
    assert!(!escape_context(&mut context, "html"));
    assert_eq!(context, json!({"name": "R&D"}));

    assert!(escape_context(&mut context, "latex"));
    assert_eq!(context, json!({"name": r"R\&D"}));
}

#[test]
fn test_escape_does_not_touch_keys() {
    let mut context = json!({"a_b": "c_d"});
    escape_strings(&mut context, EscapeFormat::Latex);
    assert_eq!(context, json!({"a_b": r"c\_d"}));
}
