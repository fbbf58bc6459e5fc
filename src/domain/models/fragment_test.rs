use super::PayloadChoice;
use super::PayloadDelta;
use super::StreamPayload;

fn payload(id: &str, content: Option<&str>, finish_reason: Option<&str>) -> StreamPayload {
    return StreamPayload {
        id: id.to_string(),
        object: "chat.completion.chunk".to_string(),
        created: 1700000000,
        model: "gpt-4".to_string(),
        choices: vec![PayloadChoice {
            index: 0,
            delta: PayloadDelta {
                content: content.map(|e| return e.to_string()),
                role: None,
            },
            finish_reason: finish_reason.map(|e| return e.to_string()),
        }],
    };
}

#[test]
fn it_parses_wire_payloads() {
    let raw = r#"{"id":"chatcmpl-1712","object":"chat.completion.chunk","created":1712000000,"model":"gpt-4","choices":[{"index":0,"delta":{"content":"Hello ","role":null},"finishReason":null}]}"#;
    let parsed: StreamPayload = serde_json::from_str(raw).unwrap();

    assert_eq!(parsed, payload("chatcmpl-1712", Some("Hello "), None));
}

#[test]
fn it_parses_payloads_with_missing_fields() {
    let parsed: StreamPayload = serde_json::from_str(r#"{"choices":[{"delta":{"content":"x"}}]}"#).unwrap();

    assert!(parsed.id.is_empty());
    assert!(parsed.fragment().is_err());
}

#[test]
fn it_extracts_a_fragment() {
    let fragment = payload("chatcmpl-1", Some("He"), None).fragment().unwrap();

    assert_eq!(fragment.response_id, "chatcmpl-1");
    assert_eq!(fragment.delta, "He");
    assert!(!fragment.is_final);
}

#[test]
fn it_extracts_the_terminal_fragment() {
    let fragment = payload("chatcmpl-1", Some("llo"), Some("stop")).fragment().unwrap();

    assert_eq!(fragment.delta, "llo");
    assert!(fragment.is_final);
}

#[test]
fn it_allows_an_empty_terminal_fragment() {
    let fragment = payload("chatcmpl-1", None, Some("stop")).fragment().unwrap();

    assert_eq!(fragment.delta, "");
    assert!(fragment.is_final);
}

#[test]
fn it_rejects_missing_content_on_non_terminal_fragments() {
    assert!(payload("chatcmpl-1", None, None).fragment().is_err());
}

#[test]
fn it_rejects_empty_choices() {
    let mut broken = payload("chatcmpl-1", Some("He"), None);
    broken.choices.clear();

    assert!(broken.fragment().is_err());
    assert!(!broken.is_terminal());
}

#[test]
fn it_flags_terminal_payloads() {
    assert!(payload("chatcmpl-1", Some(""), Some("stop")).is_terminal());
    assert!(!payload("chatcmpl-1", Some("He"), None).is_terminal());
}
