use serde_json::json;

/// One raw stream payload, JSON-encoded the way the backend emits it.
pub fn stream_payload(response_id: &str, content: &str, finish_reason: Option<&str>) -> String {
    return json!({
        "id": response_id,
        "object": "chat.completion.chunk",
        "created": 1700000000,
        "model": "gpt-4",
        "choices": [{
            "index": 0,
            "delta": { "content": content, "role": null },
            "finishReason": finish_reason,
        }],
    })
    .to_string();
}

/// One websocket frame: a `chat_stream` envelope wrapping the JSON-encoded
/// payload string.
pub fn chat_stream_frame(response_id: &str, content: &str, finish_reason: Option<&str>) -> String {
    return json!({
        "event": "chat_stream",
        "data": stream_payload(response_id, content, finish_reason),
    })
    .to_string();
}

/// A full SSE response body: every delta as a non-terminal fragment, followed
/// by an empty terminal fragment.
pub fn sse_body(response_id: &str, deltas: &[&str]) -> String {
    let mut lines = deltas
        .iter()
        .map(|delta| {
            return format!("data: {}", stream_payload(response_id, delta, None));
        })
        .collect::<Vec<String>>();
    lines.push(format!(
        "data: {}",
        stream_payload(response_id, "", Some("stop"))
    ));

    return lines.join("\n\n");
}
