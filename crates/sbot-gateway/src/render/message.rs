//! Message page for the viewer.
//!
//! Shows a message's metadata and its content as pretty-printed JSON, with
//! every message key inside the content linked back into the viewer.

use maud::{Markup, html};

use super::components::{page_shell, truncate_key};

/// Render a message page. `base` is the viewer prefix, e.g. `/view/`.
pub fn render(key: &str, message: &serde_json::Value, base: &str) -> Markup {
    let author = message.get("author").and_then(|v| v.as_str());
    let sequence = message.get("sequence").and_then(|v| v.as_u64());
    let timestamp = message
        .get("timestamp")
        .and_then(|v| v.as_f64())
        .and_then(format_timestamp);
    let previous = message.get("previous").and_then(|v| v.as_str());
    let kind = message
        .get("content")
        .and_then(|c| c.get("type"))
        .and_then(|t| t.as_str());

    let content = message.get("content").unwrap_or(&serde_json::Value::Null);
    let content_json = serde_json::to_string_pretty(content).unwrap_or_default();

    let title = match kind {
        Some(kind) => format!("{kind} message"),
        None => "Message".to_string(),
    };

    let body = html! {
        h1 { (title) }
        div class="message" {
            dl class="message-meta" {
                dt { "Key" }
                dd { (key) }
                @if let Some(author) = author {
                    dt { "Author" }
                    dd { (author) }
                }
                @if let Some(sequence) = sequence {
                    dt { "Sequence" }
                    dd { (sequence) }
                }
                @if let Some(timestamp) = &timestamp {
                    dt { "Published" }
                    dd { (timestamp) }
                }
                @if let Some(previous) = previous {
                    dt { "Previous" }
                    dd { a href=(view_href(base, previous)) { (truncate_key(previous)) } }
                }
            }
            pre class="message-content" { (linkify(&content_json, base)) }
        }
        p { a href=(format!("{}{}.json", base, encode_key(key))) { "Raw JSON" } }
    };

    page_shell(&title, &format!("Scuttlebutt message {key}"), body)
}

/// Format a Scuttlebutt timestamp (milliseconds since the epoch).
fn format_timestamp(millis: f64) -> Option<String> {
    let dt = chrono::DateTime::from_timestamp_millis(millis as i64)?;
    Some(dt.format("%Y-%m-%d %H:%M UTC").to_string())
}

/// Link to a message inside the viewer.
pub fn view_href(base: &str, key: &str) -> String {
    format!("{base}{}", encode_key(key))
}

/// Percent-encode the characters of a sigil key that are not path-safe.
pub fn encode_key(key: &str) -> String {
    let mut out = String::with_capacity(key.len() + 8);
    for c in key.chars() {
        match c {
            '%' => out.push_str("%25"),
            '/' => out.push_str("%2F"),
            '+' => out.push_str("%2B"),
            '=' => out.push_str("%3D"),
            '?' => out.push_str("%3F"),
            '#' => out.push_str("%23"),
            _ => out.push(c),
        }
    }
    out
}

/// Split text into plain runs and message keys (`%<base64>.sha256`), linking
/// the keys.
fn linkify(text: &str, base: &str) -> Markup {
    let mut segments = Vec::new();
    let mut rest = text;

    while let Some(start) = rest.find('%') {
        let candidate = &rest[start..];
        // Never zero: the candidate starts with '%'.
        let len = candidate
            .find(|c: char| c == '"' || c.is_whitespace() || c == ',')
            .unwrap_or(candidate.len());
        let token = &candidate[..len];

        if token.len() > ".sha256".len() + 1 && token.ends_with(".sha256") {
            segments.push((&rest[..start], None));
            segments.push((token, Some(view_href(base, token))));
        } else {
            segments.push((&rest[..start + len], None));
        }
        rest = &candidate[len..];
    }
    segments.push((rest, None));

    html! {
        @for (text, href) in &segments {
            @if let Some(href) = href {
                a href=(href) { (text) }
            } @else {
                (text)
            }
        }
    }
}
