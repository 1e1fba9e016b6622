//! HTML fragments injected by the notification service and the gateway.
//!
//! All caller-supplied text passes through `escape_html` before it lands in
//! `innerHTML`.

#[cfg(test)]
#[path = "markup_test.rs"]
mod markup_test;

/// Escape the five HTML-significant characters.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

/// Spinner block shown while a partial loads.
pub fn loading_markup(message: &str) -> String {
    let message = escape_html(message);
    format!(
        concat!(
            r#"<div class="text-center py-4">"#,
            r#"<div class="spinner-border text-primary" role="status">"#,
            r#"<span class="visually-hidden">{m}</span>"#,
            "</div>",
            r#"<div class="mt-2">{m}</div>"#,
            "</div>"
        ),
        m = message
    )
}

/// Inline alert replacing a partial that failed to load.
///
/// Marked `alert-permanent` so a later widget scan never auto-hides it.
pub fn load_error_markup(reason: &str) -> String {
    format!(
        r#"<div class="alert alert-danger alert-permanent"><i class="bi bi-exclamation-triangle"></i> Error loading data: {}</div>"#,
        escape_html(reason)
    )
}

/// Submit-button label while a request is in flight.
pub fn busy_markup(label: &str) -> String {
    format!(r#"<i class="bi bi-arrow-clockwise spinner-border-sm"></i> {}"#, escape_html(label))
}
