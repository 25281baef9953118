use crate::job::MarkupMode;
use std::borrow::Cow;

/// Wrap source text in the minimal document handed to the rendering engine.
///
/// The language hint is accepted so callers can pass along what they know about the file,
/// but no highlighting is done with it.
pub fn render(text: &str, _language_hint: &str, mode: MarkupMode) -> String {
    let body: Cow<'_, str> = match mode {
        MarkupMode::Escaped => html_escape::encode_text(text),
        MarkupMode::Verbatim => Cow::Borrowed(text),
    };
    format!("<html><body><pre><code>{body}</code></pre></body></html>")
}
