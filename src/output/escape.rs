use std::borrow::Cow;

fn escaped(ch: char) -> Option<&'static str> {
    match ch {
        '&' => Some("&amp;"),
        '<' => Some("&lt;"),
        '>' => Some("&gt;"),
        '"' => Some("&quot;"),
        '\'' => Some("&#x27;"),
        _ => None,
    }
}

/// Escapes the HTML-special characters of `text`, borrowing it if there's nothing to escape.
///
/// This is safe for both element content and double- or single-quoted attribute values.
pub(crate) fn escape_html(text: &str) -> Cow<'_, str> {
    if !text.chars().any(|ch| escaped(ch).is_some()) {
        return Cow::Borrowed(text);
    }
    let mut out = String::with_capacity(text.len() + 8);
    push_escaped(&mut out, text.chars());
    Cow::Owned(out)
}

/// Writes body text: escaped, and with newlines dropped (those are rendered as breaks, separately).
pub(crate) fn push_body_text(out: &mut String, text: &str) {
    push_escaped(out, text.chars().filter(|&ch| ch != '\n'));
}

fn push_escaped(out: &mut String, chars: impl Iterator<Item = char>) {
    for ch in chars {
        match escaped(ch) {
            Some(replacement) => out.push_str(replacement),
            None => out.push(ch),
        }
    }
}
