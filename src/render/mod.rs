mod emoji;

pub use emoji::emojify;

/// Escape text for use as HTML content or a quoted attribute value.
pub fn escape_html(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

/// Turns raw note text into the markup shown in view mode.
#[derive(Clone, Debug)]
pub struct NoteRenderer {
    emoji_base_url: String,
}

impl Default for NoteRenderer {
    fn default() -> Self {
        Self::new("/emoji")
    }
}

impl NoteRenderer {
    pub fn new(emoji_base_url: impl Into<String>) -> Self {
        Self {
            emoji_base_url: emoji_base_url.into(),
        }
    }

    /// Escape, substitute emoji, then make line breaks visible.
    pub fn render(&self, raw: &str) -> String {
        let escaped = escape_html(raw);
        let emojified = emojify(&escaped, &self.emoji_base_url);
        emojified.replace("\r\n", "\n").replace('\n', "<br />")
    }
}
