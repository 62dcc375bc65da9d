//! Inline emoji substitution for already-escaped note text.

const ZWJ: char = '\u{200D}';
const VS16: char = '\u{FE0F}';
const KEYCAP: char = '\u{20E3}';

/// Common shortcodes and the emoji they stand for.
const SHORTCODES: &[(&str, &str)] = &[
    ("+1", "👍"),
    ("-1", "👎"),
    ("100", "💯"),
    ("blush", "😊"),
    ("broken_heart", "💔"),
    ("cat", "🐱"),
    ("clap", "👏"),
    ("coffee", "☕"),
    ("cry", "😢"),
    ("dog", "🐶"),
    ("eyes", "👀"),
    ("fire", "🔥"),
    ("grin", "😁"),
    ("grinning", "😀"),
    ("heart", "❤️"),
    ("heart_eyes", "😍"),
    ("joy", "😂"),
    ("laughing", "😆"),
    ("ok_hand", "👌"),
    ("pensive", "😔"),
    ("pray", "🙏"),
    ("rage", "😡"),
    ("rocket", "🚀"),
    ("scream", "😱"),
    ("slightly_smiling_face", "🙂"),
    ("smile", "😄"),
    ("smiley", "😃"),
    ("sob", "😭"),
    ("sparkles", "✨"),
    ("star", "⭐"),
    ("sunglasses", "😎"),
    ("tada", "🎉"),
    ("thinking", "🤔"),
    ("thumbsdown", "👎"),
    ("thumbsup", "👍"),
    ("warning", "⚠️"),
    ("wave", "👋"),
    ("white_check_mark", "✅"),
    ("wink", "😉"),
    ("x", "❌"),
];

fn unicode_for(shortcode: &str) -> Option<&'static str> {
    SHORTCODES
        .iter()
        .find(|(code, _)| *code == shortcode)
        .map(|(_, emoji)| *emoji)
}

fn shortcode_for(emoji: &str) -> Option<&'static str> {
    let bare: String = emoji.chars().filter(|c| *c != VS16).collect();
    SHORTCODES
        .iter()
        .find(|(_, e)| e.chars().filter(|c| *c != VS16).eq(bare.chars()))
        .map(|(code, _)| *code)
}

fn is_regional_indicator(c: char) -> bool {
    ('\u{1F1E6}'..='\u{1F1FF}').contains(&c)
}

fn is_skin_tone(c: char) -> bool {
    ('\u{1F3FB}'..='\u{1F3FF}').contains(&c)
}

fn is_tag(c: char) -> bool {
    ('\u{E0020}'..='\u{E007F}').contains(&c)
}

/// Pictographic code points that start an emoji on their own.
///
/// ©, ® and ™ are left alone: they are far more often plain typography.
fn is_pictograph(c: char) -> bool {
    matches!(c as u32,
        0x1F000..=0x1F0FF
        | 0x1F18E
        | 0x1F191..=0x1F19A
        | 0x1F200..=0x1F2FF
        | 0x1F300..=0x1F5FF
        | 0x1F600..=0x1F64F
        | 0x1F680..=0x1F6FF
        | 0x1F7E0..=0x1F7EB
        | 0x1F900..=0x1F9FF
        | 0x1FA70..=0x1FAFF
        | 0x203C | 0x2049
        | 0x2139
        | 0x2194..=0x2199 | 0x21A9 | 0x21AA
        | 0x231A | 0x231B | 0x2328 | 0x23CF | 0x23E9..=0x23F3 | 0x23F8..=0x23FA
        | 0x24C2
        | 0x25AA | 0x25AB | 0x25B6 | 0x25C0 | 0x25FB..=0x25FE
        | 0x2600..=0x27BF
        | 0x2934 | 0x2935
        | 0x2B05..=0x2B07 | 0x2B1B | 0x2B1C | 0x2B50 | 0x2B55
        | 0x3030 | 0x303D | 0x3297 | 0x3299
    )
}

/// Length in chars of the emoji sequence at the start of `chars`, if any.
fn sequence_len(chars: &[char]) -> Option<usize> {
    let first = *chars.first()?;

    if is_regional_indicator(first) {
        return match chars.get(1) {
            Some(c) if is_regional_indicator(*c) => Some(2),
            _ => None,
        };
    }

    // Keycaps: 1️⃣, #️⃣ ...
    if first.is_ascii_digit() || first == '#' || first == '*' {
        return match (chars.get(1), chars.get(2)) {
            (Some(&VS16), Some(&KEYCAP)) => Some(3),
            (Some(&KEYCAP), _) => Some(2),
            _ => None,
        };
    }

    if !is_pictograph(first) {
        return None;
    }

    let mut len = 1;
    loop {
        match chars.get(len) {
            Some(&c) if c == VS16 || is_skin_tone(c) || is_tag(c) => len += 1,
            Some(&ZWJ) => match chars.get(len + 1) {
                Some(&next) if is_pictograph(next) => len += 2,
                _ => break,
            },
            _ => break,
        }
    }
    Some(len)
}

/// Image file name for an emoji, e.g. `1f468-200d-1f469` or `2764`.
///
/// VS16 only matters inside ZWJ sequences; elsewhere the plain code point is used.
pub(crate) fn filename(emoji: &str) -> String {
    let keep_vs16 = emoji.contains(ZWJ);
    emoji
        .chars()
        .filter(|c| keep_vs16 || *c != VS16)
        .map(|c| format!("{:x}", c as u32))
        .collect::<Vec<_>>()
        .join("-")
}

fn push_img(out: &mut String, emoji: &str, base_url: &str) {
    out.push_str(r#"<img draggable="false" class="emojione" alt=""#);
    out.push_str(emoji);
    out.push('"');
    if let Some(code) = shortcode_for(emoji) {
        out.push_str(&format!(r#" title=":{code}:""#));
    }
    out.push_str(&format!(
        r#" src="{}/{}.svg" />"#,
        base_url.trim_end_matches('/'),
        filename(emoji)
    ));
}

fn shortcode_at(chars: &[char]) -> Option<(usize, &'static str)> {
    // chars[0] is ':'
    let end = chars
        .iter()
        .skip(1)
        .take_while(|c| c.is_ascii_alphanumeric() || matches!(c, '_' | '+' | '-'))
        .count()
        + 1;

    if end < 2 || chars.get(end) != Some(&':') {
        return None;
    }

    let code: String = chars[1..end].iter().collect();
    unicode_for(&code).map(|emoji| (end + 1, emoji))
}

/// Replace emoji characters and known `:shortcodes:` with `<img>` tags.
///
/// `text` must already be HTML-escaped.
pub fn emojify(text: &str, base_url: &str) -> String {
    let chars: Vec<char> = text.chars().collect();
    let mut out = String::with_capacity(text.len());
    let mut i = 0;

    while i < chars.len() {
        let rest = &chars[i..];

        if rest[0] == ':' {
            if let Some((len, emoji)) = shortcode_at(rest) {
                push_img(&mut out, emoji, base_url);
                i += len;
                continue;
            }
        }

        if let Some(len) = sequence_len(rest) {
            let emoji: String = rest[..len].iter().collect();
            push_img(&mut out, &emoji, base_url);
            i += len;
            continue;
        }

        out.push(rest[0]);
        i += 1;
    }

    out
}
