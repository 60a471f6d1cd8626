//! Platform size caps and the helpers that enforce them.
//!
//! Limits count characters, not bytes.

/// Maximum length of a plain message.
pub const MESSAGE_LIMIT: usize = 2000;
pub const EMBED_TITLE_LIMIT: usize = 256;
pub const EMBED_DESCRIPTION_LIMIT: usize = 4096;
pub const EMBED_FIELD_NAME_LIMIT: usize = 256;
pub const EMBED_FIELD_VALUE_LIMIT: usize = 1024;
pub const EMBED_FOOTER_LIMIT: usize = 2048;
/// Discord accepts at most 25 fields per embed.
pub const EMBED_MAX_FIELDS: usize = 25;

/// Marker appended to text cut at a limit.
pub const TRUNCATION_SUFFIX: &str = "...(truncated)";

/// Cut `text` to at most `limit` characters, ending in [`TRUNCATION_SUFFIX`].
///
/// Text within the limit is returned unchanged.
#[must_use]
pub fn truncate(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let suffix_len = TRUNCATION_SUFFIX.chars().count();
    if limit <= suffix_len {
        return TRUNCATION_SUFFIX.chars().take(limit).collect();
    }
    let mut out: String = text.chars().take(limit - suffix_len).collect();
    out.push_str(TRUNCATION_SUFFIX);
    out
}

/// Shorten a value for a one-line preview, ending in `...` when cut.
#[must_use]
pub fn ellipsize(text: &str, max_chars: usize) -> String {
    if text.chars().count() <= max_chars {
        return text.to_string();
    }
    let keep = max_chars.saturating_sub(3);
    let mut out: String = text.chars().take(keep).collect();
    out.push_str("...");
    out
}

/// Split `text` into pieces of at most `limit` characters.
///
/// Breaks fall on line boundaries where possible; a single line longer than
/// `limit` is split hard.
#[must_use]
pub fn chunk(text: &str, limit: usize) -> Vec<String> {
    let limit = limit.max(1);
    let mut chunks = Vec::new();
    let mut current = String::new();
    let mut current_len = 0;

    for line in text.split('\n') {
        let line_len = line.chars().count();
        let needed = if current_len == 0 && current.is_empty() {
            line_len
        } else {
            current_len + 1 + line_len
        };
        if needed <= limit {
            if !current.is_empty() || current_len > 0 {
                current.push('\n');
            }
            current.push_str(line);
            current_len = needed;
            continue;
        }

        if !current.is_empty() {
            chunks.push(std::mem::take(&mut current));
        }
        current_len = 0;

        let chars: Vec<char> = line.chars().collect();
        let mut pieces = chars.chunks(limit).peekable();
        while let Some(piece) = pieces.next() {
            let piece: String = piece.iter().collect();
            if pieces.peek().is_some() {
                chunks.push(piece);
            } else {
                current_len = piece.chars().count();
                current = piece;
            }
        }
    }

    if !current.is_empty() {
        chunks.push(current);
    }
    chunks
}
