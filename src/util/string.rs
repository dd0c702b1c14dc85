use std::path::PathBuf;

use url::Url;

pub struct StringUtils {}

impl StringUtils {
    pub fn maybe_pluralize((singular, plural) : (&str, &str), qty: usize) -> String {
        format!("{}", if qty == 1 { singular } else { plural })
    }

    pub fn maybe_pluralize_count(count: usize, (singular, plural) : (&str, &str)) -> String {
        format!("{} {}", count, Self::maybe_pluralize((singular, plural), count))
    }

    /// Shorten `text` to at most `max_chars` characters, ending in `…` when cut.
    pub fn truncate_with_ellipsis(text: &str, max_chars: usize) -> String {
        if text.chars().count() <= max_chars {
            return text.to_string();
        }
        if max_chars == 0 {
            return String::new();
        }
        let mut out: String = text.chars().take(max_chars - 1).collect();
        out.push('…');
        out
    }

    /// Terminals paste a dropped file as its path, quoted or with escaped
    /// spaces, sometimes as a `file://` URL. Several dropped files arrive
    /// space separated; only the first one is returned.
    pub fn parse_dropped_path(pasted: &str) -> Option<PathBuf> {
        let text = pasted.trim();
        if text.is_empty() {
            return None;
        }

        let mut chars = text.chars().peekable();
        let mut current = String::new();

        match chars.peek() {
            Some(&quote) if quote == '\'' || quote == '"' => {
                chars.next();
                for ch in chars.by_ref() {
                    if ch == quote {
                        break;
                    }
                    current.push(ch);
                }
            }
            _ => {
                while let Some(ch) = chars.next() {
                    match ch {
                        '\\' => {
                            if let Some(escaped) = chars.next() {
                                current.push(escaped);
                            }
                        }
                        ' ' | '\n' | '\t' => break,
                        _ => current.push(ch),
                    }
                }
            }
        }

        if current.starts_with("file://") {
            return Url::parse(&current).ok()?.to_file_path().ok();
        }

        if current.is_empty() {
            None
        } else {
            Some(PathBuf::from(current))
        }
    }
}
