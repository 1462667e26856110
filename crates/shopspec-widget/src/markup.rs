use regex::Regex;
use std::sync::OnceLock;

/// Piece of a rendered message
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Segment {
    Text(String),
    Link { text: String, url: String },
}

impl Segment {
    pub fn is_link(&self) -> bool {
        matches!(self, Segment::Link { .. })
    }

    /// Visible text of the segment
    pub fn text(&self) -> &str {
        match self {
            Segment::Text(text) => text,
            Segment::Link { text, .. } => text,
        }
    }
}

fn link_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| Regex::new(r"\[([^\]]+)\]\(([^)]+)\)").expect("valid link pattern"))
}

/// Only absolute web links are made clickable
fn is_safe_url(url: &str) -> bool {
    let lower = url.trim().to_ascii_lowercase();
    lower.starts_with("https://") || lower.starts_with("http://")
}

fn push_text(segments: &mut Vec<Segment>, text: &str) {
    if text.is_empty() {
        return;
    }
    match segments.last_mut() {
        Some(Segment::Text(existing)) => existing.push_str(text),
        _ => segments.push(Segment::Text(text.to_string())),
    }
}

/// Split assistant text into plain text and `[text](url)` links
///
/// Links with a scheme other than http(s) are kept as their literal markup.
pub fn parse_links(content: &str) -> Vec<Segment> {
    let mut segments = Vec::new();
    let mut cursor = 0;

    for captures in link_pattern().captures_iter(content) {
        let (Some(whole), Some(text), Some(url)) = (captures.get(0), captures.get(1), captures.get(2))
        else {
            continue;
        };

        push_text(&mut segments, &content[cursor..whole.start()]);
        if is_safe_url(url.as_str()) {
            segments.push(Segment::Link {
                text: text.as_str().to_string(),
                url: url.as_str().trim().to_string(),
            });
        } else {
            log::warn!("ShopSpec: not linking unsupported URL: {}", url.as_str());
            push_text(&mut segments, whole.as_str());
        }
        cursor = whole.end();
    }

    push_text(&mut segments, &content[cursor..]);
    segments
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn link(text: &str, url: &str) -> Segment {
        Segment::Link {
            text: text.to_string(),
            url: url.to_string(),
        }
    }

    #[test]
    fn test_plain_text() {
        assert_eq!(parse_links("no links here"), vec![Segment::Text("no links here".into())]);
    }

    #[test]
    fn test_empty() {
        assert!(parse_links("").is_empty());
    }

    #[test]
    fn test_single_link() {
        assert_eq!(
            parse_links("See [these shoes](https://shop.example/p/1)"),
            vec![
                Segment::Text("See ".into()),
                link("these shoes", "https://shop.example/p/1"),
            ]
        );
    }

    #[test]
    fn test_multiple_links_with_text_between() {
        let segments = parse_links("[A](https://s.example/a), or [B](http://s.example/b).");
        assert_eq!(
            segments,
            vec![
                link("A", "https://s.example/a"),
                Segment::Text(", or ".into()),
                link("B", "http://s.example/b"),
                Segment::Text(".".into()),
            ]
        );
    }

    #[test]
    fn test_script_url_stays_text() {
        let segments = parse_links("click [here](javascript:alert(1)) now");
        assert!(segments.iter().all(|s| !s.is_link()));
        let joined: String = segments.iter().map(Segment::text).collect();
        assert_eq!(joined, "click [here](javascript:alert(1)) now");
    }

    #[test]
    fn test_markup_in_text_is_not_interpreted() {
        let segments = parse_links("<b>bold</b> [x](https://s.example/<img>)");
        assert_eq!(segments[0], Segment::Text("<b>bold</b> ".into()));
        assert_eq!(segments[1], link("x", "https://s.example/<img>"));
    }

    #[test]
    fn test_incomplete_markup() {
        assert_eq!(
            parse_links("[broken](https://s.example"),
            vec![Segment::Text("[broken](https://s.example".into())]
        );
    }
}
