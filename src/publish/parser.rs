//! Title directive parsing and markup cleanup for text posts
//!
//! Grammar, applied to the message HTML after custom-emoji tags are stripped:
//!
//! ```text
//! post      := directive? body
//! directive := ("title" | "Title" | ...) ":"? WS+ TEXT "\n"     (first line only)
//! body      := ANY
//! ```
//!
//! With the pipe shorthand enabled and no directive present, `body "|" TEXT` is also accepted,
//! split at the last `|`.

use once_cell::sync::Lazy;
use regex::Regex;

use super::nodes::html_to_text;

static TITLE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"(?i)^title:?[ \t]+(.+?)\s*$").expect("title regex"));

/// Pyrogram `<emoji id="1">` and Bot API `<tg-emoji emoji-id="1">`, opening and closing tags.
static EMOJI_TAG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r#"</?(?:tg-)?emoji(?:\s+(?:emoji-)?id="\d+")?\s*>"#).expect("emoji tag regex"));

/// Parser switches.
#[derive(Debug, Clone, Copy, Default)]
pub struct ParseOptions {
    /// Accept `content|TITLE` when no title line is present.
    pub pipe_title: bool,
}

/// Result of [`parse_post`]. `title` is `None` when the caller should fall back to the sender's name.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedPost {
    pub title: Option<String>,
    pub body: String,
}

/// Removes custom-emoji tags but keeps the glyph between them.
pub fn strip_custom_emoji(text: &str) -> String {
    EMOJI_TAG_RE.replace_all(text, "").into_owned()
}

/// Splits an optional title off `text`. Line breaks are left untouched.
pub fn extract_title(text: &str, options: ParseOptions) -> ParsedPost {
    let (first_line, rest) = match text.split_once('\n') {
        Some((first, rest)) => (first, rest),
        None => (text, ""),
    };

    if let Some(caps) = TITLE_RE.captures(first_line.trim_end_matches('\r')) {
        // A blank directive is still consumed, the title then falls back to the sender
        let title = caps[1].trim();
        return ParsedPost {
            title: (!title.is_empty()).then(|| title.to_string()),
            body: rest.to_string(),
        };
    }

    if options.pipe_title {
        if let Some((body, title)) = text.rsplit_once('|') {
            let title = title.trim();
            if !title.is_empty() {
                return ParsedPost {
                    title: Some(title.to_string()),
                    body: body.to_string(),
                };
            }
        }
    }

    ParsedPost {
        title: None,
        body: text.to_string(),
    }
}

/// Every line break becomes an explicit `<br>`.
pub fn line_breaks_to_markup(body: &str) -> String {
    body.replace("\r\n", "\n").replace('\n', "<br>")
}

/// Full pipeline: strip emoji tags, split the title, convert line breaks.
///
/// The title is sent as a plain string, so its markup is dropped and entities are decoded.
pub fn parse_post(text: &str, options: ParseOptions) -> ParsedPost {
    let sanitized = strip_custom_emoji(text);
    let parsed = extract_title(&sanitized, options);
    let title = parsed
        .title
        .map(|title| html_to_text(&title).trim().to_string())
        .filter(|title| !title.is_empty());

    ParsedPost {
        title,
        body: line_breaks_to_markup(&parsed.body),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_title_directive_round_trip() {
        let parsed = extract_title("Title: My Post\nHello\nWorld", ParseOptions::default());
        assert_eq!(parsed.title.as_deref(), Some("My Post"));
        assert_eq!(parsed.body.lines().collect::<Vec<_>>(), vec!["Hello", "World"]);

        let post = parse_post("Title: My Post\nHello\nWorld", ParseOptions::default());
        assert_eq!(post.body, "Hello<br>World");
    }

    #[test]
    fn test_title_directive_variants() {
        for text in ["title: A", "TITLE: A", "title A", "Title:   A  "] {
            let parsed = extract_title(text, ParseOptions::default());
            assert_eq!(parsed.title.as_deref(), Some("A"), "input: {:?}", text);
            assert_eq!(parsed.body, "");
        }
    }

    #[test]
    fn test_title_must_be_on_first_line() {
        let parsed = extract_title("Hello\nTitle: Late", ParseOptions::default());
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.body, "Hello\nTitle: Late");
    }

    #[test]
    fn test_words_starting_with_title_are_not_directives() {
        let parsed = extract_title("Titles are hard\nbody", ParseOptions::default());
        assert_eq!(parsed.title, None);
        let parsed = extract_title("Title:\nbody", ParseOptions::default());
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_blank_title_falls_back_to_sender() {
        let parsed = extract_title("Title:   \nbody", ParseOptions::default());
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.body, "body");

        let parsed = extract_title("title \t \r\nbody", ParseOptions::default());
        assert_eq!(parsed.title, None);
        assert_eq!(parsed.body, "body");
    }

    #[test]
    fn test_title_is_plain_text() {
        let post = parse_post("Title: Tom &amp; Jerry\nbody", ParseOptions::default());
        assert_eq!(post.title.as_deref(), Some("Tom & Jerry"));

        let post = parse_post("Title: <b>Bold</b> &lt;move&gt;\nbody", ParseOptions::default());
        assert_eq!(post.title.as_deref(), Some("Bold <move>"));

        let post = parse_post("Body|<i>Piped</i>", ParseOptions { pipe_title: true });
        assert_eq!(post.title.as_deref(), Some("Piped"));
    }

    #[test]
    fn test_title_with_only_markup_falls_back_to_sender() {
        let post = parse_post("Title: <b> </b>\nbody", ParseOptions::default());
        assert_eq!(post.title, None);
        assert_eq!(post.body, "body");
    }

    #[test]
    fn test_crlf_first_line() {
        let post = parse_post("Title: Win\r\nline1\r\nline2", ParseOptions::default());
        assert_eq!(post.title.as_deref(), Some("Win"));
        assert_eq!(post.body, "line1<br>line2");
    }

    #[test]
    fn test_no_directive_keeps_whole_text() {
        let post = parse_post("Hello\nWorld", ParseOptions::default());
        assert_eq!(post.title, None);
        assert_eq!(post.body, "Hello<br>World");
    }

    #[test]
    fn test_pipe_title_only_when_enabled() {
        let disabled = extract_title("Body text|My Title", ParseOptions::default());
        assert_eq!(disabled.title, None);
        assert_eq!(disabled.body, "Body text|My Title");

        let enabled = extract_title("Body text|My Title", ParseOptions { pipe_title: true });
        assert_eq!(enabled.title.as_deref(), Some("My Title"));
        assert_eq!(enabled.body, "Body text");
    }

    #[test]
    fn test_pipe_title_splits_at_last_pipe_and_ignores_empty() {
        let options = ParseOptions { pipe_title: true };
        let parsed = extract_title("a|b|c", options);
        assert_eq!(parsed.title.as_deref(), Some("c"));
        assert_eq!(parsed.body, "a|b");

        let parsed = extract_title("trailing pipe|  ", options);
        assert_eq!(parsed.title, None);
    }

    #[test]
    fn test_directive_wins_over_pipe() {
        let parsed = extract_title("Title: Real\nx|y", ParseOptions { pipe_title: true });
        assert_eq!(parsed.title.as_deref(), Some("Real"));
        assert_eq!(parsed.body, "x|y");
    }

    #[test]
    fn test_strip_custom_emoji_keeps_glyph() {
        let stripped = strip_custom_emoji(r#"Hi <emoji id="123">😀</emoji>!"#);
        assert_eq!(stripped, "Hi 😀!");
        assert!(!stripped.contains("123"));

        let stripped = strip_custom_emoji(r#"<tg-emoji emoji-id="5368324170671202286">👍</tg-emoji> ok"#);
        assert_eq!(stripped, "👍 ok");
    }

    #[test]
    fn test_strip_custom_emoji_leaves_other_markup() {
        let text = r#"<b>bold</b> <a href="https://x">link</a>"#;
        assert_eq!(strip_custom_emoji(text), text);
    }

    #[test]
    fn test_emoji_stripped_before_title_detection() {
        let post = parse_post(r#"Title: <emoji id="1">🔥</emoji> Hot"#, ParseOptions::default());
        assert_eq!(post.title.as_deref(), Some("🔥 Hot"));
    }
}
