//! Markdown Rendering
//!
//! Bot text is rendered to HTML with pulldown-cmark plus the
//! GitHub-flavored extensions. The event stream is post-processed so the
//! output is safe to inject into the page:
//!
//! - raw HTML is escaped and shown as text, never interpreted
//! - link and image destinations with unsafe protocols are blanked
//! - bare URLs and e-mail addresses become links (GFM autolink literals)

use std::collections::VecDeque;
use std::sync::LazyLock;

use pulldown_cmark::{
    CowStr, Event, LinkType, Options, Parser, Tag, TagEnd, TextMergeStream, html,
};
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::error::{BubbleError, Result};

/// Protocols allowed in link and image destinations
const SAFE_PROTOCOLS: &[&str] = &["http", "https", "mailto", "irc", "ircs", "xmpp"];

static AUTOLINK: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)(?:https?://|www\.)[^\s<]+|[a-z0-9._+-]+@[a-z0-9-]+(?:\.[a-z0-9-]+)+")
        .expect("autolink pattern is valid")
});

/// Which Markdown extensions are enabled
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
#[allow(clippy::struct_excessive_bools)]
pub struct MarkdownOptions {
    pub tables: bool,
    pub strikethrough: bool,
    pub autolink: bool,
    pub tasklists: bool,
    pub footnotes: bool,
}

impl Default for MarkdownOptions {
    fn default() -> Self {
        Self::gfm()
    }
}

impl MarkdownOptions {
    /// Every GitHub-flavored extension enabled
    pub const fn gfm() -> Self {
        Self {
            tables: true,
            strikethrough: true,
            autolink: true,
            tasklists: true,
            footnotes: true,
        }
    }

    /// Plain CommonMark, no extensions
    pub const fn commonmark() -> Self {
        Self {
            tables: false,
            strikethrough: false,
            autolink: false,
            tasklists: false,
            footnotes: false,
        }
    }

    /// Parse a comma-separated extension list such as `tables,strikethrough`.
    ///
    /// `gfm` (or `all`) enables everything and `none` disables everything.
    pub fn from_extension_list(list: &str) -> Result<Self> {
        let names: Vec<String> = list
            .split(',')
            .map(|name| name.trim().to_ascii_lowercase())
            .filter(|name| !name.is_empty())
            .collect();

        if names.is_empty() {
            return Err(BubbleError::Config(
                "no markdown extensions listed (use `none` to disable all)".into(),
            ));
        }

        let mut options = Self::commonmark();
        for name in &names {
            match name.as_str() {
                "none" => {}
                "gfm" | "all" => options = Self::gfm(),
                "tables" | "table" => options.tables = true,
                "strikethrough" => options.strikethrough = true,
                "autolink" | "autolinks" => options.autolink = true,
                "tasklists" | "tasklist" => options.tasklists = true,
                "footnotes" | "footnote" => options.footnotes = true,
                other => {
                    return Err(BubbleError::Config(format!(
                        "unknown markdown extension: {other}"
                    )));
                }
            }
        }
        Ok(options)
    }

    fn parser_options(self) -> Options {
        let mut options = Options::empty();
        if self.tables {
            options.insert(Options::ENABLE_TABLES);
        }
        if self.strikethrough {
            options.insert(Options::ENABLE_STRIKETHROUGH);
        }
        if self.tasklists {
            options.insert(Options::ENABLE_TASKLISTS);
        }
        if self.footnotes {
            options.insert(Options::ENABLE_FOOTNOTES);
        }
        options
    }
}

/// Render Markdown text to an HTML fragment.
///
/// Never fails: malformed input degrades to whatever the parser makes of it.
pub fn render_markdown(text: &str, options: &MarkdownOptions) -> String {
    let parser = TextMergeStream::new(Parser::new_ext(text, options.parser_options()));

    let mut out = String::with_capacity(text.len() * 3 / 2);
    html::push_html(&mut out, SafeEvents::new(parser, options.autolink));
    out
}

/// Blank out destinations whose protocol is not in the safe list.
///
/// Relative URLs, fragments and queries pass through untouched. A colon
/// only counts as a protocol separator when it comes before any `/`, `?`
/// or `#`.
pub fn sanitize_url(url: &str) -> &str {
    let Some(colon) = url.find(':') else {
        return url;
    };

    let before_colon = |c: char| url.find(c).is_some_and(|pos| pos < colon);
    if before_colon('/') || before_colon('?') || before_colon('#') {
        return url;
    }

    let protocol = &url[..colon];
    if SAFE_PROTOCOLS
        .iter()
        .any(|safe| safe.eq_ignore_ascii_case(protocol))
    {
        url
    } else {
        ""
    }
}

/// Event adapter that escapes raw HTML, sanitizes destinations and
/// expands autolink literals.
struct SafeEvents<'a, I> {
    inner: I,
    autolink: bool,
    link_depth: usize,
    in_code_block: bool,
    pending: VecDeque<Event<'a>>,
}

impl<'a, I> SafeEvents<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    fn new(inner: I, autolink: bool) -> Self {
        Self {
            inner,
            autolink,
            link_depth: 0,
            in_code_block: false,
            pending: VecDeque::new(),
        }
    }

    fn map_event(&mut self, event: Event<'a>) -> Option<Event<'a>> {
        let event = match event {
            Event::Start(Tag::HtmlBlock) => Event::Start(Tag::Paragraph),
            Event::End(TagEnd::HtmlBlock) => Event::End(TagEnd::Paragraph),
            Event::Html(raw) | Event::InlineHtml(raw) => Event::Text(raw),

            Event::Start(Tag::Link { link_type, dest_url, title, id }) => {
                self.link_depth += 1;
                Event::Start(Tag::Link {
                    link_type,
                    dest_url: sanitize_dest(dest_url),
                    title,
                    id,
                })
            }
            Event::Start(Tag::Image { link_type, dest_url, title, id }) => {
                self.link_depth += 1;
                Event::Start(Tag::Image {
                    link_type,
                    dest_url: sanitize_dest(dest_url),
                    title,
                    id,
                })
            }
            Event::End(end @ (TagEnd::Link | TagEnd::Image)) => {
                self.link_depth = self.link_depth.saturating_sub(1);
                Event::End(end)
            }

            Event::Start(tag @ Tag::CodeBlock(_)) => {
                self.in_code_block = true;
                Event::Start(tag)
            }
            Event::End(TagEnd::CodeBlock) => {
                self.in_code_block = false;
                Event::End(TagEnd::CodeBlock)
            }

            Event::Text(text)
                if self.autolink && self.link_depth == 0 && !self.in_code_block =>
            {
                let mut expanded = expand_autolinks(text);
                let first = expanded.pop_front()?;
                self.pending.extend(expanded);
                first
            }

            other => other,
        };
        Some(event)
    }
}

impl<'a, I> Iterator for SafeEvents<'a, I>
where
    I: Iterator<Item = Event<'a>>,
{
    type Item = Event<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        if let Some(event) = self.pending.pop_front() {
            return Some(event);
        }
        loop {
            let event = self.inner.next()?;
            if let Some(mapped) = self.map_event(event) {
                return Some(mapped);
            }
        }
    }
}

fn sanitize_dest(dest: CowStr<'_>) -> CowStr<'_> {
    let safe = sanitize_url(&dest);
    if safe.len() == dest.len() {
        dest
    } else {
        CowStr::Borrowed("")
    }
}

/// Split a text run into plain text and autolink events.
fn expand_autolinks(text: CowStr<'_>) -> VecDeque<Event<'_>> {
    let mut events = VecDeque::new();
    let mut cursor = 0;

    for found in AUTOLINK.find_iter(&text) {
        let start = found.start();
        let candidate = trim_link_end(found.as_str());
        if !starts_at_boundary(&text, start, candidate) {
            continue;
        }
        let Some(href) = autolink_href(candidate) else {
            continue;
        };

        if start > cursor {
            events.push_back(Event::Text(text[cursor..start].to_string().into()));
        }
        events.push_back(Event::Start(Tag::Link {
            link_type: LinkType::Autolink,
            dest_url: href.into(),
            title: CowStr::Borrowed(""),
            id: CowStr::Borrowed(""),
        }));
        events.push_back(Event::Text(candidate.to_string().into()));
        events.push_back(Event::End(TagEnd::Link));
        cursor = start + candidate.len();
    }

    if cursor == 0 {
        events.push_back(Event::Text(text));
    } else if cursor < text.len() {
        events.push_back(Event::Text(text[cursor..].to_string().into()));
    }
    events
}

/// Drop trailing punctuation and unbalanced closing parentheses.
///
/// Linear in the candidate length: parentheses are counted once and the
/// closing count is decremented as they are trimmed.
fn trim_link_end(candidate: &str) -> &str {
    let opens = candidate.matches('(').count();
    let mut closes = candidate.matches(')').count();
    let mut end = candidate.len();

    while let Some(last) = candidate[..end].chars().next_back() {
        let trailing_punct = matches!(
            last,
            '?' | '!' | '.' | ',' | ':' | ';' | '*' | '_' | '~' | '\'' | '"'
        );
        let unbalanced_paren = last == ')' && closes > opens;

        if trailing_punct || unbalanced_paren {
            if last == ')' {
                closes -= 1;
            }
            end -= last.len_utf8();
        } else {
            break;
        }
    }
    &candidate[..end]
}

/// A literal autolink may only start at a word boundary. `www.` links are
/// stricter: start of text, whitespace, or one of `*`, `_`, `~`, `(`.
fn starts_at_boundary(text: &str, start: usize, candidate: &str) -> bool {
    let Some(prev) = text[..start].chars().next_back() else {
        return true;
    };
    if candidate.get(..4).is_some_and(|p| p.eq_ignore_ascii_case("www.")) {
        prev.is_whitespace() || matches!(prev, '*' | '_' | '~' | '(')
    } else {
        !prev.is_alphanumeric()
    }
}

/// Link target for a trimmed candidate, or `None` when nothing is left
/// after the scheme.
fn autolink_href(candidate: &str) -> Option<String> {
    let lower = candidate.to_ascii_lowercase();

    for scheme in ["https://", "http://"] {
        if lower.starts_with(scheme) {
            return (candidate.len() > scheme.len()).then(|| candidate.to_string());
        }
    }
    if lower.starts_with("www.") {
        return (candidate.len() > 4).then(|| format!("http://{candidate}"));
    }
    candidate
        .contains('@')
        .then(|| format!("mailto:{candidate}"))
}
