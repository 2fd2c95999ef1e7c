//! Message Bubble
//!
//! Turns one [`Message`] into a styled bubble. The variant is a pure
//! function of the role identifier: the exact role `"user"` gets the
//! right-aligned user scheme with verbatim text, everything else gets the
//! left-aligned bot scheme with Markdown rendered to HTML.

use pulldown_cmark::{Event, html};
use serde::{Deserialize, Serialize};

use crate::animation::EnterTransition;
use crate::markdown::{MarkdownOptions, render_markdown};
use crate::message::Message;

/// Classes shared by both bubble bodies
pub const BODY_BASE: &str =
    "max-w-lg px-4 py-3 rounded-2xl shadow-sm text-sm leading-relaxed whitespace-pre-wrap";

/// Horizontal placement of a bubble in the transcript
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Alignment {
    /// Left
    Start,
    /// Right
    End,
}

impl Alignment {
    pub const fn justify_class(self) -> &'static str {
        match self {
            Self::Start => "justify-start",
            Self::End => "justify-end",
        }
    }
}

/// Style variant of a bubble
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BubbleVariant {
    User,
    Bot,
}

impl BubbleVariant {
    /// Pick the variant from a role identifier
    pub fn for_sender(from: &str) -> Self {
        if from == crate::message::USER_ROLE {
            Self::User
        } else {
            Self::Bot
        }
    }

    pub const fn alignment(self) -> Alignment {
        match self {
            Self::User => Alignment::End,
            Self::Bot => Alignment::Start,
        }
    }

    /// Classes for the outer row that positions the bubble
    pub const fn row_class(self) -> &'static str {
        match self {
            Self::User => "flex justify-end",
            Self::Bot => "flex justify-start",
        }
    }

    /// Color scheme and corner classes that distinguish the variants
    pub const fn scheme_class(self) -> &'static str {
        match self {
            Self::User => "bg-[#C4DADE] text-[#1F3634] rounded-br-none",
            Self::Bot => "bg-white text-gray-800 rounded-bl-none border border-[#C4DADE]/40",
        }
    }

    /// Classes for the bubble body itself
    pub fn body_class(self) -> String {
        format!("{BODY_BASE} {}", self.scheme_class())
    }
}

/// Rendered bubble content
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "lowercase")]
pub enum BubbleBody {
    /// Verbatim text, to be shown as a text node
    Plain(String),
    /// Sanitized HTML produced from Markdown
    Html(String),
}

impl BubbleBody {
    /// Body as HTML markup; plain text is escaped
    pub fn to_html(&self) -> String {
        match self {
            Self::Plain(text) => {
                let mut out = String::with_capacity(text.len());
                html::push_html(&mut out, std::iter::once(Event::Text(text.as_str().into())));
                out
            }
            Self::Html(markup) => markup.clone(),
        }
    }
}

/// A message ready for display
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bubble {
    pub variant: BubbleVariant,
    pub body: BubbleBody,
    pub transition: EnterTransition,
}

impl Bubble {
    /// Render a message. Reads the message only; never fails.
    pub fn render(message: &Message, options: &MarkdownOptions) -> Self {
        let variant = BubbleVariant::for_sender(&message.from);
        tracing::debug!(from = %message.from, ?variant, bytes = message.text.len(), "Rendering bubble");

        let body = match variant {
            BubbleVariant::User => BubbleBody::Plain(message.text.clone()),
            BubbleVariant::Bot => BubbleBody::Html(render_markdown(&message.text, options)),
        };

        Self {
            variant,
            body,
            transition: EnterTransition::default(),
        }
    }

    pub const fn alignment(&self) -> Alignment {
        self.variant.alignment()
    }

    /// Complete bubble markup: positioning row, animated, around the body
    pub fn to_html(&self) -> String {
        format!(
            r#"<div class="{}" style="{}"><div class="{}">{}</div></div>"#,
            self.variant.row_class(),
            self.transition.inline_style(),
            self.variant.body_class(),
            self.body.to_html(),
        )
    }
}

/// Render a sequence of messages into one transcript container, in order
pub fn render_transcript<'m>(
    messages: impl IntoIterator<Item = &'m Message>,
    options: &MarkdownOptions,
) -> String {
    let mut out = String::from(r#"<div class="flex flex-col gap-3">"#);
    for message in messages {
        out.push_str(&Bubble::render(message, options).to_html());
    }
    out.push_str("</div>");
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn render(message: &Message) -> Bubble {
        Bubble::render(message, &MarkdownOptions::default())
    }

    #[test]
    fn test_user_text_is_verbatim() {
        let bubble = render(&Message::user("**bold**"));
        assert_eq!(bubble.variant, BubbleVariant::User);
        assert_eq!(bubble.body, BubbleBody::Plain("**bold**".into()));

        let html = bubble.to_html();
        assert!(html.contains(">**bold**</div>"));
        assert!(!html.contains("<strong>"));
    }

    #[test]
    fn test_user_markup_is_escaped() {
        let bubble = render(&Message::user("<b>hi</b> & bye"));
        assert_eq!(bubble.body.to_html(), "&lt;b&gt;hi&lt;/b&gt; &amp; bye");
    }

    #[test]
    fn test_bot_text_is_markdown() {
        let bubble = render(&Message::bot("**bold**"));
        assert_eq!(bubble.variant, BubbleVariant::Bot);
        assert!(bubble.to_html().contains("<strong>bold</strong>"));

        let table = render(&Message::bot("| a | b |\n|---|---|\n| 1 | 2 |"));
        assert!(table.body.to_html().contains("<table>"));
    }

    #[test]
    fn test_any_other_role_is_bot() {
        for role in ["bot", "assistant", "error", "User", ""] {
            let bubble = render(&Message::new(role, "**x**"));
            assert_eq!(bubble.variant, BubbleVariant::Bot, "role {role:?}");
            assert_eq!(bubble.alignment(), Alignment::Start);
        }
    }

    #[test]
    fn test_alignment_and_classes() {
        assert_eq!(BubbleVariant::for_sender("user").alignment(), Alignment::End);
        assert_eq!(BubbleVariant::User.row_class(), "flex justify-end");
        assert_eq!(BubbleVariant::Bot.row_class(), "flex justify-start");
        assert_eq!(Alignment::End.justify_class(), "justify-end");

        for variant in [BubbleVariant::User, BubbleVariant::Bot] {
            assert!(variant.body_class().starts_with(BODY_BASE));
            assert!(variant.row_class().ends_with(variant.alignment().justify_class()));
        }
        assert_eq!(
            BubbleVariant::User.body_class(),
            "max-w-lg px-4 py-3 rounded-2xl shadow-sm text-sm leading-relaxed whitespace-pre-wrap \
             bg-[#C4DADE] text-[#1F3634] rounded-br-none"
        );
        assert!(BubbleVariant::User.body_class().contains("rounded-br-none"));
        assert!(BubbleVariant::Bot.body_class().contains("rounded-bl-none"));
    }

    #[test]
    fn test_render_is_idempotent() {
        let message = Message::bot("# Title\n\n- one\n- https://example.com\n");
        let before = message.clone();

        let first = render(&message);
        let second = render(&message);
        assert_eq!(first, second);
        assert_eq!(first.to_html(), second.to_html());
        assert_eq!(message, before);
    }

    #[test]
    fn test_bubble_markup_has_transition() {
        let html = render(&Message::bot("hi")).to_html();
        assert!(html.starts_with(r#"<div class="flex justify-start" style="animation: bubble-enter 250ms"#));
    }

    #[test]
    fn test_transcript_order() {
        let messages = vec![Message::user("first"), Message::bot("second")];
        let html = render_transcript(&messages, &MarkdownOptions::default());

        assert!(html.starts_with(r#"<div class="flex flex-col gap-3">"#));
        let first = html.find("first").unwrap();
        let second = html.find("second").unwrap();
        assert!(first < second);
        assert_eq!(html.matches("bubble-enter").count(), 2);
    }

    #[test]
    fn test_body_serialization() {
        let json = serde_json::to_value(BubbleBody::Plain("x".into())).unwrap();
        assert_eq!(json, serde_json::json!({"kind": "plain", "value": "x"}));
    }
}
