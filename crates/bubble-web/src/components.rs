//! UI Components

use bubble_core::{Bubble, BubbleBody, EnterTransition, MarkdownOptions, Message};
use leptos::prelude::*;

/// Message bubble component
///
/// User text is mounted as a text node; anything else is Markdown
/// rendered to sanitized HTML. Fades and slides in on mount.
#[component]
pub fn MessageBubble(message: Message) -> impl IntoView {
    let options = use_context::<MarkdownOptions>().unwrap_or_default();
    let bubble = Bubble::render(&message, &options);
    let body_class = bubble.variant.body_class();

    let body = match bubble.body {
        BubbleBody::Plain(text) => view! { <div class=body_class>{text}</div> }.into_any(),
        BubbleBody::Html(html) => view! { <div class=body_class inner_html=html></div> }.into_any(),
    };

    view! {
        <div class=bubble.variant.row_class() style=bubble.transition.inline_style()>
            {body}
        </div>
    }
}

/// Keyframes used by every bubble's entrance transition
#[component]
pub fn BubbleKeyframes() -> impl IntoView {
    view! { <style>{EnterTransition::default().keyframes_css()}</style> }
}
