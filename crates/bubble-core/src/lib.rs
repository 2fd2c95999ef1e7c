//! # bubble-core
//!
//! Rendering of chat message bubbles.
//!
//! ## Architecture
//!
//! ```text
//! ┌───────────┐     ┌──────────────────────────────┐     ┌─────────────┐
//! │  Message  │────▶│  Bubble::render               │────▶│  markup     │
//! │ from/text │     │  user  → verbatim, right      │     │ (Leptos or  │
//! └───────────┘     │  other → Markdown (GFM), left │     │  to_html)   │
//!                   └──────────────────────────────┘     └─────────────┘
//! ```
//!
//! Rendering is pure and infallible. The frontend mounts the result as a
//! Leptos view; the server serializes it with [`Bubble::to_html`].

pub mod animation;
pub mod bubble;
pub mod error;
pub mod markdown;
pub mod message;

pub use animation::EnterTransition;
pub use bubble::{Alignment, Bubble, BubbleBody, BubbleVariant, render_transcript};
pub use error::{BubbleError, Result};
pub use markdown::{MarkdownOptions, render_markdown};
pub use message::{ChatThread, HistoryEntry, Message};
