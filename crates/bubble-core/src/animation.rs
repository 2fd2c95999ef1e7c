//! Entrance Transition
//!
//! Bubbles fade in and slide up when mounted. The transition is plain CSS:
//! one `@keyframes` rule injected once per page plus an inline
//! `animation` declaration on each bubble row.

use serde::{Deserialize, Serialize};

/// Name of the keyframes rule
pub const KEYFRAMES_NAME: &str = "bubble-enter";

/// Fade/slide-in applied when a bubble mounts
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct EnterTransition {
    /// Starting opacity (ends at 1)
    pub opacity_from: f32,

    /// Starting vertical offset in pixels (ends at 0)
    pub offset_y_px: i32,

    /// Duration in milliseconds
    pub duration_ms: u32,
}

impl Default for EnterTransition {
    fn default() -> Self {
        Self {
            opacity_from: 0.0,
            offset_y_px: 8,
            duration_ms: 250,
        }
    }
}

impl EnterTransition {
    /// The `@keyframes` rule this transition animates with
    pub fn keyframes_css(&self) -> String {
        format!(
            "@keyframes {KEYFRAMES_NAME} {{ \
             from {{ opacity: {}; transform: translateY({}px); }} \
             to {{ opacity: 1; transform: translateY(0); }} }}",
            self.opacity_from, self.offset_y_px,
        )
    }

    /// Inline `style` value for the bubble row
    pub fn inline_style(&self) -> String {
        format!(
            "animation: {KEYFRAMES_NAME} {}ms ease-out both;",
            self.duration_ms
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_transition() {
        let transition = EnterTransition::default();
        assert_eq!(transition.inline_style(), "animation: bubble-enter 250ms ease-out both;");

        let css = transition.keyframes_css();
        assert!(css.starts_with("@keyframes bubble-enter {"));
        assert!(css.contains("from { opacity: 0; transform: translateY(8px); }"));
        assert!(css.contains("to { opacity: 1; transform: translateY(0); }"));
    }
}
