//! Main App Component

use bubble_core::MarkdownOptions;
use leptos::prelude::*;
use leptos_router::{components::*, path};

use crate::components::BubbleKeyframes;
use crate::pages::ChatPage;

/// Root application component
#[component]
pub fn App() -> impl IntoView {
    provide_context(MarkdownOptions::gfm());

    view! {
        <BubbleKeyframes />
        <Router>
            <main class="app">
                <Routes fallback=|| view! { <p>"Page not found"</p> }>
                    <Route path=path!("/") view=ChatPage />
                    <Route path=path!("/chat") view=ChatPage />
                </Routes>
            </main>
        </Router>
    }
}
