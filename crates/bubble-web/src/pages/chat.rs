//! Chat Page

use bubble_core::{ChatThread, Message};
use leptos::prelude::*;

use crate::api;
use crate::components::MessageBubble;

#[component]
pub fn ChatPage() -> impl IntoView {
    let (messages, set_messages) = signal(Vec::<Message>::new());
    let (threads, set_threads) = signal(Vec::<ChatThread>::new());
    let (chat_id, set_chat_id) = signal(api::new_chat_id());
    let (input, set_input) = signal(String::new());
    let (loading, set_loading) = signal(false);
    let (session, set_session) = signal(None::<api::Session>);
    let (username, set_username) = signal(String::new());
    let (password, set_password) = signal(String::new());
    let (auth_error, set_auth_error) = signal(None::<String>);

    let push = move |msg: Message| set_messages.update(|msgs| msgs.push(msg));

    let load_history = move || {
        let Some(token) = session.get_untracked().map(|s| s.access_token) else {
            return;
        };
        leptos::task::spawn_local(async move {
            match api::fetch_history(&token).await {
                Ok(list) => set_threads.set(list),
                Err(e) => push(Message::error(e)),
            }
        });
    };

    let login = move |_| {
        let (user, pass) = (username.get(), password.get());
        leptos::task::spawn_local(async move {
            match api::login(&user, &pass).await {
                Ok(s) => {
                    set_auth_error.set(None);
                    set_password.set(String::new());
                    set_session.set(Some(s));
                    load_history();
                }
                Err(e) => set_auth_error.set(Some(e)),
            }
        });
    };

    let new_chat = move |_| {
        set_messages.set(Vec::new());
        set_chat_id.set(api::new_chat_id());
    };

    let open_thread = move |thread: ChatThread| {
        set_chat_id.set(thread.chat_id);
        set_messages.set(thread.messages);
    };

    let send = move |()| {
        let msg = input.get();
        if msg.trim().is_empty() || loading.get() {
            return;
        }
        let Some(token) = session.get().map(|s| s.access_token) else {
            push(Message::error("Sign in to start chatting."));
            return;
        };

        push(Message::user(msg.clone()));
        set_input.set(String::new());
        set_loading.set(true);

        let id = chat_id.get();
        leptos::task::spawn_local(async move {
            let reply = api::send_message(&token, &id, &msg)
                .await
                .unwrap_or_else(Message::error);
            set_messages.update(|msgs| {
                if !accept_reply(&chat_id.get_untracked(), &id, msgs, reply) {
                    leptos::logging::warn!("dropping reply for {id}: conversation changed");
                }
            });
            set_loading.set(false);
        });
    };

    view! {
        <div class="chat">
            <aside class="sidebar">
                <Show
                    when=move || session.get().is_some()
                    fallback=move || view! {
                        <h2>"Sign in"</h2>
                        <div class="field">
                            <label>"Username"</label>
                            <input
                                type="text"
                                prop:value=move || username.get()
                                on:input=move |ev| set_username.set(event_target_value(&ev))
                            />
                        </div>
                        <div class="field">
                            <label>"Password"</label>
                            <input
                                type="password"
                                prop:value=move || password.get()
                                on:input=move |ev| set_password.set(event_target_value(&ev))
                            />
                        </div>
                        <button class="btn btn-primary" on:click=login>"Sign in"</button>
                        {move || auth_error.get().map(|e| view! { <p class="error">{e}</p> })}
                    }
                >
                    <p class="signed-in">
                        "Signed in as "
                        {move || session.get().map(|s| s.username).unwrap_or_default()}
                    </p>
                    <button class="btn" on:click=new_chat>"New chat"</button>
                    <button class="btn" on:click=move |_| load_history()>"Refresh"</button>
                    <ul class="threads">
                        <For
                            each=move || threads.get()
                            key=|thread| thread.chat_id.clone()
                            children=move |thread| {
                                let label = thread.messages.first()
                                    .map_or_else(|| thread.chat_id.clone(), |m| m.text.chars().take(40).collect());
                                view! {
                                    <li on:click=move |_| open_thread(thread.clone())>{label}</li>
                                }
                            }
                        />
                    </ul>
                </Show>
            </aside>

            <main class="chat-main">
                <div class="messages flex flex-col gap-3">
                    <For
                        each=move || keyed_transcript(&chat_id.get(), messages.get())
                        key=|(key, _)| key.clone()
                        children=move |(_, msg)| view! { <MessageBubble message=msg /> }
                    />
                    <Show when=move || loading.get()>
                        <div class="flex justify-start">
                            <div class="message loading">"..."</div>
                        </div>
                    </Show>
                </div>

                <div class="input-area">
                    <textarea
                        placeholder="Ask anything..."
                        prop:value=move || input.get()
                        on:input=move |ev| set_input.set(event_target_value(&ev))
                        on:keydown=move |ev| {
                            if ev.key() == "Enter" && !ev.shift_key() {
                                ev.prevent_default();
                                send(());
                            }
                        }
                    />
                    <button on:click=move |_| send(()) disabled=move || loading.get()>
                        {move || if loading.get() { "..." } else { "Send" }}
                    </button>
                </div>
            </main>
        </div>
    }
}

/// Identity of a mounted bubble: conversation, position and content.
/// Switching threads changes every key, so no bubble is reused across
/// conversations.
type BubbleKey = (String, usize, Message);

fn keyed_transcript(chat_id: &str, messages: Vec<Message>) -> Vec<(BubbleKey, Message)> {
    messages
        .into_iter()
        .enumerate()
        .map(|(index, msg)| ((chat_id.to_string(), index, msg.clone()), msg))
        .collect()
}

/// Append a reply only while its conversation is still the one on screen
fn accept_reply(
    current_chat: &str,
    sent_for: &str,
    transcript: &mut Vec<Message>,
    reply: Message,
) -> bool {
    if current_chat != sent_for {
        return false;
    }
    transcript.push(reply);
    true
}
