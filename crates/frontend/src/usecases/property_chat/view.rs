use super::api;
use super::state::create_state;
use crate::shared::api_utils::ChatApiConfig;
use contracts::chat::{ChatResponse, Listing};
use leptos::prelude::*;
use wasm_bindgen_futures::spawn_local;

/// Страница свободного запроса: поле ввода, кнопка и ответ бота с карточками.
#[component]
pub fn QueryView() -> impl IntoView {
    let config = use_context::<ChatApiConfig>().expect("ChatApiConfig not found in context");
    let state = create_state();

    let send = move || {
        let message = state.get_untracked().query_text;
        let mut seq = 0;
        state.update(|s| seq = s.begin_request());

        let url = config.chat_url();
        spawn_local(async move {
            let outcome = api::send_message(&url, &message).await;
            state.update(|s| s.finish_request(seq, outcome));
        });
    };

    view! {
        <div class="chat-page">
            <h1>"🏠 NoBrokerage Chat"</h1>
            <div class="chat-page__controls">
                <input
                    class="chat-page__input"
                    type="text"
                    placeholder="Ask e.g., 3BHK in Pune under 1.2 Cr"
                    prop:value=move || state.get().query_text
                    on:input=move |ev| state.update(|s| s.set_query(event_target_value(&ev)))
                />
                <button class="chat-page__send" on:click=move |_| send()>
                    "Send"
                </button>
            </div>

            {move || {
                state
                    .get()
                    .in_flight
                    .then(|| view! { <p class="chat-page__pending">"Searching..."</p> })
            }}
            {move || {
                state
                    .get()
                    .error
                    .map(|e| view! { <p class="chat-page__error">{e}</p> })
            }}
            {move || {
                state
                    .get()
                    .response
                    .map(|response| view! { <BotResponse response=response /> })
            }}
        </div>
    }
}

/// Ответ бэкенда: текст и карточки в порядке выдачи.
///
/// Идентичность карточки — только её позиция в списке, стабильных ключей нет.
#[component]
fn BotResponse(response: ChatResponse) -> impl IntoView {
    let cards = response.results.unwrap_or_default();

    view! {
        <div class="chat-page__response">
            <h3>"Bot Response:"</h3>
            {response.message.map(|m| view! { <p class="chat-page__message">{m}</p> })}
            {cards
                .into_iter()
                .map(|listing| view! { <ListingCard listing=listing /> })
                .collect_view()}
        </div>
    }
}

#[component]
fn ListingCard(listing: Listing) -> impl IntoView {
    view! {
        <div class="listing-card">
            <h4>{listing.project_name}</h4>
            <p>"BHK: " {listing.bhk}</p>
            <p>"City: " {listing.city}</p>
            <p>"Price: " {listing.price}</p>
            <p>"Status: " {listing.status}</p>
            <p>"Amenities: " {listing.amenities}</p>
        </div>
    }
}
