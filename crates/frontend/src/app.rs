use crate::shared::api_utils::ChatApiConfig;
use crate::usecases::property_chat::QueryView;
use leptos::prelude::*;

#[component]
pub fn App() -> impl IntoView {
    // Адрес бэкенда определяется один раз здесь и передаётся вниз через
    // context, чтобы view не знал хоста.
    provide_context(ChatApiConfig::from_window());

    view! {
        <QueryView />
    }
}
