pub mod chat_search;
