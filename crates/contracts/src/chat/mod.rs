pub mod dto;

pub use dto::{ChatRequest, ChatResponse, Listing};
