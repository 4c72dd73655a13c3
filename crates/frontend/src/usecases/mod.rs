pub mod property_chat;
