pub mod command;
pub mod events;
pub mod handler;
pub mod message;
pub mod reply;
