//! Model to entity mappers
//!
//! - `From<Model> for Entity` where every row maps cleanly
//! - `TryFrom<Model> for Entity` where the row carries a checked value

mod chat;
mod nick;
mod role_assignment;
mod warn;
