//! HR Trainer application layer.
//!
//! PostgreSQL token persistence, the Gemini collaborator, the live session registry and
//! the [`AppContext`](context::AppContext) that wires them onto the core library.

pub mod context;
pub mod database;
pub mod gemini;
pub mod sessions;
pub mod tokens;

#[cfg(test)]
mod test;
