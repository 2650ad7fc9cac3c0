//! Session Handlers

pub(crate) mod close;
pub(crate) mod evaluation;
pub(crate) mod get;
pub(crate) mod intelligence;
pub(crate) mod masterclass;
pub(crate) mod more;
pub(crate) mod questions;
pub(crate) mod reset;
pub(crate) mod search;
pub(crate) mod simulation;
