//! Candidate access

pub(crate) mod unlock;
