//! Types shared by the menu server, the client core and the tools.

pub mod domain;
pub mod error;
pub mod protocol;
