//! Terminal output for the cssbuild binary

pub mod context;
pub mod icon;
pub mod terminal;
pub mod theme;
pub mod watch;
