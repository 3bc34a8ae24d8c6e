//! Event renderers. Each turns one [`Event`](crate::event::Event) into one
//! newline-terminated line.

pub mod plain;
pub mod structured;

pub use plain::{fit_width, render_plain};
pub use structured::render_structured;
