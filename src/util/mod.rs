//! Small text helpers shared by the taxonomy client and the terminal renderer.
//!
//! - **Sanitizing**: names arrive from a remote service and are rendered
//!   straight into the terminal, so control characters and ANSI escape
//!   sequences are stripped before they reach a widget.
//! - **Fitting**: Unicode-aware width measurement and truncation for the
//!   fixed-width navigation bar and dropdown columns.

mod text;

pub use text::{display_width, first_letter_upper, strip_control_chars, truncate_to_width};
