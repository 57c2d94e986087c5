//! Terminal front end hosting the navigation surface.
//!
//! # Module Structure
//!
//! - `loop_runner` - Main event loop and terminal management
//! - `input` - Keyboard and mouse handling
//! - `events` - Taxonomy fetch results
//! - `render` - Frame layout and hit-map publication
//! - `navbar` - Desktop bar, category dropdown, search panel, user menu
//! - `mobile` - Narrow layout: top bar, slide-in menu, bottom bar
//! - `status` - Status bar widget
//! - `helpers` - Row and popup placement

mod events;
mod helpers;
mod input;
mod loop_runner;
mod mobile;
mod navbar;
mod render;
mod status;

pub use loop_runner::run;
