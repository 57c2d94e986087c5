//! Terminal navigation shell for a study-materials catalogue.
//!
//! The library holds the pieces that do not depend on the terminal: the
//! taxonomy client, the navigation state and the configuration loader. The
//! `studynav` binary hosts them in a ratatui event loop.

pub mod config;
pub mod nav;
pub mod taxonomy;
pub mod theme;
pub mod util;
