//! HTML templates and styling for the share server.
//!
//! ## Module Structure
//!
//! - `styles` - CSS constants
//! - `components` - Navigation bar and base page template
//! - `viewer` - Shared note page plus the not-found and expired pages

mod styles;
mod components;
mod viewer;

pub use styles::STYLE;
pub use components::{base_html, nav_bar};
pub use viewer::{render_expired, render_landing, render_not_found, render_shared_note};
