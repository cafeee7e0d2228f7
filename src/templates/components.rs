//! Shared HTML components for the share server pages.
//!
//! Contains the navigation bar and the base HTML template.

use crate::notes::html_escape;

use super::styles::STYLE;

// ============================================================================
// Navigation Bar
// ============================================================================

pub fn nav_bar() -> String {
    r#"<nav class="nav-bar">
            <a href="/" class="brand">Blank.page</a>
            <span class="spacer"></span>
            <a href="/health">Status</a>
        </nav>"#
        .to_string()
}

// ============================================================================
// Base Template
// ============================================================================

pub fn base_html(title: &str, content: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{title}</title>
    <style>{STYLE}</style>
</head>
<body>
    {nav}
    <div class="container">
        {content}
    </div>
</body>
</html>"#,
        title = html_escape(title),
        nav = nav_bar(),
    )
}
