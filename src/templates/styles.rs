//! CSS styles for the share server pages.

// ============================================================================
// CSS Styles
// ============================================================================

pub const STYLE: &str = r#"
:root {
    --bg: #ffffff;
    --fg: #1f2937;
    --muted: #6b7280;
    --border: #e5e7eb;
    --link: #8b5cf6;
    --link-hover: #7c3aed;
    --accent: #f5f3ff;
    --code-bg: #f3f4f6;
}

@media (prefers-color-scheme: dark) {
    :root {
        --bg: #111827;
        --fg: #e5e7eb;
        --muted: #9ca3af;
        --border: #374151;
        --accent: #2e1065;
        --code-bg: #1f2937;
    }
}

* { box-sizing: border-box; margin: 0; padding: 0; }

body {
    font-family: -apple-system, BlinkMacSystemFont, "Segoe UI", Roboto, "Helvetica Neue", Arial, sans-serif;
    line-height: 1.6;
    color: var(--fg);
    background: var(--bg);
}

.container {
    max-width: 760px;
    margin: 0 auto;
    padding: 2rem 1rem;
}

a { color: var(--link); text-decoration: none; }
a:hover { color: var(--link-hover); text-decoration: underline; }

h1, h2, h3 { font-weight: 600; margin-top: 1.5em; margin-bottom: 0.5em; }
h1 { font-size: 1.5rem; }

.nav-bar {
    border-bottom: 1px solid var(--border);
    padding: 0.5rem 1rem;
    display: flex;
    gap: 1rem;
    align-items: center;
}

.nav-bar .brand { font-weight: 600; color: var(--fg); }
.nav-bar .spacer { flex: 1; }

.note-header { margin-bottom: 1rem; }
.note-header h1 { margin: 0; }
.note-header .meta { font-size: 0.8rem; color: var(--muted); }

.note-content { margin-top: 1rem; }
.note-content p { margin: 0.75rem 0; }
.note-content pre {
    background: var(--code-bg);
    padding: 1rem;
    overflow-x: auto;
    border-radius: 4px;
    margin: 1rem 0;
}
.note-content code {
    font-family: "SF Mono", "Consolas", "Liberation Mono", monospace;
    font-size: 0.9em;
}
.note-content blockquote {
    border-left: 3px solid var(--border);
    margin: 1rem 0;
    padding-left: 1rem;
    color: var(--muted);
}
.note-content ul, .note-content ol { padding-left: 1.5rem; }

.notice {
    text-align: center;
    padding: 4rem 1rem;
}
.notice p { color: var(--muted); margin-top: 0.5rem; }

.api-list { list-style: none; margin-top: 1rem; }
.api-list li { padding: 0.4rem 0; border-bottom: 1px solid var(--border); }
.api-list code {
    font-family: "SF Mono", "Consolas", "Liberation Mono", monospace;
    background: var(--code-bg);
    padding: 0.1rem 0.3rem;
    border-radius: 3px;
}
"#;
