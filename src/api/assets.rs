use std::fs;
use std::path::Path;

const STYLESHEET_FILE: &str = "home.css";
const SCRIPT_FILE: &str = "home.js";

/// Optional stylesheet and script inlined into the page.
/// Read once at startup; a missing file only costs styling.
#[derive(Debug, Clone, Default)]
pub struct PageAssets {
    pub stylesheet: Option<String>,
    pub script: Option<String>,
}

impl PageAssets {
    pub fn load(dir: &Path) -> Self {
        Self {
            stylesheet: read_optional(dir, STYLESHEET_FILE, "CSS"),
            script: read_optional(dir, SCRIPT_FILE, "JS"),
        }
    }
}

fn read_optional(dir: &Path, file: &str, kind: &str) -> Option<String> {
    let path = dir.join(file);
    match fs::read_to_string(&path) {
        Ok(body) => {
            tracing::debug!(path = %path.display(), bytes = body.len(), "Loaded {kind} asset");
            Some(body)
        }
        Err(e) => {
            tracing::warn!(path = %path.display(), error = %e, "{kind} file not found!");
            None
        }
    }
}
