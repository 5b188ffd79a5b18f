use std::env;
use std::path::PathBuf;

use crate::model::{ResultRow, Value};

use super::Backend;

/// Turns `g:<terms>` queries into a single result that opens a Google
/// search. Anything without the prefix yields no results.
pub struct GoogleSearchBackend {
    icon: Option<PathBuf>,
}

impl GoogleSearchBackend {
    pub fn new() -> Self {
        // The icon ships alongside the binary.
        let icon = env::current_exe()
            .ok()
            .and_then(|exe| exe.parent().map(|dir| dir.join("icons/google-search.png")));
        GoogleSearchBackend { icon }
    }
}

impl Default for GoogleSearchBackend {
    fn default() -> Self {
        Self::new()
    }
}

impl Backend for GoogleSearchBackend {
    fn name(&self) -> &'static str {
        "google-search"
    }

    fn priority(&self) -> u32 {
        9
    }

    fn search(&self, query: &str) -> Vec<ResultRow> {
        let query = query.to_lowercase();
        let Some(terms) = query.strip_prefix("g:").filter(|rest| !rest.is_empty()) else {
            return Vec::new();
        };
        let terms = terms.trim();
        let encoded: String = url::form_urlencoded::byte_serialize(terms.as_bytes()).collect();

        vec![ResultRow {
            name: "Google".to_string(),
            description: Some(Value::String(format!("Search for `{terms}'"))),
            exec: Some(format!(
                "xdg-open https://www.google.com/search?q={encoded}"
            )),
            icon: self
                .icon
                .as_ref()
                .map(|path| Value::String(path.to_string_lossy().into_owned())),
        }]
    }
}
