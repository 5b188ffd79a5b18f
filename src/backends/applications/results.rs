use crate::model::{ResultRow, Value};

use super::entry::DesktopEntry;
use super::highlight::highlight;
use super::matcher::MatchSpans;

/// Field-code placeholders stripped from exec lines before they reach the
/// frontend.
const FIELD_CODES: [&str; 10] = [
    "%f", "%F", "%u", "%U", "%d", "%D", "%n", "%N", "%k", "%v",
];

/// One matched entry with its per-query score and spans. Lives only for the
/// duration of a single query.
pub struct RankedResult<'a> {
    pub entry: &'a DesktopEntry,
    pub name: &'a str,
    pub score: f64,
    pub spans: MatchSpans,
}

/// Jaro-Winkler similarity between the query and the entry's display name,
/// 0.0 when the entry has no usable name.
pub fn similarity(query: &str, entry: &DesktopEntry) -> f64 {
    entry
        .name()
        .map(|name| strsim::jaro_winkler(query, name))
        .unwrap_or(0.0)
}

/// Best score first. The sort is stable, so equal scores keep their catalog
/// order.
pub fn rank(results: &mut [RankedResult<'_>]) {
    results.sort_by(|a, b| b.score.total_cmp(&a.score));
}

/// Project one ranked entry into the public row shape. Attributes without a
/// projected field stay out of the response.
pub fn project(ranked: &RankedResult<'_>) -> ResultRow {
    let entry = ranked.entry;
    let description = entry
        .get("comment_i18n")
        .or_else(|| entry.get("comment"))
        .or_else(|| entry.get("generic_name"))
        .cloned();

    ResultRow {
        name: highlight(ranked.name, &ranked.spans),
        description,
        exec: entry.get("exec").and_then(Value::as_str).map(clean_exec),
        icon: entry.get("icon").cloned(),
    }
}

fn clean_exec(exec: &str) -> String {
    let mut cleaned = exec.to_string();
    for code in FIELD_CODES {
        cleaned = cleaned.replace(code, "");
    }
    cleaned.trim().to_string()
}
