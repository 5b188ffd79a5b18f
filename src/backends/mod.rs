use crate::model::ResultRow;

/// A backend answers one query line at a time and identifies itself in the
/// response envelope.
pub trait Backend {
    /// Name reported in the `backend` field of every response.
    fn name(&self) -> &'static str;

    /// Display priority relative to sibling backends.
    fn priority(&self) -> u32;

    /// All rows for one query, best match first.
    fn search(&self, query: &str) -> Vec<ResultRow>;
}

pub mod applications;
pub mod google;
