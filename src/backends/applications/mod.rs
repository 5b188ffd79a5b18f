use std::env;

use log::info;

use crate::config::Config;
use crate::model::ResultRow;

use super::Backend;

mod catalog;
mod entry;
mod highlight;
mod matcher;
mod results;

use catalog::Catalog;
use matcher::FuzzyPattern;
use results::RankedResult;

/// Queries shorter than this return no results at all.
const MINIMUM_QUERY_LENGTH: usize = 3;

/// Fuzzy-matches installed applications by display name.
pub struct ApplicationsBackend {
    catalog: Catalog,
}

impl ApplicationsBackend {
    /// Scans the desktop file roots once; queries only ever borrow the
    /// resulting catalog.
    pub fn new(config: &Config) -> Self {
        let language = env::var("LANGUAGE").ok().filter(|lang| !lang.is_empty());
        let roots = catalog::search_roots(&config.applications.extra_dirs);
        let catalog = Catalog::build(&roots, language.as_deref());
        ApplicationsBackend { catalog }
    }
}

impl Backend for ApplicationsBackend {
    fn name(&self) -> &'static str {
        "application"
    }

    fn priority(&self) -> u32 {
        2
    }

    fn search(&self, query: &str) -> Vec<ResultRow> {
        let query = query.to_lowercase();
        if query.chars().count() < MINIMUM_QUERY_LENGTH {
            return Vec::new();
        }
        let Some(pattern) = FuzzyPattern::new(&query) else {
            return Vec::new();
        };

        let mut matched: Vec<RankedResult> = self
            .catalog
            .all()
            .iter()
            .filter_map(|entry| {
                let name = entry.name()?;
                let spans = pattern.spans(name)?;
                Some(RankedResult {
                    entry,
                    name,
                    score: results::similarity(&query, entry),
                    spans,
                })
            })
            .collect();

        results::rank(&mut matched);
        info!("applications: query {:?} matched {}", query, matched.len());
        matched.iter().map(results::project).collect()
    }
}
