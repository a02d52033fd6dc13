use std::collections::HashMap;

use anchor_config::Config;

/// Resolution boundary: maps a target identifier to its live permalink.
/// Hosts with real slug histories implement this over their own lookup;
/// the static variant below serves configuration-driven use.
pub trait PermalinkResolver {
    fn resolve(&self, target: &str) -> Option<String>;
}

/// Resolver backed by a fixed target → URL table.
#[derive(Debug, Default)]
pub struct StaticResolver {
    entries: HashMap<String, String>,
}

impl StaticResolver {
    pub fn new() -> Self {
        StaticResolver::default()
    }

    pub fn insert(&mut self, target: impl Into<String>, url: impl Into<String>) {
        self.entries.insert(target.into(), url.into());
    }

    pub fn from_config(config: &Config) -> Self {
        let entries = config
            .permalinks
            .iter()
            .map(|(target, url)| (target.to_string(), url.to_string()))
            .collect();
        StaticResolver { entries }
    }
}

impl PermalinkResolver for StaticResolver {
    fn resolve(&self, target: &str) -> Option<String> {
        self.entries.get(target).cloned()
    }
}
