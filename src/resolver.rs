use std::collections::HashMap;

use serde_json::Value;
use tracing::debug;

use crate::env::EnvStore;
use crate::options::{Config, Output};
use crate::resolved::Resolved;
use crate::source::{DotenvSource, ParseSource};

/// Resolve an env file against the real process environment.
///
/// Uses the `dotenvy`-backed source and default-fills both option objects.
///
/// # Safety
///
/// The caller must ensure no other threads concurrently read or write the
/// process environment for the duration of the call.
pub unsafe fn resolve(config: Config, output: Output) -> Resolved {
    let mut resolver = Resolver::new().store(unsafe { EnvStore::process() });
    resolver.resolve(config, output)
}

/// One-shot environment resolver.
///
/// Each [`resolve`](Resolver::resolve) call snapshots the store, delegates
/// file parsing to the source, merges parsed entries into the store per the
/// override rule, and shapes the result per the output options.
#[derive(Debug, Clone, Default)]
pub struct Resolver<S = DotenvSource> {
    source: S,
    store: EnvStore,
}

impl Resolver<DotenvSource> {
    /// Resolver over an isolated in-memory store and the `dotenvy` parser.
    pub fn new() -> Self {
        Self::default()
    }
}

impl<S: ParseSource> Resolver<S> {
    /// Resolver over an isolated in-memory store and a custom source.
    pub fn with_source(source: S) -> Self {
        Self {
            source,
            store: EnvStore::default(),
        }
    }

    pub fn store(mut self, store: EnvStore) -> Self {
        self.store = store;
        self
    }

    pub fn store_ref(&self) -> &EnvStore {
        &self.store
    }

    pub fn into_store(self) -> EnvStore {
        self.store
    }

    /// Resolve once.
    ///
    /// Never fails: a missing, unreadable, or malformed env file yields an
    /// empty result. The store snapshot used for process-output mode is taken
    /// before any file entry is applied.
    pub fn resolve(&mut self, config: Config, output: Output) -> Resolved {
        let runtime = self.store.snapshot();
        let config = config.effective();
        let output = output.effective();

        let entries = match self.source.parse(&config.path, config.encoding) {
            Ok(entries) => merge_duplicate_keys(entries),
            Err(err) => {
                if config.debug {
                    debug!(
                        path = %config.path.display(),
                        error = %err,
                        "env file unavailable, continuing with empty entries"
                    );
                }
                Vec::new()
            }
        };

        let mut loaded = 0usize;
        let mut skipped_existing = 0usize;
        for (key, value) in &entries {
            if !config.override_existing && self.store.contains_key(key) {
                skipped_existing += 1;
                if config.debug {
                    debug!(key = %key, "skipping existing key");
                }
                continue;
            }

            self.store.set_var(key, value);
            loaded += 1;
        }

        if config.debug {
            debug!(loaded, skipped_existing, "applied env file entries");
        }

        let resolved = if output.process {
            shape(runtime, output.keys)
        } else {
            shape(entries, output.keys)
        };

        if output.stdout {
            println!("{}", resolved.to_pretty_json());
        }

        resolved
    }
}

fn shape<I>(entries: I, keys_only: bool) -> Resolved
where
    I: IntoIterator<Item = (String, String)>,
{
    if keys_only {
        Resolved::Keys(entries.into_iter().map(|(key, _)| key).collect())
    } else {
        Resolved::Vars(
            entries
                .into_iter()
                .map(|(key, value)| (key, Value::String(value)))
                .collect(),
        )
    }
}

/// Collapse duplicate keys last-wins while keeping first-occurrence order.
fn merge_duplicate_keys(entries: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut merged: Vec<(String, String)> = Vec::with_capacity(entries.len());
    let mut by_key = HashMap::<String, usize>::new();

    for (key, value) in entries {
        if let Some(existing_idx) = by_key.get(&key).copied() {
            merged[existing_idx].1 = value;
        } else {
            by_key.insert(key.clone(), merged.len());
            merged.push((key, value));
        }
    }

    merged
}
