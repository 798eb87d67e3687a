use std::collections::BTreeMap;

/// Environment store the resolver reads from and merges into.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnvStore {
    kind: EnvStoreKind,
}

#[derive(Debug, Clone, PartialEq, Eq)]
enum EnvStoreKind {
    /// Back the store with the current process environment.
    ///
    /// This writes through [`std::env::set_var`], which mutates global process
    /// state and is not thread-safe for concurrent environment access.
    Process,
    /// Back the store with an in-memory map.
    Memory(BTreeMap<String, String>),
}

impl Default for EnvStore {
    fn default() -> Self {
        Self::memory()
    }
}

impl EnvStore {
    /// Create a process-environment store.
    ///
    /// # Safety
    ///
    /// The caller must ensure no other threads concurrently read or write the
    /// process environment for the duration of operations that may mutate this
    /// store.
    pub unsafe fn process() -> Self {
        Self {
            kind: EnvStoreKind::Process,
        }
    }

    /// Create an empty in-memory store.
    ///
    /// Use this to avoid mutating the process environment.
    pub fn memory() -> Self {
        Self::from_memory(BTreeMap::new())
    }

    /// Create an in-memory store from an existing map.
    pub fn from_memory(map: BTreeMap<String, String>) -> Self {
        Self {
            kind: EnvStoreKind::Memory(map),
        }
    }

    pub fn as_memory(&self) -> Option<&BTreeMap<String, String>> {
        match &self.kind {
            EnvStoreKind::Memory(map) => Some(map),
            EnvStoreKind::Process => None,
        }
    }

    pub fn as_memory_mut(&mut self) -> Option<&mut BTreeMap<String, String>> {
        match &mut self.kind {
            EnvStoreKind::Memory(map) => Some(map),
            EnvStoreKind::Process => None,
        }
    }

    /// Copy the store's current contents into an owned, key-ordered map.
    ///
    /// Process-environment values that are not valid UTF-8 are converted
    /// lossily.
    pub fn snapshot(&self) -> BTreeMap<String, String> {
        match &self.kind {
            EnvStoreKind::Process => std::env::vars_os()
                .map(|(key, value)| {
                    (
                        key.to_string_lossy().into_owned(),
                        value.to_string_lossy().into_owned(),
                    )
                })
                .collect(),
            EnvStoreKind::Memory(map) => map.clone(),
        }
    }

    pub(crate) fn contains_key(&self, key: &str) -> bool {
        match &self.kind {
            EnvStoreKind::Process => std::env::var_os(key).is_some(),
            EnvStoreKind::Memory(map) => map.contains_key(key),
        }
    }

    pub(crate) fn set_var(&mut self, key: &str, value: &str) {
        match &mut self.kind {
            EnvStoreKind::Process => unsafe { std::env::set_var(key, value) },
            EnvStoreKind::Memory(map) => {
                map.insert(key.to_owned(), value.to_owned());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;

    use super::EnvStore;

    #[test]
    fn memory_snapshot_is_a_copy() {
        let mut initial = BTreeMap::new();
        initial.insert("A".to_string(), "1".to_string());

        let mut store = EnvStore::from_memory(initial);
        let snapshot = store.snapshot();
        store.set_var("A", "2");

        assert_eq!(snapshot.get("A").expect("A should exist"), "1");
        let map = store.as_memory().expect("memory store");
        assert_eq!(map.get("A").expect("A should exist"), "2");
    }

    #[test]
    fn set_var_inserts_into_memory_store() {
        let mut store = EnvStore::memory();
        assert!(!store.contains_key("FRESH"));

        store.set_var("FRESH", "value");
        assert!(store.contains_key("FRESH"));
        let map = store.as_memory().expect("memory store");
        assert_eq!(map.get("FRESH").expect("FRESH should exist"), "value");
    }
}
