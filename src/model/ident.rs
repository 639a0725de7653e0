use indexmap::IndexMap;

/// Map keyed by contributor identity, compared case-insensitively.
///
/// The first-seen casing of an identity is kept as its canonical key;
/// later inserts under any casing update the same entry. Insertion order
/// is preserved.
#[derive(Debug, Clone)]
pub struct IdentMap<V> {
    inner: IndexMap<String, (String, V)>,
}

impl<V> IdentMap<V> {
    pub fn new() -> Self {
        Self {
            inner: IndexMap::new(),
        }
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn get(&self, key: &str) -> Option<&V> {
        self.inner.get(&key.to_lowercase()).map(|(_, value)| value)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.inner.contains_key(&key.to_lowercase())
    }

    /// Inserts or replaces the value for `key`, returning the previous value.
    /// A replaced entry keeps the casing it was first inserted under.
    pub fn insert(&mut self, key: impl ToString, value: V) -> Option<V> {
        let canonical = key.to_string();
        let lower = canonical.to_lowercase();
        match self.inner.get_mut(&lower) {
            Some((_, existing)) => Some(std::mem::replace(existing, value)),
            None => {
                self.inner.insert(lower, (canonical, value));
                None
            }
        }
    }

    /// Inserts `value` for a new key, or replaces the existing entry with
    /// `combine(existing, new)` for a known one.
    pub fn upsert_with(&mut self, key: &str, value: V, combine: impl FnOnce(&V, &V) -> V) {
        let lower = key.to_lowercase();
        match self.inner.get_mut(&lower) {
            Some((_, existing)) => *existing = combine(existing, &value),
            None => {
                self.inner.insert(lower, (key.to_string(), value));
            }
        }
    }

    /// Entries in insertion order, keyed by their canonical casing.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &V)> {
        self.inner.values().map(|(key, value)| (key.as_str(), value))
    }

    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.inner.values().map(|(key, _)| key.as_str())
    }
}

impl<V> Default for IdentMap<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<K: ToString, V> FromIterator<(K, V)> for IdentMap<V> {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

/// Set of contributor identities with the same case-insensitive semantics.
#[derive(Debug, Clone, Default)]
pub struct IdentSet {
    inner: IdentMap<()>,
}

impl IdentSet {
    pub fn contains(&self, id: &str) -> bool {
        self.inner.contains_key(id)
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.inner.keys()
    }
}

impl<S: ToString> FromIterator<S> for IdentSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut inner = IdentMap::new();
        for id in iter {
            inner.insert(id, ());
        }
        Self { inner }
    }
}
