//! Externally supplied types for shader inputs.
//!
//! The host program that invokes a shader knows the types of the values it
//! passes in. An [`InjectionMap`] records them, keyed by parameter name
//! (`env`) or by dotted member path (`env.frequency`), optionally with a
//! compile-time value.

use rustc_hash::FxHashMap;

use crate::ty::{ConstantValue, ObjectKind, SemanticType};

/// One injected type, and the value when the host fixes it at compile time.
#[derive(Clone, Debug, PartialEq)]
pub struct Injected {
    pub ty: SemanticType,
    pub value: Option<ConstantValue>,
}

impl Injected {
    pub fn new(ty: SemanticType) -> Self {
        Injected { ty, value: None }
    }
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct InjectionMap {
    entries: FxHashMap<String, Injected>,
}

impl InjectionMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add `name: ty` and return the map, for chained construction.
    pub fn with(mut self, name: &str, ty: SemanticType) -> Self {
        self.insert(name, Injected::new(ty));
        self
    }

    /// Add `name: ty` with a compile-time value.
    pub fn with_constant(mut self, name: &str, ty: SemanticType, value: ConstantValue) -> Self {
        self.insert(
            name,
            Injected {
                ty,
                value: Some(value),
            },
        );
        self
    }

    pub fn insert(&mut self, name: &str, injected: Injected) {
        self.entries.insert(name.to_string(), injected);
    }

    /// The entry stored under exactly this name or path.
    pub fn get(&self, key: &str) -> Option<&Injected> {
        self.entries.get(key)
    }

    /// Whether any dotted path starts at `root`.
    pub fn has_members(&self, root: &str) -> bool {
        self.entries.keys().any(|key| {
            key.strip_prefix(root)
                .is_some_and(|rest| rest.starts_with('.'))
        })
    }

    /// The binding for a free name: its own entry, or an environment record
    /// when only member paths below it are injected.
    pub fn resolve(&self, name: &str) -> Option<Injected> {
        if let Some(injected) = self.get(name) {
            return Some(injected.clone());
        }
        self.has_members(name)
            .then(|| Injected::new(SemanticType::Object(ObjectKind::Record)))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Entries sorted by key.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Injected)> {
        let mut entries: Vec<_> = self
            .entries
            .iter()
            .map(|(k, v)| (k.as_str(), v))
            .collect();
        entries.sort_by(|a, b| a.0.cmp(b.0));
        entries.into_iter()
    }
}

impl<S: Into<String>> FromIterator<(S, SemanticType)> for InjectionMap {
    fn from_iter<I: IntoIterator<Item = (S, SemanticType)>>(iter: I) -> Self {
        InjectionMap {
            entries: iter
                .into_iter()
                .map(|(name, ty)| (name.into(), Injected::new(ty)))
                .collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_keys_make_the_root_a_record() {
        let map = InjectionMap::new().with("env.frequency", SemanticType::Number);
        assert!(map.has_members("env"));
        assert!(!map.has_members("en"));
        assert_eq!(
            map.resolve("env").map(|i| i.ty),
            Some(SemanticType::Object(ObjectKind::Record))
        );
        assert_eq!(map.resolve("frequency"), None);
    }

    #[test]
    fn direct_entry_wins_over_record() {
        let map = InjectionMap::new()
            .with("env", SemanticType::Object(ObjectKind::Float3))
            .with("env.x", SemanticType::Number);
        assert_eq!(
            map.resolve("env").map(|i| i.ty),
            Some(SemanticType::Object(ObjectKind::Float3))
        );
    }

    #[test]
    fn collects_from_pairs() {
        let map: InjectionMap = [("a", SemanticType::Int), ("b", SemanticType::Number)]
            .into_iter()
            .collect();
        assert_eq!(map.len(), 2);
        let keys: Vec<_> = map.iter().map(|(k, _)| k).collect();
        assert_eq!(keys, ["a", "b"]);
    }
}
