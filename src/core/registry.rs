//! Managed list of known store names.

/// Seed list applied when the registry is empty.
pub const DEFAULT_STORES: [&str; 10] = [
    "Conad",
    "Coop",
    "Esselunga",
    "Eurospin",
    "Carrefour",
    "Lidl",
    "MD",
    "Pam",
    "Simply",
    "Iper",
];

/// Ordered set of store names, unique case-insensitively.
///
/// Every mutation re-normalizes the backing list: entries are trimmed, empty
/// names dropped, and case-insensitive duplicates collapsed keeping the first
/// occurrence.
#[derive(Debug, Clone, Default)]
pub struct StoreRegistry {
    stores: Vec<String>,
}

impl StoreRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a registry from persisted names, normalizing on the way in.
    pub fn from_names(names: Vec<String>) -> Self {
        let mut registry = Self { stores: names };
        registry.normalize();
        registry
    }

    /// Caller-owned copy of the list, safe to mutate.
    pub fn list(&self) -> Vec<String> {
        self.stores.clone()
    }

    pub fn len(&self) -> usize {
        self.stores.len()
    }

    pub fn is_empty(&self) -> bool {
        self.stores.is_empty()
    }

    pub fn contains(&self, name: &str) -> bool {
        self.position(name).is_some()
    }

    /// Adds a store name. Rejects blank input and case-insensitive duplicates.
    pub fn add(&mut self, name: &str) -> bool {
        let clean = name.trim();
        if clean.is_empty() || self.contains(clean) {
            return false;
        }
        self.stores.push(clean.to_string());
        self.normalize();
        true
    }

    /// Removes a store by case-insensitive match.
    pub fn remove(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) => {
                self.stores.remove(index);
                self.normalize();
                true
            }
            None => false,
        }
    }

    /// Renames a store. Fails when `old_name` is unknown, `new_name` is
    /// blank, or `new_name` collides case-insensitively with another entry.
    pub fn rename(&mut self, old_name: &str, new_name: &str) -> bool {
        let clean = new_name.trim();
        if clean.is_empty() {
            return false;
        }
        let Some(index) = self.position(old_name) else {
            return false;
        };
        let collision = self
            .stores
            .iter()
            .enumerate()
            .any(|(i, existing)| i != index && existing.eq_ignore_ascii_case(clean));
        if collision {
            return false;
        }
        self.stores[index] = clean.to_string();
        self.normalize();
        true
    }

    /// Seeds the default store list, only when the registry is empty.
    /// Returns whether seeding happened.
    pub fn ensure_defaults(&mut self) -> bool {
        if !self.stores.is_empty() {
            return false;
        }
        self.reset_defaults();
        true
    }

    /// Replaces the list with the default seed unconditionally.
    pub fn reset_defaults(&mut self) {
        self.stores = DEFAULT_STORES.iter().map(|name| name.to_string()).collect();
        self.normalize();
    }

    fn position(&self, name: &str) -> Option<usize> {
        let clean = name.trim();
        self.stores
            .iter()
            .position(|existing| existing.eq_ignore_ascii_case(clean))
    }

    fn normalize(&mut self) {
        let mut seen: Vec<String> = Vec::new();
        for raw in std::mem::take(&mut self.stores) {
            let clean = raw.trim();
            if clean.is_empty() {
                continue;
            }
            if seen.iter().any(|kept| kept.eq_ignore_ascii_case(clean)) {
                continue;
            }
            seen.push(clean.to_string());
        }
        self.stores = seen;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn add_rejects_case_and_whitespace_variants() {
        let mut registry = StoreRegistry::new();
        assert!(registry.add("Conad"));
        assert!(!registry.add("conad "));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn add_rejects_blank_names() {
        let mut registry = StoreRegistry::new();
        assert!(!registry.add("   "));
        assert!(registry.is_empty());
    }

    #[test]
    fn from_names_drops_empties_and_duplicates_keeping_first() {
        let registry = StoreRegistry::from_names(vec![
            " Lidl ".into(),
            "".into(),
            "lidl".into(),
            "Coop".into(),
        ]);
        assert_eq!(registry.list(), vec!["Lidl".to_string(), "Coop".to_string()]);
    }

    #[test]
    fn remove_matches_case_insensitively() {
        let mut registry = StoreRegistry::from_names(vec!["Pam".into()]);
        assert!(registry.remove("PAM"));
        assert!(!registry.remove("Pam"));
    }

    #[test]
    fn rename_rejects_collisions_but_allows_case_change_of_itself() {
        let mut registry = StoreRegistry::from_names(vec!["Coop".into(), "Conad".into()]);
        assert!(!registry.rename("Coop", "conad"));
        assert!(registry.rename("Coop", "COOP"));
        assert_eq!(registry.list()[0], "COOP");
    }

    #[test]
    fn rename_rejects_unknown_or_blank_targets() {
        let mut registry = StoreRegistry::from_names(vec!["Coop".into()]);
        assert!(!registry.rename("Esselunga", "Iper"));
        assert!(!registry.rename("Coop", "  "));
    }

    #[test]
    fn ensure_defaults_only_seeds_an_empty_registry() {
        let mut registry = StoreRegistry::new();
        assert!(registry.ensure_defaults());
        assert_eq!(registry.len(), DEFAULT_STORES.len());

        let mut populated = StoreRegistry::from_names(vec!["Coop".into()]);
        assert!(!populated.ensure_defaults());
        assert_eq!(populated.len(), 1);
    }

    #[test]
    fn reset_defaults_discards_custom_entries() {
        let mut registry = StoreRegistry::from_names(vec!["Alimentari Rossi".into()]);
        registry.reset_defaults();
        assert_eq!(registry.len(), DEFAULT_STORES.len());
        assert!(!registry.contains("Alimentari Rossi"));
    }
}
