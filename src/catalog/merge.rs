use tracing::debug;

use super::Catalog;

/// Outcome of folding one catalog into another.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeStats {
    /// Messages copied into the target.
    pub added: usize,
    /// Messages whose key the target already had.
    pub skipped: usize,
}

impl std::ops::AddAssign for MergeStats {
    fn add_assign(&mut self, other: Self) {
        self.added += other.added;
        self.skipped += other.skipped;
    }
}

/// Union `source` into `target`, keyed by message key.
///
/// The first writer wins: an entry already present in `target` is never
/// replaced, so existing translations survive. New entries keep their
/// translation (usually empty at extraction time) and are appended in
/// `source` order.
pub fn merge(target: &mut Catalog, source: Catalog) -> MergeStats {
    let mut stats = MergeStats::default();
    for message in source {
        if target.insert(message) {
            stats.added += 1;
        } else {
            stats.skipped += 1;
        }
    }
    debug!(
        added = stats.added,
        skipped = stats.skipped,
        "merged catalog"
    );
    stats
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeSet;

    use pretty_assertions::assert_eq;

    use super::*;
    use crate::catalog::{Message, MessageKey};

    fn catalog(entries: &[(&str, &str)]) -> Catalog {
        let mut catalog = Catalog::new();
        for (id, string) in entries {
            catalog.insert(Message::new(*id).with_string(*string));
        }
        catalog
    }

    fn ids(catalog: &Catalog) -> BTreeSet<String> {
        catalog.iter().map(|m| m.id().to_string()).collect()
    }

    #[test]
    fn test_merge_disjoint_catalogs() {
        let mut target = catalog(&[("Hello", "")]);
        let stats = merge(&mut target, catalog(&[("Bye", ""), ("Thanks", "")]));

        assert_eq!(stats, MergeStats { added: 2, skipped: 0 });
        let ids: Vec<&str> = target.iter().map(Message::id).collect();
        assert_eq!(ids, vec!["Hello", "Bye", "Thanks"]);
    }

    #[test]
    fn test_merge_never_overwrites_translation() {
        let mut target = catalog(&[("Hello", "Bonjour"), ("Yes", "")]);
        let source = catalog(&[("Hello", "Salut"), ("Yes", "Oui"), ("No", "Non")]);

        let stats = merge(&mut target, source);

        assert_eq!(stats, MergeStats { added: 1, skipped: 2 });
        assert_eq!(target.get(&MessageKey::new("Hello")).unwrap().string(), "Bonjour");
        assert_eq!(target.get(&MessageKey::new("Yes")).unwrap().string(), "");
        assert_eq!(target.get(&MessageKey::new("No")).unwrap().string(), "Non");
    }

    #[test]
    fn test_merge_result_is_union_of_ids() {
        let a = catalog(&[("a", "1"), ("b", ""), ("c", "3")]);
        let b = catalog(&[("c", "x"), ("d", ""), ("a", "y")]);
        let expected: BTreeSet<String> = ids(&a).union(&ids(&b)).cloned().collect();
        let before = a.len();

        let mut merged = a.clone();
        merge(&mut merged, b);

        assert_eq!(ids(&merged), expected);
        assert!(merged.len() >= before);
        for original in a.iter() {
            assert_eq!(merged.get(original.key()).unwrap().string(), original.string());
        }
    }

    #[test]
    fn test_same_untranslated_id_from_two_roots() {
        let mut master = catalog(&[("Hello", "")]);
        merge(&mut master, catalog(&[("Hello", "")]));

        assert_eq!(master.iter().filter(|m| m.id() == "Hello").count(), 1);
        assert!(master.get(&MessageKey::new("Hello")).unwrap().is_untranslated());
    }

    #[test]
    fn test_merge_keeps_target_metadata() {
        let mut first = Message::new("Save");
        first.locations.push("app/views.py:3".to_string());
        let mut target = Catalog::new();
        target.insert(first);

        let mut second = Message::new("Save");
        second.locations.push("plugin/forms.py:9".to_string());
        let mut source = Catalog::new();
        source.insert(second);

        merge(&mut target, source);
        assert_eq!(
            target.get(&MessageKey::new("Save")).unwrap().locations,
            vec!["app/views.py:3"]
        );
    }

    #[test]
    fn test_stats_accumulate() {
        let mut total = MergeStats::default();
        total += MergeStats { added: 2, skipped: 1 };
        total += MergeStats { added: 1, skipped: 4 };
        assert_eq!(total, MergeStats { added: 3, skipped: 5 });
    }
}
