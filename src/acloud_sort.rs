//! Deterministic ordering of aggregated listings.
//!
//! Fan-out results arrive in no particular order, so every aggregated
//! collection is sorted on a composite key before it is handed out:
//! organisation slug, environment slug, own slug, then name.

use std::cmp::Ordering;

/// Composite sort key: `[organisation, environment, slug, name]`.
///
/// Unused positions are empty strings.
pub type OrderKey<'a> = [&'a str; 4];

/// Types with a stable, reproducible ordering in aggregated listings.
pub trait DeterministicOrder {
    /// Composite key, compared position by position.
    fn order_key(&self) -> OrderKey<'_>;
}

/// Compare two items by their composite key using ordinal string comparison.
#[must_use]
pub fn compare_deterministic<T: DeterministicOrder>(a: &T, b: &T) -> Ordering {
    a.order_key().cmp(&b.order_key())
}

/// Stable sort: items with equal keys keep their relative order.
pub fn sort_deterministic<T: DeterministicOrder>(items: &mut [T]) {
    items.sort_by(compare_deterministic);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug, Clone, PartialEq, Eq)]
    struct Row {
        org: &'static str,
        env: &'static str,
        slug: &'static str,
        tag: u32,
    }

    impl DeterministicOrder for Row {
        fn order_key(&self) -> OrderKey<'_> {
            [self.org, self.env, self.slug, ""]
        }
    }

    fn row(org: &'static str, env: &'static str, slug: &'static str, tag: u32) -> Row {
        Row { org, env, slug, tag }
    }

    #[test]
    fn sorts_by_org_then_env_then_slug() {
        let mut rows = vec![
            row("org2", "prod", "a", 0),
            row("org1", "test", "a", 1),
            row("org1", "prod", "z", 2),
            row("org1", "prod", "b", 3),
        ];

        sort_deterministic(&mut rows);

        let tags: Vec<u32> = rows.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![3, 2, 1, 0]);
    }

    #[test]
    fn equal_keys_keep_prior_order() {
        let mut rows = vec![
            row("org1", "prod", "same", 0),
            row("org0", "prod", "x", 1),
            row("org1", "prod", "same", 2),
            row("org1", "prod", "same", 3),
        ];

        sort_deterministic(&mut rows);

        let tags: Vec<u32> = rows.iter().map(|r| r.tag).collect();
        assert_eq!(tags, vec![1, 0, 2, 3]);
    }

    #[test]
    fn comparison_is_ordinal() {
        // Uppercase sorts before lowercase in byte order.
        let upper = row("Org", "", "", 0);
        let lower = row("org", "", "", 1);
        assert_eq!(compare_deterministic(&upper, &lower), Ordering::Less);
    }

    #[test]
    fn output_is_independent_of_input_permutation() {
        let base = vec![
            row("b", "x", "1", 0),
            row("a", "y", "2", 1),
            row("a", "x", "3", 2),
            row("c", "x", "0", 3),
        ];
        let mut forward = base.clone();
        let mut reversed: Vec<Row> = base.into_iter().rev().collect();

        sort_deterministic(&mut forward);
        sort_deterministic(&mut reversed);

        assert_eq!(forward, reversed);
    }
}
