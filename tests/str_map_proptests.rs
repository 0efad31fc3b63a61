use proptest::prelude::*;
use std::collections::BTreeMap;
use strmap::{StrMap, MAX_BUCKETS, MIN_BUCKETS};

// Build a table from (key, value) pairs and return it with the model of
// what it should contain.
fn fill(buckets: usize, pairs: &[(String, u32)]) -> (StrMap<u32>, BTreeMap<String, u32>) {
    let mut m = StrMap::new(buckets).unwrap();
    let mut model = BTreeMap::new();
    for (k, v) in pairs {
        m.put(k, *v).unwrap();
        model.insert(k.clone(), *v);
    }
    (m, model)
}

proptest! {
    // Round-trip and uniqueness: the table matches a map built from the same puts.
    #[test]
    fn prop_put_get_matches_model(
        buckets in 0usize..200,
        pairs in proptest::collection::vec(("[a-c]{0,4}", any::<u32>()), 0..100),
    ) {
        let (m, model) = fill(buckets, &pairs);
        prop_assert_eq!(m.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(v));
        }
        let mut keys: Vec<&str> = m.iter().map(|(k, _)| k).collect();
        keys.sort();
        keys.dedup();
        prop_assert_eq!(keys.len(), m.len());
    }

    // Resize preserves membership for any positive target, and lands in bounds.
    #[test]
    fn prop_resize_preserves_membership(
        buckets in 0usize..64,
        pairs in proptest::collection::vec(("[a-z]{1,8}", any::<u32>()), 0..200),
        target in 0.01f64..16.0,
    ) {
        let (mut m, model) = fill(buckets, &pairs);
        m.resize(target).unwrap();
        prop_assert!(m.bucket_count() >= MIN_BUCKETS);
        prop_assert!(m.bucket_count() <= MAX_BUCKETS);
        prop_assert_eq!(m.len(), model.len());
        for (k, v) in &model {
            prop_assert_eq!(m.get(k), Some(v));
        }
    }

    // Resizing twice to the same target: the second call is inside the band
    // unless the clamp kept the first one from reaching it.
    #[test]
    fn prop_second_resize_is_stable(
        pairs in proptest::collection::vec(("[a-z]{1,8}", any::<u32>()), 50..200),
        target in 0.5f64..4.0,
    ) {
        let (mut m, _) = fill(4, &pairs);
        m.resize(target).unwrap();
        let buckets = m.bucket_count();
        let layout: Vec<(usize, Vec<String>)> = m
            .chains()
            .map(|(i, c)| (i, c.map(|(k, _)| k.to_string()).collect()))
            .collect();
        let lf = m.load_factor();
        let within = (1.0 - strmap::LF_SLOP) * target <= lf && lf <= (1.0 + strmap::LF_SLOP) * target;
        m.resize(target).unwrap();
        if within {
            prop_assert_eq!(m.bucket_count(), buckets);
            let after: Vec<(usize, Vec<String>)> = m
                .chains()
                .map(|(i, c)| (i, c.map(|(k, _)| k.to_string()).collect()))
                .collect();
            prop_assert_eq!(layout, after);
        }
    }

    // Removal: each removed key returns its value once and is gone afterward.
    #[test]
    fn prop_remove_all(
        pairs in proptest::collection::vec(("[a-d]{0,3}", any::<u32>()), 0..60),
    ) {
        let (mut m, model) = fill(3, &pairs);
        for (k, v) in &model {
            prop_assert_eq!(m.remove(k), Some(*v));
            prop_assert_eq!(m.remove(k), None);
            prop_assert!(m.get(k).is_none());
        }
        prop_assert!(m.is_empty());
        prop_assert_eq!(m.iter().count(), 0);
    }
}
