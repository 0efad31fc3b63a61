#![cfg(test)]

// Property tests for StrMap kept inside the crate so they can check
// chain order and bucket placement directly.

use crate::config::TableConfig;
use crate::hash::BucketHash;
use crate::str_map::tests::assert_consistent;
use crate::str_map::StrMap;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations: indices shrink to earlier keys, the pool
// shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Resize(f64),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,6}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (0.1f64..8.0).prop_map(OpI::Resize),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn run<H: BucketHash>(mut sut: StrMap<i32, H>, pool: &[String], ops: Vec<OpI>) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        match op {
            OpI::Put(i, v) => {
                let k = &pool[i];
                let prev = sut.put(k, v).expect("put");
                prop_assert_eq!(prev, model.insert(k.clone(), v));
            }
            OpI::Get(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.get(k), model.get(k));
            }
            OpI::Remove(i) => {
                let k = &pool[i];
                prop_assert_eq!(sut.remove(k), model.remove(k));
                prop_assert!(sut.get(k).is_none());
            }
            OpI::Resize(target) => {
                let len = sut.len();
                sut.resize(target).expect("resize");
                prop_assert_eq!(sut.len(), len);
            }
            OpI::Iterate => {
                let seen: BTreeMap<String, i32> =
                    sut.iter().map(|(k, v)| (k.to_string(), *v)).collect();
                prop_assert_eq!(seen.len(), sut.len(), "iter yielded a key twice");
                let expected: BTreeMap<String, i32> =
                    model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                prop_assert_eq!(seen, expected);
            }
        }

        // Post-conditions after each op
        assert_consistent(&sut);
        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
    }
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k), Some(v));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap.
// After every op: chains sorted, keys placed where they hash, len equal to
// the chain total and to the model size.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), buckets in 0usize..64) {
        let sut = StrMap::new(buckets).expect("create");
        run(sut, &pool, ops)?;
    }
}

// Every key lands in bucket 0; chains get long and order maintenance is
// exercised on every put and rebuild.
#[derive(Clone, Copy, Default)]
struct ConstHash;
impl BucketHash for ConstHash {
    fn hash_bytes(&self, _key: &[u8]) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario()) {
        let config = TableConfig::new(1, 32, 0.2).expect("config");
        let sut = StrMap::with_hasher(8, config, ConstHash).expect("create");
        run(sut, &pool, ops)?;
    }
}
