#![cfg(test)]

// Property tests for ProbeTable kept inside the crate so they can use
// small configurations and a colliding hasher.

use crate::config::ProbeConfig;
use crate::probe_table::ProbeTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};
use std::hash::{BuildHasher, Hasher};

// Pool-indexed operations so shrinking moves toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Get(usize),
    Remove(usize),
    Mutate(usize, i32),
    Iterate,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-z]{0,4}", 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            3 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            2 => idx.clone().prop_map(OpI::Get),
            2 => idx.clone().prop_map(OpI::Remove),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            1 => Just(OpI::Iterate),
        ];
        proptest::collection::vec(op, 1..120).prop_map(move |ops| (pool.clone(), ops))
    })
}

fn small_config() -> impl Strategy<Value = ProbeConfig> {
    (
        1usize..=8,
        prop_oneof![Just(0.25f32), Just(0.5), Just(0.9), Just(1.0)],
        prop_oneof![Just(1usize), Just(3), Just(127)],
    )
        .prop_map(|(min, lf, gap)| {
            ProbeConfig::default()
                .with_min_capacity(min)
                .with_load_factor(lf)
                .with_probe_gap(gap)
        })
}

// Drives one scenario against a std HashMap model and checks structural
// invariants after every step.
fn run_scenario<S: BuildHasher>(
    mut sut: ProbeTable<String, i32, S>,
    pool: &[String],
    ops: Vec<OpI>,
) -> Result<(), TestCaseError> {
    let mut model: HashMap<String, i32> = HashMap::new();
    for op in ops {
        let cap_before = sut.capacity();
        match op {
            OpI::Put(i, v) => {
                let k = pool[i].clone();
                prop_assert_eq!(sut.put(k.clone(), v), model.insert(k, v));
            }
            OpI::Get(i) => {
                prop_assert_eq!(sut.get(pool[i].as_str()), model.get(&pool[i]));
            }
            OpI::Remove(i) => {
                prop_assert_eq!(sut.remove(pool[i].as_str()), model.remove(&pool[i]));
            }
            OpI::Mutate(i, d) => {
                if let Some(v) = sut.get_mut(pool[i].as_str()) {
                    *v = v.wrapping_add(d);
                }
                if let Some(v) = model.get_mut(&pool[i]) {
                    *v = v.wrapping_add(d);
                }
            }
            OpI::Iterate => {
                let s: BTreeMap<&String, &i32> = sut.iter().collect();
                let m: BTreeMap<&String, &i32> = model.iter().collect();
                prop_assert_eq!(s, m);
            }
        }

        prop_assert_eq!(sut.len(), model.len());
        prop_assert_eq!(sut.is_empty(), model.is_empty());
        prop_assert!(sut.len() <= sut.threshold(), "len exceeds threshold");
        prop_assert!(sut.capacity() >= cap_before, "capacity shrank");
        prop_assert!(sut.len() + sut.tombstones() <= sut.capacity());
    }
    // Every remaining key is still reachable after all growth.
    for (k, v) in &model {
        prop_assert_eq!(sut.get(k.as_str()), Some(v));
    }
    Ok(())
}

// Property: state-machine equivalence against std::collections::HashMap
// on small tables that grow often.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario(), config in small_config()) {
        let sut: ProbeTable<String, i32> = ProbeTable::with_config(0, config).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Collision variant: every key shares one home slot, so correctness rests
// entirely on the probe sequence and tombstone handling.
#[derive(Clone, Default)]
struct ConstBuildHasher;
struct ConstHasher;
impl BuildHasher for ConstBuildHasher {
    type Hasher = ConstHasher;
    fn build_hasher(&self) -> Self::Hasher {
        ConstHasher
    }
}
impl Hasher for ConstHasher {
    fn write(&mut self, _bytes: &[u8]) {}
    fn finish(&self) -> u64 {
        0
    }
}

proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine_with_collisions((pool, ops) in arb_scenario(), config in small_config()) {
        let sut: ProbeTable<String, i32, ConstBuildHasher> =
            ProbeTable::with_hasher(0, config, ConstBuildHasher).unwrap();
        run_scenario(sut, &pool, ops)?;
    }
}

// Property: growth never loses keys and strictly increases capacity.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_keeps_all_keys(keys in proptest::collection::hash_set(any::<u64>(), 1..400), config in small_config()) {
        let mut t: ProbeTable<u64, u64> = ProbeTable::with_config(0, config).unwrap();
        let start = t.capacity();
        let mut grew = false;
        for &k in &keys {
            let before = t.capacity();
            let at_threshold = t.len() >= t.threshold();
            prop_assert_eq!(t.put(k, k.wrapping_mul(3)), None);
            if at_threshold {
                prop_assert!(t.capacity() > before);
                grew = true;
            }
        }
        prop_assert_eq!(t.len(), keys.len());
        if keys.len() > config.threshold(start) {
            prop_assert!(grew);
        }
        for &k in &keys {
            prop_assert_eq!(t.get(&k), Some(&k.wrapping_mul(3)));
        }
    }
}
