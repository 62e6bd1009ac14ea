#![cfg(test)]

// Property tests for ProbedMap kept inside the crate so they can run the
// full-table validator after every step.

use crate::probed_map::{InsertOutcome, ProbedMap, MIN_CAPACITY};
use hashbrown::HashMap;
use proptest::prelude::*;

// Pool-indexed operations: a small key pool forces overwrites, removals of
// live keys and tombstone reuse; indices shrink toward earlier keys.
#[derive(Clone, Debug)]
enum OpI {
    Insert(usize, i32),
    TryInsert(usize, i32),
    Remove(usize),
    Get(usize),
    GetMut(usize, i32),
    Contains(u32),
}

fn arb_scenario() -> impl Strategy<Value = (Vec<u32>, Vec<OpI>)> {
    proptest::collection::vec(any::<u32>(), 1..=24).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let op = prop_oneof![
            4 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Insert(i, v)),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::TryInsert(i, v)),
            3 => idx.clone().prop_map(OpI::Remove),
            2 => idx.clone().prop_map(OpI::Get),
            1 => (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::GetMut(i, d)),
            1 => any::<u32>().prop_map(OpI::Contains),
        ];
        proptest::collection::vec(op, 1..200).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against hashbrown::HashMap.
// Invariants exercised across random operation sequences:
// - Insert outcome is Overwrote iff the model already holds the key.
// - A reused slot never follows a growth (growth purges tombstones), and
//   growth resets occupied() to len().
// - Without growth, InsertedNew adds one occupied slot and the other
//   outcomes add none; remove never changes occupied().
// - get/contains_key/get_mut parity with the model.
// - Capacity is a power of two >= 8 that never shrinks; the full validator
//   passes after each op.
proptest! {
    #![proptest_config(ProptestConfig { cases: 128, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut = ProbedMap::new();
        let mut model: HashMap<u32, i32> = HashMap::new();

        for op in ops {
            let cap_before = sut.capacity();
            let occ_before = sut.occupied();
            match op {
                OpI::Insert(i, v) | OpI::TryInsert(i, v) => {
                    let k = pool[i];
                    let outcome = if matches!(op, OpI::TryInsert(..)) {
                        sut.try_insert(k, v).expect("small maps always allocate")
                    } else {
                        sut.insert(k, v)
                    };
                    let had = model.insert(k, v).is_some();
                    prop_assert_eq!(outcome == InsertOutcome::Overwrote, had);
                    if sut.capacity() != cap_before {
                        prop_assert_eq!(sut.capacity(), cap_before * 2);
                        prop_assert_ne!(outcome, InsertOutcome::InsertedReusedSlot);
                        prop_assert_eq!(sut.occupied(), sut.len());
                    } else {
                        let expect = match outcome {
                            InsertOutcome::InsertedNew => occ_before + 1,
                            _ => occ_before,
                        };
                        prop_assert_eq!(sut.occupied(), expect);
                    }
                }
                OpI::Remove(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(&k));
                    prop_assert_eq!(sut.occupied(), occ_before);
                    prop_assert_eq!(sut.capacity(), cap_before);
                    prop_assert!(!sut.contains_key(k));
                }
                OpI::Get(i) => {
                    let k = pool[i];
                    prop_assert_eq!(sut.get(k), model.get(&k).copied());
                }
                OpI::GetMut(i, d) => {
                    let k = pool[i];
                    match (sut.get_mut(k), model.get_mut(&k)) {
                        (Some(a), Some(b)) => {
                            *a = a.wrapping_add(d);
                            *b = b.wrapping_add(d);
                        }
                        (None, None) => {}
                        (a, b) => prop_assert!(false, "get_mut parity: {:?} vs {:?}", a, b),
                    }
                }
                OpI::Contains(k) => {
                    prop_assert_eq!(sut.contains_key(k), model.contains_key(&k));
                }
            }

            prop_assert!(sut.capacity() >= cap_before);
            prop_assert!(sut.capacity() >= MIN_CAPACITY);
            prop_assert_eq!(sut.len(), model.len());
            if let Err(e) = sut.validate() {
                prop_assert!(false, "validate failed: {}", e);
            }
        }

        let mut seen: Vec<(u32, i32)> = sut.iter().collect();
        let mut expected: Vec<(u32, i32)> = model.into_iter().collect();
        seen.sort_unstable();
        expected.sort_unstable();
        prop_assert_eq!(seen, expected);
    }
}

// Property: growth re-places every live entry. Inserting many distinct keys
// then removing a subset leaves exactly the survivors, whatever the resizes.
proptest! {
    #![proptest_config(ProptestConfig { cases: 32, .. ProptestConfig::default() })]
    #[test]
    fn prop_bulk_insert_then_remove(
        keys in proptest::collection::hash_set(any::<u32>(), 100..400),
        drop_every in 2usize..6,
    ) {
        let keys: Vec<u32> = keys.into_iter().collect();
        let mut sut = ProbedMap::new();
        for (i, &k) in keys.iter().enumerate() {
            prop_assert_eq!(sut.insert(k, i as i32), InsertOutcome::InsertedNew);
        }
        prop_assert_eq!(sut.len(), keys.len());

        for (i, &k) in keys.iter().enumerate() {
            if i % drop_every == 0 {
                prop_assert_eq!(sut.remove(k), Some(i as i32));
            }
        }
        for (i, &k) in keys.iter().enumerate() {
            let expect = if i % drop_every == 0 { None } else { Some(i as i32) };
            prop_assert_eq!(sut.get(k), expect);
        }
        if let Err(e) = sut.validate() {
            prop_assert!(false, "validate failed: {}", e);
        }
    }
}
