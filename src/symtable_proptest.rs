#![cfg(test)]

// Property tests for SymTable kept inside the crate so they can call the
// structural invariant check after every step.

use crate::error::PutError;
use crate::list_table::ListSymTable;
use crate::sym_table::SymTable;
use proptest::prelude::*;
use std::collections::{BTreeMap, HashMap};

// Pool-indexed operations to improve shrinking: indices shrink to earlier keys,
// pool length shrinks, and op lists shrink in length.
#[derive(Clone, Debug)]
enum OpI {
    Put(usize, i32),
    Replace(usize, i32),
    Remove(usize),
    Get(usize),
    Contains(String),
    Mutate(usize, i32),
    Map,
}

fn arb_scenario() -> impl Strategy<Value = (Vec<String>, Vec<OpI>)> {
    proptest::collection::vec("[a-zA-Z]{0,5}", 1..=12).prop_flat_map(|pool| {
        let idxs: Vec<usize> = (0..pool.len()).collect();
        let idx = proptest::sample::select(idxs);
        let contains_pool = proptest::sample::select(pool.clone());
        let op = prop_oneof![
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Put(i, v)),
            (idx.clone(), any::<i32>()).prop_map(|(i, v)| OpI::Replace(i, v)),
            idx.clone().prop_map(OpI::Remove),
            idx.clone().prop_map(OpI::Get),
            prop_oneof![contains_pool, "[a-zA-Z]{0,5}"].prop_map(OpI::Contains),
            (idx.clone(), any::<i32>()).prop_map(|(i, d)| OpI::Mutate(i, d)),
            Just(OpI::Map),
        ];
        proptest::collection::vec(op, 1..80).prop_map(move |ops| (pool.clone(), ops))
    })
}

// Property: State-machine equivalence against std::collections::HashMap.
// Invariants exercised across random operation sequences:
// - `put` fails with DuplicateKey exactly when the key is bound, leaving the value.
// - `replace`/`remove` return the model's previous value, or None when absent.
// - `get`/`contains` parity with the model; `map` visits the model's bindings once.
// - `len` parity, and the structural check (bucket placement, no duplicate keys).
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_state_machine((pool, ops) in arb_scenario()) {
        let mut sut: SymTable<i32> = SymTable::new();
        let mut model: HashMap<String, i32> = HashMap::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => {
                    let k = &pool[i];
                    let already = model.contains_key(k);
                    match sut.put(k, v) {
                        Ok(()) => {
                            prop_assert!(!already, "put must fail on duplicate");
                            model.insert(k.clone(), v);
                        }
                        Err(PutError::DuplicateKey) => {
                            prop_assert!(already, "duplicate error only when key exists");
                        }
                        Err(e) => prop_assert!(false, "unexpected error {:?}", e),
                    }
                }
                OpI::Replace(i, v) => {
                    let k = &pool[i];
                    let expected = model.get_mut(k).map(|slot| std::mem::replace(slot, v));
                    prop_assert_eq!(sut.replace(k, v), expected);
                }
                OpI::Remove(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.remove(k), model.remove(k));
                    prop_assert!(!sut.contains(k));
                }
                OpI::Get(i) => {
                    let k = &pool[i];
                    prop_assert_eq!(sut.get(k), model.get(k));
                }
                OpI::Contains(s) => {
                    prop_assert_eq!(sut.contains(&s), model.contains_key(&s));
                }
                OpI::Mutate(i, d) => {
                    let k = &pool[i];
                    if let Some(v) = sut.get_mut(k) {
                        *v = v.saturating_add(d);
                        let mv = model.get_mut(k).expect("model has key");
                        *mv = mv.saturating_add(d);
                    } else {
                        prop_assert!(!model.contains_key(k));
                    }
                }
                OpI::Map => {
                    let mut seen = BTreeMap::new();
                    let mut dup = false;
                    sut.map(|k, v| dup |= seen.insert(k.to_string(), *v).is_some());
                    prop_assert!(!dup, "map visited a binding twice");
                    let expected: BTreeMap<_, _> =
                        model.iter().map(|(k, v)| (k.clone(), *v)).collect();
                    prop_assert_eq!(seen, expected);
                }
            }

            prop_assert_eq!(sut.len(), model.len());
            prop_assert_eq!(sut.is_empty(), model.is_empty());
            sut.check_invariants();
        }
    }
}

// Property: the list variant and the hash variant answer every operation
// identically, and hold the same bindings afterwards.
proptest! {
    #![proptest_config(ProptestConfig { cases: 64, .. ProptestConfig::default() })]
    #[test]
    fn prop_list_matches_hash((pool, ops) in arb_scenario()) {
        let mut hash: SymTable<i32> = SymTable::new();
        let mut list: ListSymTable<i32> = ListSymTable::new();

        for op in ops {
            match op {
                OpI::Put(i, v) => prop_assert_eq!(hash.put(&pool[i], v), list.put(&pool[i], v)),
                OpI::Replace(i, v) => {
                    prop_assert_eq!(hash.replace(&pool[i], v), list.replace(&pool[i], v))
                }
                OpI::Remove(i) => prop_assert_eq!(hash.remove(&pool[i]), list.remove(&pool[i])),
                OpI::Get(i) => prop_assert_eq!(hash.get(&pool[i]), list.get(&pool[i])),
                OpI::Contains(s) => prop_assert_eq!(hash.contains(&s), list.contains(&s)),
                OpI::Mutate(i, d) => {
                    if let Some(v) = hash.get_mut(&pool[i]) { *v = v.wrapping_add(d); }
                    if let Some(v) = list.get_mut(&pool[i]) { *v = v.wrapping_add(d); }
                }
                OpI::Map => {}
            }
            prop_assert_eq!(hash.len(), list.len());
        }

        let a: BTreeMap<_, _> = hash.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        let b: BTreeMap<_, _> = list.iter().map(|(k, v)| (k.to_string(), *v)).collect();
        prop_assert_eq!(a, b);
    }
}

// Property: inserting enough keys to cross several growth steps never changes
// what earlier keys resolve to.
proptest! {
    #![proptest_config(ProptestConfig { cases: 8, .. ProptestConfig::default() })]
    #[test]
    fn prop_growth_is_transparent(n in 400usize..3000, seed in any::<u32>()) {
        let mut sut: SymTable<usize> = SymTable::new();
        let keys: Vec<String> = (0..n).map(|i| format!("{seed:x}-{i}")).collect();
        for (i, k) in keys.iter().enumerate() {
            sut.put(k, i).expect("distinct keys");
            prop_assert!(sut.len() <= sut.capacity() || sut.capacity() == 65521);
        }
        prop_assert_eq!(sut.len(), n);
        for (i, k) in keys.iter().enumerate() {
            prop_assert_eq!(sut.get(k), Some(&i));
        }
        sut.check_invariants();
    }
}
