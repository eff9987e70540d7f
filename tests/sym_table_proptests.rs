// SymTable property tests on the public API.
//
// Property 1: distinct puts.
//  - Invariant: len == number of successful puts; contains/get hold for each.
//
// Property 2: duplicate puts.
//  - Invariant: a second put of any key fails, keeps len and the first value.
//
// Property 3: removal.
//  - Invariant: after remove(k), contains(k) is false; len drops by one iff
//    k was present.
use proptest::prelude::*;
use std::collections::BTreeSet;
use symtable::{PutError, SymTable};

proptest! {
    #[test]
    fn prop_distinct_puts(keys in proptest::collection::btree_set("[a-z0-9]{0,8}", 0..600)) {
        let mut t = SymTable::new();
        for (i, k) in keys.iter().enumerate() {
            prop_assert!(t.put(k, i).is_ok());
        }
        prop_assert_eq!(t.len(), keys.len());
        for (i, k) in keys.iter().enumerate() {
            prop_assert!(t.contains(k));
            prop_assert_eq!(t.get(k), Some(&i));
        }
    }

    #[test]
    fn prop_duplicate_put_is_rejected(keys in proptest::collection::vec("[a-c]{1,3}", 1..100)) {
        let mut t = SymTable::new();
        let mut first = std::collections::HashMap::new();
        for (i, k) in keys.iter().enumerate() {
            let before = t.len();
            match t.put(k, i) {
                Ok(()) => {
                    prop_assert!(first.insert(k.clone(), i).is_none());
                    prop_assert_eq!(t.len(), before + 1);
                }
                Err(PutError::DuplicateKey) => {
                    prop_assert_eq!(t.len(), before);
                    prop_assert_eq!(t.get(k), first.get(k));
                }
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
        }
    }

    #[test]
    fn prop_remove(keys in proptest::collection::btree_set("[a-z]{1,4}", 1..200),
                   probes in proptest::collection::vec("[a-z]{1,4}", 1..200)) {
        let mut t = SymTable::new();
        for k in &keys {
            t.put(k, ()).unwrap();
        }
        let mut live: BTreeSet<String> = keys.clone();
        for p in probes {
            let before = t.len();
            let was_present = live.remove(&p);
            prop_assert_eq!(t.remove(&p).is_some(), was_present);
            prop_assert!(!t.contains(&p));
            prop_assert_eq!(t.len(), before - usize::from(was_present));
        }
        prop_assert_eq!(t.len(), live.len());
    }
}
