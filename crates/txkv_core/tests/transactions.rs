//! End-to-end transaction behavior.

use txkv_core::{Store, StoreError, StoreResult};

#[test]
fn fresh_store_reports_missing_keys() {
    let store = Store::new();
    assert!(matches!(
        store.get("anything"),
        Err(StoreError::KeyNotFound { .. })
    ));
}

#[test]
fn mutation_outside_transaction_leaves_store_empty() {
    let store = Store::new();

    assert_eq!(store.put("x", 5), Err(StoreError::NoActiveTransaction));
    assert!(matches!(store.get("x"), Err(StoreError::KeyNotFound { .. })));
    assert!(store.is_empty());
}

#[test]
fn uncommitted_writes_do_not_reach_committed_state() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("k", 7).unwrap();

    // An independent reader of the committed state sees nothing
    assert!(store.is_empty());
    assert!(store.keys().is_empty());

    store.rollback_transaction().unwrap();
    assert!(matches!(store.get("k"), Err(StoreError::KeyNotFound { .. })));
}

#[test]
fn commit_is_all_or_nothing() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("a", 1).unwrap();
    store.put("b", 2).unwrap();
    store.commit_transaction().unwrap();

    assert_eq!(store.get("a").unwrap(), 1);
    assert_eq!(store.get("b").unwrap(), 2);
}

#[test]
fn rollback_is_all_or_nothing() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("a", 1).unwrap();
    store.put("b", 2).unwrap();
    store.rollback_transaction().unwrap();

    assert!(matches!(store.get("a"), Err(StoreError::KeyNotFound { .. })));
    assert!(matches!(store.get("b"), Err(StoreError::KeyNotFound { .. })));
}

#[test]
fn double_begin_fails_without_disturbing_staged_state() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("a", 1).unwrap();

    assert_eq!(
        store.begin_transaction(),
        Err(StoreError::TransactionAlreadyActive)
    );

    store.commit_transaction().unwrap();
    assert_eq!(store.get("a").unwrap(), 1);
}

#[test]
fn balance_and_savings_scenario() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("balance", 100).unwrap();
    store.put("savings", 500).unwrap();
    store.commit_transaction().unwrap();

    assert_eq!(store.get("balance").unwrap(), 100);
    assert_eq!(store.get("savings").unwrap(), 500);
}

#[test]
fn rollback_preserves_pre_transaction_value() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("balance", 100).unwrap();
    store.commit_transaction().unwrap();

    store.begin_transaction().unwrap();
    store.put("balance", 200).unwrap();
    store.rollback_transaction().unwrap();

    assert_eq!(store.get("balance").unwrap(), 100);
}

#[test]
fn new_transaction_reads_fall_through_to_committed() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("k", 42).unwrap();
    store.commit_transaction().unwrap();

    // A key this transaction never touched resolves to the committed
    // value, not a miss
    store.begin_transaction().unwrap();
    assert_eq!(store.get("k").unwrap(), 42);
    store.rollback_transaction().unwrap();
}

#[test]
fn delete_lifecycle() {
    let store = Store::new();
    store.begin_transaction().unwrap();
    store.put("k", 1).unwrap();
    store.commit_transaction().unwrap();

    store.begin_transaction().unwrap();
    store.delete("k").unwrap();
    // Hidden from this transaction already
    assert!(matches!(store.get("k"), Err(StoreError::KeyNotFound { .. })));
    store.commit_transaction().unwrap();

    assert!(matches!(store.get("k"), Err(StoreError::KeyNotFound { .. })));
    assert!(store.is_empty());
}

#[test]
fn closure_transaction_round_trip() {
    let store = Store::new();

    store
        .transaction(|s| {
            s.put("a", 1)?;
            s.put("b", 2)?;
            Ok(())
        })
        .unwrap();

    let failed: StoreResult<()> = store.transaction(|s| {
        s.put("a", 99)?;
        s.get("nope").map(|_| ())
    });
    assert!(matches!(failed, Err(StoreError::KeyNotFound { .. })));

    // The failed transaction rolled back; the first one's values survive
    assert_eq!(store.get("a").unwrap(), 1);
    assert_eq!(store.get("b").unwrap(), 2);
}

mod properties {
    use super::*;
    use proptest::prelude::*;
    use std::collections::HashMap;

    /// Operations drawn over a small key space so sequences collide often.
    #[derive(Debug, Clone)]
    enum Op {
        Begin,
        Commit,
        Rollback,
        Put(u8, i64),
        Delete(u8),
        Get(u8),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Begin),
            Just(Op::Commit),
            Just(Op::Rollback),
            (0u8..4, any::<i64>()).prop_map(|(k, v)| Op::Put(k, v)),
            (0u8..4).prop_map(Op::Delete),
            (0u8..4).prop_map(Op::Get),
        ]
    }

    fn key_name(k: u8) -> String {
        format!("k{k}")
    }

    proptest! {
        /// Drives the store and a plain map-plus-overlay model through the
        /// same operation sequence and checks they never disagree.
        #[test]
        fn store_matches_reference_model(
            ops in proptest::collection::vec(op_strategy(), 1..64)
        ) {
            let store = Store::new();
            let mut committed: HashMap<String, i64> = HashMap::new();
            // Staged overlay: Some(value) stages a put, None a delete
            let mut open: Option<HashMap<String, Option<i64>>> = None;

            for op in ops {
                match op {
                    Op::Begin => {
                        let result = store.begin_transaction();
                        if open.is_none() {
                            prop_assert!(result.is_ok());
                            open = Some(HashMap::new());
                        } else {
                            prop_assert_eq!(
                                result,
                                Err(StoreError::TransactionAlreadyActive)
                            );
                        }
                    }
                    Op::Commit => {
                        let result = store.commit_transaction();
                        match open.take() {
                            Some(staged) => {
                                prop_assert!(result.is_ok());
                                for (key, write) in staged {
                                    match write {
                                        Some(value) => {
                                            committed.insert(key, value);
                                        }
                                        None => {
                                            committed.remove(&key);
                                        }
                                    }
                                }
                            }
                            None => prop_assert_eq!(
                                result,
                                Err(StoreError::NoActiveTransaction)
                            ),
                        }
                    }
                    Op::Rollback => {
                        let result = store.rollback_transaction();
                        prop_assert_eq!(result.is_ok(), open.take().is_some());
                    }
                    Op::Put(k, v) => {
                        let key = key_name(k);
                        let result = store.put(&key, v);
                        match open.as_mut() {
                            Some(staged) => {
                                prop_assert!(result.is_ok());
                                staged.insert(key, Some(v));
                            }
                            None => prop_assert_eq!(
                                result,
                                Err(StoreError::NoActiveTransaction)
                            ),
                        }
                    }
                    Op::Delete(k) => {
                        let key = key_name(k);
                        let result = store.delete(&key);
                        match open.as_mut() {
                            Some(staged) => {
                                prop_assert!(result.is_ok());
                                staged.insert(key, None);
                            }
                            None => prop_assert_eq!(
                                result,
                                Err(StoreError::NoActiveTransaction)
                            ),
                        }
                    }
                    Op::Get(k) => {
                        let key = key_name(k);
                        let expected = match open.as_ref().and_then(|s| s.get(&key)) {
                            Some(Some(v)) => Some(*v),
                            Some(None) => None,
                            None => committed.get(&key).copied(),
                        };
                        match store.get(&key) {
                            Ok(v) => prop_assert_eq!(Some(v), expected),
                            Err(StoreError::KeyNotFound { .. }) => {
                                prop_assert_eq!(expected, None);
                            }
                            Err(e) => prop_assert!(false, "unexpected error: {e}"),
                        }
                    }
                }
            }

            // Settle any open transaction, then the committed views must agree
            if open.is_some() {
                store.rollback_transaction().unwrap();
            }
            prop_assert_eq!(store.len(), committed.len());
            for (key, value) in &committed {
                prop_assert_eq!(store.get(key).unwrap(), *value);
            }
        }
    }
}
