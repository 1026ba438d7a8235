//! Property-based tests for History Manager operations.
//!
//! These tests verify that for arbitrary sequences of selections the stored
//! counts equal the number of selections per name, that the presented order
//! is count-descending with the most recent selection winning ties, and that
//! removals only ever affect the removed name.

use std::collections::HashMap;
use std::sync::Arc;

use mapsearch::database::Database;
use mapsearch::managers::history_manager::{HistoryManager, HistoryManagerTrait};
use mapsearch::stores::{MemoryHistoryStore, SqliteHistoryStore};
use mapsearch::types::history::HistoryEntry;
use proptest::prelude::*;

fn runtime() -> tokio::runtime::Runtime {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("Failed to build tokio runtime")
}

/// Small alphabet so that repeats and ties are common.
fn arb_name() -> impl Strategy<Value = String> {
    prop_oneof![
        Just("Seoul Station".to_string()),
        Just("Gangnam".to_string()),
        Just("Hongdae".to_string()),
        Just("Jamsil".to_string()),
        "[a-z]{1,6}",
    ]
}

fn record_all(mgr: &HistoryManager, names: &[String], rt: &tokio::runtime::Runtime) -> Vec<HistoryEntry> {
    rt.block_on(async {
        for name in names {
            mgr.record_selection(name)
                .await
                .expect("record_selection should succeed");
        }
        mgr.get_history().await.expect("get_history should succeed")
    })
}

// **Property: counts and order**
//
// *For any* sequence of selections, each name's count equals the number of
// times it was selected, and the list is ordered by count descending, with
// the name selected most recently first among equal counts.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(32))]

    #[test]
    fn history_counts_and_order(names in prop::collection::vec(arb_name(), 1..40)) {
        let rt = runtime();
        let mgr = HistoryManager::new(Arc::new(MemoryHistoryStore::new()));
        let history = record_all(&mgr, &names, &rt);

        let mut expected: HashMap<&str, (i64, usize)> = HashMap::new();
        for (i, name) in names.iter().enumerate() {
            let slot = expected.entry(name.as_str()).or_insert((0, i));
            slot.0 += 1;
            slot.1 = i;
        }

        prop_assert_eq!(history.len(), expected.len());
        for entry in &history {
            let (count, _) = expected[entry.name.as_str()];
            prop_assert_eq!(entry.count, count, "count mismatch for {}", entry.name);
        }

        for pair in history.windows(2) {
            let (a, b) = (&pair[0], &pair[1]);
            prop_assert!(a.count >= b.count, "{:?} must not precede {:?}", a, b);
            if a.count == b.count {
                let last_a = expected[a.name.as_str()].1;
                let last_b = expected[b.name.as_str()].1;
                prop_assert!(last_a > last_b, "tie between {} and {} broken by recency", a.name, b.name);
            }
        }
    }
}

// **Property: remove then list**
//
// *For any* recorded history and any recorded name, removing that name makes
// it disappear and leaves every other entry unchanged.
proptest! {
    #![proptest_config(ProptestConfig::with_cases(20))]

    #[test]
    fn history_remove_only_affects_target(
        names in prop::collection::vec(arb_name(), 1..25),
        pick in any::<prop::sample::Index>(),
    ) {
        let rt = runtime();
        let db = Database::open_in_memory().expect("Failed to open in-memory database");
        let mgr = HistoryManager::new(Arc::new(SqliteHistoryStore::new(Arc::new(db))));
        let before = record_all(&mgr, &names, &rt);

        let target = pick.get(&names).clone();
        let after = rt.block_on(async {
            mgr.remove_entry(&target).await.expect("remove_entry should succeed");
            mgr.get_history().await.expect("get_history should succeed")
        });

        prop_assert!(after.iter().all(|e| e.name != target));
        let expected: Vec<HistoryEntry> = before.into_iter().filter(|e| e.name != target).collect();
        prop_assert_eq!(after, expected);
    }
}
