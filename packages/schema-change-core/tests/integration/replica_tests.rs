//! Records shipped to a replica and shared across threads.

use std::collections::BTreeMap;
use std::collections::HashSet;
use std::sync::Arc;
use std::thread;

use ntest::timeout;

use schema_change_core::catalog::Column;
use schema_change_core::persistence::{SchemaChangeRecord, Writable};

fn drop_column_record(base_index_id: i64, raw_sql: &str) -> SchemaChangeRecord {
    let before = vec![
        Column::new("k1", "INT").with_key(),
        Column::new("v1", "INT"),
        Column::new("v2", "INT"),
    ];
    let after = vec![Column::new("k1", "INT").with_key(), Column::new("v1", "INT")];
    SchemaChangeRecord::new(
        3,
        30,
        base_index_id,
        BTreeMap::from([(300, after)]),
        BTreeMap::from([(base_index_id, before)]),
        BTreeMap::from([("t".to_string(), base_index_id)]),
        Vec::new(),
        12,
        raw_sql,
    )
}

#[timeout(1000)]
#[test]
fn test_replica_copy_equals_source() {
    let source = drop_column_record(300, "ALTER TABLE t DROP COLUMN v2");
    // A replica remaps the base index and rewrites the statement
    let replica = drop_column_record(9300, "ALTER TABLE `db`.`t` DROP COLUMN v2");

    assert_eq!(source, replica);
    let set: HashSet<SchemaChangeRecord> = [source, replica].into_iter().collect();
    assert_eq!(set.len(), 1);
}

#[timeout(1000)]
#[test]
fn test_shared_across_threads() {
    let record = Arc::new(drop_column_record(300, "ALTER TABLE t DROP COLUMN v2"));
    let expected = record.to_json().unwrap();

    let handles: Vec<_> = (0..4)
        .map(|_| {
            let record = Arc::clone(&record);
            thread::spawn(move || {
                let mut buf = Vec::new();
                record.write(&mut buf).unwrap();
                SchemaChangeRecord::read(&mut buf.as_slice()).unwrap()
            })
        })
        .collect();

    for handle in handles {
        let replayed = handle.join().unwrap();
        assert!(replayed.is_identical(&record));
        assert_eq!(replayed.to_json().unwrap(), expected);
    }
}
