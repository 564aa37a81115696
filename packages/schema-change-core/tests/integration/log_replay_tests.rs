//! Appending schema-change records to a log file and replaying them.

use std::collections::BTreeMap;
use std::fs::{File, OpenOptions};
use std::io::{BufReader, BufWriter, Seek, SeekFrom, Write};

use ntest::timeout;
use tempfile::tempdir;

use schema_change_core::catalog::{Column, Index, IndexType};
use schema_change_core::error::PersistError;
use schema_change_core::persistence::{SchemaChangeRecord, Writable};

fn record_for_job(job_id: i64) -> SchemaChangeRecord {
    let base = vec![
        Column::new("k1", "BIGINT").with_key().with_unique_id(0),
        Column::new(format!("v{}", job_id), "VARCHAR(64)").with_unique_id(job_id as i32),
    ];
    SchemaChangeRecord::new(
        5,
        50,
        500,
        BTreeMap::from([(500, base)]),
        BTreeMap::from([(500, vec![Column::new("k1", "BIGINT").with_key()])]),
        BTreeMap::from([("t".to_string(), 500)]),
        vec![Index::new(
            job_id,
            format!("idx_v{}", job_id),
            vec![format!("v{}", job_id)],
            IndexType::Inverted,
        )],
        job_id,
        format!("ALTER TABLE t ADD COLUMN v{} VARCHAR(64)", job_id),
    )
}

#[timeout(2000)]
#[test]
fn test_append_and_replay_log_file() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("edit.log");

    let records: Vec<SchemaChangeRecord> = (1..=5).map(record_for_job).collect();
    {
        let mut out = BufWriter::new(File::create(&path).unwrap());
        for record in &records {
            record.write(&mut out).unwrap();
        }
        out.flush().unwrap();
    }

    let file_len = std::fs::metadata(&path).unwrap().len();
    let mut input = BufReader::new(File::open(&path).unwrap());
    let mut replayed = Vec::new();
    for _ in 0..records.len() {
        replayed.push(SchemaChangeRecord::read(&mut input).unwrap());
    }
    assert_eq!(input.stream_position().unwrap(), file_len);

    for (original, replayed) in records.iter().zip(&replayed) {
        assert!(replayed.is_identical(original));
    }
}

#[timeout(2000)]
#[test]
fn test_replay_is_idempotent() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("edit.log");

    let record = record_for_job(42);
    {
        let mut out = File::create(&path).unwrap();
        record.write(&mut out).unwrap();
    }

    let first = SchemaChangeRecord::read(&mut File::open(&path).unwrap()).unwrap();
    let second = SchemaChangeRecord::read(&mut File::open(&path).unwrap()).unwrap();
    assert!(first.is_identical(&second));
}

#[timeout(2000)]
#[test]
fn test_torn_tail_is_io_error() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("edit.log");

    {
        let mut out = File::create(&path).unwrap();
        record_for_job(1).write(&mut out).unwrap();
        record_for_job(2).write(&mut out).unwrap();
    }

    // Simulate a crash in the middle of the second append
    let len = std::fs::metadata(&path).unwrap().len();
    let file = OpenOptions::new().write(true).open(&path).unwrap();
    file.set_len(len - 10).unwrap();

    let mut input = File::open(&path).unwrap();
    assert_eq!(SchemaChangeRecord::read(&mut input).unwrap().job_id(), 1);
    let err = SchemaChangeRecord::read(&mut input).unwrap_err();
    assert!(matches!(err, PersistError::Io(_)));
}

#[timeout(2000)]
#[test]
fn test_corrupt_payload_is_malformed() {
    let temp_dir = tempdir().unwrap();
    let path = temp_dir.path().join("edit.log");

    {
        let mut out = File::create(&path).unwrap();
        record_for_job(1).write(&mut out).unwrap();
    }

    // Overwrite the opening brace of the JSON payload
    let mut file = OpenOptions::new().write(true).open(&path).unwrap();
    file.seek(SeekFrom::Start(4)).unwrap();
    file.write_all(b"#").unwrap();
    drop(file);

    let err = SchemaChangeRecord::read(&mut File::open(&path).unwrap()).unwrap_err();
    assert!(err.is_malformed());
}
