// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::{Arc, RwLock};

use granite::segment::{DictionarySegment, SegmentImpl};
use granite::storage::{StorageManager, Table};
use granite::types::{DataValue, F64};

fn sample_table() -> Table {
    let mut table = Table::new(4);
    table.add_column("id", "int", false).unwrap();
    table.add_column("score", "double", true).unwrap();
    table.add_column("city", "string", true).unwrap();
    table
}

#[test]
fn test_ingest_compress_read() {
    let mut table = sample_table();
    let cities = ["Berlin", "Potsdam", "Berlin", "Walldorf", "Potsdam", "Berlin"];
    for (i, city) in cities.iter().enumerate() {
        let score = if i % 2 == 0 {
            DataValue::from(i as f64 / 2.0)
        } else {
            DataValue::Null
        };
        table
            .append(&[DataValue::Int32(i as i32), score, DataValue::from(*city)])
            .unwrap();
    }

    assert_eq!(table.row_count(), 6);
    assert_eq!(table.chunk_count(), 2);

    table.compress_chunk(0).unwrap();
    assert_eq!(table.row_count(), 6);

    // the compressed chunk serves the same rows as the mutable one did
    let chunk = table.get_chunk(0).unwrap();
    assert_eq!(chunk.size(), 4);
    for i in 0..4 {
        assert_eq!(
            chunk.get_segment(0).unwrap().at(i),
            DataValue::Int32(i as i32)
        );
        assert_eq!(chunk.get_segment(2).unwrap().at(i), DataValue::from(cities[i]));
    }
    assert_eq!(chunk.get_segment(1).unwrap().at(1), DataValue::Null);

    // dictionaries are sorted and deduplicated per chunk
    let city_segment = chunk.get_segment(2).unwrap();
    let city_dict: &DictionarySegment<String> = (&*city_segment).try_into().unwrap();
    assert_eq!(city_dict.dictionary(), &["Berlin", "Potsdam", "Walldorf"]);

    let score_segment = chunk.get_segment(1).unwrap();
    let score_dict: &DictionarySegment<F64> = (&*score_segment).try_into().unwrap();
    assert_eq!(score_dict.unique_values_count(), 2);
    assert_eq!(score_dict.attribute_vector().width(), 1);

    // the last chunk is still mutable
    let last = table.get_chunk(1).unwrap();
    assert!(matches!(
        &*last.get_segment(0).unwrap(),
        SegmentImpl::Value(_)
    ));
    table
        .append(&[
            DataValue::Int32(6),
            DataValue::Null,
            DataValue::from("Potsdam"),
        ])
        .unwrap();
    assert_eq!(table.row_count(), 7);
}

#[test]
fn test_storage_manager_round_trip() {
    let manager = StorageManager::get();
    manager
        .add_table("round_trip", Arc::new(RwLock::new(sample_table())))
        .unwrap();

    let table = manager.get_table("round_trip").unwrap();
    table
        .write()
        .unwrap()
        .append(&[
            DataValue::Int32(1),
            DataValue::from(0.5f64),
            DataValue::Null,
        ])
        .unwrap();
    assert_eq!(table.read().unwrap().row_count(), 1);

    let mut out = Vec::new();
    manager.print(&mut out).unwrap();
    let dump = String::from_utf8(out).unwrap();
    assert!(dump.contains("=== round_trip ==="));
    assert!(dump.contains("  score (double)"));

    manager.drop_table("round_trip").unwrap();
    assert!(!manager.has_table("round_trip"));
}
