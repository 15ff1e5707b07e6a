// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

//! An in-memory columnar storage core.
//!
//! A [`Table`](storage::Table) stores rows as a sequence of fixed-capacity
//! horizontal partitions ([`Chunk`](storage::Chunk)s). Each chunk holds one
//! vertical slice per column: a [`ValueSegment`](segment::ValueSegment) while
//! rows are being ingested, or a read-optimized
//! [`DictionarySegment`](segment::DictionarySegment) after compression.
//! Untyped values enter and leave the core as [`DataValue`](types::DataValue)
//! variants; the [`StorageManager`](storage::StorageManager) maps table names
//! to shared table handles.

#![deny(unused_must_use)]

pub mod segment;
pub mod storage;
pub mod types;
