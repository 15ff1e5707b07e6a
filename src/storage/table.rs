// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::Arc;

use tracing::debug;

use super::{Chunk, StorageError, StorageResult};
use crate::segment::{SegmentImpl, ValueSegmentImpl};
use crate::types::{ChunkId, ColumnCount, ColumnId, DataType, DataTypeKind, DataValue};

/// A descriptor of a column: its name, element type and nullability.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ColumnDesc {
    name: String,
    data_type: DataType,
}

impl ColumnDesc {
    pub fn new(name: String, data_type: DataType) -> Self {
        ColumnDesc { name, data_type }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn data_type(&self) -> DataType {
        self.data_type
    }

    pub fn kind(&self) -> DataTypeKind {
        self.data_type.kind()
    }

    pub fn is_nullable(&self) -> bool {
        self.data_type.is_nullable()
    }
}

/// A table: a schema plus an ordered sequence of chunks.
///
/// Rows are appended to the last chunk until it reaches
/// `target_chunk_size`, then a fresh chunk takes over. Every chunk except
/// possibly the last is therefore exactly full, and at least one chunk
/// exists at all times.
#[derive(Debug)]
pub struct Table {
    columns: Vec<ColumnDesc>,
    chunks: Vec<Chunk>,
    target_chunk_size: usize,
}

impl Table {
    pub fn new(target_chunk_size: usize) -> Self {
        assert!(target_chunk_size > 0, "target chunk size must be positive");
        let mut table = Table {
            columns: Vec::new(),
            chunks: Vec::new(),
            target_chunk_size,
        };
        table.create_new_chunk();
        table
    }

    /// Add a column to the schema.
    ///
    /// `type_name` is one of the runtime names `int`, `long`, `float`,
    /// `double`, `string`. Only an empty table can grow columns; every
    /// existing (empty) chunk is extended with a fresh mutable segment.
    pub fn add_column(
        &mut self,
        name: &str,
        type_name: &str,
        nullable: bool,
    ) -> StorageResult<ColumnId> {
        if self.row_count() != 0 {
            return Err(StorageError::AlterNonEmptyTable);
        }
        if self.columns.iter().any(|column| column.name() == name) {
            return Err(StorageError::Duplicated("column", name.into()));
        }
        let kind: DataTypeKind = type_name
            .parse()
            .map_err(|_| StorageError::UnknownDataType(type_name.into()))?;

        for chunk in &mut self.chunks {
            chunk.add_segment(Arc::new(ValueSegmentImpl::new(kind, nullable).into()));
        }
        self.columns
            .push(ColumnDesc::new(name.into(), DataType::new(kind, nullable)));
        Ok((self.columns.len() - 1) as ColumnId)
    }

    /// Append one row, rolling over to a new chunk when the current one
    /// is full.
    pub fn append(&mut self, values: &[DataValue]) -> StorageResult<()> {
        if values.len() != self.columns.len() {
            return Err(StorageError::ValueCountMismatch(
                values.len(),
                self.columns.len(),
            ));
        }
        if self.chunks.last().unwrap().size() >= self.target_chunk_size {
            debug!(
                chunk_id = self.chunks.len(),
                "chunk reached target size, starting a new one"
            );
            self.create_new_chunk();
        }
        self.chunks.last_mut().unwrap().append(values)
    }

    fn create_new_chunk(&mut self) {
        let mut chunk = Chunk::new();
        for column in &self.columns {
            chunk.add_segment(Arc::new(
                ValueSegmentImpl::new(column.kind(), column.is_nullable()).into(),
            ));
        }
        self.chunks.push(chunk);
    }

    /// Dictionary-encode every mutable segment of a chunk.
    ///
    /// The chunk keeps its column count and size; already-compressed
    /// segments are left alone. Callers must ensure no reader still holds
    /// a handle to a segment being swapped out.
    pub fn compress_chunk(&mut self, chunk_id: ChunkId) -> StorageResult<()> {
        let chunk_count = self.chunks.len();
        let chunk = self
            .chunks
            .get_mut(chunk_id as usize)
            .ok_or(StorageError::OutOfBounds(
                "chunk",
                chunk_id as usize,
                chunk_count,
            ))?;
        for column_id in 0..chunk.column_count() {
            let segment = chunk.get_segment(column_id)?;
            if let SegmentImpl::Value(value_segment) = &*segment {
                let compressed = value_segment.compress()?;
                chunk.replace_segment(column_id, compressed.into());
            }
        }
        debug!(chunk_id, "compressed chunk");
        Ok(())
    }

    /// Total number of rows. Every non-last chunk is exactly full.
    pub fn row_count(&self) -> usize {
        (self.chunks.len() - 1) * self.target_chunk_size + self.chunks.last().unwrap().size()
    }

    pub fn chunk_count(&self) -> usize {
        self.chunks.len()
    }

    pub fn column_count(&self) -> ColumnCount {
        self.columns.len() as ColumnCount
    }

    pub fn column_id_by_name(&self, name: &str) -> StorageResult<ColumnId> {
        self.columns
            .iter()
            .position(|column| column.name() == name)
            .map(|id| id as ColumnId)
            .ok_or_else(|| StorageError::NotFound("column", name.into()))
    }

    pub fn column_name(&self, column_id: ColumnId) -> StorageResult<&str> {
        self.column(column_id).map(|column| column.name())
    }

    pub fn column_type(&self, column_id: ColumnId) -> StorageResult<DataTypeKind> {
        self.column(column_id).map(|column| column.kind())
    }

    pub fn column_nullable(&self, column_id: ColumnId) -> StorageResult<bool> {
        self.column(column_id).map(|column| column.is_nullable())
    }

    fn column(&self, column_id: ColumnId) -> StorageResult<&ColumnDesc> {
        self.columns
            .get(column_id as usize)
            .ok_or(StorageError::OutOfBounds(
                "column",
                column_id as usize,
                self.columns.len(),
            ))
    }

    pub fn columns(&self) -> &[ColumnDesc] {
        &self.columns
    }

    pub fn column_names(&self) -> impl Iterator<Item = &str> {
        self.columns.iter().map(|column| column.name())
    }

    pub fn get_chunk(&self, chunk_id: ChunkId) -> StorageResult<&Chunk> {
        self.chunks
            .get(chunk_id as usize)
            .ok_or(StorageError::OutOfBounds(
                "chunk",
                chunk_id as usize,
                self.chunks.len(),
            ))
    }

    pub fn target_chunk_size(&self) -> usize {
        self.target_chunk_size
    }
}

#[cfg(test)]
mod tests {
    use itertools::Itertools;

    use super::*;
    use crate::segment::DictionarySegment;
    use crate::types::INVALID_VALUE_ID;

    fn test_table() -> Table {
        let mut table = Table::new(2);
        table.add_column("id", "int", false).unwrap();
        table.add_column("name", "string", true).unwrap();
        table
    }

    #[test]
    fn test_schema() {
        let table = test_table();
        assert_eq!(table.column_count(), 2);
        assert_eq!(table.column_id_by_name("name"), Ok(1));
        assert_eq!(
            table.column_id_by_name("age"),
            Err(StorageError::NotFound("column", "age".into()))
        );
        assert_eq!(table.column_name(0), Ok("id"));
        assert_eq!(table.column_type(1), Ok(DataTypeKind::String));
        assert_eq!(table.column_nullable(0), Ok(false));
        assert!(table.column_nullable(1).unwrap());
        assert!(table.column_name(2).is_err());
        assert_eq!(table.column_names().collect_vec(), ["id", "name"]);
        assert_eq!(table.target_chunk_size(), 2);
    }

    #[test]
    fn test_add_column_errors() {
        let mut table = test_table();
        assert_eq!(
            table.add_column("id", "long", false),
            Err(StorageError::Duplicated("column", "id".into()))
        );
        assert_eq!(
            table.add_column("age", "tinyint", false),
            Err(StorageError::UnknownDataType("tinyint".into()))
        );

        table
            .append(&[DataValue::Int32(1), DataValue::from("Bill")])
            .unwrap();
        assert_eq!(
            table.add_column("age", "int", false),
            Err(StorageError::AlterNonEmptyTable)
        );
    }

    #[test]
    fn test_chunk_rollover() {
        let mut table = Table::new(2);
        table.add_column("id", "int", false).unwrap();

        for i in 0..3 {
            table.append(&[DataValue::Int32(i)]).unwrap();
        }

        assert_eq!(table.chunk_count(), 2);
        assert_eq!(table.row_count(), 3);
        assert_eq!(table.get_chunk(0).unwrap().size(), 2);
        assert_eq!(table.get_chunk(1).unwrap().size(), 1);
        assert!(table.get_chunk(2).is_err());

        // a full last chunk only rolls over on the next append
        table.append(&[DataValue::Int32(3)]).unwrap();
        assert_eq!(table.chunk_count(), 2);
        assert_eq!(table.row_count(), 4);
        table.append(&[DataValue::Int32(4)]).unwrap();
        assert_eq!(table.chunk_count(), 3);
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    fn test_append_arity_mismatch() {
        let mut table = test_table();
        assert_eq!(
            table.append(&[DataValue::Int32(1)]),
            Err(StorageError::ValueCountMismatch(1, 2))
        );
        assert_eq!(table.row_count(), 0);
    }

    #[test]
    fn test_compress_chunk() {
        let mut table = test_table();
        let names = ["Bill", "Steve", "Bill", "Hasso"];
        for (i, name) in names.iter().enumerate() {
            table
                .append(&[DataValue::Int32(i as i32), DataValue::from(*name)])
                .unwrap();
        }

        table.compress_chunk(0).unwrap();
        // compressing twice is a no-op
        table.compress_chunk(0).unwrap();
        assert!(table.compress_chunk(9).is_err());

        let chunk = table.get_chunk(0).unwrap();
        assert_eq!(chunk.column_count(), 2);
        assert_eq!(chunk.size(), 2);

        let segment = chunk.get_segment(1).unwrap();
        let dict_segment: &DictionarySegment<String> = (&*segment).try_into().unwrap();
        assert_eq!(dict_segment.dictionary(), &["Bill", "Steve"]);
        assert_eq!(dict_segment.at(0), DataValue::from("Bill"));
        assert_eq!(dict_segment.lower_bound(&"Steve".into()), 1);
        assert_eq!(dict_segment.upper_bound(&"Steve".into()), INVALID_VALUE_ID);

        // the second chunk is untouched and still accepts appends
        table
            .append(&[DataValue::Int32(9), DataValue::Null])
            .unwrap();
        assert_eq!(table.row_count(), 5);
    }

    #[test]
    #[should_panic(expected = "target chunk size must be positive")]
    fn test_zero_target_chunk_size() {
        Table::new(0);
    }
}
