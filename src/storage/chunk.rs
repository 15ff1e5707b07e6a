// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use super::{StorageError, StorageResult};
use crate::segment::{SegmentImpl, SegmentRef};
use crate::types::{ColumnCount, ColumnId, DataValue};

/// A horizontal partition of a table.
///
/// A chunk is a tuple of segments, one per column, all of the same
/// length. Segments are handed out as shared handles; the append path
/// copies-on-write, so readers holding an old handle keep their snapshot.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct Chunk {
    segments: SmallVec<[SegmentRef; 16]>,
}

impl Chunk {
    pub fn new() -> Self {
        Self::default()
    }

    /// Attach a segment as the next column.
    ///
    /// Legal only while the chunk is being built (construction, or schema
    /// extension while the chunk is still empty). No type checking
    /// happens at this layer.
    pub fn add_segment(&mut self, segment: SegmentRef) {
        self.segments.push(segment);
    }

    /// Append one row.
    ///
    /// Every column is validated (arity, mutability, nullability, type
    /// coercion) before any segment is touched, so a failed append leaves
    /// the chunk in its pre-operation state.
    pub fn append(&mut self, values: &[DataValue]) -> StorageResult<()> {
        let column_count = self.segments.len();
        if values.len() != column_count {
            return Err(StorageError::ValueCountMismatch(values.len(), column_count));
        }
        for (segment, value) in self.segments.iter().zip(values) {
            segment.check_append(value)?;
        }
        for (segment, value) in self.segments.iter_mut().zip(values) {
            Arc::make_mut(segment).append(value)?;
        }
        Ok(())
    }

    /// Shared handle to the segment of the given column.
    pub fn get_segment(&self, column_id: ColumnId) -> StorageResult<SegmentRef> {
        self.segments
            .get(column_id as usize)
            .cloned()
            .ok_or(StorageError::OutOfBounds(
                "column",
                column_id as usize,
                self.segments.len(),
            ))
    }

    /// Swap the segment of a column, preserving its length. Used when a
    /// mutable segment is replaced by its compressed form.
    pub(crate) fn replace_segment(&mut self, column_id: ColumnId, segment: SegmentImpl) {
        debug_assert_eq!(segment.size(), self.size());
        self.segments[column_id as usize] = Arc::new(segment);
    }

    /// Number of rows. All segments agree on this under the single-writer
    /// discipline.
    pub fn size(&self) -> usize {
        self.segments.first().map_or(0, |segment| segment.size())
    }

    pub fn column_count(&self) -> ColumnCount {
        self.segments.len() as ColumnCount
    }
}
