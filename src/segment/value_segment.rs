// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::mem;

use bitvec::vec::BitVec;
use serde::{Deserialize, Serialize};

use crate::storage::{StorageError, StorageResult};
use crate::types::{DataValue, ElementType};

/// A mutable, append-only column slice.
///
/// Values are stored uncompressed in insertion order. A NULL cell keeps a
/// default dummy in `values` and raises the matching bit in `null_flags`;
/// the dummy is never observable through the accessors. `values` and
/// `null_flags` always have the same length.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ValueSegment<T: ElementType> {
    values: Vec<T>,
    null_flags: BitVec,
    nullable: bool,
}

impl<T: ElementType> ValueSegment<T> {
    pub fn new(nullable: bool) -> Self {
        Self {
            values: Vec::new(),
            null_flags: BitVec::new(),
            nullable,
        }
    }

    /// Append a runtime value at the end of the segment.
    ///
    /// NULL fails on a non-nullable segment; a non-NULL value is coerced
    /// to `T` first and nothing is pushed until the coercion has
    /// succeeded, so `values` and `null_flags` move together.
    pub fn append(&mut self, value: &DataValue) -> StorageResult<()> {
        if value.is_null() {
            if !self.nullable {
                return Err(StorageError::NullNotAllowed);
            }
            self.values.push(T::default());
            self.null_flags.push(true);
        } else {
            let value = T::from_value(value)?;
            self.values.push(value);
            self.null_flags.push(false);
        }
        Ok(())
    }

    /// Check whether [`append`](Self::append) would succeed, without
    /// mutating the segment.
    pub fn check_append(&self, value: &DataValue) -> StorageResult<()> {
        if value.is_null() {
            if !self.nullable {
                return Err(StorageError::NullNotAllowed);
            }
            return Ok(());
        }
        T::from_value(value)?;
        Ok(())
    }

    /// Returns whether the value at `index` is NULL.
    pub fn is_null(&self, index: usize) -> bool {
        self.nullable && self.null_flags[index]
    }

    /// Returns the value at `index`, failing on NULL.
    pub fn get(&self, index: usize) -> StorageResult<&T> {
        self.get_typed(index).ok_or(StorageError::NullValue(index))
    }

    /// Returns the value at `index`, or `None` on NULL.
    pub fn get_typed(&self, index: usize) -> Option<&T> {
        if self.is_null(index) {
            return None;
        }
        Some(&self.values[index])
    }

    /// Returns the value at `index` wrapped in the runtime variant.
    pub fn at(&self, index: usize) -> DataValue {
        match self.get_typed(index) {
            Some(value) => value.to_value(),
            None => DataValue::Null,
        }
    }

    pub fn size(&self) -> usize {
        self.values.len()
    }

    /// All values, NULL dummies included. Prefer this over repeated `get`
    /// calls when walking the whole segment.
    pub fn values(&self) -> &[T] {
        &self.values
    }

    /// The NULL bitmap, raised at NULL positions. Fails if the segment is
    /// not nullable.
    pub fn null_values(&self) -> StorageResult<&BitVec> {
        if !self.nullable {
            return Err(StorageError::NotNullable);
        }
        Ok(&self.null_flags)
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.size() * mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_append_and_get() {
        let mut segment = ValueSegment::<i32>::new(false);
        segment.append(&DataValue::Int32(4)).unwrap();
        segment.append(&DataValue::Int64(6)).unwrap();
        assert_eq!(segment.size(), 2);
        assert_eq!(segment.get(0), Ok(&4));
        assert_eq!(segment.get_typed(1), Some(&6));
        assert_eq!(segment.at(1), DataValue::Int32(6));
        assert_eq!(segment.values(), &[4, 6]);
    }

    #[test]
    fn test_null_discipline() {
        let mut segment = ValueSegment::<String>::new(true);
        segment.append(&DataValue::from("Bill")).unwrap();
        segment.append(&DataValue::Null).unwrap();
        assert!(!segment.is_null(0));
        assert!(segment.is_null(1));
        assert_eq!(segment.get(1), Err(StorageError::NullValue(1)));
        assert_eq!(segment.get_typed(1), None);
        assert_eq!(segment.at(1), DataValue::Null);
        assert_eq!(segment.null_values().unwrap().count_ones(), 1);

        let mut strict = ValueSegment::<String>::new(false);
        assert_eq!(
            strict.append(&DataValue::Null),
            Err(StorageError::NullNotAllowed)
        );
        assert_eq!(strict.size(), 0);
        assert!(strict.null_values().is_err());
    }

    #[test]
    fn test_type_mismatch_leaves_segment_unchanged() {
        let mut segment = ValueSegment::<i64>::new(false);
        segment.append(&DataValue::Int32(1)).unwrap();
        assert!(segment.append(&DataValue::from("two")).is_err());
        assert_eq!(segment.size(), 1);
        assert_eq!(segment.null_values().unwrap_err(), StorageError::NotNullable);
    }

    #[test]
    fn test_flags_track_values() {
        let mut segment = ValueSegment::<F64>::new(true);
        for i in 0..100 {
            let value = if i % 3 == 0 {
                DataValue::Null
            } else {
                DataValue::from(i as f64)
            };
            segment.append(&value).unwrap();
            assert_eq!(segment.values().len(), segment.null_values().unwrap().len());
        }
    }

    #[test]
    fn test_estimate_memory_usage() {
        let mut segment = ValueSegment::<i32>::new(false);
        for i in 0..10 {
            segment.append(&DataValue::Int32(i)).unwrap();
        }
        assert_eq!(segment.estimate_memory_usage(), 10 * std::mem::size_of::<i32>());
    }

    use crate::types::F64;
}
