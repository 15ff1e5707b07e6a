// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use std::collections::BTreeMap;
use std::mem;

use serde::{Deserialize, Serialize};

use super::{AttributeVector, ValueSegment};
use crate::storage::{StorageError, StorageResult};
use crate::types::{DataValue, ElementType, ValueId, INVALID_VALUE_ID};

/// An immutable, dictionary-encoded column slice.
///
/// The distinct non-NULL values of the source segment are stored once, in
/// ascending order, and every row position holds only a fixed-width id
/// into that dictionary. On a nullable segment id 0 is reserved for NULL
/// and all dictionary ids are shifted up by one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DictionarySegment<T: ElementType> {
    dictionary: Vec<T>,
    attribute_vector: AttributeVector,
    nullable: bool,
}

impl<T: ElementType> DictionarySegment<T> {
    /// Dictionary-encode a value segment.
    ///
    /// A `BTreeMap` collects the distinct non-NULL values, which yields
    /// the sorted, duplicate-free dictionary and the value-id assignment
    /// in one pass. The attribute vector uses the smallest of 1, 2 or 4
    /// bytes able to encode every id; a dictionary needing more than 32
    /// bits fails.
    pub fn compress(source: &ValueSegment<T>) -> StorageResult<Self> {
        let nullable = source.is_nullable();
        let size = source.size();
        let id_offset = nullable as ValueId;

        let mut codes = BTreeMap::new();
        for (index, value) in source.values().iter().enumerate() {
            if !source.is_null(index) {
                codes.insert(value.clone(), INVALID_VALUE_ID);
            }
        }
        let mut dictionary = Vec::with_capacity(codes.len());
        for (id, (value, code)) in codes.iter_mut().enumerate() {
            *code = id as ValueId + id_offset;
            dictionary.push(value.clone());
        }

        let mut attribute_vector =
            AttributeVector::for_code_count(codes.len() + id_offset as usize, size)?;
        for (index, value) in source.values().iter().enumerate() {
            if source.is_null(index) {
                // id 0 is already the reserved null id, and the vector is
                // zero-initialized
                continue;
            }
            attribute_vector.set(index, codes[value]);
        }

        Ok(Self {
            dictionary,
            attribute_vector,
            nullable,
        })
    }

    /// Resolve a value id to its dictionary value. Fails on the reserved
    /// null id and on ids past the dictionary.
    pub fn value_of_value_id(&self, value_id: ValueId) -> StorageResult<&T> {
        if self.nullable && value_id == self.null_value_id() {
            return Err(StorageError::NullValueId);
        }
        let index = (value_id - self.nullable as ValueId) as usize;
        self.dictionary.get(index).ok_or(StorageError::OutOfBounds(
            "value id",
            index,
            self.dictionary.len(),
        ))
    }

    /// Returns the value at `index`, or `None` on NULL.
    pub fn get_typed(&self, index: usize) -> Option<&T> {
        let value_id = self.attribute_vector.get(index);
        if self.nullable && value_id == self.null_value_id() {
            return None;
        }
        Some(&self.dictionary[(value_id - self.nullable as ValueId) as usize])
    }

    /// Returns the value at `index`, failing on NULL.
    pub fn get(&self, index: usize) -> StorageResult<&T> {
        self.get_typed(index).ok_or(StorageError::NullValue(index))
    }

    /// Returns the value at `index` wrapped in the runtime variant.
    pub fn at(&self, index: usize) -> DataValue {
        match self.get_typed(index) {
            Some(value) => value.to_value(),
            None => DataValue::Null,
        }
    }

    /// The position of the first dictionary entry `>= value`, in
    /// dictionary coordinates (not shifted by the null reservation), or
    /// [`INVALID_VALUE_ID`] if no such entry exists.
    pub fn lower_bound(&self, value: &T) -> ValueId {
        let position = self.dictionary.partition_point(|entry| entry < value);
        if position == self.dictionary.len() {
            return INVALID_VALUE_ID;
        }
        position as ValueId
    }

    /// The position of the first dictionary entry `> value`, with the same
    /// conventions as [`lower_bound`](Self::lower_bound).
    pub fn upper_bound(&self, value: &T) -> ValueId {
        let position = self.dictionary.partition_point(|entry| entry <= value);
        if position == self.dictionary.len() {
            return INVALID_VALUE_ID;
        }
        position as ValueId
    }

    /// [`lower_bound`](Self::lower_bound) with the probe coerced from a
    /// runtime value first.
    pub fn lower_bound_by_value(&self, value: &DataValue) -> StorageResult<ValueId> {
        Ok(self.lower_bound(&T::from_value(value)?))
    }

    /// [`upper_bound`](Self::upper_bound) with the probe coerced from a
    /// runtime value first.
    pub fn upper_bound_by_value(&self, value: &DataValue) -> StorageResult<ValueId> {
        Ok(self.upper_bound(&T::from_value(value)?))
    }

    /// The sorted dictionary of distinct non-NULL values.
    pub fn dictionary(&self) -> &[T] {
        &self.dictionary
    }

    pub fn attribute_vector(&self) -> &AttributeVector {
        &self.attribute_vector
    }

    pub fn unique_values_count(&self) -> usize {
        self.dictionary.len()
    }

    pub fn size(&self) -> usize {
        self.attribute_vector.size()
    }

    /// The id reserved for NULL on nullable segments.
    pub fn null_value_id(&self) -> ValueId {
        0
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn estimate_memory_usage(&self) -> usize {
        self.dictionary.len() * mem::size_of::<T>()
            + self.attribute_vector.width() as usize * self.attribute_vector.size()
    }
}
