// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use serde::{Deserialize, Serialize};

use crate::storage::{StorageError, StorageResult};
use crate::types::{AttributeVectorWidth, ValueId};

/// Fixed-width packed array of value ids.
///
/// Three backings exist, one per supported byte width. The width is chosen
/// once at construction and every id written afterwards must fit in it;
/// the dictionary-encoding bit-width selection guarantees this.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum AttributeVector {
    U8(Vec<u8>),
    U16(Vec<u16>),
    U32(Vec<u32>),
}

impl AttributeVector {
    /// Allocate a zero-filled vector of `len` ids, using the smallest of
    /// 1, 2 or 4 bytes able to encode `code_count` distinct value ids.
    ///
    /// More than 32 bits is a hard upper bound and fails.
    pub fn for_code_count(code_count: usize, len: usize) -> StorageResult<Self> {
        let bits_needed = usize::BITS - code_count.saturating_sub(1).leading_zeros();
        if bits_needed <= 8 {
            Ok(Self::U8(vec![0; len]))
        } else if bits_needed <= 16 {
            Ok(Self::U16(vec![0; len]))
        } else if bits_needed <= 32 {
            Ok(Self::U32(vec![0; len]))
        } else {
            Err(StorageError::DictionaryOverflow(code_count))
        }
    }

    pub fn get(&self, index: usize) -> ValueId {
        match self {
            Self::U8(values) => values[index] as ValueId,
            Self::U16(values) => values[index] as ValueId,
            Self::U32(values) => values[index],
        }
    }

    pub fn set(&mut self, index: usize, value_id: ValueId) {
        debug_assert!(
            index < self.size(),
            "index {index} out of bounds for attribute vector with size {}",
            self.size()
        );
        match self {
            Self::U8(values) => {
                debug_assert!(value_id <= u8::MAX as ValueId, "value id {value_id} does not fit in 1 byte");
                values[index] = value_id as u8;
            }
            Self::U16(values) => {
                debug_assert!(value_id <= u16::MAX as ValueId, "value id {value_id} does not fit in 2 bytes");
                values[index] = value_id as u16;
            }
            Self::U32(values) => values[index] = value_id,
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Self::U8(values) => values.len(),
            Self::U16(values) => values.len(),
            Self::U32(values) => values.len(),
        }
    }

    /// Byte width of one entry.
    pub fn width(&self) -> AttributeVectorWidth {
        match self {
            Self::U8(_) => 1,
            Self::U16(_) => 2,
            Self::U32(_) => 4,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_operations() {
        let element_count = 4;
        for code_count in [4, 300, 70_000] {
            let mut vector = AttributeVector::for_code_count(code_count, element_count).unwrap();
            for index in 0..element_count {
                vector.set(index, index as ValueId);
            }
            for index in 0..element_count {
                assert_eq!(vector.get(index), index as ValueId);
            }
            assert_eq!(vector.size(), element_count);
        }
    }

    #[test]
    fn test_width_selection() {
        let width = |code_count| {
            AttributeVector::for_code_count(code_count, 0)
                .unwrap()
                .width()
        };
        assert_eq!(width(0), 1);
        assert_eq!(width(1), 1);
        assert_eq!(width(u8::MAX as usize + 1), 1);
        assert_eq!(width(u8::MAX as usize + 2), 2);
        assert_eq!(width(u16::MAX as usize + 1), 2);
        assert_eq!(width(u16::MAX as usize + 2), 4);
        assert_eq!(width(u32::MAX as usize + 1), 4);
    }

    #[test]
    fn test_too_many_codes() {
        assert_eq!(
            AttributeVector::for_code_count((u32::MAX as usize) + 2, 0),
            Err(StorageError::DictionaryOverflow((u32::MAX as usize) + 2))
        );
    }
}
