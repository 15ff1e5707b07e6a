// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

//! Typed column slices and their runtime-tagged wrappers.
//!
//! A segment is one column's worth of data within one chunk. The typed
//! segments ([`ValueSegment`], [`DictionarySegment`]) are generic over the
//! element type; the `*Impl` enums embed one variant per element type so
//! that chunks can hold segments of any column type behind a single tag,
//! with pattern matching taking the place of a runtime type dispatcher.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::for_all_variants;
use crate::storage::{StorageError, StorageResult};
use crate::types::{DataTypeKind, DataValue, F32, F64};

mod attribute_vector;
mod dictionary_segment;
mod value_segment;

pub use self::attribute_vector::AttributeVector;
pub use self::dictionary_segment::DictionarySegment;
pub use self::value_segment::ValueSegment;

/// Embeds all types of value segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ValueSegmentImpl {
    Int32(ValueSegment<i32>),
    Int64(ValueSegment<i64>),
    Float32(ValueSegment<F32>),
    Float64(ValueSegment<F64>),
    Utf8(ValueSegment<String>),
}

/// Embeds all types of dictionary segments.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DictionarySegmentImpl {
    Int32(DictionarySegment<i32>),
    Int64(DictionarySegment<i64>),
    Float32(DictionarySegment<F32>),
    Float64(DictionarySegment<F64>),
    Utf8(DictionarySegment<String>),
}

/// A segment slot within a chunk: mutable or dictionary-compressed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SegmentImpl {
    Value(ValueSegmentImpl),
    Dictionary(DictionarySegmentImpl),
}

/// Shared handle to a segment, for read-only distribution.
pub type SegmentRef = Arc<SegmentImpl>;

/// An error which can be returned when downcasting a segment enum into a
/// concrete typed segment.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TypeMismatch;

macro_rules! impl_segment_dispatch {
    ($({ $Abc:ident, $Value:ident, $Type:ty }),*) => {
        impl ValueSegmentImpl {
            /// Create an empty mutable segment of the given element type.
            pub fn new(kind: DataTypeKind, nullable: bool) -> Self {
                match kind {
                    $(DataTypeKind::$Value => Self::$Abc(ValueSegment::new(nullable)),)*
                }
            }

            pub fn kind(&self) -> DataTypeKind {
                match self {
                    $(Self::$Abc(_) => DataTypeKind::$Value,)*
                }
            }

            pub fn size(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.size(),)*
                }
            }

            pub fn is_nullable(&self) -> bool {
                match self {
                    $(Self::$Abc(segment) => segment.is_nullable(),)*
                }
            }

            pub fn at(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(segment) => segment.at(index),)*
                }
            }

            pub fn append(&mut self, value: &DataValue) -> StorageResult<()> {
                match self {
                    $(Self::$Abc(segment) => segment.append(value),)*
                }
            }

            pub fn check_append(&self, value: &DataValue) -> StorageResult<()> {
                match self {
                    $(Self::$Abc(segment) => segment.check_append(value),)*
                }
            }

            pub fn estimate_memory_usage(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.estimate_memory_usage(),)*
                }
            }

            /// Dictionary-encode this segment.
            pub fn compress(&self) -> StorageResult<DictionarySegmentImpl> {
                Ok(match self {
                    $(Self::$Abc(segment) => {
                        DictionarySegmentImpl::$Abc(DictionarySegment::compress(segment)?)
                    })*
                })
            }
        }

        impl DictionarySegmentImpl {
            pub fn kind(&self) -> DataTypeKind {
                match self {
                    $(Self::$Abc(_) => DataTypeKind::$Value,)*
                }
            }

            pub fn size(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.size(),)*
                }
            }

            pub fn is_nullable(&self) -> bool {
                match self {
                    $(Self::$Abc(segment) => segment.is_nullable(),)*
                }
            }

            pub fn at(&self, index: usize) -> DataValue {
                match self {
                    $(Self::$Abc(segment) => segment.at(index),)*
                }
            }

            pub fn attribute_vector(&self) -> &AttributeVector {
                match self {
                    $(Self::$Abc(segment) => segment.attribute_vector(),)*
                }
            }

            pub fn unique_values_count(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.unique_values_count(),)*
                }
            }

            pub fn estimate_memory_usage(&self) -> usize {
                match self {
                    $(Self::$Abc(segment) => segment.estimate_memory_usage(),)*
                }
            }
        }

        $(
            impl From<ValueSegment<$Type>> for ValueSegmentImpl {
                fn from(segment: ValueSegment<$Type>) -> Self {
                    Self::$Abc(segment)
                }
            }

            impl From<DictionarySegment<$Type>> for DictionarySegmentImpl {
                fn from(segment: DictionarySegment<$Type>) -> Self {
                    Self::$Abc(segment)
                }
            }

            impl From<ValueSegment<$Type>> for SegmentImpl {
                fn from(segment: ValueSegment<$Type>) -> Self {
                    Self::Value(segment.into())
                }
            }

            impl From<DictionarySegment<$Type>> for SegmentImpl {
                fn from(segment: DictionarySegment<$Type>) -> Self {
                    Self::Dictionary(segment.into())
                }
            }

            impl<'a> TryFrom<&'a ValueSegmentImpl> for &'a ValueSegment<$Type> {
                type Error = TypeMismatch;

                fn try_from(segment: &'a ValueSegmentImpl) -> Result<Self, Self::Error> {
                    match segment {
                        ValueSegmentImpl::$Abc(segment) => Ok(segment),
                        _ => Err(TypeMismatch),
                    }
                }
            }

            impl<'a> TryFrom<&'a DictionarySegmentImpl> for &'a DictionarySegment<$Type> {
                type Error = TypeMismatch;

                fn try_from(segment: &'a DictionarySegmentImpl) -> Result<Self, Self::Error> {
                    match segment {
                        DictionarySegmentImpl::$Abc(segment) => Ok(segment),
                        _ => Err(TypeMismatch),
                    }
                }
            }

            impl<'a> TryFrom<&'a SegmentImpl> for &'a ValueSegment<$Type> {
                type Error = TypeMismatch;

                fn try_from(segment: &'a SegmentImpl) -> Result<Self, Self::Error> {
                    match segment {
                        SegmentImpl::Value(segment) => segment.try_into(),
                        _ => Err(TypeMismatch),
                    }
                }
            }

            impl<'a> TryFrom<&'a SegmentImpl> for &'a DictionarySegment<$Type> {
                type Error = TypeMismatch;

                fn try_from(segment: &'a SegmentImpl) -> Result<Self, Self::Error> {
                    match segment {
                        SegmentImpl::Dictionary(segment) => segment.try_into(),
                        _ => Err(TypeMismatch),
                    }
                }
            }
        )*
    };
}

for_all_variants! { impl_segment_dispatch }

impl From<ValueSegmentImpl> for SegmentImpl {
    fn from(segment: ValueSegmentImpl) -> Self {
        Self::Value(segment)
    }
}

impl From<DictionarySegmentImpl> for SegmentImpl {
    fn from(segment: DictionarySegmentImpl) -> Self {
        Self::Dictionary(segment)
    }
}

impl SegmentImpl {
    pub fn kind(&self) -> DataTypeKind {
        match self {
            Self::Value(segment) => segment.kind(),
            Self::Dictionary(segment) => segment.kind(),
        }
    }

    pub fn size(&self) -> usize {
        match self {
            Self::Value(segment) => segment.size(),
            Self::Dictionary(segment) => segment.size(),
        }
    }

    pub fn is_nullable(&self) -> bool {
        match self {
            Self::Value(segment) => segment.is_nullable(),
            Self::Dictionary(segment) => segment.is_nullable(),
        }
    }

    /// Returns the value at `index` wrapped in the runtime variant.
    pub fn at(&self, index: usize) -> DataValue {
        match self {
            Self::Value(segment) => segment.at(index),
            Self::Dictionary(segment) => segment.at(index),
        }
    }

    /// Append a runtime value. Only mutable segments accept appends.
    pub fn append(&mut self, value: &DataValue) -> StorageResult<()> {
        match self {
            Self::Value(segment) => segment.append(value),
            Self::Dictionary(_) => Err(StorageError::ImmutableSegment),
        }
    }

    /// Check whether [`append`](Self::append) would succeed.
    pub fn check_append(&self, value: &DataValue) -> StorageResult<()> {
        match self {
            Self::Value(segment) => segment.check_append(value),
            Self::Dictionary(_) => Err(StorageError::ImmutableSegment),
        }
    }

    pub fn estimate_memory_usage(&self) -> usize {
        match self {
            Self::Value(segment) => segment.estimate_memory_usage(),
            Self::Dictionary(segment) => segment.estimate_memory_usage(),
        }
    }
}
