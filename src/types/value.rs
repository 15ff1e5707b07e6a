// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use ordered_float::OrderedFloat;
use parse_display::Display;
use serde::{Deserialize, Serialize};

use super::{DataType, DataTypeExt, DataTypeKind};

/// A wrapper around floats providing implementations of `Eq`, `Ord`, and
/// `Hash`, so that float columns can be dictionary-sorted.
pub type F32 = OrderedFloat<f32>;
pub type F64 = OrderedFloat<f64>;

/// Runtime-tagged primitive value.
///
/// This is the boundary type for untyped values flowing into and out of
/// segments. It carries one of the five supported element types, or the
/// distinguished NULL sentinel.
#[derive(
    Debug, Display, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub enum DataValue {
    // NOTE: Null comes first.
    // => NULL is less than any non-NULL values
    #[display("null")]
    Null,
    #[display("{0}")]
    Int32(i32),
    #[display("{0}")]
    Int64(i64),
    #[display("{0}")]
    Float32(F32),
    #[display("{0}")]
    Float64(F64),
    #[display("'{0}'")]
    String(String),
}

impl DataValue {
    /// Returns `true` if value is null.
    pub const fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }

    /// Get the type of value. `None` means NULL.
    pub fn data_type(&self) -> Option<DataType> {
        match self {
            Self::Null => None,
            Self::Int32(_) => Some(DataTypeKind::Int32.not_null()),
            Self::Int64(_) => Some(DataTypeKind::Int64.not_null()),
            Self::Float32(_) => Some(DataTypeKind::Float32.not_null()),
            Self::Float64(_) => Some(DataTypeKind::Float64.not_null()),
            Self::String(_) => Some(DataTypeKind::String.not_null()),
        }
    }
}

impl From<i32> for DataValue {
    fn from(v: i32) -> Self {
        Self::Int32(v)
    }
}

impl From<i64> for DataValue {
    fn from(v: i64) -> Self {
        Self::Int64(v)
    }
}

impl From<f32> for DataValue {
    fn from(v: f32) -> Self {
        Self::Float32(OrderedFloat(v))
    }
}

impl From<f64> for DataValue {
    fn from(v: f64) -> Self {
        Self::Float64(OrderedFloat(v))
    }
}

impl From<&str> for DataValue {
    fn from(v: &str) -> Self {
        Self::String(v.to_string())
    }
}

impl From<String> for DataValue {
    fn from(v: String) -> Self {
        Self::String(v)
    }
}

/// The error type of value type conversion.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum ConvertError {
    #[error("failed to cast {0} to type {1}")]
    Cast(String, DataTypeKind),
}
