// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

//! Table storage: chunks, tables and the process-wide table registry.

mod chunk;
mod storage_manager;
mod table;

pub use self::chunk::Chunk;
pub use self::storage_manager::{StorageManager, TableRef};
pub use self::table::{ColumnDesc, Table};

use crate::types::ConvertError;

/// The error type of storage operations.
///
/// Errors are fatal to the in-flight operation but never to the process;
/// the affected segment, chunk or table is left in its pre-operation
/// state. Nothing is retried internally.
#[derive(thiserror::Error, Debug, Clone, PartialEq)]
pub enum StorageError {
    #[error(transparent)]
    Convert(#[from] ConvertError),
    #[error("number of values ({0}) does not match number of columns ({1})")]
    ValueCountMismatch(usize, usize),
    #[error("cannot add a column to a non-empty table")]
    AlterNonEmptyTable,
    #[error("unknown data type: {0:?}")]
    UnknownDataType(String),
    #[error("{0} {1:?} not found")]
    NotFound(&'static str, String),
    #[error("duplicated {0}: {1:?}")]
    Duplicated(&'static str, String),
    #[error("value at position {0} is null")]
    NullValue(usize),
    #[error("null value appended to a non-nullable segment")]
    NullNotAllowed,
    #[error("segment is not nullable")]
    NotNullable,
    #[error("segment is immutable")]
    ImmutableSegment,
    #[error("{0} index {1} out of bounds (size {2})")]
    OutOfBounds(&'static str, usize, usize),
    #[error("dictionary requires {0} value ids, more than 32 bits can address")]
    DictionaryOverflow(usize),
    #[error("cannot resolve the null value id to a dictionary value")]
    NullValueId,
}

pub type StorageResult<T> = Result<T, StorageError>;
