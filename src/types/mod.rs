// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

//! Element types, the runtime value variant and strongly-named id types.

use parse_display::{Display, FromStr};
use serde::{Deserialize, Serialize};

mod element;
mod value;

pub use self::element::*;
pub use self::value::*;

/// Index of a chunk within a table.
pub type ChunkId = u32;
/// Index of a row within a chunk.
pub type ChunkOffset = u32;
/// Index of a column within a table or chunk.
pub type ColumnId = u16;
/// Number of columns. Shares the base type of [`ColumnId`].
pub type ColumnCount = u16;
/// Index into a dictionary, potentially offset by one to reserve id 0
/// for NULL.
pub type ValueId = u32;
/// Byte width of an attribute vector backing.
pub type AttributeVectorWidth = u8;

pub const INVALID_CHUNK_ID: ChunkId = ChunkId::MAX;
pub const INVALID_CHUNK_OFFSET: ChunkOffset = ChunkOffset::MAX;
pub const INVALID_VALUE_ID: ValueId = ValueId::MAX;

/// The position of a row: which chunk, and where inside it.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, Display,
)]
#[display("({chunk_id}, {chunk_offset})")]
pub struct RowId {
    pub chunk_id: ChunkId,
    pub chunk_offset: ChunkOffset,
}

impl RowId {
    /// Faster than comparing against [`NULL_ROW_ID`]: the offset sentinel
    /// alone identifies a NULL row id.
    pub fn is_null(&self) -> bool {
        self.chunk_offset == INVALID_CHUNK_OFFSET
    }
}

/// Both parts are invalid so that a stale lookup through a NULL row id
/// crashes immediately instead of reading garbage.
pub const NULL_ROW_ID: RowId = RowId {
    chunk_id: INVALID_CHUNK_ID,
    chunk_offset: INVALID_CHUNK_OFFSET,
};

/// The element type of a segment.
///
/// Columns are declared with the runtime names `int`, `long`, `float`,
/// `double` and `string`; parsing one of those names is the only way a
/// type string enters the typed world.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, FromStr,
)]
pub enum DataTypeKind {
    #[display("int")]
    Int32,
    #[display("long")]
    Int64,
    #[display("float")]
    Float32,
    #[display("double")]
    Float64,
    #[display("string")]
    String,
}

/// Element type with nullability.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DataType {
    pub kind: DataTypeKind,
    pub nullable: bool,
}

impl std::fmt::Debug for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.kind)?;
        if self.nullable {
            write!(f, " (null)")?;
        }
        Ok(())
    }
}

impl DataType {
    pub const fn new(kind: DataTypeKind, nullable: bool) -> DataType {
        DataType { kind, nullable }
    }

    pub fn is_nullable(&self) -> bool {
        self.nullable
    }

    pub fn kind(&self) -> DataTypeKind {
        self.kind
    }
}

/// The extension methods for [`DataTypeKind`].
pub trait DataTypeExt {
    fn nullable(self) -> DataType;
    fn not_null(self) -> DataType;
}

impl DataTypeExt for DataTypeKind {
    fn nullable(self) -> DataType {
        DataType::new(self, true)
    }

    fn not_null(self) -> DataType {
        DataType::new(self, false)
    }
}

/// A macro that enumerates all supported element types.
///
/// Each entry pairs the segment variant name, the value/kind variant name
/// and the backing rust type. Pass another macro to stamp out an impl per
/// element type:
///
/// ```ignore
/// macro_rules! impl_foo {
///     ($({ $Abc:ident, $Value:ident, $Type:ty }),*) => { /* ... */ };
/// }
/// for_all_variants! { impl_foo }
/// ```
#[macro_export]
macro_rules! for_all_variants {
    ($macro:ident) => {
        $macro! {
            { Int32, Int32, i32 },
            { Int64, Int64, i64 },
            { Float32, Float32, F32 },
            { Float64, Float64, F64 },
            { Utf8, String, String }
        }
    };
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_type_names() {
        assert_eq!("int".parse::<DataTypeKind>().unwrap(), DataTypeKind::Int32);
        assert_eq!("long".parse::<DataTypeKind>().unwrap(), DataTypeKind::Int64);
        assert_eq!(
            "float".parse::<DataTypeKind>().unwrap(),
            DataTypeKind::Float32
        );
        assert_eq!(
            "double".parse::<DataTypeKind>().unwrap(),
            DataTypeKind::Float64
        );
        assert_eq!(
            "string".parse::<DataTypeKind>().unwrap(),
            DataTypeKind::String
        );
        assert!("varchar".parse::<DataTypeKind>().is_err());
        assert_eq!(DataTypeKind::Int64.to_string(), "long");
    }

    #[test]
    fn test_row_id_order() {
        let a = RowId {
            chunk_id: 0,
            chunk_offset: 7,
        };
        let b = RowId {
            chunk_id: 1,
            chunk_offset: 0,
        };
        assert!(a < b);
        assert!(!a.is_null());
        assert!(NULL_ROW_ID.is_null());
        assert!(a < NULL_ROW_ID);
    }
}
