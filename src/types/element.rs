// Copyright 2026 Granite Project Authors. Licensed under Apache-2.0.

use num_traits::AsPrimitive;

use super::{ConvertError, DataTypeKind, DataValue, F32, F64};

/// An element type a segment can be instantiated over.
///
/// `Ord` is required so that dictionaries can be sorted; `Default` supplies
/// the dummy slot stored underneath a NULL cell.
pub trait ElementType:
    Clone + Ord + Default + std::fmt::Debug + Send + Sync + 'static
{
    const KIND: DataTypeKind;

    /// Coerce a runtime value to this element type.
    ///
    /// Numeric values convert across families with the usual
    /// narrowing/widening semantics; strings and numerics are never
    /// interconvertible. NULL is not a value and always fails.
    fn from_value(value: &DataValue) -> Result<Self, ConvertError>;

    /// Wrap a typed value back into the runtime variant.
    fn to_value(&self) -> DataValue;
}

fn numeric_cast<T: Copy + 'static>(value: &DataValue) -> Option<T>
where
    i32: AsPrimitive<T>,
    i64: AsPrimitive<T>,
    f32: AsPrimitive<T>,
    f64: AsPrimitive<T>,
{
    match value {
        DataValue::Int32(v) => Some(v.as_()),
        DataValue::Int64(v) => Some(v.as_()),
        DataValue::Float32(v) => Some(v.0.as_()),
        DataValue::Float64(v) => Some(v.0.as_()),
        _ => None,
    }
}

macro_rules! impl_numeric_element_type {
    ($($Type:ty: $Primitive:ty => $Value:ident),*) => {
        $(
            impl ElementType for $Type {
                const KIND: DataTypeKind = DataTypeKind::$Value;

                fn from_value(value: &DataValue) -> Result<Self, ConvertError> {
                    numeric_cast::<$Primitive>(value)
                        .map(Into::into)
                        .ok_or_else(|| ConvertError::Cast(value.to_string(), Self::KIND))
                }

                fn to_value(&self) -> DataValue {
                    DataValue::$Value(self.clone())
                }
            }
        )*
    };
}

impl_numeric_element_type! {
    i32: i32 => Int32,
    i64: i64 => Int64,
    F32: f32 => Float32,
    F64: f64 => Float64
}

impl ElementType for String {
    const KIND: DataTypeKind = DataTypeKind::String;

    fn from_value(value: &DataValue) -> Result<Self, ConvertError> {
        match value {
            DataValue::String(s) => Ok(s.clone()),
            _ => Err(ConvertError::Cast(value.to_string(), Self::KIND)),
        }
    }

    fn to_value(&self) -> DataValue {
        DataValue::String(self.clone())
    }
}
