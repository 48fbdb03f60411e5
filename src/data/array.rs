//! Flat, typed, multi-component arrays used for coordinates and point attributes.

use crate::errors::{CutError, Result};
use std::fmt::{Debug, Display};

/// Element type of a [`DataArray`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DataType {
    Float32,
    Float64,
    Int8,
    UInt8,
    Int16,
    UInt16,
    Int32,
    UInt32,
    Int64,
    UInt64,
}

impl Display for DataType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            DataType::Float32 => "float32",
            DataType::Float64 => "float64",
            DataType::Int8 => "int8",
            DataType::UInt8 => "uint8",
            DataType::Int16 => "int16",
            DataType::UInt16 => "uint16",
            DataType::Int32 => "int32",
            DataType::UInt32 => "uint32",
            DataType::Int64 => "int64",
            DataType::UInt64 => "uint64",
        };
        write!(f, "{}", name)
    }
}

/// Storage of a [`DataArray`], one variant per [`DataType`].
#[derive(Debug, Clone, PartialEq)]
pub enum ArrayValues {
    Float32(Vec<f32>),
    Float64(Vec<f64>),
    Int8(Vec<i8>),
    UInt8(Vec<u8>),
    Int16(Vec<i16>),
    UInt16(Vec<u16>),
    Int32(Vec<i32>),
    UInt32(Vec<u32>),
    Int64(Vec<i64>),
    UInt64(Vec<u64>),
}

/// Runs `$body` with `$v` bound to the vector inside any [`ArrayValues`] variant.
macro_rules! with_values {
    ($values:expr, $v:ident => $body:expr) => {
        match $values {
            $crate::data::ArrayValues::Float32($v) => $body,
            $crate::data::ArrayValues::Float64($v) => $body,
            $crate::data::ArrayValues::Int8($v) => $body,
            $crate::data::ArrayValues::UInt8($v) => $body,
            $crate::data::ArrayValues::Int16($v) => $body,
            $crate::data::ArrayValues::UInt16($v) => $body,
            $crate::data::ArrayValues::Int32($v) => $body,
            $crate::data::ArrayValues::UInt32($v) => $body,
            $crate::data::ArrayValues::Int64($v) => $body,
            $crate::data::ArrayValues::UInt64($v) => $body,
        }
    };
}
pub(crate) use with_values;

/// A value type that can live in a [`DataArray`].
///
/// Conversions go through `f64`; converting back to an integer type
/// truncates toward zero and saturates at the type bounds.
pub trait Element: Copy + Default + Send + Sync + PartialEq + Debug + 'static {
    const DATA_TYPE: DataType;

    fn to_f64(self) -> f64;

    fn from_f64(value: f64) -> Self;

    /// Wrap a vector of this type into the matching [`ArrayValues`] variant.
    fn into_values(values: Vec<Self>) -> ArrayValues;

    /// Borrow the values if they are of this type.
    fn view(values: &ArrayValues) -> Option<&[Self]>;
}

macro_rules! impl_element {
    ($t:ty, $variant:ident) => {
        impl Element for $t {
            const DATA_TYPE: DataType = DataType::$variant;

            #[inline]
            fn to_f64(self) -> f64 {
                self as f64
            }

            #[inline]
            fn from_f64(value: f64) -> Self {
                value as $t
            }

            fn into_values(values: Vec<Self>) -> ArrayValues {
                ArrayValues::$variant(values)
            }

            fn view(values: &ArrayValues) -> Option<&[Self]> {
                match values {
                    ArrayValues::$variant(v) => Some(v),
                    _ => None,
                }
            }
        }

        impl From<Vec<$t>> for ArrayValues {
            fn from(values: Vec<$t>) -> Self {
                ArrayValues::$variant(values)
            }
        }
    };
}

impl_element!(f32, Float32);
impl_element!(f64, Float64);
impl_element!(i8, Int8);
impl_element!(u8, UInt8);
impl_element!(i16, Int16);
impl_element!(u16, UInt16);
impl_element!(i32, Int32);
impl_element!(u32, UInt32);
impl_element!(i64, Int64);
impl_element!(u64, UInt64);

impl ArrayValues {
    pub const fn data_type(&self) -> DataType {
        match self {
            ArrayValues::Float32(_) => DataType::Float32,
            ArrayValues::Float64(_) => DataType::Float64,
            ArrayValues::Int8(_) => DataType::Int8,
            ArrayValues::UInt8(_) => DataType::UInt8,
            ArrayValues::Int16(_) => DataType::Int16,
            ArrayValues::UInt16(_) => DataType::UInt16,
            ArrayValues::Int32(_) => DataType::Int32,
            ArrayValues::UInt32(_) => DataType::UInt32,
            ArrayValues::Int64(_) => DataType::Int64,
            ArrayValues::UInt64(_) => DataType::UInt64,
        }
    }

    pub fn len(&self) -> usize {
        with_values!(self, v => v.len())
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// An empty storage of the given type.
    pub const fn empty(data_type: DataType) -> Self {
        match data_type {
            DataType::Float32 => ArrayValues::Float32(Vec::new()),
            DataType::Float64 => ArrayValues::Float64(Vec::new()),
            DataType::Int8 => ArrayValues::Int8(Vec::new()),
            DataType::UInt8 => ArrayValues::UInt8(Vec::new()),
            DataType::Int16 => ArrayValues::Int16(Vec::new()),
            DataType::UInt16 => ArrayValues::UInt16(Vec::new()),
            DataType::Int32 => ArrayValues::Int32(Vec::new()),
            DataType::UInt32 => ArrayValues::UInt32(Vec::new()),
            DataType::Int64 => ArrayValues::Int64(Vec::new()),
            DataType::UInt64 => ArrayValues::UInt64(Vec::new()),
        }
    }

    fn get(&self, index: usize) -> f64 {
        with_values!(self, v => v[index].to_f64())
    }

    fn set(&mut self, index: usize, value: f64) {
        with_values!(self, v => v[index] = Element::from_f64(value))
    }
}

/// A named array of `components`-wide tuples stored tuple-major.
#[derive(Debug, Clone, PartialEq)]
pub struct DataArray {
    name: String,
    components: usize,
    values: ArrayValues,
}

impl DataArray {
    /// Create an array, checking that `values` holds whole tuples.
    pub fn new(
        name: impl Into<String>,
        components: usize,
        values: impl Into<ArrayValues>,
    ) -> Result<Self> {
        let name = name.into();
        let values = values.into();
        if components == 0 || values.len() % components != 0 {
            return Err(CutError::ComponentMismatch {
                name,
                values: values.len(),
                components,
            });
        }
        Ok(DataArray {
            name,
            components,
            values,
        })
    }

    /// Assemble an array whose values are known to hold whole tuples.
    pub(crate) fn from_raw(
        name: impl Into<String>,
        components: usize,
        values: ArrayValues,
    ) -> Self {
        debug_assert!(components > 0 && values.len() % components == 0);
        DataArray {
            name: name.into(),
            components,
            values,
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub const fn components(&self) -> usize {
        self.components
    }

    pub const fn values(&self) -> &ArrayValues {
        &self.values
    }

    pub const fn data_type(&self) -> DataType {
        self.values.data_type()
    }

    /// Number of tuples.
    pub fn num_tuples(&self) -> usize {
        self.values.len() / self.components
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Typed view of the flat values, `None` if `T` is not the element type.
    pub fn as_slice<T: Element>(&self) -> Option<&[T]> {
        T::view(&self.values)
    }

    /// Component `comp` of tuple `tuple`, widened to `f64`.
    pub fn component(&self, tuple: usize, comp: usize) -> f64 {
        self.values.get(tuple * self.components + comp)
    }

    /// Set component `comp` of tuple `tuple`, converting to the element type.
    pub fn set_component(&mut self, tuple: usize, comp: usize, value: f64) {
        self.values.set(tuple * self.components + comp, value);
    }

    /// All components of tuple `tuple`, widened to `f64`.
    pub fn tuple(&self, tuple: usize) -> Vec<f64> {
        (0..self.components)
            .map(|comp| self.component(tuple, comp))
            .collect()
    }
}

/// Coordinates of a point set: a 3-component [`DataArray`].
#[derive(Debug, Clone, PartialEq)]
pub struct Points {
    data: DataArray,
}

impl Points {
    /// Wrap an existing array; it must have 3 components.
    pub fn new(data: DataArray) -> Result<Self> {
        if data.components() != 3 {
            return Err(CutError::ComponentMismatch {
                name: data.name().to_string(),
                values: data.values().len(),
                components: 3,
            });
        }
        Ok(Points { data })
    }

    /// Points with the given element type and no coordinates.
    pub fn empty(data_type: DataType) -> Self {
        Points {
            data: DataArray {
                name: "Points".to_string(),
                components: 3,
                values: ArrayValues::empty(data_type),
            },
        }
    }

    /// Build points from any element type, e.g. `Points::from_xyz(vec![[0.0f32; 3]])`.
    pub fn from_xyz<T: Element>(xyz: Vec<[T; 3]>) -> Self {
        let flat: Vec<T> = xyz.into_iter().flatten().collect();
        Points {
            data: DataArray {
                name: "Points".to_string(),
                components: 3,
                values: T::into_values(flat),
            },
        }
    }

    pub(crate) fn from_flat<T: Element>(flat: Vec<T>) -> Self {
        Points {
            data: DataArray::from_raw("Points", 3, T::into_values(flat)),
        }
    }

    pub fn len(&self) -> usize {
        self.data.num_tuples()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub const fn data_type(&self) -> DataType {
        self.data.data_type()
    }

    pub const fn data(&self) -> &DataArray {
        &self.data
    }

    /// Coordinates of point `id`, widened to `f64`.
    pub fn point(&self, id: usize) -> [f64; 3] {
        [
            self.data.component(id, 0),
            self.data.component(id, 1),
            self.data.component(id, 2),
        ]
    }
}

/// Named per-point attribute arrays, with an optional active normals array.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PointData {
    arrays: Vec<DataArray>,
    normals: Option<String>,
}

impl PointData {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an array, replacing any existing array with the same name.
    pub fn add_array(&mut self, array: DataArray) {
        match self.arrays.iter_mut().find(|a| a.name() == array.name()) {
            Some(existing) => *existing = array,
            None => self.arrays.push(array),
        }
    }

    /// Add `array` and make it the active normals.
    pub fn set_normals(&mut self, array: DataArray) {
        self.normals = Some(array.name().to_string());
        self.add_array(array);
    }

    /// The active normals, if any.
    pub fn normals(&self) -> Option<&DataArray> {
        self.normals.as_deref().and_then(|name| self.array(name))
    }

    pub(crate) fn normals_name(&self) -> Option<&str> {
        self.normals.as_deref()
    }

    pub fn array(&self, name: &str) -> Option<&DataArray> {
        self.arrays.iter().find(|a| a.name() == name)
    }

    pub fn arrays(&self) -> &[DataArray] {
        &self.arrays
    }

    pub fn len(&self) -> usize {
        self.arrays.len()
    }

    pub fn is_empty(&self) -> bool {
        self.arrays.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn integer_components_truncate_and_saturate() {
        let mut array = DataArray::new("ids", 1, vec![0i32, 0]).unwrap();
        array.set_component(0, 0, 2.9);
        array.set_component(1, 0, 1e20);
        assert_eq!(array.as_slice::<i32>(), Some(&[2, i32::MAX][..]));
        assert_eq!(array.as_slice::<f32>(), None);
    }

    #[test]
    fn partial_tuples_are_rejected() {
        let err = DataArray::new("v", 3, vec![1.0f64, 2.0]).unwrap_err();
        assert!(matches!(err, CutError::ComponentMismatch { values: 2, .. }));
        assert!(DataArray::new("v", 0, Vec::<f32>::new()).is_err());
    }

    #[test]
    fn normals_follow_replacement() {
        let mut pd = PointData::new();
        pd.add_array(DataArray::new("Normals", 3, vec![0.0f32; 3]).unwrap());
        assert!(pd.normals().is_none());
        pd.set_normals(DataArray::new("Normals", 3, vec![1.0f32, 0.0, 0.0]).unwrap());
        assert_eq!(pd.len(), 1);
        assert_eq!(pd.normals().unwrap().tuple(0), vec![1.0, 0.0, 0.0]);
    }
}
