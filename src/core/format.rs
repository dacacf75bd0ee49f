use serde::Serialize;

#[remain::sorted]
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Err {
    /// Invalid component data type id
    #[error("Invalid component data type id: {0}")]
    InvalidComponentId(usize),
    /// Invalid numeric format id
    #[error("Invalid numeric format id: {0}")]
    InvalidFormatId(usize),
}

/// The numeric format of one attribute value as it is laid out in a geometry
/// buffer. Scalar formats carry a single integer, the packed formats carry
/// small normalized integer vectors, and the remaining formats carry
/// single-precision float vectors or matrices.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum NumericFormat {
    U8,
    U16,
    U32,
    U8Vec4,
    U16Vec2,
    Vec2,
    Vec3,
    Vec4,
    Mat3,
    Mat4,
}

impl NumericFormat {
    /// returns the size of one value of this format in bytes.
    pub fn size(self) -> usize {
        match self {
            NumericFormat::U8 => 1,
            NumericFormat::U16 => 2,
            NumericFormat::U32 => 4,
            NumericFormat::U8Vec4 => 4,
            NumericFormat::U16Vec2 => 4,
            NumericFormat::Vec2 => 8,
            NumericFormat::Vec3 => 12,
            NumericFormat::Vec4 => 16,
            NumericFormat::Mat3 => 36,
            NumericFormat::Mat4 => 64,
        }
    }

    /// returns the data type of one component of this format.
    pub fn component_type(self) -> ComponentDataType {
        match self {
            NumericFormat::U8 => ComponentDataType::U8,
            NumericFormat::U16 => ComponentDataType::U16,
            NumericFormat::U32 => ComponentDataType::U32,
            NumericFormat::U8Vec4 => ComponentDataType::U8,
            NumericFormat::U16Vec2 => ComponentDataType::U16,
            NumericFormat::Vec2 => ComponentDataType::F32,
            NumericFormat::Vec3 => ComponentDataType::F32,
            NumericFormat::Vec4 => ComponentDataType::F32,
            NumericFormat::Mat3 => ComponentDataType::F32,
            NumericFormat::Mat4 => ComponentDataType::F32,
        }
    }

    /// returns the number of components in one value of this format,
    /// e.g. 3 for `Vec3`.
    pub fn num_components(self) -> usize {
        match self {
            NumericFormat::U8 => 1,
            NumericFormat::U16 => 1,
            NumericFormat::U32 => 1,
            NumericFormat::U8Vec4 => 4,
            NumericFormat::U16Vec2 => 2,
            NumericFormat::Vec2 => 2,
            NumericFormat::Vec3 => 3,
            NumericFormat::Vec4 => 4,
            NumericFormat::Mat3 => 9,
            NumericFormat::Mat4 => 16,
        }
    }

    /// returns unique id for the format.
    pub fn get_id(self) -> usize {
        match self {
            NumericFormat::U8 => 0,
            NumericFormat::U16 => 1,
            NumericFormat::U32 => 2,
            NumericFormat::U8Vec4 => 3,
            NumericFormat::U16Vec2 => 4,
            NumericFormat::Vec2 => 5,
            NumericFormat::Vec3 => 6,
            NumericFormat::Vec4 => 7,
            NumericFormat::Mat3 => 8,
            NumericFormat::Mat4 => 9,
        }
    }

    /// returns the format from the given id.
    pub fn from_id(id: usize) -> Result<Self, Err> {
        match id {
            0 => Ok(NumericFormat::U8),
            1 => Ok(NumericFormat::U16),
            2 => Ok(NumericFormat::U32),
            3 => Ok(NumericFormat::U8Vec4),
            4 => Ok(NumericFormat::U16Vec2),
            5 => Ok(NumericFormat::Vec2),
            6 => Ok(NumericFormat::Vec3),
            7 => Ok(NumericFormat::Vec4),
            8 => Ok(NumericFormat::Mat3),
            9 => Ok(NumericFormat::Mat4),
            _ => Err(Err::InvalidFormatId(id)),
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum ComponentDataType {
    F32,
    U8,
    U16,
    U32,
}

impl ComponentDataType {
    /// returns the size of the data type in bytes e.g. 4 for F32
    pub fn size(self) -> usize {
        match self {
            ComponentDataType::F32 => 4,
            ComponentDataType::U8 => 1,
            ComponentDataType::U16 => 2,
            ComponentDataType::U32 => 4,
        }
    }

    /// returns unique id for the data type.
    pub fn get_id(self) -> usize {
        match self {
            ComponentDataType::F32 => 0,
            ComponentDataType::U8 => 1,
            ComponentDataType::U16 => 2,
            ComponentDataType::U32 => 3,
        }
    }

    /// returns the data type from the given id.
    pub fn from_id(id: usize) -> Result<Self, Err> {
        match id {
            0 => Ok(ComponentDataType::F32),
            1 => Ok(ComponentDataType::U8),
            2 => Ok(ComponentDataType::U16),
            3 => Ok(ComponentDataType::U32),
            _ => Err(Err::InvalidComponentId(id)),
        }
    }
}
