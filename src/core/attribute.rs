use serde::Serialize;

use super::format::NumericFormat;

/// The semantic of one per-vertex attribute channel.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize)]
pub enum AttributeSemantic {
    Position,
    Normal,
    Tangent,
    Texture,
    Color,
}

impl AttributeSemantic {
    /// returns the numeric format fixed for this semantic. The mapping is a
    /// fixed table so that the encoder and the decoder always agree on the
    /// record layout.
    pub fn format(self) -> NumericFormat {
        match self {
            AttributeSemantic::Position => NumericFormat::Vec3,
            AttributeSemantic::Normal => NumericFormat::Vec3,
            AttributeSemantic::Tangent => NumericFormat::Vec3,
            AttributeSemantic::Texture => NumericFormat::U16Vec2,
            AttributeSemantic::Color => NumericFormat::U8Vec4,
        }
    }

    /// returns whether values of this semantic are stored as normalized
    /// integers.
    pub fn is_normalized(self) -> bool {
        match self {
            AttributeSemantic::Position => false,
            AttributeSemantic::Normal => false,
            AttributeSemantic::Tangent => false,
            AttributeSemantic::Texture => true,
            AttributeSemantic::Color => true,
        }
    }
}

/// Describes one attribute channel within an interleaved vertex record.
/// `stride` is the byte size of one complete record and is therefore shared
/// by every descriptor of a layout.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AttributeDescriptor {
    pub semantic: AttributeSemantic,
    pub format: NumericFormat,
    pub normalized: bool,

    /// byte offset of this attribute within one vertex record
    pub offset: usize,

    /// byte size of one complete vertex record
    pub stride: usize,
}

impl AttributeDescriptor {
    fn new(semantic: AttributeSemantic) -> Self {
        Self {
            semantic,
            format: semantic.format(),
            normalized: semantic.is_normalized(),
            offset: 0,
            stride: 0,
        }
    }
}

/// Presence flags for the optional attribute streams. The position stream is
/// always present.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
pub struct AttributePresence {
    pub normals: bool,
    pub tangents: bool,
    pub textures: bool,
    pub colors: bool,
}

/// Plans the interleaved record layout for the given attribute presence.
///
/// Descriptors come out in the fixed semantic order POSITION, NORMAL,
/// TANGENT, TEXTURE, COLOR, restricted to the present streams. Offsets are
/// assigned by a running byte offset, and the final offset becomes the shared
/// stride.
pub fn layout(presence: AttributePresence) -> Vec<AttributeDescriptor> {
    let mut descriptors = vec![AttributeDescriptor::new(AttributeSemantic::Position)];

    if presence.normals {
        descriptors.push(AttributeDescriptor::new(AttributeSemantic::Normal));
    }
    if presence.tangents {
        descriptors.push(AttributeDescriptor::new(AttributeSemantic::Tangent));
    }
    if presence.textures {
        descriptors.push(AttributeDescriptor::new(AttributeSemantic::Texture));
    }
    if presence.colors {
        descriptors.push(AttributeDescriptor::new(AttributeSemantic::Color));
    }

    let mut offset = 0;
    for descriptor in &mut descriptors {
        descriptor.offset = offset;
        offset += descriptor.format.size();
    }
    for descriptor in &mut descriptors {
        descriptor.stride = offset;
    }

    descriptors
}
