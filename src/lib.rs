// lib.rs

/// Contains the format registry, the attribute layout planner, and the
/// geometry buffer definitions.
pub mod core;

/// Defines the interleaved buffer encoder.
pub mod encode;

/// Defines the buffer decoder.
pub mod decode;

/// Builds and extends per-instance transform buffers.
pub mod instance;

pub use crate::core::buffer::GeometryBuffer;
pub use crate::encode::{encode_patch, GeometryPatchInput};
pub use crate::decode::{decode_patch, DecodedPatch};

/// Contains the most commonly used traits, types, and functions.
pub mod prelude {
    pub use crate::core::attribute::{
        layout, AttributeDescriptor, AttributePresence, AttributeSemantic,
    };
    pub use crate::core::buffer::{
        index_format_for, GeometryBuffer, IndexDescriptor, StorageHint,
    };
    pub use crate::core::byte_coder::{ByteReader, ByteWriter};
    pub use crate::core::format::{ComponentDataType, NumericFormat};
    pub use crate::decode::{self, decode_patch, DecodedPatch};
    pub use crate::encode::{self, encode_patch, EncodedPatch, GeometryPatchInput};
    pub use crate::instance::{
        append_instances, build_instances, instances_from_bytes, instances_to_bytes,
        InstanceRecord,
    };
}
