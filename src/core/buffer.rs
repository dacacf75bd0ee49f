use serde::Serialize;

use super::format::NumericFormat;

/// Buffers at most this large should be stored inline next to their
/// metadata; larger ones are better referenced out of line.
pub const INLINE_BYTE_LIMIT: usize = 1000;

/// Advisory storage placement for a geometry buffer. The encoder never acts
/// on this itself; an external store may.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub enum StorageHint {
    Inline,
    ByReference,
}

/// One contiguous interleaved geometry buffer: the vertex section followed by
/// the index section. Produced once by the encoder and immutable afterwards;
/// structural changes replace the buffer wholesale.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct GeometryBuffer {
    data: Vec<u8>,
}

impl GeometryBuffer {
    pub(crate) fn from_bytes(data: Vec<u8>) -> Self {
        Self { data }
    }

    /// returns the number of bytes stored in the buffer.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.data
    }

    /// returns whether this buffer should be stored inline or by reference,
    /// based on its size.
    pub fn storage_hint(&self) -> StorageHint {
        if self.data.len() > INLINE_BYTE_LIMIT {
            StorageHint::ByReference
        } else {
            StorageHint::Inline
        }
    }
}

/// Describes the index section at the tail of a geometry buffer. `offset` is
/// the first byte past the vertex section, and `count` is the total number of
/// scalar indices, i.e. groups times group size.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
pub struct IndexDescriptor {
    pub format: NumericFormat,
    pub count: usize,
    pub offset: usize,
}

/// Selects the narrowest index format that can address the given number of
/// distinct vertices.
pub fn index_format_for(vertex_count: usize) -> NumericFormat {
    if vertex_count < 256 {
        NumericFormat::U8
    } else if vertex_count < 65536 {
        NumericFormat::U16
    } else {
        NumericFormat::U32
    }
}
