use thiserror::Error;

use crate::core::attribute::{
    layout, AttributeDescriptor, AttributePresence, AttributeSemantic,
};
use crate::core::buffer::{index_format_for, GeometryBuffer, IndexDescriptor};
use crate::core::byte_coder::ByteWriter;
use crate::core::format::{ComponentDataType, NumericFormat};

#[remain::sorted]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Err {
    #[error("Index group has {found} indices, but the first group has {expected}.")]
    RaggedIndexGroup { expected: usize, found: usize },

    #[error("The {semantic:?} stream has {found} values, but there are {expected} vertices.")]
    ShapeMismatch {
        semantic: AttributeSemantic,
        expected: usize,
        found: usize,
    },
}

/// The per-vertex streams and the index stream of one geometry patch. All
/// present streams must have one entry per vertex; every index group must
/// have the same number of indices (e.g. 3 for triangles).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct GeometryPatchInput {
    pub vertices: Vec<[f32; 3]>,
    pub normals: Option<Vec<[f32; 3]>>,
    pub tangents: Option<Vec<[f32; 3]>>,
    pub textures: Option<Vec<[f32; 2]>>,
    pub colors: Option<Vec<[f32; 4]>>,
    pub indices: Vec<Vec<u32>>,
}

impl GeometryPatchInput {
    fn presence(&self) -> AttributePresence {
        AttributePresence {
            normals: self.normals.is_some(),
            tangents: self.tangents.is_some(),
            textures: self.textures.is_some(),
            colors: self.colors.is_some(),
        }
    }

    /// Checks that every present stream is as long as the vertex stream.
    fn check_shapes(&self) -> Result<(), Err> {
        let expected = self.vertices.len();
        let lengths = [
            (AttributeSemantic::Normal, self.normals.as_ref().map(Vec::len)),
            (AttributeSemantic::Tangent, self.tangents.as_ref().map(Vec::len)),
            (AttributeSemantic::Texture, self.textures.as_ref().map(Vec::len)),
            (AttributeSemantic::Color, self.colors.as_ref().map(Vec::len)),
        ];
        for (semantic, len) in lengths {
            if let Some(found) = len {
                if found != expected {
                    return Err(Err::ShapeMismatch {
                        semantic,
                        expected,
                        found,
                    });
                }
            }
        }
        Ok(())
    }

    /// Checks that every index group has the size of the first group, and
    /// returns that size.
    fn check_index_groups(&self) -> Result<usize, Err> {
        let expected = self.indices.first().map(Vec::len).unwrap_or(0);
        for group in &self.indices {
            if group.len() != expected {
                return Err(Err::RaggedIndexGroup {
                    expected,
                    found: group.len(),
                });
            }
        }
        Ok(expected)
    }
}

/// The result of encoding one geometry patch: the interleaved buffer together
/// with the metadata an external store needs to describe it.
#[derive(Clone, Debug, PartialEq)]
pub struct EncodedPatch {
    pub buffer: GeometryBuffer,
    pub layout: Vec<AttributeDescriptor>,
    pub index: IndexDescriptor,
    pub vertex_count: usize,
}

/// Encodes the given streams into one interleaved buffer.
///
/// The vertex section interleaves the present attributes per vertex in layout
/// order; the index section follows immediately, in the narrowest format the
/// vertex count allows. All validation happens before any byte is written.
pub fn encode_patch(input: &GeometryPatchInput) -> Result<EncodedPatch, Err> {
    input.check_shapes()?;
    let group_size = input.check_index_groups()?;

    let vertex_count = input.vertices.len();
    let layout = layout(input.presence());
    let index_format = index_format_for(vertex_count);

    let stride = layout[0].stride;
    let mut bytes =
        Vec::with_capacity(vertex_count * stride + input.indices.len() * group_size * index_format.size());

    for vertex in 0..vertex_count {
        for descriptor in &layout {
            match descriptor.semantic {
                AttributeSemantic::Position => {
                    write_value(&mut bytes, descriptor, &input.vertices[vertex]);
                }
                AttributeSemantic::Normal => {
                    if let Some(normals) = &input.normals {
                        write_value(&mut bytes, descriptor, &normals[vertex]);
                    }
                }
                AttributeSemantic::Tangent => {
                    if let Some(tangents) = &input.tangents {
                        write_value(&mut bytes, descriptor, &tangents[vertex]);
                    }
                }
                AttributeSemantic::Texture => {
                    if let Some(textures) = &input.textures {
                        write_value(&mut bytes, descriptor, &textures[vertex]);
                    }
                }
                AttributeSemantic::Color => {
                    if let Some(colors) = &input.colors {
                        write_value(&mut bytes, descriptor, &colors[vertex]);
                    }
                }
            }
        }
    }

    let index_offset = bytes.len();
    for group in &input.indices {
        for &index in group {
            write_index(&mut bytes, index_format, index);
        }
    }

    let index = IndexDescriptor {
        format: index_format,
        count: input.indices.len() * group_size,
        offset: index_offset,
    };

    Ok(EncodedPatch {
        buffer: GeometryBuffer::from_bytes(bytes),
        layout,
        index,
        vertex_count,
    })
}

/// Serializes one attribute value in the component type of its descriptor.
/// Normalized integer channels quantize from [0, 1].
fn write_value<W: ByteWriter>(writer: &mut W, descriptor: &AttributeDescriptor, components: &[f32]) {
    match descriptor.format.component_type() {
        ComponentDataType::F32 => {
            for &component in components {
                writer.write_f32(component);
            }
        }
        ComponentDataType::U8 => {
            for &component in components {
                let raw = if descriptor.normalized {
                    quantize(component, u8::MAX as f32)
                } else {
                    component as u32
                };
                writer.write_u8(raw as u8);
            }
        }
        ComponentDataType::U16 => {
            for &component in components {
                let raw = if descriptor.normalized {
                    quantize(component, u16::MAX as f32)
                } else {
                    component as u32
                };
                writer.write_u16(raw as u16);
            }
        }
        ComponentDataType::U32 => {
            for &component in components {
                writer.write_u32(component as u32);
            }
        }
    }
}

fn write_index<W: ByteWriter>(writer: &mut W, format: NumericFormat, index: u32) {
    match format {
        NumericFormat::U8 => writer.write_u8(index as u8),
        NumericFormat::U16 => writer.write_u16(index as u16),
        _ => writer.write_u32(index),
    }
}

fn quantize(value: f32, max: f32) -> u32 {
    (value.clamp(0.0, 1.0) * max).round() as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_triangle_patch() {
        let input = GeometryPatchInput {
            vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
            indices: vec![vec![0, 1, 2]],
            ..Default::default()
        };
        let patch = encode_patch(&input).unwrap();
        // 3 vertices * 12 bytes of position, then 3 one-byte indices.
        assert_eq!(patch.buffer.len(), 39);
        assert_eq!(patch.index.offset, 36);
        assert_eq!(patch.index.count, 3);
        assert_eq!(patch.index.format, NumericFormat::U8);
        assert_eq!(patch.vertex_count, 3);
        assert_eq!(patch.layout.len(), 1);

        // The second vertex record starts at byte 12 and holds (1, 0, 0).
        let bytes = patch.buffer.as_bytes();
        assert_eq!(&bytes[12..16], &1.0_f32.to_le_bytes());
        assert_eq!(&bytes[36..], &[0, 1, 2]);
    }

    #[test]
    fn test_shape_mismatch_detected_before_output() {
        let input = GeometryPatchInput {
            vertices: vec![[0.0; 3], [1.0; 3], [2.0; 3]],
            normals: Some(vec![[0.0, 0.0, 1.0]]),
            indices: vec![vec![0, 1, 2]],
            ..Default::default()
        };
        assert_eq!(
            encode_patch(&input),
            Err(Err::ShapeMismatch {
                semantic: AttributeSemantic::Normal,
                expected: 3,
                found: 1,
            })
        );
    }

    #[test]
    fn test_ragged_index_groups_rejected() {
        let input = GeometryPatchInput {
            vertices: vec![[0.0; 3], [1.0; 3], [2.0; 3], [3.0; 3]],
            indices: vec![vec![0, 1, 2], vec![1, 2]],
            ..Default::default()
        };
        assert_eq!(
            encode_patch(&input),
            Err(Err::RaggedIndexGroup {
                expected: 3,
                found: 2,
            })
        );
    }

    #[test]
    fn test_empty_input_is_valid() {
        let patch = encode_patch(&GeometryPatchInput::default()).unwrap();
        assert!(patch.buffer.is_empty());
        assert_eq!(patch.index.offset, 0);
        assert_eq!(patch.index.count, 0);
        assert_eq!(patch.vertex_count, 0);
    }

    #[test]
    fn test_index_format_follows_vertex_count() {
        let vertices = vec![[0.0_f32; 3]; 300];
        let input = GeometryPatchInput {
            vertices,
            indices: vec![vec![0, 1, 299]],
            ..Default::default()
        };
        let patch = encode_patch(&input).unwrap();
        assert_eq!(patch.index.format, NumericFormat::U16);
        // 300 * 12 bytes of vertex data, then 3 two-byte indices.
        assert_eq!(patch.buffer.len(), 300 * 12 + 6);
        let bytes = patch.buffer.as_bytes();
        assert_eq!(&bytes[patch.index.offset..], &[0, 0, 1, 0, 43, 1]);
    }

    #[test]
    fn test_color_channel_quantization() {
        let input = GeometryPatchInput {
            vertices: vec![[0.0; 3]],
            colors: Some(vec![[1.0, 0.0, 0.5, 2.0]]),
            indices: vec![vec![0, 0, 0]],
            ..Default::default()
        };
        let patch = encode_patch(&input).unwrap();
        // Position (12 bytes) then the four quantized color bytes; values
        // outside [0, 1] clamp.
        let bytes = patch.buffer.as_bytes();
        assert_eq!(&bytes[12..16], &[255, 0, 128, 255]);
    }
}
