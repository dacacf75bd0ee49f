use indexmap::IndexMap;
use thiserror::Error;

use crate::core::attribute::{AttributeDescriptor, AttributeSemantic};
use crate::core::buffer::IndexDescriptor;
use crate::core::byte_coder::{ByteReader, ReaderErr};
use crate::core::format::{ComponentDataType, NumericFormat};

#[remain::sorted]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Err {
    #[error("The index section ends at byte {end}, but the buffer holds {len} bytes.")]
    IndexSectionOutOfBounds { end: usize, len: usize },

    #[error("The index count {count} does not divide into groups of {group_size}.")]
    RaggedIndexCount { count: usize, group_size: usize },

    #[error("Reader error: {0}")]
    Reader(#[from] ReaderErr),

    #[error("The vertex section of {len} bytes does not divide into records of {stride} bytes.")]
    UnevenVertexSection { len: usize, stride: usize },
}

/// The structured mesh data reconstructed from one geometry buffer. Position
/// values land in `points`; every other semantic lands in `attributes`, keyed
/// in layout order. Every attribute list is as long as `points`.
#[derive(Clone, Debug, PartialEq)]
pub struct DecodedPatch {
    pub points: Vec<[f32; 3]>,
    pub indices: Vec<Vec<u32>>,
    pub attributes: IndexMap<AttributeSemantic, Vec<Vec<f32>>>,
}

/// Decodes an interleaved geometry buffer back into per-vertex streams and
/// index groups.
///
/// `layout` must be the descriptor list used at encode time, in the same
/// order, and `group_size` must be the group size the indices were encoded
/// with (e.g. 3 for triangles); neither is inferred from the bytes.
pub fn decode_patch(
    bytes: &[u8],
    layout: &[AttributeDescriptor],
    index: &IndexDescriptor,
    group_size: usize,
) -> Result<DecodedPatch, Err> {
    let indices = decode_indices(bytes, index, group_size)?;

    let vertex_section = bytes
        .get(..index.offset)
        .ok_or(Err::IndexSectionOutOfBounds {
            end: index.offset,
            len: bytes.len(),
        })?;

    let stride = layout.first().map(|d| d.stride).unwrap_or(0);
    if stride == 0 {
        if !vertex_section.is_empty() {
            return Err(Err::UnevenVertexSection {
                len: vertex_section.len(),
                stride,
            });
        }
        return Ok(DecodedPatch {
            points: Vec::new(),
            indices,
            attributes: IndexMap::new(),
        });
    }
    if vertex_section.len() % stride != 0 {
        return Err(Err::UnevenVertexSection {
            len: vertex_section.len(),
            stride,
        });
    }

    let num_points = vertex_section.len() / stride;
    let mut points = Vec::with_capacity(num_points);
    let mut attributes: IndexMap<AttributeSemantic, Vec<Vec<f32>>> = layout
        .iter()
        .filter(|d| d.semantic != AttributeSemantic::Position)
        .map(|d| (d.semantic, Vec::with_capacity(num_points)))
        .collect();

    let mut reader = vertex_section.iter().copied();
    for _ in 0..num_points {
        for descriptor in layout {
            let value = read_value(&mut reader, descriptor)?;
            if descriptor.semantic == AttributeSemantic::Position {
                let mut components = value.into_iter();
                points.push([
                    components.next().unwrap_or(0.0),
                    components.next().unwrap_or(0.0),
                    components.next().unwrap_or(0.0),
                ]);
            } else {
                attributes.entry(descriptor.semantic).or_default().push(value);
            }
        }
    }

    Ok(DecodedPatch {
        points,
        indices,
        attributes,
    })
}

/// Slices the index section out of the buffer and regroups it.
fn decode_indices(
    bytes: &[u8],
    index: &IndexDescriptor,
    group_size: usize,
) -> Result<Vec<Vec<u32>>, Err> {
    if index.count == 0 {
        return Ok(Vec::new());
    }
    if group_size == 0 || index.count % group_size != 0 {
        return Err(Err::RaggedIndexCount {
            count: index.count,
            group_size,
        });
    }

    let end = index.offset + index.count * index.format.size();
    let section = bytes.get(index.offset..end).ok_or(Err::IndexSectionOutOfBounds {
        end,
        len: bytes.len(),
    })?;

    let mut reader = section.iter().copied();
    let mut flat = Vec::with_capacity(index.count);
    for _ in 0..index.count {
        flat.push(read_index(&mut reader, index.format)?);
    }
    Ok(flat.chunks(group_size).map(|group| group.to_vec()).collect())
}

/// Reads one attribute value, dequantizing normalized integer channels back
/// into [0, 1].
fn read_value<R: ByteReader>(
    reader: &mut R,
    descriptor: &AttributeDescriptor,
) -> Result<Vec<f32>, ReaderErr> {
    let num_components = descriptor.format.num_components();
    let mut value = Vec::with_capacity(num_components);
    match descriptor.format.component_type() {
        ComponentDataType::F32 => {
            for _ in 0..num_components {
                value.push(reader.read_f32()?);
            }
        }
        ComponentDataType::U8 => {
            for _ in 0..num_components {
                let raw = reader.read_u8()?;
                value.push(dequantize(raw as u32, u8::MAX as f32, descriptor.normalized));
            }
        }
        ComponentDataType::U16 => {
            for _ in 0..num_components {
                let raw = reader.read_u16()?;
                value.push(dequantize(raw as u32, u16::MAX as f32, descriptor.normalized));
            }
        }
        ComponentDataType::U32 => {
            for _ in 0..num_components {
                value.push(reader.read_u32()? as f32);
            }
        }
    }
    Ok(value)
}

fn read_index<R: ByteReader>(reader: &mut R, format: NumericFormat) -> Result<u32, ReaderErr> {
    match format {
        NumericFormat::U8 => Ok(reader.read_u8()? as u32),
        NumericFormat::U16 => Ok(reader.read_u16()? as u32),
        _ => reader.read_u32(),
    }
}

fn dequantize(raw: u32, max: f32, normalized: bool) -> f32 {
    if normalized {
        raw as f32 / max
    } else {
        raw as f32
    }
}
