//! Per-instance transform buffers. One instance is a fixed 16-float record
//! (position, color, rotation, scale, 4 components each), so the flat buffer
//! needs no layout metadata beyond its length.

use serde::Serialize;
use thiserror::Error;

use crate::core::byte_coder::{ByteReader, ByteWriter, ReaderErr};
use crate::core::format::ComponentDataType;

pub const DEFAULT_POSITION: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
pub const DEFAULT_COLOR: [f32; 4] = [1.0, 1.0, 1.0, 1.0];
pub const DEFAULT_ROTATION: [f32; 4] = [0.0, 0.0, 0.0, 0.0];
pub const DEFAULT_SCALE: [f32; 4] = [1.0, 1.0, 1.0, 0.0];

#[remain::sorted]
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Err {
    #[error("Reader error: {0}")]
    Reader(#[from] ReaderErr),

    #[error("An instance buffer of {len} bytes does not divide into 4-byte floats.")]
    UnalignedBuffer { len: usize },
}

/// One instanced transform variant.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct InstanceRecord {
    pub position: [f32; 4],
    pub color: [f32; 4],
    pub rotation: [f32; 4],
    pub scale: [f32; 4],
}

impl InstanceRecord {
    pub const NUM_FLOATS: usize = 16;

    pub fn to_floats(&self) -> [f32; 16] {
        let mut out = [0.0; 16];
        out[..4].copy_from_slice(&self.position);
        out[4..8].copy_from_slice(&self.color);
        out[8..12].copy_from_slice(&self.rotation);
        out[12..].copy_from_slice(&self.scale);
        out
    }

    pub fn from_floats(floats: [f32; 16]) -> Self {
        let mut record = Self::default();
        record.position.copy_from_slice(&floats[..4]);
        record.color.copy_from_slice(&floats[4..8]);
        record.rotation.copy_from_slice(&floats[8..12]);
        record.scale.copy_from_slice(&floats[12..]);
        record
    }
}

impl Default for InstanceRecord {
    fn default() -> Self {
        Self {
            position: DEFAULT_POSITION,
            color: DEFAULT_COLOR,
            rotation: DEFAULT_ROTATION,
            scale: DEFAULT_SCALE,
        }
    }
}

/// Builds a flat instance buffer from up to four optional lists. An empty
/// slice means the list is absent.
///
/// Elements shorter than 4 components are right-padded with zeros; components
/// past the fourth are ignored. Lists shorter than the longest list fall back
/// to the per-category default for the missing trailing instances. With no
/// input at all, exactly one default instance is produced.
pub fn build_instances(
    positions: &[Vec<f32>],
    colors: &[Vec<f32>],
    rotations: &[Vec<f32>],
    scales: &[Vec<f32>],
) -> Vec<f32> {
    let num_instances = positions
        .len()
        .max(colors.len())
        .max(rotations.len())
        .max(scales.len())
        .max(1);

    let mut out = Vec::with_capacity(num_instances * InstanceRecord::NUM_FLOATS);
    for i in 0..num_instances {
        let record = InstanceRecord {
            position: group(positions, i, DEFAULT_POSITION),
            color: group(colors, i, DEFAULT_COLOR),
            rotation: group(rotations, i, DEFAULT_ROTATION),
            scale: group(scales, i, DEFAULT_SCALE),
        };
        out.extend_from_slice(&record.to_floats());
    }
    out
}

/// Concatenates new instance values onto an existing decoded buffer. The
/// caller owns the swap of the resulting buffer for the old one.
pub fn append_instances(existing: &[f32], added: &[f32]) -> Vec<f32> {
    let mut out = Vec::with_capacity(existing.len() + added.len());
    out.extend_from_slice(existing);
    out.extend_from_slice(added);
    out
}

/// Serializes instance values as little-endian single-precision floats.
pub fn instances_to_bytes(values: &[f32]) -> Vec<u8> {
    let mut bytes = Vec::with_capacity(values.len() * ComponentDataType::F32.size());
    for &value in values {
        bytes.write_f32(value);
    }
    bytes
}

/// Reads an instance buffer back into its flat float values.
pub fn instances_from_bytes(bytes: &[u8]) -> Result<Vec<f32>, Err> {
    let float_size = ComponentDataType::F32.size();
    if bytes.len() % float_size != 0 {
        return Err(Err::UnalignedBuffer { len: bytes.len() });
    }
    let mut reader = bytes.iter().copied();
    let mut values = Vec::with_capacity(bytes.len() / float_size);
    for _ in 0..bytes.len() / float_size {
        values.push(reader.read_f32()?);
    }
    Ok(values)
}

fn group(list: &[Vec<f32>], idx: usize, default: [f32; 4]) -> [f32; 4] {
    match list.get(idx) {
        Some(element) => padded(element),
        None => default,
    }
}

fn padded(element: &[f32]) -> [f32; 4] {
    let mut out = [0.0; 4];
    for (slot, &component) in out.iter_mut().zip(element) {
        *slot = component;
    }
    out
}
