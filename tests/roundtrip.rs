use geopatch::prelude::*;

const GROUP_SIZE: usize = 3;

fn quad_input() -> GeometryPatchInput {
    GeometryPatchInput {
        vertices: vec![
            [0.0, 0.0, 0.0],
            [1.0, 0.0, 0.0],
            [1.0, 1.0, 0.0],
            [0.0, 1.0, 0.0],
        ],
        normals: Some(vec![[0.0, 0.0, 1.0]; 4]),
        tangents: Some(vec![[1.0, 0.0, 0.0]; 4]),
        textures: Some(vec![
            [0.0, 0.0],
            [1.0, 0.0],
            [1.0, 1.0],
            [0.0, 1.0],
        ]),
        colors: Some(vec![
            [1.0, 0.0, 0.0, 1.0],
            [0.0, 1.0, 0.0, 1.0],
            [0.0, 0.0, 1.0, 1.0],
            [0.25, 0.5, 0.75, 1.0],
        ]),
        indices: vec![vec![0, 1, 2], vec![0, 2, 3]],
    }
}

#[test]
fn full_attribute_roundtrip() {
    let input = quad_input();
    let patch = encode_patch(&input).unwrap();

    // Position (12) + normal (12) + tangent (12) + texture (4) + color (4).
    assert_eq!(patch.layout[0].stride, 44);
    assert_eq!(patch.index.offset, 4 * 44);
    assert_eq!(patch.index.count, 6);
    assert_eq!(patch.buffer.len(), 4 * 44 + 6);

    let decoded = decode_patch(
        patch.buffer.as_bytes(),
        &patch.layout,
        &patch.index,
        GROUP_SIZE,
    )
    .unwrap();

    // Full-precision channels are exact.
    assert_eq!(decoded.points, input.vertices);
    assert_eq!(decoded.indices, input.indices);
    let normals = &decoded.attributes[&AttributeSemantic::Normal];
    for (got, want) in normals.iter().zip(input.normals.as_ref().unwrap()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }
    let tangents = &decoded.attributes[&AttributeSemantic::Tangent];
    for (got, want) in tangents.iter().zip(input.tangents.as_ref().unwrap()) {
        assert_eq!(got.as_slice(), want.as_slice());
    }

    // Normalized channels round-trip within quantization tolerance.
    let textures = &decoded.attributes[&AttributeSemantic::Texture];
    for (got, want) in textures.iter().zip(input.textures.as_ref().unwrap()) {
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() <= 1.0 / 65535.0, "{} vs {}", g, w);
        }
    }
    let colors = &decoded.attributes[&AttributeSemantic::Color];
    for (got, want) in colors.iter().zip(input.colors.as_ref().unwrap()) {
        for (g, w) in got.iter().zip(want) {
            assert!((g - w).abs() <= 1.0 / 255.0, "{} vs {}", g, w);
        }
    }

    // Every mapped list is as long as the point list.
    for (_, values) in &decoded.attributes {
        assert_eq!(values.len(), decoded.points.len());
    }
}

#[test]
fn triangle_buffer_bytes() {
    let input = GeometryPatchInput {
        vertices: vec![[0.0, 0.0, 0.0], [1.0, 0.0, 0.0], [0.0, 1.0, 0.0]],
        indices: vec![vec![0, 1, 2]],
        ..Default::default()
    };
    let patch = encode_patch(&input).unwrap();
    assert_eq!(patch.buffer.len(), 39);
    assert_eq!(patch.index.offset, 36);
    assert_eq!(patch.index.format, NumericFormat::U8);
    assert_eq!(patch.buffer.storage_hint(), StorageHint::Inline);
}

#[test]
fn large_patch_hints_by_reference() {
    let n = 100;
    let input = GeometryPatchInput {
        vertices: (0..n).map(|i| [i as f32, 0.0, 0.0]).collect(),
        indices: (0..n as u32 - 2).map(|i| vec![0, i + 1, i + 2]).collect(),
        ..Default::default()
    };
    let patch = encode_patch(&input).unwrap();
    assert!(patch.buffer.len() > 1000);
    assert_eq!(patch.buffer.storage_hint(), StorageHint::ByReference);
}

#[test]
fn instance_buffer_flow() {
    // Build, persist as bytes, read back, append, as the owning entity's
    // update path does.
    let first = build_instances(&[vec![0.0, 0.0, 0.0]], &[], &[], &[]);
    let bytes = instances_to_bytes(&first);
    assert_eq!(bytes.len(), 64);

    let existing = instances_from_bytes(&bytes).unwrap();
    assert_eq!(existing, first);

    let added = build_instances(&[vec![1.0, 1.0, 1.0]], &[], &[], &[]);
    let combined = append_instances(&existing, &added);
    assert_eq!(combined.len(), 2 * InstanceRecord::NUM_FLOATS);
    assert_eq!(&combined[..16], first.as_slice());

    let record = InstanceRecord::from_floats(combined[16..].try_into().unwrap());
    assert_eq!(record.position, [1.0, 1.0, 1.0, 0.0]);
    assert_eq!(record.color, [1.0, 1.0, 1.0, 1.0]);
    assert_eq!(record.scale, [1.0, 1.0, 1.0, 0.0]);
}
