// Host-side tests for procedural scene meshes.
// The main crate is wasm-only, so we include the pure-Rust modules directly.

#![allow(dead_code)]
mod constants {
    include!("../src/constants.rs");
}
#[path = "../src/mesh.rs"]
mod mesh;

use glam::Vec3;
use mesh::*;

fn indices_in_range(m: &Mesh) -> bool {
    m.indices.iter().all(|&i| (i as usize) < m.vertices.len())
}

#[test]
fn cylinder_counts_and_bounds() {
    let seg = 16;
    let m = cylinder(0.5, 2.0, seg);
    assert_eq!(m.vertices.len(), 4 * (seg as usize + 1));
    assert_eq!(m.indices.len(), 12 * seg as usize);
    assert!(indices_in_range(&m));
    for v in &m.vertices {
        let p = Vec3::from_array(v.position);
        assert!(p.y.abs() <= 1.0 + 1e-6);
        assert!((p.x * p.x + p.z * p.z).sqrt() <= 0.5 + 1e-5);
        assert!((Vec3::from_array(v.normal).length() - 1.0).abs() < 1e-5);
    }
}

#[test]
fn cylinder_top_cap_faces_up() {
    let seg = 8;
    let m = cylinder(1.0, 1.0, seg);
    let start = 6 * seg as usize;
    let tri: Vec<Vec3> = m.indices[start..start + 3]
        .iter()
        .map(|&i| Vec3::from_array(m.vertices[i as usize].position))
        .collect();
    let n = (tri[1] - tri[0]).cross(tri[2] - tri[0]);
    assert!(n.y > 0.0);
}

#[test]
fn cylinder_clamps_degenerate_segment_count() {
    let m = cylinder(1.0, 1.0, 0);
    assert_eq!(m.indices.len(), 12 * 3);
}

#[test]
fn sphere_vertices_lie_on_radius() {
    let seg = 12;
    let m = uv_sphere(0.15, seg);
    assert_eq!(m.vertices.len(), (seg as usize + 1).pow(2));
    assert_eq!(m.indices.len(), 6 * (seg as usize).pow(2));
    assert!(indices_in_range(&m));
    for v in &m.vertices {
        assert!((Vec3::from_array(v.position).length() - 0.15).abs() < 1e-5);
    }
}

#[test]
fn flame_sphere_fits_u16_indices() {
    let m = uv_sphere(0.15, constants::FLAME_SEGMENTS);
    assert!(m.vertices.len() < u16::MAX as usize);
    assert!(indices_in_range(&m));
}

#[test]
fn floor_is_flat_square() {
    let m = floor_plane(10.0);
    assert_eq!(m.vertices.len(), 4);
    assert_eq!(m.indices.len(), 6);
    for v in &m.vertices {
        assert_eq!(v.position[1], 0.0);
        assert_eq!(v.position[0].abs(), 5.0);
        assert_eq!(v.normal, [0.0, 1.0, 0.0]);
    }
}

#[test]
fn vertex_layout_is_tightly_packed() {
    assert_eq!(std::mem::size_of::<Vertex>(), 24);
    let m = floor_plane(1.0);
    let bytes: &[u8] = bytemuck::cast_slice(&m.vertices);
    assert_eq!(bytes.len(), 4 * 24);
}
