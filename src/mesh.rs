//! Procedural meshes for the candle scene.

use glam::Vec3;
use std::f32::consts::{PI, TAU};

#[repr(C)]
#[derive(Copy, Clone, Debug, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct Vertex {
    pub position: [f32; 3],
    pub normal: [f32; 3],
}

#[derive(Clone, Debug, Default)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub indices: Vec<u16>,
}

impl Mesh {
    fn push(&mut self, position: Vec3, normal: Vec3) -> u16 {
        let index = self.vertices.len() as u16;
        self.vertices.push(Vertex {
            position: position.to_array(),
            normal: normal.to_array(),
        });
        index
    }
}

/// Capped cylinder centred on the origin, axis along Y.
pub fn cylinder(radius: f32, height: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let half = height * 0.5;
    let mut mesh = Mesh::default();

    // side: duplicate the seam column so each ring is closed
    for i in 0..=segments {
        let a = i as f32 / segments as f32 * TAU;
        let n = Vec3::new(a.sin(), 0.0, a.cos());
        mesh.push(Vec3::new(n.x * radius, half, n.z * radius), n);
        mesh.push(Vec3::new(n.x * radius, -half, n.z * radius), n);
    }
    for i in 0..segments as u16 {
        let top = i * 2;
        let bottom = top + 1;
        let next_top = top + 2;
        let next_bottom = top + 3;
        mesh.indices
            .extend_from_slice(&[top, bottom, next_top, next_top, bottom, next_bottom]);
    }

    for (y, normal) in [(half, Vec3::Y), (-half, Vec3::NEG_Y)] {
        let center = mesh.push(Vec3::new(0.0, y, 0.0), normal);
        let first = center + 1;
        for i in 0..segments {
            let a = i as f32 / segments as f32 * TAU;
            mesh.push(Vec3::new(a.sin() * radius, y, a.cos() * radius), normal);
        }
        for i in 0..segments as u16 {
            let a = first + i;
            let b = first + (i + 1) % segments as u16;
            if normal.y > 0.0 {
                mesh.indices.extend_from_slice(&[center, a, b]);
            } else {
                mesh.indices.extend_from_slice(&[center, b, a]);
            }
        }
    }
    mesh
}

/// UV sphere with `segments` slices and stacks.
pub fn uv_sphere(radius: f32, segments: u32) -> Mesh {
    let segments = segments.max(3);
    let mut mesh = Mesh::default();
    for stack in 0..=segments {
        let phi = stack as f32 / segments as f32 * PI;
        for slice in 0..=segments {
            let theta = slice as f32 / segments as f32 * TAU;
            let n = Vec3::new(phi.sin() * theta.cos(), phi.cos(), phi.sin() * theta.sin());
            mesh.push(n * radius, n);
        }
    }
    let row = segments as u16 + 1;
    for stack in 0..segments as u16 {
        for slice in 0..segments as u16 {
            let a = stack * row + slice;
            let b = a + row;
            mesh.indices
                .extend_from_slice(&[a, a + 1, b, b, a + 1, b + 1]);
        }
    }
    mesh
}

/// Horizontal square facing +Y.
pub fn floor_plane(size: f32) -> Mesh {
    let h = size * 0.5;
    let mut mesh = Mesh::default();
    for (x, z) in [(-h, -h), (h, -h), (h, h), (-h, h)] {
        mesh.push(Vec3::new(x, 0.0, z), Vec3::Y);
    }
    mesh.indices.extend_from_slice(&[0, 2, 1, 0, 3, 2]);
    mesh
}
