//! # Primitive Shape Generation
//!
//! This module contains functions to generate the primitive shapes used by the
//! scene. Every generator returns interleaved vertices with normals and texture
//! coordinates plus a 16-bit triangle index list. Generators never fail:
//! parameters below a shape's minimum are raised to it, and parameters that
//! would overflow 16-bit indices are lowered with a warning.

use super::{GeometryData, MAX_VERTICES};
use std::f32::consts::PI;

/// Largest sphere segment count whose vertices fit 16-bit indices.
pub const SPHERE_MAX_SEGMENTS: u32 = 181;
/// Largest sharp cylinder segment count whose vertices fit 16-bit indices.
pub const SHARP_CYLINDER_MAX_SEGMENTS: u32 = 10922;

const UP: [f32; 3] = [0.0, 1.0, 0.0];
const DOWN: [f32; 3] = [0.0, -1.0, 0.0];

/// Generate a box centered at the origin
///
/// # Arguments
/// * `x`, `y`, `z` - Half extents along each axis
///
/// Each corner is stored three times, once per adjoining face, so every face
/// gets a flat normal. The result always has 24 vertices and 12 triangles.
#[rustfmt::skip]
pub fn generate_cube(x: f32, y: f32, z: f32) -> GeometryData {
    let vertices = vec![
        // Corner 0
        -x, -y, -z,   0.0, -1.0,  0.0,   0.0, 1.0,
        -x, -y, -z,  -1.0,  0.0,  0.0,   0.0, 1.0,
        -x, -y, -z,   0.0,  0.0, -1.0,   1.0, 1.0,
        // Corner 1
        -x, -y,  z,   0.0, -1.0,  0.0,   0.0, 0.0,
        -x, -y,  z,   0.0,  0.0,  1.0,   0.0, 1.0,
        -x, -y,  z,  -1.0,  0.0,  0.0,   1.0, 1.0,
        // Corner 2
         x, -y,  z,   0.0, -1.0,  0.0,   1.0, 0.0,
         x, -y,  z,   0.0,  0.0,  1.0,   1.0, 1.0,
         x, -y,  z,   1.0,  0.0,  0.0,   0.0, 1.0,
        // Corner 3
         x, -y, -z,   0.0, -1.0,  0.0,   1.0, 1.0,
         x, -y, -z,   0.0,  0.0, -1.0,   0.0, 1.0,
         x, -y, -z,   1.0,  0.0,  0.0,   1.0, 1.0,
        // Corner 4
        -x,  y, -z,  -1.0,  0.0,  0.0,   0.0, 0.0,
        -x,  y, -z,   0.0,  0.0, -1.0,   1.0, 0.0,
        -x,  y, -z,   0.0,  1.0,  0.0,   0.0, 0.0,
        // Corner 5
        -x,  y,  z,   0.0,  0.0,  1.0,   0.0, 0.0,
        -x,  y,  z,  -1.0,  0.0,  0.0,   1.0, 0.0,
        -x,  y,  z,   0.0,  1.0,  0.0,   0.0, 1.0,
        // Corner 6
         x,  y,  z,   0.0,  0.0,  1.0,   1.0, 0.0,
         x,  y,  z,   1.0,  0.0,  0.0,   0.0, 0.0,
         x,  y,  z,   0.0,  1.0,  0.0,   1.0, 1.0,
        // Corner 7
         x,  y, -z,   0.0,  0.0, -1.0,   0.0, 0.0,
         x,  y, -z,   1.0,  0.0,  0.0,   1.0, 0.0,
         x,  y, -z,   0.0,  1.0,  0.0,   1.0, 0.0,
    ];

    let indices = vec![
        // Bottom
        0, 9, 6,     6, 3, 0,
        // Front
        4, 7, 18,    18, 15, 4,
        // Left
        1, 5, 16,    16, 12, 1,
        // Back
        2, 13, 21,   21, 10, 2,
        // Right
        8, 11, 22,   22, 19, 8,
        // Top
        14, 17, 20,  20, 23, 14,
    ];

    GeometryData { vertices, indices }
}

/// Generate a UV sphere centered at the origin
///
/// # Arguments
/// * `segments` - Number of horizontal bands, at least 2. Each ring has twice
///   as many vertices.
/// * `radius` - Sphere radius
///
/// Vertices run from the bottom pole through `segments - 1` rings to the top
/// pole, `2 + (segments - 1) * 2 * segments` in total.
pub fn generate_sphere(segments: u32, radius: f32) -> GeometryData {
    let mut bands = segments.max(2);
    if bands > SPHERE_MAX_SEGMENTS {
        log::warn!(
            "sphere with {} segments exceeds 16-bit indices, using {}",
            bands,
            SPHERE_MAX_SEGMENTS
        );
        bands = SPHERE_MAX_SEGMENTS;
    }
    let h = bands as usize;
    let v = 2 * h;
    let vertex_count = 2 + (h - 1) * v;
    let triangle_count = 2 * v + (h - 2) * 2 * v;
    let step = PI / h as f32;

    let mut data = GeometryData::with_capacity(vertex_count, triangle_count * 3);

    // Bottom pole
    data.push_vertex([0.0, -radius, 0.0], DOWN, [0.5, 0.0]);

    for i in 0..h - 1 {
        let theta = -PI + (i + 1) as f32 * step;
        let (ring, y) = theta.sin_cos();
        for j in 0..v {
            let phi = j as f32 * step;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let normal = [ring * sin_phi, y, ring * cos_phi];
            data.push_vertex(
                [radius * normal[0], radius * normal[1], radius * normal[2]],
                normal,
                [phi / (2.0 * PI), 1.0 + theta / PI],
            );
        }
    }

    // Top pole
    data.push_vertex([0.0, radius, 0.0], UP, [0.5, 1.0]);

    push_bottom_fan(&mut data, v);
    push_ring_bands(&mut data, 1, v, h - 2);
    push_top_fan(&mut data, vertex_count - 1, v);

    data
}

/// Generate a smooth-shaded cylinder centered at the origin
///
/// # Arguments
/// * `vertical_segments` - Vertices around the circumference, at least 4
/// * `horizontal_segments` - Bands along the height, at least 1
/// * `radius` - Cylinder radius
/// * `height` - Total height along Y
///
/// The body rings are shared between neighbouring bands and spaced by the
/// cosine of an angle sweeping from -PI to 0, which packs them towards the
/// caps. Vertex count is `2 + vertical * (horizontal + 3)`.
pub fn generate_cylinder_smooth(
    vertical_segments: u32,
    horizontal_segments: u32,
    radius: f32,
    height: f32,
) -> GeometryData {
    let (v, h) = clamp_smooth_cylinder(vertical_segments.max(4), horizontal_segments.max(1));
    let (v, h) = (v as usize, h as usize);
    let vertex_count = 2 + v * (h + 3);
    let half = height / 2.0;
    let phi_step = 2.0 * PI / v as f32;

    let mut data = GeometryData::with_capacity(vertex_count, (2 * v + 2 * v * h) * 3);

    data.push_vertex([0.0, -half, 0.0], DOWN, [0.5, 0.5]);
    push_cap_ring(&mut data, v, radius, -half, DOWN);

    for i in 0..=h {
        let theta = -PI + i as f32 * PI / h as f32;
        let y = theta.cos();
        for j in 0..v {
            let phi = j as f32 * phi_step;
            let (sin_phi, cos_phi) = phi.sin_cos();
            data.push_vertex(
                [radius * sin_phi, half * y, radius * cos_phi],
                [sin_phi, y, cos_phi],
                [phi / (2.0 * PI), (y * 0.5 - 0.5).abs()],
            );
        }
    }

    push_cap_ring(&mut data, v, radius, half, UP);
    data.push_vertex([0.0, half, 0.0], UP, [0.5, 0.5]);

    push_bottom_fan(&mut data, v);
    push_ring_bands(&mut data, v + 1, v, h);
    push_top_fan(&mut data, vertex_count - 1, v);

    data
}

/// Generate a faceted cylinder centered at the origin
///
/// # Arguments
/// * `vertical_segments` - Number of side facets, at least 4
/// * `radius` - Cylinder radius
/// * `height` - Total height along Y
///
/// Body vertices are duplicated per facet so each facet carries its own
/// normal. Vertex count is `6 * vertical + 2`.
pub fn generate_cylinder_sharp(vertical_segments: u32, radius: f32, height: f32) -> GeometryData {
    let mut facets = vertical_segments.max(4);
    if facets > SHARP_CYLINDER_MAX_SEGMENTS {
        log::warn!(
            "sharp cylinder with {} segments exceeds 16-bit indices, using {}",
            facets,
            SHARP_CYLINDER_MAX_SEGMENTS
        );
        facets = SHARP_CYLINDER_MAX_SEGMENTS;
    }
    let v = facets as usize;
    let vertex_count = 6 * v + 2;
    let half = height / 2.0;
    let phi_step = 2.0 * PI / v as f32;

    let mut data = GeometryData::with_capacity(vertex_count, 4 * v * 3);

    data.push_vertex([0.0, -half, 0.0], DOWN, [0.5, 0.5]);
    push_cap_ring(&mut data, v, radius, -half, DOWN);

    // Bottom and top body rings
    for y in [-1.0f32, 1.0] {
        let t = (y * 0.5 - 0.5).abs();
        for j in 0..v {
            let phi = j as f32 * phi_step;
            let phi_next = phi + phi_step;
            let (sin_phi, cos_phi) = phi.sin_cos();
            let (sin_next, cos_next) = phi_next.sin_cos();
            // Sum of both edge directions, left unnormalized
            let normal = [sin_phi + sin_next, y + y, cos_phi + cos_next];

            data.push_vertex(
                [radius * sin_phi, half * y, radius * cos_phi],
                normal,
                [phi / (2.0 * PI), t],
            );
            let s_next = if j == v - 1 {
                1.0
            } else {
                phi_next / (2.0 * PI)
            };
            data.push_vertex(
                [radius * sin_next, half * y, radius * cos_next],
                normal,
                [s_next, t],
            );
        }
    }

    push_cap_ring(&mut data, v, radius, half, UP);
    data.push_vertex([0.0, half, 0.0], UP, [0.5, 0.5]);

    push_bottom_fan(&mut data, v);
    let mut v0 = v + 1;
    for _ in 0..v {
        let top = 2 * v + v0;
        data.push_triangle(v0 as u16, (v0 + 1) as u16, top as u16);
        data.push_triangle((v0 + 1) as u16, (top + 1) as u16, top as u16);
        v0 += 2;
    }
    push_top_fan(&mut data, vertex_count - 1, v);

    data
}

/// Generate a flat grid in the XZ plane
///
/// # Arguments
/// * `rows` - Quads along X, at least 1
/// * `columns` - Quads along -Z, at least 1
///
/// Vertices sit on integer steps: `x` runs from `-rows / 2` and `z` from 0
/// towards `-columns`. Normals point up and texture coordinates are all zero.
pub fn generate_plane_grid(rows: u32, columns: u32) -> GeometryData {
    let (rows, columns) = clamp_plane_grid(rows.max(1), columns.max(1));
    let (rows, columns) = (rows as usize, columns as usize);
    let stride = rows + 1;

    let mut data = GeometryData::with_capacity(stride * (columns + 1), rows * columns * 6);

    for i in 0..=columns {
        let mut x = -(rows as f32 / 2.0);
        for _ in 0..=rows {
            data.push_vertex([x, 0.0, -(i as f32)], UP, [0.0, 0.0]);
            x += 1.0;
        }
    }

    for j in 0..columns {
        for l in 0..rows {
            let v0 = j * stride + l;
            let v1 = v0 + 1;
            let v2 = v0 + stride + 1;
            let v3 = v0 + stride;
            data.push_triangle(v0 as u16, v1 as u16, v2 as u16);
            data.push_triangle(v2 as u16, v3 as u16, v0 as u16);
        }
    }

    data
}

/// Generate a single quad in the XZ plane centered at the origin
///
/// # Arguments
/// * `width`, `height` - Extents along X and Z
/// * `texture_width`, `texture_height` - World size of one texture repeat.
///   Values at or below 0.0001 stretch the texture once across the quad.
pub fn generate_plane(
    width: f32,
    height: f32,
    texture_width: f32,
    texture_height: f32,
) -> GeometryData {
    let s = if texture_width > 0.0001 {
        width / texture_width
    } else {
        1.0
    };
    let t = if texture_height > 0.0001 {
        height / texture_height
    } else {
        1.0
    };
    let (hw, hh) = (width / 2.0, height / 2.0);

    let mut data = GeometryData::with_capacity(4, 6);
    data.push_vertex([-hw, 0.0, -hh], UP, [0.0, 0.0]);
    data.push_vertex([hw, 0.0, -hh], UP, [s, 0.0]);
    data.push_vertex([hw, 0.0, hh], UP, [s, t]);
    data.push_vertex([-hw, 0.0, hh], UP, [0.0, t]);
    data.push_triangle(0, 2, 1);
    data.push_triangle(0, 3, 2);
    data
}

/// Flat cap ring at height `y`, uv mapped onto a disc.
fn push_cap_ring(data: &mut GeometryData, v: usize, radius: f32, y: f32, normal: [f32; 3]) {
    let phi_step = 2.0 * PI / v as f32;
    for j in 0..v {
        let phi = j as f32 * phi_step;
        let (sin_phi, cos_phi) = phi.sin_cos();
        data.push_vertex(
            [radius * sin_phi, y, radius * cos_phi],
            normal,
            [cos_phi * 0.5 + 0.5, (phi + PI).sin() * 0.5 + 0.5],
        );
    }
}

/// Fan from vertex 0 over the ring starting at vertex 1.
fn push_bottom_fan(data: &mut GeometryData, v: usize) {
    for i in 0..v {
        let next = if i + 2 <= v { i + 2 } else { i + 2 - v };
        data.push_triangle(0, next as u16, (i + 1) as u16);
    }
}

/// Fan from `last` over the `v` vertices just before it.
fn push_top_fan(data: &mut GeometryData, last: usize, v: usize) {
    for i in 0..v {
        let next = if i == v - 1 { last - 1 } else { last - 2 - i };
        data.push_triangle(last as u16, next as u16, (last - 1 - i) as u16);
    }
}

/// Two triangles per quad between `bands + 1` consecutive rings of `v`
/// vertices starting at `first`, closing each band across the seam.
fn push_ring_bands(data: &mut GeometryData, first: usize, v: usize, bands: usize) {
    let mut v0 = first;
    for _ in 0..bands {
        for j in 0..v {
            // The last quad of a ring wraps back to the ring's first vertex
            let next = if j < v - 1 { v0 + 1 } else { v0 + 1 - v };
            let next_up = next + v;
            let up = v0 + v;
            data.push_triangle(v0 as u16, next as u16, up as u16);
            data.push_triangle(next as u16, next_up as u16, up as u16);
            v0 += 1;
        }
    }
}

fn clamp_smooth_cylinder(vertical: u32, horizontal: u32) -> (u32, u32) {
    // 2 + v * (h + 3) <= MAX_VERTICES
    let budget = (MAX_VERTICES - 2) as u32;
    let v = vertical.min(budget / 4);
    let h = horizontal.min(budget / v - 3);
    if (v, h) != (vertical, horizontal) {
        log::warn!(
            "smooth cylinder {}x{} exceeds 16-bit indices, using {}x{}",
            vertical,
            horizontal,
            v,
            h
        );
    }
    (v, h)
}

fn clamp_plane_grid(rows: u32, columns: u32) -> (u32, u32) {
    // (rows + 1) * (columns + 1) <= MAX_VERTICES, columns give way first
    let budget = MAX_VERTICES as u32;
    let r = rows.min(budget / 2 - 1);
    let c = columns.min(budget / (r + 1) - 1);
    if (r, c) != (rows, columns) {
        log::warn!(
            "plane grid {}x{} exceeds 16-bit indices, using {}x{}",
            rows,
            columns,
            r,
            c
        );
    }
    (r, c)
}
