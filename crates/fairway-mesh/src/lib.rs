//! Triangle-list meshes for the course, ball, and hole.
//!
//! Every generator returns interleaved vertex data, 8 floats per vertex:
//! position (3), normal (3), uv (2). Triangles are wound counter-clockwise
//! when seen from outside, normals are unit length and UVs stay within `[0, 1]`.
//! All primitives are unit sized and centred so a renderer can place them
//! with a scale/rotate/translate transform (see [`scene`]).

pub mod scene;

use std::f32::consts::{PI, TAU};

use glam::{Vec2, Vec3};

/// Floats per interleaved vertex.
pub const FLOATS_PER_VERTEX: usize = 8;

/// Fewest segments a round primitive is built with.
pub const MIN_SEGMENTS: u16 = 3;

/// One decoded vertex.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Vertex {
    pub position: Vec3,
    pub normal: Vec3,
    pub uv: Vec2,
}

/// Interleaved triangle-list vertex data.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MeshData {
    data: Vec<f32>,
}

impl MeshData {
    fn with_vertex_capacity(vertices: usize) -> Self {
        Self {
            data: Vec::with_capacity(vertices * FLOATS_PER_VERTEX),
        }
    }

    fn push_vertex(&mut self, pos: Vec3, normal: Vec3, u: f32, v: f32) {
        self.data
            .extend_from_slice(&[pos.x, pos.y, pos.z, normal.x, normal.y, normal.z, u, v]);
    }

    fn push_triangle(&mut self, corners: [(Vec3, Vec2); 3], normal: Vec3) {
        for (pos, uv) in corners {
            self.push_vertex(pos, normal, uv.x, uv.y);
        }
    }

    /// Raw floats, ready for a vertex buffer upload.
    pub fn as_slice(&self) -> &[f32] {
        &self.data
    }

    pub fn vertex_count(&self) -> usize {
        self.data.len() / FLOATS_PER_VERTEX
    }

    pub fn triangle_count(&self) -> usize {
        self.vertex_count() / 3
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn vertices(&self) -> impl Iterator<Item = Vertex> + '_ {
        self.data.chunks_exact(FLOATS_PER_VERTEX).map(|v| Vertex {
            position: Vec3::new(v[0], v[1], v[2]),
            normal: Vec3::new(v[3], v[4], v[5]),
            uv: Vec2::new(v[6], v[7]),
        })
    }

    /// Vertices grouped three at a time.
    pub fn triangles(&self) -> impl Iterator<Item = [Vertex; 3]> + '_ {
        let verts: Vec<Vertex> = self.vertices().collect();
        (0..verts.len() / 3).map(move |i| [verts[3 * i], verts[3 * i + 1], verts[3 * i + 2]])
    }
}

/// Surface displacement that gives the golf ball its dimples.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Dimples {
    /// Fraction of the radius the surface moves in or out.
    pub strength: f32,
    /// Pattern repeats per unit of the direction vector.
    pub frequency: f32,
}

impl Default for Dimples {
    fn default() -> Self {
        Self {
            strength: 0.03,
            frequency: 18.0,
        }
    }
}

impl Dimples {
    fn radius_scale(&self, dir: Vec3) -> f32 {
        let f = self.frequency;
        let pattern = (dir.x * f).sin() * (dir.y * f).sin() * (dir.z * f).sin();
        1.0 + self.strength * pattern
    }
}

/// Key for mesh caches: identifies one unique mesh configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MeshKey {
    Cuboid,
    Plane,
    Sphere { segments: u16 },
    /// Sphere with the default dimple pattern.
    GolfBall { segments: u16 },
    Cylinder { segments: u16 },
    HoleDisc { segments: u16 },
    RampWedge,
}

impl MeshKey {
    pub fn generate(self) -> MeshData {
        match self {
            Self::Cuboid => cuboid(),
            Self::Plane => plane(),
            Self::Sphere { segments } => sphere(segments, None),
            Self::GolfBall { segments } => sphere(segments, Some(Dimples::default())),
            Self::Cylinder { segments } => cylinder(segments),
            Self::HoleDisc { segments } => hole_disc(segments),
            Self::RampWedge => ramp_wedge(),
        }
    }
}

fn clamp_segments(segments: u16) -> u16 {
    if segments < MIN_SEGMENTS {
        tracing::warn!(segments, "Too few mesh segments, using {MIN_SEGMENTS}");
        MIN_SEGMENTS
    } else {
        segments
    }
}

/// Unit cube centred at the origin (half-extents 0.5).
pub fn cuboid() -> MeshData {
    let mut mesh = MeshData::with_vertex_capacity(36);
    // (normal, right, up) with right × up = normal
    let faces: [(Vec3, Vec3, Vec3); 6] = [
        (Vec3::Z, Vec3::X, Vec3::Y),
        (Vec3::NEG_Z, Vec3::NEG_X, Vec3::Y),
        (Vec3::X, Vec3::NEG_Z, Vec3::Y),
        (Vec3::NEG_X, Vec3::Z, Vec3::Y),
        (Vec3::Y, Vec3::X, Vec3::NEG_Z),
        (Vec3::NEG_Y, Vec3::X, Vec3::Z),
    ];

    for (normal, right, up) in faces {
        let center = normal * 0.5;
        let r = right * 0.5;
        let u = up * 0.5;
        let v00 = (center - r - u, Vec2::new(0.0, 0.0));
        let v10 = (center + r - u, Vec2::new(1.0, 0.0));
        let v11 = (center + r + u, Vec2::new(1.0, 1.0));
        let v01 = (center - r + u, Vec2::new(0.0, 1.0));
        mesh.push_triangle([v00, v10, v11], normal);
        mesh.push_triangle([v00, v11, v01], normal);
    }
    mesh
}

/// Unit square on XZ at y = 0, facing up.
pub fn plane() -> MeshData {
    let mut mesh = MeshData::with_vertex_capacity(6);
    let h = 0.5;
    let v00 = (Vec3::new(-h, 0.0, -h), Vec2::new(0.0, 0.0));
    let v10 = (Vec3::new(h, 0.0, -h), Vec2::new(1.0, 0.0));
    let v11 = (Vec3::new(h, 0.0, h), Vec2::new(1.0, 1.0));
    let v01 = (Vec3::new(-h, 0.0, h), Vec2::new(0.0, 1.0));
    mesh.push_triangle([v00, v11, v10], Vec3::Y);
    mesh.push_triangle([v00, v01, v11], Vec3::Y);
    mesh
}

/// UV sphere of diameter 1, optionally dimpled.
pub fn sphere(segments: u16, dimples: Option<Dimples>) -> MeshData {
    let segments = clamp_segments(segments);
    let rings = segments;
    let sectors = segments;
    let mut mesh = MeshData::with_vertex_capacity(rings as usize * sectors as usize * 6);

    let vertex = |ring: f32, sector: f32| {
        let dir = sphere_direction(ring, sector);
        let scale = dimples.map_or(1.0, |d| d.radius_scale(dir));
        (dir * 0.5 * scale, dir, Vec2::new(sector, ring))
    };

    for r in 0..rings {
        for s in 0..sectors {
            let r0 = r as f32 / rings as f32;
            let r1 = (r + 1) as f32 / rings as f32;
            let s0 = s as f32 / sectors as f32;
            let s1 = (s + 1) as f32 / sectors as f32;

            let quad = [
                vertex(r0, s0),
                vertex(r1, s0),
                vertex(r1, s1),
                vertex(r0, s1),
            ];
            for [a, b, c] in [[0, 2, 1], [0, 3, 2]] {
                for (pos, normal, uv) in [quad[a], quad[b], quad[c]] {
                    mesh.push_vertex(pos, normal, uv.x, uv.y);
                }
            }
        }
    }
    mesh
}

fn sphere_direction(ring_frac: f32, sector_frac: f32) -> Vec3 {
    let theta = ring_frac * PI;
    let phi = sector_frac * TAU;
    Vec3::new(theta.sin() * phi.cos(), theta.cos(), theta.sin() * phi.sin())
        .normalize_or(Vec3::Y)
}

/// Capped cylinder of diameter 1 and height 1, axis along Y, centred at the origin.
pub fn cylinder(segments: u16) -> MeshData {
    let segments = clamp_segments(segments);
    let mut mesh = MeshData::with_vertex_capacity(segments as usize * 12);
    let h = 0.5;
    let r = 0.5;

    for i in 0..segments {
        let u0 = i as f32 / segments as f32;
        let u1 = (i + 1) as f32 / segments as f32;
        let (s0, c0) = (u0 * TAU).sin_cos();
        let (s1, c1) = (u1 * TAU).sin_cos();

        let p0_bot = Vec3::new(c0 * r, -h, s0 * r);
        let p1_bot = Vec3::new(c1 * r, -h, s1 * r);
        let p0_top = Vec3::new(c0 * r, h, s0 * r);
        let p1_top = Vec3::new(c1 * r, h, s1 * r);
        let n0 = Vec3::new(c0, 0.0, s0);
        let n1 = Vec3::new(c1, 0.0, s1);

        // Side quad
        mesh.push_vertex(p0_bot, n0, u0, 0.0);
        mesh.push_vertex(p1_top, n1, u1, 1.0);
        mesh.push_vertex(p1_bot, n1, u1, 0.0);
        mesh.push_vertex(p0_bot, n0, u0, 0.0);
        mesh.push_vertex(p0_top, n0, u0, 1.0);
        mesh.push_vertex(p1_top, n1, u1, 1.0);

        // Caps, UVs projected from above
        let cap_uv = |c: f32, s: f32| Vec2::new(0.5 + 0.5 * c, 0.5 + 0.5 * s);
        let centre_uv = Vec2::splat(0.5);
        mesh.push_triangle(
            [
                (Vec3::new(0.0, h, 0.0), centre_uv),
                (p1_top, cap_uv(c1, s1)),
                (p0_top, cap_uv(c0, s0)),
            ],
            Vec3::Y,
        );
        mesh.push_triangle(
            [
                (Vec3::new(0.0, -h, 0.0), centre_uv),
                (p0_bot, cap_uv(c0, s0)),
                (p1_bot, cap_uv(c1, s1)),
            ],
            Vec3::NEG_Y,
        );
    }
    mesh
}

/// Flat disc of diameter 1 on XZ at y = 0, facing up. Drawn just above the
/// green to mark the cup.
pub fn hole_disc(segments: u16) -> MeshData {
    let segments = clamp_segments(segments);
    let mut mesh = MeshData::with_vertex_capacity(segments as usize * 3);
    let r = 0.5;
    let centre = (Vec3::ZERO, Vec2::splat(0.5));

    for i in 0..segments {
        let a0 = i as f32 / segments as f32 * TAU;
        let a1 = (i + 1) as f32 / segments as f32 * TAU;
        let (s0, c0) = a0.sin_cos();
        let (s1, c1) = a1.sin_cos();
        let rim0 = (
            Vec3::new(c0 * r, 0.0, s0 * r),
            Vec2::new(0.5 + 0.5 * c0, 0.5 + 0.5 * s0),
        );
        let rim1 = (
            Vec3::new(c1 * r, 0.0, s1 * r),
            Vec2::new(0.5 + 0.5 * c1, 0.5 + 0.5 * s1),
        );
        mesh.push_triangle([centre, rim1, rim0], Vec3::Y);
    }
    mesh
}

/// Wedge over the unit XZ footprint: height 0 at x = -0.5 rising to 1 at x = +0.5.
pub fn ramp_wedge() -> MeshData {
    let mut mesh = MeshData::with_vertex_capacity(24);
    let h = 0.5;
    let b0 = Vec3::new(-h, 0.0, -h);
    let b1 = Vec3::new(h, 0.0, -h);
    let b2 = Vec3::new(h, 0.0, h);
    let b3 = Vec3::new(-h, 0.0, h);
    let t1 = Vec3::new(h, 1.0, -h);
    let t2 = Vec3::new(h, 1.0, h);
    let uv = |u: f32, v: f32| Vec2::new(u, v);

    // Slope
    let slope = Vec3::new(-1.0, 1.0, 0.0).normalize();
    mesh.push_triangle([(b0, uv(0.0, 0.0)), (b3, uv(0.0, 1.0)), (t2, uv(1.0, 1.0))], slope);
    mesh.push_triangle([(b0, uv(0.0, 0.0)), (t2, uv(1.0, 1.0)), (t1, uv(1.0, 0.0))], slope);

    // Bottom
    mesh.push_triangle(
        [(b0, uv(0.0, 0.0)), (b1, uv(1.0, 0.0)), (b2, uv(1.0, 1.0))],
        Vec3::NEG_Y,
    );
    mesh.push_triangle(
        [(b0, uv(0.0, 0.0)), (b2, uv(1.0, 1.0)), (b3, uv(0.0, 1.0))],
        Vec3::NEG_Y,
    );

    // Tall end
    mesh.push_triangle([(b1, uv(0.0, 0.0)), (t1, uv(0.0, 1.0)), (t2, uv(1.0, 1.0))], Vec3::X);
    mesh.push_triangle([(b1, uv(0.0, 0.0)), (t2, uv(1.0, 1.0)), (b2, uv(1.0, 0.0))], Vec3::X);

    // Sides
    mesh.push_triangle(
        [(b0, uv(0.0, 0.0)), (t1, uv(1.0, 1.0)), (b1, uv(1.0, 0.0))],
        Vec3::NEG_Z,
    );
    mesh.push_triangle([(b3, uv(0.0, 0.0)), (b2, uv(1.0, 0.0)), (t2, uv(1.0, 1.0))], Vec3::Z);
    mesh
}
