//! The stateful sculpt engine.

use hashbrown::HashSet;
use nalgebra::{Point3, Vector3};
use poly_types::{Axis, Geometry, Mesh, Transform};
use tracing::debug;

use crate::brush::{BrushSettings, BrushType};
use crate::falloff::falloff_weight;

/// Brush applicator bound to a single mesh.
///
/// The engine owns the bound mesh between [`SculptEngine::set_mesh`]
/// and [`SculptEngine::release_mesh`] and mutates its vertex buffer in
/// place. Pointer events must arrive from one thread; the engine keeps
/// no locks.
#[derive(Debug, Default)]
pub struct SculptEngine {
    mesh: Option<Mesh>,
    adjacency: Vec<Vec<u32>>,
    brush: BrushSettings,
    symmetry: [bool; 3],
    snapshot: Option<Vec<f32>>,
    touched: HashSet<u32>,
    stroke_active: bool,
    stroke_seed: u64,
}

impl SculptEngine {
    /// Create an engine with no bound mesh and default brush settings.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind a mesh, returning the previously bound one, if any.
    ///
    /// Binding rebuilds the one-ring adjacency used by the smooth
    /// brush and drops any stroke state.
    pub fn set_mesh(&mut self, mesh: Mesh) -> Option<Mesh> {
        self.adjacency = build_adjacency(&mesh.geometry);
        self.snapshot = None;
        self.touched.clear();
        self.stroke_active = false;
        self.mesh.replace(mesh)
    }

    /// Release and return the bound mesh.
    pub fn release_mesh(&mut self) -> Option<Mesh> {
        self.adjacency.clear();
        self.snapshot = None;
        self.touched.clear();
        self.stroke_active = false;
        self.mesh.take()
    }

    /// The bound mesh, if any.
    #[must_use]
    pub fn mesh(&self) -> Option<&Mesh> {
        self.mesh.as_ref()
    }

    /// Replace the active brush settings.
    pub fn set_brush_settings(&mut self, brush: BrushSettings) {
        self.brush = brush;
    }

    /// The active brush settings.
    #[must_use]
    pub fn brush_settings(&self) -> &BrushSettings {
        &self.brush
    }

    /// Enable or disable stroke mirroring across a world-axis plane.
    pub fn set_symmetry(&mut self, axis: Axis, enabled: bool) {
        self.symmetry[axis.index()] = enabled;
    }

    /// Whether a symmetry plane is enabled.
    #[must_use]
    pub const fn symmetry(&self, axis: Axis) -> bool {
        self.symmetry[axis.index()]
    }

    /// Start a stroke at a world-space hit point.
    ///
    /// Snapshots the vertex buffer for [`SculptEngine::undo_stroke`]
    /// and seeds the random falloff so the stroke replays
    /// deterministically.
    pub fn begin_stroke(&mut self, hit: Point3<f32>) {
        let Some(mesh) = &self.mesh else { return };
        self.snapshot = Some(mesh.geometry.vertices.clone());
        self.touched.clear();
        self.stroke_active = true;
        self.stroke_seed = (u64::from(hit.x.to_bits()) << 32)
            ^ (u64::from(hit.y.to_bits()) << 16)
            ^ u64::from(hit.z.to_bits());
    }

    /// Apply one pointer-move step of the active stroke.
    ///
    /// A no-op before [`SculptEngine::begin_stroke`]. The step runs
    /// once at the hit point and once more per enabled symmetry plane
    /// with the hit and delta reflected.
    pub fn update_stroke(&mut self, hit: Point3<f32>, delta: Vector3<f32>) {
        if !self.stroke_active {
            return;
        }
        let Some(mesh) = self.mesh.as_mut() else {
            return;
        };

        apply_brush(
            mesh,
            &self.adjacency,
            &self.brush,
            hit,
            delta,
            self.stroke_seed,
            &mut self.touched,
        );

        for axis in 0..3 {
            if !self.symmetry[axis] {
                continue;
            }
            let mut mirrored_hit = hit;
            mirrored_hit[axis] = -mirrored_hit[axis];
            let mut mirrored_delta = delta;
            mirrored_delta[axis] = -mirrored_delta[axis];
            apply_brush(
                mesh,
                &self.adjacency,
                &self.brush,
                mirrored_hit,
                mirrored_delta,
                self.stroke_seed,
                &mut self.touched,
            );
        }
    }

    /// Finish the stroke: run the auto-smooth pass over the touched
    /// vertices, recompute normals, and clear stroke state. The
    /// snapshot stays available for [`SculptEngine::undo_stroke`].
    pub fn end_stroke(&mut self) {
        if !self.stroke_active {
            return;
        }
        let Some(mesh) = self.mesh.as_mut() else {
            return;
        };

        if self.brush.auto_smooth > 0.0 {
            smooth_vertices(
                &mut mesh.geometry,
                &self.adjacency,
                &self.touched,
                self.brush.auto_smooth,
            );
        }

        recompute_normals_unweighted(&mut mesh.geometry);
        mesh.geometry.rebuild();

        debug!(touched = self.touched.len(), "stroke ended");
        self.stroke_active = false;
        self.touched.clear();
    }

    /// Restore the positions snapshotted at stroke start and recompute
    /// normals.
    pub fn undo_stroke(&mut self) {
        let Some(mesh) = self.mesh.as_mut() else {
            return;
        };
        let Some(snapshot) = &self.snapshot else {
            return;
        };

        mesh.geometry.vertices.clone_from(snapshot);
        recompute_normals_unweighted(&mut mesh.geometry);
        mesh.geometry.rebuild();
        self.stroke_active = false;
        self.touched.clear();
    }
}

/// One-ring neighbourhood per vertex, from the derived edge list.
fn build_adjacency(geometry: &Geometry) -> Vec<Vec<u32>> {
    let mut adjacency = vec![Vec::new(); geometry.vertex_count()];
    for edge in &geometry.edges {
        adjacency[edge.a as usize].push(edge.b);
        adjacency[edge.b as usize].push(edge.a);
    }
    adjacency
}

/// Apply one brush step around a world-space hit point.
#[allow(clippy::too_many_arguments)]
fn apply_brush(
    mesh: &mut Mesh,
    adjacency: &[Vec<u32>],
    brush: &BrushSettings,
    hit: Point3<f32>,
    delta: Vector3<f32>,
    stroke_seed: u64,
    touched: &mut HashSet<u32>,
) {
    let transform = mesh.transform;
    let geometry = &mesh.geometry;
    let sign = if brush.invert { -1.0 } else { 1.0 };

    // Gather affected vertices with their weights and world-space data.
    struct Affected {
        vertex: u32,
        weight: f32,
        world: Point3<f32>,
        normal: Vector3<f32>,
    }
    let mut affected = Vec::new();

    for v in 0..geometry.vertex_count() as u32 {
        let world = transform.apply_point(geometry.position(v));
        let distance = (world - hit).norm();
        if distance > brush.radius {
            continue;
        }

        let weight = falloff_weight(
            brush.falloff,
            distance,
            brush.radius,
            stroke_seed ^ u64::from(v),
        ) * brush.strength
            * sign;

        let normal = {
            let n = transform.rotate_vector(geometry.normal(v));
            let len = n.norm();
            if len < 1e-12 { n } else { n / len }
        };

        affected.push(Affected {
            vertex: v,
            weight,
            world,
            normal,
        });
    }

    if affected.is_empty() {
        return;
    }

    // Average normal of the affected region, for the flatten plane.
    let average_normal = {
        let sum: Vector3<f32> = affected.iter().map(|a| a.normal).sum();
        let len = sum.norm();
        if len < 1e-12 { Vector3::zeros() } else { sum / len }
    };

    // Offsets are computed against the pre-step positions, then
    // applied, so vertex order cannot bias the result.
    let offsets: Vec<(u32, Point3<f32>, Vector3<f32>)> = affected
        .iter()
        .map(|a| {
            let w = a.weight;
            let offset = match brush.brush_type {
                BrushType::Grab => delta * w,
                BrushType::Smooth => {
                    smooth_offset(geometry, adjacency, &transform, a.vertex, a.world) * w
                }
                BrushType::Clay => a.normal * (w * 0.3 * brush.radius),
                BrushType::Crease => ((hit - a.world) * 0.5 - a.normal * 0.5) * (0.3 * w),
                BrushType::Inflate => a.normal * (w * 0.2 * brush.radius),
                BrushType::Flatten => {
                    let deviation = (a.world - hit).dot(&average_normal);
                    -average_normal * (deviation * w)
                }
                BrushType::Pinch => (hit - a.world) * (0.2 * w),
            };
            (a.vertex, a.world, offset)
        })
        .collect();

    for (vertex, world, offset) in offsets {
        let local = transform.inverse_point(world + offset);
        mesh.geometry.set_position(vertex, local);
        touched.insert(vertex);
    }
}

/// Vector from a vertex toward the mean of its one-ring, in world
/// space.
fn smooth_offset(
    geometry: &Geometry,
    adjacency: &[Vec<u32>],
    transform: &Transform,
    vertex: u32,
    world: Point3<f32>,
) -> Vector3<f32> {
    let neighbours = &adjacency[vertex as usize];
    if neighbours.is_empty() {
        return Vector3::zeros();
    }

    let mut mean = Vector3::zeros();
    for &n in neighbours {
        mean += transform.apply_point(geometry.position(n)).coords;
    }
    mean /= neighbours.len() as f32;
    mean - world.coords
}

/// One local-space smoothing pass over a vertex set.
fn smooth_vertices(
    geometry: &mut Geometry,
    adjacency: &[Vec<u32>],
    vertices: &HashSet<u32>,
    strength: f32,
) {
    let updates: Vec<(u32, Point3<f32>)> = vertices
        .iter()
        .filter_map(|&v| {
            let neighbours = &adjacency[v as usize];
            if neighbours.is_empty() {
                return None;
            }
            let mut mean = Vector3::zeros();
            for &n in neighbours {
                mean += geometry.position(n).coords;
            }
            mean /= neighbours.len() as f32;
            let current = geometry.position(v).coords;
            Some((v, Point3::from(current + (mean - current) * strength)))
        })
        .collect();

    for (v, position) in updates {
        geometry.set_position(v, position);
    }
}

/// Per-vertex normals as the normalised sum of incident face normals,
/// without area weighting.
fn recompute_normals_unweighted(geometry: &mut Geometry) {
    let mut sums = vec![Vector3::zeros(); geometry.vertex_count()];

    for t in 0..geometry.triangle_count() {
        let normal = geometry.triangle_normal(t);
        for &v in &geometry.triangle(t) {
            sums[v as usize] += normal;
        }
    }

    for (v, sum) in sums.iter().enumerate() {
        let len = sum.norm();
        let normal = if len < 1e-12 { Vector3::zeros() } else { sum / len };
        geometry.set_normal(v as u32, normal);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::falloff::FalloffType;
    use approx::assert_relative_eq;

    /// A 3x3 vertex grid in the XY plane with unit spacing.
    fn grid_mesh() -> Mesh {
        let mut g = Geometry::new();
        for y in 0..3 {
            for x in 0..3 {
                g.push_vertex(
                    Point3::new(x as f32, y as f32, 0.0),
                    Vector3::z(),
                    (x as f32 / 2.0, y as f32 / 2.0),
                );
            }
        }
        for y in 0..2u32 {
            for x in 0..2u32 {
                let i = y * 3 + x;
                g.indices.extend([i, i + 1, i + 4]);
                g.indices.extend([i, i + 4, i + 3]);
            }
        }
        g.rebuild();
        Mesh::new("grid", "Grid", g)
    }

    fn grab_brush(radius: f32) -> BrushSettings {
        BrushSettings::new(BrushType::Grab)
            .with_radius(radius)
            .with_strength(1.0)
            .with_falloff(FalloffType::Linear)
    }

    #[test]
    fn update_before_begin_is_noop() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        engine.update_stroke(Point3::new(1.0, 1.0, 0.0), Vector3::z());
        let mesh = engine.mesh().unwrap();
        assert_relative_eq!(mesh.geometry.position(4).z, 0.0);
    }

    #[test]
    fn grab_displaces_by_linear_falloff() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        engine.set_brush_settings(grab_brush(1.5));

        let hit = Point3::new(1.0, 1.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.0, 0.0, 0.1));

        let g = &engine.mesh().unwrap().geometry;
        // Center vertex (distance 0): full delta.
        assert_relative_eq!(g.position(4).z, 0.1, epsilon = 1e-6);
        // Axis neighbour (distance 1): (1 - 1/1.5) * 0.1.
        assert_relative_eq!(g.position(1).z, 0.1 / 3.0, epsilon = 1e-6);
        // Diagonal neighbour (distance sqrt(2)).
        let expected = (1.0 - 2.0_f32.sqrt() / 1.5) * 0.1;
        assert_relative_eq!(g.position(0).z, expected, epsilon = 1e-6);
    }

    #[test]
    fn vertices_outside_radius_stay_put() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        engine.set_brush_settings(grab_brush(0.5));

        let hit = Point3::new(1.0, 1.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.0, 0.0, 0.1));

        let g = &engine.mesh().unwrap().geometry;
        assert_relative_eq!(g.position(4).z, 0.1, epsilon = 1e-6);
        assert_relative_eq!(g.position(0).z, 0.0, epsilon = 1e-6);
        assert_relative_eq!(g.position(1).z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn undo_restores_byte_exact_positions() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        engine.set_brush_settings(grab_brush(2.0));
        let original = engine.mesh().unwrap().geometry.vertices.clone();

        let hit = Point3::new(1.0, 1.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.3, -0.2, 0.5));
        engine.update_stroke(hit, Vector3::new(0.1, 0.0, 0.1));
        engine.undo_stroke();

        assert_eq!(engine.mesh().unwrap().geometry.vertices, original);
    }

    #[test]
    fn symmetry_replays_the_mirrored_stroke() {
        let mut g = Geometry::new();
        for x in [-1.0f32, 0.0, 1.0] {
            g.push_vertex(Point3::new(x, 0.0, 0.0), Vector3::z(), (0.0, 0.0));
        }
        g.indices.extend([0, 1, 2]);
        g.rebuild();

        let mut engine = SculptEngine::new();
        engine.set_mesh(Mesh::new("strip", "Strip", g));
        engine.set_brush_settings(grab_brush(0.5));
        engine.set_symmetry(Axis::X, true);

        let hit = Point3::new(1.0, 0.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.0, 0.0, 0.1));

        let geometry = &engine.mesh().unwrap().geometry;
        assert_relative_eq!(geometry.position(2).z, 0.1, epsilon = 1e-6);
        // The mirrored hit at x = -1 moves the opposite vertex too.
        assert_relative_eq!(geometry.position(0).z, 0.1, epsilon = 1e-6);
        assert_relative_eq!(geometry.position(1).z, 0.0, epsilon = 1e-6);
    }

    #[test]
    fn smooth_brush_relaxes_toward_neighbours() {
        let mut engine = SculptEngine::new();
        let mut mesh = grid_mesh();
        mesh.geometry.set_position(4, Point3::new(1.0, 1.0, 1.0));
        engine.set_mesh(mesh);
        engine.set_brush_settings(
            BrushSettings::new(BrushType::Smooth)
                .with_radius(0.5)
                .with_strength(1.0)
                .with_falloff(FalloffType::Constant),
        );

        let hit = Point3::new(1.0, 1.0, 1.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::zeros());

        // The raised centre drops toward its flat one-ring.
        let z = engine.mesh().unwrap().geometry.position(4).z;
        assert!(z < 0.5);
    }

    #[test]
    fn end_stroke_renormalises_normals() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        engine.set_brush_settings(grab_brush(1.5));

        let hit = Point3::new(1.0, 1.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.0, 0.0, 0.5));
        engine.end_stroke();

        let g = &engine.mesh().unwrap().geometry;
        for v in 0..g.vertex_count() as u32 {
            assert_relative_eq!(g.normal(v).norm(), 1.0, epsilon = 1e-5);
        }
        // The raised bump tilts the rim normals away from +z.
        assert!(g.normal(1).z < 0.999);
    }

    #[test]
    fn auto_smooth_settles_the_stroke() {
        let hit = Point3::new(1.0, 1.0, 0.0);
        let delta = Vector3::new(0.0, 0.0, 0.5);

        let run = |auto_smooth: f32| {
            let mut engine = SculptEngine::new();
            engine.set_mesh(grid_mesh());
            engine.set_brush_settings(grab_brush(1.2).with_auto_smooth(auto_smooth));
            engine.begin_stroke(hit);
            engine.update_stroke(hit, delta);
            engine.end_stroke();
            engine.release_mesh().unwrap().geometry.position(4).z
        };

        let raw = run(0.0);
        let smoothed = run(0.5);
        assert!(smoothed < raw);
    }

    #[test]
    fn grab_respects_mesh_transform() {
        let mut engine = SculptEngine::new();
        let mut mesh = grid_mesh();
        mesh.transform.position = Vector3::new(10.0, 0.0, 0.0);
        engine.set_mesh(mesh);
        engine.set_brush_settings(grab_brush(0.5));

        // Hit in world space above the translated centre vertex.
        let hit = Point3::new(11.0, 1.0, 0.0);
        engine.begin_stroke(hit);
        engine.update_stroke(hit, Vector3::new(0.0, 0.0, 0.2));

        let g = &engine.mesh().unwrap().geometry;
        // Local position moves by the world delta mapped back.
        assert_relative_eq!(g.position(4).z, 0.2, epsilon = 1e-5);
        assert_relative_eq!(g.position(4).x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn release_returns_the_mesh() {
        let mut engine = SculptEngine::new();
        engine.set_mesh(grid_mesh());
        let mesh = engine.release_mesh();
        assert!(mesh.is_some());
        assert!(engine.mesh().is_none());
    }

    #[test]
    fn random_falloff_strokes_replay_identically() {
        let hit = Point3::new(1.0, 1.0, 0.0);
        let delta = Vector3::new(0.0, 0.0, 0.1);

        let run = || {
            let mut engine = SculptEngine::new();
            engine.set_mesh(grid_mesh());
            engine.set_brush_settings(
                grab_brush(1.5).with_falloff(FalloffType::Random),
            );
            engine.begin_stroke(hit);
            engine.update_stroke(hit, delta);
            engine.release_mesh().unwrap().geometry.vertices
        };

        assert_eq!(run(), run());
    }
}
