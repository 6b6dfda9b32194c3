//! Arena-backed BSP tree over CSG polygons.

use crate::polygon::{Plane, Polygon, PLANE_EPSILON};

const COPLANAR: u8 = 0;
const FRONT: u8 = 1;
const BACK: u8 = 2;
const SPANNING: u8 = 3;

type NodeId = usize;

#[derive(Debug, Default)]
struct Node {
    plane: Option<Plane>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    polygons: Vec<Polygon>,
}

/// A BSP tree stored as a node arena.
///
/// Children are arena indices, so inversion, clipping, and polygon
/// collection run over flat storage; no operation recurses on the
/// native stack regardless of tree depth.
#[derive(Debug)]
pub struct Bsp {
    nodes: Vec<Node>,
}

impl Bsp {
    /// Build a tree from a polygon list.
    #[must_use]
    pub fn new(polygons: Vec<Polygon>) -> Self {
        let mut bsp = Self {
            nodes: vec![Node::default()],
        };
        bsp.build(polygons);
        bsp
    }

    fn alloc(&mut self) -> NodeId {
        self.nodes.push(Node::default());
        self.nodes.len() - 1
    }

    /// Insert polygons into the tree, splitting as needed. The first
    /// polygon reaching a fresh node donates its plane.
    pub fn build(&mut self, polygons: Vec<Polygon>) {
        let mut stack: Vec<(NodeId, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((id, polygons)) = stack.pop() {
            if polygons.is_empty() {
                continue;
            }

            if self.nodes[id].plane.is_none() {
                self.nodes[id].plane = Some(polygons[0].plane);
            }
            let Some(plane) = self.nodes[id].plane else {
                continue;
            };

            let mut coplanar_front = Vec::new();
            let mut coplanar_back = Vec::new();
            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in &polygons {
                split_polygon(
                    &plane,
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
            }

            self.nodes[id].polygons.extend(coplanar_front);
            self.nodes[id].polygons.extend(coplanar_back);

            if !front.is_empty() {
                let child = match self.nodes[id].front {
                    Some(child) => child,
                    None => {
                        let child = self.alloc();
                        self.nodes[id].front = Some(child);
                        child
                    }
                };
                stack.push((child, front));
            }
            if !back.is_empty() {
                let child = match self.nodes[id].back {
                    Some(child) => child,
                    None => {
                        let child = self.alloc();
                        self.nodes[id].back = Some(child);
                        child
                    }
                };
                stack.push((child, back));
            }
        }
    }

    /// Convert the tree to the complement of the solid it describes.
    pub fn invert(&mut self) {
        for node in &mut self.nodes {
            for polygon in &mut node.polygons {
                polygon.flip();
            }
            if let Some(plane) = &mut node.plane {
                plane.flip();
            }
            std::mem::swap(&mut node.front, &mut node.back);
        }
    }

    /// Remove the parts of `polygons` inside this tree's solid.
    ///
    /// Fragments falling behind a node without a back child are inside
    /// the solid and are discarded.
    #[must_use]
    pub fn clip_polygons(&self, polygons: Vec<Polygon>) -> Vec<Polygon> {
        let mut out = Vec::new();
        let mut stack: Vec<(NodeId, Vec<Polygon>)> = vec![(0, polygons)];

        while let Some((id, polygons)) = stack.pop() {
            let node = &self.nodes[id];
            let Some(plane) = node.plane else {
                out.extend(polygons);
                continue;
            };

            let mut front = Vec::new();
            let mut back = Vec::new();
            for polygon in &polygons {
                // Coplanar fragments ride with the side their facing
                // puts them on.
                let mut coplanar_front = Vec::new();
                let mut coplanar_back = Vec::new();
                split_polygon(
                    &plane,
                    polygon,
                    &mut coplanar_front,
                    &mut coplanar_back,
                    &mut front,
                    &mut back,
                );
                front.extend(coplanar_front);
                back.extend(coplanar_back);
            }

            match node.front {
                Some(child) => stack.push((child, front)),
                None => out.extend(front),
            }
            if let Some(child) = node.back {
                stack.push((child, back));
            }
        }

        out
    }

    /// Clip every polygon stored in this tree against another tree.
    pub fn clip_to(&mut self, other: &Self) {
        for node in &mut self.nodes {
            let polygons = std::mem::take(&mut node.polygons);
            node.polygons = other.clip_polygons(polygons);
        }
    }

    /// Collect every polygon stored anywhere in the tree.
    #[must_use]
    pub fn all_polygons(&self) -> Vec<Polygon> {
        self.nodes
            .iter()
            .flat_map(|node| node.polygons.iter().cloned())
            .collect()
    }
}

/// Classify a polygon against a plane and route it into the coplanar,
/// front, or back lists, splitting spanning polygons at the plane
/// crossings.
fn split_polygon(
    plane: &Plane,
    polygon: &Polygon,
    coplanar_front: &mut Vec<Polygon>,
    coplanar_back: &mut Vec<Polygon>,
    front: &mut Vec<Polygon>,
    back: &mut Vec<Polygon>,
) {
    let mut polygon_type = COPLANAR;
    let mut types = Vec::with_capacity(polygon.vertices.len());

    for vertex in &polygon.vertices {
        let distance = plane.distance(vertex.position);
        let vertex_type = if distance < -PLANE_EPSILON {
            BACK
        } else if distance > PLANE_EPSILON {
            FRONT
        } else {
            COPLANAR
        };
        polygon_type |= vertex_type;
        types.push(vertex_type);
    }

    match polygon_type {
        COPLANAR => {
            if plane.normal.dot(&polygon.plane.normal) > 0.0 {
                coplanar_front.push(polygon.clone());
            } else {
                coplanar_back.push(polygon.clone());
            }
        }
        FRONT => front.push(polygon.clone()),
        BACK => back.push(polygon.clone()),
        _ => {
            let mut front_ring = Vec::new();
            let mut back_ring = Vec::new();

            for i in 0..polygon.vertices.len() {
                let j = (i + 1) % polygon.vertices.len();
                let ti = types[i];
                let tj = types[j];
                let vi = &polygon.vertices[i];
                let vj = &polygon.vertices[j];

                if ti != BACK {
                    front_ring.push(*vi);
                }
                if ti != FRONT {
                    back_ring.push(*vi);
                }
                if (ti | tj) == SPANNING {
                    let denominator = plane.normal.dot(&(vj.position - vi.position));
                    let t = (plane.w - plane.normal.dot(&vi.position.coords)) / denominator;
                    let crossing = vi.interpolate(vj, t);
                    front_ring.push(crossing);
                    back_ring.push(crossing);
                }
            }

            if front_ring.len() >= 3 {
                front.push(Polygon::on_plane(front_ring, polygon.plane));
            }
            if back_ring.len() >= 3 {
                back.push(Polygon::on_plane(back_ring, polygon.plane));
            }
        }
    }
}
