//! Scene assembly
//!
//! Turns a [`CapturedRoom`] into a scene graph: one node per surface and one
//! (possibly composite) node per object, each placed by its scan transform
//! and materialized by the material policy. Assembly is a pure function of
//! its inputs; repeated calls on the same capture yield equal graphs.
//!
//! Malformed entities (non-finite or negative dimensions, non-finite
//! placement) are skipped and reported as [`AssemblyIssue`] values next to
//! the partial graph. They never abort the rest of the assembly.

use crate::capture::{CapturedRoom, Placement, ScannedObject, Surface, SurfaceKind};
use crate::catalog::ShapeRegistry;
use crate::material::{self, Appearance};
use crate::primitive::{Primitive, rounded_box};
use glam::Vec3;
use tracing::{debug, warn};

/// Why an entity was excluded from the scene graph
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum MalformedReason {
    #[error("dimensions contain a negative component")]
    NegativeDimensions,
    #[error("dimensions are not finite")]
    NonFiniteDimensions,
    #[error("placement is not finite")]
    NonFinitePlacement,
}

/// A per-entity, non-fatal assembly error
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssemblyIssue {
    /// Which entity was skipped, e.g. `wall[2]` or `object[0] (chair)`
    pub entity: String,
    pub reason: MalformedReason,
}

impl std::fmt::Display for AssemblyIssue {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.entity, self.reason)
    }
}

/// One placed, materialized node of the output scene
///
/// Either a primitive leaf or a composite whose children carry their own
/// local placements relative to this node's frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneNode {
    pub name: String,
    pub primitive: Option<Primitive>,
    pub children: Vec<SceneNode>,
    pub placement: Placement,
    pub appearance: Appearance,
    /// Index of the representative child for composite nodes
    pub primary: Option<usize>,
}

impl SceneNode {
    /// The representative geometry: own primitive, or the primary child's
    pub fn representative_primitive(&self) -> Option<&Primitive> {
        match (&self.primitive, self.primary) {
            (Some(p), _) => Some(p),
            (None, Some(i)) => self.children.get(i).and_then(|c| c.primitive.as_ref()),
            (None, None) => None,
        }
    }

    pub fn is_composite(&self) -> bool {
        !self.children.is_empty()
    }
}

/// The assembled output: an ordered collection of top-level nodes rooted at
/// a common origin
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SceneGraph {
    pub nodes: Vec<SceneNode>,
}

impl SceneGraph {
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }
}

/// A scene graph plus the per-entity errors collected while building it
#[derive(Debug, Clone, Default)]
pub struct Assembly {
    pub graph: SceneGraph,
    pub issues: Vec<AssemblyIssue>,
}

/// Assemble a scene graph from a completed capture
///
/// Surfaces come first in kind order (wall, door, window, opening), then
/// objects in scan order. Every well-formed entity yields exactly one
/// top-level node; order only affects traversal, not correctness.
pub fn assemble(room: &CapturedRoom, registry: &ShapeRegistry) -> Assembly {
    let mut nodes = Vec::with_capacity(room.entity_count());
    let mut issues = Vec::new();

    for kind in SurfaceKind::ALL {
        for (index, surface) in room.surfaces(kind).iter().enumerate() {
            match surface_node(surface, index) {
                Ok(node) => nodes.push(node),
                Err(reason) => {
                    let issue = AssemblyIssue {
                        entity: format!("{}[{index}]", kind.as_str()),
                        reason,
                    };
                    warn!(%issue, "skipping malformed surface");
                    issues.push(issue);
                }
            }
        }
    }

    for (index, object) in room.objects.iter().enumerate() {
        match object_node(object, index, registry) {
            Ok(node) => nodes.push(node),
            Err(reason) => {
                let issue = AssemblyIssue {
                    entity: format!("object[{index}] ({})", object.category.as_str()),
                    reason,
                };
                warn!(%issue, "skipping malformed object");
                issues.push(issue);
            }
        }
    }

    debug!(
        nodes = nodes.len(),
        skipped = issues.len(),
        "assembled scene graph"
    );
    Assembly {
        graph: SceneGraph { nodes },
        issues,
    }
}

fn validate(dimensions: Vec3, placement: &Placement) -> Result<(), MalformedReason> {
    if !dimensions.is_finite() {
        return Err(MalformedReason::NonFiniteDimensions);
    }
    if dimensions.min_element() < 0.0 {
        return Err(MalformedReason::NegativeDimensions);
    }
    if !placement.is_finite() {
        return Err(MalformedReason::NonFinitePlacement);
    }
    Ok(())
}

fn surface_node(surface: &Surface, index: usize) -> Result<SceneNode, MalformedReason> {
    validate(surface.dimensions, &surface.placement)?;

    let kind = surface.kind;
    let thickness = material::surface_thickness(kind);
    Ok(SceneNode {
        name: format!("{}-{index}", kind.as_str()),
        primitive: Some(rounded_box(surface.width(), surface.height(), thickness, 0.0)),
        children: Vec::new(),
        placement: surface.placement,
        appearance: material::surface_appearance(kind),
        primary: None,
    })
}

fn object_node(
    object: &ScannedObject,
    index: usize,
    registry: &ShapeRegistry,
) -> Result<SceneNode, MalformedReason> {
    validate(object.dimensions, &object.placement)?;

    let shape = registry.build(object.category, object.dimensions);
    let appearance = material::object_appearance(object.category);
    let name = format!("{}-{index}", object.category.as_str());

    // A lone origin-centered part needs no composite wrapper
    if shape.is_single_part() && shape.primary_part().is_centered() {
        return Ok(SceneNode {
            name,
            primitive: Some(shape.primary_part().primitive),
            children: Vec::new(),
            placement: object.placement,
            appearance,
            primary: None,
        });
    }

    let children = shape
        .parts
        .iter()
        .enumerate()
        .map(|(i, part)| SceneNode {
            name: format!("{name}-part{i}"),
            primitive: Some(part.primitive),
            children: Vec::new(),
            placement: Placement::from_rotation_translation(part.rotation, part.offset),
            appearance,
            primary: None,
        })
        .collect();

    Ok(SceneNode {
        name,
        primitive: None,
        children,
        placement: object.placement,
        appearance,
        primary: Some(shape.primary),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{ObjectCategory, ScannedObject, Surface};
    use approx::assert_relative_eq;

    fn wall(width: f32, height: f32) -> Surface {
        Surface::new(
            SurfaceKind::Wall,
            Vec3::new(width, height, 0.0),
            Placement::IDENTITY,
        )
    }

    #[test]
    fn single_wall_scenario() {
        let room = CapturedRoom {
            walls: vec![wall(3.0, 2.4)],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());

        assert!(assembly.issues.is_empty());
        assert_eq!(assembly.graph.node_count(), 1);

        let node = &assembly.graph.nodes[0];
        assert_eq!(node.placement, Placement::IDENTITY);
        assert_eq!(node.appearance, material::surface_appearance(SurfaceKind::Wall));
        match node.primitive {
            Some(Primitive::RoundedBox { width, height, depth, corner_radius }) => {
                assert_relative_eq!(width, 3.0);
                assert_relative_eq!(height, 2.4);
                assert_relative_eq!(depth, material::WALL_THICKNESS);
                assert_relative_eq!(corner_radius, 0.0);
            }
            _ => panic!("wall must be a box"),
        }
    }

    #[test]
    fn chair_scenario_builds_composite_with_shared_material() {
        let room = CapturedRoom {
            objects: vec![ScannedObject::new(
                ObjectCategory::Chair,
                Vec3::ONE,
                Placement::IDENTITY,
            )],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());
        assert_eq!(assembly.graph.node_count(), 1);

        let node = &assembly.graph.nodes[0];
        assert!(node.is_composite());
        assert_eq!(node.children.len(), 6);
        assert_eq!(node.primary, Some(0));

        let seat = node.representative_primitive().unwrap();
        assert_eq!(seat.bounding_size(), Vec3::new(0.9, 0.05, 0.9));

        let expected = material::object_appearance(ObjectCategory::Chair);
        assert_eq!(node.appearance, expected);
        for child in &node.children {
            assert_eq!(child.appearance, expected);
        }

        let backrest = &node.children[1];
        assert_relative_eq!(backrest.placement.translation.y, 0.65);
        assert_relative_eq!(backrest.placement.translation.z, -0.4);
    }

    #[test]
    fn node_order_is_surface_kinds_then_objects() {
        let room = CapturedRoom {
            walls: vec![wall(3.0, 2.4), wall(4.0, 2.4)],
            doors: vec![Surface::new(
                SurfaceKind::Door,
                Vec3::new(0.9, 2.0, 0.0),
                Placement::IDENTITY,
            )],
            objects: vec![
                ScannedObject::new(ObjectCategory::Table, Vec3::ONE, Placement::IDENTITY),
                ScannedObject::new(ObjectCategory::Toilet, Vec3::ONE, Placement::IDENTITY),
            ],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());

        assert!(assembly.issues.is_empty());
        assert_eq!(assembly.graph.node_count(), 5);
        let names: Vec<&str> = assembly.graph.nodes.iter().map(|n| n.name.as_str()).collect();
        assert_eq!(
            names,
            ["wall-0", "wall-1", "door-0", "table-0", "toilet-1"]
        );
    }

    #[test]
    fn unrecognized_category_falls_back_to_single_prism() {
        let room = CapturedRoom {
            objects: vec![ScannedObject::new(
                ObjectCategory::Other,
                Vec3::new(0.5, 2.0, 0.3),
                Placement::IDENTITY,
            )],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());
        let node = &assembly.graph.nodes[0];

        assert!(!node.is_composite());
        match node.primitive {
            Some(Primitive::RoundedBox { width, height, depth, corner_radius }) => {
                assert_relative_eq!(width, 0.5);
                assert_relative_eq!(height, 2.0);
                assert_relative_eq!(depth, 0.3);
                assert_relative_eq!(corner_radius, 0.02);
            }
            _ => panic!("fallback must be a rounded box"),
        }
        assert_eq!(
            node.appearance,
            material::object_appearance(ObjectCategory::Other)
        );
    }

    #[test]
    fn negative_dimensions_are_reported_not_fatal() {
        let room = CapturedRoom {
            walls: vec![wall(3.0, 2.4)],
            objects: vec![
                ScannedObject::new(
                    ObjectCategory::Chair,
                    Vec3::new(1.0, -1.0, 1.0),
                    Placement::IDENTITY,
                ),
                ScannedObject::new(ObjectCategory::Table, Vec3::ONE, Placement::IDENTITY),
            ],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());

        assert_eq!(assembly.graph.node_count(), 2);
        assert_eq!(assembly.issues.len(), 1);
        assert_eq!(assembly.issues[0].reason, MalformedReason::NegativeDimensions);
        assert!(assembly.issues[0].entity.contains("object[0]"));
        // The remaining entities still assembled, in order
        assert_eq!(assembly.graph.nodes[1].name, "table-1");
    }

    #[test]
    fn non_finite_placement_is_reported() {
        let mut placement = Placement::IDENTITY;
        placement.translation = Vec3::new(f32::NAN, 0.0, 0.0);
        let room = CapturedRoom {
            walls: vec![Surface::new(
                SurfaceKind::Wall,
                Vec3::new(1.0, 1.0, 0.0),
                placement,
            )],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());
        assert!(assembly.graph.is_empty());
        assert_eq!(assembly.issues[0].reason, MalformedReason::NonFinitePlacement);
    }

    #[test]
    fn zero_dimensions_are_degenerate_but_valid() {
        let room = CapturedRoom {
            objects: vec![ScannedObject::new(
                ObjectCategory::Other,
                Vec3::ZERO,
                Placement::IDENTITY,
            )],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());
        assert_eq!(assembly.graph.node_count(), 1);
        assert!(assembly.issues.is_empty());
    }

    #[test]
    fn assembly_is_deterministic() {
        let room = CapturedRoom {
            walls: vec![wall(3.0, 2.4)],
            objects: vec![ScannedObject::new(
                ObjectCategory::Sofa,
                Vec3::new(2.0, 0.8, 0.9),
                Placement::from_translation(Vec3::new(1.0, 0.0, -2.0)),
            )],
            ..Default::default()
        };
        let registry = ShapeRegistry::standard();
        let a = assemble(&room, &registry);
        let b = assemble(&room, &registry);
        assert_eq!(a.graph, b.graph);
    }
}
