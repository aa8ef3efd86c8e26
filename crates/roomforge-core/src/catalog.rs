//! Category shape catalog
//!
//! One parametric multi-part builder per object category. Every builder
//! takes the object's full bounding extents and composes primitives at
//! offsets expressed as fractions of those extents, so a shape scales
//! proportionally with the scanned size. Offsets are in the object's local
//! frame; the assembler applies the scan placement to the whole composite.
//!
//! Dispatch is a lookup table ([`ShapeRegistry`]) rather than a match in the
//! assembler: a new category is one new builder and one new registration.

use crate::capture::ObjectCategory;
use crate::primitive::{Primitive, cylinder, rounded_box};
use glam::{Quat, Vec3};
use std::collections::HashMap;
use std::f32::consts::FRAC_PI_2;

/// Corner radius of the fallback shape for unrecognized categories
pub const DEFAULT_CORNER_RADIUS: f32 = 0.02;

/// One primitive of a composite shape, placed in the object's local frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShapePart {
    pub primitive: Primitive,
    pub offset: Vec3,
    pub rotation: Quat,
}

impl ShapePart {
    pub fn at(primitive: Primitive, offset: Vec3) -> Self {
        Self {
            primitive,
            offset,
            rotation: Quat::IDENTITY,
        }
    }

    pub fn rotated(primitive: Primitive, offset: Vec3, rotation: Quat) -> Self {
        Self {
            primitive,
            offset,
            rotation,
        }
    }

    /// True when the part sits at the local origin with no rotation
    pub fn is_centered(&self) -> bool {
        self.offset == Vec3::ZERO && self.rotation == Quat::IDENTITY
    }
}

/// A builder result: an ordered list of parts plus a designated primary
///
/// The primary part carries the representative geometry for external
/// queries; all parts share the category material.
#[derive(Debug, Clone, PartialEq)]
pub struct CompositeShape {
    pub parts: Vec<ShapePart>,
    pub primary: usize,
}

impl CompositeShape {
    pub fn new(parts: Vec<ShapePart>, primary: usize) -> Self {
        debug_assert!(primary < parts.len());
        Self { parts, primary }
    }

    pub fn single(primitive: Primitive) -> Self {
        Self::new(vec![ShapePart::at(primitive, Vec3::ZERO)], 0)
    }

    pub fn primary_part(&self) -> &ShapePart {
        &self.parts[self.primary]
    }

    pub fn is_single_part(&self) -> bool {
        self.parts.len() == 1
    }
}

/// A shape builder: full bounding extents in, composite shape out
pub type ShapeBuilder = fn(Vec3) -> CompositeShape;

/// Fallback for `Other` and any unregistered category: one rounded prism
/// spanning the full extents
pub fn default_shape(size: Vec3) -> CompositeShape {
    CompositeShape::single(rounded_box(size.x, size.y, size.z, DEFAULT_CORNER_RADIUS))
}

/// Positions of four legs/burners at (±xf·w, ±zf·d)
fn four_corners(size: Vec3, xf: f32, zf: f32) -> [(f32, f32); 4] {
    let (w, d) = (size.x, size.z);
    [
        (-w * xf, -d * zf),
        (w * xf, -d * zf),
        (-w * xf, d * zf),
        (w * xf, d * zf),
    ]
}

/// Seat, backrest, four cylindrical legs
pub fn chair_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    let mut parts = vec![
        ShapePart::at(
            rounded_box(w * 0.9, h * 0.05, d * 0.9, 0.01),
            Vec3::new(0.0, h * 0.4, 0.0),
        ),
        ShapePart::at(
            rounded_box(w * 0.9, h * 0.5, d * 0.1, 0.01),
            Vec3::new(0.0, h * 0.65, -d * 0.4),
        ),
    ];
    let leg_height = h * 0.4;
    for (x, z) in four_corners(size, 0.4, 0.4) {
        parts.push(ShapePart::at(
            cylinder(0.02, leg_height),
            Vec3::new(x, leg_height * 0.5, z),
        ));
    }
    CompositeShape::new(parts, 0)
}

/// Top slab over four cylindrical legs
pub fn table_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    let mut parts = vec![ShapePart::at(
        rounded_box(w, h * 0.1, d, 0.02),
        Vec3::new(0.0, h * 0.9, 0.0),
    )];
    let leg_height = h * 0.85;
    for (x, z) in four_corners(size, 0.45, 0.45) {
        parts.push(ShapePart::at(
            cylinder(0.03, leg_height),
            Vec3::new(x, leg_height * 0.5, z),
        ));
    }
    CompositeShape::new(parts, 0)
}

/// Mattress over frame, headboard at the back
pub fn bed_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    CompositeShape::new(
        vec![
            ShapePart::at(
                rounded_box(w * 0.95, h * 0.3, d * 0.95, 0.05),
                Vec3::new(0.0, h * 0.6, 0.0),
            ),
            ShapePart::at(rounded_box(w, h * 0.4, d, 0.02), Vec3::new(0.0, h * 0.3, 0.0)),
            ShapePart::at(
                rounded_box(w, h * 0.6, d * 0.1, 0.02),
                Vec3::new(0.0, h * 0.7, -d * 0.45),
            ),
        ],
        0,
    )
}

/// Seat, backrest, two armrests
pub fn sofa_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    let armrest = rounded_box(w * 0.15, h * 0.4, d * 0.8, 0.03);
    CompositeShape::new(
        vec![
            ShapePart::at(
                rounded_box(w, h * 0.3, d * 0.8, 0.05),
                Vec3::new(0.0, h * 0.4, 0.0),
            ),
            ShapePart::at(
                rounded_box(w, h * 0.6, d * 0.2, 0.05),
                Vec3::new(0.0, h * 0.65, -d * 0.3),
            ),
            ShapePart::at(armrest, Vec3::new(-w * 0.425, h * 0.55, 0.0)),
            ShapePart::at(armrest, Vec3::new(w * 0.425, h * 0.55, 0.0)),
        ],
        0,
    )
}

/// Cylindrical bowl and seat, tank box at the back
pub fn toilet_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    let footprint = w.min(d);
    CompositeShape::new(
        vec![
            ShapePart::at(
                cylinder(footprint * 0.4, h * 0.6),
                Vec3::new(0.0, h * 0.3, 0.0),
            ),
            ShapePart::at(
                rounded_box(w * 0.6, h * 0.4, d * 0.3, 0.02),
                Vec3::new(0.0, h * 0.7, -d * 0.25),
            ),
            ShapePart::at(
                cylinder(footprint * 0.45, h * 0.05),
                Vec3::new(0.0, h * 0.65, 0.0),
            ),
        ],
        0,
    )
}

/// Low open prism with heavily rounded edges
pub fn bathtub_shape(size: Vec3) -> CompositeShape {
    CompositeShape::single(rounded_box(size.x, size.y * 0.4, size.z, 0.1))
}

/// Full-size appliance box
pub fn oven_shape(size: Vec3) -> CompositeShape {
    CompositeShape::single(rounded_box(size.x, size.y, size.z, 0.02))
}

/// Full-size appliance box
pub fn dishwasher_shape(size: Vec3) -> CompositeShape {
    CompositeShape::single(rounded_box(size.x, size.y, size.z, 0.02))
}

/// Tall body with a thin vertical handle on the front face
pub fn refrigerator_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    CompositeShape::new(
        vec![
            ShapePart::at(
                rounded_box(w, h * 0.9, d, 0.02),
                Vec3::new(0.0, h * 0.45, 0.0),
            ),
            ShapePart::rotated(
                cylinder(0.01, h * 0.2),
                Vec3::new(w * 0.4, h * 0.5, d * 0.51),
                Quat::from_rotation_x(FRAC_PI_2),
            ),
        ],
        0,
    )
}

/// Base cabinet, cooktop slab, four burner pucks
pub fn stove_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    let mut parts = vec![
        ShapePart::at(rounded_box(w, h * 0.8, d, 0.02), Vec3::new(0.0, h * 0.4, 0.0)),
        ShapePart::at(
            rounded_box(w * 0.95, h * 0.05, d * 0.95, 0.01),
            Vec3::new(0.0, h * 0.825, 0.0),
        ),
    ];
    for (x, z) in four_corners(size, 0.25, 0.25) {
        parts.push(ShapePart::at(
            cylinder(0.08, 0.02),
            Vec3::new(x, h * 0.85, z),
        ));
    }
    // Cooktop is the representative part
    CompositeShape::new(parts, 1)
}

/// Thin screen over a small stand
pub fn television_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    CompositeShape::new(
        vec![
            ShapePart::at(rounded_box(w, h * 0.9, d * 0.1, 0.01), Vec3::ZERO),
            ShapePart::at(
                rounded_box(w * 0.3, h * 0.2, d * 0.8, 0.02),
                Vec3::new(0.0, -h * 0.35, 0.0),
            ),
        ],
        0,
    )
}

/// Shallow full-height prism
pub fn fireplace_shape(size: Vec3) -> CompositeShape {
    CompositeShape::single(rounded_box(size.x, size.y, size.z * 0.3, 0.02))
}

/// Body with a round door disc on the front face
pub fn washer_dryer_shape(size: Vec3) -> CompositeShape {
    let (w, h, d) = (size.x, size.y, size.z);
    CompositeShape::new(
        vec![
            ShapePart::at(
                rounded_box(w, h * 0.9, d, 0.02),
                Vec3::new(0.0, h * 0.45, 0.0),
            ),
            ShapePart::rotated(
                cylinder(w.min(h) * 0.3, 0.05),
                Vec3::new(0.0, h * 0.5, d * 0.51),
                Quat::from_rotation_x(FRAC_PI_2),
            ),
        ],
        0,
    )
}

/// Category to builder lookup, with a default for anything unregistered
///
/// Read-only after construction; any number of assemblies can share one
/// registry without coordination.
pub struct ShapeRegistry {
    builders: HashMap<ObjectCategory, ShapeBuilder>,
}

impl ShapeRegistry {
    /// The full built-in catalog
    pub fn standard() -> Self {
        let mut builders: HashMap<ObjectCategory, ShapeBuilder> = HashMap::new();
        builders.insert(ObjectCategory::Chair, chair_shape);
        builders.insert(ObjectCategory::Table, table_shape);
        builders.insert(ObjectCategory::Bed, bed_shape);
        builders.insert(ObjectCategory::Sofa, sofa_shape);
        builders.insert(ObjectCategory::Toilet, toilet_shape);
        builders.insert(ObjectCategory::Bathtub, bathtub_shape);
        builders.insert(ObjectCategory::Oven, oven_shape);
        builders.insert(ObjectCategory::Dishwasher, dishwasher_shape);
        builders.insert(ObjectCategory::Refrigerator, refrigerator_shape);
        builders.insert(ObjectCategory::Stove, stove_shape);
        builders.insert(ObjectCategory::Television, television_shape);
        builders.insert(ObjectCategory::Fireplace, fireplace_shape);
        builders.insert(ObjectCategory::WasherDryer, washer_dryer_shape);
        Self { builders }
    }

    /// An empty registry: everything falls back to the default shape
    pub fn empty() -> Self {
        Self {
            builders: HashMap::new(),
        }
    }

    /// Build the composite shape for a category at the given extents
    pub fn build(&self, category: ObjectCategory, dimensions: Vec3) -> CompositeShape {
        match self.builders.get(&category) {
            Some(builder) => builder(dimensions),
            None => default_shape(dimensions),
        }
    }

    pub fn len(&self) -> usize {
        self.builders.len()
    }

    pub fn is_empty(&self) -> bool {
        self.builders.is_empty()
    }
}

impl Default for ShapeRegistry {
    fn default() -> Self {
        Self::standard()
    }
}
