//! Capture data model
//!
//! The finalized output of a spatial scan: planar surfaces (walls, doors,
//! windows, openings) and furniture-like objects, each with physical
//! dimensions and a placement transform. A [`CapturedRoom`] is produced once
//! per completed scan by the capture service and is read-only from this
//! crate's point of view; scene assembly never mutates it.
//!
//! Capture files are plain JSON documents; the same serde derives double as
//! the raw record set written next to the 3D asset at export time.

use crate::{Error, Result};
use glam::{Mat4, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// A rigid transform (rotation + translation, optionally non-uniform scale)
/// mapping an entity's local frame into the scene's world frame.
///
/// Owned by the entity it places and immutable once read from the capture.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Placement {
    #[serde(default = "default_rotation")]
    pub rotation: Quat,
    #[serde(default)]
    pub translation: Vec3,
    #[serde(default = "default_scale")]
    pub scale: Vec3,
}

fn default_rotation() -> Quat {
    Quat::IDENTITY
}

fn default_scale() -> Vec3 {
    Vec3::ONE
}

impl Placement {
    pub const IDENTITY: Self = Self {
        rotation: Quat::IDENTITY,
        translation: Vec3::ZERO,
        scale: Vec3::ONE,
    };

    pub fn from_rotation_translation(rotation: Quat, translation: Vec3) -> Self {
        Self {
            rotation,
            translation,
            scale: Vec3::ONE,
        }
    }

    pub fn from_translation(translation: Vec3) -> Self {
        Self::from_rotation_translation(Quat::IDENTITY, translation)
    }

    /// Column-major world matrix (scale, then rotation, then translation)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }

    /// True when every component is a finite number
    pub fn is_finite(&self) -> bool {
        self.rotation.is_finite() && self.translation.is_finite() && self.scale.is_finite()
    }
}

impl Default for Placement {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// The kind of a planar surface in a capture
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SurfaceKind {
    Wall,
    Door,
    Window,
    Opening,
}

impl SurfaceKind {
    /// All kinds in assembly traversal order
    pub const ALL: [Self; 4] = [Self::Wall, Self::Door, Self::Window, Self::Opening];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Wall => "wall",
            Self::Door => "door",
            Self::Window => "window",
            Self::Opening => "opening",
        }
    }
}

/// Semantic category of a scanned object
///
/// Closed enumeration; any category string this crate does not know
/// deserializes to [`ObjectCategory::Other`], which the shape registry
/// absorbs with its default builder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectCategory {
    Chair,
    Table,
    Bed,
    Sofa,
    Toilet,
    Bathtub,
    Oven,
    Dishwasher,
    Refrigerator,
    Stove,
    Television,
    Fireplace,
    WasherDryer,
    #[serde(other)]
    Other,
}

impl ObjectCategory {
    /// Every category with a dedicated shape builder
    pub const DEDICATED: [Self; 13] = [
        Self::Chair,
        Self::Table,
        Self::Bed,
        Self::Sofa,
        Self::Toilet,
        Self::Bathtub,
        Self::Oven,
        Self::Dishwasher,
        Self::Refrigerator,
        Self::Stove,
        Self::Television,
        Self::Fireplace,
        Self::WasherDryer,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Chair => "chair",
            Self::Table => "table",
            Self::Bed => "bed",
            Self::Sofa => "sofa",
            Self::Toilet => "toilet",
            Self::Bathtub => "bathtub",
            Self::Oven => "oven",
            Self::Dishwasher => "dishwasher",
            Self::Refrigerator => "refrigerator",
            Self::Stove => "stove",
            Self::Television => "television",
            Self::Fireplace => "fireplace",
            Self::WasherDryer => "washerDryer",
            Self::Other => "other",
        }
    }
}

/// A planar surface from the capture
///
/// Dimensions carry (width, height, _) in meters; surface thickness is a
/// policy constant, never part of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Surface {
    pub kind: SurfaceKind,
    pub dimensions: Vec3,
    pub placement: Placement,
}

impl Surface {
    pub fn new(kind: SurfaceKind, dimensions: Vec3, placement: Placement) -> Self {
        Self {
            kind,
            dimensions,
            placement,
        }
    }

    pub fn width(&self) -> f32 {
        self.dimensions.x
    }

    pub fn height(&self) -> f32 {
        self.dimensions.y
    }
}

/// A furniture-like object from the capture
///
/// Dimensions are the full (width, height, depth) bounding extents in
/// meters. Objects are leaf scan entities; any decomposition into sub-parts
/// happens in the shape catalog, not here.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScannedObject {
    pub category: ObjectCategory,
    pub dimensions: Vec3,
    pub placement: Placement,
}

impl ScannedObject {
    pub fn new(category: ObjectCategory, dimensions: Vec3, placement: Placement) -> Self {
        Self {
            category,
            dimensions,
            placement,
        }
    }
}

/// The full output of a completed scan
///
/// Surfaces are partitioned by kind and kept in scan order; scene assembly
/// preserves that order. The struct is a value: derived scene graphs are
/// rebuilt from it on every assembly request, never cached inside it.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct CapturedRoom {
    #[serde(default)]
    pub walls: Vec<Surface>,
    #[serde(default)]
    pub doors: Vec<Surface>,
    #[serde(default)]
    pub windows: Vec<Surface>,
    #[serde(default)]
    pub openings: Vec<Surface>,
    #[serde(default)]
    pub objects: Vec<ScannedObject>,
}

impl CapturedRoom {
    /// Surfaces of one kind, in scan order
    pub fn surfaces(&self, kind: SurfaceKind) -> &[Surface] {
        match kind {
            SurfaceKind::Wall => &self.walls,
            SurfaceKind::Door => &self.doors,
            SurfaceKind::Window => &self.windows,
            SurfaceKind::Opening => &self.openings,
        }
    }

    pub fn surface_count(&self) -> usize {
        self.walls.len() + self.doors.len() + self.windows.len() + self.openings.len()
    }

    /// Total surfaces plus objects
    pub fn entity_count(&self) -> usize {
        self.surface_count() + self.objects.len()
    }

    /// Decode a capture from a JSON document
    pub fn from_json_slice(bytes: &[u8]) -> Result<Self> {
        serde_json::from_slice(bytes).map_err(|e| Error::MalformedCapture(e.to_string()))
    }

    /// Encode the capture as a pretty-printed JSON record set
    pub fn to_json_vec(&self) -> Result<Vec<u8>> {
        Ok(serde_json::to_vec_pretty(self)?)
    }
}
