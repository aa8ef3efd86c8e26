//! Material policy
//!
//! The sole place visual appearance decisions live. Shape builders never
//! pick colors; the assembler asks this module for the appearance of a
//! surface kind or object category and applies it to every part of the
//! resulting node.

use crate::capture::{ObjectCategory, SurfaceKind};

/// Box thickness used for walls, in meters
pub const WALL_THICKNESS: f32 = 0.1;

/// Box thickness used for doors, windows and openings, in meters
pub const OPENING_THICKNESS: f32 = 0.11;

/// Thickness for a surface of the given kind
pub fn surface_thickness(kind: SurfaceKind) -> f32 {
    match kind {
        SurfaceKind::Wall => WALL_THICKNESS,
        SurfaceKind::Door | SurfaceKind::Window | SurfaceKind::Opening => OPENING_THICKNESS,
    }
}

/// A visual appearance: constant PBR factors, no textures
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Appearance {
    /// RGBA base color; alpha below 1.0 renders translucent
    pub base_color: [f32; 4],
    pub roughness: f32,
    pub metallic: f32,
}

impl Appearance {
    pub const fn opaque(r: f32, g: f32, b: f32) -> Self {
        Self {
            base_color: [r, g, b, 1.0],
            roughness: 0.8,
            metallic: 0.0,
        }
    }

    pub const fn translucent(r: f32, g: f32, b: f32, alpha: f32) -> Self {
        Self {
            base_color: [r, g, b, alpha],
            roughness: 0.2,
            metallic: 0.0,
        }
    }

    pub const fn with_roughness(mut self, roughness: f32) -> Self {
        self.roughness = roughness;
        self
    }

    pub const fn with_metallic(mut self, metallic: f32) -> Self {
        self.metallic = metallic;
        self
    }

    pub fn is_translucent(&self) -> bool {
        self.base_color[3] < 1.0
    }
}

/// Neutral wall gray
const WALL: Appearance = Appearance::opaque(0.66, 0.66, 0.66);
/// Warm door brown
const DOOR: Appearance = Appearance::opaque(0.55, 0.35, 0.2);
/// Cool window cyan, translucent
const WINDOW: Appearance = Appearance::translucent(0.0, 0.9, 1.0, 0.7);
/// Blue opening marker, translucent
const OPENING: Appearance = Appearance::translucent(0.1, 0.2, 1.0, 0.5);

/// Seating and sleeping furniture: warm brown
const FURNITURE: Appearance = Appearance::opaque(0.5, 0.33, 0.2);
/// Sanitary fixtures: white
const SANITARY: Appearance = Appearance::opaque(0.95, 0.95, 0.95).with_roughness(0.3);
/// Appliances: light gray, slightly metallic
const APPLIANCE: Appearance = Appearance::opaque(0.66, 0.66, 0.66)
    .with_roughness(0.4)
    .with_metallic(0.6);
/// Television: near-black
const TELEVISION: Appearance = Appearance::opaque(0.05, 0.05, 0.05).with_roughness(0.3);
/// Fireplace: dark gray
const FIREPLACE: Appearance = Appearance::opaque(0.33, 0.33, 0.33);
/// Anything else: mid gray
const OTHER: Appearance = Appearance::opaque(0.5, 0.5, 0.5);

/// Appearance for a surface of the given kind
pub fn surface_appearance(kind: SurfaceKind) -> Appearance {
    match kind {
        SurfaceKind::Wall => WALL,
        SurfaceKind::Door => DOOR,
        SurfaceKind::Window => WINDOW,
        SurfaceKind::Opening => OPENING,
    }
}

/// Appearance for an object of the given category
pub fn object_appearance(category: ObjectCategory) -> Appearance {
    match category {
        ObjectCategory::Chair | ObjectCategory::Table | ObjectCategory::Bed | ObjectCategory::Sofa => {
            FURNITURE
        }
        ObjectCategory::Toilet | ObjectCategory::Bathtub => SANITARY,
        ObjectCategory::Oven
        | ObjectCategory::Dishwasher
        | ObjectCategory::WasherDryer
        | ObjectCategory::Refrigerator
        | ObjectCategory::Stove => APPLIANCE,
        ObjectCategory::Television => TELEVISION,
        ObjectCategory::Fireplace => FIREPLACE,
        ObjectCategory::Other => OTHER,
    }
}
