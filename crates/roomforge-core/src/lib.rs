//! # Roomforge Core
//!
//! Synthesis of renderable, exportable 3D scenes from structured room-scan
//! captures.
//!
//! A capture service hands over a [`capture::CapturedRoom`]: planar surfaces
//! (walls, doors, windows, openings) and furniture-like objects, each with
//! physical dimensions and a placement transform. This crate turns that into
//! a scene graph of placed, materialized primitive solids and writes it out
//! as a portable glTF/GLB asset next to the raw capture records.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use roomforge_core::prelude::*;
//!
//! let room = CapturedRoom::from_json_slice(&bytes)?;
//! let registry = ShapeRegistry::standard();
//! let assembly = assemble(&room, &registry);
//! export_bundle(&room, &assembly.graph, Path::new("Export"), ExportFormat::Glb)?;
//! ```
//!
//! ## Units and Conventions
//!
//! - **Distances**: meters
//! - **Coordinate system**: right-handed, Y-up; placements map entity-local
//!   frames into the scene's world frame
//! - **Precision**: `f32` throughout

pub mod capture;
pub mod catalog;
pub mod export;
pub mod material;
pub mod mesh;
pub mod primitive;
pub mod scene;

mod error;

pub use error::{Error, Result};

/// Prelude module for convenient imports
pub mod prelude {
    // Capture data model
    pub use crate::capture::{
        CapturedRoom, ObjectCategory, Placement, ScannedObject, Surface, SurfaceKind,
    };

    // Shape catalog
    pub use crate::catalog::{CompositeShape, ShapeBuilder, ShapePart, ShapeRegistry};

    // Materials
    pub use crate::material::{Appearance, object_appearance, surface_appearance};

    // Primitives and meshes
    pub use crate::mesh::{Mesh, Vertex};
    pub use crate::primitive::{Primitive, cylinder, rounded_box};

    // Scene assembly
    pub use crate::scene::{Assembly, AssemblyIssue, SceneGraph, SceneNode, assemble};

    // Export
    pub use crate::export::{BundleArtifacts, ExportFormat, export_bundle, write_scene};

    // Math (re-export glam)
    pub use glam::{Mat4, Quat, Vec2, Vec3};

    // Error handling
    pub use crate::{Error, Result};
}
