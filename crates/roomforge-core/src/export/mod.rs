//! Export pipeline
//!
//! Writes the two artifacts of a finished scan side by side into a
//! destination directory: the assembled scene graph as a portable 3D asset
//! (GLB or glTF) and the raw capture as a JSON record set. Sharing or
//! packaging of the directory is the caller's concern.

mod gltf;

use crate::Result;
use crate::capture::CapturedRoom;
use crate::scene::SceneGraph;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

pub use gltf::write_scene;

/// File stem shared by the bundle artifacts
const BUNDLE_STEM: &str = "Room";

/// Supported scene asset formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ExportFormat {
    /// GLB (binary glTF)
    #[default]
    Glb,

    /// glTF (JSON + separate binary)
    Gltf,
}

impl ExportFormat {
    /// Get the file extension for this format
    pub fn extension(&self) -> &'static str {
        match self {
            ExportFormat::Glb => "glb",
            ExportFormat::Gltf => "gltf",
        }
    }

    /// Parse format from file extension
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_lowercase().as_str() {
            "glb" => Some(ExportFormat::Glb),
            "gltf" => Some(ExportFormat::Gltf),
            _ => None,
        }
    }

    /// Infer format from a file path
    pub fn from_path(path: &Path) -> Option<Self> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(Self::from_extension)
    }
}

/// Paths written by a successful bundle export
#[derive(Debug, Clone)]
pub struct BundleArtifacts {
    /// The 3D scene asset
    pub scene_path: PathBuf,
    /// The raw capture record set
    pub capture_path: PathBuf,
}

/// Write the scene asset and the raw capture records into `dir`
///
/// Creates the directory if needed. Any I/O failure is fatal to this export
/// only; the assembly that produced `graph` can be reused for a retry.
pub fn export_bundle(
    room: &CapturedRoom,
    graph: &SceneGraph,
    dir: &Path,
    format: ExportFormat,
) -> Result<BundleArtifacts> {
    fs::create_dir_all(dir)?;

    let capture_path = dir.join(format!("{BUNDLE_STEM}.json"));
    fs::write(&capture_path, room.to_json_vec()?)?;

    let scene_path = dir.join(format!("{BUNDLE_STEM}.{}", format.extension()));
    write_scene(graph, &scene_path)?;

    info!(
        scene = %scene_path.display(),
        capture = %capture_path.display(),
        nodes = graph.node_count(),
        "exported bundle"
    );
    Ok(BundleArtifacts {
        scene_path,
        capture_path,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{ObjectCategory, Placement, ScannedObject};
    use crate::catalog::ShapeRegistry;
    use crate::scene::assemble;
    use glam::Vec3;

    #[test]
    fn format_extension_round_trip() {
        assert_eq!(ExportFormat::Glb.extension(), "glb");
        assert_eq!(ExportFormat::from_extension("GLB"), Some(ExportFormat::Glb));
        assert_eq!(ExportFormat::from_extension("gltf"), Some(ExportFormat::Gltf));
        assert_eq!(ExportFormat::from_extension("usdz"), None);
        assert_eq!(
            ExportFormat::from_path(Path::new("/tmp/Room.glb")),
            Some(ExportFormat::Glb)
        );
    }

    #[test]
    fn bundle_writes_both_artifacts() {
        let room = CapturedRoom {
            objects: vec![ScannedObject::new(
                ObjectCategory::Table,
                Vec3::ONE,
                Placement::IDENTITY,
            )],
            ..Default::default()
        };
        let assembly = assemble(&room, &ShapeRegistry::standard());

        let dir = std::env::temp_dir().join("roomforge_bundle_test");
        let artifacts =
            export_bundle(&room, &assembly.graph, &dir, ExportFormat::Glb).unwrap();

        assert!(artifacts.scene_path.exists());
        assert!(artifacts.capture_path.exists());

        let decoded =
            CapturedRoom::from_json_slice(&fs::read(&artifacts.capture_path).unwrap()).unwrap();
        assert_eq!(decoded, room);

        fs::remove_dir_all(&dir).ok();
    }
}
