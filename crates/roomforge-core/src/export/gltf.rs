//! glTF 2.0 / GLB scene writer
//!
//! Tessellates every primitive node of a scene graph and emits one glTF
//! document: node hierarchy with matrix transforms, one mesh per primitive,
//! materials deduplicated by appearance. GLB packs JSON and binary chunks
//! into a single file; `.gltf` writes the JSON next to a `.bin` buffer.

use crate::capture::Placement;
use crate::error::{Error, Result};
use crate::export::ExportFormat;
use crate::material::Appearance;
use crate::mesh::Mesh;
use crate::scene::{SceneGraph, SceneNode};
use serde_json::{Value, json};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const COMPONENT_F32: u32 = 5126;
const COMPONENT_U32: u32 = 5125;

/// Write a scene graph to `path`, format chosen by extension
pub fn write_scene(graph: &SceneGraph, path: &Path) -> Result<()> {
    let format = ExportFormat::from_path(path).unwrap_or_default();

    let bin_name = match format {
        ExportFormat::Glb => None,
        ExportFormat::Gltf => {
            let stem = path
                .file_stem()
                .and_then(|s| s.to_str())
                .ok_or_else(|| Error::Export(format!("bad output path: {}", path.display())))?;
            Some(format!("{stem}.bin"))
        }
    };

    let mut doc = Document::default();
    for node in &graph.nodes {
        let index = doc.add_node(node);
        doc.roots.push(index);
    }
    let (json, buffer) = doc.finish(bin_name.as_deref());

    match format {
        ExportFormat::Glb => write_glb(path, &json, &buffer),
        ExportFormat::Gltf => {
            // An empty scene has no buffer section, so no .bin to reference
            if !buffer.is_empty() {
                std::fs::write(path.with_extension("bin"), &buffer)?;
            }
            std::fs::write(path, serde_json::to_vec(&json)?)?;
            Ok(())
        }
    }
}

/// Accumulates the pieces of one glTF document
#[derive(Default)]
struct Document {
    buffer: Vec<u8>,
    buffer_views: Vec<Value>,
    accessors: Vec<Value>,
    meshes: Vec<Value>,
    materials: Vec<Value>,
    material_keys: Vec<Appearance>,
    nodes: Vec<Value>,
    roots: Vec<usize>,
}

impl Document {
    /// Add a scene node (and its children) and return its glTF node index
    fn add_node(&mut self, node: &SceneNode) -> usize {
        let children: Vec<usize> = node.children.iter().map(|c| self.add_node(c)).collect();

        let mut entry = json!({ "name": node.name });
        if node.placement != Placement::IDENTITY {
            let matrix: Vec<f32> = node.placement.to_matrix().to_cols_array().to_vec();
            entry["matrix"] = json!(matrix);
        }
        if let Some(primitive) = &node.primitive {
            let material = self.material_index(node.appearance);
            let mesh = self.add_mesh(&primitive.to_mesh(), material);
            entry["mesh"] = json!(mesh);
        }
        if !children.is_empty() {
            entry["children"] = json!(children);
        }

        self.nodes.push(entry);
        self.nodes.len() - 1
    }

    /// Deduplicate materials by appearance
    fn material_index(&mut self, appearance: Appearance) -> usize {
        if let Some(i) = self.material_keys.iter().position(|a| *a == appearance) {
            return i;
        }

        let mut entry = json!({
            "pbrMetallicRoughness": {
                "baseColorFactor": appearance.base_color,
                "metallicFactor": appearance.metallic,
                "roughnessFactor": appearance.roughness,
            }
        });
        if appearance.is_translucent() {
            entry["alphaMode"] = json!("BLEND");
            entry["doubleSided"] = json!(true);
        }

        self.material_keys.push(appearance);
        self.materials.push(entry);
        self.materials.len() - 1
    }

    /// Append a mesh's buffer sections and return its glTF mesh index
    fn add_mesh(&mut self, mesh: &Mesh, material: usize) -> usize {
        let (min, max) = mesh.bounds();

        let positions: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| bytemuck::cast_slice::<f32, u8>(&v.position).to_vec())
            .collect();
        let normals: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| bytemuck::cast_slice::<f32, u8>(&v.normal).to_vec())
            .collect();
        let uvs: Vec<u8> = mesh
            .vertices
            .iter()
            .flat_map(|v| bytemuck::cast_slice::<f32, u8>(&v.uv).to_vec())
            .collect();
        let indices: &[u8] = bytemuck::cast_slice(&mesh.indices);

        let position_accessor = self.push_accessor(
            &positions,
            COMPONENT_F32,
            mesh.vertex_count(),
            "VEC3",
            Some((min.to_array(), max.to_array())),
        );
        let normal_accessor =
            self.push_accessor(&normals, COMPONENT_F32, mesh.vertex_count(), "VEC3", None);
        let uv_accessor =
            self.push_accessor(&uvs, COMPONENT_F32, mesh.vertex_count(), "VEC2", None);
        let index_accessor =
            self.push_accessor(indices, COMPONENT_U32, mesh.indices.len(), "SCALAR", None);

        self.meshes.push(json!({
            "primitives": [{
                "attributes": {
                    "POSITION": position_accessor,
                    "NORMAL": normal_accessor,
                    "TEXCOORD_0": uv_accessor,
                },
                "indices": index_accessor,
                "material": material,
            }]
        }));
        self.meshes.len() - 1
    }

    fn push_accessor(
        &mut self,
        bytes: &[u8],
        component_type: u32,
        count: usize,
        accessor_type: &str,
        min_max: Option<([f32; 3], [f32; 3])>,
    ) -> usize {
        let offset = self.buffer.len();
        self.buffer.extend_from_slice(bytes);
        self.buffer_views.push(json!({
            "buffer": 0,
            "byteOffset": offset,
            "byteLength": bytes.len(),
        }));
        let view = self.buffer_views.len() - 1;

        let mut accessor = json!({
            "bufferView": view,
            "componentType": component_type,
            "count": count,
            "type": accessor_type,
        });
        if let Some((min, max)) = min_max {
            accessor["min"] = json!(min);
            accessor["max"] = json!(max);
        }
        self.accessors.push(accessor);
        self.accessors.len() - 1
    }

    /// The finished JSON document and its binary buffer
    ///
    /// glTF forbids empty top-level arrays, so sections an empty scene does
    /// not need are left out entirely.
    fn finish(self, bin_uri: Option<&str>) -> (Value, Vec<u8>) {
        let scene = if self.roots.is_empty() {
            json!({})
        } else {
            json!({ "nodes": self.roots })
        };
        let mut json = json!({
            "asset": { "version": "2.0", "generator": "Roomforge" },
            "scene": 0,
            "scenes": [scene],
        });

        if !self.nodes.is_empty() {
            json["nodes"] = json!(self.nodes);
        }
        if !self.meshes.is_empty() {
            json["meshes"] = json!(self.meshes);
        }
        if !self.materials.is_empty() {
            json["materials"] = json!(self.materials);
        }
        if !self.accessors.is_empty() {
            json["accessors"] = json!(self.accessors);
            json["bufferViews"] = json!(self.buffer_views);

            let mut buffer_entry = json!({ "byteLength": self.buffer.len() });
            if let Some(uri) = bin_uri {
                buffer_entry["uri"] = json!(uri);
            }
            json["buffers"] = json!([buffer_entry]);
        }

        (json, self.buffer)
    }
}

/// Pack JSON and binary chunks into a GLB container
fn write_glb(path: &Path, json: &Value, buffer: &[u8]) -> Result<()> {
    let json_bytes = serde_json::to_vec(json)?;
    let json_padding = (4 - (json_bytes.len() % 4)) % 4;
    let bin_padding = (4 - (buffer.len() % 4)) % 4;

    let total_size = 12
        + 8 + json_bytes.len() + json_padding
        + 8 + buffer.len() + bin_padding;

    let mut file = File::create(path)?;

    // GLB header
    file.write_all(b"glTF")?;
    file.write_all(&2u32.to_le_bytes())?;
    file.write_all(&(total_size as u32).to_le_bytes())?;

    // JSON chunk, space padded
    file.write_all(&((json_bytes.len() + json_padding) as u32).to_le_bytes())?;
    file.write_all(&0x4E4F_534A_u32.to_le_bytes())?; // "JSON"
    file.write_all(&json_bytes)?;
    file.write_all(&vec![0x20u8; json_padding])?;

    // BIN chunk, zero padded
    file.write_all(&((buffer.len() + bin_padding) as u32).to_le_bytes())?;
    file.write_all(&0x004E_4942_u32.to_le_bytes())?; // "BIN\0"
    file.write_all(buffer)?;
    file.write_all(&vec![0u8; bin_padding])?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::capture::{CapturedRoom, ObjectCategory, Placement, ScannedObject, Surface, SurfaceKind};
    use crate::catalog::ShapeRegistry;
    use crate::scene::assemble;
    use glam::Vec3;

    fn sample_graph() -> SceneGraph {
        let room = CapturedRoom {
            walls: vec![Surface::new(
                SurfaceKind::Wall,
                Vec3::new(3.0, 2.4, 0.0),
                Placement::IDENTITY,
            )],
            windows: vec![Surface::new(
                SurfaceKind::Window,
                Vec3::new(1.0, 1.2, 0.0),
                Placement::from_translation(Vec3::new(0.5, 1.0, 0.0)),
            )],
            objects: vec![ScannedObject::new(
                ObjectCategory::Chair,
                Vec3::ONE,
                Placement::IDENTITY,
            )],
            ..Default::default()
        };
        assemble(&room, &ShapeRegistry::standard()).graph
    }

    #[test]
    fn glb_has_magic_and_aligned_chunks() {
        let path = std::env::temp_dir().join("roomforge_gltf_test.glb");
        write_scene(&sample_graph(), &path).unwrap();

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(&bytes[0..4], b"glTF");
        assert_eq!(u32::from_le_bytes(bytes[4..8].try_into().unwrap()), 2);
        // Declared total size matches the file
        assert_eq!(
            u32::from_le_bytes(bytes[8..12].try_into().unwrap()) as usize,
            bytes.len()
        );
        // JSON chunk length is 4-byte aligned
        let json_len = u32::from_le_bytes(bytes[12..16].try_into().unwrap());
        assert_eq!(json_len % 4, 0);

        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn gltf_writes_json_and_bin_pair() {
        let dir = std::env::temp_dir().join("roomforge_gltf_pair_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Room.gltf");
        write_scene(&sample_graph(), &path).unwrap();

        let json: Value =
            serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(json["asset"]["version"], "2.0");
        assert_eq!(json["buffers"][0]["uri"], "Room.bin");
        assert!(dir.join("Room.bin").exists());

        // 3 top-level entities: wall, window, chair wrapper
        assert_eq!(json["scenes"][0]["nodes"].as_array().unwrap().len(), 3);
        // Chair wrapper adds 6 part nodes
        assert_eq!(json["nodes"].as_array().unwrap().len(), 9);

        // Translucent window material uses alpha blending
        let materials = json["materials"].as_array().unwrap();
        assert!(materials.iter().any(|m| m["alphaMode"] == "BLEND"));
        // Chair parts share one deduplicated material
        let chair_material = crate::material::object_appearance(ObjectCategory::Chair);
        let matching = materials
            .iter()
            .filter(|m| {
                m["pbrMetallicRoughness"]["baseColorFactor"][0]
                    == json!(chair_material.base_color[0])
            })
            .count();
        assert_eq!(matching, 1);

        std::fs::remove_dir_all(&dir).ok();
    }

    #[test]
    fn empty_graph_still_writes_a_valid_document() {
        let path = std::env::temp_dir().join("roomforge_gltf_empty_test.glb");
        write_scene(&SceneGraph::default(), &path).unwrap();
        assert!(std::fs::read(&path).unwrap().starts_with(b"glTF"));
        std::fs::remove_file(&path).ok();
    }

    #[test]
    fn empty_scene_gltf_has_no_bin_file() {
        let dir = std::env::temp_dir().join("roomforge_gltf_empty_pair_test");
        std::fs::create_dir_all(&dir).unwrap();
        let path = dir.join("Room.gltf");
        write_scene(&SceneGraph::default(), &path).unwrap();

        let json: Value = serde_json::from_slice(&std::fs::read(&path).unwrap()).unwrap();
        assert!(json.get("buffers").is_none());
        assert!(!dir.join("Room.bin").exists());

        std::fs::remove_dir_all(&dir).ok();
    }
}
