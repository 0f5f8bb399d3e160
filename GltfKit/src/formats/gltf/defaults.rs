//! Post-decode default normalization.
//!
//! Fills the defaults the glTF specification assigns to optional
//! properties, so consumers never have to repeat them. Each fill only
//! touches an absent value, which makes the pass idempotent.

use super::enums::mode;
use super::materials::Material;
use super::types::{Document, Mesh};

const OPAQUE_WHITE: [f32; 4] = [1.0, 1.0, 1.0, 1.0];

/// Fill glTF defaults into a freshly decoded document, in place.
///
/// Steps, in order:
/// 1. primitive topology defaults to TRIANGLES;
/// 2. metallic-roughness factors default to white / 1.0 / 1.0;
/// 3. normal scale and occlusion strength default to 1.0;
/// 4. alpha cutoff defaults to 0.5;
/// 5. specular-glossiness materials drop a metallic-roughness block that has
///    no base color texture, then get their own factor defaults.
///
/// Step 5 must run after step 2.
pub fn apply_defaults(doc: &mut Document) {
    for mesh in &mut doc.meshes {
        fill_primitive_modes(mesh);
    }
    for material in &mut doc.materials {
        fill_metallic_roughness(material);
        fill_texture_factors(material);
        material.alpha_cutoff.get_or_insert(0.5);
        resolve_specular_glossiness(material);
    }
}

fn fill_primitive_modes(mesh: &mut Mesh) {
    for primitive in &mut mesh.primitives {
        primitive.mode.get_or_insert(mode::TRIANGLES);
    }
}

fn fill_metallic_roughness(material: &mut Material) {
    if let Some(pbr) = material.pbr_metallic_roughness.as_mut() {
        pbr.base_color_factor.get_or_insert(OPAQUE_WHITE);
        pbr.metallic_factor.get_or_insert(1.0);
        pbr.roughness_factor.get_or_insert(1.0);
    }
}

fn fill_texture_factors(material: &mut Material) {
    if let Some(normal) = material.normal_texture.as_mut() {
        normal.scale.get_or_insert(1.0);
    }
    if let Some(occlusion) = material.occlusion_texture.as_mut() {
        occlusion.strength.get_or_insert(1.0);
    }
}

fn resolve_specular_glossiness(material: &mut Material) {
    let Some(spec_gloss) = material.extensions.pbr_specular_glossiness.as_mut() else {
        return;
    };

    // Some exporters emit an empty `pbrMetallicRoughness: {}` next to the
    // extension; the material then only uses specular-glossiness.
    if material
        .pbr_metallic_roughness
        .as_ref()
        .is_some_and(|pbr| pbr.base_color_texture.is_none())
    {
        material.pbr_metallic_roughness = None;
    }

    spec_gloss.diffuse_factor.get_or_insert(OPAQUE_WHITE);
    spec_gloss.specular_factor.get_or_insert([1.0, 1.0, 1.0]);
    spec_gloss.glossiness_factor.get_or_insert(1.0);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formats::gltf::materials::{
        NormalTextureInfo, OcclusionTextureInfo, PbrMetallicRoughness, PbrSpecularGlossiness,
        TextureInfo,
    };
    use crate::formats::gltf::types::Primitive;
    use pretty_assertions::assert_eq;

    fn doc_with_material(material: Material) -> Document {
        Document { materials: vec![material], ..Document::default() }
    }

    #[test]
    fn test_primitive_mode_default() {
        let mut doc = Document {
            meshes: vec![Mesh {
                primitives: vec![
                    Primitive::default(),
                    Primitive { mode: Some(mode::LINES), ..Primitive::default() },
                ],
                ..Mesh::default()
            }],
            ..Document::default()
        };
        apply_defaults(&mut doc);
        assert_eq!(doc.meshes[0].primitives[0].mode, Some(mode::TRIANGLES));
        assert_eq!(doc.meshes[0].primitives[1].mode, Some(mode::LINES));
    }

    #[test]
    fn test_material_defaults() {
        let mut doc = doc_with_material(Material {
            pbr_metallic_roughness: Some(PbrMetallicRoughness {
                metallic_factor: Some(0.0),
                ..PbrMetallicRoughness::default()
            }),
            normal_texture: Some(NormalTextureInfo::default()),
            occlusion_texture: Some(OcclusionTextureInfo { strength: Some(0.25), ..Default::default() }),
            ..Material::default()
        });
        apply_defaults(&mut doc);

        let material = &doc.materials[0];
        let pbr = material.pbr_metallic_roughness.as_ref().unwrap();
        assert_eq!(pbr.base_color_factor, Some(OPAQUE_WHITE));
        // explicit zero is kept
        assert_eq!(pbr.metallic_factor, Some(0.0));
        assert_eq!(pbr.roughness_factor, Some(1.0));
        assert_eq!(material.normal_texture.as_ref().unwrap().scale, Some(1.0));
        assert_eq!(material.occlusion_texture.as_ref().unwrap().strength, Some(0.25));
        assert_eq!(material.alpha_cutoff, Some(0.5));
    }

    #[test]
    fn test_absent_blocks_stay_absent() {
        let mut doc = doc_with_material(Material::default());
        apply_defaults(&mut doc);
        let material = &doc.materials[0];
        assert!(material.pbr_metallic_roughness.is_none());
        assert!(material.normal_texture.is_none());
        assert!(material.occlusion_texture.is_none());
        assert!(material.extensions.pbr_specular_glossiness.is_none());
    }

    #[test]
    fn test_specular_glossiness_discards_untextured_metallic_roughness() {
        let mut material = Material { pbr_metallic_roughness: Some(PbrMetallicRoughness::default()), ..Material::default() };
        material.extensions.pbr_specular_glossiness = Some(PbrSpecularGlossiness {
            glossiness_factor: Some(0.5),
            ..PbrSpecularGlossiness::default()
        });
        let mut doc = doc_with_material(material);
        apply_defaults(&mut doc);

        let material = &doc.materials[0];
        assert!(material.pbr_metallic_roughness.is_none());
        let spec_gloss = material.extensions.pbr_specular_glossiness.as_ref().unwrap();
        assert_eq!(spec_gloss.diffuse_factor, Some(OPAQUE_WHITE));
        assert_eq!(spec_gloss.specular_factor, Some([1.0, 1.0, 1.0]));
        assert_eq!(spec_gloss.glossiness_factor, Some(0.5));
    }

    #[test]
    fn test_specular_glossiness_keeps_textured_metallic_roughness() {
        let mut material = Material {
            pbr_metallic_roughness: Some(PbrMetallicRoughness {
                base_color_texture: Some(TextureInfo { index: 2, tex_coord: 0 }),
                ..PbrMetallicRoughness::default()
            }),
            ..Material::default()
        };
        material.extensions.pbr_specular_glossiness = Some(PbrSpecularGlossiness::default());
        let mut doc = doc_with_material(material);
        apply_defaults(&mut doc);

        let pbr = doc.materials[0].pbr_metallic_roughness.as_ref().unwrap();
        assert_eq!(pbr.base_color_factor, Some(OPAQUE_WHITE));
    }

    #[test]
    fn test_idempotent() {
        let mut material = Material {
            pbr_metallic_roughness: Some(PbrMetallicRoughness::default()),
            normal_texture: Some(NormalTextureInfo::default()),
            ..Material::default()
        };
        material.extensions.pbr_specular_glossiness = Some(PbrSpecularGlossiness::default());
        let mut doc = doc_with_material(material);
        doc.meshes.push(Mesh { primitives: vec![Primitive::default()], ..Mesh::default() });

        apply_defaults(&mut doc);
        let once = doc.clone();
        apply_defaults(&mut doc);
        assert_eq!(doc, once);
    }
}
