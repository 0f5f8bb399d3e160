//! glTF 2.0 material types and material extensions.

use serde::Deserialize;

/// Texture info used in materials
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct TextureInfo {
    pub index: usize,
    #[serde(rename = "texCoord")]
    #[serde(default)]
    pub tex_coord: usize,
}

/// Normal texture info with scale
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct NormalTextureInfo {
    pub index: usize,
    #[serde(rename = "texCoord")]
    #[serde(default)]
    pub tex_coord: usize,
    /// 1.0 after normalization
    pub scale: Option<f32>,
}

/// Occlusion texture info with strength
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct OcclusionTextureInfo {
    pub index: usize,
    #[serde(rename = "texCoord")]
    #[serde(default)]
    pub tex_coord: usize,
    /// 1.0 after normalization
    pub strength: Option<f32>,
}

/// PBR Metallic-Roughness material model
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PbrMetallicRoughness {
    #[serde(rename = "baseColorFactor")]
    pub base_color_factor: Option<[f32; 4]>,
    #[serde(rename = "baseColorTexture")]
    pub base_color_texture: Option<TextureInfo>,
    #[serde(rename = "metallicFactor")]
    pub metallic_factor: Option<f32>,
    #[serde(rename = "roughnessFactor")]
    pub roughness_factor: Option<f32>,
    #[serde(rename = "metallicRoughnessTexture")]
    pub metallic_roughness_texture: Option<TextureInfo>,
}

/// `KHR_materials_pbrSpecularGlossiness`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct PbrSpecularGlossiness {
    #[serde(rename = "diffuseFactor")]
    pub diffuse_factor: Option<[f32; 4]>,
    #[serde(rename = "diffuseTexture")]
    pub diffuse_texture: Option<TextureInfo>,
    #[serde(rename = "specularFactor")]
    pub specular_factor: Option<[f32; 3]>,
    #[serde(rename = "glossinessFactor")]
    pub glossiness_factor: Option<f32>,
    #[serde(rename = "specularGlossinessTexture")]
    pub specular_glossiness_texture: Option<TextureInfo>,
}

/// `KHR_materials_clearcoat`
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Clearcoat {
    #[serde(rename = "clearcoatFactor")]
    #[serde(default)]
    pub clearcoat_factor: f32,
    #[serde(rename = "clearcoatTexture")]
    pub clearcoat_texture: Option<TextureInfo>,
    #[serde(rename = "clearcoatRoughnessFactor")]
    #[serde(default)]
    pub clearcoat_roughness_factor: f32,
    #[serde(rename = "clearcoatRoughnessTexture")]
    pub clearcoat_roughness_texture: Option<TextureInfo>,
    #[serde(rename = "clearcoatNormalTexture")]
    pub clearcoat_normal_texture: Option<NormalTextureInfo>,
}

/// `KHR_materials_unlit` (a marker, no properties)
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Unlit {}

/// Material extensions understood by this crate
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MaterialExtensions {
    #[serde(rename = "KHR_materials_pbrSpecularGlossiness")]
    pub pbr_specular_glossiness: Option<PbrSpecularGlossiness>,
    #[serde(rename = "KHR_materials_clearcoat")]
    pub clearcoat: Option<Clearcoat>,
    #[serde(rename = "KHR_materials_unlit")]
    pub unlit: Option<Unlit>,
}

/// Material definition
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct Material {
    pub name: Option<String>,
    #[serde(rename = "pbrMetallicRoughness")]
    pub pbr_metallic_roughness: Option<PbrMetallicRoughness>,
    #[serde(rename = "normalTexture")]
    pub normal_texture: Option<NormalTextureInfo>,
    #[serde(rename = "occlusionTexture")]
    pub occlusion_texture: Option<OcclusionTextureInfo>,
    #[serde(rename = "emissiveTexture")]
    pub emissive_texture: Option<TextureInfo>,
    #[serde(rename = "emissiveFactor")]
    #[serde(default)]
    pub emissive_factor: [f32; 3],
    /// "OPAQUE", "MASK" or "BLEND"
    #[serde(rename = "alphaMode")]
    pub alpha_mode: Option<String>,
    /// 0.5 after normalization
    #[serde(rename = "alphaCutoff")]
    pub alpha_cutoff: Option<f32>,
    #[serde(rename = "doubleSided")]
    #[serde(default)]
    pub double_sided: bool,
    #[serde(default)]
    pub extensions: MaterialExtensions,
}

impl Material {
    /// Whether the material is expressed in the specular-glossiness model.
    #[must_use]
    pub fn is_specular_glossiness(&self) -> bool {
        self.extensions.pbr_specular_glossiness.is_some()
    }

    #[must_use]
    pub fn is_unlit(&self) -> bool {
        self.extensions.unlit.is_some()
    }
}
