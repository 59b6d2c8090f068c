//! Team material configuration.
//!
//! Each setup panel edits one configuration variant; the match scene only
//! needs the resulting [`Material`], obtained through
//! [`MaterialConfiguration::create_material`].

use serde::{Deserialize, Serialize};

use crate::side::TeamColor;

/// Constant ambient term shared by every shading model.
pub const AMBIENT: f32 = 0.1;

/// Anything that can produce a material for a team's players.
pub trait MaterialConfiguration {
    fn create_material(&self) -> Material;
}

/// Lighting model of a material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Shading {
    Lambert,
    BlinnPhong { specular: TeamColor, shininess: f32 },
    Toon { bands: u8 },
    Rim { rim_color: TeamColor, rim_power: f32 },
}

/// A ready-to-use material: base colour, lighting model and optional outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub base: TeamColor,
    pub shading: Shading,
    pub outline: Option<Outline>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Outline {
    pub color: TeamColor,
    pub width: f32,
}

impl Material {
    /// Evaluate the lighting formula for one surface point.
    ///
    /// `light_dir` points from the surface towards the light, `view_dir`
    /// from the surface towards the eye. Inputs need not be normalized.
    pub fn shade(&self, normal: [f32; 3], light_dir: [f32; 3], view_dir: [f32; 3]) -> TeamColor {
        let n = normalize(normal);
        let l = normalize(light_dir);
        let v = normalize(view_dir);
        let base = self.base.to_f32();
        let ndl = dot(n, l).max(0.0);

        let rgb = match &self.shading {
            Shading::Lambert => scale(base, diffuse_term(ndl)),
            Shading::BlinnPhong {
                specular,
                shininess,
            } => {
                let h = normalize(add(l, v));
                let spec = if ndl > 0.0 {
                    dot(n, h).max(0.0).powf(*shininess)
                } else {
                    0.0
                };
                add(
                    scale(base, diffuse_term(ndl)),
                    scale(specular.to_f32(), spec),
                )
            },
            Shading::Toon { bands } => {
                let bands = (*bands).max(1) as f32;
                let stepped = (ndl * bands).floor() / bands;
                scale(base, diffuse_term(stepped))
            },
            Shading::Rim {
                rim_color,
                rim_power,
            } => {
                let rim = (1.0 - dot(n, v).max(0.0)).powf(*rim_power);
                add(scale(base, diffuse_term(ndl)), scale(rim_color.to_f32(), rim))
            },
        };
        TeamColor::from_f32(rgb)
    }
}

fn diffuse_term(ndl: f32) -> f32 {
    AMBIENT + (1.0 - AMBIENT) * ndl
}

fn dot(a: [f32; 3], b: [f32; 3]) -> f32 {
    a[0] * b[0] + a[1] * b[1] + a[2] * b[2]
}

fn add(a: [f32; 3], b: [f32; 3]) -> [f32; 3] {
    [a[0] + b[0], a[1] + b[1], a[2] + b[2]]
}

fn scale(a: [f32; 3], s: f32) -> [f32; 3] {
    [a[0] * s, a[1] * s, a[2] * s]
}

fn normalize(a: [f32; 3]) -> [f32; 3] {
    let len = dot(a, a).sqrt();
    if len < 1e-6 {
        return [0.0, 0.0, 0.0];
    }
    scale(a, 1.0 / len)
}

/// Plain diffuse panel: only a colour.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiffuseConfig {
    pub color: TeamColor,
}

impl MaterialConfiguration for DiffuseConfig {
    fn create_material(&self) -> Material {
        Material {
            base: self.color,
            shading: Shading::Lambert,
            outline: None,
        }
    }
}

/// Glossy panel: colour plus a specular highlight.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpecularConfig {
    pub color: TeamColor,
    pub specular: TeamColor,
    pub shininess: f32,
}

impl MaterialConfiguration for SpecularConfig {
    fn create_material(&self) -> Material {
        Material {
            base: self.color,
            shading: Shading::BlinnPhong {
                specular: self.specular,
                shininess: self.shininess,
            },
            outline: None,
        }
    }
}

/// Cartoon panel: banded diffuse with an outline.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ToonConfig {
    pub color: TeamColor,
    pub bands: u8,
    pub outline_color: TeamColor,
    pub outline_width: f32,
}

impl MaterialConfiguration for ToonConfig {
    fn create_material(&self) -> Material {
        Material {
            base: self.color,
            shading: Shading::Toon { bands: self.bands },
            outline: (self.outline_width > 0.0).then_some(Outline {
                color: self.outline_color,
                width: self.outline_width,
            }),
        }
    }
}

/// Rim-light panel: diffuse plus a glow on silhouette edges.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RimConfig {
    pub color: TeamColor,
    pub rim_color: TeamColor,
    pub rim_power: f32,
}

impl MaterialConfiguration for RimConfig {
    fn create_material(&self) -> Material {
        Material {
            base: self.color,
            shading: Shading::Rim {
                rim_color: self.rim_color,
                rim_power: self.rim_power,
            },
            outline: None,
        }
    }
}

/// Slider-driven material parameters.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MaterialParam {
    Shininess,
    Bands,
    OutlineWidth,
    RimPower,
}

/// The material panel currently selected for a team.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MaterialChoice {
    Diffuse(DiffuseConfig),
    Specular(SpecularConfig),
    Toon(ToonConfig),
    Rim(RimConfig),
}

impl MaterialChoice {
    /// Plain diffuse material in the given colour.
    pub fn diffuse(color: TeamColor) -> Self {
        MaterialChoice::Diffuse(DiffuseConfig { color })
    }

    pub fn color(&self) -> TeamColor {
        match self {
            MaterialChoice::Diffuse(c) => c.color,
            MaterialChoice::Specular(c) => c.color,
            MaterialChoice::Toon(c) => c.color,
            MaterialChoice::Rim(c) => c.color,
        }
    }

    pub fn set_color(&mut self, color: TeamColor) {
        match self {
            MaterialChoice::Diffuse(c) => c.color = color,
            MaterialChoice::Specular(c) => c.color = color,
            MaterialChoice::Toon(c) => c.color = color,
            MaterialChoice::Rim(c) => c.color = color,
        }
    }

    /// Apply a slider value. Values are clamped into the parameter's range.
    /// Returns false when the parameter does not belong to this panel.
    pub fn set_param(&mut self, param: MaterialParam, value: f32) -> bool {
        match (self, param) {
            (MaterialChoice::Specular(c), MaterialParam::Shininess) => {
                c.shininess = value.clamp(1.0, 256.0);
            },
            (MaterialChoice::Toon(c), MaterialParam::Bands) => {
                c.bands = value.round().clamp(1.0, 8.0) as u8;
            },
            (MaterialChoice::Toon(c), MaterialParam::OutlineWidth) => {
                c.outline_width = value.clamp(0.0, 0.1);
            },
            (MaterialChoice::Rim(c), MaterialParam::RimPower) => {
                c.rim_power = value.clamp(0.5, 8.0);
            },
            _ => return false,
        }
        true
    }
}

impl MaterialConfiguration for MaterialChoice {
    fn create_material(&self) -> Material {
        match self {
            MaterialChoice::Diffuse(c) => c.create_material(),
            MaterialChoice::Specular(c) => c.create_material(),
            MaterialChoice::Toon(c) => c.create_material(),
            MaterialChoice::Rim(c) => c.create_material(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const UP: [f32; 3] = [0.0, 0.0, 1.0];

    fn grey() -> TeamColor {
        TeamColor {
            r: 200,
            g: 200,
            b: 200,
        }
    }

    #[test]
    fn lambert_facing_light_is_full_colour() {
        let mat = MaterialChoice::diffuse(grey()).create_material();
        assert_eq!(mat.shade(UP, UP, UP), grey());
    }

    #[test]
    fn lambert_facing_away_is_ambient_only() {
        let mat = MaterialChoice::diffuse(TeamColor::WHITE).create_material();
        let c = mat.shade(UP, [0.0, 0.0, -1.0], UP);
        assert_eq!(c.r, (AMBIENT * 255.0).round() as u8);
    }

    #[test]
    fn specular_highlight_brightens() {
        let spec = MaterialChoice::Specular(SpecularConfig {
            color: TeamColor {
                r: 100,
                g: 100,
                b: 100,
            },
            specular: TeamColor::WHITE,
            shininess: 16.0,
        })
        .create_material();
        let diffuse = MaterialChoice::diffuse(TeamColor {
            r: 100,
            g: 100,
            b: 100,
        })
        .create_material();
        let light = [0.3, 0.0, 1.0];
        assert!(spec.shade(UP, light, UP).r > diffuse.shade(UP, light, UP).r);
    }

    #[test]
    fn toon_quantizes_into_bands() {
        let mat = MaterialChoice::Toon(ToonConfig {
            color: TeamColor::WHITE,
            bands: 2,
            outline_color: TeamColor::BLACK,
            outline_width: 0.02,
        })
        .create_material();
        // Two light angles inside the same band shade identically.
        let a = mat.shade(UP, [0.5, 0.0, 0.6], UP);
        let b = mat.shade(UP, [0.6, 0.0, 0.6], UP);
        assert_eq!(a, b);
        assert!(mat.outline.is_some());
    }

    #[test]
    fn rim_glows_at_grazing_view() {
        let mat = MaterialChoice::Rim(RimConfig {
            color: TeamColor::BLACK,
            rim_color: TeamColor::WHITE,
            rim_power: 2.0,
        })
        .create_material();
        let head_on = mat.shade(UP, UP, UP);
        let grazing = mat.shade(UP, UP, [1.0, 0.0, 0.05]);
        assert!(grazing.r > head_on.r);
    }

    #[test]
    fn set_param_clamps_and_filters() {
        let mut choice = MaterialChoice::Toon(ToonConfig {
            color: grey(),
            bands: 3,
            outline_color: TeamColor::BLACK,
            outline_width: 0.0,
        });
        assert!(choice.set_param(MaterialParam::Bands, 42.0));
        assert!(!choice.set_param(MaterialParam::Shininess, 10.0));
        match choice {
            MaterialChoice::Toon(c) => assert_eq!(c.bands, 8),
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn choice_serde_is_tagged() {
        let json = serde_json::to_string(&MaterialChoice::diffuse(grey())).unwrap();
        assert!(json.contains("\"kind\":\"diffuse\""), "got {json}");
    }
}
