//! Declarative description of the globe scene.
//!
//! The host renderer builds its scene graph from a [`GlobeScene`]; nothing
//! here draws. Defaults reproduce the landing-page globe: a purple
//! hex-polygon earth with the Lucknow → Boston journey arc.

use serde::{Deserialize, Serialize};

use super::orientation::Orientation;

/// Device pixel ratios above this are rendered at this ratio.
const MAX_PIXEL_RATIO: f64 = 2.0;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeoPoint {
    pub lat: f64,
    pub lng: f64,
}

impl GeoPoint {
    pub const fn new(lat: f64, lng: f64) -> Self {
        Self { lat, lng }
    }
}

pub const BOSTON: GeoPoint = GeoPoint::new(42.3601, -71.0589);
pub const LUCKNOW: GeoPoint = GeoPoint::new(26.8467, 80.9462);

/// Size of the rendering surface in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
    pub pixel_ratio: f64,
}

impl Viewport {
    /// `None` while the surface has not been laid out (zero width or height).
    pub fn new(width: u32, height: u32) -> Option<Self> {
        if width == 0 || height == 0 {
            return None;
        }
        Some(Self {
            width,
            height,
            pixel_ratio: 1.0,
        })
    }

    pub fn with_device_pixel_ratio(mut self, ratio: f64) -> Self {
        self.pixel_ratio = ratio.clamp(1.0, MAX_PIXEL_RATIO);
        self
    }

    pub fn aspect(&self) -> f64 {
        f64::from(self.width) / f64::from(self.height)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CameraSpec {
    pub fov_deg: f64,
    pub near: f64,
    pub far: f64,
    /// Distance from the globe centre along the view axis.
    pub distance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FogSpec {
    pub color: u32,
    pub near: f64,
    pub far: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LightKind {
    Ambient,
    Directional,
    Point,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LightSpec {
    pub kind: LightKind,
    pub color: u32,
    pub intensity: f64,
    pub position: Option<[f64; 3]>,
    /// Lights attached to the camera keep their position relative to the view.
    pub follows_camera: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeStyle {
    pub hex_resolution: u8,
    pub hex_margin: f64,
    /// ISO 3166 alpha-3 codes drawn at full opacity.
    pub highlighted_countries: Vec<String>,
    pub highlight_color: String,
    pub country_color: String,
    pub atmosphere_color: String,
    pub atmosphere_altitude: f64,
    pub surface_color: u32,
    pub emissive_color: u32,
    pub emissive_intensity: f64,
    pub shininess: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Marker {
    pub at: GeoPoint,
    pub label: String,
    pub size: f64,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArcSpec {
    pub from: GeoPoint,
    pub to: GeoPoint,
    pub color: String,
    pub stroke: f64,
    pub dash_length: f64,
    pub dash_gap: f64,
    pub dash_animate_ms: u32,
    pub altitude_auto_scale: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobeScene {
    pub camera: CameraSpec,
    pub fog: FogSpec,
    pub lights: Vec<LightSpec>,
    pub style: GlobeStyle,
    pub markers: Vec<Marker>,
    pub arcs: Vec<ArcSpec>,
    /// Where auto-rotation turns the globe to.
    pub focus: GeoPoint,
}

impl Default for GlobeScene {
    fn default() -> Self {
        let white = "#ffffff".to_string();
        Self {
            camera: CameraSpec {
                fov_deg: 50.0,
                near: 0.1,
                far: 1000.0,
                distance: 280.0,
            },
            fog: FogSpec {
                color: 0x000000,
                near: 400.0,
                far: 2000.0,
            },
            lights: vec![
                LightSpec {
                    kind: LightKind::Ambient,
                    color: 0xbbbbbb,
                    intensity: 0.3,
                    position: None,
                    follows_camera: false,
                },
                LightSpec {
                    kind: LightKind::Directional,
                    color: 0xffffff,
                    intensity: 0.6,
                    position: Some([-800.0, 2000.0, 400.0]),
                    follows_camera: true,
                },
                LightSpec {
                    kind: LightKind::Directional,
                    color: 0x7982f6,
                    intensity: 0.7,
                    position: Some([-200.0, 500.0, 200.0]),
                    follows_camera: true,
                },
                LightSpec {
                    kind: LightKind::Point,
                    color: 0x8566cc,
                    intensity: 0.3,
                    position: Some([-200.0, 500.0, 200.0]),
                    follows_camera: true,
                },
            ],
            style: GlobeStyle {
                hex_resolution: 3,
                hex_margin: 0.7,
                highlighted_countries: vec!["USA".to_string(), "IND".to_string()],
                highlight_color: "rgba(255,255,255, 1)".to_string(),
                country_color: "rgba(255,255,255, 0.6)".to_string(),
                atmosphere_color: "#3a228a".to_string(),
                atmosphere_altitude: 0.15,
                surface_color: 0x3a228a,
                emissive_color: 0x220038,
                emissive_intensity: 0.05,
                shininess: 0.7,
            },
            markers: vec![
                Marker {
                    at: BOSTON,
                    label: "Boston, MA".to_string(),
                    size: 1.2,
                    color: white.clone(),
                },
                Marker {
                    at: LUCKNOW,
                    label: "Lucknow, India".to_string(),
                    size: 1.2,
                    color: white,
                },
            ],
            arcs: vec![ArcSpec {
                from: LUCKNOW,
                to: BOSTON,
                color: "rgba(255, 255, 255, 0.8)".to_string(),
                stroke: 0.5,
                dash_length: 0.6,
                dash_gap: 0.2,
                dash_animate_ms: 2000,
                altitude_auto_scale: 0.3,
            }],
            focus: BOSTON,
        }
    }
}

impl GlobeScene {
    pub fn target_orientation(&self) -> Orientation {
        Orientation::facing(self.focus)
    }

    /// Fill colour of a country's hex polygons.
    pub fn country_color(&self, iso_a3: &str) -> &str {
        if self.style.highlighted_countries.iter().any(|c| c == iso_a3) {
            &self.style.highlight_color
        } else {
            &self.style.country_color
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_viewport_rejects_zero_dimensions() {
        assert!(Viewport::new(0, 768).is_none());
        assert!(Viewport::new(1024, 0).is_none());
        let vp = Viewport::new(1024, 768).unwrap();
        assert!((vp.aspect() - 4.0 / 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_pixel_ratio_capped() {
        let vp = Viewport::new(10, 10).unwrap();
        assert_eq!(vp.with_device_pixel_ratio(3.0).pixel_ratio, 2.0);
        assert_eq!(vp.with_device_pixel_ratio(1.5).pixel_ratio, 1.5);
    }

    #[test]
    fn test_default_scene_targets_boston() {
        let scene = GlobeScene::default();
        assert_eq!(scene.target_orientation(), Orientation::facing(BOSTON));
        assert_eq!(scene.country_color("IND"), "rgba(255,255,255, 1)");
        assert_eq!(scene.country_color("FRA"), "rgba(255,255,255, 0.6)");
    }
}
