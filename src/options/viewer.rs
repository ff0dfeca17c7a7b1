use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Highlight", inline)]
#[serde(default)]
/// Sphere marker drawn on the selected residue.
pub struct HighlightOptions {
    /// RGB marker color.
    #[schemars(skip)]
    pub color: [f32; 3],
    /// Sphere radius in Ångström.
    #[schemars(title = "Radius", range(min = 0.5, max = 5.0), extend("step" = 0.1))]
    pub radius: f32,
    /// Marker opacity.
    #[schemars(title = "Opacity", range(min = 0.0, max = 1.0), extend("step" = 0.05))]
    pub opacity: f32,
}

impl Default for HighlightOptions {
    fn default() -> Self {
        Self {
            color: [1.0, 0.84, 0.0],
            radius: 1.5,
            opacity: 0.8,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, JsonSchema)]
#[schemars(title = "Viewer", inline)]
#[serde(default)]
/// Viewer appearance and interaction settings.
pub struct ViewerOptions {
    /// RGB background color.
    #[schemars(skip)]
    pub background_color: [f32; 3],
    /// Selected-residue marker.
    pub highlight: HighlightOptions,
    /// Color cartoon elements by per-residue confidence instead of by
    /// secondary structure.
    #[schemars(title = "Confidence Coloring")]
    pub confidence_coloring: bool,
}

impl Default for ViewerOptions {
    fn default() -> Self {
        Self {
            background_color: [1.0, 1.0, 1.0],
            highlight: HighlightOptions::default(),
            confidence_coloring: true,
        }
    }
}
