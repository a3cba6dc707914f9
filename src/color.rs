use palette::{Hsl, IntoColor, Srgb};
use plotters::style::RGBColor;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<RGBColor> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.45);
            let rgb: Srgb = hsl.into_color();
            RGBColor(
                (rgb.red * 255.0) as u8,
                (rgb.green * 255.0) as u8,
                (rgb.blue * 255.0) as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Color mapping: series label → RGBColor
// ---------------------------------------------------------------------------

/// Maps the hue values of a grouped chart to distinct colours.
#[derive(Debug, Clone)]
pub struct ColorMap {
    mapping: Vec<(String, RGBColor)>,
    default_color: RGBColor,
}

impl ColorMap {
    /// Build a colour map for a list of series labels, in the order they
    /// will be drawn and shown in the legend.
    pub fn new(labels: &[String]) -> Self {
        let palette = generate_palette(labels.len());
        let mapping = labels
            .iter()
            .cloned()
            .zip(palette)
            .collect();

        ColorMap {
            mapping,
            default_color: RGBColor(128, 128, 128),
        }
    }

    /// Look up the colour for a series label.
    pub fn color_for(&self, label: &str) -> RGBColor {
        self.mapping
            .iter()
            .find(|(l, _)| l == label)
            .map(|(_, c)| *c)
            .unwrap_or(self.default_color)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_distinct_entries() {
        let colors = generate_palette(4);
        assert_eq!(colors.len(), 4);
        for i in 0..colors.len() {
            for j in (i + 1)..colors.len() {
                assert_ne!(
                    (colors[i].0, colors[i].1, colors[i].2),
                    (colors[j].0, colors[j].1, colors[j].2)
                );
            }
        }
    }

    #[test]
    fn unknown_label_falls_back_to_gray() {
        let map = ColorMap::new(&["X".to_string()]);
        assert_eq!(map.color_for("Y"), RGBColor(128, 128, 128));
    }
}
