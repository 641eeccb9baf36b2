//! Figure size, title and series colours.

use plotters::style::RGBColor;

use crate::{PlotError, PlotResult};

#[derive(Debug, Clone, PartialEq)]
pub struct PlotConfig {
    /// Output width in pixels.
    pub width: u32,
    /// Output height in pixels.
    pub height: u32,
    /// Title used when `plot_timeseries` is given an empty one.
    pub title: String,
    pub title_font_size: f64,
    pub cop_color: RGBColor,
    pub power_color: RGBColor,
    pub q_evap_color: RGBColor,
    pub q_cond_color: RGBColor,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 900,
            title: "Heat pump time series".to_string(),
            title_font_size: 24.0,
            cop_color: RGBColor(31, 119, 180),
            power_color: RGBColor(214, 39, 40),
            q_evap_color: RGBColor(44, 160, 44),
            q_cond_color: RGBColor(255, 127, 14),
        }
    }
}

impl PlotConfig {
    pub fn with_size(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub(crate) fn validate(&self) -> PlotResult<()> {
        // Three stacked panels need some room each.
        if self.width < 200 || self.height < 300 {
            return Err(PlotError::InvalidConfig(format!(
                "figure size {}x{} is too small",
                self.width, self.height
            )));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_valid() {
        assert!(PlotConfig::default().validate().is_ok());
    }

    #[test]
    fn tiny_figure_rejected() {
        let config = PlotConfig::default().with_size(100, 100);
        assert!(matches!(
            config.validate(),
            Err(PlotError::InvalidConfig(_))
        ));
    }
}
