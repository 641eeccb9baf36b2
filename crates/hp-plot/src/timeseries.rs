//! Three-panel time-series figure: COP, compressor power, exchanger duties.

use std::path::Path;
use std::sync::OnceLock;

use hp_results::ResultRow;
use plotters::coord::Shift;
use plotters::prelude::*;
use tracing::info;

use crate::config::PlotConfig;
use crate::{PlotError, PlotResult};

const FONT: &str = "sans-serif";
const FONT_DATA: &[u8] = include_bytes!("../assets/DejaVuSans.ttf");

/// Register the bundled face under the family every chart element uses.
/// Both backends measure text through it; bitmaps also rasterize with it.
fn ensure_font() -> PlotResult<()> {
    static REGISTERED: OnceLock<bool> = OnceLock::new();
    let ok = *REGISTERED.get_or_init(|| {
        plotters::style::register_font(FONT, FontStyle::Normal, FONT_DATA).is_ok()
    });
    if ok {
        Ok(())
    } else {
        Err(PlotError::Font(FONT.to_string()))
    }
}

/// Series extracted from result rows, ready to draw.
#[derive(Debug, Clone, PartialEq)]
pub struct Figure {
    pub title: String,
    /// Hour of each point (the dataset row index).
    pub hours: Vec<f64>,
    pub cop: Vec<f64>,
    pub p_comp_kw: Vec<f64>,
    pub q_evap_kw: Vec<f64>,
    pub q_cond_kw: Vec<f64>,
    /// Dataset timestamp of each point, when the input carried one.
    pub timestamps: Vec<Option<String>>,
}

impl Figure {
    pub fn from_rows(rows: &[ResultRow], title: &str) -> Self {
        Self {
            title: title.to_string(),
            hours: rows.iter().map(|r| r.row_index as f64).collect(),
            cop: rows.iter().map(|r| r.cop).collect(),
            p_comp_kw: rows.iter().map(|r| r.p_comp_kw).collect(),
            q_evap_kw: rows.iter().map(|r| r.q_evap_kw).collect(),
            q_cond_kw: rows.iter().map(|r| r.q_cond_kw).collect(),
            timestamps: rows.iter().map(|r| r.timestamp.clone()).collect(),
        }
    }

    fn has_timestamps(&self) -> bool {
        self.timestamps.iter().any(Option::is_some)
    }

    /// Tick label for `x`: the timestamp of the point sitting on that tick,
    /// blank between points.
    fn timestamp_label(&self, x: f64) -> String {
        self.hours
            .iter()
            .zip(&self.timestamps)
            .find(|(hour, _)| (**hour - x).abs() < 1e-6)
            .and_then(|(_, ts)| ts.clone())
            .unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.hours.is_empty()
    }
}

struct Series<'a> {
    name: &'a str,
    values: &'a [f64],
    color: RGBColor,
}

#[derive(Debug, Default)]
pub struct HeatPumpVisualizer {
    config: PlotConfig,
    figure: Option<Figure>,
}

impl HeatPumpVisualizer {
    pub fn new(config: PlotConfig) -> Self {
        Self {
            config,
            figure: None,
        }
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    /// The last prepared figure.
    pub fn figure(&self) -> Option<&Figure> {
        self.figure.as_ref()
    }

    /// Prepare the figure for `rows`. An empty title falls back to the
    /// configured one. Rendering happens in [`save`](Self::save).
    pub fn plot_timeseries(&mut self, rows: &[ResultRow], title: &str) -> &Figure {
        let title = if title.is_empty() {
            self.config.title.as_str()
        } else {
            title
        };
        self.figure.insert(Figure::from_rows(rows, title))
    }

    /// Render the prepared figure to `path`: SVG for `.svg`, bitmap otherwise.
    pub fn save(&self, path: &Path) -> PlotResult<()> {
        let figure = self.figure.as_ref().ok_or(PlotError::NothingPrepared)?;
        self.config.validate()?;
        ensure_font()?;
        let size = (self.config.width, self.config.height);

        let is_svg = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case("svg"));
        if is_svg {
            render(SVGBackend::new(path, size).into_drawing_area(), figure, &self.config)?;
        } else {
            render(
                BitMapBackend::new(path, size).into_drawing_area(),
                figure,
                &self.config,
            )?;
        }
        info!(path = %path.display(), points = figure.hours.len(), "chart saved");
        Ok(())
    }

    /// Render the prepared figure as an SVG document in memory.
    pub fn to_svg_string(&self) -> PlotResult<String> {
        let figure = self.figure.as_ref().ok_or(PlotError::NothingPrepared)?;
        self.config.validate()?;
        ensure_font()?;
        let mut buffer = String::new();
        {
            let root = SVGBackend::with_string(&mut buffer, (self.config.width, self.config.height))
                .into_drawing_area();
            render(root, figure, &self.config)?;
        }
        Ok(buffer)
    }
}

fn backend_error<E: std::fmt::Display>(e: E) -> PlotError {
    PlotError::Backend(e.to_string())
}

fn render<DB>(root: DrawingArea<DB, Shift>, figure: &Figure, config: &PlotConfig) -> PlotResult<()>
where
    DB: DrawingBackend,
{
    root.fill(&WHITE).map_err(backend_error)?;
    let body = root
        .titled(&figure.title, (FONT, config.title_font_size))
        .map_err(backend_error)?;
    let panels = body.split_evenly((3, 1));

    draw_panel(
        &panels[0],
        "Coefficient of performance",
        "COP [-]",
        figure,
        &[Series {
            name: "COP",
            values: &figure.cop,
            color: config.cop_color,
        }],
    )?;
    draw_panel(
        &panels[1],
        "Compressor power",
        "P [kW]",
        figure,
        &[Series {
            name: "P_comp",
            values: &figure.p_comp_kw,
            color: config.power_color,
        }],
    )?;
    draw_panel(
        &panels[2],
        "Heat exchanger duties",
        "Q [kW]",
        figure,
        &[
            Series {
                name: "Q_evap",
                values: &figure.q_evap_kw,
                color: config.q_evap_color,
            },
            Series {
                name: "Q_cond",
                values: &figure.q_cond_kw,
                color: config.q_cond_color,
            },
        ],
    )?;

    root.present().map_err(backend_error)?;
    Ok(())
}

fn draw_panel<DB>(
    area: &DrawingArea<DB, Shift>,
    caption: &str,
    y_desc: &str,
    figure: &Figure,
    series: &[Series<'_>],
) -> PlotResult<()>
where
    DB: DrawingBackend,
{
    let hours = &figure.hours;
    if hours.is_empty() {
        let style = TextStyle::from((FONT, 18.0).into_font());
        area.draw_text(&format!("{caption}: no data"), &style, (20, 20))
            .map_err(backend_error)?;
        return Ok(());
    }

    let (x_min, x_max) = padded_range(hours.iter().copied());
    let (y_min, y_max) = padded_range(series.iter().flat_map(|s| s.values.iter().copied()));

    let mut chart = ChartBuilder::on(area)
        .caption(caption, (FONT, 18.0))
        .margin(10)
        .x_label_area_size(30)
        .y_label_area_size(60)
        .build_cartesian_2d(x_min..x_max, y_min..y_max)
        .map_err(backend_error)?;
    let timestamp_label = |x: &f64| figure.timestamp_label(*x);
    let mut mesh = chart.configure_mesh();
    mesh.y_desc(y_desc);
    if figure.has_timestamps() {
        mesh.x_desc("time").x_label_formatter(&timestamp_label);
    } else {
        mesh.x_desc("hour");
    }
    mesh.draw().map_err(backend_error)?;

    for s in series {
        let color = s.color;
        let points = hours
            .iter()
            .copied()
            .zip(s.values.iter().copied())
            .filter(|(_, y)| y.is_finite());
        chart
            .draw_series(LineSeries::new(points, color.stroke_width(2)))
            .map_err(backend_error)?
            .label(s.name)
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], color));
    }

    if series.len() > 1 {
        chart
            .configure_series_labels()
            .background_style(WHITE.mix(0.8))
            .border_style(BLACK)
            .draw()
            .map_err(backend_error)?;
    }
    Ok(())
}

/// Axis range over the finite values, never empty.
fn padded_range(values: impl Iterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
            (lo.min(v), hi.max(v))
        });
    if !min.is_finite() {
        return (0.0, 1.0);
    }
    let span = max - min;
    let pad = if span > 0.0 {
        0.05 * span
    } else {
        (0.05 * min.abs()).max(0.5)
    };
    (min - pad, max + pad)
}
