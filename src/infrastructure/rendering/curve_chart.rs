use gloo::utils::document;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

use crate::domain::{
    errors::{AppError, AppResult},
    gadgets::{ChartPlugin, ChartWidget, SeriesSet},
    logging::LogComponent,
};
use crate::log_trace;

const PADDING: f64 = 24.0;
const BACKGROUND: &str = "#1a1a1a";
const PALETTE: [&str; 4] = ["#4fc3f7", "#ffb74d", "#81c784", "#e57373"];

/// Maps data space onto the padded canvas. Degenerate ranges are widened by
/// one unit so flat curves still draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlotScale {
    pub min_x: f64,
    pub max_x: f64,
    pub min_y: f64,
    pub max_y: f64,
    pub width: f64,
    pub height: f64,
    pub padding: f64,
}

impl PlotScale {
    pub fn fit(points: impl IntoIterator<Item = (f64, f64)>, width: f64, height: f64, padding: f64) -> Option<Self> {
        let mut bounds: Option<(f64, f64, f64, f64)> = None;
        for (x, y) in points.into_iter().filter(|(x, y)| x.is_finite() && y.is_finite()) {
            bounds = Some(match bounds {
                None => (x, x, y, y),
                Some((min_x, max_x, min_y, max_y)) => (min_x.min(x), max_x.max(x), min_y.min(y), max_y.max(y)),
            });
        }
        let (mut min_x, mut max_x, mut min_y, mut max_y) = bounds?;
        if max_x == min_x {
            min_x -= 0.5;
            max_x += 0.5;
        }
        if max_y == min_y {
            min_y -= 0.5;
            max_y += 0.5;
        }
        Some(Self { min_x, max_x, min_y, max_y, width, height, padding })
    }

    /// Canvas coordinates of a data point (y grows downwards).
    pub fn project(&self, (x, y): (f64, f64)) -> (f64, f64) {
        let plot_w = (self.width - 2.0 * self.padding).max(1.0);
        let plot_h = (self.height - 2.0 * self.padding).max(1.0);
        let px = self.padding + (x - self.min_x) / (self.max_x - self.min_x) * plot_w;
        let py = self.height - self.padding - (y - self.min_y) / (self.max_y - self.min_y) * plot_h;
        (px, py)
    }
}

/// Canvas 2D curve plugin - Infrastructure implementation
#[derive(Debug, Default, Clone)]
pub struct CanvasCurvePlugin;

impl CanvasCurvePlugin {
    pub fn new() -> Self {
        Self
    }
}

impl ChartPlugin for CanvasCurvePlugin {
    fn mount(&self, selector: &str, data: &SeriesSet) -> AppResult<Box<dyn ChartWidget>> {
        let document = document();
        let host = document
            .query_selector(selector)
            .ok()
            .flatten()
            .ok_or_else(|| AppError::RenderingError(format!("no chart host for {selector}")))?;

        let canvas = document
            .create_element("canvas")
            .map_err(|e| AppError::RenderingError(format!("create canvas: {e:?}")))?
            .dyn_into::<HtmlCanvasElement>()
            .map_err(|_| AppError::RenderingError("Failed to get canvas element".to_string()))?;

        let width = host.client_width().max(1) as u32;
        let height = host.client_height().max(1) as u32;
        canvas.set_width(width);
        canvas.set_height(height);

        // перерисовываем хост целиком
        host.set_inner_html("");
        host.append_child(&canvas)
            .map_err(|e| AppError::RenderingError(format!("attach canvas: {e:?}")))?;

        let context = canvas
            .get_context("2d")
            .map_err(|_| AppError::RenderingError("Failed to get 2D context".to_string()))?
            .ok_or_else(|| AppError::RenderingError("2D context unavailable".to_string()))?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| AppError::RenderingError("Failed to cast to 2D context".to_string()))?;

        let mut widget = CanvasCurveWidget { context, width: width as f64, height: height as f64 };
        widget.draw(data)?;
        Ok(Box::new(widget))
    }
}

pub struct CanvasCurveWidget {
    context: CanvasRenderingContext2d,
    width: f64,
    height: f64,
}

impl CanvasCurveWidget {
    fn draw(&mut self, data: &SeriesSet) -> AppResult<()> {
        let ctx = &self.context;
        ctx.clear_rect(0.0, 0.0, self.width, self.height);
        ctx.set_fill_style(&JsValue::from_str(BACKGROUND));
        ctx.fill_rect(0.0, 0.0, self.width, self.height);

        let series: Vec<Vec<(f64, f64)>> = data.iter().map(|s| s.points()).collect();
        let Some(scale) = PlotScale::fit(series.iter().flatten().copied(), self.width, self.height, PADDING) else {
            ctx.set_fill_style(&JsValue::from_str("#888888"));
            ctx.set_font("12px sans-serif");
            return ctx
                .fill_text("No data", PADDING, self.height / 2.0)
                .map_err(|e| AppError::RenderingError(format!("fill text: {e:?}")));
        };

        for (i, points) in series.iter().enumerate() {
            if points.is_empty() {
                continue;
            }
            ctx.set_stroke_style(&JsValue::from_str(PALETTE[i % PALETTE.len()]));
            ctx.set_line_width(1.5);
            ctx.begin_path();
            for (n, point) in points.iter().enumerate() {
                let (x, y) = scale.project(*point);
                if n == 0 { ctx.move_to(x, y) } else { ctx.line_to(x, y) }
            }
            ctx.stroke();
        }

        log_trace!(LogComponent::Infrastructure("CurveChart"), "drew {} series", series.len());
        Ok(())
    }
}

impl ChartWidget for CanvasCurveWidget {
    fn update(&mut self, data: &SeriesSet) -> AppResult<()> {
        self.draw(data)
    }
}
