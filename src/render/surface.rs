use serde::{Deserialize, Serialize};

/// Identifier of the canvas element the chart draws into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CanvasId(pub u64);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum TextDirection {
    #[default]
    Ltr,
    Rtl,
}

/// Theme colors read from the host document when the chart is rebuilt.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StyleTokens {
    pub card_background_color: String,
    pub primary_text_color: String,
    pub divider_color: String,
}

impl Default for StyleTokens {
    fn default() -> Self {
        Self {
            card_background_color: "#ffffff".to_owned(),
            primary_text_color: "#212121".to_owned(),
            divider_color: "rgba(0, 0, 0, 0.12)".to_owned(),
        }
    }
}

/// The mounted markup around the chart, as seen by the card.
pub trait ChartSurface {
    /// Canvas to bind to, or `None` while it is not mounted yet.
    fn forecast_canvas(&self) -> Option<CanvasId>;

    /// Forces horizontal scrolling when the columns need more room.
    fn set_chart_min_width(&mut self, min_width_px: f64);

    fn style_tokens(&self) -> StyleTokens;

    fn text_direction(&self) -> TextDirection;
}

/// In-memory surface for tests and headless hosts.
#[derive(Debug, Clone, Default)]
pub struct HeadlessSurface {
    pub canvas: Option<CanvasId>,
    pub chart_min_width: Option<f64>,
    pub style: StyleTokens,
    pub direction: TextDirection,
}

impl HeadlessSurface {
    #[must_use]
    pub fn mounted(canvas: CanvasId) -> Self {
        Self {
            canvas: Some(canvas),
            ..Self::default()
        }
    }
}

impl ChartSurface for HeadlessSurface {
    fn forecast_canvas(&self) -> Option<CanvasId> {
        self.canvas
    }

    fn set_chart_min_width(&mut self, min_width_px: f64) {
        self.chart_min_width = Some(min_width_px);
    }

    fn style_tokens(&self) -> StyleTokens {
        self.style.clone()
    }

    fn text_direction(&self) -> TextDirection {
        self.direction
    }
}
