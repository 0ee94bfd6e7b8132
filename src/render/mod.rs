mod labels;
mod null_renderer;
mod spec;
mod surface;

pub use labels::{PrecipLabelFormat, TickFormat, TickLabel, TooltipFormat};
pub use null_renderer::{NullChartRenderer, RendererCall};
pub use spec::{
    AxisSpec, ChartSpec, DatasetKind, DatasetSpec, LINE_STYLE, LabelFrame, LineStyle,
    PointLabelPlacement, PointLabels, SeriesField, TimeAxisSpec, ValueAxisId, ValueLabelStyle,
};
pub use surface::{CanvasId, ChartSurface, HeadlessSurface, StyleTokens, TextDirection};

use crate::core::ForecastSeries;
use crate::error::CardResult;

/// Identifier of a live chart object owned by a renderer backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ChartId(pub u64);

/// Contract implemented by any chart backend.
///
/// Backends receive a fully materialized `ChartSpec` on creation and only the
/// series on update, so the card never touches backend internals.
pub trait ChartRenderer {
    fn create_chart(&mut self, canvas: CanvasId, spec: &ChartSpec) -> CardResult<ChartId>;

    /// Swaps labels and dataset values on a live chart and redraws it in place.
    fn update_chart(&mut self, chart: ChartId, series: &ForecastSeries) -> CardResult<()>;

    /// Releases the chart and its canvas binding.
    fn destroy_chart(&mut self, chart: ChartId);
}
