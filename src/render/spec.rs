use crate::core::ForecastSeries;
use crate::render::{PrecipLabelFormat, TickFormat, TooltipFormat};

/// Which series a dataset draws.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SeriesField {
    TempHigh,
    TempLow,
    Precipitation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DatasetKind {
    Line,
    Bar,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ValueAxisId {
    Temperature,
    Precipitation,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PointLabelPlacement {
    /// Centered on the point.
    Center,
    Above,
    Below,
    /// Anchored at the bar base, drawn upwards.
    BarBase,
}

/// Frame drawn around a temperature label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LabelFrame {
    /// Card-background box bordered in the dataset color, styled by `ValueLabelStyle`.
    Boxed,
    /// Bare text riding on the line.
    Pill,
}

/// Labels attached directly to data points.
#[derive(Debug, Clone, PartialEq)]
pub enum PointLabels {
    Precipitation(PrecipLabelFormat),
    Temperature {
        placement: PointLabelPlacement,
        frame: LabelFrame,
        color: String,
        font_size: f64,
    },
}

impl PointLabels {
    #[must_use]
    pub fn placement(&self) -> PointLabelPlacement {
        match self {
            Self::Precipitation(_) => PointLabelPlacement::BarBase,
            Self::Temperature { placement, .. } => *placement,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct DatasetSpec {
    pub label: String,
    pub kind: DatasetKind,
    pub field: SeriesField,
    pub axis: ValueAxisId,
    pub color: String,
    pub bar_percentage: Option<f64>,
    pub category_percentage: Option<f64>,
    pub point_labels: Option<PointLabels>,
}

impl DatasetSpec {
    /// Values this dataset draws from `series`.
    #[must_use]
    pub fn values(&self, series: &ForecastSeries) -> Vec<Option<f64>> {
        match self.field {
            SeriesField::TempHigh => series.temp_high.iter().copied().map(Some).collect(),
            SeriesField::TempLow => series.temp_low.iter().copied().map(Some).collect(),
            SeriesField::Precipitation => series.precip.clone(),
        }
    }

    /// Point label text at `index`, if this dataset shows one there.
    #[must_use]
    pub fn point_label(&self, series: &ForecastSeries, index: usize) -> Option<String> {
        let value = self.values(series).get(index).copied().flatten();
        match self.point_labels.as_ref()? {
            PointLabels::Precipitation(format) => format.format(
                value,
                series.precip_probability.get(index).copied().flatten(),
            ),
            PointLabels::Temperature { .. } => value.map(|value| format!("{value}°")),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TimeAxisSpec {
    pub tick_format: TickFormat,
    pub tick_color: String,
    pub tick_padding: f64,
    pub grid_color: String,
    /// Flipped for right-to-left documents.
    pub reverse: bool,
}

/// Value axis bounds the backend may widen but should include.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct AxisSpec {
    pub suggested_min: Option<f64>,
    pub suggested_max: Option<f64>,
}

/// Shared look of point labels.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueLabelStyle {
    pub background_color: String,
    pub text_color: String,
    pub font_size: f64,
    pub padding: f64,
    pub border_width: f64,
    pub border_radius: f64,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LineStyle {
    pub tension: f64,
    pub border_width: f64,
    pub point_radius: f64,
    pub point_hit_radius: f64,
    pub fill: bool,
}

pub const LINE_STYLE: LineStyle = LineStyle {
    tension: 0.3,
    border_width: 1.5,
    point_radius: 2.0,
    point_hit_radius: 10.0,
    fill: false,
};

/// Complete description of a forecast chart.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartSpec {
    pub series: ForecastSeries,
    pub datasets: Vec<DatasetSpec>,
    pub time_axis: TimeAxisSpec,
    pub temperature_axis: AxisSpec,
    pub precipitation_axis: AxisSpec,
    pub value_labels: ValueLabelStyle,
    pub tooltip: TooltipFormat,
    pub line_style: LineStyle,
    /// `Some(0)` disables animation.
    pub animation_duration_ms: Option<u32>,
    pub bottom_padding: f64,
}

impl ChartSpec {
    #[must_use]
    pub fn dataset(&self, field: SeriesField) -> Option<&DatasetSpec> {
        self.datasets.iter().find(|dataset| dataset.field == field)
    }
}
