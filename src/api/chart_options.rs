use chrono::FixedOffset;

use crate::core::{CardLocale, ForecastSeries, Granularity, PrecipitationMode, unit_label};
use crate::host::EntitySnapshot;
use crate::render::{
    AxisSpec, ChartSpec, DatasetKind, DatasetSpec, LINE_STYLE, LabelFrame, PointLabelPlacement,
    PointLabels, PrecipLabelFormat, SeriesField, StyleTokens, TextDirection, TickFormat,
    TimeAxisSpec, TooltipFormat, ValueAxisId, ValueLabelStyle,
};

use super::{CardConfig, ChartStyle};

const TEMPERATURE_HEADROOM_BELOW: f64 = 5.0;
const TEMPERATURE_HEADROOM_ABOVE: f64 = 3.0;
const VALUE_LABEL_BORDER_WIDTH: f64 = 1.5;
const CHART_BOTTOM_PADDING: f64 = 10.0;

/// Everything a rebuild reads besides the series itself.
#[derive(Debug, Clone, Copy)]
pub struct ChartInputs<'a> {
    pub config: &'a CardConfig,
    pub weather: &'a EntitySnapshot,
    pub style: &'a StyleTokens,
    pub direction: TextDirection,
    pub locale: CardLocale,
    pub timezone: FixedOffset,
}

/// Fixed top of the precipitation axis.
#[must_use]
pub fn precipitation_ceiling(
    mode: PrecipitationMode,
    granularity: Granularity,
    unit: Option<&str>,
) -> f64 {
    if mode == PrecipitationMode::Probability {
        return 100.0;
    }
    match (granularity, unit) {
        (Granularity::Hourly, Some("mm")) => 4.0,
        (Granularity::Hourly, Some("cm")) => 0.4,
        (Granularity::Hourly, _) => 0.2,
        (Granularity::Daily, Some("mm")) => 20.0,
        (Granularity::Daily, Some("cm")) => 2.0,
        (Granularity::Daily, _) => 1.0,
    }
}

/// Builds the full chart description for a rebuild.
#[must_use]
pub fn build_chart_spec(inputs: &ChartInputs<'_>, series: ForecastSeries) -> ChartSpec {
    let forecast = &inputs.config.forecast;
    let translations = inputs.locale.translations();
    let text_color = &inputs.style.primary_text_color;

    let raw_precip_unit = inputs.weather.attribute_str("precipitation_unit");
    let precip_unit = match forecast.precipitation_type {
        PrecipitationMode::Probability => "%".to_owned(),
        PrecipitationMode::Rainfall => unit_label(raw_precip_unit.unwrap_or_default()).to_owned(),
    };
    let temperature_unit = inputs
        .weather
        .attribute_str("temperature_unit")
        .unwrap_or_default()
        .to_owned();

    // `auto` means the theme text color; unset lets each dataset use its own color.
    let chart_text_color = forecast.chart_text_color.as_deref().map(|color| {
        if color == "auto" {
            text_color.clone()
        } else {
            color.to_owned()
        }
    });

    let compact_labels = forecast.precipitation_type == PrecipitationMode::Rainfall
        && forecast.show_probability
        && !forecast.forecast_type.is_hourly();

    // style1 boxes every label; style2 floats bare pills above and below the lines.
    let temperature_labels = |pill_placement: PointLabelPlacement, dataset_color: &str| {
        let labels = match forecast.style {
            ChartStyle::Style1 => PointLabels::Temperature {
                placement: PointLabelPlacement::Center,
                frame: LabelFrame::Boxed,
                color: chart_text_color.clone().unwrap_or_else(|| text_color.clone()),
                font_size: forecast.labels_font_size,
            },
            ChartStyle::Style2 => PointLabels::Temperature {
                placement: pill_placement,
                frame: LabelFrame::Pill,
                color: chart_text_color
                    .clone()
                    .unwrap_or_else(|| dataset_color.to_owned()),
                font_size: forecast.labels_font_size.trunc() + 1.0,
            },
        };
        Some(labels)
    };

    let datasets = vec![
        DatasetSpec {
            label: translations.temp_hi.to_owned(),
            kind: DatasetKind::Line,
            field: SeriesField::TempHigh,
            axis: ValueAxisId::Temperature,
            color: forecast.temperature1_color.clone(),
            bar_percentage: None,
            category_percentage: None,
            point_labels: temperature_labels(PointLabelPlacement::Above, &forecast.temperature1_color),
        },
        DatasetSpec {
            label: translations.temp_lo.to_owned(),
            kind: DatasetKind::Line,
            field: SeriesField::TempLow,
            axis: ValueAxisId::Temperature,
            color: forecast.temperature2_color.clone(),
            bar_percentage: None,
            category_percentage: None,
            point_labels: temperature_labels(PointLabelPlacement::Below, &forecast.temperature2_color),
        },
        DatasetSpec {
            label: translations.precip.to_owned(),
            kind: DatasetKind::Bar,
            field: SeriesField::Precipitation,
            axis: ValueAxisId::Precipitation,
            color: forecast.precipitation_color.clone(),
            bar_percentage: Some(forecast.precip_bar_size / 100.0),
            category_percentage: Some(1.0),
            point_labels: Some(PointLabels::Precipitation(PrecipLabelFormat {
                mode: forecast.precipitation_type,
                unit: precip_unit.clone(),
                show_unit: forecast.show_precip_unit,
                show_probability: forecast.show_probability,
            })),
        },
    ];

    let temperature_axis = series
        .temperature_range()
        .map(|(min, max)| AxisSpec {
            suggested_min: Some(min - TEMPERATURE_HEADROOM_BELOW),
            suggested_max: Some(max + TEMPERATURE_HEADROOM_ABOVE),
        })
        .unwrap_or_default();

    ChartSpec {
        series,
        datasets,
        time_axis: TimeAxisSpec {
            tick_format: TickFormat {
                granularity: forecast.forecast_type,
                locale: inputs.locale,
                show_hourly_date: forecast.show_hourly_date,
                timezone: inputs.timezone,
            },
            tick_color: forecast
                .chart_datetime_color
                .clone()
                .unwrap_or_else(|| text_color.clone()),
            tick_padding: if compact_labels { 4.0 } else { 10.0 },
            grid_color: inputs.style.divider_color.clone(),
            reverse: inputs.direction == TextDirection::Rtl,
        },
        temperature_axis,
        precipitation_axis: AxisSpec {
            suggested_min: None,
            suggested_max: Some(precipitation_ceiling(
                forecast.precipitation_type,
                forecast.forecast_type,
                raw_precip_unit,
            )),
        },
        value_labels: ValueLabelStyle {
            background_color: inputs.style.card_background_color.clone(),
            text_color: chart_text_color.unwrap_or_else(|| text_color.clone()),
            font_size: forecast.labels_font_size,
            padding: if compact_labels { 3.0 } else { 4.0 },
            border_width: VALUE_LABEL_BORDER_WIDTH,
            border_radius: 0.0,
        },
        tooltip: TooltipFormat {
            locale: inputs.locale,
            timezone: inputs.timezone,
            temperature_unit,
            precip_unit,
            mode: forecast.precipitation_type,
            show_probability: forecast.show_probability,
        },
        line_style: LINE_STYLE,
        animation_duration_ms: forecast.disable_animation.then_some(0),
        bottom_padding: CHART_BOTTOM_PADDING,
    }
}
