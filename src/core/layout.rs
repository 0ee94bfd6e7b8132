use serde::{Deserialize, Serialize};

use crate::core::Granularity;

/// Horizontal space taken by the margins around the condition and wind rows.
pub const ROW_MARGIN_PX: f64 = 10.0;

const HOURLY_DATE_MIN_WIDTH_PX: f64 = 70.0;
const ICON_WITH_WIND_UNIT_WIDTH_PX: f64 = 48.0;
const ICON_ONLY_WIDTH_PX: f64 = 26.0;

/// Inputs that determine how narrow a forecast column may get.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColumnWidthPolicy {
    pub labels_font_size: f64,
    pub show_wind_forecast: bool,
    pub show_wind_unit: bool,
    pub show_precip_unit: bool,
    pub granularity: Granularity,
    pub show_hourly_date: bool,
    /// Manual override; ignored unless positive.
    pub override_min_width: f64,
}

impl ColumnWidthPolicy {
    #[must_use]
    pub fn column_min_width(self) -> f64 {
        if self.override_min_width > 0.0 {
            return self.override_min_width;
        }

        let icon_and_wind = if self.show_wind_forecast && self.show_wind_unit {
            ICON_WITH_WIND_UNIT_WIDTH_PX
        } else {
            ICON_ONLY_WIDTH_PX
        };
        let chart_labels = if self.show_precip_unit {
            self.labels_font_size * 5.0
        } else {
            self.labels_font_size * 3.5
        };

        let width = chart_labels.max(icon_and_wind);
        if self.granularity.is_hourly() && self.show_hourly_date {
            // The midnight date line needs room in most locales.
            width.max(HOURLY_DATE_MIN_WIDTH_PX)
        } else {
            width
        }
    }
}

/// Layout derived from the container width and the column policy.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LayoutMetrics {
    pub column_min_width: f64,
    pub visible_item_count: usize,
}

impl LayoutMetrics {
    /// Measures how many forecast columns fit.
    ///
    /// A positive `configured_count` wins over the measured value.
    #[must_use]
    pub fn measure(container_width: f64, column_min_width: f64, configured_count: usize) -> Self {
        let visible_item_count = if configured_count > 0 {
            configured_count
        } else if column_min_width > 0.0 && container_width.is_finite() {
            let fit = ((container_width - ROW_MARGIN_PX) / column_min_width).floor();
            if fit > 0.0 { fit as usize } else { 0 }
        } else {
            0
        };

        Self {
            column_min_width,
            visible_item_count,
        }
    }

    /// Minimum chart width forcing horizontal scroll when columns overflow.
    #[must_use]
    pub fn chart_min_width(self, record_count: usize) -> f64 {
        self.visible_item_count.min(record_count) as f64 * self.column_min_width
    }

    /// Minimum width of the condition and wind rows for `shown` columns.
    #[must_use]
    pub fn row_min_width(self, shown: usize) -> f64 {
        shown as f64 * self.column_min_width - ROW_MARGIN_PX
    }
}
