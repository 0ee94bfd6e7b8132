pub mod forecast;
pub mod icons;
pub mod layout;
pub mod locale;
pub mod series;
pub mod units;
pub mod windowing;

pub use forecast::{ForecastRecord, Granularity, WindBearing, is_chronological};
pub use icons::{
    bearing_icon, bearing_icon_index, cardinal_index, condition_image_day, condition_image_night,
    condition_material_icon,
};
pub use layout::{ColumnWidthPolicy, LayoutMetrics, ROW_MARGIN_PX};
pub use locale::{CardLocale, Language, RelativeAge, Translations, is_midnight, unit_label};
pub use series::{
    ForecastSeries, PrecipitationMode, SeriesOptions, build_forecast_series, round_half_up,
};
pub use units::{PressureUnit, SpeedUnit, convert_pressure, convert_speed};
pub use windowing::{autoscroll_cutoff, next_hour_boundary, stale_prefix_len};
