//! Speed and pressure conversion over the unit keys used by weather entities.
//!
//! Conversions are total over the supported keys. An unrecognized key has no
//! conversion factor and yields `NaN`, which propagates through the arithmetic
//! instead of being coerced to a number. Callers guard unit keys upstream.

/// Speed units understood by [`convert_speed`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SpeedUnit {
    MetersPerSecond,
    KilometersPerHour,
    FeetPerSecond,
    MilesPerHour,
    Knots,
    Beaufort,
}

impl SpeedUnit {
    pub const ALL: [Self; 6] = [
        Self::MetersPerSecond,
        Self::KilometersPerHour,
        Self::FeetPerSecond,
        Self::MilesPerHour,
        Self::Knots,
        Self::Beaufort,
    ];

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "m/s" => Some(Self::MetersPerSecond),
            "km/h" => Some(Self::KilometersPerHour),
            "ft/s" => Some(Self::FeetPerSecond),
            "mph" => Some(Self::MilesPerHour),
            "kn" => Some(Self::Knots),
            "Bft" | "Beaufort" => Some(Self::Beaufort),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::MetersPerSecond => "m/s",
            Self::KilometersPerHour => "km/h",
            Self::FeetPerSecond => "ft/s",
            Self::MilesPerHour => "mph",
            Self::Knots => "kn",
            Self::Beaufort => "Bft",
        }
    }

    /// Multiplier to meters/second. Beaufort is nonlinear and has none.
    const fn mps_factor(self) -> Option<f64> {
        match self {
            Self::MetersPerSecond => Some(1.0),
            Self::KilometersPerHour => Some(0.277778),
            Self::FeetPerSecond => Some(0.3048),
            Self::MilesPerHour => Some(0.44704),
            Self::Knots => Some(0.514444),
            Self::Beaufort => None,
        }
    }

    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        convert_speed_units(value, Some(self), Some(to))
    }
}

/// Pressure units understood by [`convert_pressure`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PressureUnit {
    Hectopascal,
    Kilopascal,
    Pascal,
    Millipascal,
    Bar,
    Centibar,
    Millibar,
    MillimeterMercury,
    InchMercury,
}

impl PressureUnit {
    pub const ALL: [Self; 9] = [
        Self::Hectopascal,
        Self::Kilopascal,
        Self::Pascal,
        Self::Millipascal,
        Self::Bar,
        Self::Centibar,
        Self::Millibar,
        Self::MillimeterMercury,
        Self::InchMercury,
    ];

    #[must_use]
    pub fn from_key(key: &str) -> Option<Self> {
        match key {
            "hPa" => Some(Self::Hectopascal),
            "kPa" => Some(Self::Kilopascal),
            "Pa" => Some(Self::Pascal),
            "mPa" => Some(Self::Millipascal),
            "bar" => Some(Self::Bar),
            "cbar" => Some(Self::Centibar),
            "mbar" => Some(Self::Millibar),
            "mmHg" => Some(Self::MillimeterMercury),
            "inHg" => Some(Self::InchMercury),
            _ => None,
        }
    }

    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Hectopascal => "hPa",
            Self::Kilopascal => "kPa",
            Self::Pascal => "Pa",
            Self::Millipascal => "mPa",
            Self::Bar => "bar",
            Self::Centibar => "cbar",
            Self::Millibar => "mbar",
            Self::MillimeterMercury => "mmHg",
            Self::InchMercury => "inHg",
        }
    }

    /// Multiplier to hectopascals.
    const fn hpa_factor(self) -> f64 {
        match self {
            Self::Hectopascal | Self::Millibar => 1.0,
            Self::Kilopascal | Self::Centibar => 10.0,
            Self::Pascal => 0.01,
            Self::Millipascal => 0.00001,
            Self::Bar => 1000.0,
            Self::MillimeterMercury => 1.33322,
            Self::InchMercury => 33.8639,
        }
    }

    /// Decimal places used when showing a reading in this unit.
    ///
    /// `None` means the reading is rounded to an integer.
    #[must_use]
    pub const fn display_precision(self) -> Option<usize> {
        match self {
            Self::Centibar | Self::Kilopascal => Some(1),
            Self::InchMercury => Some(2),
            Self::Bar => Some(3),
            _ => None,
        }
    }

    #[must_use]
    pub fn convert(self, value: f64, to: Self) -> f64 {
        value * self.hpa_factor() / to.hpa_factor()
    }
}

const BEAUFORT_COEFFICIENT: f64 = 0.836;

/// Converts a speed between two unit keys, pivoting through meters/second.
///
/// `Bft` and `Beaufort` name the same unit, so converting between them is the
/// identity. Unknown keys yield NaN.
#[must_use]
pub fn convert_speed(value: f64, unit_from: &str, unit_to: &str) -> f64 {
    if unit_from == unit_to {
        return value;
    }
    convert_speed_units(value, SpeedUnit::from_key(unit_from), SpeedUnit::from_key(unit_to))
}

fn convert_speed_units(value: f64, from: Option<SpeedUnit>, to: Option<SpeedUnit>) -> f64 {
    if from.is_some() && from == to {
        return value;
    }
    let factor = |unit: Option<SpeedUnit>| unit.and_then(SpeedUnit::mps_factor).unwrap_or(f64::NAN);

    if to == Some(SpeedUnit::Beaufort) {
        let mps = value * factor(from);
        return (mps / BEAUFORT_COEFFICIENT).powf(2.0 / 3.0);
    }
    if from == Some(SpeedUnit::Beaufort) {
        let mps = BEAUFORT_COEFFICIENT * value.powf(3.0 / 2.0);
        return mps / factor(to);
    }
    value * factor(from) / factor(to)
}

/// Converts a pressure between two unit keys, pivoting through hectopascals.
#[must_use]
pub fn convert_pressure(value: f64, unit_from: &str, unit_to: &str) -> f64 {
    if unit_from == unit_to {
        return value;
    }
    let factor = |key: &str| {
        PressureUnit::from_key(key)
            .map(PressureUnit::hpa_factor)
            .unwrap_or(f64::NAN)
    };
    value * factor(unit_from) / factor(unit_to)
}
