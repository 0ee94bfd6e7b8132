//! Language resolution, translation lookups and localized date/time text.

use chrono::{DateTime, FixedOffset, Locale, Timelike};
use serde::{Deserialize, Serialize};

/// Languages with a translation table. Anything else falls back to English.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Language {
    #[default]
    En,
    De,
    Fr,
    Nl,
}

impl Language {
    /// Resolves a BCP 47 tag such as `de`, `de-AT` or `nl_BE`.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        let primary = tag
            .split(['-', '_'])
            .next()
            .unwrap_or_default()
            .to_ascii_lowercase();
        match primary.as_str() {
            "de" => Self::De,
            "fr" => Self::Fr,
            "nl" => Self::Nl,
            _ => Self::En,
        }
    }

    #[must_use]
    pub const fn chrono_locale(self) -> Locale {
        match self {
            Self::En => Locale::en_US,
            Self::De => Locale::de_DE,
            Self::Fr => Locale::fr_FR,
            Self::Nl => Locale::nl_NL,
        }
    }

    #[must_use]
    pub fn translations(self) -> &'static Translations {
        match self {
            Self::En => &EN,
            Self::De => &DE,
            Self::Fr => &FR,
            Self::Nl => &NL,
        }
    }
}

/// Static strings shown by the card.
#[derive(Debug)]
pub struct Translations {
    pub temp_hi: &'static str,
    pub temp_lo: &'static str,
    pub precip: &'static str,
    pub feels_like: &'static str,
    /// N, NNE, ... NNW, N.
    pub cardinal_directions: [&'static str; 17],
    conditions: [(&'static str, &'static str); 15],
    relative: RelativeWords,
}

#[derive(Debug)]
struct RelativeWords {
    this_minute: &'static str,
    one_minute: &'static str,
    minutes: &'static str,
    one_hour: &'static str,
    hours: &'static str,
}

impl Translations {
    #[must_use]
    pub fn condition(&self, condition: &str) -> Option<&'static str> {
        self.conditions
            .iter()
            .find(|(key, _)| *key == condition)
            .map(|(_, text)| *text)
    }
}

static EN: Translations = Translations {
    temp_hi: "Temperature",
    temp_lo: "Temperature night",
    precip: "Precipitations",
    feels_like: "Feels like",
    cardinal_directions: [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW", "N",
    ],
    conditions: [
        ("clear-night", "Clear, night"),
        ("cloudy", "Cloudy"),
        ("exceptional", "Exceptional"),
        ("fog", "Fog"),
        ("hail", "Hail"),
        ("lightning", "Lightning"),
        ("lightning-rainy", "Lightning, rainy"),
        ("partlycloudy", "Partly cloudy"),
        ("pouring", "Pouring"),
        ("rainy", "Rainy"),
        ("snowy", "Snowy"),
        ("snowy-rainy", "Snowy, rainy"),
        ("sunny", "Sunny"),
        ("windy", "Windy"),
        ("windy-variant", "Windy"),
    ],
    relative: RelativeWords {
        this_minute: "this minute",
        one_minute: "1 minute ago",
        minutes: "{} minutes ago",
        one_hour: "1 hour ago",
        hours: "{} hours ago",
    },
};

static DE: Translations = Translations {
    temp_hi: "Temperatur",
    temp_lo: "Temperatur Nacht",
    precip: "Niederschlag",
    feels_like: "Gefühlt",
    cardinal_directions: [
        "N", "NNO", "NO", "ONO", "O", "OSO", "SO", "SSO", "S", "SSW", "SW", "WSW", "W", "WNW",
        "NW", "NNW", "N",
    ],
    conditions: [
        ("clear-night", "Klar, Nacht"),
        ("cloudy", "Bewölkt"),
        ("exceptional", "Außergewöhnlich"),
        ("fog", "Nebel"),
        ("hail", "Hagel"),
        ("lightning", "Gewitter"),
        ("lightning-rainy", "Gewitter, regnerisch"),
        ("partlycloudy", "Teilweise bewölkt"),
        ("pouring", "Strömend"),
        ("rainy", "Regnerisch"),
        ("snowy", "Verschneit"),
        ("snowy-rainy", "Verschneit, regnerisch"),
        ("sunny", "Sonnig"),
        ("windy", "Windig"),
        ("windy-variant", "Windig"),
    ],
    relative: RelativeWords {
        this_minute: "in dieser Minute",
        one_minute: "vor 1 Minute",
        minutes: "vor {} Minuten",
        one_hour: "vor 1 Stunde",
        hours: "vor {} Stunden",
    },
};

static FR: Translations = Translations {
    temp_hi: "Température",
    temp_lo: "Température nuit",
    precip: "Précipitations",
    feels_like: "Ressenti",
    cardinal_directions: [
        "N", "NNE", "NE", "ENE", "E", "ESE", "SE", "SSE", "S", "SSO", "SO", "OSO", "O", "ONO",
        "NO", "NNO", "N",
    ],
    conditions: [
        ("clear-night", "Nuit dégagée"),
        ("cloudy", "Nuageux"),
        ("exceptional", "Exceptionnel"),
        ("fog", "Brouillard"),
        ("hail", "Grêle"),
        ("lightning", "Orage"),
        ("lightning-rainy", "Orage, pluvieux"),
        ("partlycloudy", "Partiellement nuageux"),
        ("pouring", "Averses"),
        ("rainy", "Pluvieux"),
        ("snowy", "Neigeux"),
        ("snowy-rainy", "Neigeux, pluvieux"),
        ("sunny", "Ensoleillé"),
        ("windy", "Venteux"),
        ("windy-variant", "Venteux"),
    ],
    relative: RelativeWords {
        this_minute: "cette minute-ci",
        one_minute: "il y a 1 minute",
        minutes: "il y a {} minutes",
        one_hour: "il y a 1 heure",
        hours: "il y a {} heures",
    },
};

static NL: Translations = Translations {
    temp_hi: "Temperatuur",
    temp_lo: "Temperatuur nacht",
    precip: "Neerslag",
    feels_like: "Voelt als",
    cardinal_directions: [
        "N", "NNO", "NO", "ONO", "O", "OZO", "ZO", "ZZO", "Z", "ZZW", "ZW", "WZW", "W", "WNW",
        "NW", "NNW", "N",
    ],
    conditions: [
        ("clear-night", "Helder, nacht"),
        ("cloudy", "Bewolkt"),
        ("exceptional", "Uitzonderlijk"),
        ("fog", "Mist"),
        ("hail", "Hagel"),
        ("lightning", "Onweer"),
        ("lightning-rainy", "Onweer, regenachtig"),
        ("partlycloudy", "Gedeeltelijk bewolkt"),
        ("pouring", "Gietend"),
        ("rainy", "Regenachtig"),
        ("snowy", "Sneeuwachtig"),
        ("snowy-rainy", "Sneeuwachtig, regenachtig"),
        ("sunny", "Zonnig"),
        ("windy", "Winderig"),
        ("windy-variant", "Winderig"),
    ],
    relative: RelativeWords {
        this_minute: "binnen een minuut",
        one_minute: "1 minuut geleden",
        minutes: "{} minuten geleden",
        one_hour: "1 uur geleden",
        hours: "{} uur geleden",
    },
};

/// Display label for a unit key. Unknown keys are shown verbatim.
#[must_use]
pub fn unit_label(key: &str) -> &str {
    match key {
        "Beaufort" => "Bft",
        other => other,
    }
}

/// Age of an entity's last change, at the coarsest whole unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelativeAge {
    Minutes(i64),
    Hours(i64),
}

impl RelativeAge {
    #[must_use]
    pub fn between(then: DateTime<FixedOffset>, now: DateTime<FixedOffset>) -> Self {
        let minutes = (now - then).num_minutes();
        let hours = minutes.div_euclid(60);
        if hours > 0 {
            Self::Hours(hours)
        } else {
            Self::Minutes(minutes)
        }
    }
}

/// Language-aware formatter for every date/time string the card shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct CardLocale {
    pub language: Language,
    pub use_12hour_format: bool,
}

impl CardLocale {
    #[must_use]
    pub fn new(language: Language, use_12hour_format: bool) -> Self {
        Self {
            language,
            use_12hour_format,
        }
    }

    #[must_use]
    pub fn translations(self) -> &'static Translations {
        self.language.translations()
    }

    fn format(self, datetime: DateTime<FixedOffset>, pattern: &str) -> String {
        datetime
            .format_localized(pattern, self.language.chrono_locale())
            .to_string()
            .trim()
            .to_owned()
    }

    /// Uppercased short weekday, e.g. `MON`.
    #[must_use]
    pub fn weekday_short(self, datetime: DateTime<FixedOffset>) -> String {
        self.format(datetime, "%a").to_uppercase()
    }

    /// Uppercased long weekday, e.g. `MONDAY`.
    #[must_use]
    pub fn weekday_long(self, datetime: DateTime<FixedOffset>) -> String {
        self.format(datetime, "%A").to_uppercase()
    }

    /// Hour label for hourly ticks: `15:00`, or `3 PM` in 12-hour mode.
    #[must_use]
    pub fn hour_label(self, datetime: DateTime<FixedOffset>) -> String {
        if self.use_12hour_format {
            self.format(datetime, "%-I %p")
                .replace("a.m.", "AM")
                .replace("p.m.", "PM")
        } else {
            self.format(datetime, "%H:%M")
        }
    }

    /// Short day-and-month, e.g. `Oct 19` or `19 okt.`.
    #[must_use]
    pub fn short_date(self, datetime: DateTime<FixedOffset>) -> String {
        match self.language {
            Language::En => self.format(datetime, "%b %-d"),
            _ => self.format(datetime, "%-d %b"),
        }
    }

    /// Long day-and-month, e.g. `October 19`.
    #[must_use]
    pub fn long_date(self, datetime: DateTime<FixedOffset>) -> String {
        match self.language {
            Language::En => self.format(datetime, "%B %-d"),
            _ => self.format(datetime, "%-d %B"),
        }
    }

    #[must_use]
    pub fn clock_time(self, datetime: DateTime<FixedOffset>, with_seconds: bool) -> String {
        let pattern = match (self.use_12hour_format, with_seconds) {
            (true, true) => "%-I:%M:%S %p",
            (true, false) => "%-I:%M %p",
            (false, true) => "%H:%M:%S",
            (false, false) => "%H:%M",
        };
        self.format(datetime, pattern)
    }

    /// Tooltip heading with weekday, date and time.
    #[must_use]
    pub fn tooltip_title(self, datetime: DateTime<FixedOffset>) -> String {
        let time = self.clock_time(datetime, false);
        match self.language {
            Language::En => format!("{}, {time}", self.format(datetime, "%a, %b %-d")),
            _ => format!("{} {time}", self.format(datetime, "%a %-d %b")),
        }
    }

    #[must_use]
    pub fn relative_age(self, age: RelativeAge) -> String {
        let words = &self.translations().relative;
        match age {
            RelativeAge::Hours(1) => words.one_hour.to_owned(),
            RelativeAge::Hours(hours) => words.hours.replace("{}", &hours.to_string()),
            RelativeAge::Minutes(0) => words.this_minute.to_owned(),
            RelativeAge::Minutes(1) => words.one_minute.to_owned(),
            RelativeAge::Minutes(minutes) => words.minutes.replace("{}", &minutes.to_string()),
        }
    }
}

/// `true` at exactly midnight local time.
#[must_use]
pub fn is_midnight(datetime: DateTime<FixedOffset>) -> bool {
    datetime.hour() == 0 && datetime.minute() == 0
}

#[cfg(test)]
mod tests {
    use chrono::DateTime;

    use super::{CardLocale, Language, RelativeAge};

    #[test]
    fn tags_resolve_by_primary_subtag() {
        assert_eq!(Language::from_tag("de-AT"), Language::De);
        assert_eq!(Language::from_tag("nl_BE"), Language::Nl);
        assert_eq!(Language::from_tag("pt-BR"), Language::En);
    }

    #[test]
    fn english_hour_labels_follow_clock_flag() {
        let at = DateTime::parse_from_rfc3339("2026-10-19T15:00:00+02:00").expect("timestamp");
        assert_eq!(CardLocale::new(Language::En, false).hour_label(at), "15:00");
        assert_eq!(CardLocale::new(Language::En, true).hour_label(at), "3 PM");
        assert_eq!(CardLocale::new(Language::En, false).weekday_short(at), "MON");
    }

    #[test]
    fn relative_age_prefers_hours() {
        let then = DateTime::parse_from_rfc3339("2026-10-19T10:00:00+00:00").expect("then");
        let now = DateTime::parse_from_rfc3339("2026-10-19T12:30:00+00:00").expect("now");
        assert_eq!(RelativeAge::between(then, now), RelativeAge::Hours(2));
        let locale = CardLocale::default();
        assert_eq!(locale.relative_age(RelativeAge::Hours(2)), "2 hours ago");
        assert_eq!(locale.relative_age(RelativeAge::Minutes(0)), "this minute");
    }
}
