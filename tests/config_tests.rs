use serde_json::json;
use weather_chart::api::{CardConfig, ChartStyle, IconStyle};
use weather_chart::core::{Granularity, PrecipitationMode};
use weather_chart::CardError;

#[test]
fn minimal_config_gets_card_defaults() {
    let config = CardConfig::from_json_str(r#"{"entity": "weather.home"}"#).expect("config");

    assert_eq!(config.entity_id(), "weather.home");
    assert!(config.show_main);
    assert!(config.show_sun);
    assert!(!config.show_time);
    assert!(!config.autoscroll);
    assert_eq!(config.icons_size, 25.0);
    assert_eq!(config.icon_style, IconStyle::Style1);
    assert_eq!(config.units.pressure, "hPa");
    assert_eq!(config.units.speed, None);
    assert_eq!(config.granularity(), Granularity::Daily);
    assert_eq!(config.forecast.precipitation_type, PrecipitationMode::Rainfall);
    assert_eq!(config.forecast.style, ChartStyle::Style1);
    assert_eq!(config.forecast.labels_font_size, 11.0);
    assert_eq!(config.forecast.precip_bar_size, 100.0);
    assert!(config.forecast.show_wind_forecast);
    assert_eq!(config, CardConfig::for_entity("weather.home"));
}

#[test]
fn numeric_fields_accept_strings() {
    let config = CardConfig::from_value(json!({
        "entity": "weather.home",
        "icons_size": "32",
        "forecast": {
            "labels_font_size": " 12.5 ",
            "number_of_forecasts": "6",
            "type": "hourly",
            "precipitation_type": "probability",
            "style": "style2"
        }
    }))
    .expect("config");

    assert_eq!(config.icons_size, 32.0);
    assert_eq!(config.forecast.labels_font_size, 12.5);
    assert_eq!(config.forecast.number_of_forecasts, 6);
    assert_eq!(config.granularity(), Granularity::Hourly);
    assert_eq!(config.forecast.precipitation_type, PrecipitationMode::Probability);
    assert_eq!(config.forecast.style, ChartStyle::Style2);
}

#[test]
fn non_numeric_string_is_rejected() {
    let err = CardConfig::from_value(json!({
        "entity": "weather.home",
        "icons_size": "large"
    }))
    .expect_err("invalid number");
    assert!(matches!(err, CardError::InvalidConfig(_)));
}

#[test]
fn legacy_speed_key_moves_under_units() {
    let config = CardConfig::from_value(json!({
        "entity": "weather.home",
        "speed": "m/s"
    }))
    .expect("config");

    assert_eq!(config.units.speed.as_deref(), Some("m/s"));
    assert_eq!(config.speed, None);
}

#[test]
fn missing_or_blank_entity_is_rejected() {
    let missing = CardConfig::from_value(json!({ "show_time": true })).expect_err("no entity");
    assert!(matches!(missing, CardError::MissingEntity));

    let blank = CardConfig::from_value(json!({ "entity": "  " })).expect_err("blank entity");
    assert!(matches!(blank, CardError::MissingEntity));
}

#[test]
fn attribute_overrides_are_read_from_the_top_level() {
    let config = CardConfig::from_value(json!({
        "entity": "weather.home",
        "temp": "sensor.outdoor_temperature",
        "press": "sensor.pressure",
        "press_unit": "mmHg"
    }))
    .expect("config");

    assert_eq!(
        config.overrides.temp.as_deref(),
        Some("sensor.outdoor_temperature")
    );
    assert_eq!(config.overrides.press_unit.as_deref(), Some("mmHg"));
}

#[test]
fn stub_prefers_unused_weather_entities() {
    let stub = CardConfig::stub(
        &["sensor.kitchen", "weather.garden"],
        &["weather.home", "weather.garden"],
    );
    assert_eq!(stub.entity.as_deref(), Some("weather.garden"));

    let fallback = CardConfig::stub(&["light.porch"], &["sensor.kitchen", "weather.home"]);
    assert_eq!(fallback.entity.as_deref(), Some("weather.home"));

    let empty = CardConfig::stub(&[], &["sensor.kitchen"]);
    assert_eq!(empty.entity, None);
}

#[test]
fn card_rejects_invalid_config_and_keeps_the_previous_one() {
    use weather_chart::host::{CardHost, FixedClock, ManualScheduler};
    use weather_chart::render::{HeadlessSurface, NullChartRenderer};

    struct NoSource;
    impl weather_chart::host::ForecastSource for NoSource {
        fn subscribe_forecast(
            &mut self,
            _message: weather_chart::host::SubscribeForecastMessage,
            _callback: weather_chart::host::ForecastCallback,
        ) -> weather_chart::host::PendingUnsubscribe {
            Box::pin(futures::future::pending())
        }
    }

    let pool = futures::executor::LocalPool::new();
    let host = CardHost {
        source: Box::new(NoSource),
        scheduler: Box::new(ManualScheduler::new()),
        clock: Box::new(FixedClock::new(
            chrono::DateTime::parse_from_rfc3339("2026-10-19T12:00:00+00:00").expect("time"),
        )),
        spawner: Box::new(pool.spawner()),
    };
    let mut card = weather_chart::WeatherCard::new(
        NullChartRenderer::default(),
        HeadlessSurface::default(),
        host,
    );

    let change = card
        .set_config_json(r#"{"entity": "weather.home"}"#)
        .expect("config");
    assert!(change.initial);

    let err = card.set_config_json(r#"{"title": "No entity"}"#).expect_err("rejected");
    assert!(matches!(err, CardError::MissingEntity));
    assert_eq!(card.config().map(CardConfig::entity_id), Some("weather.home"));
}
