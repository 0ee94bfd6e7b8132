mod support;

use support::{
    Harness, RecordingSource, WEATHER, all_features, at, host_state, hourly_records,
    weather_entity,
};
use weather_chart::api::{
    CardConfig, ForecastSubscription, SubscribeOutcome, SubscriptionKey, SyncAction,
};
use weather_chart::core::Granularity;
use weather_chart::host::{HostState, SUBSCRIBE_FORECAST_TYPE, WeatherFeatures};
use weather_chart::render::{CanvasId, HeadlessSurface};

const NOW: &str = "2026-10-19T12:30:00+00:00";

fn hourly_config() -> CardConfig {
    let mut config = CardConfig::for_entity(WEATHER);
    config.forecast.forecast_type = Granularity::Hourly;
    config
}

#[test]
fn subscribes_once_the_weather_entity_appears() {
    let now = at(NOW);
    let mut harness = Harness::new(now);
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");

    let outcome = harness
        .card
        .set_host_state(HostState::default())
        .expect("empty host state");
    assert_eq!(outcome, None);
    assert_eq!(harness.source.subscribe_count(), 0);

    let outcome = harness.card.set_host_state(host_state(now)).expect("host state");
    assert_eq!(outcome, Some(SubscribeOutcome::Subscribed { generation: 1 }));

    let message = harness.source.message(0);
    assert_eq!(message.kind, SUBSCRIBE_FORECAST_TYPE);
    assert_eq!(message.entity_id, WEATHER);
    assert_eq!(message.forecast_type, Granularity::Daily);

    let again = harness.card.set_host_state(host_state(now)).expect("host state");
    assert_eq!(again, None);
    assert_eq!(harness.source.subscribe_count(), 1);
    assert!(harness.card.is_subscribed());
}

#[test]
fn granularity_change_unsubscribes_exactly_once_and_resubscribes() {
    let now = at(NOW);
    let mut harness = Harness::mounted(
        now,
        CardConfig::for_entity(WEATHER),
        hourly_records(now, 4),
    );

    harness.card.set_config(hourly_config()).expect("hourly config");
    let report = harness.card.update().expect("update");
    harness.run_pending_tasks();

    assert!(report.resubscribed());
    assert_eq!(harness.source.subscribe_count(), 2);
    assert_eq!(harness.source.unsubscribed(), vec![0]);
    assert_eq!(harness.source.message(1).forecast_type, Granularity::Hourly);
    assert_eq!(
        harness.card.subscription_key().map(|key| key.granularity),
        Some(Granularity::Hourly)
    );

    harness.card.teardown();
    harness.run_pending_tasks();
    assert_eq!(harness.source.unsubscribed(), vec![0, 1]);
}

#[test]
fn teardown_before_acknowledgment_still_unsubscribes_once() {
    let now = at(NOW);
    let source = RecordingSource::deferred();
    let mut harness =
        Harness::with_parts(now, source, HeadlessSurface::mounted(CanvasId(1)));
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    harness.card.set_host_state(host_state(now)).expect("host state");

    harness.card.teardown();
    harness.run_pending_tasks();
    assert!(harness.source.unsubscribed().is_empty());
    assert!(!harness.card.is_subscribed());

    harness.source.ack(0);
    harness.run_pending_tasks();
    assert_eq!(harness.source.unsubscribed(), vec![0]);

    harness.card.teardown();
    harness.run_pending_tasks();
    assert_eq!(harness.source.unsubscribed(), vec![0]);
}

#[test]
fn rejected_acknowledgment_never_calls_unsubscribe() {
    let now = at(NOW);
    let mut harness = Harness::with_parts(
        now,
        RecordingSource::deferred(),
        HeadlessSurface::mounted(CanvasId(1)),
    );
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    harness.card.set_host_state(host_state(now)).expect("host state");

    harness.card.teardown();
    harness.source.reject(0);
    harness.run_pending_tasks();

    assert!(harness.source.unsubscribed().is_empty());
}

#[test]
fn unsupported_forecast_type_is_not_retried_until_the_entity_gains_it() {
    let now = at(NOW);
    let mut harness = Harness::new(now);
    harness.card.set_config(hourly_config()).expect("config");

    let daily_only = HostState::default()
        .with_entity(WEATHER, weather_entity(WeatherFeatures::FORECAST_DAILY, now));
    let outcome = harness
        .card
        .set_host_state(daily_only.clone())
        .expect("host state");
    assert_eq!(outcome, Some(SubscribeOutcome::Unsupported));
    assert_eq!(harness.source.subscribe_count(), 0);
    assert!(!harness.card.is_subscribed());

    let retried = harness.card.set_host_state(daily_only).expect("host state");
    assert_eq!(retried, None);

    let upgraded =
        HostState::default().with_entity(WEATHER, weather_entity(all_features(), now));
    let outcome = harness.card.set_host_state(upgraded).expect("host state");
    assert_eq!(outcome, Some(SubscribeOutcome::Subscribed { generation: 1 }));
    assert_eq!(harness.source.message(0).forecast_type, Granularity::Hourly);
}

#[test]
fn pushes_from_a_replaced_stream_are_dropped() {
    let now = at(NOW);
    let mut harness =
        Harness::mounted(now, CardConfig::for_entity(WEATHER), Vec::new());

    harness.card.set_config(hourly_config()).expect("hourly config");
    harness.card.update().expect("update");

    harness.source.push(0, hourly_records(now, 3));
    harness.card.update().expect("update");
    assert!(harness.card.forecasts().is_empty());

    let fresh = hourly_records(now, 5);
    harness.source.push(1, fresh.clone());
    harness.card.update().expect("update");
    assert_eq!(harness.card.forecasts(), fresh.as_slice());
}

#[test]
fn only_the_latest_push_of_a_cycle_is_applied() {
    let now = at(NOW);
    let mut harness =
        Harness::mounted(now, CardConfig::for_entity(WEATHER), Vec::new());

    harness.source.push(0, hourly_records(now, 2));
    let latest = hourly_records(now, 6);
    harness.source.push(0, latest.clone());
    let report = harness.card.update().expect("update");

    assert_eq!(harness.card.forecasts(), latest.as_slice());
    assert_eq!(report.previous_forecasts, Some(Vec::new()));
    assert!(report.rebuilt());
}

#[test]
fn entity_switch_to_a_missing_entity_closes_the_stream() {
    let now = at(NOW);
    let mut harness = Harness::mounted(
        now,
        CardConfig::for_entity(WEATHER),
        hourly_records(now, 4),
    );

    harness
        .card
        .set_config(CardConfig::for_entity("weather.elsewhere"))
        .expect("config");
    let report = harness.card.update().expect("update");
    harness.run_pending_tasks();

    assert!(report.actions.contains(&SyncAction::Resubscribed {
        key: weather_chart::api::SubscriptionKey::new("weather.elsewhere", Granularity::Daily),
        outcome: None,
    }));
    assert!(!harness.card.is_subscribed());
    assert_eq!(harness.source.unsubscribed(), vec![0]);
}

#[test]
fn entity_reconfigured_before_first_update_moves_the_stream() {
    let now = at(NOW);
    let mut harness = Harness::new(now);
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    let host = host_state(now).with_entity("weather.garden", weather_entity(all_features(), now));
    harness.card.set_host_state(host.clone()).expect("host state");
    assert_eq!(harness.source.subscribe_count(), 1);

    harness
        .card
        .set_config(CardConfig::for_entity("weather.garden"))
        .expect("config");
    let report = harness.card.update().expect("first update");
    harness.run_pending_tasks();

    assert!(report.resubscribed());
    assert_eq!(harness.source.subscribe_count(), 2);
    assert_eq!(harness.source.message(1).entity_id, "weather.garden");
    assert_eq!(harness.source.unsubscribed(), vec![0]);
    assert_eq!(
        harness.card.subscription_key().map(|key| key.entity_id.as_str()),
        Some("weather.garden")
    );

    let again = harness.card.set_host_state(host).expect("host state");
    assert_eq!(again, None);
    assert_eq!(harness.source.subscribe_count(), 2);
}

#[test]
fn host_update_replaces_a_stream_for_another_key() {
    let source = RecordingSource::new();
    let pool = futures::executor::LocalPool::new();
    let mut subscription =
        ForecastSubscription::new(Box::new(source.clone()), Box::new(pool.spawner()));
    let home = SubscriptionKey::new(WEATHER, Granularity::Daily);
    let garden = SubscriptionKey::new("weather.garden", Granularity::Daily);

    assert!(subscription.wants_subscription(&home, all_features()));
    subscription.subscribe(home.clone(), all_features());

    assert!(!subscription.wants_subscription(&home, all_features()));
    assert!(subscription.wants_subscription(&garden, all_features()));
    assert!(subscription.wants_subscription(
        &SubscriptionKey::new(WEATHER, Granularity::Hourly),
        all_features()
    ));
    assert_eq!(source.subscribe_count(), 1);
}
