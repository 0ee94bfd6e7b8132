mod support;

use support::{Harness, RecordingSource, WEATHER, at, daily_records, host_state, hourly_records};
use weather_chart::api::{
    CardConfig, ChartBinding, ChartStyle, RebuildOutcome, SyncAction, TimerOutcome,
};
use weather_chart::core::{ForecastSeries, Granularity};
use weather_chart::host::ScheduledKind;
use weather_chart::render::{
    CanvasId, ChartSpec, HeadlessSurface, LabelFrame, NullChartRenderer, PointLabelPlacement,
    PointLabels, RendererCall, SeriesField, StyleTokens, TextDirection,
};

const NOW: &str = "2026-10-19T12:30:00+00:00";

#[test]
fn patch_without_a_chart_never_creates_one() {
    let mut binding = ChartBinding::new(NullChartRenderer::default());

    let patched = binding.patch(&ForecastSeries::default()).expect("patch");

    assert!(!patched);
    assert!(binding.renderer().calls().is_empty());
}

#[test]
fn rebuild_destroys_the_previous_chart_exactly_once() {
    let now = at(NOW);
    let mut harness = Harness::mounted(now, CardConfig::for_entity(WEATHER), daily_records(now, 5));
    let first = harness.card.chart_handle().expect("first chart");

    for size in [80.0, 60.0] {
        let mut next = CardConfig::for_entity(WEATHER);
        next.forecast.precip_bar_size = size;
        harness.card.set_config(next).expect("config");
        harness.card.update().expect("update");
    }

    let calls = harness.card.renderer().calls();
    let destroyed: Vec<_> = calls
        .iter()
        .filter_map(|call| match call {
            RendererCall::Destroy { chart } => Some(*chart),
            _ => None,
        })
        .collect();
    assert_eq!(destroyed.len(), 2);
    assert_eq!(destroyed[0], first);
    assert_eq!(harness.card.renderer().live_count(), 1);

    let live = harness.card.chart_handle().expect("live chart");
    let spec = harness.card.renderer().spec(live).expect("live spec");
    let bars = spec
        .datasets
        .iter()
        .find_map(|dataset| dataset.bar_percentage)
        .expect("precipitation bars");
    approx::assert_relative_eq!(bars, 0.6);
}

#[test]
fn missing_canvas_defers_to_one_animation_frame() {
    let now = at(NOW);
    let mut harness = Harness::with_parts(now, RecordingSource::new(), HeadlessSurface::default());
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    harness.card.set_host_state(host_state(now)).expect("host state");
    harness.card.set_forecasts(daily_records(now, 4));

    let report = harness.card.update().expect("update");
    let [SyncAction::Rebuilt(RebuildOutcome::Deferred(frame))] = report.actions.as_slice() else {
        panic!("unexpected actions: {:?}", report.actions);
    };
    let frame = *frame;
    assert_eq!(
        harness.scheduler.kind_of(frame),
        Some(ScheduledKind::AnimationFrame)
    );

    let mut next = CardConfig::for_entity(WEATHER);
    next.title = Some("Garden".to_owned());
    harness.card.set_config(next).expect("config");
    let report = harness.card.update().expect("update");
    assert!(report
        .actions
        .contains(&SyncAction::Rebuilt(RebuildOutcome::Deferred(frame))));
    assert_eq!(harness.scheduler.pending_count(), 1);
    assert_eq!(harness.card.renderer().create_count(), 0);

    harness.card.surface_mut().canvas = Some(CanvasId(7));
    assert!(harness.scheduler.fire(frame));
    let outcome = harness.card.on_timer(frame).expect("frame");
    assert!(matches!(
        outcome,
        TimerOutcome::CanvasRetry(RebuildOutcome::Built(_))
    ));
    assert_eq!(
        harness.card.renderer().calls().first(),
        Some(&RendererCall::Create {
            chart: harness.card.chart_handle().expect("chart"),
            canvas: CanvasId(7),
        })
    );

    assert_eq!(
        harness.card.on_timer(frame).expect("stale frame"),
        TimerOutcome::Unknown
    );
}

#[test]
fn canvas_arriving_before_the_frame_cancels_it() {
    let now = at(NOW);
    let mut harness = Harness::with_parts(now, RecordingSource::new(), HeadlessSurface::default());
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    harness.card.set_host_state(host_state(now)).expect("host state");
    harness.card.set_forecasts(daily_records(now, 4));
    harness.card.update().expect("update");
    let frame = harness.scheduler.pending()[0].0;

    harness.card.surface_mut().canvas = Some(CanvasId(3));
    harness.card.set_forecasts(daily_records(now, 5));
    let report = harness.card.update().expect("update");

    assert!(report.rebuilt());
    assert_eq!(harness.scheduler.cancelled(), vec![frame]);
    assert_eq!(harness.card.renderer().live_count(), 1);
}

#[test]
fn nothing_is_drawn_without_forecasts() {
    let now = at(NOW);
    let harness = Harness::mounted(now, CardConfig::for_entity(WEATHER), Vec::new());

    assert_eq!(harness.card.chart_handle(), None);
    assert!(harness.card.renderer().calls().is_empty());
}

fn live_spec(harness: &Harness) -> ChartSpec {
    let chart = harness.card.chart_handle().expect("live chart");
    harness
        .card
        .renderer()
        .spec(chart)
        .expect("live spec")
        .clone()
}

fn tick(spec: &ChartSpec, rfc3339: &str) -> Vec<String> {
    spec.time_axis.tick_format.format(at(rfc3339)).to_vec()
}

#[test]
fn temperature_axis_leaves_headroom_around_observed_range() {
    let now = at(NOW);
    let harness = Harness::mounted(now, CardConfig::for_entity(WEATHER), daily_records(now, 5));
    let spec = live_spec(&harness);

    assert_eq!(spec.temperature_axis.suggested_min, Some(5.0));
    assert_eq!(spec.temperature_axis.suggested_max, Some(27.0));
    assert_eq!(spec.precipitation_axis.suggested_max, Some(20.0));
}

#[test]
fn default_style_boxes_both_temperature_lines() {
    let now = at(NOW);
    let harness = Harness::mounted(now, CardConfig::for_entity(WEATHER), daily_records(now, 5));
    let spec = live_spec(&harness);

    let high = spec.dataset(SeriesField::TempHigh).expect("high line");
    let low = spec.dataset(SeriesField::TempLow).expect("low line");
    assert_eq!(high.point_label(&spec.series, 0).as_deref(), Some("20°"));
    assert_eq!(low.point_label(&spec.series, 4).as_deref(), Some("14°"));

    for line in [high, low] {
        let Some(PointLabels::Temperature {
            placement,
            frame,
            color,
            font_size,
        }) = &line.point_labels
        else {
            panic!("temperature labels expected on {:?}", line.field);
        };
        assert_eq!(*placement, PointLabelPlacement::Center);
        assert_eq!(*frame, LabelFrame::Boxed);
        assert_eq!(color, &StyleTokens::default().primary_text_color);
        assert_eq!(*font_size, 11.0);
    }
    assert_eq!(
        spec.value_labels.background_color,
        StyleTokens::default().card_background_color
    );
    assert_eq!(spec.value_labels.border_width, 1.5);
}

#[test]
fn style2_floats_pills_above_and_below_the_lines() {
    let now = at(NOW);
    let mut config = CardConfig::for_entity(WEATHER);
    config.forecast.style = ChartStyle::Style2;
    let harness = Harness::mounted(now, config.clone(), daily_records(now, 5));
    let spec = live_spec(&harness);

    let high = spec.dataset(SeriesField::TempHigh).expect("high line");
    assert_eq!(high.point_label(&spec.series, 1).as_deref(), Some("21°"));
    assert_eq!(
        high.point_labels,
        Some(PointLabels::Temperature {
            placement: PointLabelPlacement::Above,
            frame: LabelFrame::Pill,
            color: config.forecast.temperature1_color.clone(),
            font_size: 12.0,
        })
    );

    let low = spec.dataset(SeriesField::TempLow).expect("low line");
    assert_eq!(
        low.point_labels,
        Some(PointLabels::Temperature {
            placement: PointLabelPlacement::Below,
            frame: LabelFrame::Pill,
            color: config.forecast.temperature2_color.clone(),
            font_size: 12.0,
        })
    );
}

#[test]
fn daily_ticks_show_uppercased_weekdays() {
    let now = at(NOW);
    let harness = Harness::mounted(now, CardConfig::for_entity(WEATHER), daily_records(now, 3));
    let spec = live_spec(&harness);

    assert_eq!(tick(&spec, "2026-10-19T12:00:00+00:00"), vec!["MON".to_owned()]);
    assert_eq!(tick(&spec, "2026-10-20T00:00:00+00:00"), vec!["TUE".to_owned()]);
    assert!(!spec.time_axis.reverse);
}

#[test]
fn hourly_ticks_add_the_date_at_midnight_when_enabled() {
    let now = at(NOW);
    let mut config = CardConfig::for_entity(WEATHER);
    config.forecast.forecast_type = Granularity::Hourly;

    let harness = Harness::mounted(now, config.clone(), hourly_records(now, 4));
    let spec = live_spec(&harness);
    assert_eq!(
        tick(&spec, "2026-10-20T00:00:00+00:00"),
        vec!["Oct 20".to_owned(), "00:00".to_owned()]
    );
    assert_eq!(tick(&spec, "2026-10-20T01:00:00+00:00"), vec!["01:00".to_owned()]);

    config.forecast.show_hourly_date = false;
    let harness = Harness::mounted(now, config, hourly_records(now, 4));
    let spec = live_spec(&harness);
    assert_eq!(tick(&spec, "2026-10-20T00:00:00+00:00"), vec!["00:00".to_owned()]);
}

#[test]
fn right_to_left_documents_reverse_the_time_axis() {
    let now = at(NOW);
    let surface = HeadlessSurface {
        direction: TextDirection::Rtl,
        ..HeadlessSurface::mounted(CanvasId(1))
    };
    let mut harness = Harness::with_parts(now, RecordingSource::new(), surface);
    harness
        .card
        .set_config(CardConfig::for_entity(WEATHER))
        .expect("config");
    harness.card.set_host_state(host_state(now)).expect("host state");
    harness.card.set_forecasts(daily_records(now, 3));
    harness.card.update().expect("update");

    assert!(live_spec(&harness).time_axis.reverse);
}
