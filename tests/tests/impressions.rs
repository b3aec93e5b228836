//! Impression batching and coalescing tests.

use std::time::Duration;

use engagement_core::TrafficSource;
use integration_tests::fixtures;
use integration_tests::setup::{settle, TestContext};

#[tokio::test(start_paused = true)]
async fn repeated_impressions_yield_one_submission() {
    let ctx = TestContext::new();

    for _ in 0..3 {
        ctx.engine
            .record_impressions(vec!["c1".to_string()], TrafficSource::Feed);
    }
    settle(Duration::from_millis(600)).await;

    let views = ctx.sink.post_views();
    assert_eq!(views.len(), 1, "burst must coalesce to one submission");
    assert_eq!(views[0].post_id, "c1");
}

#[tokio::test(start_paused = true)]
async fn overlapping_bursts_are_unioned_by_id() {
    let ctx = TestContext::new();

    ctx.engine
        .record_impressions(vec!["a".into(), "b".into()], TrafficSource::Feed);
    ctx.engine
        .record_impressions(vec!["b".into(), "c".into()], TrafficSource::Feed);
    settle(Duration::from_millis(600)).await;

    let mut ids: Vec<String> = ctx.sink.post_views().into_iter().map(|v| v.post_id).collect();
    ids.sort();
    assert_eq!(ids, vec!["a", "b", "c"]);
}

#[tokio::test(start_paused = true)]
async fn later_burst_does_not_overwrite_recorded_source() {
    let ctx = TestContext::new();

    ctx.engine
        .record_impressions(vec!["a".into()], TrafficSource::Feed);
    ctx.engine
        .record_impressions(vec!["a".into()], TrafficSource::Search);
    settle(Duration::from_millis(600)).await;

    let views = ctx.sink.post_views();
    assert_eq!(views.len(), 1);
    assert_eq!(views[0].source, TrafficSource::Feed);
}

#[tokio::test(start_paused = true)]
async fn flushed_ids_stay_deduplicated_until_the_view_cooldown_expires() {
    let ctx = TestContext::new();

    ctx.engine
        .record_impressions(vec!["a".into()], TrafficSource::Feed);
    settle(Duration::from_millis(600)).await;
    assert_eq!(ctx.sink.post_views().len(), 1);

    // A second flush cycle inside the 5s view window is suppressed.
    ctx.engine
        .record_impressions(vec!["a".into()], TrafficSource::Feed);
    settle(Duration::from_millis(600)).await;
    assert_eq!(ctx.sink.post_views().len(), 1);

    // Once the window expires the same item may be reported again.
    settle(Duration::from_millis(5000)).await;
    ctx.engine
        .record_impressions(vec!["a".into()], TrafficSource::Feed);
    settle(Duration::from_millis(600)).await;
    assert_eq!(ctx.sink.post_views().len(), 2);
}

#[tokio::test(start_paused = true)]
async fn large_burst_reports_every_distinct_id_once() {
    let ctx = TestContext::new();
    let ids = fixtures::content_ids(20);

    ctx.engine
        .record_impressions(ids.clone(), TrafficSource::Feed);
    ctx.engine
        .record_impressions(ids.clone(), TrafficSource::Feed);
    settle(Duration::from_millis(600)).await;

    assert_eq!(ctx.sink.post_views().len(), ids.len());
}
