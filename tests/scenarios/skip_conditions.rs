//! Test: builds that must never publish

use crate::helpers::*;
use wheel_publish::core::SkipReason;
use wheel_publish::execution::PublishOutcome;

/// No wheels built: nothing is called, whatever the trigger
#[tokio::test]
async fn test_no_wheels_is_a_silent_noop() {
    for event in ["push", "cron", "api", "pull_request", ""] {
        let tmp = tempfile::tempdir().unwrap();
        let config = config_with_wheels(tmp.path(), 2);
        let client = MockClient::new();

        let result = run_with_mock(config, client.clone(), ci_vars("false", event)).await;

        assert_eq!(
            result.unwrap(),
            PublishOutcome::Skipped(SkipReason::WheelsNotBuilt),
            "event {:?}",
            event
        );
        assert!(client.calls().is_empty(), "event {:?} made calls", event);
    }
}

/// Unset flag behaves like false
#[tokio::test]
async fn test_unset_flag_skips() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_with_wheels(tmp.path(), 1);
    let client = MockClient::new();

    let result = run_with_mock(
        config,
        client.clone(),
        lookup_from(&[("TRAVIS_EVENT_TYPE", "push"), ("MULTIBUILD_WHEELS_STAGING_ACCESS", "x")]),
    )
    .await;

    assert_eq!(result.unwrap(), PublishOutcome::Skipped(SkipReason::WheelsNotBuilt));
    assert!(client.calls().is_empty());
}

/// Pull requests never publish, even with wheels built
#[tokio::test]
async fn test_pull_request_is_a_silent_noop() {
    let tmp = tempfile::tempdir().unwrap();
    let config = config_with_wheels(tmp.path(), 3);
    let client = MockClient::new();

    let result = run_with_mock(config, client.clone(), ci_vars("true", "pull_request")).await;

    assert_eq!(result.unwrap(), PublishOutcome::Skipped(SkipReason::PullRequest));
    assert!(client.calls().is_empty());
}

/// A skipped run does not need secrets or artifacts
#[tokio::test]
async fn test_skip_needs_no_secrets_or_artifacts() {
    let client = MockClient::new();
    let config = wheel_publish::PublisherConfig {
        artifacts: "/nonexistent/wheelhouse/*.whl".to_string(),
        ..Default::default()
    };

    let result = run_with_mock(
        config,
        client.clone(),
        lookup_from(&[("BUILD_WHEEL", "true"), ("TRAVIS_EVENT_TYPE", "pull_request")]),
    )
    .await;

    assert_eq!(result.unwrap(), PublishOutcome::Skipped(SkipReason::PullRequest));
    assert!(client.calls().is_empty());
}
