mod common;

use common::*;
use heron_core::prelude::*;

fn policy(interval: u64, max_wait: u64) -> PollPolicy {
    PollPolicy::new(secs(interval), secs(max_wait))
}

fn poll_count(events: &[JobEvent]) -> usize {
    events
        .iter()
        .filter(|e| matches!(e, JobEvent::Polling { .. }))
        .count()
}

#[tokio::test]
async fn submit_posts_form_with_credential() {
    let h = harness(ScriptedTransport::new().respond(200, &record("video_1", "queued", 0)));

    let spec = JobSpec::new("a cat on a skateboard").with_seconds(10);
    let record = h.client.submit(&spec).await.unwrap();

    assert_eq!(record.id, "video_1");
    assert_eq!(record.status, JobStatus::Queued);

    let requests = h.transport.requests();
    assert_eq!(requests.len(), 1);
    let request = &requests[0];
    assert_eq!(request.method, Method::Post);
    assert_eq!(request.url, BASE_URL);
    assert!(request.headers.contains(&("Authorization", CREDENTIAL.to_string())));
    assert!(request.headers.contains(&("Accept", "application/json".to_string())));

    let body = request.body.as_ref().unwrap();
    assert_eq!(body.field("prompt"), Some("a cat on a skateboard"));
    assert_eq!(body.field("model"), Some("sora-2"));
    assert_eq!(body.field("size"), Some("1280x720"));
    assert_eq!(body.field("seconds"), Some("10"));
    assert!(body.file.is_none());
}

#[tokio::test]
async fn rejected_submission_is_fatal() {
    let h = harness(ScriptedTransport::new().respond(401, r#"{"error":"invalid api key"}"#));

    let err = h.client.submit(&JobSpec::new("prompt")).await.unwrap_err();

    match err {
        HeronError::Submission { status, message } => {
            assert_eq!(status, 401);
            assert!(message.contains("invalid api key"));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.transport.requests().len(), 1);
    assert!(
        !h.events
            .all()
            .iter()
            .any(|e| matches!(e, JobEvent::Submitted { .. }))
    );
}

#[tokio::test]
async fn unparseable_submission_response_is_fatal() {
    let h = harness(ScriptedTransport::new().respond(200, "<html>ok</html>"));

    let err = h.client.submit(&JobSpec::new("prompt")).await.unwrap_err();

    assert!(matches!(err, HeronError::Submission { status: 200, .. }));
    assert_eq!(err.stage(), Stage::Submit);
}

#[tokio::test]
async fn submission_transport_failure_is_not_retried() {
    let h = harness(ScriptedTransport::new().fail("connection refused"));

    let err = h.client.submit(&JobSpec::new("prompt")).await.unwrap_err();

    assert!(matches!(
        err,
        HeronError::Transport {
            stage: Stage::Submit,
            ..
        }
    ));
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn returns_the_completed_record() {
    let h = harness(
        ScriptedTransport::new()
            .respond(200, &record("video_1", "queued", 0))
            .respond(200, &record("video_1", "in_progress", 40))
            .respond(200, &completed("video_1")),
    );

    let record = h
        .client
        .await_completion("video_1", policy(30, 600))
        .await
        .unwrap();

    assert_eq!(record, JobRecord::from_slice(completed("video_1").as_bytes()).unwrap());
    assert_eq!(
        record.url.as_deref(),
        Some("https://cdn.example.test/video_1.mp4")
    );
    assert_eq!(h.clock.sleeps(), vec![secs(30), secs(30)]);
    assert_eq!(
        h.transport.urls(),
        vec![format!("{BASE_URL}/video_1"); 3]
    );
    assert!(
        h.transport
            .requests()
            .iter()
            .all(|r| r.method == Method::Get && r.body.is_none())
    );
}

#[tokio::test]
async fn completed_record_with_null_progress_is_accepted() {
    let body = r#"{"id":"video_1","status":"completed","progress":null,"url":null,"created_at":1700000000,"completed_at":1700000240}"#;
    let h = harness(ScriptedTransport::new().repeat(20, 200, body));

    let record = h
        .client
        .await_completion("video_1", policy(30, 120))
        .await
        .unwrap();

    assert_eq!(record.status, JobStatus::Completed);
    assert_eq!(record.progress, 0);
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn submission_with_null_progress_is_accepted() {
    let body = r#"{"id":"video_1","status":"queued","progress":null}"#;
    let h = harness(ScriptedTransport::new().respond(200, body));

    let record = h.client.submit(&JobSpec::new("prompt")).await.unwrap();

    assert_eq!(record.id, "video_1");
    assert_eq!(record.progress, 0);
}

#[tokio::test]
async fn never_terminal_job_times_out() {
    let h = harness(ScriptedTransport::new().repeat(10, 200, &record("video_1", "processing", 5)));

    let err = h
        .client
        .await_completion("video_1", policy(1, 3))
        .await
        .unwrap_err();

    match &err {
        HeronError::Timeout { id, elapsed } => {
            assert_eq!(id, "video_1");
            assert_eq!(*elapsed, secs(4));
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(err.stage(), Stage::Poll);
    assert_eq!(h.transport.requests().len(), 4);

    let events = h.events.all();
    assert_eq!(poll_count(&events), 4);
    assert!(matches!(events.last(), Some(JobEvent::TimedOut { .. })));
}

#[tokio::test]
async fn zero_budget_still_polls_once() {
    let h = harness(ScriptedTransport::new().respond(200, &record("video_1", "queued", 0)));

    let err = h
        .client
        .await_completion("video_1", policy(5, 0))
        .await
        .unwrap_err();

    assert!(matches!(err, HeronError::Timeout { .. }));
    assert_eq!(h.transport.requests().len(), 1);
}

#[tokio::test]
async fn transient_server_error_does_not_abort() {
    let h = harness(
        ScriptedTransport::new()
            .respond(500, "upstream exploded")
            .respond(200, &completed("video_1")),
    );

    let record = h
        .client
        .await_completion("video_1", policy(30, 600))
        .await
        .unwrap();

    assert_eq!(record.status, JobStatus::Completed);
    assert_eq!(h.transport.requests().len(), 2);

    let failed: Vec<_> = h
        .events
        .all()
        .into_iter()
        .filter_map(|e| match e {
            JobEvent::PollFailed {
                attempt, reason, ..
            } => Some((attempt, reason)),
            _ => None,
        })
        .collect();
    assert_eq!(failed.len(), 1);
    assert_eq!(failed[0].0, 1);
    assert!(failed[0].1.contains("500"));
}

#[tokio::test]
async fn network_and_parse_errors_are_transient() {
    let h = harness(
        ScriptedTransport::new()
            .fail("connection reset")
            .respond(200, "not json")
            .respond(200, r#"{"id":"video_1"}"#)
            .respond(200, &completed("video_1")),
    );

    let record = h
        .client
        .await_completion("video_1", policy(10, 600))
        .await
        .unwrap();

    assert_eq!(record.id, "video_1");
    assert_eq!(h.clock.sleeps().len(), 3);
}

#[tokio::test]
async fn persistent_errors_surface_as_timeout() {
    let h = harness(ScriptedTransport::new().repeat(10, 503, "maintenance"));

    let err = h
        .client
        .await_completion("video_1", policy(30, 60))
        .await
        .unwrap_err();

    assert!(matches!(err, HeronError::Timeout { .. }));
    // t = 0, 30, 60 are within budget.
    assert_eq!(h.transport.requests().len(), 3);
}

#[tokio::test]
async fn failed_job_stops_polling() {
    let h = harness(
        ScriptedTransport::new()
            .respond(200, &record("video_1", "in_progress", 80))
            .respond(200, &record("video_1", "failed", 80))
            .respond(200, &completed("video_1")),
    );

    let err = h
        .client
        .await_completion("video_1", policy(30, 600))
        .await
        .unwrap_err();

    match err {
        HeronError::JobFailed { record } => {
            assert_eq!(record.id, "video_1");
            assert_eq!(record.progress, 80);
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert_eq!(h.transport.requests().len(), 2);
}

#[tokio::test]
async fn unknown_status_keeps_polling() {
    let h = harness(
        ScriptedTransport::new()
            .respond(200, &record("video_1", "moderation_review", 90))
            .respond(200, &record("video_1", "in_progress", 60))
            .respond(200, &completed("video_1")),
    );

    h.client
        .await_completion("video_1", policy(30, 600))
        .await
        .unwrap();

    let progress: Vec<_> = h
        .events
        .all()
        .into_iter()
        .filter_map(|e| match e {
            JobEvent::Progress { record, .. } => Some((record.status, record.progress)),
            _ => None,
        })
        .collect();
    assert_eq!(
        progress,
        vec![
            (JobStatus::Other("moderation_review".into()), 90),
            (JobStatus::InProgress, 60),
        ]
    );
}

#[tokio::test]
async fn base_url_trailing_slash_is_ignored() {
    let config = heron_client::ClientConfig::new(format!("{BASE_URL}/"), CREDENTIAL);
    let h = harness_with(
        config,
        ScriptedTransport::new()
            .respond(200, &completed("video_1"))
            .respond_bytes(200, b"mp4"),
    );

    h.client
        .await_completion("video_1", policy(1, 1))
        .await
        .unwrap();
    h.client.fetch_artifact("video_1").await.unwrap();

    assert_eq!(
        h.transport.urls(),
        vec![
            format!("{BASE_URL}/video_1"),
            format!("{BASE_URL}/video_1/content"),
        ]
    );
}
