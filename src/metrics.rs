//! Prometheus metrics for the trivia API: per-route HTTP timings plus a few
//! counters for question and quiz activity.

use axum::{
    Router,
    extract::{MatchedPath, Request},
    middleware::Next,
    response::Response,
    routing::get,
};
use metrics::{counter, gauge, histogram};
use metrics_exporter_prometheus::{BuildError, Matcher, PrometheusBuilder, PrometheusHandle};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

const REQUEST_DURATION: &str = "http_request_duration_seconds";
const REQUESTS_TOTAL: &str = "http_requests_total";
const REQUESTS_IN_FLIGHT: &str = "http_requests_in_flight";

/// Seconds. The slowest handler is a full-table quiz scan, so the tail stops
/// at a few seconds.
const REQUEST_DURATION_BUCKETS: &[f64] = &[
    0.002, 0.005, 0.01, 0.025, 0.05, 0.1, 0.25, 0.5, 1.0, 2.5, 5.0,
];

const UPKEEP_INTERVAL: Duration = Duration::from_secs(5);

static OBSERVABILITY_ENABLED: OnceLock<bool> = OnceLock::new();

/// `OBSERVABILITY_ENABLED`, read once. Anything but `false` or `0` enables.
pub fn is_observability_enabled() -> bool {
    *OBSERVABILITY_ENABLED.get_or_init(|| {
        std::env::var("OBSERVABILITY_ENABLED")
            .map(|v| parse_flag(&v))
            .unwrap_or(true)
    })
}

fn parse_flag(value: &str) -> bool {
    !matches!(value.trim().to_ascii_lowercase().as_str(), "false" | "0")
}

/// Installs the global recorder. `Ok(None)` when observability is off.
pub fn init_metrics() -> Result<Option<PrometheusHandle>, BuildError> {
    if !is_observability_enabled() {
        return Ok(None);
    }

    let handle = PrometheusBuilder::new()
        .set_buckets_for_metric(
            Matcher::Full(REQUEST_DURATION.to_string()),
            REQUEST_DURATION_BUCKETS,
        )?
        .install_recorder()?;

    let upkeep = handle.clone();
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(UPKEEP_INTERVAL);
        loop {
            interval.tick().await;
            upkeep.run_upkeep();
        }
    });

    Ok(Some(handle))
}

/// Holds the in-flight gauge up until dropped, so a cancelled request still
/// releases it.
struct InFlight;

impl InFlight {
    fn enter() -> Self {
        gauge!(REQUESTS_IN_FLIGHT).increment(1.0);
        InFlight
    }
}

impl Drop for InFlight {
    fn drop(&mut self) {
        gauge!(REQUESTS_IN_FLIGHT).decrement(1.0);
    }
}

/// Route label: the matched template (`/questions/{question_id}`), not the
/// raw path, so ids don't explode cardinality. Unmatched requests share one
/// label.
fn route_label(req: &Request) -> String {
    req.extensions()
        .get::<MatchedPath>()
        .map(|p| p.as_str().to_owned())
        .unwrap_or_else(|| "unmatched".to_owned())
}

pub async fn metrics_middleware(req: Request, next: Next) -> Response {
    if !is_observability_enabled() {
        return next.run(req).await;
    }

    let method = req.method().to_string();
    let route = route_label(&req);
    let _in_flight = InFlight::enter();
    let start = Instant::now();

    let response = next.run(req).await;

    histogram!(REQUEST_DURATION, "method" => method.clone(), "route" => route.clone())
        .record(start.elapsed().as_secs_f64());
    counter!(
        REQUESTS_TOTAL,
        "method" => method,
        "route" => route,
        "status" => response.status().as_u16().to_string()
    )
    .increment(1);

    response
}

/// Router exposing the Prometheus scrape endpoint.
pub fn metrics_app(handle: PrometheusHandle) -> Router {
    Router::new().route("/metrics", get(move || async move { handle.render() }))
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Activity {
    QuestionCreated,
    QuestionDeleted,
    QuestionSearched,
    QuizQuestionServed,
    QuizCompleted,
}

impl Activity {
    const fn counter_name(self) -> &'static str {
        match self {
            Activity::QuestionCreated => "trivia_questions_created_total",
            Activity::QuestionDeleted => "trivia_questions_deleted_total",
            Activity::QuestionSearched => "trivia_question_searches_total",
            Activity::QuizQuestionServed => "trivia_quiz_questions_served_total",
            Activity::QuizCompleted => "trivia_quiz_rounds_completed_total",
        }
    }

    fn record(self) {
        if is_observability_enabled() {
            counter!(self.counter_name()).increment(1);
        }
    }
}

pub fn track_question_created() {
    Activity::QuestionCreated.record();
}

pub fn track_question_deleted() {
    Activity::QuestionDeleted.record();
}

pub fn track_question_search() {
    Activity::QuestionSearched.record();
}

pub fn track_quiz_question_served() {
    Activity::QuizQuestionServed.record();
}

pub fn track_quiz_completed() {
    Activity::QuizCompleted.record();
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag(""));
        assert!(!parse_flag("false"));
        assert!(!parse_flag(" FALSE "));
        assert!(!parse_flag("0"));
    }

    #[test]
    fn test_duration_buckets_are_increasing() {
        assert!(REQUEST_DURATION_BUCKETS.windows(2).all(|w| w[0] < w[1]));
        assert!(REQUEST_DURATION_BUCKETS.iter().all(|b| *b > 0.0));
    }

    #[test]
    fn test_activity_counters_are_distinct() {
        let all = [
            Activity::QuestionCreated,
            Activity::QuestionDeleted,
            Activity::QuestionSearched,
            Activity::QuizQuestionServed,
            Activity::QuizCompleted,
        ];
        let names: HashSet<_> = all.iter().map(|a| a.counter_name()).collect();

        assert_eq!(names.len(), all.len());
        assert!(names.iter().all(|n| n.starts_with("trivia_") && n.ends_with("_total")));
    }

    #[test]
    fn test_tracking_without_recorder_is_a_no_op() {
        track_question_created();
        track_quiz_completed();
    }
}
