//! Stand-in payloads for when no generated analysis is available.
//!
//! Each carries a [`Degraded`] marker so callers can tell it apart from a real
//! insight that simply reports nothing notable.

use rj_core::entities::{Degraded, InsightPayload};
use rj_core::enums::{DegradedReason, TaskStatus};
use rj_core::responses::DailySummary;

fn strings(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| (*s).to_string()).collect()
}

/// The generator call failed.
#[must_use]
pub fn generation_failed(status: TaskStatus, message: impl Into<String>) -> InsightPayload {
    InsightPayload {
        what_was_done: strings(&["Error generating insights"]),
        what_needs_to_be_next: strings(&["Please try refresh manually"]),
        estimated_time_left: "Unknown".into(),
        blockers: strings(&["AI service issue"]),
        progress: if status == TaskStatus::Done { 100 } else { 50 },
        degraded: Some(Degraded {
            reason: DegradedReason::GenerationFailed,
            message: Some(message.into()),
        }),
    }
}

/// The generator answered but no JSON object could be read from it.
#[must_use]
pub fn unparseable(status: TaskStatus) -> InsightPayload {
    InsightPayload {
        what_was_done: strings(&["Analysis in progress"]),
        what_needs_to_be_next: strings(&["Review task requirements"]),
        estimated_time_left: "TBD".into(),
        blockers: Vec::new(),
        progress: status.baseline_progress(),
        degraded: Some(Degraded {
            reason: DegradedReason::Unparseable,
            message: None,
        }),
    }
}

/// No generator is configured.
#[must_use]
pub fn unavailable(status: TaskStatus) -> InsightPayload {
    InsightPayload {
        what_was_done: strings(&["AI insights unavailable"]),
        what_needs_to_be_next: strings(&["Enable AI Insights service"]),
        estimated_time_left: "Unknown".into(),
        blockers: Vec::new(),
        progress: if status == TaskStatus::Done { 100 } else { 0 },
        degraded: Some(Degraded {
            reason: DegradedReason::Unavailable,
            message: None,
        }),
    }
}

#[must_use]
pub fn summary_unparseable() -> DailySummary {
    DailySummary {
        summary: "Daily analysis in progress".into(),
        suggestions: strings(&["Plan tomorrow's tasks"]),
        productivity_score: 70,
        focus_areas: strings(&["Task prioritization"]),
    }
}

#[must_use]
pub fn summary_failed() -> DailySummary {
    DailySummary {
        summary: "Unable to generate summary".into(),
        suggestions: strings(&["Check AI service connection"]),
        productivity_score: 0,
        focus_areas: Vec::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(TaskStatus::Todo, 50, 0, 0)]
    #[case(TaskStatus::InProgress, 50, 50, 0)]
    #[case(TaskStatus::Done, 100, 100, 100)]
    fn progress_depends_on_status(
        #[case] status: TaskStatus,
        #[case] failed: u8,
        #[case] unparsed: u8,
        #[case] missing: u8,
    ) {
        assert_eq!(generation_failed(status, "boom").progress, failed);
        assert_eq!(unparseable(status).progress, unparsed);
        assert_eq!(unavailable(status).progress, missing);
    }

    #[test]
    fn fallbacks_are_marked_and_not_empty() {
        for payload in [
            generation_failed(TaskStatus::Todo, "boom"),
            unparseable(TaskStatus::Todo),
            unavailable(TaskStatus::Todo),
        ] {
            assert!(payload.is_degraded());
            assert!(!payload.is_empty());
        }
        let failed = generation_failed(TaskStatus::Todo, "API error (500)");
        assert_eq!(
            failed.degraded.unwrap().message.as_deref(),
            Some("API error (500)")
        );
    }
}
