//! Prompt rendering and response extraction.

use std::fmt::Write as _;

use rj_core::entities::Task;
use serde::de::DeserializeOwned;

use crate::InsightContext;

fn bullet_list<T>(items: &[T], render: impl Fn(&T) -> String, empty: &str) -> String {
    if items.is_empty() {
        return empty.to_string();
    }
    items
        .iter()
        .map(|item| format!("- {}", render(item)))
        .collect::<Vec<_>>()
        .join("\n")
}

/// The per-task insight prompt.
#[must_use]
pub fn task_prompt(ctx: &InsightContext) -> String {
    let task = &ctx.task;
    let company = &ctx.company;

    let mut out = String::new();
    let _ = writeln!(out, "You are a productivity assistant for {company}.");
    out.push('\n');
    let _ = writeln!(out, "TASK: {}", task.title);
    let _ = writeln!(
        out,
        "DESCRIPTION: {}",
        task.description
            .as_deref()
            .filter(|d| !d.is_empty())
            .unwrap_or("No description provided")
    );
    let _ = writeln!(out, "STATUS: {}", task.status);
    let _ = writeln!(out, "PRIORITY: {}", task.priority);
    if let Some(deadline) = task.deadline {
        let _ = writeln!(out, "DEADLINE: {deadline}");
    }
    out.push('\n');
    let _ = writeln!(out, "PREVIOUS TASKS COMPLETED FOR {company}:");
    let _ = writeln!(
        out,
        "{}",
        bullet_list(
            &ctx.prior_tasks,
            |t: &Task| format!("{} ({})", t.title, t.status),
            "No previous tasks"
        )
    );
    out.push('\n');
    out.push_str("USER NOTES:\n");
    let _ = writeln!(
        out,
        "{}",
        bullet_list(&ctx.notes, |n| n.content.clone(), "No notes available")
    );
    out.push('\n');
    out.push_str(
        r#"Please provide insights about this task in JSON format with the following structure:
{
  "whatWasDone": ["array of what was already accomplished", "based on task status and previous work"],
  "whatNeedsToBeNext": ["array of suggested next steps", "based on the task requirements"],
  "estimatedTimeLeft": "estimated time to complete (e.g., '2-3 hours')",
  "blockers": ["potential blockers or challenges", "based on the task complexity"],
  "progress": percentage estimate (0-100)
}

Be specific and actionable. If this is a new task, provide initial guidance.
"#,
    );
    out
}

/// The end-of-day summary prompt.
#[must_use]
pub fn summary_prompt(completed: &[Task], current: &[Task], company: &str) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "You are a productivity assistant for {company}.");
    out.push('\n');
    out.push_str("TODAY'S COMPLETED TASKS:\n");
    let _ = writeln!(
        out,
        "{}",
        bullet_list(completed, |t| t.title.clone(), "No tasks completed today")
    );
    out.push('\n');
    out.push_str("CURRENT ACTIVE TASKS:\n");
    let _ = writeln!(
        out,
        "{}",
        bullet_list(
            current,
            |t| format!("{} ({})", t.title, t.status),
            "No active tasks"
        )
    );
    out.push('\n');
    out.push_str(
        r#"Please provide a brief daily summary and suggestions for tomorrow in JSON format:
{
  "summary": "brief summary of today's accomplishments",
  "suggestions": ["array of suggestions for tomorrow"],
  "productivityScore": number between 0-100,
  "focusAreas": ["areas that need attention"]
}
"#,
    );
    out
}

/// Parse the JSON object embedded in a model response.
///
/// Models wrap their JSON in prose or code fences, so this takes the text from
/// the first `{` through the last `}`. Returns `None` if there is no such span
/// or it does not parse as `T`.
pub fn extract_json<T: DeserializeOwned>(text: &str) -> Option<T> {
    let start = text.find('{')?;
    let end = text.rfind('}')?;
    if end < start {
        return None;
    }
    match serde_json::from_str(&text[start..=end]) {
        Ok(value) => Some(value),
        Err(error) => {
            tracing::debug!(%error, "model response JSON did not parse");
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;
    use rj_core::entities::{InsightPayload, StickyNote};
    use rj_core::enums::{Priority, TaskStatus};
    use rj_core::responses::DailySummary;

    fn context() -> InsightContext {
        let mut task = Task::new("t1", "Quarterly report");
        task.priority = Priority::High;
        task.deadline = NaiveDate::from_ymd_opt(2026, 11, 30);
        InsightContext {
            task,
            company: "Acme".into(),
            prior_tasks: vec![Task::new("t0", "Q2 report").with_status(TaskStatus::Done)],
            notes: vec![StickyNote {
                id: "n1".into(),
                content: "Ask finance for Q3 numbers".into(),
                color: None,
            }],
        }
    }

    #[test]
    fn task_prompt_lists_context() {
        let prompt = task_prompt(&context());
        assert!(prompt.starts_with("You are a productivity assistant for Acme."));
        assert!(prompt.contains("TASK: Quarterly report"));
        assert!(prompt.contains("DESCRIPTION: No description provided"));
        assert!(prompt.contains("STATUS: todo"));
        assert!(prompt.contains("PRIORITY: high"));
        assert!(prompt.contains("DEADLINE: 2026-11-30"));
        assert!(prompt.contains("PREVIOUS TASKS COMPLETED FOR Acme:\n- Q2 report (done)"));
        assert!(prompt.contains("USER NOTES:\n- Ask finance for Q3 numbers"));
        assert!(prompt.contains("\"whatNeedsToBeNext\""));
    }

    #[test]
    fn task_prompt_placeholders_when_empty() {
        let mut ctx = context();
        ctx.prior_tasks.clear();
        ctx.notes.clear();
        ctx.task.deadline = None;
        let prompt = task_prompt(&ctx);
        assert!(prompt.contains("No previous tasks"));
        assert!(prompt.contains("No notes available"));
        assert!(!prompt.contains("DEADLINE"));
    }

    #[test]
    fn summary_prompt_placeholders() {
        let prompt = summary_prompt(&[], &[], "Acme");
        assert!(prompt.contains("No tasks completed today"));
        assert!(prompt.contains("No active tasks"));
        assert!(prompt.contains("\"productivityScore\""));
    }

    #[test]
    fn extracts_fenced_json() {
        let text = "Here you go:\n```json\n{\"whatWasDone\": [\"Outline\"], \"progress\": 30}\n```\nGood luck!";
        let payload: InsightPayload = extract_json(text).unwrap();
        assert_eq!(payload.what_was_done, vec!["Outline".to_string()]);
        assert_eq!(payload.progress, 30);
    }

    #[test]
    fn extract_rejects_missing_or_broken_json() {
        assert!(extract_json::<InsightPayload>("no json here").is_none());
        assert!(extract_json::<InsightPayload>("} backwards {").is_none());
        assert!(extract_json::<InsightPayload>("{\"progress\": \"lots\"}").is_none());
    }

    #[test]
    fn extracts_daily_summary() {
        let text = r#"{"summary": "Good day", "suggestions": ["Rest"], "productivityScore": 85, "focusAreas": []}"#;
        let summary: DailySummary = extract_json(text).unwrap();
        assert_eq!(summary.productivity_score, 85);
    }
}
