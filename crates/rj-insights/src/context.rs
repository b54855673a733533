//! What a generator is told about a task.

use rj_core::entities::{Job, StickyNote, Task};
use rj_core::enums::TaskStatus;

/// Input of one insight generation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InsightContext {
    pub task: Task,
    /// Company the task's job belongs to.
    pub company: String,
    /// Finished tasks for the same company, excluding `task`.
    pub prior_tasks: Vec<Task>,
    pub notes: Vec<StickyNote>,
}

impl InsightContext {
    /// Gather the context for `task` from the workspace.
    ///
    /// The company comes from the task's job, or `default_company` when the
    /// task has no job or its job is unknown. Prior tasks are the `done` tasks
    /// whose job belongs to that same company.
    #[must_use]
    pub fn assemble(
        task: &Task,
        jobs: &[Job],
        all_tasks: &[Task],
        notes: &[StickyNote],
        default_company: &str,
    ) -> Self {
        let company_of = |t: &Task| -> Option<&str> {
            let job_id = t.job_id.as_deref()?;
            jobs.iter()
                .find(|j| j.id == job_id)
                .map(|j| j.company.as_str())
        };

        let company = company_of(task).unwrap_or(default_company).to_string();
        let prior_tasks = all_tasks
            .iter()
            .filter(|t| {
                t.id != task.id
                    && t.status == TaskStatus::Done
                    && company_of(t) == Some(company.as_str())
            })
            .cloned()
            .collect();

        Self {
            task: task.clone(),
            company,
            prior_tasks,
            notes: notes.to_vec(),
        }
    }

    pub fn task_id(&self) -> &str {
        &self.task.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn job(id: &str, company: &str) -> Job {
        Job {
            id: id.into(),
            name: format!("{company} role"),
            company: company.into(),
            color: "#3B82F6".into(),
        }
    }

    #[test]
    fn prior_tasks_are_done_tasks_of_the_same_company() {
        let jobs = vec![job("j1", "Acme"), job("j2", "Acme"), job("j3", "Globex")];
        let current = Task::new("t1", "Report").with_job("j1");
        let tasks = vec![
            current.clone(),
            Task::new("t2", "Old report")
                .with_job("j2")
                .with_status(TaskStatus::Done),
            Task::new("t3", "Pending").with_job("j1"),
            Task::new("t4", "Other company")
                .with_job("j3")
                .with_status(TaskStatus::Done),
            Task::new("t5", "No job").with_status(TaskStatus::Done),
        ];

        let ctx = InsightContext::assemble(&current, &jobs, &tasks, &[], "Unknown Company");
        assert_eq!(ctx.company, "Acme");
        let ids: Vec<_> = ctx.prior_tasks.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, vec!["t2"]);
    }

    #[test]
    fn task_without_job_uses_default_company() {
        let task = Task::new("t1", "Loose end");
        let ctx = InsightContext::assemble(&task, &[], &[task.clone()], &[], "Unknown Company");
        assert_eq!(ctx.company, "Unknown Company");
        assert!(ctx.prior_tasks.is_empty());
        assert_eq!(ctx.task_id(), "t1");
    }
}
