//! Session bookkeeping.
//!
//! Everything here is synchronous and runs under the tracker's state lock. Each
//! transition mutates the local view first and returns the store writes it
//! implies; the caller sends them after releasing the lock.

use chrono::{DateTime, Utc};
use rj_core::clock::elapsed_ms;
use rj_core::entities::{
    ActiveSession, LastCompleted, PausedSession, Task, TrackerSnapshot, WorkSession,
};
use rj_core::enums::{StopPolicy, TaskStatus};
use rj_store::TaskUpdate;

use crate::{Lookup, TrackerError, Transition};

pub type PendingWrite = (String, TaskUpdate);

#[derive(Debug, Default)]
pub struct TrackerState {
    tasks: Vec<Task>,
    current: Option<ActiveSession>,
    /// Keyed uniquely by task id, most recently paused first.
    paused: Vec<PausedSession>,
    last_completed: Option<LastCompleted>,
}

impl TrackerState {
    pub const fn new(tasks: Vec<Task>) -> Self {
        Self {
            tasks,
            current: None,
            paused: Vec::new(),
            last_completed: None,
        }
    }

    pub fn task(&self, task_id: &str) -> Option<&Task> {
        self.tasks.iter().find(|t| t.id == task_id)
    }

    fn task_mut(&mut self, task_id: &str) -> Option<&mut Task> {
        self.tasks.iter_mut().find(|t| t.id == task_id)
    }

    pub fn tasks(&self) -> &[Task] {
        &self.tasks
    }

    pub const fn current(&self) -> Option<&ActiveSession> {
        self.current.as_ref()
    }

    pub fn paused(&self) -> &[PausedSession] {
        &self.paused
    }

    pub const fn last_completed(&self) -> Option<&LastCompleted> {
        self.last_completed.as_ref()
    }

    fn is_tracked(&self, task_id: &str) -> bool {
        self.current.as_ref().is_some_and(|c| c.task_id == task_id)
            || self.paused.iter().any(|p| p.task_id == task_id)
    }

    fn take_paused(&mut self, task_id: &str) -> Option<PausedSession> {
        let idx = self.paused.iter().position(|p| p.task_id == task_id)?;
        Some(self.paused.remove(idx))
    }

    /// Add a finished span to the task's total. Returns the update carrying the
    /// new absolute total, or `None` if the task left the local view.
    fn book(&mut self, task_id: &str, span_ms: u64, now: DateTime<Utc>) -> Option<TaskUpdate> {
        let Some(task) = self.task_mut(task_id) else {
            tracing::warn!(task_id, span_ms, "booked span for a task missing from the local view");
            return None;
        };
        task.total_time_spent_ms = task.total_time_spent_ms.saturating_add(span_ms);
        task.last_worked_on = Some(now);
        Some(
            TaskUpdate::builder()
                .total_time_spent_ms(task.total_time_spent_ms)
                .last_worked_on(now)
                .build(),
        )
    }

    /// Suspend the active session, if any, booking its elapsed time.
    ///
    /// Both `start` and `resume` go through here, so a preempted session has
    /// exactly the shape an explicit pause would give it.
    fn preempt_active(
        &mut self,
        now: DateTime<Utc>,
        writes: &mut Vec<PendingWrite>,
    ) -> Option<PausedSession> {
        let active = self.current.take()?;
        let span_ms = elapsed_ms(active.start_time, now);

        if let Some(update) = self.book(&active.task_id, span_ms, now) {
            writes.push((active.task_id.clone(), update));
        }

        let entry = PausedSession {
            task_id: active.task_id,
            title: active.title,
            job_id: active.job_id,
            started_at: active.start_time,
            total_time_ms: span_ms,
            last_paused: now,
            session_notes: active.session_notes,
        };
        self.paused.retain(|p| p.task_id != entry.task_id);
        self.paused.insert(0, entry.clone());

        tracing::debug!(task_id = %entry.task_id, elapsed_ms = span_ms, "session suspended");
        Some(entry)
    }

    fn ensure_in_progress(&mut self, task_id: &str, writes: &mut Vec<PendingWrite>) {
        if let Some(task) = self.task_mut(task_id) {
            if task.status != TaskStatus::InProgress {
                task.status = TaskStatus::InProgress;
                writes.push((
                    task_id.to_string(),
                    TaskUpdate::builder().status(TaskStatus::InProgress).build(),
                ));
            }
        }
    }

    fn activate(&mut self, task: &Task, notes: String, now: DateTime<Utc>) -> ActiveSession {
        let session = ActiveSession {
            task_id: task.id.clone(),
            title: task.title.clone(),
            job_id: task.job_id.clone(),
            start_time: now,
            session_notes: notes,
        };
        self.current = Some(session.clone());
        session
    }

    /// Begin tracking `task_id`, preempting whatever is active.
    ///
    /// Starting the task that is already active changes nothing. Starting a
    /// paused task consumes its paused entry, like `resume`.
    pub fn start(
        &mut self,
        task_id: &str,
        now: DateTime<Utc>,
        writes: &mut Vec<PendingWrite>,
    ) -> Result<Transition, TrackerError> {
        let task = self
            .task(task_id)
            .cloned()
            .ok_or_else(|| TrackerError::not_found(task_id, Lookup::Task))?;

        if self.current.as_ref().is_some_and(|c| c.task_id == task_id) {
            tracing::debug!(task_id, "start ignored, task already active");
            return Ok(Transition::default());
        }

        let preempted = self.preempt_active(now, writes);
        let notes = self
            .take_paused(task_id)
            .map(|p| p.session_notes)
            .unwrap_or_default();
        self.ensure_in_progress(task_id, writes);
        let active = self.activate(&task, notes, now);

        tracing::debug!(task_id, "session started");
        Ok(Transition {
            preempted,
            active: Some(active),
            ..Transition::default()
        })
    }

    /// Suspend the active session. No-op without one.
    pub fn pause(&mut self, now: DateTime<Utc>, writes: &mut Vec<PendingWrite>) -> Transition {
        Transition {
            paused: self.preempt_active(now, writes),
            ..Transition::default()
        }
    }

    /// Reactivate a paused session with a fresh start time.
    pub fn resume(
        &mut self,
        task_id: &str,
        now: DateTime<Utc>,
        writes: &mut Vec<PendingWrite>,
    ) -> Result<Transition, TrackerError> {
        let entry = self
            .take_paused(task_id)
            .ok_or_else(|| TrackerError::not_found(task_id, Lookup::PausedSession))?;

        // The resumed task's entry is already out of the paused set, so the
        // outgoing session cannot collide with it.
        let preempted = self.preempt_active(now, writes);

        let task = self.task(task_id).cloned().unwrap_or_else(|| {
            let mut placeholder = Task::new(entry.task_id.clone(), entry.title.clone());
            placeholder.job_id.clone_from(&entry.job_id);
            placeholder
        });
        self.ensure_in_progress(task_id, writes);
        let active = self.activate(&task, entry.session_notes, now);

        tracing::debug!(task_id, carried_ms = entry.total_time_ms, "session resumed");
        Ok(Transition {
            preempted,
            active: Some(active),
            ..Transition::default()
        })
    }

    /// Finish tracking `task_id`, from either the active or the paused state.
    ///
    /// An active session books `now - start_time`. A paused session was booked
    /// when it was suspended, so it books nothing more; its record still gets
    /// the suspended span's duration.
    pub fn stop(
        &mut self,
        task_id: &str,
        policy: StopPolicy,
        now: DateTime<Utc>,
        writes: &mut Vec<PendingWrite>,
    ) -> Result<Transition, TrackerError> {
        let (title, job_id, started_at, duration_ms, notes, booked) =
            match self.current.take_if(|c| c.task_id == task_id) {
                Some(active) => {
                    let span_ms = elapsed_ms(active.start_time, now);
                    (
                        active.title,
                        active.job_id,
                        active.start_time,
                        span_ms,
                        active.session_notes,
                        span_ms,
                    )
                }
                None => {
                    let entry = self
                        .take_paused(task_id)
                        .ok_or_else(|| TrackerError::not_found(task_id, Lookup::TrackedSession))?;
                    (
                        entry.title,
                        entry.job_id,
                        entry.started_at,
                        entry.total_time_ms,
                        entry.session_notes,
                        0,
                    )
                }
            };

        let record = WorkSession {
            start_time: started_at,
            end_time: now,
            duration_ms,
            notes,
        };

        if let Some(mut update) = self.book(task_id, booked, now) {
            if let Some(task) = self.task_mut(task_id) {
                task.work_sessions.push(record.clone());
                if policy == StopPolicy::MarkDone {
                    task.status = TaskStatus::Done;
                    update.status = Some(TaskStatus::Done);
                }
            }
            update.append_work_session = Some(record);
            writes.push((task_id.to_string(), update));
        }

        let completed = LastCompleted {
            task_id: task_id.to_string(),
            title,
            job_id,
            duration_ms,
            completed_at: now,
        };
        self.last_completed = Some(completed.clone());

        tracing::debug!(task_id, elapsed_ms = duration_ms, booked_ms = booked, %policy, "session stopped");
        Ok(Transition {
            completed: Some(completed),
            ..Transition::default()
        })
    }

    /// Replace the active session's notes. Returns `false` without one.
    pub fn set_session_notes(&mut self, notes: String) -> bool {
        match self.current.as_mut() {
            Some(current) => {
                current.session_notes = notes;
                true
            }
            None => false,
        }
    }

    /// Fold a fresh store listing into the local view.
    ///
    /// Descriptive fields follow the store. Timing fields never move backwards:
    /// the larger total, the later `last_worked_on`, and the longer session
    /// history win. Tasks gone from the store are dropped unless tracked.
    pub fn merge_remote(&mut self, remote: Vec<Task>) {
        let mut merged = Vec::with_capacity(remote.len());
        for mut incoming in remote {
            if let Some(local) = self.task(&incoming.id) {
                incoming.total_time_spent_ms =
                    incoming.total_time_spent_ms.max(local.total_time_spent_ms);
                incoming.last_worked_on = incoming.last_worked_on.max(local.last_worked_on);
                if local.work_sessions.len() > incoming.work_sessions.len() {
                    incoming.work_sessions.clone_from(&local.work_sessions);
                }
            }
            merged.push(incoming);
        }

        let kept: Vec<Task> = self
            .tasks
            .iter()
            .filter(|t| self.is_tracked(&t.id) && !merged.iter().any(|m| m.id == t.id))
            .cloned()
            .collect();
        merged.extend(kept);
        self.tasks = merged;
    }

    pub fn elapsed_ms(&self, now: DateTime<Utc>) -> u64 {
        self.current
            .as_ref()
            .map_or(0, |c| elapsed_ms(c.start_time, now))
    }

    pub fn snapshot(&self, now: DateTime<Utc>) -> TrackerSnapshot {
        TrackerSnapshot {
            current: self.current.clone(),
            current_elapsed_ms: self.elapsed_ms(now),
            paused: self.paused.clone(),
            last_completed: self.last_completed.clone(),
        }
    }
}
