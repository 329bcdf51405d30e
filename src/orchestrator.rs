//! Ordered job list and its execution.
//!
//! Structural operations take `&mut self` and run operations take `&self`, so
//! the list cannot change while a run future is alive. The `running` latch
//! makes a second start request a silent no-op.

use futures::future::join_all;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::config::RunMode;
use crate::error::{JobError, ListError, RunError};
use crate::jobs::{Clipboard, Job, JobSlot, RunFlag};

/// Read-only listing of one slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSummary {
    pub index: usize,
    pub id: Uuid,
    pub kind: Option<String>,
    pub name: Option<String>,
    pub running: bool,
}

/// Owns the ordered job list.
#[derive(Debug, Default)]
pub struct JobOrchestrator {
    slots: Vec<JobSlot>,
    running: RunFlag,
}

impl JobOrchestrator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn slots(&self) -> &[JobSlot] {
        &self.slots
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&JobSlot> {
        self.slots.get(index)
    }

    pub fn get_mut(&mut self, index: usize) -> Option<&mut JobSlot> {
        self.slots.get_mut(index)
    }

    /// Append a job, initializing it first.
    pub fn add(&mut self, mut job: Box<dyn Job>) -> Uuid {
        job.initialize();
        let kind = job.kind();
        let slot = JobSlot::new(job);
        let id = slot.id;
        info!(slot = %id, kind, "Added job");
        self.slots.push(slot);
        id
    }

    /// Append a slot with no job.
    pub fn add_empty(&mut self) -> Uuid {
        let slot = JobSlot::empty();
        let id = slot.id;
        info!(slot = %id, "Added empty slot");
        self.slots.push(slot);
        id
    }

    /// Remove the slot at `index`, shifting later slots down.
    pub fn remove_at(&mut self, index: usize) -> Result<JobSlot, ListError> {
        self.check(index)?;
        let slot = self.slots.remove(index);
        info!(slot = %slot.id, index, "Removed slot");
        Ok(slot)
    }

    /// Relocate the slot at `from` to `to`; slots in between shift by one
    /// towards `from`.
    pub fn move_to(&mut self, from: usize, to: usize) -> Result<(), ListError> {
        self.check(from)?;
        self.check(to)?;
        if from == to {
            return Ok(());
        }
        let slot = self.slots.remove(from);
        info!(slot = %slot.id, from, to, "Moved slot");
        self.slots.insert(to, slot);
        Ok(())
    }

    /// Append a copy of the clipboard's job. No-op when the clipboard is empty.
    pub fn paste_from(&mut self, clipboard: &Clipboard) -> Option<Uuid> {
        let Some(job) = clipboard.paste() else {
            debug!("Clipboard empty; nothing to paste");
            return None;
        };
        Some(self.add(job))
    }

    /// Whether a run started by this orchestrator is in progress.
    pub fn is_running(&self) -> bool {
        self.running.is_set()
    }

    /// Whether any contained job reports itself as running.
    pub fn is_any_running(&self) -> bool {
        self.jobs().any(|(_, job)| job.is_running())
    }

    pub async fn start(&self, mode: RunMode) -> Result<(), RunError> {
        match mode {
            RunMode::Sequential => self.run_sequential().await,
            RunMode::Parallel => self.run_parallel().await,
        }
    }

    /// Execute every job in list order, one at a time. Stops at the first
    /// failure.
    pub async fn run_sequential(&self) -> Result<(), RunError> {
        let Some(_running) = self.running.try_enter() else {
            debug!("Run already in progress; start ignored");
            return Ok(());
        };
        info!(mode = %RunMode::Sequential, slots = self.slots.len(), "Starting run");

        for (id, job) in self.jobs() {
            if let Err(e) = job.execute().await {
                warn!(slot = %id, job = %job.name(), error = %e, "Job failed; run stopped");
                return Err(e.into());
            }
        }

        info!(mode = %RunMode::Sequential, "Run finished");
        Ok(())
    }

    /// Execute every job concurrently and wait for all of them. Failures are
    /// reported together once everything has settled.
    pub async fn run_parallel(&self) -> Result<(), RunError> {
        let Some(_running) = self.running.try_enter() else {
            debug!("Run already in progress; start ignored");
            return Ok(());
        };
        info!(mode = %RunMode::Parallel, slots = self.slots.len(), "Starting run");

        let runs = self
            .jobs()
            .map(|(id, job)| async move { (id, job, job.execute().await) });
        let failures: Vec<JobError> = join_all(runs)
            .await
            .into_iter()
            .filter_map(|(id, job, result)| {
                let e = result.err()?;
                warn!(slot = %id, job = %job.name(), error = %e, "Job failed");
                Some(e)
            })
            .collect();

        if !failures.is_empty() {
            return Err(RunError::Parallel { failures });
        }
        info!(mode = %RunMode::Parallel, "Run finished");
        Ok(())
    }

    pub fn summaries(&self) -> Vec<SlotSummary> {
        self.slots
            .iter()
            .enumerate()
            .map(|(index, slot)| SlotSummary {
                index,
                id: slot.id,
                kind: slot.job.as_ref().map(|j| j.kind().to_string()),
                name: slot.job.as_ref().map(|j| j.name().to_string()),
                running: slot.job.as_ref().is_some_and(|j| j.is_running()),
            })
            .collect()
    }

    /// Non-empty slots in list order.
    fn jobs(&self) -> impl Iterator<Item = (Uuid, &dyn Job)> {
        self.slots
            .iter()
            .filter_map(|slot| slot.job.as_deref().map(|job| (slot.id, job)))
    }

    fn check(&self, index: usize) -> Result<(), ListError> {
        if index < self.slots.len() {
            Ok(())
        } else {
            Err(ListError::OutOfRange {
                index,
                len: self.slots.len(),
            })
        }
    }
}
