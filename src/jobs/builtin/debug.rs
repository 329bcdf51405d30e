//! Diagnostic jobs.

use std::time::Duration;

use async_trait::async_trait;
use tracing::{info, warn};

use crate::error::JobError;
use crate::jobs::{Job, JobKind, RunFlag, job_basics};
use crate::value::{HostHandle, Shape, Vec3, shape_of};

/// Logs its members and waits `delay_ms`. Fails on purpose when `fail` is set.
#[derive(Debug)]
pub struct DebugProbe {
    pub name: String,
    pub target_scale: Vec3,
    pub delay_ms: u32,
    pub fail: bool,
    pub target: HostHandle,
    running: RunFlag,
}

impl Default for DebugProbe {
    fn default() -> Self {
        Self {
            name: "DebugProbe".to_string(),
            target_scale: Vec3::ONE,
            delay_ms: 1,
            fail: false,
            target: HostHandle::unassigned("GameObject"),
            running: RunFlag::new(),
        }
    }
}

impl DebugProbe {
    pub fn failing(name: &str) -> Self {
        Self {
            name: name.to_string(),
            fail: true,
            ..Self::default()
        }
    }
}

crate::impl_inspect!(DebugProbe {
    field target_scale: shape_of::<Vec3>(),
    field delay_ms: Shape::int_in(0, 10_000),
    field fail: Shape::Bool,
    field target: Shape::Handle,
    property name: Shape::Text,
});

impl JobKind for DebugProbe {
    const KIND: &'static str = "DebugProbe";
    const DESCRIPTION: Option<&'static str> = Some("Debug test.");
    const CATEGORY: Option<&'static str> = Some("Debug");
}

#[async_trait]
impl Job for DebugProbe {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        info!(job = %self.name, target = %self.target, scale = %self.target_scale, "Starting");
        tokio::time::sleep(Duration::from_millis(self.delay_ms.into())).await;
        if self.fail {
            warn!(job = %self.name, "Probe failing on request");
            return Err(JobError::ExecutionFailed {
                job: self.name.clone(),
                reason: "probe asked to fail".to_string(),
            });
        }
        info!(job = %self.name, "Finished");
        Ok(())
    }
}

/// Starting point for new job kinds. Carries no registration metadata.
#[derive(Debug)]
pub struct TemplateJob {
    pub name: String,
    running: RunFlag,
}

impl Default for TemplateJob {
    fn default() -> Self {
        Self {
            name: "Template".to_string(),
            running: RunFlag::new(),
        }
    }
}

crate::impl_inspect!(TemplateJob {
    property name: Shape::Text,
});

impl JobKind for TemplateJob {
    const KIND: &'static str = "TemplateJob";
}

#[async_trait]
impl Job for TemplateJob {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(())
    }
}
