//! Transform jobs: movement, rotation and scaling.

use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::JobError;
use crate::jobs::{Job, JobKind, RunFlag, job_basics};
use crate::value::{LayerMask, Shape, Vec3, shape_of};

/// Moves along `direction`; takes `speed` seconds.
#[derive(Debug)]
pub struct MovementJob {
    pub name: String,
    pub speed: f32,
    pub direction: Vec3,
    pub layer_mask: LayerMask,
    running: RunFlag,
}

impl Default for MovementJob {
    fn default() -> Self {
        Self {
            name: "Movement".to_string(),
            speed: 5.0,
            direction: Vec3::default(),
            layer_mask: LayerMask::default(),
            running: RunFlag::new(),
        }
    }
}

impl MovementJob {
    pub fn with_speed(speed: f32) -> Self {
        Self {
            speed,
            ..Self::default()
        }
    }
}

crate::impl_inspect!(MovementJob {
    field speed: Shape::Float { range: None },
    field direction: shape_of::<Vec3>(),
    field layer_mask: shape_of::<LayerMask>(),
    property name: Shape::Text,
});

impl JobKind for MovementJob {
    const KIND: &'static str = "MovementJob";
    const DESCRIPTION: Option<&'static str> = Some("Movement");
    const CATEGORY: Option<&'static str> = Some("Movement");
}

#[async_trait]
impl Job for MovementJob {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        info!(job = %self.name, speed = self.speed, "Starting movement");
        tokio::time::sleep(seconds(self.speed)).await;
        info!(job = %self.name, speed = self.speed, "Finished movement");
        Ok(())
    }
}

/// Rotates about `axis`.
#[derive(Debug)]
pub struct RotationJob {
    pub name: String,
    pub rotation_speed: f32,
    pub axis: Vec3,
    running: RunFlag,
}

impl Default for RotationJob {
    fn default() -> Self {
        Self {
            name: "Rotation".to_string(),
            rotation_speed: 30.0,
            axis: Vec3::UP,
            running: RunFlag::new(),
        }
    }
}

crate::impl_inspect!(RotationJob {
    field rotation_speed: Shape::Float { range: None },
    field axis: shape_of::<Vec3>(),
    property name: Shape::Text,
});

impl JobKind for RotationJob {
    const KIND: &'static str = "RotationJob";
    const DESCRIPTION: Option<&'static str> = Some("Rotation");
    const CATEGORY: Option<&'static str> = Some("Rotation");
}

#[async_trait]
impl Job for RotationJob {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        tokio::time::sleep(Duration::from_millis(1)).await;
        info!(job = %self.name, speed = self.rotation_speed, axis = %self.axis, "Rotated");
        Ok(())
    }
}

/// Scales towards `target_scale`.
#[derive(Debug)]
pub struct ScalingJob {
    pub name: String,
    pub target_scale: Vec3,
    pub duration: f32,
    running: RunFlag,
}

impl Default for ScalingJob {
    fn default() -> Self {
        Self {
            name: "Scaling".to_string(),
            target_scale: Vec3::ONE,
            duration: 1.0,
            running: RunFlag::new(),
        }
    }
}

crate::impl_inspect!(ScalingJob {
    field target_scale: shape_of::<Vec3>(),
    field duration: Shape::Float { range: None },
    property name: Shape::Text,
});

impl JobKind for ScalingJob {
    const KIND: &'static str = "ScalingJob";
    const DESCRIPTION: Option<&'static str> = Some("Scaling");
    const CATEGORY: Option<&'static str> = Some("Scaling");
}

#[async_trait]
impl Job for ScalingJob {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        info!(job = %self.name, target = %self.target_scale, "Scaling");
        tokio::time::sleep(Duration::from_millis(1)).await;
        Ok(())
    }
}

/// Non-negative delay of `secs` seconds; NaN and negative inputs give zero.
pub(crate) fn seconds(secs: f32) -> Duration {
    Duration::try_from_secs_f32(secs.max(0.0)).unwrap_or(Duration::ZERO)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::{Inspect, Value};

    #[tokio::test]
    async fn movement_runs_for_speed_seconds() {
        let job = MovementJob::with_speed(0.02);
        let started = tokio::time::Instant::now();
        job.execute().await.unwrap();
        assert!(started.elapsed() >= Duration::from_millis(19));
        assert!(!job.is_running());
    }

    #[tokio::test]
    async fn rotation_clears_running_flag() {
        let job = RotationJob::default();
        job.execute().await.unwrap();
        assert!(!job.is_running());
    }

    #[test]
    fn name_is_an_editable_property() {
        let mut job = ScalingJob::default();
        job.set("name", Value::Text("Grow".into())).unwrap();
        assert_eq!(job.name(), "Grow");
        assert_eq!(job.kind(), "ScalingJob");
    }

    #[test]
    fn bad_delays_clamp_to_zero() {
        assert_eq!(seconds(-1.0), Duration::ZERO);
        assert_eq!(seconds(f32::NAN), Duration::ZERO);
        assert_eq!(seconds(0.5), Duration::from_millis(500));
    }
}
