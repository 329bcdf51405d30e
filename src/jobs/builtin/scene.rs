use std::time::Duration;

use async_trait::async_trait;
use tracing::info;

use crate::error::JobError;
use crate::jobs::{Job, JobKind, RunFlag, job_basics};
use crate::value::{
    Color, Curve, Gradient, HostHandle, LayerMask, Quat, Shape, Vec3, shape_of,
};

/// Works on a scene object through host handles.
#[derive(Debug)]
pub struct SceneObjectJob {
    pub name: String,
    pub target_object: HostHandle,
    pub target_transform: HostHandle,
    pub target_body: HostHandle,
    pub material: HostHandle,
    pub audio_clip: HostHandle,
    pub position: Vec3,
    pub rotation: Quat,
    pub color: Color,
    pub layer_mask: LayerMask,
    pub curve: Curve,
    pub gradient: Gradient,
    pub float_value: f32,
    pub int_value: i32,
    pub bool_value: bool,
    pub string_value: String,
    running: RunFlag,
}

impl Default for SceneObjectJob {
    fn default() -> Self {
        Self {
            name: "GameObject Handler".to_string(),
            target_object: HostHandle::unassigned("GameObject"),
            target_transform: HostHandle::unassigned("Transform"),
            target_body: HostHandle::unassigned("Rigidbody"),
            material: HostHandle::unassigned("Material"),
            audio_clip: HostHandle::unassigned("AudioClip"),
            position: Vec3::default(),
            rotation: Quat::default(),
            color: Color::WHITE,
            layer_mask: LayerMask::default(),
            curve: Curve::default(),
            gradient: Gradient::default(),
            float_value: 1.0,
            int_value: 0,
            bool_value: false,
            string_value: "Default".to_string(),
            running: RunFlag::new(),
        }
    }
}

crate::impl_inspect!(SceneObjectJob {
    field target_object: Shape::Handle,
    field target_transform: Shape::Handle,
    field target_body: Shape::Handle,
    field material: Shape::Handle,
    field audio_clip: Shape::Handle,
    field position: shape_of::<Vec3>(),
    field rotation: shape_of::<Quat>(),
    field color: shape_of::<Color>(),
    field layer_mask: shape_of::<LayerMask>(),
    field curve: shape_of::<Curve>(),
    field gradient: shape_of::<Gradient>(),
    field float_value: Shape::Float { range: None },
    field int_value: Shape::Int { range: None },
    field bool_value: Shape::Bool,
    field string_value: Shape::Text,
    property name: Shape::Text,
});

impl JobKind for SceneObjectJob {
    const KIND: &'static str = "SceneObjectJob";
    const DESCRIPTION: Option<&'static str> = Some("GameObject Handler");
    const CATEGORY: Option<&'static str> = Some("GameObject");
}

#[async_trait]
impl Job for SceneObjectJob {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        info!(job = %self.name, target = %self.target_object, "Starting");
        tokio::time::sleep(Duration::from_millis(1)).await;
        info!(job = %self.name, "Finished");
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use crate::jobs::deep_copy;
    use crate::value::{Inspect, Value};

    #[test]
    fn handles_survive_a_copy_by_reference() {
        let mut job = SceneObjectJob::default();
        job.target_object = HostHandle::new("GameObject", "Player", Arc::new(()));

        let copy = deep_copy(&job).job;
        assert_eq!(
            copy.get("target_object"),
            Some(Value::Handle(job.target_object.clone()))
        );
        assert_eq!(copy.get("string_value"), Some(Value::Text("Default".into())));
    }
}
