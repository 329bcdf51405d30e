//! Built-in job kinds: transform, scene, debug, input and patrol jobs.

pub mod debug;
pub mod input;
pub mod movement;
pub mod patrol;
pub mod scene;

pub use debug::{DebugProbe, TemplateJob};
pub use input::{InputTrigger, KeyCode, Keyboard, NestedJob, TriggerType};
pub use movement::{MovementJob, RotationJob, ScalingJob};
pub use patrol::{PatrolMode, PatrolRoute, Waypoint};
pub use scene::SceneObjectJob;

use crate::jobs::JobRegistration;

/// Registration table of every job kind compiled into the crate.
pub fn registrations() -> Vec<JobRegistration> {
    vec![
        JobRegistration::of::<MovementJob>(),
        JobRegistration::of::<RotationJob>(),
        JobRegistration::of::<ScalingJob>(),
        JobRegistration::of::<SceneObjectJob>(),
        JobRegistration::of::<DebugProbe>(),
        JobRegistration::of::<TemplateJob>(),
        JobRegistration::of::<InputTrigger>(),
        JobRegistration::of::<PatrolRoute>(),
    ]
}
