//! Keyboard-triggered execution of a nested job.

use std::collections::HashSet;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use async_trait::async_trait;
use tracing::{debug, info, warn};

use crate::error::{EditError, JobError};
use crate::jobs::{Job, JobKind, NESTED_JOB, RunFlag, job_basics};
use crate::value::{Field, HostHandle, Shape, Value, shape_of};

const POLL_INTERVAL: Duration = Duration::from_millis(10);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum KeyCode {
    #[default]
    Space,
    Enter,
    Escape,
    Tab,
    W,
    A,
    S,
    D,
}

crate::impl_enum_field!(KeyCode { Space, Enter, Escape, Tab, W, A, S, D });

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TriggerType {
    #[default]
    OnKeyDown,
    OnKeyUp,
    WhileKeyHeld,
}

crate::impl_enum_field!(TriggerType { OnKeyDown, OnKeyUp, WhileKeyHeld });

#[derive(Debug, Default)]
struct KeyState {
    held: HashSet<KeyCode>,
    pressed: HashSet<KeyCode>,
    released: HashSet<KeyCode>,
}

/// Host keyboard state shared with input jobs through a [`HostHandle`].
///
/// Press and release edges are consumed by the first poll that sees them.
#[derive(Debug, Default)]
pub struct Keyboard {
    state: Mutex<KeyState>,
}

impl Keyboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wrap in a handle that jobs can hold.
    pub fn handle(self: &Arc<Self>) -> HostHandle {
        HostHandle::new("Keyboard", "Keyboard", Arc::clone(self))
    }

    pub fn press(&self, key: KeyCode) {
        let mut state = self.lock();
        if state.held.insert(key) {
            state.pressed.insert(key);
        }
    }

    pub fn release(&self, key: KeyCode) {
        let mut state = self.lock();
        if state.held.remove(&key) {
            state.released.insert(key);
        }
    }

    pub fn key_down(&self, key: KeyCode) -> bool {
        self.lock().pressed.remove(&key)
    }

    pub fn key_up(&self, key: KeyCode) -> bool {
        self.lock().released.remove(&key)
    }

    pub fn is_held(&self, key: KeyCode) -> bool {
        self.lock().held.contains(&key)
    }

    fn lock(&self) -> MutexGuard<'_, KeyState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Job held by another job. Shown read-only; copies go through [`Job::nested`].
#[derive(Debug, Default)]
pub struct NestedJob(pub Option<Box<dyn Job>>);

impl Field for NestedJob {
    fn shape() -> Shape {
        Shape::Opaque(NESTED_JOB)
    }

    fn to_value(&self) -> Value {
        match &self.0 {
            Some(job) => Value::Opaque(format!("{} ({})", job.name(), job.kind())),
            None => Value::Opaque("None (Job)".to_string()),
        }
    }

    fn from_value(value: Value) -> Result<Self, EditError> {
        Err(EditError::UnsupportedShape {
            shape: format!("job reference ({})", value.type_name()),
        })
    }
}

/// Runs a nested job when a key event is seen.
#[derive(Debug)]
pub struct InputTrigger {
    pub name: String,
    pub trigger_key: KeyCode,
    pub trigger_type: TriggerType,
    pub job: NestedJob,
    pub repeat: bool,
    pub keyboard: HostHandle,
    running: RunFlag,
}

impl Default for InputTrigger {
    fn default() -> Self {
        Self {
            name: "InputTrigger".to_string(),
            trigger_key: KeyCode::Space,
            trigger_type: TriggerType::OnKeyDown,
            job: NestedJob::default(),
            repeat: false,
            keyboard: HostHandle::unassigned("Keyboard"),
            running: RunFlag::new(),
        }
    }
}

impl InputTrigger {
    pub fn new(key: KeyCode, trigger_type: TriggerType, job: Box<dyn Job>) -> Self {
        Self {
            trigger_key: key,
            trigger_type,
            job: NestedJob(Some(job)),
            ..Self::default()
        }
    }

    pub fn with_keyboard(mut self, keyboard: HostHandle) -> Self {
        self.keyboard = keyboard;
        self
    }

    fn triggered(&self, keyboard: &Keyboard) -> bool {
        match self.trigger_type {
            TriggerType::OnKeyDown => keyboard.key_down(self.trigger_key),
            TriggerType::OnKeyUp => keyboard.key_up(self.trigger_key),
            TriggerType::WhileKeyHeld => keyboard.is_held(self.trigger_key),
        }
    }
}

crate::impl_inspect!(InputTrigger {
    field trigger_key: shape_of::<KeyCode>(),
    field trigger_type: shape_of::<TriggerType>(),
    field job: shape_of::<NestedJob>(),
    field repeat: Shape::Bool,
    field keyboard: Shape::Handle,
    property name: Shape::Text,
});

impl JobKind for InputTrigger {
    const KIND: &'static str = "InputTrigger";
    const DESCRIPTION: Option<&'static str> =
        Some("Executes the selected job when the specified input event occurs.");
    const CATEGORY: Option<&'static str> = Some("Input Triggers");
}

#[async_trait]
impl Job for InputTrigger {
    job_basics!();

    fn initialize(&mut self) {
        info!(
            job = %self.name,
            key = ?self.trigger_key,
            trigger = ?self.trigger_type,
            "Initialized, waiting for input"
        );
        if let Some(nested) = self.job.0.as_mut() {
            nested.initialize();
        }
    }

    fn nested(&self) -> Option<&dyn Job> {
        self.job.0.as_deref()
    }

    fn set_nested(&mut self, job: Box<dyn Job>) {
        self.job = NestedJob(Some(job));
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        let Some(nested) = self.job.0.as_deref() else {
            warn!(job = %self.name, "No job to trigger");
            return Ok(());
        };
        let keyboard = self
            .keyboard
            .downcast::<Keyboard>()
            .ok_or_else(|| JobError::ExecutionFailed {
                job: self.name.clone(),
                reason: "no keyboard assigned".to_string(),
            })?;

        loop {
            if self.triggered(&keyboard) {
                info!(
                    job = %self.name,
                    key = ?self.trigger_key,
                    trigger = ?self.trigger_type,
                    nested = %nested.name(),
                    "Input detected"
                );
                nested.execute().await?;
                if !self.repeat {
                    break;
                }
            }
            tokio::time::sleep(POLL_INTERVAL).await;
        }

        debug!(job = %self.name, "Input trigger completed");
        Ok(())
    }
}
