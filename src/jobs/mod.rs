//! Job capability, busy flags and the built-in job kinds.

pub mod builtin;
pub mod clone;
pub mod registry;

use std::fmt;
use std::sync::atomic::{AtomicBool, Ordering};

use async_trait::async_trait;
use uuid::Uuid;

use crate::error::JobError;
use crate::value::Inspect;

pub use clone::{Clipboard, CloneOutcome, deep_copy};
pub use registry::{JobDescriptor, JobRegistration, JobRegistry};

/// An independently executable unit of work with editable members.
#[async_trait]
pub trait Job: Inspect + Send + Sync {
    /// Registered kind identifier.
    fn kind(&self) -> &'static str;

    fn name(&self) -> &str;

    fn set_name(&mut self, name: String);

    /// One-time setup when the job enters a list.
    fn initialize(&mut self);

    /// Do the work. `is_running` is true for the duration of the call,
    /// including when it fails.
    async fn execute(&self) -> Result<(), JobError>;

    fn is_running(&self) -> bool;

    /// New default instance of the same kind.
    fn fresh(&self) -> Box<dyn Job>;

    /// Job held inside this one, if any. [`deep_copy`] copies it
    /// recursively instead of going through the member list.
    fn nested(&self) -> Option<&dyn Job> {
        None
    }

    /// Install the copy of [`Job::nested`] on a fresh instance.
    fn set_nested(&mut self, _job: Box<dyn Job>) {}
}

/// Opaque shape name of a member that holds a nested job.
pub const NESTED_JOB: &str = "Job";

impl fmt::Debug for dyn Job {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Job")
            .field("kind", &self.kind())
            .field("name", &self.name())
            .field("running", &self.is_running())
            .finish()
    }
}

/// Static registration metadata of a concrete job kind.
pub trait JobKind: Job + Default + 'static {
    const KIND: &'static str;
    const DESCRIPTION: Option<&'static str> = None;
    const CATEGORY: Option<&'static str> = None;
}

/// Atomic busy flag.
#[derive(Debug, Default)]
pub struct RunFlag(AtomicBool);

impl RunFlag {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_set(&self) -> bool {
        self.0.load(Ordering::SeqCst)
    }

    /// Raise the flag until the guard drops.
    pub fn enter(&self) -> RunGuard<'_> {
        self.0.store(true, Ordering::SeqCst);
        RunGuard(self)
    }

    /// Raise the flag only if it is down. Single-flight latch.
    pub fn try_enter(&self) -> Option<RunGuard<'_>> {
        self.0
            .compare_exchange(false, true, Ordering::SeqCst, Ordering::SeqCst)
            .ok()
            .map(|_| RunGuard(self))
    }
}

/// Lowers its [`RunFlag`] on drop, on every exit path.
#[must_use = "the flag drops as soon as the guard does"]
pub struct RunGuard<'a>(&'a RunFlag);

impl Drop for RunGuard<'_> {
    fn drop(&mut self) {
        self.0.0.store(false, Ordering::SeqCst);
    }
}

/// A list position holding a job or nothing.
#[derive(Debug)]
pub struct JobSlot {
    pub id: Uuid,
    pub job: Option<Box<dyn Job>>,
}

impl JobSlot {
    pub fn new(job: Box<dyn Job>) -> Self {
        Self {
            id: Uuid::new_v4(),
            job: Some(job),
        }
    }

    pub fn empty() -> Self {
        Self {
            id: Uuid::new_v4(),
            job: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.job.is_none()
    }
}

/// Boilerplate `Job` members for structs with `name` and `running` fields.
macro_rules! job_basics {
    () => {
        fn kind(&self) -> &'static str {
            <Self as $crate::jobs::JobKind>::KIND
        }

        fn name(&self) -> &str {
            &self.name
        }

        fn set_name(&mut self, name: String) {
            self.name = name;
        }

        fn is_running(&self) -> bool {
            self.running.is_set()
        }

        fn fresh(&self) -> Box<dyn $crate::jobs::Job> {
            Box::new(<Self as ::std::default::Default>::default())
        }
    };
}
pub(crate) use job_basics;
