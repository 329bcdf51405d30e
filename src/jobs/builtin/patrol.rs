//! Waypoint patrol. Its members cover every container shape the editor knows.

use std::collections::{BTreeMap, BTreeSet, VecDeque};
use std::time::Duration;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use tracing::{debug, info};

use crate::error::JobError;
use crate::jobs::{Job, JobKind, RunFlag, job_basics};
use crate::value::{Shape, Stack, Vec2, Vec3, shape_of};

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Waypoint {
    pub label: String,
    pub position: Vec3,
    pub dwell: Duration,
    pub checkpoint: bool,
}

crate::impl_inspect!(record Waypoint {
    field label: Shape::Text,
    field position: shape_of::<Vec3>(),
    field dwell: Shape::Duration,
    field checkpoint: Shape::Bool,
});

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PatrolMode {
    #[default]
    Once,
    Loop,
    PingPong,
}

crate::impl_enum_field!(PatrolMode { Once, Loop, PingPong });

#[derive(Debug)]
pub struct PatrolRoute {
    pub name: String,
    pub mode: PatrolMode,
    pub waypoints: Vec<Waypoint>,
    /// Passes over the route in `Loop` and `PingPong` modes.
    pub laps: i32,
    /// Scales every dwell time.
    pub pace: f32,
    pub corners: [Vec2; 4],
    pub pending: VecDeque<String>,
    pub history: Stack<i32>,
    pub weights: BTreeMap<String, f32>,
    pub tags: BTreeSet<String>,
    pub marker: (String, i32, bool),
    pub start_at: DateTime<Utc>,
    pub leg_time: Duration,
    pub fallback: Option<Waypoint>,
    pub(crate) running: RunFlag,
}

impl Default for PatrolRoute {
    fn default() -> Self {
        Self {
            name: "Patrol".to_string(),
            mode: PatrolMode::Once,
            waypoints: Vec::new(),
            laps: 1,
            pace: 1.0,
            corners: [Vec2::default(); 4],
            pending: VecDeque::new(),
            history: Stack::new(),
            weights: BTreeMap::new(),
            tags: BTreeSet::new(),
            marker: ("start".to_string(), 0, false),
            start_at: DateTime::<Utc>::UNIX_EPOCH,
            leg_time: Duration::from_secs(1),
            fallback: None,
            running: RunFlag::new(),
        }
    }
}

crate::impl_inspect!(PatrolRoute {
    field mode: shape_of::<PatrolMode>(),
    field waypoints: shape_of::<Vec<Waypoint>>(),
    field laps: Shape::int_in(1, 10),
    field pace: Shape::float_in(0.0, 1.0),
    field corners: shape_of::<[Vec2; 4]>(),
    field pending: shape_of::<VecDeque<String>>(),
    field history: shape_of::<Stack<i32>>(),
    field weights: shape_of::<BTreeMap<String, f32>>(),
    field tags: shape_of::<BTreeSet<String>>(),
    field marker: shape_of::<(String, i32, bool)>(),
    field start_at: Shape::Timestamp,
    field leg_time: Shape::Duration,
    field fallback: shape_of::<Option<Waypoint>>(),
    property name: Shape::Text,
});

impl JobKind for PatrolRoute {
    const KIND: &'static str = "PatrolRoute";
    const DESCRIPTION: Option<&'static str> = Some("Walks a list of waypoints, dwelling at each.");
    const CATEGORY: Option<&'static str> = Some("Movement");
}

impl PatrolRoute {
    /// Waypoint visit order for one full run.
    pub fn itinerary(&self) -> Vec<&Waypoint> {
        let laps = usize::try_from(self.laps.max(1)).unwrap_or(1);
        let forward = self.waypoints.iter();
        match self.mode {
            PatrolMode::Once => forward.collect(),
            PatrolMode::Loop => (0..laps).flat_map(|_| self.waypoints.iter()).collect(),
            PatrolMode::PingPong => (0..laps)
                .flat_map(|lap| {
                    let pass: Box<dyn Iterator<Item = &Waypoint>> = if lap % 2 == 0 {
                        Box::new(self.waypoints.iter())
                    } else {
                        Box::new(self.waypoints.iter().rev())
                    };
                    pass
                })
                .collect(),
        }
    }

    fn dwell(&self, waypoint: &Waypoint) -> Duration {
        let pace = f64::from(self.pace.clamp(0.0, 1.0));
        Duration::try_from_secs_f64(waypoint.dwell.as_secs_f64() * pace).unwrap_or(Duration::ZERO)
    }
}

#[async_trait]
impl Job for PatrolRoute {
    job_basics!();

    fn initialize(&mut self) {
        info!(job = %self.name, waypoints = self.waypoints.len(), "Initialized");
    }

    async fn execute(&self) -> Result<(), JobError> {
        let _running = self.running.enter();
        let itinerary = self.itinerary();
        info!(job = %self.name, stops = itinerary.len(), mode = ?self.mode, "Starting patrol");
        for waypoint in itinerary {
            debug!(job = %self.name, waypoint = %waypoint.label, position = %waypoint.position, "Arrived");
            tokio::time::sleep(self.dwell(waypoint)).await;
        }
        info!(job = %self.name, "Finished patrol");
        Ok(())
    }
}
