//! Deep copies of jobs and the single-slot clipboard.

use tracing::{debug, warn};

use crate::error::CloneError;
use crate::jobs::{Job, NESTED_JOB};
use crate::value::{Inspect, Shape};

/// Result of [`deep_copy`]: the copy plus every member that could not be
/// carried over. Failed members keep the copy's own default.
#[derive(Debug)]
pub struct CloneOutcome {
    pub job: Box<dyn Job>,
    pub failures: Vec<CloneError>,
}

impl CloneOutcome {
    pub fn is_complete(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Copy every member of `source` into a fresh instance of the same kind.
///
/// Members travel as owned [`Value`](crate::value::Value) trees, so nothing
/// mutable is shared between source and copy. Host handles are the exception:
/// they are copied by reference. A nested job is deep-copied in turn.
pub fn deep_copy(source: &dyn Job) -> CloneOutcome {
    let mut job = source.fresh();
    let schema = source.schema();
    let mut failures = Vec::new();

    for member in schema.members() {
        if matches!(member.shape, Shape::Opaque(name) if name == NESTED_JOB) {
            continue;
        }
        let Some(value) = source.get(member.name) else {
            continue;
        };
        if let Err(e) = job.set(member.name, value) {
            let failure = CloneError::CloneFailure {
                kind: source.kind().to_string(),
                member: member.name.to_string(),
                reason: e.to_string(),
            };
            warn!(kind = source.kind(), member = member.name, error = %e, "Member left at default in copy");
            failures.push(failure);
        }
    }

    if let Some(nested) = source.nested() {
        let inner = deep_copy(nested);
        debug!(kind = source.kind(), nested = nested.kind(), "Copied nested job");
        failures.extend(inner.failures);
        job.set_nested(inner.job);
    }

    CloneOutcome { job, failures }
}

/// Holds at most one job copy. Pasting hands out a new copy each time and
/// leaves the held one in place.
#[derive(Debug, Default)]
pub struct Clipboard {
    held: Option<Box<dyn Job>>,
}

impl Clipboard {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the held job with a copy of `job`.
    pub fn copy(&mut self, job: &dyn Job) -> Vec<CloneError> {
        let outcome = deep_copy(job);
        debug!(kind = job.kind(), job = %job.name(), "Copied to clipboard");
        self.held = Some(outcome.job);
        outcome.failures
    }

    pub fn is_empty(&self) -> bool {
        self.held.is_none()
    }

    /// Kind of the held job, if any.
    pub fn peek_kind(&self) -> Option<&'static str> {
        self.held.as_ref().map(|job| job.kind())
    }

    /// A fresh copy of the held job.
    pub fn paste(&self) -> Option<Box<dyn Job>> {
        self.held.as_deref().map(|held| deep_copy(held).job)
    }

    pub fn clear(&mut self) {
        self.held = None;
    }
}

#[cfg(test)]
mod tests {
    use std::collections::{BTreeMap, BTreeSet, VecDeque};
    use std::time::Duration;

    use super::*;
    use crate::jobs::builtin::{
        DebugProbe, InputTrigger, KeyCode, MovementJob, PatrolRoute, TriggerType, Waypoint,
    };
    use crate::value::{Composite, Stack, Value, Vec2, Vec3};

    fn route() -> PatrolRoute {
        PatrolRoute {
            waypoints: vec![Waypoint {
                label: "gate".into(),
                position: Vec3::new(1.0, 0.0, 2.0),
                dwell: Duration::from_secs(3),
                checkpoint: true,
            }],
            weights: BTreeMap::from([("hill".to_string(), 0.25)]),
            fallback: Some(Waypoint::default()),
            tags: BTreeSet::from(["night".to_string()]),
            pending: VecDeque::from(["north".to_string()]),
            history: Stack(vec![7]),
            ..PatrolRoute::default()
        }
    }

    #[test]
    fn copy_matches_source_member_for_member() {
        let source = route();
        let outcome = deep_copy(&source);
        assert!(outcome.is_complete());
        for member in source.schema().members() {
            assert_eq!(outcome.job.get(member.name), source.get(member.name));
        }
    }

    #[test]
    fn mutating_the_copy_leaves_the_source_alone() {
        let source = route();
        let mut copy = deep_copy(&source).job;

        let Some(Value::Seq(mut waypoints)) = copy.get("waypoints") else {
            panic!("expected waypoints");
        };
        let Value::Record(first) = &mut waypoints[0] else {
            panic!("expected record");
        };
        *first.get_mut("label").unwrap() = Value::Text("moved".into());
        copy.set("waypoints", Value::Seq(waypoints)).unwrap();
        copy.set("weights", Value::Map(Vec::new())).unwrap();
        copy.set("fallback", Value::Null).unwrap();
        copy.set("tags", Value::Set(vec![Value::Text("day".into())]))
            .unwrap();
        copy.set(
            "marker",
            Value::Tuple(vec![
                Value::Text("end".into()),
                Value::Int(9),
                Value::Bool(true),
            ]),
        )
        .unwrap();
        copy.set("pending", Value::Seq(Vec::new())).unwrap();
        copy.set("history", Value::Seq(vec![Value::Int(1), Value::Int(2)]))
            .unwrap();
        let Some(Value::Seq(mut corners)) = copy.get("corners") else {
            panic!("expected corners");
        };
        corners[3] = Value::Composite(Composite::Vec2(Vec2 { x: 4.0, y: 4.0 }));
        copy.set("corners", Value::Seq(corners)).unwrap();

        assert_eq!(source.waypoints[0].label, "gate");
        assert_eq!(source.weights.len(), 1);
        assert!(source.fallback.is_some());
        assert_eq!(source.tags, BTreeSet::from(["night".to_string()]));
        assert_eq!(source.marker, ("start".to_string(), 0, false));
        assert_eq!(source.pending, VecDeque::from(["north".to_string()]));
        assert_eq!(source.history.len(), 1);
        assert_eq!(source.corners, [Vec2::default(); 4]);
        assert_ne!(copy.get("corners"), source.get("corners"));
        assert_ne!(copy.get("history"), source.get("history"));
    }

    #[test]
    fn nested_job_is_copied_recursively() {
        let source = InputTrigger::new(
            KeyCode::Enter,
            TriggerType::OnKeyUp,
            Box::new(MovementJob::with_speed(0.5)),
        );
        let outcome = deep_copy(&source);
        assert!(outcome.is_complete());
        assert_eq!(outcome.job.get("trigger_key"), Some(Value::Enum(1)));
        assert_eq!(
            outcome.job.get("job"),
            Some(Value::Opaque("Movement (MovementJob)".into()))
        );

        let Some(nested) = outcome.job.nested() else {
            panic!("copy lost its nested job");
        };
        assert_eq!(nested.get("speed"), Some(Value::Float(0.5)));

        let mut copy = outcome.job;
        let mut renamed = MovementJob::with_speed(2.0);
        renamed.set_name("Other".into());
        copy.set_nested(Box::new(renamed));
        assert_eq!(source.job.0.as_deref().map(|j| j.name()), Some("Movement"));
        assert_eq!(
            source.job.0.as_deref().and_then(|j| j.get("speed")),
            Some(Value::Float(0.5))
        );
    }

    #[test]
    fn empty_trigger_copies_without_nested_job() {
        let outcome = deep_copy(&InputTrigger::default());
        assert!(outcome.is_complete());
        assert!(outcome.job.nested().is_none());
    }

    #[test]
    fn clipboard_pastes_independent_copies() {
        let mut clipboard = Clipboard::new();
        assert!(clipboard.is_empty());
        assert!(clipboard.paste().is_none());

        let probe = DebugProbe::failing("probe");
        clipboard.copy(&probe);
        assert_eq!(clipboard.peek_kind(), Some("DebugProbe"));

        let mut first = clipboard.paste().unwrap();
        first.set_name("renamed".into());
        let second = clipboard.paste().unwrap();
        assert_eq!(second.name(), "probe");
        assert_eq!(second.get("fail"), Some(Value::Bool(true)));

        clipboard.clear();
        assert!(clipboard.is_empty());
    }
}
