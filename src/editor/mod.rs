//! Type-driven value editor.
//!
//! The editor walks a [`Value`] alongside its declared [`Shape`], draws one
//! widget per leaf through the host's [`Ui`], and writes edits back in place.
//! Every branch reports whether the value changed so that callers only write
//! back what actually moved. Nothing is cached between passes: the whole tree
//! is re-walked on every call.

mod containers;
mod scripted;
mod ui;

use std::time::Duration;

use chrono::{DateTime, NaiveDateTime, Utc};
use tracing::{debug, warn};

pub use scripted::{Input, ScriptedUi, Widget};
pub use ui::Ui;

use crate::error::EditError;
use crate::jobs::Job;
use crate::value::{Composite, CompositeKind, Inspect, Schema, Shape, TIMESTAMP_FORMAT, Value};

/// Render every member of `job` and write changed members back into it.
///
/// Returns true when at least one member changed.
pub fn render_and_apply(job: &mut dyn Job, ui: &mut dyn Ui) -> bool {
    ValueEditor::new(ui).edit_record("", job)
}

/// Recursive editor over a host widget surface.
pub struct ValueEditor<'a> {
    ui: &'a mut dyn Ui,
    path: Vec<String>,
}

impl<'a> ValueEditor<'a> {
    pub fn new(ui: &'a mut dyn Ui) -> Self {
        Self {
            ui,
            path: Vec::new(),
        }
    }

    /// Edit `value` as a `shape` under `label`. Returns true when changed.
    pub fn edit(&mut self, label: &str, value: &mut Value, shape: &Shape) -> bool {
        if label.is_empty() {
            return self.dispatch(value, shape);
        }
        self.nested(label, |editor| editor.dispatch(value, shape))
    }

    /// Edit every member of a live record, writing changed members back into
    /// the same instance. Returns true when at least one write was accepted.
    pub fn edit_record<T: Inspect + ?Sized>(&mut self, label: &str, target: &mut T) -> bool {
        let schema = target.schema();
        let mut edit_members = |editor: &mut Self| {
            let mut changed = false;
            for member in schema.edit_order() {
                let Some(mut value) = target.get(member.name) else {
                    continue;
                };
                if !editor.edit(member.name, &mut value, &member.shape) {
                    continue;
                }
                match target.set(member.name, value) {
                    Ok(()) => changed = true,
                    Err(e) => warn!(
                        record = schema.name(),
                        member = member.name,
                        error = %e,
                        "Rejected member write"
                    ),
                }
            }
            changed
        };

        if label.is_empty() {
            return edit_members(self);
        }
        self.nested(label, |editor| {
            let id = editor.id("");
            editor.ui.begin_group(&id);
            let changed = edit_members(editor);
            editor.ui.end_group();
            changed
        })
    }

    fn dispatch(&mut self, value: &mut Value, shape: &Shape) -> bool {
        if matches!(value, Value::Null) {
            return self.edit_null(value, shape);
        }
        match shape {
            Shape::Optional(inner) => self.dispatch(value, inner),
            Shape::Enum(variants) => self.edit_enum(value, variants),
            Shape::Bool | Shape::Int { .. } | Shape::Float { .. } | Shape::Text => {
                self.edit_scalar(value, shape)
            }
            Shape::Composite(kind) => self.edit_composite(value, *kind, shape),
            Shape::Map(key, item) => self.edit_map(value, key, item, shape),
            Shape::Set(elem) => self.edit_set(value, elem, shape),
            Shape::Seq(kind, elem) => self.edit_seq(value, *kind, elem, shape),
            Shape::Tuple(items) => self.edit_tuple(value, items, shape),
            Shape::Timestamp => self.edit_timestamp(value, shape),
            Shape::Duration => self.edit_duration(value, shape),
            Shape::Record(schema) => self.edit_nested_record(value, schema, shape),
            Shape::Handle => {
                let id = self.id("");
                self.ui.read_only(&id, &value.to_string());
                false
            }
            Shape::Opaque(_) => self.unsupported(value, shape),
        }
    }

    fn edit_null(&mut self, value: &mut Value, shape: &Shape) -> bool {
        if let Shape::Optional(inner) = shape {
            let id = self.id("");
            let create = self.id("create");
            self.ui.read_only(&id, "null");
            if !self.ui.button(&create, "Create Instance") {
                return false;
            }
            return match inner.default_value() {
                Some(fresh) => {
                    debug!(path = %id, shape = %inner.describe(), "Created instance");
                    *value = fresh;
                    true
                }
                None => self.unsupported(value, inner),
            };
        }
        match shape.default_value() {
            Some(fresh) if fresh != Value::Null => {
                *value = fresh;
                self.dispatch(value, shape);
                true
            }
            _ => self.unsupported(value, shape),
        }
    }

    fn edit_enum(&mut self, value: &mut Value, variants: &[&str]) -> bool {
        let Value::Enum(selected) = value else {
            return self.unsupported(value, &Shape::Enum(&[]));
        };
        if variants.is_empty() {
            return self.unsupported(value, &Shape::Enum(&[]));
        }
        let id = self.id("");
        let current = (*selected).min(variants.len() - 1);
        let picked = self.ui.choice(&id, variants, current);
        if picked >= variants.len() {
            return assign(selected, current);
        }
        assign(selected, picked)
    }

    fn edit_scalar(&mut self, value: &mut Value, shape: &Shape) -> bool {
        let id = self.id("");
        match (shape, value) {
            (Shape::Bool, Value::Bool(b)) => {
                let edited = self.ui.toggle(&id, *b);
                assign(b, edited)
            }
            (Shape::Int { range: None }, Value::Int(i)) => {
                let edited = self.ui.int_field(&id, *i);
                assign(i, edited)
            }
            (Shape::Int { range: Some((min, max)) }, Value::Int(i)) => {
                let current = (*i).max(*min).min(*max);
                let edited = self.ui.int_slider(&id, current, *min, *max);
                assign(i, edited.max(*min).min(*max))
            }
            (Shape::Float { range: None }, Value::Float(x)) => {
                let edited = self.ui.float_field(&id, *x);
                assign_float(x, edited)
            }
            (Shape::Float { range: Some((min, max)) }, Value::Float(x)) => {
                let current = (*x).max(*min).min(*max);
                let edited = self.ui.float_slider(&id, current, *min, *max);
                assign_float(x, edited.max(*min).min(*max))
            }
            (Shape::Text, Value::Text(s)) => {
                let edited = self.ui.text_field(&id, s);
                assign(s, edited)
            }
            (shape, value) => self.unsupported(value, shape),
        }
    }

    fn edit_composite(&mut self, value: &mut Value, kind: CompositeKind, shape: &Shape) -> bool {
        let Value::Composite(composite) = value else {
            return self.unsupported(value, shape);
        };
        if composite.kind() != kind {
            return self.unsupported(value, shape);
        }
        let id = self.id("");
        let labels = composite.labels();
        let components = composite.components();
        let edited = self.ui.components(&id, &labels, &components);
        let mut changed = false;
        if !same_floats(&edited, &components) {
            match composite.with_components(&edited) {
                Some(rebuilt) => {
                    changed = !same_floats(&rebuilt.components(), &components);
                    *composite = rebuilt;
                }
                None => debug!(
                    path = %id,
                    expected = components.len(),
                    found = edited.len(),
                    "Ignored composite edit with wrong component count"
                ),
            }
        }
        if composite.key_count().is_some() {
            changed |= self.edit_keys(composite);
        }
        changed
    }

    /// Add and remove actions for keyed composites (curves and gradients).
    fn edit_keys(&mut self, composite: &mut Composite) -> bool {
        let count = composite.key_count().unwrap_or(0);
        let mut remove_at = None;
        for i in 0..count {
            let remove_id = self.id(&format!("{i}.remove"));
            if self.ui.button(&remove_id, "Remove Key") && remove_at.is_none() {
                remove_at = Some(i);
            }
        }
        let add_id = self.id("add");
        let add = self.ui.button(&add_id, "Add Key");

        let mut changed = false;
        if let Some(i) = remove_at {
            match composite.without_key(i) {
                Some(rebuilt) => {
                    *composite = rebuilt;
                    changed = true;
                }
                None => debug!(path = %self.id(""), key = i, "Kept last key"),
            }
        }
        if add {
            match composite.with_key_added() {
                Some(rebuilt) => {
                    *composite = rebuilt;
                    changed = true;
                }
                None => debug!(path = %self.id(""), "Key limit reached"),
            }
        }
        changed
    }

    fn edit_timestamp(&mut self, value: &mut Value, shape: &Shape) -> bool {
        let Value::Timestamp(ts) = value else {
            return self.unsupported(value, shape);
        };
        let id = self.id("");
        let shown = ts.format(TIMESTAMP_FORMAT).to_string();
        let edited = self.ui.text_field(&id, &shown);
        if edited == shown {
            return false;
        }
        match parse_timestamp(&edited) {
            Ok(parsed) => assign(ts, parsed),
            Err(e) => {
                debug!(path = %id, error = %e, "Kept prior timestamp");
                false
            }
        }
    }

    fn edit_duration(&mut self, value: &mut Value, shape: &Shape) -> bool {
        let Value::Duration(duration) = value else {
            return self.unsupported(value, shape);
        };
        let total = i64::try_from(duration.as_secs()).unwrap_or(i64::MAX);
        let (hours, minutes, seconds) = (total / 3600, total % 3600 / 60, total % 60);

        let id = self.id("");
        let [hours_id, minutes_id, seconds_id] = ["hours", "minutes", "seconds"].map(|leaf| self.id(leaf));
        self.ui.begin_group(&id);
        let h = self.ui.int_field(&hours_id, hours);
        let m = self.ui.int_field(&minutes_id, minutes);
        let s = self.ui.int_field(&seconds_id, seconds);
        self.ui.end_group();

        if (h, m, s) == (hours, minutes, seconds) {
            return false;
        }
        match duration_from_parts(h, m, s, duration.subsec_nanos()) {
            Ok(edited) => assign(duration, edited),
            Err(e) => {
                debug!(path = %id, error = %e, "Kept prior duration");
                false
            }
        }
    }

    fn edit_nested_record(&mut self, value: &mut Value, schema: &Schema, shape: &Shape) -> bool {
        let Value::Record(record) = value else {
            return self.unsupported(value, shape);
        };
        if record.kind != schema.name() {
            return self.unsupported(value, shape);
        }
        let id = self.id("");
        self.ui.begin_group(&id);
        let mut changed = false;
        for member in schema.edit_order() {
            let Some(slot) = record.get_mut(member.name) else {
                continue;
            };
            changed |= self.edit(member.name, slot, &member.shape);
        }
        self.ui.end_group();
        changed
    }

    /// Read-only fallback for shapes with no edit path.
    fn unsupported(&mut self, value: &Value, shape: &Shape) -> bool {
        let id = self.id("");
        self.ui.read_only(&id, &value.to_string());
        let error = EditError::UnsupportedShape {
            shape: shape.describe(),
        };
        debug!(path = %id, found = value.type_name(), error = %error, "Shown read-only");
        false
    }

    fn nested<R>(&mut self, segment: &str, f: impl FnOnce(&mut Self) -> R) -> R {
        self.path.push(segment.to_string());
        let result = f(self);
        self.path.pop();
        result
    }

    /// Widget id for `leaf` under the current path; the path itself when
    /// `leaf` is empty.
    fn id(&self, leaf: &str) -> String {
        let mut parts: Vec<&str> = self.path.iter().map(String::as_str).collect();
        if !leaf.is_empty() {
            parts.push(leaf);
        }
        parts.join(".")
    }
}

fn assign<T: PartialEq>(slot: &mut T, edited: T) -> bool {
    if *slot == edited {
        return false;
    }
    *slot = edited;
    true
}

/// NaN counts as equal to itself, so a NaN member is not rewritten every pass.
fn same_float(a: f64, b: f64) -> bool {
    a == b || (a.is_nan() && b.is_nan())
}

fn same_floats(a: &[f64], b: &[f64]) -> bool {
    a.len() == b.len() && a.iter().zip(b).all(|(x, y)| same_float(*x, *y))
}

fn assign_float(slot: &mut f64, edited: f64) -> bool {
    if same_float(*slot, edited) {
        return false;
    }
    *slot = edited;
    true
}

/// Parse timestamp text in the display layout, or RFC 3339.
pub fn parse_timestamp(text: &str) -> Result<DateTime<Utc>, EditError> {
    let text = text.trim();
    if let Ok(naive) = NaiveDateTime::parse_from_str(text, TIMESTAMP_FORMAT) {
        return Ok(naive.and_utc());
    }
    DateTime::parse_from_rfc3339(text)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| EditError::ParseFailure {
            input: text.to_string(),
            reason: e.to_string(),
        })
}

fn duration_from_parts(
    hours: i64,
    minutes: i64,
    seconds: i64,
    nanos: u32,
) -> Result<Duration, EditError> {
    let failure = |reason: &str| EditError::ParseFailure {
        input: format!("{hours}h {minutes}m {seconds}s"),
        reason: reason.to_string(),
    };
    let total = hours
        .checked_mul(3600)
        .and_then(|h| minutes.checked_mul(60).and_then(|m| h.checked_add(m)))
        .and_then(|hm| hm.checked_add(seconds))
        .ok_or_else(|| failure("duration overflows"))?;
    let total = u64::try_from(total).map_err(|_| failure("duration is negative"))?;
    Ok(Duration::new(total, nanos))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::jobs::builtin::{MovementJob, SceneObjectJob};
    use crate::value::{Color, Composite, Record, SeqKind, Vec3, shape_of};

    fn edit(ui: &mut ScriptedUi, label: &str, value: &mut Value, shape: &Shape) -> bool {
        ValueEditor::new(ui).edit(label, value, shape)
    }

    #[test]
    fn untouched_scalars_report_no_change() {
        let mut ui = ScriptedUi::new();
        let mut value = Value::Float(1.5);
        assert!(!edit(&mut ui, "speed", &mut value, &Shape::Float { range: None }));
        assert_eq!(ui.widget("speed"), Some(&Widget::FloatField));
    }

    #[test]
    fn ranged_numbers_render_as_clamped_sliders() {
        let shape = Shape::int_in(0, 10);
        let mut ui = ScriptedUi::new().with("level", Input::Int(42));
        let mut value = Value::Int(5);
        assert!(edit(&mut ui, "level", &mut value, &shape));
        assert_eq!(value, Value::Int(10));
        assert_eq!(ui.widget("level"), Some(&Widget::IntSlider { min: 0, max: 10 }));
    }

    #[test]
    fn out_of_range_stored_value_is_pulled_into_range() {
        let mut ui = ScriptedUi::new();
        let mut value = Value::Float(-3.0);
        assert!(edit(&mut ui, "gain", &mut value, &Shape::float_in(0.0, 1.0)));
        assert_eq!(value, Value::Float(0.0));
    }

    #[test]
    fn enum_choice_selects_variant() {
        const MODES: &[&str] = &["Down", "Up", "Held"];
        let mut ui = ScriptedUi::new().with("mode", Input::Choice(2));
        let mut value = Value::Enum(0);
        assert!(edit(&mut ui, "mode", &mut value, &Shape::Enum(MODES)));
        assert_eq!(value, Value::Enum(2));

        let mut ui = ScriptedUi::new().with("mode", Input::Choice(9));
        assert!(!edit(&mut ui, "mode", &mut value, &Shape::Enum(MODES)));
        assert_eq!(value, Value::Enum(2));
    }

    #[test]
    fn null_value_shape_materializes_default() {
        let mut ui = ScriptedUi::new();
        let mut value = Value::Null;
        assert!(edit(&mut ui, "count", &mut value, &Shape::Int { range: None }));
        assert_eq!(value, Value::Int(0));
    }

    #[test]
    fn null_reference_waits_for_create_action() {
        let shape = Shape::Optional(Box::new(Shape::Text));
        let mut value = Value::Null;

        let mut ui = ScriptedUi::new();
        assert!(!edit(&mut ui, "note", &mut value, &shape));
        assert_eq!(value, Value::Null);
        assert_eq!(ui.widget("note"), Some(&Widget::ReadOnly("null".into())));

        let mut ui = ScriptedUi::new().with("note.create", Input::Click);
        assert!(edit(&mut ui, "note", &mut value, &shape));
        assert_eq!(value, Value::Text(String::new()));
    }

    #[test]
    fn composite_round_trips_whole_value() {
        let shape = Shape::Composite(CompositeKind::Vec3);
        let mut value = Value::Composite(Composite::Vec3(Vec3::new(1.0, 2.0, 3.0)));
        let mut ui = ScriptedUi::new().with("target", Input::Components(vec![1.0, 5.0, 3.0]));
        assert!(edit(&mut ui, "target", &mut value, &shape));
        assert_eq!(
            value,
            Value::Composite(Composite::Vec3(Vec3::new(1.0, 5.0, 3.0)))
        );
    }

    #[test]
    fn composite_with_wrong_component_count_is_ignored() {
        let shape = Shape::Composite(CompositeKind::Color);
        let mut value = Value::Composite(Composite::Color(Color::WHITE));
        let mut ui = ScriptedUi::new().with("tint", Input::Components(vec![0.5]));
        assert!(!edit(&mut ui, "tint", &mut value, &shape));
        assert_eq!(value, Value::Composite(Composite::Color(Color::WHITE)));
    }

    #[test]
    fn tuple_edit_rebuilds_whole_tuple() {
        let shape = Shape::Tuple(vec![Shape::Text, Shape::Int { range: None }, Shape::Bool]);
        let mut value = Value::Tuple(vec![
            Value::Text("gate".into()),
            Value::Int(1),
            Value::Bool(true),
        ]);
        let mut ui = ScriptedUi::new().with("marker.1", Input::Int(7));
        assert!(edit(&mut ui, "marker", &mut value, &shape));
        assert_eq!(
            value,
            Value::Tuple(vec![
                Value::Text("gate".into()),
                Value::Int(7),
                Value::Bool(true),
            ])
        );
    }

    #[test]
    fn malformed_timestamp_keeps_prior_value() {
        let original = DateTime::<Utc>::UNIX_EPOCH;
        let mut value = Value::Timestamp(original);
        let mut ui = ScriptedUi::new().with("at", Input::Text("yesterday-ish".into()));
        assert!(!edit(&mut ui, "at", &mut value, &Shape::Timestamp));
        assert_eq!(value, Value::Timestamp(original));
    }

    #[test]
    fn timestamp_accepts_display_layout_and_rfc3339() {
        let mut value = Value::Timestamp(DateTime::<Utc>::UNIX_EPOCH);
        let mut ui = ScriptedUi::new().with("at", Input::Text("2024-03-01 12:30:00".into()));
        assert!(edit(&mut ui, "at", &mut value, &Shape::Timestamp));
        assert_eq!(value.to_string(), "2024-03-01 12:30:00");

        let mut ui = ScriptedUi::new().with("at", Input::Text("2024-03-01T14:30:00+02:00".into()));
        assert!(!edit(&mut ui, "at", &mut value, &Shape::Timestamp));
    }

    #[test]
    fn duration_edits_by_component() {
        let mut value = Value::Duration(Duration::from_secs(90));
        let mut ui = ScriptedUi::new().with("dwell.hours", Input::Int(1));
        assert!(edit(&mut ui, "dwell", &mut value, &Shape::Duration));
        assert_eq!(value, Value::Duration(Duration::from_secs(3690)));

        let mut ui = ScriptedUi::new().with("dwell.minutes", Input::Int(-120));
        assert!(!edit(&mut ui, "dwell", &mut value, &Shape::Duration));
        assert_eq!(value, Value::Duration(Duration::from_secs(3690)));
    }

    #[test]
    fn opaque_values_render_read_only() {
        let mut value = Value::Opaque("socket#3".into());
        let mut ui = ScriptedUi::new().with("conn", Input::Text("other".into()));
        assert!(!edit(&mut ui, "conn", &mut value, &Shape::Opaque("Socket")));
        assert_eq!(ui.widget("conn"), Some(&Widget::ReadOnly("socket#3".into())));
    }

    #[test]
    fn mismatched_value_falls_back_to_read_only() {
        let mut value = Value::Text("nope".into());
        let mut ui = ScriptedUi::new().with("flag", Input::Bool(true));
        assert!(!edit(&mut ui, "flag", &mut value, &Shape::Bool));
        assert_eq!(value, Value::Text("nope".into()));
    }

    #[derive(Debug, Default)]
    struct Probe {
        label: String,
        depth: i32,
        offsets: Vec<Vec3>,
    }

    crate::impl_inspect!(record Probe {
        property label: shape_of::<String>(),
        field depth: Shape::int_in(0, 5),
        field offsets: shape_of::<Vec<Vec3>>(),
    });

    #[test]
    fn record_members_render_fields_before_properties() {
        let mut probe = Probe::default();
        let mut ui = ScriptedUi::new();
        assert!(!ValueEditor::new(&mut ui).edit_record("", &mut probe));
        assert_eq!(ui.ids(), ["depth", "offsets", "offsets.add", "label"]);
    }

    #[test]
    fn record_edits_write_back_in_place() {
        let mut probe = Probe::default();
        let mut ui = ScriptedUi::new()
            .with("probe.depth", Input::Int(3))
            .with("probe.offsets.add", Input::Click);
        assert!(ValueEditor::new(&mut ui).edit_record("probe", &mut probe));
        assert_eq!(probe.depth, 3);
        assert_eq!(probe.offsets, vec![Vec3::default()]);

        let mut ui = ScriptedUi::new().with("probe.offsets.0", Input::Components(vec![0.0, 1.0, 0.0]));
        assert!(ValueEditor::new(&mut ui).edit_record("probe", &mut probe));
        assert_eq!(probe.offsets, vec![Vec3::UP]);
    }

    #[test]
    fn nested_record_values_edit_in_place() {
        let mut value = Value::Record(Record::capture(&Probe::default()));
        let shape = Shape::Record(Probe::record_schema());
        let mut ui = ScriptedUi::new().with("inner.label", Input::Text("deep".into()));
        assert!(edit(&mut ui, "inner", &mut value, &shape));
        let Value::Record(record) = &value else {
            panic!("expected record");
        };
        assert_eq!(record.get("label"), Some(&Value::Text("deep".into())));
    }

    #[test]
    fn fixed_arrays_have_no_structural_actions() {
        let shape = Shape::Seq(SeqKind::Array(2), Box::new(Shape::Bool));
        let mut value = Value::Seq(vec![Value::Bool(false); 2]);
        let mut ui = ScriptedUi::new().with("flags.1", Input::Bool(true));
        assert!(edit(&mut ui, "flags", &mut value, &shape));
        assert_eq!(ui.ids(), ["flags", "flags.0", "flags.1"]);
        assert_eq!(value, Value::Seq(vec![Value::Bool(false), Value::Bool(true)]));
    }

    #[test]
    fn nan_members_are_stable_across_passes() {
        let mut float = Value::Float(f64::NAN);
        let mut position = Value::Composite(Composite::Vec3(Vec3::new(f32::NAN, 0.0, 0.0)));
        let vec3 = Shape::Composite(CompositeKind::Vec3);
        for _ in 0..3 {
            let mut ui = ScriptedUi::new();
            assert!(!edit(&mut ui, "speed", &mut float, &Shape::Float { range: None }));
            assert!(!edit(&mut ui, "position", &mut position, &vec3));
        }

        let mut job = MovementJob::with_speed(f32::NAN);
        for _ in 0..3 {
            assert!(!render_and_apply(&mut job, &mut ScriptedUi::new()));
        }

        let mut ui = ScriptedUi::new().with("speed", Input::Float(2.0));
        assert!(render_and_apply(&mut job, &mut ui));
        assert_eq!(job.speed, 2.0);
    }

    #[test]
    fn nan_in_a_ranged_float_is_clamped_once() {
        let shape = Shape::float_in(0.0, 1.0);
        let mut value = Value::Float(f64::NAN);
        assert!(edit(&mut ScriptedUi::new(), "pace", &mut value, &shape));
        assert_eq!(value, Value::Float(0.0));
        assert!(!edit(&mut ScriptedUi::new(), "pace", &mut value, &shape));
    }

    #[test]
    fn curve_and_gradient_keys_are_added_and_removed() {
        let mut job = SceneObjectJob::default();
        assert!(job.curve.keys.is_empty());

        let mut ui = ScriptedUi::new()
            .with("curve.add", Input::Click)
            .with("gradient.0.remove", Input::Click);
        assert!(render_and_apply(&mut job, &mut ui));
        assert_eq!(job.curve.keys.len(), 1);
        assert_eq!(job.gradient.keys.len(), 1);
        assert_eq!(ui.widget("curve.add"), Some(&Widget::Button));

        // The new key is editable on the next pass; the last gradient key stays.
        let mut ui = ScriptedUi::new()
            .with("curve", Input::Components(vec![0.5, 2.0]))
            .with("gradient.0.remove", Input::Click);
        assert!(render_and_apply(&mut job, &mut ui));
        assert_eq!(job.curve.keys[0].value, 2.0);
        assert_eq!(job.gradient.keys.len(), 1);

        assert!(!render_and_apply(&mut job, &mut ScriptedUi::new()));
    }
}

