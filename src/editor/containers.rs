//! Container branches of the editor: maps, sets, sequences and tuples.

use tracing::debug;

use super::ValueEditor;
use crate::value::{SeqKind, Shape, Value};

impl ValueEditor<'_> {
    /// Entries are never mutated in place: an edited entry is removed and its
    /// new key/value pair inserted, overwriting any entry that already holds
    /// the new key.
    pub(super) fn edit_map(
        &mut self,
        value: &mut Value,
        key_shape: &Shape,
        item_shape: &Shape,
        shape: &Shape,
    ) -> bool {
        let Value::Map(entries) = value else {
            return self.unsupported(value, shape);
        };

        let id = self.id("");
        self.ui.begin_group(&id);
        let mut removed = Vec::new();
        let mut edited = Vec::new();
        for (i, (key, item)) in entries.iter().enumerate() {
            let segment = i.to_string();
            let (mut new_key, mut new_item) = (key.clone(), item.clone());
            let (entry_changed, remove) = self.nested(&segment, |editor| {
                let key_changed = editor.edit("key", &mut new_key, key_shape);
                let item_changed = editor.edit("value", &mut new_item, item_shape);
                let remove_id = editor.id("remove");
                let remove = editor.ui.button(&remove_id, "Remove");
                (key_changed || item_changed, remove)
            });
            if remove {
                removed.push(i);
            } else if entry_changed {
                edited.push((i, new_key, new_item));
            }
        }
        let add_id = self.id("add");
        let add = self.ui.button(&add_id, "Add Entry");
        self.ui.end_group();

        let mut changed = !removed.is_empty() || !edited.is_empty();
        if changed {
            let mut slots: Vec<Option<(Value, Value)>> = entries.drain(..).map(Some).collect();
            for i in removed {
                slots[i] = None;
            }
            for (i, key, item) in edited {
                slots[i] = None;
                match slots.iter_mut().flatten().find(|(k, _)| *k == key) {
                    Some(existing) => existing.1 = item,
                    None => slots[i] = Some((key, item)),
                }
            }
            entries.extend(slots.into_iter().flatten());
        }

        if add {
            match (key_shape.default_value(), item_shape.default_value()) {
                (Some(key), Some(item)) if !entries.iter().any(|(k, _)| *k == key) => {
                    entries.push((key, item));
                    changed = true;
                }
                (Some(key), Some(_)) => {
                    debug!(path = %id, key = %key, "Default key already present");
                }
                _ => debug!(path = %id, shape = %shape.describe(), "No default entry"),
            }
        }
        changed
    }

    /// Sets are edited as a list and rebuilt with duplicates dropped.
    pub(super) fn edit_set(&mut self, value: &mut Value, elem_shape: &Shape, shape: &Shape) -> bool {
        let Value::Set(elements) = value else {
            return self.unsupported(value, shape);
        };

        let id = self.id("");
        self.ui.begin_group(&id);
        let mut working = elements.clone();
        let mut remove_at = None;
        for (i, element) in working.iter_mut().enumerate() {
            let segment = i.to_string();
            self.edit(&segment, element, elem_shape);
            let remove_id = format!("{}.remove", self.id(&segment));
            if self.ui.button(&remove_id, "Remove") && remove_at.is_none() {
                remove_at = Some(i);
            }
        }
        let add_id = self.id("add");
        if self.ui.button(&add_id, "Add Element") {
            match elem_shape.default_value() {
                Some(fresh) => working.push(fresh),
                None => debug!(path = %id, shape = %shape.describe(), "No default element"),
            }
        }
        self.ui.end_group();

        if let Some(i) = remove_at {
            working.remove(i);
        }
        let mut rebuilt: Vec<Value> = Vec::with_capacity(working.len());
        for element in working {
            if !rebuilt.contains(&element) {
                rebuilt.push(element);
            }
        }
        if rebuilt == *elements {
            return false;
        }
        *elements = rebuilt;
        true
    }

    /// Elements are edited in place; growable kinds also get add and
    /// remove-at-index actions.
    pub(super) fn edit_seq(
        &mut self,
        value: &mut Value,
        kind: SeqKind,
        elem_shape: &Shape,
        shape: &Shape,
    ) -> bool {
        let Value::Seq(items) = value else {
            return self.unsupported(value, shape);
        };

        let id = self.id("");
        self.ui.begin_group(&id);
        let mut changed = false;
        let mut remove_at = None;
        for (i, item) in items.iter_mut().enumerate() {
            let segment = i.to_string();
            changed |= self.edit(&segment, item, elem_shape);
            if kind.is_growable() {
                let remove_id = format!("{}.remove", self.id(&segment));
                if self.ui.button(&remove_id, "Remove") && remove_at.is_none() {
                    remove_at = Some(i);
                }
            }
        }
        let add = if kind.is_growable() {
            let add_id = self.id("add");
            self.ui.button(&add_id, "Add Element")
        } else {
            false
        };
        self.ui.end_group();

        if let Some(i) = remove_at {
            items.remove(i);
            changed = true;
        }
        if add {
            match elem_shape.default_value() {
                Some(fresh) => {
                    items.push(fresh);
                    changed = true;
                }
                None => debug!(path = %id, shape = %shape.describe(), "No default element"),
            }
        }
        changed
    }

    /// Tuples are immutable composites: any changed component rebuilds the
    /// whole tuple.
    pub(super) fn edit_tuple(&mut self, value: &mut Value, shapes: &[Shape], shape: &Shape) -> bool {
        let Value::Tuple(items) = value else {
            return self.unsupported(value, shape);
        };
        if items.len() != shapes.len() {
            return self.unsupported(value, shape);
        }

        let id = self.id("");
        self.ui.begin_group(&id);
        let mut edited = Vec::with_capacity(items.len());
        let mut changed = false;
        for (i, (item, item_shape)) in items.iter().zip(shapes).enumerate() {
            let mut component = item.clone();
            self.edit(&i.to_string(), &mut component, item_shape);
            changed |= component != *item;
            edited.push(component);
        }
        self.ui.end_group();

        if changed {
            *value = Value::Tuple(edited);
        }
        changed
    }
}

#[cfg(test)]
mod tests {
    use crate::editor::{Input, ScriptedUi, ValueEditor};
    use crate::value::{SeqKind, Shape, Value};

    fn text_to_int() -> Shape {
        Shape::Map(Box::new(Shape::Text), Box::new(Shape::Int { range: None }))
    }

    fn weights() -> Value {
        Value::Map(vec![
            (Value::Text("a".into()), Value::Int(1)),
            (Value::Text("b".into()), Value::Int(2)),
        ])
    }

    fn edit(ui: &mut ScriptedUi, value: &mut Value, shape: &Shape) -> bool {
        ValueEditor::new(ui).edit("weights", value, shape)
    }

    #[test]
    fn untouched_map_is_left_alone() {
        let mut value = weights();
        let mut ui = ScriptedUi::new();
        assert!(!edit(&mut ui, &mut value, &text_to_int()));
        assert_eq!(value, weights());
        assert!(ui.ids().contains(&"weights.1.key"));
    }

    #[test]
    fn map_value_edit_replaces_entry() {
        let mut value = weights();
        let mut ui = ScriptedUi::new().with("weights.0.value", Input::Int(9));
        assert!(edit(&mut ui, &mut value, &text_to_int()));
        assert_eq!(
            value,
            Value::Map(vec![
                (Value::Text("a".into()), Value::Int(9)),
                (Value::Text("b".into()), Value::Int(2)),
            ])
        );
    }

    #[test]
    fn colliding_key_edit_overwrites_last_write_wins() {
        let mut value = weights();
        let mut ui = ScriptedUi::new().with("weights.0.key", Input::Text("b".into()));
        assert!(edit(&mut ui, &mut value, &text_to_int()));
        assert_eq!(
            value,
            Value::Map(vec![(Value::Text("b".into()), Value::Int(1))])
        );
    }

    #[test]
    fn map_add_inserts_default_entry_once() {
        let mut value = Value::Map(Vec::new());
        let mut ui = ScriptedUi::new().with("weights.add", Input::Click);
        assert!(edit(&mut ui, &mut value, &text_to_int()));
        assert_eq!(
            value,
            Value::Map(vec![(Value::Text(String::new()), Value::Int(0))])
        );

        let mut ui = ScriptedUi::new().with("weights.add", Input::Click);
        assert!(!edit(&mut ui, &mut value, &text_to_int()));
        let Value::Map(entries) = &value else {
            panic!("expected map");
        };
        assert_eq!(entries.len(), 1);
    }

    #[test]
    fn map_remove_drops_entry() {
        let mut value = weights();
        let mut ui = ScriptedUi::new().with("weights.0.remove", Input::Click);
        assert!(edit(&mut ui, &mut value, &text_to_int()));
        assert_eq!(
            value,
            Value::Map(vec![(Value::Text("b".into()), Value::Int(2))])
        );
    }

    #[test]
    fn set_edits_drop_duplicates() {
        let shape = Shape::Set(Box::new(Shape::Int { range: None }));
        let mut value = Value::Set(vec![Value::Int(1), Value::Int(2), Value::Int(3)]);
        let mut ui = ScriptedUi::new().with("tags.2", Input::Int(1));
        assert!(ValueEditor::new(&mut ui).edit("tags", &mut value, &shape));
        assert_eq!(value, Value::Set(vec![Value::Int(1), Value::Int(2)]));
    }

    #[test]
    fn set_add_of_existing_default_is_no_change() {
        let shape = Shape::Set(Box::new(Shape::Int { range: None }));
        let mut value = Value::Set(vec![Value::Int(0)]);
        let mut ui = ScriptedUi::new().with("tags.add", Input::Click);
        assert!(!ValueEditor::new(&mut ui).edit("tags", &mut value, &shape));
        assert_eq!(value, Value::Set(vec![Value::Int(0)]));
    }

    #[test]
    fn list_remove_shifts_later_elements_down() {
        let shape = Shape::Seq(SeqKind::List, Box::new(Shape::Text));
        let mut value = Value::Seq(vec![
            Value::Text("a".into()),
            Value::Text("b".into()),
            Value::Text("c".into()),
        ]);
        let mut ui = ScriptedUi::new().with("names.0.remove", Input::Click);
        assert!(ValueEditor::new(&mut ui).edit("names", &mut value, &shape));
        assert_eq!(
            value,
            Value::Seq(vec![Value::Text("b".into()), Value::Text("c".into())])
        );
    }

    #[test]
    fn queue_add_appends_default_at_back() {
        let shape = Shape::Seq(SeqKind::Queue, Box::new(Shape::Int { range: None }));
        let mut value = Value::Seq(vec![Value::Int(4)]);
        let mut ui = ScriptedUi::new()
            .with("pending.0", Input::Int(5))
            .with("pending.add", Input::Click);
        assert!(ValueEditor::new(&mut ui).edit("pending", &mut value, &shape));
        assert_eq!(value, Value::Seq(vec![Value::Int(5), Value::Int(0)]));
    }

    #[test]
    fn tuple_with_wrong_arity_is_read_only() {
        let shape = Shape::Tuple(vec![Shape::Bool, Shape::Bool]);
        let mut value = Value::Tuple(vec![Value::Bool(true)]);
        let mut ui = ScriptedUi::new().with("pair.0", Input::Bool(false));
        assert!(!ValueEditor::new(&mut ui).edit("pair", &mut value, &shape));
        assert_eq!(value, Value::Tuple(vec![Value::Bool(true)]));
    }
}
