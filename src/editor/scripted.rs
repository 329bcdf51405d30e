//! Headless [`Ui`] that replays scripted input and records what was drawn.

use std::collections::HashMap;

use super::ui::Ui;

/// A scripted user interaction, consumed by the first widget with a matching id.
#[derive(Debug, Clone, PartialEq)]
pub enum Input {
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Choice(usize),
    Components(Vec<f64>),
    Click,
}

/// Kind of widget drawn, as recorded by [`ScriptedUi`].
#[derive(Debug, Clone, PartialEq)]
pub enum Widget {
    Toggle,
    IntField,
    FloatField,
    IntSlider { min: i64, max: i64 },
    FloatSlider { min: f64, max: f64 },
    TextField,
    Choice(Vec<String>),
    Components(Vec<String>),
    Button,
    ReadOnly(String),
    Group,
}

/// Headless widget surface for tests and batch tools.
///
/// Inputs are one-shot: each is consumed by the first widget drawn with its
/// id, so a second pass sees the edited values with no pending input.
#[derive(Debug, Default)]
pub struct ScriptedUi {
    inputs: HashMap<String, Input>,
    rendered: Vec<(String, Widget)>,
}

impl ScriptedUi {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an input for the widget with `id`.
    pub fn with(mut self, id: impl Into<String>, input: Input) -> Self {
        self.push(id, input);
        self
    }

    pub fn push(&mut self, id: impl Into<String>, input: Input) {
        self.inputs.insert(id.into(), input);
    }

    /// Widgets drawn so far, in order.
    pub fn rendered(&self) -> &[(String, Widget)] {
        &self.rendered
    }

    /// Last widget drawn with `id`.
    pub fn widget(&self, id: &str) -> Option<&Widget> {
        self.rendered
            .iter()
            .rev()
            .find(|(rendered, _)| rendered == id)
            .map(|(_, widget)| widget)
    }

    pub fn ids(&self) -> Vec<&str> {
        self.rendered.iter().map(|(id, _)| id.as_str()).collect()
    }

    /// Inputs that no widget consumed.
    pub fn pending(&self) -> usize {
        self.inputs.len()
    }

    pub fn clear_log(&mut self) {
        self.rendered.clear();
    }

    fn draw(&mut self, id: &str, widget: Widget) -> Option<Input> {
        self.rendered.push((id.to_string(), widget));
        self.inputs.remove(id)
    }
}

impl Ui for ScriptedUi {
    fn toggle(&mut self, id: &str, value: bool) -> bool {
        match self.draw(id, Widget::Toggle) {
            Some(Input::Bool(b)) => b,
            _ => value,
        }
    }

    fn int_field(&mut self, id: &str, value: i64) -> i64 {
        match self.draw(id, Widget::IntField) {
            Some(Input::Int(i)) => i,
            _ => value,
        }
    }

    fn float_field(&mut self, id: &str, value: f64) -> f64 {
        match self.draw(id, Widget::FloatField) {
            Some(Input::Float(x)) => x,
            _ => value,
        }
    }

    fn int_slider(&mut self, id: &str, value: i64, min: i64, max: i64) -> i64 {
        match self.draw(id, Widget::IntSlider { min, max }) {
            Some(Input::Int(i)) => i,
            _ => value,
        }
    }

    fn float_slider(&mut self, id: &str, value: f64, min: f64, max: f64) -> f64 {
        match self.draw(id, Widget::FloatSlider { min, max }) {
            Some(Input::Float(x)) => x,
            _ => value,
        }
    }

    fn text_field(&mut self, id: &str, value: &str) -> String {
        match self.draw(id, Widget::TextField) {
            Some(Input::Text(s)) => s,
            _ => value.to_string(),
        }
    }

    fn choice(&mut self, id: &str, options: &[&str], selected: usize) -> usize {
        let options = options.iter().map(|o| o.to_string()).collect();
        match self.draw(id, Widget::Choice(options)) {
            Some(Input::Choice(i)) => i,
            _ => selected,
        }
    }

    fn components(&mut self, id: &str, labels: &[String], values: &[f64]) -> Vec<f64> {
        match self.draw(id, Widget::Components(labels.to_vec())) {
            Some(Input::Components(c)) => c,
            _ => values.to_vec(),
        }
    }

    fn button(&mut self, id: &str, _label: &str) -> bool {
        matches!(self.draw(id, Widget::Button), Some(Input::Click))
    }

    fn read_only(&mut self, id: &str, text: &str) {
        self.draw(id, Widget::ReadOnly(text.to_string()));
    }

    fn begin_group(&mut self, id: &str) {
        self.draw(id, Widget::Group);
    }

    fn end_group(&mut self) {}
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn inputs_are_consumed_once() {
        let mut ui = ScriptedUi::new().with("speed", Input::Float(2.5));
        assert_eq!(ui.float_field("speed", 1.0), 2.5);
        assert_eq!(ui.float_field("speed", 2.5), 2.5);
        assert_eq!(ui.pending(), 0);
    }

    #[test]
    fn mismatched_input_is_ignored() {
        let mut ui = ScriptedUi::new().with("flag", Input::Text("yes".into()));
        assert!(!ui.toggle("flag", false));
        assert_eq!(ui.widget("flag"), Some(&Widget::Toggle));
    }

    #[test]
    fn buttons_click_only_when_scripted() {
        let mut ui = ScriptedUi::new().with("list.add", Input::Click);
        assert!(!ui.button("list.0.remove", "-"));
        assert!(ui.button("list.add", "+"));
        assert_eq!(ui.ids(), ["list.0.remove", "list.add"]);
    }
}
