//! Host widget surface consumed by the editor.

/// Immediate-mode widget toolkit supplied by the host.
///
/// Every widget receives the current value and returns the value after user
/// interaction (the same value when nothing happened). Ids are dotted member
/// paths such as `waypoints.0.position` and are stable across passes as long
/// as the edited structure does not change.
pub trait Ui {
    fn toggle(&mut self, id: &str, value: bool) -> bool;

    fn int_field(&mut self, id: &str, value: i64) -> i64;

    fn float_field(&mut self, id: &str, value: f64) -> f64;

    fn int_slider(&mut self, id: &str, value: i64, min: i64, max: i64) -> i64;

    fn float_slider(&mut self, id: &str, value: f64, min: f64, max: f64) -> f64;

    fn text_field(&mut self, id: &str, value: &str) -> String;

    /// Closed choice; returns the selected index.
    fn choice(&mut self, id: &str, options: &[&str], selected: usize) -> usize;

    /// Multi-field numeric group for composites.
    fn components(&mut self, id: &str, labels: &[String], values: &[f64]) -> Vec<f64>;

    /// Returns true when clicked this pass.
    fn button(&mut self, id: &str, label: &str) -> bool;

    /// Non-editable display.
    fn read_only(&mut self, id: &str, text: &str);

    fn begin_group(&mut self, id: &str);

    fn end_group(&mut self);
}
