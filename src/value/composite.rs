//! Fixed-layout numeric composites (vectors, colors, curves, ...).
//!
//! Every composite flattens into a labelled list of numeric components and is
//! rebuilt from a full component list, so an edit never leaves a composite
//! half-updated.

use serde::{Deserialize, Serialize};

/// Category of a composite value, used by shapes to materialize defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompositeKind {
    Vec2,
    Vec2Int,
    Vec3,
    Vec3Int,
    Vec4,
    Quat,
    Rect,
    Bounds,
    Color,
    Matrix4,
    Curve,
    Gradient,
    LayerMask,
}

impl CompositeKind {
    /// Default value of this kind.
    pub fn default_value(self) -> Composite {
        match self {
            Self::Vec2 => Composite::Vec2(Vec2::default()),
            Self::Vec2Int => Composite::Vec2Int(Vec2Int::default()),
            Self::Vec3 => Composite::Vec3(Vec3::default()),
            Self::Vec3Int => Composite::Vec3Int(Vec3Int::default()),
            Self::Vec4 => Composite::Vec4(Vec4::default()),
            Self::Quat => Composite::Quat(Quat::default()),
            Self::Rect => Composite::Rect(Rect::default()),
            Self::Bounds => Composite::Bounds(Bounds::default()),
            Self::Color => Composite::Color(Color::default()),
            Self::Matrix4 => Composite::Matrix4(Matrix4::default()),
            Self::Curve => Composite::Curve(Curve::default()),
            Self::Gradient => Composite::Gradient(Gradient::default()),
            Self::LayerMask => Composite::LayerMask(LayerMask::default()),
        }
    }
}

impl std::fmt::Display for CompositeKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Vec2 => "vec2",
            Self::Vec2Int => "vec2_int",
            Self::Vec3 => "vec3",
            Self::Vec3Int => "vec3_int",
            Self::Vec4 => "vec4",
            Self::Quat => "quat",
            Self::Rect => "rect",
            Self::Bounds => "bounds",
            Self::Color => "color",
            Self::Matrix4 => "matrix4",
            Self::Curve => "curve",
            Self::Gradient => "gradient",
            Self::LayerMask => "layer_mask",
        };
        write!(f, "{s}")
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f32,
    pub y: f32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec2Int {
    pub x: i32,
    pub y: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec3 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
}

impl Vec3 {
    pub const ONE: Vec3 = Vec3::new(1.0, 1.0, 1.0);
    pub const UP: Vec3 = Vec3::new(0.0, 1.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }
}

impl std::fmt::Display for Vec3 {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {}, {})", self.x, self.y, self.z)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct Vec3Int {
    pub x: i32,
    pub y: i32,
    pub z: i32,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Vec4 {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

/// Rotation quaternion. Defaults to identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Quat {
    pub x: f32,
    pub y: f32,
    pub z: f32,
    pub w: f32,
}

impl Default for Quat {
    fn default() -> Self {
        Self {
            x: 0.0,
            y: 0.0,
            z: 0.0,
            w: 1.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// Axis-aligned box stored as center and half-size.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Bounds {
    pub center: Vec3,
    pub extents: Vec3,
}

/// Linear RGBA color, components in `[0, 1]`.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Color {
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub a: f32,
}

impl Color {
    pub const WHITE: Color = Color {
        r: 1.0,
        g: 1.0,
        b: 1.0,
        a: 1.0,
    };
}

/// Row-major 4x4 matrix. Defaults to identity.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Matrix4 {
    pub rows: [[f32; 4]; 4],
}

impl Default for Matrix4 {
    fn default() -> Self {
        let mut rows = [[0.0; 4]; 4];
        for (i, row) in rows.iter_mut().enumerate() {
            row[i] = 1.0;
        }
        Self { rows }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Keyframe {
    pub time: f32,
    pub value: f32,
}

/// Animation curve as an ordered keyframe list.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Curve {
    pub keys: Vec<Keyframe>,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GradientKey {
    pub time: f32,
    pub color: Color,
}

/// Color gradient. Defaults to solid white.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Gradient {
    pub keys: Vec<GradientKey>,
}

impl Default for Gradient {
    fn default() -> Self {
        Self {
            keys: vec![
                GradientKey {
                    time: 0.0,
                    color: Color::WHITE,
                },
                GradientKey {
                    time: 1.0,
                    color: Color::WHITE,
                },
            ],
        }
    }
}

/// 32-bit layer selection mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct LayerMask(pub u32);

/// A composite value of any supported kind.
#[derive(Debug, Clone, PartialEq)]
pub enum Composite {
    Vec2(Vec2),
    Vec2Int(Vec2Int),
    Vec3(Vec3),
    Vec3Int(Vec3Int),
    Vec4(Vec4),
    Quat(Quat),
    Rect(Rect),
    Bounds(Bounds),
    Color(Color),
    Matrix4(Matrix4),
    Curve(Curve),
    Gradient(Gradient),
    LayerMask(LayerMask),
}

fn int(c: f64) -> i32 {
    c.round() as i32
}

impl Composite {
    pub fn kind(&self) -> CompositeKind {
        match self {
            Self::Vec2(_) => CompositeKind::Vec2,
            Self::Vec2Int(_) => CompositeKind::Vec2Int,
            Self::Vec3(_) => CompositeKind::Vec3,
            Self::Vec3Int(_) => CompositeKind::Vec3Int,
            Self::Vec4(_) => CompositeKind::Vec4,
            Self::Quat(_) => CompositeKind::Quat,
            Self::Rect(_) => CompositeKind::Rect,
            Self::Bounds(_) => CompositeKind::Bounds,
            Self::Color(_) => CompositeKind::Color,
            Self::Matrix4(_) => CompositeKind::Matrix4,
            Self::Curve(_) => CompositeKind::Curve,
            Self::Gradient(_) => CompositeKind::Gradient,
            Self::LayerMask(_) => CompositeKind::LayerMask,
        }
    }

    /// Component labels, parallel to [`Composite::components`].
    pub fn labels(&self) -> Vec<String> {
        let fixed: &[&str] = match self {
            Self::Vec2(_) | Self::Vec2Int(_) => &["x", "y"],
            Self::Vec3(_) | Self::Vec3Int(_) => &["x", "y", "z"],
            Self::Vec4(_) | Self::Quat(_) => &["x", "y", "z", "w"],
            Self::Rect(_) => &["x", "y", "width", "height"],
            Self::Bounds(_) => &[
                "center.x",
                "center.y",
                "center.z",
                "extents.x",
                "extents.y",
                "extents.z",
            ],
            Self::Color(_) => &["r", "g", "b", "a"],
            Self::LayerMask(_) => &["bits"],
            Self::Matrix4(_) => {
                return (0..4)
                    .flat_map(|r| (0..4).map(move |c| format!("m{r}{c}")))
                    .collect();
            }
            Self::Curve(curve) => {
                return (0..curve.keys.len())
                    .flat_map(|i| [format!("key{i}.time"), format!("key{i}.value")])
                    .collect();
            }
            Self::Gradient(gradient) => {
                return (0..gradient.keys.len())
                    .flat_map(|i| {
                        ["time", "r", "g", "b", "a"].map(|part| format!("key{i}.{part}"))
                    })
                    .collect();
            }
        };
        fixed.iter().map(|s| s.to_string()).collect()
    }

    /// Flattened numeric components.
    pub fn components(&self) -> Vec<f64> {
        match self {
            Self::Vec2(v) => vec![v.x.into(), v.y.into()],
            Self::Vec2Int(v) => vec![v.x.into(), v.y.into()],
            Self::Vec3(v) => vec![v.x.into(), v.y.into(), v.z.into()],
            Self::Vec3Int(v) => vec![v.x.into(), v.y.into(), v.z.into()],
            Self::Vec4(v) => vec![v.x.into(), v.y.into(), v.z.into(), v.w.into()],
            Self::Quat(q) => vec![q.x.into(), q.y.into(), q.z.into(), q.w.into()],
            Self::Rect(r) => vec![r.x.into(), r.y.into(), r.width.into(), r.height.into()],
            Self::Bounds(b) => vec![
                b.center.x.into(),
                b.center.y.into(),
                b.center.z.into(),
                b.extents.x.into(),
                b.extents.y.into(),
                b.extents.z.into(),
            ],
            Self::Color(c) => color_components(c).to_vec(),
            Self::Matrix4(m) => m.rows.iter().flatten().map(|v| f64::from(*v)).collect(),
            Self::Curve(curve) => curve
                .keys
                .iter()
                .flat_map(|k| [f64::from(k.time), f64::from(k.value)])
                .collect(),
            Self::Gradient(gradient) => gradient
                .keys
                .iter()
                .flat_map(|k| {
                    let [r, g, b, a] = color_components(&k.color);
                    [f64::from(k.time), r, g, b, a]
                })
                .collect(),
            Self::LayerMask(mask) => vec![mask.0.into()],
        }
    }

    /// Rebuild a composite of the same kind and layout from a full component
    /// list. Returns `None` when the list does not match the layout.
    pub fn with_components(&self, c: &[f64]) -> Option<Composite> {
        if c.len() != self.components().len() {
            return None;
        }
        let f = |i: usize| c[i] as f32;
        let rebuilt = match self {
            Self::Vec2(_) => Self::Vec2(Vec2 { x: f(0), y: f(1) }),
            Self::Vec2Int(_) => Self::Vec2Int(Vec2Int {
                x: int(c[0]),
                y: int(c[1]),
            }),
            Self::Vec3(_) => Self::Vec3(Vec3::new(f(0), f(1), f(2))),
            Self::Vec3Int(_) => Self::Vec3Int(Vec3Int {
                x: int(c[0]),
                y: int(c[1]),
                z: int(c[2]),
            }),
            Self::Vec4(_) => Self::Vec4(Vec4 {
                x: f(0),
                y: f(1),
                z: f(2),
                w: f(3),
            }),
            Self::Quat(_) => Self::Quat(Quat {
                x: f(0),
                y: f(1),
                z: f(2),
                w: f(3),
            }),
            Self::Rect(_) => Self::Rect(Rect {
                x: f(0),
                y: f(1),
                width: f(2),
                height: f(3),
            }),
            Self::Bounds(_) => Self::Bounds(Bounds {
                center: Vec3::new(f(0), f(1), f(2)),
                extents: Vec3::new(f(3), f(4), f(5)),
            }),
            Self::Color(_) => Self::Color(color_from(&c[0..4])),
            Self::Matrix4(_) => {
                let mut rows = [[0.0; 4]; 4];
                for (i, row) in rows.iter_mut().enumerate() {
                    for (j, cell) in row.iter_mut().enumerate() {
                        *cell = f(i * 4 + j);
                    }
                }
                Self::Matrix4(Matrix4 { rows })
            }
            Self::Curve(_) => Self::Curve(Curve {
                keys: c
                    .chunks_exact(2)
                    .map(|k| Keyframe {
                        time: k[0] as f32,
                        value: k[1] as f32,
                    })
                    .collect(),
            }),
            Self::Gradient(_) => Self::Gradient(Gradient {
                keys: c
                    .chunks_exact(5)
                    .map(|k| GradientKey {
                        time: k[0] as f32,
                        color: color_from(&k[1..5]),
                    })
                    .collect(),
            }),
            Self::LayerMask(_) => {
                Self::LayerMask(LayerMask(c[0].round().clamp(0.0, f64::from(u32::MAX)) as u32))
            }
        };
        Some(rebuilt)
    }
}

/// Gradients hold at most this many keys.
pub const GRADIENT_MAX_KEYS: usize = 8;

impl Composite {
    /// Number of keys of a keyed kind (curves and gradients); `None` for the
    /// fixed layouts.
    pub fn key_count(&self) -> Option<usize> {
        match self {
            Self::Curve(curve) => Some(curve.keys.len()),
            Self::Gradient(gradient) => Some(gradient.keys.len()),
            _ => None,
        }
    }

    /// Copy with one more key. A curve key goes one time unit after the last
    /// key with the same value; a gradient key goes halfway between the last
    /// two keys with the earlier color. `None` for fixed layouts and full
    /// gradients.
    pub fn with_key_added(&self) -> Option<Composite> {
        match self {
            Self::Curve(curve) => {
                let next = curve.keys.last().map_or_else(Keyframe::default, |k| Keyframe {
                    time: k.time + 1.0,
                    value: k.value,
                });
                let mut keys = curve.keys.clone();
                keys.push(next);
                Some(Self::Curve(Curve { keys }))
            }
            Self::Gradient(gradient) if gradient.keys.len() < GRADIENT_MAX_KEYS => {
                let mut keys = gradient.keys.clone();
                match keys.as_slice() {
                    [.., before, last] => {
                        let key = GradientKey {
                            time: (before.time + last.time) / 2.0,
                            color: before.color,
                        };
                        keys.insert(keys.len() - 1, key);
                    }
                    [only] => keys.push(GradientKey {
                        time: 1.0,
                        color: only.color,
                    }),
                    [] => keys.push(GradientKey {
                        time: 0.0,
                        color: Color::WHITE,
                    }),
                }
                Some(Self::Gradient(Gradient { keys }))
            }
            _ => None,
        }
    }

    /// Copy without key `index`. A gradient keeps at least one key.
    pub fn without_key(&self, index: usize) -> Option<Composite> {
        match self {
            Self::Curve(curve) if index < curve.keys.len() => {
                let mut keys = curve.keys.clone();
                keys.remove(index);
                Some(Self::Curve(Curve { keys }))
            }
            Self::Gradient(gradient) if index < gradient.keys.len() && gradient.keys.len() > 1 => {
                let mut keys = gradient.keys.clone();
                keys.remove(index);
                Some(Self::Gradient(Gradient { keys }))
            }
            _ => None,
        }
    }
}

fn color_components(c: &Color) -> [f64; 4] {
    [c.r.into(), c.g.into(), c.b.into(), c.a.into()]
}

fn color_from(c: &[f64]) -> Color {
    Color {
        r: c[0] as f32,
        g: c[1] as f32,
        b: c[2] as f32,
        a: c[3] as f32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels_match_components_for_every_kind() {
        let curve = Composite::Curve(Curve {
            keys: vec![Keyframe::default(), Keyframe { time: 1.0, value: 2.0 }],
        });
        let mut all: Vec<Composite> = [
            CompositeKind::Vec2,
            CompositeKind::Vec2Int,
            CompositeKind::Vec3,
            CompositeKind::Vec3Int,
            CompositeKind::Vec4,
            CompositeKind::Quat,
            CompositeKind::Rect,
            CompositeKind::Bounds,
            CompositeKind::Color,
            CompositeKind::Matrix4,
            CompositeKind::Gradient,
            CompositeKind::LayerMask,
        ]
        .into_iter()
        .map(CompositeKind::default_value)
        .collect();
        all.push(curve);

        for composite in all {
            assert_eq!(
                composite.labels().len(),
                composite.components().len(),
                "{}",
                composite.kind()
            );
        }
    }

    #[test]
    fn integer_vectors_round_components() {
        let v = Composite::Vec3Int(Vec3Int::default());
        let rebuilt = v.with_components(&[1.4, 1.6, -2.5]).unwrap();
        assert_eq!(rebuilt, Composite::Vec3Int(Vec3Int { x: 1, y: 2, z: -3 }));
    }

    #[test]
    fn wrong_component_count_is_rejected() {
        let v = Composite::Vec2(Vec2::default());
        assert!(v.with_components(&[1.0, 2.0, 3.0]).is_none());
    }

    #[test]
    fn matrix_defaults_to_identity() {
        let m = CompositeKind::Matrix4.default_value();
        let c = m.components();
        assert_eq!(c[0], 1.0);
        assert_eq!(c[5], 1.0);
        assert_eq!(c[1], 0.0);
        assert_eq!(c[15], 1.0);
    }

    #[test]
    fn gradient_rebuild_keeps_key_layout() {
        let g = CompositeKind::Gradient.default_value();
        let mut c = g.components();
        c[1] = 0.25;
        let Some(Composite::Gradient(rebuilt)) = g.with_components(&c) else {
            panic!("expected gradient");
        };
        assert_eq!(rebuilt.keys.len(), 2);
        assert_eq!(rebuilt.keys[0].color.r, 0.25);
        assert_eq!(rebuilt.keys[1].color, Color::WHITE);
    }

    #[test]
    fn curve_keys_can_be_added_and_removed() {
        let empty = CompositeKind::Curve.default_value();
        assert_eq!(empty.key_count(), Some(0));
        assert!(empty.without_key(0).is_none());

        let one = empty.with_key_added().unwrap();
        let two = one.with_key_added().unwrap();
        let Composite::Curve(curve) = &two else {
            panic!("expected curve");
        };
        assert_eq!(curve.keys[1].time, 1.0);
        assert_eq!(two.labels().len(), 4);

        let Some(Composite::Curve(trimmed)) = two.without_key(0) else {
            panic!("expected curve");
        };
        assert_eq!(trimmed.keys, [Keyframe { time: 1.0, value: 0.0 }]);
    }

    #[test]
    fn gradient_keys_stay_sorted_and_bounded() {
        let g = CompositeKind::Gradient.default_value();
        let Some(Composite::Gradient(added)) = g.with_key_added() else {
            panic!("expected gradient");
        };
        let times: Vec<f32> = added.keys.iter().map(|k| k.time).collect();
        assert_eq!(times, [0.0, 0.5, 1.0]);

        let mut full = g;
        while let Some(next) = full.with_key_added() {
            full = next;
        }
        assert_eq!(full.key_count(), Some(GRADIENT_MAX_KEYS));

        let single = Composite::Gradient(Gradient {
            keys: vec![GradientKey::default()],
        });
        assert!(single.without_key(0).is_none());
        assert!(Composite::Vec2(Vec2::default()).with_key_added().is_none());
    }
}
