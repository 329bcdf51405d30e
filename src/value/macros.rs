//! Declarative helpers that derive member access for record kinds and enums.

/// Implement [`Inspect`](crate::value::Inspect) for a struct from a member list.
///
/// Each member is `field name: shape` or `property name: shape`. The struct
/// must implement `Default`. Prefix the type with `record` to also implement
/// [`Field`](crate::value::Field) so the struct can nest inside other records.
///
/// ```ignore
/// impl_inspect!(record Waypoint {
///     field label: shape_of::<String>(),
///     field dwell: Shape::Duration,
/// });
/// ```
#[macro_export]
macro_rules! impl_inspect {
    (record $ty:ident { $($body:tt)* }) => {
        $crate::impl_inspect!($ty { $($body)* });

        impl $crate::value::Field for $ty {
            fn shape() -> $crate::value::Shape {
                $crate::value::Shape::Record(<$ty>::record_schema())
            }

            fn to_value(&self) -> $crate::value::Value {
                $crate::value::Value::Record($crate::value::Record::capture(self))
            }

            fn from_value(
                value: $crate::value::Value,
            ) -> ::std::result::Result<Self, $crate::error::EditError> {
                match value {
                    $crate::value::Value::Record(record) => {
                        let mut target = <$ty as ::std::default::Default>::default();
                        record.apply_to(&mut target)?;
                        Ok(target)
                    }
                    other => Err($crate::error::EditError::TypeMismatch {
                        expected: stringify!($ty).to_string(),
                        found: other.type_name().to_string(),
                    }),
                }
            }
        }
    };
    ($ty:ident { $($kind:ident $member:ident : $shape:expr),* $(,)? }) => {
        impl $ty {
            /// Member layout shared by every instance of this kind.
            pub fn record_schema() -> &'static $crate::value::Schema {
                static SCHEMA: ::std::sync::LazyLock<$crate::value::Schema> =
                    ::std::sync::LazyLock::new(|| {
                        $crate::value::Schema::new(stringify!($ty))
                            $(.$kind(stringify!($member), $shape))*
                            .with_default(|| {
                                $crate::value::Record::capture(
                                    &<$ty as ::std::default::Default>::default(),
                                )
                                .into()
                            })
                    });
                &SCHEMA
            }
        }

        impl $crate::value::Inspect for $ty {
            fn schema(&self) -> &'static $crate::value::Schema {
                <$ty>::record_schema()
            }

            fn get(&self, member: &str) -> ::std::option::Option<$crate::value::Value> {
                match member {
                    $(stringify!($member) => Some($crate::value::Field::to_value(&self.$member)),)*
                    _ => None,
                }
            }

            fn set(
                &mut self,
                member: &str,
                value: $crate::value::Value,
            ) -> ::std::result::Result<(), $crate::error::EditError> {
                match member {
                    $(stringify!($member) => {
                        self.$member = $crate::value::Field::from_value(value)?;
                        Ok(())
                    })*
                    _ => Err($crate::error::EditError::UnknownMember {
                        record: stringify!($ty).to_string(),
                        member: member.to_string(),
                    }),
                }
            }
        }
    };
}

/// Implement [`Field`](crate::value::Field) for a fieldless enum, shown as a
/// closed choice among its variant names.
#[macro_export]
macro_rules! impl_enum_field {
    ($ty:ident { $($variant:ident),+ $(,)? }) => {
        impl $ty {
            pub const VARIANTS: &'static [&'static str] = &[$(stringify!($variant)),+];
        }

        impl $crate::value::Field for $ty {
            fn shape() -> $crate::value::Shape {
                $crate::value::Shape::Enum(Self::VARIANTS)
            }

            fn to_value(&self) -> $crate::value::Value {
                let name = match self {
                    $(Self::$variant => stringify!($variant),)+
                };
                $crate::value::Value::Enum(
                    Self::VARIANTS
                        .iter()
                        .position(|n| *n == name)
                        .unwrap_or_default(),
                )
            }

            fn from_value(
                value: $crate::value::Value,
            ) -> ::std::result::Result<Self, $crate::error::EditError> {
                match value {
                    $crate::value::Value::Enum(index) => [$(Self::$variant),+]
                        .into_iter()
                        .nth(index)
                        .ok_or_else(|| $crate::error::EditError::TypeMismatch {
                            expected: stringify!($ty).to_string(),
                            found: format!("variant #{index}"),
                        }),
                    other => Err($crate::error::EditError::TypeMismatch {
                        expected: stringify!($ty).to_string(),
                        found: other.type_name().to_string(),
                    }),
                }
            }
        }
    };
}
