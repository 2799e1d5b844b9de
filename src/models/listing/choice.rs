use crate::models::list_view::ListError;

/// Closed set of values that shows up as a filter dropdown and a badge.
pub trait Choice: Copy + PartialEq + 'static {
    const ALL: &'static [Self];

    fn slug(&self) -> &'static str;

    fn label(&self) -> &'static str;

    fn from_slug(slug: &str) -> Option<Self> {
        Self::ALL.iter().copied().find(|c| c.slug() == slug)
    }

    /// (value, label) pairs for a `<select>`.
    fn options() -> Vec<(String, String)> {
        Self::ALL
            .iter()
            .map(|c| (c.slug().to_string(), c.label().to_string()))
            .collect()
    }
}

pub fn parse_choice<T: Choice>(key: &str, value: &str) -> Result<T, ListError> {
    T::from_slug(value)
        .ok_or_else(|| ListError::invalid(format!("unknown value {value:?} for filter {key:?}")))
}

/// Implements `Choice` plus `Serialize` (as the slug) for a fieldless enum.
#[macro_export]
macro_rules! choice_enum {
    ($name:ident { $($variant:ident => ($slug:literal, $label:literal)),+ $(,)? }) => {
        impl $crate::models::listing::Choice for $name {
            const ALL: &'static [Self] = &[$($name::$variant),+];

            fn slug(&self) -> &'static str {
                match self {
                    $($name::$variant => $slug),+
                }
            }

            fn label(&self) -> &'static str {
                match self {
                    $($name::$variant => $label),+
                }
            }
        }

        impl serde::Serialize for $name {
            fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str($crate::models::listing::Choice::slug(self))
            }
        }
    };
}
