/// Declares a string-backed category that parses case-insensitively and falls back to a
/// catch-all variant instead of failing. Used for catalog and quiz vocabularies that arrive
/// as free text from upstream systems.
///
/// `else Fallback => "label"` collapses unrecognised input into a unit variant.
/// `else Fallback(String)` keeps the unrecognised text so it serializes back unchanged.
macro_rules! lenient_category {
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? } else $fallback:ident(String)
    ) => {
        $(#[$meta])*
        #[derive(Clone, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            $fallback(String),
        }

        impl $name {
            /// Canonical label, or the text as it arrived for unrecognised values.
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $label,)+
                    $name::$fallback(raw) => raw,
                }
            }

            pub fn parse_lenient(value: &str) -> Self {
                let normalized = value.trim();
                $(
                    if normalized.eq_ignore_ascii_case($label) {
                        return $name::$variant;
                    }
                )+
                $name::$fallback(value.to_owned())
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::$fallback(_))
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback(String::new())
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match Self::parse_lenient(&value) {
                    $name::$fallback(_) => $name::$fallback(value),
                    known => known,
                }
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                match value {
                    $name::$fallback(raw) => raw,
                    known => known.as_str().to_owned(),
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
    (
        $(#[$meta:meta])*
        $name:ident { $($variant:ident => $label:literal),+ $(,)? } else $fallback:ident => $fallback_label:literal
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize, serde::Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            $fallback,
        }

        impl $name {
            /// Every recognised variant, in vocabulary order. The fallback is not included.
            pub const ALL: &'static [$name] = &[$($name::$variant),+];

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                    $name::$fallback => $fallback_label,
                }
            }

            pub fn parse_lenient(value: &str) -> Self {
                let normalized = value.trim();
                $(
                    if normalized.eq_ignore_ascii_case($label) {
                        return $name::$variant;
                    }
                )+
                $name::$fallback
            }

            pub fn is_known(&self) -> bool {
                !matches!(self, $name::$fallback)
            }
        }

        impl Default for $name {
            fn default() -> Self {
                $name::$fallback
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                Self::parse_lenient(&value)
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_owned()
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

pub mod perfume;
pub mod quiz;
pub mod review;
