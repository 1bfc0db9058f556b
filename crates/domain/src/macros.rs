//! Macro for implementing Display and FromStr for code enums
//!
//! Removes the boilerplate of mapping enum variants to their stable string
//! codes. Parsing is case-insensitive and trims surrounding whitespace.
//!
//! # Example
//!
//! ```rust
//! use bonuspool_domain::impl_domain_code_conversions;
//!
//! #[derive(Debug, Clone, Copy, PartialEq, Eq)]
//! pub enum Tier {
//!     Gold,
//!     Silver,
//! }
//!
//! impl_domain_code_conversions!(Tier {
//!     Gold => "gold",
//!     Silver => "silver",
//! });
//!
//! assert_eq!("GOLD".parse::<Tier>(), Ok(Tier::Gold));
//! assert_eq!(Tier::Silver.to_string(), "silver");
//! ```

/// Implements Display and FromStr for enums with one canonical code per
/// variant, plus optional extra aliases accepted only by `FromStr`.
///
/// # Arguments
///
/// * `$enum_name` - The name of the enum type
/// * `$variant => $str` - Canonical code written by `Display`
/// * `aliases { $alias => $variant }` - Additional accepted spellings
#[macro_export]
macro_rules! impl_domain_code_conversions {
    ($enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }) => {
        $crate::impl_domain_code_conversions!($enum_name { $($variant => $str),+ } aliases {});
    };
    (
        $enum_name:ident { $($variant:ident => $str:literal),+ $(,)? }
        aliases { $($alias:literal => $alias_variant:ident),* $(,)? }
    ) => {
        impl $enum_name {
            /// Canonical string code for this variant.
            pub const fn as_code(&self) -> &'static str {
                match self {
                    $(Self::$variant => $str,)+
                }
            }
        }

        impl std::fmt::Display for $enum_name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(self.as_code())
            }
        }

        impl std::str::FromStr for $enum_name {
            type Err = String;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim().to_lowercase().as_str() {
                    $($str => Ok(Self::$variant),)+
                    $($alias => Ok(Self::$alias_variant),)*
                    _ => Err(format!("Invalid {}: {}", stringify!($enum_name), s)),
                }
            }
        }
    };
}
