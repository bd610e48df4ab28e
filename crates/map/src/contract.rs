//! Precondition policy for the typed accessor modules.
//!
//! Interpreting a tile's record under the wrong tile type is a programming
//! error, not a runtime condition. Accessors guard their contracts with
//! [`tile_assert!`], which panics when preconditions are active and compiles
//! to nothing otherwise:
//!
//! - debug builds: always active
//! - release builds: active only with the `checked` cargo feature
//!
//! The original design trusted callers unconditionally in release; the
//! `checked` feature is the explicit policy switch for deployments that
//! would rather pay the branch than trust every caller.

/// Whether precondition checks are compiled into this build.
#[inline]
pub const fn preconditions_active() -> bool {
    cfg!(any(debug_assertions, feature = "checked"))
}

/// Assert a typed-accessor precondition.
///
/// With one argument, panics with the stringified condition. Additional
/// arguments are a custom `panic!` format string.
#[macro_export]
macro_rules! tile_assert {
    ($cond:expr $(,)?) => {
        $crate::tile_assert!($cond, "tile precondition violated: {}", stringify!($cond))
    };
    ($cond:expr, $($arg:tt)+) => {
        if $crate::contract::preconditions_active() && !($cond) {
            panic!($($arg)+);
        }
    };
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_active_in_test_builds() {
        assert!(super::preconditions_active());
    }

    #[test]
    fn test_passing_condition_is_silent() {
        tile_assert!(1 + 1 == 2);
    }

    #[test]
    #[should_panic(expected = "tile precondition violated")]
    fn test_failing_condition_panics() {
        tile_assert!(false);
    }

    #[test]
    #[should_panic(expected = "custom message 7")]
    fn test_custom_message() {
        tile_assert!(false, "custom message {}", 7);
    }
}
