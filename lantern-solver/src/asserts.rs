//! Leveled assertions. The level is fixed at compile time; checks above the configured level are
//! compiled to a constant `false` branch and cost nothing.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const LANTERN_ASSERT_LEVEL_DEFINITION: u8 = LANTERN_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const LANTERN_ASSERT_LEVEL_DEFINITION: u8 = LANTERN_ASSERT_ADVANCED;

pub const LANTERN_ASSERT_SIMPLE: u8 = 1;
pub const LANTERN_ASSERT_MODERATE: u8 = 2;
pub const LANTERN_ASSERT_ADVANCED: u8 = 3;
pub const LANTERN_ASSERT_EXTREME: u8 = 4;

#[macro_export]
#[doc(hidden)]
macro_rules! lantern_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::LANTERN_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LANTERN_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lantern_assert_eq_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::LANTERN_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LANTERN_ASSERT_SIMPLE {
            assert_eq!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lantern_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::LANTERN_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LANTERN_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lantern_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::LANTERN_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LANTERN_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! lantern_assert_extreme {
    ($($arg:tt)*) => {
        if $crate::asserts::LANTERN_ASSERT_LEVEL_DEFINITION >= $crate::asserts::LANTERN_ASSERT_EXTREME {
            assert!($($arg)*);
        }
    };
}
