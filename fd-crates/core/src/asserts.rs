//! Checks which are compiled in at a configurable level. Release builds keep the simple checks;
//! tests and the `debug-checks` feature add the moderate ones.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const FD_ASSERT_LEVEL_DEFINITION: u8 = FD_ASSERT_SIMPLE;

#[cfg(any(test, feature = "debug-checks"))]
pub const FD_ASSERT_LEVEL_DEFINITION: u8 = FD_ASSERT_MODERATE;

pub const FD_ASSERT_SIMPLE: u8 = 1;
pub const FD_ASSERT_MODERATE: u8 = 2;

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! fd_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::FD_ASSERT_LEVEL_DEFINITION >= $crate::asserts::FD_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}
