//! Leveled assertions for internal invariants of the minimisation procedure.
//!
//! Cheap checks run at [`MUC_ASSERT_SIMPLE`]; checks which are linear in the size of the
//! candidate set (e.g. verifying that a reported core is a subset of the queried literals) run at
//! [`MUC_ASSERT_MODERATE`], which is enabled in tests. Checks that re-examine a complete program
//! or model run at [`MUC_ASSERT_ADVANCED`], which requires the `debug-checks` feature.

#[cfg(all(not(test), not(feature = "debug-checks")))]
pub const MUC_ASSERT_LEVEL_DEFINITION: u8 = MUC_ASSERT_SIMPLE;

#[cfg(all(test, not(feature = "debug-checks")))]
pub const MUC_ASSERT_LEVEL_DEFINITION: u8 = MUC_ASSERT_MODERATE;

#[cfg(feature = "debug-checks")]
pub const MUC_ASSERT_LEVEL_DEFINITION: u8 = MUC_ASSERT_ADVANCED;

pub const MUC_ASSERT_SIMPLE: u8 = 1;
pub const MUC_ASSERT_MODERATE: u8 = 2;
pub const MUC_ASSERT_ADVANCED: u8 = 3;

#[macro_export]
#[doc(hidden)]
macro_rules! muc_assert_simple {
    ($($arg:tt)*) => {
        if $crate::asserts::MUC_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MUC_ASSERT_SIMPLE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! muc_assert_moderate {
    ($($arg:tt)*) => {
        if $crate::asserts::MUC_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MUC_ASSERT_MODERATE {
            assert!($($arg)*);
        }
    };
}

#[macro_export]
#[doc(hidden)]
macro_rules! muc_assert_advanced {
    ($($arg:tt)*) => {
        if $crate::asserts::MUC_ASSERT_LEVEL_DEFINITION >= $crate::asserts::MUC_ASSERT_ADVANCED {
            assert!($($arg)*);
        }
    };
}
