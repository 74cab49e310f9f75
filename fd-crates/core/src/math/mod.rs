//! Integer rounding helpers for views with a non-unit scale.

/// `numerator / denominator` rounded towards negative infinity.
pub(crate) fn floor_div(numerator: i32, denominator: i32) -> i32 {
    let quotient = numerator / denominator;
    let inexact = numerator % denominator != 0;
    if inexact && ((numerator < 0) != (denominator < 0)) {
        quotient - 1
    } else {
        quotient
    }
}

/// `numerator / denominator` rounded towards positive infinity.
pub(crate) fn ceil_div(numerator: i32, denominator: i32) -> i32 {
    let quotient = numerator / denominator;
    let inexact = numerator % denominator != 0;
    if inexact && ((numerator < 0) == (denominator < 0)) {
        quotient + 1
    } else {
        quotient
    }
}
