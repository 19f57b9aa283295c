//! Boundary Projector
//!
//! Brings a noisy scalar update back into the unit interval. Planar
//! opinions apply the same rules per axis.

use hk_types::BoundaryPolicy;

/// Folds `value` back across whichever wall it crossed until it lies in
/// `[0, 1]`. Folding is periodic with period 2, so a single large draw that
/// would need several folds lands where repeated folding would put it.
pub fn reflect(value: f64) -> f64 {
    if (0.0..=1.0).contains(&value) {
        return value;
    }
    let folded = value.rem_euclid(2.0);
    if folded > 1.0 {
        2.0 - folded
    } else {
        folded
    }
}

/// Saturates at the crossed wall.
pub fn absorb(value: f64) -> f64 {
    value.clamp(0.0, 1.0)
}

/// Wraps onto the torus `[0, 1)`.
pub fn wrap(value: f64) -> f64 {
    if (0.0..1.0).contains(&value) {
        return value;
    }
    let wrapped = value.rem_euclid(1.0);
    // rem_euclid rounds tiny negative inputs up to exactly 1.0
    if wrapped >= 1.0 {
        0.0
    } else {
        wrapped
    }
}

/// Applies `policy` to a single coordinate.
pub fn project(value: f64, policy: BoundaryPolicy) -> f64 {
    match policy {
        BoundaryPolicy::Reflect => reflect(value),
        BoundaryPolicy::Absorb => absorb(value),
        BoundaryPolicy::Period => wrap(value),
    }
}
