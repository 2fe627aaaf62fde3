//! 2D vector math used by every part of the engine
//!
//! `NVec2` is a plain `nalgebra` vector, so add/sub/scale/dot/norm come from
//! nalgebra directly. This module only adds the few helpers the engine needs
//! on top of that

use nalgebra::Vector2;

pub type NVec2 = Vector2<f64>;

/// Shorthand constructor
#[inline]
pub fn vec2(x: f64, y: f64) -> NVec2 {
    NVec2::new(x, y)
}

/// Unit vector along `v`, or `fallback` when `|v| <= eps`
#[inline]
pub fn normalize_or(v: &NVec2, eps: f64, fallback: NVec2) -> NVec2 {
    let len = v.norm();
    if len > eps {
        v / len
    } else {
        fallback
    }
}
