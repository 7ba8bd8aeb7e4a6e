//! Lattice value noise.
//!
//! Corner values come from [`hash`] applied to the lattice point projected on a
//! fixed basis, then blended with the quintic fade so the field and its first
//! derivative are continuous across cell boundaries.

use crate::math::{fract, mix, Vec2, Vec3};

const HASH_GAIN: f64 = 43758.5453123;
const LATTICE_BASIS_2D: Vec2 = Vec2::new(1.0, 57.0);
const LATTICE_BASIS_3D: Vec3 = Vec3::new(1.0, 57.0, 113.0);

/// Scalar pseudo-random value in `[0, 1)`.
#[inline]
pub fn hash(x: f64) -> f64 {
    fract(HASH_GAIN * x.sin())
}

/// `x³(6x² − 15x + 10)`: zero first and second derivative at 0 and 1.
#[inline]
pub fn quintic(x: f64) -> f64 {
    x * x * x * (x * (x * 6.0 - 15.0) + 10.0)
}

/// 2D value noise sampled at `p * scale * frequency`. Output lies in `[0, 1)`.
pub fn noise2(p: Vec2, scale: f64, frequency: f64) -> f64 {
    let p = p * (scale * frequency);
    let i = p.floor();
    let f = p.fract();

    let corner = |ox: f64, oy: f64| hash((i + Vec2::new(ox, oy)).dot(LATTICE_BASIS_2D));
    let n00 = corner(0.0, 0.0);
    let n10 = corner(1.0, 0.0);
    let n01 = corner(0.0, 1.0);
    let n11 = corner(1.0, 1.0);

    let ux = quintic(f.x);
    let uy = quintic(f.y);
    mix(mix(n00, n10, ux), mix(n01, n11, ux), uy)
}

/// 3D value noise sampled at `p * scale * frequency`. Output lies in `[0, 1)`.
pub fn noise3(p: Vec3, scale: f64, frequency: f64) -> f64 {
    let p = p * (scale * frequency);
    let i = p.floor();
    let f = p.fract();

    let corner =
        |ox: f64, oy: f64, oz: f64| hash((i + Vec3::new(ox, oy, oz)).dot(LATTICE_BASIS_3D));
    let n000 = corner(0.0, 0.0, 0.0);
    let n100 = corner(1.0, 0.0, 0.0);
    let n010 = corner(0.0, 1.0, 0.0);
    let n110 = corner(1.0, 1.0, 0.0);
    let n001 = corner(0.0, 0.0, 1.0);
    let n101 = corner(1.0, 0.0, 1.0);
    let n011 = corner(0.0, 1.0, 1.0);
    let n111 = corner(1.0, 1.0, 1.0);

    let ux = quintic(f.x);
    let uy = quintic(f.y);
    let uz = quintic(f.z);
    mix(
        mix(mix(n000, n100, ux), mix(n010, n110, ux), uy),
        mix(mix(n001, n101, ux), mix(n011, n111, ux), uy),
        uz,
    )
}

/// Hash of the 2D lattice corner `(ix, iy)`.
pub fn lattice_value2(ix: f64, iy: f64) -> f64 {
    hash(Vec2::new(ix, iy).dot(LATTICE_BASIS_2D))
}

/// Hash of the 3D lattice corner `(ix, iy, iz)`.
pub fn lattice_value3(ix: f64, iy: f64, iz: f64) -> f64 {
    hash(Vec3::new(ix, iy, iz).dot(LATTICE_BASIS_3D))
}
