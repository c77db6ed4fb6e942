/*
 * Geometry Module
 *
 * Vector helpers and the axis-aligned box that describes the playable volume.
 * The vector type itself is nannou's `Vec3`; this module only adds the few
 * operations the simulation needs on top of it.
 */

use nannou::prelude::{vec3, Vec3};
use rand::Rng;
use serde::{Deserialize, Serialize};

pub trait Vec3Ext {
    /// Same direction, new length. A zero vector stays zero.
    fn set_length(self, length: f32) -> Vec3;

    /// Shortens the vector to `max` if it is longer, otherwise returns it unchanged.
    fn clamp_length_to(self, max: f32) -> Vec3;
}

impl Vec3Ext for Vec3 {
    #[inline]
    fn set_length(self, length: f32) -> Vec3 {
        self.normalize_or_zero() * length
    }

    #[inline]
    fn clamp_length_to(self, max: f32) -> Vec3 {
        let max = max.max(0.0);
        if self.length_squared() > max * max {
            self.set_length(max)
        } else {
            self
        }
    }
}

// Axis-aligned box, min <= max on every axis
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(from = "BoundsRepr", into = "BoundsRepr")]
pub struct Bounds3D {
    pub x_min: f32,
    pub x_max: f32,
    pub x_size: f32,
    pub y_min: f32,
    pub y_max: f32,
    pub y_size: f32,
    pub z_min: f32,
    pub z_max: f32,
    pub z_size: f32,
}

// Config files only carry the six planes; sizes are always derived
#[derive(Serialize, Deserialize)]
struct BoundsRepr {
    x_min: f32,
    x_max: f32,
    y_min: f32,
    y_max: f32,
    z_min: f32,
    z_max: f32,
}

impl From<BoundsRepr> for Bounds3D {
    fn from(r: BoundsRepr) -> Self {
        Bounds3D::new(r.x_min, r.x_max, r.y_min, r.y_max, r.z_min, r.z_max)
    }
}

impl From<Bounds3D> for BoundsRepr {
    fn from(b: Bounds3D) -> Self {
        Self {
            x_min: b.x_min,
            x_max: b.x_max,
            y_min: b.y_min,
            y_max: b.y_max,
            z_min: b.z_min,
            z_max: b.z_max,
        }
    }
}

impl Bounds3D {
    pub fn new(x_min: f32, x_max: f32, y_min: f32, y_max: f32, z_min: f32, z_max: f32) -> Self {
        let (x_min, x_max) = ordered(x_min, x_max);
        let (y_min, y_max) = ordered(y_min, y_max);
        let (z_min, z_max) = ordered(z_min, z_max);

        Self {
            x_min,
            x_max,
            x_size: x_max - x_min,
            y_min,
            y_max,
            y_size: y_max - y_min,
            z_min,
            z_max,
            z_size: z_max - z_min,
        }
    }

    /// A box centred on the origin in x and z, with its floor at y = 0.
    pub fn centred_xz(x_width: f32, z_width: f32, height: f32) -> Self {
        Self::new(
            -x_width / 2.0,
            x_width / 2.0,
            0.0,
            height,
            -z_width / 2.0,
            z_width / 2.0,
        )
    }

    /// A box centred on the origin on every axis.
    pub fn symmetric(half_x: f32, half_y: f32, half_z: f32) -> Self {
        Self::new(-half_x, half_x, -half_y, half_y, -half_z, half_z)
    }

    pub fn centre(&self) -> Vec3 {
        vec3(
            (self.x_min + self.x_max) / 2.0,
            (self.y_min + self.y_max) / 2.0,
            (self.z_min + self.z_max) / 2.0,
        )
    }

    pub fn contains(&self, point: Vec3) -> bool {
        (self.x_min..=self.x_max).contains(&point.x)
            && (self.y_min..=self.y_max).contains(&point.y)
            && (self.z_min..=self.z_max).contains(&point.z)
    }

    // Uniformly random point inside the box
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> Vec3 {
        vec3(
            sample_axis(rng, self.x_min, self.x_max),
            sample_axis(rng, self.y_min, self.y_max),
            sample_axis(rng, self.z_min, self.z_max),
        )
    }
}

#[inline]
fn ordered(a: f32, b: f32) -> (f32, f32) {
    if a <= b {
        (a, b)
    } else {
        (b, a)
    }
}

// gen_range panics on an empty range, so degenerate axes return the bound
#[inline]
fn sample_axis<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.gen_range(min..max)
    } else {
        min
    }
}
