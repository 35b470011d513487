//! Coordinate-system transforms and their differential elements.
//!
//! Each variant maps its own parameters to and from Cartesian space and
//! exposes the symbolic Jacobian-weighted element used in integral captions.
//! Angles are radians throughout.
//!
//! Round-trip guarantee: `to_cartesian(from_cartesian(p)) ≈ p` within
//! floating tolerance for non-singular points. Excluded singularities, where
//! an angle is undefined: the origin for [`Polar`] and the z-axis (sin φ = 0)
//! for [`Spherical`] and [`Cylindrical`].

use enum_dispatch::enum_dispatch;
use glam::DVec3;

/// A bidirectional mapping between a parameter space and Cartesian space.
#[enum_dispatch]
pub trait CoordSystem {
    /// Map parameters to Cartesian `(x, y, z)`.
    fn to_cartesian(&self, params: DVec3) -> DVec3;

    /// Map a Cartesian point back to parameters.
    fn from_cartesian(&self, point: DVec3) -> DVec3;

    /// Symbolic differential area/volume element.
    fn differential_element(&self) -> &'static str;
}

/// Identity transform; parameters are `(x, y, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cartesian;

impl CoordSystem for Cartesian {
    fn to_cartesian(&self, params: DVec3) -> DVec3 {
        params
    }

    fn from_cartesian(&self, point: DVec3) -> DVec3 {
        point
    }

    fn differential_element(&self) -> &'static str {
        "dx dy"
    }
}

/// Planar polar transform; parameters are `(r, θ, _)` with z fixed to 0.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Polar;

impl CoordSystem for Polar {
    fn to_cartesian(&self, params: DVec3) -> DVec3 {
        let (r, theta) = (params.x, params.y);
        DVec3::new(r * theta.cos(), r * theta.sin(), 0.0)
    }

    fn from_cartesian(&self, point: DVec3) -> DVec3 {
        let r = point.x.hypot(point.y);
        let theta = point.y.atan2(point.x);
        DVec3::new(r, theta, 0.0)
    }

    fn differential_element(&self) -> &'static str {
        "r dr dθ"
    }
}

/// Cylindrical transform; parameters are `(r, θ, z)`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Cylindrical;

impl CoordSystem for Cylindrical {
    fn to_cartesian(&self, params: DVec3) -> DVec3 {
        let (r, theta, z) = (params.x, params.y, params.z);
        DVec3::new(r * theta.cos(), r * theta.sin(), z)
    }

    fn from_cartesian(&self, point: DVec3) -> DVec3 {
        let r = point.x.hypot(point.y);
        let theta = point.y.atan2(point.x);
        DVec3::new(r, theta, point.z)
    }

    fn differential_element(&self) -> &'static str {
        "r dr dθ dz"
    }
}

/// Spherical transform; parameters are `(r, φ, θ)` with φ the polar angle
/// measured from the positive z-axis, φ ∈ [0, π].
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Spherical;

impl CoordSystem for Spherical {
    fn to_cartesian(&self, params: DVec3) -> DVec3 {
        let (r, phi, theta) = (params.x, params.y, params.z);
        DVec3::new(
            r * phi.sin() * theta.cos(),
            r * phi.sin() * theta.sin(),
            r * phi.cos(),
        )
    }

    fn from_cartesian(&self, point: DVec3) -> DVec3 {
        let r = point.length();
        if r == 0.0 {
            return DVec3::ZERO;
        }
        let phi = (point.z / r).clamp(-1.0, 1.0).acos();
        let theta = point.y.atan2(point.x);
        DVec3::new(r, phi, theta)
    }

    fn differential_element(&self) -> &'static str {
        "r² sin φ dr dφ dθ"
    }
}

/// Tagged union over the supported coordinate systems.
#[enum_dispatch(CoordSystem)]
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum CoordinateSystem {
    Cartesian,
    Polar,
    Cylindrical,
    Spherical,
}

impl CoordinateSystem {
    /// Every supported system, for enumeration in captions and tests.
    pub const fn all() -> [CoordinateSystem; 4] {
        [
            CoordinateSystem::Cartesian(Cartesian),
            CoordinateSystem::Polar(Polar),
            CoordinateSystem::Cylindrical(Cylindrical),
            CoordinateSystem::Spherical(Spherical),
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    const TOLERANCE: f64 = 1e-9;

    fn assert_close(a: DVec3, b: DVec3) {
        assert!(
            (a - b).abs().max_element() < TOLERANCE,
            "{a:?} != {b:?}"
        );
    }

    /// A random point bounded away from every coordinate singularity:
    /// nonzero radius and a nonzero xy-projection.
    fn non_singular_point(rng: &mut StdRng, planar: bool) -> DVec3 {
        loop {
            let p = DVec3::new(
                rng.gen_range(-10.0..10.0),
                rng.gen_range(-10.0..10.0),
                if planar { 0.0 } else { rng.gen_range(-10.0..10.0) },
            );
            if p.x.hypot(p.y) > 1e-3 {
                return p;
            }
        }
    }

    #[test]
    fn cartesian_round_trip() {
        let mut rng = StdRng::seed_from_u64(7);
        let sys = Cartesian;
        for _ in 0..1000 {
            let p = non_singular_point(&mut rng, false);
            assert_close(sys.to_cartesian(sys.from_cartesian(p)), p);
        }
    }

    #[test]
    fn polar_round_trip() {
        let mut rng = StdRng::seed_from_u64(11);
        let sys = Polar;
        for _ in 0..1000 {
            let p = non_singular_point(&mut rng, true);
            assert_close(sys.to_cartesian(sys.from_cartesian(p)), p);
        }
    }

    #[test]
    fn cylindrical_round_trip() {
        let mut rng = StdRng::seed_from_u64(13);
        let sys = Cylindrical;
        for _ in 0..1000 {
            let p = non_singular_point(&mut rng, false);
            assert_close(sys.to_cartesian(sys.from_cartesian(p)), p);
        }
    }

    #[test]
    fn spherical_round_trip() {
        let mut rng = StdRng::seed_from_u64(17);
        let sys = Spherical;
        for _ in 0..1000 {
            let p = non_singular_point(&mut rng, false);
            assert_close(sys.to_cartesian(sys.from_cartesian(p)), p);
        }
    }

    #[test]
    fn polar_known_points() {
        let sys = Polar;
        let c = sys.to_cartesian(DVec3::new(2.0, std::f64::consts::FRAC_PI_2, 0.0));
        assert_close(c, DVec3::new(0.0, 2.0, 0.0));
    }

    #[test]
    fn spherical_known_points() {
        let sys = Spherical;
        // North pole direction: φ = 0 regardless of θ.
        let c = sys.to_cartesian(DVec3::new(3.0, 0.0, 1.234));
        assert_close(c, DVec3::new(0.0, 0.0, 3.0));
        // Equator, θ = 0.
        let c = sys.to_cartesian(DVec3::new(2.0, std::f64::consts::FRAC_PI_2, 0.0));
        assert_close(c, DVec3::new(2.0, 0.0, 0.0));
    }

    #[test]
    fn differential_elements() {
        let expected = ["dx dy", "r dr dθ", "r dr dθ dz", "r² sin φ dr dφ dθ"];
        for (sys, want) in CoordinateSystem::all().iter().zip(expected) {
            assert_eq!(sys.differential_element(), want);
        }
    }

    #[test]
    fn dispatch_through_enum() {
        let sys: CoordinateSystem = Polar.into();
        let p = sys.to_cartesian(DVec3::new(1.0, 0.0, 0.0));
        assert_close(p, DVec3::new(1.0, 0.0, 0.0));
    }
}
