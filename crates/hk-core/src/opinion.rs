//! Opinion Spaces
//!
//! Everything the engines need to know about a single opinion, implemented
//! for scalar (`f64`) and planar ([`Point2`]) opinions so each engine is
//! written once.

use std::fmt::Debug;
use std::ops::{Add, Mul, Sub};

use hk_types::{BoundaryPolicy, Norm, Point2, Topology};
use rand::Rng;
use rand_distr::{Distribution, StandardNormal};

use crate::boundary;

/// An agent's position in opinion space.
pub trait Opinion:
    Copy
    + Debug
    + PartialEq
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<f64, Output = Self>
    + Send
    + Sync
    + 'static
{
    /// Number of coordinates.
    const DIMENSION: usize;

    fn zero() -> Self;

    fn is_finite(self) -> bool;

    /// Ordering key for sorted sweeps: the value itself, or the first
    /// coordinate of a planar opinion.
    fn sort_key(self) -> f64;

    /// True when every coordinate lies in `[0, 1]`.
    fn in_unit_domain(self) -> bool;

    /// Distance used by the neighbor rule.
    fn distance(self, other: Self, norm: Norm, topology: Topology) -> f64;

    /// Signed displacement `self - other`, taking the shorter way round on
    /// a periodic space.
    fn displacement(self, other: Self, topology: Topology) -> Self;

    /// One standard Gaussian draw per coordinate.
    fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> Self;

    /// Brings the opinion back into the unit domain.
    fn project(self, policy: BoundaryPolicy) -> Self;

    fn supports_topology(topology: Topology) -> bool;

    fn supports_boundary(policy: BoundaryPolicy) -> bool;
}

impl Opinion for f64 {
    const DIMENSION: usize = 1;

    fn zero() -> Self {
        0.0
    }

    fn is_finite(self) -> bool {
        f64::is_finite(self)
    }

    fn sort_key(self) -> f64 {
        self
    }

    fn in_unit_domain(self) -> bool {
        (0.0..=1.0).contains(&self)
    }

    fn distance(self, other: Self, _norm: Norm, topology: Topology) -> f64 {
        let direct = (self - other).abs();
        match topology {
            Topology::Bounded => direct,
            Topology::Periodic => direct.min(1.0 - direct),
        }
    }

    fn displacement(self, other: Self, topology: Topology) -> Self {
        let delta = self - other;
        if topology == Topology::Bounded {
            return delta;
        }
        let direct = delta.abs();
        let wrapped = 1.0 - direct;
        // Equal lengths keep the direct path
        if direct <= wrapped {
            delta
        } else if self < other {
            wrapped
        } else {
            -wrapped
        }
    }

    fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Distribution::<f64>::sample(&StandardNormal, rng)
    }

    fn project(self, policy: BoundaryPolicy) -> Self {
        boundary::project(self, policy)
    }

    fn supports_topology(_topology: Topology) -> bool {
        true
    }

    fn supports_boundary(_policy: BoundaryPolicy) -> bool {
        true
    }
}

impl Opinion for Point2 {
    const DIMENSION: usize = 2;

    fn zero() -> Self {
        Point2::ORIGIN
    }

    fn is_finite(self) -> bool {
        Point2::is_finite(self)
    }

    fn sort_key(self) -> f64 {
        self.x
    }

    fn in_unit_domain(self) -> bool {
        self.x.in_unit_domain() && self.y.in_unit_domain()
    }

    fn distance(self, other: Self, norm: Norm, _topology: Topology) -> f64 {
        Point2::distance(self, other, norm)
    }

    fn displacement(self, other: Self, _topology: Topology) -> Self {
        self - other
    }

    fn gaussian<R: Rng + ?Sized>(rng: &mut R) -> Self {
        let x: f64 = StandardNormal.sample(rng);
        let y: f64 = StandardNormal.sample(rng);
        Point2::new(x, y)
    }

    fn project(self, policy: BoundaryPolicy) -> Self {
        self.map(|c| boundary::project(c, policy))
    }

    // The torus is only defined for scalar opinions
    fn supports_topology(topology: Topology) -> bool {
        topology == Topology::Bounded
    }

    // TODO: enable planar reflect; planar period also needs a toroidal distance
    fn supports_boundary(policy: BoundaryPolicy) -> bool {
        policy == BoundaryPolicy::Absorb
    }
}
