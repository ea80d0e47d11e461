//! The raised-cosine probe envelope and its evaluation over scalars and arrays.
//!
//! All times are in the same units as the pulse duration `tau`, and the
//! returned amplitude is in the units of `op_max` (usually angular frequency).

use ndarray as nd;
use num_traits::{ Float, FloatConst };
use tracing::debug;
use crate::error::{ PulseError, PulseResult };

/// Evaluate the raised-cosine envelope at a single time.
///
/// ```text
/// Ω(t) = op_max (1 - cos(2π t / tau)) / 2
/// ```
///
/// No check is made on `tau`: a zero duration gives `NaN` per IEEE-754, since
/// `t / 0` is either infinite or `NaN` and the cosine of either is `NaN`.
pub fn envelope_scalar<F>(t: F, op_max: F, tau: F) -> F
where F: Float + FloatConst
{
    let two = F::one() + F::one();
    op_max * (F::one() - (two * F::PI() * t / tau).cos()) / two
}

/// Something that can stand in for the time argument of [`envelope`].
///
/// Scalars map to scalars and collections map element-wise to a collection of
/// the same shape.
pub trait PulseTime {
    type Output;

    /// Apply `f` to every time coordinate held by `self`.
    fn map_time<F>(self, f: F) -> Self::Output
    where F: Fn(f64) -> f64;
}

impl PulseTime for f64 {
    type Output = f64;

    fn map_time<F>(self, f: F) -> f64
    where F: Fn(f64) -> f64
    {
        f(self)
    }
}

impl PulseTime for &f64 {
    type Output = f64;

    fn map_time<F>(self, f: F) -> f64
    where F: Fn(f64) -> f64
    {
        f(*self)
    }
}

impl PulseTime for &[f64] {
    type Output = Vec<f64>;

    fn map_time<F>(self, f: F) -> Vec<f64>
    where F: Fn(f64) -> f64
    {
        self.iter().map(|tk| f(*tk)).collect()
    }
}

impl PulseTime for &Vec<f64> {
    type Output = Vec<f64>;

    fn map_time<F>(self, f: F) -> Vec<f64>
    where F: Fn(f64) -> f64
    {
        self.as_slice().map_time(f)
    }
}

impl PulseTime for Vec<f64> {
    type Output = Vec<f64>;

    fn map_time<F>(mut self, f: F) -> Vec<f64>
    where F: Fn(f64) -> f64
    {
        self.iter_mut().for_each(|tk| { *tk = f(*tk); });
        self
    }
}

impl<const N: usize> PulseTime for [f64; N] {
    type Output = [f64; N];

    fn map_time<F>(self, f: F) -> [f64; N]
    where F: Fn(f64) -> f64
    {
        self.map(f)
    }
}

impl<S, D> PulseTime for nd::ArrayBase<S, D>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    type Output = nd::Array<f64, D>;

    fn map_time<F>(self, f: F) -> nd::Array<f64, D>
    where F: Fn(f64) -> f64
    {
        self.mapv(f)
    }
}

impl<S, D> PulseTime for &nd::ArrayBase<S, D>
where
    S: nd::Data<Elem = f64>,
    D: nd::Dimension,
{
    type Output = nd::Array<f64, D>;

    fn map_time<F>(self, f: F) -> nd::Array<f64, D>
    where F: Fn(f64) -> f64
    {
        self.mapv(f)
    }
}

/// Compute the probe Rabi frequency `op_max (1 - cos(2π t / tau)) / 2` for a
/// scalar time or, element-wise, for a collection of times.
///
/// A zero `tau` is not rejected here and yields `NaN` in every output element;
/// use [`try_envelope`] to have it reported as an error instead.
pub fn envelope<T>(t: T, op_max: f64, tau: f64) -> T::Output
where T: PulseTime
{
    t.map_time(|tk| envelope_scalar(tk, op_max, tau))
}

/// Like [`envelope`], but fail with [`PulseError::InvalidArgument`] if `tau`
/// is zero.
pub fn try_envelope<T>(t: T, op_max: f64, tau: f64) -> PulseResult<T::Output>
where T: PulseTime
{
    if tau == 0.0 {
        debug!(tau, "rejected zero pulse duration");
        return Err(PulseError::InvalidArgument {
            name: "tau",
            value: tau,
            reason: "pulse duration must be nonzero",
        });
    }
    Ok(envelope(t, op_max, tau))
}

/// A raised-cosine pulse with fixed peak amplitude and duration.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct RaisedCosine {
    op_max: f64,
    tau: f64,
}

impl RaisedCosine {
    /// Create a new pulse.
    ///
    /// Fails if `tau` is zero or non-finite, or if `op_max` is non-finite.
    pub fn new(op_max: f64, tau: f64) -> PulseResult<Self> {
        if !op_max.is_finite() {
            return Err(PulseError::InvalidArgument {
                name: "op_max",
                value: op_max,
                reason: "peak amplitude must be finite",
            });
        }
        if tau == 0.0 || !tau.is_finite() {
            debug!(tau, "rejected pulse duration");
            return Err(PulseError::InvalidArgument {
                name: "tau",
                value: tau,
                reason: "pulse duration must be finite and nonzero",
            });
        }
        Ok(Self { op_max, tau })
    }

    /// Get the peak amplitude.
    pub fn op_max(&self) -> f64 { self.op_max }

    /// Get the pulse duration.
    pub fn tau(&self) -> f64 { self.tau }

    /// Evaluate the envelope at a single time.
    pub fn at(&self, t: f64) -> f64 { envelope(t, self.op_max, self.tau) }

    /// Evaluate the envelope over an array of time coordinates.
    pub fn gen(&self, time: &nd::Array1<f64>) -> nd::Array1<f64> {
        envelope(time, self.op_max, self.tau)
    }

    /// Compute the pulse area, i.e. the integral of the envelope over one full
    /// period.
    ///
    /// The mean of `(1 - cos)/2` over a period is 1/2, so this is just
    /// `op_max * tau / 2`. A π-pulse therefore has `op_max = 2π / tau`.
    pub fn area(&self) -> f64 { self.op_max * self.tau / 2.0 }

    /// Return the envelope as a plain time-dependent strength function.
    pub fn strength_fn(&self) -> impl Fn(f64) -> f64 + Copy {
        let Self { op_max, tau } = *self;
        move |t: f64| envelope_scalar(t, op_max, tau)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn known_values() {
        assert_eq!(envelope(0.0, 10.0, 1.0), 0.0);
        assert_relative_eq!(envelope(0.5, 10.0, 1.0), 10.0, epsilon = 1e-9);
        assert_relative_eq!(envelope(0.25, 10.0, 1.0), 5.0, epsilon = 1e-9);
        assert_relative_eq!(envelope(0.75, 10.0, 1.0), 5.0, epsilon = 1e-9);
        assert_relative_eq!(envelope(1.0, 10.0, 1.0), 0.0, epsilon = 1e-9);
    }

    #[test]
    fn negative_amplitude_flips_sign() {
        assert_relative_eq!(envelope(0.5, -3.0, 1.0), -3.0, epsilon = 1e-12);
        assert_relative_eq!(
            envelope(0.3, -3.0, 2.0),
            -envelope(0.3, 3.0, 2.0),
            epsilon = 1e-15
        );
    }

    #[test]
    fn zero_duration_is_nan() {
        assert!(envelope(0.0, 10.0, 0.0).is_nan());
        assert!(envelope(0.4, 10.0, 0.0).is_nan());
        assert!(envelope(-0.4, 10.0, -0.0).is_nan());
        assert!(envelope(vec![0.0, 1.0, 2.0], 1.0, 0.0).iter().all(|x| x.is_nan()));
    }

    #[test]
    fn try_envelope_rejects_zero_duration() {
        match try_envelope(0.25, 10.0, 0.0) {
            Err(PulseError::InvalidArgument { name, .. }) => assert_eq!(name, "tau"),
            other => panic!("expected InvalidArgument, got {:?}", other),
        }
        assert!(try_envelope(0.25, 10.0, -0.0).is_err());
        let ok = try_envelope(0.25, 10.0, 1.0).unwrap();
        assert_relative_eq!(ok, 5.0, epsilon = 1e-9);
    }

    #[test]
    fn single_precision_kernel() {
        let x: f32 = envelope_scalar(0.5_f32, 4.0, 1.0);
        assert!((x - 4.0).abs() < 1e-5);
    }

    #[test]
    fn shapes_are_preserved() {
        let arr: [f64; 3] = envelope([0.0, 0.5, 1.0], 2.0, 1.0);
        assert_relative_eq!(arr[1], 2.0, epsilon = 1e-12);

        let slice: &[f64] = &[0.0, 0.25];
        assert_eq!(envelope(slice, 2.0, 1.0).len(), 2);

        let grid: nd::Array2<f64>
            = nd::Array2::from_shape_fn((3, 4), |(i, j)| (i * 4 + j) as f64 / 12.0);
        let out = envelope(&grid, 2.0, 1.0);
        assert_eq!(out.shape(), &[3, 4]);
        for (tk, wk) in grid.iter().zip(out.iter()) {
            assert_eq!(*wk, envelope(*tk, 2.0, 1.0));
        }

        let view = grid.row(1);
        assert_eq!(envelope(view, 2.0, 1.0).len(), 4);
    }

    #[test]
    fn raised_cosine_rejects_bad_params() {
        assert!(RaisedCosine::new(1.0, 0.0).is_err());
        assert!(RaisedCosine::new(1.0, f64::INFINITY).is_err());
        assert!(RaisedCosine::new(f64::NAN, 1.0).is_err());
        assert!(RaisedCosine::new(-1.0, -2.0).is_ok());
    }

    #[test]
    fn raised_cosine_matches_free_function() {
        let pulse = RaisedCosine::new(7.5, 2.0).unwrap();
        let strength = pulse.strength_fn();
        for k in 0..=20 {
            let t = k as f64 * 0.1;
            assert_eq!(pulse.at(t), envelope(t, 7.5, 2.0));
            assert_eq!(strength(t), pulse.at(t));
        }
    }

    #[test]
    fn area_matches_trapezoid() {
        let pulse = RaisedCosine::new(3.0, 2.0).unwrap();
        let n = 2001;
        let time: nd::Array1<f64> = nd::Array1::linspace(0.0, pulse.tau(), n);
        let w = pulse.gen(&time);
        let dt = pulse.tau() / (n - 1) as f64;
        let trapz: f64
            = w.iter().zip(w.iter().skip(1))
            .map(|(wk, wkp1)| dt * (*wk + *wkp1) / 2.0)
            .sum();
        assert_relative_eq!(trapz, pulse.area(), epsilon = 1e-9);
    }
}
