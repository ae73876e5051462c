use crate::{Error, Point, Scalar, Size, utils::clamp};
use std::{fmt, str::FromStr};

/// Shape of the fade gradient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum GradShape {
    /// Fade along a line through the image center
    #[default]
    Linear,
    /// Fade from the image center outwards
    Radial,
}

impl fmt::Display for GradShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            GradShape::Linear => write!(f, "linear"),
            GradShape::Radial => write!(f, "radial"),
        }
    }
}

impl FromStr for GradShape {
    type Err = Error;

    fn from_str(shape: &str) -> Result<Self, Self::Err> {
        match shape {
            "linear" => Ok(GradShape::Linear),
            "radial" => Ok(GradShape::Radial),
            _ => Err(Error::ParamsError {
                reason: format!("unknown gradient shape: {}", shape),
            }),
        }
    }
}

/// User editable fade parameters
///
/// Values are not validated, any number is accepted and normalized when the
/// gradient is constructed.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct GradParams {
    pub shape: GradShape,
    /// Direction of the linear fade in degrees, `0` points up, `90` points right
    pub angle: Scalar,
    /// Start of the transition zone in percents of the gradient axis
    pub fade_start: Scalar,
    /// End of the transition zone in percents of the gradient axis
    pub fade_end: Scalar,
    /// Swap opaque and transparent sides
    pub invert: bool,
}

impl Default for GradParams {
    fn default() -> Self {
        Self {
            shape: GradShape::Linear,
            angle: 180.0,
            fade_start: 0.0,
            fade_end: 100.0,
            invert: false,
        }
    }
}

impl GradParams {
    /// Linear fade in the direction of the `angle` (degrees)
    pub fn linear(angle: Scalar) -> Self {
        Self {
            shape: GradShape::Linear,
            angle,
            ..Default::default()
        }
    }

    /// Radial fade from the center
    pub fn radial() -> Self {
        Self {
            shape: GradShape::Radial,
            ..Default::default()
        }
    }

    /// Override transition zone (percents)
    pub fn with_fade(self, fade_start: Scalar, fade_end: Scalar) -> Self {
        Self {
            fade_start,
            fade_end,
            ..self
        }
    }

    pub fn with_invert(self, invert: bool) -> Self {
        Self { invert, ..self }
    }

    /// Normalized transition zone
    pub fn zone(&self) -> FadeZone {
        FadeZone::new(self.fade_start, self.fade_end)
    }

    /// Alpha factor profile described by these parameters
    pub fn profile(&self) -> FadeProfile {
        FadeProfile::new(self.zone(), self.invert)
    }

    /// Parse parameters from JSON, missing fields take default values
    #[cfg(feature = "serde")]
    pub fn from_json(json: &str) -> Result<Self, Error> {
        Ok(serde_json::from_str(json)?)
    }

    #[cfg(feature = "serde")]
    pub fn to_json(&self) -> Result<String, Error> {
        Ok(serde_json::to_string(self)?)
    }
}

/// Convert percent value into `[0, 1]` range, `NaN` is treated as zero
fn percent_unit(value: Scalar) -> Scalar {
    if value.is_nan() {
        0.0
    } else {
        clamp(value / 100.0, 0.0, 1.0)
    }
}

/// Transition zone along the gradient axis, always `0 <= lo <= hi <= 1`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeZone {
    lo: Scalar,
    hi: Scalar,
}

impl FadeZone {
    /// Create zone from a pair of percentages given in any order
    pub fn new(fade_start: Scalar, fade_end: Scalar) -> Self {
        let start = percent_unit(fade_start);
        let end = percent_unit(fade_end);
        Self {
            lo: start.min(end),
            hi: start.max(end),
        }
    }

    pub fn lo(&self) -> Scalar {
        self.lo
    }

    pub fn hi(&self) -> Scalar {
        self.hi
    }

    /// Zone has no width and the transition is a hard step
    pub fn is_step(&self) -> bool {
        self.lo == self.hi
    }
}

/// Four stop alpha profile: constant, linear ramp over the fade zone, constant
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FadeProfile {
    zone: FadeZone,
    invert: bool,
}

impl FadeProfile {
    pub fn new(zone: FadeZone, invert: bool) -> Self {
        Self { zone, invert }
    }

    /// Opacity of the non-inverted profile at gradient offset `t`
    ///
    /// When the zone is a step, offsets equal to the step position are already
    /// on the transparent side.
    fn coverage(&self, t: Scalar) -> Scalar {
        let FadeZone { lo, hi } = self.zone;
        let t = clamp(t, 0.0, 1.0);
        if t >= hi {
            0.0
        } else if t <= lo {
            1.0
        } else {
            (hi - t) / (hi - lo)
        }
    }

    /// Alpha factor in `[0, 1]` at gradient offset `t`
    pub fn factor(&self, t: Scalar) -> Scalar {
        let coverage = self.coverage(t);
        if self.invert { 1.0 - coverage } else { coverage }
    }

    /// Scale 8-bit `alpha` by the factor at gradient offset `t`
    ///
    /// Inverted result is computed as a complement of the non-inverted one, so
    /// both always add up to the source alpha.
    pub fn apply(&self, alpha: u8, t: Scalar) -> u8 {
        let alpha_max = alpha as Scalar;
        let kept = clamp((alpha_max * self.coverage(t)).round(), 0.0, alpha_max) as u8;
        if self.invert { alpha - kept } else { kept }
    }
}

/// Derived gradient geometry in pixel coordinates of the image
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum GradAxis {
    /// Segment starting at `start`, `dir` is precomputed `(end - start) / |end - start| ^ 2`
    Linear { start: Point, dir: Point },
    /// Circle around `center`
    Radial { center: Point, radius: Scalar },
    /// Single pixel image, every point is at the start of the axis
    Degenerate,
}

impl GradAxis {
    /// Construct gradient axis for the image of the given size
    pub fn new(size: Size, params: &GradParams) -> Self {
        if size.width <= 1 && size.height <= 1 {
            return GradAxis::Degenerate;
        }
        let center = size.center();
        match params.shape {
            GradShape::Linear => {
                let angle = if params.angle.is_finite() {
                    params.angle.rem_euclid(360.0)
                } else {
                    0.0
                };
                // zero degrees points up, y axis points down
                let dir = Point::from_angle((angle - 90.0).to_radians());
                let half = size.diagonal().max(1.0) / 2.0;
                let start = center - dir * half;
                let end = center + dir * half;
                let dir = end - start;
                GradAxis::Linear {
                    start,
                    dir: dir / dir.dot(dir),
                }
            }
            GradShape::Radial => {
                let radius = (size.width.max(size.height) as Scalar / 2.0).max(1.0);
                GradAxis::Radial { center, radius }
            }
        }
    }

    /// Gradient offset `t` in `[0, 1]` at a given point
    pub fn offset(&self, point: Point) -> Scalar {
        let t = match *self {
            // t = (point - start).dot(end - start) / |end - start| ^ 2
            GradAxis::Linear { start, dir } => (point - start).dot(dir),
            GradAxis::Radial { center, radius } => point.dist(center) / radius,
            GradAxis::Degenerate => 0.0,
        };
        clamp(t, 0.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assert_approx_eq;

    #[test]
    fn test_zone_normalize() {
        let zone = FadeZone::new(80.0, 20.0);
        assert_approx_eq!(zone.lo(), 0.2);
        assert_approx_eq!(zone.hi(), 0.8);
        assert_eq!(zone, FadeZone::new(20.0, 80.0));

        let zone = FadeZone::new(-50.0, 250.0);
        assert_eq!(zone.lo(), 0.0);
        assert_eq!(zone.hi(), 1.0);

        let zone = FadeZone::new(Scalar::NAN, Scalar::INFINITY);
        assert_eq!(zone.lo(), 0.0);
        assert_eq!(zone.hi(), 1.0);

        assert!(FadeZone::new(50.0, 50.0).is_step());
        assert!(!FadeZone::new(50.0, 51.0).is_step());
    }

    #[test]
    fn test_profile() {
        let profile = FadeProfile::new(FadeZone::new(20.0, 60.0), false);
        assert_eq!(profile.factor(0.0), 1.0);
        assert_eq!(profile.factor(0.2), 1.0);
        assert_approx_eq!(profile.factor(0.3), 0.75);
        assert_approx_eq!(profile.factor(0.4), 0.5);
        assert_eq!(profile.factor(0.6), 0.0);
        assert_eq!(profile.factor(1.0), 0.0);
        assert_eq!(profile.factor(-3.0), 1.0);
        assert_eq!(profile.factor(3.0), 0.0);

        let inverted = FadeProfile::new(FadeZone::new(20.0, 60.0), true);
        assert_eq!(inverted.factor(0.1), 0.0);
        assert_approx_eq!(inverted.factor(0.3), 0.25);
        assert_eq!(inverted.factor(0.9), 1.0);
    }

    #[test]
    fn test_profile_monotonic() {
        for (start, end) in [(0.0, 100.0), (30.0, 70.0), (90.0, 10.0), (50.0, 50.0)] {
            let zone = FadeZone::new(start, end);
            let direct = FadeProfile::new(zone, false);
            let inverted = FadeProfile::new(zone, true);
            let mut prev = (1.0, 0.0);
            for i in 0..=1000 {
                let t = i as Scalar / 1000.0;
                let (f0, f1) = (direct.factor(t), inverted.factor(t));
                assert!((0.0..=1.0).contains(&f0) && (0.0..=1.0).contains(&f1));
                assert!(f0 <= prev.0, "not inverted profile must not increase");
                assert!(f1 >= prev.1, "inverted profile must not decrease");
                prev = (f0, f1);
            }
        }
    }

    #[test]
    fn test_profile_step() {
        let profile = FadeProfile::new(FadeZone::new(50.0, 50.0), false);
        assert_eq!(profile.factor(0.0), 1.0);
        assert_eq!(profile.factor(0.4999), 1.0);
        assert_eq!(profile.factor(0.5), 0.0);
        assert_eq!(profile.factor(1.0), 0.0);
        for i in 0..=100 {
            let factor = profile.factor(i as Scalar / 100.0);
            assert!(factor == 0.0 || factor == 1.0);
        }
    }

    #[test]
    fn test_apply_complement() {
        let zone = FadeZone::new(10.0, 90.0);
        let direct = FadeProfile::new(zone, false);
        let inverted = FadeProfile::new(zone, true);
        for alpha in [0u8, 1, 77, 128, 255] {
            for i in 0..=200 {
                let t = i as Scalar / 200.0;
                let a0 = direct.apply(alpha, t);
                let a1 = inverted.apply(alpha, t);
                assert_eq!(a0 as u16 + a1 as u16, alpha as u16);
                assert!((a0 as Scalar - alpha as Scalar * direct.factor(t)).abs() <= 0.5);
            }
        }
    }

    #[test]
    fn test_linear_axis() {
        let size = Size::new(10, 10);
        let half = size.diagonal() / 2.0;

        // pointing down
        let axis = GradAxis::new(size, &GradParams::linear(180.0));
        assert_approx_eq!(axis.offset(Point::new(5.0, 5.0)), 0.5, 1e-9);
        assert_approx_eq!(axis.offset(Point::new(5.0, 5.0 - half)), 0.0, 1e-9);
        assert_approx_eq!(axis.offset(Point::new(0.0, 5.0 + half / 2.0)), 0.75, 1e-9);
        assert_eq!(axis.offset(Point::new(5.0, 100.0)), 1.0);
        assert_eq!(axis.offset(Point::new(5.0, -100.0)), 0.0);

        // pointing up
        let axis = GradAxis::new(size, &GradParams::linear(0.0));
        assert!(axis.offset(Point::new(5.0, 1.0)) > axis.offset(Point::new(5.0, 9.0)));

        // pointing right, angles are taken modulo full turn
        let axis = GradAxis::new(size, &GradParams::linear(90.0));
        let wrapped = GradAxis::new(size, &GradParams::linear(450.0));
        let negative = GradAxis::new(size, &GradParams::linear(-270.0));
        for point in [Point::new(1.0, 2.0), Point::new(7.5, 3.0)] {
            assert_approx_eq!(axis.offset(point), wrapped.offset(point), 1e-9);
            assert_approx_eq!(axis.offset(point), negative.offset(point), 1e-9);
        }
        assert!(axis.offset(Point::new(1.0, 5.0)) < axis.offset(Point::new(9.0, 5.0)));
    }

    #[test]
    fn test_radial_axis() {
        let axis = GradAxis::new(Size::new(20, 10), &GradParams::radial());
        assert_eq!(
            axis,
            GradAxis::Radial {
                center: Point::new(10.0, 5.0),
                radius: 10.0
            }
        );
        assert_eq!(axis.offset(Point::new(10.0, 5.0)), 0.0);
        assert_approx_eq!(axis.offset(Point::new(15.0, 5.0)), 0.5);
        assert_eq!(axis.offset(Point::new(0.0, 0.0)), 1.0);
    }

    #[test]
    fn test_degenerate_axis() {
        let axis = GradAxis::new(Size::new(1, 1), &GradParams::linear(45.0));
        assert_eq!(axis, GradAxis::Degenerate);
        assert_eq!(axis.offset(Point::new(0.5, 0.5)), 0.0);

        // thin images still get a proper axis
        let axis = GradAxis::new(Size::new(1, 2), &GradParams::radial());
        assert_eq!(
            axis,
            GradAxis::Radial {
                center: Point::new(0.5, 1.0),
                radius: 1.0
            }
        );
    }

    #[test]
    fn test_shape_parse() -> Result<(), Error> {
        assert_eq!("linear".parse::<GradShape>()?, GradShape::Linear);
        assert_eq!("radial".parse::<GradShape>()?, GradShape::Radial);
        assert_eq!(GradShape::Radial.to_string(), "radial");
        assert!("conic".parse::<GradShape>().is_err());
        Ok(())
    }

    #[cfg(feature = "serde")]
    #[test]
    fn test_params_json() -> Result<(), Error> {
        let params = GradParams::from_json(r#"{"shape": "radial", "fade_end": 40}"#)?;
        assert_eq!(params, GradParams::radial().with_fade(0.0, 40.0));

        let params = GradParams::linear(33.0).with_fade(10.0, 20.0).with_invert(true);
        assert_eq!(GradParams::from_json(&params.to_json()?)?, params);

        assert!(matches!(
            GradParams::from_json(r#"{"shape": "conic"}"#),
            Err(Error::ParamsError { .. })
        ));
        Ok(())
    }
}
