//! Quadrilateralized spherical cube.
//!
//! Each face is split into four triangular areas meeting at the face
//! centre. A point is rotated into area 0, solved there in closed form, and
//! rotated back by a quarter turn per area. Getting the area wrong mirrors
//! the tile, so every branch below is an explicit case.

use std::f64::consts::{FRAC_1_SQRT_2, FRAC_PI_2, FRAC_PI_4, PI};

use super::{CubeProjection, direction, dominant_face, snap_unit, wrap_longitude};
use crate::FaceSide;

const THREE_FRAC_PI_4: f64 = FRAC_PI_2 + FRAC_PI_4;

/// One of the four quarter-turn areas of a face.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Area {
    Zero,
    One,
    Two,
    Three,
}

impl Area {
    fn rotation(self) -> f64 {
        match self {
            Area::Zero => 0.0,
            Area::One => FRAC_PI_2,
            Area::Two => PI,
            Area::Three => 3.0 * FRAC_PI_2,
        }
    }
}

/// Quadrilateralized spherical cube projection.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct QscProjection;

/// Angular distance `phi` from a side face's centre, plus the area and
/// in-area angle, from the component along the face `normal` and the
/// face-plane components `(x, y)`.
///
/// `phi` comes from `atan2` rather than `acos(normal)`, which rounds to zero
/// within about `1.5e-8` rad of the centre.
fn side_face_angles(normal: f64, x: f64, y: f64) -> (f64, (f64, Area)) {
    let phi = x.hypot(y).atan2(normal);
    let theta = y.atan2(x);
    let angles = if theta.abs() <= FRAC_PI_4 {
        (theta, Area::Zero)
    } else if theta > FRAC_PI_4 && theta <= THREE_FRAC_PI_4 {
        (theta - FRAC_PI_2, Area::One)
    } else if theta > THREE_FRAC_PI_4 || theta <= -THREE_FRAC_PI_4 {
        let theta = if theta >= 0.0 { theta - PI } else { theta + PI };
        (theta, Area::Two)
    } else {
        (theta + FRAC_PI_2, Area::Three)
    };
    (phi, angles)
}

fn top_theta(lon: f64) -> (f64, Area) {
    if (FRAC_PI_4..=THREE_FRAC_PI_4).contains(&lon) {
        (lon - FRAC_PI_2, Area::Zero)
    } else if lon > THREE_FRAC_PI_4 || lon <= -THREE_FRAC_PI_4 {
        let theta = if lon > 0.0 { lon - PI } else { lon + PI };
        (theta, Area::One)
    } else if lon > -THREE_FRAC_PI_4 && lon <= -FRAC_PI_4 {
        (lon + FRAC_PI_2, Area::Two)
    } else {
        (lon, Area::Three)
    }
}

fn bottom_theta(lon: f64) -> (f64, Area) {
    if (FRAC_PI_4..=THREE_FRAC_PI_4).contains(&lon) {
        (-lon + FRAC_PI_2, Area::Zero)
    } else if (-FRAC_PI_4..FRAC_PI_4).contains(&lon) {
        (-lon, Area::One)
    } else if (-THREE_FRAC_PI_4..-FRAC_PI_4).contains(&lon) {
        (-lon - FRAC_PI_2, Area::Two)
    } else {
        let theta = if lon > 0.0 { -lon + PI } else { -lon - PI };
        (theta, Area::Three)
    }
}

impl CubeProjection for QscProjection {
    fn name(&self) -> &'static str {
        "qsc"
    }

    fn forward(&self, lon: f64, lat: f64) -> (FaceSide, f64, f64) {
        let lon = wrap_longitude(lon);
        let dir = direction(lon, lat);
        let face = dominant_face(dir);
        let (q, r, s) = (dir.x, dir.y, dir.z);

        let (phi, (theta, area)) = match face {
            FaceSide::Top => (FRAC_PI_2 - lat, top_theta(lon)),
            FaceSide::Bottom => (FRAC_PI_2 + lat, bottom_theta(lon)),
            FaceSide::Front => side_face_angles(q, r, s),
            FaceSide::Right => side_face_angles(r, -q, s),
            FaceSide::Back => side_face_angles(-q, -r, s),
            FaceSide::Left => side_face_angles(-r, q, s),
        };

        let mu = (12.0 / PI * (theta + (theta.sin() * FRAC_PI_4.cos()).acos() - FRAC_PI_2)).atan();
        let cos_mu = mu.cos();
        // 1 - cos(phi), without cancellation for small phi.
        let one_minus_cos_phi = 2.0 * (0.5 * phi).sin().powi(2);
        let t = (one_minus_cos_phi
            / (cos_mu * cos_mu)
            / (1.0 - (1.0 / theta.cos()).atan().cos()))
        .sqrt();
        let mu = mu + area.rotation();

        (face, snap_unit(t * mu.cos()), snap_unit(t * mu.sin()))
    }

    fn inverse(&self, face: FaceSide, x: f64, y: f64) -> (f64, f64) {
        let nu = x.hypot(y).atan();
        let mu = y.atan2(x);

        let (mu, area) = if x >= 0.0 && x >= y.abs() {
            (mu, Area::Zero)
        } else if y >= 0.0 && y >= x.abs() {
            (mu - FRAC_PI_2, Area::One)
        } else if x < 0.0 && -x >= y.abs() {
            (if mu < 0.0 { mu + PI } else { mu - PI }, Area::Two)
        } else {
            (mu + FRAC_PI_2, Area::Three)
        };

        let t = PI / 12.0 * mu.tan();
        let theta = (t.sin() / (t.cos() - FRAC_1_SQRT_2)).atan();
        let cos_mu = mu.cos();
        let tan_nu = nu.tan();
        let one_minus_cos_phi =
            cos_mu * cos_mu * tan_nu * tan_nu * (1.0 - (1.0 / theta.cos()).atan().cos());
        let phi = 2.0 * (0.5 * one_minus_cos_phi).sqrt().min(1.0).asin();

        match face {
            FaceSide::Top => {
                let lat = FRAC_PI_2 - phi;
                let lon = match area {
                    Area::Zero => theta + FRAC_PI_2,
                    Area::One if theta < 0.0 => theta + PI,
                    Area::One => theta - PI,
                    Area::Two => theta - FRAC_PI_2,
                    Area::Three => theta,
                };
                (lon, lat)
            }
            FaceSide::Bottom => {
                let lat = phi - FRAC_PI_2;
                let lon = match area {
                    Area::Zero => -theta + FRAC_PI_2,
                    Area::One => -theta,
                    Area::Two => -theta - FRAC_PI_2,
                    Area::Three if theta < 0.0 => -theta - PI,
                    Area::Three => -theta + PI,
                };
                (lon, lat)
            }
            FaceSide::Front | FaceSide::Right | FaceSide::Back | FaceSide::Left => {
                // Cartesian point in the face's own frame, then rotated by
                // area and by face.
                let (sin_phi, cos_phi) = phi.sin_cos();
                let (sin_theta, cos_theta) = theta.sin_cos();
                let (q, r, s) = (cos_phi, sin_phi * cos_theta, sin_phi * sin_theta);

                let (r, s) = match area {
                    Area::Zero => (r, s),
                    Area::One => (-s, r),
                    Area::Two => (-r, -s),
                    Area::Three => (s, -r),
                };
                let (q, r) = match face {
                    FaceSide::Right => (-r, q),
                    FaceSide::Back => (-q, -r),
                    FaceSide::Left => (r, -q),
                    _ => (q, r),
                };

                (r.atan2(q), s.clamp(-1.0, 1.0).asin())
            }
        }
    }
}
