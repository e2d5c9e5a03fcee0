//! ECEF orbit propagation from broadcast ephemeris, IS-GPS-200 user
//! algorithm.

use gnss_rs::prelude::SV;

use serde::Serialize;

use crate::{ephemeris::EphemerisRecord, errors::Error};

/// WGS84 earth gravitational parameter for GPS users [m³/s²].
pub const MU_GPS: f64 = 3.986005E14;

/// WGS84 earth rotation rate [rad/s].
pub const OMEGA_E_DOT: f64 = 7.2921151467E-5;

/// Seconds in one GPS week.
pub const WEEK_SECONDS: f64 = 604800.0;

const HALF_WEEK_SECONDS: f64 = 302400.0;

/// Kepler iteration terminates below this anomaly step [rad].
const KEPLER_TOLERANCE_RAD: f64 = 1.0E-12;

/// Kepler iteration cap. Broadcast eccentricities converge in a handful
/// of steps, anything beyond this is divergent input.
const KEPLER_MAX_ITER: usize = 30;

/// Satellite ECEF position at a propagation epoch.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct PositionFix {
    pub sv: SV,
    /// Solved eccentric anomaly [rad].
    pub eccentric_anomaly: f64,
    pub x_m: f64,
    pub y_m: f64,
    pub z_m: f64,
}

impl PositionFix {
    /// Distance from the earth's center [m].
    pub fn radius_m(&self) -> f64 {
        (self.x_m * self.x_m + self.y_m * self.y_m + self.z_m * self.z_m).sqrt()
    }
}

impl std::fmt::Display for PositionFix {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        write!(
            f,
            "{} x={:.3} y={:.3} z={:.3}",
            self.sv, self.x_m, self.y_m, self.z_m
        )
    }
}

/// Corrects a time difference for week rollover, into [-302400, 302400].
pub fn week_rollover(dt: f64) -> f64 {
    if dt > HALF_WEEK_SECONDS {
        dt - WEEK_SECONDS
    } else if dt < -HALF_WEEK_SECONDS {
        dt + WEEK_SECONDS
    } else {
        dt
    }
}

/// Solves Kepler's equation M = E - e sin(E) by fixed point iteration.
fn solve_kepler(m: f64, e: f64) -> Result<f64, Error> {
    let mut ek = m;

    for _ in 0..KEPLER_MAX_ITER {
        let next = m + e * ek.sin();

        if (next - ek).abs() < KEPLER_TOLERANCE_RAD {
            return Ok(next);
        }

        ek = next;
    }

    Err(Error::DivergentSolution(KEPLER_MAX_ITER))
}

/// Resolves the ECEF position of `record`'s satellite at GPS time of
/// week `t` [s].
pub fn resolve(record: &EphemerisRecord, t: f64) -> Result<PositionFix, Error> {
    let orbit = &record.orbit;
    let plane = &record.plane;

    let a = orbit.sqrta * orbit.sqrta;

    if a <= 0.0 {
        return Err(Error::InvalidEphemeris("semi-major axis is not positive"));
    }

    let e = orbit.e;

    if !(0.0..1.0).contains(&e) {
        return Err(Error::InvalidEphemeris("eccentricity outside [0, 1)"));
    }

    let tk = week_rollover(t - orbit.toe);

    let n0 = (MU_GPS / (a * a * a)).sqrt();
    let n = n0 + orbit.deltan;
    let mk = orbit.m0 + n * tk;

    let ek = solve_kepler(mk, e)?;
    let (sin_ek, cos_ek) = ek.sin_cos();

    // true anomaly, quadrant preserved
    let vk = ((1.0 - e * e).sqrt() * sin_ek).atan2(cos_ek - e);

    let phik = vk + plane.omega;
    let (sin_2phik, cos_2phik) = (2.0 * phik).sin_cos();

    let duk = orbit.cus * sin_2phik + orbit.cuc * cos_2phik;
    let drk = orbit.crs * sin_2phik + plane.crc * cos_2phik;
    let dik = plane.cis * sin_2phik + plane.cic * cos_2phik;

    let uk = phik + duk;
    let rk = a * (1.0 - e * cos_ek) + drk;
    let ik = plane.i0 + dik + plane.idot * tk;

    let xp = rk * uk.cos();
    let yp = rk * uk.sin();

    let omegak = plane.omega0 + (plane.omegadot - OMEGA_E_DOT) * tk - OMEGA_E_DOT * orbit.toe;
    let (sin_omegak, cos_omegak) = omegak.sin_cos();
    let cos_ik = ik.cos();

    Ok(PositionFix {
        sv: record.sv,
        eccentric_anomaly: ek,
        x_m: xp * cos_omegak - yp * cos_ik * sin_omegak,
        y_m: xp * sin_omegak + yp * cos_ik * cos_omegak,
        z_m: yp * ik.sin(),
    })
}
