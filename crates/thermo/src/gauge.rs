use vrv_core::Shape;

/// Standard atmospheric pressure (kPa) used to convert gauge readings.
pub const ATMOSPHERIC_PRESSURE_KPA: f64 = 101.35;

/// Converts gauge pressure (kPa) to absolute pressure (kPa).
///
/// Sensor logs record gauge pressure; every correlation in this crate expects
/// absolute pressure.
#[must_use]
pub fn absolute_from_gauge<S: Shape>(pg: &S) -> S {
    pg.map(|p| p + ATMOSPHERIC_PRESSURE_KPA)
}

/// Converts absolute pressure (kPa) to gauge pressure (kPa).
#[must_use]
pub fn gauge_from_absolute<S: Shape>(pa: &S) -> S {
    pa.map(|p| p - ATMOSPHERIC_PRESSURE_KPA)
}
