use approx::assert_relative_eq;
use proptest::prelude::*;
use vrv_compressor::{Coefficients, CompressorModel, OperatingPoint, RunConditions};

fn point(pd: f64, ps: f64, speed: f64) -> OperatingPoint<f64> {
    OperatingPoint::new(
        pd,
        RunConditions {
            suction_pressure: ps,
            suction_temperature: 10.0,
            speed,
            rated_speed: 3600.0,
            flow_correction: 0.8,
        },
    )
}

#[test]
fn override_reaches_the_model() {
    let custom = Coefficients::from_override(Some(&Coefficients::CURRENT_CALIBRATED.as_array()[..]));
    let model = CompressorModel::new(&point(1883.58, 480.0, 3600.0), &custom).unwrap();
    assert_relative_eq!(model.current(), 5.92738158750421, max_relative = 1e-10);

    let fallback = Coefficients::from_override(Some(&[1.0, 2.0, 3.0][..]));
    let model = CompressorModel::new(&point(1883.58, 480.0, 3600.0), &fallback).unwrap();
    assert_relative_eq!(model.current(), 0.0);
}

#[cfg(feature = "serde")]
#[test]
fn operating_point_round_trips_through_json() {
    let original = point(3000.0, 800.0, 3000.0);
    let json = serde_json::to_string(&original).unwrap();
    let parsed: OperatingPoint<f64> = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, original);

    let json = serde_json::to_string(&Coefficients::CURRENT_CALIBRATED).unwrap();
    let parsed: Coefficients = serde_json::from_str(&json).unwrap();
    assert_eq!(parsed, Coefficients::CURRENT_CALIBRATED);
}

proptest! {
    #[test]
    fn volume_falls_as_pressure_ratio_rises(
        ps in 400.0_f64..1200.0,
        pd in 1200.0_f64..3800.0,
        dp in 1.0_f64..200.0,
        speed in 900.0_f64..4500.0,
    ) {
        let low = CompressorModel::new(&point(pd, ps, speed), &Coefficients::DEFAULT).unwrap();
        let high = CompressorModel::new(&point(pd + dp, ps, speed), &Coefficients::DEFAULT).unwrap();
        prop_assert!(high.volume() < low.volume());
    }

    #[test]
    fn current_rises_with_discharge_pressure(
        pd in 800.0_f64..4000.0,
        dp in 5.0_f64..200.0,
    ) {
        let at = |p| {
            CompressorModel::new(&point(p, 480.0, 3600.0), &Coefficients::CURRENT_CALIBRATED)
                .unwrap()
                .current()
        };
        prop_assert!(at(pd + dp) > at(pd));
    }
}
