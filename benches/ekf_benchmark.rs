use criterion::{criterion_group, criterion_main, Criterion};

use fiducial_ekf::localization::{FiducialLocalizer, InertialSample, MotionInput, Observation};
use fiducial_ekf::utils::deg2rad;
use fiducial_ekf::FilterConfig;

fn tick(b: &mut Criterion) {
    let markers = [
        (5.0, 0.0, deg2rad(180.0), 1),
        (0.0, 5.0, deg2rad(-90.0), 2),
        (-5.0, 0.0, 0.0, 3),
        (0.0, -5.0, deg2rad(90.0), 4),
    ];
    let mut localizer = FiducialLocalizer::from_config(&markers, &FilterConfig::default()).unwrap();
    let observations = [
        Observation::new(3, -5.1, 0.1, 0.02),
        Observation::new(1, 4.9, -0.1, deg2rad(179.0)),
        Observation::new(2, 0.1, 5.0, deg2rad(-91.0)),
    ];

    let dt = 1.0 / 60.0;
    let mut t = 0.0;
    b.bench_function("predict + 3 markers", |b| {
        b.iter(|| {
            t += dt;
            let motion = MotionInput::new(0.5, InertialSample::new(0.1, t));
            localizer.step(Some(motion), Some(&observations))
        })
    });

    b.bench_function("predict only", |b| {
        b.iter(|| {
            t += dt;
            let motion = MotionInput::new(0.5, InertialSample::new(0.1, t));
            localizer.step(Some(motion), None)
        })
    });
}

criterion_group!(benches, tick);
criterion_main!(benches);
