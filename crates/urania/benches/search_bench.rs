use criterion::{black_box, criterion_group, criterion_main, Criterion};
use urania::ephemeris::julian;
use urania::ephemeris::{
    Body, Capabilities, EphemerisError, HouseFrame, HouseSystem, PositionProvider,
    RawPosition,
};
use urania::events::{find_moon_ingresses, month_timeline, void_of_course_periods};
use urania::geometry;

/// Uniform circular motion for every body, fast enough to exercise the searches
struct UniformSky {
    epoch: f64,
}

impl UniformSky {
    fn motion(body: Body) -> (f64, f64) {
        match body {
            Body::Moon => (3.0, 13.176),
            Body::Sun => (340.0, 0.9856),
            Body::Mercury => (350.0, 1.4),
            Body::Venus => (20.0, 1.2),
            Body::Mars => (110.0, 0.52),
            other => (other.swiss_id() as f64 * 29.0, 0.03),
        }
    }
}

impl PositionProvider for UniformSky {
    fn position_at(&self, jd: f64, body: Body) -> Result<RawPosition, EphemerisError> {
        let (lon0, speed) = Self::motion(body);
        Ok(RawPosition {
            lon: geometry::normalize(lon0 + speed * (jd - self.epoch)),
            lat: 0.0,
            speed_lon: speed,
        })
    }

    fn houses_at(
        &self,
        jd: f64,
        _lat: f64,
        _lon: f64,
        _system: HouseSystem,
    ) -> Result<HouseFrame, EphemerisError> {
        Err(EphemerisError::HouseCalculationFailed {
            julian_day: jd,
            message: "not modelled".to_string(),
        })
    }
}

fn bench_moon_ingresses(c: &mut Criterion) {
    let (start, end) = julian::month_bounds(2024, 3);
    let sky = UniformSky { epoch: start };

    c.bench_function("find_moon_ingresses_month", |b| {
        b.iter(|| find_moon_ingresses(&sky, black_box(start), black_box(end)))
    });
}

fn bench_void_of_course(c: &mut Criterion) {
    let sky = UniformSky {
        epoch: julian::month_bounds(2024, 3).0,
    };
    let capabilities = Capabilities::full();

    c.bench_function("void_of_course_month", |b| {
        b.iter(|| void_of_course_periods(&sky, &capabilities, black_box(2024), black_box(3)))
    });
}

fn bench_month_timeline(c: &mut Criterion) {
    let sky = UniformSky {
        epoch: julian::month_bounds(2024, 3).0,
    };
    let capabilities = Capabilities::full();

    c.bench_function("month_timeline_all_bodies", |b| {
        b.iter(|| month_timeline(&sky, &capabilities, black_box(2024), black_box(3), &Body::ALL))
    });
}

criterion_group!(benches, bench_moon_ingresses, bench_void_of_course, bench_month_timeline);
criterion_main!(benches);
