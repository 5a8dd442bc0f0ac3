use criterion::{criterion_group, criterion_main, Criterion};
use modip::{GeodeticPoint, IgrfModel};

fn criterion_benchmark(c: &mut Criterion) {
    let model = IgrfModel::new().expect("embedded model must load");
    let point = GeodeticPoint::new(45.645, 13.77694, 350.0);

    c.bench_function("Field synthesis", |b| {
        b.iter(|| model.field_at(&point, 2017.0).expect("evaluation failed"))
    });
    c.bench_function("MODIP", |b| {
        b.iter(|| model.modip_at(&point, 2017.0).expect("evaluation failed"))
    });
}

criterion_group!(benches, criterion_benchmark);
criterion_main!(benches);
