use criterion::{criterion_group, criterion_main, Criterion};
use modelselect::catalog::{FieldMeta, HandlerMeta, OwnerMeta};
use modelselect::selector::{ActionSelector, FieldSet, SignatureBuilder};
use std::hint::black_box;

fn owners() -> Vec<OwnerMeta> {
    (0..50)
        .map(|o| {
            let mut owner = OwnerMeta::new(format!("Owner{o}"));
            for h in 0..6 {
                let fields = (0..=h).map(|f| FieldMeta::new(format!("field{f}"))).collect();
                owner = owner
                    .handler(HandlerMeta::new(format!("postVariant{h}")).body_fields("model", fields))
                    .handler(HandlerMeta::new(format!("getVariant{h}")).scalar("id"));
            }
            owner
        })
        .collect()
}

fn bench_build(c: &mut Criterion) {
    let owners = owners();
    c.bench_function("build_index_50_owners", |b| {
        b.iter(|| SignatureBuilder::new().build(black_box(&owners)))
    });
}

fn bench_resolve(c: &mut Criterion) {
    let Ok(index) = SignatureBuilder::new().build(&owners()) else {
        return;
    };
    let selector = ActionSelector::new(index);
    let winner = FieldSet::from_keys(["field0", "field1", "field2", "field3"]);
    let oversized = FieldSet::from_keys((0..12).map(|f| format!("field{f}")));

    c.bench_function("resolve_winner", |b| {
        b.iter(|| selector.resolve(black_box("Owner25"), black_box("POST"), black_box(&winner)).is_ok())
    });
    c.bench_function("resolve_large_payload", |b| {
        b.iter(|| selector.resolve(black_box("Owner25"), black_box("POST"), black_box(&oversized)).is_ok())
    });
    c.bench_function("resolve_not_applicable", |b| {
        b.iter(|| selector.resolve(black_box("Owner25"), black_box("DELETE"), black_box(&winner)).is_ok())
    });
}

criterion_group!(benches, bench_build, bench_resolve);
criterion_main!(benches);
