use chart_bridge::api::{ContainerList, IntegerList, NativeObjectContainer, StringList};
use chart_bridge::core::{NativeArray, NativeObject, json};
use criterion::{Criterion, criterion_group, criterion_main};
use std::hint::black_box;

#[derive(Clone, PartialEq)]
struct Point {
    object: NativeObject,
}

impl NativeObjectContainer for Point {
    fn native_object(&self) -> &NativeObject {
        &self.object
    }
}

fn point(amount: f64) -> Point {
    let point = Point {
        object: NativeObject::new(),
    };
    point
        .set_value("amount", Some(amount))
        .expect("define amount");
    point
}

fn bench_primitive_append_10k(c: &mut Criterion) {
    c.bench_function("primitive_append_10k", |b| {
        b.iter(|| {
            let mut list = IntegerList::new();
            for i in 0..10_000 {
                list.add(black_box(i));
            }
            black_box(list.size())
        })
    });
}

fn bench_front_insert_1k(c: &mut Criterion) {
    c.bench_function("string_front_insert_1k", |b| {
        b.iter(|| {
            let mut list = StringList::new();
            for i in 0..1_000 {
                list.add_at(0, i.to_string()).expect("insert");
            }
            black_box(list.size())
        })
    });
}

fn bench_container_hydration_10k(c: &mut Criterion) {
    let raw: Vec<NativeObject> = (0..10_000)
        .map(|i| point(f64::from(i)).object)
        .collect();
    let host = NativeArray::from_vec(raw);

    c.bench_function("container_hydration_10k", |b| {
        b.iter(|| {
            let list = ContainerList::<Point>::load_with_factory(
                black_box(host.clone()),
                |object: NativeObject| Point { object },
            )
            .expect("hydrate");
            black_box(list.size())
        })
    });
}

fn bench_container_render_1k(c: &mut Criterion) {
    let mut list = ContainerList::<Point>::new();
    for i in 0..1_000 {
        list.add(point(f64::from(i) * 0.5));
    }

    c.bench_function("container_render_1k", |b| {
        b.iter(|| {
            let rendered = json::stringify_array(black_box(list.array()), Default::default())
                .expect("render");
            black_box(rendered.len())
        })
    });
}

criterion_group!(
    benches,
    bench_primitive_append_10k,
    bench_front_insert_1k,
    bench_container_hydration_10k,
    bench_container_render_1k
);
criterion_main!(benches);
