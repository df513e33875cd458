use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use pp::{Dataset, Record, SelectDataset, c};

/// SELECT col0, col1, ... FROM t WHERE ("col0" = 0) AND ("col1" = 1) ...
fn build_select(n: usize) -> SelectDataset {
    let cols: Vec<String> = (0..n).map(|i| format!("col{i}")).collect();
    let conds: Vec<_> = (0..n).map(|i| c(&format!("col{i}")).eq(i as i64)).collect();
    pp::from("t").select(cols).where_(conds)
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/build");

    for n in [1, 5, 10, 50, 100] {
        let ds = build_select(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &ds, |b, ds| {
            b.iter(|| black_box(ds.build()));
        });
    }

    group.finish();
}

fn bench_chain_and_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/chain_and_build");

    for n in [1, 5, 10, 50, 100] {
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, &n| {
            b.iter(|| black_box(build_select(n).build()));
        });
    }

    group.finish();
}

fn bench_prepared_in_list(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/prepared_in_list");
    let postgres = pp::dialect("postgres");

    for n in [5, 20, 100, 500] {
        let values: Vec<i64> = (0..n).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &values, |b, values| {
            b.iter(|| {
                let ds = postgres
                    .from("t")
                    .where_(pp::c("id").in_(values.clone()))
                    .prepared(true);
                black_box(ds.build())
            });
        });
    }

    group.finish();
}

fn bench_insert_records(c: &mut Criterion) {
    let mut group = c.benchmark_group("sql_builder/insert_records");

    for n in [1, 10, 100] {
        let rows: Vec<Record> = (0..n)
            .map(|i| {
                Record::new()
                    .with("name", format!("item{i}"))
                    .with("qty", i as i64)
                    .with("address", "111 Test Addr")
            })
            .collect();

        group.bench_with_input(BenchmarkId::from_parameter(n), &rows, |b, rows| {
            b.iter(|| black_box(pp::insert("items").rows(rows.clone()).build()));
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_build,
    bench_chain_and_build,
    bench_prepared_in_list,
    bench_insert_records
);
criterion_main!(benches);
