use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tula_model::{
    Assignment, BalanceModel, Configuration, ModelConstants, PhaseChoice, QuantumNumber,
    solar_system_table,
};

fn configuration(table_len: usize) -> Configuration {
    let phases = [PhaseChoice::Primary, PhaseChoice::Opposed];
    let quanta = [1, 2, 3, 5, 8];
    (0..table_len)
        .map(|i| {
            let q = QuantumNumber::integer(quanta[i % quanta.len()]).expect("non-zero");
            Assignment::new(q, phases[i % 2])
        })
        .collect::<Vec<_>>()
        .into()
}

fn balance_bench(c: &mut Criterion) {
    let table = solar_system_table().expect("built-in table");
    let constants = ModelConstants::standard();
    let model = BalanceModel::new(&table, &constants).expect("valid constants");
    let config = configuration(table.len());

    let mut group = c.benchmark_group("balance_model");
    group.bench_function("balance_only", |b| {
        b.iter(|| model.balance(black_box(&config)).expect("evaluates"))
    });
    group.bench_function("full_evaluation", |b| {
        b.iter(|| model.evaluate(black_box(&config)).expect("evaluates"))
    });
    group.finish();
}

criterion_group!(benches, balance_bench);
criterion_main!(benches);
