use criterion::{Criterion, black_box, criterion_group, criterion_main};
use tula_geometry::OrbitalPlane;
use tula_nodes::{GridSearchConfig, NodeProblem, solve_analytical, solve_numerical};

fn node_bench(c: &mut Criterion) {
    let problem = NodeProblem::new(
        6.347_285_8,
        OrbitalPlane::new(1.578_666_63, 284.51),
        7.004_979_02,
    );
    let config = GridSearchConfig::standard();

    let mut group = c.benchmark_group("node_solver");
    group.bench_function("numerical_two_phase", |b| {
        b.iter(|| solve_numerical(black_box(&problem), black_box(32.22), &config).expect("solves"))
    });
    group.bench_function("analytical", |b| {
        b.iter(|| solve_analytical(black_box(&problem), Some(32.22)).expect("solves"))
    });
    group.finish();
}

criterion_group!(benches, node_bench);
criterion_main!(benches);
