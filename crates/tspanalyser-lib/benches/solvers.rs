use criterion::{criterion_group, criterion_main, Criterion};
use once_cell::sync::Lazy;
use std::hint::black_box;
use std::path::PathBuf;
use tspanalyser_lib::{
    load_dataset, DatasetSelection, SolverConfig, TourAlgorithm, TourEngine, TourRequest,
};

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("../../docs/fixtures")
}

fn engine_for(selection: DatasetSelection) -> TourEngine {
    let dataset = load_dataset(&fixtures_dir(), &selection).expect("fixture loads");
    TourEngine::with_dataset(dataset, SolverConfig::default())
}

static STADIUMS: Lazy<TourEngine> = Lazy::new(|| engine_for(DatasetSelection::toy("stadiums")));
static MEDIUM: Lazy<TourEngine> = Lazy::new(|| engine_for(DatasetSelection::medium(25)));
static REAL_WORLD: Lazy<TourEngine> = Lazy::new(|| engine_for(DatasetSelection::real_world(1)));

fn benchmark_solvers(c: &mut Criterion) {
    c.bench_function("exact_stadiums", |b| {
        let engine = &*STADIUMS;
        b.iter(|| {
            let tour = engine.solve_exact(0).expect("tour exists");
            black_box(tour.cost)
        });
    });

    c.bench_function("exact_real_world_graph1", |b| {
        let engine = &*REAL_WORLD;
        b.iter(|| {
            let tour = engine.solve_exact(0).expect("tour exists");
            black_box(tour.cost)
        });
    });

    for algorithm in [
        TourAlgorithm::Approximate,
        TourAlgorithm::NearestNeighbour,
        TourAlgorithm::RecoverySearch,
        TourAlgorithm::RecoveryBacktrack,
    ] {
        let request = TourRequest::new(algorithm);
        c.bench_function(&format!("{algorithm}_medium_25"), |b| {
            let engine = &*MEDIUM;
            b.iter(|| {
                let tour = engine.solve(&request).expect("tour exists");
                black_box(tour.cost)
            });
        });
    }
}

criterion_group!(benches, benchmark_solvers);
criterion_main!(benches);
