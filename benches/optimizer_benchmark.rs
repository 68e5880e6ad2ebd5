use criterion::{black_box, criterion_group, criterion_main, Criterion};
use outlet_locator::{
    algorithms::assignment::assign,
    utils::distance::NetworkDistance,
    utils::seeding::seed_outlets,
    DemandPoint, Location, LocationSolver, OutletOptimizer, RoadGraph,
};

fn benchmark_optimizer(c: &mut Criterion) {
    // Create benchmark data
    let (demand, graph) = create_benchmark_data();
    let outlets = seed_outlets(&demand, 5, 42);
    let optimizer = OutletOptimizer::default();

    c.bench_function("assign_great_circle", |b| {
        b.iter(|| {
            assign(
                black_box(&outlets),
                black_box(&demand),
                &mut NetworkDistance::great_circle(),
            )
        })
    });

    c.bench_function("optimize_road_graph", |b| {
        b.iter(|| optimizer.optimize(black_box(&outlets), black_box(&demand), Some(&graph)))
    });
}

// 25 demand points on a 10 x 10 road grid
fn create_benchmark_data() -> (Vec<DemandPoint>, RoadGraph) {
    let demand = (0..25)
        .map(|i| {
            let lat = 27.0 + (i % 5) as f64 * 0.4;
            let lon = 77.5 + (i / 5) as f64 * 0.4;
            DemandPoint::new(i + 1, Location::new(lat, lon), 1000 + (i as u64 * 37) % 500)
        })
        .collect();

    let mut graph = RoadGraph::new();
    for i in 0..10 {
        for j in 0..10 {
            let here = Location::new(27.0 + i as f64 * 0.2, 77.5 + j as f64 * 0.2);
            if i + 1 < 10 {
                graph.add_road(here, Location::new(27.0 + (i + 1) as f64 * 0.2, here.lon));
            }
            if j + 1 < 10 {
                graph.add_road(here, Location::new(here.lat, 77.5 + (j + 1) as f64 * 0.2));
            }
        }
    }

    (demand, graph)
}

criterion_group!(benches, benchmark_optimizer);
criterion_main!(benches);
