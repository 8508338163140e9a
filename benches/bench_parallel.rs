use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cultalg::{
    evaluation::{CloudEnvironment, Objective, Resource, Task},
    population::Population,
    rng::RandomNumberGenerator,
};

fn environment(num_tasks: usize) -> CloudEnvironment {
    let tasks = (0..num_tasks)
        .map(|id| Task::new(id, 50.0 + (id % 11) as f64 * 35.0))
        .collect();
    let resources = (0..16)
        .map(|id| Resource::new(id, 4.0 + id as f64, 0.5 + id as f64 * 0.3))
        .collect();
    CloudEnvironment::new(tasks, resources).unwrap()
}

// Evaluates a fresh copy so every iteration pays for every individual
fn evaluate(population: &Population, env: &CloudEnvironment, threshold: usize) -> Population {
    let mut copy = population.clone();
    copy.evaluate(env, &Objective::Cost, threshold).unwrap();
    copy
}

fn bench_fitness_evaluation(c: &mut Criterion) {
    let mut group = c.benchmark_group("fitness_evaluation");
    let env = environment(500);
    let mut rng = RandomNumberGenerator::from_seed(42);

    for size in [10, 100, 1000, 10000] {
        let population = Population::random(size, 500, 16, &mut rng);

        group.bench_with_input(
            BenchmarkId::new("sequential", size),
            &population,
            |b, population| b.iter(|| evaluate(black_box(population), &env, usize::MAX)),
        );

        group.bench_with_input(
            BenchmarkId::new("parallel", size),
            &population,
            |b, population| b.iter(|| evaluate(black_box(population), &env, 1)),
        );
    }

    group.finish();
}

criterion_group!(benches, bench_fitness_evaluation);
criterion_main!(benches);
