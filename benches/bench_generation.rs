use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use cultalg::{
    belief::{BeliefInfluence, BeliefSpace},
    breeding::{BreedStrategy, CulturalBreedStrategy},
    evaluation::{CloudEnvironment, Objective, Resource, Task},
    evolution::{CulturalAlgorithm, CulturalOptions},
    population::Population,
    rng::RandomNumberGenerator,
};

fn environment(num_tasks: usize, num_resources: usize) -> CloudEnvironment {
    let tasks = (0..num_tasks)
        .map(|id| Task::new(id, 100.0 + (id % 17) as f64 * 20.0))
        .collect();
    let resources = (0..num_resources)
        .map(|id| Resource::new(id, 5.0 + id as f64 * 2.5, 1.0 + id as f64 * 0.75))
        .collect();
    CloudEnvironment::new(tasks, resources).unwrap()
}

fn bench_breeding(c: &mut Criterion) {
    let mut group = c.benchmark_group("cultural_breeding");
    let env = environment(50, 8);

    for influence in [
        BeliefInfluence::Situational,
        BeliefInfluence::Normative,
        BeliefInfluence::Combined,
    ] {
        let options = CulturalOptions::builder()
            .population_size(100)
            .influence(influence)
            .build();
        let strategy = CulturalBreedStrategy::from_options(&options).unwrap();
        let mut rng = RandomNumberGenerator::from_seed(42);

        let mut population = Population::random(100, 50, 8, &mut rng);
        population
            .evaluate(&env, options.get_objective(), usize::MAX)
            .unwrap();
        let accepted = population.top(options.acceptance_count()).unwrap();
        let mut belief = BeliefSpace::new(50, 8);
        belief.update(population.individuals(), &accepted).unwrap();

        group.bench_function(BenchmarkId::new("breed", influence), |b| {
            b.iter(|| {
                let offspring = strategy.breed(
                    black_box(population.individuals()),
                    black_box(&belief),
                    black_box(&options),
                    98,
                    8,
                    &mut rng,
                );
                assert!(offspring.is_ok());
            })
        });
    }
    group.finish();
}

fn bench_run(c: &mut Criterion) {
    let mut group = c.benchmark_group("cultural_run");
    group.sample_size(20);

    for num_tasks in [10, 50, 200] {
        let env = environment(num_tasks, 8);
        let options = CulturalOptions::builder()
            .population_size(50)
            .max_generations(20)
            .objective(Objective::Cost)
            .build();

        group.bench_with_input(BenchmarkId::new("tasks", num_tasks), &env, |b, env| {
            b.iter(|| {
                let mut algorithm = CulturalAlgorithm::new(
                    options.clone(),
                    env,
                    RandomNumberGenerator::from_seed(7),
                )
                .unwrap();
                black_box(algorithm.run().unwrap())
            })
        });
    }
    group.finish();
}

criterion_group!(benches, bench_breeding, bench_run);
criterion_main!(benches);
