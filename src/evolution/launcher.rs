use tracing::{debug, info};

use super::options::CulturalOptions;
use crate::{
    belief::{BeliefSpace, DomainKnowledge},
    breeding::{BreedStrategy, CulturalBreedStrategy},
    error::{CulturalError, OptionExt, Result},
    evaluation::{Evaluation, FitnessEvaluator},
    individual::Individual,
    population::Population,
    rng::RandomNumberGenerator,
};

/// Where a run is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RunState {
    /// The initial population exists but no generation has run.
    Initializing,
    /// `generation` generations have completed.
    Running { generation: usize },
    /// The run is over: the generation budget is spent or the run stagnated.
    Converged,
}

/// Snapshot handed to the `run_until` callback after every generation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Progress {
    /// Number of completed generations.
    pub generation: usize,
    pub best_fitness: f64,
    pub mean_fitness: f64,
}

/// Represents the outcome of a run.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, PartialEq)]
pub struct CulturalResult {
    /// The best individual found over the whole run.
    pub best: Individual,
    /// Time, cost and fitness of `best`.
    pub evaluation: Evaluation,
    /// Best fitness found so far, recorded after every generation.
    pub best_fitness_trace: Vec<f64>,
    /// Mean fitness of each evaluated generation.
    pub mean_fitness_trace: Vec<f64>,
    /// Number of generations executed.
    pub generations: usize,
    /// Population statistics of the last evaluated generation.
    pub domain: DomainKnowledge,
}

/// Runs the cultural algorithm: owns the population, the belief space, the
/// evaluator and the random source for the duration of one run.
#[derive(Debug)]
pub struct CulturalAlgorithm<E, B = CulturalBreedStrategy>
where
    E: FitnessEvaluator,
    B: BreedStrategy,
{
    options: CulturalOptions,
    evaluator: E,
    strategy: B,
    rng: RandomNumberGenerator,
    population: Population,
    belief: BeliefSpace,
    state: RunState,
    generation: usize,
    stagnant_generations: usize,
    best_fitness_trace: Vec<f64>,
    mean_fitness_trace: Vec<f64>,
}

impl<E> CulturalAlgorithm<E, CulturalBreedStrategy>
where
    E: FitnessEvaluator,
{
    /// Creates a run that breeds with tournament selection.
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if any option is out of range or the evaluator
    /// reports zero tasks or zero resources. Nothing is evaluated yet.
    pub fn new(options: CulturalOptions, evaluator: E, rng: RandomNumberGenerator) -> Result<Self> {
        options.validate()?;
        let strategy = CulturalBreedStrategy::from_options(&options)?;
        Self::with_strategy(options, evaluator, strategy, rng)
    }
}

impl<E, B> CulturalAlgorithm<E, B>
where
    E: FitnessEvaluator,
    B: BreedStrategy,
{
    /// Creates a run with a custom breeding strategy.
    ///
    /// # Errors
    ///
    /// Same as [`CulturalAlgorithm::new`].
    pub fn with_strategy(
        options: CulturalOptions,
        evaluator: E,
        strategy: B,
        mut rng: RandomNumberGenerator,
    ) -> Result<Self> {
        options.validate()?;

        let num_tasks = evaluator.num_tasks();
        let num_resources = evaluator.num_resources();
        if num_tasks == 0 {
            return Err(CulturalError::Configuration(
                "The problem must contain at least one task".to_string(),
            ));
        }
        if num_resources == 0 {
            return Err(CulturalError::Configuration(
                "The problem must contain at least one resource".to_string(),
            ));
        }

        let population = Population::random(
            options.get_population_size(),
            num_tasks,
            num_resources,
            &mut rng,
        );
        let capacity = options.get_max_generations();

        Ok(Self {
            options,
            evaluator,
            strategy,
            rng,
            population,
            belief: BeliefSpace::new(num_tasks, num_resources),
            state: RunState::Initializing,
            generation: 0,
            stagnant_generations: 0,
            best_fitness_trace: Vec::with_capacity(capacity),
            mean_fitness_trace: Vec::with_capacity(capacity),
        })
    }

    pub fn options(&self) -> &CulturalOptions {
        &self.options
    }

    pub fn evaluator(&self) -> &E {
        &self.evaluator
    }

    pub fn population(&self) -> &Population {
        &self.population
    }

    pub fn belief_space(&self) -> &BeliefSpace {
        &self.belief
    }

    pub fn state(&self) -> RunState {
        self.state
    }

    /// Number of completed generations.
    pub fn generation(&self) -> usize {
        self.generation
    }

    pub fn is_converged(&self) -> bool {
        self.state == RunState::Converged
    }

    pub fn best_fitness_trace(&self) -> &[f64] {
        &self.best_fitness_trace
    }

    pub fn mean_fitness_trace(&self) -> &[f64] {
        &self.mean_fitness_trace
    }

    /// Runs one generation: evaluate, update the belief space, carry over the
    /// elites, breed the rest, replace the population and record the traces.
    ///
    /// # Errors
    ///
    /// Returns an `Evolution` error if the run has already converged and
    /// propagates evaluator errors unchanged. A failed generation records
    /// nothing in the traces and does not advance the generation counter.
    pub fn step(&mut self) -> Result<()> {
        if self.is_converged() {
            return Err(CulturalError::Evolution(format!(
                "Run already converged after {} generations",
                self.generation
            )));
        }

        let options = &self.options;
        let population_size = options.get_population_size();

        self.population.evaluate(
            &self.evaluator,
            options.get_objective(),
            options.get_parallel_threshold(),
        )?;

        let accepted = self.population.top(options.acceptance_count())?;
        let improved = self.belief.update(self.population.individuals(), &accepted)?;

        let mut next = self.population.top(options.get_elitism_count())?;
        let offspring = self.strategy.breed(
            self.population.individuals(),
            &self.belief,
            options,
            population_size - next.len(),
            self.evaluator.num_resources(),
            &mut self.rng,
        )?;
        next.extend(offspring);
        self.population.replace(next)?;

        let best_fitness = self.belief.best_fitness();
        let domain = self.belief.domain();
        self.best_fitness_trace.push(best_fitness);
        self.mean_fitness_trace.push(domain.mean_fitness);

        self.stagnant_generations = if improved {
            0
        } else {
            self.stagnant_generations + 1
        };
        self.generation += 1;

        debug!(
            generation = self.generation,
            best_fitness,
            mean_fitness = domain.mean_fitness,
            fitness_variance = domain.fitness_variance,
            improved,
            "generation complete"
        );

        let stagnated = options
            .get_stagnation_limit()
            .is_some_and(|limit| self.stagnant_generations >= limit);

        self.state = if self.generation >= options.get_max_generations() || stagnated {
            if stagnated {
                info!(
                    generation = self.generation,
                    stagnant_generations = self.stagnant_generations,
                    "stopping early, best fitness stagnated"
                );
            }
            RunState::Converged
        } else {
            RunState::Running {
                generation: self.generation,
            }
        };

        Ok(())
    }

    /// Runs generations until the run converges.
    pub fn run(&mut self) -> Result<CulturalResult> {
        self.run_until(|_| true)
    }

    /// Runs generations until the run converges or `keep_going` returns `false`.
    ///
    /// Stopping early still returns the best individual found so far.
    ///
    /// # Errors
    ///
    /// Propagates the first error raised by a generation.
    pub fn run_until<F>(&mut self, mut keep_going: F) -> Result<CulturalResult>
    where
        F: FnMut(&Progress) -> bool,
    {
        info!(
            population_size = self.options.get_population_size(),
            max_generations = self.options.get_max_generations(),
            objective = %self.options.get_objective(),
            influence = %self.options.get_influence(),
            "starting cultural algorithm"
        );

        while !self.is_converged() {
            self.step()?;

            let progress = Progress {
                generation: self.generation,
                best_fitness: self.belief.best_fitness(),
                mean_fitness: self.belief.domain().mean_fitness,
            };
            if !keep_going(&progress) {
                info!(generation = self.generation, "run stopped by caller");
                break;
            }
        }

        let result = self.result()?;
        info!(
            generations = result.generations,
            best_fitness = result.evaluation.fitness,
            total_time = result.evaluation.total_time,
            total_cost = result.evaluation.total_cost,
            "cultural algorithm finished"
        );
        Ok(result)
    }

    /// The outcome so far.
    ///
    /// # Errors
    ///
    /// Returns an `Evolution` error if no generation has completed yet.
    pub fn result(&self) -> Result<CulturalResult> {
        let best = self.belief.best().cloned().ok_or_else_cultural(|| {
            CulturalError::Evolution("No generation has completed yet".to_string())
        })?;
        let evaluation = best.evaluation()?;

        Ok(CulturalResult {
            best,
            evaluation,
            best_fitness_trace: self.best_fitness_trace.clone(),
            mean_fitness_trace: self.mean_fitness_trace.clone(),
            generations: self.generation,
            domain: self.belief.domain().clone(),
        })
    }
}
