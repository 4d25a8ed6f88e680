criterion::criterion_main!(benches);
criterion::criterion_group! {
    name = benches;
    config = criterion::Criterion::default()
        .without_plots()
        .noise_threshold(3.0)
        .significance_level(0.01)
        .sample_size(10)
        .measurement_time(std::time::Duration::from_secs(1));
    targets =
        simulating_conway_pair,
        simulating_mirror_match,
        sampling_random_game,
        computing_exact_odds,
        estimating_conway_pair,
        training_q_learning,
        evaluating_oracle_policy,
}

fn simulating_conway_pair(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(0);
    let a = Sequence::try_from("HHT").unwrap();
    let b = Sequence::try_from("THH").unwrap();
    c.bench_function("simulate HHT vs THH", |bench| {
        bench.iter(|| simulate(a, b, rng))
    });
}

fn simulating_mirror_match(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(1);
    let a = Sequence::try_from("HTH").unwrap();
    c.bench_function("simulate a mirror match", |bench| {
        bench.iter(|| simulate(a, a, rng))
    });
}

fn sampling_random_game(c: &mut criterion::Criterion) {
    let ref mut rng = SmallRng::seed_from_u64(2);
    c.bench_function("play a random Game to completion", |bench| {
        bench.iter(|| Game::new(Sequence::random(), Sequence::random()).play(rng))
    });
}

fn computing_exact_odds(c: &mut criterion::Criterion) {
    c.bench_function("exact odds for all 64 pairs", |bench| {
        bench.iter(|| {
            Sequence::all()
                .into_iter()
                .flat_map(|a| Sequence::all().map(|b| Oracle::odds(a, b)))
                .sum::<f64>()
        })
    });
}

fn estimating_conway_pair(c: &mut criterion::Criterion) {
    let harness = Harness::seeded(3);
    let a = Sequence::try_from("HHT").unwrap();
    let b = Sequence::try_from("THH").unwrap();
    c.bench_function("estimate HHT vs THH (65536 trials)", |bench| {
        bench.iter(|| harness.estimate(a, b, 0x10000, CONFIDENCE_LEVEL).unwrap())
    });
}

fn training_q_learning(c: &mut criterion::Criterion) {
    let config = Config::new(LEARNING_RATE, EXPLORATION_RATE, 0x10000).unwrap();
    c.bench_function("train Q-learning (65536 episodes)", |bench| {
        bench.iter(|| Trainer::new(config.seed(4)).solve().unwrap().policy())
    });
}

fn evaluating_oracle_policy(c: &mut criterion::Criterion) {
    let harness = Harness::seeded(5);
    let policy = Oracle::policy();
    c.bench_function("evaluate oracle policy (8 x 4096 trials)", |bench| {
        bench.iter(|| harness.evaluate(&policy, TRIAL_CHUNK).unwrap())
    });
}

use penney::coins::Sequence;
use penney::core::Arbitrary;
use penney::core::CONFIDENCE_LEVEL;
use penney::core::EXPLORATION_RATE;
use penney::core::LEARNING_RATE;
use penney::core::TRIAL_CHUNK;
use penney::game::Game;
use penney::game::Oracle;
use penney::game::simulate;
use penney::learning::Config;
use penney::learning::Trainer;
use penney::verify::Harness;
use rand::SeedableRng;
use rand::rngs::SmallRng;
