//! Non-interactive command line.
//!
//! One subcommand per operation. Results print as their `Display` tables,
//! or as JSON with `--json`.
use clap::Parser;
use clap::Subcommand;
use penney_coins::*;
use penney_core::CONFIDENCE_LEVEL;
use penney_core::CONSISTENCY_RUNS;
use penney_core::ESTIMATE_TRIALS;
use penney_core::EXPLORATION_RATE;
use penney_core::LEARNING_RATE;
use penney_core::Probability;
use penney_core::Rate;
use penney_core::SEQUENCES;
use penney_core::TOURNAMENT_TRIALS;
use penney_core::TRAINING_EPISODES;
use penney_game::*;
use penney_learning::*;
use penney_verify::*;

#[derive(Parser)]
#[command(author, version, about = "Penney's game: learn, verify, and compare second-player responses", long_about = None)]
pub struct Cli {
    /// Print results as JSON instead of tables.
    #[arg(long, global = true)]
    json: bool,
    /// Base seed for reproducible runs.
    #[arg(long, global = true)]
    seed: Option<u64>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    #[command(about = "Train a response policy by Q-learning and compare it with the oracle")]
    Train {
        #[command(flatten)]
        learning: Learning,
    },
    #[command(
        about = "Estimate the probability that B appears before A",
        alias = "est"
    )]
    Estimate {
        #[arg(required = true)]
        a: String,
        #[arg(required = true)]
        b: String,
        #[arg(long, default_value_t = ESTIMATE_TRIALS)]
        trials: usize,
        #[arg(long, default_value_t = CONFIDENCE_LEVEL)]
        confidence: Probability,
    },
    #[command(about = "Train independent learners and check that their policies agree")]
    Consistency {
        #[arg(long, default_value_t = CONSISTENCY_RUNS)]
        runs: usize,
        #[command(flatten)]
        learning: Learning,
    },
    #[command(
        about = "Pit two policies against every opponent (oracle, conway, learned, or HHH:TTT,...)",
        alias = "vs"
    )]
    Tournament {
        #[arg(default_value = "oracle")]
        a: String,
        #[arg(default_value = "learned")]
        b: String,
        #[arg(long, default_value_t = TOURNAMENT_TRIALS)]
        trials: usize,
        #[command(flatten)]
        learning: Learning,
    },
    #[command(about = "Show the oracle's response to every opponent with exact odds")]
    Oracle,
    #[command(about = "Measure a policy's win rate against every opponent")]
    Evaluate {
        #[arg(default_value = "oracle")]
        policy: String,
        #[arg(long, default_value_t = TOURNAMENT_TRIALS)]
        trials: usize,
        #[command(flatten)]
        learning: Learning,
    },
}

/// Trainer hyperparameters shared by every subcommand that may train.
#[derive(clap::Args)]
struct Learning {
    #[arg(long, default_value_t = LEARNING_RATE)]
    alpha: Rate,
    #[arg(long, default_value_t = EXPLORATION_RATE)]
    epsilon: Probability,
    #[arg(long, default_value_t = TRAINING_EPISODES)]
    episodes: usize,
}

impl Learning {
    fn config(&self, seed: Option<u64>) -> anyhow::Result<Config> {
        let config = Config::new(self.alpha, self.epsilon, self.episodes)?;
        Ok(seed.map_or(config, |seed| config.seed(seed)))
    }
}

impl Cli {
    /// Parse the process arguments and run the selected operation.
    pub fn run() -> anyhow::Result<()> {
        Self::parse().execute()
    }
    fn harness(&self) -> Harness {
        self.seed.map(Harness::seeded).unwrap_or_default()
    }
    fn execute(&self) -> anyhow::Result<()> {
        match &self.command {
            Command::Train { learning } => {
                let trainer = Trainer::new(learning.config(self.seed)?).solve()?;
                let policy = trainer.policy();
                let agreement = policy.agreement(&Oracle::policy());
                if self.json {
                    self.emit(&serde_json::json!({
                        "config": trainer.config(),
                        "policy": policy,
                        "agreement": agreement,
                        "metrics": trainer.metrics(),
                    }))
                } else {
                    println!("{}", trainer.table());
                    println!("policy    {}", policy);
                    println!("oracle    {}", Oracle::policy());
                    println!("agreement {}/{}", agreement, SEQUENCES);
                    Ok(())
                }
            }
            Command::Estimate {
                a,
                b,
                trials,
                confidence,
            } => {
                let a = Sequence::try_from(a.as_str())?;
                let b = Sequence::try_from(b.as_str())?;
                let estimate = self.harness().estimate(a, b, *trials, *confidence)?;
                let exact = Oracle::odds(a, b);
                if self.json {
                    self.emit(&serde_json::json!({
                        "a": a,
                        "b": b,
                        "estimate": estimate,
                        "exact": exact,
                    }))
                } else {
                    println!("{} over {}: {}", b, a, estimate);
                    println!("exact      {:.4}", exact);
                    Ok(())
                }
            }
            Command::Consistency { runs, learning } => {
                let consistency = self.harness().consistency(&learning.config(self.seed)?, *runs)?;
                self.show(&consistency)
            }
            Command::Tournament {
                a,
                b,
                trials,
                learning,
            } => {
                let a = self.policy(a, learning)?;
                let b = self.policy(b, learning)?;
                let tournament = self.harness().tournament(&a, &b, *trials)?;
                self.show(&tournament)
            }
            Command::Oracle => {
                if self.json {
                    let rows = Sequence::all()
                        .into_iter()
                        .map(|opponent| {
                            let response = Oracle::respond(opponent);
                            let rule = Oracle::rule(opponent);
                            serde_json::json!({
                                "opponent": opponent,
                                "response": response,
                                "rule": rule,
                                "derivation": rule.derivation(opponent),
                                "odds": Oracle::odds(opponent, response),
                            })
                        })
                        .collect::<Vec<_>>();
                    self.emit(&rows)
                } else {
                    for opponent in Sequence::all() {
                        let response = Oracle::respond(opponent);
                        let rule = Oracle::rule(opponent);
                        println!(
                            "{} -> {}  {:<11} {:<36} {:>6.2}%",
                            opponent,
                            response,
                            format!("{}", opponent.pattern()),
                            rule.derivation(opponent),
                            Oracle::odds(opponent, response) * 100.
                        );
                    }
                    Ok(())
                }
            }
            Command::Evaluate {
                policy,
                trials,
                learning,
            } => {
                let policy = self.policy(policy, learning)?;
                let rates = self.harness().evaluate(&policy, *trials)?;
                self.show(&rates)
            }
        }
    }
    /// A named policy, or one parsed from `HHH:TTT,HHT:THH,...`.
    fn policy(&self, name: &str, learning: &Learning) -> anyhow::Result<Policy> {
        match name.trim().to_lowercase().as_str() {
            "oracle" => Ok(Oracle::policy()),
            "conway" => Ok(Policy::conway()),
            "learned" => Ok(Trainer::new(learning.config(self.seed)?).solve()?.policy()),
            _ => Policy::try_from(name),
        }
    }
    fn show<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + std::fmt::Display,
    {
        if self.json {
            self.emit(value)
        } else {
            println!("{}", value);
            Ok(())
        }
    }
    fn emit<T>(&self, value: &T) -> anyhow::Result<()>
    where
        T: serde::Serialize + ?Sized,
    {
        println!("{}", serde_json::to_string_pretty(value)?);
        Ok(())
    }
}
