use std::fs;
use std::io::Write;
use std::path::PathBuf;

use anyhow::{bail, Context};
use clap::Parser;
use log::{info, LevelFilter};
use rand::rngs::StdRng;
use rand::SeedableRng;
use serde::Deserialize;
use u_cumulative::checker::Reporting;
use u_cumulative::evaluation::{ScheduleKpi, ScheduleValidator, ValidatorConfig};
use u_cumulative::models::Schedule;
use u_cumulative::parser::read_instance;
use u_cumulative::sampling::random_schedule;

#[derive(Debug, Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// The instance file (`nb_tasks nb_resources`, capacities, task rows,
    /// successor lines).
    instance_path: PathBuf,

    /// JSON file holding one schedule or an array of schedules, each
    /// `{"task_resources": [..], "start_times": [..]}`.
    #[arg(short = 's', long)]
    schedule: Option<PathBuf>,

    /// Validate this many random candidate schedules.
    #[arg(short = 'r', long)]
    random: Option<usize>,

    /// Seed for `--random`.
    #[arg(long, default_value_t = 42)]
    seed: u64,

    /// Stop at the first violation of each schedule.
    #[arg(long)]
    first_violation: bool,

    /// Leave the makespan out of infeasible verdicts.
    #[arg(long)]
    no_infeasible_makespan: bool,

    /// Print KPIs for feasible schedules.
    #[arg(long)]
    kpi: bool,

    #[arg(short = 'v', long = "verbose")]
    verbose: bool,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum ScheduleInput {
    One(Schedule),
    Many(Vec<Schedule>),
}

pub fn main() {
    match run() {
        Ok(_) => {}
        Err(e) => {
            eprintln!("Execution failed, error: {e:#}");
            std::process::exit(1);
        }
    }
}

fn run() -> anyhow::Result<()> {
    let args = Args::parse();

    let level_filter = if args.verbose {
        LevelFilter::Debug
    } else {
        LevelFilter::Warn
    };
    env_logger::Builder::new()
        .filter_level(level_filter)
        .target(env_logger::Target::Stderr)
        .init();

    let instance = read_instance(&args.instance_path)
        .with_context(|| format!("failed to load {}", args.instance_path.display()))?;
    info!(
        "loaded instance with {} tasks and {} resources",
        instance.num_tasks(),
        instance.num_resources()
    );

    let mut schedules = Vec::new();
    if let Some(path) = &args.schedule {
        let text = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match serde_json::from_str::<ScheduleInput>(&text)
            .with_context(|| format!("invalid schedule JSON in {}", path.display()))?
        {
            ScheduleInput::One(s) => schedules.push(s),
            ScheduleInput::Many(many) => schedules.extend(many),
        }
    }
    if let Some(count) = args.random {
        let mut rng = StdRng::seed_from_u64(args.seed);
        schedules.extend((0..count).map(|_| random_schedule(&instance, &mut rng)));
    }
    if schedules.is_empty() {
        bail!("nothing to validate: pass --schedule and/or --random");
    }

    let reporting = if args.first_violation {
        Reporting::First
    } else {
        Reporting::All
    };
    let config = ValidatorConfig::default()
        .with_reporting(reporting)
        .with_infeasible_makespan(!args.no_infeasible_makespan);
    let validator = ScheduleValidator::new(&instance).with_config(config);

    let verdicts = validator.validate_batch(&schedules);
    let feasible = verdicts.iter().filter(|v| v.feasible).count();
    info!("{feasible} of {} schedule(s) feasible", verdicts.len());

    let stdout = std::io::stdout();
    let mut out = stdout.lock();
    for (schedule, verdict) in schedules.iter().zip(&verdicts) {
        writeln!(out, "{}", serde_json::to_string(verdict)?)?;
        if args.kpi && verdict.feasible {
            if let Ok(placements) = instance.resolve(schedule) {
                let kpi = ScheduleKpi::calculate(&instance, &placements);
                writeln!(out, "{}", serde_json::to_string(&kpi)?)?;
            }
        }
    }

    Ok(())
}
