use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::Context;
use clap::Parser;
use engine::{EncounterKind, EncounterPool, RateMatrix, Roster, SimConfig, sim};

#[derive(Parser)]
#[command(name = "sim-cli")]
#[command(about = "Estimates hit-rate surfaces for the four premade classes against levelled random encounters")]
struct Args {
    /// Battles per (class, class level, opponent level) cell
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    trials: u64,

    /// Worker threads (default: available hardware parallelism)
    #[arg(value_parser = clap::value_parser!(u64).range(1..))]
    workers: Option<u64>,

    /// Opponent filter: any | spellcaster | regular
    #[arg(long, default_value = "any")]
    encounters: String,

    /// Base RNG seed (default: derived from system time)
    #[arg(long)]
    seed: Option<u64>,

    /// Directory the CSV matrices are written to
    #[arg(long, default_value = ".")]
    out_dir: PathBuf,

    /// Also write the full report as JSON
    #[arg(long)]
    json: Option<PathBuf>,

    /// Print an ASCII heatmap of each attack surface
    #[arg(long, default_value_t = false)]
    heatmap: bool,
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt().with_target(false).init();
    let args = Args::parse();

    let kind: EncounterKind = args.encounters.parse()?;
    let workers = match args.workers {
        Some(n) => n as usize,
        None => std::thread::available_parallelism()?.get(),
    };
    let seed = args.seed.unwrap_or_else(time_seed);

    let roster = Roster::build();
    let pool = EncounterPool::build();
    let config = SimConfig { trials: args.trials as usize, workers, kind, seed };
    let report = sim::run(&roster, &pool, config)?;

    fs::create_dir_all(&args.out_dir)
        .with_context(|| format!("failed to create {}", args.out_dir.display()))?;
    for class in &report.classes {
        let name = class.class.name();
        write_matrix(&args.out_dir.join(format!("{name}_NPC_hit_rate.csv")), &class.attack)?;
        write_matrix(&args.out_dir.join(format!("NPC_{name}_hit_rate.csv")), &class.defense)?;
        if args.heatmap {
            print_heatmap(name, &class.attack);
        }
    }

    if let Some(path) = &args.json {
        let file =
            File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &report)?;
    }

    println!("Simulated {} battles per class and level pair.", report.trials);
    println!("Time taken: {} ms", report.elapsed.as_millis());
    Ok(())
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_nanos() as u64)
        .unwrap_or(0)
}

/// Rows are opponent levels, columns player levels, cells trailing-comma
/// separated; matches the layout the plotting scripts expect.
fn write_matrix(path: &Path, matrix: &RateMatrix) -> anyhow::Result<()> {
    let file =
        File::create(path).with_context(|| format!("failed to create {}", path.display()))?;
    let mut out = BufWriter::new(file);
    for row in matrix {
        for cell in row {
            write!(out, "{cell},")?;
        }
        writeln!(out)?;
    }
    Ok(())
}

fn print_heatmap(name: &str, matrix: &RateMatrix) {
    println!("{}", name.to_uppercase());
    for (i, row) in matrix.iter().enumerate().rev() {
        print!("{:>2} ", i + 1);
        for &cell in row {
            let heat = if cell > 0.75 {
                '#'
            } else if cell > 0.5 {
                '+'
            } else if cell > 0.25 {
                '-'
            } else {
                ' '
            };
            print!("{heat} ");
        }
        println!();
    }
    print!("   ");
    for j in 1..=matrix.len() {
        print!("{j:<2}");
    }
    println!();
}
