use std::sync::atomic::{AtomicU8, AtomicUsize, Ordering};
use std::thread;
use std::time::{Duration, Instant};

use serde::Serialize;
use tracing::{debug, info};

use crate::{Character, ClassKind, Dice, EncounterKind, EncounterPool, Roster, SimError, resolve};

/// Opponent and player levels both span 1..=20.
pub const LEVELS: usize = 20;

/// Hit rates per (opponent level - 1, player level - 1) cell.
pub type RateMatrix = [[f32; LEVELS]; LEVELS];

/// Per-trial outcome store for one class and one direction, indexed by
/// (opponent level, player level, trial).
///
/// The claim counter in `run` guarantees each opponent-level slice has
/// exactly one writer; the atomics only make that ownership expressible
/// through a shared reference. Relaxed ordering suffices because the thread
/// join is the sole synchronization point before any read.
pub struct HitGrid {
    trials: usize,
    cells: Vec<AtomicU8>,
}

impl HitGrid {
    pub fn new(trials: usize) -> Self {
        let mut cells = Vec::new();
        cells.resize_with(LEVELS * LEVELS * trials, || AtomicU8::new(0));
        Self { trials, cells }
    }

    fn offset(&self, opponent: usize, player: usize, trial: usize) -> usize {
        trial + player * self.trials + opponent * self.trials * LEVELS
    }

    /// Record one outcome. Each cell is written exactly once, by the worker
    /// that claimed the opponent-level slice.
    pub fn record(&self, opponent: usize, player: usize, trial: usize, hit: bool) {
        self.cells[self.offset(opponent, player, trial)].store(hit as u8, Ordering::Relaxed);
    }

    /// Reduce outcomes to hit rates. Pure; only call after all writers have
    /// joined.
    pub fn rates(&self) -> RateMatrix {
        let mut out = [[0.0f32; LEVELS]; LEVELS];
        for opponent in 0..LEVELS {
            for player in 0..LEVELS {
                let base = self.offset(opponent, player, 0);
                let hits: u32 = self.cells[base..base + self.trials]
                    .iter()
                    .map(|cell| cell.load(Ordering::Relaxed) as u32)
                    .sum();
                out[opponent][player] = hits as f32 / self.trials as f32;
            }
        }
        out
    }
}

#[derive(Debug, Clone, Copy)]
pub struct SimConfig {
    /// Repetitions per (class, player level, opponent level) cell.
    pub trials: usize,
    pub workers: usize,
    pub kind: EncounterKind,
    /// Base seed; worker `i` derives its own independent stream from it.
    pub seed: u64,
}

/// Attack (class hits opponent) and defense (opponent hits class) surfaces
/// for one class.
#[derive(Debug, Clone, Serialize)]
pub struct ClassRates {
    pub class: ClassKind,
    pub attack: RateMatrix,
    pub defense: RateMatrix,
}

#[derive(Debug, Clone, Serialize)]
pub struct SimReport {
    pub trials: usize,
    pub elapsed: Duration,
    pub classes: Vec<ClassRates>,
}

fn worker_seed(base: u64, index: usize) -> u64 {
    base.wrapping_add((index as u64).wrapping_mul(0x9e37_79b9_7f4a_7c15))
}

/// Run the full estimate: `trials` battles per class, player level and
/// opponent level, in both directions.
///
/// The unit of work is one opponent level. Workers claim units through a
/// shared fetch-and-add counter, so every unit is processed exactly once and
/// no two workers ever write the same grid slice; workers drain naturally
/// once the counter passes 20. Any worker error is fatal to the run, since
/// a partially filled grid has no statistical meaning.
pub fn run(roster: &Roster, pool: &EncounterPool, config: SimConfig) -> Result<SimReport, SimError> {
    if config.workers == 0 {
        return Err(SimError::NoWorkers);
    }
    let start = Instant::now();

    let attack: Vec<HitGrid> =
        (0..ClassKind::ALL.len()).map(|_| HitGrid::new(config.trials)).collect();
    let defense: Vec<HitGrid> =
        (0..ClassKind::ALL.len()).map(|_| HitGrid::new(config.trials)).collect();
    let unit = AtomicUsize::new(0);

    thread::scope(|scope| -> Result<(), SimError> {
        let mut handles = Vec::with_capacity(config.workers);
        for index in 0..config.workers {
            let attack = &attack;
            let defense = &defense;
            let unit = &unit;
            let handle = thread::Builder::new()
                .name(format!("sim-worker-{index}"))
                .spawn_scoped(scope, move || -> Result<(), SimError> {
                    let mut dice = Dice::from_seed(worker_seed(config.seed, index));
                    loop {
                        let claimed = unit.fetch_add(1, Ordering::Relaxed);
                        if claimed >= LEVELS {
                            break;
                        }
                        let opponent_level = (claimed + 1) as u8;
                        debug!(worker = index, opponent_level, "claimed unit");
                        run_unit(
                            roster,
                            pool,
                            &config,
                            claimed,
                            opponent_level,
                            attack,
                            defense,
                            &mut dice,
                        )?;
                    }
                    Ok(())
                })
                .map_err(|source| SimError::Spawn { index, source })?;
            handles.push(handle);
        }
        for handle in handles {
            handle.join().map_err(|_| SimError::WorkerPanicked)??;
        }
        Ok(())
    })?;

    let classes = ClassKind::ALL
        .iter()
        .enumerate()
        .map(|(i, &class)| ClassRates {
            class,
            attack: attack[i].rates(),
            defense: defense[i].rates(),
        })
        .collect();

    let elapsed = start.elapsed();
    info!(
        trials = config.trials,
        workers = config.workers,
        elapsed_ms = elapsed.as_millis() as u64,
        "simulation complete"
    );
    Ok(SimReport { trials: config.trials, elapsed, classes })
}

/// One unit: every class, player level and trial against a single opponent
/// level. One opponent is drawn per trial and fights both directions.
#[allow(clippy::too_many_arguments)]
fn run_unit(
    roster: &Roster,
    pool: &EncounterPool,
    config: &SimConfig,
    slice: usize,
    opponent_level: u8,
    attack: &[HitGrid],
    defense: &[HitGrid],
    dice: &mut Dice,
) -> Result<(), SimError> {
    for (i, &class) in ClassKind::ALL.iter().enumerate() {
        for player_level in 1..=LEVELS as u8 {
            let player: &Character = roster.get(class, player_level);
            let row = (player_level - 1) as usize;
            for trial in 0..config.trials {
                let opponent = pool.pick(opponent_level, config.kind, dice)?;
                attack[i].record(slice, row, trial, resolve(player, opponent, dice));
                defense[i].record(slice, row, trial, resolve(opponent, player, dice));
            }
        }
    }
    Ok(())
}
