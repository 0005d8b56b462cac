use log::{info, LevelFilter};
use rand::{Rng, SeedableRng, XorShiftRng};
use simplelog::{Config, SimpleLogger};
use splay_collections::SplayMap;
use std::env;
use std::process;

const KEY_SPACE: u32 = 10_000;
const HOT_KEYS: u32 = 16;

/// Settings for a workload run, read from positional arguments:
/// `splay-workload [operations] [seed] [log-level]`.
struct WorkloadConfig {
    operations: usize,
    seed: u32,
    log_level: LevelFilter,
}

impl Default for WorkloadConfig {
    fn default() -> Self {
        WorkloadConfig {
            operations: 100_000,
            seed: 1,
            log_level: LevelFilter::Info,
        }
    }
}

impl WorkloadConfig {
    fn from_args<I>(args: I) -> Result<Self, String>
    where
        I: IntoIterator<Item = String>,
    {
        let mut config = WorkloadConfig::default();
        let mut args = args.into_iter();
        if let Some(arg) = args.next() {
            config.operations = arg
                .parse()
                .map_err(|_| format!("invalid operation count `{}`", arg))?;
        }
        if let Some(arg) = args.next() {
            config.seed = arg.parse().map_err(|_| format!("invalid seed `{}`", arg))?;
        }
        if let Some(arg) = args.next() {
            config.log_level = arg.parse().map_err(|_| format!("invalid log level `{}`", arg))?;
        }
        Ok(config)
    }
}

fn run(config: &WorkloadConfig) {
    let mut rng = XorShiftRng::from_seed([config.seed, 1, 1, 1]);
    let mut map = SplayMap::with_capacity(KEY_SPACE as usize);
    let (mut hits, mut misses, mut removed) = (0, 0, 0);

    for _ in 0..config.operations {
        // Most accesses go to a small hot set, which the splay tree keeps near the root.
        let key = if rng.gen_weighted_bool(4) {
            rng.gen_range(0, KEY_SPACE)
        } else {
            rng.gen_range(0, HOT_KEYS)
        };
        match rng.gen_range(0, 10) {
            0..=3 => {
                map.insert(key, rng.next_u32());
            },
            4..=8 => match map.try_get(&key) {
                Some(_) => hits += 1,
                None => misses += 1,
            },
            _ => {
                if map.remove(&key).is_some() {
                    removed += 1;
                }
            },
        }
    }

    info!(
        "{} operations: {} entries, {} hits, {} misses, {} removed, root key {:?}",
        config.operations,
        map.len(),
        hits,
        misses,
        removed,
        map.root_key(),
    );
}

fn main() {
    let config = match WorkloadConfig::from_args(env::args().skip(1)) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!("usage: splay-workload [operations] [seed] [error|warn|info|debug|trace]");
            process::exit(2);
        },
    };
    if let Err(error) = SimpleLogger::init(config.log_level, Config::default()) {
        eprintln!("Error: could not initialize logger: {}", error);
    }
    run(&config);
}
