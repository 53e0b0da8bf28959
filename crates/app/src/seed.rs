//! Where the fallback seed comes from. A failed load starts a fresh game from
//! this seed, so it is either pinned on the command line or drawn once per
//! process.

use std::process;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{SystemTime, UNIX_EPOCH};

pub const FALLBACK_SEED_FLAG: &str = "--fallback-seed";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FallbackSeed {
    Pinned(u64),
    Generated(u64),
}

impl FallbackSeed {
    pub fn value(self) -> u64 {
        match self {
            Self::Pinned(seed) | Self::Generated(seed) => seed,
        }
    }
}

static DRAWS: AtomicU64 = AtomicU64::new(0);

pub fn generate_runtime_seed() -> u64 {
    let nanos =
        SystemTime::now().duration_since(UNIX_EPOCH).map_or(0_u128, |elapsed| elapsed.as_nanos());
    let draw = DRAWS.fetch_add(1, Ordering::Relaxed);
    let entropy = (nanos as u64)
        ^ ((nanos >> 64) as u64)
        ^ u64::from(process::id()).rotate_left(17)
        ^ draw.rotate_left(7);
    splitmix(entropy)
}

/// Reads `--fallback-seed N` or `--fallback-seed=N` from `args` (program name
/// first). Other arguments are left for macroquad.
pub fn fallback_seed_from_args(args: &[String], generated: u64) -> Result<FallbackSeed, String> {
    let mut pinned = None;
    let mut rest = args.iter().skip(1);
    while let Some(argument) = rest.next() {
        let raw = if argument == FALLBACK_SEED_FLAG {
            rest.next()
                .map(String::as_str)
                .ok_or_else(|| format!("missing value for {FALLBACK_SEED_FLAG}"))?
        } else if let Some(raw) = argument.strip_prefix("--fallback-seed=") {
            raw
        } else {
            continue;
        };
        if pinned.is_some() {
            return Err(format!("{FALLBACK_SEED_FLAG} given more than once"));
        }
        let seed =
            raw.parse::<u64>().map_err(|_| format!("fallback seed '{raw}' must be a number"))?;
        pinned = Some(seed);
    }
    Ok(pinned.map_or(FallbackSeed::Generated(generated), FallbackSeed::Pinned))
}

fn splitmix(mut value: u64) -> u64 {
    value ^= value >> 30;
    value = value.wrapping_mul(0xBF58_476D_1CE4_E5B9);
    value ^= value >> 27;
    value = value.wrapping_mul(0x94D0_49BB_1331_11EB);
    value ^ (value >> 31)
}
