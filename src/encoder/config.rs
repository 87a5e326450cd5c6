use std::sync::OnceLock;

use crate::models::{ECLevel, MaskPattern};

fn parse_env_usize(name: &str, default: usize) -> usize {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<usize>().ok())
        .unwrap_or(default)
}

fn parse_env_bool_u8(name: &str, default: bool) -> bool {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse::<u8>().ok())
        .map(|v| v != 0)
        .unwrap_or(default)
}

static PARALLEL_MASK_SEARCH: OnceLock<bool> = OnceLock::new();

/// Score the eight mask candidates on the rayon pool
pub(crate) fn parallel_mask_search() -> bool {
    *PARALLEL_MASK_SEARCH.get_or_init(|| parse_env_bool_u8("QR_PARALLEL_MASK_SEARCH", true))
}

static PARALLEL_MIN_VERSION: OnceLock<u8> = OnceLock::new();

/// Smallest version worth spreading the mask search across threads
pub(crate) fn parallel_min_version() -> u8 {
    *PARALLEL_MIN_VERSION
        .get_or_init(|| parse_env_usize("QR_PARALLEL_MIN_VERSION", 7).clamp(1, 40) as u8)
}

/// Per-call encoding options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EncodeOptions {
    /// Type number 1-40, or 0 to pick the smallest version that fits
    pub version: u8,
    /// Error correction level
    pub ec_level: ECLevel,
    /// Fixed mask, or `None` to choose by penalty score
    pub mask: Option<MaskPattern>,
}

impl Default for EncodeOptions {
    fn default() -> Self {
        Self {
            version: 0,
            ec_level: ECLevel::M,
            mask: None,
        }
    }
}
