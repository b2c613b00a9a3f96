// crates/cli/src/parsers.rs
//! Value parsers for command-line flags.

use std::str::FromStr;

/// Byte count with an optional binary unit: `4096`, `512K`, `4MiB`, `1_000`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SizeArg(pub u64);

/// Unit suffixes (lowercase) and the power of two they scale by.
const UNITS: &[(&str, u32)] = &[
    ("kib", 10),
    ("kb", 10),
    ("k", 10),
    ("mib", 20),
    ("mb", 20),
    ("m", 20),
    ("gib", 30),
    ("gb", 30),
    ("g", 30),
];

impl FromStr for SizeArg {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact = s
            .trim()
            .chars()
            .filter(|&c| c != '_')
            .collect::<String>()
            .to_ascii_lowercase();
        let (digits, shift) = UNITS
            .iter()
            .find_map(|&(unit, shift)| {
                compact
                    .strip_suffix(unit)
                    .map(|digits| (digits.trim_end(), shift))
            })
            .unwrap_or((compact.as_str(), 0));

        let count: u64 = digits
            .parse()
            .map_err(|_| format!("invalid size '{s}'"))?;
        count
            .checked_mul(1 << shift)
            .map(Self)
            .ok_or_else(|| format!("size '{s}' does not fit in 64 bits"))
    }
}

/// Thread counts and similar: a whole number of at least 1.
pub fn parse_positive_usize(s: &str) -> Result<usize, String> {
    match s.trim().parse::<usize>() {
        Ok(0) => Err("must be at least 1".to_string()),
        Ok(n) => Ok(n),
        Err(e) => Err(format!("invalid count '{s}': {e}")),
    }
}

/// `EXT=LANGUAGE` for `--map-ext`. Both sides are trimmed and must be
/// non-empty; the language name may itself contain spaces.
pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let malformed = || format!("expected EXT=LANGUAGE, got '{s}'");
    let (ext, language) = s.split_once('=').ok_or_else(malformed)?;
    let (ext, language) = (ext.trim(), language.trim());
    if ext.is_empty() || language.is_empty() {
        return Err(malformed());
    }
    Ok((ext.to_string(), language.to_string()))
}
