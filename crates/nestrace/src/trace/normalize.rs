//! Per-field normalization applied before comparing.
//!
//! The two log sources disagree on a couple of representational details
//! that are not emulation bugs: the reference prints the B flag differently
//! and reports the pre-render scanline as `-1` where the emulator prints
//! `261`. Rules here erase those differences.

use std::fmt;
use std::str::FromStr;

use rustc_hash::FxHashMap;

use super::Field;
use crate::error::{Error, Result};

/// A value transformation applied to both sides of a comparison.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Normalizer {
    /// Keep only the bits set in the mask.
    MaskBits(u8),
    /// Replace `from` with `to`; other values pass through.
    RemapSentinel { from: i64, to: i64 },
}

impl Normalizer {
    /// Clears bit 4 of the status register (the B flag).
    pub const BREAK_FLAG: Self = Self::MaskBits(0b1110_1111);

    /// Reference logs report the pre-render scanline as -1.
    pub const SCANLINE_WRAP: Self = Self::RemapSentinel { from: -1, to: 261 };

    #[must_use]
    pub fn apply(self, value: i64) -> i64 {
        match self {
            Self::MaskBits(mask) => value & i64::from(mask),
            Self::RemapSentinel { from, to } => {
                if value == from {
                    to
                } else {
                    value
                }
            }
        }
    }

    /// Parse a hex mask such as `EF` or `0xCF`.
    pub fn parse_mask(text: &str) -> Result<Self> {
        let digits = text
            .strip_prefix("0x")
            .or_else(|| text.strip_prefix("0X"))
            .unwrap_or(text);
        u8::from_str_radix(digits, 16)
            .map(Self::MaskBits)
            .map_err(|_| Error::InvalidRule(format!("mask {text:?} is not a hex byte")))
    }
}

impl fmt::Display for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MaskBits(mask) => write!(f, "mask 0x{mask:02X}"),
            Self::RemapSentinel { from, to } => write!(f, "{from} -> {to}"),
        }
    }
}

impl FromStr for Normalizer {
    type Err = Error;

    /// Parse a sentinel remap written as `FROM:TO`, e.g. `-1:261`.
    fn from_str(s: &str) -> Result<Self> {
        let invalid = || Error::InvalidRule(format!("expected FROM:TO, got {s:?}"));
        let (from, to) = s.split_once(':').ok_or_else(invalid)?;
        let from = from.trim().parse().map_err(|_| invalid())?;
        let to = to.trim().parse().map_err(|_| invalid())?;
        Ok(Self::RemapSentinel { from, to })
    }
}

/// Normalizers keyed by field.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizeRules {
    rules: FxHashMap<Field, Normalizer>,
}

impl NormalizeRules {
    /// No normalization.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// B flag masked on `p`, scanline -1 remapped to 261 on `sc`.
    #[must_use]
    pub fn nes_defaults() -> Self {
        Self::none()
            .with(Field::P, Normalizer::BREAK_FLAG)
            .with(Field::Sc, Normalizer::SCANLINE_WRAP)
    }

    /// Set the rule for `field`, replacing any previous one.
    #[must_use]
    pub fn with(mut self, field: Field, normalizer: Normalizer) -> Self {
        self.rules.insert(field, normalizer);
        self
    }

    /// Drop the rule for `field`.
    #[must_use]
    pub fn without(mut self, field: Field) -> Self {
        self.rules.remove(&field);
        self
    }

    #[must_use]
    pub fn get(&self, field: Field) -> Option<Normalizer> {
        self.rules.get(&field).copied()
    }

    /// Normalize `value` of `field`; fields without a rule pass through.
    #[must_use]
    pub fn apply(&self, field: Field, value: i64) -> i64 {
        self.get(field).map_or(value, |n| n.apply(value))
    }

    /// Rules sorted by field, for stable reporting.
    pub fn iter(&self) -> impl Iterator<Item = (Field, Normalizer)> {
        let mut rules: Vec<_> = self.rules.iter().map(|(f, n)| (*f, *n)).collect();
        rules.sort_by_key(|(field, _)| *field);
        rules.into_iter()
    }
}
