//! Space distribution along one layout axis.
//!
//! 1. Fixed and auto claims are clamped and reserved first, together with
//!    every child's margins.
//! 2. The rest (never negative) is shared among fraction claims by weight,
//!    using exact rationals. Weights are first reduced to their smallest
//!    integer ratio, so proportional weight sets share identically.
//! 3. Min/max clamps are applied to the shares; whatever they freed or
//!    took is redistributed once over the unclamped fraction claims.
//! 4. Shares are floored and the leftover cells handed out one at a time,
//!    in declaration order, skipping children already at their max.

use crate::fraction::Fraction;

use super::size_resolver::{Bounds, Claim};

/// Reduced weights summing to more than this are scaled down to it.
const MAX_TOTAL_WEIGHT: i128 = 1 << 20;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Track {
    pub claim: Claim,
    pub bounds: Bounds,
}

/// Result of distributing one axis.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Distribution {
    /// Size of each track, index-aligned with the input.
    pub sizes: Vec<i32>,
    /// Cells the tracks and margins need; more than `available` means the
    /// container overflows.
    pub required: i32,
}

pub fn distribute(tracks: &[Track], available: i32, margins: i32) -> Distribution {
    let mut sizes = vec![0; tracks.len()];
    let mut reserved = i64::from(margins);
    let weights = reduced_weights(tracks);
    let total_weight: i64 = weights.iter().sum();

    for (size, track) in sizes.iter_mut().zip(tracks) {
        if let Claim::Fixed(cells) | Claim::Auto(cells) = track.claim {
            *size = track.bounds.clamp(cells).max(0);
            reserved += i64::from(*size);
        }
    }

    let remaining = i64::from(available) - reserved;
    if remaining < 0 || total_weight == 0 {
        // Fraction children get nothing when the reservations do not fit.
        return Distribution {
            sizes,
            required: saturate(reserved),
        };
    }

    let mut shares: Vec<Option<Fraction>> = tracks
        .iter()
        .zip(&weights)
        .map(|(track, weight)| {
            track
                .claim
                .is_fraction()
                .then(|| Fraction::from(remaining).mul_ratio(*weight, total_weight))
        })
        .collect();

    redistribute_clamped(tracks, &weights, &mut shares);

    let total: Fraction = shares.iter().flatten().copied().sum();
    let mut leftover = total.floor();
    for (size, share) in sizes.iter_mut().zip(&shares) {
        if let Some(share) = share {
            *size = saturate(share.floor());
            leftover -= i64::from(*size);
        }
    }
    for ((size, share), track) in sizes.iter_mut().zip(&shares).zip(tracks) {
        if leftover <= 0 {
            break;
        }
        if share.is_some() && track.bounds.below_max(*size) {
            *size += 1;
            leftover -= 1;
        }
    }

    let used: i64 = reserved
        + sizes
            .iter()
            .zip(tracks)
            .filter(|(_, t)| t.claim.is_fraction())
            .map(|(s, _)| i64::from(*s))
            .sum::<i64>();
    Distribution {
        sizes,
        required: saturate(used),
    }
}

/// Narrows a cell count, saturating at `i32::MAX`.
fn saturate(count: i64) -> i32 {
    i32::try_from(count).unwrap_or(if count < 0 { i32::MIN } else { i32::MAX })
}

/// Fraction weights divided by their greatest common divisor, index-aligned
/// with `tracks`. Other claims weigh 0.
fn reduced_weights(tracks: &[Track]) -> Vec<i64> {
    let raw: Vec<i128> = tracks
        .iter()
        .map(|track| match track.claim {
            Claim::Fraction(weight) => i128::from(weight.max(0)),
            _ => 0,
        })
        .collect();
    let divisor = raw.iter().copied().fold(0, gcd);
    if divisor == 0 {
        return vec![0; tracks.len()];
    }

    let mut weights: Vec<i128> = raw.iter().map(|w| w / divisor).collect();
    let total: i128 = weights.iter().sum();
    if total > MAX_TOTAL_WEIGHT {
        for weight in weights.iter_mut().filter(|w| **w > 0) {
            *weight = (*weight * MAX_TOTAL_WEIGHT / total).max(1);
        }
    }
    weights
        .into_iter()
        .map(|w| i64::try_from(w).unwrap_or(i64::MAX))
        .collect()
}

fn gcd(a: i128, b: i128) -> i128 {
    if b == 0 { a } else { gcd(b, a % b) }
}

/// Clamps each fraction share, then spreads the difference once over the
/// shares that were not clamped. Not iterated to a fixed point.
fn redistribute_clamped(tracks: &[Track], weights: &[i64], shares: &mut [Option<Fraction>]) {
    let mut excess = Fraction::ZERO;
    let mut free_weight = 0i64;
    let mut clamped = vec![false; tracks.len()];

    for (((share, track), weight), clamped) in
        shares.iter_mut().zip(tracks).zip(weights).zip(clamped.iter_mut())
    {
        let Some(value) = share.as_mut() else {
            continue;
        };
        let bounded = track.bounds.clamp_fraction(*value);
        if bounded != *value {
            excess = excess + (*value - bounded);
            *value = bounded;
            *clamped = true;
        } else {
            free_weight += *weight;
        }
    }

    if excess == Fraction::ZERO || free_weight == 0 {
        return;
    }

    for (((share, track), weight), clamped) in shares.iter_mut().zip(tracks).zip(weights).zip(&clamped) {
        let (Some(value), false) = (share.as_mut(), *clamped) else {
            continue;
        };
        let grown = (*value + excess.mul_ratio(*weight, free_weight)).max(Fraction::ZERO);
        *value = track.bounds.clamp_fraction(grown);
    }
}
