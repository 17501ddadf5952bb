// src/margin.rs
//! Attendance margin kernel.
//!
//! The portal flags students below 75% attendance. The margin expresses how
//! far a subject sits from that line, in whole sessions:
//! - positive: sessions that can still be skipped while staying at/above 75%;
//! - negative: sessions that must be attended consecutively to climb back;
//! - zero: exactly on the line.
//!
//! The stepping rules (including the asymmetry between the two branches) are
//! kept bit-for-bit from the portal's published behavior; see the branch
//! comments below before "fixing" anything here.

use thiserror::Error;

/// Attendance threshold, percent.
pub const THRESHOLD: f64 = 75.0;

/// Upper bound on a believable conducted count. Portals count hours per
/// subject per semester, so even years of backlog stay far below this;
/// anything larger is a mangled cell, and the stepping loops (up to
/// 3×conducted iterations, margin down to -3×conducted) must never run
/// on such input.
pub const MAX_CONDUCTED: u32 = 20_000;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum MarginError {
    #[error("no sessions conducted")]
    NoSessions,
    #[error("absent {absent} exceeds conducted {conducted}")]
    AbsentExceedsConducted { absent: u32, conducted: u32 },
    #[error("conducted {0} is not a believable session count")]
    ImplausibleConducted(u32),
}

/// One subject row's counters, as read off the attendance table.
/// Transient: rebuilt from the page on every run, never persisted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceRecord {
    conducted: u32,
    absent: u32,
}

impl AttendanceRecord {
    pub fn new(conducted: u32, absent: u32) -> Result<Self, MarginError> {
        if conducted == 0 {
            return Err(MarginError::NoSessions);
        }
        if conducted > MAX_CONDUCTED {
            return Err(MarginError::ImplausibleConducted(conducted));
        }
        if absent > conducted {
            return Err(MarginError::AbsentExceedsConducted { absent, conducted });
        }
        Ok(Self { conducted, absent })
    }

    pub fn conducted(&self) -> u32 { self.conducted }
    pub fn absent(&self) -> u32 { self.absent }

    pub fn margin(&self) -> i32 {
        // Inputs already validated, so the stepping loops cannot see 0/0.
        margin_unchecked(self.conducted, self.absent)
    }
}

/// Compute the margin for raw counters.
/// Fails fast on zero conducted instead of letting 0/0 poison the loops.
pub fn compute_margin(conducted: u32, absent: u32) -> Result<i32, MarginError> {
    Ok(AttendanceRecord::new(conducted, absent)?.margin())
}

fn margin_unchecked(conducted: u32, absent: u32) -> i32 {
    let present = conducted - absent;
    let mut conducted = conducted as u64;
    let mut present = present as u64;
    let mut current = ratio(present, conducted);
    let mut margin: i32 = 0;

    if current > THRESHOLD {
        // Grow conducted only (skipped sessions), then back off one step:
        // the loop runs until the ratio has already dropped below 75, so the
        // last counted step is excluded. Kept as-is from the portal.
        while current >= THRESHOLD {
            conducted += 1;
            margin += 1;
            current = ratio(present, conducted);
        }
        margin -= 1;
    } else {
        // Grow conducted and present together (attended sessions).
        // At exactly 75 this loop body never runs and the margin stays 0.
        while current < THRESHOLD {
            conducted += 1;
            present += 1;
            margin -= 1;
            current = ratio(present, conducted);
        }
    }
    margin
}

// f64 on purpose: threshold ties must resolve the way IEEE-754 doubles do.
#[inline]
fn ratio(present: u64, conducted: u64) -> f64 {
    present as f64 / conducted as f64 * 100.0
}
