//! Reservation admission: decides whether a proposed booking may be written
//! given the bookings already stored for the same bay and day.
//!
//! The checker is pure. It never touches storage and trusts the caller to
//! hand it a snapshot that is already scoped to the candidate's bay and
//! [`DayWindow`], with the candidate's own row left out on update. A snapshot
//! that is not scoped that way produces a wrong conflict set rather than an
//! error; [`AdmissionChecker::refiltering`] re-applies the bay and self-id
//! scoping for callers that cannot guarantee it.
//!
//! The read-then-write sequence around the checker is not atomic by itself;
//! see [`super::locks::BayLocks`].

use chrono::{DateTime, NaiveDate, NaiveTime, Utc};
use tracing::warn;

use models::reservation;

/// A booked span `[start, end)` on a single bay.
///
/// Bounds are not validated here: a zero-length or inverted slot is compared
/// with the same inequalities as any other.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TimeSlot {
    pub start: DateTime<Utc>,
    pub end: DateTime<Utc>,
}

impl TimeSlot {
    pub const fn new(start: DateTime<Utc>, end: DateTime<Utc>) -> Self {
        Self { start, end }
    }

    /// `true` if the slots share any instant. Touching bounds do not overlap.
    #[inline]
    pub fn overlaps(&self, other: &TimeSlot) -> bool {
        self.start < other.end && other.start < self.end
    }

    /// Calendar days (UTC) spanned by this slot, used to scope the snapshot.
    pub fn day_window(&self) -> DayWindow {
        DayWindow {
            from: midnight(self.start.date_naive()),
            until: self
                .end
                .date_naive()
                .succ_opt()
                .map(midnight)
                .unwrap_or(DateTime::<Utc>::MAX_UTC),
        }
    }
}

fn midnight(date: NaiveDate) -> DateTime<Utc> {
    date.and_time(NaiveTime::MIN).and_utc()
}

/// Start of the candidate's first day up to (excluding) the midnight after its
/// last day. A stored slot is in the window when it starts at or after `from`
/// and ends before `until`, i.e. no later than the end of the last day.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct DayWindow {
    pub from: DateTime<Utc>,
    pub until: DateTime<Utc>,
}

impl DayWindow {
    pub fn contains(&self, slot: &TimeSlot) -> bool {
        slot.start >= self.from && slot.end < self.until
    }
}

/// Anything that occupies a bay over a slot.
pub trait Booking {
    /// Stored id; `None` for a booking that has not been persisted yet.
    fn booking_id(&self) -> Option<i32>;
    fn service_bay_id(&self) -> i32;
    fn slot(&self) -> TimeSlot;
}

impl Booking for reservation::Model {
    fn booking_id(&self) -> Option<i32> { Some(self.id) }
    fn service_bay_id(&self) -> i32 { self.service_bay_id }
    fn slot(&self) -> TimeSlot { TimeSlot::new(self.start_time, self.end_time) }
}

/// Outcome of an admission check.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Admission<T> {
    Admit,
    /// Every overlapping booking, in snapshot order.
    Reject(Vec<T>),
}

impl<T> Admission<T> {
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admit)
    }

    pub fn conflicts(&self) -> &[T] {
        match self {
            Admission::Admit => &[],
            Admission::Reject(conflicts) => conflicts,
        }
    }
}

/// Overlap-based admission over a pre-scoped snapshot.
#[derive(Clone, Copy, Debug, Default)]
pub struct AdmissionChecker {
    refilter: bool,
}

impl AdmissionChecker {
    pub const fn new() -> Self {
        Self { refilter: false }
    }

    /// Drop snapshot rows from other bays or carrying the candidate's id
    /// before deciding.
    pub const fn refiltering() -> Self {
        Self { refilter: true }
    }

    pub fn check<C, E>(&self, candidate: &C, existing: Vec<E>) -> Admission<E>
    where
        C: Booking,
        E: Booking,
    {
        let slot = candidate.slot();
        let mut dropped = 0usize;
        let conflicts: Vec<E> = existing
            .into_iter()
            .filter(|row| {
                if self.refilter && !in_scope(candidate, row) {
                    dropped += 1;
                    return false;
                }
                true
            })
            .filter(|row| row.slot().overlaps(&slot))
            .collect();

        if dropped > 0 {
            warn!(
                event = "admission_snapshot_refiltered",
                service_bay_id = candidate.service_bay_id(),
                dropped,
                "snapshot contained rows outside the candidate's scope"
            );
        }

        if conflicts.is_empty() {
            Admission::Admit
        } else {
            Admission::Reject(conflicts)
        }
    }
}

fn in_scope<C: Booking, E: Booking>(candidate: &C, row: &E) -> bool {
    if row.service_bay_id() != candidate.service_bay_id() {
        return false;
    }
    match (candidate.booking_id(), row.booking_id()) {
        (Some(own), Some(other)) => own != other,
        _ => true,
    }
}
