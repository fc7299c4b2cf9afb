//! Course booking views
//!
//! Slots are generated locally from the weekly catalogue and matched against
//! the caller's enrollments by `(course name, start)`.

use chrono::NaiveDateTime;

use fitness_types::{
    CourseId, CourseKind, CourseSlot, DEFAULT_COURSE_DURATION_MINUTES, UPCOMING_SLOT_COUNT,
};

use crate::models::{BookingRequest, Enrollment};

/// A bookable slot and whether the caller already holds it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CourseOffer {
    pub slot: CourseSlot,
    /// Set when an enrollment matches this slot
    pub enrolled_course: Option<CourseId>,
}

impl CourseOffer {
    pub fn is_enrolled(&self) -> bool {
        self.enrolled_course.is_some()
    }

    /// Request body that books this slot
    pub fn booking_request(&self) -> BookingRequest {
        booking_request(&self.slot)
    }
}

/// Next slots of one course, flagged against existing enrollments
pub fn course_offers(
    kind: CourseKind,
    now: NaiveDateTime,
    enrollments: &[Enrollment],
) -> Vec<CourseOffer> {
    kind.next_slots(now, UPCOMING_SLOT_COUNT)
        .into_iter()
        .map(|slot| CourseOffer {
            enrolled_course: enrollments
                .iter()
                .find(|e| slot.matches(&e.course_name, e.starts_at))
                .map(|e| e.course_id),
            slot,
        })
        .collect()
}

/// Enrollments starting after `now`, soonest first
pub fn upcoming(enrollments: &[Enrollment], now: NaiveDateTime) -> Vec<Enrollment> {
    let mut out: Vec<Enrollment> = enrollments
        .iter()
        .filter(|e| e.starts_at > now)
        .cloned()
        .collect();
    out.sort_by_key(|e| e.starts_at);
    out
}

/// Enrollments at or before `now`, latest first
pub fn history(enrollments: &[Enrollment], now: NaiveDateTime) -> Vec<Enrollment> {
    let mut out: Vec<Enrollment> = enrollments
        .iter()
        .filter(|e| e.starts_at <= now)
        .cloned()
        .collect();
    out.sort_by(|a, b| b.starts_at.cmp(&a.starts_at));
    out
}

/// Booking body for a slot
pub fn booking_request(slot: &CourseSlot) -> BookingRequest {
    BookingRequest {
        course_name: slot.kind.name().to_string(),
        date: slot.date_string(),
        time: slot.time_string(),
        duration: format!("{}h", DEFAULT_COURSE_DURATION_MINUTES / 60),
    }
}
