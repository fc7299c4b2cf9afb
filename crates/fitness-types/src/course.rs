//! Course catalogue and weekly slot generation
//!
//! Course *instances* are not pre-scheduled. Each catalogue course runs once a
//! week on a fixed weekday; a concrete instance is materialised the first time
//! someone books one of its slots.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime, Weekday};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::DomainError;

/// Unique course instance identifier (`id_cours`)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseId(pub i32);

impl std::fmt::Display for CourseId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Date format used on the booking wire (`DD/MM/YYYY`)
pub const SLOT_DATE_FORMAT: &str = "%d/%m/%Y";

/// Time format used on the booking wire (`HH:MM`)
pub const SLOT_TIME_FORMAT: &str = "%H:%M";

/// Duration stored for materialised course instances, in minutes
pub const DEFAULT_COURSE_DURATION_MINUTES: i32 = 120;

/// Number of upcoming slots offered per course
pub const UPCOMING_SLOT_COUNT: usize = 3;

/// Catalogue of bookable courses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CourseKind {
    #[serde(rename = "Cours Collectifs")]
    CoursCollectifs,
    #[serde(rename = "Pole Dance")]
    PoleDance,
    #[serde(rename = "Crosstraining")]
    Crosstraining,
    #[serde(rename = "Boxe")]
    Boxe,
    #[serde(rename = "Haltérophilie")]
    Halterophilie,
    #[serde(rename = "MMA")]
    Mma,
}

impl CourseKind {
    /// Every catalogue course, Monday first
    pub const ALL: [CourseKind; 6] = [
        Self::CoursCollectifs,
        Self::PoleDance,
        Self::Crosstraining,
        Self::Boxe,
        Self::Halterophilie,
        Self::Mma,
    ];

    /// Display name, also the `nom_cours` column value
    pub const fn name(&self) -> &'static str {
        match self {
            Self::CoursCollectifs => "Cours Collectifs",
            Self::PoleDance => "Pole Dance",
            Self::Crosstraining => "Crosstraining",
            Self::Boxe => "Boxe",
            Self::Halterophilie => "Haltérophilie",
            Self::Mma => "MMA",
        }
    }

    /// Weekday on which the course runs
    pub const fn weekday(&self) -> Weekday {
        match self {
            Self::CoursCollectifs => Weekday::Mon,
            Self::PoleDance => Weekday::Tue,
            Self::Crosstraining => Weekday::Wed,
            Self::Boxe => Weekday::Thu,
            Self::Halterophilie => Weekday::Fri,
            Self::Mma => Weekday::Sat,
        }
    }

    /// Coach assigned to new instances (`id_coach`)
    pub const fn coach_id(&self) -> i32 {
        match self {
            Self::CoursCollectifs => 1,
            Self::PoleDance => 2,
            Self::Crosstraining => 3,
            Self::Boxe => 4,
            Self::Halterophilie => 5,
            Self::Mma => 6,
        }
    }

    /// Coach display name
    pub const fn coach_name(&self) -> &'static str {
        match self {
            Self::CoursCollectifs => "Anna",
            Self::PoleDance => "Marc",
            Self::Crosstraining => "Léa",
            Self::Boxe => "Paul",
            Self::Halterophilie => "Sophie",
            Self::Mma => "Lucas",
        }
    }

    /// Start time shared by all courses
    pub fn start_time() -> NaiveTime {
        NaiveTime::from_hms_opt(18, 0, 0).unwrap_or_default()
    }

    /// Next `count` weekly occurrences strictly after `now`
    pub fn next_slots(&self, now: NaiveDateTime, count: usize) -> Vec<CourseSlot> {
        let first = self.first_slot_after(now);
        (0..count)
            .map(|week| CourseSlot {
                kind: *self,
                starts_at: first + Duration::weeks(week as i64),
            })
            .collect()
    }

    fn first_slot_after(&self, now: NaiveDateTime) -> NaiveDateTime {
        let today = now.date();
        let target = self.weekday().num_days_from_monday() as i64;
        let current = today.weekday().num_days_from_monday() as i64;
        let days_ahead = (target - current).rem_euclid(7);

        let candidate = (today + Duration::days(days_ahead)).and_time(Self::start_time());
        if candidate <= now {
            candidate + Duration::weeks(1)
        } else {
            candidate
        }
    }
}

impl std::fmt::Display for CourseKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for CourseKind {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| DomainError::UnknownCourse(s.to_string()))
    }
}

/// A concrete weekly occurrence of a catalogue course
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CourseSlot {
    pub kind: CourseKind,
    pub starts_at: NaiveDateTime,
}

impl CourseSlot {
    /// Booking wire date (`DD/MM/YYYY`)
    pub fn date_string(&self) -> String {
        self.starts_at.format(SLOT_DATE_FORMAT).to_string()
    }

    /// Booking wire time (`HH:MM`)
    pub fn time_string(&self) -> String {
        self.starts_at.format(SLOT_TIME_FORMAT).to_string()
    }

    /// Whether an enrollment (course name + start) refers to this slot
    pub fn matches(&self, course_name: &str, starts_at: NaiveDateTime) -> bool {
        self.kind.name() == course_name && self.starts_at == starts_at
    }
}

/// Parse the booking wire pair (`DD/MM/YYYY`, `HH:MM`) into a timestamp
pub fn parse_slot(date: &str, time: &str) -> Result<NaiveDateTime, DomainError> {
    let date = NaiveDate::parse_from_str(date.trim(), SLOT_DATE_FORMAT)
        .map_err(|e| DomainError::InvalidSlot(format!("date '{date}': {e}")))?;
    let time = NaiveTime::parse_from_str(time.trim(), SLOT_TIME_FORMAT)
        .map_err(|e| DomainError::InvalidSlot(format!("time '{time}': {e}")))?;
    Ok(date.and_time(time))
}
