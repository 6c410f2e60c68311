//! User-tunable resolution preferences.

use serde::{Deserialize, Serialize};

use crate::token::PartOfDay;

/// Configuration for the temporal interpreter.
///
/// All fields have sensible defaults; callers usually tweak one or two
/// (e.g. a Sunday-start calendar) and keep the rest.
///
/// ```
/// use temporal_phrase::Preferences;
///
/// let prefs = Preferences {
///     start_of_week: 1, // Sunday
///     ..Preferences::default()
/// };
/// assert_eq!(prefs.morning_hour, 9);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Preferences {
    /// First day of the calendar week, canonical index (Sunday=1..Saturday=7).
    pub start_of_week: u8,
    /// Anchor hour for "morning".
    pub morning_hour: u32,
    /// Anchor hour for "afternoon".
    pub afternoon_hour: u32,
    /// Anchor hour for "evening".
    pub evening_hour: u32,
    /// Anchor hour for "night" / "tonight".
    pub night_hour: u32,
    /// Anchor hour for "noon".
    pub noon_hour: u32,
    /// Anchor hour for "midnight".
    pub midnight_hour: u32,
    /// Anchor hour for a weekend with no time qualifier.
    pub weekend_hour: u32,
    /// When true, "next week" is the literal calendar week after the current
    /// one; when false it is a rolling seven-day window from the reference.
    pub literal_next_week: bool,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            start_of_week: 2, // Monday
            morning_hour: 9,
            afternoon_hour: 15,
            evening_hour: 19,
            night_hour: 20,
            noon_hour: 12,
            midnight_hour: 0,
            weekend_hour: 10,
            literal_next_week: true,
        }
    }
}

impl Preferences {
    /// Anchor hour for a daypart word.
    pub fn part_of_day_hour(&self, part: PartOfDay) -> u32 {
        match part {
            PartOfDay::Morning => self.morning_hour,
            PartOfDay::Afternoon => self.afternoon_hour,
            PartOfDay::Evening => self.evening_hour,
            PartOfDay::Night => self.night_hour,
            PartOfDay::Noon => self.noon_hour,
            PartOfDay::Midnight => self.midnight_hour,
        }
    }
}
