//! Daily check-in streak
//!
//! A streak counts consecutive calendar days with a check-in. Days are local
//! calendar dates, so checking in at 23:59 and again at 00:01 continues the
//! streak while two check-ins 25 hours apart that skip a whole date break it.

use chrono::{DateTime, Days, Local, NaiveDate, TimeZone};

use crate::store::{KeyValueStore, SharedStore, StoreError, read_counter};

const CURRENT_KEY: &str = "streakCurrent";
const LONGEST_KEY: &str = "streakLongest";
const LAST_DATE_KEY: &str = "streakLastDate";

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Streak counters and the day of the last check-in
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct StreakState {
    pub current: u32,
    /// Historical maximum, never below `current` after a check-in
    pub longest: u32,
    pub last_check_in: Option<NaiveDate>,
}

/// What a check-in did
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CheckIn {
    /// No earlier check-in existed
    First,
    /// Already checked in on this day; nothing changed
    AlreadyToday,
    /// Last check-in was yesterday; streak extended
    Continued,
    /// At least one day was missed (or the clock went backwards); streak restarted
    Broken,
}

/// Owns the daily check-in streak
pub struct StreakTracker {
    store: SharedStore,
    state: StreakState,
}

impl StreakTracker {
    pub fn load(store: SharedStore) -> Result<Self, StoreError> {
        let last_check_in = match store.get_string(LAST_DATE_KEY)? {
            Some(raw) => Some(parse_day(&raw).ok_or_else(|| StoreError::InvalidDate {
                key: LAST_DATE_KEY.to_string(),
                value: raw.clone(),
            })?),
            None => None,
        };

        let state = StreakState {
            current: read_counter(store.as_ref(), CURRENT_KEY)?,
            longest: read_counter(store.as_ref(), LONGEST_KEY)?,
            last_check_in,
        };
        tracing::debug!("Loaded streak {:?}", state);
        Ok(Self { store, state })
    }

    /// Check in for the current local day
    pub fn check_in(&mut self) -> Result<CheckIn, StoreError> {
        self.check_in_on(today())
    }

    /// Check in for `today`. Idempotent within a day.
    pub fn check_in_on(&mut self, today: NaiveDate) -> Result<CheckIn, StoreError> {
        let outcome = match self.state.last_check_in {
            None => CheckIn::First,
            Some(last) if last == today => return Ok(CheckIn::AlreadyToday),
            Some(last) if Some(last) == today.checked_sub_days(Days::new(1)) => CheckIn::Continued,
            Some(last) => {
                if last > today {
                    tracing::warn!(
                        "Last check-in {} is after today {}; restarting streak",
                        last,
                        today
                    );
                }
                CheckIn::Broken
            }
        };

        self.state.current = match outcome {
            CheckIn::Continued => self.state.current.saturating_add(1),
            _ => 1,
        };
        self.state.longest = self.state.longest.max(self.state.current);
        self.state.last_check_in = Some(today);
        tracing::info!(
            "Checked in on {} ({:?}): streak {} / longest {}",
            today,
            outcome,
            self.state.current,
            self.state.longest
        );

        self.store.set_int(CURRENT_KEY, i64::from(self.state.current))?;
        self.store.set_int(LONGEST_KEY, i64::from(self.state.longest))?;
        self.store.set_string(LAST_DATE_KEY, today.format(DATE_FORMAT).to_string())?;
        Ok(outcome)
    }

    pub fn state(&self) -> StreakState {
        self.state
    }

    pub fn current_streak(&self) -> u32 {
        self.state.current
    }

    pub fn longest_streak(&self) -> u32 {
        self.state.longest
    }

    pub fn last_check_in(&self) -> Option<NaiveDate> {
        self.state.last_check_in
    }

    /// Whether the last check-in happened on the current local day
    pub fn has_streak_today(&self) -> bool {
        self.has_streak_on(today())
    }

    pub fn has_streak_on(&self, today: NaiveDate) -> bool {
        self.state.last_check_in == Some(today)
    }

    /// Zero both counters, forget the last date and erase the stored records
    pub fn reset(&mut self) -> Result<(), StoreError> {
        self.state = StreakState::default();
        tracing::info!("Streak reset");
        self.store.remove(CURRENT_KEY)?;
        self.store.remove(LONGEST_KEY)?;
        self.store.remove(LAST_DATE_KEY)
    }
}

/// Current date in the system time zone
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a stored day. Accepts a plain date or a full RFC 3339 timestamp,
/// the latter mapped to its local calendar day.
fn parse_day(raw: &str) -> Option<NaiveDate> {
    parse_day_in(raw, &Local)
}

// Older data stores local midnight as a UTC instant, e.g. "2024-03-08T23:00:00Z"
// for March 9th at UTC+1, so timestamps are read back in the given zone.
fn parse_day_in<Tz: TimeZone>(raw: &str, tz: &Tz) -> Option<NaiveDate> {
    if let Ok(day) = NaiveDate::parse_from_str(raw, DATE_FORMAT) {
        return Some(day);
    }
    DateTime::parse_from_rfc3339(raw)
        .ok()
        .map(|dt| dt.with_timezone(tz).date_naive())
}
