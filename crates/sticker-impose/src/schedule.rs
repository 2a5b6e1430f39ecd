//! Delivery scheduling
//!
//! Production minutes are consumed against a weekly work calendar by stepping
//! a cursor from "now" through each open window. Batch-produced modes skip the
//! simulation and deliver at the next weekly slot.

use crate::constants::MINIMUM_PRODUCTION_MINUTES;
use crate::layout::PackingSolution;
use crate::types::{Finish, ImposeError, ProductionMode, Result};
use chrono::{Datelike, Duration, Local, NaiveDate, NaiveDateTime, NaiveTime, Weekday};

/// Source of the current wall-clock time
pub trait Clock {
    fn now(&self) -> NaiveDateTime;
}

/// The machine's local clock
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// A clock pinned to one instant
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}

/// Opening and closing time of one day
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct WorkWindow {
    pub open: NaiveTime,
    pub close: NaiveTime,
}

impl WorkWindow {
    /// Window between two whole hours
    pub fn hours(open: u32, close: u32) -> Option<Self> {
        Some(Self {
            open: NaiveTime::from_hms_opt(open, 0, 0)?,
            close: NaiveTime::from_hms_opt(close, 0, 0)?,
        })
    }

    pub fn contains(&self, time: NaiveTime) -> bool {
        self.open <= time && time <= self.close
    }
}

/// Weekly operating hours; days without a window are closed
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize))]
pub struct WorkCalendar {
    /// Indexed by days from Monday
    windows: [Option<WorkWindow>; 7],
}

impl WorkCalendar {
    /// Build a calendar from per-day windows.
    ///
    /// At least one day must be open and every window must open before it
    /// closes.
    pub fn new(days: impl IntoIterator<Item = (Weekday, WorkWindow)>) -> Result<Self> {
        let mut windows = [None; 7];
        for (day, window) in days {
            if window.open >= window.close {
                return Err(ImposeError::Calendar(format!(
                    "{} opens at {} but closes at {}",
                    day, window.open, window.close
                )));
            }
            windows[day.num_days_from_monday() as usize] = Some(window);
        }
        if windows.iter().all(Option::is_none) {
            return Err(ImposeError::Calendar("no open days".to_string()));
        }
        Ok(Self { windows })
    }

    pub fn window(&self, day: Weekday) -> Option<WorkWindow> {
        self.windows[day.num_days_from_monday() as usize]
    }

    /// Whether the instant falls inside an open window (closing time included)
    pub fn is_open_at(&self, at: NaiveDateTime) -> bool {
        self.window(at.weekday())
            .is_some_and(|window| window.contains(at.time()))
    }

    /// Opening instant of the first open day strictly after `date`
    fn next_opening(&self, date: NaiveDate) -> Result<NaiveDateTime> {
        let mut day = date;
        for _ in 0..7 {
            day = day
                .succ_opt()
                .ok_or_else(|| ImposeError::Calendar("date out of range".to_string()))?;
            if let Some(window) = self.window(day.weekday()) {
                return Ok(day.and_time(window.open));
            }
        }
        Err(ImposeError::Calendar("no open days".to_string()))
    }
}

impl Default for WorkCalendar {
    /// Mon–Fri 09:00–18:00, Sat 10:00–15:00, Sun closed
    fn default() -> Self {
        let weekday = WorkWindow {
            open: NaiveTime::MIN + Duration::hours(9),
            close: NaiveTime::MIN + Duration::hours(18),
        };
        let saturday = WorkWindow {
            open: NaiveTime::MIN + Duration::hours(10),
            close: NaiveTime::MIN + Duration::hours(15),
        };
        let mut windows = [Some(weekday); 7];
        windows[Weekday::Sat.num_days_from_monday() as usize] = Some(saturday);
        windows[Weekday::Sun.num_days_from_monday() as usize] = None;
        Self { windows }
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for WorkCalendar {
    fn deserialize<D>(deserializer: D) -> std::result::Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        #[derive(serde::Deserialize)]
        struct Raw {
            windows: [Option<WorkWindow>; 7],
        }

        let raw = Raw::deserialize(deserializer)?;
        let days = (0..7u8).filter_map(|index| {
            let day = Weekday::try_from(index).ok()?;
            raw.windows[index as usize].map(|window| (day, window))
        });
        WorkCalendar::new(days).map_err(serde::de::Error::custom)
    }
}

/// How a production mode turns a packing solution into a delivery time
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ScheduleStrategy {
    /// Fixed minutes per sheet, plus finishing minutes per sheet when finished
    PerSheet {
        print_minutes: u32,
        finish_minutes: u32,
    },
    /// One rate for the first meters of film, another rate beyond them
    SteppedMeters {
        initial_meters: f64,
        initial_minutes_per_meter: f64,
        extra_minutes_per_meter: f64,
    },
    /// Delivered at a fixed weekly slot, pushed a week at or after the cutoff
    WeeklyBatch {
        slot_day: Weekday,
        slot_hour: u32,
        cutoff_day: Weekday,
        cutoff_hour: u32,
    },
}

/// Minutes of production needed, floored at the shop minimum.
///
/// Returns `None` for batch-delivered modes and for infeasible solutions.
pub fn production_minutes(
    mode: ProductionMode,
    solution: &PackingSolution,
    finish: Finish,
) -> Option<u32> {
    if !solution.is_feasible() {
        return None;
    }

    let minutes = match mode.profile().schedule {
        ScheduleStrategy::PerSheet {
            print_minutes,
            finish_minutes,
        } => {
            let per_sheet = if finish == Finish::None {
                print_minutes
            } else {
                print_minutes + finish_minutes
            };
            solution.total_units.saturating_mul(per_sheet)
        }
        ScheduleStrategy::SteppedMeters {
            initial_meters,
            initial_minutes_per_meter,
            extra_minutes_per_meter,
        } => {
            let meters = solution.linear_meters().unwrap_or(0.0);
            let initial = meters.min(initial_meters);
            let extra = (meters - initial_meters).max(0.0);
            let minutes = initial * initial_minutes_per_meter + extra * extra_minutes_per_meter;
            crate::constants::ceil_tolerant(minutes) as u32
        }
        ScheduleStrategy::WeeklyBatch { .. } => return None,
    };

    Some(minutes.max(MINIMUM_PRODUCTION_MINUTES))
}

/// Advance from `start` through the calendar until `minutes` of work are done.
pub fn schedule_delivery(
    calendar: &WorkCalendar,
    start: NaiveDateTime,
    minutes: u32,
) -> Result<NaiveDateTime> {
    let mut cursor = start;
    let mut remaining = Duration::minutes(minutes as i64);

    loop {
        let window = match calendar.window(cursor.weekday()) {
            Some(window) if cursor.time() < window.close => window,
            _ => {
                cursor = calendar.next_opening(cursor.date())?;
                continue;
            }
        };

        if cursor.time() < window.open {
            cursor = cursor.date().and_time(window.open);
        }

        let closing = cursor.date().and_time(window.close);
        let available = closing - cursor;
        if remaining <= available {
            return Ok(cursor + remaining);
        }

        log::debug!(
            "consumed {} min on {}, {} min left",
            available.num_minutes(),
            cursor.date(),
            (remaining - available).num_minutes()
        );
        remaining -= available;
        cursor = calendar.next_opening(cursor.date())?;
    }
}

/// The weekly batch slot that an order placed at `now` is assigned to.
///
/// Slots and cutoffs are counted within the Monday-based week of `now`.
pub fn batch_slot(
    now: NaiveDateTime,
    slot_day: Weekday,
    slot_hour: u32,
    cutoff_day: Weekday,
    cutoff_hour: u32,
) -> Result<NaiveDateTime> {
    let week_start = now.date() - Duration::days(now.weekday().num_days_from_monday() as i64);
    let at = |day: Weekday, hour: u32| -> Result<NaiveDateTime> {
        let time = NaiveTime::from_hms_opt(hour, 0, 0)
            .ok_or_else(|| ImposeError::Calendar(format!("invalid hour {}", hour)))?;
        Ok((week_start + Duration::days(day.num_days_from_monday() as i64)).and_time(time))
    };

    let slot = at(slot_day, slot_hour)?;
    let cutoff = at(cutoff_day, cutoff_hour)?;
    if now >= cutoff {
        Ok(slot + Duration::weeks(1))
    } else {
        Ok(slot)
    }
}

/// Delivery time for a solution, or `None` when it cannot be produced.
pub fn delivery_for(
    mode: ProductionMode,
    solution: &PackingSolution,
    finish: Finish,
    calendar: &WorkCalendar,
    clock: &dyn Clock,
) -> Result<Option<NaiveDateTime>> {
    if !solution.is_feasible() {
        return Ok(None);
    }

    let now = clock.now();
    match mode.profile().schedule {
        ScheduleStrategy::WeeklyBatch {
            slot_day,
            slot_hour,
            cutoff_day,
            cutoff_hour,
        } => batch_slot(now, slot_day, slot_hour, cutoff_day, cutoff_hour).map(Some),
        _ => match production_minutes(mode, solution, finish) {
            Some(minutes) => schedule_delivery(calendar, now, minutes).map(Some),
            None => Ok(None),
        },
    }
}
