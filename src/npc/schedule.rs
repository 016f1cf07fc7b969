//! Daily schedule - maps hour-of-day to a scheduled activity
//!
//! The schedule preempts everything: an in-progress multi-tick action is
//! simply abandoned when the hour rolls into a meal or sleep slot. Meals
//! take precedence over sleep when their hours collide.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScheduledActivity {
    Work,
    Meal,
    Sleep,
}

/// Hour-of-day to activity mapping
///
/// The sleep span may wrap midnight: `sleep_start > sleep_end` means
/// "from sleep_start through 23, then 0 through sleep_end".
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DailySchedule {
    pub meal_hours: Vec<u64>,
    pub sleep_start: u64,
    pub sleep_end: u64,
}

impl Default for DailySchedule {
    fn default() -> Self {
        Self {
            meal_hours: vec![8, 12, 18],
            sleep_start: 20,
            sleep_end: 7,
        }
    }
}

impl DailySchedule {
    pub fn activity_for_hour(&self, hour: u64) -> ScheduledActivity {
        let hour = hour % 24;
        if self.meal_hours.contains(&hour) {
            return ScheduledActivity::Meal;
        }
        let asleep = if self.sleep_start <= self.sleep_end {
            (self.sleep_start..=self.sleep_end).contains(&hour)
        } else {
            hour >= self.sleep_start || hour <= self.sleep_end
        };
        if asleep {
            ScheduledActivity::Sleep
        } else {
            ScheduledActivity::Work
        }
    }
}
