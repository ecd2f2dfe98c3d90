use super::errors::ConfigError;
use crate::category::Category;
use chrono::Weekday;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Time-boxed category blocks applied to one or more groups.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleConfig {
    #[serde(default)]
    pub apply_to: Vec<String>,

    #[serde(default)]
    pub when: Vec<ScheduleWindow>,

    #[serde(default)]
    pub block: Vec<Category>,

    #[serde(skip)]
    apply_to_set: HashSet<String>,

    #[serde(skip)]
    block_set: HashSet<Category>,
}

impl ScheduleConfig {
    pub(super) fn precompute(&mut self) -> Result<(), ConfigError> {
        self.apply_to_set = self.apply_to.iter().cloned().collect();
        self.block_set = self.block.iter().copied().collect();
        for window in &mut self.when {
            window.precompute()?;
        }
        Ok(())
    }

    pub fn blocks(&self, category: Category) -> bool {
        self.block_set.contains(&category)
    }

    pub fn applies_to_group(&self, group: &str) -> bool {
        self.apply_to_set.contains(group)
    }

    /// True when any window covers the given local weekday and minute.
    pub fn matches_instant(&self, day: Weekday, minute: u16) -> bool {
        self.when
            .iter()
            .any(|window| window.applies_on(day) && window.matches_minute(minute))
    }
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct ScheduleWindow {
    /// Day names, e.g. `["mon", "tue"]`. Short and long forms accepted.
    #[serde(default)]
    pub days: Vec<String>,

    #[serde(default)]
    pub periods: Vec<SchedulePeriod>,

    #[serde(skip)]
    day_mask: u8,
}

impl ScheduleWindow {
    pub(super) fn precompute(&mut self) -> Result<(), ConfigError> {
        self.day_mask = 0;
        for day in &self.days {
            let weekday = parse_day(day)?;
            self.day_mask |= 1 << weekday.num_days_from_sunday();
        }
        for period in &mut self.periods {
            period.precompute()?;
        }
        Ok(())
    }

    pub fn applies_on(&self, day: Weekday) -> bool {
        self.day_mask & (1 << day.num_days_from_sunday()) != 0
    }

    pub fn matches_minute(&self, minute: u16) -> bool {
        self.periods.iter().any(|p| p.contains(minute))
    }
}

/// A `[start, end)` window in minutes of the local day. `end <= start`
/// means the period spans midnight.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct SchedulePeriod {
    /// `"HH:MM"`, 24-hour clock.
    pub start: String,
    pub end: String,

    #[serde(skip)]
    start_min: u16,

    #[serde(skip)]
    end_min: u16,
}

impl SchedulePeriod {
    pub(super) fn precompute(&mut self) -> Result<(), ConfigError> {
        self.start_min = parse_clock(&self.start)?;
        self.end_min = parse_clock(&self.end)?;
        if self.start_min == self.end_min {
            return Err(ConfigError::InvalidTime(format!(
                "start and end cannot be the same: {}",
                self.start
            )));
        }
        Ok(())
    }

    pub fn contains(&self, minute: u16) -> bool {
        if self.start_min < self.end_min {
            self.start_min <= minute && minute < self.end_min
        } else {
            minute >= self.start_min || minute < self.end_min
        }
    }

    pub fn bounds(&self) -> (u16, u16) {
        (self.start_min, self.end_min)
    }
}

fn parse_clock(value: &str) -> Result<u16, ConfigError> {
    let invalid = || ConfigError::InvalidTime(value.to_string());

    let (hours, minutes) = value.split_once(':').ok_or_else(invalid)?;
    let hours: u16 = hours.parse().map_err(|_| invalid())?;
    let minutes: u16 = minutes.parse().map_err(|_| invalid())?;
    if hours > 23 || minutes > 59 {
        return Err(invalid());
    }
    Ok(hours * 60 + minutes)
}

fn parse_day(day: &str) -> Result<Weekday, ConfigError> {
    match day.to_ascii_lowercase().as_str() {
        "sun" | "sunday" => Ok(Weekday::Sun),
        "mon" | "monday" => Ok(Weekday::Mon),
        "tue" | "tuesday" => Ok(Weekday::Tue),
        "wed" | "wednesday" => Ok(Weekday::Wed),
        "thu" | "thur" | "thursday" => Ok(Weekday::Thu),
        "fri" | "friday" => Ok(Weekday::Fri),
        "sat" | "saturday" => Ok(Weekday::Sat),
        _ => Err(ConfigError::InvalidDay(day.to_string())),
    }
}
