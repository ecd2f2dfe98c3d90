//! Per-client, time-of-day policy decisions over the precomputed group and
//! schedule tables.

use crate::category::Category;
use crate::config::Config;
use chrono::{DateTime, Datelike, Timelike, Utc};
use chrono_tz::Tz;
use std::collections::HashSet;

impl Config {
    /// The current instant in the configured timezone. Schedule windows are
    /// defined in local wall-clock time.
    pub fn local_now(&self) -> DateTime<Tz> {
        Utc::now().with_timezone(&self.system.tz())
    }

    /// Whether `category` is blocked for `client` at `now`.
    ///
    /// Groups block around the clock; schedules block only inside their
    /// windows, and only for clients that are members of a group the
    /// schedule applies to.
    pub fn is_category_blocked(&self, client: &str, category: Category, now: DateTime<Tz>) -> bool {
        let mut member_groups: HashSet<&str> = HashSet::new();
        for (name, group) in &self.groups {
            if !group.applies_to_client(client) {
                continue;
            }
            if group.blocks(category) {
                return true;
            }
            member_groups.insert(name.as_str());
        }

        let today = now.weekday();
        let minute = (now.hour() * 60 + now.minute()) as u16;

        for schedule in self.schedules.values() {
            if !schedule.blocks(category) {
                continue;
            }

            let applies = member_groups
                .iter()
                .any(|group| schedule.applies_to_group(group));
            if !applies {
                continue;
            }

            if schedule.matches_instant(today, minute) {
                return true;
            }
        }

        false
    }
}
