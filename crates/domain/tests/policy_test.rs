use chrono::{TimeZone, Weekday};
use chrono_tz::Tz;
use hearth_dns_domain::{Category, Config};

fn bedtime_config() -> Config {
    Config::from_toml(
        r#"
[system]
timezone = "Europe/Berlin"

[groups.kids]
devices = []
block = []

[groups.adults]
devices = ["office-pc"]
block = []

[schedules.bedtime]
apply_to = ["kids"]
block = ["social-media"]

[[schedules.bedtime.when]]
days = ["mon", "tue", "wed", "thu", "fri"]
periods = [{ start = "22:00", end = "06:00" }]
"#,
    )
    .expect("valid config")
}

fn berlin(config: &Config) -> Tz {
    config.system.tz()
}

#[test]
fn test_group_blocks_around_the_clock() {
    let config = Config::from_toml(
        r#"
[groups.all]
devices = []
block = ["ads", "malware"]
"#,
    )
    .expect("valid config");

    let now = berlin(&config)
        .with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
        .unwrap();
    assert!(config.is_category_blocked("any-client", Category::Ads, now));
    assert!(config.is_category_blocked("any-client", Category::Malware, now));
    assert!(!config.is_category_blocked("any-client", Category::Gaming, now));
}

#[test]
fn test_group_with_devices_only_covers_members() {
    let config = Config::from_toml(
        r#"
[groups.kids]
devices = ["tablet"]
block = ["gaming"]
"#,
    )
    .expect("valid config");

    let now = berlin(&config)
        .with_ymd_and_hms(2024, 1, 3, 12, 0, 0)
        .unwrap();
    assert!(config.is_category_blocked("tablet", Category::Gaming, now));
    assert!(!config.is_category_blocked("laptop", Category::Gaming, now));
}

#[test]
fn test_schedule_spanning_midnight() {
    let config = bedtime_config();
    let tz = berlin(&config);

    // Wednesday 2024-01-03, 23:30 local: inside the window.
    let late = tz.with_ymd_and_hms(2024, 1, 3, 23, 30, 0).unwrap();
    assert!(config.is_category_blocked("tablet", Category::SocialMedia, late));

    // Wednesday 06:30: past the end of the window.
    let morning = tz.with_ymd_and_hms(2024, 1, 3, 6, 30, 0).unwrap();
    assert!(!config.is_category_blocked("tablet", Category::SocialMedia, morning));

    // Saturday 23:30: the window only covers weekdays.
    let weekend = tz.with_ymd_and_hms(2024, 1, 6, 23, 30, 0).unwrap();
    assert!(!config.is_category_blocked("tablet", Category::SocialMedia, weekend));
}

#[test]
fn test_schedule_only_applies_to_listed_groups() {
    let config = Config::from_toml(
        r#"
[system]
timezone = "UTC"

[groups.kids]
devices = ["tablet"]

[groups.adults]
devices = ["office-pc"]

[schedules.homework]
apply_to = ["kids"]
block = ["gaming"]

[[schedules.homework.when]]
days = ["mon", "tue", "wed", "thu", "fri"]
periods = [{ start = "14:00", end = "18:00" }]
"#,
    )
    .expect("valid config");

    let tz = config.system.tz();
    let now = tz.with_ymd_and_hms(2024, 1, 3, 15, 0, 0).unwrap();
    assert!(config.is_category_blocked("tablet", Category::Gaming, now));
    assert!(!config.is_category_blocked("office-pc", Category::Gaming, now));
}

#[test]
fn test_within_day_period_is_closed_open() {
    let config = Config::from_toml(
        r#"
[groups.kids]
devices = []

[schedules.work]
apply_to = ["kids"]
block = ["gaming"]

[[schedules.work.when]]
days = ["wed"]
periods = [{ start = "09:00", end = "17:00" }]
"#,
    )
    .expect("valid config");

    let schedule = &config.schedules["work"];
    assert!(!schedule.matches_instant(Weekday::Wed, 8 * 60 + 59));
    assert!(schedule.matches_instant(Weekday::Wed, 9 * 60));
    assert!(schedule.matches_instant(Weekday::Wed, 16 * 60 + 59));
    assert!(!schedule.matches_instant(Weekday::Wed, 17 * 60));
    assert!(!schedule.matches_instant(Weekday::Thu, 12 * 60));
}

#[test]
fn test_midnight_spanning_period_covers_both_edges() {
    let config = bedtime_config();
    let schedule = &config.schedules["bedtime"];

    assert!(!schedule.matches_instant(Weekday::Wed, 21 * 60 + 59));
    assert!(schedule.matches_instant(Weekday::Wed, 22 * 60));
    assert!(schedule.matches_instant(Weekday::Wed, 23 * 60 + 59));
    assert!(schedule.matches_instant(Weekday::Wed, 0));
    assert!(schedule.matches_instant(Weekday::Wed, 5 * 60 + 59));
    assert!(!schedule.matches_instant(Weekday::Wed, 6 * 60));
}
