use std::fmt;
use std::str::FromStr;

use thiserror::Error;

const MINUTES_PER_DAY: u16 = 24 * 60;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("invalid time of day: {0:?}")]
pub struct ParseTimeError(pub String);

/// Wall-clock time with minute precision, stored as minutes since midnight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct TimeOfDay(u16);

impl TimeOfDay {
    pub const MIDNIGHT: TimeOfDay = TimeOfDay(0);

    pub fn new(hour: u8, minute: u8) -> Option<Self> {
        (hour < 24 && minute < 60).then(|| TimeOfDay(hour as u16 * 60 + minute as u16))
    }

    pub fn hour(self) -> u8 {
        (self.0 / 60) as u8
    }

    pub fn minute(self) -> u8 {
        (self.0 % 60) as u8
    }

    pub fn minutes_since_midnight(self) -> u16 {
        self.0
    }

    /// `None` once the result would pass the end of the day.
    pub fn checked_add_minutes(self, minutes: u16) -> Option<Self> {
        let total = self.0.checked_add(minutes)?;
        (total < MINUTES_PER_DAY).then_some(TimeOfDay(total))
    }

    /// Parse `HH:MM` or `HH:MM:SS`. Seconds are dropped.
    pub fn parse_24h(text: &str) -> Result<Self, ParseTimeError> {
        let err = || ParseTimeError(text.to_string());
        let mut parts = text.trim().split(':');
        let hour = parse_component(parts.next()).ok_or_else(err)?;
        let minute = parse_component(parts.next()).ok_or_else(err)?;
        if let Some(seconds) = parts.next() {
            parse_component(Some(seconds))
                .filter(|s| *s < 60)
                .ok_or_else(err)?;
        }
        if parts.next().is_some() {
            return Err(err());
        }
        TimeOfDay::new(hour, minute).ok_or_else(err)
    }

    /// Parse a 12-hour label such as `9:30 AM` or `12:00 PM`.
    pub fn parse_12h(text: &str) -> Result<Self, ParseTimeError> {
        let err = || ParseTimeError(text.to_string());
        let (clock, period) = text.trim().split_once(' ').ok_or_else(err)?;
        let (h, m) = clock.split_once(':').ok_or_else(err)?;
        let hour = parse_component(Some(h)).filter(|h| (1..=12).contains(h)).ok_or_else(err)?;
        let minute = parse_component(Some(m)).ok_or_else(err)?;
        let hour = match period.trim().to_ascii_uppercase().as_str() {
            "AM" if hour == 12 => 0,
            "AM" => hour,
            "PM" if hour == 12 => 12,
            "PM" => hour + 12,
            _ => return Err(err()),
        };
        TimeOfDay::new(hour, minute).ok_or_else(err)
    }

    /// `HH:MM`
    pub fn to_24h(self) -> String {
        format!("{:02}:{:02}", self.hour(), self.minute())
    }

    /// `h:MM AM|PM`
    pub fn to_12h(self) -> String {
        let period = if self.hour() >= 12 { "PM" } else { "AM" };
        let hour12 = match self.hour() % 12 {
            0 => 12,
            h => h,
        };
        format!("{}:{:02} {}", hour12, self.minute(), period)
    }
}

fn parse_component(part: Option<&str>) -> Option<u8> {
    let part = part?;
    if part.is_empty() || part.len() > 2 || !part.chars().all(|c| c.is_ascii_digit()) {
        return None;
    }
    part.parse().ok()
}

impl fmt::Display for TimeOfDay {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_24h())
    }
}

impl FromStr for TimeOfDay {
    type Err = ParseTimeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::parse_24h(s).or_else(|_| TimeOfDay::parse_12h(s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_24h_with_and_without_seconds() {
        assert_eq!(TimeOfDay::parse_24h("09:30").unwrap(), TimeOfDay::new(9, 30).unwrap());
        assert_eq!(TimeOfDay::parse_24h("17:05:59").unwrap(), TimeOfDay::new(17, 5).unwrap());
        assert!(TimeOfDay::parse_24h("24:00").is_err());
        assert!(TimeOfDay::parse_24h("9:60").is_err());
        assert!(TimeOfDay::parse_24h("09").is_err());
        assert!(TimeOfDay::parse_24h("09:00:00:00").is_err());
    }

    #[test]
    fn twelve_hour_labels() {
        assert_eq!(TimeOfDay::new(0, 0).unwrap().to_12h(), "12:00 AM");
        assert_eq!(TimeOfDay::new(9, 5).unwrap().to_12h(), "9:05 AM");
        assert_eq!(TimeOfDay::new(12, 30).unwrap().to_12h(), "12:30 PM");
        assert_eq!(TimeOfDay::new(23, 30).unwrap().to_12h(), "11:30 PM");
    }

    #[test]
    fn parses_12h_labels() {
        assert_eq!(TimeOfDay::parse_12h("12:00 AM").unwrap(), TimeOfDay::MIDNIGHT);
        assert_eq!(TimeOfDay::parse_12h("12:15 PM").unwrap().to_24h(), "12:15");
        assert_eq!(TimeOfDay::parse_12h("1:45 pm").unwrap().to_24h(), "13:45");
        assert!(TimeOfDay::parse_12h("13:00 PM").is_err());
        assert!(TimeOfDay::parse_12h("9:00").is_err());
    }

    #[test]
    fn label_round_trip_for_every_half_hour() {
        let mut t = Some(TimeOfDay::MIDNIGHT);
        while let Some(time) = t {
            assert_eq!(TimeOfDay::parse_12h(&time.to_12h()).unwrap(), time);
            t = time.checked_add_minutes(30);
        }
    }

    #[test]
    fn addition_stops_at_end_of_day() {
        let late = TimeOfDay::new(23, 45).unwrap();
        assert_eq!(late.checked_add_minutes(10), Some(TimeOfDay::new(23, 55).unwrap()));
        assert_eq!(late.checked_add_minutes(30), None);
    }

    #[test]
    fn from_str_accepts_either_form() {
        assert_eq!("14:00".parse::<TimeOfDay>().unwrap(), "2:00 PM".parse().unwrap());
    }
}
