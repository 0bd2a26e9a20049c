use serde::{Deserialize, Serialize};

/// Calendar month a transition rule fires in
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Month {
    January,
    February,
    March,
    April,
    May,
    June,
    July,
    August,
    September,
    October,
    November,
    December,
}

impl Month {
    /// Calendar constant name, e.g. `MARCH`
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::January => "JANUARY",
            Month::February => "FEBRUARY",
            Month::March => "MARCH",
            Month::April => "APRIL",
            Month::May => "MAY",
            Month::June => "JUNE",
            Month::July => "JULY",
            Month::August => "AUGUST",
            Month::September => "SEPTEMBER",
            Month::October => "OCTOBER",
            Month::November => "NOVEMBER",
            Month::December => "DECEMBER",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Weekday {
    Sunday,
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
}

impl Weekday {
    /// Calendar constant name, e.g. `SUNDAY`
    pub fn as_str(&self) -> &'static str {
        match self {
            Weekday::Sunday => "SUNDAY",
            Weekday::Monday => "MONDAY",
            Weekday::Tuesday => "TUESDAY",
            Weekday::Wednesday => "WEDNESDAY",
            Weekday::Thursday => "THURSDAY",
            Weekday::Friday => "FRIDAY",
            Weekday::Saturday => "SATURDAY",
        }
    }
}

/// Day selector of a rule's `ON` field
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RuleDay {
    /// Fixed day of month (`15`)
    Exact(u8),
    /// Last given weekday of the month (`lastSun`)
    Last(Weekday),
    /// First given weekday on or after a day (`Sun>=8`)
    OnOrAfter { weekday: Weekday, day: u8 },
    /// Last given weekday on or before a day (`Sun<=25`)
    OnOrBefore { weekday: Weekday, day: u8 },
}

/// Which clock a rule's `AT` time is measured against
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TimeType {
    #[default]
    Wall,
    Standard,
    Utc,
}

impl TimeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeType::Wall => "WALL_TIME",
            TimeType::Standard => "STANDARD_TIME",
            TimeType::Utc => "UTC_TIME",
        }
    }
}

/// Time of day a transition happens at
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleTime {
    /// Seconds since local midnight
    pub seconds: i32,
    #[serde(default)]
    pub kind: TimeType,
}

/// A single daylight-saving transition rule
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RuleRec {
    pub month: Month,
    pub day: RuleDay,
    pub time: RuleTime,
    /// Offset delta in seconds while the rule is in effect
    pub save: i32,
    /// Source line from the rule database
    pub line: String,
}

/// The two rules most recently in effect for a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RulePair {
    pub start: RuleRec,
    pub end: RuleRec,
}

/// The final zone line of a zone
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZoneRec {
    pub line: String,
}

impl ZoneRec {
    pub fn new(line: impl Into<String>) -> Self {
        Self { line: line.into() }
    }
}

/// Fully parsed zone, as handed to a backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Timezone {
    pub name: String,
    /// Most recent standard offset from UTC, in seconds
    pub raw_offset: i32,
    #[serde(default)]
    pub last_rules: Option<RulePair>,
    pub last_zone_rec: ZoneRec,
}

impl Timezone {
    /// Zone without daylight saving
    pub fn fixed(name: impl Into<String>, raw_offset: i32, zone_line: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            raw_offset,
            last_rules: None,
            last_zone_rec: ZoneRec::new(zone_line),
        }
    }

    pub fn with_rules(mut self, start: RuleRec, end: RuleRec) -> Self {
        self.last_rules = Some(RulePair { start, end });
        self
    }
}
