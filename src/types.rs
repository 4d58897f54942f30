//! Schedule records and the fixed vocabularies they are built from.

use serde::de::{self, Deserializer};
use serde::ser::Serializer;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::DeskError;

/// Number of lecture slots per subject, one per day of the week
pub const DAY_COUNT: usize = 7;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Day {
    Monday,
    Tuesday,
    Wednesday,
    Thursday,
    Friday,
    Saturday,
    Sunday,
}

impl Day {
    pub const ALL: [Day; DAY_COUNT] = [
        Day::Monday,
        Day::Tuesday,
        Day::Wednesday,
        Day::Thursday,
        Day::Friday,
        Day::Saturday,
        Day::Sunday,
    ];

    /// Position of this day in the lecture array
    pub fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<Day> {
        Self::ALL.get(index).copied()
    }

    pub fn short_name(self) -> &'static str {
        match self {
            Day::Monday => "Mon",
            Day::Tuesday => "Tue",
            Day::Wednesday => "Wed",
            Day::Thursday => "Thu",
            Day::Friday => "Fri",
            Day::Saturday => "Sat",
            Day::Sunday => "Sun",
        }
    }
}

impl fmt::Display for Day {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Day::Monday => "Monday",
            Day::Tuesday => "Tuesday",
            Day::Wednesday => "Wednesday",
            Day::Thursday => "Thursday",
            Day::Friday => "Friday",
            Day::Saturday => "Saturday",
            Day::Sunday => "Sunday",
        };
        write!(f, "{name}")
    }
}

impl FromStr for Day {
    type Err = DeskError;

    /// Accepts full names, three-letter abbreviations, or a 0-based index
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if let Ok(index) = trimmed.parse::<usize>() {
            return Day::from_index(index).ok_or_else(|| {
                DeskError::validation("day", format!("day index {index} is out of range 0-6"))
            });
        }

        let lower = trimmed.to_lowercase();
        Day::ALL
            .into_iter()
            .find(|day| {
                day.to_string().to_lowercase() == lower || day.short_name().to_lowercase() == lower
            })
            .ok_or_else(|| DeskError::validation("day", format!("unknown day '{trimmed}'")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Subject {
    English,
    Hindi,
    Marathi,
    Sanskrit,
    Mathematics,
    Science,
    History,
    Geography,
    ComputerScience,
    PhysicalEducation,
    Drawing,
}

impl Subject {
    pub const ALL: [Subject; 11] = [
        Subject::English,
        Subject::Hindi,
        Subject::Marathi,
        Subject::Sanskrit,
        Subject::Mathematics,
        Subject::Science,
        Subject::History,
        Subject::Geography,
        Subject::ComputerScience,
        Subject::PhysicalEducation,
        Subject::Drawing,
    ];

    /// Wire and display text
    pub fn as_str(self) -> &'static str {
        match self {
            Subject::English => "English",
            Subject::Hindi => "Hindi",
            Subject::Marathi => "Marathi",
            Subject::Sanskrit => "Sanskrit",
            Subject::Mathematics => "Mathematics",
            Subject::Science => "Science",
            Subject::History => "History",
            Subject::Geography => "Geography",
            Subject::ComputerScience => "Computer Science",
            Subject::PhysicalEducation => "Physical Education",
            Subject::Drawing => "Drawing",
        }
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Subject {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_lowercase();
        Subject::ALL
            .into_iter()
            .find(|subject| subject.as_str().to_lowercase() == wanted)
            .ok_or_else(|| DeskError::validation("subject", format!("unknown subject '{}'", s.trim())))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum TimeSlot {
    At0800,
    At0900,
    At1000,
    At1100,
    At1200,
    At1300,
    At1400,
    At1500,
}

impl TimeSlot {
    pub const ALL: [TimeSlot; 8] = [
        TimeSlot::At0800,
        TimeSlot::At0900,
        TimeSlot::At1000,
        TimeSlot::At1100,
        TimeSlot::At1200,
        TimeSlot::At1300,
        TimeSlot::At1400,
        TimeSlot::At1500,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TimeSlot::At0800 => "08:00 - 09:00",
            TimeSlot::At0900 => "09:00 - 10:00",
            TimeSlot::At1000 => "10:00 - 11:00",
            TimeSlot::At1100 => "11:00 - 12:00",
            TimeSlot::At1200 => "12:00 - 13:00",
            TimeSlot::At1300 => "13:00 - 14:00",
            TimeSlot::At1400 => "14:00 - 15:00",
            TimeSlot::At1500 => "15:00 - 16:00",
        }
    }
}

impl fmt::Display for TimeSlot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for TimeSlot {
    type Err = DeskError;

    /// Whitespace-insensitive: "08:00-09:00" and "08:00 - 09:00" are the same slot
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.chars().filter(|c| !c.is_whitespace()).collect();
        TimeSlot::ALL
            .into_iter()
            .find(|slot| {
                slot.as_str()
                    .chars()
                    .filter(|c| !c.is_whitespace())
                    .eq(compact.chars())
            })
            .ok_or_else(|| {
                DeskError::validation("lecture", format!("unknown time slot '{}'", s.trim()))
            })
    }
}

/// One optional time slot per day, indexed by [`Day::index`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Lectures([Option<TimeSlot>; DAY_COUNT]);

impl Lectures {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_slots(slots: [Option<TimeSlot>; DAY_COUNT]) -> Self {
        Self(slots)
    }

    pub fn get(&self, day: Day) -> Option<TimeSlot> {
        self.0[day.index()]
    }

    pub fn set(&mut self, day: Day, slot: Option<TimeSlot>) {
        self.0[day.index()] = slot;
    }

    pub fn slots(&self) -> &[Option<TimeSlot>; DAY_COUNT] {
        &self.0
    }

    pub fn iter(&self) -> impl Iterator<Item = (Day, Option<TimeSlot>)> + '_ {
        Day::ALL.into_iter().map(|day| (day, self.get(day)))
    }

    pub fn has_empty_slot(&self) -> bool {
        self.0.iter().any(Option::is_none)
    }

    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        DAY_COUNT
    }

    /// True when no day has a lecture
    pub fn is_blank(&self) -> bool {
        self.0.iter().all(Option::is_none)
    }
}

impl Serialize for Lectures {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_seq(self.0.iter().map(|slot| slot.map_or("", TimeSlot::as_str)))
    }
}

impl<'de> Deserialize<'de> for Lectures {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw: Vec<Option<String>> = Vec::deserialize(deserializer)?;
        if raw.len() > DAY_COUNT {
            return Err(de::Error::custom(format!(
                "expected at most {DAY_COUNT} lecture slots, got {}",
                raw.len()
            )));
        }

        let mut lectures = Lectures::empty();
        for (index, value) in raw.into_iter().enumerate() {
            let slot = match value.as_deref().map(str::trim) {
                None | Some("") => None,
                Some(text) => Some(text.parse::<TimeSlot>().map_err(de::Error::custom)?),
            };
            lectures.0[index] = slot;
        }
        Ok(lectures)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct SubjectEntry {
    #[serde(default, with = "subject_name")]
    pub name: Option<Subject>,
    #[serde(default)]
    pub lectures: Lectures,
}

/// Unset subject names travel as an empty string.
mod subject_name {
    use super::Subject;
    use serde::{Deserialize, Deserializer, Serializer, de};

    pub fn serialize<S: Serializer>(name: &Option<Subject>, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(name.map_or("", Subject::as_str))
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Subject>, D::Error> {
        let raw: Option<String> = Option::deserialize(deserializer)?;
        match raw.as_deref().map(str::trim) {
            None | Some("") => Ok(None),
            Some(text) => text.parse().map(Some).map_err(de::Error::custom),
        }
    }
}

/// A school's weekly timetable as stored by the schedule API.
///
/// `id` is absent on drafts. When reading, `_id` is accepted in place of
/// `id`, and numeric ids are turned into strings.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", from = "RawScheduleRecord")]
pub struct ScheduleRecord {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    pub school_name: String,
    pub principal_name: String,
    pub vice_principal_name: String,
    pub standard: String,
    pub division: String,
    pub subjects: Vec<SubjectEntry>,
}

impl ScheduleRecord {
    /// Same record with the identifier removed
    pub fn without_id(&self) -> Self {
        Self {
            id: None,
            ..self.clone()
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Short label used in prompts and toasts
    pub fn label(&self) -> String {
        format!("{} {}-{}", self.school_name, self.standard, self.division)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawId {
    Text(String),
    Number(i64),
}

impl From<RawId> for String {
    fn from(id: RawId) -> Self {
        match id {
            RawId::Text(text) => text,
            RawId::Number(n) => n.to_string(),
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RawScheduleRecord {
    #[serde(default)]
    id: Option<RawId>,
    #[serde(default, rename = "_id")]
    underscore_id: Option<RawId>,
    #[serde(default)]
    school_name: String,
    #[serde(default)]
    principal_name: String,
    #[serde(default)]
    vice_principal_name: String,
    #[serde(default)]
    standard: String,
    #[serde(default)]
    division: String,
    #[serde(default)]
    subjects: Vec<SubjectEntry>,
}

impl From<RawScheduleRecord> for ScheduleRecord {
    fn from(raw: RawScheduleRecord) -> Self {
        ScheduleRecord {
            id: raw.id.or(raw.underscore_id).map(String::from),
            school_name: raw.school_name,
            principal_name: raw.principal_name,
            vice_principal_name: raw.vice_principal_name,
            standard: raw.standard,
            division: raw.division,
            subjects: raw.subjects,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_day_from_str_variants() {
        assert_eq!("monday".parse::<Day>().unwrap(), Day::Monday);
        assert_eq!("Wed".parse::<Day>().unwrap(), Day::Wednesday);
        assert_eq!("6".parse::<Day>().unwrap(), Day::Sunday);
        assert!("7".parse::<Day>().is_err());
        assert!("funday".parse::<Day>().is_err());
    }

    #[test]
    fn test_time_slot_ignores_spacing() {
        assert_eq!("08:00-09:00".parse::<TimeSlot>().unwrap(), TimeSlot::At0800);
        assert_eq!(
            " 15:00 - 16:00 ".parse::<TimeSlot>().unwrap(),
            TimeSlot::At1500
        );
        assert!("07:00 - 08:00".parse::<TimeSlot>().is_err());
    }

    #[test]
    fn test_subject_case_insensitive() {
        assert_eq!(
            "computer science".parse::<Subject>().unwrap(),
            Subject::ComputerScience
        );
        assert!("Astrology".parse::<Subject>().is_err());
    }

    #[test]
    fn test_lectures_serialize_empty_as_blank_strings() {
        let mut lectures = Lectures::empty();
        lectures.set(Day::Tuesday, Some(TimeSlot::At0900));
        let json = serde_json::to_value(lectures).unwrap();
        assert_eq!(
            json,
            serde_json::json!(["", "09:00 - 10:00", "", "", "", "", ""])
        );
    }

    #[test]
    fn test_lectures_pad_short_arrays() {
        let lectures: Lectures = serde_json::from_str(r#"["08:00 - 09:00"]"#).unwrap();
        assert_eq!(lectures.len(), DAY_COUNT);
        assert_eq!(lectures.get(Day::Monday), Some(TimeSlot::At0800));
        assert_eq!(lectures.get(Day::Sunday), None);
        assert!(lectures.has_empty_slot());
    }

    #[test]
    fn test_lectures_reject_long_arrays_and_unknown_slots() {
        let eight = r#"["","","","","","","",""]"#;
        assert!(serde_json::from_str::<Lectures>(eight).is_err());
        assert!(serde_json::from_str::<Lectures>(r#"["25:00 - 26:00"]"#).is_err());
    }

    #[test]
    fn test_record_reads_underscore_id() {
        let json = r#"{
            "_id": "65f0c0ffee",
            "schoolName": "Sunrise High",
            "principalName": "A. Rao",
            "vicePrincipalName": "B. Shah",
            "standard": "8",
            "division": "B",
            "subjects": [{"name": "Science", "lectures": ["", "", "", "", "", "", ""]}],
            "createdAt": "2024-06-01T10:00:00Z"
        }"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("65f0c0ffee"));
        assert_eq!(record.subjects[0].name, Some(Subject::Science));
    }

    #[test]
    fn test_record_prefers_id_over_underscore_id() {
        let json = r#"{"id": 5, "_id": "mongo", "schoolName": "X"}"#;
        let record: ScheduleRecord = serde_json::from_str(json).unwrap();
        assert_eq!(record.id.as_deref(), Some("5"));
    }

    #[test]
    fn test_draft_serializes_without_id() {
        let record = ScheduleRecord {
            school_name: "Sunrise High".into(),
            subjects: vec![SubjectEntry::default()],
            ..Default::default()
        };
        let json = serde_json::to_value(&record).unwrap();
        assert!(json.get("id").is_none());
        assert_eq!(json["schoolName"], "Sunrise High");
        assert_eq!(json["subjects"][0]["name"], "");
        assert_eq!(json["subjects"][0]["lectures"].as_array().unwrap().len(), 7);
    }
}
