//! Editable schedule drafts and the addresses of their fields.

use std::fmt;
use std::str::FromStr;

use crate::error::{DeskError, Result};
use crate::types::{Day, Lectures, ScheduleRecord, Subject, SubjectEntry, TimeSlot};

/// The five free-text fields of a schedule
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ScalarField {
    SchoolName,
    PrincipalName,
    VicePrincipalName,
    Standard,
    Division,
}

impl ScalarField {
    pub const ALL: [ScalarField; 5] = [
        ScalarField::SchoolName,
        ScalarField::PrincipalName,
        ScalarField::VicePrincipalName,
        ScalarField::Standard,
        ScalarField::Division,
    ];

    /// Wire name, also used in field paths and error messages
    pub fn key(self) -> &'static str {
        match self {
            ScalarField::SchoolName => "schoolName",
            ScalarField::PrincipalName => "principalName",
            ScalarField::VicePrincipalName => "vicePrincipalName",
            ScalarField::Standard => "standard",
            ScalarField::Division => "division",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            ScalarField::SchoolName => "School Name",
            ScalarField::PrincipalName => "Principal Name",
            ScalarField::VicePrincipalName => "Vice Principal Name",
            ScalarField::Standard => "Standard",
            ScalarField::Division => "Division",
        }
    }
}

/// Address of one editable value in a draft.
///
/// Textual form: `schoolName`, `subjects[0].name`,
/// `subjects[0].lectures.monday` (or `.lectures[0]`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FieldPath {
    Scalar(ScalarField),
    SubjectName(usize),
    Lecture { row: usize, day: Day },
}

impl FieldPath {
    pub fn row(&self) -> Option<usize> {
        match self {
            FieldPath::Scalar(_) => None,
            FieldPath::SubjectName(row) | FieldPath::Lecture { row, .. } => Some(*row),
        }
    }

    /// True for fields whose value comes from a fixed list
    pub fn is_enumerated(&self) -> bool {
        !matches!(self, FieldPath::Scalar(_))
    }

    /// Allowed values for enumerated fields, empty first
    pub fn choices(&self) -> Vec<&'static str> {
        let mut choices = vec![""];
        match self {
            FieldPath::Scalar(_) => return Vec::new(),
            FieldPath::SubjectName(_) => choices.extend(Subject::ALL.iter().map(|s| s.as_str())),
            FieldPath::Lecture { .. } => choices.extend(TimeSlot::ALL.iter().map(|t| t.as_str())),
        }
        choices
    }
}

impl fmt::Display for FieldPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FieldPath::Scalar(field) => write!(f, "{}", field.key()),
            FieldPath::SubjectName(row) => write!(f, "subjects[{row}].name"),
            FieldPath::Lecture { row, day } => {
                write!(f, "subjects[{row}].lectures.{}", day.to_string().to_lowercase())
            }
        }
    }
}

impl FromStr for FieldPath {
    type Err = DeskError;

    fn from_str(s: &str) -> Result<Self> {
        let path = s.trim();
        let invalid = || DeskError::validation("field", format!("unknown field path '{path}'"));

        if let Some(field) = ScalarField::ALL.into_iter().find(|f| f.key() == path) {
            return Ok(FieldPath::Scalar(field));
        }

        let rest = path.strip_prefix("subjects[").ok_or_else(invalid)?;
        let (index, rest) = rest.split_once(']').ok_or_else(invalid)?;
        let row: usize = index.trim().parse().map_err(|_| invalid())?;

        match rest {
            ".name" => Ok(FieldPath::SubjectName(row)),
            _ => {
                let day_text = rest
                    .strip_prefix(".lectures.")
                    .or_else(|| {
                        rest.strip_prefix(".lectures[")
                            .and_then(|r| r.strip_suffix(']'))
                    })
                    .ok_or_else(invalid)?;
                let day: Day = day_text.parse()?;
                Ok(FieldPath::Lecture { row, day })
            }
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubjectDraft {
    pub name: Option<Subject>,
    pub lectures: Lectures,
}

/// Uncommitted contents of the add and edit forms
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ScheduleDraft {
    pub school_name: String,
    pub principal_name: String,
    pub vice_principal_name: String,
    pub standard: String,
    pub division: String,
    pub subjects: Vec<SubjectDraft>,
}

impl ScheduleDraft {
    /// Empty draft with one blank subject row, as the add form opens
    pub fn new() -> Self {
        Self {
            subjects: vec![SubjectDraft::default()],
            ..Default::default()
        }
    }

    pub fn from_record(record: &ScheduleRecord) -> Self {
        Self {
            school_name: record.school_name.clone(),
            principal_name: record.principal_name.clone(),
            vice_principal_name: record.vice_principal_name.clone(),
            standard: record.standard.clone(),
            division: record.division.clone(),
            subjects: record
                .subjects
                .iter()
                .map(|entry| SubjectDraft {
                    name: entry.name,
                    lectures: entry.lectures,
                })
                .collect(),
        }
    }

    pub fn clear(&mut self) {
        *self = Self::new();
    }

    fn scalar(&self, field: ScalarField) -> &String {
        match field {
            ScalarField::SchoolName => &self.school_name,
            ScalarField::PrincipalName => &self.principal_name,
            ScalarField::VicePrincipalName => &self.vice_principal_name,
            ScalarField::Standard => &self.standard,
            ScalarField::Division => &self.division,
        }
    }

    fn scalar_mut(&mut self, field: ScalarField) -> &mut String {
        match field {
            ScalarField::SchoolName => &mut self.school_name,
            ScalarField::PrincipalName => &mut self.principal_name,
            ScalarField::VicePrincipalName => &mut self.vice_principal_name,
            ScalarField::Standard => &mut self.standard,
            ScalarField::Division => &mut self.division,
        }
    }

    /// Append a subject row with every lecture slot empty
    pub fn add_subject_row(&mut self) -> usize {
        self.subjects.push(SubjectDraft::default());
        self.subjects.len() - 1
    }

    pub fn remove_subject_row(&mut self, row: usize) -> Result<SubjectDraft> {
        if row >= self.subjects.len() {
            return Err(row_out_of_range(row, self.subjects.len()));
        }
        Ok(self.subjects.remove(row))
    }

    fn subject_mut(&mut self, row: usize) -> Result<&mut SubjectDraft> {
        let len = self.subjects.len();
        self.subjects
            .get_mut(row)
            .ok_or_else(|| row_out_of_range(row, len))
    }

    /// Set one field from text. Enumerated fields parse the text against
    /// their fixed list; an empty string clears them.
    pub fn set_field(&mut self, path: FieldPath, value: &str) -> Result<()> {
        match path {
            FieldPath::Scalar(field) => {
                *self.scalar_mut(field) = value.to_string();
            }
            FieldPath::SubjectName(row) => {
                let name = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse::<Subject>()?)
                };
                self.subject_mut(row)?.name = name;
            }
            FieldPath::Lecture { row, day } => {
                let slot = if value.trim().is_empty() {
                    None
                } else {
                    Some(value.parse::<TimeSlot>()?)
                };
                self.subject_mut(row)?.lectures.set(day, slot);
            }
        }
        Ok(())
    }

    pub fn field_value(&self, path: FieldPath) -> Option<String> {
        match path {
            FieldPath::Scalar(field) => Some(self.scalar(field).clone()),
            FieldPath::SubjectName(row) => self
                .subjects
                .get(row)
                .map(|subject| subject.name.map(|n| n.to_string()).unwrap_or_default()),
            FieldPath::Lecture { row, day } => self.subjects.get(row).map(|subject| {
                subject
                    .lectures
                    .get(day)
                    .map(|slot| slot.to_string())
                    .unwrap_or_default()
            }),
        }
    }

    /// Every field in form order: scalars, then each row's name and days
    pub fn fields(&self) -> Vec<FieldPath> {
        let mut fields: Vec<FieldPath> = ScalarField::ALL.into_iter().map(FieldPath::Scalar).collect();
        for row in 0..self.subjects.len() {
            fields.push(FieldPath::SubjectName(row));
            fields.extend(Day::ALL.into_iter().map(|day| FieldPath::Lecture { row, day }));
        }
        fields
    }

    /// Scalar fields must not be blank. The first offending field is reported.
    pub fn validate(&self) -> Result<()> {
        for field in ScalarField::ALL {
            if self.scalar(field).trim().is_empty() {
                return Err(DeskError::validation(
                    field.key(),
                    format!("{} is required", field.label()),
                ));
            }
        }
        Ok(())
    }

    /// Assemble a record; lecture slots are kept in day-of-week order
    pub fn to_record(&self, id: Option<String>) -> ScheduleRecord {
        ScheduleRecord {
            id,
            school_name: self.school_name.trim().to_string(),
            principal_name: self.principal_name.trim().to_string(),
            vice_principal_name: self.vice_principal_name.trim().to_string(),
            standard: self.standard.trim().to_string(),
            division: self.division.trim().to_string(),
            subjects: self
                .subjects
                .iter()
                .map(|subject| SubjectEntry {
                    name: subject.name,
                    lectures: subject.lectures,
                })
                .collect(),
        }
    }
}

fn row_out_of_range(row: usize, len: usize) -> DeskError {
    DeskError::validation(
        "subjects",
        format!("subject row {row} does not exist ({len} rows)"),
    )
}
