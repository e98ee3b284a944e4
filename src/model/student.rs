// Student record types and schema validation

use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use uuid::Uuid;

use super::grade::Grade;

/// Youngest accepted age (inclusive)
pub const MIN_AGE: u8 = 9;
/// Oldest accepted age (inclusive)
pub const MAX_AGE: u8 = 18;

/// System-generated student identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StudentId(Uuid);

impl StudentId {
    /// Generate a fresh random identifier
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }

    /// Parse an identifier from a path segment.
    /// Returns `None` for anything that is not a UUID.
    pub fn parse(raw: &str) -> Option<Self> {
        Uuid::parse_str(raw).ok().map(Self)
    }
}

impl fmt::Display for StudentId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.0.hyphenated().fmt(f)
    }
}

/// A stored student document
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Student {
    pub id: StudentId,
    pub name: String,
    pub age: u8,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub grade: Option<Grade>,
}

impl Student {
    /// Build a stored record from a validated candidate
    pub fn new(id: StudentId, new: NewStudent) -> Self {
        Self {
            id,
            name: new.name,
            age: new.age,
            grade: new.grade,
        }
    }

    /// Merge the supplied fields of a patch into this record
    pub fn apply(&mut self, patch: StudentPatch) {
        if let Some(name) = patch.name {
            self.name = name;
        }
        if let Some(age) = patch.age {
            self.age = age;
        }
        if let Some(grade) = patch.grade {
            self.grade = grade;
        }
    }
}

/// A validated candidate for insertion
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewStudent {
    pub name: String,
    pub age: u8,
    pub grade: Option<Grade>,
}

/// A validated partial update; `None` leaves the field unchanged
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StudentPatch {
    pub name: Option<String>,
    pub age: Option<u8>,
    /// `Some(None)` clears the grade
    pub grade: Option<Option<Grade>>,
}

impl StudentPatch {
    pub const fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none() && self.grade.is_none()
    }
}

/// Raw age as submitted: a JSON number or a form string
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum AgeValue {
    Integer(i64),
    Float(f64),
    Text(String),
}

impl AgeValue {
    fn is_blank(&self) -> bool {
        matches!(self, Self::Text(t) if t.trim().is_empty())
    }

    fn to_integer(&self) -> Option<i64> {
        match self {
            Self::Integer(n) => Some(*n),
            #[allow(clippy::cast_possible_truncation)]
            Self::Float(f) if f.fract() == 0.0 && f.is_finite() => Some(*f as i64),
            Self::Float(_) => None,
            Self::Text(t) => t.trim().parse().ok(),
        }
    }
}

impl fmt::Display for AgeValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Integer(n) => n.fmt(f),
            Self::Float(x) => x.fmt(f),
            Self::Text(t) => f.write_str(t),
        }
    }
}

/// Untrusted student fields decoded from a form or JSON body
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct StudentInput {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub age: Option<AgeValue>,
    /// Absent means untouched; blank or JSON `null` clears the grade
    #[serde(default, deserialize_with = "null_as_blank")]
    pub grade: Option<String>,
}

fn null_as_blank<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Some(Option::<String>::deserialize(deserializer)?.unwrap_or_default()))
}

impl From<&Student> for StudentInput {
    fn from(student: &Student) -> Self {
        Self {
            name: Some(student.name.clone()),
            age: Some(AgeValue::Integer(i64::from(student.age))),
            grade: student.grade.map(|g| g.as_str().to_string()),
        }
    }
}

impl StudentInput {
    /// Validate a complete record for insertion, reporting every violation
    pub fn validate(&self) -> Result<NewStudent, ValidationErrors> {
        let mut errors = ValidationErrors::default();

        let name = match self.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => Some(name.to_string()),
            _ => {
                errors.push("name", "name is required");
                None
            }
        };

        let age = match &self.age {
            Some(value) if !value.is_blank() => match check_age(value) {
                Ok(age) => Some(age),
                Err(err) => {
                    errors.add(err);
                    None
                }
            },
            _ => {
                errors.push("age", "age is required");
                None
            }
        };

        let grade = match check_grade(self.grade.as_deref()) {
            Ok(grade) => grade,
            Err(err) => {
                errors.add(err);
                None
            }
        };

        match (name, age) {
            (Some(name), Some(age)) if errors.is_empty() => Ok(NewStudent { name, age, grade }),
            _ => Err(errors),
        }
    }

    /// Validate only the supplied fields for a partial update
    pub fn validate_patch(&self) -> Result<StudentPatch, ValidationErrors> {
        let mut errors = ValidationErrors::default();
        let mut patch = StudentPatch::default();

        if let Some(name) = self.name.as_deref().map(str::trim) {
            if name.is_empty() {
                errors.push("name", "name is required");
            } else {
                patch.name = Some(name.to_string());
            }
        }

        if let Some(value) = &self.age {
            if value.is_blank() {
                errors.push("age", "age is required");
            } else {
                match check_age(value) {
                    Ok(age) => patch.age = Some(age),
                    Err(err) => errors.add(err),
                }
            }
        }

        if self.grade.is_some() {
            match check_grade(self.grade.as_deref()) {
                Ok(grade) => patch.grade = Some(grade),
                Err(err) => errors.add(err),
            }
        }

        if errors.is_empty() {
            Ok(patch)
        } else {
            Err(errors)
        }
    }
}

fn check_age(value: &AgeValue) -> Result<u8, FieldError> {
    let Some(age) = value.to_integer() else {
        return Err(FieldError::new("age", "age must be a whole number"));
    };
    u8::try_from(age)
        .ok()
        .filter(|a| (MIN_AGE..=MAX_AGE).contains(a))
        .ok_or_else(|| {
            FieldError::new(
                "age",
                format!("age must be between {MIN_AGE} and {MAX_AGE}"),
            )
        })
}

/// Blank or absent grades mean "no grade"
fn check_grade(raw: Option<&str>) -> Result<Option<Grade>, FieldError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(label) => label.parse().map(Some).map_err(|_| {
            let allowed = Grade::ALL.map(Grade::as_str).join(", ");
            FieldError::new("grade", format!("grade must be one of {allowed}"))
        }),
    }
}

/// A single schema violation
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        Self {
            field,
            message: message.into(),
        }
    }
}

/// All schema violations found in one candidate record
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValidationErrors(Vec<FieldError>);

impl ValidationErrors {
    fn push(&mut self, field: &'static str, message: impl Into<String>) {
        self.0.push(FieldError::new(field, message));
    }

    fn add(&mut self, error: FieldError) {
        self.0.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.0.iter()
    }

    /// Whether a particular field has a violation
    pub fn has(&self, field: &str) -> bool {
        self.0.iter().any(|e| e.field == field)
    }
}

impl fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let messages: Vec<&str> = self.0.iter().map(|e| e.message.as_str()).collect();
        f.write_str(&messages.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

#[cfg(test)]
mod tests {
    use super::*;

    fn input(name: Option<&str>, age: Option<AgeValue>, grade: Option<&str>) -> StudentInput {
        StudentInput {
            name: name.map(String::from),
            age,
            grade: grade.map(String::from),
        }
    }

    #[test]
    fn test_validate_accepts_valid_record() {
        let new = input(Some("Alice"), Some(AgeValue::Integer(12)), Some("A"))
            .validate()
            .unwrap();
        assert_eq!(new.name, "Alice");
        assert_eq!(new.age, 12);
        assert_eq!(new.grade, Some(Grade::A));
    }

    #[test]
    fn test_validate_age_bounds_are_inclusive() {
        for age in [9, 18] {
            assert!(input(Some("Kid"), Some(AgeValue::Integer(age)), None)
                .validate()
                .is_ok());
        }
        for age in [8, 19, 25, -1] {
            let errors = input(Some("Kid"), Some(AgeValue::Integer(age)), None)
                .validate()
                .unwrap_err();
            assert!(errors.has("age"));
        }
    }

    #[test]
    fn test_validate_form_strings() {
        let new = input(Some("  Bea "), Some(AgeValue::Text(" 15 ".into())), Some(""))
            .validate()
            .unwrap();
        assert_eq!(new.name, "Bea");
        assert_eq!(new.age, 15);
        assert_eq!(new.grade, None);

        let errors = input(Some("Bea"), Some(AgeValue::Text("fifteen".into())), None)
            .validate()
            .unwrap_err();
        assert_eq!(errors.to_string(), "age must be a whole number");
    }

    #[test]
    fn test_validate_float_ages() {
        assert!(input(Some("C"), Some(AgeValue::Float(10.0)), None)
            .validate()
            .is_ok());
        let errors = input(Some("C"), Some(AgeValue::Float(10.5)), None)
            .validate()
            .unwrap_err();
        assert!(errors.has("age"));
    }

    #[test]
    fn test_validate_reports_every_violation() {
        let errors = input(Some("   "), None, Some("Z")).validate().unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("age"));
        assert!(errors.has("grade"));
        assert_eq!(errors.iter().count(), 3);
    }

    #[test]
    fn test_validate_rejects_unknown_grade() {
        let errors = input(Some("Dan"), Some(AgeValue::Integer(10)), Some("D"))
            .validate()
            .unwrap_err();
        assert_eq!(
            errors.to_string(),
            "grade must be one of A+, A, B+, B, C+, C, F"
        );
    }

    #[test]
    fn test_validate_patch_only_supplied_fields() {
        let patch = input(None, Some(AgeValue::Integer(11)), None)
            .validate_patch()
            .unwrap();
        assert_eq!(
            patch,
            StudentPatch {
                name: None,
                age: Some(11),
                grade: None
            }
        );
        assert!(StudentInput::default().validate_patch().unwrap().is_empty());
    }

    #[test]
    fn test_validate_patch_blank_grade_clears() {
        let patch = input(None, None, Some("")).validate_patch().unwrap();
        assert_eq!(patch.grade, Some(None));
    }

    #[test]
    fn test_validate_patch_rejects_blank_name_and_bad_age() {
        let errors = input(Some(""), Some(AgeValue::Integer(30)), None)
            .validate_patch()
            .unwrap_err();
        assert!(errors.has("name"));
        assert!(errors.has("age"));
    }

    #[test]
    fn test_apply_patch() {
        let mut student = Student::new(
            StudentId::generate(),
            NewStudent {
                name: "Eve".into(),
                age: 13,
                grade: Some(Grade::B),
            },
        );
        student.apply(StudentPatch {
            name: None,
            age: Some(14),
            grade: Some(None),
        });
        assert_eq!(student.name, "Eve");
        assert_eq!(student.age, 14);
        assert_eq!(student.grade, None);
    }

    #[test]
    fn test_student_id_parse() {
        let id = StudentId::generate();
        assert_eq!(StudentId::parse(&id.to_string()), Some(id));
        assert_eq!(StudentId::parse("add"), None);
        assert_eq!(StudentId::parse(""), None);
    }

    #[test]
    fn test_input_from_json_and_form() {
        let json: StudentInput =
            serde_json::from_str(r#"{"name":"Alice","age":12,"grade":"A"}"#).unwrap();
        assert_eq!(json.age, Some(AgeValue::Integer(12)));

        let form: StudentInput = serde_urlencoded::from_str("name=Alice&age=12&grade=A%2B").unwrap();
        assert_eq!(form.age, Some(AgeValue::Text("12".into())));
        assert_eq!(form.grade.as_deref(), Some("A+"));
    }

    #[test]
    fn test_json_null_grade_clears_like_blank_form() {
        let json: StudentInput = serde_json::from_str(r#"{"grade":null}"#).unwrap();
        let form: StudentInput = serde_urlencoded::from_str("grade=").unwrap();
        assert_eq!(json.grade.as_deref(), Some(""));
        assert_eq!(json, form);
        assert_eq!(json.validate_patch().unwrap().grade, Some(None));

        let absent: StudentInput = serde_json::from_str(r#"{"age":12}"#).unwrap();
        assert_eq!(absent.grade, None);
        assert_eq!(absent.validate_patch().unwrap().grade, None);
    }
}
