use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;
use uuid::Uuid;

/// Date format used for applied dates in forms, imports and exports.
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Opaque identifier of an application.
///
/// Backed by a time-ordered UUID; `Uuid::now_v7` is monotonic within a process,
/// so two applications created in the same instant still get distinct ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ApplicationId(Uuid);

impl ApplicationId {
    pub(crate) fn generate() -> Self {
        Self(Uuid::now_v7())
    }
}

impl fmt::Display for ApplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for ApplicationId {
    type Err = uuid::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Uuid::parse_str(s).map(Self)
    }
}

/// Lowercases and folds spaces and underscores into dashes, so that
/// "Interview Scheduled", "interview_scheduled" and "interview-scheduled" compare equal.
fn normalize_label(s: &str) -> String {
    s.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum JobType {
    #[serde(rename = "Full-time")]
    FullTime,
    Internship,
    #[serde(rename = "Part-time")]
    PartTime,
    Contract,
}

impl JobType {
    pub const ALL: [JobType; 4] = [
        JobType::FullTime,
        JobType::Internship,
        JobType::PartTime,
        JobType::Contract,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            JobType::FullTime => "Full-time",
            JobType::Internship => "Internship",
            JobType::PartTime => "Part-time",
            JobType::Contract => "Contract",
        }
    }
}

impl fmt::Display for JobType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for JobType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        JobType::ALL
            .into_iter()
            .find(|t| normalize_label(t.label()) == wanted)
            .ok_or_else(|| format!("Unknown job type: {}", s))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Status {
    Applied,
    #[serde(rename = "Interview Scheduled")]
    InterviewScheduled,
    Rejected,
    Selected,
}

impl Status {
    pub const ALL: [Status; 4] = [
        Status::Applied,
        Status::InterviewScheduled,
        Status::Rejected,
        Status::Selected,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Status::Applied => "Applied",
            Status::InterviewScheduled => "Interview Scheduled",
            Status::Rejected => "Rejected",
            Status::Selected => "Selected",
        }
    }
}

impl fmt::Display for Status {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Status {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        Status::ALL
            .into_iter()
            .find(|st| normalize_label(st.label()) == wanted)
            .ok_or_else(|| format!("Unknown status: {}", s))
    }
}

/// The editable part of an application, fully populated and typed.
///
/// Updates always replace a whole `ApplicationFields`; there is no partial merge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplicationFields {
    pub company_name: String,
    pub job_title: String,
    pub job_type: JobType,
    pub status: Status,
    pub location: String,
    pub applied_date: NaiveDate,
    #[serde(default)]
    pub notes: String,
}

/// A stored job application: an immutable id plus its current fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Application {
    id: ApplicationId,
    #[serde(flatten)]
    fields: ApplicationFields,
}

impl Application {
    pub(crate) fn new(id: ApplicationId, fields: ApplicationFields) -> Self {
        Self { id, fields }
    }

    pub fn id(&self) -> ApplicationId {
        self.id
    }

    pub fn fields(&self) -> &ApplicationFields {
        &self.fields
    }

    pub(crate) fn replace_fields(&mut self, fields: ApplicationFields) {
        self.fields = fields;
    }
}

/// The fields of an application form, as named in forms and error maps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Field {
    CompanyName,
    JobTitle,
    JobType,
    Status,
    Location,
    AppliedDate,
    Notes,
}

impl Field {
    pub const ALL: [Field; 7] = [
        Field::CompanyName,
        Field::JobTitle,
        Field::JobType,
        Field::Status,
        Field::Location,
        Field::AppliedDate,
        Field::Notes,
    ];

    /// Form key, e.g. `companyName`.
    pub fn key(&self) -> &'static str {
        match self {
            Field::CompanyName => "companyName",
            Field::JobTitle => "jobTitle",
            Field::JobType => "jobType",
            Field::Status => "status",
            Field::Location => "location",
            Field::AppliedDate => "appliedDate",
            Field::Notes => "notes",
        }
    }

    /// Human label, e.g. `Company Name`.
    pub fn label(&self) -> &'static str {
        match self {
            Field::CompanyName => "Company Name",
            Field::JobTitle => "Job Title",
            Field::JobType => "Job Type",
            Field::Status => "Status",
            Field::Location => "Location",
            Field::AppliedDate => "Applied Date",
            Field::Notes => "Notes",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for Field {
    type Err = String;

    /// Accepts the form key (`companyName`), the label in any case and
    /// separator style (`company-name`), or a short alias (`company`, `title`,
    /// `type`, `date`).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_label(s);
        let alias = match wanted.as_str() {
            "company" => Some(Field::CompanyName),
            "title" => Some(Field::JobTitle),
            "type" => Some(Field::JobType),
            "date" => Some(Field::AppliedDate),
            _ => None,
        };
        if let Some(field) = alias {
            return Ok(field);
        }
        Field::ALL
            .into_iter()
            .find(|f| {
                normalize_label(f.label()) == wanted || f.key().eq_ignore_ascii_case(s.trim())
            })
            .ok_or_else(|| format!("Unknown field: {}", s))
    }
}

/// Raw candidate values for an application, as typed into a form.
///
/// Selects use `None` for the unselected sentinel and the applied date is kept
/// as text until validation turns the form into [`ApplicationFields`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ApplicationForm {
    pub company_name: String,
    pub job_title: String,
    #[serde(deserialize_with = "empty_as_none")]
    pub job_type: Option<JobType>,
    #[serde(deserialize_with = "empty_as_none")]
    pub status: Option<Status>,
    pub location: String,
    pub applied_date: String,
    pub notes: String,
}

impl ApplicationForm {
    /// Sets one field from its textual value.
    ///
    /// An unrecognised job type or status leaves that select unselected, which
    /// validation then reports as missing.
    pub fn set_field(&mut self, field: Field, value: &str) {
        match field {
            Field::CompanyName => self.company_name = value.to_string(),
            Field::JobTitle => self.job_title = value.to_string(),
            Field::JobType => self.job_type = value.parse().ok(),
            Field::Status => self.status = value.parse().ok(),
            Field::Location => self.location = value.to_string(),
            Field::AppliedDate => self.applied_date = value.to_string(),
            Field::Notes => self.notes = value.to_string(),
        }
    }

    /// Textual value of one field, empty for an unselected select.
    pub fn field_value(&self, field: Field) -> String {
        match field {
            Field::CompanyName => self.company_name.clone(),
            Field::JobTitle => self.job_title.clone(),
            Field::JobType => self.job_type.map(|t| t.to_string()).unwrap_or_default(),
            Field::Status => self.status.map(|s| s.to_string()).unwrap_or_default(),
            Field::Location => self.location.clone(),
            Field::AppliedDate => self.applied_date.clone(),
            Field::Notes => self.notes.clone(),
        }
    }
}

impl From<&ApplicationFields> for ApplicationForm {
    fn from(fields: &ApplicationFields) -> Self {
        Self {
            company_name: fields.company_name.clone(),
            job_title: fields.job_title.clone(),
            job_type: Some(fields.job_type),
            status: Some(fields.status),
            location: fields.location.clone(),
            applied_date: fields.applied_date.format(DATE_FORMAT).to_string(),
            notes: fields.notes.clone(),
        }
    }
}

fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr<Err = String>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw {
        Some(s) if !s.trim().is_empty() => s.parse().map(Some).map_err(serde::de::Error::custom),
        _ => Ok(None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn job_type_parses_labels_loosely() {
        assert_eq!("Full-time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("full time".parse::<JobType>().unwrap(), JobType::FullTime);
        assert_eq!("PART_TIME".parse::<JobType>().unwrap(), JobType::PartTime);
        assert!("freelance".parse::<JobType>().is_err());
    }

    #[test]
    fn status_parses_labels_loosely() {
        assert_eq!(
            "interview-scheduled".parse::<Status>().unwrap(),
            Status::InterviewScheduled
        );
        assert_eq!(
            "Interview Scheduled".parse::<Status>().unwrap(),
            Status::InterviewScheduled
        );
        assert!("".parse::<Status>().is_err());
    }

    #[test]
    fn field_accepts_keys_labels_and_aliases() {
        assert_eq!("companyName".parse::<Field>().unwrap(), Field::CompanyName);
        assert_eq!("company-name".parse::<Field>().unwrap(), Field::CompanyName);
        assert_eq!("company".parse::<Field>().unwrap(), Field::CompanyName);
        assert_eq!("appliedDate".parse::<Field>().unwrap(), Field::AppliedDate);
        assert_eq!("date".parse::<Field>().unwrap(), Field::AppliedDate);
        assert!("salary".parse::<Field>().is_err());
    }

    #[test]
    fn form_json_treats_empty_selects_as_unselected() {
        let json = r#"{"companyName":"Acme","jobType":"","status":"Rejected"}"#;
        let form: ApplicationForm = serde_json::from_str(json).unwrap();
        assert_eq!(form.company_name, "Acme");
        assert_eq!(form.job_type, None);
        assert_eq!(form.status, Some(Status::Rejected));
        assert_eq!(form.applied_date, "");
    }

    #[test]
    fn form_json_rejects_unknown_select_values() {
        let json = r#"{"jobType":"Gig"}"#;
        assert!(serde_json::from_str::<ApplicationForm>(json).is_err());
    }

    #[test]
    fn application_serializes_flat_with_labels() {
        let app = Application::new(
            ApplicationId::generate(),
            ApplicationFields {
                company_name: "Acme".into(),
                job_title: "Engineer".into(),
                job_type: JobType::FullTime,
                status: Status::InterviewScheduled,
                location: "Remote".into(),
                applied_date: NaiveDate::from_ymd_opt(2024, 3, 9).unwrap(),
                notes: String::new(),
            },
        );
        let value = serde_json::to_value(&app).unwrap();
        assert_eq!(value["companyName"], "Acme");
        assert_eq!(value["jobType"], "Full-time");
        assert_eq!(value["status"], "Interview Scheduled");
        assert_eq!(value["appliedDate"], "2024-03-09");
        assert_eq!(value["id"], app.id().to_string());
    }

    #[test]
    fn set_field_with_unknown_select_clears_it() {
        let mut form = ApplicationForm {
            job_type: Some(JobType::Contract),
            ..Default::default()
        };
        form.set_field(Field::JobType, "gig");
        assert_eq!(form.job_type, None);
        form.set_field(Field::JobType, "internship");
        assert_eq!(form.job_type, Some(JobType::Internship));
    }
}
