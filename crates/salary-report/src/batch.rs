//! Batch request files.
//!
//! Columns: `role,level,years_experience,location,skills,description`.
//! Skills are `;`-separated; `skills` and `description` may be empty or
//! missing entirely.

use std::path::Path;

use salary_model::PredictionInput;
use serde::Deserialize;

use crate::error::ReportError;
use crate::rows::SKILL_SEPARATOR;

#[derive(Debug, Deserialize)]
struct BatchRecord {
    role: String,
    level: String,
    years_experience: f64,
    location: String,
    #[serde(default)]
    skills: Option<String>,
    #[serde(default)]
    description: Option<String>,
}

impl From<BatchRecord> for PredictionInput {
    fn from(record: BatchRecord) -> Self {
        let skills = record
            .skills
            .as_deref()
            .unwrap_or_default()
            .split(SKILL_SEPARATOR)
            .map(str::trim)
            .filter(|skill| !skill.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        let input = PredictionInput::new(
            record.role,
            record.level,
            record.years_experience,
            record.location,
        )
        .with_skills(skills);
        match record.description {
            Some(description) => input.with_description(description),
            None => input,
        }
    }
}

pub fn read_batch_csv(path: &Path) -> Result<Vec<PredictionInput>, ReportError> {
    let file = std::fs::File::open(path).map_err(|e| ReportError::io(path, e))?;
    read_batch(path, file)
}

fn read_batch(
    path: &Path,
    reader: impl std::io::Read,
) -> Result<Vec<PredictionInput>, ReportError> {
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(true)
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let mut inputs = Vec::new();
    for (idx, record) in reader.deserialize::<BatchRecord>().enumerate() {
        let record = record.map_err(|e| ReportError::InvalidRow {
            path: path.to_path_buf(),
            row: idx + 2,
            message: e.to_string(),
        })?;
        if !record.years_experience.is_finite() || record.years_experience < 0.0 {
            return Err(ReportError::InvalidRow {
                path: path.to_path_buf(),
                row: idx + 2,
                message: format!(
                    "years_experience must be a non-negative number (got {})",
                    record.years_experience
                ),
            });
        }
        inputs.push(record.into());
    }
    Ok(inputs)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn skills_split_on_semicolons() {
        let csv = "role,level,years_experience,location,skills,description\n\
                   SOC Analyst,Entry,1,REMOTE,siem; edr ;;security_plus,\n";
        let inputs = read_batch(Path::new("batch.csv"), csv.as_bytes()).unwrap();
        assert_eq!(inputs.len(), 1);
        let skills: Vec<&str> = inputs[0].skills.iter().map(String::as_str).collect();
        assert_eq!(skills, vec!["edr", "security_plus", "siem"]);
        assert!(inputs[0].description.is_none());
    }

    #[test]
    fn optional_columns_may_be_missing() {
        let csv = "role,level,years_experience,location\nGRC Analyst,Mid,3.5,OH\n";
        let inputs = read_batch(Path::new("batch.csv"), csv.as_bytes()).unwrap();
        assert_eq!(inputs[0].years_experience, 3.5);
        assert!(inputs[0].skills.is_empty());
    }

    #[test]
    fn negative_experience_is_rejected_with_row_number() {
        let csv = "role,level,years_experience,location\na,b,1,TX\nc,d,-2,TX\n";
        let err = read_batch(Path::new("batch.csv"), csv.as_bytes()).unwrap_err();
        assert!(err.to_string().contains("row 3"), "{err}");
    }

    #[test]
    fn non_numeric_experience_is_rejected() {
        let csv = "role,level,years_experience,location\na,b,lots,TX\n";
        assert!(read_batch(Path::new("batch.csv"), csv.as_bytes()).is_err());
    }
}
