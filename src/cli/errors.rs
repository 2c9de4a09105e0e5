use crate::errors::{InvalidConfigError, SplitError};
use serde::Serialize;

#[derive(Debug, Serialize)]
pub struct ErrorEnvelope {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub did_you_mean: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub try_this: Option<String>,
}

pub fn envelope_for(error: &anyhow::Error) -> ErrorEnvelope {
    let message = error.to_string();

    let invalid = match error.downcast_ref::<SplitError>() {
        Some(SplitError::Load(_)) => {
            return ErrorEnvelope {
                code: "LOAD_ERROR".to_string(),
                message,
                did_you_mean: None,
                try_this: Some("check the workbook path and that it opens as .xlsx".to_string()),
            };
        }
        Some(SplitError::Write(_)) => {
            return ErrorEnvelope {
                code: "WRITE_ERROR".to_string(),
                message,
                did_you_mean: None,
                try_this: Some(
                    "check free space and write permission on the output directory".to_string(),
                ),
            };
        }
        Some(SplitError::InvalidConfig(inner)) => Some(inner),
        None => error.downcast_ref::<InvalidConfigError>(),
    };

    if let Some(invalid) = invalid {
        let (did_you_mean, try_this) = hint_for_field(invalid.field());
        return ErrorEnvelope {
            code: "INVALID_CONFIG".to_string(),
            message,
            did_you_mean,
            try_this,
        };
    }

    ErrorEnvelope {
        code: "COMMAND_FAILED".to_string(),
        message,
        did_you_mean: None,
        try_this: None,
    }
}

fn hint_for_field(field: Option<&'static str>) -> (Option<String>, Option<String>) {
    match field {
        Some("rows_per_file") => (None, Some("pass a positive count, for example `--rows 1000`".to_string())),
        Some("suffix_template") => (
            Some("{number}".to_string()),
            Some("use a plain name containing {number}, for example `--suffix part{number}`".to_string()),
        ),
        Some("source_path") => (
            Some("xlsx".to_string()),
            Some("save the workbook as .xlsx before splitting".to_string()),
        ),
        Some("output_dir") => (None, Some("create the output directory first".to_string())),
        _ => (None, None),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::errors::{LoadError, WriteError};

    #[test]
    fn split_errors_map_to_codes() {
        let load = anyhow::Error::from(SplitError::from(LoadError::new("a.xlsx", "missing")));
        assert_eq!(envelope_for(&load).code, "LOAD_ERROR");

        let write = anyhow::Error::from(SplitError::from(WriteError::new(
            2,
            "a_002.xlsx",
            "disk full".to_string(),
        )));
        assert_eq!(envelope_for(&write).code, "WRITE_ERROR");
    }

    #[test]
    fn bare_config_error_is_invalid_config() {
        let err = anyhow::Error::from(
            InvalidConfigError::new("bad suffix").with_field("suffix_template"),
        );
        let envelope = envelope_for(&err);
        assert_eq!(envelope.code, "INVALID_CONFIG");
        assert_eq!(envelope.did_you_mean.as_deref(), Some("{number}"));
    }

    #[test]
    fn anything_else_is_command_failed() {
        let err = anyhow::anyhow!("config file \"x.yaml\" does not exist");
        assert_eq!(envelope_for(&err).code, "COMMAND_FAILED");
    }
}
