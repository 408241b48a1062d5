//! JSON I/O handling for CLI
//!
//! - Input: single JSON record via stdin
//! - Output: single JSON object via stdout
//! - UTF-8 only

use std::io::{self, Read, Write};

use serde_json::{json, Value};

use crate::planner::{ExplainPlan, PlannerError};
use crate::schema::SchemaError;

use super::errors::{CliError, CliResult};

/// Read a JSON record from stdin
pub fn read_request() -> CliResult<Value> {
    read_from(&mut io::stdin().lock())
}

/// Read a JSON record from any reader
pub fn read_from<R: Read>(reader: &mut R) -> CliResult<Value> {
    let mut input = String::new();
    reader.read_to_string(&mut input)?;

    if input.trim().is_empty() {
        return Err(CliError::io_error("Empty input"));
    }

    let value: Value = serde_json::from_str(&input)?;
    Ok(value)
}

/// Write a success response to stdout
pub fn write_response(data: Value) -> CliResult<()> {
    write_json(&mut io::stdout(), &ok_body(data))
}

/// Write the error response of a failed command to stdout.
///
/// Rejected records list every violation; failed plans carry the explain
/// output of the rejected index.
pub fn write_error(err: &CliError) -> CliResult<()> {
    write_json(&mut io::stdout(), &error_body(err))
}

fn ok_body(data: Value) -> Value {
    json!({
        "status": "ok",
        "data": data
    })
}

fn error_body(err: &CliError) -> Value {
    match err {
        CliError::Schema(e) => rejection_body(e),
        CliError::Plan(e) => plan_error_body(e),
        other => json!({
            "status": "error",
            "code": other.code_str(),
            "message": other.to_string()
        }),
    }
}

fn rejection_body(err: &SchemaError) -> Value {
    json!({
        "status": "error",
        "code": err.code().code(),
        "message": err.message(),
        "revision": err.revision(),
        "violations": err.violations(),
    })
}

fn plan_error_body(err: &PlannerError) -> Value {
    json!({
        "status": "error",
        "code": err.code().code(),
        "message": err.message(),
        "data": ExplainPlan::from_error(err).to_json()
    })
}

fn write_json<W: Write>(writer: &mut W, value: &Value) -> CliResult<()> {
    serde_json::to_writer(&mut *writer, value)?;
    writeln!(writer)?;
    writer.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::Violation;

    #[test]
    fn test_read_multiline_record() {
        let mut input = "{\n  \"price\": 12000,\n  \"currency\": \"USD\"\n}\n".as_bytes();
        let value = read_from(&mut input).unwrap();
        assert_eq!(value["price"], 12000);
    }

    #[test]
    fn test_read_empty_input() {
        let mut input = "   \n".as_bytes();
        assert!(matches!(read_from(&mut input), Err(CliError::Io(_))));
    }

    #[test]
    fn test_read_invalid_json() {
        let mut input = "{price".as_bytes();
        assert!(matches!(read_from(&mut input), Err(CliError::Json(_))));
    }

    #[test]
    fn test_rejection_body_lists_violations() {
        let err = SchemaError::validation_failed("v3", vec![Violation::missing_field("price")]);
        let body = rejection_body(&err);
        assert_eq!(body["code"], "VEHICLE_VALIDATION_FAILED");
        assert_eq!(body["violations"][0]["field"], "price");
        assert_eq!(body["violations"][0]["code"], "MissingField");
    }

    #[test]
    fn test_plan_error_body_explains_rejection() {
        let err = PlannerError::leading_not_searchable("images_1_createdAt_1__id_1", "images");
        let body = plan_error_body(&err);
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], err.code().code());
        assert_eq!(body["data"]["accepted"], false);
        assert_eq!(body["data"]["rejected_index"], "images_1_createdAt_1__id_1");
    }

    #[test]
    fn test_error_body_for_config_error() {
        let body = error_body(&CliError::config_error("missing file"));
        assert_eq!(body["status"], "error");
        assert_eq!(body["code"], "VEHICLE_CLI_CONFIG_ERROR");
        assert!(body["message"].as_str().unwrap().contains("missing file"));
    }

    #[test]
    fn test_error_body_dispatches_on_source() {
        let err = SchemaError::validation_failed("v2", vec![Violation::missing_field("price")]);
        let body = error_body(&CliError::Schema(err));
        assert_eq!(body["violations"][0]["field"], "price");

        let err = PlannerError::missing_tiebreak("price_1", Some("price"));
        let body = error_body(&CliError::Plan(err));
        assert_eq!(body["data"]["rejection_code"], body["code"]);
    }

    #[test]
    fn test_write_one_line() {
        let mut out = Vec::new();
        write_json(&mut out, &ok_body(json!({ "a": 1 }))).unwrap();
        let text = String::from_utf8(out).unwrap();
        assert_eq!(text, "{\"data\":{\"a\":1},\"status\":\"ok\"}\n");
    }
}
