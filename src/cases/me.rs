use std::io;

use serde_json::Value;

use super::{ME, body_object, expect_status};
use crate::assertions::JsonKind;
use crate::client::{ApiClient, Method, RequestOptions};
use crate::report::Reporter;

pub const INVALID_TOKEN: &str = "invalid-token-123";

pub async fn with_token(client: &ApiClient, report: &mut Reporter, token: Option<&str>) -> io::Result<()> {
    let Some(token) = token else {
        report.fail("No token available from login or configuration")?;
        return Ok(());
    };

    let options = RequestOptions::new().bearer(token);
    let Some(response) = client.make_request(report, Method::GET, ME, options).await? else {
        return Ok(());
    };

    report.assert_status(&response, 200)?;

    let Some(data) = body_object(report, &response)? else {
        return Ok(());
    };

    report.assert_has_field(data, "id")?;
    report.assert_has_field(data, "email")?;
    report.assert_has_field(data, "name")?;
    report.assert_field_type(data, "id", JsonKind::String)?;

    if let Some(email) = data.get("email").and_then(Value::as_str) {
        report.assert_email_format(email)?;
    }

    Ok(())
}

pub async fn without_token(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    expect_status(client, report, Method::GET, ME, RequestOptions::new(), 401).await
}

/// The target is known to accept any bearer token here; 401 is what it should return.
pub async fn invalid_token(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let options = RequestOptions::new().bearer(INVALID_TOKEN);
    let Some(response) = client.make_request(report, Method::GET, ME, options).await? else {
        return Ok(());
    };

    report.note_status(&response, 401, "for invalid token")?;
    Ok(())
}
