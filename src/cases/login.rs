use std::io;

use serde_json::{Value, json};

use super::{LOGIN, TEST_EMAIL, TEST_PASSWORD, body_object, expect_status};
use crate::client::{ApiClient, Method, RequestOptions};
use crate::report::Reporter;

/// Log in with the shared test account and return the access token.
///
/// With an override token configured the live login is skipped: the case is
/// informational only and hands the override on to dependent cases.
pub async fn success(
    client: &ApiClient,
    report: &mut Reporter,
    override_token: Option<&str>,
) -> io::Result<Option<String>> {
    if let Some(token) = override_token {
        report.info("Using bearer token from configuration; live login skipped")?;
        return Ok(Some(token.to_string()));
    }

    let payload = json!({
        "email": TEST_EMAIL,
        "password": TEST_PASSWORD,
    });

    let options = RequestOptions::new().json(payload);
    let Some(response) = client.make_request(report, Method::POST, LOGIN, options).await? else {
        return Ok(None);
    };

    report.assert_status(&response, 200)?;

    let Some(data) = body_object(report, &response)? else {
        return Ok(None);
    };

    report.assert_has_field(data, "user")?;
    report.assert_has_field(data, "accessToken")?;
    report.assert_has_field(data, "refreshToken")?;

    Ok(data
        .get("accessToken")
        .and_then(Value::as_str)
        .map(str::to_string))
}

/// The target is known to answer 200 here; 401 is what it should return.
pub async fn invalid_credentials(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({
        "email": "wrong@example.com",
        "password": "wrongpassword",
    });

    let options = RequestOptions::new().json(payload);
    let Some(response) = client.make_request(report, Method::POST, LOGIN, options).await? else {
        return Ok(());
    };

    report.note_status(&response, 401, "for invalid credentials")?;
    Ok(())
}

pub async fn validation_errors(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({
        "email": "not-an-email",
        "password": "123",
    });

    let options = RequestOptions::new().json(payload);
    expect_status(client, report, Method::POST, LOGIN, options, 400).await
}
