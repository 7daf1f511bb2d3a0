use std::io;

use chrono::Utc;
use serde_json::{Value, json};

use super::{SIGNUP, TEST_EMAIL, TEST_PASSWORD, body_object, expect_status};
use crate::assertions::JsonKind;
use crate::client::{ApiClient, Method, RequestOptions};
use crate::report::Reporter;

/// Fresh address per run so repeated runs do not collide on the target
pub fn unique_email() -> String {
    format!("test_{}@example.com", Utc::now().timestamp_millis())
}

pub async fn success(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({
        "email": unique_email(),
        "password": TEST_PASSWORD,
        "name": "Test User",
        "defaultCurrency": "USD",
    });

    let options = RequestOptions::new().json(payload);
    let Some(response) = client.make_request(report, Method::POST, SIGNUP, options).await? else {
        return Ok(());
    };

    report.assert_status(&response, 201)?;

    let Some(data) = body_object(report, &response)? else {
        return Ok(());
    };

    report.assert_has_field(data, "user")?;
    report.assert_has_field(data, "accessToken")?;
    report.assert_has_field(data, "refreshToken")?;

    let Some(user) = data.get("user") else {
        return Ok(());
    };

    let Some(user) = user.as_object() else {
        report.assert_field_type(data, "user", JsonKind::Object)?;
        return Ok(());
    };

    for field in ["id", "email", "name"] {
        report.assert_has_field(user, field)?;
    }
    for field in ["id", "email", "name"] {
        report.assert_field_type(user, field, JsonKind::String)?;
    }

    Ok(())
}

pub async fn invalid_email(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({
        "email": "invalid-email",
        "password": TEST_PASSWORD,
        "name": "Test User",
    });

    rejected(client, report, payload).await
}

pub async fn short_password(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({
        "email": TEST_EMAIL,
        "password": "short",
        "name": "Test User",
    });

    rejected(client, report, payload).await
}

pub async fn missing_fields(client: &ApiClient, report: &mut Reporter) -> io::Result<()> {
    let payload = json!({ "email": TEST_EMAIL });

    rejected(client, report, payload).await
}

async fn rejected(client: &ApiClient, report: &mut Reporter, payload: Value) -> io::Result<()> {
    let options = RequestOptions::new().json(payload);

    expect_status(client, report, Method::POST, SIGNUP, options, 400).await
}
