use std::fs;
use wiremock::matchers::{body_partial_json, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

mod test_utils {
    use super::*;

    pub async fn create_calendar_server(status: u16, mock_response: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/v1/calendar/ipo"))
            .and(query_param("from", "2024-05-01"))
            .and(query_param("to", "2024-05-01"))
            .respond_with(ResponseTemplate::new(status).set_body_string(mock_response))
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub async fn create_mail_server(status: u16, expected_subject: &str) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("POST"))
            .and(path("/v3/mail/send"))
            .and(body_partial_json(
                serde_json::json!({ "subject": expected_subject }),
            ))
            .respond_with(ResponseTemplate::new(status))
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }

    pub fn write_config(calendar: &MockServer, mail: &MockServer) -> tempfile::NamedTempFile {
        let config_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let config_content = format!(
            r#"
providers:
  finnhub:
    base_url: {}
  sendgrid:
    base_url: {}
min_offer_amount: 200000000
utc_offset_hours: 4
credentials:
  finnhub_api_key: "test-finnhub-key"
  sendgrid_api_key: "test-sendgrid-key"
  sender_email: "alerts@example.com"
  recipient_email: "me@example.com"
"#,
            calendar.uri(),
            mail.uri()
        );
        fs::write(config_file.path(), config_content).expect("Failed to write config file");
        config_file
    }
}

const CALENDAR_JSON: &str = r#"{
    "ipoCalendar": [
        {"symbol": "ABC", "name": "Abc Corp", "date": "2024-05-01", "price": "20",
         "numberOfShares": 15000000, "exchange": "NASDAQ", "status": "expected"},
        {"symbol": "BIG", "name": "Big Holdings", "date": "2024-05-01", "price": "24-26",
         "numberOfShares": 40000000, "exchange": "NYSE", "status": "expected"},
        {"symbol": "SML", "name": "Small Co", "date": "2024-05-01", "price": "4-5",
         "numberOfShares": 2000000, "exchange": "NASDAQ", "status": "expected"},
        {"symbol": "NXT", "name": "Next Day Inc", "date": "2024-05-02", "price": 30,
         "numberOfShares": 20000000, "exchange": "NYSE", "status": "expected"},
        {"symbol": "ODD", "date": "2024-05-01", "price": "TBD",
         "numberOfShares": 90000000, "status": "filed"}
    ]
}"#;

#[test_log::test(tokio::test)]
async fn test_check_mails_qualifying_ipos() {
    let calendar = test_utils::create_calendar_server(200, CALENDAR_JSON).await;
    let mail = test_utils::create_mail_server(202, "IPO Alert: 2 IPO(s) Today - ABC, BIG").await;
    let config_file = test_utils::write_config(&calendar, &mail);

    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Check {
            date: Some("2024-05-01".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Check failed with: {:?}", result.err());

    let requests = mail.received_requests().await.unwrap();
    let body: serde_json::Value = serde_json::from_slice(&requests[0].body).unwrap();
    let html = body["content"][0]["value"].as_str().unwrap();
    assert!(html.contains("$300.00M"));
    assert!(html.contains("$1.00B"));
    assert!(html.contains("40,000,000"));
    assert!(!html.contains("SML"));
    assert!(!html.contains("NXT"));
    assert!(!html.contains("ODD"));
}

#[test_log::test(tokio::test)]
async fn test_check_mails_empty_report_when_calendar_fails() {
    let calendar = test_utils::create_calendar_server(500, "internal error").await;
    let mail =
        test_utils::create_mail_server(202, "IPO Update: No Qualifying IPOs - 2024-05-01").await;
    let config_file = test_utils::write_config(&calendar, &mail);

    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Check {
            date: Some("2024-05-01".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Check failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_check_fails_when_mail_is_rejected() {
    let calendar = test_utils::create_calendar_server(200, r#"{"ipoCalendar": []}"#).await;
    let mail =
        test_utils::create_mail_server(401, "IPO Update: No Qualifying IPOs - 2024-05-01").await;
    let config_file = test_utils::write_config(&calendar, &mail);

    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Check {
            date: Some("2024-05-01".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    let err = result.expect_err("Rejected mail should fail the run");
    assert!(err.to_string().contains("Failed to deliver"));
}

#[test_log::test(tokio::test)]
async fn test_preview_does_not_send_mail() {
    let calendar = test_utils::create_calendar_server(200, CALENDAR_JSON).await;
    let mail = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(202))
        .expect(0)
        .mount(&mail)
        .await;
    let config_file = test_utils::write_config(&calendar, &mail);

    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Preview {
            date: Some("2024-05-01".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_ok(), "Preview failed with: {:?}", result.err());
    assert_eq!(calendar.received_requests().await.unwrap().len(), 1);
}

#[test_log::test(tokio::test)]
async fn test_invalid_date_is_rejected() {
    let calendar = MockServer::start().await;
    let mail = MockServer::start().await;
    let config_file = test_utils::write_config(&calendar, &mail);

    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Preview {
            date: Some("05/01/2024".to_string()),
        },
        Some(config_file.path().to_str().unwrap()),
    )
    .await;

    assert!(result.is_err());
    assert!(calendar.received_requests().await.unwrap().is_empty());
}

#[test_log::test(tokio::test)]
async fn test_missing_config_file() {
    let result = ipo_watch::run_command(
        ipo_watch::AppCommand::Preview { date: None },
        Some("/nonexistent/ipo-watch.yaml"),
    )
    .await;

    assert!(result.is_err());
    assert!(
        result
            .unwrap_err()
            .to_string()
            .contains("Failed to read config file")
    );
}
