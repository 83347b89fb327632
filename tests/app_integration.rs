use gurrency::config::{AppConfig, FixerConfig};
use gurrency::core::{CurrencySource, RateError};
use gurrency::providers::FixerSource;
use tracing::info;

// Adds automatic logging to test
mod test_utils {
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    pub async fn create_fixer_mock_server(
        key: &str,
        base: &str,
        symbols: &str,
        response: ResponseTemplate,
    ) -> MockServer {
        let mock_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/api/latest"))
            .and(query_param("access_key", key))
            .and(query_param("base", base))
            .and(query_param("symbols", symbols))
            .respond_with(response)
            .expect(1)
            .mount(&mock_server)
            .await;

        mock_server
    }
}

fn app_config(base_url: &str, base: &str, reference: &str) -> AppConfig {
    AppConfig {
        fixer: FixerConfig {
            api_key: "test-key".to_string(),
            base_url: base_url.to_string(),
        },
        base: base.to_string(),
        reference: reference.to_string(),
    }
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_mock() {
    let mock_response = r#"{"base":"EUR","rates":{"CAD":1.5,"USD":1.1}}"#;
    let mock_server = test_utils::create_fixer_mock_server(
        "test-key",
        "EUR",
        "CAD,USD",
        wiremock::ResponseTemplate::new(200).set_body_string(mock_response),
    )
    .await;

    let config = app_config(&mock_server.uri(), "EUR", "CAD,USD");
    let result = gurrency::run(&config).await;
    assert!(result.is_ok(), "Run failed with: {:?}", result.err());
}

#[test_log::test(tokio::test)]
async fn test_full_app_flow_with_bad_response() {
    let mock_server = test_utils::create_fixer_mock_server(
        "test-key",
        "USD",
        "GBP",
        wiremock::ResponseTemplate::new(500),
    )
    .await;

    let config = app_config(&mock_server.uri(), "USD", "GBP");
    let err = gurrency::run(&config).await.unwrap_err();
    info!(error = %err, "Run failed as expected");

    assert!(matches!(
        err.downcast_ref::<RateError>(),
        Some(RateError::BadResponse(status)) if status.as_u16() == 500
    ));
}

#[test_log::test(tokio::test)]
async fn test_source_output_block() {
    let mock_response = r#"{"base":"EUR","rates":{"USD":1.1,"CAD":1.5}}"#;
    let mock_server = test_utils::create_fixer_mock_server(
        "test-key",
        "EUR",
        "USD,CAD",
        wiremock::ResponseTemplate::new(200).set_body_string(mock_response),
    )
    .await;

    let source = gurrency::source::Source::new(FixerSource::new(
        "test-key",
        &mock_server.uri(),
        "EUR",
        "USD,CAD",
    ));
    let mut out = Vec::new();
    source.write_rate(&mut out).await.unwrap();

    let text = String::from_utf8(out).unwrap();
    let mut lines = text.lines();
    assert_eq!(lines.next(), Some("Service Name: fixer.io"));
    let mut rest: Vec<&str> = lines.collect();
    rest.sort();
    assert_eq!(rest, vec!["EUR/CAD: 1.50", "EUR/USD: 1.10"]);
}

#[test_log::test(tokio::test)]
async fn test_unreachable_provider() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let source = FixerSource::new("test-key", &format!("http://{addr}"), "EUR", "USD");
    let result = source.get_rate().await;
    assert!(matches!(result, Err(RateError::ServiceUnavailable(_))));

    let config = app_config(&format!("http://{addr}"), "EUR", "USD");
    let err = gurrency::run(&config).await.unwrap_err();
    assert!(
        err.to_string().starts_with("can't perform get request"),
        "unexpected error: {err}"
    );
}

#[test_log::test(tokio::test)]
async fn test_run_cli_exit_status() {
    let ok_server = test_utils::create_fixer_mock_server(
        "file-key",
        "EUR",
        "CAD,USD",
        wiremock::ResponseTemplate::new(200)
            .set_body_string(r#"{"base":"EUR","rates":{"CAD":1.5,"USD":1.1}}"#),
    )
    .await;
    let failing_server = test_utils::create_fixer_mock_server(
        "file-key",
        "EUR",
        "CAD,USD",
        wiremock::ResponseTemplate::new(503),
    )
    .await;

    for (server, expected) in [
        (&ok_server, gurrency::EXIT_SUCCESS),
        (&failing_server, gurrency::EXIT_FAILURE),
    ] {
        let env_file = tempfile::NamedTempFile::new().expect("Failed to create temp file");
        let contents = format!("FIXER_KEY=file-key\nFIXER_URL={}\n", server.uri());
        std::fs::write(env_file.path(), contents).expect("Failed to write env file");

        let status = gurrency::run_cli(env_file.path(), "EUR", "CAD,USD").await;
        assert_eq!(status, expected, "unexpected status for {}", server.uri());
    }
}
