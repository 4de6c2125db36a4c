mod common;

use common::{FixtureBehavior, spawn_fixture};
use reqres_api_tests::application::client::ApiClient;
use reqres_api_tests::application::specification::{
    install, request_specification, response_specification, response_specification_200,
    response_specification_400,
};
use reqres_api_tests::domain::error::SuiteError;
use reqres_api_tests::domain::models::{
    ColorsData, Page, Register, RegistrationOutcome, SuccessRegistration, UserData,
};
use reqres_api_tests::infrastructure::config::SuiteConfig;
use reqwest::StatusCode;
use std::time::Duration;

macro_rules! setup_client {
    ($behavior:expr) => {{
        let base_url = spawn_fixture($behavior).await;
        let config = SuiteConfig::with_base_url(&base_url).unwrap();
        let client = ApiClient::new(&config).unwrap();
        (client, base_url)
    }};
}

#[actix_web::test]
async fn test_get_users_typed() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_200(),
    );

    let response = client.get(&spec, "api/users?page=2").await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let page: Page<UserData> = response.extract().unwrap();
    assert_eq!(page.page, 2);
    let ids: Vec<u32> = page.data.iter().map(|u| u.id).collect();
    assert_eq!(ids, vec![7, 8, 9, 10, 11, 12]);
}

#[actix_web::test]
async fn test_path_extraction_matches_typed_order() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_200(),
    );

    let response = client.get(&spec, "api/unknown").await.unwrap();
    let typed: Page<ColorsData> = response.extract().unwrap();
    let years: Vec<i32> = response.json_path().unwrap().get_list("data.year").unwrap();

    assert_eq!(years, typed.data.iter().map(|c| c.year).collect::<Vec<_>>());
}

#[actix_web::test]
async fn test_post_register_both_outcomes() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());

    let ok_spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_200(),
    );
    let outcome: RegistrationOutcome = client
        .post(&ok_spec, "api/register", &Register::new("eve.holt@reqres.in", "pistol"))
        .await
        .unwrap()
        .extract()
        .unwrap();
    assert!(matches!(outcome, RegistrationOutcome::Success(ref s) if s.id == 4));

    let bad_spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_400(),
    );
    let outcome: RegistrationOutcome = client
        .post(&bad_spec, "api/register", &Register::new("sydney@fife", ""))
        .await
        .unwrap()
        .extract()
        .unwrap();
    assert!(matches!(outcome, RegistrationOutcome::Failure(ref f) if f.error == "Missing password"));
}

#[actix_web::test]
async fn test_unexpected_status_fails_the_call() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_200(),
    );

    let err = client
        .post(&spec, "api/register", &Register::new("sydney@fife", ""))
        .await
        .unwrap_err();
    match err {
        SuiteError::Assertion { expected, actual, .. } => {
            assert_eq!(expected, "200");
            assert_eq!(actual, "400");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[actix_web::test]
async fn test_wrong_shape_fails_deserialization() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_400(),
    );

    let response = client
        .post(&spec, "api/register", &Register::new("sydney@fife", ""))
        .await
        .unwrap();
    let err = response.extract::<SuccessRegistration>().unwrap_err();
    assert!(matches!(err, SuiteError::Deserialization { .. }));
}

#[actix_web::test]
async fn test_latency_ceiling_is_enforced() {
    let (client, base_url) = setup_client!(FixtureBehavior {
        delay: Some(Duration::from_millis(300)),
        ..FixtureBehavior::default()
    });
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification_200().with_max_latency(Duration::from_millis(100)),
    );

    let err = client.get(&spec, "api/unknown").await.unwrap_err();
    assert!(err.is_assertion());
    assert!(err.to_string().contains("response time"));
}

#[actix_web::test]
async fn test_delete_returns_empty_no_content() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url).unwrap(),
        response_specification(StatusCode::NO_CONTENT),
    );

    let response = client.delete(&spec, "api/delete/2").await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);
    assert!(response.is_empty());
}

#[actix_web::test]
async fn test_request_carries_identifying_headers() {
    let (client, base_url) = setup_client!(FixtureBehavior::default());
    let spec = install(
        request_specification(&base_url)
            .unwrap()
            .with_api_key(Some("reqres-free-v1".to_string())),
        response_specification_200(),
    );

    let response = client.get(&spec, "api/headers").await.unwrap();
    let echoed = response.json().unwrap();
    assert_eq!(echoed["request_id"], response.request_id());
    assert_eq!(echoed["api_key"], "reqres-free-v1");
    assert_eq!(echoed["content_type"], "application/json");
}

#[actix_web::test]
async fn test_unreachable_host_is_a_transport_error() {
    let mut config = SuiteConfig::with_base_url("http://127.0.0.1:9/").unwrap();
    config.request_timeout = Duration::from_secs(2);
    let client = ApiClient::new(&config).unwrap();
    let spec = install(
        request_specification("http://127.0.0.1:9/").unwrap(),
        response_specification_200(),
    );

    let err = client.get(&spec, "api/users?page=2").await.unwrap_err();
    assert!(matches!(err, SuiteError::Transport(_)));
}
