use futures_util::StreamExt;
use mailchimp_lists::{
    subscriber_hash, Client, ClientConfig, Error, Lists, PageSize, Parameters,
};
use serde_json::{json, Value};
use std::{sync::Arc, time::Duration};
use wiremock::{
    matchers::{basic_auth, body_json, method, path, query_param},
    Mock, MockServer, ResponseTemplate,
};

const API_KEY: &str = "test-key-us1";

async fn setup() -> (MockServer, Lists<Arc<Client>>) {
    let server = MockServer::start().await;
    let client = Client::new(&server.uri(), API_KEY).unwrap();
    (server, Lists::new(client))
}

fn member(id: &str, email: &str) -> Value {
    json!({"id": id, "email_address": email, "full_name": "", "status": "unsubscribed"})
}

#[tokio::test]
async fn get_member_info_uses_subscriber_hash() {
    let (server, lists) = setup().await;
    let hash = subscriber_hash("user@example.com");

    Mock::given(method("GET"))
        .and(path(format!("/3.0/lists/abc123/members/{hash}")))
        .and(basic_auth("anystring", API_KEY))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": hash})))
        .expect(1)
        .mount(&server)
        .await;

    let resp = lists
        .get_member_info("abc123", "User@Example.com", None)
        .await
        .unwrap();
    assert_eq!(resp["id"], hash.as_str());
}

#[tokio::test]
async fn get_sends_parameters_as_query_string() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .and(query_param("status", "subscribed"))
        .and(query_param("count", "10"))
        .and(query_param("fields", "members.id,total_items"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"members": []})))
        .expect(1)
        .mount(&server)
        .await;

    let params = Parameters::new()
        .with("status", "subscribed")
        .with("count", 10)
        .with("fields", json!(["members.id", "total_items"]));
    lists.get_members("abc123", Some(params)).await.unwrap();
}

#[tokio::test]
async fn add_member_posts_json_body() {
    let (server, lists) = setup().await;

    Mock::given(method("POST"))
        .and(path("/3.0/lists/abc123/members"))
        .and(body_json(json!({
            "email_address": "jane@example.com",
            "status": "subscribed",
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(member("1", "jane@example.com")))
        .expect(1)
        .mount(&server)
        .await;

    let params = Parameters::new().with("status", "subscribed");
    let resp = lists
        .add_member("abc123", "jane@example.com", Some(params))
        .await
        .unwrap();
    assert_eq!(resp["email_address"], "jane@example.com");
}

#[tokio::test]
async fn update_member_patches_member_path() {
    let (server, lists) = setup().await;
    let hash = subscriber_hash("jane@example.com");

    Mock::given(method("PATCH"))
        .and(path(format!("/3.0/lists/abc123/members/{hash}")))
        .and(body_json(json!({"status": "cleaned"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"status": "cleaned"})))
        .expect(1)
        .mount(&server)
        .await;

    let params = Parameters::new().with("status", "cleaned");
    lists
        .update_member("abc123", "JANE@example.com", Some(params))
        .await
        .unwrap();
}

#[tokio::test]
async fn update_segment_posts_to_segment_path() {
    let (server, lists) = setup().await;

    Mock::given(method("POST"))
        .and(path("/3.0/lists/abc123/segments/42"))
        .and(body_json(json!({"name": "Renamed"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": 42})))
        .expect(1)
        .mount(&server)
        .await;

    let params = Parameters::new().with("name", "Renamed");
    let resp = lists
        .update_segment("abc123", 42, Some(params))
        .await
        .unwrap();
    assert_eq!(resp["id"], 42);
}

#[tokio::test]
async fn empty_response_body_is_null() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    assert_eq!(lists.get_lists(None).await.unwrap(), Value::Null);
}

#[tokio::test]
async fn mailchimp_errors_are_decoded() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({
            "type": "https://mailchimp.com/developer/marketing/docs/errors/",
            "title": "Resource Not Found",
            "status": 404,
            "detail": "The requested resource could not be found.",
            "instance": "995c5cb0-0000-0000-0000-000000000000",
        })))
        .mount(&server)
        .await;

    let err = lists.get_list("missing", None).await.unwrap_err();
    assert_eq!(err.status(), Some(404));
    match err {
        Error::Mailchimp(err) => assert_eq!(err.title, "Resource Not Found"),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn non_json_error_bodies_are_kept() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists"))
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .mount(&server)
        .await;

    match lists.get_lists(None).await.unwrap_err() {
        Error::Mailchimp(err) => {
            assert_eq!(err.status, 502);
            assert_eq!(err.detail.as_deref(), Some("Bad Gateway"));
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn requests_time_out() {
    let server = MockServer::start().await;
    let config = ClientConfig::new(API_KEY)
        .with_base_url(server.uri())
        .with_timeout(Duration::from_millis(100));
    let lists = Lists::new(Client::from_config(config).unwrap());

    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(2)))
        .mount(&server)
        .await;

    let err = lists.get_lists(None).await.unwrap_err();
    match err {
        Error::Request(err) => assert!(err.is_timeout()),
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn members_stream_walks_all_pages() {
    let (server, lists) = setup().await;
    let lists = lists.with_page_size(PageSize::new(2));

    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .and(query_param("status", "unsubscribed"))
        .and(query_param("count", "2"))
        .and(query_param("offset", "0"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [member("1", "a@example.com"), member("2", "b@example.com")],
            "total_items": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .and(query_param("status", "unsubscribed"))
        .and(query_param("count", "2"))
        .and(query_param("offset", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "members": [member("3", "c@example.com")],
            "total_items": 3,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let params = Parameters::new().with("status", "unsubscribed");
    let ids: Vec<String> = lists
        .members_stream("abc123", Some(params))
        .map(|member| member.unwrap().id)
        .collect()
        .await;

    assert_eq!(ids, vec!["1", "2", "3"]);
}

#[tokio::test]
async fn members_stream_stops_on_empty_page() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"members": []})))
        .expect(1)
        .mount(&server)
        .await;

    let members: Vec<_> = lists.members_stream("abc123", None).collect().await;
    assert!(members.is_empty());
}

#[tokio::test]
async fn members_stream_yields_error_once() {
    let (server, lists) = setup().await;

    Mock::given(method("GET"))
        .and(path("/3.0/lists/abc123/members"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "title": "API Key Invalid",
            "status": 401,
        })))
        .expect(1)
        .mount(&server)
        .await;

    let results: Vec<_> = lists.members_stream("abc123", None).collect().await;
    assert_eq!(results.len(), 1);
    assert!(matches!(&results[0], Err(Error::Mailchimp(err)) if err.status == 401));
}
