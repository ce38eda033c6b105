//! Every echo variant exercised over real HTTP.
//!
//! Each test starts one server variant on a random port in a background
//! tokio runtime, then drives it through `ParamsClient` with ureq as the
//! transport.

use std::net::SocketAddr;

use param_client::{ApiError, HttpMethod, HttpRequest, HttpResponse, JsonParams, ParamsClient};
use param_server::{ErrorPolicy, Variant};

/// Execute an `HttpRequest` using ureq and return an `HttpResponse`.
///
/// 4xx/5xx responses are returned as data so the client maps them.
fn execute(req: HttpRequest) -> HttpResponse {
    let agent = ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .new_agent();

    let content_type = req.header("content-type").map(str::to_string);
    let mut response = match (req.method, req.body) {
        (HttpMethod::Get, _) => agent.get(&req.path).call(),
        (HttpMethod::Delete, _) => agent.delete(&req.path).call(),
        (HttpMethod::Post, Some(body)) => agent
            .post(&req.path)
            .content_type(content_type.as_deref().unwrap_or("text/plain"))
            .send(body.as_bytes()),
        (HttpMethod::Post, None) => agent.post(&req.path).send_empty(),
        (HttpMethod::Put, Some(body)) => agent
            .put(&req.path)
            .content_type(content_type.as_deref().unwrap_or("text/plain"))
            .send(body.as_bytes()),
        (HttpMethod::Put, None) => agent.put(&req.path).send_empty(),
    }
    .expect("HTTP transport error");

    let status = response.status().as_u16();
    let body = response.body_mut().read_to_string().unwrap_or_default();

    HttpResponse {
        status,
        headers: Vec::new(),
        body,
    }
}

fn spawn(variant: Variant) -> SocketAddr {
    let std_listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = std_listener.local_addr().unwrap();
    std_listener.set_nonblocking(true).unwrap();

    std::thread::spawn(move || {
        let rt = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .unwrap();
        rt.block_on(async {
            let listener = tokio::net::TcpListener::from_std(std_listener).unwrap();
            param_server::run(listener, variant, ErrorPolicy::Legacy).await
        })
        .unwrap();
    });

    addr
}

fn client_for(variant: Variant) -> ParamsClient {
    ParamsClient::new(&format!("http://{}", spawn(variant)))
}

#[test]
fn form_echo_round_trip() {
    let client = client_for(Variant::Form);

    let req = client.build_form_echo("hello world", "a&b=c").unwrap();
    let echo = client.parse_form_echo(execute(req)).unwrap();
    assert_eq!(echo.param1, "hello world");
    assert_eq!(echo.param2, "a&b=c");

    let mut req = client.build_form_echo("x", "y").unwrap();
    req.method = HttpMethod::Put;
    let err = client.parse_form_echo(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::MethodNotAllowed(_)));
}

#[test]
fn json_params_round_trip() {
    let client = client_for(Variant::Json);

    let input = JsonParams {
        param1: "value1".to_string(),
        param2: 2,
    };
    let req = client.build_json_params(&input).unwrap();
    let ack = client.parse_json_params(execute(req)).unwrap();
    assert!(ack.is_success());

    let mut req = client.build_json_params(&input).unwrap();
    req.body = Some(r#"{"param1":"value1","param2":"two"}"#.to_string());
    let err = client.parse_json_params(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::HttpError { status: 400, .. }));
}

#[test]
fn listing_round_trip() {
    let client = client_for(Variant::Listing);

    let req = client
        .build_listing(&[("firstParam", "hello"), ("secondParam", "world")])
        .unwrap();
    let entries = client.parse_listing(execute(req)).unwrap();
    assert_eq!(entries.len(), 2);
    assert_eq!(entries[0].key, "firstParam");
    assert_eq!(entries[0].values, ["hello"]);
    assert_eq!(entries[1].key, "secondParam");
    assert_eq!(entries[1].values, ["world"]);

    let req = client.build_listing(&[]).unwrap();
    let err = client.parse_listing(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::NoParameters(_)));

    let req = client.build_hello(HttpMethod::Get);
    let err = client.parse_listing(execute(req)).unwrap_err();
    assert!(matches!(err, ApiError::MethodNotAllowed(_)));
}

#[test]
fn contact_round_trip() {
    let client = client_for(Variant::Contact);

    let req = client.build_contact("John", "john@example.com").unwrap();
    let contact = client.parse_contact(execute(req)).unwrap();
    assert_eq!(contact.name, "John");
    assert_eq!(contact.email, "john@example.com");

    let req = client.build_contact("", "").unwrap();
    let contact = client.parse_contact(execute(req)).unwrap();
    assert_eq!(contact.name, "");
    assert_eq!(contact.email, "");
}

#[test]
fn hello_round_trip() {
    let client = client_for(Variant::Hello);

    for method in [HttpMethod::Get, HttpMethod::Post, HttpMethod::Delete] {
        let body = client.parse_hello(execute(client.build_hello(method))).unwrap();
        assert_eq!(body, "Hello, World!");
    }
}
