use std::convert::Infallible;
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use hyper::service::{make_service_fn, service_fn};
use hyper::{Body, Request, Response, Server, StatusCode};
use mgmt_transport::{
    ApiRequest, HyperTransport, ManagementConfig, Method, RequestOption, Transport, TransportError,
};
use serde_json::{Value, json};

#[derive(Clone, Debug)]
struct Recorded {
    method: String,
    uri: String,
    authorization: Option<String>,
    body: Vec<u8>,
}

#[derive(Clone)]
struct Canned {
    status: StatusCode,
    body: &'static str,
    delay: Duration,
}

async fn spawn_server(canned: Canned) -> (SocketAddr, Arc<Mutex<Vec<Recorded>>>) {
    let seen = Arc::new(Mutex::new(Vec::new()));
    let log = Arc::clone(&seen);

    let make = make_service_fn(move |_| {
        let log = Arc::clone(&log);
        let canned = canned.clone();
        async move {
            Ok::<_, Infallible>(service_fn(move |req: Request<Body>| {
                let log = Arc::clone(&log);
                let canned = canned.clone();
                async move {
                    let method = req.method().to_string();
                    let uri = req.uri().to_string();
                    let authorization = req
                        .headers()
                        .get("authorization")
                        .and_then(|value| value.to_str().ok())
                        .map(str::to_owned);
                    let body = hyper::body::to_bytes(req.into_body()).await.unwrap().to_vec();
                    log.lock().unwrap().push(Recorded {
                        method,
                        uri,
                        authorization,
                        body,
                    });

                    tokio::time::sleep(canned.delay).await;
                    let response = Response::builder()
                        .status(canned.status)
                        .header("content-type", "application/json")
                        .body(Body::from(canned.body))
                        .unwrap();
                    Ok::<_, Infallible>(response)
                }
            }))
        }
    });

    let server = Server::bind(&SocketAddr::from(([127, 0, 0, 1], 0))).serve(make);
    let addr = server.local_addr();
    tokio::spawn(server);
    (addr, seen)
}

fn transport_for(addr: SocketAddr) -> HyperTransport {
    let config = ManagementConfig::new(format!("http://{addr}"))
        .with_token("integration-token")
        .with_timeout(Duration::from_secs(5));
    HyperTransport::new(config).expect("transport")
}

#[tokio::test]
async fn sends_json_body_and_bearer_token() {
    let (addr, seen) = spawn_server(Canned {
        status: StatusCode::CREATED,
        body: "{}",
        delay: Duration::ZERO,
    })
    .await;
    let transport = transport_for(addr);

    let response = transport
        .execute(
            ApiRequest::new(Method::Post, "prompts/signup/partials")
                .with_body(json!({ "form-content-start": "<div>" })),
        )
        .await
        .expect("request succeeds");

    assert_eq!(response.status, 201);

    let recorded = seen.lock().unwrap().clone();
    assert_eq!(recorded.len(), 1);
    assert_eq!(recorded[0].method, "POST");
    assert_eq!(recorded[0].uri, "/api/v2/prompts/signup/partials");
    assert_eq!(
        recorded[0].authorization.as_deref(),
        Some("Bearer integration-token")
    );
    let body: Value = serde_json::from_slice(&recorded[0].body).unwrap();
    assert_eq!(body, json!({ "form-content-start": "<div>" }));
}

#[tokio::test]
async fn returns_response_body_for_get() {
    let (addr, seen) = spawn_server(Canned {
        status: StatusCode::OK,
        body: r#"{"form-footer-end":"<x>"}"#,
        delay: Duration::ZERO,
    })
    .await;
    let transport = transport_for(addr);

    let response = transport
        .execute(
            ApiRequest::new(Method::Get, "prompts/login-id/partials")
                .with_options(&[RequestOption::query("fields", "form-footer-end")]),
        )
        .await
        .expect("request succeeds");

    let body: Value = serde_json::from_slice(&response.body).unwrap();
    assert_eq!(body, json!({ "form-footer-end": "<x>" }));

    let recorded = seen.lock().unwrap().clone();
    assert_eq!(recorded[0].method, "GET");
    assert_eq!(
        recorded[0].uri,
        "/api/v2/prompts/login-id/partials?fields=form-footer-end"
    );
    assert!(recorded[0].body.is_empty());
}

#[tokio::test]
async fn surfaces_api_errors() {
    let (addr, _seen) = spawn_server(Canned {
        status: StatusCode::FORBIDDEN,
        body: r#"{"statusCode":403,"error":"Forbidden","message":"Insufficient scope"}"#,
        delay: Duration::ZERO,
    })
    .await;
    let transport = transport_for(addr);

    let err = transport
        .execute(ApiRequest::new(Method::Put, "prompts/login/partials").with_body(json!({})))
        .await
        .expect_err("forbidden");

    assert!(matches!(
        err,
        TransportError::Api { status: 403, ref error, ref message }
            if error == "Forbidden" && message == "Insufficient scope"
    ));
}

#[tokio::test]
async fn honours_timeout_option() {
    let (addr, _seen) = spawn_server(Canned {
        status: StatusCode::OK,
        body: "{}",
        delay: Duration::from_millis(500),
    })
    .await;
    let transport = transport_for(addr);

    let err = transport
        .execute(
            ApiRequest::new(Method::Get, "prompts/login/partials")
                .with_options(&[RequestOption::timeout(Duration::from_millis(50))]),
        )
        .await
        .expect_err("times out");

    assert!(matches!(err, TransportError::Timeout { after } if after == Duration::from_millis(50)));
}
