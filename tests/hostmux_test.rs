use async_trait::async_trait;
use hostmux::routing::{
    handler_fn, Handler, HandlerError, HandlerResult, HostRouter, SharedHandler,
};
use http_body_util::{BodyExt, Empty, Full};
use hyper::body::Bytes;
use hyper::{Request, Response, StatusCode};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

type Body = Empty<Bytes>;

// 호출 횟수와 요청 호스트를 기록하는 테스트 핸들러
#[derive(Default)]
struct Recorder {
    name: &'static str,
    calls: AtomicUsize,
    hosts: Mutex<Vec<String>>,
}

impl Recorder {
    fn new(name: &'static str) -> Arc<Self> {
        Arc::new(Self {
            name,
            ..Default::default()
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn hosts(&self) -> Vec<String> {
        self.hosts.lock().unwrap().clone()
    }
}

#[async_trait]
impl Handler<Body> for Recorder {
    async fn handle(&self, req: Request<Body>) -> HandlerResult {
        self.calls.fetch_add(1, Ordering::SeqCst);
        let host = req
            .headers()
            .get("Host")
            .and_then(|h| h.to_str().ok())
            .unwrap_or_default()
            .to_string();
        self.hosts.lock().unwrap().push(host);
        Ok(Response::new(Full::new(Bytes::from(self.name))))
    }
}

fn shared(recorder: &Arc<Recorder>) -> SharedHandler<Body> {
    recorder.clone()
}

// 테스트 헬퍼 함수
fn create_request(host: &str) -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/does/not/matter")
        .header("Host", host)
        .body(Empty::new())
        .unwrap()
}

async fn body_string(response: Response<Full<Bytes>>) -> String {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    String::from_utf8(bytes.to_vec()).unwrap()
}

#[test]
fn test_registered_hosts() {
    let test_cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
        // (등록한 호스트, 예상 키)
        (vec![], vec![]),
        (vec!["one.com"], vec!["one.com"]),
        (vec!["one.com", "two.net"], vec!["one.com", "two.net"]),
        (vec!["one.com", "two.net", "three.org"], vec!["one.com", "three.org", "two.net"]),
        // 중복 등록
        (vec!["one.com", "one.com"], vec!["one.com"]),
        (vec!["one.com", "one.com", "one.com", "one.com"], vec!["one.com"]),
        // 대소문자 정규화
        (vec!["ONE.COM"], vec!["one.com"]),
        (vec!["ONE.com"], vec!["one.com"]),
        (vec!["one.COM"], vec!["one.com"]),
        (vec!["One.Com"], vec!["one.com"]),
        (vec!["OnE.cOm"], vec!["one.com"]),
        (vec!["oNe.CoM"], vec!["one.com"]),
        (
            vec!["one.com", "ONE.COM", "ONE.com", "one.COM", "One.Com", "OnE.cOm", "oNe.CoM"],
            vec!["one.com"],
        ),
        (
            vec![
                "one.com", "ONE.COM", "ONE.com", "one.COM", "One.Com", "OnE.cOm", "oNe.CoM",
                "two.net", "TWO.NET", "TWO.net", "two.NET", "Two.Net", "TwO.nEt", "tWo.NeT",
            ],
            vec!["one.com", "two.net"],
        ),
        // 끝의 점은 제거하지 않음
        (vec!["one.com", "one.com."], vec!["one.com", "one.com."]),
        (
            vec!["one.com", "one.com.", "two.com", "two.com."],
            vec!["one.com", "one.com.", "two.com", "two.com."],
        ),
    ];

    for (index, (hosts, expected)) in test_cases.into_iter().enumerate() {
        // 한 번에 등록
        let router: HostRouter<Body> = HostRouter::new();
        router.host(Recorder::new("any"), hosts.iter());
        assert_eq!(router.hosts(), expected, "테스트 #{} (일괄 등록)", index);

        // 하나씩 등록
        let router: HostRouter<Body> = HostRouter::new();
        for host in &hosts {
            router.host(Recorder::new("any"), [host]);
        }
        assert_eq!(router.hosts(), expected, "테스트 #{} (개별 등록)", index);
        assert_eq!(router.len(), expected.len());
    }
}

#[test]
fn test_last_registration_wins() {
    let first = Recorder::new("first");
    let second = Recorder::new("second");
    let other = Recorder::new("other");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&first), ["one.com", "two.net"])
        .host_shared(shared(&other), ["three.org"])
        .host_shared(shared(&second), ["ONE.COM"]);

    let bound = router.handler_for("one.com").unwrap();
    assert!(Arc::ptr_eq(&bound, &shared(&second)));

    let bound = router.handler_for("Two.Net").unwrap();
    assert!(Arc::ptr_eq(&bound, &shared(&first)));

    let bound = router.handler_for("three.org").unwrap();
    assert!(Arc::ptr_eq(&bound, &shared(&other)));
}

#[tokio::test]
async fn test_dispatch_case_variants() {
    let one = Recorder::new("one");
    let two = Recorder::new("two");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&one), ["one.com"])
        .host_shared(shared(&two), ["two.net"]);

    let variants = ["one.com", "ONE.COM", "OnE.cOm", "oNe.CoM", "One.Com"];
    for (index, host) in variants.iter().enumerate() {
        let response = router.dispatch(Some(create_request(host))).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_string(response).await, "one");
        assert_eq!(one.calls(), index + 1, "호스트: {}", host);
    }

    assert_eq!(two.calls(), 0);
    // 핸들러는 원본 요청을 그대로 받음
    assert_eq!(one.hosts(), variants.to_vec());
}

#[tokio::test]
async fn test_trailing_dot_is_distinct() {
    let plain = Recorder::new("plain");
    let dotted = Recorder::new("dotted");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&plain), ["one.com"])
        .host_shared(shared(&dotted), ["one.com."]);

    let response = router.dispatch(Some(create_request("one.com."))).await.unwrap();
    assert_eq!(body_string(response).await, "dotted");
    assert_eq!(plain.calls(), 0);
    assert_eq!(dotted.calls(), 1);

    let response = router.dispatch(Some(create_request("ONE.COM"))).await.unwrap();
    assert_eq!(body_string(response).await, "plain");
    assert_eq!(plain.calls(), 1);
    assert_eq!(dotted.calls(), 1);
}

#[tokio::test]
async fn test_port_is_part_of_host() {
    let one = Recorder::new("one");

    let router: HostRouter<Body> = HostRouter::new();
    router.host_shared(shared(&one), ["one.com"]);

    let response = router.dispatch(Some(create_request("one.com:8080"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(one.calls(), 0);
}

#[tokio::test]
async fn test_else_handler() {
    let test_cases: Vec<(Vec<&str>, Vec<&str>)> = vec![
        // (등록한 호스트, 기본 핸들러로 가야 하는 호스트)
        (vec![], vec!["one.com", "two.net", "three.org"]),
        (vec!["one.com"], vec!["two.net", "three.org"]),
        (vec!["one.com", "two.net"], vec!["three.org"]),
    ];

    for (hosts, else_hosts) in test_cases {
        let registered = Recorder::new("host");
        let fallback = Recorder::new("else");

        let router: HostRouter<Body> = HostRouter::new();
        router.host_shared(shared(&registered), &hosts);
        router.set_default_shared(shared(&fallback));

        for (index, host) in else_hosts.iter().enumerate() {
            let response = router.dispatch(Some(create_request(host))).await.unwrap();
            assert_eq!(body_string(response).await, "else");
            assert_eq!(fallback.calls(), index + 1, "호스트: {}", host);
        }

        assert_eq!(registered.calls(), 0);
        assert_eq!(fallback.hosts(), else_hosts);
    }
}

#[tokio::test]
async fn test_set_default_last_write_wins() {
    let first = Recorder::new("first");
    let second = Recorder::new("second");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .set_default_shared(shared(&first))
        .set_default_shared(shared(&second));

    let response = router.dispatch(Some(create_request("four.io"))).await.unwrap();
    assert_eq!(body_string(response).await, "second");
    assert_eq!(first.calls(), 0);
    assert_eq!(second.calls(), 1);
}

#[tokio::test]
async fn test_not_found_without_default() {
    let one = Recorder::new("one");

    let router: HostRouter<Body> = HostRouter::new();
    router.host_shared(shared(&one), ["one.com"]);

    let response = router.dispatch(Some(create_request("three.org"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_string(response).await, "404 page not found\n");
    assert_eq!(one.calls(), 0);
}

#[tokio::test]
async fn test_absolute_uri_authority_wins_over_host_header() {
    let one = Recorder::new("one");
    let two = Recorder::new("two");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&one), ["one.com"])
        .host_shared(shared(&two), ["two.net"]);

    let req = Request::builder()
        .uri("http://One.Com/x")
        .header("Host", "two.net")
        .body(Empty::new())
        .unwrap();

    let response = router.dispatch(Some(req)).await.unwrap();
    assert_eq!(body_string(response).await, "one");
    assert_eq!(one.calls(), 1);
    assert_eq!(two.calls(), 0);
}

#[tokio::test]
async fn test_none_request_never_reaches_handlers() {
    let one = Recorder::new("one");
    let fallback = Recorder::new("else");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&one), ["one.com"])
        .set_default_shared(shared(&fallback));

    let response = router.dispatch(None).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(one.calls(), 0);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test]
async fn test_complete_dispatch_scenario() {
    let h1 = Recorder::new("h1");
    let h2 = Recorder::new("h2");
    let h3 = Recorder::new("h3");

    let router: HostRouter<Body> = HostRouter::new();
    router
        .host_shared(shared(&h1), ["one.com"])
        .host_shared(shared(&h2), ["two.net", "www.two.net"])
        .set_default_shared(shared(&h3));

    let test_cases = vec![
        // (호스트, 예상 응답, (h1, h2, h3) 누적 호출 횟수)
        ("TWO.NET", "h2", (0, 1, 0)),
        ("www.TWO.net", "h2", (0, 2, 0)),
        ("four.io", "h3", (0, 2, 1)),
        ("one.com", "h1", (1, 2, 1)),
    ];

    for (host, expected_body, (c1, c2, c3)) in test_cases {
        let response = router.dispatch(Some(create_request(host))).await.unwrap();
        assert_eq!(body_string(response).await, expected_body, "호스트: {}", host);
        assert_eq!((h1.calls(), h2.calls(), h3.calls()), (c1, c2, c3), "호스트: {}", host);
    }
}

#[tokio::test]
async fn test_handler_error_passes_through() {
    let router: HostRouter<Body> = HostRouter::new();
    router.host(
        handler_fn(|_req: Request<Body>| async {
            HandlerResult::Err(HandlerError::processing("backend down"))
        }),
        ["broken.com"],
    );

    let result = router.dispatch(Some(create_request("broken.com"))).await;
    match result {
        Err(HandlerError::Processing(message)) => assert_eq!(message, "backend down"),
        other => panic!("예상하지 못한 결과: {:?}", other.map(|r| r.status())),
    }
}

#[tokio::test]
async fn test_handler_receives_unmodified_request() {
    let router: HostRouter<Body> = HostRouter::new();
    router.host(
        handler_fn(|req: Request<Body>| async move {
            let summary = format!(
                "{} {} {}",
                req.method(),
                req.uri().path(),
                req.headers().get("x-trace").and_then(|v| v.to_str().ok()).unwrap_or("-")
            );
            HandlerResult::Ok(Response::new(Full::new(Bytes::from(summary))))
        }),
        ["echo.dev"],
    );

    let req = Request::builder()
        .method("DELETE")
        .uri("/items/7")
        .header("Host", "Echo.Dev")
        .header("x-trace", "abc")
        .body(Empty::new())
        .unwrap();

    let response = router.dispatch(Some(req)).await.unwrap();
    assert_eq!(body_string(response).await, "DELETE /items/7 abc");
}

#[tokio::test]
async fn test_nested_router() {
    let api = Recorder::new("api");
    let fallback = Recorder::new("else");

    let inner: HostRouter<Body> = HostRouter::new();
    inner.host_shared(shared(&api), ["api.one.com"]);

    let outer: HostRouter<Body> = HostRouter::new();
    outer
        .host(inner, ["api.one.com", "admin.one.com"])
        .set_default_shared(shared(&fallback));

    let response = outer.dispatch(Some(create_request("API.one.com"))).await.unwrap();
    assert_eq!(body_string(response).await, "api");

    // 바깥 라우터에서 매칭되었지만 안쪽 라우터에는 없는 호스트
    let response = outer.dispatch(Some(create_request("admin.one.com"))).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    assert_eq!(api.calls(), 1);
    assert_eq!(fallback.calls(), 0);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_register_and_dispatch() {
    let router: Arc<HostRouter<Body>> = Arc::new(HostRouter::new());
    let stable = Recorder::new("stable");
    let fallback = Recorder::new("else");
    router
        .host_shared(shared(&stable), ["stable.com"])
        .set_default_shared(shared(&fallback));

    let mut tasks = Vec::new();

    for writer in 0..4 {
        let router = router.clone();
        tasks.push(tokio::spawn(async move {
            for i in 0..50 {
                let host = format!("Host-{}-{}.example", writer, i);
                router.host(Recorder::new("dynamic"), [host]);
            }
        }));
    }

    for _ in 0..4 {
        let router = router.clone();
        tasks.push(tokio::spawn(async move {
            for _ in 0..50 {
                let response = router.dispatch(Some(create_request("STABLE.com"))).await.unwrap();
                assert_eq!(response.status(), StatusCode::OK);
            }
        }));
    }

    for task in tasks {
        task.await.unwrap();
    }

    assert_eq!(router.len(), 1 + 4 * 50);
    assert_eq!(stable.calls(), 4 * 50);
    assert_eq!(fallback.calls(), 0);
    assert!(router.hosts().iter().all(|host| host == &host.to_lowercase()));
}
