use hyper::{header, Request};

/// 호스트 이름을 라우팅 키로 정규화합니다.
///
/// 대소문자만 통일하며, 끝의 점(FQDN)이나 포트는 건드리지 않습니다.
/// 따라서 `"one.com"`과 `"one.com."`은 서로 다른 키입니다.
///
/// ```
/// use hostmux::routing::normalize_host;
///
/// assert_eq!(normalize_host("OnE.cOm"), "one.com");
/// assert_eq!(normalize_host("one.com."), "one.com.");
/// ```
pub fn normalize_host(host: &str) -> String {
    host.to_lowercase()
}

/// HTTP 요청에서 대상 호스트를 추출합니다.
///
/// absolute-form 요청이면 URI의 authority를 사용하고 Host 헤더는 무시합니다.
/// authority가 없을 때만 Host 헤더(UTF-8인 경우)를 사용합니다.
/// 포트가 있으면 그대로 포함됩니다 (예: "one.com:8080").
pub fn extract_host<B>(req: &Request<B>) -> Option<&str> {
    req.uri()
        .authority()
        .map(|authority| authority.as_str())
        .or_else(|| {
            req.headers()
                .get(header::HOST)
                .and_then(|value| value.to_str().ok())
        })
}
