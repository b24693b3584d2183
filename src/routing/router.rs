use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock};

use async_trait::async_trait;
use hyper::body::Incoming;
use hyper::Request;
use tracing::debug;

use super::host::{extract_host, normalize_host};
use super::response::not_found;
use super::{Handler, HandlerResult, SharedHandler};

/// 요청의 대상 호스트에 따라 하위 핸들러를 선택하는 라우터입니다.
///
/// 호스트 이름은 소문자로 정규화되어 저장되고, 같은 호스트를 다시 등록하면
/// 마지막 등록이 이전 것을 덮어씁니다. 매칭되는 호스트가 없으면 기본 핸들러로,
/// 기본 핸들러도 없으면 404 응답으로 처리합니다.
///
/// 등록 메서드는 `&self`를 받으므로 `Arc`로 공유된 라우터에 서비스 도중에도
/// 라우트를 추가할 수 있습니다.
pub struct HostRouter<B = Incoming> {
    routes: RwLock<HashMap<String, SharedHandler<B>>>,
    default_handler: RwLock<Option<SharedHandler<B>>>,
}

impl<B> HostRouter<B>
where
    B: Send + 'static,
{
    /// 빈 라우터를 생성합니다.
    pub fn new() -> Self {
        HostRouter {
            routes: RwLock::new(HashMap::new()),
            default_handler: RwLock::new(None),
        }
    }

    /// 하나 이상의 호스트에 핸들러를 등록합니다.
    ///
    /// 호스트 목록이 비어 있으면 아무 일도 하지 않습니다.
    pub fn host<H, I, S>(&self, handler: H, hosts: I) -> &Self
    where
        H: Handler<B> + 'static,
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        self.host_shared(Arc::new(handler), hosts)
    }

    /// 이미 공유 중인 핸들러를 호스트에 등록합니다.
    pub fn host_shared<I, S>(&self, handler: SharedHandler<B>, hosts: I) -> &Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let mut routes = self.routes.write().unwrap_or_else(PoisonError::into_inner);
        for host in hosts {
            let key = normalize_host(host.as_ref());
            if routes.insert(key.clone(), Arc::clone(&handler)).is_some() {
                debug!(host = %key, "기존 호스트 핸들러 교체");
            } else {
                debug!(host = %key, "호스트 핸들러 등록");
            }
        }
        self
    }

    /// 매칭되는 호스트가 없을 때 사용할 기본 핸들러를 설정합니다.
    pub fn set_default<H>(&self, handler: H) -> &Self
    where
        H: Handler<B> + 'static,
    {
        self.set_default_shared(Arc::new(handler))
    }

    /// 공유 중인 핸들러를 기본 핸들러로 설정합니다.
    pub fn set_default_shared(&self, handler: SharedHandler<B>) -> &Self {
        let mut default_handler = self
            .default_handler
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        *default_handler = Some(handler);
        debug!("기본 핸들러 설정");
        self
    }

    /// 등록된 (정규화된) 호스트 목록을 정렬해서 반환합니다.
    pub fn hosts(&self) -> Vec<String> {
        let routes = self.routes.read().unwrap_or_else(PoisonError::into_inner);
        let mut hosts: Vec<String> = routes.keys().cloned().collect();
        hosts.sort();
        hosts
    }

    pub fn len(&self) -> usize {
        self.routes.read().unwrap_or_else(PoisonError::into_inner).len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// 호스트에 등록된 핸들러를 찾습니다. 호스트는 조회 전에 정규화됩니다.
    pub fn handler_for(&self, host: &str) -> Option<SharedHandler<B>> {
        self.routes
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&normalize_host(host))
            .cloned()
    }

    pub fn default_handler(&self) -> Option<SharedHandler<B>> {
        self.default_handler
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    // 락은 핸들러를 복제하는 동안만 잡고, 핸들러 호출 전에 해제됩니다.
    fn select(&self, host: &str) -> Option<SharedHandler<B>> {
        match self.handler_for(host) {
            Some(handler) => {
                debug!(host = %host, "호스트 핸들러 선택");
                Some(handler)
            }
            None => {
                let handler = self.default_handler();
                if handler.is_some() {
                    debug!(host = %host, "매칭되는 호스트 없음, 기본 핸들러 선택");
                } else {
                    debug!(host = %host, "매칭되는 호스트와 기본 핸들러 없음");
                }
                handler
            }
        }
    }

    /// 요청을 호스트에 맞는 핸들러로 전달합니다.
    ///
    /// 요청이 없으면(`None`) 호스트를 추출하지 않고 바로 404 응답을 돌려줍니다.
    /// 선택된 핸들러의 결과(에러 포함)는 그대로 반환됩니다.
    pub async fn dispatch(&self, req: Option<Request<B>>) -> HandlerResult {
        let req = match req {
            Some(req) => req,
            None => {
                debug!("요청 없음, 404 응답");
                return Ok(not_found());
            }
        };

        let handler = self.select(extract_host(&req).unwrap_or_default());
        match handler {
            Some(handler) => handler.handle(req).await,
            None => Ok(not_found()),
        }
    }
}

impl<B> Default for HostRouter<B>
where
    B: Send + 'static,
{
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<B> Handler<B> for HostRouter<B>
where
    B: Send + 'static,
{
    async fn handle(&self, req: Request<B>) -> HandlerResult {
        self.dispatch(Some(req)).await
    }
}
