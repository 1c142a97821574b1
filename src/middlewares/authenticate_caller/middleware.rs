use std::{convert::Infallible, future::Future, pin::Pin, sync::Arc, task::{Context, Poll}};

use axum::{body::Body, extract::Query, response::{IntoResponse, Response}};
use http::{Request, StatusCode, Uri};
use scylla::Session;
use serde::Deserialize;
use tower::{Layer, Service};
use tracing::{error, info};

use crate::helper::error::InitError;

use super::{dsl::{AuthenticateCaller, AuthenticateCallerError}, interpreter::AuthenticateCallerImpl};

/// 更新系のエンドポイントを教員に限定する
///
/// 認証に成功した場合は`Teacher`をリクエストの拡張に格納する
pub(crate) struct AuthenticateCallerLayer<A = AuthenticateCallerImpl> {
    authenticate_caller: Arc<A>,
}

impl AuthenticateCallerLayer {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<AuthenticateCallerImpl>> {
        let authenticate_caller = AuthenticateCallerImpl::try_new(db).await?;
        Ok(Self::new(Arc::new(authenticate_caller)))
    }
}

impl<A> AuthenticateCallerLayer<A> {
    pub fn new(authenticate_caller: Arc<A>) -> Self {
        Self { authenticate_caller }
    }
}

impl<A> Clone for AuthenticateCallerLayer<A> {
    fn clone(&self) -> Self {
        Self { authenticate_caller: self.authenticate_caller.clone() }
    }
}

impl<S, A> Layer<S> for AuthenticateCallerLayer<A> {
    type Service = AuthenticateCallerService<S, A>;

    fn layer(&self, inner: S) -> Self::Service {
        AuthenticateCallerService {
            inner,
            authenticate_caller: self.authenticate_caller.clone(),
        }
    }
}

pub(crate) struct AuthenticateCallerService<S, A> {
    inner: S,
    authenticate_caller: Arc<A>,
}

impl<S: Clone, A> Clone for AuthenticateCallerService<S, A> {
    fn clone(&self) -> Self {
        Self {
            inner: self.inner.clone(),
            authenticate_caller: self.authenticate_caller.clone(),
        }
    }
}

impl<S, A> Service<Request<Body>> for AuthenticateCallerService<S, A>
where
    S: Service<Request<Body>, Error = Infallible, Response = Response> + Clone + Send + 'static,
    S::Future: Send + 'static,
    A: AuthenticateCaller + Send + 'static,
{
    type Response = Response;
    type Error = Infallible;
    type Future = Pin<Box<dyn Future<Output = Result<Response, Infallible>> + Send>>;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, mut request: Request<Body>) -> Self::Future {
        // `poll_ready`済みのサービスを持ち出し、複製を次回の呼び出しに残す
        let clone = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, clone);
        let authenticate_caller = self.authenticate_caller.clone();

        Box::pin(async move {
            let username = extract_username(request.uri());

            match authenticate_caller.authenticate_caller(username.as_deref()).await {
                Ok(teacher) => {
                    request.extensions_mut().insert(teacher);
                    inner.call(request).await
                },
                Err(e) => Ok(reject(e, username.as_deref())),
            }
        })
    }
}

#[derive(Deserialize)]
struct CallerQuery {
    username: Option<String>,
}

pub fn extract_username(uri: &Uri) -> Option<String> {
    Query::<CallerQuery>::try_from_uri(uri)
        .ok()
        .and_then(|Query(query)| query.username)
}

fn reject(e: AuthenticateCallerError, username: Option<&str>) -> Response {
    match e {
        AuthenticateCallerError::Unauthenticated | AuthenticateCallerError::InvalidCaller => {
            info!(
                username = username.unwrap_or_default(),
                reason = %e,
                "認証に失敗しました"
            );
            StatusCode::UNAUTHORIZED.into_response()
        },
        AuthenticateCallerError::ResolveCallerFailed(_) => {
            error!(
                error = %e,
                "教員の確認に失敗しました"
            );
            StatusCode::INTERNAL_SERVER_ERROR.into_response()
        }
    }
}
