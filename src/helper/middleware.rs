use std::sync::Arc;

use scylla::Session;

use crate::middlewares::authenticate_caller::middleware::AuthenticateCallerLayer;

use super::error::InitError;

pub(crate) async fn caller_authenticator<T>(db: Arc<Session>) -> Result<AuthenticateCallerLayer, InitError<T>> {
    AuthenticateCallerLayer::try_new(db)
        .await
        .map_err(|e| InitError::<T>::new(e.into()))
}
