use std::sync::Arc;

use scylla::{prepared_statement::PreparedStatement, Session};

use crate::{common::{fallible::Fallible, teacher::{Teacher, Username}}, helper::{error::InitError, scylla::{Statement, TypedStatement}}};

use super::dsl::{AuthenticateCaller, AuthenticateCallerError};

pub struct AuthenticateCallerImpl {
    db: Arc<Session>,
    select_teacher: Arc<SelectTeacher>,
}

impl AuthenticateCallerImpl {
    pub async fn try_new(db: Arc<Session>) -> Result<Self, InitError<Self>> {
        let select_teacher = SELECT_TEACHER.prepared(&db, SelectTeacher)
            .await
            .map_err(InitError::<Self>::new)?;

        Ok(Self { db, select_teacher })
    }
}

impl AuthenticateCaller for AuthenticateCallerImpl {
    async fn find_teacher(&self, username: &Username) -> Fallible<Option<Teacher>, AuthenticateCallerError> {
        self.select_teacher
            .query(&self.db, (username, ))
            .await
            .map(|row| row.map(Teacher::from))
            .map_err(AuthenticateCallerError::ResolveCallerFailed)
    }
}

const SELECT_TEACHER: Statement<SelectTeacher>
    = Statement::of("SELECT username, display_name FROM teachers WHERE username = ?");

struct SelectTeacher(PreparedStatement);

impl<'a> TypedStatement<(&'a Username, ), (Username, Option<String>)> for SelectTeacher {
    type Result<U> = Option<U>;

    async fn query(&self, session: &Arc<Session>, values: (&'a Username, )) -> anyhow::Result<Self::Result<(Username, Option<String>)>> {
        session.execute_unpaged(&self.0, values)
            .await
            .map_err(anyhow::Error::from)?
            .maybe_first_row_typed()
            .map_err(anyhow::Error::from)
    }
}
