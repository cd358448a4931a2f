use crate::submit::{SubmitEndpoint, SubmitOutcome};

use super::{actions::FormCommand, error::FieldCoercionError, session::FormSession};

/// Apply a synchronous command. `Submit` needs an endpoint and is left to
/// [`FormEngine::dispatch`]; here it changes nothing.
pub fn apply_command(
    session: &mut FormSession,
    command: FormCommand,
) -> Result<bool, FieldCoercionError> {
    match command {
        FormCommand::Set { path, value } => session.set_field(&path, value),
        FormCommand::AddEntry => Ok(session.add_entry()),
        FormCommand::RemoveEntry { index } => Ok(session.remove_entry(index)),
        FormCommand::Reset => Ok(session.reset()),
        FormCommand::Submit => Ok(false),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Dispatched {
    Applied(bool),
    Submitted(SubmitOutcome),
}

pub struct FormEngine<'a, E: ?Sized> {
    session: &'a mut FormSession,
    endpoint: &'a E,
}

impl<'a, E> FormEngine<'a, E>
where
    E: SubmitEndpoint + ?Sized,
{
    pub fn new(session: &'a mut FormSession, endpoint: &'a E) -> Self {
        Self { session, endpoint }
    }

    pub fn session(&self) -> &FormSession {
        self.session
    }

    pub async fn dispatch(
        &mut self,
        command: FormCommand,
    ) -> Result<Dispatched, FieldCoercionError> {
        match command {
            FormCommand::Submit => Ok(Dispatched::Submitted(
                self.session.submit(self.endpoint).await,
            )),
            other => apply_command(self.session, other).map(Dispatched::Applied),
        }
    }
}
