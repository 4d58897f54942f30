use tokio::sync::watch;

use crate::error::{DeskError, Result};
use crate::gateway::{ExportSink, RecordGateway};
use crate::session::{AuthSession, SessionStore};
use crate::validation::Credentials;

use super::action::{Action, Command};
use super::reducer::reduce;
use super::state::{AppState, OpFamily};

/// Owns the application state and evaluates commands against a gateway.
///
/// Every state change goes through [`reduce`] and is published on a watch
/// channel, so subscribers always see whole snapshots. Overlapping commands
/// of the same family are not serialized: whichever settles last wins.
pub struct Store<G> {
    gateway: G,
    exporter: ExportSink,
    state: watch::Sender<AppState>,
}

impl<G: RecordGateway> Store<G> {
    pub fn new(gateway: G, exporter: ExportSink) -> Self {
        let (state, _) = watch::channel(AppState::default());
        Self {
            gateway,
            exporter,
            state,
        }
    }

    pub fn gateway(&self) -> &G {
        &self.gateway
    }

    pub fn exporter(&self) -> &ExportSink {
        &self.exporter
    }

    pub fn snapshot(&self) -> AppState {
        self.state.borrow().clone()
    }

    pub fn subscribe(&self) -> watch::Receiver<AppState> {
        self.state.subscribe()
    }

    fn apply(&self, action: Action) {
        self.state
            .send_modify(|state| *state = reduce(std::mem::take(state), action));
    }

    fn fail(&self, family: OpFamily, err: &DeskError) {
        tracing::warn!("{} failed: {err}", family.label());
        self.apply(Action::Failed {
            family,
            kind: err.kind(),
            message: err.to_string(),
        });
    }

    /// Evaluate a command. The outcome lands in the state either way; the
    /// error is also handed back so command-line callers can report it.
    pub async fn dispatch(&self, command: Command) -> Result<()> {
        let family = command.family();
        self.apply(Action::Started(family));

        match self.run(command).await {
            Ok(action) => {
                self.apply(action);
                Ok(())
            }
            Err(err) => {
                self.fail(family, &err);
                Err(err)
            }
        }
    }

    async fn run(&self, command: Command) -> Result<Action> {
        let action = match command {
            Command::FetchAll => Action::FetchedAll(self.gateway.list().await?),
            Command::FetchOne(id) => Action::FetchedOne(self.gateway.get_by_id(&id).await?),
            Command::Add(draft) => Action::Added(self.gateway.create(&draft).await?),
            Command::Update { id, record } => {
                let outcome = self.gateway.update(&id, &record).await?;
                Action::Updated {
                    record: outcome.record,
                    message: outcome.message,
                }
            }
            Command::Delete(id) => {
                self.gateway.remove(&id).await?;
                Action::Deleted(id)
            }
            Command::Export(id) => {
                let document = self.gateway.export_document(&id).await?;
                Action::Exported(self.exporter.save(&id, &document).await?)
            }
        };
        Ok(action)
    }

    /// Sign in through `session`, recording the outcome under the login flag
    pub async fn login(
        &self,
        session: &SessionStore,
        credentials: &Credentials,
    ) -> Result<AuthSession> {
        self.apply(Action::Started(OpFamily::Login));
        match session.login(credentials).await {
            Ok(auth) => {
                self.apply(Action::LoggedIn(auth.user.clone()));
                Ok(auth)
            }
            Err(err) => {
                self.fail(OpFamily::Login, &err);
                Err(err)
            }
        }
    }
}
