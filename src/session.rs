use rand::SeedableRng;
use rand::rngs::StdRng;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, oneshot, watch};
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::error::SessionError;
use crate::quiz::{Config, Effect, Event, Quiz};
use crate::settings::SessionSettings;

#[derive(Debug)]
pub enum SessionMessage {
    Event(Event),
    /// Re-initialises the quiz from its config, whatever state it is in.
    Start,
    Snapshot {
        respond_to: oneshot::Sender<Quiz>,
    },
    Shutdown,
}

/// Sole owner of one quiz. Applies events one at a time, performs the
/// effects they request and drives the countdown tick.
pub struct SessionActor {
    receiver: mpsc::Receiver<SessionMessage>,
    self_sender: mpsc::Sender<SessionMessage>,
    session_id: Uuid,
    config: Arc<Config>,
    quiz: Quiz,
    state_tx: watch::Sender<Quiz>,
    rng: StdRng,
    tick_period: Duration,
}

impl SessionActor {
    fn new(
        receiver: mpsc::Receiver<SessionMessage>,
        self_sender: mpsc::Sender<SessionMessage>,
        session_id: Uuid,
        config: Arc<Config>,
        state_tx: watch::Sender<Quiz>,
        rng: StdRng,
        tick_period: Duration,
    ) -> Self {
        SessionActor {
            receiver,
            self_sender,
            session_id,
            config,
            quiz: Quiz::Inactive,
            state_tx,
            rng,
            tick_period,
        }
    }

    fn start_quiz(&mut self) {
        tracing::info!(
            quiz.title = %self.config.title(),
            questions.count = self.config.questions().len(),
            difficulty = self.config.difficulty().label(),
            "Starting quiz"
        );
        let transition = Quiz::start(Arc::clone(&self.config));
        self.apply(transition);
    }

    fn handle_event(&mut self, event: Event) {
        let quiz = std::mem::take(&mut self.quiz);
        let transition = quiz.reduce(event);
        self.apply(transition);
    }

    fn apply(&mut self, (quiz, effect): (Quiz, Option<Effect>)) {
        self.quiz = quiz;
        self.state_tx.send_replace(self.quiz.clone());
        if let Some(effect) = effect {
            self.perform_effect(effect);
        }
    }

    /// The completion is queued behind whatever is already in the mailbox.
    fn perform_effect(&mut self, effect: Effect) {
        tracing::debug!(effect = ?effect, "Performing effect");
        let event = effect.run(&mut self.rng);
        let sender = self.self_sender.clone();
        let session_id = self.session_id;
        tokio::spawn(async move {
            if sender.send(SessionMessage::Event(event)).await.is_err() {
                tracing::warn!(
                    session.id = %session_id,
                    "Session closed before effect completion was delivered"
                );
            }
        });
    }

    /// Returns `true` when the actor should stop.
    #[tracing::instrument(skip(self, msg), fields(
        session.id = %self.session_id,
        msg_type = %std::any::type_name_of_val(&msg)
    ))]
    fn handle_message(&mut self, msg: SessionMessage) -> bool {
        match msg {
            SessionMessage::Event(event) => self.handle_event(event),
            SessionMessage::Start => self.start_quiz(),
            SessionMessage::Snapshot { respond_to } => {
                if respond_to.send(self.quiz.clone()).is_err() {
                    tracing::debug!("Snapshot requester went away");
                }
            }
            SessionMessage::Shutdown => return true,
        }
        false
    }
}

#[tracing::instrument(skip(actor), fields(session.id = %actor.session_id))]
pub async fn run_session_actor(mut actor: SessionActor) {
    tracing::info!("Session actor started");

    let mut ticker = tokio::time::interval(actor.tick_period);
    ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
    ticker.reset();

    actor.start_quiz();

    loop {
        tokio::select! {
            maybe_msg = actor.receiver.recv() => {
                match maybe_msg {
                    Some(msg) => {
                        // Start and Restart can replace a counting question with a fresh one
                        let restarts = matches!(
                            msg,
                            SessionMessage::Start | SessionMessage::Event(Event::Restart)
                        );
                        let counting_before = actor.quiz.active_countdown().is_some();
                        if actor.handle_message(msg) {
                            tracing::info!("Session shutdown requested");
                            break;
                        }
                        let countdown_after = actor.quiz.active_countdown();
                        if countdown_after.is_some() && (restarts || !counting_before) {
                            tracing::trace!(countdown = ?countdown_after, "New question asked, resetting ticker");
                            ticker.reset();
                        }
                    }
                    None => {
                        tracing::info!("Session channel closed. Shutting down");
                        break;
                    }
                }
            }
            _ = ticker.tick(), if actor.quiz.active_countdown().is_some() => {
                actor.handle_event(Event::Tick);
            }
        }
    }

    tracing::info!("Session actor stopped");
}

#[derive(Clone, Debug)]
pub struct SessionHandle {
    sender: mpsc::Sender<SessionMessage>,
    state_rx: watch::Receiver<Quiz>,
    pub session_id: Uuid,
}

impl SessionHandle {
    pub fn spawn(config: Arc<Config>, settings: &SessionSettings) -> Self {
        Self::spawn_with_rng(config, settings, StdRng::from_entropy())
    }

    pub fn spawn_with_rng(config: Arc<Config>, settings: &SessionSettings, rng: StdRng) -> Self {
        let (sender, receiver) = mpsc::channel(settings.buffer_size);
        let (state_tx, state_rx) = watch::channel(Quiz::Inactive);
        let session_id = Uuid::new_v4();
        let actor = SessionActor::new(
            receiver,
            sender.clone(),
            session_id,
            config,
            state_tx,
            rng,
            settings.tick_period(),
        );
        tokio::spawn(run_session_actor(actor));
        Self {
            sender,
            state_rx,
            session_id,
        }
    }

    async fn send(&self, msg: SessionMessage) -> Result<(), SessionError> {
        self.sender
            .send(msg)
            .await
            .map_err(|_| SessionError::Closed(self.session_id))
    }

    pub async fn send_event(&self, event: Event) -> Result<(), SessionError> {
        self.send(SessionMessage::Event(event)).await
    }

    pub async fn start(&self) -> Result<(), SessionError> {
        self.send(SessionMessage::Start).await
    }

    pub async fn shutdown(&self) -> Result<(), SessionError> {
        self.send(SessionMessage::Shutdown).await
    }

    pub async fn snapshot(&self) -> Result<Quiz, SessionError> {
        let (respond_to, rx) = oneshot::channel();
        self.send(SessionMessage::Snapshot { respond_to }).await?;
        rx.await
            .map_err(|_| SessionError::NoResponse(self.session_id))
    }

    /// Receives every published quiz state, for renderers.
    pub fn subscribe(&self) -> watch::Receiver<Quiz> {
        self.state_rx.clone()
    }
}
