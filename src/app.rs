use crate::config::Config;
use crate::controller::{
    Command, ControllerOptions, Event, Ticket, ViewState, ViewStateController,
};
use crate::probe::LocalAddressProbe;
use crate::resolver::{ResolutionError, Resolver};

use hyper::client::connect::Connect;
use std::sync::Arc;
use std::time::Duration;
use thiserror::Error;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::{mpsc, watch};
use tokio::task::JoinHandle;

#[derive(Debug, Error)]
#[error("the view state controller has stopped")]
pub struct AppStopped;

#[derive(Debug, Clone, Copy, Default)]
pub struct AppOptions {
    pub controller: ControllerOptions,
    /// Deadline for each lookup, none by default
    pub resolve_timeout: Option<Duration>,
    /// Abort older in-flight lookups when a new one starts
    pub cancel_superseded: bool,
}

impl AppOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            controller: config.controller_options(),
            resolve_timeout: config.provider.timeout.map(Into::into),
            cancel_superseded: config.provider.cancel_superseded,
        }
    }
}

enum Input {
    Event(Event),
    Shutdown,
}

/// The view side of a running [App]: submits input and watches the state.
#[derive(Clone)]
pub struct AppHandle {
    inputs: mpsc::UnboundedSender<Input>,
    states: watch::Receiver<ViewState>,
}

impl AppHandle {
    fn send(&self, input: Input) -> Result<(), AppStopped> {
        self.inputs.send(input).map_err(|_| AppStopped)
    }

    /// A blank query looks up our own public address.
    pub fn submit(&self, query: impl Into<String>) -> Result<(), AppStopped> {
        self.send(Input::Event(Event::Submit(query.into())))
    }

    pub fn dismiss_error(&self) -> Result<(), AppStopped> {
        self.send(Input::Event(Event::DismissError))
    }

    pub fn shutdown(&self) -> Result<(), AppStopped> {
        self.send(Input::Shutdown)
    }

    pub fn subscribe(&self) -> watch::Receiver<ViewState> {
        self.states.clone()
    }
}

/// Feed terminal lines to the app: `:close` dismisses the error modal, any
/// other line is a query. Returns on `:quit`, end of input, a read error or
/// a stopped app, leaving the shutdown to the caller.
pub async fn forward_lines<R: AsyncBufRead + Unpin>(input: R, handle: &AppHandle) {
    let mut lines = input.lines();
    loop {
        let line = match lines.next_line().await {
            Ok(Some(line)) => line,
            Ok(None) => return,
            Err(e) => {
                log::error!("cannot read input: {e}");
                return;
            }
        };
        let sent = match line.trim() {
            ":quit" => return,
            ":close" => handle.dismiss_error(),
            query => handle.submit(query),
        };
        if let Err(e) = sent {
            log::error!("{e}");
            return;
        }
    }
}

/// Runs a [ViewStateController]: executes its commands as tasks and feeds
/// their outcomes back, one event at a time.
pub struct App<C> {
    controller: ViewStateController,
    resolver: Arc<Resolver<C>>,
    probe: LocalAddressProbe,
    options: AppOptions,
    inputs: mpsc::UnboundedReceiver<Input>,
    outcomes: mpsc::UnboundedReceiver<Event>,
    outcome_sender: mpsc::UnboundedSender<Event>,
    states: watch::Sender<ViewState>,
    stop: watch::Sender<bool>,
    resolutions: Vec<JoinHandle<()>>,
    discoveries: Vec<JoinHandle<()>>,
}

impl<C> App<C>
where
    C: Connect + Clone + Send + Sync + 'static,
{
    pub fn new(
        resolver: Resolver<C>,
        probe: LocalAddressProbe,
        options: AppOptions,
    ) -> (Self, AppHandle) {
        let (input_sender, inputs) = mpsc::unbounded_channel();
        let (outcome_sender, outcomes) = mpsc::unbounded_channel();
        let (states, state_receiver) = watch::channel(ViewState::default());
        let (stop, _) = watch::channel(false);
        let app = Self {
            controller: ViewStateController::new(options.controller),
            resolver: Arc::new(resolver),
            probe,
            options,
            inputs,
            outcomes,
            outcome_sender,
            states,
            stop,
            resolutions: vec![],
            discoveries: vec![],
        };
        let handle = AppHandle {
            inputs: input_sender,
            states: state_receiver,
        };
        (app, handle)
    }

    /// Mount, then process events until shutdown or until every handle is gone.
    pub async fn run(mut self) {
        self.dispatch(Event::Mount);
        loop {
            tokio::select! {
                input = self.inputs.recv() => match input {
                    Some(Input::Event(event)) => self.dispatch(event),
                    Some(Input::Shutdown) | None => break,
                },
                Some(event) = self.outcomes.recv() => self.dispatch(event),
            }
        }
        self.teardown().await;
    }

    fn dispatch(&mut self, event: Event) {
        let commands = self.controller.update(event);
        self.publish();
        for command in commands {
            match command {
                Command::Resolve { ticket, query } => self.spawn_resolution(ticket, query),
                Command::Discover => self.spawn_discovery(),
            }
        }
    }

    fn publish(&self) {
        let state = self.controller.state();
        self.states.send_if_modified(|current| {
            if current == state {
                false
            } else {
                *current = state.clone();
                true
            }
        });
    }

    fn spawn_resolution(&mut self, ticket: Ticket, query: String) {
        self.resolutions.retain(|task| !task.is_finished());
        if self.options.cancel_superseded {
            for task in self.resolutions.drain(..) {
                task.abort();
            }
        }

        let resolver = self.resolver.clone();
        let outcomes = self.outcome_sender.clone();
        let timeout = self.options.resolve_timeout;
        self.resolutions.push(tokio::spawn(async move {
            let outcome = match timeout {
                Some(limit) => tokio::time::timeout(limit, resolver.resolve(&query))
                    .await
                    .unwrap_or_else(|_| Err(ResolutionError::TimedOut(limit))),
                None => resolver.resolve(&query).await,
            };
            // The receiver only goes away together with the app
            let _ = outcomes.send(Event::Resolved { ticket, outcome });
        }));
    }

    fn spawn_discovery(&mut self) {
        let mut discovery = self.probe.discover();
        let outcomes = self.outcome_sender.clone();
        let mut stop = self.stop.subscribe();
        self.discoveries.push(tokio::spawn(async move {
            loop {
                tokio::select! {
                    address = discovery.next() => match address {
                        Some(address) => {
                            if outcomes.send(Event::LocalAddressFound(address)).is_err() {
                                break;
                            }
                        }
                        None => break,
                    },
                    _ = stop.changed() => break,
                }
            }
            discovery.finish().await;
        }));
    }

    async fn teardown(mut self) {
        let _ = self.stop.send(true);
        for task in self.discoveries.drain(..) {
            if let Err(e) = task.await {
                log::warn!("local address discovery ended abnormally: {e}");
            }
        }
        for task in self.resolutions.drain(..) {
            task.abort();
        }
        log::debug!("view state controller stopped");
    }
}
