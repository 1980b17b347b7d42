use crate::probe::LocalAddress;
use crate::resolver::{LocationRecord, ResolutionError};

use smallvec::{smallvec, SmallVec};

/// Everything the view renders. Only [ViewStateController] writes it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ViewState {
    pub loading: bool,
    pub location: Option<LocationRecord>,
    pub error: Option<String>,
    pub local_address: Option<LocalAddress>,
    pub modal_visible: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Loading,
    Ready,
    Failed,
}

/// Issue order of a resolution, later requests get larger tickets.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Ticket(u64);

#[derive(Debug)]
pub enum Event {
    Mount,
    Submit(String),
    Resolved {
        ticket: Ticket,
        outcome: Result<LocationRecord, ResolutionError>,
    },
    LocalAddressFound(LocalAddress),
    DismissError,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Resolve { ticket: Ticket, query: String },
    Discover,
}

pub type Commands = SmallVec<[Command; 2]>;

/// Switches between the bare lookup view and the full one.
#[derive(Debug, Clone, Copy)]
pub struct ControllerOptions {
    pub track_loading: bool,
    pub probe_local_address: bool,
}

impl Default for ControllerOptions {
    fn default() -> Self {
        Self {
            track_loading: true,
            probe_local_address: true,
        }
    }
}

/// Reduces lookup outcomes and probe events into a single [ViewState].
///
/// It performs no I/O: every [ViewStateController::update] returns the
/// commands the caller has to run, their results come back as events.
pub struct ViewStateController {
    state: ViewState,
    phase: Phase,
    options: ControllerOptions,
    mounted: bool,
    issued: u64,
    applied: u64,
}

impl ViewStateController {
    pub fn new(options: ControllerOptions) -> Self {
        Self {
            state: ViewState::default(),
            phase: Phase::Idle,
            options,
            mounted: false,
            issued: 0,
            applied: 0,
        }
    }

    pub fn state(&self) -> &ViewState {
        &self.state
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn update(&mut self, event: Event) -> Commands {
        match event {
            Event::Mount => {
                if self.mounted {
                    log::debug!("ignoring repeated mount");
                    return Commands::new();
                }
                self.mounted = true;
                let mut commands: Commands = smallvec![self.begin_resolution(String::new())];
                if self.options.probe_local_address {
                    commands.push(Command::Discover);
                }
                commands
            }
            Event::Submit(query) => smallvec![self.begin_resolution(query.trim().to_owned())],
            Event::Resolved { ticket, outcome } => {
                self.finish_resolution(ticket, outcome);
                Commands::new()
            }
            Event::LocalAddressFound(address) => {
                self.state.local_address = Some(address);
                Commands::new()
            }
            Event::DismissError => {
                self.state.error = None;
                self.state.modal_visible = false;
                Commands::new()
            }
        }
    }

    fn begin_resolution(&mut self, query: String) -> Command {
        self.issued += 1;
        self.phase = Phase::Loading;
        self.state.loading = self.options.track_loading;
        self.state.error = None;
        self.state.modal_visible = false;
        Command::Resolve {
            ticket: Ticket(self.issued),
            query,
        }
    }

    fn finish_resolution(
        &mut self,
        ticket: Ticket,
        outcome: Result<LocationRecord, ResolutionError>,
    ) {
        if ticket.0 <= self.applied {
            log::debug!(
                "discarding outcome of resolution #{} superseded by #{}",
                ticket.0,
                self.applied
            );
            return;
        }
        self.applied = ticket.0;
        self.state.loading = self.options.track_loading && self.applied < self.issued;

        match outcome {
            Ok(record) => {
                log::info!(
                    "{} is in {}, {}, {}",
                    record.ip,
                    record.city,
                    record.region,
                    record.country_name
                );
                self.state.location = Some(record);
                self.state.error = None;
                self.state.modal_visible = false;
                self.phase = Phase::Ready;
            }
            Err(error) if self.applied < self.issued => {
                log::warn!(
                    "resolution #{} failed while #{} is pending: {error}",
                    ticket.0,
                    self.issued
                );
            }
            Err(error) => {
                log::warn!("resolution #{} failed: {error}", ticket.0);
                self.state.error = Some(error.to_string());
                self.state.modal_visible = true;
                self.phase = Phase::Failed;
            }
        }
        if self.applied < self.issued {
            self.phase = Phase::Loading;
        }
    }
}
