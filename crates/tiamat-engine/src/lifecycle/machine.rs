/// Coarse application phase.
///
/// `Uninitialized → Running` happens only on full init success;
/// `Running → Terminating` on a quit/key event or a fatal frame error.
/// `Terminating` is terminal.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Phase {
    Uninitialized,
    Running,
    Terminating,
}

/// Platform-agnostic classification of an incoming window event.
///
/// The runtime maps `winit` events onto this enum; the machine itself never
/// sees platform types.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum LifecycleEvent {
    /// Window close was requested.
    Quit,
    /// Any key was pressed. Key identity is irrelevant here.
    KeyDown,
    /// Everything else. Ignored by the machine.
    Other,
}

/// Directive returned to the runtime after feeding the machine.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum Step {
    /// Keep iterating.
    Continue,
    /// Begin teardown now. Emitted at most once per process.
    Shutdown,
}

/// The lifecycle state machine.
///
/// One instance lives in the runtime state. Teardown idempotence is enforced
/// here rather than at the resource-release sites: [`Lifecycle::begin_shutdown`]
/// answers `true` exactly once.
#[derive(Debug)]
pub struct Lifecycle {
    phase: Phase,
    shutdown_started: bool,
}

impl Lifecycle {
    pub fn new() -> Self {
        Self {
            phase: Phase::Uninitialized,
            shutdown_started: false,
        }
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Records that initialization completed successfully.
    ///
    /// Init failures never reach this point; the runtime exits the loop
    /// directly, which is the process-exit equivalent of the failure state.
    pub fn initialized(&mut self) {
        debug_assert_eq!(self.phase, Phase::Uninitialized);
        self.phase = Phase::Running;
    }

    /// Feeds one classified event into the machine.
    ///
    /// Quit and key-down events request shutdown; the transition fires exactly
    /// once. Events arriving after the machine is already `Terminating` are
    /// not processed.
    pub fn on_event(&mut self, ev: LifecycleEvent) -> Step {
        if self.phase != Phase::Running {
            return Step::Continue;
        }

        match ev {
            LifecycleEvent::Quit | LifecycleEvent::KeyDown => {
                self.phase = Phase::Terminating;
                Step::Shutdown
            }
            LifecycleEvent::Other => Step::Continue,
        }
    }

    /// Records a fatal per-frame error.
    ///
    /// Frame failures end the whole process; there is no degraded mode.
    pub fn on_frame_failure(&mut self) -> Step {
        if self.phase != Phase::Running {
            return Step::Continue;
        }
        self.phase = Phase::Terminating;
        Step::Shutdown
    }

    /// Claims the right to run teardown.
    ///
    /// Returns `true` on the first call only; resources must be released under
    /// that claim so a second shutdown request is a no-op.
    pub fn begin_shutdown(&mut self) -> bool {
        if self.shutdown_started {
            return false;
        }
        self.shutdown_started = true;
        self.phase = Phase::Terminating;
        true
    }
}

impl Default for Lifecycle {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn running() -> Lifecycle {
        let mut lc = Lifecycle::new();
        lc.initialized();
        lc
    }

    #[test]
    fn starts_uninitialized() {
        assert_eq!(Lifecycle::new().phase(), Phase::Uninitialized);
    }

    #[test]
    fn init_moves_to_running() {
        assert_eq!(running().phase(), Phase::Running);
    }

    #[test]
    fn other_events_keep_running() {
        let mut lc = running();
        for _ in 0..100 {
            assert_eq!(lc.on_event(LifecycleEvent::Other), Step::Continue);
            assert_eq!(lc.phase(), Phase::Running);
        }
    }

    #[test]
    fn quit_terminates() {
        let mut lc = running();
        assert_eq!(lc.on_event(LifecycleEvent::Quit), Step::Shutdown);
        assert_eq!(lc.phase(), Phase::Terminating);
    }

    #[test]
    fn any_key_terminates() {
        let mut lc = running();
        assert_eq!(lc.on_event(LifecycleEvent::KeyDown), Step::Shutdown);
        assert_eq!(lc.phase(), Phase::Terminating);
    }

    #[test]
    fn shutdown_is_requested_exactly_once() {
        let mut lc = running();
        assert_eq!(lc.on_event(LifecycleEvent::Quit), Step::Shutdown);

        // Later events must not re-trigger teardown.
        assert_eq!(lc.on_event(LifecycleEvent::Quit), Step::Continue);
        assert_eq!(lc.on_event(LifecycleEvent::KeyDown), Step::Continue);
        assert_eq!(lc.on_event(LifecycleEvent::Other), Step::Continue);
        assert_eq!(lc.phase(), Phase::Terminating);
    }

    #[test]
    fn frame_failure_terminates() {
        let mut lc = running();
        assert_eq!(lc.on_frame_failure(), Step::Shutdown);
        assert_eq!(lc.phase(), Phase::Terminating);
        assert_eq!(lc.on_frame_failure(), Step::Continue);
    }

    #[test]
    fn begin_shutdown_claims_once() {
        let mut lc = running();
        lc.on_event(LifecycleEvent::Quit);
        assert!(lc.begin_shutdown());
        assert!(!lc.begin_shutdown());
        assert!(!lc.begin_shutdown());
    }

    #[test]
    fn begin_shutdown_without_prior_event_still_claims_once() {
        // `exiting` can fire even when the loop was torn down externally.
        let mut lc = running();
        assert!(lc.begin_shutdown());
        assert_eq!(lc.phase(), Phase::Terminating);
        assert!(!lc.begin_shutdown());
    }
}
