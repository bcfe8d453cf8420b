use strum_macros::AsRefStr;

/// Where the controller is in a round's lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, AsRefStr)]
pub enum GameState {
    /// Waiting on the setup screen; no round has started yet.
    #[default]
    Idle,
    Playing,
    Won,
    Lost,
}

/// Permission to run one frame of a particular round.
///
/// Every new game invalidates the tickets of the rounds before it, so a frame loop left
/// over from an earlier round cannot touch the current one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FrameTicket {
    pub(crate) generation: u64,
}

impl FrameTicket {
    pub fn generation(&self) -> u64 {
        self.generation
    }
}
