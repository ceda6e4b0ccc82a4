use crossterm::event::Event as CrosstermEvent;

#[derive(Debug, Clone, derive_more::IsVariant, derive_more::From)]
pub(super) enum TuiEvent {
    /// One console loop iteration is due.
    Tick,
    /// The terminal should be redrawn.
    Render,
    Crossterm(CrosstermEvent),
}
