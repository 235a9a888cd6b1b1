//! Renderer boundary.

use crate::combat::CombatState;
use crate::core::log::GameLog;
use crate::core::run_state::RunState;
use crate::events::RoomStatus;
use crate::items::MerchantKind;

/// Read-only snapshot handed to the renderer after every change.
#[derive(Debug, Clone, Copy)]
pub struct SessionView<'a> {
    pub run: Option<&'a RunState>,
    pub combat: Option<&'a CombatState>,
    pub merchant: Option<MerchantKind>,
    pub status: RoomStatus,
    pub log: &'a GameLog,
}

/// Draws session snapshots. Any `FnMut(&SessionView)` closure works.
pub trait Renderer {
    fn render(&mut self, view: &SessionView<'_>);
}

impl<F> Renderer for F
where
    F: FnMut(&SessionView<'_>),
{
    fn render(&mut self, view: &SessionView<'_>) {
        self(view)
    }
}

/// Discards every frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullRenderer;

impl Renderer for NullRenderer {
    fn render(&mut self, _view: &SessionView<'_>) {}
}
