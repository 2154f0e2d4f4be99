//! The host-CAD capability boundary: the core pipeline depends only on this
//! trait, never a concrete CAD binding, so swapping the emitted format or
//! targeting a real application never touches placement, routing, zone
//! synthesis, or validation.
pub mod error;
pub mod specctra;

use crate::model::component::Component;
use crate::model::track::Track;
use crate::model::via::Via;
use crate::model::zone::Zone;
pub use crate::backend::error::BackendError;

/// A sink a finalized board is emitted to. Calls arrive in board order
/// (components, then tracks, then vias, then zones); a backend that cares
/// about ordering may rely on that, but nothing downstream depends on any
/// particular call sequence completing before another starts.
pub trait BoardBackend {
    fn place_footprint(&mut self, component: &Component);
    fn create_track(&mut self, track: &Track);
    fn create_via(&mut self, via: &Via);
    fn create_zone(&mut self, zone: &Zone);

    /// Writes the accumulated board to `path`, consuming no further calls
    /// afterward.
    fn persist(&mut self, path: &std::path::Path) -> Result<(), BackendError>;
}

/// Feeds an entire finalized board into `backend` in the fixed component /
/// track / via / zone order described on [`BoardBackend`].
pub fn emit_board(backend: &mut dyn BoardBackend, board: &crate::model::board::Board) {
    for component in &board.components {
        backend.place_footprint(component);
    }
    for track in &board.tracks {
        backend.create_track(track);
    }
    for via in &board.vias {
        backend.create_via(via);
    }
    for zone in &board.zones {
        backend.create_zone(zone);
    }
}
