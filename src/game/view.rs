//! Display widget seam
//!
//! The board display and the status readout the controller keeps in sync.
//! The widget has no chess knowledge: it draws whatever FEN it is given and
//! reports drags back through the controller's drag-start / drop / snap-end
//! hooks.

use shakmaty::Square;

/// Board display plus status readout
pub trait BoardView {
    /// Redraw the board from a FEN position string
    fn position(&mut self, fen: &str);

    /// Remove every piece from the display
    fn clear(&mut self);

    /// Replace the status readout text
    fn set_status(&mut self, text: &str);

    /// The dropped piece goes back to its origin square
    fn snapback(&mut self, _origin: Square, _destination: Square) {}
}
