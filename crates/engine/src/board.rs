//! Board sizing from the display's startup shape query.

use crate::term::DisplaySink;
use crate::types::{ConfigError, GameConfig};

/// Resolve and validate the board size for an opened display.
///
/// The board is `min(width, height)` of the display's shape unless the
/// config names an explicit size, which must fit.
pub fn board_for_display<D: DisplaySink + ?Sized>(
    config: &GameConfig,
    display: &D,
) -> Result<usize, ConfigError> {
    let (width, height) = display.shape();
    let board = config.resolve_board_size(width, height)?;
    config.validate(board)?;
    Ok(board)
}
