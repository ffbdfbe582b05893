//! Display-order to render-order index translation
//!
//! The UI lists active, non-base layers top-to-bottom (position 1 is the
//! topmost layer); the render engine addresses its stack bottom-to-top
//! (index 0 is the base layer). The mapping depends on the current stack
//! size, so it must be recomputed after every membership change.

/// Translate a 1-based display position into a render index.
///
/// For an active stack of `active_count` layers (base included at render
/// index 0), display position `p` with `1 <= p <= active_count - 1` maps
/// to render index `active_count - p`. Returns `None` for positions
/// outside that range, including anything that would address the base
/// layer.
pub fn render_index_of(display_position: usize, active_count: usize) -> Option<usize> {
    if display_position >= 1 && display_position < active_count {
        Some(active_count - display_position)
    } else {
        None
    }
}
