use crate::geometry::{Point, Rect};

/// Maps a pointer position to the band under it, counted from the bottom of
/// `bounds`. Returns `None` when the point is below the control or at/above
/// its top edge.
pub fn position_to_section(point: Point, bounds: Rect, sections: usize) -> Option<usize> {
    if sections == 0 || bounds.is_empty() {
        return None;
    }
    let offset = (bounds.max_y() - point.y).clamp(-1.0, bounds.height);
    let section_height = bounds.height / sections as f64;
    let section = (offset / section_height).floor();

    (section >= 0.0 && section < sections as f64).then_some(section as usize)
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PendingTap {
    section: usize,
    crossed: bool,
}

/// Tells a confirming tap apart from a drag. A tap counts only if it starts
/// and ends on the control without the selection moving in between.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TapTracker {
    pending: Option<PendingTap>,
}

impl TapTracker {
    pub fn begin(&mut self, section: usize, inside: bool) {
        self.pending = inside.then_some(PendingTap {
            section,
            crossed: false,
        });
    }

    pub fn section_changed(&mut self) {
        if let Some(tap) = self.pending.as_mut() {
            tap.crossed = true;
        }
    }

    /// Ends the gesture, returning the confirmed section if it was a tap.
    pub fn finish(&mut self, section: usize, inside: bool) -> Option<usize> {
        self.pending
            .take()
            .filter(|tap| inside && !tap.crossed && tap.section == section)
            .map(|tap| tap.section)
    }

    pub fn cancel(&mut self) {
        self.pending = None;
    }

    pub fn is_tracking(&self) -> bool {
        self.pending.is_some()
    }
}
