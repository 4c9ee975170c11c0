/// Scroll position of the page column, plus an optional glide target.
///
/// Two writers share this offset: programmatic page navigation (which sets a
/// glide target and lets the redraw tick ease toward it) and manual line
/// scrolling (which writes the offset directly). A manual write cancels any
/// in-flight glide; a newer glide target simply replaces the old one.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ScrollView {
    offset: f32,
    target: Option<f32>,
}

impl ScrollView {
    pub fn offset(&self) -> f32 {
        self.offset
    }

    pub fn is_gliding(&self) -> bool {
        self.target.is_some()
    }

    pub fn glide_to(&mut self, offset: f32) {
        self.target = Some(offset.max(0.0));
    }

    pub fn scroll_by(&mut self, rows: i32, max_offset: f32) {
        self.target = None;
        self.offset = (self.offset + rows as f32).clamp(0.0, max_offset.max(0.0));
    }

    /// Advances one animation step toward the target; snaps within half a
    /// row. Returns true when the offset moved.
    pub fn step_glide(&mut self, fraction: f32) -> bool {
        let Some(target) = self.target else {
            return false;
        };

        let remaining = target - self.offset;
        if remaining.abs() <= 0.5 {
            self.offset = target;
            self.target = None;
        } else {
            self.offset += remaining * fraction.clamp(0.05, 1.0);
        }
        true
    }

    /// Re-clamps after a layout change (resize, late page measurements).
    pub fn clamp_to(&mut self, max_offset: f32) {
        let max_offset = max_offset.max(0.0);
        self.offset = self.offset.clamp(0.0, max_offset);
        if let Some(target) = self.target {
            self.target = Some(target.clamp(0.0, max_offset));
        }
    }
}
