//! Viewport placement and resize settling.

use crate::camera::Eye;

/// Axis-aligned rectangle in physical window pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PixelRect {
    /// Left edge.
    pub x: u32,
    /// Top edge.
    pub y: u32,
    /// Width.
    pub width: u32,
    /// Height.
    pub height: u32,
}

impl PixelRect {
    /// The part of this rectangle inside a `width` x `height` surface, or
    /// `None` if nothing is left.
    #[must_use]
    pub fn clipped(&self, width: u32, height: u32) -> Option<Self> {
        if self.x >= width || self.y >= height {
            return None;
        }
        let w = self.width.min(width - self.x);
        let h = self.height.min(height - self.y);
        (w > 0 && h > 0).then_some(Self {
            x: self.x,
            y: self.y,
            width: w,
            height: h,
        })
    }
}

/// Where each eye's image goes in the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewportLayout {
    /// Left eye (or the single mono view).
    pub left: PixelRect,
    /// Right eye in stereo.
    pub right: Option<PixelRect>,
}

impl ViewportLayout {
    /// Place the view(s) to the right of the panel.
    ///
    /// Stereo splits the remaining width in half with a one pixel gap
    /// before the right eye.
    #[must_use]
    pub fn compute(window: (u32, u32), panel_width: u32, stereo: bool) -> Self {
        let (width, height) = window;
        let x_base = panel_width.min(width);
        let available = width - x_base;

        if stereo {
            let half = available / 2;
            Self {
                left: PixelRect {
                    x: x_base,
                    y: 0,
                    width: half,
                    height,
                },
                right: Some(PixelRect {
                    x: x_base + half + 1,
                    y: 0,
                    width: half,
                    height,
                }),
            }
        } else {
            Self {
                left: PixelRect {
                    x: x_base,
                    y: 0,
                    width: available,
                    height,
                },
                right: None,
            }
        }
    }

    /// Size of each eye's image.
    #[must_use]
    pub fn resolution(&self) -> (u32, u32) {
        (self.left.width.max(1), self.left.height.max(1))
    }

    /// Visible eyes with their rectangles.
    pub fn eyes(&self) -> impl Iterator<Item = (Eye, PixelRect)> + '_ {
        std::iter::once((Eye::Left, self.left))
            .chain(self.right.map(|rect| (Eye::Right, rect)))
    }
}

/// Countdown that fires once a fixed number of ticks after the last
/// restart, so a burst of resize events lays out only once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResizeDebounce {
    settle_ticks: u32,
    remaining: u32,
}

impl ResizeDebounce {
    /// Idle debounce firing `settle_ticks` ticks after each restart.
    #[must_use]
    pub fn new(settle_ticks: u32) -> Self {
        Self {
            settle_ticks: settle_ticks.max(1),
            remaining: 0,
        }
    }

    /// Start (or restart) the full countdown.
    pub fn restart(&mut self) {
        self.remaining = self.settle_ticks;
    }

    /// Fire after exactly `ticks` ticks, ignoring the configured delay.
    pub fn arm(&mut self, ticks: u32) {
        self.remaining = ticks.max(1);
    }

    /// Whether a countdown is running.
    #[must_use]
    pub fn pending(&self) -> bool {
        self.remaining > 0
    }

    /// Advance one tick; `true` on the tick the countdown reaches zero.
    pub fn tick(&mut self) -> bool {
        if self.remaining == 0 {
            return false;
        }
        self.remaining -= 1;
        self.remaining == 0
    }
}
