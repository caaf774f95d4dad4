//! Edge detection for the jump button
//!
//! Browsers fire keydown repeatedly while a key is held, and the render loop
//! samples input once per frame anyway. The sim wants a clean "pressed this
//! tick" signal, so the platform layer tracks the previous sample and reports
//! only the rising edge.

/// Turns a level-sampled button into a one-tick pulse
#[derive(Debug, Clone, Copy, Default)]
pub struct EdgeTrigger {
    was_pressed: bool,
}

impl EdgeTrigger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Feed the current button level; returns true only on press
    pub fn update(&mut self, pressed: bool) -> bool {
        let rising = pressed && !self.was_pressed;
        self.was_pressed = pressed;
        rising
    }

    /// Forget the held state (used when the window loses focus)
    pub fn reset(&mut self) {
        self.was_pressed = false;
    }
}
