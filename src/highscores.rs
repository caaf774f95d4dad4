//! Persistent best score
//!
//! Stored in LocalStorage on wasm, in the platform data directory on native.
//! Load and save failures are never fatal; a missing or corrupt record just
//! resets the best score to zero.

use serde::{Deserialize, Serialize};

/// Best score achieved across all sessions
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "flappy_ball_highscore";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    /// Check if a finished run beats the record
    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Fold a finished run's score into the record; returns true if it improved
    pub fn update(&mut self, score: u32) -> bool {
        if self.qualifies(score) {
            self.best = score;
            true
        } else {
            false
        }
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(text)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = text.trim().parse::<u32>() {
                    log::info!("Loaded high score: {}", best);
                    return Self { best };
                }
            }
        }

        log::info!("No high score found, starting fresh");
        Self::new()
    }

    /// Save the best score to LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn save(&self) {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            let _ = storage.set_item(Self::STORAGE_KEY, &self.best.to_string());
            log::info!("High score saved: {}", self.best);
        }
    }

    /// Load the best score from the data directory (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        let Some(path) = Self::record_path() else {
            log::warn!("No data directory available, high score will not persist");
            return Self::new();
        };

        match std::fs::read_to_string(&path) {
            Ok(text) => match text.trim().parse::<u32>() {
                Ok(best) => {
                    log::info!("Loaded high score: {}", best);
                    Self { best }
                }
                Err(err) => {
                    log::warn!("Corrupt high score file {}: {}", path.display(), err);
                    Self::new()
                }
            },
            Err(_) => Self::new(),
        }
    }

    /// Save the best score to the data directory (native only)
    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        let Some(path) = Self::record_path() else {
            return;
        };

        if let Some(parent) = path.parent() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                log::warn!("Could not create {}: {}", parent.display(), err);
                return;
            }
        }

        match std::fs::write(&path, self.best.to_string()) {
            Ok(()) => log::info!("High score saved: {}", self.best),
            Err(err) => log::warn!("Could not save high score: {}", err),
        }
    }

    #[cfg(not(target_arch = "wasm32"))]
    fn record_path() -> Option<std::path::PathBuf> {
        dirs::data_dir().map(|d| d.join("flappy-ball").join("highscore"))
    }
}
