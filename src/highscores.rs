//! High score persistence
//!
//! A single best score, stored in LocalStorage as a plain integer string.
//! Storage failures are logged and swallowed; the game never blocks on them.

/// The persisted best score
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HighScore {
    pub best: u32,
}

impl HighScore {
    /// LocalStorage key (used only in wasm32)
    #[allow(dead_code)]
    const STORAGE_KEY: &'static str = "snack_stack_high_score";

    pub fn new() -> Self {
        Self { best: 0 }
    }

    pub fn qualifies(&self, score: u32) -> bool {
        score > self.best
    }

    /// Record a score; returns true when it's a new best
    pub fn record(&mut self, score: u32) -> bool {
        if !self.qualifies(score) {
            return false;
        }
        self.best = score;
        true
    }

    /// Load the best score from LocalStorage (WASM only)
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();

        if let Some(storage) = storage {
            if let Ok(Some(raw)) = storage.get_item(Self::STORAGE_KEY) {
                if let Ok(best) = raw.parse::<u32>() {
                    log::info!("Loaded high score: {}", best);
                    return Self { best };
                }
                log::warn!("Ignoring unparseable high score entry: {:?}", raw);
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

    /// Native stubs
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Self {
        Self::new()
    }

    #[cfg(not(target_arch = "wasm32"))]
    pub fn save(&self) {
        // No-op for native
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_record_keeps_best() {
        let mut hs = HighScore::new();
        assert!(hs.record(100));
        assert!(!hs.record(80));
        assert!(!hs.record(100));
        assert!(hs.record(150));
        assert_eq!(hs.best, 150);
    }

    #[test]
    fn test_zero_never_qualifies_over_zero() {
        let hs = HighScore::new();
        assert!(!hs.qualifies(0));
        assert!(hs.qualifies(1));
    }
}
