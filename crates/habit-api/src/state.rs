//! Application state management
//!
//! Author: hephaex@gmail.com

use habit_core::AppConfig;
use habit_extractor::HabitPipeline;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Instant;

/// Application state shared across handlers
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,
    /// Server start time
    pub start_time: Instant,
    /// Request counter
    pub request_count: AtomicU64,
    /// Successful analyses
    pub analysis_count: AtomicU64,
    /// Ready status
    pub is_ready: AtomicBool,
    /// Extraction pipeline (absent when the language services are not configured)
    pub pipeline: Option<Arc<HabitPipeline>>,
}

impl AppState {
    /// Create new application state with config
    pub fn new(config: AppConfig) -> Self {
        Self {
            config,
            start_time: Instant::now(),
            request_count: AtomicU64::new(0),
            analysis_count: AtomicU64::new(0),
            is_ready: AtomicBool::new(true),
            pipeline: None,
        }
    }

    /// Attach the extraction pipeline
    pub fn with_pipeline(mut self, pipeline: Arc<HabitPipeline>) -> Self {
        self.pipeline = Some(pipeline);
        self
    }

    pub fn pipeline(&self) -> Option<Arc<HabitPipeline>> {
        self.pipeline.clone()
    }

    pub fn has_pipeline(&self) -> bool {
        self.pipeline.is_some()
    }

    /// Increment request counter
    pub fn increment_requests(&self) -> u64 {
        self.request_count.fetch_add(1, Ordering::SeqCst)
    }

    /// Get total request count
    pub fn get_request_count(&self) -> u64 {
        self.request_count.load(Ordering::SeqCst)
    }

    pub fn increment_analyses(&self) -> u64 {
        self.analysis_count.fetch_add(1, Ordering::SeqCst)
    }

    pub fn get_analysis_count(&self) -> u64 {
        self.analysis_count.load(Ordering::SeqCst)
    }

    /// Get uptime in seconds
    pub fn uptime_secs(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }

    /// Check if service is ready
    pub fn is_ready(&self) -> bool {
        self.is_ready.load(Ordering::SeqCst)
    }

    /// Set ready status
    pub fn set_ready(&self, ready: bool) {
        self.is_ready.store(ready, Ordering::SeqCst);
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(AppConfig::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_counters() {
        let state = AppState::default();
        assert_eq!(state.increment_requests(), 0);
        assert_eq!(state.increment_requests(), 1);
        assert_eq!(state.get_request_count(), 2);

        state.increment_analyses();
        assert_eq!(state.get_analysis_count(), 1);
    }

    #[test]
    fn test_ready_flag() {
        let state = AppState::default();
        assert!(state.is_ready());
        assert!(!state.has_pipeline());

        state.set_ready(false);
        assert!(!state.is_ready());
    }
}
