//! Thread-safe wrapper around a capture session.

use std::sync::{Mutex, MutexGuard, PoisonError, RwLock};

use sketchpad_config::SketchConfig;

use crate::error::SessionError;
use crate::events::SessionEvent;
use crate::export::{InteractionRecord, SketchRecord};
use crate::session::{CaptureSession, Frame, FrameSample};

type EventListener = Box<dyn Fn(&SessionEvent) + Send + Sync>;

/// A capture session shared between threads.
///
/// Every mutation of the sketch goes through a single mutex, so frames from
/// different threads are applied one at a time and in the order they
/// acquire the lock. Events from each frame are fanned out to registered
/// listeners after the lock is released.
pub struct SharedSession {
    session: Mutex<CaptureSession>,
    event_listeners: RwLock<Vec<EventListener>>,
}

impl std::fmt::Debug for SharedSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let listener_count = self
            .event_listeners
            .read()
            .map(|l| l.len())
            .unwrap_or(0);
        // try_lock: formatting from inside `with_session` must not block
        let total_points = self.session.try_lock().ok().map(|s| s.total_points());
        f.debug_struct("SharedSession")
            .field("total_points", &total_points)
            .field("listener_count", &listener_count)
            .finish()
    }
}

impl SharedSession {
    /// Create a shared session, rejecting invalid configuration
    pub fn new(config: SketchConfig) -> Result<Self, SessionError> {
        Ok(Self::from_session(CaptureSession::new(config)?))
    }

    /// Wrap an existing session
    pub fn from_session(session: CaptureSession) -> Self {
        Self {
            session: Mutex::new(session),
            event_listeners: RwLock::new(Vec::new()),
        }
    }

    /// Process one frame and notify listeners of its events
    pub fn frame(&self, sample: FrameSample) -> Frame {
        let frame = self.lock().frame(sample);
        self.emit_events(&frame.events);
        frame
    }

    /// Run `f` with read access to the session
    pub fn with_session<R>(&self, f: impl FnOnce(&CaptureSession) -> R) -> R {
        f(&self.lock())
    }

    pub fn export_sketch(&self) -> Option<SketchRecord> {
        self.lock().export_sketch()
    }

    pub fn export_interaction(&self) -> InteractionRecord {
        self.lock().export_interaction()
    }

    /// Register a listener that receives every session event
    pub fn add_event_listener<F>(&self, listener: F)
    where
        F: Fn(&SessionEvent) + Send + Sync + 'static,
    {
        let mut listeners = self
            .event_listeners
            .write()
            .unwrap_or_else(PoisonError::into_inner);
        listeners.push(Box::new(listener));
    }

    /// Take back the inner session
    pub fn into_inner(self) -> CaptureSession {
        self.session
            .into_inner()
            .unwrap_or_else(PoisonError::into_inner)
    }

    fn emit_events(&self, events: &[SessionEvent]) {
        if events.is_empty() {
            return;
        }
        let listeners = self
            .event_listeners
            .read()
            .unwrap_or_else(PoisonError::into_inner);
        for event in events {
            for listener in listeners.iter() {
                listener(event);
            }
        }
    }

    // A panic mid-frame leaves the session in a consistent state between
    // operations, so a poisoned lock is still usable.
    fn lock(&self) -> MutexGuard<'_, CaptureSession> {
        self.session.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::thread;

    fn down(x: f64, y: f64, t: f64) -> FrameSample {
        FrameSample {
            surface_width: 100,
            surface_height: 100,
            x,
            y,
            timestamp: t,
            down: true,
            ..Default::default()
        }
    }

    #[test]
    fn test_event_listener_receives_frame_events() {
        let shared = SharedSession::new(SketchConfig::default()).unwrap();
        let event_count = Arc::new(AtomicUsize::new(0));
        let count_clone = Arc::clone(&event_count);

        shared.add_event_listener(move |_event| {
            count_clone.fetch_add(1, Ordering::SeqCst);
        });

        // SketchStarted + StrokeStarted
        shared.frame(down(10.0, 10.0, 0.0));
        // Plain append emits nothing
        shared.frame(down(20.0, 10.0, 1.0));

        assert_eq!(event_count.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_concurrent_frames_respect_cap() {
        let shared = Arc::new(
            SharedSession::new(SketchConfig {
                max_length: Some(50),
                ..Default::default()
            })
            .unwrap(),
        );

        let handles: Vec<_> = (0..4)
            .map(|worker| {
                let shared = Arc::clone(&shared);
                thread::spawn(move || {
                    for i in 0..100 {
                        let x = 1.0 + (i % 90) as f64;
                        let y = 1.0 + (worker * 20) as f64;
                        let frame = shared.frame(down(x, y, i as f64));
                        assert!(frame.total_points <= 50);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        assert!(shared.with_session(|s| s.total_points()) <= 50);
    }

    #[test]
    fn test_into_inner_returns_session() {
        let shared = SharedSession::new(SketchConfig::default()).unwrap();
        shared.frame(down(10.0, 10.0, 0.0));
        let session = shared.into_inner();
        assert!(session.is_stroking());
    }

    #[test]
    fn test_debug_while_locked() {
        let shared = SharedSession::new(SketchConfig::default()).unwrap();
        shared.frame(down(10.0, 10.0, 0.0));

        let inside = shared.with_session(|_| format!("{:?}", shared));
        assert!(inside.contains("total_points: None"));

        let outside = format!("{:?}", shared);
        assert!(outside.contains("total_points: Some(1)"));
    }
}
