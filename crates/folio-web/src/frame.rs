use folio_core::FrameTick;
use gloo::render::{request_animation_frame, AnimationFrame};
use instant::Instant;
use std::cell::RefCell;
use std::rc::{Rc, Weak};
use std::time::Duration;

struct LoopState {
    on_frame: Box<dyn FnMut(&FrameTick)>,
    last: Instant,
    index: u64,
    pending: Option<AnimationFrame>,
}

/// Self-rescheduling animation frame loop. Dropping it cancels the pending frame.
pub struct AnimationLoop {
    _state: Rc<RefCell<LoopState>>,
}

fn schedule(state: &Rc<RefCell<LoopState>>) {
    let weak = Rc::downgrade(state);
    let handle = request_animation_frame(move |_| run_frame(weak));
    state.borrow_mut().pending = Some(handle);
}

fn run_frame(state: Weak<RefCell<LoopState>>) {
    let Some(state) = state.upgrade() else {
        return;
    };
    {
        let mut s = state.borrow_mut();
        s.pending.take();
        let now = Instant::now();
        let tick = FrameTick {
            index: s.index,
            dt: now - s.last,
        };
        s.last = now;
        s.index += 1;
        (s.on_frame)(&tick);
    }
    schedule(&state);
}

impl AnimationLoop {
    pub fn start(on_frame: impl FnMut(&FrameTick) + 'static) -> Self {
        let state = Rc::new(RefCell::new(LoopState {
            on_frame: Box::new(on_frame),
            last: Instant::now(),
            index: 0,
            pending: None,
        }));
        schedule(&state);
        Self { _state: state }
    }
}

/// Monotonic clock for timed UI feedback, zeroed at mount.
#[derive(Clone, Copy)]
pub struct Clock {
    origin: Instant,
}

impl Default for Clock {
    fn default() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Clock {
    #[inline]
    pub fn now(&self) -> Duration {
        self.origin.elapsed()
    }
}
