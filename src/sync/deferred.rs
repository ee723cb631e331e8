//! Deferred environment side effects.
//!
//! Effects such as "set the document title" are queued while a dispatch runs
//! and applied on a later tick. Within one tick, a later effect for a target
//! supersedes an earlier one, so a burst of dispatches yields one write.
//! Targets are injected through [`Environment`]; when a target is absent the
//! effect is dropped at flush time and nothing else changes.

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::fmt;
use std::rc::Rc;

/// Unit of work run on a later tick.
pub type Task = Box<dyn FnOnce()>;

/// Runs tasks on a later turn of the event loop.
///
/// Implementations must never run a task from inside `schedule`.
pub trait Scheduler {
    fn schedule(&self, task: Task);
}

/// Manually driven task queue standing in for an event loop.
///
/// # Example
///
/// ```rust
/// use lockstep::sync::{Scheduler, TickQueue};
/// use std::cell::Cell;
/// use std::rc::Rc;
///
/// let ticks = TickQueue::new();
/// let ran = Rc::new(Cell::new(false));
///
/// let flag = Rc::clone(&ran);
/// ticks.schedule(Box::new(move || flag.set(true)));
/// assert!(!ran.get());
///
/// ticks.run_until_idle();
/// assert!(ran.get());
/// ```
#[derive(Default)]
pub struct TickQueue {
    tasks: RefCell<VecDeque<Task>>,
}

impl TickQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn pending(&self) -> usize {
        self.tasks.borrow().len()
    }

    /// Run the tasks queued before this call. Tasks they schedule wait for
    /// the next tick. Returns the number of tasks run.
    pub fn run_tick(&self) -> usize {
        let batch: Vec<Task> = self.tasks.borrow_mut().drain(..).collect();
        let count = batch.len();
        for task in batch {
            task();
        }
        count
    }

    /// Run ticks until nothing is queued. Returns the number of tasks run.
    pub fn run_until_idle(&self) -> usize {
        let mut total = 0;
        while self.pending() > 0 {
            total += self.run_tick();
        }
        total
    }
}

impl Scheduler for TickQueue {
    fn schedule(&self, task: Task) {
        self.tasks.borrow_mut().push_back(task);
    }
}

impl fmt::Debug for TickQueue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TickQueue")
            .field("pending", &self.pending())
            .finish()
    }
}

/// Something holding a settable title, such as a document.
pub trait TitleTarget {
    fn set_title(&self, title: &str);
}

/// In-process title holder.
#[derive(Debug, Default)]
pub struct DocumentTitle {
    title: RefCell<String>,
    writes: Cell<usize>,
}

impl DocumentTitle {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: RefCell::new(title.into()),
            writes: Cell::new(0),
        }
    }

    pub fn title(&self) -> String {
        self.title.borrow().clone()
    }

    /// Number of times the title has been set.
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl TitleTarget for DocumentTitle {
    fn set_title(&self, title: &str) {
        *self.title.borrow_mut() = title.to_string();
        self.writes.set(self.writes.get() + 1);
    }
}

/// Side-effect targets available in the running environment.
///
/// The default environment has none, which is what a server or other
/// non-interactive context looks like.
#[derive(Clone, Default)]
pub struct Environment {
    pub title: Option<Rc<dyn TitleTarget>>,
}

impl Environment {
    /// Environment without any side-effect target.
    pub fn headless() -> Self {
        Self::default()
    }

    pub fn with_title(title: Rc<dyn TitleTarget>) -> Self {
        Self { title: Some(title) }
    }
}

impl fmt::Debug for Environment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Environment")
            .field("title", &self.title.is_some())
            .finish()
    }
}

/// Where a pending effect lands.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum EffectTarget {
    Title,
}

/// A queued environment mutation.
#[derive(Clone, PartialEq, Debug)]
pub struct PendingEffect {
    pub target: EffectTarget,
    pub value: String,
}

impl PendingEffect {
    pub fn title(value: impl Into<String>) -> Self {
        Self {
            target: EffectTarget::Title,
            value: value.into(),
        }
    }
}

/// Queue of pending effects flushed once per tick.
pub struct DeferredEffects {
    pending: RefCell<Vec<PendingEffect>>,
    flush_scheduled: Cell<bool>,
    environment: Environment,
    scheduler: Rc<dyn Scheduler>,
}

impl DeferredEffects {
    pub fn new(environment: Environment, scheduler: Rc<dyn Scheduler>) -> Rc<Self> {
        Rc::new(Self {
            pending: RefCell::new(Vec::new()),
            flush_scheduled: Cell::new(false),
            environment,
            scheduler,
        })
    }

    /// Queue an effect, replacing any pending one for the same target, and
    /// schedule a flush unless one is already scheduled.
    pub fn enqueue(self: &Rc<Self>, effect: PendingEffect) {
        {
            let mut pending = self.pending.borrow_mut();
            pending.retain(|queued| queued.target != effect.target);
            pending.push(effect);
        }

        if self.flush_scheduled.replace(true) {
            return;
        }
        let effects = Rc::clone(self);
        self.scheduler.schedule(Box::new(move || {
            effects.flush();
        }));
    }

    pub fn pending(&self) -> Vec<PendingEffect> {
        self.pending.borrow().clone()
    }

    /// Apply every pending effect in queue order. Returns how many were
    /// applied to a present target.
    pub fn flush(&self) -> usize {
        self.flush_scheduled.set(false);
        let drained = std::mem::take(&mut *self.pending.borrow_mut());
        drained
            .into_iter()
            .filter(|effect| self.apply(effect))
            .count()
    }

    fn apply(&self, effect: &PendingEffect) -> bool {
        match effect.target {
            EffectTarget::Title => match &self.environment.title {
                Some(target) => {
                    tracing::trace!(title = %effect.value, "applying title");
                    target.set_title(&effect.value);
                    true
                }
                None => {
                    tracing::trace!(title = %effect.value, "no title target, skipping");
                    false
                }
            },
        }
    }
}

impl fmt::Debug for DeferredEffects {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DeferredEffects")
            .field("pending", &self.pending.borrow())
            .field("flush_scheduled", &self.flush_scheduled.get())
            .field("environment", &self.environment)
            .finish()
    }
}
