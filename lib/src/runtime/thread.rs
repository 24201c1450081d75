use super::{Error, Frame, ObjectRef, Settings};
use crate::jvm::class_graph::MethodId;

/// One thread of execution and its call stack
///
/// Every thread owns its frames: raising an exception on one thread never looks at another
/// thread's stack. The exception engine adds `raise`, `raise_by_kind`, and `return_from_frame`
/// (see [`crate::exceptions`]).
#[derive(Debug)]
pub struct Thread<'g> {
    name: String,
    frames: Vec<Frame<'g>>,
    max_frames: usize,

    /// Set while a `StackOverflowError` is being raised because a handler couldn't be entered
    pub(crate) escalating_overflow: bool,
}

impl<'g> Thread<'g> {
    pub fn new(name: impl Into<String>, max_frames: usize) -> Thread<'g> {
        Thread {
            name: name.into(),
            frames: vec![],
            max_frames,
            escalating_overflow: false,
        }
    }

    /// Thread that runs `main`
    pub fn main(settings: &Settings) -> Thread<'g> {
        Thread::new(settings.main_thread_name.clone(), settings.max_frames)
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Number of frames on the call stack
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    pub fn current_frame(&self) -> Option<&Frame<'g>> {
        self.frames.last()
    }

    pub fn current_frame_mut(&mut self) -> Option<&mut Frame<'g>> {
        self.frames.last_mut()
    }

    /// Invoke a method: push a fresh frame for it on top of the call stack
    pub fn push_frame(
        &mut self,
        method: MethodId<'g>,
        this: Option<ObjectRef>,
    ) -> Result<&mut Frame<'g>, Error> {
        if self.frames.len() >= self.max_frames {
            return Err(Error::CallStackOverflow {
                max_frames: self.max_frames,
            });
        }
        log::trace!("[{}] Entering {:?}", self.name, method);
        self.frames.push(Frame::new(method, this));
        let depth = self.frames.len();
        Ok(&mut self.frames[depth - 1])
    }

    /// Discard the frame on top of the call stack
    pub fn pop_frame(&mut self) -> Option<Frame<'g>> {
        let frame = self.frames.pop()?;
        log::trace!("[{}] Leaving {:?}", self.name, frame.method);
        Some(frame)
    }
}
