use std::{cell::RefCell, rc::Rc};

use crate::interpreter::storage::SharedFile;

#[derive(Debug)]
struct HandleState {
    file:   SharedFile,
    /// Lines of the backing store as of the last open or write through this
    /// handle.
    lines:  Vec<String>,
    next:   usize,
    closed: bool,
}

/// A handle returned by `open`.
///
/// Each handle reads its own snapshot of the backing store with its own
/// cursor. Copies of a handle value share that state, so reading through one
/// advances the other.
#[derive(Debug, Clone)]
pub struct FileHandle(Rc<RefCell<HandleState>>);

impl FileHandle {
    #[must_use]
    pub fn open(file: SharedFile) -> Self {
        let lines = file.borrow().lines();
        Self(Rc::new(RefCell::new(HandleState { file,
                                                lines,
                                                next: 0,
                                                closed: false })))
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.0.borrow().closed
    }

    /// Returns the next unread line, or `None` past the last one.
    pub fn read_line(&self) -> Option<String> {
        let mut state = self.0.borrow_mut();
        let line = state.lines.get(state.next).cloned()?;
        state.next += 1;
        Some(line)
    }

    /// Whether every line of the snapshot has been read.
    #[must_use]
    pub fn end_of_file(&self) -> bool {
        let state = self.0.borrow();
        state.next >= state.lines.len()
    }

    /// Appends `text` to the backing store and refreshes this handle's
    /// snapshot. The two characters `\n` in `text` start a new line.
    pub fn write_line(&self, text: &str) {
        let mut state = self.0.borrow_mut();
        let lines = {
            let mut file = state.file.borrow_mut();
            file.append_line(&text.replace("\\n", "\n"));
            file.lines()
        };
        state.lines = lines;
    }

    pub fn close(&self) {
        let mut state = self.0.borrow_mut();
        state.closed = true;
        state.lines.clear();
    }
}

impl PartialEq for FileHandle {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.0, &other.0)
    }
}
