use std::{cell::RefCell, rc::Rc};

use thiserror::Error;
use tracing::debug;

/// A backing store shared between the storage and every handle opened on it.
pub type SharedFile = Rc<RefCell<StoredFile>>;

/// Extensions a stored file may have.
const EXTENSIONS: &[&str] = &["txt", "csv"];

/// The named text content behind a file.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct StoredFile {
    pub name:     String,
    pub contents: String,
    /// Contents saved by the last [`FileStorage::store_all`].
    snapshot:     String,
}

impl StoredFile {
    fn new(name: impl Into<String>, contents: impl Into<String>) -> Self {
        Self { name:     name.into(),
               contents: contents.into(),
               snapshot: String::new(), }
    }

    /// Appends one line to the contents. The first line of an empty file is
    /// written without a separator.
    pub fn append_line(&mut self, line: &str) {
        if !self.contents.is_empty() {
            self.contents.push('\n');
        }
        self.contents.push_str(line);
    }

    /// The contents split into lines. Empty contents hold one empty line.
    #[must_use]
    pub fn lines(&self) -> Vec<String> {
        self.contents.split('\n').map(str::to_string).collect()
    }
}

/// Errors raised by host-side storage management.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StorageError {
    #[error("No file named {0} exists")]
    NotFound(String),
    #[error("Invalid file name {0}: expected 'name.txt' or 'name.csv' with a single '.'")]
    InvalidName(String),
}

/// The files a program can open, keyed by name.
///
/// Programs reach the storage through `open` and `newFile`; hosts import,
/// rename and delete files between runs. Before each run every file's
/// contents are snapshotted so the host can roll a run's writes back.
///
/// # Example
/// ```
/// use ocr_erl::interpreter::storage::FileStorage;
///
/// let mut files = FileStorage::default();
/// assert_eq!(files.force_add_new("data.txt", "1\n2"), "data.txt");
/// assert_eq!(files.force_add_new("data.txt", ""), "data (1).txt");
/// assert_eq!(files.names(), ["data.txt", "data (1).txt"]);
/// ```
#[derive(Debug, Default)]
pub struct FileStorage {
    files: Vec<SharedFile>,
}

impl FileStorage {
    #[must_use]
    pub fn get(&self, name: &str) -> Option<SharedFile> {
        self.files.iter().find(|file| file.borrow().name == name).cloned()
    }

    #[must_use]
    pub fn contains(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    /// Creates an empty file, or empties the file if the name is taken.
    pub fn add_new(&mut self, name: &str) -> SharedFile {
        if let Some(file) = self.get(name) {
            debug!(name, "reset file");
            file.borrow_mut().contents.clear();
            return file;
        }
        debug!(name, "created file");
        let file = Rc::new(RefCell::new(StoredFile::new(name, "")));
        self.files.push(Rc::clone(&file));
        file
    }

    /// Adds a file without touching existing ones, numbering the name when it
    /// is taken. Returns the name actually used.
    pub fn force_add_new(&mut self, name: &str, contents: &str) -> String {
        let name = self.available_name(name);
        debug!(name = %name, bytes = contents.len(), "imported file");
        self.files.push(Rc::new(RefCell::new(StoredFile::new(name.clone(), contents))));
        name
    }

    /// Renames a file, numbering the new name when it is taken. Returns the
    /// name actually used.
    pub fn rename(&mut self, old: &str, new: &str) -> Result<String, StorageError> {
        let file = self.get(old).ok_or_else(|| StorageError::NotFound(old.to_string()))?;
        if old == new {
            return Ok(new.to_string());
        }
        let name = self.available_name(new);
        file.borrow_mut().name.clone_from(&name);
        Ok(name)
    }

    pub fn delete(&mut self, name: &str) -> Result<(), StorageError> {
        let before = self.files.len();
        self.files.retain(|file| file.borrow().name != name);
        if self.files.len() == before {
            return Err(StorageError::NotFound(name.to_string()));
        }
        Ok(())
    }

    #[must_use]
    pub fn names(&self) -> Vec<String> {
        self.files.iter().map(|file| file.borrow().name.clone()).collect()
    }

    /// Saves every file's contents as its snapshot.
    pub fn store_all(&self) {
        for file in &self.files {
            let mut guard = file.borrow_mut();
            let stored = &mut *guard;
            stored.snapshot.clone_from(&stored.contents);
        }
    }

    /// Puts every file's contents back to its last snapshot.
    pub fn restore_all(&self) {
        for file in &self.files {
            let mut guard = file.borrow_mut();
            let stored = &mut *guard;
            stored.contents.clone_from(&stored.snapshot);
        }
    }

    /// `name.ext` if free, otherwise the first free `name (i).ext`.
    fn available_name(&self, name: &str) -> String {
        if !self.contains(name) {
            return name.to_string();
        }
        let (stem, extension) = name.split_once('.').unwrap_or((name, ""));
        (1..).map(|i| format!("{stem} ({i}).{extension}"))
             .find(|candidate| !self.contains(candidate))
             .unwrap_or_else(|| name.to_string())
    }
}

/// Checks that a name has a non-empty stem, exactly one `.`, and a `txt` or
/// `csv` extension.
///
/// ```
/// use ocr_erl::interpreter::storage::validate_file_name;
///
/// assert!(validate_file_name("scores.csv").is_ok());
/// assert!(validate_file_name("scores.tar.txt").is_err());
/// assert!(validate_file_name("scores.md").is_err());
/// ```
pub fn validate_file_name(name: &str) -> Result<(), StorageError> {
    match name.split_once('.') {
        Some((stem, extension))
            if !stem.is_empty() && !extension.contains('.') && EXTENSIONS.contains(&extension) =>
        {
            Ok(())
        },
        _ => Err(StorageError::InvalidName(name.to_string())),
    }
}
