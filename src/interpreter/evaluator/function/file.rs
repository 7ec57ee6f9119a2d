use tracing::debug;

use crate::{
    ast::{Expr, Property},
    error::{Position, RuntimeError},
    interpreter::{
        evaluator::core::{Context, EvalResult},
        host::Host,
        storage::validate_file_name,
        value::{core::Value, file::FileHandle},
    },
};

/// The file name argument of `open` and `newFile`.
fn file_name(value: &Value, position: Position) -> EvalResult<&str> {
    match value {
        Value::String(name) => Ok(name),
        other => Err(RuntimeError::evaluation(format!("Expected file name to be type String, not {}",
                                                      other.type_name()),
                                              position)),
    }
}

impl<H: Host> Context<H> {
    /// `open(name)`: a new handle over an existing file.
    pub(super) fn open(&mut self, arguments: &[Value], position: Position) -> EvalResult<Value> {
        let name = file_name(&arguments[0], position)?;
        let file = self.files.get(name).ok_or_else(|| {
                                            RuntimeError::evaluation(format!("A file named {name} does not exist"),
                                                                     position)
                                        })?;
        debug!(file = name, "opened file");
        Ok(Value::File(FileHandle::open(file)))
    }

    /// `newFile(name)`: creates the file, or empties it if it exists.
    pub(super) fn new_file(&mut self,
                           arguments: &[Value],
                           position: Position)
                           -> EvalResult<Value> {
        let name = file_name(&arguments[0], position)?;
        validate_file_name(name).map_err(|_| {
                                    RuntimeError::evaluation("Can only create files with '.txt' or '.csv' extensions, containing a single '.'",
                                                             position)
                                })?;
        self.files.add_new(name);
        debug!(file = name, "created file");
        Ok(Value::EmptyReturn)
    }

    /// Runs `.readLine()`, `.endOfFile()`, `.writeLine(text)` or `.close()`.
    ///
    /// The handle is checked for being open before the argument count.
    pub(super) fn file_method(&mut self,
                              target: &Expr,
                              method: Property,
                              arguments: &[Expr],
                              property_position: Position,
                              position: Position)
                              -> EvalResult<Value> {
        let handle = match self.eval_value(target)? {
            Value::File(handle) => handle,
            other => {
                return Err(RuntimeError::type_mismatch(format!("Type {} has no {} method, expected File",
                                                               other.type_name(),
                                                               method.name()),
                                                       target.position()));
            },
        };

        if handle.is_closed() {
            let description = match method {
                Property::ReadLine => "File has been closed and can no longer be read",
                Property::WriteLine => "File has been closed and can no longer be written to",
                Property::Close => "File is already closed",
                _ => "File has been closed",
            };
            return Err(RuntimeError::evaluation(description, property_position));
        }

        match method {
            Property::ReadLine => {
                self.method_arguments(method.name(), arguments, 0, position)?;
                handle.read_line().map(Value::String).ok_or_else(|| {
                                       RuntimeError::evaluation("Cannot read new line, end of file reached",
                                                                property_position)
                                   })
            },
            Property::EndOfFile => {
                self.method_arguments(method.name(), arguments, 0, position)?;
                Ok(Value::Boolean(handle.end_of_file()))
            },
            Property::WriteLine => {
                let values = self.method_arguments(method.name(), arguments, 1, position)?;
                let Value::String(text) = &values[0] else {
                    return Err(RuntimeError::type_mismatch(format!("Can only write type String to file, not {}",
                                                                   values[0].type_name()),
                                                           arguments[0].position()));
                };
                handle.write_line(text);
                Ok(Value::EmptyReturn)
            },
            _ => {
                self.method_arguments(method.name(), arguments, 0, position)?;
                handle.close();
                Ok(Value::EmptyReturn)
            },
        }
    }
}
