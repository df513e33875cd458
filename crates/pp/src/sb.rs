//! The SQL text accumulator shared by every generator.

use crate::error::{PpError, PpResult};
use crate::value::Value;

/// Accumulates SQL text and prepared arguments for a single build.
///
/// The first error recorded with [`SqlBuilder::set_error`] sticks; later
/// errors are ignored and callers are expected to stop writing once
/// [`SqlBuilder::error`] returns `Some`.
#[derive(Debug, Default)]
#[must_use]
pub struct SqlBuilder {
    buf: String,
    args: Vec<Value>,
    err: Option<PpError>,
    prepared: bool,
}

impl SqlBuilder {
    /// Create an empty builder.
    pub fn new(prepared: bool) -> Self {
        Self {
            buf: String::with_capacity(128),
            args: Vec::new(),
            err: None,
            prepared,
        }
    }

    /// Whether leaf values are written as placeholders.
    pub fn is_prepared(&self) -> bool {
        self.prepared
    }

    /// The 1-based position the next argument will take.
    pub fn current_arg_position(&self) -> usize {
        self.args.len() + 1
    }

    /// Append raw SQL text.
    pub fn push(&mut self, sql: &str) -> &mut Self {
        if self.err.is_none() {
            self.buf.push_str(sql);
        }
        self
    }

    /// Append one character.
    pub fn push_char(&mut self, c: char) -> &mut Self {
        if self.err.is_none() {
            self.buf.push(c);
        }
        self
    }

    /// Append several characters.
    pub fn push_chars(&mut self, chars: &[char]) -> &mut Self {
        if self.err.is_none() {
            self.buf.extend(chars.iter());
        }
        self
    }

    /// Push a prepared argument. The caller writes the placeholder.
    pub fn push_arg(&mut self, value: Value) -> &mut Self {
        if self.err.is_none() {
            self.args.push(value);
        }
        self
    }

    /// Record an error if none has been recorded yet.
    pub fn set_error(&mut self, err: PpError) -> &mut Self {
        if self.err.is_none() {
            self.err = Some(err);
        }
        self
    }

    /// The first recorded error, if any.
    pub fn error(&self) -> Option<&PpError> {
        self.err.as_ref()
    }

    /// SQL written so far.
    pub fn sql(&self) -> &str {
        &self.buf
    }

    /// Arguments pushed so far.
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Finish the build, returning the SQL and arguments or the first error.
    pub fn finish(self) -> PpResult<(String, Vec<Value>)> {
        match self.err {
            Some(err) => Err(err),
            None => Ok((self.buf, self.args)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn first_error_wins() {
        let mut b = SqlBuilder::new(false);
        b.push("SELECT");
        b.set_error(PpError::EmptyIdentifier);
        b.set_error(PpError::NoSetValues);
        b.push(" ignored");
        assert_eq!(b.error(), Some(&PpError::EmptyIdentifier));
        assert_eq!(b.finish(), Err(PpError::EmptyIdentifier));
    }

    #[test]
    fn arg_positions_are_one_based() {
        let mut b = SqlBuilder::new(true);
        assert_eq!(b.current_arg_position(), 1);
        b.push_arg(Value::Int(1));
        b.push_arg(Value::Int(2));
        assert_eq!(b.current_arg_position(), 3);
        let (sql, args) = b.finish().unwrap();
        assert_eq!(sql, "");
        assert_eq!(args, vec![Value::Int(1), Value::Int(2)]);
    }
}
