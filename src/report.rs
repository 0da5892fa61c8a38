/*!
Error printer used as the return type of `main`.

`main` returning `Err` prints the `Debug` form of the error, so `Report`
renders the top-level message followed by every `source()` in the chain
instead of the derived struct dump.
*/

use std::error::Error as StdError;
use std::fmt;

pub struct Report(Box<dyn StdError>);

impl Report {
    /// Iterates over the causes of the wrapped error, outermost first.
    pub fn causes(&self) -> impl Iterator<Item = &(dyn StdError + 'static)> {
        std::iter::successors(self.0.source(), |&e| e.source())
    }
}

impl fmt::Debug for Report {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.0)?;

        let mut causes = self.causes().enumerate().peekable();
        if causes.peek().is_some() {
            writeln!(f, "\nCaused by:")?;
            for (i, cause) in causes {
                writeln!(f, "  {}: {}", i, cause)?;
            }
        }

        Ok(())
    }
}

impl<E: Into<Box<dyn StdError>>> From<E> for Report {
    fn from(e: E) -> Self {
        Report(e.into())
    }
}
