//! Per-file results for the tag tools.

use crate::error::Error;

/// Result of applying one operation to one file.
///
/// `Skipped` covers "nothing to do" cases such as a file without tags; it is
/// not an error and never stops the batch.
#[derive(Debug)]
pub enum Outcome<T = ()> {
    Success(T),
    Skipped(String),
    Failed(Error),
}

impl<T> Outcome<T> {
    pub fn is_success(&self) -> bool {
        matches!(self, Outcome::Success(_))
    }

    pub fn is_skipped(&self) -> bool {
        matches!(self, Outcome::Skipped(_))
    }
}

impl<T> From<Error> for Outcome<T> {
    fn from(error: Error) -> Self {
        Outcome::Failed(error)
    }
}

/// Running count of outcomes across a directory.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Tally {
    pub succeeded: usize,
    pub skipped: usize,
    pub failed: usize,
}

impl Tally {
    pub fn record<T>(&mut self, outcome: &Outcome<T>) {
        match outcome {
            Outcome::Success(_) => self.succeeded += 1,
            Outcome::Skipped(_) => self.skipped += 1,
            Outcome::Failed(_) => self.failed += 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tally_counts_each_kind() {
        let mut tally = Tally::default();
        tally.record(&Outcome::Success(()));
        tally.record(&Outcome::<()>::Skipped("no tags".into()));
        tally.record(&Outcome::<()>::Failed(Error::DirectoryNotFound("x".into())));
        tally.record(&Outcome::Success(()));

        assert_eq!(
            tally,
            Tally {
                succeeded: 2,
                skipped: 1,
                failed: 1
            }
        );
    }
}
