use std::fmt;

/// Error returned by checked accessors (`at`) when the requested key is not in the container.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OutOfRange;

impl fmt::Display for OutOfRange {
	fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
		write!(f, "unable to find the matched key")
	}
}

impl std::error::Error for OutOfRange {}
