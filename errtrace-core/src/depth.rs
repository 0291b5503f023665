use std::{collections::HashSet, error::Error};

use crate::error_ext::{ErrorExt, Link};

/// Upper bound on the links [`depth`] will visit.
pub const DEPTH_LIMIT: usize = 1 << 20;

/// Number of errors in the chain starting at `error`, `0` when absent.
///
/// A chain that loops back onto an error already counted stops there, so a
/// cyclic chain reports the number of distinct errors in it. Counting never
/// goes past [`DEPTH_LIMIT`].
pub fn depth(error: Option<&dyn ErrorExt>) -> usize {
    link_depth(error.map(Link::Ext))
}

pub fn depth_std(error: Option<&(dyn Error + 'static)>) -> usize {
    link_depth(error.map(Link::opaque))
}

pub(crate) fn link_depth(mut cursor: Option<Link<'_>>) -> usize {
    let mut seen = HashSet::new();

    while let Some(link) = cursor {
        if seen.len() == DEPTH_LIMIT || !seen.insert(link.key()) {
            break;
        }

        cursor = link.inner();
    }

    seen.len()
}

#[cfg(test)]
mod tests {
    use std::{fmt, io};

    use super::*;
    use crate::{error_ext::NextError, traced::TracedError};

    #[test]
    fn test_counts() {
        assert_eq!(depth(None), 0);

        let one = TracedError::new("one");
        assert_eq!(depth(Some(&one)), 1);

        let two = TracedError::with_cause("two", one);
        assert_eq!(depth(Some(&two)), 2);

        let three = TracedError::with_cause("three", two);
        assert_eq!(depth(Some(&three)), 3);
    }

    #[test]
    fn test_std_chain() {
        assert_eq!(depth_std(None), 0);

        let err = io::Error::new(io::ErrorKind::Other, "leaf");
        assert_eq!(depth_std(Some(&err)), 1);
    }

    #[derive(Debug)]
    struct Outer(io::Error);

    impl fmt::Display for Outer {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outer")
        }
    }

    impl Error for Outer {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[derive(Debug)]
    struct Outermost(Outer);

    impl fmt::Display for Outermost {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("outermost")
        }
    }

    impl Error for Outermost {
        fn source(&self) -> Option<&(dyn Error + 'static)> {
            Some(&self.0)
        }
    }

    #[test]
    fn test_source_sharing_the_wrapper_address() {
        let err = Outermost(Outer(io::Error::other("inner")));

        assert_eq!(
            &err as *const Outermost as *const (),
            &err.0 .0 as *const io::Error as *const ()
        );
        assert_eq!(depth_std(Some(&err.0)), 2);
        assert_eq!(depth_std(Some(&err)), 3);
    }

    #[test]
    fn test_very_long_chain() {
        let mut err = TracedError::new("level-0");
        for i in 1..10_000 {
            err = TracedError::with_cause(format!("level-{i}"), err);
        }

        assert_eq!(depth(Some(&err)), 10_000);
    }

    #[derive(Debug)]
    struct Ouroboros;

    impl fmt::Display for Ouroboros {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            f.write_str("eats its own tail")
        }
    }

    impl Error for Ouroboros {}

    impl ErrorExt for Ouroboros {
        fn inner(&self) -> NextError<'_> {
            NextError::Ext(self)
        }
    }

    #[test]
    fn test_cycle_terminates() {
        assert_eq!(depth(Some(&Ouroboros)), 1);
    }
}
