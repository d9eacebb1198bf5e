use std::{convert::Infallible, fmt, num::NonZeroUsize, str::FromStr};

use crate::error::{WindowError, WindowResult};

/// Number of elements in a window. Always at least one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct WindowSize(NonZeroUsize);

impl WindowSize {
    pub fn new(n: usize) -> WindowResult<Self> {
        NonZeroUsize::new(n).map(Self).ok_or_else(|| not_positive(n))
    }

    pub fn get(self) -> usize {
        self.0.get()
    }
}

impl fmt::Display for WindowSize {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

fn not_positive(n: impl fmt::Display) -> WindowError {
    WindowError::ValueConstraint(format!("n must be positive, got {n}"))
}

fn too_large(n: impl fmt::Display) -> WindowError {
    WindowError::Argument(format!("n does not fit in usize, got {n}"))
}

macro_rules! size_from_signed {
    ($($type:ty),*) => {
        $(
            impl TryFrom<$type> for WindowSize {
                type Error = WindowError;

                fn try_from(n: $type) -> WindowResult<Self> {
                    if n <= 0 {
                        return Err(not_positive(n));
                    }
                    usize::try_from(n)
                        .map_err(|_e| too_large(n))
                        .and_then(Self::new)
                }
            }
        )*
    };
}

macro_rules! size_from_unsigned {
    ($($type:ty),*) => {
        $(
            impl TryFrom<$type> for WindowSize {
                type Error = WindowError;

                fn try_from(n: $type) -> WindowResult<Self> {
                    usize::try_from(n)
                        .map_err(|_e| too_large(n))
                        .and_then(Self::new)
                }
            }
        )*
    };
}

size_from_signed!(i8, i16, i32, i64, i128, isize);
size_from_unsigned!(u8, u16, u32, u64, u128, usize);

impl FromStr for WindowSize {
    type Err = WindowError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let n: i128 = s
            .trim()
            .parse()
            .map_err(|_e| WindowError::Argument(format!("n must be an integer, got {s:?}")))?;
        Self::try_from(n)
    }
}

impl TryFrom<&str> for WindowSize {
    type Error = WindowError;

    fn try_from(s: &str) -> WindowResult<Self> {
        s.parse()
    }
}

// `WindowSize` and `NonZeroUsize` convert infallibly.
impl From<NonZeroUsize> for WindowSize {
    fn from(n: NonZeroUsize) -> Self {
        Self(n)
    }
}

impl From<Infallible> for WindowError {
    fn from(never: Infallible) -> Self {
        match never {}
    }
}
