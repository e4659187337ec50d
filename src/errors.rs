use std::{error::Error, fmt, slice};

/// Several independent failures reported as one error.
///
/// The message is every constituent's message, in order, joined by `,`.
/// The constituents stay available through [`MultiError::iter`] and
/// [`MultiError::into_inner`].
#[derive(Debug)]
pub struct MultiError<E> {
    errors: Vec<E>,
}

/// Combine `errors` into a [`MultiError`], or `Ok(())` when there are none.
pub fn combine<E, I>(errors: I) -> Result<(), MultiError<E>>
where
    I: IntoIterator<Item = E>,
{
    let errors: Vec<E> = errors.into_iter().collect();
    if errors.is_empty() {
        Ok(())
    } else {
        Err(MultiError { errors })
    }
}

impl<E> MultiError<E> {
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn iter(&self) -> slice::Iter<'_, E> {
        self.errors.iter()
    }

    pub fn into_inner(self) -> Vec<E> {
        self.errors
    }
}

impl<E: fmt::Display> fmt::Display for MultiError<E> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (index, error) in self.errors.iter().enumerate() {
            if index > 0 {
                f.write_str(",")?;
            }
            write!(f, "{error}")?;
        }
        Ok(())
    }
}

impl<E: fmt::Debug + fmt::Display> Error for MultiError<E> {}

impl<E> IntoIterator for MultiError<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.into_iter()
    }
}

impl<'a, E> IntoIterator for &'a MultiError<E> {
    type Item = &'a E;
    type IntoIter = slice::Iter<'a, E>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}
