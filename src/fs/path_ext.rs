use std::{
    fs::{create_dir, create_dir_all},
    io,
    path::Path,
};

/// Options for controlling [`PathExt::mkdir`]
#[derive(Debug, Clone, Copy, Hash, Eq, PartialEq)]
pub enum MkdirOptions {
    /// Equivalent of `mkdir $path`.
    WithoutParents,
    /// Equivalent of `mkdir -p $path`.
    WithParents,
}

mod sealed {
    use std::path::Path;

    pub trait Sealed {}
    impl Sealed for Path {}
}

/// Extension trait for [`Path`] with additional filesystem operations.
///
/// ```rust,no_run
/// # use places::fs::*;
/// # use std::path::Path;
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let path = Path::new("a/b");
/// path.mkdir(MkdirOptions::WithParents)?;
/// // Creating it again is fine.
/// path.mkdir(MkdirOptions::WithParents)?;
/// # Ok(())
/// # }
/// ```
pub trait PathExt: sealed::Sealed {
    /// Create directories at given [`Path`].
    ///
    /// # Returns
    /// [`Ok(())`](Ok) if created successfully or if a directory already exists there, otherwise
    /// error, as reported by [`create_dir`], or [`create_dir_all`].
    ///
    /// Note that an existing entry which is __not__ a directory is reported as error of kind
    /// [`ErrorKind::AlreadyExists`](io::ErrorKind::AlreadyExists).
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()>;
}

impl PathExt for Path {
    fn mkdir(&self, opts: MkdirOptions) -> io::Result<()> {
        let result = match opts {
            MkdirOptions::WithoutParents => create_dir(self),
            MkdirOptions::WithParents => create_dir_all(self),
        };
        match result {
            Err(e) if e.kind() == io::ErrorKind::AlreadyExists && self.is_dir() => Ok(()),
            _ => result,
        }
    }
}
