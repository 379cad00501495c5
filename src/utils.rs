//! A collection of utilities for handling runs, numbers, signatures and files.

/// A collection of signatures for the framed file format.
pub mod signatures {
    /// Marks a framed PAI file. Unframed files start directly with the
    /// compressed payload.
    pub const PAI_SIG: [u8; 4] = [0x50, 0x41, 0x49, 0x1a];
    /// The current version of the framed header.
    pub const FORMAT_VERSION: u8 = 1;
    pub const FILE_EXTENSION: &str = "pai";

    /// Return True if 'input' starts with 'signature'.
    pub fn match_signature(input: &[u8], signature: &[u8]) -> bool {
        input.starts_with(signature)
    }
}

/// Implements run length folding over slices.
pub mod run_length_encoding {
    /// Iterates over the maximal runs of equal items in a slice, yielding the
    /// first item of each run and the length of the run.
    pub struct RunIterator<'a, T> {
        input: &'a [T],
        pos: usize,
    }

    impl<'a, T> RunIterator<'a, T> {
        pub fn new(input: &'a [T]) -> Self {
            Self { input, pos: 0 }
        }
    }

    impl<'a, T: PartialEq> Iterator for RunIterator<'a, T> {
        type Item = (&'a T, usize);

        fn next(&mut self) -> Option<Self::Item> {
            let first = self.input.get(self.pos)?;
            let len = self.input[self.pos..]
                .iter()
                .take_while(|item| *item == first)
                .count();
            self.pos += len;
            Some((first, len))
        }
    }
}

/// Implements parsing of the decimal counts in a document.
pub mod number_parsing {
    /// Parse a strictly positive decimal number made of ASCII digits only.
    /// Signs, whitespace, zero and values that overflow are rejected.
    pub fn parse_count(text: &str) -> Option<usize> {
        if text.is_empty() || !text.bytes().all(|c| c.is_ascii_digit()) {
            return None;
        }
        match text.parse::<usize>() {
            Ok(0) | Err(_) => None,
            Ok(n) => Some(n),
        }
    }
}

/// Implements all-or-nothing file writes.
pub mod atomic_file {
    use std::fs;
    use std::io::{self, Write};
    use std::path::{Path, PathBuf};
    use std::sync::atomic::{AtomicU64, Ordering};

    /// Numbers the temporary files made by this process.
    static NEXT_ID: AtomicU64 = AtomicU64::new(0);

    /// Return a fresh hidden sibling path of 'path' that keeps its extension,
    /// so that writers that pick a format by extension still work. Every call
    /// returns a different path.
    pub fn temp_path(path: &Path) -> PathBuf {
        let name = path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let id = NEXT_ID.fetch_add(1, Ordering::Relaxed);
        let tmp = format!(".{}.{}.{}.tmp", std::process::id(), id, name);
        let tmp = match path.extension() {
            Some(ext) => format!("{}.{}", tmp, ext.to_string_lossy()),
            None => tmp,
        };
        path.with_file_name(tmp)
    }

    /// Run 'writer' against a temporary path, sync the file it wrote and
    /// move it to 'path'. On failure the temporary file is removed and 'path'
    /// is untouched.
    pub fn write_with<E, F>(path: &Path, writer: F) -> Result<(), E>
    where
        F: FnOnce(&Path) -> Result<(), E>,
        E: From<io::Error>,
    {
        let tmp = temp_path(path);
        let res = writer(&tmp).and_then(|_| {
            fs::File::open(&tmp)?.sync_all()?;
            fs::rename(&tmp, path)?;
            Ok(())
        });
        if res.is_err() {
            let _ = fs::remove_file(&tmp);
        }
        res
    }

    /// Write 'data' to 'path' atomically.
    pub fn write(path: &Path, data: &[u8]) -> io::Result<()> {
        write_with(path, |tmp| fs::File::create(tmp)?.write_all(data))
    }
}
