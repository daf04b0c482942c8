//! Random-access archive sources.
//!
//! Any `Read + Seek` value can serve as an archive source. [`ArchiveSource`]
//! adds the sized reads the table parsers need and a scoped
//! [`peek`](ArchiveSource::peek) that reads somewhere else in the archive and
//! puts the cursor back afterwards.
//!
//! # Example
//!
//! ```
//! use std::io::Cursor;
//! use vnarc_core::endian::Endian;
//! use vnarc_core::source::ArchiveSource;
//!
//! let mut source = Cursor::new(b"\x00\x02name\x00payload".to_vec());
//! assert_eq!(source.read_u16(Endian::Big).unwrap(), 2);
//!
//! let payload = source.peek(7, |s| s.read_vec(7)).unwrap();
//! assert_eq!(payload, b"payload");
//! assert_eq!(source.read_until_zero().unwrap(), b"name");
//! ```

use crate::endian::Endian;
use crate::error::{Result, VnArcError};
use std::io::{Read, Seek, SeekFrom};
use std::ops::{Deref, DerefMut};

/// Cursor guard that seeks back to a saved position when released.
///
/// The position is restored by [`restore`](PositionGuard::restore), which
/// reports seek failures, or otherwise when the guard is dropped: on early
/// return, on `?` propagation, and during unwinding.
#[derive(Debug)]
pub struct PositionGuard<'a, S: Seek + ?Sized> {
    source: &'a mut S,
    saved: u64,
    restored: bool,
}

impl<'a, S: Seek + ?Sized> PositionGuard<'a, S> {
    /// Save the current position of `source` and move it to `pos`.
    pub fn new(source: &'a mut S, pos: u64) -> Result<Self> {
        let saved = source.stream_position()?;
        let mut guard = Self {
            source,
            saved,
            restored: false,
        };
        guard.source.seek(SeekFrom::Start(pos))?;
        Ok(guard)
    }

    /// Seek back to the saved position.
    pub fn restore(mut self) -> Result<()> {
        self.restored = true;
        self.source.seek(SeekFrom::Start(self.saved))?;
        Ok(())
    }
}

impl<S: Seek + ?Sized> Deref for PositionGuard<'_, S> {
    type Target = S;

    fn deref(&self) -> &S {
        self.source
    }
}

impl<S: Seek + ?Sized> DerefMut for PositionGuard<'_, S> {
    fn deref_mut(&mut self) -> &mut S {
        self.source
    }
}

impl<S: Seek + ?Sized> Drop for PositionGuard<'_, S> {
    fn drop(&mut self) {
        if !self.restored {
            let _ = self.source.seek(SeekFrom::Start(self.saved));
        }
    }
}

/// Sized reads and scoped seeks over a `Read + Seek` archive.
pub trait ArchiveSource: Read + Seek {
    /// Total size of the source in bytes. The cursor is left unchanged.
    fn size(&mut self) -> Result<u64> {
        let current = self.stream_position()?;
        let end = self.seek(SeekFrom::End(0))?;
        self.seek(SeekFrom::Start(current))?;
        Ok(end)
    }

    /// Current cursor position.
    fn tell(&mut self) -> Result<u64> {
        Ok(self.stream_position()?)
    }

    /// Move the cursor to an absolute position.
    fn seek_to(&mut self, pos: u64) -> Result<()> {
        self.seek(SeekFrom::Start(pos))?;
        Ok(())
    }

    /// Read exactly `len` bytes.
    ///
    /// The buffer grows with the data actually read, so a corrupt length
    /// field fails with `UnexpectedEof` instead of a huge allocation.
    fn read_vec(&mut self, len: usize) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        let mut data = Vec::new();
        self.by_ref().take(len as u64).read_to_end(&mut data)?;
        if data.len() < len {
            return Err(VnArcError::unexpected_eof(len - data.len()));
        }
        Ok(data)
    }

    /// Read a fixed-size array.
    fn read_array<const N: usize>(&mut self) -> Result<[u8; N]>
    where
        Self: Sized,
    {
        let mut buf = [0u8; N];
        self.read_exact(&mut buf).map_err(|e| match e.kind() {
            std::io::ErrorKind::UnexpectedEof => VnArcError::unexpected_eof(N),
            _ => e.into(),
        })?;
        Ok(buf)
    }

    /// Read one byte.
    fn read_u8(&mut self) -> Result<u8>
    where
        Self: Sized,
    {
        Ok(self.read_array::<1>()?[0])
    }

    /// Read a `u16` in the given byte order.
    fn read_u16(&mut self, endian: Endian) -> Result<u16>
    where
        Self: Sized,
    {
        Ok(endian.u16_from(self.read_array()?))
    }

    /// Read a `u32` in the given byte order.
    fn read_u32(&mut self, endian: Endian) -> Result<u32>
    where
        Self: Sized,
    {
        Ok(endian.u32_from(self.read_array()?))
    }

    /// Read bytes up to a NUL terminator, which is consumed but not returned.
    fn read_until_zero(&mut self) -> Result<Vec<u8>>
    where
        Self: Sized,
    {
        let mut bytes = Vec::new();
        loop {
            match self.read_u8()? {
                0 => return Ok(bytes),
                byte => bytes.push(byte),
            }
        }
    }

    /// Run `f` with the cursor at `pos`, then restore the previous position.
    ///
    /// The position is restored whether `f` succeeds or fails.
    fn peek<T, F>(&mut self, pos: u64, f: F) -> Result<T>
    where
        Self: Sized,
        F: FnOnce(&mut Self) -> Result<T>,
    {
        let mut guard = PositionGuard::new(self, pos)?;
        let value = f(&mut *guard)?;
        guard.restore()?;
        Ok(value)
    }
}

impl<T: Read + Seek + ?Sized> ArchiveSource for T {}
