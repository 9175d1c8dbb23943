//! # Address Space
//!
//! A fixed-length byte store with a write-protected prefix that guards the
//! loaded program image.
//!
//! ## Design Principles
//!
//! - Indices map 1:1 onto the backing array; any logical offset shown to the
//!   user (0x800 on the reference machine) is applied outside the core
//! - Reads never fail inside the bounds
//! - Writes at or below `protected_length` fail with
//!   [`ExecutionError::ProtectedMemoryWrite`] and leave the byte unchanged
//! - Only [`AddressSpace::load_program`] bypasses the protection check

use crate::config::MemoryLayout;
use crate::ExecutionError;

/// Byte-addressable memory with a protected program region.
///
/// # Examples
///
/// ```
/// use lib8080::{AddressSpace, ExecutionError, MemoryLayout};
///
/// let mut mem = AddressSpace::new(&MemoryLayout::default());
/// mem.load_program(&[0x3E, 0x05, 0x76]).unwrap();
///
/// // The program image and the byte directly after it are protected
/// assert!(matches!(
///     mem.write(0x0003, 0xFF),
///     Err(ExecutionError::ProtectedMemoryWrite { .. })
/// ));
///
/// mem.write(0x0004, 0xFF).unwrap();
/// assert_eq!(mem.read(0x0004).unwrap(), 0xFF);
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AddressSpace {
    data: Vec<u8>,
    protected_length: u16,
}

impl AddressSpace {
    /// Creates a zeroed address space of `layout.size` bytes with nothing
    /// protected but index 0.
    pub fn new(layout: &MemoryLayout) -> Self {
        Self {
            data: vec![0; layout.size],
            protected_length: 0,
        }
    }

    /// Number of bytes in the address space.
    pub fn len(&self) -> usize {
        self.data.len()
    }

    /// True for a zero-sized address space.
    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Inclusive upper bound of the protected region.
    pub fn protected_length(&self) -> u16 {
        self.protected_length
    }

    /// Whole backing store, for front ends that render memory.
    pub fn as_slice(&self) -> &[u8] {
        &self.data
    }

    /// Reads the byte at `addr`.
    pub fn read(&self, addr: u16) -> Result<u8, ExecutionError> {
        self.data
            .get(addr as usize)
            .copied()
            .ok_or(ExecutionError::AddressOutOfRange(addr))
    }

    /// Writes `value` at `addr` unless the address is protected.
    pub fn write(&mut self, addr: u16, value: u8) -> Result<(), ExecutionError> {
        if addr <= self.protected_length {
            return Err(ExecutionError::ProtectedMemoryWrite {
                address: addr,
                protected: self.protected_length,
            });
        }
        let cell = self
            .data
            .get_mut(addr as usize)
            .ok_or(ExecutionError::AddressOutOfRange(addr))?;
        *cell = value;
        Ok(())
    }

    /// Copies a program image to index 0 and extends the protected region to
    /// cover it. The region never shrinks here; see [`AddressSpace::unprotect`].
    pub fn load_program(&mut self, program: &[u8]) -> Result<(), ExecutionError> {
        if program.len() > self.data.len() {
            return Err(ExecutionError::ProgramTooLarge {
                len: program.len(),
                capacity: self.data.len(),
            });
        }
        self.data[..program.len()].copy_from_slice(program);
        // program.len() <= data.len() <= 0xFFFF
        let len = program.len().min(u16::MAX as usize) as u16;
        self.protected_length = self.protected_length.max(len);
        Ok(())
    }

    /// Zeroes every byte. The protected region is left as is.
    pub fn clear(&mut self) {
        self.data.fill(0);
    }

    /// Drops the protected region. Used by a full processor reset.
    pub(crate) fn unprotect(&mut self) {
        self.protected_length = 0;
    }
}
