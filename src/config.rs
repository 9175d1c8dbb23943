//! # Memory Layout Configuration
//!
//! The numeric shape of the address space: how many bytes it holds, where it
//! sits in the logical address range shown to users, where the input ports are
//! mirrored and where the stack starts.
//!
//! The reference machine exposes the logical window `0x800..0xBB0` (944 bytes),
//! mirrors the 16 input ports into its last 16 bytes and starts the stack just
//! below them.

use crate::ports::PORT_COUNT;
use thiserror::Error;

/// Size of the reference address space in bytes.
pub const DEFAULT_MEMORY_SIZE: usize = 944;

/// First logical address of the reference address space.
pub const DEFAULT_DISPLAY_BASE: u16 = 0x800;

/// Reasons a [`MemoryLayout`] can be rejected.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LayoutError {
    #[error("memory size must be between {min} and {max} bytes, got {size}")]
    InvalidSize { size: usize, min: usize, max: usize },

    #[error("input port window at 0x{base:04X} does not fit in {size} bytes of memory")]
    PortWindowOutOfRange { base: u16, size: usize },

    #[error("stack top 0x{stack_top:04X} is outside of {size} bytes of memory")]
    StackOutOfRange { stack_top: u16, size: usize },

    #[error("logical window starting at 0x{base:04X} with {size} bytes overflows 16-bit addressing")]
    DisplayWindowOverflow { base: u16, size: usize },
}

/// Address space layout used by [`CPU`](crate::CPU) and the assembler.
///
/// # Examples
///
/// ```
/// use lib8080::MemoryLayout;
///
/// let layout = MemoryLayout::default();
/// assert_eq!(layout.size, 944);
/// assert_eq!(layout.display_end(), 0xBB0);
/// assert!(layout.validate().is_ok());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MemoryLayout {
    /// Number of bytes in the address space.
    pub size: usize,

    /// Logical address of index 0, used by front ends and by the assembler
    /// for address operands. The core never translates through it.
    pub display_base: u16,

    /// Index of input port 0 inside the address space.
    pub input_ports_base: u16,

    /// Initial stack pointer after a reset.
    pub stack_top: u16,
}

impl MemoryLayout {
    /// Smallest address space that can still hold the port window and a stack.
    pub const MIN_SIZE: usize = PORT_COUNT + 4;

    /// Largest address space a 16-bit PC can still run off the end of.
    pub const MAX_SIZE: usize = 0xFFFF;

    /// Builds a layout of `size` bytes with the port window in the last
    /// [`PORT_COUNT`] bytes and the stack directly below it.
    pub fn with_size(size: usize) -> Result<Self, LayoutError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&size) {
            return Err(LayoutError::InvalidSize {
                size,
                min: Self::MIN_SIZE,
                max: Self::MAX_SIZE,
            });
        }
        let input_ports_base = (size - PORT_COUNT) as u16;
        let layout = Self {
            size,
            display_base: 0,
            input_ports_base,
            stack_top: input_ports_base - 1,
        };
        layout.validate()?;
        Ok(layout)
    }

    /// One past the last logical address.
    pub fn display_end(&self) -> u32 {
        self.display_base as u32 + self.size as u32
    }

    /// Converts a logical address into an index, if it lies inside the window.
    pub fn to_index(&self, logical: u16) -> Option<u16> {
        if (logical as u32) < self.display_end() && logical >= self.display_base {
            Some(logical - self.display_base)
        } else {
            None
        }
    }

    /// Checks that every region fits inside the address space.
    pub fn validate(&self) -> Result<(), LayoutError> {
        if !(Self::MIN_SIZE..=Self::MAX_SIZE).contains(&self.size) {
            return Err(LayoutError::InvalidSize {
                size: self.size,
                min: Self::MIN_SIZE,
                max: Self::MAX_SIZE,
            });
        }
        if self.input_ports_base as usize + PORT_COUNT > self.size {
            return Err(LayoutError::PortWindowOutOfRange {
                base: self.input_ports_base,
                size: self.size,
            });
        }
        // push writes at SP and SP-1
        if self.stack_top == 0 || self.stack_top as usize >= self.size {
            return Err(LayoutError::StackOutOfRange {
                stack_top: self.stack_top,
                size: self.size,
            });
        }
        if self.display_end() > u16::MAX as u32 + 1 {
            return Err(LayoutError::DisplayWindowOverflow {
                base: self.display_base,
                size: self.size,
            });
        }
        Ok(())
    }
}

impl Default for MemoryLayout {
    fn default() -> Self {
        let input_ports_base = (DEFAULT_MEMORY_SIZE - PORT_COUNT) as u16;
        Self {
            size: DEFAULT_MEMORY_SIZE,
            display_base: DEFAULT_DISPLAY_BASE,
            input_ports_base,
            stack_top: input_ports_base - 1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_layout_matches_reference_machine() {
        let layout = MemoryLayout::default();
        assert_eq!(layout.size, 944);
        assert_eq!(layout.display_base, 0x800);
        assert_eq!(layout.input_ports_base, 928);
        assert_eq!(layout.stack_top, 927);
        assert_eq!(layout.validate(), Ok(()));
    }

    #[test]
    fn test_to_index() {
        let layout = MemoryLayout::default();
        assert_eq!(layout.to_index(0x800), Some(0));
        assert_eq!(layout.to_index(0xBAF), Some(943));
        assert_eq!(layout.to_index(0xBB0), None);
        assert_eq!(layout.to_index(0x7FF), None);
    }

    #[test]
    fn test_with_size() {
        let layout = MemoryLayout::with_size(256).unwrap();
        assert_eq!(layout.input_ports_base, 240);
        assert_eq!(layout.stack_top, 239);

        assert!(matches!(
            MemoryLayout::with_size(4),
            Err(LayoutError::InvalidSize { .. })
        ));
    }

    #[test]
    fn test_with_size_stops_below_64k() {
        let layout = MemoryLayout::with_size(0xFFFF).unwrap();
        assert_eq!(layout.input_ports_base, 0xFFEF);
        assert_eq!(layout.stack_top, 0xFFEE);

        assert_eq!(
            MemoryLayout::with_size(0x1_0000),
            Err(LayoutError::InvalidSize {
                size: 0x1_0000,
                min: MemoryLayout::MIN_SIZE,
                max: 0xFFFF,
            })
        );
    }

    #[test]
    fn test_validate_rejects_bad_regions() {
        let mut layout = MemoryLayout::default();
        layout.input_ports_base = 940;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::PortWindowOutOfRange { .. })
        ));

        let mut layout = MemoryLayout::default();
        layout.stack_top = 944;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::StackOutOfRange { .. })
        ));

        let mut layout = MemoryLayout::default();
        layout.display_base = 0xFF00;
        assert!(matches!(
            layout.validate(),
            Err(LayoutError::DisplayWindowOverflow { .. })
        ));
    }
}
