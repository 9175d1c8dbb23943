//! # Condition Flags
//!
//! Five independent booleans derived from the result of arithmetic and logical
//! instructions. Results are computed into a widened `u16` before narrowing so
//! the carry out of bit 7 is still visible when the flags are derived.
//!
//! The auxiliary carry rule here is `low byte > 0x09`. It is an approximation
//! of the nibble carry of the real chip that programs for this machine rely on,
//! so it is kept exactly as is.

/// Returns true if the low 8 bits of `value` contain an even number of ones.
///
/// # Examples
///
/// ```
/// use lib8080::parity;
///
/// assert!(parity(0b0000_0011));
/// assert!(!parity(0b0000_0001));
/// assert!(parity(0x0100)); // only the low byte is counted
/// ```
pub fn parity(value: u16) -> bool {
    (value as u8).count_ones() % 2 == 0
}

/// Sign, Zero, Auxiliary-carry, Parity and Carry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Flags {
    /// Bit 7 of the last result
    pub sign: bool,
    /// Last result was zero
    pub zero: bool,
    /// Low byte of the last result exceeded 0x09
    pub aux_carry: bool,
    /// Last result had even parity
    pub parity: bool,
    /// Unsigned overflow or borrow
    pub carry: bool,
}

impl Flags {
    /// Derives all five flags from a widened result.
    ///
    /// Carry is set when the unmasked value does not fit in eight bits.
    pub fn check(&mut self, wide: u16) {
        self.check_arith(wide);
        self.carry = wide > 0xFF;
    }

    /// Derives Sign, Zero, Auxiliary-carry and Parity, leaving Carry alone.
    pub fn check_arith(&mut self, wide: u16) {
        let low = wide & 0x00FF;
        self.zero = low == 0;
        self.sign = low & 0x80 != 0;
        self.aux_carry = low > 0x09;
        self.parity = parity(low);
    }

    /// Flags after AND/OR/XOR: Carry and Auxiliary-carry are always cleared.
    pub fn check_logic(&mut self, result: u8) {
        self.check(result as u16);
        self.carry = false;
        self.aux_carry = false;
    }

    /// Flags after a comparison of `a` with `operand`. Auxiliary-carry is not
    /// touched.
    pub fn check_compare(&mut self, a: u8, operand: u8) {
        let difference = a.wrapping_sub(operand);
        self.zero = difference == 0;
        self.sign = difference & 0x80 != 0;
        self.parity = parity(difference as u16);
        self.carry = a < operand;
    }
}
