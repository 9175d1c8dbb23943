//! Input and output port arrays.
//!
//! Sixteen input and sixteen output byte slots model the external devices.
//! Input ports are additionally mirrored into the address space by the CPU.

/// Number of slots in each port array.
pub const PORT_COUNT: usize = 16;

/// Output port reserved for requests to the host. Writing a value with bit 0
/// set asks the host to reset its input devices.
pub const CONTROL_PORT: u8 = 0x10;

/// The two port arrays.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct Ports {
    input: [u8; PORT_COUNT],
    output: [u8; PORT_COUNT],
}

impl Ports {
    /// Converts a host supplied port number into an array index.
    pub fn index(port: i32) -> Option<usize> {
        usize::try_from(port).ok().filter(|&p| p < PORT_COUNT)
    }

    pub fn input(&self, port: usize) -> Option<u8> {
        self.input.get(port).copied()
    }

    pub fn output(&self, port: usize) -> Option<u8> {
        self.output.get(port).copied()
    }

    pub fn inputs(&self) -> &[u8; PORT_COUNT] {
        &self.input
    }

    pub fn outputs(&self) -> &[u8; PORT_COUNT] {
        &self.output
    }

    /// Stores an input value. Returns `false` if `port` is out of range.
    pub(crate) fn set_input(&mut self, port: usize, value: u8) -> bool {
        match self.input.get_mut(port) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }

    /// Stores an output value. Returns `false` if `port` is out of range.
    pub(crate) fn set_output(&mut self, port: usize, value: u8) -> bool {
        match self.output.get_mut(port) {
            Some(slot) => {
                *slot = value;
                true
            }
            None => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_bounds() {
        assert_eq!(Ports::index(0), Some(0));
        assert_eq!(Ports::index(15), Some(15));
        assert_eq!(Ports::index(16), None);
        assert_eq!(Ports::index(-1), None);
    }

    #[test]
    fn test_set_out_of_range() {
        let mut ports = Ports::default();
        assert!(!ports.set_output(16, 5));
        assert!(!ports.set_input(16, 5));
        assert_eq!(ports, Ports::default());

        assert!(ports.set_output(3, 7));
        assert_eq!(ports.output(3), Some(7));
        assert_eq!(ports.input(3), Some(0));
    }
}
