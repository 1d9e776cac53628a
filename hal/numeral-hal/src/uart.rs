//! UART serial communication abstractions
//!
//! Provides blocking and polled serial traits that can be implemented
//! by chip-specific code.

/// UART transmitter
pub trait UartTx {
    /// Error type for transmit operations
    type Error;

    /// Write data to the UART
    ///
    /// Blocks until all data has been written or an error occurs.
    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error>;

    /// Flush any buffered data
    fn flush(&mut self) -> Result<(), Self::Error>;

    /// Write a line of text followed by `\n`
    fn write_line(&mut self, line: &str) -> Result<(), Self::Error> {
        self.write_blocking(line.as_bytes())?;
        self.write_blocking(b"\n")
    }
}

/// UART receiver
pub trait UartRx {
    /// Error type for receive operations
    type Error;

    /// Read data from the UART
    ///
    /// Blocks until at least one byte is available, returns the count read.
    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error>;

    /// Read a single byte from the UART
    fn read_byte(&mut self) -> Result<u8, Self::Error> {
        let mut buf = [0u8; 1];
        self.read_blocking(&mut buf)?;
        Ok(buf[0])
    }

    /// Poll for a single byte
    ///
    /// Waits at most `timeout_us` microseconds. Returns `Ok(None)` when
    /// nothing arrived in that window so the caller can do periodic work.
    fn read_byte_timeout(&mut self, timeout_us: u32) -> Result<Option<u8>, Self::Error>;
}

/// Combined UART interface
///
/// For UARTs that provide both TX and RX on a single peripheral.
pub trait Uart: UartTx + UartRx {}

// Blanket implementation
impl<T: UartTx + UartRx> Uart for T {}

#[cfg(test)]
mod tests {
    use super::*;

    struct Loopback {
        data: [u8; 16],
        len: usize,
        pos: usize,
    }

    impl Loopback {
        fn new() -> Self {
            Self {
                data: [0; 16],
                len: 0,
                pos: 0,
            }
        }
    }

    impl UartTx for Loopback {
        type Error = ();

        fn write_blocking(&mut self, data: &[u8]) -> Result<(), ()> {
            if self.len + data.len() > self.data.len() {
                return Err(());
            }
            self.data[self.len..self.len + data.len()].copy_from_slice(data);
            self.len += data.len();
            Ok(())
        }

        fn flush(&mut self) -> Result<(), ()> {
            Ok(())
        }
    }

    impl UartRx for Loopback {
        type Error = ();

        fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, ()> {
            let n = buf.len().min(self.len - self.pos);
            buf[..n].copy_from_slice(&self.data[self.pos..self.pos + n]);
            self.pos += n;
            Ok(n)
        }

        fn read_byte_timeout(&mut self, _timeout_us: u32) -> Result<Option<u8>, ()> {
            if self.pos < self.len {
                let b = self.data[self.pos];
                self.pos += 1;
                Ok(Some(b))
            } else {
                Ok(None)
            }
        }
    }

    #[test]
    fn test_write_line_appends_newline() {
        let mut uart = Loopback::new();
        uart.write_line("ok").unwrap();
        assert_eq!(&uart.data[..uart.len], b"ok\n");
    }

    #[test]
    fn test_read_byte_default() {
        let mut uart = Loopback::new();
        uart.write_blocking(&[7, 9]).unwrap();
        assert_eq!(uart.read_byte().unwrap(), 7);
        assert_eq!(uart.read_byte_timeout(100).unwrap(), Some(9));
        assert_eq!(uart.read_byte_timeout(100).unwrap(), None);
    }

    #[test]
    fn test_write_overflow_is_error() {
        let mut uart = Loopback::new();
        assert!(uart.write_blocking(&[0u8; 17]).is_err());
    }
}
