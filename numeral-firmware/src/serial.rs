//! Serial port adapter
//!
//! Wraps a buffered UART reader/writer pair as a [`numeral_hal::Uart`].
//! The receive timeout polls `ReadReady` against an embassy-time deadline,
//! so the caller spins for at most the requested window.

use embassy_time::{Duration, Instant};
use embedded_io::{Read, ReadReady, Write};

use numeral_hal::{UartRx, UartTx};

/// Serial link to the host
pub struct SerialPort<RX, TX> {
    rx: RX,
    tx: TX,
}

impl<RX, TX> SerialPort<RX, TX> {
    pub fn new(rx: RX, tx: TX) -> Self {
        Self { rx, tx }
    }
}

impl<RX, TX> UartRx for SerialPort<RX, TX>
where
    RX: Read + ReadReady,
{
    type Error = RX::Error;

    fn read_blocking(&mut self, buf: &mut [u8]) -> Result<usize, Self::Error> {
        self.rx.read(buf)
    }

    fn read_byte_timeout(&mut self, timeout_us: u32) -> Result<Option<u8>, Self::Error> {
        let deadline = Instant::now() + Duration::from_micros(timeout_us as u64);
        loop {
            if self.rx.read_ready()? {
                let mut byte = [0u8; 1];
                if self.rx.read(&mut byte)? == 1 {
                    return Ok(Some(byte[0]));
                }
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
        }
    }
}

impl<RX, TX> UartTx for SerialPort<RX, TX>
where
    TX: Write,
{
    type Error = TX::Error;

    fn write_blocking(&mut self, data: &[u8]) -> Result<(), Self::Error> {
        self.tx.write_all(data)
    }

    fn flush(&mut self) -> Result<(), Self::Error> {
        self.tx.flush()
    }
}
