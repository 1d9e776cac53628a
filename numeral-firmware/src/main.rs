//! Numeral - Streaming Digit Classifier Firmware
//!
//! Main firmware binary for RP2040 boards with an SSD1306 OLED.
//! Receives 28x28 grayscale frames over UART, classifies them with a
//! quantized network on TensorFlow Lite Micro and reports the digit on the
//! serial line and the display.
//!
//! Pin assignments:
//! - UART0: GPIO0 (TX), GPIO1 (RX)
//! - I2C1:  GPIO14 (SDA), GPIO15 (SCL)

#![no_std]
#![no_main]

use defmt::*;
use embassy_executor::Spawner;
use embassy_rp::bind_interrupts;
use embassy_rp::i2c::{self, I2c};
use embassy_rp::peripherals::UART0;
use embassy_rp::uart::{BufferedInterruptHandler, Config as UartConfig, Uart};
use embassy_time::{Delay, Timer};
use static_cell::StaticCell;
use {defmt_rtt as _, panic_probe as _};

use numeral_core::{Pipeline, Step};
use numeral_display::{OledPresenter, Ssd1306};

use crate::config::DEVICE_CONFIG;
use crate::engine::TflmEngine;
use crate::serial::SerialPort;

mod config;
mod engine;
mod serial;

bind_interrupts!(struct Irqs {
    UART0_IRQ => BufferedInterruptHandler<UART0>;
});

// Static cells for UART buffers (must live forever)
// RX holds a whole frame so a burst from the host never overruns
static TX_BUF: StaticCell<[u8; 256]> = StaticCell::new();
static RX_BUF: StaticCell<[u8; 1024]> = StaticCell::new();

/// Main entry point
#[embassy_executor::main]
async fn main(_spawner: Spawner) {
    info!("Numeral firmware starting...");

    let p = embassy_rp::init(Default::default());
    info!("Peripherals initialized");

    let config = DEVICE_CONFIG;
    info!(
        "Config: {} baud, display at {=u8:#x} ({} Hz), progress every {} bytes, poll {} us",
        config.serial.baudrate,
        config.display.i2c_address,
        config.display.i2c_frequency,
        config.pipeline.progress_interval,
        config.pipeline.read_timeout_us
    );

    // Setup UART for the host link
    let mut uart_config = UartConfig::default();
    uart_config.baudrate = config.serial.baudrate;

    let tx_buf = TX_BUF.init([0u8; 256]);
    let rx_buf = RX_BUF.init([0u8; 1024]);

    let uart = Uart::new_blocking(p.UART0, p.PIN_0, p.PIN_1, uart_config);
    let uart = uart.into_buffered(Irqs, tx_buf, rx_buf);
    let (tx, rx) = uart.split();
    let mut serial = SerialPort::new(rx, tx);
    info!("UART initialized");

    // Setup I2C for the OLED (GPIO15=SCL, GPIO14=SDA)
    let mut i2c_config = i2c::Config::default();
    i2c_config.frequency = config.display.i2c_frequency;
    let i2c = I2c::new_blocking(p.I2C1, p.PIN_15, p.PIN_14, i2c_config);

    let mut display = Ssd1306::new(i2c, config.display.i2c_address);
    match display.init() {
        Ok(()) => info!("OLED initialized"),
        // Keep going; the serial report still works without the panel
        Err(e) => error!("Failed to initialize display: {:?}", e),
    }
    let presenter = OledPresenter::new(display);

    let Some(engine) = TflmEngine::take() else {
        defmt::panic!("TFLM engine already claimed");
    };

    let mut pipeline = Pipeline::new(engine, presenter, config.pipeline);

    match pipeline.start(&mut serial, &mut Delay) {
        Ok(params) => info!(
            "Engine ready: input scale={}, zero_point={}",
            params.scale(),
            params.zero_point()
        ),
        Err(e) => {
            error!("Engine init failed: {:?}", e);
            // Fatal; keep the error on screen until reset
            loop {
                Timer::after_secs(60).await;
                trace!("Halted");
            }
        }
    }

    info!("Waiting for frames");

    loop {
        match pipeline.poll(&mut serial) {
            Step::Idle => {}
            Step::Accepted { received } => trace!("RX: {} bytes", received),
            Step::Predicted(class) => info!("Predicted: {}", class.index()),
            Step::InferenceFailed(e) => warn!("Inference failed: {:?}", e),
            Step::ReadFailed => warn!("UART read error"),
            Step::Discarded(e) => warn!("Frame dropped: {:?}", e),
            Step::NotStarted | Step::Halted => {
                error!("Pipeline stopped in state {:?}", pipeline.state());
                Timer::after_secs(1).await;
            }
        }
    }
}
