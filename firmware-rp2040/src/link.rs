//! UART transport for the vision sensor.
//!
//! # Pins
//!
//! Uses UART1:
//! - GPIO 8: TX
//! - GPIO 9: RX

use embassy_rp::uart::{Async, Error as UartError, Uart};
use gimbal_core::{LinkError, SerialLink};

/// Convert UART errors to [`LinkError`].
///
/// A helper rather than a `From` impl: both types live in other crates.
#[inline]
fn uart_error_to_link_error(e: UartError) -> LinkError {
    match e {
        UartError::Framing => LinkError::Framing,
        UartError::Overrun => LinkError::Overrun,
        UartError::Break => LinkError::Break,
        _ => LinkError::Io,
    }
}

/// Full-duplex UART carrying both the coordinate stream and the command
/// protocol.
pub struct UartLink<'d> {
    uart: Uart<'d, Async>,
}

impl<'d> UartLink<'d> {
    #[must_use]
    pub fn new(uart: Uart<'d, Async>) -> Self {
        Self { uart }
    }

    pub fn uart_mut(&mut self) -> &mut Uart<'d, Async> {
        &mut self.uart
    }
}

impl SerialLink for UartLink<'_> {
    async fn read_byte(&mut self) -> Result<u8, LinkError> {
        let mut byte = [0u8; 1];
        self.uart
            .read(&mut byte)
            .await
            .map_err(uart_error_to_link_error)?;
        Ok(byte[0])
    }

    async fn write_byte(&mut self, byte: u8) -> Result<(), LinkError> {
        self.uart
            .write(&[byte])
            .await
            .map_err(uart_error_to_link_error)
    }

    async fn flush(&mut self) -> Result<(), LinkError> {
        // Spins until the shift register is empty: at most one character
        // time once the DMA write has completed.
        self.uart.blocking_flush().map_err(uart_error_to_link_error)
    }
}
