//! USB transport for the tablet's interrupt endpoint.
//!
//! Bring-up mirrors what the kernel would do for a HID device we are
//! taking over: find the device by vendor/product id, detach the kernel
//! driver if it already claimed interface 0, set the configuration
//! (tolerating "already configured"), locate the interrupt IN endpoint,
//! and claim the interface.
//!
//! [`UsbTablet::read_report`] is the polling loop's single suspension
//! point: a bounded interrupt read where a timeout is a normal outcome
//! and every other error is fatal.

use std::time::Duration;

use rusb::{Direction, GlobalContext, TransferType};
use thiserror::Error;
use tracing::{debug, info, warn};

/// Bounded wait per interrupt read; also the cancellation poll interval.
const READ_TIMEOUT: Duration = Duration::from_millis(100);

/// Errors raised by the USB transport.
#[derive(Debug, Error)]
pub enum TransportError {
    /// No matching device on the bus.
    #[error("tablet {vendor:04x}:{product:04x} not found (is it plugged in?)")]
    NotFound { vendor: u16, product: u16 },

    /// Interface 0 exposes no interrupt IN endpoint.
    #[error("no interrupt IN endpoint on interface 0")]
    NoInterruptEndpoint,

    /// Any other USB-level failure.
    #[error("usb {action} failed: {source}")]
    Usb {
        action: &'static str,
        source: rusb::Error,
    },
}

/// Outcome of one bounded read.
#[derive(Debug, PartialEq, Eq)]
pub enum PollOutcome {
    /// A report of the given byte length landed in the buffer.
    Report(usize),
    /// The bounded wait elapsed with no data; not an error.
    TimedOut,
}

/// Open handle to the physical tablet.
pub struct UsbTablet {
    handle: rusb::DeviceHandle<GlobalContext>,
    endpoint: u8,
    max_packet_size: usize,
}

impl UsbTablet {
    /// Finds, configures, and claims the tablet.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError`] on any bring-up failure; all are fatal
    /// startup errors.
    pub fn open(vendor: u16, product: u16) -> Result<Self, TransportError> {
        info!("looking for tablet {vendor:04x}:{product:04x}");
        let mut handle = rusb::open_device_with_vid_pid(vendor, product)
            .ok_or(TransportError::NotFound { vendor, product })?;

        if handle.kernel_driver_active(0).unwrap_or(false) {
            match handle.detach_kernel_driver(0) {
                Ok(()) => info!("detached kernel driver from interface 0"),
                Err(error) => warn!(%error, "could not detach kernel driver"),
            }
        }

        // The device is usually already configured; only log the failure.
        if let Err(error) = handle.set_active_configuration(1) {
            debug!(%error, "set_configuration skipped");
        }

        let (endpoint, max_packet_size) = find_interrupt_in_endpoint(&handle)?;
        handle
            .claim_interface(0)
            .map_err(|source| TransportError::Usb {
                action: "claim interface",
                source,
            })?;
        info!("using endpoint 0x{endpoint:02x} ({max_packet_size} byte packets)");

        Ok(Self {
            handle,
            endpoint,
            max_packet_size,
        })
    }

    /// Largest report the endpoint can deliver; sizes the read buffer.
    pub fn max_packet_size(&self) -> usize {
        self.max_packet_size
    }

    /// Performs one bounded interrupt read into `buf`.
    ///
    /// # Errors
    ///
    /// Returns [`TransportError::Usb`] for any failure other than the
    /// timeout, which is reported as [`PollOutcome::TimedOut`].
    pub fn read_report(&mut self, buf: &mut [u8]) -> Result<PollOutcome, TransportError> {
        match self.handle.read_interrupt(self.endpoint, buf, READ_TIMEOUT) {
            Ok(len) => Ok(PollOutcome::Report(len)),
            Err(rusb::Error::Timeout) => Ok(PollOutcome::TimedOut),
            Err(source) => Err(TransportError::Usb {
                action: "interrupt read",
                source,
            }),
        }
    }
}

impl Drop for UsbTablet {
    fn drop(&mut self) {
        // Best-effort: log and carry on so later cleanup steps still run.
        if let Err(error) = self.handle.release_interface(0) {
            warn!(%error, "failed to release tablet interface");
        }
    }
}

fn find_interrupt_in_endpoint(
    handle: &rusb::DeviceHandle<GlobalContext>,
) -> Result<(u8, usize), TransportError> {
    let config = handle
        .device()
        .active_config_descriptor()
        .map_err(|source| TransportError::Usb {
            action: "read config descriptor",
            source,
        })?;

    for interface in config.interfaces() {
        for descriptor in interface.descriptors() {
            for endpoint in descriptor.endpoint_descriptors() {
                if endpoint.direction() == Direction::In
                    && endpoint.transfer_type() == TransferType::Interrupt
                {
                    return Ok((endpoint.address(), usize::from(endpoint.max_packet_size())));
                }
            }
        }
    }
    Err(TransportError::NoInterruptEndpoint)
}
