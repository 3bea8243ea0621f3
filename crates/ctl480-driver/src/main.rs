//! Wacom CTL-480 userspace driver entry point.
//!
//! Wires the USB transport to the virtual uinput pen and runs the
//! single-threaded polling loop.
//!
//! # Architecture
//!
//! ```text
//! main()
//!  └─ privilege check + DriverConfig::validate()
//!  └─ UinputPen::create()   -- virtual device registration
//!  └─ UsbTablet::open()     -- find/claim the physical tablet
//!  └─ polling loop
//!       ├─ read_report (100 ms bounded)  -> timeout: loop again
//!       ├─ parse_report                  -> None: silently dropped
//!       └─ TranslateReportUseCase        -> events + sync out the pen
//! ```
//!
//! Both exit paths — SIGINT flipping the running flag and a fatal
//! transport/device error — fall through to the same scope end, where
//! `Drop` destroys the virtual device and releases the USB interface.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use anyhow::{bail, Context};
use tracing::info;
use tracing_subscriber::EnvFilter;

use ctl480_core::{parse_report, report::MIN_REPORT_LEN, DriverConfig};
use ctl480_driver::application::translate::{EventSink, TranslateReportUseCase};
use ctl480_driver::infrastructure::uinput::UinputPen;
use ctl480_driver::infrastructure::usb::{PollOutcome, UsbTablet};

fn main() -> anyhow::Result<()> {
    // Initialise structured logging.
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    info!("Wacom CTL-480 userspace driver starting");

    // Both /dev/uinput and the raw USB device need elevated privilege.
    if unsafe { libc::geteuid() } != 0 {
        bail!("root privileges required to open the tablet and /dev/uinput");
    }

    let config = DriverConfig::default();
    config.validate().context("invalid driver configuration")?;

    let pen = UinputPen::create(&config).context("virtual device registration failed")?;
    let mut tablet = UsbTablet::open(config.identity.vendor, config.identity.product)
        .context("tablet transport setup failed")?;

    // SIGINT flips the running flag; the bounded read doubles as the
    // cancellation poll.
    let running = Arc::new(AtomicBool::new(true));
    {
        let running = Arc::clone(&running);
        ctrlc::set_handler(move || {
            info!("shutdown signal received");
            running.store(false, Ordering::Relaxed);
        })
        .context("failed to install the SIGINT handler")?;
    }

    let mut translator = TranslateReportUseCase::new(config, pen);

    info!("driver active; move the stylus on the tablet (Ctrl-C to stop)");
    let result = poll_loop(&running, &mut tablet, &mut translator);

    // translator (owning the pen) and tablet drop here on every exit
    // path; their Drop impls run the best-effort teardown.
    info!("driver stopped");
    result
}

/// Pulls reports until cancellation or a fatal error.
fn poll_loop<S: EventSink>(
    running: &AtomicBool,
    tablet: &mut UsbTablet,
    translator: &mut TranslateReportUseCase<S>,
) -> anyhow::Result<()> {
    let mut buf = vec![0u8; tablet.max_packet_size().max(MIN_REPORT_LEN)];

    while running.load(Ordering::Relaxed) {
        match tablet.read_report(&mut buf).context("tablet read failed")? {
            PollOutcome::TimedOut => continue,
            PollOutcome::Report(len) => {
                // Non-stylus reports decode to None and are skipped whole.
                if let Some(report) = parse_report(&buf[..len]) {
                    translator
                        .handle_report(&report)
                        .context("virtual device write failed")?;
                }
            }
        }
    }
    Ok(())
}
