//! Service availability and the public status page for Vigil.
//!
//! Everything here is a pure function of store snapshots: no I/O, no shared
//! state, no error path. Degenerate input gives an empty or neutral result.
//!
//! - [`compute_availability`]: downtime and availability per service
//! - [`ReportingWindow`]: turns a caller's `periodHours` into a window
//! - [`derive_overall_status`] and [`StatusPage`]: the public summary
//!
//! # Example
//!
//! ```rust
//! use chrono::{Duration, Utc};
//! use vigil_status::{ReportingWindow, compute_availability};
//!
//! let window = ReportingWindow::from_period_hours(Some(0), Utc::now());
//! assert_eq!(window.duration(), Duration::hours(24));
//!
//! let availability = compute_availability(&[], &[], window.start, window.end);
//! assert!(availability.is_empty());
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod availability;
pub mod page;
pub mod window;

pub use availability::{OverlapPolicy, compute_availability, compute_availability_with};
pub use page::{
    CURRENT_MESSAGE, OverallStatus, PublicIncident, RESPONSE_PLAYBOOK, StatusPage,
    derive_overall_status,
};
pub use window::{
    DEFAULT_PERIOD_HOURS, MAX_PERIOD_HOURS, ReportingWindow, is_valid_period_hours,
};
