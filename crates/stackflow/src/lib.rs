//! GCP web server stack
//!
//! Declares a VPC network, a firewall rule opening SSH and HTTP, and a single
//! VM instance that serves a static page, then exports the instance's name and
//! external IP.

pub mod derive;
pub mod preview;
pub mod program;

pub use derive::{DeriveError, instance_ip};
pub use preview::{PreviewMonitor, PreviewReport};
pub use program::{StackResources, declare, run};
