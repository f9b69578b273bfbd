//! StackFlow core
//!
//! Declarative resource graphs for infrastructure-as-code programs. A program
//! registers resources with a [`Context`]; every resource input and output is
//! an [`Output`], a deferred value that resolves once the resources it depends
//! on have been provisioned by the [`ResourceMonitor`] behind the context.
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────┐
//! │                  program(ctx)                   │
//! │     register_resource / export / invoke         │
//! └─────────────────┬───────────────────────────────┘
//!                   │
//! ┌─────────────────▼───────────────────────────────┐
//! │               stackflow-core                    │
//! │  ┌──────────────┐  ┌──────────────────────────┐ │
//! │  │  Output<T>   │  │  Context (URNs, exports, │ │
//! │  │  Inputs      │  │  pending registrations)  │ │
//! │  └──────────────┘  └────────────┬─────────────┘ │
//! └─────────────────────────────────┼───────────────┘
//!                                   │
//!                 ┌─────────────────▼───────────────┐
//!                 │  trait ResourceMonitor { ... }  │
//!                 │  (engine, preview, mock)        │
//!                 └─────────────────────────────────┘
//! ```

pub mod action;
pub mod context;
pub mod error;
#[cfg(any(test, feature = "test-support"))]
pub mod mock;
pub mod monitor;
pub mod output;
pub mod property;

// Re-exports
pub use action::{Action, ActionType, Plan, PlanSummary};
pub use context::{Context, CustomResource, StackOutputs};
pub use error::{CloudError, Result};
pub use monitor::ResourceMonitor;
pub use output::{Output, OutputError, OutputResolver};
pub use property::{Inputs, IntoPropertyValue, PropertyMap};
