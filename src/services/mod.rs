//! Service layer.
//!
//! The only service is the notification dispatch engine; the CLI and the
//! scheduler both drive it through [`notifications::Dispatcher`].

pub mod notifications;
