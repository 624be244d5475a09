//! Auth types shared across Elevate services.
//!
//! Session tokens are validated at the gateway; services only see the
//! resulting identity headers.

pub mod identity;
