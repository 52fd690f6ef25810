//! Files generated for the freezer.
//!
//! - `hook` - runtime hook redirecting Qt to its bundled assets
//! - `entitlements` - hardened-runtime entitlements manifest

mod entitlements;
mod hook;

pub use entitlements::{ENTITLEMENT_KEYS, render_entitlements, write_entitlements};
pub use hook::{render_runtime_hook, write_runtime_hook};
