//! Top-level facade crate for burnin.
//!
//! Re-exports the workload kernels and the server library so users can depend
//! on a single crate.

pub mod core {
    pub use burnin_core::*;
}

pub mod server {
    pub use burnin_server::*;
}
