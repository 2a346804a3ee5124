//! # View service modules
//!
//! Ready-made implementations of the view service communication traits.

#[macro_use]
extern crate log;
extern crate crossbeam_channel;
extern crate viewservice;

mod communication;

pub use communication::duplex_channel::DuplexChannel;
pub use communication::inproc::inproc_view_service_communicator::InProcViewServiceCommunicator;
