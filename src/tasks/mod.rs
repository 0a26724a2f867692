pub mod gate;
pub mod poller;
