pub mod command_queue;
pub mod reactive_property;
