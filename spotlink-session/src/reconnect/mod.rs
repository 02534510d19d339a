mod supervisor;
mod supervisor_command;

pub use supervisor::ReconnectSupervisor;
pub use supervisor_command::SupervisorCommand;
