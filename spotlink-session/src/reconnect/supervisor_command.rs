use spotlink_core::RemoteAddress;

/// Control commands accepted by the reconnect supervisor task.
#[derive(Debug)]
pub enum SupervisorCommand {
    /// Keep a data channel alive toward the given remote, restarting it
    /// whenever it drops.
    Activate { remote: RemoteAddress },

    /// Stop restarting. Does not close an already-healthy channel.
    Deactivate,
}
