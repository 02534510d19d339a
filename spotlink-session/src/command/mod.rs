mod channel;

pub use channel::CommandChannel;
