pub mod coordinator;
pub mod directory;
pub mod message;
pub mod ports;
pub mod preview;
pub mod selection;
pub mod send;
pub mod subscriber;

pub use coordinator::{Attempt, Refusal, SendCoordinator};
pub use directory::SubscriberDirectory;
pub use message::{Format, Message, MessageComposer};
pub use preview::{DisplayFragment, PreviewRenderer};
pub use selection::SelectionModel;
pub use send::{SendOutcome, SendRequest, SendStatus};
pub use subscriber::Subscriber;
