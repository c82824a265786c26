//! Report publication.
//!
//! The report is wrapped in a fixed envelope and published once to a topic.
//! Delivery beyond the topic (chat, mail) is the topic subscribers' business.

pub mod envelope;
pub mod in_memory;
pub mod publisher;

pub use envelope::{EnvelopeContent, NotificationEnvelope};
pub use in_memory::RecordingPublisher;
pub use publisher::{Delivery, NotifyError, Notifier, TopicPublisher, publishing_disabled};
