pub mod card;
pub mod client;
pub mod controller;
pub mod dashboard;
pub mod endpoints;
pub mod model;
pub mod session;
pub mod status;

pub use card::{Card, MAX_CARDS};
pub use client::MovieClient;
pub use controller::{Controller, FetchOutcome, Route};
pub use dashboard::Dashboard;
pub use model::movie::Movie;
pub use session::{MemorySessionStore, SessionStore, SharedSession};
