pub mod dto;
pub mod engine;
pub mod handler;
pub mod model;
pub mod normalize;
pub mod service;

pub use engine::{DashboardCriteria, EventMetrics, EventQueryEngine, SearchCriteria};
pub use model::{EventDate, EventId, EventRecord, EventStatus, Price};
pub use normalize::{normalize_event, normalize_events};
