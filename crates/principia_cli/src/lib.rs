//! Terminal client for the Principia HTTP API.

pub mod client;
pub mod view;

pub use client::{ClientError, ClientResult, PrinciplesClient};
pub use view::{categories, filter_by_category, render_grouped, render_stats, DisplayStats};
