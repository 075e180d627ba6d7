pub mod app;
pub mod clock;
pub mod config;
pub mod errors;
pub mod github;
pub mod grid;
pub mod handlers;
pub mod level;
pub mod models;
pub mod proxy;
pub mod state;
pub mod stats;
pub mod ui;
pub mod widget;
pub mod window;

pub use app::router;
pub use clock::{Clock, FixedClock, SystemClock};
pub use config::{ProxyConfig, WidgetConfig};
pub use errors::{AppError, CalendarError};
pub use models::ContributionDay;
pub use state::AppState;
pub use widget::{CalendarState, CalendarWidget};
pub use window::{DateWindow, WeekStart};
