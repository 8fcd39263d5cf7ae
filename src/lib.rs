pub mod sdk;

pub use sdk::click::ClickOutcome;
pub use sdk::config::{PickerConfig, RoutingConfig};
pub use sdk::map::{ClickEvent, HeadlessMap, MapDisplay, MapPoint};
pub use sdk::orchestrator::{PendingRoute, RouteUpdate};
pub use sdk::report::{format_duration, RouteReport};
pub use sdk::routing::{RemoteRoutingProvider, RouteResult, RoutingError, RoutingService};
pub use sdk::selection::{GeoPoint, NamedPoint, Selection, TransportMode};
pub use sdk::session::{Dispatch, RoutePicker, RouteStatus};
