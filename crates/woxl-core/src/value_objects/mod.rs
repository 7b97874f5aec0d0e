//! Value objects - immutable types that represent domain concepts

mod duration;
mod ids;
mod page;
mod role_level;

pub use duration::parse_duration;
pub use ids::{ChatId, IdParseError, UserId};
pub use page::{Page, PageRequest, Remaining, DEFAULT_PER_PAGE};
pub use role_level::RoleLevel;
