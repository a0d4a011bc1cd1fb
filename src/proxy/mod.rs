mod cache;
mod collection_group;
mod discoverables;
mod error;
mod model;
mod recently_played;
mod search_history;
mod subscriber;

pub use cache::MemberCache;
pub use collection_group::CollectionGroupProxy;
pub use discoverables::DiscoverablesProxy;
pub use error::ProxyError;
pub use model::ProxyModel;
pub use recently_played::RecentlyPlayedProxy;
pub use search_history::SearchHistoryProxy;
pub use subscriber::SubscriberProxy;
