mod watch_list;

pub use watch_list::Watchers;
pub(crate) use watch_list::WatchList;
