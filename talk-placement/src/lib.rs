//! Places the talks of a conference into parallel tracks so that the total conflict cost is
//! minimal.
//!
//! Two talks that an attendee would want to see both conflict when they are scheduled in the
//! same track, which costs the amount given by the [`CostTable`]. A [`PlacementModel`] turns an
//! instance and its costs into a finite-domain model, and a [`SearchStrategy`] searches it,
//! returning a [`PlacementReport`].
//!
//! ```rust
//! # use talk_placement::CostSource;
//! # use talk_placement::PlacementInstance;
//! # use talk_placement::PlacementModel;
//! # use talk_placement::SearchOutcome;
//! # use talk_placement::SearchStrategy;
//! let instance = PlacementInstance::balanced(2, 2, 10);
//! let costs = CostSource::Explicit(vec![(0, 1, 10), (2, 3, 10)]);
//!
//! let table = costs.build_table(&instance).expect("valid costs");
//! let mut model = PlacementModel::build(instance, table).expect("valid instance");
//! let report = SearchStrategy::new(&mut model).find_optimal(0);
//!
//! assert_eq!(report.outcome(), SearchOutcome::Optimal);
//! assert_eq!(report.total_cost(), Some(0));
//! ```
pub mod cost_table;
pub mod instance;
pub mod lower_bound;
pub mod model;
pub mod report;
pub mod result;
pub mod search;

pub use cost_table::CostTable;
pub use cost_table::TalkPair;
pub use instance::CostSource;
pub use instance::PlacementInstance;
pub use model::PlacementModel;
pub use report::PlacementReport;
pub use report::SearchOutcome;
pub use result::PlacementError;
pub use result::PlacementResult;
pub use search::SearchStrategy;
