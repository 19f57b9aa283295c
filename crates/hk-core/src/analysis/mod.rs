//! Analyses computed over a simulated profile or trajectory.

pub mod clusters;
pub mod order;
pub mod tally;

pub use clusters::{
    cluster_statistics, count_clusters, ClusterDetector, ClusterMatch, ClusterStatistics, Clusters,
    SweepOrder,
};
pub use order::{order_parameter, order_parameter_series, OrderSample};
pub use tally::{ClusterTally, RunningStat};
