pub mod answer;
pub mod chart;
pub mod due;
pub mod forgotten;
pub mod review;
pub mod stats;
