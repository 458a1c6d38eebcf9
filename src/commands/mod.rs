mod graph;
mod info;
mod simulate;

pub use graph::graph;
pub use info::info;
pub use simulate::simulate;
