mod camera;
mod component;
mod counts;
mod drag;
mod filter;
mod frame;
mod listener;
mod render;
mod scale;
mod settings;
mod state;
mod store;
mod types;

pub use component::SimilarityGraphCanvas;
pub use counts::{CategoryCount, GraphCounts};
pub use filter::FilterState;
pub use settings::GraphSettings;
pub use types::Dataset;
