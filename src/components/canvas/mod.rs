mod component;
mod render;
mod state;

pub use component::{DiagramCanvas, install_zoom_shortcuts};

