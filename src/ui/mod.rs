/// UI layer: control panels and chart rendering.

pub mod panels;
pub mod plot;
