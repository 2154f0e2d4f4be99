//! The board data model: geometry primitives, ids, and the Component / Net /
//! Track / Via / Zone / Board types that flow through the pipeline.
pub mod board;
pub mod circle;
pub mod component;
pub mod geom;
pub mod ids;
pub mod net;
pub mod path;
pub mod polygon;
pub mod pt;
pub mod rt;
pub mod shape;
pub mod sz;
pub mod tf;
pub mod track;
pub mod via;
pub mod zone;
