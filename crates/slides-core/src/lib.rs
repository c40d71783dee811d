pub mod ids;
pub mod last_added;
pub mod ops;
pub mod slide;
pub mod tree;

pub use ids::{IdSource, SequentialIds, UuidIds};
pub use last_added::LastAdded;
pub use ops::SiblingLevel;
pub use slide::{Slide, SlideId};
pub use tree::{ForestError, SlideIndex};
