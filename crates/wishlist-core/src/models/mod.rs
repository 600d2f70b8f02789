pub mod item;

pub use item::{Item, ItemPatch, ItemSpec};
