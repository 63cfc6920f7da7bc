//! The eight container operations described in the on-disk-format spec,
//! built entirely on top of [`crate::Container`] and the [`crate::Header`]
//! / [`crate::Entry`] codec.

mod add;
mod cat;
mod create;
mod defragment;
mod extract;
mod list;
mod remove;
mod stat;

pub use add::add;
pub use cat::{cat, cat_to_stdout};
pub use create::create;
pub use defragment::{defragment, DefragmentReport};
pub use extract::extract;
pub use list::{list, ListedFile};
pub use remove::remove;
pub use stat::{stat, Stat};
