//! Ordered array containers
//!
//! - **`SortedIntList`** - ascending `i32` list with O(n+m) intersection and merge

mod sorted_int_list;

pub use sorted_int_list::SortedIntList;
